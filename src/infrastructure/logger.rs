use log::LevelFilter;

/// Installs `env_logger` at `level`. `RUST_LOG` can still refine per module.
pub fn init_logger(level: LevelFilter) -> anyhow::Result<()> {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp_millis()
        .try_init()?;
    Ok(())
}
