// Infrastructure layer: command line, logging and benchmark wiring

pub mod bench;
pub mod cli;
pub mod logger;

pub use bench::run_bench;
pub use cli::{BackendArg, Cli};
pub use logger::init_logger;
