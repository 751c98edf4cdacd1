use crate::domain::{
    engine_service::{EngineError, MipEngine, Result},
    value_objects::EngineBackend,
};
use std::sync::Arc;

#[cfg(feature = "coin_cbc")]
use crate::engine::CoinCbcEngine;
#[cfg(feature = "highs")]
use crate::engine::HighsEngine;
#[cfg(feature = "microlp")]
use crate::engine::MicroLpEngine;

/// Factory for creating engine instances based on configuration
pub struct EngineFactory;

impl EngineFactory {
    /// Create an engine for a specific backend
    pub fn create(backend: EngineBackend) -> Result<Arc<dyn MipEngine>> {
        match backend {
            EngineBackend::Auto => Self::default_engine(),
            #[cfg(feature = "highs")]
            EngineBackend::Highs => Ok(Arc::new(HighsEngine::new())),
            #[cfg(feature = "coin_cbc")]
            EngineBackend::CoinCbc => Ok(Arc::new(CoinCbcEngine::new())),
            #[cfg(feature = "microlp")]
            EngineBackend::MicroLp => Ok(Arc::new(MicroLpEngine::new())),
            #[allow(unreachable_patterns)]
            other => Err(EngineError::EngineNotAvailable(format!(
                "{} support was not compiled in",
                other
            ))),
        }
    }

    /// Backends compiled into this build, in `Auto` preference order
    pub fn available() -> Vec<EngineBackend> {
        let mut backends = Vec::new();
        if cfg!(feature = "highs") {
            backends.push(EngineBackend::Highs);
        }
        if cfg!(feature = "coin_cbc") {
            backends.push(EngineBackend::CoinCbc);
        }
        if cfg!(feature = "microlp") {
            backends.push(EngineBackend::MicroLp);
        }
        backends
    }

    /// Get the preferred compiled-in engine
    pub fn default_engine() -> Result<Arc<dyn MipEngine>> {
        match Self::available().first() {
            Some(&backend) => Self::create(backend),
            None => Err(EngineError::EngineNotAvailable(
                "no MIP engine feature enabled (highs, coin_cbc, microlp)".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_matches_first_available() {
        match EngineFactory::available().first() {
            Some(&backend) => {
                let auto = EngineFactory::create(EngineBackend::Auto).unwrap();
                let direct = EngineFactory::create(backend).unwrap();
                assert_eq!(auto.name(), direct.name());
            }
            None => assert!(matches!(
                EngineFactory::create(EngineBackend::Auto),
                Err(EngineError::EngineNotAvailable(_))
            )),
        }
    }

    #[test]
    fn missing_backends_are_reported() {
        let available = EngineFactory::available();
        for backend in [EngineBackend::Highs, EngineBackend::CoinCbc, EngineBackend::MicroLp] {
            let created = EngineFactory::create(backend);
            if available.contains(&backend) {
                assert!(created.is_ok());
            } else {
                assert!(matches!(created, Err(EngineError::EngineNotAvailable(_))));
            }
        }
    }
}
