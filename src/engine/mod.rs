// MIP engine adapters: concrete implementations of MipEngine

#[cfg(feature = "coin_cbc")]
pub mod coin_cbc_engine;
#[cfg(feature = "microlp")]
mod deadline;
pub mod factory;
#[cfg(any(feature = "coin_cbc", feature = "microlp"))]
mod good_lp_model;
#[cfg(feature = "highs")]
pub mod highs_engine;
#[cfg(feature = "microlp")]
pub mod microlp_engine;

#[cfg(feature = "coin_cbc")]
pub use coin_cbc_engine::CoinCbcEngine;
pub use factory::EngineFactory;
#[cfg(feature = "highs")]
pub use highs_engine::HighsEngine;
#[cfg(feature = "microlp")]
pub use microlp_engine::MicroLpEngine;
