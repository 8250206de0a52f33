pub mod config;
pub mod periphery;
pub mod subarray;
pub mod export;
pub mod error;
pub use error::*;

pub use derive_new;
