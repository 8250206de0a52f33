mod error;
mod cell;
mod tech;
mod mode;
mod subarray;

pub use error::*;
pub use cell::*;
pub use tech::*;
pub use mode::*;
pub use subarray::*;
