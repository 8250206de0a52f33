mod error;
mod horowitz;
mod block;
mod model;
mod analytic;

pub use error::*;
pub use horowitz::*;
pub use block::*;
pub use model::*;
pub use analytic::*;
