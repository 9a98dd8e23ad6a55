//! TIG Core - Fundamental types shared by the level tools

mod error;
mod types;
mod positions;

pub use error::*;
pub use types::*;
pub use positions::*;
