//! Domain types for positional bucket statistics.

mod bucket;
mod price;
mod sample;

pub use bucket::*;
pub use price::*;
pub use sample::*;
