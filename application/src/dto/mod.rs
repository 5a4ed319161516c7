mod info;
mod translation;

pub use info::*;
pub use translation::*;
