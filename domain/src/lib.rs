pub mod entity;
pub mod error;
pub mod language;
pub mod port;

pub use entity::*;
pub use error::DomainError;
pub use language::{find_language, LANGUAGES};
pub use port::*;
