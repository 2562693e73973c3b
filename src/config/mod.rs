//! Configuration file loading and key-path lookup.

mod error;
mod format;
mod lookup;
mod resolve;
mod source;

pub use error::{ConfigError, FormatError};
pub use format::Format;
pub use lookup::Config;
pub use resolve::resolve;
pub use source::{load, resolve_file, FileSource};
