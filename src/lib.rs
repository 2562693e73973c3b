//! Typed lookups into a YAML or TOML configuration file.
//!
//! A [`Config`] is created from a list of candidate paths; the first one
//! that exists is parsed into a [`Value`] tree on first use. Values are then
//! addressed by a key path and decoded into any type implementing
//! [`Decode`]: scalars, `Vec`, `HashMap`, `BTreeMap`, `Option`, [`Value`]
//! itself, or records declared with [`decode_record!`].
//!
//! ```no_run
//! use cfgpath::{decode_record, path, Config};
//!
//! decode_record! {
//!     #[derive(Debug)]
//!     struct Database {
//!         host: String,
//!         port: u16,
//!         pool_size: u32 => "pool",
//!     }
//! }
//!
//! let config = Config::new(["config/local.yaml", "config/default.yaml"]);
//! let db: Database = config.get(path!["database"])?;
//! println!("{}:{}", db.host, db.port);
//! # Ok::<(), cfgpath::Error>(())
//! ```

pub mod config;
pub mod decode;
mod error;
mod value;

pub use config::{Config, ConfigError, Format, FormatError};
pub use decode::{decode_value, Decode, DecodeError, DecodeErrorKind, PathSegment};
pub use error::Error;
pub use value::{Mapping, Value};
