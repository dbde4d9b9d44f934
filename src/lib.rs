//! # inistore
//!
//! A reader and writer for INI configuration files.
//!
//! Files are made of sections holding `key=value` pairs, with `;` comments:
//!
//! ```text
//! global=value
//!
//! [server]
//! host = localhost ; trailing comments are dropped
//! port = 8080
//! ```
//!
//! Keys appearing before the first header live in the default section, named `""`.
//! Values are kept as raw text. Section and key order is preserved, so a loaded file
//! can be modified and written back out.
//!
//! ## Features
//!
//! - **Line classification**: every line is a section header, assignment, comment,
//!   blank or malformed; see [`IniParser::classify`]
//! - **Ordered store**: sections and keys keep insertion order
//! - **Strict uniqueness**: duplicate sections or keys abort a load
//! - **Diagnostics**: malformed lines and duplicates are reported through `tracing`
//! - **Round-trip serialization**: [`Config::serialize`], [`Config::save`]
//!
//! ## Example
//!
//! ```rust
//! use inistore::Config;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut config = Config::new();
//!
//! config.parse(r#"
//! key1 = val1
//! [test]
//! key2 = val2
//! "#)?;
//!
//! assert_eq!(config.get_key("", "key1")?, "val1");
//! assert_eq!(&config[("test", "key2")], "val2");
//!
//! config.set_key("test", "key2", "val3")?;
//! assert_eq!(config.serialize(), "key1=val1\n[test]\nkey2=val3\n");
//! # Ok(())
//! # }
//! ```
//!
//! ## Strict loading
//!
//! Malformed lines are skipped with a warning by default. Set
//! [`ConfigOptions::strict`] to turn them into errors instead:
//!
//! ```rust
//! use inistore::{Config, ConfigError, ConfigOptions};
//!
//! let mut config = Config::with_options(ConfigOptions { strict: true });
//! let err = config.parse("this is not ini").unwrap_err();
//! assert!(matches!(err, ConfigError::MalformedLine { line: 1 }));
//! ```

// Module declarations
mod config;
mod error;
mod parser;

// Public API exports
pub use config::{Config, ConfigOptions, DEFAULT_SECTION};
pub use error::{ConfigError, ParseResult};
pub use parser::{IniParser, Token, TokenKind, TokenStream};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
