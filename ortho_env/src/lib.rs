//! Environment variable configuration source.
//!
//! `ortho_env` turns a flat list of `KEY=VALUE` environment entries into a
//! nested configuration tree. Keys are split on `_` and lowercased, values are
//! coerced to booleans, numbers, strings, or decoded JSON, and every entry is
//! deep-merged into one tree in enumeration order. An optional [`Schema`]
//! describing the application's configuration shape makes coercion strict for
//! the paths it declares.
//!
//! The resulting tree is encoded into a [`ChangeSet`] for a configuration
//! aggregator, or consumed directly through the `figment::Provider`
//! implementation on [`EnvSource`].
//!
//! ```rust
//! use ortho_env::{EnvSnapshot, EnvSource, Source};
//!
//! let source = EnvSource::builder()
//!     .stripped_prefix("APP_")
//!     .snapshot(EnvSnapshot::from_lines(["APP_SERVER_PORT=8080"]))
//!     .build();
//! let change_set = source.read()?;
//! assert_eq!(change_set.data(), br#"{"server":{"port":8080}}"#);
//! # Ok::<_, ortho_env::EnvError>(())
//! ```

mod changeset;
pub mod coerce;
mod encoder;
mod error;
mod key;
mod prefix;
mod provider;
pub mod schema;
mod source;
pub mod tree;
mod watcher;

pub use changeset::{ChangeSet, ChangeSetMetadata};
#[cfg(feature = "toml")]
pub use encoder::TomlEncoder;
pub use encoder::{Encoder, JsonEncoder};
pub use error::{EnvError, EnvResult};
pub use key::{DELIMITER, KeyPath};
pub use prefix::PrefixSet;
pub use schema::{Describe, FieldType, ResolvedKind, Schema};
pub use source::{EnvSnapshot, EnvSource, EnvSourceBuilder, Entry, SOURCE_NAME, Source};
pub use watcher::{NoopWatcher, Watcher};
