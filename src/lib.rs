//! Grouped key/value settings that persist themselves as a literal array
//! source file.
//!
//! Arrayfig holds an application's runtime settings in memory, grouped by
//! section, and renders them as a nested `array(...)` expression. Written to
//! disk with a small preamble, that expression is a source file the host
//! runtime evaluates on every later run to get its settings back.
//!
//! ```ignore
//! let mut store = PropertyStore::builder()
//!     .app_name("myapp")
//!     .build()?;
//! store.set("timezone", "+10:00", Some("region"));
//! store.write(None, None)?;
//! ```
//!
//! That writes `~/.config/myapp/settings.php` (on Linux):
//!
//! ```text
//! <?php
//! $settings = array(
//!
//!
//!
//!         ###### REGION ######
//!         'region' => array(
//!             'timezone' => '+10:00',
//!         ),
//!         ########
//! );
//! ```
//!
//! # Data model
//!
//! A [`PropertyStore`] maps names to [`Value`]s. A value is a scalar
//! (string, integer, float, boolean), `null`, or a group: a nested,
//! insertion-ordered [`Properties`] mapping. Most settings live one level
//! down, inside a group:
//!
//! - **`set(name, value, Some(group))`** writes into a group, creating it if
//!   needed. `set(name, value, None)` writes at the top level.
//! - **`get(name, group)`** returns `Option<&Value>`. Absence is `None`, never
//!   an error.
//! - **`remove(name, group)`** deletes by existence. A stored empty string is
//!   removed like any other value.
//! - **`flush()`** clears everything.
//!
//! A store built with [`case_fold(true)`](StoreBuilder::case_fold) lowercases
//! every key and group name on every operation, so `Foo`/`Bar` and `foo`/`bar`
//! address the same setting.
//!
//! # Bulk loading
//!
//! [`set_all(map, overwrite)`](PropertyStore::set_all) takes a
//! `group -> {name -> value}` mapping, typically defaults deserialized from
//! TOML or JSON (`Value` and `Properties` implement serde's `Deserialize`):
//!
//! - **`overwrite = false`** applies each leaf individually. Existing keys the
//!   incoming group doesn't mention survive.
//! - **`overwrite = true`** replaces each provided group wholesale. Keys the
//!   incoming group doesn't mention are gone.
//!
//! Bulk input must be grouped. A top-level scalar fails the call with
//! [`ArrayfigError::MixedMergeInput`] before anything changes.
//!
//! Arbitrary `Serialize` types go in through
//! [`set_serialized`](PropertyStore::set_serialized). Shapes a settings file
//! cannot hold (byte strings, enum variants with data, integers beyond `i64`)
//! are rejected with [`ArrayfigError::UnsupportedValueType`].
//!
//! # Rendering
//!
//! [`to_text()`](PropertyStore::to_text) is deterministic: rendering an
//! unchanged store twice gives identical bytes, so rewriting the settings
//! file without changes is a no-op on disk. The rules:
//!
//! | Input | Output |
//! |-------|--------|
//! | canonical integer key `0`, `42` | bare: `42 => ` |
//! | any other key | quoted: `'name' => ` |
//! | empty string, `null`, `false` | `null` |
//! | empty group | `array()` |
//! | non-empty group | nested `array(...)`, one tab deeper |
//!
//! Top-level groups are framed by an upper-cased banner comment. Top-level
//! scalars are plain entries.
//!
//! # Persistence
//!
//! [`write(path, permissions)`](PropertyStore::write) wraps the text in the
//! `$settings = ...;` preamble and hands it to a [`FileWriter`]. When
//! `permissions` is `None`, the store's own `file.write_mode` setting is used
//! (an octal string like `"0640"` or an integer). When `path` is `None`, the
//! builder's default path is used. The default [`FsWriter`] writes through a
//! temporary file and renames it into place.
//!
//! # Error handling
//!
//! All fallible operations return [`ArrayfigError`]. Mutations never fail;
//! only bulk merges, serde conversion, and writes do. Nothing is retried or
//! logged on failure.

pub mod error;
pub mod types;

mod builder;
mod convert;
mod file;
pub(crate) mod merge;
mod ops;
mod persist;
mod render;
mod store;
mod value;

#[cfg(test)]
mod fixtures;

pub use builder::StoreBuilder;
pub use error::ArrayfigError;
pub use file::DEFAULT_FILE_NAME;
pub use ops::Listing;
pub use persist::{DEFAULT_WRITE_MODE, FileWriter, FsWriter, PREAMBLE};
pub use render::{render_array, render_value};
pub use store::PropertyStore;
pub use types::Location;
pub use value::{Properties, Value};
