//! The property store: grouped and ungrouped settings held in memory.
//!
//! Mutations never fail. Only [`set_all`](PropertyStore::set_all) with
//! malformed bulk input, serde conversion, and [`write`](PropertyStore::write)
//! return errors.

use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::builder::StoreBuilder;
use crate::error::ArrayfigError;
use crate::merge;
use crate::ops::{self, Listing};
use crate::persist::{self, FileWriter, FsWriter};
use crate::render;
use crate::value::{Properties, Value};

/// In-memory settings store.
///
/// Not synchronized: a host sharing one store between threads must wrap it in
/// its own lock.
#[derive(Debug)]
pub struct PropertyStore {
    properties: Properties,
    case_fold: bool,
    default_path: Option<PathBuf>,
    writer: Box<dyn FileWriter>,
}

impl Default for PropertyStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertyStore {
    /// Case-sensitive store with no default path, writing through [`FsWriter`].
    pub fn new() -> Self {
        Self::from_parts(false, None, Box::new(FsWriter))
    }

    /// Like [`new`](Self::new), but every key and group name is lowercased.
    pub fn case_folded() -> Self {
        Self::from_parts(true, None, Box::new(FsWriter))
    }

    pub fn builder() -> StoreBuilder {
        StoreBuilder::new()
    }

    pub(crate) fn from_parts(
        case_fold: bool,
        default_path: Option<PathBuf>,
        writer: Box<dyn FileWriter>,
    ) -> Self {
        Self {
            properties: Properties::new(),
            case_fold,
            default_path,
            writer,
        }
    }

    pub fn is_case_folded(&self) -> bool {
        self.case_fold
    }

    /// Path [`write`](Self::write) uses when called without one.
    pub fn default_path(&self) -> Option<&Path> {
        self.default_path.as_deref()
    }

    fn fold<'a>(&self, key: &'a str) -> Cow<'a, str> {
        if self.case_fold {
            Cow::Owned(key.to_lowercase())
        } else {
            Cow::Borrowed(key)
        }
    }

    /// Write `value` under `name`, inside `group` when given. Overwrites; a
    /// missing group is created.
    pub fn set(&mut self, name: &str, value: impl Into<Value>, group: Option<&str>) {
        let name = self.fold(name).into_owned();
        let group = group.map(|g| self.fold(g).into_owned());
        let value = match value.into() {
            Value::Group(g) if self.case_fold => Value::Group(merge::fold_keys(g)),
            other => other,
        };
        merge::insert_leaf(&mut self.properties, name, value, group);
    }

    /// Convert any serializable value and [`set`](Self::set) it.
    pub fn set_serialized<T: Serialize + ?Sized>(
        &mut self,
        name: &str,
        value: &T,
        group: Option<&str>,
    ) -> Result<(), ArrayfigError> {
        let value = Value::from_serialize(value)?;
        self.set(name, value, group);
        Ok(())
    }

    /// Bulk-load a `group -> {name -> value}` mapping.
    ///
    /// With `overwrite`, each provided group replaces the existing one wholesale.
    /// Without it, leaves are applied one at a time and unmentioned siblings
    /// survive. A top-level entry that is not a group fails the whole call
    /// before anything changes.
    pub fn set_all(&mut self, incoming: Properties, overwrite: bool) -> Result<(), ArrayfigError> {
        merge::check_grouped(&incoming)?;
        let incoming = if self.case_fold {
            merge::fold_keys(incoming)
        } else {
            incoming
        };
        tracing::trace!(groups = incoming.len(), overwrite, "merging settings");
        if overwrite {
            merge::replace_groups(&mut self.properties, incoming);
        } else {
            merge::merge_leaves(&mut self.properties, incoming);
        }
        Ok(())
    }

    /// The whole mapping.
    pub fn get_all(&self) -> &Properties {
        &self.properties
    }

    /// Look up `name`, inside `group` when given. `None` means absent.
    pub fn get(&self, name: &str, group: Option<&str>) -> Option<&Value> {
        let name = self.fold(name);
        match group {
            Some(group) => self.get_group(group)?.get(&*name),
            None => self.properties.get(&*name),
        }
    }

    pub fn get_group(&self, group: &str) -> Option<&Properties> {
        self.properties
            .get(&*self.fold(group))
            .and_then(Value::as_group)
    }

    /// Look up a dotted path such as `"region.timezone"`.
    pub fn get_path(&self, dotted_key: &str) -> Option<&Value> {
        ops::get_path(&self.properties, &self.fold(dotted_key))
    }

    pub fn contains(&self, name: &str, group: Option<&str>) -> bool {
        self.get(name, group).is_some()
    }

    /// Delete `name` (inside `group` when given) if it exists, returning it.
    /// Existence, not truthiness, decides: a stored empty string is removed.
    pub fn remove(&mut self, name: &str, group: Option<&str>) -> Option<Value> {
        let name = self.fold(name).into_owned();
        match group {
            Some(group) => {
                let group = self.fold(group).into_owned();
                self.properties
                    .get_mut(&group)
                    .and_then(Value::as_group_mut)
                    .and_then(|g| g.shift_remove(&name))
            }
            None => self.properties.shift_remove(&name),
        }
    }

    /// Drop every setting.
    pub fn flush(&mut self) {
        tracing::trace!(entries = self.properties.len(), "flushing settings");
        self.properties.clear();
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Top-level groups in insertion order.
    pub fn groups(&self) -> impl Iterator<Item = (&str, &Properties)> {
        self.properties
            .iter()
            .filter_map(|(k, v)| v.as_group().map(|g| (k.as_str(), g)))
    }

    /// Every leaf as a dotted key / display value pair.
    pub fn entries(&self) -> Listing {
        ops::list_entries(&self.properties)
    }

    /// The store as a literal `array(...)` expression.
    pub fn to_text(&self) -> String {
        render::render_document(&self.properties)
    }

    /// Persist the store as a settings file.
    ///
    /// `permissions` falls back to the `file.write_mode` setting, `path` to the
    /// store's default path. The writer's result is returned unchanged.
    pub fn write(&self, path: Option<&Path>, permissions: Option<u32>) -> Result<(), ArrayfigError> {
        let permissions = match permissions {
            Some(mode) => Some(mode),
            None => persist::write_mode(&self.properties)?,
        };
        let path = match path {
            Some(p) => p,
            None => self.default_path().ok_or(ArrayfigError::NoDefaultPath)?,
        };
        let contents = persist::document(&self.to_text());
        tracing::debug!(
            path = %path.display(),
            bytes = contents.len(),
            mode = ?permissions.map(|m| format!("{m:o}")),
            "writing settings file"
        );
        self.writer.write_file(path, &contents, permissions)
    }
}

impl fmt::Display for PropertyStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}
