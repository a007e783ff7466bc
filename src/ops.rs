//! Read-side helpers: dotted-path lookup and flat listings.
//!
//! Provides the logic behind [`PropertyStore::get_path`](crate::PropertyStore::get_path)
//! and [`PropertyStore::entries`](crate::PropertyStore::entries).

use std::fmt;

use crate::value::{Properties, Value};

/// All leaf settings as dotted key / display value pairs, in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub entries: Vec<(String, String)>,
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{key} = {value}")?;
        }
        Ok(())
    }
}

/// Navigate nested groups by dotted key path (e.g. `"region.timezone"`).
pub fn get_path<'a>(props: &'a Properties, dotted_key: &str) -> Option<&'a Value> {
    let (path, leaf) = match dotted_key.rsplit_once('.') {
        Some((p, l)) => (Some(p), l),
        None => (None, dotted_key),
    };

    let group = match path {
        Some(path) => {
            let mut current = props;
            for segment in path.split('.') {
                current = current.get(segment)?.as_group()?;
            }
            current
        }
        None => props,
    };

    group.get(leaf)
}

/// Flatten every leaf into `("group.name", display)` pairs. Empty groups are
/// listed as leaves so they stay visible.
pub fn list_entries(props: &Properties) -> Listing {
    let mut entries = Vec::new();
    collect(props, "", &mut entries);
    Listing { entries }
}

fn collect(props: &Properties, prefix: &str, out: &mut Vec<(String, String)>) {
    for (key, value) in props {
        let dotted = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            Value::Group(g) if !g.is_empty() => collect(g, &dotted, out),
            Value::Null => out.push((dotted, "<not set>".to_string())),
            other => out.push((dotted, other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::sample_properties;

    #[test]
    fn get_path_flat() {
        let props = sample_properties();
        assert_eq!(get_path(&props, "debug"), Some(&Value::Bool(false)));
    }

    #[test]
    fn get_path_nested() {
        let props = sample_properties();
        assert_eq!(
            get_path(&props, "region.timezone").and_then(Value::as_str),
            Some("+10:00")
        );
    }

    #[test]
    fn get_path_through_scalar_is_none() {
        let props = sample_properties();
        assert!(get_path(&props, "debug.inner").is_none());
        assert!(get_path(&props, "nope").is_none());
    }

    #[test]
    fn listing_flattens_in_order() {
        let listing = list_entries(&sample_properties());
        let keys: Vec<&str> = listing.entries.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "debug",
                "region.timezone",
                "region.locale",
                "file.write_mode",
                "cache",
            ]
        );
    }

    #[test]
    fn listing_display_values() {
        let listing = list_entries(&sample_properties());
        let locale = listing
            .entries
            .iter()
            .find(|(k, _)| k == "region.locale")
            .unwrap();
        assert_eq!(locale.1, "<not set>");
        let cache = listing.entries.iter().find(|(k, _)| k == "cache").unwrap();
        assert_eq!(cache.1, "array()");
    }

    #[test]
    fn listing_display_format() {
        let listing = Listing {
            entries: vec![
                ("debug".into(), "false".into()),
                ("region.timezone".into(), "+10:00".into()),
            ],
        };
        assert_eq!(
            format!("{listing}"),
            "debug = false\nregion.timezone = +10:00"
        );
    }
}
