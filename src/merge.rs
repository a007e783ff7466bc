use crate::error::ArrayfigError;
use crate::value::{Properties, Value};

/// Write `value` under `name`, nested under `group` when given.
/// A missing group is created; a scalar sitting where the group should be is replaced.
pub fn insert_leaf(base: &mut Properties, name: String, value: Value, group: Option<String>) {
    let Some(group) = group else {
        base.insert(name, value);
        return;
    };
    let slot = base
        .entry(group)
        .or_insert_with(|| Value::Group(Properties::new()));
    if !slot.is_group() {
        *slot = Value::Group(Properties::new());
    }
    if let Value::Group(g) = slot {
        g.insert(name, value);
    }
}

/// Bulk input must map group names to groups. Checked before anything is mutated.
pub fn check_grouped(incoming: &Properties) -> Result<(), ArrayfigError> {
    match incoming.iter().find(|(_, v)| !v.is_group()) {
        Some((key, _)) => Err(ArrayfigError::MixedMergeInput { key: key.clone() }),
        None => Ok(()),
    }
}

/// Shallow merge: each incoming group replaces the existing group wholesale.
pub fn replace_groups(base: &mut Properties, incoming: Properties) {
    for (group, value) in incoming {
        base.insert(group, value);
    }
}

/// Leaf merge: each incoming leaf is written individually, keeping existing
/// siblings the incoming map does not mention.
pub fn merge_leaves(base: &mut Properties, incoming: Properties) {
    for (group, value) in incoming {
        let Value::Group(leaves) = value else {
            continue;
        };
        for (name, leaf) in leaves {
            insert_leaf(base, name, leaf, Some(group.clone()));
        }
    }
}

/// Lowercase every key, recursing into groups. Later duplicates win.
pub fn fold_keys(props: Properties) -> Properties {
    props
        .into_iter()
        .map(|(key, value)| {
            let value = match value {
                Value::Group(g) => Value::Group(fold_keys(g)),
                other => other,
            };
            (key.to_lowercase(), value)
        })
        .collect()
}
