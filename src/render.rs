//! Literal-array rendering.
//!
//! Turns a [`Properties`] mapping into a nested `array(...)` expression that a
//! host runtime can evaluate back into the same mapping. Output is a pure
//! function of the mapping and its insertion order.
//!
//! ```text
//! array(
//!
//!
//!
//!         ###### REGION ######
//!         'region' => array(
//!             'timezone' => '+10:00',
//!         ),
//!         ########
//! )
//! ```
//!
//! One indent unit is a tab. Entries of an array rendered at `depth` sit at
//! `depth` units; its closing `)` sits at `depth - 1`.

use crate::value::{Properties, Value};

const INDENT: char = '\t';

/// Indentation depth of a group's `'name' => ` line in the document.
const GROUP_LINE_DEPTH: usize = 2;

/// Render the whole store: group entries get a banner, ungrouped entries are
/// plain depth-1 entries.
pub fn render_document(properties: &Properties) -> String {
    let mut out = String::from("array(");
    for (key, value) in properties {
        if value.is_group() {
            out.push_str("\n\n\n\n");
            push_indent(&mut out, GROUP_LINE_DEPTH);
            out.push_str(&format!("###### {} ######", banner_label(key)));
            out.push('\n');
            push_indent(&mut out, GROUP_LINE_DEPTH);
            out.push_str(&format!(
                "{} => {}",
                quote(key),
                render_value(value, GROUP_LINE_DEPTH)
            ));
            out.push_str(",\n");
            push_indent(&mut out, GROUP_LINE_DEPTH);
            out.push_str("########");
        } else {
            out.push('\n');
            push_indent(&mut out, 1);
            out.push_str(&render_entry(key, value, 1));
            out.push(',');
        }
    }
    out.push_str("\n)");
    out
}

/// Render `mapping` as `array(` + entries at `depth` + closing at `depth - 1`.
pub fn render_array(mapping: &Properties, depth: usize) -> String {
    let mut out = String::from("array(");
    for (key, value) in mapping {
        out.push('\n');
        push_indent(&mut out, depth);
        out.push_str(&render_entry(key, value, depth));
        out.push(',');
    }
    out.push('\n');
    push_indent(&mut out, depth.saturating_sub(1));
    out.push(')');
    out
}

/// Render the right-hand side of an entry that sits at `depth`.
pub fn render_value(value: &Value, depth: usize) -> String {
    match value {
        Value::Group(g) if g.is_empty() => "array()".to_string(),
        Value::Group(g) => render_array(g, depth + 1),
        v if v.text_len() == 0 => "null".to_string(),
        v => scalar_literal(v),
    }
}

/// Upper-cased group name for the banner comment. Line breaks would end the
/// comment and `?>` would leave code mode, so neither survives.
fn banner_label(group: &str) -> String {
    group
        .to_uppercase()
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect::<String>()
        .replace("?>", "? >")
}

fn render_entry(key: &str, value: &Value, depth: usize) -> String {
    format!("{} => {}", render_key(key), render_value(value, depth))
}

fn push_indent(out: &mut String, depth: usize) {
    out.extend(std::iter::repeat_n(INDENT, depth));
}

/// Bare for canonical integer keys, quoted otherwise.
pub fn render_key(key: &str) -> String {
    if is_numeric_key(key) {
        key.to_string()
    } else {
        quote(key)
    }
}

/// A key is numeric when it is the canonical decimal form of an `i64`:
/// `"0"`, `"42"`, `"-7"`, but not `"007"`, `"-0"`, `"1.5"` or `""`.
pub fn is_numeric_key(key: &str) -> bool {
    let digits = key.strip_prefix('-').unwrap_or(key);
    let canonical = match digits.as_bytes() {
        [] => false,
        [b'0'] => key.len() == 1,
        [first, rest @ ..] => {
            *first != b'0' && first.is_ascii_digit() && rest.iter().all(u8::is_ascii_digit)
        }
    };
    canonical && key.parse::<i64>().is_ok()
}

/// Literal form of a scalar. Groups fall back to their array form.
pub fn scalar_literal(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Integer(i) => i.to_string(),
        Value::Float(f) => float_literal(*f),
        Value::String(s) => quote(s),
        Value::Group(_) => render_value(value, 0),
    }
}

/// Floats always carry a decimal point or exponent so they re-read as floats.
pub fn float_literal(f: f64) -> String {
    if f.is_nan() {
        "NAN".to_string()
    } else if f == f64::INFINITY {
        "INF".to_string()
    } else if f == f64::NEG_INFINITY {
        "-INF".to_string()
    } else {
        format!("{f:?}")
    }
}

/// Single-quoted string literal; only `\` and `'` need escaping.
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        if c == '\\' || c == '\'' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('\'');
    out
}
