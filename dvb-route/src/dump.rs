//! Bounded structured dump of JSON values.
//!
//! Renders a [`serde_json::Value`] the way Node's `console.dir` prints an
//! object: single-quoted strings, bare identifier keys, nested containers
//! cut off past a depth limit and long arrays truncated with a
//! `... N more items` marker.
//!
//! ```
//! use dvb_route::dump::{DumpOptions, dump};
//! use serde_json::json;
//!
//! let value = json!({ "Routes": [1, 2, 3], "SessionId": "abc" });
//! let options = DumpOptions::default();
//! assert_eq!(
//!     dump(&value, &options),
//!     "{ Routes: [ 1, 2, ... 1 more item ], SessionId: 'abc' }"
//! );
//! ```

use std::fmt::Write;

use serde_json::Value;

/// Default nesting depth.
pub const DEFAULT_DEPTH: usize = 7;

/// Default number of array items shown.
pub const DEFAULT_MAX_ARRAY_LENGTH: usize = 2;

/// Default maximum width of a single-line container.
pub const DEFAULT_BREAK_LENGTH: usize = 80;

/// Containers whose most recently expanded descendant is this many levels
/// deeper or more are never put on a single line.
const COMPACT_LEVELS: usize = 3;

/// Display limits for [`dump`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DumpOptions {
    /// Deepest level still expanded; the top-level value is level 0.
    /// `None` expands everything.
    pub depth: Option<usize>,
    /// Array items shown before truncating. `None` shows all of them.
    pub max_array_length: Option<usize>,
    /// Containers wider than this are split over several lines.
    pub break_length: usize,
}

impl DumpOptions {
    pub fn new(depth: Option<usize>, max_array_length: Option<usize>) -> Self {
        Self {
            depth,
            max_array_length,
            break_length: DEFAULT_BREAK_LENGTH,
        }
    }

    pub fn with_break_length(mut self, break_length: usize) -> Self {
        self.break_length = break_length;
        self
    }
}

impl Default for DumpOptions {
    fn default() -> Self {
        Self::new(Some(DEFAULT_DEPTH), Some(DEFAULT_MAX_ARRAY_LENGTH))
    }
}

/// Render a value within the given limits.
pub fn dump(value: &Value, options: &DumpOptions) -> String {
    Renderer {
        options,
        current_depth: 0,
    }
    .render(value, 0, 0)
}

struct Renderer<'a> {
    options: &'a DumpOptions,
    /// Level of the container most recently expanded.
    current_depth: usize,
}

impl Renderer<'_> {
    fn render(&mut self, value: &Value, level: usize, indent: usize) -> String {
        match value {
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::String(s) => quote(s),
            Value::Array(items) if items.is_empty() => "[]".to_string(),
            Value::Object(map) if map.is_empty() => "{}".to_string(),
            Value::Array(_) if self.too_deep(level) => "[Array]".to_string(),
            Value::Object(_) if self.too_deep(level) => "[Object]".to_string(),
            Value::Array(items) => {
                self.current_depth = level;

                let shown = self
                    .options
                    .max_array_length
                    .map_or(items.len(), |max| max.min(items.len()));

                let mut entries: Vec<String> = items[..shown]
                    .iter()
                    .map(|item| self.render(item, level + 1, indent + 2))
                    .collect();

                let remaining = items.len() - shown;
                if remaining > 0 {
                    let plural = if remaining > 1 { "s" } else { "" };
                    entries.push(format!("... {remaining} more item{plural}"));
                }

                self.layout(&entries, ('[', ']'), level, indent)
            }
            Value::Object(map) => {
                self.current_depth = level;

                let entries: Vec<String> = map
                    .iter()
                    .map(|(key, value)| {
                        format!(
                            "{}: {}",
                            format_key(key),
                            self.render(value, level + 1, indent + 2)
                        )
                    })
                    .collect();

                self.layout(&entries, ('{', '}'), level, indent)
            }
        }
    }

    fn too_deep(&self, level: usize) -> bool {
        self.options.depth.is_some_and(|depth| level > depth)
    }

    fn layout(
        &self,
        entries: &[String],
        (open, close): (char, char),
        level: usize,
        indent: usize,
    ) -> String {
        if self.current_depth - level < COMPACT_LEVELS && self.fits(entries, indent) {
            let joined = entries.join(", ");
            if !joined.contains('\n') {
                return format!("{open} {joined} {close}");
            }
        }

        let pad = " ".repeat(indent + 2);
        let mut out = String::new();
        out.push(open);
        for (i, entry) in entries.iter().enumerate() {
            out.push('\n');
            out.push_str(&pad);
            out.push_str(entry);
            if i + 1 < entries.len() {
                out.push(',');
            }
        }
        out.push('\n');
        out.push_str(&" ".repeat(indent));
        out.push(close);
        out
    }

    /// Node's width estimate: each entry plus two columns of separator, the
    /// indentation, the opening brace and a slack of ten.
    fn fits(&self, entries: &[String], indent: usize) -> bool {
        let break_length = self.options.break_length;
        let start = entries.len() + indent + 1 + 10;
        let mut total = entries.len() + start;
        if total + entries.len() > break_length {
            return false;
        }

        for entry in entries {
            total += entry.encode_utf16().count();
            if total > break_length {
                return false;
            }
        }
        true
    }
}

/// Keys that are valid identifiers print bare, anything else is quoted.
fn format_key(key: &str) -> String {
    let mut chars = key.chars();
    let is_identifier = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if is_identifier {
        key.to_string()
    } else {
        quote(key)
    }
}

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{8}' => out.push_str("\\b"),
            '\u{b}' => out.push_str("\\v"),
            '\u{c}' => out.push_str("\\f"),
            c if c < ' ' => {
                let _ = write!(out, "\\x{:02X}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}
