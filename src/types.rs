//! Core types for css-config.
//!
//! These types define the foundation that everything builds on.
//! They flow through the config store and the prop-list algebra and define
//! what the stylesheet binding understands.

use std::fmt;

// =============================================================================
// CssValue
// =============================================================================

/// A CSS property value, treated as an opaque serializable payload.
///
/// The store and the algebra never parse or validate these - they only carry
/// them around and serialize them when a flush writes declarations.
///
/// Composite values follow CSS list conventions:
/// - `Space` joins with `" "` (e.g. `1px solid red`)
/// - `Comma` joins with `", "` (e.g. `url(a.png), url(b.png)`)
#[derive(Debug, Clone, PartialEq)]
pub enum CssValue {
    /// Literal string value (`"red"`, `"var(--btn-bg)"`, `"1px solid red"`).
    Str(String),
    /// Floating point number, serialized without a trailing `.0`.
    Num(f64),
    /// Integer value.
    Int(i64),
    /// Space-separated list.
    Space(Vec<CssValue>),
    /// Comma-separated list.
    Comma(Vec<CssValue>),
}

impl CssValue {
    /// The string payload, if this value is a `Str`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CssValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for CssValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CssValue::Str(s) => f.write_str(s),
            CssValue::Num(n) => {
                // 12.0 serializes as "12", 0.5 as "0.5". The integer path
                // only applies where f64 still represents integers exactly;
                // larger magnitudes keep the float formatting untouched.
                if n.fract() == 0.0 && n.abs() < 9.0e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{n}")
                }
            }
            CssValue::Int(i) => write!(f, "{i}"),
            CssValue::Space(items) => write_joined(f, items, " "),
            CssValue::Comma(items) => write_joined(f, items, ", "),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, items: &[CssValue], sep: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl From<&str> for CssValue {
    fn from(s: &str) -> Self {
        CssValue::Str(s.to_string())
    }
}

impl From<String> for CssValue {
    fn from(s: String) -> Self {
        CssValue::Str(s)
    }
}

impl From<f64> for CssValue {
    fn from(n: f64) -> Self {
        CssValue::Num(n)
    }
}

impl From<i64> for CssValue {
    fn from(i: i64) -> Self {
        CssValue::Int(i)
    }
}

impl From<i32> for CssValue {
    fn from(i: i32) -> Self {
        CssValue::Int(i as i64)
    }
}

impl From<Vec<CssValue>> for CssValue {
    fn from(items: Vec<CssValue>) -> Self {
        CssValue::Space(items)
    }
}

// =============================================================================
// PropList
// =============================================================================

/// An insertion-ordered mapping of prop name (or declaration name, or
/// reference) to [`CssValue`].
///
/// This is the currency of the prop-list algebra: a plain snapshot, not
/// reactive. Iteration always follows first-insertion order; re-inserting an
/// existing key replaces the value in place (last write wins, position kept).
///
/// Backed by a `Vec` of pairs - these lists are small (one config's props),
/// so linear lookup beats the bookkeeping of a side index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropList {
    entries: Vec<(String, CssValue)>,
}

impl PropList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert or replace. Replacing keeps the key's original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<CssValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Look up a value by key.
    pub fn get(&self, key: &str) -> Option<&CssValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Whether the key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CssValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<CssValue>> FromIterator<(K, V)> for PropList {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut list = PropList::new();
        for (k, v) in iter {
            list.insert(k, v);
        }
        list
    }
}

// =============================================================================
// Naming
// =============================================================================

/// Build the declaration name for `(prefix, key)`.
///
/// `decl_name("btn", "bg")` → `"--btn-bg"`. An empty prefix elides the
/// separator: `decl_name("", "bg")` → `"--bg"`.
pub fn decl_name(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        format!("--{key}")
    } else {
        format!("--{prefix}-{key}")
    }
}

/// Wrap a declaration name into a symbolic reference usable in value
/// position: `var_ref("--btn-bg")` → `"var(--btn-bg)"`.
pub fn var_ref(decl: &str) -> String {
    format!("var({decl})")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_value_display() {
        assert_eq!(CssValue::from("red").to_string(), "red");
        assert_eq!(CssValue::from(12.0).to_string(), "12");
        assert_eq!(CssValue::from(0.5).to_string(), "0.5");
        assert_eq!(CssValue::from(3).to_string(), "3");

        let border = CssValue::Space(vec!["1px".into(), "solid".into(), "red".into()]);
        assert_eq!(border.to_string(), "1px solid red");

        let shadows = CssValue::Comma(vec![
            CssValue::Space(vec!["0".into(), "1px".into(), "black".into()]),
            CssValue::Space(vec!["0".into(), "2px".into(), "gray".into()]),
        ]);
        assert_eq!(shadows.to_string(), "0 1px black, 0 2px gray");
    }

    #[test]
    fn test_num_display_preserves_large_magnitudes() {
        // Whole-valued floats beyond exact-integer f64 range must not be
        // funneled through the i64 fast path.
        let huge = CssValue::Num(1e300);
        let text = huge.to_string();
        assert_ne!(text, i64::MAX.to_string());
        assert_eq!(text.parse::<f64>().ok(), Some(1e300));

        let negative = CssValue::Num(-1e300).to_string();
        assert_ne!(negative, i64::MIN.to_string());
        assert_eq!(negative.parse::<f64>().ok(), Some(-1e300));
    }

    #[test]
    fn test_prop_list_order_and_replace() {
        let mut props = PropList::new();
        props.insert("bg", "red");
        props.insert("fg", "white");
        props.insert("bg", "blue");

        let keys: Vec<&str> = props.keys().collect();
        assert_eq!(keys, vec!["bg", "fg"]);
        assert_eq!(props.get("bg"), Some(&CssValue::from("blue")));
        assert_eq!(props.len(), 2);
    }

    #[test]
    fn test_prop_list_from_iter() {
        let props: PropList = [("a", "1"), ("b", "2")].into_iter().collect();
        assert_eq!(props.len(), 2);
        assert!(props.contains_key("a"));
        assert!(!props.contains_key("c"));
    }

    #[test]
    fn test_naming() {
        assert_eq!(decl_name("btn", "bg"), "--btn-bg");
        assert_eq!(decl_name("", "bg"), "--bg");
        assert_eq!(var_ref("--btn-bg"), "var(--btn-bg)");
    }
}
