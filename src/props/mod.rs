//! Prop-list algebra - pure transformations over [`PropList`] snapshots.
//!
//! These free functions filter, rename, and redirect prop lists so configs
//! can be composed and re-targeted: strip a variant prefix off a parent's
//! props, park live values behind backup names, point one config's
//! declarations at another's references, and so on.
//!
//! Every function returns a fresh [`PropList`]; inputs are never mutated and
//! outputs share no backing state with them.
//!
//! # Example
//!
//! ```ignore
//! use css_config::props::{backup_props, restore_props};
//!
//! // Park the live values behind *Bak names...
//! let saved = backup_props(&decls.prop_list(), "Bak");
//! // --btn-bgBak: var(--btn-bg)
//!
//! // ...and later point the live declarations back at them.
//! let back = restore_props(&decls.prop_list(), "Bak");
//! // --btn-bg: var(--btn-bgBak)
//! ```

use crate::types::{var_ref, PropList};

// =============================================================================
// Filtering
// =============================================================================

/// Keep only the entries whose key is *not* specialized.
///
/// What counts as specialized (variant-specific, state-specific, ...) is
/// naming-convention knowledge the caller owns, so it comes in as a
/// predicate rather than being baked in here.
pub fn include_general<F>(props: &PropList, is_specialized: F) -> PropList
where
    F: Fn(&str) -> bool,
{
    props
        .iter()
        .filter(|(key, _)| !is_specialized(key))
        .map(|(key, value)| (key, value.clone()))
        .collect()
}

/// Keep only the entries whose key starts with `prefix`.
///
/// When `remove` is true the prefix is stripped from the returned keys
/// (exactly one layer - a key `x-x-size` filtered on `x-` comes back as
/// `x-size`). Keys that collide after stripping resolve last-write-wins in
/// iteration order.
pub fn include_prefixed(props: &PropList, prefix: &str, remove: bool) -> PropList {
    let mut result = PropList::new();
    for (key, value) in props.iter() {
        if let Some(rest) = key.strip_prefix(prefix) {
            let new_key = if remove { rest } else { key };
            result.insert(new_key, value.clone());
        }
    }
    result
}

/// Keep only the entries whose key ends with `suffix`.
///
/// Symmetric to [`include_prefixed`], operating on the trailing match.
pub fn include_suffixed(props: &PropList, suffix: &str, remove: bool) -> PropList {
    let mut result = PropList::new();
    for (key, value) in props.iter() {
        if let Some(rest) = key.strip_suffix(suffix) {
            let new_key = if remove { rest } else { key };
            result.insert(new_key, value.clone());
        }
    }
    result
}

// =============================================================================
// Backup / restore
// =============================================================================

/// Rename every key `k` to `k+backup_suffix`, valued as a reference back at
/// the original `k`.
///
/// The backup holds a redirection, not a copy, so mutating the original
/// cannot desynchronize it - the backup always resolves to whatever the
/// original currently is, until [`restore_props`] swaps the direction.
///
/// ```text
/// --com-bg        →  --com-bgBak: var(--com-bg)
/// --com-shadow    →  --com-shadowBak: var(--com-shadow)
/// ```
pub fn backup_props(props: &PropList, backup_suffix: &str) -> PropList {
    props
        .iter()
        .map(|(key, _)| (format!("{key}{backup_suffix}"), var_ref(key)))
        .collect()
}

/// Point every key `k` back at its backup `k+backup_suffix`.
///
/// Inverse of [`backup_props`]:
///
/// ```text
/// --com-bg        →  --com-bg: var(--com-bgBak)
/// --com-shadow    →  --com-shadow: var(--com-shadowBak)
/// ```
pub fn restore_props(props: &PropList, backup_suffix: &str) -> PropList {
    props
        .iter()
        .map(|(key, _)| (key.to_string(), var_ref(&format!("{key}{backup_suffix}"))))
        .collect()
}

// =============================================================================
// Overwrite
// =============================================================================

/// Redirect `target_decls`' declarations to mirror `source_props`.
///
/// For each key present in both lists, the result maps the target's
/// declaration name to the source's value. Keys the source does not provide
/// are left out (no accidental blanking of the target), and target entries
/// whose value is not a declaration-name string are skipped - feeding
/// anything but a `Decls` export as the target is a caller contract
/// violation, not a runtime error.
///
/// Result order follows the source's iteration order.
pub fn overwrite_props(target_decls: &PropList, source_props: &PropList) -> PropList {
    let mut result = PropList::new();
    for (key, value) in source_props.iter() {
        let Some(target) = target_decls.get(key) else {
            continue;
        };
        let Some(decl) = target.as_str() else {
            continue;
        };
        result.insert(decl, value.clone());
    }
    result
}

/// Apply [`overwrite_props`] against each target in turn and union the
/// results.
///
/// `targets` must be ordered from the most specific parent to the least
/// specific one: each target is a distinct declaration site that receives
/// its own redirect entry, and when the merged list lands in real CSS
/// cascade order that ordering is what lets specificity resolve correctly.
pub fn overwrite_parent_props(source_props: &PropList, targets: &[&PropList]) -> PropList {
    let mut result = PropList::new();
    for target in targets {
        for (decl, value) in overwrite_props(target, source_props).iter() {
            result.insert(decl, value.clone());
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CssValue;

    fn sample() -> PropList {
        [
            ("bg", "red"),
            ("icon-size", "1em"),
            ("icon-color", "blue"),
            ("sizeValid", "2px"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_include_general() {
        let props = sample();
        let general = include_general(&props, |key| key.starts_with("icon-"));

        let keys: Vec<&str> = general.keys().collect();
        assert_eq!(keys, vec!["bg", "sizeValid"]);
        // Input untouched
        assert_eq!(props.len(), 4);
    }

    #[test]
    fn test_include_prefixed_strip() {
        let props = sample();
        let icon = include_prefixed(&props, "icon-", true);

        let keys: Vec<&str> = icon.keys().collect();
        assert_eq!(keys, vec!["size", "color"]);
        assert_eq!(icon.get("size"), Some(&CssValue::from("1em")));
    }

    #[test]
    fn test_include_prefixed_keep() {
        let icon = include_prefixed(&sample(), "icon-", false);
        let keys: Vec<&str> = icon.keys().collect();
        assert_eq!(keys, vec!["icon-size", "icon-color"]);
    }

    #[test]
    fn test_include_prefixed_strips_one_layer() {
        let props: PropList = [("x-x-size", "1"), ("x-pad", "2")].into_iter().collect();

        let kept = include_prefixed(&props, "x-", false);
        let stripped = include_prefixed(&kept, "x-", true);

        let keys: Vec<&str> = stripped.keys().collect();
        assert_eq!(keys, vec!["x-size", "pad"]);
    }

    #[test]
    fn test_include_prefixed_collision_last_write_wins() {
        let props: PropList = [("x-a", "first"), ("a", "other"), ("x-x-a", "ignored")]
            .into_iter()
            .collect();
        // "x-a" → "a", "x-x-a" → "x-a": no collision here, but stripping
        // twice funnels both onto "a" with the later entry winning.
        let once = include_prefixed(&props, "x-", true);
        let twice = include_prefixed(&once, "x-", true);
        assert_eq!(twice.get("a"), Some(&CssValue::from("ignored")));
        assert_eq!(twice.len(), 1);
    }

    #[test]
    fn test_include_suffixed() {
        let valid = include_suffixed(&sample(), "Valid", true);
        let keys: Vec<&str> = valid.keys().collect();
        assert_eq!(keys, vec!["size"]);
        assert_eq!(valid.get("size"), Some(&CssValue::from("2px")));

        let kept = include_suffixed(&sample(), "Valid", false);
        let keys: Vec<&str> = kept.keys().collect();
        assert_eq!(keys, vec!["sizeValid"]);
    }

    #[test]
    fn test_backup_restore_round_trip() {
        let decls: PropList = [("--com-bg", "red"), ("--com-shadow", "none")]
            .into_iter()
            .collect();

        let backup = backup_props(&decls, "Bak");
        assert_eq!(backup.get("--com-bgBak"), Some(&CssValue::from("var(--com-bg)")));
        assert_eq!(
            backup.get("--com-shadowBak"),
            Some(&CssValue::from("var(--com-shadow)"))
        );

        let restored = restore_props(&decls, "Bak");
        assert_eq!(restored.get("--com-bg"), Some(&CssValue::from("var(--com-bgBak)")));
        assert_eq!(
            restored.get("--com-shadow"),
            Some(&CssValue::from("var(--com-shadowBak)"))
        );

        // No key loss in either direction.
        assert_eq!(backup.len(), decls.len());
        assert_eq!(restored.len(), decls.len());
    }

    #[test]
    fn test_overwrite_props() {
        let target: PropList = [("color", "--parent-color"), ("pad", "--parent-pad")]
            .into_iter()
            .collect();
        let source: PropList = [("color", "var(--child-color)"), ("gap", "var(--child-gap)")]
            .into_iter()
            .collect();

        let result = overwrite_props(&target, &source);
        assert_eq!(result.len(), 1);
        assert_eq!(
            result.get("--parent-color"),
            Some(&CssValue::from("var(--child-color)"))
        );
        // "gap" missing from the target: not blanked, not present.
        assert!(!result.contains_key("gap"));
    }

    #[test]
    fn test_overwrite_parent_props_ordering() {
        let source: PropList = [("color", "var(--child-color)")].into_iter().collect();
        let target_a: PropList = [("color", "--a-color")].into_iter().collect();
        let target_b: PropList = [("color", "--b-color")].into_iter().collect();

        let result = overwrite_parent_props(&source, &[&target_a, &target_b]);

        let entries: Vec<(&str, &CssValue)> = result.iter().collect();
        assert_eq!(entries.len(), 2);
        // Most specific target first.
        assert_eq!(entries[0].0, "--a-color");
        assert_eq!(entries[1].0, "--b-color");
        assert_eq!(entries[0].1, &CssValue::from("var(--child-color)"));
    }
}
