//! Reactive config store - named values living simultaneously in memory and
//! in a stylesheet rule as CSS custom properties.
//!
//! [`create_css_config`] turns an initial prop set into four handles over one
//! shared backing map:
//!
//! - [`Refs`] - symbolic references (`var(--btn-bg)`)
//! - [`Decls`] - declaration names (`--btn-bg`)
//! - [`Vals`] - current values, readable and writable
//! - [`CssConfigSettings`] - resolved prefix/rule and the refresh control
//!
//! Writes go through `Vals`, land in the backing map, and request a refresh;
//! the scheduler coalesces a burst of writes into a single flush that
//! rewrites the config's full declaration set on its bound rule.
//!
//! ```text
//! vals.set(..) → backing map → scheduler (coalesce) → flush → rule
//! ```
//!
//! # Example
//!
//! ```ignore
//! use css_config::{create_css_config, CssConfigOptions};
//!
//! let config = create_css_config(
//!     [("bg", "red"), ("fg", "white")],
//!     CssConfigOptions {
//!         prefix: Some("btn".to_string()),
//!         rule: Some(".btn".to_string()),
//!         ..Default::default()
//!     },
//! );
//!
//! assert_eq!(config.refs.get("bg").unwrap(), "var(--btn-bg)");
//! assert_eq!(config.decls.get("bg").unwrap(), "--btn-bg");
//!
//! config.vals.set("bg", "blue");
//! config.settings.refresh(true)?;   // .btn { --btn-bg: blue; ... }
//! ```

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::stylesheet::{default_sheet, BindingError, Declaration, StyleBinding};
use crate::types::{decl_name, var_ref, CssValue, PropList};

pub mod scheduler;

/// The default declaring location: the document-root scope.
pub const ROOT_RULE: &str = ":root";

// =============================================================================
// Shared Instance State
// =============================================================================

/// State shared by the four handles of one config instance.
///
/// `entries` is the backing map: insertion-ordered, with `None` marking a
/// deleted entry (the key stays enumerable, the declaration is removed at
/// the next flush).
pub(crate) struct ConfigInner {
    pub(crate) prefix: String,
    pub(crate) rule: String,
    pub(crate) entries: RefCell<Vec<(String, Option<CssValue>)>>,
    /// Deferred flush outstanding (scheduler coalescing flag).
    pub(crate) pending: Cell<bool>,
    /// Whether any flush has completed yet.
    pub(crate) flushed: Cell<bool>,
    pub(crate) binding: Rc<dyn StyleBinding>,
}

impl ConfigInner {
    /// Recompute the full declaration batch from the backing map and hand it
    /// to the binding as one write.
    pub(crate) fn flush(&self) -> Result<(), BindingError> {
        let batch: Vec<Declaration> = self
            .entries
            .borrow()
            .iter()
            .map(|(key, value)| Declaration {
                name: decl_name(&self.prefix, key),
                value: value.as_ref().map(|v| v.to_string()),
            })
            .collect();
        self.binding.apply_declarations(&self.rule, &batch)?;
        self.flushed.set(true);
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        self.entries.borrow().iter().map(|(k, _)| k.clone()).collect()
    }

    fn contains_key(&self, key: &str) -> bool {
        self.entries.borrow().iter().any(|(k, _)| k == key)
    }
}

// =============================================================================
// Prefix Generation
// =============================================================================

thread_local! {
    /// Counter for generated unique prefixes.
    static PREFIX_COUNTER: Cell<usize> = const { Cell::new(0) };
}

fn generate_prefix() -> String {
    PREFIX_COUNTER.with(|counter| {
        let n = counter.get();
        counter.set(n + 1);
        format!("v{n}")
    })
}

// =============================================================================
// Options / Initial Props
// =============================================================================

/// Options for [`create_css_config`]. All optional; unset fields resolve to
/// a generated unique prefix, the [`ROOT_RULE`] scope, and the thread-local
/// default sheet.
#[derive(Clone, Default)]
pub struct CssConfigOptions {
    /// Prefix for the generated declaration names (`--{prefix}-{key}`).
    pub prefix: Option<String>,
    /// Selector the declarations live under.
    pub rule: Option<String>,
    /// Stylesheet binding receiving the flushes.
    pub binding: Option<Rc<dyn StyleBinding>>,
}

/// Initial prop set for a config: a ready [`PropList`] or a producer that
/// builds one.
///
/// The producer form exists so expensive defaults are only computed when a
/// config is actually instantiated; it runs exactly once, inside
/// [`create_css_config`].
pub enum InitialProps {
    /// A ready prop list.
    Map(PropList),
    /// A producer invoked once at construction.
    Factory(Box<dyn FnOnce() -> PropList>),
}

impl InitialProps {
    /// Wrap a producer.
    pub fn factory(f: impl FnOnce() -> PropList + 'static) -> Self {
        InitialProps::Factory(Box::new(f))
    }

    fn resolve(self) -> PropList {
        match self {
            InitialProps::Map(props) => props,
            InitialProps::Factory(f) => f(),
        }
    }
}

impl From<PropList> for InitialProps {
    fn from(props: PropList) -> Self {
        InitialProps::Map(props)
    }
}

impl<K: Into<String>, V: Into<CssValue>, const N: usize> From<[(K, V); N]> for InitialProps {
    fn from(entries: [(K, V); N]) -> Self {
        InitialProps::Map(entries.into_iter().collect())
    }
}

// =============================================================================
// Views
// =============================================================================

/// Read-only view of the symbolic references: `get("bg")` →
/// `"var(--btn-bg)"`.
///
/// Live against the resolved prefix from the moment the config exists -
/// no flush required.
#[derive(Clone)]
pub struct Refs {
    inner: Rc<ConfigInner>,
}

impl Refs {
    /// Reference string for `key`, if the key is in the backing map.
    pub fn get(&self, key: &str) -> Option<String> {
        self.inner
            .contains_key(key)
            .then(|| var_ref(&decl_name(&self.inner.prefix, key)))
    }

    /// Keys in backing-map order (identical across all three views).
    pub fn keys(&self) -> Vec<String> {
        self.inner.keys()
    }

    /// Export as a [`PropList`] of key → reference, for composition through
    /// the prop-list algebra.
    pub fn prop_list(&self) -> PropList {
        self.inner
            .keys()
            .into_iter()
            .map(|key| {
                let reference = var_ref(&decl_name(&self.inner.prefix, &key));
                (key, reference)
            })
            .collect()
    }
}

/// Read-only view of the declaration names: `get("bg")` → `"--btn-bg"`.
#[derive(Clone)]
pub struct Decls {
    inner: Rc<ConfigInner>,
}

impl Decls {
    /// Declaration name for `key`, if the key is in the backing map.
    pub fn get(&self, key: &str) -> Option<String> {
        self.inner
            .contains_key(key)
            .then(|| decl_name(&self.inner.prefix, key))
    }

    /// Keys in backing-map order (identical across all three views).
    pub fn keys(&self) -> Vec<String> {
        self.inner.keys()
    }

    /// Export as a [`PropList`] of key → declaration name, the shape
    /// [`crate::props::overwrite_props`] takes as its target.
    pub fn prop_list(&self) -> PropList {
        self.inner
            .keys()
            .into_iter()
            .map(|key| {
                let decl = decl_name(&self.inner.prefix, &key);
                (key, decl)
            })
            .collect()
    }
}

/// Read-write view of the current values.
///
/// Reads always see the latest write, flushed or not. Every write requests a
/// deferred refresh; a burst of writes still produces a single flush at the
/// next scheduling boundary.
///
/// Writing a key absent from the initial set *extends* the config: the key
/// joins the backing map (and all three views) at the end of the order.
#[derive(Clone)]
pub struct Vals {
    inner: Rc<ConfigInner>,
}

impl Vals {
    /// Current in-memory value for `key`. `None` for a deleted or absent
    /// key; use [`contains_key`](Self::contains_key) to tell them apart.
    pub fn get(&self, key: &str) -> Option<CssValue> {
        self.inner
            .entries
            .borrow()
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| v.clone())
    }

    /// Whether `key` is enumerable (deleted keys still are).
    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    /// Keys in backing-map order (identical across all three views).
    pub fn keys(&self) -> Vec<String> {
        self.inner.keys()
    }

    /// Store a value and request a deferred refresh.
    pub fn set(&self, key: &str, value: impl Into<CssValue>) {
        self.write(key, Some(value.into()));
    }

    /// Mark `key` deleted: the declaration is removed from the rule at the
    /// next flush, the key itself stays enumerable.
    pub fn unset(&self, key: &str) {
        self.write(key, None);
    }

    fn write(&self, key: &str, value: Option<CssValue>) {
        {
            let mut entries = self.inner.entries.borrow_mut();
            match entries.iter_mut().find(|(k, _)| k == key) {
                Some((_, v)) => *v = value,
                None => entries.push((key.to_string(), value)),
            }
        }
        scheduler::schedule(&self.inner);
    }

    /// Export the present (non-deleted) entries as a [`PropList`].
    pub fn prop_list(&self) -> PropList {
        self.inner
            .entries
            .borrow()
            .iter()
            .filter_map(|(k, v)| v.clone().map(|v| (k.clone(), v)))
            .collect()
    }
}

// =============================================================================
// Settings
// =============================================================================

/// Resolved settings and the refresh control for one config instance.
#[derive(Clone)]
pub struct CssConfigSettings {
    inner: Rc<ConfigInner>,
}

impl CssConfigSettings {
    /// The resolved prefix. Immutable after construction.
    pub fn prefix(&self) -> &str {
        &self.inner.prefix
    }

    /// The resolved rule selector. Immutable after construction.
    pub fn rule(&self) -> &str {
        &self.inner.rule
    }

    /// Regenerate the css vars on the bound rule.
    ///
    /// `immediately = true` flushes before returning - code running after
    /// the call observes the rule already updated, and any binding failure
    /// comes back as the `Err`. `immediately = false` schedules a flush for
    /// the next [`scheduler::drain_pending`] boundary; repeated calls (and
    /// any writes) before that point coalesce into one flush.
    pub fn refresh(&self, immediately: bool) -> Result<(), BindingError> {
        if immediately {
            scheduler::flush_now(&self.inner)
        } else {
            scheduler::schedule(&self.inner);
            Ok(())
        }
    }

    /// Whether a deferred flush is outstanding for this instance.
    pub fn is_pending(&self) -> bool {
        self.inner.pending.get()
    }

    /// Whether any flush has completed yet.
    pub fn has_flushed(&self) -> bool {
        self.inner.flushed.get()
    }
}

// =============================================================================
// Construction
// =============================================================================

/// The four handles over one config instance. All `Clone`; clones share the
/// same backing map.
#[derive(Clone)]
pub struct CssConfig {
    /// Symbolic references (`var(--btn-bg)`).
    pub refs: Refs,
    /// Declaration names (`--btn-bg`).
    pub decls: Decls,
    /// Current values, readable and writable.
    pub vals: Vals,
    /// Resolved settings and refresh control.
    pub settings: CssConfigSettings,
}

/// Create a config instance from an initial prop set.
///
/// The three views expose exactly the initial key set, in declaration order,
/// from the moment this returns. An initial deferred flush is scheduled so
/// the rule materializes at the first scheduling boundary even without a
/// write.
///
/// A factory-form `initial` runs exactly once, here; if it panics, the panic
/// propagates and no instance is produced.
pub fn create_css_config(
    initial: impl Into<InitialProps>,
    options: CssConfigOptions,
) -> CssConfig {
    let props = initial.into().resolve();

    let prefix = options.prefix.unwrap_or_else(generate_prefix);
    let rule = options.rule.unwrap_or_else(|| ROOT_RULE.to_string());
    let binding = options
        .binding
        .unwrap_or_else(|| default_sheet() as Rc<dyn StyleBinding>);

    let inner = Rc::new(ConfigInner {
        prefix,
        rule,
        entries: RefCell::new(
            props
                .iter()
                .map(|(key, value)| (key.to_string(), Some(value.clone())))
                .collect(),
        ),
        pending: Cell::new(false),
        flushed: Cell::new(false),
        binding,
    });

    scheduler::schedule(&inner);

    CssConfig {
        refs: Refs { inner: inner.clone() },
        decls: Decls { inner: inner.clone() },
        vals: Vals { inner: inner.clone() },
        settings: CssConfigSettings { inner },
    }
}
