//! # css-config
//!
//! Reactive CSS custom-property configuration for Rust.
//!
//! A config is a set of named values that are simultaneously ordinary
//! in-memory values and CSS custom properties live in a stylesheet rule -
//! the same value is readable and writable from program logic and directly
//! visible to CSS, with no manual serialization step in between.
//!
//! ## Architecture
//!
//! One backing map per config, projected through three index-aligned views
//! plus a settings handle:
//!
//! ```text
//! create_css_config({bg: "red"}, {prefix: "btn", rule: ".btn"})
//!
//!   refs.get("bg")   →  "var(--btn-bg)"      (symbolic reference)
//!   decls.get("bg")  →  "--btn-bg"           (declaration name)
//!   vals.get("bg")   →  "red"                (current value)
//!
//! vals.set(..) → backing map → scheduler (coalesce) → flush → rule
//! ```
//!
//! Writes are coalesced: any number of mutations in one synchronous burst
//! produce exactly one batch write into the bound rule, either at the
//! explicit [`drain_pending`] boundary or forced synchronously with
//! `settings.refresh(true)`.
//!
//! ## Modules
//!
//! - [`types`] - Core types ([`CssValue`], [`PropList`], naming helpers)
//! - [`config`] - The reactive config store and refresh scheduler
//! - [`props`] - Prop-list algebra (filter, backup/restore, overwrite)
//! - [`stylesheet`] - The stylesheet binding seam and in-memory sheet

pub mod config;
pub mod props;
pub mod stylesheet;
pub mod types;

// Re-export commonly used items
pub use types::{decl_name, var_ref, CssValue, PropList};

pub use config::{
    create_css_config, CssConfig, CssConfigOptions, CssConfigSettings, Decls, InitialProps, Refs,
    Vals, ROOT_RULE,
};

pub use config::scheduler::{drain_pending, has_pending, reset_scheduler};

pub use props::{
    backup_props, include_general, include_prefixed, include_suffixed, overwrite_parent_props,
    overwrite_props, restore_props,
};

pub use stylesheet::{
    default_sheet, reset_default_sheet, BindingError, Declaration, MemorySheet, StyleBinding,
};
