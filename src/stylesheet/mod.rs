//! Stylesheet binding - where flushed declarations land.
//!
//! The config store does not own a stylesheet; it hands each flush to a
//! [`StyleBinding`] as one atomic batch of declarations for a selector.
//! [`MemorySheet`] is the built-in binding: an in-memory rule registry that
//! can render itself to CSS text, used as the thread-local default and by
//! tests. Applications embedding a real CSS engine implement [`StyleBinding`]
//! over it and inject it through `CssConfigOptions::binding`.

use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;
use tracing::debug;

// =============================================================================
// Binding Contract
// =============================================================================

/// One declaration in a flush batch. `value: None` removes the declaration
/// from the rule.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    /// Declaration name (`--btn-bg`).
    pub name: String,
    /// Serialized value, or `None` to delete.
    pub value: Option<String>,
}

/// Failure reported by a stylesheet binding while applying a batch.
#[derive(Debug, Error)]
#[error("stylesheet binding failed for `{selector}`: {message}")]
pub struct BindingError {
    /// The selector whose rule was being written.
    pub selector: String,
    /// Binding-specific description of what went wrong.
    pub message: String,
}

impl BindingError {
    /// Build an error for `selector`.
    pub fn new(selector: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            message: message.into(),
        }
    }
}

/// A mutable stylesheet keyed by selector.
///
/// `apply_declarations` must behave as one atomic batch: a reader of the
/// sheet never observes a rule holding some of the batch but not the rest.
/// Writes are idempotent per declaration name - re-applying the same batch
/// leaves the rule unchanged.
pub trait StyleBinding {
    /// Create the rule for `selector` if needed, then set/delete each
    /// declaration in `batch` on it.
    fn apply_declarations(&self, selector: &str, batch: &[Declaration]) -> Result<(), BindingError>;
}

// =============================================================================
// MemorySheet
// =============================================================================

/// In-memory [`StyleBinding`].
///
/// Rules keep selector order of first creation and declaration order of
/// first write. A batch only touches its own declaration names, so several
/// configs sharing one selector (e.g. all targeting `:root`) stay disjoint
/// as long as their prefixes are.
#[derive(Debug, Default)]
pub struct MemorySheet {
    rules: RefCell<Vec<SheetRule>>,
    apply_count: RefCell<usize>,
}

#[derive(Debug)]
struct SheetRule {
    selector: String,
    declarations: Vec<(String, String)>,
}

impl MemorySheet {
    /// Create an empty sheet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declarations currently in the rule for `selector`, in order.
    /// `None` if no rule exists for the selector yet.
    pub fn declarations(&self, selector: &str) -> Option<Vec<(String, String)>> {
        self.rules
            .borrow()
            .iter()
            .find(|rule| rule.selector == selector)
            .map(|rule| rule.declarations.clone())
    }

    /// Value of one declaration in `selector`'s rule.
    pub fn declaration(&self, selector: &str, name: &str) -> Option<String> {
        self.declarations(selector)?
            .into_iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// How many batches have been applied. Lets tests assert coalescing:
    /// N writes, one boundary, one batch.
    pub fn apply_count(&self) -> usize {
        *self.apply_count.borrow()
    }

    /// Render the whole sheet as CSS text.
    pub fn css_text(&self) -> String {
        let mut out = String::new();
        for rule in self.rules.borrow().iter() {
            if rule.declarations.is_empty() {
                continue;
            }
            out.push_str(&rule.selector);
            out.push_str(" {\n");
            for (name, value) in &rule.declarations {
                out.push_str(&format!("{name}: {value};\n"));
            }
            out.push_str("}\n");
        }
        out
    }

    /// Drop all rules and reset the apply counter.
    pub fn clear(&self) {
        self.rules.borrow_mut().clear();
        *self.apply_count.borrow_mut() = 0;
    }
}

impl StyleBinding for MemorySheet {
    fn apply_declarations(&self, selector: &str, batch: &[Declaration]) -> Result<(), BindingError> {
        let mut rules = self.rules.borrow_mut();

        let index = match rules.iter().position(|rule| rule.selector == selector) {
            Some(index) => index,
            None => {
                rules.push(SheetRule {
                    selector: selector.to_string(),
                    declarations: Vec::new(),
                });
                rules.len() - 1
            }
        };
        let rule = &mut rules[index];

        for decl in batch {
            match &decl.value {
                Some(value) => {
                    match rule.declarations.iter_mut().find(|(n, _)| *n == decl.name) {
                        Some((_, v)) => *v = value.clone(),
                        None => rule.declarations.push((decl.name.clone(), value.clone())),
                    }
                }
                None => rule.declarations.retain(|(n, _)| *n != decl.name),
            }
        }

        *self.apply_count.borrow_mut() += 1;
        debug!(selector, declarations = batch.len(), "applied declaration batch");
        Ok(())
    }
}

// =============================================================================
// Default Sheet
// =============================================================================

thread_local! {
    /// Shared sheet used by configs constructed without an explicit binding.
    static DEFAULT_SHEET: Rc<MemorySheet> = Rc::new(MemorySheet::new());
}

/// The thread-local default sheet.
pub fn default_sheet() -> Rc<MemorySheet> {
    DEFAULT_SHEET.with(|sheet| sheet.clone())
}

/// Clear the thread-local default sheet. Test helper.
pub fn reset_default_sheet() {
    DEFAULT_SHEET.with(|sheet| sheet.clear());
}
