//! Refresh scheduler - decides when a config's pending writes reach its rule.
//!
//! One thread-local queue holds the configs with a deferred flush
//! outstanding. A per-instance pending flag keeps the queue coalesced: any
//! number of writes in one synchronous burst enqueue the instance once, and
//! the flush that eventually runs reads the backing map *at that moment*, so
//! later writes made before the boundary ride along for free.
//!
//! The boundary itself is explicit: the host calls [`drain_pending`] when its
//! current unit of work completes (end of a frame, end of an event handler,
//! ...). An immediate refresh short-circuits the queue - it flushes on the
//! spot and clears the pending flag, so the queued entry becomes a no-op
//! rather than a second write.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::{debug, error};

use super::ConfigInner;
use crate::stylesheet::BindingError;

thread_local! {
    /// Configs with a deferred flush outstanding, in scheduling order.
    static FLUSH_QUEUE: RefCell<Vec<Weak<ConfigInner>>> = RefCell::new(Vec::new());
}

/// Schedule a deferred flush for `inner`. No-op when one is already
/// outstanding (coalescing by instance identity).
pub(crate) fn schedule(inner: &Rc<ConfigInner>) {
    if inner.pending.get() {
        return;
    }
    inner.pending.set(true);
    FLUSH_QUEUE.with(|queue| queue.borrow_mut().push(Rc::downgrade(inner)));
    debug!(rule = %inner.rule, "scheduled deferred flush");
}

/// Flush `inner` synchronously.
///
/// Clears the pending flag first, which both absorbs any outstanding
/// deferred entry (it finds the flag down and skips) and guarantees a
/// failing binding leaves the instance schedulable instead of stuck
/// pending forever.
pub(crate) fn flush_now(inner: &Rc<ConfigInner>) -> Result<(), BindingError> {
    inner.pending.set(false);
    inner.flush()
}

/// Whether any config on this thread has a deferred flush outstanding.
pub fn has_pending() -> bool {
    FLUSH_QUEUE.with(|queue| {
        queue
            .borrow()
            .iter()
            .any(|weak| weak.upgrade().is_some_and(|inner| inner.pending.get()))
    })
}

/// The scheduling boundary: run every outstanding deferred flush now.
///
/// Returns the number of flushes performed. Entries whose config was
/// dropped, or whose pending work was already absorbed by an immediate
/// refresh, are skipped. Flushes scheduled *during* the drain (by binding
/// side effects) run in the same drain.
///
/// A deferred flush has no caller to hand its error to, so binding failures
/// are reported through the error log and do not stop the drain; the failed
/// instance is left non-pending and the next write reschedules it.
pub fn drain_pending() -> usize {
    let mut flushed = 0;
    loop {
        let batch: Vec<Weak<ConfigInner>> =
            FLUSH_QUEUE.with(|queue| queue.borrow_mut().drain(..).collect());
        if batch.is_empty() {
            break;
        }
        for weak in batch {
            let Some(inner) = weak.upgrade() else {
                continue;
            };
            if !inner.pending.get() {
                continue;
            }
            inner.pending.set(false);
            match inner.flush() {
                Ok(()) => flushed += 1,
                Err(err) => error!(%err, "deferred flush failed"),
            }
        }
    }
    flushed
}

/// Drop all queued entries without flushing. Test helper.
pub fn reset_scheduler() {
    FLUSH_QUEUE.with(|queue| {
        for weak in queue.borrow_mut().drain(..) {
            if let Some(inner) = weak.upgrade() {
                inner.pending.set(false);
            }
        }
    });
}
