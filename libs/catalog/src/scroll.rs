//! Infinite-scroll trigger
//!
//! Bridges a sentinel element's visibility observer to the pager. The
//! observer may report the same visibility state many times in quick
//! succession; the trigger is edge-triggered, so only a hidden-to-visible
//! transition fires a load, and the pager's own in-flight guard absorbs
//! anything that slips through while a fetch is pending. Disconnecting the
//! trigger stops all firing, which is how the owning view tears it down.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::pager::{PageSource, Pager};

/// Edge-triggered load-more signal for a sentinel element
pub struct ScrollTrigger<S> {
    pager: Pager<S>,
    visible: AtomicBool,
    disconnected: AtomicBool,
}

impl<S: PageSource> ScrollTrigger<S> {
    /// Wrap a pager in a scroll trigger
    pub fn new(pager: Pager<S>) -> Self {
        Self {
            pager,
            visible: AtomicBool::new(false),
            disconnected: AtomicBool::new(false),
        }
    }

    /// Feed one visibility observation for the sentinel element
    ///
    /// Fires a load only when the sentinel goes from hidden to visible.
    pub async fn observe(&self, visible: bool) {
        if self.disconnected.load(Ordering::SeqCst) {
            return;
        }

        let was_visible = self.visible.swap(visible, Ordering::SeqCst);
        if visible && !was_visible {
            self.pager.load_more().await;
        }
    }

    /// The pager this trigger drives
    pub fn pager(&self) -> &Pager<S> {
        &self.pager
    }

    /// Stop reacting to observations; the owning view is going away
    pub fn disconnect(&self) {
        self.disconnected.store(true, Ordering::SeqCst);
    }

    /// True once the trigger has been disconnected
    pub fn is_disconnected(&self) -> bool {
        self.disconnected.load(Ordering::SeqCst)
    }
}
