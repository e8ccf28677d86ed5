//! Explicit application state.
//!
//! One state object is constructed at startup and passed by reference into
//! the components that need it: the controller writes, views read. No
//! singleton accessors.

use crate::model::PhotoLibrary;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared application state.
#[derive(Debug, Default)]
pub struct AppState {
    /// The process-wide photo list, append-only after initial population.
    pub library: PhotoLibrary,
    about_visible: AtomicBool,
    scroll_locked: AtomicBool,
}

impl AppState {
    /// Creates empty application state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the about panel is visible.
    #[must_use]
    pub fn about_visible(&self) -> bool {
        self.about_visible.load(Ordering::SeqCst)
    }

    pub(crate) fn set_about_visible(&self, visible: bool) {
        self.about_visible.store(visible, Ordering::SeqCst);
    }

    /// Whether background page scrolling and input are disabled by an
    /// open overlay.
    #[must_use]
    pub fn scroll_locked(&self) -> bool {
        self.scroll_locked.load(Ordering::SeqCst)
    }

    pub(crate) fn set_scroll_locked(&self, locked: bool) {
        self.scroll_locked.store(locked, Ordering::SeqCst);
    }
}
