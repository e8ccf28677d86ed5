//! Lifecycle notices and the sinks that observe them.
//!
//! The sink carries only cross-cutting notifications: open/close of
//! full-screen overlays. Everything else is direct method calls between
//! owner and owned component.

use async_trait::async_trait;
use tracing::{debug, info, Level};

/// A page-level lifecycle notification.
///
/// Each open/close pair disables/enables background page scrolling and
/// input for its duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// A full-screen photo overlay opened.
    PhotoOpened,
    /// The photo overlay closed.
    PhotoClosed,
    /// The gating video started.
    VideoOpened,
    /// The gating video closed (natural end or skip).
    VideoClosed,
    /// The about panel opened.
    AboutOpened,
    /// The about panel closed.
    AboutClosed,
}

/// Receives lifecycle notices.
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Emits a notice asynchronously.
    async fn emit(&self, notice: Notice);

    /// Emits a notice without blocking. Must never fail; problems are
    /// logged and suppressed.
    fn try_emit(&self, notice: Notice);
}

/// A no-op sink that discards all notices.
///
/// Used as the default when no sink is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpEventSink;

#[async_trait]
impl EventSink for NoOpEventSink {
    async fn emit(&self, _notice: Notice) {
        // Intentionally empty - discards all notices
    }

    fn try_emit(&self, _notice: Notice) {
        // Intentionally empty - discards all notices
    }
}

/// A sink that logs notices using the tracing framework.
#[derive(Debug, Clone)]
pub struct LoggingEventSink {
    level: Level,
}

impl Default for LoggingEventSink {
    fn default() -> Self {
        Self { level: Level::INFO }
    }
}

impl LoggingEventSink {
    /// Creates a new logging sink with the specified level.
    #[must_use]
    pub fn new(level: Level) -> Self {
        Self { level }
    }

    fn log_notice(&self, notice: Notice) {
        match self.level {
            Level::DEBUG => debug!(?notice, "Notice: {notice:?}"),
            _ => info!(?notice, "Notice: {notice:?}"),
        }
    }
}

#[async_trait]
impl EventSink for LoggingEventSink {
    async fn emit(&self, notice: Notice) {
        self.log_notice(notice);
    }

    fn try_emit(&self, notice: Notice) {
        self.log_notice(notice);
    }
}

/// A collecting sink for testing purposes.
#[derive(Debug, Default)]
pub struct CollectingEventSink {
    notices: parking_lot::RwLock<Vec<Notice>>,
}

impl CollectingEventSink {
    /// Creates a new collecting sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all collected notices in emission order.
    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.read().clone()
    }

    /// Returns how many times a notice was observed.
    #[must_use]
    pub fn count_of(&self, notice: Notice) -> usize {
        self.notices.read().iter().filter(|n| **n == notice).count()
    }

    /// Clears all collected notices.
    pub fn clear(&self) {
        self.notices.write().clear();
    }
}

#[async_trait]
impl EventSink for CollectingEventSink {
    async fn emit(&self, notice: Notice) {
        self.notices.write().push(notice);
    }

    fn try_emit(&self, notice: Notice) {
        self.notices.write().push(notice);
    }
}
