//! Full-screen video interlude with an idempotent close latch.
//!
//! The stage can be dismissed by the skip control, by playback ending,
//! or by both racing each other. Whichever lands first wins; the close
//! notice is emitted exactly once and later attempts are no-ops.

use super::stage::Stage;
use crate::anim::{Animator, Ease, Props, TargetId};
use crate::errors::PlaybackError;
use crate::events::{EventSink, Notice};
use crate::visual::Animatable;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tracing::warn;

/// Media transport. Playback may be refused by the platform; the
/// sequence treats refusal as a still frame, not a failure.
#[cfg_attr(test, mockall::automock)]
pub trait Playback: Send + Sync {
    /// Requests playback to begin.
    ///
    /// # Errors
    ///
    /// Returns [`PlaybackError`] when the platform refuses to start.
    fn play(&self) -> Result<(), PlaybackError>;

    /// Halts playback. Must be safe to call when already stopped.
    fn stop(&self);
}

/// Transport that accepts every request and does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPlayback;

impl Playback for NullPlayback {
    fn play(&self) -> Result<(), PlaybackError> {
        Ok(())
    }

    fn stop(&self) {}
}

pub struct VideoGate {
    source: String,
    caption: TargetId,
    stage_target: TargetId,
    playback: Arc<dyn Playback>,
    animator: Arc<dyn Animator>,
    sink: Arc<dyn EventSink>,
    animated_in: AtomicBool,
    closed: AtomicBool,
    notify: Notify,
}

impl VideoGate {
    #[must_use]
    pub fn new(
        source: impl Into<String>,
        playback: Arc<dyn Playback>,
        animator: Arc<dyn Animator>,
        sink: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            source: source.into(),
            caption: TargetId::new(),
            stage_target: TargetId::new(),
            playback,
            animator,
            sink,
            animated_in: AtomicBool::new(false),
            closed: AtomicBool::new(false),
            notify: Notify::new(),
        }
    }

    /// Begins playback and announces the stage. A refused playback
    /// request is logged and the stage stays up as a still frame.
    pub async fn start(&self) {
        self.sink.emit(Notice::VideoOpened).await;
        if let Err(error) = self.playback.play() {
            warn!(source = %self.source, %error, "playback refused, holding still frame");
        }
        self.animate_in().await;
    }

    /// Skip control pressed.
    pub async fn skip(&self) {
        self.close().await;
    }

    /// Playback reached the end of the source.
    pub async fn playback_ended(&self) {
        self.close().await;
    }

    async fn close(&self) {
        if self
            .closed
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return;
        }
        self.playback.stop();
        self.sink.emit(Notice::VideoClosed).await;
        self.notify.notify_waiters();
    }

    /// Whether the close latch has fired.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Resolves when the stage has been dismissed. Safe to await after
    /// the latch has already fired.
    pub async fn closed(&self) {
        loop {
            let notified = self.notify.notified();
            if self.closed.load(Ordering::SeqCst) {
                return;
            }
            notified.await;
        }
    }

    /// Video source path.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }
}

impl std::fmt::Debug for VideoGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoGate")
            .field("source", &self.source)
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Animatable for VideoGate {
    /// Reveals the skip caption shortly after the frame appears.
    async fn animate_in(&self) {
        self.animated_in.store(true, Ordering::SeqCst);
        self.animator
            .animate(
                self.caption,
                Props::new().opacity(1.0),
                Duration::from_millis(700),
                Ease::OutSine,
                Duration::from_millis(500),
            )
            .await;
    }

    async fn animate_out(&self) {
        self.animated_in.store(false, Ordering::SeqCst);
        self.animator
            .animate(
                self.stage_target,
                Props::new().opacity(0.0),
                Duration::from_millis(700),
                Ease::InSine,
                Duration::ZERO,
            )
            .await;
    }
}

impl Stage for VideoGate {
    fn name(&self) -> &str {
        "video"
    }

    fn animated_in(&self) -> bool {
        self.animated_in.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::CollectingEventSink;
    use crate::testing::{ManualPlayback, MockAnimator};
    use pretty_assertions::assert_eq;

    fn gate(playback: Arc<ManualPlayback>, sink: Arc<CollectingEventSink>) -> VideoGate {
        VideoGate::new(
            "media/intro.mp4",
            playback,
            Arc::new(MockAnimator::new()),
            sink,
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_plays_and_announces() {
        let playback = Arc::new(ManualPlayback::new());
        let sink = Arc::new(CollectingEventSink::new());
        let gate = gate(Arc::clone(&playback), Arc::clone(&sink));

        gate.start().await;

        assert_eq!(playback.play_calls(), 1);
        assert_eq!(sink.count_of(Notice::VideoOpened), 1);
        assert!(gate.animated_in());
    }

    #[tokio::test(start_paused = true)]
    async fn test_refused_playback_keeps_stage_up() {
        let playback = Arc::new(ManualPlayback::rejecting());
        let sink = Arc::new(CollectingEventSink::new());
        let gate = gate(playback, Arc::clone(&sink));

        gate.start().await;

        // The stage is still presented even though play was refused.
        assert!(gate.animated_in());
        assert!(!gate.is_closed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_skip_and_end_close_exactly_once() {
        let playback = Arc::new(ManualPlayback::new());
        let sink = Arc::new(CollectingEventSink::new());
        let gate = gate(Arc::clone(&playback), Arc::clone(&sink));
        gate.start().await;

        gate.skip().await;
        gate.playback_ended().await;
        gate.skip().await;

        assert!(gate.is_closed());
        assert_eq!(playback.stop_calls(), 1);
        assert_eq!(sink.count_of(Notice::VideoClosed), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transport_sees_one_play_and_one_stop() {
        let mut playback = MockPlayback::new();
        playback.expect_play().times(1).returning(|| Ok(()));
        playback.expect_stop().times(1).return_const(());
        let gate = VideoGate::new(
            "media/intro.mp4",
            Arc::new(playback),
            Arc::new(MockAnimator::new()),
            Arc::new(CollectingEventSink::new()),
        );

        gate.start().await;
        gate.skip().await;
        gate.playback_ended().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_closed_resolves_for_late_waiters() {
        let playback = Arc::new(ManualPlayback::new());
        let sink = Arc::new(CollectingEventSink::new());
        let gate = gate(playback, sink);
        gate.start().await;
        gate.skip().await;

        // Awaiting after the latch fired must not hang.
        gate.closed().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_closed_wakes_concurrent_waiter() {
        let playback = Arc::new(ManualPlayback::new());
        let sink = Arc::new(CollectingEventSink::new());
        let gate = Arc::new(gate(playback, sink));
        gate.start().await;

        let waiter = {
            let gate = Arc::clone(&gate);
            tokio::spawn(async move { gate.closed().await })
        };
        tokio::task::yield_now().await;
        gate.playback_ended().await;

        waiter.await.unwrap();
    }
}
