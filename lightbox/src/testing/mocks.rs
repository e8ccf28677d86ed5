//! Recording doubles for the animation and playback seams.

use crate::anim::{Animator, Ease, Outcome, Props, TargetId};
use crate::errors::PlaybackError;
use crate::sequence::Playback;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::time::sleep;

/// One recorded [`Animator::animate`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimateCall {
    /// Target the transition was issued against.
    pub target: TargetId,
    /// Requested end-state properties.
    pub props: Props,
    /// Transition duration.
    pub duration: Duration,
    /// Easing curve.
    pub ease: Ease,
    /// Start delay.
    pub delay: Duration,
    /// Issue order across all targets.
    pub seq: usize,
}

/// Animator that records every call and honors its timing, so paused
/// clock tests can assert both order and elapsed time.
#[derive(Debug, Default)]
pub struct MockAnimator {
    calls: Mutex<Vec<AnimateCall>>,
    seq: AtomicUsize,
}

impl MockAnimator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls recorded so far, in issue order.
    #[must_use]
    pub fn calls(&self) -> Vec<AnimateCall> {
        self.calls.lock().clone()
    }

    /// Calls recorded against one target, in issue order.
    #[must_use]
    pub fn calls_for(&self, target: TargetId) -> Vec<AnimateCall> {
        self.calls.lock().iter().filter(|call| call.target == target).cloned().collect()
    }

    /// Drops the recording, keeping the sequence counter.
    pub fn clear(&self) {
        self.calls.lock().clear();
    }
}

#[async_trait]
impl Animator for MockAnimator {
    async fn animate(
        &self,
        target: TargetId,
        props: Props,
        duration: Duration,
        ease: Ease,
        delay: Duration,
    ) -> Outcome {
        let seq = self.seq.fetch_add(1, Ordering::SeqCst);
        self.calls.lock().push(AnimateCall { target, props, duration, ease, delay, seq });
        sleep(delay + duration).await;
        Outcome::Completed
    }
}

/// Transport double with call counters and an optional refusal mode.
#[derive(Debug, Default)]
pub struct ManualPlayback {
    reject: bool,
    plays: AtomicUsize,
    stops: AtomicUsize,
}

impl ManualPlayback {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A transport that refuses every play request.
    #[must_use]
    pub fn rejecting() -> Self {
        Self { reject: true, ..Self::default() }
    }

    #[must_use]
    pub fn play_calls(&self) -> usize {
        self.plays.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn stop_calls(&self) -> usize {
        self.stops.load(Ordering::SeqCst)
    }
}

impl Playback for ManualPlayback {
    fn play(&self) -> Result<(), PlaybackError> {
        self.plays.fetch_add(1, Ordering::SeqCst);
        if self.reject {
            return Err(PlaybackError::AutoplayRejected);
        }
        Ok(())
    }

    fn stop(&self) {
        self.stops.fetch_add(1, Ordering::SeqCst);
    }
}
