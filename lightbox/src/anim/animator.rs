//! Animator trait and the timer-backed implementation.

use super::Ease;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::Duration;
use uuid::Uuid;

/// Opaque handle for an animatable target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetId(Uuid);

impl TargetId {
    /// Allocates a fresh target handle.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TargetId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TargetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Property end-values for one transition. Unset fields are left untouched
/// on the target.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Props {
    /// Opacity in `[0, 1]`.
    pub opacity: Option<f64>,
    /// Horizontal offset in logical units.
    pub x: Option<f64>,
    /// Vertical offset in logical units.
    pub y: Option<f64>,
    /// Uniform scale.
    pub scale: Option<f64>,
    /// Width in logical units.
    pub width: Option<f64>,
    /// Height in logical units.
    pub height: Option<f64>,
}

impl Props {
    /// Creates an empty property set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the opacity end-value.
    #[must_use]
    pub fn opacity(mut self, value: f64) -> Self {
        self.opacity = Some(value);
        self
    }

    /// Sets the horizontal offset end-value.
    #[must_use]
    pub fn x(mut self, value: f64) -> Self {
        self.x = Some(value);
        self
    }

    /// Sets the vertical offset end-value.
    #[must_use]
    pub fn y(mut self, value: f64) -> Self {
        self.y = Some(value);
        self
    }

    /// Sets the scale end-value.
    #[must_use]
    pub fn scale(mut self, value: f64) -> Self {
        self.scale = Some(value);
        self
    }

    /// Sets the size end-values.
    #[must_use]
    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Overlays `other` onto `self`, keeping fields `other` leaves unset.
    #[must_use]
    pub fn merged(self, other: Self) -> Self {
        Self {
            opacity: other.opacity.or(self.opacity),
            x: other.x.or(self.x),
            y: other.y.or(self.y),
            scale: other.scale.or(self.scale),
            width: other.width.or(self.width),
            height: other.height.or(self.height),
        }
    }
}

/// How a transition resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The transition ran to completion.
    Completed,
    /// A later call on the same target superseded this one.
    Superseded,
}

/// Runs timed property transitions against opaque targets.
///
/// A call resolves when its delay plus duration elapse. Issuing a new call
/// against a target that already has a transition in flight supersedes the
/// older call: the older future resolves [`Outcome::Superseded`] and its
/// end-values are not applied.
#[async_trait]
pub trait Animator: Send + Sync {
    /// Runs one transition.
    async fn animate(
        &self,
        target: TargetId,
        props: Props,
        duration: Duration,
        ease: Ease,
        delay: Duration,
    ) -> Outcome;
}

/// Timer-backed [`Animator`].
///
/// Tracks a generation counter per target for last-call-wins semantics and
/// keeps a ledger of settled end-values so observers can read where a target
/// landed.
#[derive(Debug, Default)]
pub struct TimelineAnimator {
    generations: Mutex<HashMap<TargetId, u64>>,
    settled: Mutex<HashMap<TargetId, Props>>,
}

impl TimelineAnimator {
    /// Creates a new timeline animator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the settled end-values for a target, if any transition has
    /// completed against it.
    #[must_use]
    pub fn settled_props(&self, target: TargetId) -> Option<Props> {
        self.settled.lock().get(&target).copied()
    }

    /// Forgets all bookkeeping for a target.
    pub fn release(&self, target: TargetId) {
        self.generations.lock().remove(&target);
        self.settled.lock().remove(&target);
    }

    fn begin(&self, target: TargetId) -> u64 {
        let mut generations = self.generations.lock();
        let generation = generations.entry(target).or_insert(0);
        *generation += 1;
        *generation
    }

    fn is_current(&self, target: TargetId, generation: u64) -> bool {
        self.generations.lock().get(&target) == Some(&generation)
    }
}

#[async_trait]
impl Animator for TimelineAnimator {
    async fn animate(
        &self,
        target: TargetId,
        props: Props,
        duration: Duration,
        _ease: Ease,
        delay: Duration,
    ) -> Outcome {
        let generation = self.begin(target);

        if !delay.is_zero() || !duration.is_zero() {
            tokio::time::sleep(delay + duration).await;
        }

        if self.is_current(target, generation) {
            let mut settled = self.settled.lock();
            let merged = settled.get(&target).copied().unwrap_or_default().merged(props);
            settled.insert(target, merged);
            Outcome::Completed
        } else {
            Outcome::Superseded
        }
    }
}
