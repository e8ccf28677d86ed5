//! The abstract animate capability.
//!
//! Actual rendering is out of scope; an [`Animator`] runs timed property
//! transitions against opaque targets and resolves on completion. A new call
//! on the same target supersedes any transition already in flight
//! (last-call-wins).

mod animator;
mod ease;

pub use animator::{Animator, Outcome, Props, TargetId, TimelineAnimator};
pub use ease::Ease;
