//! Staggered line reveals for the intro stages and the gallery headline.

use super::stage::Stage;
use crate::anim::{Animator, Ease, Props, TargetId};
use crate::config::Timings;
use crate::visual::Animatable;
use async_trait::async_trait;
use futures::future::join_all;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

struct Line {
    target: TargetId,
    #[allow(dead_code)]
    text: String,
}

/// An ordered list of text/graphic lines revealed with staggered delays
/// and hidden in reverse order.
///
/// The reversal is a deliberate visual convention (last-in, first-out).
pub struct IntroSequence {
    name: String,
    lines: Vec<Line>,
    stage_target: TargetId,
    stage_fade: Duration,
    animated_in: AtomicBool,
    animator: Arc<dyn Animator>,
    timings: Timings,
}

impl IntroSequence {
    /// Creates a sequence over the given lines.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        texts: Vec<String>,
        animator: Arc<dyn Animator>,
        timings: Timings,
        stage_fade: Duration,
    ) -> Self {
        Self {
            name: name.into(),
            lines: texts
                .into_iter()
                .map(|text| Line { target: TargetId::new(), text })
                .collect(),
            stage_target: TargetId::new(),
            stage_fade,
            animated_in: AtomicBool::new(false),
            animator,
            timings,
        }
    }

    /// Number of lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the sequence has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Line targets in reveal order, for observers.
    #[must_use]
    pub fn line_targets(&self) -> Vec<TargetId> {
        self.lines.iter().map(|line| line.target).collect()
    }
}

impl std::fmt::Debug for IntroSequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntroSequence")
            .field("name", &self.name)
            .field("lines", &self.lines.len())
            .field("animated_in", &self.animated_in())
            .finish()
    }
}

#[async_trait]
impl Animatable for IntroSequence {
    /// Reveals lines in array order with the configured incremental
    /// delay; resolves when the last line's reveal completes.
    async fn animate_in(&self) {
        self.animated_in.store(true, Ordering::SeqCst);
        let stagger = self.timings.line_stagger_in();
        join_all(self.lines.iter().enumerate().map(|(i, line)| {
            self.animator.animate(
                line.target,
                Props::new().opacity(1.0),
                self.timings.line_in(),
                Ease::OutCubic,
                stagger * u32::try_from(i).unwrap_or(u32::MAX),
            )
        }))
        .await;
    }

    /// Hides lines in reverse order with a shorter incremental delay,
    /// then fades the whole stage.
    async fn animate_out(&self) {
        self.animated_in.store(false, Ordering::SeqCst);
        let stagger = self.timings.line_stagger_out();
        join_all(self.lines.iter().rev().enumerate().map(|(i, line)| {
            self.animator.animate(
                line.target,
                Props::new().opacity(0.0),
                self.timings.line_out(),
                Ease::OutSine,
                stagger * u32::try_from(i).unwrap_or(u32::MAX),
            )
        }))
        .await;
        self.animator
            .animate(
                self.stage_target,
                Props::new().opacity(0.0),
                self.stage_fade,
                Ease::InSine,
                Duration::ZERO,
            )
            .await;
    }
}

impl Stage for IntroSequence {
    fn name(&self) -> &str {
        &self.name
    }

    fn animated_in(&self) -> bool {
        self.animated_in.load(Ordering::SeqCst)
    }
}
