//! The stage abstraction for the top-level experience sequence.

use crate::visual::Animatable;

/// One phase of the top-level sequence (loader, intro, video).
///
/// A stage is mounted by the controller, revealed with `animate_in`, and
/// destroyed immediately after its `animate_out` resolves. The
/// `animated_in` flag is read by external closers to decide whether an
/// out-animation is needed before teardown.
pub trait Stage: Animatable {
    /// The stage name, for logging.
    fn name(&self) -> &str;

    /// Whether the stage's reveal animation has run and not yet been
    /// reversed.
    fn animated_in(&self) -> bool;
}

/// Tears a stage down: runs its out-animation only when the stage was
/// animated in. Safe to call from either teardown path; the caller must
/// already hold exclusive ownership of the stage (taken from its slot),
/// which is what makes teardown exactly-once.
pub async fn close_stage(stage: &dyn Stage) {
    if stage.animated_in() {
        tracing::debug!(stage = stage.name(), "closing stage with out-animation");
        stage.animate_out().await;
    } else {
        tracing::debug!(stage = stage.name(), "closing stage without out-animation");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    #[derive(Default)]
    struct ProbeStage {
        animated_in: AtomicBool,
        outs: AtomicUsize,
    }

    #[async_trait]
    impl Animatable for ProbeStage {
        async fn animate_in(&self) {
            self.animated_in.store(true, Ordering::SeqCst);
        }

        async fn animate_out(&self) {
            self.animated_in.store(false, Ordering::SeqCst);
            self.outs.fetch_add(1, Ordering::SeqCst);
        }
    }

    impl Stage for ProbeStage {
        fn name(&self) -> &str {
            "probe"
        }

        fn animated_in(&self) -> bool {
            self.animated_in.load(Ordering::SeqCst)
        }
    }

    #[tokio::test]
    async fn test_close_skips_out_animation_when_never_revealed() {
        let stage = ProbeStage::default();
        close_stage(&stage).await;
        assert_eq!(stage.outs.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_close_runs_out_animation_after_reveal() {
        let stage = ProbeStage::default();
        stage.animate_in().await;
        close_stage(&stage).await;
        assert_eq!(stage.outs.load(Ordering::SeqCst), 1);
        assert!(!stage.animated_in());
    }
}
