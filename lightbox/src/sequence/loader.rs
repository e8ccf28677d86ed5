//! Preload gate and loader stage.
//!
//! The gate counts a fixed set of named preload tasks and fires a
//! completion signal exactly once when the last one settles. A smoothed
//! progress meter follows the raw completion ratio for display.

use super::intro::IntroSequence;
use super::stage::Stage;
use crate::anim::Animator;
use crate::config::Timings;
use crate::visual::Animatable;
use async_trait::async_trait;
use futures::future::BoxFuture;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Notify};
use tracing::debug;

/// A named unit of preload work. Tasks report completion regardless of
/// whether the underlying load succeeded; a missing asset must not wedge
/// the loading screen.
pub struct PreloadTask {
    name: String,
    work: BoxFuture<'static, ()>,
}

impl PreloadTask {
    #[must_use]
    pub fn new(name: impl Into<String>, work: BoxFuture<'static, ()>) -> Self {
        Self { name: name.into(), work }
    }
}

impl std::fmt::Debug for PreloadTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreloadTask").field("name", &self.name).finish_non_exhaustive()
    }
}

struct GateInner {
    total: usize,
    done: AtomicUsize,
    fired: AtomicBool,
    notify: Notify,
    progress: watch::Sender<f64>,
}

impl GateInner {
    fn settle_one(&self, name: &str) {
        let done = self.done.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(task = name, done, total = self.total, "preload task settled");
        let ratio = done as f64 / self.total as f64;
        self.progress.send_replace(ratio.min(1.0));
        if done >= self.total
            && self
                .fired
                .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
                .is_ok()
        {
            self.notify.notify_waiters();
        }
    }
}

/// Counter gate over a batch of preload tasks.
pub struct StageLoader {
    inner: Arc<GateInner>,
}

impl StageLoader {
    /// Spawns every task and returns the gate. An empty batch fires
    /// immediately.
    #[must_use]
    pub fn start(tasks: Vec<PreloadTask>) -> Self {
        let (progress, _) = watch::channel(0.0);
        let inner = Arc::new(GateInner {
            total: tasks.len(),
            done: AtomicUsize::new(0),
            fired: AtomicBool::new(false),
            notify: Notify::new(),
            progress,
        });
        if tasks.is_empty() {
            inner.fired.store(true, Ordering::SeqCst);
            inner.progress.send_replace(1.0);
        }
        for task in tasks {
            let inner = Arc::clone(&inner);
            tokio::spawn(async move {
                task.work.await;
                inner.settle_one(&task.name);
            });
        }
        Self { inner }
    }

    /// Resolves once all tasks have settled. Safe to await from several
    /// places and after the gate has already fired.
    pub async fn complete(&self) {
        loop {
            let notified = self.inner.notify.notified();
            if self.inner.fired.load(Ordering::SeqCst) {
                return;
            }
            notified.await;
        }
    }

    /// Raw completion ratio in `[0, 1]`.
    #[must_use]
    pub fn ratio(&self) -> f64 {
        *self.inner.progress.borrow()
    }

    /// Subscribes to completion ratio updates.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<f64> {
        self.inner.progress.subscribe()
    }
}

impl std::fmt::Debug for StageLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StageLoader")
            .field("total", &self.inner.total)
            .field("done", &self.inner.done.load(Ordering::SeqCst))
            .finish()
    }
}

/// Displayed progress value that eases toward the raw ratio instead of
/// jumping, so a burst of settled tasks still reads as motion.
#[derive(Debug, Clone, Copy)]
pub struct ProgressMeter {
    shown: f64,
    rate: f64,
}

impl Default for ProgressMeter {
    fn default() -> Self {
        Self { shown: 0.0, rate: 0.15 }
    }
}

impl ProgressMeter {
    /// Advances the displayed value one step toward `target`.
    /// Never moves backward.
    pub fn tick(&mut self, target: f64) -> f64 {
        let target = target.clamp(0.0, 1.0);
        if target > self.shown {
            self.shown += (target - self.shown) * self.rate;
            if target - self.shown < 0.001 {
                self.shown = target;
            }
        }
        self.shown
    }

    /// Currently displayed value.
    #[must_use]
    pub fn shown(&self) -> f64 {
        self.shown
    }
}

/// Stage fade for the loading screen, longer than the intro stages so
/// the progress readout has time to register as finished.
const LOADER_STAGE_FADE: Duration = Duration::from_millis(1350);

/// The loading screen: credit lines plus the preload gate.
pub struct LoaderStage {
    lines: IntroSequence,
    gate: StageLoader,
}

impl LoaderStage {
    #[must_use]
    pub fn new(
        texts: Vec<String>,
        tasks: Vec<PreloadTask>,
        animator: Arc<dyn Animator>,
        timings: Timings,
    ) -> Self {
        Self {
            lines: IntroSequence::new("loader", texts, animator, timings, LOADER_STAGE_FADE),
            gate: StageLoader::start(tasks),
        }
    }

    /// Resolves once every preload task has settled.
    pub async fn complete(&self) {
        self.gate.complete().await;
    }

    /// Subscribes to preload progress.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<f64> {
        self.gate.subscribe()
    }
}

impl std::fmt::Debug for LoaderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoaderStage").field("gate", &self.gate).finish_non_exhaustive()
    }
}

#[async_trait]
impl Animatable for LoaderStage {
    async fn animate_in(&self) {
        self.lines.animate_in().await;
    }

    async fn animate_out(&self) {
        self.lines.animate_out().await;
    }
}

impl Stage for LoaderStage {
    fn name(&self) -> &str {
        self.lines.name()
    }

    fn animated_in(&self) -> bool {
        self.lines.animated_in()
    }
}
