//! Full-screen overlays: the photo viewer and the about panel.
//!
//! Opening either disables background page scrolling and input for its
//! duration; both report their lifecycle through the event sink.

use super::carousel::GalleryCarousel;
use super::GalleryDeps;
use crate::anim::{Ease, Props, TargetId};
use crate::events::Notice;
use crate::model::Photo;
use crate::visual::{Resizable, Swipe, Viewport};
use std::sync::Arc;
use std::time::Duration;

/// The full-screen photo viewer, backed by a carousel at full resolution.
#[derive(Debug)]
pub struct PhotoOverlay {
    carousel: GalleryCarousel,
    target: TargetId,
    deps: GalleryDeps,
}

impl PhotoOverlay {
    /// Opens the overlay on `photos[start_index]`, locks background
    /// scrolling, and fades in.
    ///
    /// Returns `None` when the start index is out of range.
    pub async fn open(
        photos: Arc<[Photo]>,
        start_index: usize,
        viewport: Viewport,
        deps: GalleryDeps,
    ) -> Option<Self> {
        let carousel = GalleryCarousel::open(photos, start_index, viewport, deps.clone())?;

        deps.state.set_scroll_locked(true);
        deps.sink.emit(Notice::PhotoOpened).await;

        let target = TargetId::new();
        deps.animator
            .animate(
                target,
                Props::new().opacity(1.0),
                deps.config.timings.overlay_in(),
                Ease::OutSine,
                Duration::ZERO,
            )
            .await;

        Some(Self { carousel, target, deps })
    }

    /// The backing carousel.
    #[must_use]
    pub fn carousel(&self) -> &GalleryCarousel {
        &self.carousel
    }

    /// Mutable access for navigation.
    pub fn carousel_mut(&mut self) -> &mut GalleryCarousel {
        &mut self.carousel
    }

    /// Applies a swipe gesture to the carousel.
    pub fn swipe(&mut self, gesture: Swipe) -> bool {
        self.carousel.swipe(gesture)
    }

    /// Fades out, waits for in-flight card transitions, destroys the
    /// carousel, and releases the scroll lock.
    pub async fn close(mut self) {
        self.deps
            .animator
            .animate(
                self.target,
                Props::new().opacity(0.0),
                self.deps.config.timings.overlay_out(),
                Ease::OutSine,
                Duration::ZERO,
            )
            .await;

        // Never truncate an in-flight exit animation.
        self.carousel.settle().await;
        self.carousel.destroy();

        self.deps.state.set_scroll_locked(false);
        self.deps.sink.emit(Notice::PhotoClosed).await;
    }
}

impl Resizable for PhotoOverlay {
    fn resize(&self, viewport: Viewport) {
        self.carousel.resize(viewport);
    }
}

/// The toggleable about panel.
#[derive(Debug)]
pub struct AboutPanel {
    target: TargetId,
    background: TargetId,
    text: TargetId,
    close_control: TargetId,
    deps: GalleryDeps,
}

impl AboutPanel {
    /// Opens the panel: sets the visibility flag, locks scrolling, and
    /// runs the staggered reveal.
    pub async fn open(deps: GalleryDeps) -> Self {
        deps.state.set_about_visible(true);
        deps.state.set_scroll_locked(true);
        deps.sink.emit(Notice::AboutOpened).await;

        let panel = Self {
            target: TargetId::new(),
            background: TargetId::new(),
            text: TargetId::new(),
            close_control: TargetId::new(),
            deps,
        };

        let animator = &panel.deps.animator;
        // Background, settle-scale, text, and close control reveal on
        // their own offsets.
        let background = animator.animate(
            panel.background,
            Props::new().opacity(1.0),
            Duration::from_millis(800),
            Ease::OutSine,
            Duration::from_millis(100),
        );
        let settle = animator.animate(
            panel.target,
            Props::new().scale(1.0),
            Duration::from_millis(2000),
            Ease::OutQuart,
            Duration::from_millis(100),
        );
        let text = animator.animate(
            panel.text,
            Props::new().opacity(1.0),
            Duration::from_millis(3000),
            Ease::InOutSine,
            Duration::from_millis(800),
        );
        let close_control = animator.animate(
            panel.close_control,
            Props::new().y(0.0).opacity(1.0),
            Duration::from_millis(450),
            Ease::OutCubic,
            Duration::from_millis(1800),
        );
        futures::join!(background, settle, text, close_control);

        panel
    }

    /// Fades the panel out, clears the visibility flag, and releases the
    /// scroll lock.
    pub async fn close(self) {
        self.deps.state.set_about_visible(false);
        self.deps
            .animator
            .animate(
                self.target,
                Props::new().opacity(0.0),
                Duration::from_millis(700),
                Ease::OutSine,
                Duration::ZERO,
            )
            .await;
        self.deps.state.set_scroll_locked(false);
        self.deps.sink.emit(Notice::AboutClosed).await;
    }
}
