//! Top-level orchestrator for the experience sequence.
//!
//! Owns the stage order (loader, video, intros, gallery), advances on
//! completion of each stage, and mounts the gallery once the interludes
//! are done. Stage ownership lives in take-once slots so the concurrent
//! video-close path and the sequential intro path can race without a
//! stage ever being torn down twice.

use super::intro::IntroSequence;
use super::loader::{LoaderStage, PreloadTask};
use super::stage::close_stage;
use super::video::{Playback, VideoGate};
use crate::anim::{Animator, Ease, Props, TargetId};
use crate::assets::AssetLoader;
use crate::config::LightboxConfig;
use crate::events::EventSink;
use crate::gallery::{AboutPanel, GalleryDeps, GalleryRow, PhotoOverlay};
use crate::input::{InputEvent, InputReceiver};
use crate::model::{group_by_tag, image_path, manifest_url, rows_for_tags, Tier};
use crate::state::AppState;
use crate::visual::{Animatable, Swipe, Viewport};
use futures::future::join_all;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::sleep;
use tracing::{info, warn};

/// Where the sequence currently stands. Published on a watch channel so
/// chrome can follow along without polling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Preload tasks are still settling behind the loader stage.
    Loading,
    /// The gate has fired; waiting on the one-shot enter click.
    AwaitingEnter,
    /// The gating video is up.
    VideoOpen,
    /// The video's close latch has fired; gallery build is under way.
    VideoClosed,
    /// Intro stages are playing (no video configured).
    IntroPlaying,
    /// The gallery and persistent chrome are mounted.
    GalleryReady,
}

/// Collaborators handed to the controller at construction.
#[derive(Clone)]
pub struct SequencerDeps {
    /// Timed property transitions.
    pub animator: Arc<dyn Animator>,
    /// Asset resolution.
    pub assets: Arc<dyn AssetLoader>,
    /// Cross-cutting overlay notices.
    pub sink: Arc<dyn EventSink>,
    /// Application state: controller writes, views read.
    pub state: Arc<AppState>,
    /// Experience configuration.
    pub config: Arc<LightboxConfig>,
    /// Media transport for the gating video.
    pub playback: Arc<dyn Playback>,
    /// Logical viewport used for slide fitting.
    pub viewport: Viewport,
}

impl std::fmt::Debug for SequencerDeps {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SequencerDeps")
            .field("viewport", &self.viewport)
            .finish_non_exhaustive()
    }
}

/// The mounted gallery: one row per tag plus persistent chrome.
pub struct Gallery {
    rows: Vec<GalleryRow>,
    headline: IntroSequence,
    nav: TargetId,
    footer: TargetId,
}

impl Gallery {
    #[must_use]
    pub fn rows(&self) -> &[GalleryRow] {
        &self.rows
    }

    #[must_use]
    pub fn headline(&self) -> &IntroSequence {
        &self.headline
    }

    #[must_use]
    pub fn nav_target(&self) -> TargetId {
        self.nav
    }

    #[must_use]
    pub fn footer_target(&self) -> TargetId {
        self.footer
    }
}

impl std::fmt::Debug for Gallery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gallery").field("rows", &self.rows.len()).finish_non_exhaustive()
    }
}

#[derive(Default)]
struct StageSlots {
    loader: Option<Arc<LoaderStage>>,
    intro1: Option<Arc<IntroSequence>>,
    intro2: Option<Arc<IntroSequence>>,
    video: Option<Arc<VideoGate>>,
}

struct Shared {
    deps: SequencerDeps,
    phase: watch::Sender<Phase>,
    entered: AtomicBool,
    slots: Mutex<StageSlots>,
    gallery: Mutex<Option<Gallery>>,
    overlay: Mutex<Option<PhotoOverlay>>,
    about: Mutex<Option<AboutPanel>>,
}

impl Shared {
    fn set_phase(&self, phase: Phase) {
        info!(?phase, "sequence phase");
        self.phase.send_replace(phase);
    }

    fn gallery_deps(&self) -> GalleryDeps {
        GalleryDeps {
            animator: Arc::clone(&self.deps.animator),
            assets: Arc::clone(&self.deps.assets),
            sink: Arc::clone(&self.deps.sink),
            state: Arc::clone(&self.deps.state),
            config: Arc::clone(&self.deps.config),
        }
    }

    /// Reacts to the video gate's close latch: retire the video stage,
    /// build the gallery underneath, then retire any intro stage the
    /// sequential path has not already consumed.
    async fn watch_video(&self, video: Arc<VideoGate>) {
        video.closed().await;
        self.set_phase(Phase::VideoClosed);

        // Take under the lock, then await; the guard must not live
        // across the suspension point.
        let taken = self.slots.lock().video.take();
        if let Some(video) = taken {
            close_stage(video.as_ref()).await;
        }

        self.build_gallery().await;

        let (first, second) = {
            let mut slots = self.slots.lock();
            (slots.intro1.take(), slots.intro2.take())
        };
        for stage in [first, second].into_iter().flatten() {
            close_stage(stage.as_ref()).await;
        }

        self.set_phase(Phase::GalleryReady);
    }

    /// Runs the intro stages strictly sequentially. Each is revealed,
    /// held for its dwell, then taken from its slot and hidden. A slot
    /// already emptied by the video-close path is skipped.
    async fn play_intros(&self) {
        let timings = &self.deps.config.timings;
        self.play_intro(IntroSlot::First, timings.intro1_dwell()).await;
        self.play_intro(IntroSlot::Second, timings.intro2_dwell()).await;
    }

    async fn play_intro(&self, slot: IntroSlot, dwell: Duration) {
        let Some(stage) = self.slots.lock().intro(slot).clone() else {
            return;
        };
        stage.animate_in().await;
        sleep(dwell).await;
        // Re-check: the video-close path may have taken the stage
        // during the dwell.
        let taken = self.slots.lock().intro(slot).take();
        if let Some(stage) = taken {
            stage.animate_out().await;
        }
    }

    async fn build_gallery(&self) {
        let photos = self.deps.state.library.photos();
        let config = &self.deps.config;
        let grouped = if config.row_tags.is_empty() {
            group_by_tag(&photos)
        } else {
            rows_for_tags(&photos, &config.row_tags)
        };

        let deps = self.gallery_deps();
        let rows: Vec<GalleryRow> = grouped
            .into_iter()
            .map(|(tag, members)| GalleryRow::build(tag, members, self.deps.viewport, deps.clone()))
            .collect();
        info!(rows = rows.len(), photos = photos.len(), "gallery built");

        let nav = TargetId::new();
        let footer = TargetId::new();
        let chrome = self.deps.animator.animate(
            nav,
            Props::new().opacity(1.0),
            Duration::from_millis(700),
            Ease::OutSine,
            Duration::ZERO,
        );
        let footer_fade = self.deps.animator.animate(
            footer,
            Props::new().opacity(1.0),
            Duration::from_millis(700),
            Ease::OutSine,
            Duration::from_millis(300),
        );
        futures::join!(
            chrome,
            footer_fade,
            join_all(rows.iter().map(GalleryRow::animate_in)),
        );

        let headline = IntroSequence::new(
            "headline",
            config.headline_lines.clone(),
            Arc::clone(&self.deps.animator),
            config.timings.clone(),
            config.timings.stage_fade(),
        );
        sleep(config.timings.headline_dwell()).await;
        headline.animate_in().await;

        *self.gallery.lock() = Some(Gallery { rows, headline, nav, footer });
    }
}

#[derive(Debug, Clone, Copy)]
enum IntroSlot {
    First,
    Second,
}

impl StageSlots {
    fn intro(&mut self, slot: IntroSlot) -> &mut Option<Arc<IntroSequence>> {
        match slot {
            IntroSlot::First => &mut self.intro1,
            IntroSlot::Second => &mut self.intro2,
        }
    }
}

/// Drives the whole experience from preload to gallery.
#[derive(Clone)]
pub struct SequenceController {
    shared: Arc<Shared>,
}

impl SequenceController {
    #[must_use]
    pub fn new(deps: SequencerDeps) -> Self {
        let config = Arc::clone(&deps.config);
        let (phase, _) = watch::channel(Phase::Loading);
        let mut slots = StageSlots::default();
        slots.intro1 = Some(Arc::new(IntroSequence::new(
            "intro1",
            config.intro1_lines.clone(),
            Arc::clone(&deps.animator),
            config.timings.clone(),
            config.timings.stage_fade(),
        )));
        slots.intro2 = Some(Arc::new(IntroSequence::new(
            "intro2",
            config.intro2_lines.clone(),
            Arc::clone(&deps.animator),
            config.timings.clone(),
            config.timings.stage_fade(),
        )));
        if let Some(src) = &config.video_src {
            slots.video = Some(Arc::new(VideoGate::new(
                src.clone(),
                Arc::clone(&deps.playback),
                Arc::clone(&deps.animator),
                Arc::clone(&deps.sink),
            )));
        }
        Self {
            shared: Arc::new(Shared {
                deps,
                phase,
                entered: AtomicBool::new(false),
                slots: Mutex::new(slots),
                gallery: Mutex::new(None),
                overlay: Mutex::new(None),
                about: Mutex::new(None),
            }),
        }
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        *self.shared.phase.borrow()
    }

    /// Subscribes to phase transitions.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Phase> {
        self.shared.phase.subscribe()
    }

    /// Runs the full sequence: preload, one-shot enter click, stage
    /// interludes, then an input loop for the gallery session.
    pub async fn run(&self, mut input: InputReceiver) {
        self.preload().await;
        self.shared.set_phase(Phase::AwaitingEnter);

        if input.next_click().await.is_none() {
            return;
        }

        // The interludes run in the background so skip clicks and other
        // input keep flowing while they play.
        let sequence = {
            let this = self.clone();
            tokio::spawn(async move { this.enter().await })
        };
        while let Some(event) = input.next().await {
            self.handle_input(event).await;
        }
        let _ = sequence.await;
    }

    /// Spawns the preload tasks behind the loader stage and waits for
    /// the gate to fire.
    pub async fn preload(&self) {
        let shared = &self.shared;
        let config = Arc::clone(&shared.deps.config);
        let assets = Arc::clone(&shared.deps.assets);
        let state = Arc::clone(&shared.deps.state);

        let mut tasks = Vec::new();
        {
            let assets = Arc::clone(&assets);
            let fonts = config.fonts.clone();
            tasks.push(PreloadTask::new(
                "fonts",
                Box::pin(async move { assets.load_fonts(&fonts).await }),
            ));
        }
        {
            let assets = Arc::clone(&assets);
            let config = Arc::clone(&config);
            tasks.push(PreloadTask::new(
                "manifest",
                Box::pin(async move {
                    let url = manifest_url(&config.manifest_path);
                    match assets.load_manifest(&url).await {
                        Ok(manifest) => {
                            state.library.publish(manifest);
                            // Warm the thumbnails for the rows shown
                            // first, so the gallery reveal is not blank.
                            let photos = state.library.photos();
                            let warm: Vec<String> =
                                rows_for_tags(&photos, &config.preload_row_tags)
                                    .into_iter()
                                    .flat_map(|(_, members)| members)
                                    .map(|photo| image_path(&photo, Tier::Thumb, config.nocredit))
                                    .collect();
                            assets.load_assets(&warm).await;
                        }
                        Err(error) => warn!(%error, "manifest load failed, starting empty"),
                    }
                }),
            ));
        }
        if !config.preload_assets.is_empty() {
            let assets = Arc::clone(&assets);
            let paths = config.preload_assets.clone();
            tasks.push(PreloadTask::new(
                "images",
                Box::pin(async move { assets.load_assets(&paths).await }),
            ));
        }

        let loader = Arc::new(LoaderStage::new(
            config.loader_lines.clone(),
            tasks,
            Arc::clone(&shared.deps.animator),
            config.timings.clone(),
        ));
        shared.slots.lock().loader = Some(Arc::clone(&loader));

        loader.animate_in().await;
        loader.complete().await;
    }

    /// Advances past the loading screen. Idempotent; only the first
    /// call runs the interludes.
    pub async fn enter(&self) {
        if self
            .shared
            .entered
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return;
        }

        let video = self.shared.slots.lock().video.clone();
        if let Some(video) = video.clone() {
            self.shared.set_phase(Phase::VideoOpen);
            video.start().await;
            let shared = Arc::clone(&self.shared);
            tokio::spawn(async move { shared.watch_video(video).await });
        }

        let loader = self.shared.slots.lock().loader.take();
        if let Some(loader) = loader {
            close_stage(loader.as_ref()).await;
        }

        if video.is_none() {
            self.shared.set_phase(Phase::IntroPlaying);
        }
        self.shared.play_intros().await;

        if video.is_none() {
            self.shared.build_gallery().await;
            self.shared.set_phase(Phase::GalleryReady);
        }
    }

    /// Routes a user input event to whatever currently owns it.
    pub async fn handle_input(&self, event: InputEvent) {
        match event {
            InputEvent::Click => {
                let video = self.shared.slots.lock().video.clone();
                if let Some(video) = video {
                    video.skip().await;
                }
            }
            InputEvent::Escape => {
                if !self.close_photo().await {
                    self.close_about().await;
                }
            }
            InputEvent::SwipeLeft => self.swipe(Swipe::Left),
            InputEvent::SwipeRight => self.swipe(Swipe::Right),
        }
    }

    /// Opens the full-screen photo overlay on the library photo at
    /// `index`. Returns false when an overlay is already open or the
    /// index is out of range.
    pub async fn open_photo(&self, index: usize) -> bool {
        if self.shared.overlay.lock().is_some() {
            return false;
        }
        let photos = self.shared.deps.state.library.photos();
        let opened = PhotoOverlay::open(
            photos,
            index,
            self.shared.deps.viewport,
            self.shared.gallery_deps(),
        )
        .await;
        match opened {
            Some(overlay) => {
                *self.shared.overlay.lock() = Some(overlay);
                true
            }
            None => false,
        }
    }

    /// Closes the photo overlay if one is open.
    pub async fn close_photo(&self) -> bool {
        let overlay = self.shared.overlay.lock().take();
        match overlay {
            Some(overlay) => {
                overlay.close().await;
                true
            }
            None => false,
        }
    }

    fn swipe(&self, gesture: Swipe) {
        let mut overlay = self.shared.overlay.lock();
        if let Some(overlay) = overlay.as_mut() {
            overlay.swipe(gesture);
        }
    }

    /// Shows or hides the about panel.
    pub async fn toggle_about(&self) {
        let open = self.shared.about.lock().take();
        match open {
            Some(panel) => panel.close().await,
            None => {
                let panel = AboutPanel::open(self.shared.gallery_deps()).await;
                *self.shared.about.lock() = Some(panel);
            }
        }
    }

    async fn close_about(&self) {
        let open = self.shared.about.lock().take();
        if let Some(panel) = open {
            panel.close().await;
        }
    }

    /// Tags of the mounted gallery rows, in display order.
    #[must_use]
    pub fn gallery_row_tags(&self) -> Vec<String> {
        self.shared
            .gallery
            .lock()
            .as_ref()
            .map(|gallery| gallery.rows().iter().map(|row| row.tag().to_string()).collect())
            .unwrap_or_default()
    }

    /// Whether the photo overlay is open.
    #[must_use]
    pub fn photo_open(&self) -> bool {
        self.shared.overlay.lock().is_some()
    }

    /// Index shown by the open overlay's carousel, if any.
    #[must_use]
    pub fn overlay_index(&self) -> Option<usize> {
        self.shared.overlay.lock().as_ref().map(|overlay| overlay.carousel().index())
    }
}

impl std::fmt::Debug for SequenceController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SequenceController").field("phase", &self.phase()).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::CollectingEventSink;
    use crate::testing::{deps_with, manifest_fixture, ManualPlayback, MockAnimator};
    use pretty_assertions::assert_eq;

    fn controller(config: LightboxConfig) -> (SequenceController, Arc<CollectingEventSink>) {
        let sink = Arc::new(CollectingEventSink::new());
        let deps = deps_with(
            Arc::new(MockAnimator::new()),
            Arc::clone(&sink) as Arc<dyn EventSink>,
            Arc::new(config),
            Arc::new(ManualPlayback::new()),
        );
        (SequenceController::new(deps), sink)
    }

    fn no_video_config() -> LightboxConfig {
        LightboxConfig {
            video_src: None,
            row_tags: Vec::new(),
            preload_assets: Vec::new(),
            preload_row_tags: Vec::new(),
            ..LightboxConfig::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_video_path_reaches_gallery() {
        let (controller, _) = controller(no_video_config());
        controller.shared.deps.state.library.publish(manifest_fixture());

        controller.preload().await;
        assert_eq!(controller.phase(), Phase::Loading);
        controller.enter().await;

        assert_eq!(controller.phase(), Phase::GalleryReady);
        assert!(!controller.gallery_row_tags().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_enter_is_one_shot() {
        let (controller, _) = controller(no_video_config());
        controller.shared.deps.state.library.publish(manifest_fixture());

        controller.preload().await;
        controller.enter().await;
        let rows = controller.gallery_row_tags();

        // A second enter must not replay the sequence.
        controller.enter().await;
        assert_eq!(controller.gallery_row_tags(), rows);
    }

    #[tokio::test(start_paused = true)]
    async fn test_video_skip_leads_to_gallery() {
        let mut config = no_video_config();
        config.video_src = Some("media/intro.mp4".to_string());
        let (controller, sink) = controller(config);
        controller.shared.deps.state.library.publish(manifest_fixture());
        controller.preload().await;

        let sequence = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.enter().await })
        };
        tokio::time::sleep(Duration::from_millis(2500)).await;
        assert_eq!(controller.phase(), Phase::VideoOpen);

        controller.handle_input(InputEvent::Click).await;
        sequence.await.unwrap();
        // Let the spawned video-close path finish building the gallery.
        tokio::time::sleep(Duration::from_secs(30)).await;

        assert_eq!(controller.phase(), Phase::GalleryReady);
        assert_eq!(sink.count_of(crate::events::Notice::VideoClosed), 1);
        assert!(!controller.gallery_row_tags().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_teardown_releases_every_stage_slot() {
        let mut config = no_video_config();
        config.video_src = Some("media/intro.mp4".to_string());
        let (controller, _) = controller(config);
        controller.shared.deps.state.library.publish(manifest_fixture());
        controller.preload().await;

        // The sequence runs on its own task, so the loader and video
        // teardowns must cross a spawn boundary.
        let sequence = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.enter().await })
        };
        tokio::time::sleep(Duration::from_millis(2500)).await;
        controller.handle_input(InputEvent::Click).await;
        sequence.await.unwrap();
        tokio::time::sleep(Duration::from_secs(30)).await;

        let slots = controller.shared.slots.lock();
        assert!(slots.loader.is_none());
        assert!(slots.video.is_none());
        assert!(slots.intro1.is_none());
        assert!(slots.intro2.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_overlay_open_navigate_close() {
        let (controller, sink) = controller(no_video_config());
        controller.shared.deps.state.library.publish(manifest_fixture());

        assert!(controller.open_photo(0).await);
        assert!(controller.photo_open());

        controller.handle_input(InputEvent::SwipeLeft).await;
        assert_eq!(controller.overlay_index(), Some(1));

        controller.handle_input(InputEvent::Escape).await;
        assert!(!controller.photo_open());
        assert_eq!(sink.count_of(crate::events::Notice::PhotoOpened), 1);
        assert_eq!(sink.count_of(crate::events::Notice::PhotoClosed), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_open_photo_rejects_second_overlay_and_bad_index() {
        let (controller, _) = controller(no_video_config());
        controller.shared.deps.state.library.publish(manifest_fixture());

        assert!(!controller.open_photo(999).await);
        assert!(controller.open_photo(0).await);
        assert!(!controller.open_photo(1).await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_toggle_about_flags_state() {
        let (controller, _) = controller(no_video_config());
        let state = Arc::clone(&controller.shared.deps.state);

        controller.toggle_about().await;
        assert!(state.about_visible());
        assert!(state.scroll_locked());

        controller.toggle_about().await;
        assert!(!state.about_visible());
        assert!(!state.scroll_locked());
    }
}
