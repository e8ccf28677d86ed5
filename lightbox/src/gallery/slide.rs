//! The visual unit for one photo: asynchronous image load, fitted sizing,
//! and the direction-aware slide-and-fade transitions.

use super::GalleryDeps;
use crate::anim::{Ease, Outcome, Props, TargetId};
use crate::assets::Asset;
use crate::model::{image_path, Photo, Tier};
use crate::visual::{Destroyable, Direction, Resizable, Viewport};
use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Records every card destruction so owners can verify exactly-once
/// teardown.
#[derive(Debug, Clone, Default)]
pub struct DestroyLedger {
    destroyed: Arc<Mutex<Vec<TargetId>>>,
}

impl DestroyLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, target: TargetId) {
        self.destroyed.lock().push(target);
    }

    /// Number of destructions observed.
    #[must_use]
    pub fn count(&self) -> usize {
        self.destroyed.lock().len()
    }

    /// Whether a target has been destroyed.
    #[must_use]
    pub fn contains(&self, target: TargetId) -> bool {
        self.destroyed.lock().contains(&target)
    }
}

/// One photo's visual element within a carousel or row.
///
/// The card requests its image at the tier appropriate to the calling
/// context; until the asset resolves it stays mounted with no fitted size
/// and the display degrades silently.
#[derive(Debug)]
pub struct SlideCard {
    photo: Photo,
    tier: Tier,
    /// The card element; slide/fade transitions run against this.
    target: TargetId,
    /// The inner image surface; the load fade runs against this so it
    /// never races the card transitions.
    surface: TargetId,
    loaded: Arc<RwLock<Option<Asset>>>,
    fitted: Arc<RwLock<Option<(u32, u32)>>>,
    viewport: Arc<RwLock<Viewport>>,
    destroyed: Arc<AtomicBool>,
    ledger: DestroyLedger,
    deps: GalleryDeps,
}

/// Delay before the image surface fades in once its asset resolves.
const IMAGE_FADE_DELAY: Duration = Duration::from_millis(100);

impl SlideCard {
    /// Mounts a card and begins its asynchronous image load.
    #[must_use]
    pub fn mount(
        photo: Photo,
        tier: Tier,
        viewport: Viewport,
        deps: GalleryDeps,
        ledger: DestroyLedger,
    ) -> Self {
        let card = Self {
            target: TargetId::new(),
            surface: TargetId::new(),
            loaded: Arc::new(RwLock::new(None)),
            fitted: Arc::new(RwLock::new(None)),
            viewport: Arc::new(RwLock::new(viewport)),
            destroyed: Arc::new(AtomicBool::new(false)),
            photo,
            tier,
            ledger,
            deps,
        };
        card.begin_load();
        card
    }

    fn begin_load(&self) {
        let path = image_path(&self.photo, self.tier, self.deps.config.nocredit);
        let loaded = Arc::clone(&self.loaded);
        let fitted = Arc::clone(&self.fitted);
        let viewport = Arc::clone(&self.viewport);
        let destroyed = Arc::clone(&self.destroyed);
        let deps = self.deps.clone();
        let surface = self.surface;
        let tier = self.tier;
        let margin = self.deps.config.slide_margin;
        let thumb_height = self.deps.config.thumb_height;

        tokio::spawn(async move {
            let asset = deps.assets.load_asset(&path).await;
            if destroyed.load(Ordering::SeqCst) {
                return;
            }
            let fit = fit_size(&asset, *viewport.read(), tier, margin, thumb_height);
            *fitted.write() = Some(fit);
            *loaded.write() = Some(asset);
            deps.animator
                .animate(
                    surface,
                    Props::new().opacity(1.0),
                    deps.config.timings.image_fade(),
                    Ease::OutSine,
                    IMAGE_FADE_DELAY,
                )
                .await;
        });
    }

    /// The photo this card presents.
    #[must_use]
    pub fn photo(&self) -> &Photo {
        &self.photo
    }

    /// The card's animation target.
    #[must_use]
    pub fn target(&self) -> TargetId {
        self.target
    }

    /// Whether the image asset has resolved.
    #[must_use]
    pub fn has_loaded(&self) -> bool {
        self.loaded.read().is_some()
    }

    /// The fitted display size, once computed.
    #[must_use]
    pub fn fitted_size(&self) -> Option<(u32, u32)> {
        *self.fitted.read()
    }

    /// Whether the card has been destroyed.
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed.load(Ordering::SeqCst)
    }

    /// Launches the entrance transition; resolves when it completes.
    ///
    /// With a direction, the card starts offset horizontally by the
    /// configured slide distance (sign = direction) and fades in. Without
    /// one (first mount), it appears immediately.
    pub fn animate_in(&self, direction: Option<Direction>) -> JoinHandle<Outcome> {
        let animator = Arc::clone(&self.deps.animator);
        let target = self.target;
        let offset = self.deps.config.slide_offset;
        let duration = self.deps.config.timings.slide_in();

        tokio::spawn(async move {
            match direction {
                Some(dir) => {
                    // Instant placement at the offset start, then the tween.
                    animator
                        .animate(
                            target,
                            Props::new().x(dir.sign() * offset).opacity(0.0),
                            Duration::ZERO,
                            Ease::Linear,
                            Duration::ZERO,
                        )
                        .await;
                    animator
                        .animate(
                            target,
                            Props::new().x(0.0).opacity(1.0),
                            duration,
                            Ease::OutCubic,
                            Duration::ZERO,
                        )
                        .await
                }
                None => {
                    animator
                        .animate(
                            target,
                            Props::new().x(0.0).opacity(1.0),
                            Duration::ZERO,
                            Ease::Linear,
                            Duration::ZERO,
                        )
                        .await
                }
            }
        })
    }

    /// Runs the exit transition, waits out the grace delay, then destroys
    /// the card. Destruction never precedes the animation's completion, so
    /// the transition is not visually truncated.
    pub async fn exit(self, direction: Option<Direction>) {
        if let Some(dir) = direction {
            // Outgoing card slides the opposite sign of the incoming one.
            self.deps
                .animator
                .animate(
                    self.target,
                    Props::new().x(-dir.sign() * self.deps.config.slide_offset).opacity(0.0),
                    self.deps.config.timings.slide_out(),
                    Ease::OutCubic,
                    Duration::ZERO,
                )
                .await;
        }
        tokio::time::sleep(self.deps.config.timings.slide_grace()).await;
        self.destroy();
    }
}

impl Resizable for SlideCard {
    fn resize(&self, viewport: Viewport) {
        *self.viewport.write() = viewport;
        let Some(asset) = self.loaded.read().clone() else {
            return;
        };
        let fit = fit_size(
            &asset,
            viewport,
            self.tier,
            self.deps.config.slide_margin,
            self.deps.config.thumb_height,
        );
        *self.fitted.write() = Some(fit);
    }
}

impl Destroyable for SlideCard {
    fn destroy(&self) -> bool {
        if self
            .destroyed
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
        {
            tracing::debug!(photo = %self.photo.id, target = %self.target, "slide card destroyed");
            self.ledger.record(self.target);
            true
        } else {
            false
        }
    }
}

/// Computes a fitted display size preserving aspect ratio: height-first,
/// falling back to width-first when the height-first result exceeds the
/// viewport width.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn fit_size(asset: &Asset, viewport: Viewport, tier: Tier, margin: f64, thumb_height: f64) -> (u32, u32) {
    let mut height = match tier {
        Tier::Thumb => thumb_height,
        Tier::Mid | Tier::Full => viewport.height - margin * 2.0,
    };
    let mut width = (height * asset.aspect()).round();
    if width > viewport.width {
        width = viewport.width;
        height = (width / asset.aspect()).round();
    }
    (width.max(0.0) as u32, height.max(0.0) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anim::TimelineAnimator;
    use crate::assets::StaticAssets;
    use crate::config::LightboxConfig;
    use crate::events::NoOpEventSink;
    use crate::state::AppState;

    fn photo(id: &str) -> Photo {
        Photo {
            id: id.to_string(),
            title: id.to_string(),
            date: String::new(),
            location: String::new(),
            tag: "Navy".to_string(),
            image: format!("{id}.jpg"),
            index: 0,
        }
    }

    fn deps(assets: StaticAssets) -> GalleryDeps {
        GalleryDeps {
            animator: Arc::new(TimelineAnimator::new()),
            assets: Arc::new(assets),
            sink: Arc::new(NoOpEventSink),
            state: Arc::new(AppState::new()),
            config: Arc::new(LightboxConfig::default()),
        }
    }

    #[test]
    fn test_fit_height_first() {
        let asset = Asset { path: String::new(), width: 1200, height: 800 };
        let viewport = Viewport::new(2000.0, 820.0);
        // height = 820 - 20 = 800, width = 1200 fits.
        assert_eq!(fit_size(&asset, viewport, Tier::Full, 10.0, 240.0), (1200, 800));
    }

    #[test]
    fn test_fit_falls_back_to_width_first() {
        let asset = Asset { path: String::new(), width: 1600, height: 800 };
        let viewport = Viewport::new(1000.0, 820.0);
        // height-first gives width 1600 > 1000, so clamp to width.
        assert_eq!(fit_size(&asset, viewport, Tier::Full, 10.0, 240.0), (1000, 500));
    }

    #[test]
    fn test_fit_thumb_fixed_height() {
        let asset = Asset { path: String::new(), width: 600, height: 400 };
        let viewport = Viewport::new(1280.0, 800.0);
        assert_eq!(fit_size(&asset, viewport, Tier::Thumb, 10.0, 240.0), (360, 240));
    }

    #[tokio::test(start_paused = true)]
    async fn test_load_computes_fit_and_resize_recomputes() {
        let assets = StaticAssets::new().with_image("assets/photos/1600/p1.jpg", 1200, 800);
        let card = SlideCard::mount(
            photo("p1"),
            Tier::Full,
            Viewport::new(2000.0, 820.0),
            deps(assets),
            DestroyLedger::new(),
        );

        assert!(!card.has_loaded());
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(card.has_loaded());
        assert_eq!(card.fitted_size(), Some((1200, 800)));

        card.resize(Viewport::new(1000.0, 820.0));
        assert_eq!(card.fitted_size(), Some((1000, 667)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_resize_is_noop_before_load() {
        // Unknown path: the load pends forever and display degrades.
        let card = SlideCard::mount(
            photo("missing"),
            Tier::Full,
            Viewport::default(),
            deps(StaticAssets::new()),
            DestroyLedger::new(),
        );

        tokio::time::sleep(Duration::from_secs(60)).await;
        card.resize(Viewport::new(640.0, 480.0));

        assert!(!card.has_loaded());
        assert_eq!(card.fitted_size(), None);
        assert!(!card.is_destroyed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_exit_destroys_after_animation_plus_grace() {
        let d = deps(StaticAssets::new().with_fallback(800, 600));
        let ledger = DestroyLedger::new();
        let card = SlideCard::mount(photo("p1"), Tier::Full, Viewport::default(), d, ledger.clone());
        let target = card.target();

        let started = tokio::time::Instant::now();
        card.exit(Some(Direction::Forward)).await;

        // 500ms exit animation + 500ms grace.
        assert!(started.elapsed() >= Duration::from_millis(1000));
        assert_eq!(ledger.count(), 1);
        assert!(ledger.contains(target));
    }

    #[tokio::test(start_paused = true)]
    async fn test_destroy_is_latched() {
        let d = deps(StaticAssets::new());
        let ledger = DestroyLedger::new();
        let card = SlideCard::mount(photo("p1"), Tier::Full, Viewport::default(), d, ledger.clone());

        assert!(card.destroy());
        assert!(!card.destroy());
        assert_eq!(ledger.count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_animate_in_without_direction_is_instant() {
        let d = deps(StaticAssets::new());
        let card = SlideCard::mount(photo("p1"), Tier::Full, Viewport::default(), d, DestroyLedger::new());

        let started = tokio::time::Instant::now();
        card.animate_in(None).await.unwrap();
        assert!(started.elapsed() < Duration::from_millis(1));
    }
}
