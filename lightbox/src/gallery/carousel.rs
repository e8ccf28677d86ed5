//! The directional single-photo carousel.
//!
//! Index management, edge-of-range arrow suppression, and the
//! bidirectional slide transition with strict ownership of outgoing
//! cards.

use super::slide::{DestroyLedger, SlideCard};
use super::GalleryDeps;
use crate::anim::Outcome;
use crate::model::{Photo, Tier};
use crate::visual::{Destroyable, Direction, Resizable, Swipe, Viewport};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Arrow visibility derived from the boundary rules.
///
/// Suppression signals a boundary to the user; the out-of-range guard in
/// [`GalleryCarousel::navigate`] is what actually prevents advancing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arrows {
    /// Whether the "previous" arrow is shown. Hidden iff at index 0.
    pub back_visible: bool,
    /// Whether the "next" arrow is shown. Hidden iff at the last index.
    pub forward_visible: bool,
}

impl Arrows {
    fn at(index: usize, len: usize) -> Self {
        Self {
            back_visible: index > 0,
            forward_visible: index + 1 < len,
        }
    }
}

/// A single-photo-at-a-time viewer with directional navigation.
///
/// Exactly one `current` card is mounted at any time; during a transition
/// the displaced card is held only by its own exit task, which destroys it
/// once its animation and grace delay elapse.
#[derive(Debug)]
pub struct GalleryCarousel {
    photos: Arc<[Photo]>,
    index: usize,
    current: SlideCard,
    /// The most recent in-flight exit.
    previous: Option<JoinHandle<()>>,
    /// Exits displaced by overlapping navigation; still owned by their
    /// tasks, drained on [`Self::settle`].
    displaced: Vec<JoinHandle<()>>,
    entrance: Option<JoinHandle<Outcome>>,
    arrows: Arrows,
    viewport: Viewport,
    ledger: DestroyLedger,
    deps: GalleryDeps,
}

impl GalleryCarousel {
    /// Opens a carousel on `photos[start_index]`.
    ///
    /// Returns `None` when the list is empty or the start index is out of
    /// range.
    #[must_use]
    pub fn open(
        photos: Arc<[Photo]>,
        start_index: usize,
        viewport: Viewport,
        deps: GalleryDeps,
    ) -> Option<Self> {
        let photo = photos.get(start_index)?.clone();
        let ledger = DestroyLedger::new();
        let current = SlideCard::mount(photo, Tier::Full, viewport, deps.clone(), ledger.clone());
        // First mount: no slide offset.
        let entrance = current.animate_in(None);
        let arrows = Arrows::at(start_index, photos.len());

        tracing::debug!(index = start_index, count = photos.len(), "carousel opened");
        Some(Self {
            photos,
            index: start_index,
            current,
            previous: None,
            displaced: Vec::new(),
            entrance: Some(entrance),
            arrows,
            viewport,
            ledger,
            deps,
        })
    }

    /// The current index.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of photos in the carousel.
    #[must_use]
    pub fn len(&self) -> usize {
        self.photos.len()
    }

    /// Whether the carousel is empty. Never true for an opened carousel.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    /// Current arrow visibility.
    #[must_use]
    pub fn arrows(&self) -> Arrows {
        self.arrows
    }

    /// The photo the current card presents.
    #[must_use]
    pub fn current_photo(&self) -> &Photo {
        self.current.photo()
    }

    /// The current card.
    #[must_use]
    pub fn current_card(&self) -> &SlideCard {
        &self.current
    }

    /// The destruction ledger shared by every card this carousel mounted.
    #[must_use]
    pub fn ledger(&self) -> &DestroyLedger {
        &self.ledger
    }

    /// Steps the carousel by one photo in `direction`.
    ///
    /// Out of range is a defined no-op: no transition, no state change.
    /// Otherwise the index, current card, and arrow visibility update
    /// synchronously, and the outgoing/incoming animations launch
    /// concurrently. Returns whether a transition started.
    pub fn navigate(&mut self, direction: Direction) -> bool {
        let next = i64::try_from(self.index).unwrap_or(i64::MAX) + direction.step();
        let Ok(next) = usize::try_from(next) else {
            return false;
        };
        if next >= self.photos.len() {
            return false;
        }
        self.transition(next, Some(direction));
        true
    }

    /// Moves to an absolute index.
    ///
    /// A no-op when `slide` is the current index or out of range.
    pub fn move_to(&mut self, slide: usize, direction: Direction) -> bool {
        if slide == self.index || slide >= self.photos.len() {
            return false;
        }
        self.transition(slide, Some(direction));
        true
    }

    /// Applies a swipe gesture: left reveals content to the right.
    pub fn swipe(&mut self, gesture: Swipe) -> bool {
        self.navigate(gesture.direction())
    }

    fn transition(&mut self, slide: usize, direction: Option<Direction>) {
        let incoming = SlideCard::mount(
            self.photos[slide].clone(),
            Tier::Full,
            self.viewport,
            self.deps.clone(),
            self.ledger.clone(),
        );
        let outgoing = std::mem::replace(&mut self.current, incoming);
        self.index = slide;
        self.arrows = Arrows::at(slide, self.photos.len());

        // Outgoing exit and incoming entrance run concurrently; the exit
        // task owns its card through destruction.
        let exit = tokio::spawn(outgoing.exit(direction));
        if let Some(older) = self.previous.replace(exit) {
            // Overlapping navigation: the displaced exit keeps running and
            // still destroys its card exactly once.
            self.displaced.push(older);
        }
        self.entrance = Some(self.current.animate_in(direction));

        tracing::debug!(index = slide, "carousel transition started");
    }

    /// Awaits every in-flight transition: the entrance, the most recent
    /// exit, and any exits displaced by overlapping navigation.
    pub async fn settle(&mut self) {
        if let Some(entrance) = self.entrance.take() {
            let _ = entrance.await;
        }
        if let Some(previous) = self.previous.take() {
            let _ = previous.await;
        }
        for exit in self.displaced.drain(..) {
            let _ = exit.await;
        }
    }

    /// Destroys the current card before releasing the carousel. Cards in
    /// in-flight exits are destroyed by their own tasks.
    pub fn destroy(self) {
        self.current.destroy();
        tracing::debug!("carousel destroyed");
    }
}

impl Resizable for GalleryCarousel {
    fn resize(&self, viewport: Viewport) {
        self.current.resize(viewport);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anim::TimelineAnimator;
    use crate::assets::StaticAssets;
    use crate::config::LightboxConfig;
    use crate::events::NoOpEventSink;
    use crate::state::AppState;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    fn photos(tags: &[&str]) -> Arc<[Photo]> {
        tags.iter()
            .enumerate()
            .map(|(index, tag)| Photo {
                id: format!("p{index}"),
                title: format!("Photo {index}"),
                date: String::new(),
                location: String::new(),
                tag: (*tag).to_string(),
                image: format!("p{index}.jpg"),
                index,
            })
            .collect()
    }

    fn deps() -> GalleryDeps {
        GalleryDeps {
            animator: Arc::new(TimelineAnimator::new()),
            assets: Arc::new(StaticAssets::new().with_fallback(800, 600)),
            sink: Arc::new(NoOpEventSink),
            state: Arc::new(AppState::new()),
            config: Arc::new(LightboxConfig::default()),
        }
    }

    fn open(count: usize, start: usize) -> GalleryCarousel {
        let tags: Vec<&str> = std::iter::repeat("Navy").take(count).collect();
        GalleryCarousel::open(photos(&tags), start, Viewport::default(), deps()).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_open_out_of_range_is_none() {
        assert!(GalleryCarousel::open(photos(&[]), 0, Viewport::default(), deps()).is_none());
        assert!(GalleryCarousel::open(photos(&["Navy"]), 1, Viewport::default(), deps()).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_navigate_steps_by_exactly_one() {
        let mut carousel = open(3, 0);

        assert!(carousel.navigate(Direction::Forward));
        assert_eq!(carousel.index(), 1);
        assert_eq!(carousel.current_photo().id, "p1");

        assert!(carousel.navigate(Direction::Back));
        assert_eq!(carousel.index(), 0);
        assert_eq!(carousel.current_photo().id, "p0");
    }

    #[tokio::test(start_paused = true)]
    async fn test_navigate_out_of_range_is_noop() {
        let mut carousel = open(2, 0);

        assert!(!carousel.navigate(Direction::Back));
        assert_eq!(carousel.index(), 0);
        assert_eq!(carousel.ledger().count(), 0, "no transition, no destruction");

        carousel.navigate(Direction::Forward);
        assert!(!carousel.navigate(Direction::Forward));
        assert_eq!(carousel.index(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_arrow_suppression_at_boundaries() {
        let mut carousel = open(3, 0);
        assert_eq!(carousel.arrows(), Arrows { back_visible: false, forward_visible: true });

        carousel.navigate(Direction::Forward);
        assert_eq!(carousel.arrows(), Arrows { back_visible: true, forward_visible: true });

        carousel.navigate(Direction::Forward);
        assert_eq!(carousel.arrows(), Arrows { back_visible: true, forward_visible: false });
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_photo_suppresses_both_arrows() {
        let carousel = open(1, 0);
        assert_eq!(carousel.arrows(), Arrows { back_visible: false, forward_visible: false });
    }

    #[tokio::test(start_paused = true)]
    async fn test_transition_destroys_prior_current_exactly_once() {
        let mut carousel = open(3, 0);
        let prior = carousel.current_card().target();

        carousel.navigate(Direction::Forward);
        carousel.settle().await;

        assert_eq!(carousel.ledger().count(), 1);
        assert!(carousel.ledger().contains(prior));
        assert!(!carousel.current_card().is_destroyed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_destruction_waits_for_exit_animation() {
        let mut carousel = open(2, 0);
        carousel.navigate(Direction::Forward);

        // Before the exit animation (500ms) and grace (500ms) elapse, the
        // outgoing card must still exist.
        tokio::time::sleep(Duration::from_millis(400)).await;
        assert_eq!(carousel.ledger().count(), 0);

        tokio::time::sleep(Duration::from_millis(700)).await;
        assert_eq!(carousel.ledger().count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_move_to_absolute_index() {
        let mut carousel = open(5, 0);

        assert!(carousel.move_to(3, Direction::Forward));
        assert_eq!(carousel.index(), 3);
        assert_eq!(carousel.arrows(), Arrows { back_visible: true, forward_visible: true });

        assert!(!carousel.move_to(3, Direction::Forward), "same index is a no-op");
        assert!(!carousel.move_to(9, Direction::Forward), "out of range is a no-op");
        assert_eq!(carousel.index(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_swipe_mapping_is_inverted() {
        let mut carousel = open(3, 1);

        assert!(carousel.swipe(Swipe::Left));
        assert_eq!(carousel.index(), 2, "left swipe reveals content to the right");

        assert!(carousel.swipe(Swipe::Right));
        assert!(carousel.swipe(Swipe::Right));
        assert_eq!(carousel.index(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_overlapping_navigation_destroys_each_card_once() {
        let mut carousel = open(4, 0);
        let first = carousel.current_card().target();

        carousel.navigate(Direction::Forward);
        let second = carousel.current_card().target();
        // Second request while the first exit is still in flight.
        carousel.navigate(Direction::Forward);
        assert_eq!(carousel.index(), 2);

        carousel.settle().await;

        assert_eq!(carousel.ledger().count(), 2);
        assert!(carousel.ledger().contains(first));
        assert!(carousel.ledger().contains(second));
        assert_eq!(carousel.current_photo().id, "p2");
        assert!(!carousel.current_card().is_destroyed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_destroy_tears_down_current() {
        let mut carousel = open(2, 0);
        carousel.navigate(Direction::Forward);
        carousel.settle().await;
        let current = carousel.current_card().target();
        let ledger = carousel.ledger().clone();

        carousel.destroy();

        assert_eq!(ledger.count(), 2);
        assert!(ledger.contains(current));
    }
}
