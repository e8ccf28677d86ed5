//! A horizontally-scrollable group of thumbnails sharing one category tag.

use super::slide::{DestroyLedger, SlideCard};
use super::GalleryDeps;
use crate::anim::{Ease, Props, TargetId};
use crate::model::{image_path, Photo, Tier};
use crate::visual::{Resizable, Viewport};
use std::sync::Arc;
use std::time::Duration;

/// One gallery row: a tag title plus its ordered thumbnail cards.
///
/// Each row owns an independent photo list (indexes reassigned at
/// list-build time) so a carousel opened from it navigates within the row.
#[derive(Debug)]
pub struct GalleryRow {
    tag: String,
    photos: Arc<[Photo]>,
    cards: Vec<SlideCard>,
    title_target: TargetId,
    ledger: DestroyLedger,
    deps: GalleryDeps,
}

impl GalleryRow {
    /// Builds a row, warming its thumbnail assets and mounting one
    /// thumbnail card per photo.
    #[must_use]
    pub fn build(tag: impl Into<String>, members: Vec<Photo>, viewport: Viewport, deps: GalleryDeps) -> Self {
        let tag = tag.into();
        let photos: Arc<[Photo]> = members
            .into_iter()
            .enumerate()
            .map(|(index, photo)| Photo { index, ..photo })
            .collect();

        // Thumbnail warmup happens in the background; cards tolerate
        // pending loads.
        let warm: Vec<String> = photos
            .iter()
            .map(|photo| image_path(photo, Tier::Thumb, deps.config.nocredit))
            .collect();
        let assets = Arc::clone(&deps.assets);
        tokio::spawn(async move {
            assets.load_assets(&warm).await;
        });

        let ledger = DestroyLedger::new();
        let cards: Vec<SlideCard> = photos
            .iter()
            .map(|photo| {
                let card = SlideCard::mount(photo.clone(), Tier::Thumb, viewport, deps.clone(), ledger.clone());
                drop(card.animate_in(None));
                card
            })
            .collect();

        tracing::debug!(tag = %tag, count = cards.len(), "gallery row built");
        Self {
            tag,
            photos,
            cards,
            title_target: TargetId::new(),
            ledger,
            deps,
        }
    }

    /// Reveals the row title.
    pub async fn animate_in(&self) {
        self.deps
            .animator
            .animate(
                self.title_target,
                Props::new().opacity(1.0),
                Duration::from_millis(1000),
                Ease::OutCubic,
                Duration::from_millis(1000),
            )
            .await;
    }

    /// The row's category tag.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The row's photo list, indexes local to the row.
    #[must_use]
    pub fn photos(&self) -> Arc<[Photo]> {
        Arc::clone(&self.photos)
    }

    /// Number of thumbnails.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the row has no thumbnails.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The mounted thumbnail cards.
    #[must_use]
    pub fn cards(&self) -> &[SlideCard] {
        &self.cards
    }

    /// The row's destruction ledger.
    #[must_use]
    pub fn ledger(&self) -> &DestroyLedger {
        &self.ledger
    }
}

impl Resizable for GalleryRow {
    fn resize(&self, viewport: Viewport) {
        for card in &self.cards {
            card.resize(viewport);
        }
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

    fn photo(id: &str, index: usize) -> Photo {
        Photo {
            id: id.to_string(),
            title: id.to_string(),
            date: String::new(),
            location: String::new(),
            tag: "Navy".to_string(),
            image: format!("{id}.jpg"),
            index,
        }
    }

    fn deps() -> GalleryDeps {
        GalleryDeps {
            animator: Arc::new(TimelineAnimator::new()),
            assets: Arc::new(StaticAssets::new().with_fallback(600, 400)),
            sink: Arc::new(NoOpEventSink),
            state: Arc::new(AppState::new()),
            config: Arc::new(LightboxConfig::default()),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_build_reassigns_row_local_indexes() {
        // Photos arrive with library-wide indexes; the row renumbers them.
        let members = vec![photo("a", 4), photo("b", 7), photo("c", 9)];
        let row = GalleryRow::build("Navy", members, Viewport::default(), deps());

        assert_eq!(row.len(), 3);
        let indexes: Vec<usize> = row.photos().iter().map(|p| p.index).collect();
        assert_eq!(indexes, vec![0, 1, 2]);
        assert_eq!(row.tag(), "Navy");
    }

    #[tokio::test(start_paused = true)]
    async fn test_thumbnails_load_at_thumb_tier() {
        let row = GalleryRow::build(
            "Navy",
            vec![photo("a", 0)],
            Viewport::default(),
            deps(),
        );

        tokio::time::sleep(Duration::from_millis(10)).await;
        // 600x400 at fixed 240 thumb height -> 360x240.
        assert_eq!(row.cards()[0].fitted_size(), Some((360, 240)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_row() {
        let row = GalleryRow::build("Fashion", Vec::new(), Viewport::default(), deps());
        assert!(row.is_empty());
        assert!(row.photos().is_empty());
    }
}
