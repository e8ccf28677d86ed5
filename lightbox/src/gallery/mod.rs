//! Gallery components: slide cards, the directional carousel, thumbnail
//! rows, and the full-screen overlays.

mod carousel;
mod overlay;
mod row;
mod slide;

pub use carousel::{Arrows, GalleryCarousel};
pub use overlay::{AboutPanel, PhotoOverlay};
pub use row::GalleryRow;
pub use slide::{DestroyLedger, SlideCard};

use crate::anim::Animator;
use crate::assets::AssetLoader;
use crate::config::LightboxConfig;
use crate::events::EventSink;
use crate::state::AppState;
use std::sync::Arc;

/// Shared collaborators handed to every gallery component.
#[derive(Clone)]
pub struct GalleryDeps {
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
}

impl std::fmt::Debug for GalleryDeps {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GalleryDeps").finish_non_exhaustive()
    }
}
