//! Fixtures for sequence and gallery tests.

use crate::anim::Animator;
use crate::assets::{AssetLoader, StaticAssets};
use crate::config::LightboxConfig;
use crate::events::EventSink;
use crate::model::{Manifest, PhotoRecord};
use crate::sequence::{Playback, SequencerDeps};
use crate::state::AppState;
use crate::visual::Viewport;
use std::sync::Arc;

/// A small manifest spanning two tags, in first-seen order Navy then
/// Fashion.
#[must_use]
pub fn manifest_fixture() -> Manifest {
    Manifest {
        photos: vec![
            record("p0", "Navy"),
            record("p1", "Fashion"),
            record("p2", "Navy"),
            record("p3", "Fashion"),
        ],
    }
}

fn record(id: &str, tag: &str) -> PhotoRecord {
    PhotoRecord {
        id: id.to_string(),
        title: format!("Photo {id}"),
        date: "1953".to_string(),
        location: "Toronto".to_string(),
        tag: tag.to_string(),
        image: format!("{id}.jpg"),
    }
}

/// Sequencer collaborators over a fallback asset loader and a fresh
/// application state.
#[must_use]
pub fn deps_with(
    animator: Arc<dyn Animator>,
    sink: Arc<dyn EventSink>,
    config: Arc<LightboxConfig>,
    playback: Arc<dyn Playback>,
) -> SequencerDeps {
    SequencerDeps {
        animator,
        assets: Arc::new(StaticAssets::new().with_fallback(800, 600)) as Arc<dyn AssetLoader>,
        sink,
        state: Arc::new(AppState::new()),
        config,
        playback,
        viewport: Viewport::default(),
    }
}
