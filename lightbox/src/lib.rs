//! # Lightbox
//!
//! The experience sequencer and directional carousel behind a
//! single-page photo gallery.
//!
//! Lightbox advances a visitor deterministically through the site's
//! stages with support for:
//!
//! - **Stage sequencing**: preload gate, intro interludes, an optional
//!   gated video, then the gallery, with idempotent teardown
//! - **Directional carousel**: index management, edge-of-range arrow
//!   suppression, and slide transitions that destroy outgoing cards
//!   exactly once
//! - **Capability seams**: rendering, asset fetching, and media
//!   playback live behind `Animator`, `AssetLoader`, and `Playback`
//! - **Event-driven chrome**: overlay open/close notices for page-level
//!   collaborators
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use lightbox::prelude::*;
//!
//! let controller = SequenceController::new(deps);
//! let (bus, input) = InputBus::channel();
//!
//! // Drive the whole experience; `bus` feeds user input.
//! controller.run(input).await;
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod anim;
pub mod assets;
pub mod config;
pub mod errors;
pub mod events;
pub mod gallery;
pub mod input;
pub mod model;
pub mod observability;
pub mod sequence;
pub mod state;
pub mod testing;
pub mod visual;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::anim::{Animator, Ease, Outcome, Props, TargetId, TimelineAnimator};
    pub use crate::assets::{Asset, AssetLoader, StaticAssets};
    pub use crate::config::{LightboxConfig, Timings};
    pub use crate::errors::{LightboxError, PlaybackError};
    pub use crate::events::{
        CollectingEventSink, EventSink, LoggingEventSink, NoOpEventSink, Notice,
    };
    pub use crate::gallery::{
        AboutPanel, Arrows, GalleryCarousel, GalleryDeps, GalleryRow, PhotoOverlay, SlideCard,
    };
    pub use crate::input::{InputBus, InputEvent, InputReceiver};
    pub use crate::model::{
        group_by_tag, image_path, manifest_url, rows_for_tags, Manifest, Photo, PhotoLibrary,
        PhotoRecord, Tier,
    };
    pub use crate::sequence::{
        close_stage, IntroSequence, LoaderStage, NullPlayback, Phase, Playback, PreloadTask,
        ProgressMeter, SequenceController, SequencerDeps, Stage, StageLoader, VideoGate,
    };
    pub use crate::state::AppState;
    pub use crate::visual::{Animatable, Destroyable, Direction, Resizable, Swipe, Viewport};
}
