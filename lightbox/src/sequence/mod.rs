//! The experience sequence: preload gate, intro interludes, video gate,
//! and the controller that advances through them.

mod controller;
mod intro;
mod loader;
mod stage;
mod video;

pub use controller::{Gallery, Phase, SequenceController, SequencerDeps};
pub use intro::IntroSequence;
pub use loader::{LoaderStage, PreloadTask, ProgressMeter, StageLoader};
pub use stage::{close_stage, Stage};
pub use video::{NullPlayback, Playback, VideoGate};

#[cfg(test)]
pub use video::MockPlayback;
