//! Testing utilities for the experience sequence.
//!
//! This module provides:
//! - Recording doubles for the animator and playback seams
//! - Manifest and collaborator fixtures

mod fixtures;
mod mocks;

pub use fixtures::{deps_with, manifest_fixture};
pub use mocks::{AnimateCall, ManualPlayback, MockAnimator};
