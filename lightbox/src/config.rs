//! Configuration for the experience sequence and gallery.

use crate::errors::LightboxError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timing constants for every animated transition, in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timings {
    /// Incremental delay between line reveals.
    pub line_stagger_in_ms: u64,
    /// Incremental delay between line hides (reverse order).
    pub line_stagger_out_ms: u64,
    /// Line fade-in duration.
    pub line_in_ms: u64,
    /// Line fade-out duration.
    pub line_out_ms: u64,
    /// Whole-stage fade after all lines have hidden.
    pub stage_fade_ms: u64,
    /// Dwell before the first intro stage hides.
    pub intro1_dwell_ms: u64,
    /// Dwell before the second intro stage hides.
    pub intro2_dwell_ms: u64,
    /// Dwell before the gallery headline starts revealing.
    pub headline_dwell_ms: u64,
    /// Slide card entrance duration.
    pub slide_in_ms: u64,
    /// Slide card exit duration.
    pub slide_out_ms: u64,
    /// Grace after the exit animation before the outgoing card is
    /// destroyed.
    pub slide_grace_ms: u64,
    /// Card image fade once its asset resolves.
    pub image_fade_ms: u64,
    /// Photo overlay fade-in duration.
    pub overlay_in_ms: u64,
    /// Photo overlay fade-out duration.
    pub overlay_out_ms: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            line_stagger_in_ms: 500,
            line_stagger_out_ms: 250,
            line_in_ms: 1000,
            line_out_ms: 200,
            stage_fade_ms: 700,
            intro1_dwell_ms: 2000,
            intro2_dwell_ms: 5000,
            headline_dwell_ms: 2000,
            slide_in_ms: 900,
            slide_out_ms: 500,
            slide_grace_ms: 500,
            image_fade_ms: 800,
            overlay_in_ms: 700,
            overlay_out_ms: 550,
        }
    }
}

impl Timings {
    pub(crate) fn line_stagger_in(&self) -> Duration {
        Duration::from_millis(self.line_stagger_in_ms)
    }

    pub(crate) fn line_stagger_out(&self) -> Duration {
        Duration::from_millis(self.line_stagger_out_ms)
    }

    pub(crate) fn line_in(&self) -> Duration {
        Duration::from_millis(self.line_in_ms)
    }

    pub(crate) fn line_out(&self) -> Duration {
        Duration::from_millis(self.line_out_ms)
    }

    pub(crate) fn stage_fade(&self) -> Duration {
        Duration::from_millis(self.stage_fade_ms)
    }

    pub(crate) fn intro1_dwell(&self) -> Duration {
        Duration::from_millis(self.intro1_dwell_ms)
    }

    pub(crate) fn intro2_dwell(&self) -> Duration {
        Duration::from_millis(self.intro2_dwell_ms)
    }

    pub(crate) fn headline_dwell(&self) -> Duration {
        Duration::from_millis(self.headline_dwell_ms)
    }

    pub(crate) fn slide_in(&self) -> Duration {
        Duration::from_millis(self.slide_in_ms)
    }

    pub(crate) fn slide_out(&self) -> Duration {
        Duration::from_millis(self.slide_out_ms)
    }

    pub(crate) fn slide_grace(&self) -> Duration {
        Duration::from_millis(self.slide_grace_ms)
    }

    pub(crate) fn image_fade(&self) -> Duration {
        Duration::from_millis(self.image_fade_ms)
    }

    pub(crate) fn overlay_in(&self) -> Duration {
        Duration::from_millis(self.overlay_in_ms)
    }

    pub(crate) fn overlay_out(&self) -> Duration {
        Duration::from_millis(self.overlay_out_ms)
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightboxConfig {
    /// Site title used for per-photo page titles.
    pub site_title: String,
    /// Manifest path; a cache-buster is appended per load.
    pub manifest_path: String,
    /// Drop the credit-overlay suffix from image paths.
    pub nocredit: bool,
    /// Chrome inset in logical units.
    pub ui_offset: f64,
    /// Vertical margin around full-screen slides.
    pub slide_margin: f64,
    /// Fixed thumbnail row height.
    pub thumb_height: f64,
    /// Horizontal slide offset for card transitions.
    pub slide_offset: f64,
    /// Gating video source; `None` skips the video stage.
    pub video_src: Option<String>,
    /// Font families preloaded before entry.
    pub fonts: Vec<String>,
    /// Fixed assets preloaded before entry.
    pub preload_assets: Vec<String>,
    /// Tags whose row thumbnails are warmed during preload.
    pub preload_row_tags: Vec<String>,
    /// Curated row tags in display order; empty means plain first-seen
    /// tag grouping.
    pub row_tags: Vec<String>,
    /// Loader gate lines (shown above the enter control).
    pub loader_lines: Vec<String>,
    /// First intro stage lines.
    pub intro1_lines: Vec<String>,
    /// Second intro stage lines.
    pub intro2_lines: Vec<String>,
    /// Page headline lines revealed once the gallery mounts.
    pub headline_lines: Vec<String>,
    /// All timing constants.
    pub timings: Timings,
}

impl Default for LightboxConfig {
    fn default() -> Self {
        Self {
            site_title: "Gerald Richardson".to_string(),
            manifest_path: "assets/data/data.json".to_string(),
            nocredit: false,
            ui_offset: 25.0,
            slide_margin: 10.0,
            thumb_height: 240.0,
            slide_offset: 250.0,
            video_src: Some("assets/videos/Pierre_Berton_Great_Days_On_King.mp4".to_string()),
            fonts: vec!["Helvetica Neue".to_string(), "Playfair Display".to_string()],
            preload_assets: vec![
                "assets/images/arrow.png".to_string(),
                "assets/images/close.png".to_string(),
                "assets/photos/1600/BIO_newspaperpresses.jpg".to_string(),
            ],
            preload_row_tags: vec!["1939 Royal Visit".to_string(), "1950s Royals".to_string()],
            row_tags: vec![
                "1939 Royal Visit".to_string(),
                "1950s Royals".to_string(),
                "Navy".to_string(),
                "Fashion".to_string(),
                "Portraits of Gerry Richardson".to_string(),
                "Film and Television".to_string(),
                "News".to_string(),
            ],
            loader_lines: vec![
                "GERALD RICHARDSON".to_string(),
                "60 Years Behind The Camera".to_string(),
                "Enter".to_string(),
            ],
            intro1_lines: vec!["A gift for James Richardson".to_string()],
            intro2_lines: vec![
                "This site is dedicated to our grandfather, Gerald Richardson,".to_string(),
                "a true influence on each of our paths.".to_string(),
            ],
            headline_lines: vec![
                "GERALD RICHARDSON".to_string(),
                "60 Years Behind The Camera".to_string(),
            ],
            timings: Timings::default(),
        }
    }
}

impl LightboxConfig {
    /// Decodes a configuration from JSON, filling omitted fields with
    /// defaults.
    pub fn from_json(payload: &str) -> Result<Self, LightboxError> {
        serde_json::from_str(payload)
            .map_err(|err| LightboxError::Config(err.to_string()))
    }

    /// Whether a video stage is configured.
    #[must_use]
    pub fn has_video(&self) -> bool {
        self.video_src.is_some()
    }
}
