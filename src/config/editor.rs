//! Editor configuration.
//!
//! Tunables shared by every clip loaded into the editing session: boundary
//! snapping tolerance, keyframe hit radius, segment merge policy and viewport
//! zoom limits. Newly created timelines and editors read their defaults from
//! the global `EDITOR_CONFIG`; values already captured by a live timeline are
//! not changed retroactively.

use std::path::Path;

use lazy_static::lazy_static;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{ClipForgeError, ClipForgeResult, ResultExt};
use crate::timeline::MergePolicy;

/// Centralized editor configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export, export_to = "../web/types/generated/")]
pub struct EditorConfig {
    /// Two boundaries closer than this (seconds) are the same boundary.
    pub boundary_epsilon: f64,

    /// Keyframe hit radius as a fraction of the track width in pixels.
    pub hit_radius_fraction: f64,

    /// Which neighbour's attributes survive when a boundary is removed.
    pub merge_policy: MergePolicy,

    /// Smallest viewport zoom factor.
    pub min_zoom: f64,

    /// Largest viewport zoom factor.
    pub max_zoom: f64,

    /// Multiplicative zoom applied per wheel notch.
    pub zoom_step: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            boundary_epsilon: 0.01,
            hit_radius_fraction: 0.03,
            merge_policy: MergePolicy::default(),
            min_zoom: 0.1,
            max_zoom: 10.0,
            zoom_step: 1.1,
        }
    }
}

impl EditorConfig {
    /// Validate and clamp settings to acceptable ranges.
    pub fn validate(&mut self) {
        let defaults = Self::default();

        if !self.boundary_epsilon.is_finite() {
            self.boundary_epsilon = defaults.boundary_epsilon;
        }
        self.boundary_epsilon = self.boundary_epsilon.clamp(0.001, 1.0);

        if !self.hit_radius_fraction.is_finite() {
            self.hit_radius_fraction = defaults.hit_radius_fraction;
        }
        self.hit_radius_fraction = self.hit_radius_fraction.clamp(0.001, 0.5);

        if !self.min_zoom.is_finite() || self.min_zoom <= 0.0 {
            self.min_zoom = defaults.min_zoom;
        }
        if !self.max_zoom.is_finite() || self.max_zoom < self.min_zoom {
            self.max_zoom = defaults.max_zoom.max(self.min_zoom);
        }

        if !self.zoom_step.is_finite() || self.zoom_step <= 1.0 {
            self.zoom_step = defaults.zoom_step;
        }
    }

    /// Reset all settings to defaults.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> ClipForgeResult<Self> {
        let mut config: EditorConfig = serde_json::from_str(json)
            .map_err(|e| ClipForgeError::ConfigError(e.to_string()))?;
        config.validate();
        Ok(config)
    }

    /// Load a config file from disk.
    pub fn load(path: &Path) -> ClipForgeResult<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read editor config {:?}", path))?;
        Self::from_json(&json)
    }
}

lazy_static! {
    /// Global editor configuration.
    ///
    /// # Example
    /// ```ignore
    /// let epsilon = EDITOR_CONFIG.read().boundary_epsilon;
    ///
    /// {
    ///     let mut config = EDITOR_CONFIG.write();
    ///     config.merge_policy = MergePolicy::KeepLeft;
    /// }
    /// ```
    pub static ref EDITOR_CONFIG: RwLock<EditorConfig> = RwLock::new(EditorConfig::default());
}

/// Snapshot of the current global config.
pub fn get_editor_config() -> EditorConfig {
    EDITOR_CONFIG.read().clone()
}

/// Replace the global config (batch update), validating it first.
pub fn set_editor_config(config: EditorConfig) {
    let mut current = EDITOR_CONFIG.write();
    *current = config;
    current.validate();
    log::debug!("[CONFIG] Editor config updated: {:?}", *current);
}

/// Reset the global config to defaults.
pub fn reset_editor_config() {
    EDITOR_CONFIG.write().reset();
    log::debug!("[CONFIG] Editor settings reset to defaults");
}
