use serde::{Deserialize, Serialize};

use crate::{ConfigError, DebugRenderingStage};

/// Engine-wide settings: simulation timing, worker limits and debug toggles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    /// Length of a full day/night cycle in milliseconds.
    day_night_length_ms: u64,
    /// Upper bound on background worker threads.
    max_threads: u32,
    /// Number of vertical segments each chunk mesh is split into.
    vertical_chunk_mesh_segments: u32,

    debug_enabled: bool,
    debug_render_chunk_bounding_boxes: bool,
    debug_rendering_enabled: bool,
    debug_rendering_stage: DebugRenderingStage,
    debug_first_person_elements_hidden: bool,
    debug_render_wireframe: bool,
    debug_hud_hidden: bool,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            day_night_length_ms: 1_800_000,
            max_threads: 2,
            vertical_chunk_mesh_segments: 1,
            debug_enabled: false,
            debug_render_chunk_bounding_boxes: false,
            debug_rendering_enabled: false,
            debug_rendering_stage: DebugRenderingStage::default(),
            debug_first_person_elements_hidden: false,
            debug_render_wireframe: false,
            debug_hud_hidden: false,
        }
    }
}

impl SystemConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.day_night_length_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "day_night_length_ms",
                reason: "must be positive",
            });
        }
        if self.max_threads == 0 {
            return Err(ConfigError::Invalid {
                field: "max_threads",
                reason: "at least one worker thread is required",
            });
        }
        if self.vertical_chunk_mesh_segments == 0 {
            return Err(ConfigError::Invalid {
                field: "vertical_chunk_mesh_segments",
                reason: "must be positive",
            });
        }
        Ok(())
    }

    pub fn day_night_length_ms(&self) -> u64 {
        self.day_night_length_ms
    }

    pub fn set_day_night_length_ms(&mut self, length_ms: u64) {
        self.day_night_length_ms = length_ms;
    }

    pub fn max_threads(&self) -> u32 {
        self.max_threads
    }

    pub fn set_max_threads(&mut self, max_threads: u32) {
        self.max_threads = max_threads;
    }

    pub fn vertical_chunk_mesh_segments(&self) -> u32 {
        self.vertical_chunk_mesh_segments
    }

    pub fn set_vertical_chunk_mesh_segments(&mut self, segments: u32) {
        self.vertical_chunk_mesh_segments = segments;
    }

    pub fn is_debug_enabled(&self) -> bool {
        self.debug_enabled
    }

    pub fn set_debug_enabled(&mut self, enabled: bool) {
        self.debug_enabled = enabled;
    }

    pub fn is_debug_render_chunk_bounding_boxes(&self) -> bool {
        self.debug_render_chunk_bounding_boxes
    }

    pub fn set_debug_render_chunk_bounding_boxes(&mut self, enabled: bool) {
        self.debug_render_chunk_bounding_boxes = enabled;
    }

    pub fn is_debug_rendering_enabled(&self) -> bool {
        self.debug_rendering_enabled
    }

    pub fn set_debug_rendering_enabled(&mut self, enabled: bool) {
        self.debug_rendering_enabled = enabled;
    }

    pub fn debug_rendering_stage(&self) -> DebugRenderingStage {
        self.debug_rendering_stage
    }

    /// Ordinal of the current debug stage.
    pub fn debug_rendering_stage_index(&self) -> usize {
        self.debug_rendering_stage.index()
    }

    /// Advance to the next debug stage, wrapping after the last one.
    pub fn cycle_debug_rendering_stage(&mut self) -> DebugRenderingStage {
        self.debug_rendering_stage = self.debug_rendering_stage.next();
        tracing::debug!(stage = %self.debug_rendering_stage, "debug rendering stage");
        self.debug_rendering_stage
    }

    pub fn is_debug_first_person_elements_hidden(&self) -> bool {
        self.debug_first_person_elements_hidden
    }

    pub fn set_debug_first_person_elements_hidden(&mut self, hidden: bool) {
        self.debug_first_person_elements_hidden = hidden;
    }

    pub fn is_debug_render_wireframe(&self) -> bool {
        self.debug_render_wireframe
    }

    pub fn set_debug_render_wireframe(&mut self, enabled: bool) {
        self.debug_render_wireframe = enabled;
    }

    pub fn is_debug_hud_hidden(&self) -> bool {
        self.debug_hud_hidden
    }

    pub fn set_debug_hud_hidden(&mut self, hidden: bool) {
        self.debug_hud_hidden = hidden;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = SystemConfig::default();
        assert_eq!(config.day_night_length_ms(), 1_800_000);
        assert_eq!(config.max_threads(), 2);
        assert_eq!(config.vertical_chunk_mesh_segments(), 1);
        assert!(!config.is_debug_enabled());
        assert!(!config.is_debug_rendering_enabled());
        assert_eq!(config.debug_rendering_stage_index(), 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn setters_round_trip() {
        let mut config = SystemConfig::new();
        config.set_day_night_length_ms(60_000);
        config.set_max_threads(6);
        config.set_vertical_chunk_mesh_segments(4);
        config.set_debug_enabled(true);
        config.set_debug_render_chunk_bounding_boxes(true);
        config.set_debug_rendering_enabled(true);
        config.set_debug_first_person_elements_hidden(true);
        config.set_debug_render_wireframe(true);
        config.set_debug_hud_hidden(true);

        assert_eq!(config.day_night_length_ms(), 60_000);
        assert_eq!(config.max_threads(), 6);
        assert_eq!(config.vertical_chunk_mesh_segments(), 4);
        assert!(config.is_debug_enabled());
        assert!(config.is_debug_render_chunk_bounding_boxes());
        assert!(config.is_debug_rendering_enabled());
        assert!(config.is_debug_first_person_elements_hidden());
        assert!(config.is_debug_render_wireframe());
        assert!(config.is_debug_hud_hidden());
    }

    #[test]
    fn cycling_visits_every_stage_then_wraps() {
        let mut config = SystemConfig::new();
        for expected in 1..DebugRenderingStage::COUNT {
            config.cycle_debug_rendering_stage();
            assert_eq!(config.debug_rendering_stage_index(), expected);
        }
        let stage = config.cycle_debug_rendering_stage();
        assert_eq!(stage, DebugRenderingStage::OpaqueColor);
        assert_eq!(config.debug_rendering_stage_index(), 0);
    }

    #[test]
    fn validate_rejects_zero_threads() {
        let mut config = SystemConfig::new();
        config.set_max_threads(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_day_length() {
        let mut config = SystemConfig::new();
        config.set_day_night_length_ms(0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid {
                field: "day_night_length_ms",
                ..
            })
        ));
    }
}
