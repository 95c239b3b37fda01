//! Match configuration.
//!
//! Provides viewport, stage, movement, combat and shake parameters for a
//! headless match. Configuration can be loaded from and saved to a TOML file.

use brawl_common::{BrawlError, BrawlResult, FighterId};
use brawl_gameplay::{CombatTuning, FightSettings, PhysicsTuning, ShakeSettings};
use brawl_kernel::{FrameGeometryTable, StageBounds, Viewport};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::driver::ScriptedInput;

/// Configuration file name.
pub const CONFIG_FILE: &str = "brawl.toml";

/// Match configuration parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    // === Viewport ===
    /// Viewport width in pixels
    pub viewport_width: f32,
    /// Viewport height in pixels
    pub viewport_height: f32,

    // === Timing ===
    /// Fixed simulation ticks per second
    pub tick_rate: u32,
    /// Simulated display frames per second
    pub frame_rate: u32,
    /// Ticks to run before giving up on a knockout
    pub max_ticks: u32,

    // === Fighters ===
    /// Characters for player one and player two
    pub fighters: [FighterId; 2],
    /// RON frame data used instead of the built-in roster
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame_data: Option<PathBuf>,

    // === Debug ===
    /// Hand collision boxes to the surface as well
    pub show_boxes: bool,

    // === Script ===
    /// Inputs fed to the fighters, ordered by tick
    pub script: Vec<ScriptedInput>,

    // === Tuning ===
    /// Stage bounds
    pub stage: StageBounds,
    /// Movement tuning
    pub physics: PhysicsTuning,
    /// Combat rules
    pub combat: CombatTuning,
    /// Hit shake
    pub shake: ShakeSettings,
}

impl Default for MatchConfig {
    fn default() -> Self {
        let viewport = Viewport::default();
        Self {
            viewport_width: viewport.width,
            viewport_height: viewport.height,

            tick_rate: 60,
            frame_rate: 60,
            max_ticks: 60 * 99,

            fighters: [FighterId::Malupiton, FighterId::Golem],
            frame_data: None,

            show_boxes: false,

            script: crate::driver::demo_script(),

            stage: StageBounds::default(),
            physics: PhysicsTuning::default(),
            combat: CombatTuning::default(),
            shake: ShakeSettings::default(),
        }
    }
}

impl MatchConfig {
    /// Load configuration from `brawl.toml` in the working directory.
    pub fn load() -> Self {
        Self::load_from(CONFIG_FILE)
    }

    /// Load configuration from a specific path.
    /// Returns default config if file doesn't exist or is invalid.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            info!(path = %path.display(), "No match config, using defaults");
            return Self::default();
        }

        let parsed = fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|source| toml::from_str::<Self>(&source).map_err(|e| e.to_string()));
        match parsed {
            Ok(config) => {
                info!(path = %path.display(), "Loaded match config");
                config
            },
            Err(e) => {
                warn!(path = %path.display(), "Ignoring unusable match config: {e}");
                Self::default()
            },
        }
    }

    /// Writes the configuration as pretty TOML, creating parent directories.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let path = path.as_ref();
        let contents = toml::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, contents)?;

        info!(path = %path.display(), "Saved match config");
        Ok(())
    }

    /// Validate and clamp configuration values to sensible ranges.
    pub fn validate(&mut self) {
        // Viewport
        self.viewport_width = self.viewport_width.clamp(64.0, 4096.0);
        self.viewport_height = self.viewport_height.clamp(64.0, 4096.0);

        // Timing
        self.tick_rate = self.tick_rate.clamp(1, 1000);
        self.frame_rate = self.frame_rate.clamp(1, 1000);
        self.max_ticks = self.max_ticks.clamp(1, 1_000_000);

        // Stage
        self.stage.width = self.stage.width.max(self.viewport_width);
        self.stage.height = self.stage.height.max(self.viewport_height);
        self.stage.padding = self.stage.padding.clamp(0.0, self.stage.width / 4.0);
        self.stage.floor = self.stage.floor.clamp(0.0, self.stage.height);
        self.stage.scroll_boundary = self
            .stage
            .scroll_boundary
            .clamp(0.0, self.viewport_width / 2.0);

        // Physics
        self.physics.gravity = self.physics.gravity.max(0.0);
        self.physics.push_friction = self.physics.push_friction.max(0.0);

        // Combat
        self.combat.max_skill = self.combat.max_skill.max(1);
        self.combat.starting_health = self.combat.starting_health.clamp(1.0, 10_000.0);

        // Shake
        self.shake.intensity = self.shake.intensity.clamp(0.0, 64.0);
        self.shake.duration = self.shake.duration.clamp(0.0, 5.0);
    }

    /// Viewport size.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.viewport_width, self.viewport_height)
    }

    /// Fight settings gathered from the tuning sections.
    #[must_use]
    pub fn fight_settings(&self) -> FightSettings {
        FightSettings {
            stage: self.stage,
            physics: self.physics,
            combat: self.combat,
            shake: self.shake,
        }
    }

    /// Loads the configured RON frame data, if any.
    ///
    /// Both fighters share the authored table.
    pub fn frame_tables(&self) -> BrawlResult<Option<[FrameGeometryTable; 2]>> {
        let Some(path) = &self.frame_data else {
            return Ok(None);
        };

        let source = fs::read_to_string(path).map_err(|e| {
            BrawlError::Config(format!("cannot read frame data {}: {e}", path.display()))
        })?;
        let table = FrameGeometryTable::from_ron_str(&source)?;
        info!(path = %path.display(), frames = table.frame_count(), "Loaded frame data");
        Ok(Some([table.clone(), table]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brawl_common::FighterState;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = MatchConfig::default();
        assert_eq!(config.tick_rate, 60);
        assert_eq!(config.fighters, [FighterId::Malupiton, FighterId::Golem]);
        assert_eq!(config.stage.width, 764.0);
        assert!(config.frame_data.is_none());
        assert!(!config.script.is_empty());
    }

    #[test]
    fn test_config_validation() {
        let mut config = MatchConfig::default();

        config.viewport_width = 10.0;
        config.tick_rate = 0;
        config.shake.intensity = 500.0;
        config.combat.max_skill = 0;
        config.physics.gravity = -5.0;

        config.validate();

        assert_eq!(config.viewport_width, 64.0);
        assert_eq!(config.tick_rate, 1);
        assert_eq!(config.shake.intensity, 64.0);
        assert_eq!(config.combat.max_skill, 1);
        assert_eq!(config.physics.gravity, 0.0);
    }

    #[test]
    fn test_stage_grows_to_fit_viewport() {
        let mut config = MatchConfig::default();
        config.viewport_width = 1024.0;
        config.validate();
        assert_eq!(config.stage.width, 1024.0);
    }

    #[test]
    fn test_config_save_load() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("brawl.toml");

        let mut config = MatchConfig::default();
        config.fighters = [FighterId::Golem, FighterId::Golem];
        config.show_boxes = true;
        config.shake.seed = 7;
        config.script = vec![ScriptedInput::new(3, 1, FighterState::HeavyKick)];

        config.save_to(&config_path).expect("Failed to save config");

        let loaded = MatchConfig::load_from(&config_path);
        assert_eq!(loaded.fighters, [FighterId::Golem, FighterId::Golem]);
        assert!(loaded.show_boxes);
        assert_eq!(loaded.shake.seed, 7);
        assert_eq!(loaded.script, config.script);
    }

    #[test]
    fn test_config_load_missing_file() {
        let config = MatchConfig::load_from("/nonexistent/path/brawl.toml");
        assert_eq!(config.tick_rate, 60);
    }

    #[test]
    fn test_config_load_invalid_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("brawl.toml");
        fs::write(&config_path, "tick_rate = \"fast\"").expect("write");

        let config = MatchConfig::load_from(&config_path);
        assert_eq!(config.tick_rate, 60);
    }

    #[test]
    fn test_config_load_directory_falls_back() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config = MatchConfig::load_from(temp_dir.path());
        assert_eq!(config.tick_rate, 60);
        assert_eq!(config.fighters, [FighterId::Malupiton, FighterId::Golem]);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: MatchConfig = toml::from_str(
            r#"
            max_ticks = 30

            [physics]
            gravity = 500.0
            "#,
        )
        .expect("parse");
        assert_eq!(config.max_ticks, 30);
        assert_eq!(config.physics.gravity, 500.0);
        assert_eq!(config.physics.walk_forward_speed, PhysicsTuning::default().walk_forward_speed);
        assert_eq!(config.viewport_width, 384.0);
    }

    #[test]
    fn test_script_uses_state_ids() {
        let config: MatchConfig = toml::from_str(
            r#"
            [[script]]
            tick = 4
            player = 0
            state = "lightPunch"
            "#,
        )
        .expect("parse");
        assert_eq!(config.script, vec![ScriptedInput::new(4, 0, FighterState::LightPunch)]);
    }

    #[test]
    fn test_frame_tables_from_ron() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("frames.ron");
        fs::write(
            &path,
            r#"(
                frames: {
                    "idle-1": (
                        ((0.0, 0.0, 64.0, 96.0), (32.0, 96.0)),
                        (-16.0, -80.0, 32.0, 78.0),
                        ((-8.0, -88.0, 24.0, 16.0), (-26.0, -74.0, 48.0, 42.0), (-26.0, -31.0, 45.0, 32.0)),
                        (0.0, 0.0, 0.0, 0.0),
                    ),
                },
                animations: { "idle": [("idle-1", 100)] },
            )"#,
        )
        .expect("write");

        let mut config = MatchConfig::default();
        assert!(config.frame_tables().expect("no data").is_none());

        config.frame_data = Some(path);
        let tables = config.frame_tables().expect("load").expect("tables");
        assert!(tables[0].has_animation(FighterState::Idle));
        assert!(tables[1].has_animation(FighterState::Idle));
    }

    #[test]
    fn test_frame_tables_missing_file() {
        let mut config = MatchConfig::default();
        config.frame_data = Some(PathBuf::from("/nonexistent/frames.ron"));
        assert!(matches!(config.frame_tables(), Err(BrawlError::Config(_))));
    }

    #[test]
    fn test_config_toml_serialization() {
        let config = MatchConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("Failed to serialize");

        assert!(toml_str.contains("tick_rate"));
        assert!(toml_str.contains("[stage]"));
        assert!(toml_str.contains("[[script]]"));
    }
}
