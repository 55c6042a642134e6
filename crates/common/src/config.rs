use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Errors from loading or validating an [`EngineConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// What to do when a shader fails to compile or link.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShaderPolicy {
    /// Abort startup with the compiler diagnostic.
    #[default]
    FailFast,
    /// Log the diagnostic and draw with the flat-color fallback shader.
    Degrade,
}

impl FromStr for ShaderPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fail_fast" | "fail-fast" => Ok(Self::FailFast),
            "degrade" => Ok(Self::Degrade),
            other => Err(ConfigError::Invalid(format!(
                "unknown shader policy '{other}' (expected fail-fast or degrade)"
            ))),
        }
    }
}

/// Window parameters. The window is created once with this fixed size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "framekit".into(),
            width: 1280,
            height: 720,
        }
    }
}

impl WindowConfig {
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

/// Frame pacing parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    /// Throttle the loop to roughly this many frames per second.
    pub target_fps: Option<u32>,
    /// Upper clamp applied to each frame's delta-time, in seconds.
    pub max_delta_secs: Option<f32>,
}

/// Top-level engine configuration shared by the desktop and CLI apps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub window: WindowConfig,
    pub frame: FrameConfig,
    pub shaders: ShaderPolicy,
    /// Directory holding the demo textures.
    pub assets_dir: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            frame: FrameConfig::default(),
            shaders: ShaderPolicy::default(),
            assets_dir: PathBuf::from("resources"),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a YAML document.
    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&source)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window size must be non-zero, got {}x{}",
                self.window.width, self.window.height
            )));
        }
        if self.frame.target_fps == Some(0) {
            return Err(ConfigError::Invalid("target_fps must be at least 1".into()));
        }
        let max_delta = self.frame.max_delta_secs;
        if let Some(max) = max_delta.filter(|max| !(max.is_finite() && *max > 0.0)) {
            return Err(ConfigError::Invalid(format!(
                "max_delta_secs must be positive, got {max}"
            )));
        }
        Ok(())
    }
}
