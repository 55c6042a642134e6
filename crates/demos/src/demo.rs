use framekit_common::EngineConfig;
use framekit_input::KeyState;
use framekit_kernel::FrameTime;
use framekit_render::{FrameSubmission, SceneResources};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

use crate::arcade::{BrickBreaker, JetAttack};
use crate::lit::{DirectionalLightDemo, PointLightDemo};
use crate::scenes::{BasicColors, Coordinates};

#[derive(Debug, Error, PartialEq)]
pub enum DemoError {
    #[error("unknown demo {0:?}; expected one of: {list}", list = DemoKind::names().join(", "))]
    UnknownDemo(String),
}

/// One scene driven by the frame loop.
///
/// `update` advances state from the key snapshot; `submission` describes what
/// to draw and must not change state.
pub trait Demo {
    fn kind(&self) -> DemoKind;

    /// Meshes and materials referenced by this demo's records.
    fn resources(&self) -> &SceneResources;

    fn update(&mut self, keys: &KeyState, time: &FrameTime);

    fn submission(&self, time: &FrameTime, aspect: f32) -> FrameSubmission;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DemoKind {
    BrickBreaker,
    JetAttack,
    Coordinates,
    BasicColors,
    DirectionalLight,
    PointLight,
}

impl DemoKind {
    pub const ALL: [DemoKind; 6] = [
        DemoKind::BrickBreaker,
        DemoKind::JetAttack,
        DemoKind::Coordinates,
        DemoKind::BasicColors,
        DemoKind::DirectionalLight,
        DemoKind::PointLight,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DemoKind::BrickBreaker => "brick-breaker",
            DemoKind::JetAttack => "jet-attack",
            DemoKind::Coordinates => "coordinates",
            DemoKind::BasicColors => "basic-colors",
            DemoKind::DirectionalLight => "directional-light",
            DemoKind::PointLight => "point-light",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            DemoKind::BrickBreaker => "paddle steered with Left/Right",
            DemoKind::JetAttack => "ball and terrain steered with Left/Right",
            DemoKind::Coordinates => "ten textured cubes at fixed angles",
            DemoKind::BasicColors => "lit cube with an orbiting camera",
            DemoKind::DirectionalLight => "spinning containers under a directional light",
            DemoKind::PointLight => "spinning containers around a steerable point light",
        }
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|kind| kind.name()).collect()
    }
}

impl std::fmt::Display for DemoKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DemoKind {
    type Err = DemoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| DemoError::UnknownDemo(s.to_string()))
    }
}

/// Construct a demo, loading any textures from `config.assets_dir`.
pub fn build(kind: DemoKind, config: &EngineConfig) -> Box<dyn Demo> {
    tracing::info!(demo = %kind, assets = %config.assets_dir.display(), "building demo");
    match kind {
        DemoKind::BrickBreaker => Box::new(BrickBreaker::new()),
        DemoKind::JetAttack => Box::new(JetAttack::new()),
        DemoKind::Coordinates => Box::new(Coordinates::new(&config.assets_dir)),
        DemoKind::BasicColors => Box::new(BasicColors::new()),
        DemoKind::DirectionalLight => Box::new(DirectionalLightDemo::new(&config.assets_dir)),
        DemoKind::PointLight => Box::new(PointLightDemo::new(&config.assets_dir)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for kind in DemoKind::ALL {
            assert_eq!(kind.name().parse::<DemoKind>(), Ok(kind));
        }
        assert_eq!("Point_Light".parse::<DemoKind>(), Ok(DemoKind::PointLight));
    }

    #[test]
    fn unknown_name_lists_choices() {
        let err = "pong".parse::<DemoKind>().unwrap_err();
        assert_eq!(err, DemoError::UnknownDemo("pong".into()));
        assert!(err.to_string().contains("brick-breaker"));
    }

    #[test]
    fn build_reports_kind() {
        let dir = tempfile::tempdir().unwrap();
        let config = EngineConfig {
            assets_dir: dir.path().to_path_buf(),
            ..EngineConfig::default()
        };
        for kind in DemoKind::ALL {
            assert_eq!(build(kind, &config).kind(), kind);
        }
    }
}
