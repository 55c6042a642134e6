use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use framekit_common::EngineConfig;
use framekit_demos::{DemoKind, FrameLoop};
use framekit_input::{Key, KeyState};
use framekit_kernel::{ManualTimer, TimeSource};
use framekit_render::{DebugTextRenderer, FrameSubmission, Renderer};
use serde::Serialize;
use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "framekit-cli", about = "Headless tools for the framekit demos")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// List the available demos
    List,
    /// Run a demo headlessly with a fixed time step and scripted keys
    Simulate {
        /// Demo to run
        #[arg(short, long, default_value = "brick-breaker")]
        demo: DemoKind,
        /// Number of frames to run
        #[arg(short, long, default_value = "10")]
        frames: u64,
        /// Simulated milliseconds per frame
        #[arg(long, default_value = "16")]
        dt_ms: u64,
        /// Held keys per frame range, e.g. "0-10:right,20:esc"
        #[arg(short, long, default_value = "")]
        keys: KeyScript,
        /// Emit one JSON object per frame instead of text
        #[arg(long)]
        json: bool,
        /// YAML engine configuration
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Validate a YAML config and print it with defaults filled in
    CheckConfig {
        path: PathBuf,
    },
}

/// Keys held over inclusive frame ranges.
#[derive(Debug, Clone, Default, PartialEq)]
struct KeyScript {
    holds: Vec<(RangeInclusive<u64>, Key)>,
}

impl KeyScript {
    fn keys_at(&self, frame: u64) -> KeyState {
        KeyState::from_keys(
            self.holds
                .iter()
                .filter(|(range, _)| range.contains(&frame))
                .map(|(_, key)| *key),
        )
    }
}

impl FromStr for KeyScript {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut holds = Vec::new();
        for entry in s.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (frames, key) = entry
                .split_once(':')
                .with_context(|| format!("expected <frames>:<key>, got '{entry}'"))?;
            let key = Key::from_name(key.trim())
                .with_context(|| format!("unknown key '{}'", key.trim()))?;
            let range = match frames.split_once('-') {
                Some((start, end)) => {
                    let start: u64 = start.trim().parse().context("frame range start")?;
                    let end: u64 = end.trim().parse().context("frame range end")?;
                    if end < start {
                        bail!("frame range {start}-{end} is reversed");
                    }
                    start..=end
                }
                None => {
                    let frame: u64 = frames.trim().parse().context("frame number")?;
                    frame..=frame
                }
            };
            holds.push((range, key));
        }
        Ok(Self { holds })
    }
}

#[derive(Serialize)]
struct RecordLine<'a> {
    label: &'a str,
    shader: &'static str,
    position: [f32; 3],
}

#[derive(Serialize)]
struct FrameLine<'a> {
    frame: u64,
    elapsed_ms: f32,
    draw_calls: usize,
    records: Vec<RecordLine<'a>>,
}

impl<'a> FrameLine<'a> {
    fn new(frame: u64, elapsed_ms: f32, submission: &'a FrameSubmission) -> Self {
        Self {
            frame,
            elapsed_ms,
            draw_calls: submission.draw_calls(),
            records: submission
                .records
                .iter()
                .map(|record| RecordLine {
                    label: &record.label,
                    shader: record.shader.name(),
                    position: record.position().to_array(),
                })
                .collect(),
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<EngineConfig> {
    match path {
        Some(path) => {
            EngineConfig::load(path).with_context(|| format!("loading config {}", path.display()))
        }
        None => Ok(EngineConfig::default()),
    }
}

fn simulate(
    demo: DemoKind,
    frames: u64,
    dt_ms: u64,
    script: &KeyScript,
    json: bool,
    config: &EngineConfig,
) -> anyhow::Result<()> {
    let mut frame_loop = FrameLoop::new(framekit_demos::build(demo, config), config);
    let mut timer = ManualTimer::new();

    for frame in 0..frames {
        let keys = script.keys_at(frame);
        let Some(submission) = frame_loop.advance(timer.now(), &keys) else {
            tracing::info!(frame, reason = ?frame_loop.stop_reason(), "simulation stopped");
            break;
        };
        submission
            .validate(frame_loop.resources())
            .with_context(|| format!("frame {frame} failed validation"))?;

        let elapsed_ms = frame_loop
            .last_time()
            .map(|time| time.elapsed_millis())
            .unwrap_or_default();
        if json {
            let line = FrameLine::new(frame, elapsed_ms, &submission);
            println!("{}", serde_json::to_string(&line)?);
        } else {
            let mut renderer = DebugTextRenderer::new(frame_loop.resources());
            print!("{}", renderer.render(&submission));
        }
        timer.advance_millis(dt_ms);
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Info => {
            println!("framekit-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("render: {}", framekit_render::crate_info());
            println!("demos: {}", DemoKind::ALL.len());
        }
        Commands::List => {
            for kind in DemoKind::ALL {
                println!("{:<18} {}", kind.name(), kind.description());
            }
        }
        Commands::Simulate {
            demo,
            frames,
            dt_ms,
            keys,
            json,
            config,
        } => {
            let config = load_config(config.as_ref())?;
            simulate(demo, frames, dt_ms, &keys, json, &config)?;
        }
        Commands::CheckConfig { path } => {
            let config = load_config(Some(&path))?;
            print!("{}", config.to_yaml()?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ranges_and_single_frames() {
        let script: KeyScript = "0-2:right, 5:esc".parse().unwrap();
        assert!(script.keys_at(0).is_held(Key::ArrowRight));
        assert!(script.keys_at(2).is_held(Key::ArrowRight));
        assert!(script.keys_at(3).is_empty());
        assert!(script.keys_at(5).is_held(Key::Escape));
        assert!(!script.keys_at(5).is_held(Key::ArrowRight));
    }

    #[test]
    fn empty_script_holds_nothing() {
        let script: KeyScript = "".parse().unwrap();
        assert_eq!(script, KeyScript::default());
        assert!(script.keys_at(0).is_empty());
    }

    #[test]
    fn rejects_bad_entries() {
        assert!("3".parse::<KeyScript>().is_err());
        assert!("1:jump".parse::<KeyScript>().is_err());
        assert!("5-2:left".parse::<KeyScript>().is_err());
        assert!("x-2:left".parse::<KeyScript>().is_err());
    }

    #[test]
    fn simulate_runs_every_demo() {
        let script: KeyScript = "0-3:left,2-4:up,3:space".parse().unwrap();
        for kind in DemoKind::ALL {
            simulate(kind, 5, 16, &script, true, &EngineConfig::default()).unwrap();
        }
    }

    #[test]
    fn check_config_reads_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.yaml");
        std::fs::write(&path, "window:\n  width: 800\nshaders: degrade\n").unwrap();
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.window.width, 800);
        assert_eq!(config.window.height, 720);
    }

    #[test]
    fn frame_line_serializes_positions() {
        let config = EngineConfig::default();
        let demo = framekit_demos::build(DemoKind::BrickBreaker, &config);
        let mut frame_loop = FrameLoop::new(demo, &config);
        let submission = frame_loop
            .advance(std::time::Duration::ZERO, &KeyState::new())
            .unwrap();
        let line = FrameLine::new(0, 0.0, &submission);
        let value = serde_json::to_value(&line).unwrap();
        assert_eq!(value["draw_calls"], 1);
        assert_eq!(value["records"][0]["position"][1], -20.0);
    }
}
