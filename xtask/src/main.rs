use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use framekit_demos::DemoKind;
use std::process::Command;

#[derive(Parser)]
#[command(name = "xtask", about = "Workspace automation for framekit")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run fmt, clippy, tests, doc and the headless smoke run
    Check,
    /// Run cargo fmt --check on all crates
    Fmt,
    /// Run clippy on all crates and targets, denying warnings
    Clippy,
    /// Run all tests
    Test,
    /// Build rustdoc for the workspace
    Doc,
    /// Build the entire workspace
    Build,
    /// Simulate a few frames of every demo through framekit-cli
    Smoke {
        #[arg(long, default_value = "30")]
        frames: u32,
    },
}

/// Run one cargo invocation, failing on a non-zero exit.
fn cargo(step: &str, args: &[&str]) -> Result<()> {
    println!("==> cargo {}", args.join(" "));
    let status = Command::new("cargo")
        .args(args)
        .status()
        .with_context(|| format!("spawning cargo for {step}"))?;
    if !status.success() {
        bail!("{step} failed ({status})");
    }
    Ok(())
}

fn fmt() -> Result<()> {
    cargo("fmt", &["fmt", "--all", "--", "--check"])
}

fn clippy() -> Result<()> {
    cargo(
        "clippy",
        &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
    )
}

fn test() -> Result<()> {
    cargo("test", &["test", "--workspace"])
}

fn doc() -> Result<()> {
    cargo("doc", &["doc", "--workspace", "--no-deps"])
}

fn build() -> Result<()> {
    cargo("build", &["build", "--workspace"])
}

fn smoke(frames: u32) -> Result<()> {
    let frames = frames.to_string();
    for kind in DemoKind::ALL {
        let step = format!("smoke {kind}");
        cargo(
            &step,
            &[
                "run", "--quiet", "-p", "framekit-cli", "--", "simulate", "--json", "--demo",
                kind.name(), "--frames", &frames, "--keys", "0-5:right,3-8:up,6:space",
            ],
        )?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check => {
            fmt()?;
            clippy()?;
            test()?;
            doc()?;
            smoke(10)?;
        }
        Commands::Fmt => fmt()?,
        Commands::Clippy => clippy()?,
        Commands::Test => test()?,
        Commands::Doc => doc()?,
        Commands::Build => build()?,
        Commands::Smoke { frames } => smoke(frames)?,
    }

    Ok(())
}
