use std::path::PathBuf;
use std::thread;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use treeviz::{Command, Config, Node, Session, Speed, Step, Variant};

/// Runs tree commands and prints the animation trace of each one as a JSON line.
#[derive(Debug, Parser)]
#[command(name = "treeviz", version, about)]
struct Args {
    /// TOML settings file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Variant to start with (`bst` or `avl`).
    #[arg(long)]
    variant: Option<Variant>,

    /// Canvas width in pixels.
    #[arg(long)]
    width: Option<f64>,

    /// Canvas height in pixels.
    #[arg(long)]
    height: Option<f64>,

    /// Playback speed, 1 to 5.
    #[arg(long, value_parser = parse_speed)]
    speed: Option<Speed>,

    /// Play every trace back in real time, logging each step.
    #[arg(long)]
    play: bool,

    /// Seed for `random`.
    #[arg(long)]
    seed: Option<u64>,

    /// Commands such as `insert 10`, `search 5`, `inorder` or `avl`.
    #[arg(required = true)]
    commands: Vec<String>,
}

fn parse_speed(s: &str) -> std::result::Result<Speed, String> {
    let level: u8 = s.parse().map_err(|e| format!("{e}"))?;
    Speed::new(level).map_err(|e| e.to_string())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Frame<'a> {
    command: String,
    variant: Variant,
    steps: &'a [Step],
    nodes: Vec<&'a Node>,
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(variant) = args.variant {
        config.variant = variant;
    }
    if let Some(width) = args.width {
        config.canvas.width = width;
    }
    if let Some(height) = args.height {
        config.canvas.height = height;
    }
    if let Some(speed) = args.speed {
        config.playback.speed = speed;
    }
    Ok(config)
}

fn play(session: &mut Session) {
    let interval = session.playback().interval();
    while session.playback().is_playing() {
        thread::sleep(interval);
        if session.playback_mut().step_forward().is_some() {
            log::info!("{}", session.playback().markers().message);
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = load_config(&args)?;
    let mut session = Session::new(config).context("invalid settings")?;
    if let Some(seed) = args.seed {
        session.seed(seed);
    }
    log::debug!(
        "starting {} session on a {:?} canvas",
        session.variant(),
        session.canvas()
    );

    for text in &args.commands {
        let command: Command = text
            .parse()
            .with_context(|| format!("could not parse `{text}`"))?;
        // Without --play traces are only printed, never ticked.
        session.playback_mut().stop();

        let steps = session
            .execute(command)
            .with_context(|| format!("`{command}` failed"))?
            .to_vec();
        let frame = Frame {
            command: command.to_string(),
            variant: session.variant(),
            steps: &steps,
            nodes: session.tree().in_order(),
        };
        println!("{}", serde_json::to_string(&frame)?);

        if args.play {
            play(&mut session);
        }
    }

    Ok(())
}
