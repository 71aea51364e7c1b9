//! Fruitland terminal runner (default binary).
//!
//! Usage:
//!
//! ```text
//! fruitland [--demo] [--levels PATH] [--tier standard|performance]
//!           [--level N] [--threaded-render]
//! ```
//!
//! Settings start from the environment (`FRUITLAND_*`) and flags override
//! them. Without a level file the built-in demo levels are played.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use fruitland::engine::{Game, GameConfig, InputFrame, IntentProvider, SystemClock, Tier};
use fruitland::input::KeyboardInput;
use fruitland::term::TerminalRenderer;

#[derive(Debug, Default)]
struct Args {
    demo: bool,
    levels: Option<PathBuf>,
    tier: Option<Tier>,
    level: Option<u8>,
    threaded_render: bool,
}

fn parse_args() -> Result<Args> {
    let mut args = Args::default();
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--demo" => args.demo = true,
            "--threaded-render" => args.threaded_render = true,
            "--levels" => {
                let path = it.next().context("--levels needs a path")?;
                args.levels = Some(PathBuf::from(path));
            }
            "--tier" => {
                let value = it.next().context("--tier needs a value")?;
                args.tier = Some(
                    Tier::parse(&value)
                        .with_context(|| format!("unknown tier {value:?}"))?,
                );
            }
            "--level" => {
                let value = it.next().context("--level needs a number")?;
                args.level = Some(
                    value
                        .parse()
                        .with_context(|| format!("invalid level {value:?}"))?,
                );
            }
            other => bail!("unknown argument {other:?}"),
        }
    }
    Ok(args)
}

/// Logs go to `FRUITLAND_LOG_FILE` while the terminal is in raw mode.
/// Without it, logging stays off unless `RUST_LOG` is set.
fn init_logging() -> Result<()> {
    let env = env_logger::Env::default().default_filter_or("info");
    match std::env::var_os("FRUITLAND_LOG_FILE") {
        Some(path) => {
            let file = std::fs::File::create(&path)
                .with_context(|| format!("failed to create log file {:?}", path))?;
            env_logger::Builder::from_env(env)
                .target(env_logger::Target::Pipe(Box::new(file)))
                .init();
        }
        None if std::env::var_os("RUST_LOG").is_some() => {
            env_logger::Builder::from_env(env).init();
        }
        None => {}
    }
    Ok(())
}

fn build_config(args: &Args) -> Result<GameConfig> {
    let mut config = GameConfig::from_env()?;
    if let Some(tier) = args.tier {
        config = config.with_tier(tier);
    }
    if let Some(path) = &args.levels {
        config.levels_path = Some(path.clone());
    }
    if args.demo {
        config.levels_path = None;
    }
    if let Some(level) = args.level {
        config.start_level = level;
    }
    config.validate()?;
    Ok(config)
}

/// Keyboard polling as the engine's input collaborator.
struct Keyboard(KeyboardInput);

impl IntentProvider for Keyboard {
    fn poll(&mut self, now_us: u64) -> Result<InputFrame> {
        let polled = self.0.poll(now_us).context("failed to read keyboard")?;
        Ok(InputFrame {
            intent: polled.intent,
            controls: polled.controls,
        })
    }
}

fn main() -> Result<()> {
    let args = parse_args()?;
    init_logging()?;
    let config = build_config(&args)?;

    let clock = SystemClock::new();
    let mut game = Game::from_config(config, 0)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let mut input = Keyboard(KeyboardInput::new());
    let result = if args.threaded_render {
        game.run_threaded(&clock, &mut input, &mut term)
    } else {
        game.run(&clock, &mut input, &mut term)
    };

    // Always try to restore terminal state.
    let _ = term.exit();

    let summary = result?;
    println!(
        "{:?}: score {} on level {}",
        summary.state, summary.score, summary.level
    );
    Ok(())
}
