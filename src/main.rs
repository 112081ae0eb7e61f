//! Butterfly Catcher entry point
//!
//! Runs a headless demo session: the autopilot chases quarries for the full
//! countdown and the final score is printed as `<score> in <seconds>
//! seconds`. Wire a real renderer/input source against the `Renderer` and
//! `InputSource` traits to play interactively.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use butterfly_catcher::Session;
use butterfly_catcher::config::GameConfig;
use butterfly_catcher::input::ScriptedInput;
use butterfly_catcher::render::NullRenderer;

struct Args {
    seed: Option<u64>,
    config: Option<PathBuf>,
    seconds: Option<u32>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        seed: None,
        config: None,
        seconds: None,
    };

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--seed" => {
                let value = iter.next().ok_or("--seed needs a value")?;
                args.seed = Some(value.parse().map_err(|_| format!("bad seed {value}"))?);
            }
            "--config" => {
                let value = iter.next().ok_or("--config needs a path")?;
                args.config = Some(PathBuf::from(value));
            }
            "--seconds" => {
                let value = iter.next().ok_or("--seconds needs a value")?;
                args.seconds = Some(value.parse().map_err(|_| format!("bad seconds {value}"))?);
            }
            other => return Err(format!("unknown argument {other}")),
        }
    }
    Ok(args)
}

fn main() -> ExitCode {
    env_logger::init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{err}");
            eprintln!("usage: butterfly-catcher [--seed N] [--config PATH] [--seconds N]");
            return ExitCode::FAILURE;
        }
    };

    let mut config = args
        .config
        .as_deref()
        .map(GameConfig::load)
        .unwrap_or_default();
    if let Some(seconds) = args.seconds {
        config.time_limit_ms = seconds * 1000;
    }

    let seed = args.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });
    log::info!("starting demo session, seed {seed}");

    let mut session = Session::new(config, seed);
    session.set_autopilot(true);

    // Quit a couple of seconds after the countdown freezes
    let frames = (config.time_limit_ms as u64 / 1000 + 2) * config.frame_rate as u64;
    let mut input = ScriptedInput::quit_after(frames);
    let mut renderer = NullRenderer::new();

    match session.run(&mut input, &mut renderer) {
        Ok(report) => {
            println!("{report}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("session failed: {err}");
            ExitCode::FAILURE
        }
    }
}
