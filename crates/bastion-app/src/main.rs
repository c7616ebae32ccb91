//! Headless BASTION runner.
//!
//! Usage:
//!   bastion [--config <file.json>] [--seed <n>] [--seconds <n>] [--realtime] [--json-lines]
//!
//! Plays the session with the autopilot and prints a JSON run summary.
//! `RUST_LOG` controls log verbosity.

use std::process::ExitCode;
use std::time::{Duration, Instant};

use bastion_app::autopilot::Autopilot;
use bastion_app::game_loop::{self, FRAME_DURATION};
use bastion_app::presenter::{JsonLinesPresenter, LogPresenter, Presenter, RunSummary};
use bastion_sim::{SimConfig, SimulationEngine};

/// Autopilot decision cadence, in steps.
const DECIDE_EVERY: u64 = 6;
/// How often the real-time host polls the loop for a fresh snapshot.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug)]
struct Options {
    config_path: Option<String>,
    seed: Option<u64>,
    seconds: f64,
    realtime: bool,
    json_lines: bool,
}

fn parse_args(args: impl Iterator<Item = String>) -> Result<Options, String> {
    let mut options = Options {
        config_path: None,
        seed: None,
        seconds: 60.0,
        realtime: false,
        json_lines: false,
    };
    let mut args = args.peekable();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                options.config_path = Some(args.next().ok_or("--config needs a path")?);
            }
            "--seed" => {
                let value = args.next().ok_or("--seed needs a value")?;
                options.seed = Some(value.parse().map_err(|e| format!("bad --seed '{value}': {e}"))?);
            }
            "--seconds" => {
                let value = args.next().ok_or("--seconds needs a value")?;
                let seconds: f64 = value
                    .parse()
                    .map_err(|e| format!("bad --seconds '{value}': {e}"))?;
                if !(seconds.is_finite() && seconds > 0.0) {
                    return Err(format!("--seconds must be positive, got {seconds}"));
                }
                options.seconds = seconds;
            }
            "--realtime" => options.realtime = true,
            "--json-lines" => options.json_lines = true,
            other => return Err(format!("unknown argument '{other}'")),
        }
    }
    Ok(options)
}

fn load_config(options: &Options) -> Result<SimConfig, String> {
    let mut config = match &options.config_path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| format!("read config '{path}': {e}"))?;
            SimConfig::from_json(&text).map_err(|e| format!("parse config '{path}': {e}"))?
        }
        None => SimConfig::default(),
    };
    if let Some(seed) = options.seed {
        config.seed = seed;
    }
    Ok(config)
}

fn build_presenter(options: &Options) -> Box<dyn Presenter + Send> {
    let log = Box::new(LogPresenter::new(60));
    if options.json_lines {
        let lines = Box::new(JsonLinesPresenter::new(std::io::stdout()));
        Box::new(vec![log as Box<dyn Presenter + Send>, lines])
    } else {
        log
    }
}

fn run_realtime(config: SimConfig, options: &Options) -> Option<RunSummary> {
    let mut autopilot = Autopilot::new(config.arena_height, 1);
    let handle = game_loop::spawn_game_loop(config, build_presenter(options));
    let deadline = Instant::now() + Duration::from_secs_f64(options.seconds);

    while Instant::now() < deadline {
        std::thread::sleep(POLL_INTERVAL);
        if let Some(snapshot) = handle.latest() {
            for command in autopilot.decide(&snapshot) {
                if !handle.send(command) {
                    break;
                }
            }
        }
    }

    let last = handle.latest();
    handle.shutdown();
    last.as_ref().map(RunSummary::from_snapshot)
}

fn run_offline(config: SimConfig, options: &Options) -> RunSummary {
    let mut autopilot = Autopilot::new(config.arena_height, DECIDE_EVERY);
    let mut engine = SimulationEngine::new(config);
    let mut presenter = build_presenter(options);
    let dt = FRAME_DURATION.as_secs_f64();
    let steps = (options.seconds / dt).round() as u64;

    let last = game_loop::run_fixed_step(
        &mut engine,
        presenter.as_mut(),
        &mut autopilot,
        steps,
        dt,
    );
    RunSummary::from_snapshot(&last)
}

fn main() -> ExitCode {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .try_init();

    let options = match parse_args(std::env::args().skip(1)) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(2);
        }
    };
    let config = match load_config(&options) {
        Ok(c) => c,
        Err(e) => {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let summary = if options.realtime {
        match run_realtime(config, &options) {
            Some(summary) => summary,
            None => {
                log::error!("Game loop produced no snapshot");
                return ExitCode::FAILURE;
            }
        }
    } else {
        run_offline(config, &options)
    };

    match serde_json::to_string_pretty(&summary) {
        Ok(json) => {
            // Keep stdout machine-readable when it already carries snapshots.
            if options.json_lines {
                eprintln!("{json}");
            } else {
                println!("{json}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Failed to serialize summary: {e}");
            ExitCode::FAILURE
        }
    }
}
