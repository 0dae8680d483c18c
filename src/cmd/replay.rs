use crate::reports;
use clap::Args;
use serde::Serialize;
use signforge::api::Recognition;
use signforge::classifier;
use signforge::config::EngineConfig;
use signforge::engine::{ConfirmationEngine, EngineSnapshot};
use signforge::loader;
use signforge::response::{self, LogFormat, SignResponse};
use signforge::SfResult;
use tracing::{info, warn};

#[derive(Args, Debug, Clone)]
pub struct ReplayArgs {
    /// Recording to replay (.json or .csv), timestamps in milliseconds.
    pub file: String,

    #[command(flatten)]
    pub engine: EngineConfig,

    /// Print the step log and final engine state as JSON.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Serialize)]
struct ReplayReport<'a> {
    steps: &'a [Recognition],
    confirmed: Option<SignResponse>,
    snapshot: EngineSnapshot,
}

pub fn run(args: &ReplayArgs, config: EngineConfig) -> SfResult<()> {
    let frames = loader::load_recording(&args.file)?;
    info!(
        "▶️  Replaying {} frames (confirm {}x within {}ms)",
        frames.len(),
        config.confirmation_count,
        config.confirmation_window_ms
    );

    let mut engine = ConfirmationEngine::new(config);
    let mut steps = Vec::with_capacity(frames.len());
    let mut last_t = 0;

    for frame in &frames {
        if frame.timestamp_ms < last_t {
            warn!(
                "Timestamp {} goes backwards (previous {}); elapsed time clamps to zero",
                frame.timestamp_ms, last_t
            );
        }
        last_t = frame.timestamp_ms;

        let outcome = classifier::classify_raw(&frame.landmarks);
        let display = engine.process(&outcome, frame.timestamp_ms);
        steps.push(Recognition {
            outcome,
            display,
            timestamp_ms: frame.timestamp_ms,
        });
    }

    // Latest confirmation seen during the replay, explained.
    let confirmed = match steps.iter().rev().find(|s| s.display.is_confirmed()) {
        Some(step) => Some(response::from_display(&step.display, chrono::Utc::now())?),
        None => None,
    };

    if args.json {
        let report = ReplayReport {
            steps: &steps,
            confirmed,
            snapshot: engine.snapshot(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    reports::print_replay_table(&steps);
    match confirmed {
        Some(resp) => {
            println!("\n{}", resp.to_log(LogFormat::Text)?);
            reports::print_explanation(&resp);
        }
        None => println!("\nNo gesture was confirmed."),
    }
    Ok(())
}
