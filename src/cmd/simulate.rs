use crate::reports;
use clap::Args;
use signforge::api::RecognitionSession;
use signforge::config::EngineConfig;
use signforge::engine::ManualClock;
use signforge::landmarks::{select_dominant, LandmarkSource};
use signforge::loader::{self, RecordedFrame};
use signforge::simulate::{GestureScript, SimGesture, SimulatedDetector};
use signforge::{SfResult, SignForgeError};
use std::fs::File;
use std::io::BufWriter;
use std::str::FromStr;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct SimulateArgs {
    /// A gesture name (fist, open, stop, point, peace, thumbs_up, ok, wave,
    /// none), a comma-separated cycle of them, or "random".
    #[arg(short, long, default_value = "random")]
    pub gesture: String,

    #[arg(short = 'n', long, default_value_t = 40)]
    pub frames: u64,

    /// Virtual time between frames.
    #[arg(long, default_value_t = 100)]
    pub interval_ms: u64,

    /// Frames each gesture is held in cycle/random mode.
    #[arg(long, default_value_t = 8)]
    pub hold_frames: u64,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,

    #[arg(long, default_value_t = SimulatedDetector::DEFAULT_NOISE)]
    pub noise: f64,

    /// Write the generated frames as a JSON recording.
    #[arg(long)]
    pub record: Option<String>,

    #[command(flatten)]
    pub engine: EngineConfig,
}

fn parse_script(arg: &str, hold_frames: u64) -> SfResult<GestureScript> {
    if arg.eq_ignore_ascii_case("random") {
        return Ok(GestureScript::Random { hold_frames });
    }

    let gestures = arg
        .split(',')
        .map(|s| {
            SimGesture::from_str(s.trim())
                .map_err(|_| SignForgeError::Config(format!("Unknown gesture '{}'", s.trim())))
        })
        .collect::<SfResult<Vec<_>>>()?;

    Ok(match gestures.as_slice() {
        [single] => GestureScript::Fixed(*single),
        _ => GestureScript::Cycle {
            gestures,
            hold_frames,
        },
    })
}

pub fn run(args: &SimulateArgs, config: EngineConfig) -> SfResult<()> {
    let script = parse_script(&args.gesture, args.hold_frames)?;
    let seed = args.seed.unwrap_or_else(|| fastrand::u64(..));
    info!("🎲 Simulating {} frames (seed {})", args.frames, seed);

    let clock = ManualClock::new(0);
    let session = RecognitionSession::with_clock(config, Box::new(clock.clone()))?;
    let mut detector = SimulatedDetector::new(script, seed).with_noise(args.noise);

    let mut steps = Vec::with_capacity(args.frames as usize);
    let mut recorded = Vec::new();
    let mut last_confirmed = None;

    for i in 0..args.frames {
        let t = i * args.interval_ms;
        clock.set(t);

        let detections = detector.next_detections();
        if args.record.is_some() {
            recorded.push(RecordedFrame {
                timestamp_ms: t,
                landmarks: select_dominant(&detections)
                    .map(|h| h.to_raw())
                    .unwrap_or_default(),
            });
        }

        let step = session.submit_detections(&detections)?;
        let confirmed = step.display.confirmed();
        if confirmed.is_some() && confirmed != last_confirmed {
            let resp = session.explain_current()?;
            info!("✅ {} [{}]", step.display.label(), detector.current());
            info!("   {}", resp.explanation.meaning);
        }
        last_confirmed = confirmed;
        steps.push(step);
    }

    reports::print_replay_table(&steps);

    if let Some(path) = &args.record {
        let writer = BufWriter::new(File::create(path)?);
        loader::write_json(&recorded, writer)?;
        info!("💾 Recording written to {}", path);
    }
    Ok(())
}
