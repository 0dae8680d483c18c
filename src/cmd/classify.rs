use crate::reports;
use clap::Args;
use serde::Serialize;
use signforge::classifier;
use signforge::gestures::FrameOutcome;
use signforge::loader;
use signforge::SfResult;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct ClassifyArgs {
    /// Recording to classify (.json or .csv).
    pub file: String,

    /// Print JSON instead of a table.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Serialize)]
struct ClassifiedFrame {
    t: u64,
    label: &'static str,
    confidence: f64,
    outcome: FrameOutcome,
}

pub fn run(args: &ClassifyArgs) -> SfResult<()> {
    let frames = loader::load_recording(&args.file)?;
    info!("🔎 Classifying {} frames from {}", frames.len(), args.file);

    let raw: Vec<_> = frames.iter().map(|f| f.landmarks.clone()).collect();
    let outcomes = classifier::classify_batch(&raw);

    let rows: Vec<(u64, FrameOutcome)> = frames
        .iter()
        .map(|f| f.timestamp_ms)
        .zip(outcomes)
        .collect();

    if args.json {
        let out: Vec<ClassifiedFrame> = rows
            .iter()
            .map(|(t, o)| ClassifiedFrame {
                t: *t,
                label: o.label(),
                confidence: o.confidence(),
                outcome: *o,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        reports::print_classification_table(&rows);
        reports::print_label_summary(rows.iter().map(|(_, o)| o.label()));
    }
    Ok(())
}
