//! Reading and writing recorded landmark sessions.
//!
//! JSON: `[{"t": <ms>, "landmarks": [[x, y, z], ...]}, ...]`.
//! CSV:  `t, x0, y0, z0, ..., x20, y20, z20` per row, flexible length.
//! Non-numeric or blank coordinates are kept as NaN so the classifier
//! reports the frame as Invalid Data instead of failing the whole file.

use crate::error::{SfResult, SignForgeError};
use crate::landmarks::RawFrame;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordedFrame {
    #[serde(rename = "t")]
    pub timestamp_ms: u64,
    pub landmarks: RawFrame,
}

#[derive(Deserialize)]
struct JsonFrame {
    #[serde(alias = "timestamp")]
    t: u64,
    #[serde(default)]
    landmarks: Vec<serde_json::Value>,
}

/// A point that is not an array becomes a single NaN coordinate, so the
/// frame keeps its point count and classifies as Invalid Data.
fn json_point(value: serde_json::Value) -> Vec<f64> {
    match value {
        serde_json::Value::Array(coords) => coords
            .iter()
            .map(|v| v.as_f64().unwrap_or(f64::NAN))
            .collect(),
        _ => vec![f64::NAN],
    }
}

pub fn load_recording<P: AsRef<Path>>(path: P) -> SfResult<Vec<RecordedFrame>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        SignForgeError::Io(std::io::Error::new(
            e.kind(),
            format!("Could not open recording '{}': {}", path.display(), e),
        ))
    })?;
    let reader = BufReader::new(file);

    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));

    let frames = if is_csv {
        read_csv(reader)?
    } else {
        read_json(reader)?
    };
    debug!("Loaded {} frames from {}", frames.len(), path.display());
    Ok(frames)
}

pub fn read_json<R: Read>(reader: R) -> SfResult<Vec<RecordedFrame>> {
    let raw: Vec<JsonFrame> = serde_json::from_reader(reader)?;
    Ok(raw
        .into_iter()
        .map(|f| RecordedFrame {
            timestamp_ms: f.t,
            landmarks: f.landmarks.into_iter().map(json_point).collect(),
        })
        .collect())
}

pub fn read_csv<R: Read>(reader: R) -> SfResult<Vec<RecordedFrame>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut frames = Vec::new();
    let mut skipped = 0;

    for (row_idx, result) in rdr.records().enumerate() {
        let rec = result?;
        let Some(first) = rec.get(0) else {
            continue;
        };

        let timestamp_ms: u64 = match first.parse() {
            Ok(t) => t,
            Err(_) => {
                // Header row or garbage; only the first row is allowed to be a header.
                if row_idx > 0 {
                    skipped += 1;
                }
                continue;
            }
        };

        // Trailing blanks are padding; interior blanks are missing values.
        let mut cells: Vec<&str> = rec.iter().skip(1).collect();
        while cells.last().is_some_and(|s| s.is_empty()) {
            cells.pop();
        }
        let coords: Vec<f64> = cells
            .iter()
            .map(|s| s.parse().unwrap_or(f64::NAN))
            .collect();

        frames.push(RecordedFrame {
            timestamp_ms,
            landmarks: coords.chunks(3).map(|c| c.to_vec()).collect(),
        });
    }

    if skipped > 0 {
        warn!("Skipped {} CSV rows without a numeric timestamp", skipped);
    }
    Ok(frames)
}

pub fn write_json<W: Write>(frames: &[RecordedFrame], writer: W) -> SfResult<()> {
    serde_json::to_writer_pretty(writer, frames)?;
    Ok(())
}
