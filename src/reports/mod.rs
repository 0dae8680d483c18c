use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use signforge::api::Recognition;
use signforge::engine::DisplayState;
use signforge::gestures::FrameOutcome;
use signforge::response::SignResponse;
use std::collections::BTreeMap;

fn confidence_cell(confidence: f64) -> Cell {
    let text = format!("{:.1}%", confidence * 100.0);
    if confidence > 0.8 {
        Cell::new(text).fg(Color::Green)
    } else if confidence > 0.6 {
        Cell::new(text).fg(Color::Yellow)
    } else {
        Cell::new(text).fg(Color::Red)
    }
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

pub fn print_classification_table(rows: &[(u64, FrameOutcome)]) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("t (ms)").add_attribute(Attribute::Bold),
        Cell::new("Label").add_attribute(Attribute::Bold),
        Cell::new("Conf"),
    ]);

    for (t, outcome) in rows {
        let label = match outcome {
            FrameOutcome::Gesture(_) => Cell::new(outcome.label()),
            _ => Cell::new(outcome.label()).fg(Color::Red),
        };
        table.add_row(vec![
            Cell::new(t).set_alignment(CellAlignment::Right),
            label,
            confidence_cell(outcome.confidence()).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("\n{}", table);
}

pub fn print_label_summary<'a>(labels: impl Iterator<Item = &'a str>) {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for label in labels {
        *counts.entry(label).or_default() += 1;
    }

    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Label").add_attribute(Attribute::Bold),
        Cell::new("Frames"),
    ]);
    if let Some(col) = table.column_mut(1) {
        col.set_cell_alignment(CellAlignment::Right);
    }
    for (label, n) in counts {
        table.add_row(vec![Cell::new(label), Cell::new(n)]);
    }
    println!("\n{}", table);
}

pub fn print_replay_table(steps: &[Recognition]) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("t (ms)").add_attribute(Attribute::Bold),
        Cell::new("Frame"),
        Cell::new("Conf"),
        Cell::new("Display").fg(Color::Cyan),
        Cell::new("Conf"),
    ]);

    for step in steps {
        let display = match step.display {
            DisplayState::Confirmed { .. } => Cell::new(step.display.label())
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
            DisplayState::Waiting => Cell::new(step.display.label()).fg(Color::DarkGrey),
            _ => Cell::new(step.display.label()),
        };

        table.add_row(vec![
            Cell::new(step.timestamp_ms).set_alignment(CellAlignment::Right),
            Cell::new(step.outcome.label()),
            confidence_cell(step.outcome.confidence()).set_alignment(CellAlignment::Right),
            display,
            confidence_cell(step.display.confidence()).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("\n{}", table);
}

pub fn print_explanation(resp: &SignResponse) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new(&resp.recognized.label).add_attribute(Attribute::Bold),
        Cell::new(resp.explanation.meaning),
    ]);
    table.add_row(vec![
        Cell::new("Context"),
        Cell::new(resp.explanation.context.join(", ")),
    ]);
    table.add_row(vec![
        Cell::new("Suggestions"),
        Cell::new(resp.explanation.suggestions.join("\n")),
    ]);
    println!("\n{}", table);
}
