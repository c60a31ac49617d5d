use serde::Serialize;

use crate::types::{BarResult, Notice, Solution};

const MAX_WIDTH: f64 = 80.0;

/// Structured form of a solution, as returned by the server and `--json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub raw_length: u32,
    pub bars: Vec<BarResult>,
    pub bar_count: usize,
    pub total_waste: u64,
    pub utilization_percent: f64,
    pub lower_bound: usize,
    pub notices: Vec<Notice>,
}

impl From<&Solution> for Report {
    fn from(sol: &Solution) -> Self {
        Self {
            raw_length: sol.raw_length,
            bars: sol.bars.clone(),
            bar_count: sol.bar_count(),
            total_waste: sol.total_waste(),
            utilization_percent: sol.utilization_percent(),
            lower_bound: sol.lower_bound(),
            notices: sol.notices.clone(),
        }
    }
}

/// Human-readable report: cuts and waste per bar, then the totals.
pub fn render_text(sol: &Solution, layout: bool) -> String {
    let mut out = String::new();
    for notice in &sol.notices {
        out.push_str(&format!("Note: {notice}\n"));
    }

    out.push_str("Cuts per bar:\n");
    for (i, bar) in sol.bars.iter().enumerate() {
        out.push_str(&format!(
            "Bar {}: {:?} (waste: {})\n",
            i + 1,
            bar.cuts,
            bar.waste
        ));
        if layout {
            out.push_str("  ");
            out.push_str(&render_bar(sol.raw_length, bar));
            out.push('\n');
        }
    }

    out.push('\n');
    out.push_str(&format!("Raw bar length: {}\n", sol.raw_length));
    out.push_str(&format!(
        "Bars used: {} (lower bound {})\n",
        sol.bar_count(),
        sol.lower_bound()
    ));
    out.push_str(&format!("Total waste: {}\n", sol.total_waste()));
    out.push_str(&format!(
        "Material utilization: {:.1} %\n",
        sol.utilization_percent()
    ));
    out
}

/// One-line drawing of a bar, each cut scaled to its share of `raw_length`.
///
/// Cuts are bracketed `|` segments labelled with their length where the
/// label fits; the waste is drawn as `.`.
pub fn render_bar(raw_length: u32, bar: &BarResult) -> String {
    if raw_length == 0 {
        return String::new();
    }
    let scale = MAX_WIDTH / raw_length as f64;
    let mut line = String::from("|");
    let mut drawn = 0usize;
    let mut used = 0u64;

    for &cut in &bar.cuts {
        used += cut as u64;
        // Position by cumulative length so rounding never drifts past the bar
        let end = (used as f64 * scale).round() as usize;
        let w = end.saturating_sub(drawn);
        drawn = end;
        if w == 0 {
            continue;
        }

        let label = cut.to_string();
        let inner = w - 1;
        if label.len() <= inner {
            let pad = inner - label.len();
            line.push_str(&"=".repeat(pad / 2));
            line.push_str(&label);
            line.push_str(&"=".repeat(pad - pad / 2));
        } else {
            line.push_str(&"=".repeat(inner));
        }
        line.push('|');
    }

    let total = MAX_WIDTH.round() as usize;
    line.push_str(&".".repeat(total.saturating_sub(drawn)));
    line
}
