//! Terminal output formatting with colors and box drawing.

use colored::Colorize;

use experiment_terminator_core::constants::DEFAULT_HISTOGRAM_BINS;
use experiment_terminator_core::statistics::Histogram;
use experiment_terminator_core::{Analysis, ArmObservation, LiftSampleSet, TerminationDecision};

/// Format an Analysis for human-readable terminal output.
///
/// Echoes each arm's input counts, then shows rates and probabilities to
/// four decimals and the lift as a percentage to two. The decision is
/// repeated below the box as a one-line conclusion.
pub fn format_analysis(analysis: &Analysis) -> String {
    let result = &analysis.result;

    let header = match analysis.decision {
        TerminationDecision::Continue => format!(
            "{} {}",
            "\u{25CF}".yellow().bold(),
            "CONTINUE".yellow().bold()
        ),
        decision => format!(
            "{} {} ({})",
            "\u{2713}".green().bold(),
            "TERMINATE".green().bold(),
            decision.conclusion().unwrap_or_default()
        ),
    };

    let mut report = ReportBox::new();
    report.row(header);
    report.rule();

    report.row(format!("Control: {}", format_counts(&analysis.control)));
    report.row(format!("Test:    {}", format_counts(&analysis.test)));
    report.rule();

    report.row(format!("Control rate:           {:.4}", result.control_rate));
    report.row(format!("Test rate:              {:.4}", result.test_rate));
    report.rule();

    let lift = format!("Estimated lift:         {:+.2}%", result.expected_lift * 100.0);
    report.row(if result.expected_lift > 0.0 {
        lift.green().to_string()
    } else if result.expected_lift < 0.0 {
        lift.red().to_string()
    } else {
        lift
    });
    report.row(format!(
        "P(test > control):      {:.4}",
        result.prob_test_beats_control
    ));
    report.row(format!(
        "P(significant at end):  {:.4}",
        result.prob_significance_at_end
    ));
    if result.lift_samples.excluded > 0 {
        // The mean is unreliable once near-zero control draws appear
        report.row(
            format!(
                "Excluded lift draws:    {}",
                result.lift_samples.excluded
            )
            .yellow()
            .to_string(),
        );
        report.row(format!(
            "Median lift:            {:+.2}%",
            result.lift_samples.median() * 100.0
        ));
    }
    report.rule();

    report.row(match analysis.seed {
        Some(seed) => format!("Samples: {} (seed {})", analysis.samples, seed),
        None => format!("Samples: {}", analysis.samples),
    });
    report.row(format!("Elapsed: {:.2} s", analysis.elapsed_secs));

    let conclusion = analysis.decision.to_string();
    let conclusion = if analysis.decision.is_terminable() {
        conclusion.green().bold()
    } else {
        conclusion.yellow().bold()
    };

    format!("{}\n{}\n", report.finish(), conclusion)
}

fn format_counts(obs: &ArmObservation) -> String {
    format!(
        "{} planned, {} completed, {} successes",
        obs.planned_trials, obs.completed_trials, obs.successes
    )
}

/// Format a text histogram of the lift samples.
///
/// Uses at most `max_bins` equal-width bins (30 when `None`). Bin edges are
/// shown as percentages.
pub fn format_lift_histogram(samples: &LiftSampleSet, max_bins: Option<usize>) -> String {
    let histogram = Histogram::from_samples(
        samples.values(),
        max_bins.unwrap_or(DEFAULT_HISTOGRAM_BINS),
    );

    let mut output = String::new();
    output.push_str(&format!("{}\n", "Lift distribution:".bold()));

    if histogram.bins.is_empty() {
        output.push_str(&format!("  {}\n", "(no lift samples)".dimmed()));
        return output;
    }

    let max_count = histogram.max_count().max(1);
    for bin in &histogram.bins {
        let bar_len = (bin.count * HISTOGRAM_BAR_WIDTH).div_ceil(max_count);
        output.push_str(&format!(
            "  {:>9.2}% .. {:>9.2}% \u{2502}{} {}\n",
            bin.lower * 100.0,
            bin.upper * 100.0,
            "\u{2588}".repeat(bar_len).cyan(),
            bin.count
        ));
    }

    output
}

const HISTOGRAM_BAR_WIDTH: usize = 40;

/// Inner width of the report box, excluding borders.
const REPORT_WIDTH: usize = 56;

/// Accumulates rows of a single-column box report.
struct ReportBox {
    body: String,
}

impl ReportBox {
    fn new() -> Self {
        Self {
            body: Self::border('\u{250C}', '\u{2510}'),
        }
    }

    fn border(left: char, right: char) -> String {
        let mut line = String::with_capacity(REPORT_WIDTH * 3 + 8);
        line.push(left);
        line.extend(std::iter::repeat('\u{2500}').take(REPORT_WIDTH));
        line.push(right);
        line.push('\n');
        line
    }

    /// Add a row, padded so the right border lines up despite color codes.
    fn row(&mut self, content: impl AsRef<str>) {
        let content = content.as_ref();
        let pad = (REPORT_WIDTH - 2).saturating_sub(visible_width(content));
        self.body.push_str(&format!(
            "\u{2502} {content}{:pad$} \u{2502}\n",
            ""
        ));
    }

    /// Add a horizontal divider.
    fn rule(&mut self) {
        self.body.push_str(&Self::border('\u{251C}', '\u{2524}'));
    }

    fn finish(mut self) -> String {
        self.body.push_str(&Self::border('\u{2514}', '\u{2518}'));
        self.body
    }
}

/// Number of printed characters, skipping ANSI SGR sequences (`ESC [ ... m`).
fn visible_width(s: &str) -> usize {
    let mut width = 0;
    let mut in_escape = false;
    for c in s.chars() {
        match (in_escape, c) {
            (false, '\x1b') => in_escape = true,
            (false, _) => width += 1,
            (true, 'm') => in_escape = false,
            (true, _) => {}
        }
    }
    width
}
