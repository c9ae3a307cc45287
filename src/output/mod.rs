// estimate rendering: text report and json

use crate::matcher::MatchKind;
use crate::Estimate;

/// multi-line human-readable report
pub fn render_text(estimate: &Estimate) -> String {
    let mut out = String::new();
    out.push_str(&format!("password:   {}\n", estimate.password));
    out.push_str(&format!("entropy:    {:.3} bits\n", estimate.entropy));
    out.push_str(&format!(
        "crack time: {} ({} seconds)\n",
        estimate.crack_time_display, estimate.crack_time_seconds
    ));
    out.push_str(&format!("score:      {} / 4\n", estimate.score));
    if !estimate.matches.is_empty() {
        out.push_str("matches:\n");
        for m in &estimate.matches {
            out.push_str(&format!(
                "  [{:>2}..{:<2}] {:<24} {:>7.3} bits  {}\n",
                m.i,
                m.j,
                describe(&m.kind),
                m.entropy,
                m.token
            ));
        }
    }
    out
}

/// short per-match description for the text report
fn describe(kind: &MatchKind) -> String {
    match kind {
        MatchKind::Dictionary {
            dict_name, rank, ..
        } => format!("dictionary {} #{}", dict_name, rank),
        MatchKind::L33t {
            dict_name,
            rank,
            sub_display,
            ..
        } => format!("l33t {} #{} ({})", dict_name, rank, sub_display),
        MatchKind::Spatial {
            graph_name, turns, ..
        } => format!("spatial {} turns={}", graph_name, turns),
        MatchKind::Repeat { repeated_char } => format!("repeat '{}'", repeated_char),
        MatchKind::Sequence {
            seq_name,
            ascending,
            ..
        } => format!(
            "sequence {} {}",
            seq_name,
            if *ascending { "asc" } else { "desc" }
        ),
        MatchKind::Digits => "digits".to_string(),
        MatchKind::Year => "year".to_string(),
        MatchKind::Date {
            year,
            month,
            day,
            separator,
        } => {
            if separator.is_empty() {
                format!("date {:04}-{:02}-{:02}", year, month, day)
            } else {
                format!("date {:04}-{:02}-{:02} sep '{}'", year, month, day, separator)
            }
        }
        MatchKind::Bruteforce { cardinality } => format!("bruteforce |{}|", cardinality),
    }
}

/// serialize the full estimate, matches included
pub fn render_json(estimate: &Estimate) -> Result<String, String> {
    serde_json::to_string_pretty(estimate).map_err(|e| format!("failed to serialize: {}", e))
}
