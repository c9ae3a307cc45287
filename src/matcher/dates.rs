// digit runs, years, and calendar dates

use regex::bytes::Regex;

use super::{Match, MatchKind};

const MIN_YEAR: u16 = 1900;
const MAX_YEAR: u16 = 2019;

/// compiled scanners for the digit-based matchers
pub struct DateScanners {
    digits: Regex,
    year: Regex,
    date_candidate: Regex,
    /// `day sep month sep year`; the two separator groups must agree
    date_year_suffix: Regex,
    /// `year sep month sep day`; the two separator groups must agree
    date_year_prefix: Regex,
}

impl DateScanners {
    pub fn compile() -> Result<DateScanners, String> {
        let compile = |pattern: &str| {
            Regex::new(pattern).map_err(|e| format!("failed to compile scanner '{}': {}", pattern, e))
        };
        Ok(DateScanners {
            digits: compile(r"\d{3,}")?,
            year: compile(r"19\d\d|200\d|201\d")?,
            date_candidate: compile(r"\d{4,8}")?,
            date_year_suffix: compile(
                r"(\d{1,2})([\s\-/\\_.])(\d{1,2})([\s\-/\\_.])(19\d{2}|200\d|201\d|\d{2})",
            )?,
            date_year_prefix: compile(
                r"(19\d{2}|200\d|201\d|\d{2})([\s\-/\\_.])(\d{1,2})([\s\-/\\_.])(\d{1,2})",
            )?,
        })
    }
}

/// maximal digit runs of length >= 3
pub fn digits_match(password: &[u8], scanners: &DateScanners) -> Vec<Match> {
    scanners
        .digits
        .find_iter(password)
        .map(|m| Match::new(MatchKind::Digits, m.start(), m.end() - 1, password))
        .collect()
}

/// non-overlapping years 1900..=2019
pub fn year_match(password: &[u8], scanners: &DateScanners) -> Vec<Match> {
    scanners
        .year
        .find_iter(password)
        .map(|m| Match::new(MatchKind::Year, m.start(), m.end() - 1, password))
        .collect()
}

/// dates with and without separator
pub fn date_match(password: &[u8], scanners: &DateScanners) -> Vec<Match> {
    let mut results = date_without_sep_match(password, scanners);
    results.extend(date_sep_match(password, scanners));
    results
}

/// tolerate swapped day/month, then validate ranges.
/// returns the (year, month, day) actually believed.
fn check_date(year: u16, mut month: u16, mut day: u16) -> Option<(u16, u8, u8)> {
    if (12..=31).contains(&month) && day <= 12 {
        std::mem::swap(&mut month, &mut day);
    }
    if day > 31 || month > 12 {
        return None;
    }
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return None;
    }
    Some((year, month as u8, day as u8))
}

fn parse_digits(bytes: &[u8]) -> u16 {
    bytes.iter().fold(0u16, |acc, &b| {
        acc.saturating_mul(10).saturating_add((b - b'0') as u16)
    })
}

/// digit runs of length 4..8: enumerate year placements (2-digit on short
/// runs, 4-digit on long) and day-month splits; every candidate that
/// validates becomes a match
fn date_without_sep_match(password: &[u8], scanners: &DateScanners) -> Vec<Match> {
    let mut results = Vec::new();
    for m in scanners.date_candidate.find_iter(password) {
        let token = m.as_bytes();
        let len = token.len();
        let mut candidates: Vec<(u16, &[u8])> = Vec::new();
        if len <= 6 {
            // 2-digit year, prefix or suffix
            candidates.push((parse_digits(&token[..2]), &token[2..]));
            candidates.push((parse_digits(&token[len - 2..]), &token[..len - 2]));
        }
        if len >= 6 {
            // 4-digit year, prefix or suffix
            candidates.push((parse_digits(&token[..4]), &token[4..]));
            candidates.push((parse_digits(&token[len - 4..]), &token[..len - 4]));
        }
        for (year, daymonth) in candidates {
            for (month, day) in daymonth_splits(daymonth) {
                if let Some((year, month, day)) = check_date(year, month, day) {
                    results.push(Match::new(
                        MatchKind::Date {
                            year,
                            month,
                            day,
                            separator: String::new(),
                        },
                        m.start(),
                        m.end() - 1,
                        password,
                    ));
                }
            }
        }
    }
    results
}

/// (month, day) split candidates of a 2..4 digit day-month block
fn daymonth_splits(daymonth: &[u8]) -> Vec<(u16, u16)> {
    match daymonth.len() {
        2 => vec![(parse_digits(&daymonth[..1]), parse_digits(&daymonth[1..]))],
        3 => vec![
            (parse_digits(&daymonth[..2]), parse_digits(&daymonth[2..])),
            (parse_digits(&daymonth[..1]), parse_digits(&daymonth[1..])),
        ],
        4 => vec![(parse_digits(&daymonth[..2]), parse_digits(&daymonth[2..]))],
        _ => Vec::new(),
    }
}

/// separator-delimited dates, year first or last. both separators are
/// captured and must agree, standing in for a backreference.
fn date_sep_match(password: &[u8], scanners: &DateScanners) -> Vec<Match> {
    let mut results = Vec::new();
    for caps in scanners.date_year_suffix.captures_iter(password) {
        let (sep1, sep2) = (&caps[2], &caps[4]);
        if sep1 != sep2 {
            continue;
        }
        let (day, month, year) = (
            parse_digits(&caps[1]),
            parse_digits(&caps[3]),
            parse_digits(&caps[5]),
        );
        push_sep_date(&mut results, password, &caps, year, month, day, sep1[0]);
    }
    for caps in scanners.date_year_prefix.captures_iter(password) {
        let (sep1, sep2) = (&caps[2], &caps[4]);
        if sep1 != sep2 {
            continue;
        }
        let (year, month, day) = (
            parse_digits(&caps[1]),
            parse_digits(&caps[3]),
            parse_digits(&caps[5]),
        );
        push_sep_date(&mut results, password, &caps, year, month, day, sep1[0]);
    }
    results
}

fn push_sep_date(
    results: &mut Vec<Match>,
    password: &[u8],
    caps: &regex::bytes::Captures,
    year: u16,
    month: u16,
    day: u16,
    separator: u8,
) {
    let Some((year, month, day)) = check_date(year, month, day) else {
        return;
    };
    let Some(whole) = caps.get(0) else {
        return;
    };
    results.push(Match::new(
        MatchKind::Date {
            year,
            month,
            day,
            separator: (separator as char).to_string(),
        },
        whole.start(),
        whole.end() - 1,
        password,
    ));
}
