// minimum-entropy cover and crack-time scoring

pub mod entropy;

use crate::config::CrackTimeParams;
use crate::data::Tables;
use crate::matcher::{Match, MatchKind};
use crate::Estimate;

/// pick the single cheapest-to-guess decomposition of the password.
///
/// dynamic program over end indices: `up_to[k]` is the minimum entropy of
/// any cover of `password[..=k]`, either extending a brute-force span by one
/// character or ending with a candidate match at `k`. gaps in the winning
/// sequence become brute-force matches over the whole-password alphabet.
pub fn minimum_entropy_match_sequence(
    password: &[u8],
    mut candidates: Vec<Match>,
    tables: &Tables,
    params: &CrackTimeParams,
) -> Estimate {
    let n = password.len();
    if n == 0 {
        return Estimate {
            password: String::new(),
            entropy: 0.0,
            crack_time_seconds: 0,
            crack_time_display: display_time(0),
            score: 0,
            matches: Vec::new(),
            calc_time_ms: 0,
        };
    }

    entropy::assign_entropies(&mut candidates, password, tables);

    let cardinality = tables.bruteforce_cardinality(password);
    let lg_card = (cardinality as f64).log2();

    let mut up_to = vec![0f64; n];
    let mut back: Vec<isize> = vec![-1; n];
    for k in 0..n {
        up_to[k] = if k > 0 { up_to[k - 1] } else { 0.0 } + lg_card;
        for (idx, m) in candidates.iter().enumerate() {
            if m.j != k {
                continue;
            }
            let prev = if m.i > 0 { up_to[m.i - 1] } else { 0.0 };
            if prev + m.entropy < up_to[k] {
                up_to[k] = prev + m.entropy;
                back[k] = idx as isize;
            }
        }
    }

    // walk backwards over the chosen endpoints
    let mut chosen: Vec<Match> = Vec::new();
    let mut k = n as isize - 1;
    while k >= 0 {
        let b = back[k as usize];
        if b >= 0 {
            let m = candidates[b as usize].clone();
            k = m.i as isize - 1;
            chosen.push(m);
        } else {
            k -= 1;
        }
    }
    chosen.reverse();

    // fill uncovered spans with brute-force matches
    let bruteforce = |i: usize, j: usize| -> Match {
        let mut m = Match::new(MatchKind::Bruteforce { cardinality }, i, j, password);
        m.entropy = m.span_len() as f64 * lg_card;
        m
    };
    let mut matches: Vec<Match> = Vec::new();
    let mut pos = 0;
    for m in chosen {
        if m.i > pos {
            matches.push(bruteforce(pos, m.i - 1));
        }
        pos = m.j + 1;
        matches.push(m);
    }
    if pos < n {
        matches.push(bruteforce(pos, n - 1));
    }

    let total_entropy = up_to[n - 1];
    let seconds = entropy_to_crack_time(total_entropy, params);
    Estimate {
        password: String::new(),
        entropy: total_entropy,
        crack_time_seconds: seconds,
        crack_time_display: display_time(seconds),
        score: crack_time_to_score(seconds),
        matches,
        calc_time_ms: 0,
    }
}

/// seconds for half the search space under the parameterised threat model,
/// floored to a whole number (saturating on astronomic entropies)
pub fn entropy_to_crack_time(entropy: f64, params: &CrackTimeParams) -> u64 {
    (0.5 * entropy.exp2() * (params.single_guess / params.num_attackers as f64)) as u64
}

/// coarse 0..4 bucket by crack-time seconds
pub fn crack_time_to_score(seconds: u64) -> u8 {
    if seconds < 100 {
        0
    } else if seconds < 10_000 {
        1
    } else if seconds < 1_000_000 {
        2
    } else if seconds < 100_000_000 {
        3
    } else {
        4
    }
}

/// human-readable duration, rounded up except for "instant"
pub fn display_time(seconds: u64) -> String {
    const MINUTE: u64 = 60;
    const HOUR: u64 = MINUTE * 60;
    const DAY: u64 = HOUR * 24;
    const MONTH: u64 = DAY * 31;
    const YEAR: u64 = MONTH * 12;
    const CENTURY: u64 = YEAR * 100;

    if seconds < MINUTE {
        "instant".to_string()
    } else if seconds < HOUR {
        format!("{} minutes", seconds.div_ceil(MINUTE))
    } else if seconds < DAY {
        format!("{} hours", seconds.div_ceil(HOUR))
    } else if seconds < MONTH {
        format!("{} days", seconds.div_ceil(DAY))
    } else if seconds < YEAR {
        format!("{} months", seconds.div_ceil(MONTH))
    } else if seconds < CENTURY {
        format!("{} years", seconds.div_ceil(YEAR))
    } else {
        "centuries".to_string()
    }
}
