// closed-form bit costs per match kind

use std::collections::BTreeMap;

use crate::data::tables::KeyboardClass;
use crate::data::Tables;
use crate::matcher::{Match, MatchKind};

/// combinations without repetition; k > n yields 0, saturates near u64::MAX
pub fn n_ck(mut n: u64, k: u64) -> u64 {
    if k > n {
        return 0;
    }
    let mut r: u64 = 1;
    for d in 1..=k {
        if r > u64::MAX / n {
            return u64::MAX;
        }
        r *= n;
        n -= 1;
        r /= d;
    }
    r
}

/// compute and cache the entropy of every candidate match
pub fn assign_entropies(matches: &mut [Match], password: &[u8], tables: &Tables) {
    for m in matches {
        m.entropy = match_entropy(m, password, tables);
    }
}

/// bit cost of a single match; deterministic and idempotent
pub fn match_entropy(m: &Match, password: &[u8], tables: &Tables) -> f64 {
    let token = &password[m.i..=m.j];
    match &m.kind {
        MatchKind::Dictionary { rank, .. } => {
            (*rank as f64).log2() + extra_uppercase_entropy(token)
        }
        MatchKind::L33t { rank, subs, .. } => {
            (*rank as f64).log2() + extra_uppercase_entropy(token) + extra_l33t_entropy(token, subs)
        }
        MatchKind::Spatial {
            graph_name,
            turns,
            shifted_count,
        } => spatial_entropy(m.span_len() as u64, graph_name, *turns, *shifted_count, tables),
        MatchKind::Repeat { .. } => {
            ((tables.bruteforce_cardinality(token) * token.len() as u64) as f64).log2()
        }
        MatchKind::Sequence {
            seq_name,
            seq_space,
            ascending,
        } => sequence_entropy(token, seq_name, *seq_space, *ascending),
        MatchKind::Digits => token.len() as f64 * 10f64.log2(),
        MatchKind::Year => 119f64.log2(),
        MatchKind::Date {
            year, separator, ..
        } => date_entropy(*year, separator),
        MatchKind::Bruteforce { cardinality } => {
            token.len() as f64 * (*cardinality as f64).log2()
        }
    }
}

/// extra bits for capitalisation patterns on a dictionary token.
/// common shapes (first-upper, last-upper, caps-lock) cost one bit; anything
/// else pays for the number of ways to place the uppercase letters.
fn extra_uppercase_entropy(token: &[u8]) -> f64 {
    let upper = token.iter().filter(|b| b.is_ascii_uppercase()).count() as u64;
    if upper == 0 {
        return 0.0;
    }
    let lower = token.iter().filter(|b| b.is_ascii_lowercase()).count() as u64;
    let first_upper = token.first().is_some_and(|b| b.is_ascii_uppercase());
    let last_upper = token.last().is_some_and(|b| b.is_ascii_uppercase());
    if lower == 0 || (upper == 1 && (first_upper || last_upper)) {
        return 1.0;
    }
    let mut possibilities: u64 = 0;
    for i in 0..=upper.min(lower) {
        possibilities = possibilities.saturating_add(n_ck(upper + lower, i));
    }
    (possibilities as f64).log2()
}

/// extra bits for the applied l33t substitutions: for each pair, the ways to
/// choose which of the substituted/unsubstituted occurrences were flipped
fn extra_l33t_entropy(token: &[u8], subs: &BTreeMap<char, char>) -> f64 {
    let lower = token.to_ascii_lowercase();
    let mut possibilities: u64 = 0;
    for (&leet, &orig) in subs {
        let subbed = lower.iter().filter(|&&b| b == leet as u8).count() as u64;
        let unsubbed = lower.iter().filter(|&&b| b == orig as u8).count() as u64;
        for i in 0..=subbed.min(unsubbed) {
            possibilities = possibilities.saturating_add(n_ck(subbed + unsubbed, i));
        }
    }
    if possibilities < 2 {
        return 1.0;
    }
    (possibilities as f64).log2()
}

/// bits for a keyboard walk: sum over possible lengths and turn counts of
/// starting position * degree^turns, using the class averages
fn spatial_entropy(
    length: u64,
    graph_name: &str,
    turns: u64,
    shifted_count: u64,
    tables: &Tables,
) -> f64 {
    let stats = tables.stats_for(KeyboardClass::of_name(graph_name));
    let s = stats.starting_positions;
    let d = stats.average_degree;

    let mut possibilities = 0f64;
    for l in 2..=length {
        let possible_turns = turns.min(l - 1);
        for t in 1..=possible_turns {
            possibilities += n_ck(l - 1, t - 1) as f64 * s * d.powi(t as i32);
        }
    }
    let mut entropy = possibilities.log2();

    if shifted_count > 0 {
        let unshifted = length - shifted_count;
        let mut shift_ways: u64 = 0;
        for i in 0..=shifted_count.min(unshifted) {
            shift_ways = shift_ways.saturating_add(n_ck(shifted_count + unshifted, i));
        }
        entropy += (shift_ways as f64).log2();
    }
    entropy
}

fn sequence_entropy(token: &[u8], seq_name: &str, seq_space: u64, ascending: bool) -> f64 {
    let first = token[0];
    let mut base = if first == b'a' || first == b'1' {
        1.0
    } else {
        let mut b = (seq_space as f64).log2();
        if seq_name == "upper" {
            b += 1.0;
        }
        b
    };
    if !ascending {
        base += 1.0;
    }
    base + (token.len() as f64).log2()
}

/// day * month * year-space, plus two bits when a separator is present
fn date_entropy(year: u16, separator: &str) -> f64 {
    let mut entropy = if year < 100 {
        (31f64 * 12.0 * 100.0).log2()
    } else {
        (31f64 * 12.0 * 119.0).log2()
    };
    if !separator.is_empty() {
        entropy += 2.0;
    }
    entropy
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::dates::DateScanners;
    use crate::matcher::dictionary::{CompiledDictionaries, UserInputs};
    use crate::matcher::omnimatch;

    fn tables() -> Tables {
        Tables::load().unwrap()
    }

    #[test]
    fn n_ck_basics() {
        assert_eq!(n_ck(0, 0), 1);
        assert_eq!(n_ck(5, 0), 1);
        assert_eq!(n_ck(5, 1), 5);
        assert_eq!(n_ck(5, 2), 10);
        assert_eq!(n_ck(10, 5), 252);
        assert_eq!(n_ck(3, 4), 0);
    }

    #[test]
    fn n_ck_saturates_instead_of_overflowing() {
        assert_eq!(n_ck(1000, 500), u64::MAX);
    }

    #[test]
    fn uppercase_all_lower_is_free() {
        assert_eq!(extra_uppercase_entropy(b"password"), 0.0);
    }

    #[test]
    fn uppercase_common_shapes_cost_one_bit() {
        assert_eq!(extra_uppercase_entropy(b"Password"), 1.0);
        assert_eq!(extra_uppercase_entropy(b"passworD"), 1.0);
        assert_eq!(extra_uppercase_entropy(b"PASSWORD"), 1.0);
    }

    #[test]
    fn uppercase_scattered_costs_more() {
        // 2 upper, 6 lower: log2(C(8,0) + C(8,1) + C(8,2)) = log2(37)
        let e = extra_uppercase_entropy(b"pAsSword");
        assert!((e - 37f64.log2()).abs() < 1e-9);
    }

    #[test]
    fn l33t_single_substitution_is_one_bit() {
        let subs: BTreeMap<char, char> = [('@', 'a')].into_iter().collect();
        assert_eq!(extra_l33t_entropy(b"p@ssword", &subs), 1.0);
    }

    #[test]
    fn l33t_mixed_occurrences_cost_more() {
        // "p@ass": one '@' substituted, one 'a' left alone:
        // C(2,0) + C(2,1) = 3 ways
        let subs: BTreeMap<char, char> = [('@', 'a')].into_iter().collect();
        let e = extra_l33t_entropy(b"p@ass", &subs);
        assert!((e - 3f64.log2()).abs() < 1e-9);
    }

    #[test]
    fn sequence_entropy_obvious_start_is_cheap() {
        let ascending = sequence_entropy(b"abcd", "lower", 26, true);
        assert!((ascending - (1.0 + 4f64.log2())).abs() < 1e-9);
        let from_middle = sequence_entropy(b"jklm", "lower", 26, true);
        assert!(from_middle > ascending);
    }

    #[test]
    fn sequence_entropy_descending_penalty() {
        let asc = sequence_entropy(b"abcd", "lower", 26, true);
        let desc = sequence_entropy(b"dcba", "lower", 26, false);
        assert!((desc - (asc + 1.0)).abs() < 1e-9 || desc > asc);
    }

    #[test]
    fn year_and_digits_entropy() {
        let t = tables();
        let dicts = CompiledDictionaries::compile(&t.frequency_lists).unwrap();
        let scanners = DateScanners::compile().unwrap();
        let user = UserInputs::new(&[]);
        let matches = omnimatch(b"1990", &t, &dicts, &scanners, &user);
        let year = matches
            .iter()
            .find(|m| matches!(m.kind, MatchKind::Year))
            .unwrap();
        let digits = matches
            .iter()
            .find(|m| matches!(m.kind, MatchKind::Digits))
            .unwrap();
        let ye = match_entropy(year, b"1990", &t);
        let de = match_entropy(digits, b"1990", &t);
        assert!((ye - 119f64.log2()).abs() < 1e-9);
        assert!((de - 4.0 * 10f64.log2()).abs() < 1e-9);
    }

    #[test]
    fn date_entropy_separator_costs_two_bits() {
        let without = date_entropy(1990, "");
        let with = date_entropy(1990, "-");
        assert!((with - without - 2.0).abs() < 1e-9);
    }

    #[test]
    fn spatial_entropy_grows_with_turns() {
        let t = tables();
        let one = spatial_entropy(6, "qwerty", 1, 0, &t);
        let three = spatial_entropy(6, "qwerty", 3, 0, &t);
        assert!(three > one);
        assert!(one > 0.0);
    }

    #[test]
    fn spatial_entropy_shift_penalty() {
        let t = tables();
        let plain = spatial_entropy(6, "qwerty", 2, 0, &t);
        let shifted = spatial_entropy(6, "qwerty", 2, 2, &t);
        assert!(shifted > plain);
    }

    #[test]
    fn entropy_is_idempotent() {
        let t = tables();
        let dicts = CompiledDictionaries::compile(&t.frequency_lists).unwrap();
        let scanners = DateScanners::compile().unwrap();
        let user = UserInputs::new(&[]);
        let pw = b"p@ssword1990";
        let matches = omnimatch(pw, &t, &dicts, &scanners, &user);
        for m in &matches {
            let a = match_entropy(m, pw, &t);
            let b = match_entropy(m, pw, &t);
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }
}
