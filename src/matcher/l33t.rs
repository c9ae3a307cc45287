// l33t substitution discovery: dictionary words hidden behind lookalike symbols

use std::collections::BTreeMap;

use crate::data::Tables;

use super::dictionary::{CompiledDictionaries, UserInputs};
use super::{Match, MatchKind};

/// the l33t table restricted to (original -> leet chars) pairs whose leet
/// chars actually occur in the password
fn relevant_subtable(password: &[u8], tables: &Tables) -> Vec<(u8, Vec<u8>)> {
    tables
        .l33t_table
        .iter()
        .filter_map(|&(orig, leets)| {
            let present: Vec<u8> = leets
                .iter()
                .copied()
                .filter(|l| password.contains(l))
                .collect();
            if present.is_empty() {
                None
            } else {
                Some((orig, present))
            }
        })
        .collect()
}

/// enumerate every single-valued substitution: one original letter chosen per
/// leet character, the full cartesian product driven as an odometer
fn enumerate_subs(subtable: &[(u8, Vec<u8>)]) -> Vec<BTreeMap<u8, u8>> {
    // invert to leet char -> candidate originals
    let mut leet_keys: Vec<u8> = Vec::new();
    let mut options: Vec<Vec<u8>> = Vec::new();
    for (orig, leets) in subtable {
        for &leet in leets {
            match leet_keys.iter().position(|&k| k == leet) {
                Some(idx) => options[idx].push(*orig),
                None => {
                    leet_keys.push(leet);
                    options.push(vec![*orig]);
                }
            }
        }
    }

    let mut subs = Vec::new();
    let mut counters = vec![0usize; leet_keys.len()];
    loop {
        let sub: BTreeMap<u8, u8> = counters
            .iter()
            .enumerate()
            .map(|(key_idx, &choice)| (leet_keys[key_idx], options[key_idx][choice]))
            .collect();
        subs.push(sub);

        let mut pos = 0;
        loop {
            if pos == counters.len() {
                return subs;
            }
            counters[pos] += 1;
            if counters[pos] < options[pos].len() {
                break;
            }
            counters[pos] = 0;
            pos += 1;
        }
    }
}

/// replace every leet char by its chosen original
fn translate(password: &[u8], sub: &BTreeMap<u8, u8>) -> Vec<u8> {
    password
        .iter()
        .map(|b| sub.get(b).copied().unwrap_or(*b))
        .collect()
}

pub fn l33t_match(
    password: &[u8],
    tables: &Tables,
    dicts: &CompiledDictionaries,
    user: &UserInputs,
) -> Vec<Match> {
    let subtable = relevant_subtable(password, tables);
    if subtable.is_empty() {
        return Vec::new();
    }

    let mut results = Vec::new();
    for sub in enumerate_subs(&subtable) {
        if sub.is_empty() {
            continue;
        }
        let translated = translate(password, &sub);
        let mut hits = dicts.hits(&translated);
        hits.extend(user.hits(&translated));
        for hit in hits {
            let token = &password[hit.i..=hit.j];
            // a token identical to the matched word carries no substitution
            // and would duplicate the plain dictionary match
            if token.to_ascii_lowercase() == hit.matched_word.as_bytes() {
                continue;
            }
            let applied: BTreeMap<char, char> = sub
                .iter()
                .filter(|&(leet, _)| token.contains(leet))
                .map(|(&leet, &orig)| (leet as char, orig as char))
                .collect();
            let sub_display = applied
                .iter()
                .map(|(leet, orig)| format!("{} -> {}", leet, orig))
                .collect::<Vec<_>>()
                .join(", ");
            results.push(Match::new(
                MatchKind::L33t {
                    dict_name: hit.dict_name,
                    matched_word: hit.matched_word,
                    rank: hit.rank,
                    subs: applied,
                    sub_display,
                },
                hit.i,
                hit.j,
                password,
            ));
        }
    }
    results
}
