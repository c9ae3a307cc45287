// candidate pattern matches over a password

pub mod dates;
pub mod dictionary;
pub mod l33t;
pub mod repeats;
pub mod spatial;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::data::Tables;
use dates::DateScanners;
use dictionary::{CompiledDictionaries, UserInputs};

/// pattern-specific payload of a match
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "pattern", rename_all = "snake_case")]
pub enum MatchKind {
    Dictionary {
        dict_name: String,
        matched_word: String,
        rank: u64,
    },
    L33t {
        dict_name: String,
        matched_word: String,
        rank: u64,
        subs: BTreeMap<char, char>,
        sub_display: String,
    },
    Spatial {
        graph_name: String,
        turns: u64,
        shifted_count: u64,
    },
    Repeat {
        repeated_char: char,
    },
    Sequence {
        seq_name: &'static str,
        seq_space: u64,
        ascending: bool,
    },
    Digits,
    Year,
    Date {
        year: u16,
        month: u8,
        day: u8,
        separator: String,
    },
    Bruteforce {
        cardinality: u64,
    },
}

/// one candidate match over the inclusive byte span [i..=j]
#[derive(Debug, Clone, Serialize)]
pub struct Match {
    #[serde(flatten)]
    pub kind: MatchKind,
    pub i: usize,
    pub j: usize,
    pub token: String,
    pub entropy: f64,
}

impl Match {
    pub(crate) fn new(kind: MatchKind, i: usize, j: usize, password: &[u8]) -> Match {
        Match {
            kind,
            i,
            j,
            token: String::from_utf8_lossy(&password[i..=j]).into_owned(),
            entropy: 0.0,
        }
    }

    /// span length in bytes (token length for ASCII input)
    pub fn span_len(&self) -> usize {
        self.j - self.i + 1
    }
}

/// run every matcher and return the candidates sorted by (i, j).
/// overlaps are expected and no deduplication happens; the cover solver
/// picks the cheapest explanation.
pub fn omnimatch(
    password: &[u8],
    tables: &Tables,
    dicts: &CompiledDictionaries,
    scanners: &DateScanners,
    user: &UserInputs,
) -> Vec<Match> {
    let mut matches = Vec::new();
    matches.extend(dictionary::dictionary_match(password, dicts, user));
    matches.extend(l33t::l33t_match(password, tables, dicts, user));
    matches.extend(spatial::spatial_match(password, tables));
    matches.extend(repeats::repeat_match(password));
    matches.extend(repeats::sequence_match(password, tables));
    matches.extend(dates::digits_match(password, scanners));
    matches.extend(dates::year_match(password, scanners));
    matches.extend(dates::date_match(password, scanners));
    matches.sort_by(|a, b| (a.i, a.j).cmp(&(b.i, b.j)));
    matches
}
