// ranked dictionary matching

use std::collections::HashMap;

use aho_corasick::AhoCorasick;

use crate::data::tables::FrequencyList;

use super::{Match, MatchKind};

pub const USER_INPUTS_DICT: &str = "user_inputs";

/// a raw dictionary hit before it becomes a match record
pub(crate) struct DictHit {
    pub i: usize,
    pub j: usize,
    pub dict_name: String,
    pub matched_word: String,
    pub rank: u64,
}

/// all static frequency lists compiled into one overlapping case-insensitive
/// automaton; every substring equal to a ranked word is reported
pub struct CompiledDictionaries {
    automaton: AhoCorasick,
    /// automaton pattern index -> (list index, word, rank)
    entries: Vec<(usize, String, u64)>,
    names: Vec<String>,
}

impl CompiledDictionaries {
    pub fn compile(lists: &[FrequencyList]) -> Result<CompiledDictionaries, String> {
        let mut patterns: Vec<&[u8]> = Vec::new();
        let mut entries = Vec::new();
        for (list_idx, list) in lists.iter().enumerate() {
            for (pos, word) in list.words.iter().enumerate() {
                patterns.push(word.as_bytes());
                entries.push((list_idx, word.clone(), pos as u64 + 1));
            }
        }
        let automaton = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(&patterns)
            .map_err(|e| format!("failed to build dictionary automaton: {}", e))?;
        Ok(CompiledDictionaries {
            automaton,
            entries,
            names: lists.iter().map(|l| l.name.clone()).collect(),
        })
    }

    pub(crate) fn hits(&self, password: &[u8]) -> Vec<DictHit> {
        self.automaton
            .find_overlapping_iter(password)
            .map(|m| {
                let (list_idx, word, rank) = &self.entries[m.pattern().as_usize()];
                DictHit {
                    i: m.start(),
                    j: m.end() - 1,
                    dict_name: self.names[*list_idx].clone(),
                    matched_word: word.clone(),
                    rank: *rank,
                }
            })
            .collect()
    }
}

/// the per-call ranked dictionary built from caller-supplied strings;
/// rank is the input's position + 1, later duplicates overwrite earlier
pub struct UserInputs {
    ranked: HashMap<Vec<u8>, u64>,
}

impl UserInputs {
    pub fn new(inputs: &[&str]) -> UserInputs {
        let mut ranked = HashMap::new();
        for (pos, input) in inputs.iter().enumerate() {
            if input.is_empty() {
                continue;
            }
            ranked.insert(input.to_ascii_lowercase().into_bytes(), pos as u64 + 1);
        }
        UserInputs { ranked }
    }

    /// every substring of the lowercased password, looked up in the ranked map
    pub(crate) fn hits(&self, password: &[u8]) -> Vec<DictHit> {
        let mut hits = Vec::new();
        if self.ranked.is_empty() {
            return hits;
        }
        let lower = password.to_ascii_lowercase();
        for i in 0..lower.len() {
            for j in i..lower.len() {
                if let Some(&rank) = self.ranked.get(&lower[i..=j]) {
                    hits.push(DictHit {
                        i,
                        j,
                        dict_name: USER_INPUTS_DICT.to_string(),
                        matched_word: String::from_utf8_lossy(&lower[i..=j]).into_owned(),
                        rank,
                    });
                }
            }
        }
        hits
    }
}

fn hit_to_match(hit: DictHit, password: &[u8]) -> Match {
    Match::new(
        MatchKind::Dictionary {
            dict_name: hit.dict_name,
            matched_word: hit.matched_word,
            rank: hit.rank,
        },
        hit.i,
        hit.j,
        password,
    )
}

/// dictionary matcher over the static lists plus the per-call user inputs
pub fn dictionary_match(
    password: &[u8],
    dicts: &CompiledDictionaries,
    user: &UserInputs,
) -> Vec<Match> {
    let mut hits = dicts.hits(password);
    hits.extend(user.hits(password));
    hits.into_iter().map(|h| hit_to_match(h, password)).collect()
}
