// password strength estimation: pattern matching + minimum-entropy cover
//
// the estimator decomposes a password into overlapping candidate matches
// (dictionary words, l33t substitutions, keyboard walks, repeats, sequences,
// digit runs, years, dates), then picks the cheapest-to-guess decomposition
// and converts its total bit cost into a crack time and a 0..4 score.

pub mod config;
pub mod data;
pub mod matcher;
pub mod output;
pub mod scoring;

use std::time::Instant;

use serde::Serialize;

use config::CrackTimeParams;
use data::Tables;
use matcher::dates::DateScanners;
use matcher::dictionary::{CompiledDictionaries, UserInputs};
use matcher::Match;

/// result of one estimation call
#[derive(Debug, Clone, Serialize)]
pub struct Estimate {
    pub password: String,
    /// total bits of the minimum-entropy cover
    pub entropy: f64,
    pub crack_time_seconds: u64,
    pub crack_time_display: String,
    /// coarse bucket 0 (trivial) .. 4 (strong)
    pub score: u8,
    /// contiguous cover of the password, gaps filled with brute-force spans
    pub matches: Vec<Match>,
    pub calc_time_ms: u64,
}

/// the analyzer: immutable tables plus compiled matchers, shareable across
/// threads. construction decompresses the embedded data; estimation never
/// fails and accepts any string.
pub struct Estimator {
    tables: Tables,
    dictionaries: CompiledDictionaries,
    scanners: DateScanners,
    params: CrackTimeParams,
}

impl Estimator {
    pub fn new() -> Result<Estimator, String> {
        Estimator::with_params(CrackTimeParams::default())
    }

    pub fn with_params(params: CrackTimeParams) -> Result<Estimator, String> {
        let tables = Tables::load()?;
        let dictionaries = CompiledDictionaries::compile(&tables.frequency_lists)?;
        let scanners = DateScanners::compile()?;
        Ok(Estimator {
            tables,
            dictionaries,
            scanners,
            params,
        })
    }

    /// estimate the strength of one password. `user_inputs` are strings tied
    /// to the user (names, email, site terms) that count as a ranked
    /// dictionary of their own for this call only.
    pub fn estimate(&self, password: &str, user_inputs: &[&str]) -> Estimate {
        let start = Instant::now();
        let user = UserInputs::new(user_inputs);
        let candidates = matcher::omnimatch(
            password.as_bytes(),
            &self.tables,
            &self.dictionaries,
            &self.scanners,
            &user,
        );
        let mut result = scoring::minimum_entropy_match_sequence(
            password.as_bytes(),
            candidates,
            &self.tables,
            &self.params,
        );
        result.password = password.to_string();
        result.calc_time_ms = start.elapsed().as_millis() as u64;
        result
    }
}
