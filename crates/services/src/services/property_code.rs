//! Property code generation.
//!
//! Codes are the `SELCX` prefix followed by a decimal numeral, zero-padded to
//! at least three digits (`SELCX007`, `SELCX1234`). Generation works on a
//! snapshot of the currently assigned codes fetched by the caller; the
//! returned numeral is guaranteed absent from that snapshot in both modes.
//! The database's unique constraint on the code column arbitrates races
//! between concurrent creations.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use ts_rs::TS;

pub const CODE_PREFIX: &str = "SELCX";

const MIN_CODE_DIGITS: usize = 3;
const RANDOM_RANGE_SLACK: u64 = 100;
const MAX_RANDOM_ATTEMPTS: usize = 50;

/// Largest numeral a pool entry may carry. Anything above would overflow the
/// `max + 1` / `max + 100` arithmetic, so it is excluded like any other digit
/// run that does not fit in a u64.
const MAX_NUMERAL: u64 = u64::MAX - RANDOM_RANGE_SLACK;

static CODE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!("(?i)^{CODE_PREFIX}([0-9]+)$")).expect("valid pattern"));

#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, TS, EnumString, Display, Default,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CodeMode {
    #[default]
    Sequential,
    Random,
}

/// Inclusive-range integer source. Injected so the collision/fallback path is
/// deterministically testable.
pub trait NumberSource {
    fn draw(&mut self, low: u64, high: u64) -> u64;
}

pub struct ThreadRngSource;

impl NumberSource for ThreadRngSource {
    fn draw(&mut self, low: u64, high: u64) -> u64 {
        rand::thread_rng().gen_range(low..=high)
    }
}

/// True when the string is a well-formed property code, ignoring case.
pub fn is_valid_code(code: &str) -> bool {
    CODE_PATTERN.is_match(code)
}

/// Canonical display form: upper-case prefix, numeral padded to at least
/// three digits, wider numerals untruncated.
pub fn format_code(numeral: u64) -> String {
    format!("{CODE_PREFIX}{numeral:0width$}", width = MIN_CODE_DIGITS)
}

fn parse_numeral(code: &str) -> Option<u64> {
    CODE_PATTERN
        .captures(code)
        .and_then(|caps| caps[1].parse::<u64>().ok())
        .filter(|numeral| *numeral <= MAX_NUMERAL)
}

pub struct PropertyCodeGenerator<S: NumberSource = ThreadRngSource> {
    source: S,
}

impl PropertyCodeGenerator {
    pub fn new() -> Self {
        Self {
            source: ThreadRngSource,
        }
    }
}

impl Default for PropertyCodeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: NumberSource> PropertyCodeGenerator<S> {
    pub fn with_source(source: S) -> Self {
        Self { source }
    }

    /// Produce a code whose numeral is not taken by any entry of
    /// `existing_codes`. Entries not matching the code pattern are ignored.
    /// Always returns; never errors.
    pub fn generate<T: AsRef<str>>(&mut self, existing_codes: &[T], mode: CodeMode) -> String {
        let taken: HashSet<u64> = existing_codes
            .iter()
            .filter_map(|code| parse_numeral(code.as_ref()))
            .collect();
        let max_number = taken.iter().copied().max().unwrap_or(0);

        let numeral = match mode {
            CodeMode::Sequential => max_number + 1,
            CodeMode::Random => self.draw_free_numeral(&taken, max_number),
        };

        format_code(numeral)
    }

    fn draw_free_numeral(&mut self, taken: &HashSet<u64>, max_number: u64) -> u64 {
        for _ in 0..MAX_RANDOM_ATTEMPTS {
            let candidate = self.source.draw(1, max_number + RANDOM_RANGE_SLACK);
            if !taken.contains(&candidate) {
                return candidate;
            }
        }
        // max_number + 1 can never be in the taken set
        max_number + 1
    }
}
