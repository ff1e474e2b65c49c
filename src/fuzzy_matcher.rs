//! # Fuzzy Matcher
//!
//! This module decides which inventory record, if any, stands for a parsed
//! ingredient name. Pantry names are short and noisy ("Organic Bananas" for
//! "banana"), so matching is deliberately lenient: a shared whole word is
//! enough, and otherwise a character-level similarity ratio decides.
//!
//! ## Similarity
//!
//! [`similarity`] is the Ratcliff/Obershelp ratio over characters of the
//! normalized strings: find the longest common run, recurse on the pieces to
//! its left and right, and return `2 * matched / (len(a) + len(b))`. It is
//! 1.0 only for identical normalized strings.
//!
//! ## Usage
//!
//! ```rust
//! use pantry_reconcile::config::DEFAULT_TOKEN_THRESHOLD;
//! use pantry_reconcile::fuzzy_matcher::{is_match, similarity};
//!
//! assert_eq!(similarity("Chicken Breast", "chicken breast"), 1.0);
//! assert!(is_match("Organic Bananas", "banana", DEFAULT_TOKEN_THRESHOLD));
//! assert!(!is_match("chicken", "beef", DEFAULT_TOKEN_THRESHOLD));
//! ```

use crate::ingredient_model::InventoryRecord;
use std::collections::{HashMap, HashSet};
use tracing::{debug, trace};

/// Best inventory candidate for one ingredient name
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchResult<'a> {
    /// Index of the matched record in the slice that was searched
    pub position: Option<usize>,
    /// The matched record
    pub record: Option<&'a InventoryRecord>,
    /// Similarity of the match, 0.0 when there is none
    pub score: f64,
}

impl<'a> MatchResult<'a> {
    /// Result for "no plausible record"
    pub fn none() -> Self {
        Self {
            position: None,
            record: None,
            score: 0.0,
        }
    }

    /// Check if a record was selected
    pub fn is_match(&self) -> bool {
        self.record.is_some()
    }
}

/// Lower-case, turn punctuation into spaces, collapse whitespace
pub fn normalize_text(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() || c.is_whitespace() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Similarity ratio in `[0, 1]` of two names after normalization
///
/// Returns 0.0 when either normalized name is empty.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = normalize_text(a).chars().collect();
    let b: Vec<char> = normalize_text(b).chars().collect();
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let matched = matching_characters(&a, &b);
    2.0 * matched as f64 / (a.len() + b.len()) as f64
}

/// Whether an inventory name plausibly refers to an ingredient name
///
/// Any shared whole word matches immediately; otherwise the similarity must
/// reach `token_threshold`.
pub fn is_match(inventory_name: &str, ingredient_name: &str, token_threshold: f64) -> bool {
    let inventory = normalize_text(inventory_name);
    let ingredient = normalize_text(ingredient_name);

    let inventory_tokens: HashSet<&str> = inventory.split_whitespace().collect();
    if ingredient
        .split_whitespace()
        .any(|token| inventory_tokens.contains(token))
    {
        trace!(inventory_name, ingredient_name, "Shared token match");
        return true;
    }

    similarity(&inventory, &ingredient) >= token_threshold
}

/// Select the record whose name is most similar to `ingredient_name`
///
/// Records are scored in order and only a strictly better score replaces the
/// current best, so ties keep the first record. The best record is returned
/// only when its score reaches `min_score`.
pub fn find_best_match<'a>(
    records: &'a [InventoryRecord],
    ingredient_name: &str,
    min_score: f64,
) -> MatchResult<'a> {
    let target = normalize_text(ingredient_name);
    let mut best: Option<(usize, f64)> = None;

    for (position, record) in records.iter().enumerate() {
        let score = similarity(&record.name, &target);
        trace!(record = %record.name, score, "Scored inventory record");
        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((position, score));
        }
    }

    match best {
        Some((position, score)) if score >= min_score => {
            debug!(
                ingredient = ingredient_name,
                record = %records[position].name,
                score,
                "Selected inventory match"
            );
            MatchResult {
                position: Some(position),
                record: Some(&records[position]),
                score,
            }
        }
        best => {
            debug!(
                ingredient = ingredient_name,
                best_score = best.map_or(0.0, |(_, score)| score),
                min_score,
                "No inventory record above minimum score"
            );
            MatchResult::none()
        }
    }
}

/// Total length of the matching blocks between `a` and `b`
fn matching_characters(a: &[char], b: &[char]) -> usize {
    let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, c) in b.iter().enumerate() {
        b2j.entry(*c).or_default().push(j);
    }

    let mut matched = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];
    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let (i, j, size) = longest_match(a, &b2j, alo, ahi, blo, bhi);
        if size == 0 {
            continue;
        }

        matched += size;
        if alo < i && blo < j {
            pending.push((alo, i, blo, j));
        }
        if i + size < ahi && j + size < bhi {
            pending.push((i + size, ahi, j + size, bhi));
        }
    }
    matched
}

/// Longest common run of `a[alo..ahi]` and `b[blo..bhi]`
///
/// Among equally long runs the one starting earliest in `a`, then earliest in
/// `b`, wins. Returns `(start_a, start_b, length)`.
fn longest_match(
    a: &[char],
    b2j: &HashMap<char, Vec<usize>>,
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);
    // run length of the match ending at b[j], for the previous i
    let mut j2len: HashMap<usize, usize> = HashMap::new();

    for (i, c) in a.iter().enumerate().take(ahi).skip(alo) {
        let mut next_j2len = HashMap::new();
        if let Some(positions) = b2j.get(c) {
            for &j in positions {
                if j < blo {
                    continue;
                }
                if j >= bhi {
                    break;
                }
                let k = j
                    .checked_sub(1)
                    .and_then(|prev| j2len.get(&prev))
                    .copied()
                    .unwrap_or(0)
                    + 1;
                next_j2len.insert(j, k);
                if k > best_size {
                    best_i = i + 1 - k;
                    best_j = j + 1 - k;
                    best_size = k;
                }
            }
        }
        j2len = next_j2len;
    }

    (best_i, best_j, best_size)
}
