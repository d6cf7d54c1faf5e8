//! Approximate substring matching.
//!
//! Finds the best approximate occurrence of a term anywhere inside a
//! field using optimal string alignment distance: insertions,
//! deletions, substitutions and transpositions of adjacent characters
//! each cost one edit. Leading and trailing field text is free, so
//! `kafak` matches `Intro to Kafka` with one edit.
//!
//! Comparison is case-insensitive and works on characters, never
//! bytes.

/// Term prepared for matching
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    chars: Vec<char>,
    lowered: String,
    /// Largest edit count that still counts as a match
    max_edits: usize,
}

impl Pattern {
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.lowered
    }
}

/// Best match of a pattern within one field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldMatch {
    /// Edits needed
    pub edits: usize,

    /// Field characters covered by the match
    pub span: usize,

    /// `1 - edits / term_chars`, in `(0, 1]`
    pub similarity: f64,
}

/// Bounded approximate matcher
#[derive(Debug, Clone)]
pub struct FuzzyMatcher {
    /// Highest accepted normalized distance, in `[0, 1)`
    threshold: f64,

    /// Shortest term and shortest matched span considered
    min_match_chars: usize,
}

impl FuzzyMatcher {
    pub fn new(threshold: f64, min_match_chars: usize) -> Self {
        Self {
            threshold,
            min_match_chars: min_match_chars.max(1),
        }
    }

    /// Lowercase and bound a term. `None` when it is too short to
    /// match anything.
    pub fn prepare(&self, term: &str) -> Option<Pattern> {
        let lowered = term.to_lowercase();
        let chars: Vec<char> = lowered.chars().collect();
        if chars.len() < self.min_match_chars {
            return None;
        }

        // Small epsilon so 0.4 * 5 is 2 edits, not 1
        let max_edits = (self.threshold * chars.len() as f64 + 1e-9).floor() as usize;

        Some(Pattern {
            chars,
            lowered,
            max_edits,
        })
    }

    /// Best approximate occurrence of `pattern` in `text`
    pub fn match_field(&self, pattern: &Pattern, text: &str) -> Option<FieldMatch> {
        if pattern.is_empty() || text.is_empty() {
            return None;
        }

        let lowered = text.to_lowercase();
        let m = pattern.len();

        if lowered.contains(pattern.as_str()) {
            return Some(FieldMatch {
                edits: 0,
                span: m,
                similarity: 1.0,
            });
        }

        if pattern.max_edits == 0 {
            return None;
        }

        let text: Vec<char> = lowered.chars().collect();
        let (edits, span) = best_alignment(&pattern.chars, &text, pattern.max_edits)?;

        if span < self.min_match_chars {
            return None;
        }

        Some(FieldMatch {
            edits,
            span,
            similarity: 1.0 - edits as f64 / m as f64,
        })
    }
}

/// Minimum OSA distance of `pattern` against any substring of `text`,
/// with the length of that substring. `None` once every alignment
/// needs more than `max_edits` edits.
///
/// Rows follow the pattern and columns the text. Row 0 is all zeros
/// so a match may start anywhere. Each cell also carries the text
/// position where its alignment started, which gives the span.
fn best_alignment(pattern: &[char], text: &[char], max_edits: usize) -> Option<(usize, usize)> {
    let n = text.len();

    // (distance, start) for rows i-2, i-1 and i
    let mut before: Vec<(usize, usize)> = (0..=n).map(|j| (0, j)).collect();
    let mut prev: Vec<(usize, usize)> = before.clone();
    let mut cur: Vec<(usize, usize)> = vec![(0, 0); n + 1];

    for i in 1..=pattern.len() {
        cur[0] = (i, 0);
        let mut row_min = i;

        for j in 1..=n {
            let cost = usize::from(pattern[i - 1] != text[j - 1]);

            // Ties prefer the diagonal, then deletion, then insertion
            let mut best = (prev[j - 1].0 + cost, prev[j - 1].1);
            if prev[j].0 + 1 < best.0 {
                best = (prev[j].0 + 1, prev[j].1);
            }
            if cur[j - 1].0 + 1 < best.0 {
                best = (cur[j - 1].0 + 1, cur[j - 1].1);
            }
            if i > 1
                && j > 1
                && pattern[i - 1] == text[j - 2]
                && pattern[i - 2] == text[j - 1]
                && before[j - 2].0 + 1 < best.0
            {
                best = (before[j - 2].0 + 1, before[j - 2].1);
            }

            cur[j] = best;
            row_min = row_min.min(best.0);
        }

        // Row minima never decrease, so nothing below can recover
        if row_min > max_edits {
            return None;
        }

        std::mem::swap(&mut before, &mut prev);
        std::mem::swap(&mut prev, &mut cur);
    }

    // `prev` now holds the last pattern row
    let mut found: Option<(usize, usize)> = None;
    for (j, &(dist, start)) in prev.iter().enumerate().skip(1) {
        if dist > max_edits {
            continue;
        }
        let span = j - start;
        let better = match found {
            None => true,
            Some((best_dist, best_span)) => {
                dist < best_dist || (dist == best_dist && span > best_span)
            }
        };
        if better {
            found = Some((dist, span));
        }
    }

    found
}
