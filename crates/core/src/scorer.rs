//! Indentation scoring for exercise attempts.
//!
//! The scorer is blind to everything but leading-whitespace depth per line:
//! tag names, attributes, and trailing content never influence the result.

//
// ─── OFFSETS ───────────────────────────────────────────────────────────────────
//

/// Zero-based column of the first non-whitespace character on a line.
///
/// Empty and all-whitespace lines carry no offset; two such lines agree
/// with each other and disagree with any contentful line.
///
/// # Examples
///
/// ```
/// # use indent_core::scorer::indent_offset;
/// assert_eq!(indent_offset("  <li>"), Some(2));
/// assert_eq!(indent_offset("<html>"), Some(0));
/// assert_eq!(indent_offset("   "), None);
/// assert_eq!(indent_offset(""), None);
/// ```
#[must_use]
pub fn indent_offset(line: &str) -> Option<usize> {
    line.chars().position(|c| !c.is_whitespace())
}

//
// ─── SCORING ───────────────────────────────────────────────────────────────────
//

/// Score a candidate text against a reference text as an integer percentage.
///
/// Both inputs are split on `'\n'` alone. A line-count mismatch is a hard
/// structural failure and scores 0 regardless of any partial agreement.
/// Otherwise the result is the nearest-integer percentage of lines whose
/// indentation offsets are equal.
///
/// Pure and total: always returns a value in `0..=100`.
///
/// # Examples
///
/// ```
/// # use indent_core::scorer::score;
/// let reference = "<ul>\n  <li>a</li>\n</ul>";
/// assert_eq!(score(reference, reference), 100);
/// assert_eq!(score("<ul>\n<li>a</li>\n</ul>", reference), 67);
/// assert_eq!(score("<ul>\n  <li>a</li>\n</ul>\n", reference), 0);
/// ```
#[must_use]
pub fn score(candidate: &str, reference: &str) -> u8 {
    let candidate_lines: Vec<&str> = candidate.split('\n').collect();
    let reference_lines: Vec<&str> = reference.split('\n').collect();

    if candidate_lines.len() != reference_lines.len() {
        return 0;
    }

    let matching = candidate_lines
        .iter()
        .zip(&reference_lines)
        .filter(|(cand, refr)| indent_offset(cand) == indent_offset(refr))
        .count();

    percentage(matching, reference_lines.len())
}

/// `round(100 * matching / total)` as `u8`.
///
/// `total` is never zero here: splitting any string on `'\n'` yields at
/// least one line.
fn percentage(matching: usize, total: usize) -> u8 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let percent = ((matching as f64 / total as f64) * 100.0).round() as u8;
    percent
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
