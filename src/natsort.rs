//! Natural-order comparison for workspace names.
//!
//! Splits a name into alternating non-digit/digit runs and compares digit
//! runs numerically, so `"2"` sorts before `"10"` and `"ws2"` before
//! `"ws10"`.  Non-digit runs compare lexically.

use std::cmp::Ordering;

/// One run of a name: either a digit run (compared numerically) or a
/// non-digit run (compared lexically).
///
/// Variant order matters: deriving [`Ord`] makes digit runs sort before text
/// runs, which keeps purely numeric names ahead of named workspaces.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Chunk {
    Number(u128),
    Text(String),
}

/// Split `name` into its comparison key.
///
/// Digit runs too long to fit a `u128` are kept as text; workspace names
/// never get close in practice.
pub fn natural_key(name: &str) -> Vec<Chunk> {
    fn flush(run: &mut String, is_digit: bool, key: &mut Vec<Chunk>) {
        if run.is_empty() {
            return;
        }
        let chunk = if is_digit {
            match run.parse::<u128>() {
                Ok(n) => Chunk::Number(n),
                Err(_) => Chunk::Text(std::mem::take(run)),
            }
        } else {
            Chunk::Text(std::mem::take(run))
        };
        run.clear();
        key.push(chunk);
    }

    let mut key = Vec::new();
    let mut run = String::new();
    let mut run_is_digit = false;

    for c in name.chars() {
        let is_digit = c.is_ascii_digit();
        if is_digit != run_is_digit {
            flush(&mut run, run_is_digit, &mut key);
            run_is_digit = is_digit;
        }
        run.push(c);
    }
    flush(&mut run, run_is_digit, &mut key);
    key
}

/// Compare two names in natural order.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    natural_key(a).cmp(&natural_key(b))
}
