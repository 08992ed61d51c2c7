//! Password generation.
//!
//! Character classes use `tr` syntax: `a-z` is an inclusive range, anything
//! else (including a `-` that cannot start a range) is a literal. The default
//! class `_A-Z-a-z-0-9` therefore contains `_`, `-` and all ASCII letters and
//! digits.

use std::collections::HashSet;

use rand::rngs::OsRng;
use rand::seq::SliceRandom;
use zeroize::Zeroizing;

use crate::core::constants;
use crate::error::{ConfigError, Result};

/// Expand a character class into its distinct members, in first-seen order.
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` for an inverted range or an empty
/// class.
pub fn charset(pattern: &str) -> Result<Vec<char>> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut set = Vec::new();
    let mut seen = HashSet::new();
    let mut push = |c: char| {
        if seen.insert(c) {
            set.push(c);
        }
    };

    let mut i = 0;
    while i < chars.len() {
        if i + 2 < chars.len() && chars[i + 1] == '-' {
            let (start, end) = (chars[i], chars[i + 2]);
            if start > end {
                return Err(invalid(format!("inverted range '{}-{}'", start, end)));
            }
            (start..=end).for_each(&mut push);
            i += 3;
        } else {
            push(chars[i]);
            i += 1;
        }
    }

    if set.is_empty() {
        return Err(invalid("character class is empty".to_string()));
    }
    Ok(set)
}

/// Generate a password of `length` characters drawn uniformly from
/// `pattern` using the operating system RNG.
pub fn password(length: usize, pattern: &str) -> Result<Zeroizing<String>> {
    let set = charset(pattern)?;
    let mut out = Zeroizing::new(String::with_capacity(length));
    for _ in 0..length {
        if let Some(c) = set.choose(&mut OsRng) {
            out.push(*c);
        }
    }
    Ok(out)
}

fn invalid(reason: String) -> crate::error::Error {
    ConfigError::InvalidValue {
        var: constants::ENV_PATTERN,
        reason,
    }
    .into()
}
