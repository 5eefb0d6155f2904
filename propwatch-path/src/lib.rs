//! Canonical access paths.
//!
//! A path names a structural location reached by a chain of property reads,
//! such as `foo.bar.baz` or `config.servers[].host`. Paths are built one key at
//! a time with [`build_path`]; the prefix handed down to a nested level is the
//! parent path followed by the [`LEVEL_SEPARATOR`] (see [`child_prefix`]).
//!
//! Array-index-like keys become bracket segments, glued directly to the
//! preceding name rather than after a separator:
//!
//! | parent prefix | key                  | compact | result                       |
//! |---------------|----------------------|---------|------------------------------|
//! | `""`          | `foo`                | any     | `foo`                        |
//! | `"foo."`      | `bar`                | any     | `foo.bar`                    |
//! | `"list."`     | `2`                  | `true`  | `list[]`                     |
//! | `"list."`     | `2`                  | `false` | `list[2]`                    |
//! | `"foo."`      | `Symbol.toStringTag` | any     | `foo.Symbol(Symbol.toStringTag)` |

#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]

use propwatch_object::PropertyKey;

/// Separator placed between path levels.
pub const LEVEL_SEPARATOR: char = '.';

/// Segment contributed by any index access in compact mode.
pub const COMPACT_INDEX_SEGMENT: &str = "[]";

/// Is `key` a string that reads fully as a finite decimal number?
///
/// Surrounding whitespace is ignored. Signs, fractions and exponents are
/// accepted (`"-1"`, `"1.5"`, `"1e3"`); the empty string, trailing garbage,
/// `Infinity`/`NaN` are not. Symbols never are.
///
/// Only decimal notation counts: `"0x1f"`, `"0b1"` and `"0o7"` are plain
/// names here, even though a script's `Number()` would parse them.
pub fn is_index_like(key: &PropertyKey) -> bool {
    key.as_str().is_some_and(is_numeric)
}

fn is_numeric(s: &str) -> bool {
    let s = s.trim();
    // f64's parser also accepts "inf", "infinity" and "nan"; none of those
    // are finite, and no other alphabetic form except the exponent is valid.
    !s.is_empty()
        && s.bytes().all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'))
        && s.parse::<f64>().is_ok_and(f64::is_finite)
}

/// Extend `parent` (a prefix ending in the separator, or `""` at the root) by
/// one key.
///
/// Index-like keys contribute `[]` when `compact` is set and `[<key>]`
/// otherwise, after dropping a trailing separator from `parent`. Any other
/// key contributes its display form, so symbols render as
/// `Symbol(<description>)`.
pub fn build_path(parent: &str, key: &PropertyKey, compact: bool) -> String {
    if is_index_like(key) {
        let parent = parent.strip_suffix(LEVEL_SEPARATOR).unwrap_or(parent);
        if compact {
            format!("{parent}{COMPACT_INDEX_SEGMENT}")
        } else {
            format!("{parent}[{key}]")
        }
    } else {
        format!("{parent}{key}")
    }
}

/// The prefix for the level below `path`: `path` followed by the separator.
pub fn child_prefix(path: &str) -> String {
    let mut prefix = String::with_capacity(path.len() + 1);
    prefix.push_str(path);
    prefix.push(LEVEL_SEPARATOR);
    prefix
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_forms() {
        for yes in ["0", "42", "-1", "+3", "1.5", ".5", "5.", "1e3", " 7 ", "0012"] {
            assert!(is_numeric(yes), "{yes:?} should be index-like");
        }
        for no in ["", " ", "abc", "12abc", "Infinity", "-inf", "NaN", "0x10", "1e999", "e5"] {
            assert!(!is_numeric(no), "{no:?} should not be index-like");
        }
    }
}
