//! Version directory discovery.
//!
//! A version is a directory under the content root that contains at least one
//! supported-locale subdirectory. The set is discovered from the filesystem on
//! every call, never configured and never cached — callers cache rendered
//! documents, not the version list.

use std::cmp::Ordering;
use std::fs;
use std::path::Path;

/// Discover available version directories, latest first.
///
/// Directories named in `exclude` are skipped. Ordering is natural
/// (numeric-aware, so `v10` sorts above `v2`), reversed so the latest version
/// comes first.
#[must_use]
pub fn available_versions(root: &Path, supported_locales: &[String], exclude: &[String]) -> Vec<String> {
    let Ok(entries) = fs::read_dir(root) else {
        return Vec::new();
    };

    let mut versions: Vec<String> = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| !exclude.contains(name))
        .filter(|name| has_locale_dir(&root.join(name), supported_locales))
        .collect();

    versions.sort_by(|a, b| natural_cmp(a, b));
    versions.reverse();
    versions
}

/// Whether a directory contains at least one supported-locale subdirectory.
fn has_locale_dir(dir: &Path, supported_locales: &[String]) -> bool {
    supported_locales
        .iter()
        .any(|locale| dir.join(locale).is_dir())
}

/// Natural string comparison: digit runs compare numerically, the rest
/// compares as text.
pub(crate) fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut a_chars = a.chars().peekable();
    let mut b_chars = b.chars().peekable();

    loop {
        match (a_chars.peek().copied(), b_chars.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(ac), Some(bc)) => {
                if ac.is_ascii_digit() && bc.is_ascii_digit() {
                    let a_num = take_digits(&mut a_chars);
                    let b_num = take_digits(&mut b_chars);
                    // Compare by magnitude: more digits wins once leading
                    // zeros are gone, otherwise lexicographic on equal length
                    let a_trimmed = a_num.trim_start_matches('0');
                    let b_trimmed = b_num.trim_start_matches('0');
                    let ord = a_trimmed
                        .len()
                        .cmp(&b_trimmed.len())
                        .then_with(|| a_trimmed.cmp(b_trimmed));
                    if ord != Ordering::Equal {
                        return ord;
                    }
                } else {
                    let ord = ac.cmp(&bc);
                    if ord != Ordering::Equal {
                        return ord;
                    }
                    a_chars.next();
                    b_chars.next();
                }
            }
        }
    }
}

fn take_digits(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut digits = String::new();
    while let Some(c) = chars.peek().copied() {
        if c.is_ascii_digit() {
            digits.push(c);
            chars.next();
        } else {
            break;
        }
    }
    digits
}
