use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Ordering applied to folder and item titles when the tree is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TitleOrder {
    /// Locale-style order: letters compare with case and accents folded,
    /// then unaccented before accented, then lowercase before uppercase.
    #[default]
    Collated,
    /// Raw code point order.
    Ordinal,
}

impl TitleOrder {
    /// Compare two titles under this ordering.
    pub fn compare(self, left: &str, right: &str) -> Ordering {
        match self {
            TitleOrder::Collated => compare_collated(left, right),
            TitleOrder::Ordinal => left.cmp(right),
        }
    }
}

fn compare_collated(left: &str, right: &str) -> Ordering {
    base_letters(left)
        .cmp(base_letters(right))
        .then_with(|| accented_letters(left).cmp(accented_letters(right)))
        .then_with(|| compare_case(left, right))
}

/// Lowercase letters with accents stripped.
fn base_letters(title: &str) -> impl Iterator<Item = char> + '_ {
    title
        .nfd()
        .filter(|ch| !is_combining_mark(*ch))
        .flat_map(char::to_lowercase)
}

/// Lowercase letters in canonical decomposition, accents kept.
fn accented_letters(title: &str) -> impl Iterator<Item = char> + '_ {
    title.nfd().flat_map(char::to_lowercase)
}

fn compare_case(left: &str, right: &str) -> Ordering {
    for (l, r) in left.chars().zip(right.chars()) {
        if l == r {
            continue;
        }

        return match (l.is_lowercase(), r.is_lowercase()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => l.cmp(&r),
        };
    }

    left.len().cmp(&right.len())
}
