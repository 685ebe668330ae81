//! Static shirt → bottom recommendation lookup.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Outcome of a recommendation lookup.
///
/// An unmapped shirt category is a valid result, not an error; callers render
/// an empty-state message for [`Recommendation::None`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recommendation<'a> {
    /// Ordered bottom categories, most compatible first.
    Bottoms(&'a [String]),
    /// No recommendations configured for this category.
    None,
}

impl<'a> Recommendation<'a> {
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// All bottoms, or an empty slice for [`Recommendation::None`].
    pub fn bottoms(&self) -> &'a [String] {
        match *self {
            Self::Bottoms(b) => b,
            Self::None => &[],
        }
    }

    /// At most `limit` bottoms, preserving order.
    pub fn top(&self, limit: usize) -> &'a [String] {
        let bottoms = self.bottoms();
        &bottoms[..bottoms.len().min(limit)]
    }
}

/// Immutable mapping from shirt category to an ordered list of bottom
/// categories. Lookup is exact-match only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecommendationMap {
    entries: BTreeMap<String, Vec<String>>,
}

impl Default for RecommendationMap {
    fn default() -> Self {
        Self::from_pairs([
            ("Blouse", &["Jeans"][..]),
            ("Tank", &["Shorts"][..]),
            ("Cardigan", &["Dress"][..]),
            ("Sweater", &["Skirt"][..]),
            ("Hoodie", &["Joggers"][..]),
        ])
    }
}

impl RecommendationMap {
    pub fn from_pairs<'s>(pairs: impl IntoIterator<Item = (&'s str, &'s [&'s str])>) -> Self {
        let entries = pairs
            .into_iter()
            .map(|(shirt, bottoms)| {
                (
                    shirt.to_string(),
                    bottoms.iter().map(|b| b.to_string()).collect(),
                )
            })
            .collect();
        Self { entries }
    }

    /// Look up compatible bottoms for a shirt category.
    ///
    /// Categories mapped to an empty list are treated the same as unmapped ones.
    pub fn recommend(&self, category: &str) -> Recommendation<'_> {
        match self.entries.get(category) {
            Some(bottoms) if !bottoms.is_empty() => Recommendation::Bottoms(bottoms),
            _ => Recommendation::None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Human-readable name for a category identifier: `dress_pants` → `Dress Pants`.
pub fn display_name(identifier: &str) -> String {
    identifier
        .split(['_', ' '])
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(|c| c.to_lowercase()))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
