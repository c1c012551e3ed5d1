// Copyright (c) 2025 Budgetwise Developers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Keyword categorization for transaction descriptions.
//!
//! The taxonomy is a fixed, ordered table. A description is lowercased and
//! scanned category by category; the first category with a whole-word keyword
//! hit wins, so earlier entries take priority when keywords from several
//! categories appear. Transactions keep the category assigned at creation
//! even if the table changes later.

use once_cell::sync::Lazy;
use regex::Regex;

/// Sentinel for descriptions that match no keyword.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Declaration order is priority order.
pub const CATEGORY_KEYWORDS: &[(&str, &[&str])] = &[
    ("Groceries", &["supermarket", "grocery", "food", "vegetable", "store"]),
    ("Rent", &["rent", "apartment", "lease", "housing"]),
    ("Transport", &["bus", "train", "uber", "fuel", "taxi", "cab"]),
    ("Utilities", &["electricity", "water", "internet", "bill", "gas"]),
    ("Entertainment", &["movie", "game", "netflix", "music", "concert"]),
    ("Salary", &["salary", "income", "bonus", "payroll"]),
    ("Shopping", &["amazon", "clothes", "mall", "electronics"]),
];

static MATCHERS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    CATEGORY_KEYWORDS
        .iter()
        .map(|(name, keywords)| {
            let pattern = format!(r"\b(?:{})\b", keywords.join("|"));
            (*name, Regex::new(&pattern).expect("static keyword pattern"))
        })
        .collect()
});

/// Map a free-text description to a category name. Substring hits inside a
/// longer word do not count ("restore" is not "store").
pub fn categorize(description: &str) -> &'static str {
    let desc = description.to_lowercase();
    for (category, matcher) in MATCHERS.iter() {
        if matcher.is_match(&desc) {
            return *category;
        }
    }
    UNCATEGORIZED
}

/// Whether a stored category value belongs to the taxonomy.
pub fn is_known_category(name: &str) -> bool {
    name == UNCATEGORIZED || CATEGORY_KEYWORDS.iter().any(|(c, _)| *c == name)
}
