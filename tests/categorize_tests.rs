// Copyright (c) 2025 Budgetwise Developers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use budgetwise::categorize::{categorize, is_known_category, CATEGORY_KEYWORDS, UNCATEGORIZED};

#[test]
fn keyword_hit_assigns_category() {
    assert_eq!(categorize("Weekly supermarket run"), "Groceries");
    assert_eq!(categorize("Uber to the airport"), "Transport");
    assert_eq!(categorize("Electricity and water this month"), "Utilities");
    assert_eq!(categorize("netflix subscription"), "Entertainment");
    assert_eq!(categorize("October payroll"), "Salary");
    assert_eq!(categorize("New clothes from the mall"), "Shopping");
}

#[test]
fn matching_is_case_insensitive() {
    assert_eq!(categorize("NETFLIX Subscription"), "Entertainment");
    assert_eq!(categorize("MONTHLY RENT"), "Rent");
}

#[test]
fn first_category_in_table_order_wins() {
    // "rent" (Rent) appears in the table before "salary" (Salary), so the
    // earlier category wins regardless of word order in the description.
    assert_eq!(categorize("salary spent on rent"), "Rent");
    // "store" (Groceries) beats "mall" (Shopping).
    assert_eq!(categorize("mall store visit"), "Groceries");
}

#[test]
fn whole_words_only() {
    // "restore" contains "store", "gasoline" contains "gas"; neither counts.
    assert_eq!(categorize("Restore hardware kit"), UNCATEGORIZED);
    assert_eq!(categorize("gasoline additive"), UNCATEGORIZED);
    assert_eq!(categorize("bill payment"), "Utilities");
}

#[test]
fn no_match_falls_back_to_uncategorized() {
    assert_eq!(categorize(""), UNCATEGORIZED);
    assert_eq!(categorize("zzzz qqqq"), UNCATEGORIZED);
}

#[test]
fn every_keyword_maps_back_to_its_category_or_an_earlier_one() {
    // A keyword on its own must never fall through to Uncategorized.
    for (_, keywords) in CATEGORY_KEYWORDS {
        for kw in *keywords {
            assert_ne!(categorize(kw), UNCATEGORIZED, "keyword '{}' fell through", kw);
        }
    }
}

#[test]
fn known_categories_cover_taxonomy_and_sentinel() {
    assert!(is_known_category("Groceries"));
    assert!(is_known_category(UNCATEGORIZED));
    assert!(!is_known_category("Food"));
    assert!(!is_known_category(""));
}
