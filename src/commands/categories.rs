// Copyright (c) Budgetwise Developers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::categorize::{CATEGORY_KEYWORDS, UNCATEGORIZED};
use crate::utils::pretty_table;
use anyhow::Result;

// The taxonomy is baked in, so this needs no database.
pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", _)) => {
            let mut rows: Vec<Vec<String>> = CATEGORY_KEYWORDS
                .iter()
                .map(|(name, keywords)| vec![name.to_string(), keywords.join(", ")])
                .collect();
            rows.push(vec![
                UNCATEGORIZED.to_string(),
                "(no keyword match)".to_string(),
            ]);
            println!("{}", pretty_table(&["Category", "Keywords"], rows));
        }
        _ => {}
    }
    Ok(())
}
