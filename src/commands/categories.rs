// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::CATEGORY_TABLE;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use serde_json::json;

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    let items: Vec<_> = CATEGORY_TABLE
        .iter()
        .map(|(_, ordinal, name, kind)| json!({"ordinal": ordinal, "name": name, "type": kind.name()}))
        .collect();
    if !maybe_print_json(m.get_flag("json"), &items)? {
        let data = CATEGORY_TABLE
            .iter()
            .map(|(_, ordinal, name, kind)| {
                vec![ordinal.to_string(), name.to_string(), kind.name().to_string()]
            })
            .collect();
        println!("{}", pretty_table(&["#", "Category", "Type"], data));
    }
    Ok(())
}
