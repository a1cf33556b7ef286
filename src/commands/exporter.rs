// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::export::{export_month, export_range};
use crate::store::TransactionStore;
use crate::utils::{parse_date, parse_month};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub fn handle(store: &mut TransactionStore, m: &clap::ArgMatches) -> Result<Option<PathBuf>> {
    let (path, n) = match m.subcommand() {
        Some(("month", sub)) => {
            let (y, mo) = parse_month(sub.get_one::<String>("month").unwrap())?;
            let dir = out_dir(sub)?;
            export_month(store, y, mo, &dir)?
        }
        Some(("range", sub)) => {
            let from = parse_date(sub.get_one::<String>("from").unwrap())?;
            let to = parse_date(sub.get_one::<String>("to").unwrap())?;
            let dir = out_dir(sub)?;
            export_range(store, from, to, &dir)?
        }
        _ => return Ok(None),
    };
    println!("Exported {} expenses to {}", n, path.display());
    Ok(Some(path))
}

fn out_dir(sub: &clap::ArgMatches) -> Result<PathBuf> {
    let dir = Path::new(sub.get_one::<String>("dir").unwrap().trim());
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Create export dir {}", dir.display()))?;
    Ok(dir.to_path_buf())
}
