// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::StoreError;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "DailyTrack", "dailytrack"));

pub const DB_ENV: &str = "DAILYTRACK_DB";

/// Resolve the database file: explicit override, then `DAILYTRACK_DB`,
/// then the platform data dir.
pub fn db_path(override_path: Option<&str>) -> Result<PathBuf> {
    if let Some(p) = override_path.map(str::trim).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(p));
    }
    if let Ok(p) = std::env::var(DB_ENV) {
        if !p.trim().is_empty() {
            return Ok(PathBuf::from(p.trim()));
        }
    }
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("dailytrack.sqlite"))
}

#[derive(Debug, Clone)]
enum Location {
    File(PathBuf),
    Memory,
}

/// Lazily opened handle to the single on-device database.
///
/// The connection is opened on first use, dropped by [`Database::close`],
/// and opened again by the next call to [`Database::connection`].
#[derive(Debug)]
pub struct Database {
    location: Location,
    conn: Option<Connection>,
}

impl Database {
    pub fn at(path: impl AsRef<Path>) -> Self {
        Self {
            location: Location::File(path.as_ref().to_path_buf()),
            conn: None,
        }
    }

    /// Private in-memory database. Closing it discards its contents.
    pub fn in_memory() -> Self {
        Self {
            location: Location::Memory,
            conn: None,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match &self.location {
            Location::File(p) => Some(p),
            Location::Memory => None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.conn.is_some()
    }

    pub fn connection(&mut self) -> Result<&mut Connection, StoreError> {
        if self.conn.is_none() {
            let conn = match &self.location {
                Location::File(p) => {
                    if let Some(parent) = p.parent().filter(|d| !d.as_os_str().is_empty()) {
                        fs::create_dir_all(parent).map_err(|e| {
                            StoreError::Storage(format!(
                                "create data dir {}: {}",
                                parent.display(),
                                e
                            ))
                        })?;
                    }
                    debug!(path = %p.display(), "opening database");
                    Connection::open(p)?
                }
                Location::Memory => {
                    debug!("opening in-memory database");
                    Connection::open_in_memory()?
                }
            };
            self.conn = Some(conn);
        }
        self.conn
            .as_mut()
            .ok_or_else(|| StoreError::Storage("database connection unavailable".into()))
    }

    pub fn close(&mut self) -> Result<(), StoreError> {
        if let Some(conn) = self.conn.take() {
            debug!("closing database");
            conn.close().map_err(|(_, e)| StoreError::from(e))?;
        }
        Ok(())
    }
}
