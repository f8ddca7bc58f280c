//! LMDB ledger integrity checks.
//!
//! Run on startup to detect corruption early, before a transaction touches
//! the ledger.

use std::path::Path;

use crate::environment::{HISTORY_DB, META_DB, STATE_DB};
use crate::{LmdbEnvironment, LmdbError};

/// Summary of an integrity check run.
pub struct IntegrityReport {
    pub databases_checked: u32,
    pub total_entries: u64,
    pub errors: Vec<String>,
}

impl IntegrityReport {
    /// Returns `true` if no errors were detected.
    pub fn is_healthy(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Database names that we expect to exist in a valid ledger environment.
const EXPECTED_DATABASES: &[&str] = &[STATE_DB, HISTORY_DB, META_DB];

/// Check LMDB database integrity on startup.
///
/// Opens each expected database and counts its entries. Read failures and
/// missing databases are recorded in the report rather than causing a hard
/// error. A ledger whose state holds more keys than its history has entries
/// is reported as well, since every state write also appends to history.
pub fn check_integrity(ledger: &LmdbEnvironment) -> Result<IntegrityReport, LmdbError> {
    let mut report = IntegrityReport {
        databases_checked: 0,
        total_entries: 0,
        errors: Vec::new(),
    };

    let env = ledger.env();
    let rtxn = env.read_txn()?;
    let mut counts = Vec::with_capacity(EXPECTED_DATABASES.len());

    for &db_name in EXPECTED_DATABASES {
        match env.open_database::<heed::types::Bytes, heed::types::Bytes>(&rtxn, Some(db_name)) {
            Ok(Some(db)) => {
                report.databases_checked += 1;
                match db.len(&rtxn) {
                    Ok(count) => {
                        report.total_entries += count;
                        counts.push(count);
                    }
                    Err(e) => {
                        report
                            .errors
                            .push(format!("failed to read database '{}': {}", db_name, e));
                        counts.push(0);
                    }
                }
            }
            Ok(None) => {
                report
                    .errors
                    .push(format!("database '{}' is missing", db_name));
                counts.push(0);
            }
            Err(e) => {
                report
                    .errors
                    .push(format!("failed to open database '{}': {}", db_name, e));
                counts.push(0);
            }
        }
    }

    if counts[0] > counts[1] {
        report.errors.push(format!(
            "state holds {} keys but history only {} entries",
            counts[0], counts[1]
        ));
    }

    Ok(report)
}

/// Check if the ledger data directory looks valid before opening.
///
/// A nonexistent or empty directory is fresh and passes. A non-empty
/// directory without `data.mdb` is rejected: it is most likely the wrong
/// path, or a ledger whose data file was lost.
pub fn check_data_dir(path: &Path) -> Result<(), String> {
    if !path.exists() {
        return Ok(());
    }
    if !path.is_dir() {
        return Err(format!("ledger path {} is not a directory", path.display()));
    }
    if path.join("data.mdb").exists() {
        return Ok(());
    }
    let mut entries = std::fs::read_dir(path)
        .map_err(|e| format!("cannot read ledger directory {}: {e}", path.display()))?;
    if entries.next().is_none() {
        return Ok(());
    }
    Err(format!(
        "ledger directory exists but data.mdb is missing at {}",
        path.display()
    ))
}
