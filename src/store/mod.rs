use anyhow::{Context, Result};
use csv::WriterBuilder;
use std::{
    fs::OpenOptions,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::snapshot::row::{MarketRow, HEADERS};

/// Append-only CSV store accumulating snapshot rows across runs.
///
/// The header is written exactly once, when the file is first created;
/// appends only ever add trailing records.
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the store file with its header row if it does not exist
    /// yet. An existing store is left untouched.
    pub fn ensure_header(&self) -> Result<()> {
        let file = match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
        {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(()),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("creating store file {}", self.path.display()))
            }
        };

        let mut writer = WriterBuilder::new().from_writer(file);
        writer
            .write_record(&HEADERS)
            .context("writing store header")?;
        writer.flush().context("flushing store header")?;
        Ok(())
    }

    /// Append rows as new trailing records, preserving their order.
    pub fn append(&self, rows: &[MarketRow]) -> Result<()> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("opening store {} for append", self.path.display()))?;

        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
        for row in rows {
            writer.serialize(row).context("appending snapshot row")?;
        }
        writer.flush().context("flushing appended rows")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::payload;
    use anyhow::Result;
    use std::fs;
    use tempfile::tempdir;

    fn sample_rows(names: &[&str]) -> Vec<MarketRow> {
        names
            .iter()
            .map(|name| {
                let body = format!(
                    r#"{{"markets":[{{"referentiel":{{"stockName":"{name}"}},"limit":{{"ask":1.5}},"last":2.0}}]}}"#
                );
                let payload = payload::decode(&body).unwrap();
                MarketRow::from_entry(&payload.markets[0])
            })
            .collect()
    }

    #[test]
    fn creates_header_exactly_once() -> Result<()> {
        let dir = tempdir()?;
        let store = SnapshotStore::new(dir.path().join("market_data.csv"));

        store.ensure_header()?;
        let first = fs::read_to_string(store.path())?;
        assert_eq!(first.lines().count(), 1);
        assert!(first.starts_with("Time,Valeur,ISIN,"));

        // a second run must not truncate or duplicate the header
        store.ensure_header()?;
        assert_eq!(fs::read_to_string(store.path())?, first);
        Ok(())
    }

    #[test]
    fn appends_preserve_prior_rows() -> Result<()> {
        let dir = tempdir()?;
        let store = SnapshotStore::new(dir.path().join("market_data.csv"));
        store.ensure_header()?;

        store.append(&sample_rows(&["ACME"]))?;
        let after_first = fs::read_to_string(store.path())?;

        store.ensure_header()?;
        store.append(&sample_rows(&["BETA", "GAMMA"]))?;
        let after_second = fs::read_to_string(store.path())?;

        assert!(after_second.starts_with(&after_first));
        assert_eq!(after_second.lines().count(), 4);
        Ok(())
    }

    #[test]
    fn every_record_has_nineteen_fields() -> Result<()> {
        let dir = tempdir()?;
        let store = SnapshotStore::new(dir.path().join("market_data.csv"));
        store.ensure_header()?;
        store.append(&sample_rows(&["ACME", "BETA"]))?;

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(store.path())?;
        let mut records = 0;
        for record in reader.records() {
            assert_eq!(record?.len(), 19);
            records += 1;
        }
        assert_eq!(records, 3);
        Ok(())
    }

    #[test]
    fn rows_keep_snapshot_order() -> Result<()> {
        let dir = tempdir()?;
        let store = SnapshotStore::new(dir.path().join("market_data.csv"));
        store.ensure_header()?;
        store.append(&sample_rows(&["ACME", "BETA", "GAMMA"]))?;

        let content = fs::read_to_string(store.path())?;
        let names: Vec<&str> = content
            .lines()
            .skip(1)
            .map(|line| line.split(',').nth(1).unwrap())
            .collect();
        assert_eq!(names, vec!["ACME", "BETA", "GAMMA"]);
        Ok(())
    }
}
