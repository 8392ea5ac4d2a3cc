//! Dataset Fetcher Module
//! Makes sure the five Olist CSV files exist locally, downloading and
//! unzipping any that are missing. Every file is attempted independently;
//! failures are logged and skipped, and the loader later skips files that
//! are still absent.

use crate::config::Config;
use log::{info, warn};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

/// CSV files the pipeline expects in the data directory.
pub const REQUIRED_FILES: [&str; 5] = [
    "olist_orders_dataset.csv",
    "olist_customers_dataset.csv",
    "olist_order_items_dataset.csv",
    "olist_sellers_dataset.csv",
    "olist_geolocation_dataset.csv",
];

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("archive error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("archive contains no CSV entry")]
    EmptyArchive,
}

/// Download any missing dataset file. Never fails the run.
pub fn ensure_dataset(config: &Config) {
    if let Err(e) = fs::create_dir_all(&config.data_dir) {
        warn!("cannot create {}: {e}", config.data_dir.display());
        return;
    }

    for file_name in REQUIRED_FILES {
        let target = config.data_dir.join(file_name);
        if target.exists() {
            info!("exists: {file_name}");
            continue;
        }
        match fetch_file(&config.base_url, file_name, &target) {
            Ok(()) => info!("downloaded: {file_name}"),
            Err(e) => warn!("failed to download {file_name}: {e}"),
        }
    }
}

/// Fetch one file. The server delivers either a zip holding the CSV or the
/// raw CSV itself.
fn fetch_file(base_url: &str, file_name: &str, target: &Path) -> Result<(), FetchError> {
    let url = format!("{base_url}/{file_name}");
    let response = reqwest::blocking::get(&url)?.error_for_status()?;
    let body = response.bytes()?;

    if body.starts_with(b"PK") {
        unpack_csv(&body, target)
    } else {
        fs::write(target, &body)?;
        Ok(())
    }
}

/// Extract the first CSV entry of a zip archive to `target`.
fn unpack_csv(bytes: &[u8], target: &Path) -> Result<(), FetchError> {
    let mut archive = zip::ZipArchive::new(io::Cursor::new(bytes))?;
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        if entry.name().ends_with(".csv") {
            let mut out = fs::File::create(target)?;
            io::copy(&mut entry, &mut out)?;
            return Ok(());
        }
    }
    Err(FetchError::EmptyArchive)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn zip_with(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(io::Cursor::new(Vec::new()));
        for (name, content) in entries {
            writer
                .start_file(*name, zip::write::FileOptions::default())
                .unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn unpack_extracts_the_csv_entry() {
        let bytes = zip_with(&[
            ("readme.txt", "not this one"),
            ("olist_orders_dataset.csv", "order_id,order_status\na,delivered\n"),
        ]);
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("olist_orders_dataset.csv");

        unpack_csv(&bytes, &target).unwrap();

        let written = fs::read_to_string(&target).unwrap();
        assert_eq!(written, "order_id,order_status\na,delivered\n");
    }

    #[test]
    fn unpack_rejects_archive_without_csv() {
        let bytes = zip_with(&[("notes.txt", "nothing useful")]);
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.csv");

        let err = unpack_csv(&bytes, &target).unwrap_err();
        assert!(matches!(err, FetchError::EmptyArchive));
        assert!(!target.exists());
    }
}
