//! Database module - SQLite connection, CSV loading and the master view.

mod loader;
#[cfg(test)]
pub mod testutil;
mod view;

pub use loader::{CsvLoader, LoaderError};
pub use view::{rebuild_master_view, MASTER_VIEW};

use rusqlite::Connection;
use std::path::Path;

/// Open (or create) the SQLite database file.
pub fn connect(path: &Path) -> rusqlite::Result<Connection> {
    Connection::open(path)
}
