//! CSV Loader Module
//! Reads the Olist CSV files with Polars and replaces the corresponding
//! SQLite tables each run. Missing files are logged and skipped; database
//! errors abort the load.

use crate::db::view::MASTER_VIEW;
use log::{info, warn};
use polars::prelude::*;
use rusqlite::types::Value;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Database error: {0}")]
    DbError(#[from] rusqlite::Error),
}

/// (table name, CSV file name) pairs loaded each run.
pub const TABLE_SOURCES: [(&str, &str); 5] = [
    ("orders", "olist_orders_dataset.csv"),
    ("customers", "olist_customers_dataset.csv"),
    ("order_items", "olist_order_items_dataset.csv"),
    ("sellers", "olist_sellers_dataset.csv"),
    ("geolocation", "olist_geolocation_dataset.csv"),
];

/// Handles CSV-to-table loading with Polars for schema inference.
pub struct CsvLoader {
    data_dir: PathBuf,
}

impl CsvLoader {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            data_dir: data_dir.to_path_buf(),
        }
    }

    /// Replace every base table with the contents of its CSV. The master
    /// view is dropped first: the tables under it are about to change and
    /// the view has no migration path.
    pub fn load_all(&self, conn: &Connection) -> Result<(), LoaderError> {
        conn.execute_batch(&format!("DROP VIEW IF EXISTS {MASTER_VIEW};"))?;

        for (table, file_name) in TABLE_SOURCES {
            let path = self.data_dir.join(file_name);
            if !path.exists() {
                warn!("file missing: {}", path.display());
                continue;
            }
            info!("loading {table}...");
            let df = Self::read_csv(&path)?;
            Self::replace_table(conn, table, &df)?;
            info!("table '{table}' synchronized ({} rows)", df.height());
        }
        Ok(())
    }

    /// Load a CSV file using Polars.
    fn read_csv(path: &Path) -> Result<DataFrame, LoaderError> {
        let path_str = path.to_string_lossy().to_string();
        let df = LazyCsvReader::new(&path_str)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;
        Ok(df)
    }

    /// Drop and recreate `table` to match the DataFrame schema, then insert
    /// every row inside one transaction.
    fn replace_table(conn: &Connection, table: &str, df: &DataFrame) -> Result<(), LoaderError> {
        let column_defs: Vec<String> = df
            .get_columns()
            .iter()
            .map(|col| format!("\"{}\" {}", col.name(), sqlite_type(col.dtype())))
            .collect();

        conn.execute_batch(&format!(
            "DROP TABLE IF EXISTS \"{table}\";
             CREATE TABLE \"{table}\" ({});",
            column_defs.join(", ")
        ))?;

        let column_list: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|name| format!("\"{name}\""))
            .collect();
        let placeholders = vec!["?"; column_list.len()].join(", ");
        let insert_sql = format!(
            "INSERT INTO \"{table}\" ({}) VALUES ({})",
            column_list.join(", "),
            placeholders
        );

        let tx = conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare(&insert_sql)?;
            let series: Vec<&Series> = df
                .get_columns()
                .iter()
                .map(|col| col.as_materialized_series())
                .collect();

            for row in 0..df.height() {
                let mut values: Vec<Value> = Vec::with_capacity(series.len());
                for s in &series {
                    values.push(to_sql_value(s.get(row)?));
                }
                stmt.execute(rusqlite::params_from_iter(values))?;
            }
        }
        tx.commit()?;
        Ok(())
    }
}

/// Map a Polars dtype to the SQLite column affinity it should land in.
fn sqlite_type(dtype: &DataType) -> &'static str {
    match dtype {
        DataType::Boolean
        | DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32
        | DataType::UInt64 => "INTEGER",
        DataType::Float32 | DataType::Float64 => "REAL",
        _ => "TEXT",
    }
}

/// Convert one Polars cell into an owned SQLite value.
fn to_sql_value(value: AnyValue) -> Value {
    match value {
        AnyValue::Null => Value::Null,
        AnyValue::Boolean(b) => Value::Integer(b as i64),
        AnyValue::Int8(v) => Value::Integer(v as i64),
        AnyValue::Int16(v) => Value::Integer(v as i64),
        AnyValue::Int32(v) => Value::Integer(v as i64),
        AnyValue::Int64(v) => Value::Integer(v),
        AnyValue::UInt8(v) => Value::Integer(v as i64),
        AnyValue::UInt16(v) => Value::Integer(v as i64),
        AnyValue::UInt32(v) => Value::Integer(v as i64),
        AnyValue::UInt64(v) => Value::Integer(v as i64),
        AnyValue::Float32(v) => Value::Real(v as f64),
        AnyValue::Float64(v) => Value::Real(v),
        AnyValue::String(s) => Value::Text(s.to_string()),
        AnyValue::StringOwned(s) => Value::Text(s.to_string()),
        other => Value::Text(other.to_string().trim_matches('"').to_string()),
    }
}
