//! Reports module - fixed aggregate queries and console table rendering.

mod queries;

pub use queries::{
    city_bottlenecks, financial_impact, run_all, shipping_routes, state_delays, worst_sellers,
};

use std::fmt;

/// A small query result ready for console display.
#[derive(Debug, Clone)]
pub struct ReportTable {
    pub title: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl fmt::Display for ReportTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- {} ---", self.title)?;

        if self.rows.is_empty() {
            return writeln!(f, "(no rows)");
        }

        let mut widths: Vec<usize> = self.columns.iter().map(|c| c.len()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.len());
            }
        }

        for (i, column) in self.columns.iter().enumerate() {
            write!(f, "{:<width$}  ", column, width = widths[i])?;
        }
        writeln!(f)?;

        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                write!(f, "{:<width$}  ", cell, width = widths[i])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_aligns_columns() {
        let table = ReportTable {
            title: "EXAMPLE".to_string(),
            columns: vec!["state".to_string(), "avg_delay".to_string()],
            rows: vec![
                vec!["SP".to_string(), "12.50".to_string()],
                vec!["AL".to_string(), "8.00".to_string()],
            ],
        };
        let text = table.to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "--- EXAMPLE ---");
        assert!(lines[1].starts_with("state  avg_delay"));
        // Cells are padded to their column width.
        assert!(lines[2].starts_with("SP     12.50"));
    }

    #[test]
    fn display_handles_empty_result() {
        let table = ReportTable {
            title: "EMPTY".to_string(),
            columns: vec!["a".to_string()],
            rows: vec![],
        };
        assert!(table.to_string().contains("(no rows)"));
    }
}
