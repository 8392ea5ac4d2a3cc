//! Charts module - dashboard panel queries and static export.

mod exporter;

pub use exporter::{export_dashboard, ExportError};

use rusqlite::Connection;

/// Freight-value boundaries for the package size buckets.
pub const SMALL_FREIGHT_MAX: f64 = 15.0;
pub const MEDIUM_FREIGHT_MAX: f64 = 40.0;

/// The four panel series of the delay dashboard, all read from the master
/// view. Each series is a list of (label, value) pairs in display order.
#[derive(Debug, Clone, Default)]
pub struct DashboardData {
    /// Average delay per customer state, worst first.
    pub state_delays: Vec<(String, f64)>,
    /// Average delay per package size bucket, worst first.
    pub size_delays: Vec<(String, f64)>,
    /// Average delay per purchase month (YYYY-MM), chronological.
    pub monthly_trend: Vec<(String, f64)>,
    /// Total order value split into delayed vs on-time.
    pub revenue_split: Vec<(String, f64)>,
}

impl DashboardData {
    /// Run the four panel queries. The master view must exist.
    pub fn query(conn: &Connection) -> rusqlite::Result<Self> {
        let state_delays = pairs(
            conn,
            "SELECT customer_state, ROUND(AVG(delay_days), 2) AS avg_delay
             FROM logistics_master
             WHERE delay_days > 0
             GROUP BY customer_state
             ORDER BY avg_delay DESC",
        )?;

        let size_delays = pairs(
            conn,
            &format!(
                "SELECT CASE
                            WHEN freight_value < {SMALL_FREIGHT_MAX} THEN 'Small/Light'
                            WHEN freight_value BETWEEN {SMALL_FREIGHT_MAX} AND {MEDIUM_FREIGHT_MAX}
                                THEN 'Medium'
                            ELSE 'Large/Heavy'
                        END AS package_type,
                        ROUND(AVG(delay_days), 2) AS avg_delay
                 FROM logistics_master
                 WHERE delay_days > 0
                 GROUP BY package_type
                 ORDER BY avg_delay DESC"
            ),
        )?;

        let monthly_trend = pairs(
            conn,
            "SELECT strftime('%Y-%m', order_purchase_timestamp) AS month,
                    ROUND(AVG(delay_days), 2) AS avg_delay
             FROM logistics_master
             WHERE delay_days IS NOT NULL
               AND order_purchase_timestamp IS NOT NULL
             GROUP BY month
             ORDER BY month",
        )?;

        // A NULL delay counts as on-time here: the CASE falls through.
        let revenue_split = pairs(
            conn,
            "SELECT CASE WHEN delay_days > 0 THEN 'Delayed Orders'
                         ELSE 'On-time Orders' END AS status,
                    ROUND(SUM(price), 2) AS total_value
             FROM logistics_master
             GROUP BY status",
        )?;

        Ok(Self {
            state_delays,
            size_delays,
            monthly_trend,
            revenue_split,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.state_delays.is_empty()
            && self.size_delays.is_empty()
            && self.monthly_trend.is_empty()
            && self.revenue_split.is_empty()
    }
}

/// Collect a two-column (TEXT, REAL) query into label/value pairs.
fn pairs(conn: &Connection, sql: &str) -> rusqlite::Result<Vec<(String, f64)>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, f64>(1)?)))?;
    rows.collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::rebuild_master_view;
    use crate::db::testutil::{fixture_conn, insert_late_order, insert_order};

    fn dashboard_fixture() -> Connection {
        let conn = fixture_conn();
        // Two delayed SP orders with small freight, one delayed RJ order
        // with heavy freight, one on-time order and one still in transit.
        insert_late_order(&conn, "a", "SP", "s1", "sao paulo", "SP", 4, 100.0, 10.0);
        insert_late_order(&conn, "b", "SP", "s1", "sao paulo", "SP", 2, 50.0, 14.99);
        insert_late_order(&conn, "c", "RJ", "s2", "rio", "RJ", 9, 300.0, 55.0);
        insert_order(
            &conn,
            "ontime",
            "delivered",
            "2018-02-03 10:00:00",
            Some("2018-02-10 10:00:00"),
            Some("2018-02-20 10:00:00"),
            "MG",
            "s1",
            "sao paulo",
            "SP",
            80.0,
            20.0,
        );
        insert_order(
            &conn,
            "transit",
            "shipped",
            "2018-02-05 10:00:00",
            None,
            Some("2018-02-25 10:00:00"),
            "MG",
            "s1",
            "sao paulo",
            "SP",
            40.0,
            20.0,
        );
        rebuild_master_view(&conn).unwrap();
        conn
    }

    #[test]
    fn state_panel_is_sorted_by_descending_delay() {
        let data = DashboardData::query(&dashboard_fixture()).unwrap();
        let labels: Vec<&str> = data.state_delays.iter().map(|(s, _)| s.as_str()).collect();
        assert_eq!(labels, vec!["RJ", "SP"]);
        assert!((data.state_delays[0].1 - 9.0).abs() < 1e-9);
        assert!((data.state_delays[1].1 - 3.0).abs() < 1e-9);
    }

    #[test]
    fn size_panel_buckets_by_freight_value() {
        let data = DashboardData::query(&dashboard_fixture()).unwrap();
        // Freight 10.0 and 14.99 are Small/Light, 55.0 is Large/Heavy; the
        // on-time and in-transit orders never reach the delayed buckets.
        let buckets: Vec<&str> = data.size_delays.iter().map(|(s, _)| s.as_str()).collect();
        assert_eq!(buckets, vec!["Large/Heavy", "Small/Light"]);
    }

    #[test]
    fn boundary_freight_values_are_medium() {
        let conn = fixture_conn();
        insert_late_order(&conn, "lo", "SP", "s1", "sao paulo", "SP", 3, 10.0, 15.0);
        insert_late_order(&conn, "hi", "SP", "s1", "sao paulo", "SP", 3, 10.0, 40.0);
        rebuild_master_view(&conn).unwrap();

        let data = DashboardData::query(&conn).unwrap();
        assert_eq!(data.size_delays.len(), 1);
        assert_eq!(data.size_delays[0].0, "Medium");
    }

    #[test]
    fn trend_panel_is_chronological_and_includes_early_deliveries() {
        let data = DashboardData::query(&dashboard_fixture()).unwrap();
        // Late orders were purchased in 2017-12, the early delivery in
        // 2018-02; the in-transit order has a NULL delay and is excluded.
        let months: Vec<&str> = data.monthly_trend.iter().map(|(m, _)| m.as_str()).collect();
        assert_eq!(months, vec!["2017-12", "2018-02"]);
    }

    #[test]
    fn revenue_split_counts_null_delay_as_on_time() {
        let data = DashboardData::query(&dashboard_fixture()).unwrap();
        let mut split = data.revenue_split.clone();
        split.sort_by(|a, b| a.0.cmp(&b.0));

        assert_eq!(split[0].0, "Delayed Orders");
        assert!((split[0].1 - 450.0).abs() < 1e-9);
        // On-time total includes the undelivered order's 40.0.
        assert_eq!(split[1].0, "On-time Orders");
        assert!((split[1].1 - 120.0).abs() < 1e-9);
    }

    #[test]
    fn empty_view_yields_empty_dashboard() {
        let conn = fixture_conn();
        rebuild_master_view(&conn).unwrap();
        let data = DashboardData::query(&conn).unwrap();
        assert!(data.is_empty());
    }
}
