//! Master View Builder
//! Drops and recreates the derived view joining orders, items, customers
//! and sellers with the computed delay column.

use rusqlite::Connection;

/// Name of the derived view.
pub const MASTER_VIEW: &str = "logistics_master";

/// Drop and recreate the master view. The view has no migration path, so
/// it is rebuilt from scratch every run; this must happen after the loader
/// and before any query that reads it.
///
/// `delay_days` is delivered date minus estimated delivery date in whole
/// days (truncated toward zero), NULL when either date is absent.
pub fn rebuild_master_view(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(&format!(
        "DROP VIEW IF EXISTS {MASTER_VIEW};
         CREATE VIEW {MASTER_VIEW} AS
         SELECT
             o.order_id,
             o.order_purchase_timestamp,
             o.order_status,
             c.customer_city,
             c.customer_state,
             s.seller_city,
             s.seller_state,
             i.price,
             i.freight_value,
             CAST(julianday(o.order_delivered_customer_date)
                  - julianday(o.order_estimated_delivery_date) AS INTEGER) AS delay_days
         FROM orders o
         JOIN order_items i ON o.order_id = i.order_id
         JOIN customers c ON o.customer_id = c.customer_id
         JOIN sellers s ON i.seller_id = s.seller_id;"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::testutil::{fixture_conn, insert_order};

    #[test]
    fn delay_days_is_delivered_minus_estimated() {
        let conn = fixture_conn();
        insert_order(
            &conn,
            "o1",
            "delivered",
            "2017-10-02 10:56:33",
            Some("2017-10-20 12:00:00"),
            Some("2017-10-15 00:00:00"),
            "SP",
            "s1",
            "sao paulo",
            "SP",
            100.0,
            10.0,
        );
        rebuild_master_view(&conn).unwrap();

        let delay: i64 = conn
            .query_row("SELECT delay_days FROM logistics_master", [], |r| r.get(0))
            .unwrap();
        assert_eq!(delay, 5);
    }

    #[test]
    fn delay_days_is_null_when_a_date_is_absent() {
        let conn = fixture_conn();
        insert_order(
            &conn,
            "o1",
            "shipped",
            "2017-10-02 10:56:33",
            None,
            Some("2017-10-15 00:00:00"),
            "SP",
            "s1",
            "sao paulo",
            "SP",
            100.0,
            10.0,
        );
        rebuild_master_view(&conn).unwrap();

        let delay: Option<i64> = conn
            .query_row("SELECT delay_days FROM logistics_master", [], |r| r.get(0))
            .unwrap();
        assert_eq!(delay, None);
    }

    #[test]
    fn rebuild_is_repeatable() {
        let conn = fixture_conn();
        rebuild_master_view(&conn).unwrap();
        rebuild_master_view(&conn).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM logistics_master", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn view_inner_joins_drop_unmatched_orders() {
        let conn = fixture_conn();
        insert_order(
            &conn,
            "o1",
            "delivered",
            "2018-01-01 08:00:00",
            Some("2018-01-10 08:00:00"),
            Some("2018-01-05 08:00:00"),
            "RJ",
            "s1",
            "rio",
            "RJ",
            50.0,
            5.0,
        );
        // An order with no items never reaches the view.
        conn.execute(
            "INSERT INTO orders VALUES ('o2', 'c_o2', 'delivered',
             '2018-01-01 08:00:00', NULL, NULL)",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO customers VALUES ('c_o2', 'rio', 'RJ')",
            [],
        )
        .unwrap();
        rebuild_master_view(&conn).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM logistics_master", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }
}
