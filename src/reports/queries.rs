//! Report Queries
//! The fixed set of aggregate reports run against the base tables and the
//! master view. Each one is independent and parameterless; only the city
//! bottleneck report needs the view to exist. Delay averages truncate each
//! row to whole days first, the same arithmetic the view applies to
//! `delay_days`.

use crate::reports::ReportTable;
use rusqlite::types::ValueRef;
use rusqlite::Connection;

/// Run every report in its fixed order.
pub fn run_all(conn: &Connection) -> rusqlite::Result<Vec<ReportTable>> {
    Ok(vec![
        state_delays(conn)?,
        worst_sellers(conn)?,
        financial_impact(conn)?,
        shipping_routes(conn)?,
        city_bottlenecks(conn)?,
    ])
}

/// Average shipping delay per customer state, worst ten states.
pub fn state_delays(conn: &Connection) -> rusqlite::Result<ReportTable> {
    query_table(
        conn,
        "TOP 10 STATES WITH HIGHEST DELAYS",
        "SELECT c.customer_state,
                ROUND(AVG(CAST(julianday(o.order_delivered_customer_date)
                               - julianday(o.order_estimated_delivery_date) AS INTEGER)), 2)
                    AS avg_delay
         FROM orders o
         JOIN customers c ON o.customer_id = c.customer_id
         WHERE o.order_status = 'delivered'
           AND o.order_delivered_customer_date > o.order_estimated_delivery_date
         GROUP BY c.customer_state
         ORDER BY avg_delay DESC
         LIMIT 10",
    )
}

/// Sellers causing the most delays: more than 10 late orders, worst five
/// by average delay.
pub fn worst_sellers(conn: &Connection) -> rusqlite::Result<ReportTable> {
    query_table(
        conn,
        "SELLER BLACKLIST (TOP 5 OFFENDERS)",
        "SELECT i.seller_id,
                COUNT(o.order_id) AS delayed_orders_count,
                ROUND(AVG(CAST(julianday(o.order_delivered_customer_date)
                               - julianday(o.order_estimated_delivery_date) AS INTEGER)), 2)
                    AS avg_delay_days
         FROM orders o
         JOIN order_items i ON o.order_id = i.order_id
         WHERE o.order_status = 'delivered'
           AND o.order_delivered_customer_date > o.order_estimated_delivery_date
         GROUP BY i.seller_id
         HAVING COUNT(o.order_id) > 10
         ORDER BY avg_delay_days DESC
         LIMIT 5",
    )
}

/// Money stuck in delayed shipments: the five customer states with the
/// most wasted shipping cost.
pub fn financial_impact(conn: &Connection) -> rusqlite::Result<ReportTable> {
    query_table(
        conn,
        "FINANCIAL LOSS REPORT (BY STATE)",
        "SELECT c.customer_state,
                COUNT(o.order_id) AS delayed_orders,
                ROUND(SUM(i.freight_value), 2) AS wasted_shipping_cost,
                ROUND(SUM(i.price), 2) AS impacted_revenue
         FROM orders o
         JOIN customers c ON o.customer_id = c.customer_id
         JOIN order_items i ON o.order_id = i.order_id
         WHERE o.order_status = 'delivered'
           AND o.order_delivered_customer_date > o.order_estimated_delivery_date
         GROUP BY c.customer_state
         ORDER BY wasted_shipping_cost DESC
         LIMIT 5",
    )
}

/// Worst performing shipping routes (origin state -> destination state),
/// among routes with more than 20 late orders.
pub fn shipping_routes(conn: &Connection) -> rusqlite::Result<ReportTable> {
    query_table(
        conn,
        "WORST SHIPPING ROUTES (ORIGIN -> DEST)",
        "SELECT s.seller_state AS origin,
                c.customer_state AS destination,
                COUNT(o.order_id) AS parcel_count,
                ROUND(AVG(CAST(julianday(o.order_delivered_customer_date)
                               - julianday(o.order_estimated_delivery_date) AS INTEGER)), 2)
                    AS avg_delay
         FROM orders o
         JOIN order_items i ON o.order_id = i.order_id
         JOIN customers c ON o.customer_id = c.customer_id
         JOIN sellers s ON i.seller_id = s.seller_id
         WHERE o.order_status = 'delivered'
           AND o.order_delivered_customer_date > o.order_estimated_delivery_date
         GROUP BY s.seller_state, c.customer_state
         HAVING COUNT(o.order_id) > 20
         ORDER BY avg_delay DESC
         LIMIT 5",
    )
}

/// Seller cities causing delays, read from the master view.
pub fn city_bottlenecks(conn: &Connection) -> rusqlite::Result<ReportTable> {
    query_table(
        conn,
        "CITY BOTTLENECKS (SELLER LOCATIONS)",
        "SELECT seller_city,
                COUNT(order_id) AS total_orders,
                ROUND(AVG(delay_days), 2) AS avg_delay
         FROM logistics_master
         WHERE delay_days > 0
         GROUP BY seller_city
         HAVING COUNT(order_id) > 10
         ORDER BY avg_delay DESC
         LIMIT 5",
    )
}

/// Execute a parameterless query and collect it into a [`ReportTable`].
fn query_table(conn: &Connection, title: &str, sql: &str) -> rusqlite::Result<ReportTable> {
    let mut stmt = conn.prepare(sql)?;
    let columns: Vec<String> = stmt.column_names().iter().map(|s| s.to_string()).collect();
    let width = columns.len();

    let mut rows = stmt.query([])?;
    let mut collected = Vec::new();
    while let Some(row) = rows.next()? {
        let mut cells = Vec::with_capacity(width);
        for i in 0..width {
            cells.push(format_cell(row.get_ref(i)?));
        }
        collected.push(cells);
    }

    Ok(ReportTable {
        title: title.to_string(),
        columns,
        rows: collected,
    })
}

fn format_cell(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => "-".to_string(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(r) => format!("{r:.2}"),
        ValueRef::Text(t) => String::from_utf8_lossy(t).into_owned(),
        ValueRef::Blob(_) => "<blob>".to_string(),
    }
}
