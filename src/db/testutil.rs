//! Shared in-memory fixtures for database, report and dashboard tests.

use rusqlite::Connection;

/// Base-table schema matching what the CSV loader produces.
pub fn fixture_conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE orders (
             order_id TEXT, customer_id TEXT, order_status TEXT,
             order_purchase_timestamp TEXT,
             order_delivered_customer_date TEXT,
             order_estimated_delivery_date TEXT
         );
         CREATE TABLE customers (customer_id TEXT, customer_city TEXT, customer_state TEXT);
         CREATE TABLE order_items (order_id TEXT, seller_id TEXT, price REAL, freight_value REAL);
         CREATE TABLE sellers (seller_id TEXT PRIMARY KEY, seller_city TEXT, seller_state TEXT);",
    )
    .unwrap();
    conn
}

/// Insert one fully joined order. `delivered`/`estimated` may be NULL.
#[allow(clippy::too_many_arguments)]
pub fn insert_order(
    conn: &Connection,
    order_id: &str,
    status: &str,
    purchase: &str,
    delivered: Option<&str>,
    estimated: Option<&str>,
    customer_state: &str,
    seller_id: &str,
    seller_city: &str,
    seller_state: &str,
    price: f64,
    freight: f64,
) {
    let customer_id = format!("c_{order_id}");
    conn.execute(
        "INSERT INTO orders VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        rusqlite::params![order_id, customer_id, status, purchase, delivered, estimated],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO customers VALUES (?1, ?2, ?3)",
        rusqlite::params![customer_id, format!("city_{customer_state}"), customer_state],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO order_items VALUES (?1, ?2, ?3, ?4)",
        rusqlite::params![order_id, seller_id, price, freight],
    )
    .unwrap();
    conn.execute(
        "INSERT OR IGNORE INTO sellers VALUES (?1, ?2, ?3)",
        rusqlite::params![seller_id, seller_city, seller_state],
    )
    .unwrap();
}

/// A delivered order that arrived `delay` days after the estimate.
#[allow(clippy::too_many_arguments)]
pub fn insert_late_order(
    conn: &Connection,
    order_id: &str,
    customer_state: &str,
    seller_id: &str,
    seller_city: &str,
    seller_state: &str,
    delay: i64,
    price: f64,
    freight: f64,
) {
    let delivered = format!("2018-01-{:02} 12:00:00", 10 + delay);
    insert_order(
        conn,
        order_id,
        "delivered",
        "2017-12-15 09:30:00",
        Some(&delivered),
        Some("2018-01-10 12:00:00"),
        customer_state,
        seller_id,
        seller_city,
        seller_state,
        price,
        freight,
    );
}
