use rusqlite::Connection;

/// Initialize the catalog schema.
///
/// Custom options are embedded in the parent row as a JSON array: they
/// are always loaded and saved together with their product, so a joined
/// table would buy nothing.
pub fn init_db(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        -- Products (catalog entries with four fixed price tiers)
        -- A tier with either price at 0 is unconfigured, not out of stock.
        CREATE TABLE IF NOT EXISTS products (
            id TEXT PRIMARY KEY,
            category TEXT NOT NULL,
            name TEXT NOT NULL,
            image TEXT NOT NULL,
            description TEXT NOT NULL,
            price_1_month_actual INTEGER NOT NULL DEFAULT 0,
            price_1_month_selling INTEGER NOT NULL DEFAULT 0,
            in_stock_1_month INTEGER NOT NULL DEFAULT 0,
            price_3_month_actual INTEGER NOT NULL DEFAULT 0,
            price_3_month_selling INTEGER NOT NULL DEFAULT 0,
            in_stock_3_month INTEGER NOT NULL DEFAULT 0,
            price_6_month_actual INTEGER NOT NULL DEFAULT 0,
            price_6_month_selling INTEGER NOT NULL DEFAULT 0,
            in_stock_6_month INTEGER NOT NULL DEFAULT 0,
            price_12_month_actual INTEGER NOT NULL DEFAULT 0,
            price_12_month_selling INTEGER NOT NULL DEFAULT 0,
            in_stock_12_month INTEGER NOT NULL DEFAULT 0,
            custom_options TEXT NOT NULL DEFAULT '[]',
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_products_category ON products(category);
        "#,
    )
}
