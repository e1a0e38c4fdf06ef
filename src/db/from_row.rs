//! Row mapping trait and helpers for reducing boilerplate in queries.

use rusqlite::{Connection, OptionalExtension, Row, ToSql};

use crate::models::Product;

/// Trait for constructing a type from a database row.
///
/// Implementing this trait allows using the `query_one` and `query_all`
/// helper functions, reducing repetitive row mapping closures.
pub trait FromRow: Sized {
    fn from_row(row: &Row) -> rusqlite::Result<Self>;
}

/// Query for a single optional result.
pub fn query_one<T: FromRow>(
    conn: &Connection,
    sql: &str,
    params: &[&dyn ToSql],
) -> crate::error::Result<Option<T>> {
    conn.query_row(sql, params, T::from_row)
        .optional()
        .map_err(Into::into)
}

/// Query for multiple results.
pub fn query_all<T: FromRow>(
    conn: &Connection,
    sql: &str,
    params: &[&dyn ToSql],
) -> crate::error::Result<Vec<T>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params, T::from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

// ============ SQL SELECT Constants ============

pub const PRODUCT_COLS: &str = "id, category, name, image, description, \
     price_1_month_actual, price_1_month_selling, in_stock_1_month, \
     price_3_month_actual, price_3_month_selling, in_stock_3_month, \
     price_6_month_actual, price_6_month_selling, in_stock_6_month, \
     price_12_month_actual, price_12_month_selling, in_stock_12_month, \
     custom_options, created_at, updated_at";

// ============ FromRow Implementations ============

impl FromRow for Product {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let custom_options_str: String = row.get(17)?;
        Ok(Product {
            id: row.get(0)?,
            category: row.get(1)?,
            name: row.get(2)?,
            image: row.get(3)?,
            description: row.get(4)?,
            price_1_month_actual: row.get(5)?,
            price_1_month_selling: row.get(6)?,
            in_stock_1_month: row.get::<_, i32>(7)? != 0,
            price_3_month_actual: row.get(8)?,
            price_3_month_selling: row.get(9)?,
            in_stock_3_month: row.get::<_, i32>(10)? != 0,
            price_6_month_actual: row.get(11)?,
            price_6_month_selling: row.get(12)?,
            in_stock_6_month: row.get::<_, i32>(13)? != 0,
            price_12_month_actual: row.get(14)?,
            price_12_month_selling: row.get(15)?,
            in_stock_12_month: row.get::<_, i32>(16)? != 0,
            custom_options: serde_json::from_str(&custom_options_str).unwrap_or_default(),
            created_at: row.get(18)?,
            updated_at: row.get(19)?,
        })
    }
}
