use chrono::Utc;
use rusqlite::{Connection, params, types::Value};
use uuid::Uuid;

use crate::error::Result;
use crate::models::{CreateProduct, CustomOption, Product, UpdateProduct};

use super::from_row::{PRODUCT_COLS, query_all, query_one};

fn now() -> i64 {
    Utc::now().timestamp()
}

fn gen_id() -> String {
    Uuid::new_v4().to_string()
}

/// Give every custom option a stable id. Options arriving from the admin
/// form may carry client-generated ids; blank ones get a fresh UUID.
fn with_option_ids(options: &[CustomOption]) -> Vec<CustomOption> {
    options
        .iter()
        .cloned()
        .map(|mut opt| {
            if opt.id.trim().is_empty() {
                opt.id = gen_id();
            }
            opt
        })
        .collect()
}

/// Builder for dynamic UPDATE statements with optional fields.
/// Combines multiple field updates into a single query for efficiency.
struct UpdateBuilder {
    table: &'static str,
    id: String,
    fields: Vec<(&'static str, Value)>,
    track_updated_at: bool,
}

impl UpdateBuilder {
    fn new(table: &'static str, id: &str) -> Self {
        Self {
            table,
            id: id.to_string(),
            fields: Vec::new(),
            track_updated_at: false,
        }
    }

    fn with_updated_at(mut self) -> Self {
        self.track_updated_at = true;
        self
    }

    fn set(mut self, column: &'static str, value: impl Into<Value>) -> Self {
        self.fields.push((column, value.into()));
        self
    }

    fn set_opt<V: Into<Value>>(self, column: &'static str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.set(column, v),
            None => self,
        }
    }

    fn execute(mut self, conn: &Connection) -> Result<bool> {
        if self.fields.is_empty() {
            return Ok(false);
        }
        if self.track_updated_at {
            self.fields.push(("updated_at", now().into()));
        }
        let sets: Vec<String> = self
            .fields
            .iter()
            .map(|(col, _)| format!("{} = ?", col))
            .collect();
        let mut values: Vec<Value> = self.fields.into_iter().map(|(_, v)| v).collect();
        values.push(self.id.into());
        let sql = format!("UPDATE {} SET {} WHERE id = ?", self.table, sets.join(", "));
        let affected = conn.execute(&sql, rusqlite::params_from_iter(values))?;
        Ok(affected > 0)
    }
}

// ============ Products ============

pub fn create_product(conn: &Connection, input: &CreateProduct) -> Result<Product> {
    let id = gen_id();
    let now = now();
    let custom_options = with_option_ids(&input.custom_options);
    let custom_options_json = serde_json::to_string(&custom_options)?;

    conn.execute(
        "INSERT INTO products (id, category, name, image, description,
             price_1_month_actual, price_1_month_selling, in_stock_1_month,
             price_3_month_actual, price_3_month_selling, in_stock_3_month,
             price_6_month_actual, price_6_month_selling, in_stock_6_month,
             price_12_month_actual, price_12_month_selling, in_stock_12_month,
             custom_options, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20)",
        params![
            &id,
            &input.category,
            &input.name,
            &input.image,
            &input.description,
            input.price_1_month_actual,
            input.price_1_month_selling,
            input.in_stock_1_month,
            input.price_3_month_actual,
            input.price_3_month_selling,
            input.in_stock_3_month,
            input.price_6_month_actual,
            input.price_6_month_selling,
            input.in_stock_6_month,
            input.price_12_month_actual,
            input.price_12_month_selling,
            input.in_stock_12_month,
            &custom_options_json,
            now,
            now
        ],
    )?;

    Ok(Product {
        id,
        category: input.category.clone(),
        name: input.name.clone(),
        image: input.image.clone(),
        description: input.description.clone(),
        price_1_month_actual: input.price_1_month_actual,
        price_1_month_selling: input.price_1_month_selling,
        in_stock_1_month: input.in_stock_1_month,
        price_3_month_actual: input.price_3_month_actual,
        price_3_month_selling: input.price_3_month_selling,
        in_stock_3_month: input.in_stock_3_month,
        price_6_month_actual: input.price_6_month_actual,
        price_6_month_selling: input.price_6_month_selling,
        in_stock_6_month: input.in_stock_6_month,
        price_12_month_actual: input.price_12_month_actual,
        price_12_month_selling: input.price_12_month_selling,
        in_stock_12_month: input.in_stock_12_month,
        custom_options,
        created_at: now,
        updated_at: now,
    })
}

pub fn count_products(conn: &Connection) -> Result<i64> {
    let count = conn.query_row("SELECT COUNT(*) FROM products", [], |row| row.get(0))?;
    Ok(count)
}

pub fn get_product_by_id(conn: &Connection, id: &str) -> Result<Option<Product>> {
    query_one(
        conn,
        &format!("SELECT {} FROM products WHERE id = ?1", PRODUCT_COLS),
        &[&id],
    )
}

pub fn list_products(conn: &Connection) -> Result<Vec<Product>> {
    query_all(
        conn,
        &format!("SELECT {} FROM products ORDER BY created_at DESC", PRODUCT_COLS),
        &[],
    )
}

pub fn list_products_by_category(conn: &Connection, category: &str) -> Result<Vec<Product>> {
    query_all(
        conn,
        &format!(
            "SELECT {} FROM products WHERE category = ?1 ORDER BY created_at DESC",
            PRODUCT_COLS
        ),
        &[&category],
    )
}

pub fn update_product(conn: &Connection, id: &str, input: &UpdateProduct) -> Result<bool> {
    let custom_options_json = input
        .custom_options
        .as_deref()
        .map(|opts| serde_json::to_string(&with_option_ids(opts)))
        .transpose()?;

    UpdateBuilder::new("products", id)
        .with_updated_at()
        .set_opt("category", input.category.clone())
        .set_opt("name", input.name.clone())
        .set_opt("image", input.image.clone())
        .set_opt("description", input.description.clone())
        .set_opt("price_1_month_actual", input.price_1_month_actual)
        .set_opt("price_1_month_selling", input.price_1_month_selling)
        .set_opt("in_stock_1_month", input.in_stock_1_month)
        .set_opt("price_3_month_actual", input.price_3_month_actual)
        .set_opt("price_3_month_selling", input.price_3_month_selling)
        .set_opt("in_stock_3_month", input.in_stock_3_month)
        .set_opt("price_6_month_actual", input.price_6_month_actual)
        .set_opt("price_6_month_selling", input.price_6_month_selling)
        .set_opt("in_stock_6_month", input.in_stock_6_month)
        .set_opt("price_12_month_actual", input.price_12_month_actual)
        .set_opt("price_12_month_selling", input.price_12_month_selling)
        .set_opt("in_stock_12_month", input.in_stock_12_month)
        .set_opt("custom_options", custom_options_json)
        .execute(conn)
}

pub fn delete_product(conn: &Connection, id: &str) -> Result<bool> {
    let deleted = conn.execute("DELETE FROM products WHERE id = ?1", params![id])?;
    Ok(deleted > 0)
}
