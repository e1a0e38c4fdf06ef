use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, FieldError, Result};

/// Minimum description length enforced on create/update.
const MIN_DESCRIPTION_CHARS: usize = 10;

/// An admin-defined plan with its own label, price pair and stock flag.
///
/// Stored embedded in the parent product, in admin-entered order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomOption {
    #[serde(default)]
    pub id: String,
    pub label: String,
    pub actual_price: i64,
    pub selling_price: i64,
    #[serde(default)]
    pub in_stock: bool,
}

/// A catalog entry: one subscription product with four fixed-duration
/// price tiers and an open-ended list of custom options.
///
/// A tier whose prices are not both positive is unconfigured - it is not
/// a purchasable plan, regardless of its stock flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub category: String,
    pub name: String,
    pub image: String,
    pub description: String,

    #[serde(rename = "price1MonthActual")]
    pub price_1_month_actual: i64,
    #[serde(rename = "price1MonthSelling")]
    pub price_1_month_selling: i64,
    #[serde(rename = "inStock1Month")]
    pub in_stock_1_month: bool,

    #[serde(rename = "price3MonthActual")]
    pub price_3_month_actual: i64,
    #[serde(rename = "price3MonthSelling")]
    pub price_3_month_selling: i64,
    #[serde(rename = "inStock3Month")]
    pub in_stock_3_month: bool,

    #[serde(rename = "price6MonthActual")]
    pub price_6_month_actual: i64,
    #[serde(rename = "price6MonthSelling")]
    pub price_6_month_selling: i64,
    #[serde(rename = "inStock6Month")]
    pub in_stock_6_month: bool,

    #[serde(rename = "price12MonthActual")]
    pub price_12_month_actual: i64,
    #[serde(rename = "price12MonthSelling")]
    pub price_12_month_selling: i64,
    #[serde(rename = "inStock12Month")]
    pub in_stock_12_month: bool,

    pub custom_options: Vec<CustomOption>,

    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    pub category: String,
    pub name: String,
    pub image: String,
    pub description: String,

    #[serde(rename = "price1MonthActual", default)]
    pub price_1_month_actual: i64,
    #[serde(rename = "price1MonthSelling", default)]
    pub price_1_month_selling: i64,
    #[serde(rename = "inStock1Month", default)]
    pub in_stock_1_month: bool,

    #[serde(rename = "price3MonthActual", default)]
    pub price_3_month_actual: i64,
    #[serde(rename = "price3MonthSelling", default)]
    pub price_3_month_selling: i64,
    #[serde(rename = "inStock3Month", default)]
    pub in_stock_3_month: bool,

    #[serde(rename = "price6MonthActual", default)]
    pub price_6_month_actual: i64,
    #[serde(rename = "price6MonthSelling", default)]
    pub price_6_month_selling: i64,
    #[serde(rename = "inStock6Month", default)]
    pub in_stock_6_month: bool,

    #[serde(rename = "price12MonthActual", default)]
    pub price_12_month_actual: i64,
    #[serde(rename = "price12MonthSelling", default)]
    pub price_12_month_selling: i64,
    #[serde(rename = "inStock12Month", default)]
    pub in_stock_12_month: bool,

    #[serde(default)]
    pub custom_options: Vec<CustomOption>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
    pub category: Option<String>,
    pub name: Option<String>,
    pub image: Option<String>,
    pub description: Option<String>,

    #[serde(rename = "price1MonthActual")]
    pub price_1_month_actual: Option<i64>,
    #[serde(rename = "price1MonthSelling")]
    pub price_1_month_selling: Option<i64>,
    #[serde(rename = "inStock1Month")]
    pub in_stock_1_month: Option<bool>,

    #[serde(rename = "price3MonthActual")]
    pub price_3_month_actual: Option<i64>,
    #[serde(rename = "price3MonthSelling")]
    pub price_3_month_selling: Option<i64>,
    #[serde(rename = "inStock3Month")]
    pub in_stock_3_month: Option<bool>,

    #[serde(rename = "price6MonthActual")]
    pub price_6_month_actual: Option<i64>,
    #[serde(rename = "price6MonthSelling")]
    pub price_6_month_selling: Option<i64>,
    #[serde(rename = "inStock6Month")]
    pub in_stock_6_month: Option<bool>,

    #[serde(rename = "price12MonthActual")]
    pub price_12_month_actual: Option<i64>,
    #[serde(rename = "price12MonthSelling")]
    pub price_12_month_selling: Option<i64>,
    #[serde(rename = "inStock12Month")]
    pub in_stock_12_month: Option<bool>,

    /// When present, replaces the stored list wholesale.
    pub custom_options: Option<Vec<CustomOption>>,
}

fn validate_category(errors: &mut Vec<FieldError>, category: &str) {
    if category.trim().is_empty() {
        errors.push(FieldError::new("category", "Category is required"));
    }
}

fn validate_name(errors: &mut Vec<FieldError>, name: &str) {
    if name.trim().is_empty() {
        errors.push(FieldError::new("name", "Product name is required"));
    }
}

fn validate_image(errors: &mut Vec<FieldError>, image: &str) {
    if Url::parse(image).is_err() {
        errors.push(FieldError::new("image", "Must be a valid URL"));
    }
}

fn validate_description(errors: &mut Vec<FieldError>, description: &str) {
    if description.chars().count() < MIN_DESCRIPTION_CHARS {
        errors.push(FieldError::new(
            "description",
            format!("Description must be at least {} characters", MIN_DESCRIPTION_CHARS),
        ));
    }
}

impl CreateProduct {
    /// Validate the identifying fields. Price tiers are intentionally not
    /// validated here: zeroed/absent tiers are valid state, filtered out
    /// at plan-normalization time rather than rejected on write.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();
        validate_category(&mut errors, &self.category);
        validate_name(&mut errors, &self.name);
        validate_image(&mut errors, &self.image);
        validate_description(&mut errors, &self.description);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(errors))
        }
    }
}

impl UpdateProduct {
    /// Validate whichever identifying fields the patch carries.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();
        if let Some(ref category) = self.category {
            validate_category(&mut errors, category);
        }
        if let Some(ref name) = self.name {
            validate_name(&mut errors, name);
        }
        if let Some(ref image) = self.image {
            validate_image(&mut errors, image);
        }
        if let Some(ref description) = self.description {
            validate_description(&mut errors, description);
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(errors))
        }
    }
}
