//! Plan normalization and selection.
//!
//! A product stores four fixed-duration price tiers plus an ordered list
//! of admin-defined custom options. The storefront sells from a single
//! flattened list of purchasable plans; this module derives that list
//! and the selection, stock and discount state for a chosen plan.
//!
//! Everything here is a pure function of its input: no storage access,
//! no clock, no error paths.

use serde::Serialize;

use crate::models::Product;

/// The four built-in duration slots, in display order.
const FIXED_TIERS: [(u32, &str); 4] = [
    (1, "1 Month"),
    (3, "3 Months"),
    (6, "6 Months"),
    (12, "12 Months"),
];

/// A single purchasable duration/price/stock combination, derived from a
/// product on read and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedPlan {
    /// Display label; doubles as the selection key.
    pub duration: String,
    /// Duration in months; 0 for custom (non-monthly) options.
    pub months: u32,
    pub actual_price: i64,
    pub selling_price: i64,
    pub in_stock: bool,
}

impl NormalizedPlan {
    /// A tier only becomes a plan when both prices were configured.
    /// An unconfigured tier is absent, not out of stock.
    fn configured(actual_price: i64, selling_price: i64) -> bool {
        actual_price > 0 && selling_price > 0
    }
}

/// Flatten a product into its ordered list of purchasable plans.
///
/// Fixed tiers come first, in 1/3/6/12-month order, followed by custom
/// options in stored order. Tiers without both prices set are dropped.
/// Duplicate labels pass through untouched; resolution is first-match
/// (see [`resolve`]).
pub fn normalize(product: &Product) -> Vec<NormalizedPlan> {
    let fixed = [
        (
            product.price_1_month_actual,
            product.price_1_month_selling,
            product.in_stock_1_month,
        ),
        (
            product.price_3_month_actual,
            product.price_3_month_selling,
            product.in_stock_3_month,
        ),
        (
            product.price_6_month_actual,
            product.price_6_month_selling,
            product.in_stock_6_month,
        ),
        (
            product.price_12_month_actual,
            product.price_12_month_selling,
            product.in_stock_12_month,
        ),
    ];

    let mut plans: Vec<NormalizedPlan> = FIXED_TIERS
        .iter()
        .zip(fixed)
        .filter(|(_, (actual, selling, _))| NormalizedPlan::configured(*actual, *selling))
        .map(|((months, label), (actual, selling, in_stock))| NormalizedPlan {
            duration: (*label).to_string(),
            months: *months,
            actual_price: actual,
            selling_price: selling,
            in_stock,
        })
        .collect();

    plans.extend(
        product
            .custom_options
            .iter()
            .filter(|opt| NormalizedPlan::configured(opt.actual_price, opt.selling_price))
            .map(|opt| NormalizedPlan {
                duration: opt.label.clone(),
                months: 0,
                actual_price: opt.actual_price,
                selling_price: opt.selling_price,
                in_stock: opt.in_stock,
            }),
    );

    plans
}

/// The duration to preselect when plans are first loaded: the first
/// in-stock plan, falling back to the first plan, or nothing at all for
/// an empty list.
pub fn pick_default(plans: &[NormalizedPlan]) -> Option<&str> {
    plans
        .iter()
        .find(|p| p.in_stock)
        .or_else(|| plans.first())
        .map(|p| p.duration.as_str())
}

/// Look up a plan by its duration label. On duplicate labels the first
/// match in sequence order wins, deterministically.
pub fn resolve<'a>(plans: &'a [NormalizedPlan], duration: &str) -> Option<&'a NormalizedPlan> {
    plans.iter().find(|p| p.duration == duration)
}

/// Percentage saved against the list price, rounded to the nearest
/// integer. Callers wanting a badge should use [`discount_badge`], which
/// suppresses zero and negative values.
pub fn discount_percent(plan: &NormalizedPlan) -> i32 {
    let diff = (plan.actual_price - plan.selling_price) as f64;
    (diff / plan.actual_price as f64 * 100.0).round() as i32
}

/// Discount value fit for display: present only when the selling price
/// actually undercuts the list price.
pub fn discount_badge(plan: &NormalizedPlan) -> Option<i32> {
    (plan.actual_price > plan.selling_price).then(|| discount_percent(plan))
}

/// Selection state over one product's normalized plan list, as held for
/// a single browsing session.
///
/// Selecting an out-of-stock duration is accepted (the control stays
/// highlighted) but purchase actions remain gated on [`can_purchase`].
/// A selection that no longer matches any plan, e.g. after a catalog
/// edit, degrades to "nothing selected" instead of failing.
///
/// [`can_purchase`]: PlanSelector::can_purchase
#[derive(Debug, Clone)]
pub struct PlanSelector {
    plans: Vec<NormalizedPlan>,
    selected: Option<String>,
}

impl PlanSelector {
    /// Build a selector with the default duration preselected.
    pub fn new(plans: Vec<NormalizedPlan>) -> Self {
        let selected = pick_default(&plans).map(String::from);
        Self { plans, selected }
    }

    pub fn plans(&self) -> &[NormalizedPlan] {
        &self.plans
    }

    /// Record a user selection. Out-of-stock and stale labels are both
    /// accepted; the latter simply resolve to no plan.
    pub fn select(&mut self, duration: &str) {
        self.selected = Some(duration.to_string());
    }

    /// The currently selected plan, if the selection resolves.
    pub fn selected_plan(&self) -> Option<&NormalizedPlan> {
        self.selected
            .as_deref()
            .and_then(|duration| resolve(&self.plans, duration))
    }

    /// Label of the resolved selection; None when nothing is selected or
    /// the selection went stale.
    pub fn selected_duration(&self) -> Option<&str> {
        self.selected_plan().map(|p| p.duration.as_str())
    }

    /// Discount badge for the resolved selection, suppressed when the
    /// plan is not actually discounted.
    pub fn discount_badge(&self) -> Option<i32> {
        self.selected_plan().and_then(discount_badge)
    }

    /// Both "buy now" and "add to cart" gate on this: a plan must be
    /// resolved and in stock.
    pub fn can_purchase(&self) -> bool {
        self.selected_plan().is_some_and(|p| p.in_stock)
    }
}
