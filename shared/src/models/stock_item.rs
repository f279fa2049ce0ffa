//! Stock Item Model

use serde::{Deserialize, Serialize};

/// On-hand stock for one (ingredient, restaurant) pair
///
/// `quantity` is kept non-negative: order deduction clamps at zero and
/// records a shortfall warning instead of going below.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct StockItem {
    pub id: i64,
    pub ingredient_id: i64,
    pub restaurant_id: i64,
    pub quantity: f64,
    pub last_updated: i64,
}

/// Stock row joined with ingredient and restaurant names for list screens
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct StockItemDetail {
    pub id: i64,
    pub ingredient_id: i64,
    pub ingredient_name: String,
    pub unit: String,
    pub restaurant_id: i64,
    pub restaurant_name: String,
    pub quantity: f64,
    pub last_updated: i64,
}

/// Create stock item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockItemCreate {
    pub ingredient_id: i64,
    pub restaurant_id: i64,
    pub quantity: f64,
}

/// Set stock quantity payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockItemUpdate {
    pub quantity: f64,
}

/// Receive-delivery payload (adds to the current quantity)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockAdd {
    pub amount: f64,
}
