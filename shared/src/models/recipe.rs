//! Recipe Model

use serde::{Deserialize, Serialize};

/// One recipe line: ingredient quantity per serving of a menu item
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct RecipeLine {
    pub id: i64,
    pub menu_item_id: i64,
    pub ingredient_id: i64,
    /// Amount of the ingredient needed for one serving
    pub quantity: f64,
    pub note: Option<String>,
}

/// Recipe line joined with ingredient name/unit for the recipe editor
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct RecipeLineDetail {
    pub id: i64,
    pub menu_item_id: i64,
    pub ingredient_id: i64,
    pub ingredient_name: String,
    pub unit: String,
    pub quantity: f64,
    pub note: Option<String>,
}

/// Input line for replacing a menu item's recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeLineInput {
    pub ingredient_id: i64,
    pub quantity: f64,
    pub note: Option<String>,
}
