//! Ingredient Model

use serde::{Deserialize, Serialize};

/// Ingredient entity (name is unique chain-wide)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Ingredient {
    pub id: i64,
    pub name: String,
    /// Unit of measure label, e.g. "kg", "l", "pcs"
    pub unit: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create ingredient payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientCreate {
    pub name: String,
    pub unit: String,
}

/// Update ingredient payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientUpdate {
    pub name: Option<String>,
    pub unit: Option<String>,
}
