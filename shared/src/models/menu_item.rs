//! Menu Item Model

use serde::{Deserialize, Serialize};

/// Menu item (dish) entity
///
/// `price` is the current menu price; orders freeze their own copy into
/// `order_item.price_at_moment` so later price changes don't rewrite history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MenuItem {
    pub id: i64,
    pub category_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    /// Cost to produce one serving, for margin reporting
    pub cost_price: Option<f64>,
    pub is_available: bool,
    pub preparation_minutes: i32,
    pub sort_order: i32,
    pub created_at: i64,
    pub updated_at: i64,
}

impl MenuItem {
    /// Profit margin in percent, when a cost price is recorded
    pub fn profit_margin(&self) -> Option<f64> {
        match self.cost_price {
            Some(cost) if cost > 0.0 && self.price > 0.0 => {
                Some(crate::money::round_money((self.price - cost) / self.price * 100.0))
            }
            _ => None,
        }
    }

    /// Absolute profit per serving, when a cost price is recorded
    pub fn profit_amount(&self) -> Option<f64> {
        self.cost_price
            .map(|cost| crate::money::round_money(self.price - cost))
    }
}

/// Create menu item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemCreate {
    pub category_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub cost_price: Option<f64>,
    pub is_available: Option<bool>,
    pub preparation_minutes: Option<i32>,
    pub sort_order: Option<i32>,
}

/// Update menu item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemUpdate {
    pub category_id: Option<i64>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub cost_price: Option<f64>,
    pub is_available: Option<bool>,
    pub preparation_minutes: Option<i32>,
    pub sort_order: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(price: f64, cost_price: Option<f64>) -> MenuItem {
        MenuItem {
            id: 1,
            category_id: 1,
            name: "Test".into(),
            description: None,
            price,
            cost_price,
            is_available: true,
            preparation_minutes: 15,
            sort_order: 0,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_profit_margin() {
        assert_eq!(item(10.0, Some(4.0)).profit_margin(), Some(60.0));
        assert_eq!(item(10.0, None).profit_margin(), None);
        assert_eq!(item(10.0, Some(0.0)).profit_margin(), None);
    }

    #[test]
    fn test_profit_amount() {
        assert_eq!(item(10.0, Some(4.0)).profit_amount(), Some(6.0));
        assert_eq!(item(10.0, None).profit_amount(), None);
    }
}
