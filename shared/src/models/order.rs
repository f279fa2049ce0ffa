//! Order Models

use serde::{Deserialize, Serialize};

/// Order lifecycle status
///
/// COMPLETED and CANCELLED are terminal. Entering IN_PROGRESS triggers
/// ingredient deduction (once per order).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum OrderStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Terminal orders accept no further status changes or item edits
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "COMPLETED" => Ok(Self::Completed),
            "CANCELLED" => Ok(Self::Cancelled),
            other => Err(format!("unknown order status: {other}")),
        }
    }
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    pub restaurant_id: i64,
    /// User who entered the order, null after the account is deleted
    pub created_by: Option<i64>,
    pub status: OrderStatus,
    pub table_number: Option<i32>,
    /// Derived: Σ item price_at_moment × quantity
    pub total_price: f64,
    pub receipt_number: String,
    /// Idempotence guard — ingredient deduction ran for this order
    pub ingredients_processed: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Order line entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub menu_item_id: i64,
    pub quantity: i64,
    /// Unit price frozen from the menu item at insert time
    pub price_at_moment: f64,
}

/// Order line joined with menu item name for detail/receipt screens
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderItemDetail {
    pub id: i64,
    pub order_id: i64,
    pub menu_item_id: i64,
    pub menu_item_name: String,
    pub quantity: i64,
    pub price_at_moment: f64,
    pub line_total: f64,
}

/// Order with its lines
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub restaurant_name: String,
    pub items: Vec<OrderItemDetail>,
}

/// Create order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub restaurant_id: i64,
    pub table_number: Option<i32>,
}

/// Add-item payload — upserts into the order's line for the menu item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemAdd {
    pub menu_item_id: i64,
    pub quantity: i64,
}

/// Change-item-quantity payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemUpdate {
    pub quantity: i64,
}

/// Status transition payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
}

/// Result of an ingredient deduction run
///
/// Warnings (shortfalls, missing stock rows) do not fail the run; `success`
/// is false only when nothing was deducted (already processed, or the
/// transaction was rolled back).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeductionOutcome {
    pub success: bool,
    pub message: String,
    pub warnings: Vec<String>,
}

/// Response for a status transition, carrying any deduction outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusChangeResult {
    pub order: Order,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deduction: Option<DeductionOutcome>,
}

/// Printable receipt payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Receipt {
    pub receipt_number: String,
    pub order_id: i64,
    pub restaurant_name: String,
    pub restaurant_address: String,
    pub restaurant_phone: String,
    pub table_number: Option<i32>,
    pub status: OrderStatus,
    pub lines: Vec<ReceiptLine>,
    pub total: f64,
    pub created_at: i64,
}

/// One printed line of a receipt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiptLine {
    pub name: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub line_total: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_status_round_trip() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::InProgress,
            OrderStatus::Completed,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(OrderStatus::from_str(status.as_str()), Ok(status));
        }
    }

    #[test]
    fn test_status_terminal() {
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(!OrderStatus::InProgress.is_terminal());
        assert!(OrderStatus::Completed.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
    }

    #[test]
    fn test_status_serde() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::InProgress).unwrap(),
            "\"IN_PROGRESS\""
        );
        let status: OrderStatus = serde_json::from_str("\"CANCELLED\"").unwrap();
        assert_eq!(status, OrderStatus::Cancelled);
    }
}
