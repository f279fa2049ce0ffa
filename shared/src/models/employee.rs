//! Employee Profile Model

use serde::{Deserialize, Serialize};

/// Employee profile — links a user account to a restaurant and position
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Employee {
    pub id: i64,
    pub user_id: i64,
    /// Null while unassigned or after the restaurant is removed
    pub restaurant_id: Option<i64>,
    pub position: String,
    pub hire_date: i64,
    pub is_active: bool,
}

/// Employee joined with user/restaurant names for staff screens
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct EmployeeDetail {
    pub id: i64,
    pub user_id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub restaurant_id: Option<i64>,
    pub restaurant_name: Option<String>,
    pub position: String,
    pub hire_date: i64,
    pub is_active: bool,
}

/// Create employee payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeCreate {
    pub user_id: i64,
    pub restaurant_id: Option<i64>,
    pub position: String,
}

/// Update employee payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeUpdate {
    /// Missing = unchanged, null = unassign, value = reassign
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restaurant_id: Option<Option<i64>>,
    pub position: Option<String>,
    pub is_active: Option<bool>,
}
