//! Unified error codes for the back-office API
//!
//! This module defines all error codes used across the server and its clients.
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Restaurant errors
//! - 4xxx: Order errors
//! - 5xxx: Inventory errors
//! - 6xxx: Menu errors
//! - 7xxx: Report errors
//! - 8xxx: Account (user/role/employee) errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Account is disabled
    AccountDisabled = 1005,
    /// Password too short
    PasswordTooShort = 1006,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Admin role required
    AdminRequired = 2002,
    /// Cannot modify admin user
    CannotModifyAdmin = 2003,
    /// Cannot delete admin user
    CannotDeleteAdmin = 2004,

    // ==================== 3xxx: Restaurant ====================
    /// Restaurant not found
    RestaurantNotFound = 3001,
    /// Restaurant has orders
    RestaurantHasOrders = 3002,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order item not found
    OrderItemNotFound = 4002,
    /// Order is empty
    OrderEmpty = 4003,
    /// Order has already been completed
    OrderAlreadyCompleted = 4004,
    /// Order has already been cancelled
    OrderAlreadyCancelled = 4005,
    /// Order can no longer be edited
    OrderNotEditable = 4006,
    /// Order ingredients have already been deducted
    OrderAlreadyProcessed = 4007,
    /// Invalid order status value
    OrderInvalidStatus = 4008,

    // ==================== 5xxx: Inventory ====================
    /// Ingredient not found
    IngredientNotFound = 5001,
    /// Ingredient name already exists
    IngredientNameExists = 5002,
    /// Stock item not found
    StockItemNotFound = 5101,
    /// Stock item already exists for ingredient and restaurant
    StockItemExists = 5102,
    /// Stock quantity must be non-negative
    StockNegativeQuantity = 5103,
    /// Recipe line not found
    RecipeLineNotFound = 5201,
    /// Recipe has duplicate ingredient lines
    RecipeDuplicateIngredient = 5202,

    // ==================== 6xxx: Menu ====================
    /// Menu item not found
    MenuItemNotFound = 6001,
    /// Menu item is not available for ordering
    MenuItemUnavailable = 6002,
    /// Menu item is referenced by orders
    MenuItemInOrders = 6003,
    /// Menu item has invalid price
    MenuItemInvalidPrice = 6004,
    /// Category not found
    CategoryNotFound = 6101,
    /// Category has menu items
    CategoryHasItems = 6102,
    /// Category name already exists
    CategoryNameExists = 6103,

    // ==================== 7xxx: Report ====================
    /// Invalid report date range
    ReportRangeInvalid = 7001,

    // ==================== 8xxx: Account ====================
    /// User not found
    UserNotFound = 8001,
    /// User email already exists
    UserEmailExists = 8002,
    /// Cannot delete self
    UserCannotDeleteSelf = 8003,
    /// Cannot modify/delete system user
    UserIsSystem = 8004,
    /// Cannot remove the last active admin
    LastAdmin = 8005,
    /// Role not found
    RoleNotFound = 8101,
    /// Role name already exists
    RoleNameExists = 8102,
    /// Role is in use
    RoleInUse = 8103,
    /// Cannot modify/delete system role
    RoleIsSystem = 8104,
    /// Employee profile not found
    EmployeeNotFound = 8201,
    /// Employee profile already exists for user
    EmployeeExistsForUser = 8202,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9003,
    /// Operation timeout
    TimeoutError = 9004,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid email or password",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",
            ErrorCode::AccountDisabled => "Account is disabled",
            ErrorCode::PasswordTooShort => "Password must be at least 8 characters",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::AdminRequired => "Administrator role is required",
            ErrorCode::CannotModifyAdmin => "Cannot modify administrator user",
            ErrorCode::CannotDeleteAdmin => "Cannot delete administrator user",

            // Restaurant
            ErrorCode::RestaurantNotFound => "Restaurant not found",
            ErrorCode::RestaurantHasOrders => "Restaurant has associated orders",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::OrderItemNotFound => "Order item not found",
            ErrorCode::OrderEmpty => "Order is empty",
            ErrorCode::OrderAlreadyCompleted => "Order has already been completed",
            ErrorCode::OrderAlreadyCancelled => "Order has already been cancelled",
            ErrorCode::OrderNotEditable => "Order can no longer be edited",
            ErrorCode::OrderAlreadyProcessed => "Ingredients have already been processed",
            ErrorCode::OrderInvalidStatus => "Invalid order status",

            // Inventory
            ErrorCode::IngredientNotFound => "Ingredient not found",
            ErrorCode::IngredientNameExists => "Ingredient name already exists",
            ErrorCode::StockItemNotFound => "Stock item not found",
            ErrorCode::StockItemExists => {
                "Stock item already exists for this ingredient and restaurant"
            }
            ErrorCode::StockNegativeQuantity => "Stock quantity must be non-negative",
            ErrorCode::RecipeLineNotFound => "Recipe line not found",
            ErrorCode::RecipeDuplicateIngredient => "Recipe has duplicate ingredient lines",

            // Menu
            ErrorCode::MenuItemNotFound => "Menu item not found",
            ErrorCode::MenuItemUnavailable => "Menu item is not available for ordering",
            ErrorCode::MenuItemInOrders => "Menu item is referenced by existing orders",
            ErrorCode::MenuItemInvalidPrice => "Menu item has invalid price",
            ErrorCode::CategoryNotFound => "Category not found",
            ErrorCode::CategoryHasItems => "Category has associated menu items",
            ErrorCode::CategoryNameExists => "Category name already exists",

            // Report
            ErrorCode::ReportRangeInvalid => "Invalid report date range",

            // Account
            ErrorCode::UserNotFound => "User not found",
            ErrorCode::UserEmailExists => "User email already exists",
            ErrorCode::UserCannotDeleteSelf => "Cannot delete own account",
            ErrorCode::UserIsSystem => "Cannot modify system user",
            ErrorCode::LastAdmin => "Cannot remove the last active administrator",
            ErrorCode::RoleNotFound => "Role not found",
            ErrorCode::RoleNameExists => "Role name already exists",
            ErrorCode::RoleInUse => "Role is currently in use",
            ErrorCode::RoleIsSystem => "Cannot modify system role",
            ErrorCode::EmployeeNotFound => "Employee profile not found",
            ErrorCode::EmployeeExistsForUser => "Employee profile already exists for this user",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::TimeoutError => "Operation timed out",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self, self.code())
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),
            1005 => Ok(ErrorCode::AccountDisabled),
            1006 => Ok(ErrorCode::PasswordTooShort),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::AdminRequired),
            2003 => Ok(ErrorCode::CannotModifyAdmin),
            2004 => Ok(ErrorCode::CannotDeleteAdmin),

            // Restaurant
            3001 => Ok(ErrorCode::RestaurantNotFound),
            3002 => Ok(ErrorCode::RestaurantHasOrders),

            // Order
            4001 => Ok(ErrorCode::OrderNotFound),
            4002 => Ok(ErrorCode::OrderItemNotFound),
            4003 => Ok(ErrorCode::OrderEmpty),
            4004 => Ok(ErrorCode::OrderAlreadyCompleted),
            4005 => Ok(ErrorCode::OrderAlreadyCancelled),
            4006 => Ok(ErrorCode::OrderNotEditable),
            4007 => Ok(ErrorCode::OrderAlreadyProcessed),
            4008 => Ok(ErrorCode::OrderInvalidStatus),

            // Inventory
            5001 => Ok(ErrorCode::IngredientNotFound),
            5002 => Ok(ErrorCode::IngredientNameExists),
            5101 => Ok(ErrorCode::StockItemNotFound),
            5102 => Ok(ErrorCode::StockItemExists),
            5103 => Ok(ErrorCode::StockNegativeQuantity),
            5201 => Ok(ErrorCode::RecipeLineNotFound),
            5202 => Ok(ErrorCode::RecipeDuplicateIngredient),

            // Menu
            6001 => Ok(ErrorCode::MenuItemNotFound),
            6002 => Ok(ErrorCode::MenuItemUnavailable),
            6003 => Ok(ErrorCode::MenuItemInOrders),
            6004 => Ok(ErrorCode::MenuItemInvalidPrice),
            6101 => Ok(ErrorCode::CategoryNotFound),
            6102 => Ok(ErrorCode::CategoryHasItems),
            6103 => Ok(ErrorCode::CategoryNameExists),

            // Report
            7001 => Ok(ErrorCode::ReportRangeInvalid),

            // Account
            8001 => Ok(ErrorCode::UserNotFound),
            8002 => Ok(ErrorCode::UserEmailExists),
            8003 => Ok(ErrorCode::UserCannotDeleteSelf),
            8004 => Ok(ErrorCode::UserIsSystem),
            8005 => Ok(ErrorCode::LastAdmin),
            8101 => Ok(ErrorCode::RoleNotFound),
            8102 => Ok(ErrorCode::RoleNameExists),
            8103 => Ok(ErrorCode::RoleInUse),
            8104 => Ok(ErrorCode::RoleIsSystem),
            8201 => Ok(ErrorCode::EmployeeNotFound),
            8202 => Ok(ErrorCode::EmployeeExistsForUser),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9003 => Ok(ErrorCode::ConfigError),
            9004 => Ok(ErrorCode::TimeoutError),

            other => Err(InvalidErrorCode(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::NotAuthenticated.code(), 1001);
        assert_eq!(ErrorCode::OrderAlreadyProcessed.code(), 4007);
        assert_eq!(ErrorCode::StockItemExists.code(), 5102);
        assert_eq!(ErrorCode::CategoryHasItems.code(), 6102);
        assert_eq!(ErrorCode::DatabaseError.code(), 9002);
    }

    #[test]
    fn test_round_trip() {
        for code in [
            ErrorCode::Success,
            ErrorCode::InvalidCredentials,
            ErrorCode::PermissionDenied,
            ErrorCode::RestaurantHasOrders,
            ErrorCode::OrderNotFound,
            ErrorCode::IngredientNameExists,
            ErrorCode::MenuItemUnavailable,
            ErrorCode::ReportRangeInvalid,
            ErrorCode::RoleInUse,
            ErrorCode::InternalError,
        ] {
            let value: u16 = code.into();
            assert_eq!(ErrorCode::try_from(value), Ok(code));
        }
    }

    #[test]
    fn test_invalid_code() {
        assert_eq!(ErrorCode::try_from(60000), Err(InvalidErrorCode(60000)));
        assert_eq!(ErrorCode::try_from(999), Err(InvalidErrorCode(999)));
    }

    #[test]
    fn test_is_success() {
        assert!(ErrorCode::Success.is_success());
        assert!(!ErrorCode::Unknown.is_success());
    }

    #[test]
    fn test_serde_as_u16() {
        let json = serde_json::to_string(&ErrorCode::OrderNotFound).unwrap();
        assert_eq!(json, "4001");

        let code: ErrorCode = serde_json::from_str("6102").unwrap();
        assert_eq!(code, ErrorCode::CategoryHasItems);
    }
}
