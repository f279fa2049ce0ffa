//! Data Models
//!
//! Entities and Create/Update DTOs shared between the server and clients.
//! `sqlx::FromRow` derives are gated behind the `db` feature so frontend
//! consumers can use the same types without pulling in the database stack.

pub mod auth;
pub mod category;
pub mod employee;
pub mod ingredient;
pub mod menu_item;
pub mod order;
pub mod recipe;
pub mod restaurant;
pub mod role;
pub mod stock_item;
pub mod user;

pub use auth::{ChangePasswordRequest, LoginRequest, LoginResponse, UserInfo};
pub use category::{Category, CategoryCreate, CategoryUpdate, SortOrderEntry};
pub use employee::{Employee, EmployeeCreate, EmployeeDetail, EmployeeUpdate};
pub use ingredient::{Ingredient, IngredientCreate, IngredientUpdate};
pub use menu_item::{MenuItem, MenuItemCreate, MenuItemUpdate};
pub use order::{
    DeductionOutcome, Order, OrderCreate, OrderDetail, OrderItem, OrderItemAdd, OrderItemDetail,
    OrderItemUpdate, OrderStatus, OrderStatusUpdate, Receipt, ReceiptLine, StatusChangeResult,
};
pub use recipe::{RecipeLine, RecipeLineDetail, RecipeLineInput};
pub use restaurant::{Restaurant, RestaurantCreate, RestaurantUpdate};
pub use role::{Role, RoleCreate, RoleUpdate};
pub use stock_item::{StockAdd, StockItem, StockItemCreate, StockItemDetail, StockItemUpdate};
pub use user::{User, UserCreate, UserUpdate};
