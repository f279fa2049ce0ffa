//! Shared fixtures for integration tests
#![allow(dead_code)]

use office_server::db::DbService;
use office_server::db::repository::{category, ingredient, menu_item, order, restaurant, stock};
use shared::models::{
    CategoryCreate, Ingredient, IngredientCreate, MenuItem, MenuItemCreate, Order, OrderCreate,
    OrderItemAdd, Restaurant, RestaurantCreate, StockItemCreate,
};
use sqlx::SqlitePool;

pub async fn test_pool() -> SqlitePool {
    DbService::in_memory()
        .await
        .expect("in-memory database should initialize")
        .pool
}

pub async fn make_restaurant(pool: &SqlitePool, name: &str) -> Restaurant {
    restaurant::create(
        pool,
        RestaurantCreate {
            name: name.to_string(),
            address: "1 Test Street".to_string(),
            phone: "+100000000".to_string(),
        },
    )
    .await
    .expect("restaurant should be created")
}

pub async fn make_menu_item(pool: &SqlitePool, name: &str, price: f64) -> MenuItem {
    let cat = match category::find_by_name(pool, "Mains").await.unwrap() {
        Some(cat) => cat,
        None => category::create(
            pool,
            CategoryCreate {
                name: "Mains".to_string(),
                description: None,
                sort_order: None,
            },
        )
        .await
        .expect("category should be created"),
    };

    menu_item::create(
        pool,
        MenuItemCreate {
            category_id: cat.id,
            name: name.to_string(),
            description: None,
            price,
            cost_price: None,
            is_available: Some(true),
            preparation_minutes: None,
            sort_order: None,
        },
    )
    .await
    .expect("menu item should be created")
}

pub async fn make_ingredient(pool: &SqlitePool, name: &str, unit: &str) -> Ingredient {
    ingredient::create(
        pool,
        IngredientCreate {
            name: name.to_string(),
            unit: unit.to_string(),
        },
    )
    .await
    .expect("ingredient should be created")
}

pub async fn put_stock(pool: &SqlitePool, ingredient_id: i64, restaurant_id: i64, quantity: f64) {
    stock::create(
        pool,
        StockItemCreate {
            ingredient_id,
            restaurant_id,
            quantity,
        },
    )
    .await
    .expect("stock item should be created");
}

pub async fn make_order(pool: &SqlitePool, restaurant_id: i64) -> Order {
    order::create(
        pool,
        OrderCreate {
            restaurant_id,
            table_number: Some(4),
        },
        None,
    )
    .await
    .expect("order should be created")
}

pub async fn add_line(pool: &SqlitePool, order_id: i64, menu_item_id: i64, quantity: i64) -> Order {
    order::add_item(
        pool,
        order_id,
        OrderItemAdd {
            menu_item_id,
            quantity,
        },
    )
    .await
    .expect("order item should be added")
}

pub async fn stock_quantity(pool: &SqlitePool, ingredient_id: i64, restaurant_id: i64) -> f64 {
    stock::find_by_pair(pool, ingredient_id, restaurant_id)
        .await
        .expect("stock query should succeed")
        .map(|s| s.quantity)
        .unwrap_or(f64::NAN)
}
