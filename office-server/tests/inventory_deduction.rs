//! Ingredient deduction: happy path, shortfall, missing stock, idempotence

mod common;

use common::*;
use office_server::db::repository::{RepoError, order, recipe};
use office_server::inventory::process_order;
use shared::ErrorCode;
use shared::models::{OrderStatus, RecipeLineInput};
use sqlx::SqlitePool;

struct Fixture {
    restaurant_id: i64,
    menu_item_id: i64,
    ingredient_id: i64,
}

/// One dish needing 3 units of one ingredient per serving
async fn fixture(pool: &SqlitePool, per_serving: f64) -> Fixture {
    let branch = make_restaurant(pool, "Central").await;
    let dish = make_menu_item(pool, "Stew", 11.50).await;
    let beans = make_ingredient(pool, "Beans", "kg").await;
    recipe::replace_for_menu_item(
        pool,
        dish.id,
        &[RecipeLineInput {
            ingredient_id: beans.id,
            quantity: per_serving,
            note: None,
        }],
    )
    .await
    .unwrap();

    Fixture {
        restaurant_id: branch.id,
        menu_item_id: dish.id,
        ingredient_id: beans.id,
    }
}

#[tokio::test]
async fn deduction_subtracts_stock() {
    let pool = test_pool().await;
    let fx = fixture(&pool, 3.0).await;
    put_stock(&pool, fx.ingredient_id, fx.restaurant_id, 5.0).await;

    let o = make_order(&pool, fx.restaurant_id).await;
    add_line(&pool, o.id, fx.menu_item_id, 1).await;

    let outcome = process_order(&pool, o.id).await.unwrap();
    assert!(outcome.success);
    assert!(outcome.warnings.is_empty());

    assert_eq!(
        stock_quantity(&pool, fx.ingredient_id, fx.restaurant_id).await,
        2.0
    );

    let o = order::find_by_id(&pool, o.id).await.unwrap().unwrap();
    assert!(o.ingredients_processed);
}

#[tokio::test]
async fn deduction_scales_with_quantity() {
    let pool = test_pool().await;
    let fx = fixture(&pool, 0.25).await;
    put_stock(&pool, fx.ingredient_id, fx.restaurant_id, 10.0).await;

    let o = make_order(&pool, fx.restaurant_id).await;
    add_line(&pool, o.id, fx.menu_item_id, 3).await;

    let outcome = process_order(&pool, o.id).await.unwrap();
    assert!(outcome.success);

    // 0.25 per serving × 3 servings
    assert_eq!(
        stock_quantity(&pool, fx.ingredient_id, fx.restaurant_id).await,
        9.25
    );
}

#[tokio::test]
async fn shortfall_zeroes_stock_and_warns() {
    let pool = test_pool().await;
    let fx = fixture(&pool, 3.0).await;
    put_stock(&pool, fx.ingredient_id, fx.restaurant_id, 2.0).await;

    let o = make_order(&pool, fx.restaurant_id).await;
    add_line(&pool, o.id, fx.menu_item_id, 1).await;

    let outcome = process_order(&pool, o.id).await.unwrap();
    // partial deduction with warnings is still a successful run
    assert!(outcome.success);
    assert_eq!(outcome.warnings.len(), 1);
    assert!(outcome.warnings[0].contains("Insufficient stock"));
    assert!(outcome.warnings[0].contains("Beans"));

    assert_eq!(
        stock_quantity(&pool, fx.ingredient_id, fx.restaurant_id).await,
        0.0
    );
}

#[tokio::test]
async fn missing_stock_row_warns_without_failing() {
    let pool = test_pool().await;
    let fx = fixture(&pool, 3.0).await;
    // no stock row at all for this restaurant

    let o = make_order(&pool, fx.restaurant_id).await;
    add_line(&pool, o.id, fx.menu_item_id, 1).await;

    let outcome = process_order(&pool, o.id).await.unwrap();
    assert!(outcome.success);
    assert_eq!(outcome.warnings.len(), 1);
    assert!(outcome.warnings[0].contains("No stock record"));
}

#[tokio::test]
async fn deduction_runs_at_most_once() {
    let pool = test_pool().await;
    let fx = fixture(&pool, 3.0).await;
    put_stock(&pool, fx.ingredient_id, fx.restaurant_id, 10.0).await;

    let o = make_order(&pool, fx.restaurant_id).await;
    add_line(&pool, o.id, fx.menu_item_id, 1).await;

    let first = process_order(&pool, o.id).await.unwrap();
    assert!(first.success);
    assert_eq!(
        stock_quantity(&pool, fx.ingredient_id, fx.restaurant_id).await,
        7.0
    );

    // second run is a guarded no-op
    let second = process_order(&pool, o.id).await.unwrap();
    assert!(!second.success);
    assert!(second.message.contains("already been processed"));
    assert_eq!(
        stock_quantity(&pool, fx.ingredient_id, fx.restaurant_id).await,
        7.0
    );
}

#[tokio::test]
async fn deduction_only_touches_the_orders_restaurant() {
    let pool = test_pool().await;
    let fx = fixture(&pool, 2.0).await;
    let other = make_restaurant(&pool, "South").await;
    put_stock(&pool, fx.ingredient_id, fx.restaurant_id, 8.0).await;
    put_stock(&pool, fx.ingredient_id, other.id, 8.0).await;

    let o = make_order(&pool, fx.restaurant_id).await;
    add_line(&pool, o.id, fx.menu_item_id, 1).await;
    process_order(&pool, o.id).await.unwrap();

    assert_eq!(
        stock_quantity(&pool, fx.ingredient_id, fx.restaurant_id).await,
        6.0
    );
    assert_eq!(stock_quantity(&pool, fx.ingredient_id, other.id).await, 8.0);
}

#[tokio::test]
async fn deduction_covers_every_order_line() {
    let pool = test_pool().await;
    let branch = make_restaurant(&pool, "Central").await;
    let stew = make_menu_item(&pool, "Stew", 11.50).await;
    let salad = make_menu_item(&pool, "Salad", 6.00).await;
    let beans = make_ingredient(&pool, "Beans", "kg").await;
    let greens = make_ingredient(&pool, "Greens", "kg").await;

    recipe::replace_for_menu_item(
        &pool,
        stew.id,
        &[RecipeLineInput {
            ingredient_id: beans.id,
            quantity: 1.0,
            note: None,
        }],
    )
    .await
    .unwrap();
    recipe::replace_for_menu_item(
        &pool,
        salad.id,
        &[
            RecipeLineInput {
                ingredient_id: greens.id,
                quantity: 0.2,
                note: None,
            },
            RecipeLineInput {
                ingredient_id: beans.id,
                quantity: 0.1,
                note: None,
            },
        ],
    )
    .await
    .unwrap();

    put_stock(&pool, beans.id, branch.id, 5.0).await;
    put_stock(&pool, greens.id, branch.id, 1.0).await;

    let o = make_order(&pool, branch.id).await;
    add_line(&pool, o.id, stew.id, 2).await;
    add_line(&pool, o.id, salad.id, 1).await;

    let outcome = process_order(&pool, o.id).await.unwrap();
    assert!(outcome.success);
    assert!(outcome.warnings.is_empty());

    // beans: 1.0×2 (stew) + 0.1×1 (salad) = 2.1
    assert_eq!(stock_quantity(&pool, beans.id, branch.id).await, 2.9);
    // greens: 0.2×1
    assert_eq!(stock_quantity(&pool, greens.id, branch.id).await, 0.8);
}

#[tokio::test]
async fn missing_order_is_an_error() {
    let pool = test_pool().await;
    let err = process_order(&pool, 424242).await.unwrap_err();
    assert!(matches!(
        err,
        RepoError::Business(ErrorCode::OrderNotFound, _)
    ));
}

#[tokio::test]
async fn status_change_drives_deduction() {
    let pool = test_pool().await;
    let fx = fixture(&pool, 3.0).await;
    put_stock(&pool, fx.ingredient_id, fx.restaurant_id, 5.0).await;

    let o = make_order(&pool, fx.restaurant_id).await;
    add_line(&pool, o.id, fx.menu_item_id, 1).await;

    // the handler pairs this transition with process_order; the repo-level
    // transition itself must leave the flag alone
    let o = order::update_status(&pool, o.id, OrderStatus::InProgress)
        .await
        .unwrap();
    assert!(!o.ingredients_processed);

    let outcome = process_order(&pool, o.id).await.unwrap();
    assert!(outcome.success);
    assert_eq!(
        stock_quantity(&pool, fx.ingredient_id, fx.restaurant_id).await,
        2.0
    );
}
