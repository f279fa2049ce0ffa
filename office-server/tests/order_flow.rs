//! Order lifecycle: totals, price freeze, status rules

mod common;

use common::*;
use office_server::db::repository::{RepoError, menu_item, order};
use shared::ErrorCode;
use shared::models::{MenuItemUpdate, OrderItemAdd, OrderStatus};

#[tokio::test]
async fn order_total_follows_item_mutations() {
    let pool = test_pool().await;
    let branch = make_restaurant(&pool, "Central").await;
    let burger = make_menu_item(&pool, "Burger", 9.99).await;
    let salad = make_menu_item(&pool, "Salad", 4.50).await;

    let o = make_order(&pool, branch.id).await;
    assert_eq!(o.total_price, 0.0);
    assert_eq!(o.status, OrderStatus::Pending);

    // two burgers
    let o = add_line(&pool, o.id, burger.id, 2).await;
    assert_eq!(o.total_price, 19.98);

    // adding the same item again merges into one line
    let o = add_line(&pool, o.id, burger.id, 1).await;
    assert_eq!(o.total_price, 29.97);
    let items = order::find_items(&pool, o.id).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].quantity, 3);

    // a salad on top
    let o = add_line(&pool, o.id, salad.id, 1).await;
    assert_eq!(o.total_price, 34.47);

    // change the salad line to two
    let items = order::find_items(&pool, o.id).await.unwrap();
    let salad_line = items.iter().find(|i| i.menu_item_id == salad.id).unwrap();
    let o = order::update_item_quantity(&pool, o.id, salad_line.id, 2)
        .await
        .unwrap();
    assert_eq!(o.total_price, 38.97);

    // drop the burgers
    let burger_line = items.iter().find(|i| i.menu_item_id == burger.id).unwrap();
    let o = order::remove_item(&pool, o.id, burger_line.id).await.unwrap();
    assert_eq!(o.total_price, 9.0);
}

#[tokio::test]
async fn price_at_moment_is_frozen() {
    let pool = test_pool().await;
    let branch = make_restaurant(&pool, "Central").await;
    let dish = make_menu_item(&pool, "Pasta", 12.00).await;

    let o = make_order(&pool, branch.id).await;
    add_line(&pool, o.id, dish.id, 1).await;

    // price hike after the order line exists
    menu_item::update(
        &pool,
        dish.id,
        MenuItemUpdate {
            category_id: None,
            name: None,
            description: None,
            price: Some(15.00),
            cost_price: None,
            is_available: None,
            preparation_minutes: None,
            sort_order: None,
        },
    )
    .await
    .unwrap();

    // merging more quantity keeps the frozen price
    let o = add_line(&pool, o.id, dish.id, 1).await;
    let items = order::find_items(&pool, o.id).await.unwrap();
    assert_eq!(items[0].price_at_moment, 12.00);
    assert_eq!(o.total_price, 24.00);

    // a fresh order freezes the new price
    let o2 = make_order(&pool, branch.id).await;
    let o2 = add_line(&pool, o2.id, dish.id, 1).await;
    assert_eq!(o2.total_price, 15.00);
}

#[tokio::test]
async fn unavailable_item_is_rejected() {
    let pool = test_pool().await;
    let branch = make_restaurant(&pool, "Central").await;
    let dish = make_menu_item(&pool, "Seasonal", 8.00).await;

    menu_item::update(
        &pool,
        dish.id,
        MenuItemUpdate {
            category_id: None,
            name: None,
            description: None,
            price: None,
            cost_price: None,
            is_available: Some(false),
            preparation_minutes: None,
            sort_order: None,
        },
    )
    .await
    .unwrap();

    let o = make_order(&pool, branch.id).await;
    let err = order::add_item(
        &pool,
        o.id,
        OrderItemAdd {
            menu_item_id: dish.id,
            quantity: 1,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Business(ErrorCode::MenuItemUnavailable, _)
    ));
}

#[tokio::test]
async fn terminal_orders_reject_edits_and_transitions() {
    let pool = test_pool().await;
    let branch = make_restaurant(&pool, "Central").await;
    let dish = make_menu_item(&pool, "Soup", 5.00).await;

    let o = make_order(&pool, branch.id).await;
    add_line(&pool, o.id, dish.id, 1).await;

    let o = order::update_status(&pool, o.id, OrderStatus::Completed)
        .await
        .unwrap();
    assert_eq!(o.status, OrderStatus::Completed);

    // no edits after completion
    let err = order::add_item(
        &pool,
        o.id,
        OrderItemAdd {
            menu_item_id: dish.id,
            quantity: 1,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Business(ErrorCode::OrderNotEditable, _)
    ));

    // no leaving a terminal status
    let err = order::update_status(&pool, o.id, OrderStatus::Pending)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Business(ErrorCode::OrderAlreadyCompleted, _)
    ));

    // same-status transition is a no-op, not an error
    let same = order::update_status(&pool, o.id, OrderStatus::Completed)
        .await
        .unwrap();
    assert_eq!(same.status, OrderStatus::Completed);
}

#[tokio::test]
async fn order_listing_filters() {
    let pool = test_pool().await;
    let a = make_restaurant(&pool, "North").await;
    let b = make_restaurant(&pool, "South").await;

    let o1 = make_order(&pool, a.id).await;
    let _o2 = make_order(&pool, b.id).await;
    order::update_status(&pool, o1.id, OrderStatus::Cancelled)
        .await
        .unwrap();

    let all = order::find_all(&pool, None, None, 50, 0).await.unwrap();
    assert_eq!(all.len(), 2);

    let cancelled = order::find_all(&pool, Some(OrderStatus::Cancelled), None, 50, 0)
        .await
        .unwrap();
    assert_eq!(cancelled.len(), 1);
    assert_eq!(cancelled[0].id, o1.id);

    let south = order::find_all(&pool, None, Some(b.id), 50, 0).await.unwrap();
    assert_eq!(south.len(), 1);
    assert_eq!(south[0].restaurant_id, b.id);
}

#[tokio::test]
async fn receipt_numbers_are_unique() {
    let pool = test_pool().await;
    let branch = make_restaurant(&pool, "Central").await;

    let o1 = make_order(&pool, branch.id).await;
    let o2 = make_order(&pool, branch.id).await;
    assert_ne!(o1.receipt_number, o2.receipt_number);
    assert!(o1.receipt_number.starts_with("R-"));
}
