//! Referential rules: delete protection, uniqueness, cascades

mod common;

use common::*;
use office_server::db::repository::{
    RepoError, category, ingredient, menu_item, recipe, stock, user,
};
use shared::ErrorCode;
use shared::models::{CategoryCreate, RecipeLineInput, StockItemCreate, UserCreate};

#[tokio::test]
async fn category_with_items_cannot_be_deleted() {
    let pool = test_pool().await;
    let dish = make_menu_item(&pool, "Burger", 9.99).await;

    let cat = category::find_by_name(&pool, "Mains").await.unwrap().unwrap();
    let err = category::delete(&pool, cat.id).await.unwrap_err();
    assert!(matches!(
        err,
        RepoError::Business(ErrorCode::CategoryHasItems, _)
    ));

    // still there
    assert!(category::find_by_id(&pool, cat.id).await.unwrap().is_some());

    // removing the dish unblocks the delete
    menu_item::delete(&pool, dish.id).await.unwrap();
    assert!(category::delete(&pool, cat.id).await.unwrap());
    assert!(category::find_by_id(&pool, cat.id).await.unwrap().is_none());
}

#[tokio::test]
async fn category_names_are_unique() {
    let pool = test_pool().await;
    category::create(
        &pool,
        CategoryCreate {
            name: "Drinks".into(),
            description: None,
            sort_order: None,
        },
    )
    .await
    .unwrap();

    let err = category::create(
        &pool,
        CategoryCreate {
            name: "Drinks".into(),
            description: Some("again".into()),
            sort_order: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Business(ErrorCode::CategoryNameExists, _)
    ));
}

#[tokio::test]
async fn menu_item_referenced_by_orders_cannot_be_deleted() {
    let pool = test_pool().await;
    let branch = make_restaurant(&pool, "Central").await;
    let dish = make_menu_item(&pool, "Burger", 9.99).await;

    let o = make_order(&pool, branch.id).await;
    add_line(&pool, o.id, dish.id, 1).await;

    let err = menu_item::delete(&pool, dish.id).await.unwrap_err();
    assert!(matches!(
        err,
        RepoError::Business(ErrorCode::MenuItemInOrders, _)
    ));
}

#[tokio::test]
async fn restaurant_with_orders_cannot_be_deleted() {
    let pool = test_pool().await;
    let branch = make_restaurant(&pool, "Central").await;
    let _o = make_order(&pool, branch.id).await;

    let err = office_server::db::repository::restaurant::delete(&pool, branch.id)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Business(ErrorCode::RestaurantHasOrders, _)
    ));
}

#[tokio::test]
async fn stock_pair_is_unique() {
    let pool = test_pool().await;
    let branch = make_restaurant(&pool, "Central").await;
    let beans = make_ingredient(&pool, "Beans", "kg").await;
    put_stock(&pool, beans.id, branch.id, 5.0).await;

    let err = stock::create(
        &pool,
        StockItemCreate {
            ingredient_id: beans.id,
            restaurant_id: branch.id,
            quantity: 1.0,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Business(ErrorCode::StockItemExists, _)
    ));
}

#[tokio::test]
async fn stock_add_accumulates() {
    let pool = test_pool().await;
    let branch = make_restaurant(&pool, "Central").await;
    let beans = make_ingredient(&pool, "Beans", "kg").await;
    put_stock(&pool, beans.id, branch.id, 5.0).await;

    let item = stock::find_by_pair(&pool, beans.id, branch.id)
        .await
        .unwrap()
        .unwrap();
    let item = stock::add_quantity(&pool, item.id, 2.5).await.unwrap();
    assert_eq!(item.quantity, 7.5);

    let item = stock::set_quantity(&pool, item.id, 3.0).await.unwrap();
    assert_eq!(item.quantity, 3.0);
}

#[tokio::test]
async fn deleting_ingredient_cascades_stock_and_recipes() {
    let pool = test_pool().await;
    let branch = make_restaurant(&pool, "Central").await;
    let dish = make_menu_item(&pool, "Stew", 11.50).await;
    let beans = make_ingredient(&pool, "Beans", "kg").await;
    put_stock(&pool, beans.id, branch.id, 5.0).await;
    recipe::replace_for_menu_item(
        &pool,
        dish.id,
        &[RecipeLineInput {
            ingredient_id: beans.id,
            quantity: 1.0,
            note: None,
        }],
    )
    .await
    .unwrap();

    ingredient::delete(&pool, beans.id).await.unwrap();

    assert!(stock::find_by_pair(&pool, beans.id, branch.id)
        .await
        .unwrap()
        .is_none());
    assert!(recipe::find_by_menu_item(&pool, dish.id)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn recipe_rejects_duplicate_ingredients() {
    let pool = test_pool().await;
    let dish = make_menu_item(&pool, "Stew", 11.50).await;
    let beans = make_ingredient(&pool, "Beans", "kg").await;

    let err = recipe::replace_for_menu_item(
        &pool,
        dish.id,
        &[
            RecipeLineInput {
                ingredient_id: beans.id,
                quantity: 1.0,
                note: None,
            },
            RecipeLineInput {
                ingredient_id: beans.id,
                quantity: 2.0,
                note: None,
            },
        ],
    )
    .await
    .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Business(ErrorCode::RecipeDuplicateIngredient, _)
    ));
}

#[tokio::test]
async fn recipe_replace_is_total() {
    let pool = test_pool().await;
    let dish = make_menu_item(&pool, "Stew", 11.50).await;
    let beans = make_ingredient(&pool, "Beans", "kg").await;
    let salt = make_ingredient(&pool, "Salt", "g").await;

    recipe::replace_for_menu_item(
        &pool,
        dish.id,
        &[RecipeLineInput {
            ingredient_id: beans.id,
            quantity: 1.0,
            note: None,
        }],
    )
    .await
    .unwrap();

    let lines = recipe::replace_for_menu_item(
        &pool,
        dish.id,
        &[RecipeLineInput {
            ingredient_id: salt.id,
            quantity: 5.0,
            note: Some("to taste".into()),
        }],
    )
    .await
    .unwrap();

    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].ingredient_id, salt.id);
}

#[tokio::test]
async fn user_emails_are_unique() {
    let pool = test_pool().await;
    let role = office_server::db::repository::role::find_by_name(&pool, "staff")
        .await
        .unwrap()
        .unwrap();

    user::create(
        &pool,
        UserCreate {
            email: "waiter@chain.example".into(),
            username: "waiter".into(),
            password: "long-enough-pass".into(),
            first_name: None,
            last_name: None,
            role_id: role.id,
        },
    )
    .await
    .unwrap();

    let err = user::create(
        &pool,
        UserCreate {
            email: "Waiter@Chain.Example".into(),
            username: "waiter2".into(),
            password: "long-enough-pass".into(),
            first_name: None,
            last_name: None,
            role_id: role.id,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Business(ErrorCode::UserEmailExists, _)
    ));
}

#[tokio::test]
async fn short_passwords_are_rejected() {
    let pool = test_pool().await;
    let role = office_server::db::repository::role::find_by_name(&pool, "staff")
        .await
        .unwrap()
        .unwrap();

    let err = user::create(
        &pool,
        UserCreate {
            email: "x@chain.example".into(),
            username: "x".into(),
            password: "short".into(),
            first_name: None,
            last_name: None,
            role_id: role.id,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Business(ErrorCode::PasswordTooShort, _)
    ));
}

#[tokio::test]
async fn system_roles_are_protected() {
    let pool = test_pool().await;
    let admin = office_server::db::repository::role::find_by_name(&pool, "admin")
        .await
        .unwrap()
        .unwrap();

    let err = office_server::db::repository::role::delete(&pool, admin.id)
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Business(ErrorCode::RoleIsSystem, _)));
}
