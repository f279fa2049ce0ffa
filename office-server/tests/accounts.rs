//! Account management rules

mod common;

use common::*;
use office_server::core::Config;
use office_server::db::repository::{RepoError, role, user};
use office_server::db::seed;
use shared::ErrorCode;
use shared::models::{UserCreate, UserUpdate};
use sqlx::SqlitePool;

fn seed_config() -> Config {
    let mut config = Config::with_overrides("/tmp/office-test", 0);
    config.admin_email = "admin@chain.example".into();
    config.admin_password = Some("admin-password-1".into());
    config
}

async fn seeded_pool() -> SqlitePool {
    let pool = test_pool().await;
    seed::ensure_admin_user(&pool, &seed_config()).await.unwrap();
    pool
}

#[tokio::test]
async fn admin_is_seeded_once() {
    let pool = seeded_pool().await;
    assert_eq!(user::count_active_admins(&pool).await.unwrap(), 1);

    // a second boot must not duplicate the account
    seed::ensure_admin_user(&pool, &seed_config()).await.unwrap();
    assert_eq!(user::count_active_admins(&pool).await.unwrap(), 1);

    let admin = user::find_by_email(&pool, "admin@chain.example")
        .await
        .unwrap()
        .unwrap();
    assert!(admin.is_system);
}

#[tokio::test]
async fn last_admin_cannot_be_deactivated() {
    let pool = seeded_pool().await;
    let staff_role = role::find_by_name(&pool, "staff").await.unwrap().unwrap();

    // a normal admin besides the system one
    let admin_role = role::find_by_name(&pool, "admin").await.unwrap().unwrap();
    let second = user::create(
        &pool,
        UserCreate {
            email: "boss@chain.example".into(),
            username: "boss".into(),
            password: "boss-password-1".into(),
            first_name: Some("Big".into()),
            last_name: Some("Boss".into()),
            role_id: admin_role.id,
        },
    )
    .await
    .unwrap();

    // demoting one of two admins is fine
    user::update(
        &pool,
        second.id,
        UserUpdate {
            email: None,
            username: None,
            password: None,
            first_name: None,
            last_name: None,
            role_id: Some(staff_role.id),
            is_active: None,
        },
    )
    .await
    .unwrap();

    // the remaining admin is the system account; re-promote and verify the
    // guard fires on the last non-system admin
    let second = user::update(
        &pool,
        second.id,
        UserUpdate {
            email: None,
            username: None,
            password: None,
            first_name: None,
            last_name: None,
            role_id: Some(admin_role.id),
            is_active: None,
        },
    )
    .await
    .unwrap();

    // system accounts are immutable through the normal update path
    let system_admin = user::find_by_email(&pool, "admin@chain.example")
        .await
        .unwrap()
        .unwrap();
    let err = user::update(
        &pool,
        system_admin.id,
        UserUpdate {
            email: None,
            username: None,
            password: None,
            first_name: None,
            last_name: None,
            role_id: None,
            is_active: Some(false),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, RepoError::Business(ErrorCode::UserIsSystem, _)));

    // retire the system admin out of band, leaving `second` as the only
    // active administrator
    sqlx::query("UPDATE user SET is_active = 0 WHERE id = ?")
        .bind(system_admin.id)
        .execute(&pool)
        .await
        .unwrap();
    assert_eq!(user::count_active_admins(&pool).await.unwrap(), 1);

    // now the guard fires on demotion...
    let err = user::update(
        &pool,
        second.id,
        UserUpdate {
            email: None,
            username: None,
            password: None,
            first_name: None,
            last_name: None,
            role_id: Some(staff_role.id),
            is_active: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, RepoError::Business(ErrorCode::LastAdmin, _)));

    // ...on deactivation...
    let err = user::update(
        &pool,
        second.id,
        UserUpdate {
            email: None,
            username: None,
            password: None,
            first_name: None,
            last_name: None,
            role_id: None,
            is_active: Some(false),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, RepoError::Business(ErrorCode::LastAdmin, _)));

    // ...and on deletion
    let err = user::delete(&pool, second.id, system_admin.id)
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Business(ErrorCode::LastAdmin, _)));
}

#[tokio::test]
async fn self_deletion_is_rejected() {
    let pool = seeded_pool().await;
    let admin = user::find_by_email(&pool, "admin@chain.example")
        .await
        .unwrap()
        .unwrap();

    let err = user::delete(&pool, admin.id, admin.id).await.unwrap_err();
    assert!(matches!(
        err,
        RepoError::Business(ErrorCode::UserCannotDeleteSelf, _)
    ));
}

#[tokio::test]
async fn change_password_verifies_current() {
    let pool = seeded_pool().await;
    let staff_role = role::find_by_name(&pool, "staff").await.unwrap().unwrap();
    let account = user::create(
        &pool,
        UserCreate {
            email: "cook@chain.example".into(),
            username: "cook".into(),
            password: "original-pass-1".into(),
            first_name: None,
            last_name: None,
            role_id: staff_role.id,
        },
    )
    .await
    .unwrap();

    let err = user::change_password(&pool, account.id, "wrong-pass", "new-password-1")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Business(ErrorCode::InvalidCredentials, _)
    ));

    user::change_password(&pool, account.id, "original-pass-1", "new-password-1")
        .await
        .unwrap();

    let account = user::find_by_id(&pool, account.id).await.unwrap().unwrap();
    assert!(
        office_server::auth::password::verify_password("new-password-1", &account.password_hash)
            .unwrap()
    );
}

#[tokio::test]
async fn role_in_use_cannot_be_deleted() {
    let pool = seeded_pool().await;

    // built-in roles are system-protected; create a custom one
    let custom = role::create(
        &pool,
        shared::models::RoleCreate {
            name: "auditor".into(),
            display_name: None,
            permissions: vec!["reports:view".into()],
        },
    )
    .await
    .unwrap();

    user::create(
        &pool,
        UserCreate {
            email: "auditor@chain.example".into(),
            username: "auditor".into(),
            password: "auditor-pass-1".into(),
            first_name: None,
            last_name: None,
            role_id: custom.id,
        },
    )
    .await
    .unwrap();

    let err = role::delete(&pool, custom.id).await.unwrap_err();
    assert!(matches!(err, RepoError::Business(ErrorCode::RoleInUse, _)));
}
