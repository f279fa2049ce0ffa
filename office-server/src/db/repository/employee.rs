//! Employee Repository

use super::{RepoError, RepoResult};
use shared::error::ErrorCode;
use shared::models::{Employee, EmployeeCreate, EmployeeDetail, EmployeeUpdate};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

const DETAIL_QUERY: &str = "SELECT e.id, e.user_id, u.email, u.first_name, u.last_name, e.restaurant_id, r.name AS restaurant_name, e.position, e.hire_date, e.is_active \
     FROM employee e \
     JOIN user u ON u.id = e.user_id \
     LEFT JOIN restaurant r ON r.id = e.restaurant_id";

pub async fn find_all(
    pool: &SqlitePool,
    restaurant_id: Option<i64>,
) -> RepoResult<Vec<EmployeeDetail>> {
    let employees = match restaurant_id {
        Some(rid) => {
            sqlx::query_as::<_, EmployeeDetail>(&format!(
                "{DETAIL_QUERY} WHERE e.restaurant_id = ? ORDER BY u.last_name, u.first_name"
            ))
            .bind(rid)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, EmployeeDetail>(&format!(
                "{DETAIL_QUERY} ORDER BY u.last_name, u.first_name"
            ))
            .fetch_all(pool)
            .await?
        }
    };
    Ok(employees)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Employee>> {
    let employee = sqlx::query_as::<_, Employee>(
        "SELECT id, user_id, restaurant_id, position, hire_date, is_active FROM employee WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(employee)
}

pub async fn find_detail_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<EmployeeDetail>> {
    let employee = sqlx::query_as::<_, EmployeeDetail>(&format!("{DETAIL_QUERY} WHERE e.id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(employee)
}

pub async fn find_by_user(pool: &SqlitePool, user_id: i64) -> RepoResult<Option<Employee>> {
    let employee = sqlx::query_as::<_, Employee>(
        "SELECT id, user_id, restaurant_id, position, hire_date, is_active FROM employee WHERE user_id = ?",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;
    Ok(employee)
}

pub async fn create(pool: &SqlitePool, data: EmployeeCreate) -> RepoResult<Employee> {
    if super::user::find_by_id(pool, data.user_id).await?.is_none() {
        return Err(RepoError::Business(
            ErrorCode::UserNotFound,
            format!("User {} not found", data.user_id),
        ));
    }

    if find_by_user(pool, data.user_id).await?.is_some() {
        return Err(RepoError::Business(
            ErrorCode::EmployeeExistsForUser,
            format!("User {} already has an employee profile", data.user_id),
        ));
    }

    if let Some(rid) = data.restaurant_id
        && super::restaurant::find_by_id(pool, rid).await?.is_none()
    {
        return Err(RepoError::Business(
            ErrorCode::RestaurantNotFound,
            format!("Restaurant {rid} not found"),
        ));
    }

    let id = snowflake_id();
    sqlx::query(
        "INSERT INTO employee (id, user_id, restaurant_id, position, hire_date, is_active) VALUES (?, ?, ?, ?, ?, 1)",
    )
    .bind(id)
    .bind(data.user_id)
    .bind(data.restaurant_id)
    .bind(&data.position)
    .bind(now_millis())
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create employee".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: EmployeeUpdate) -> RepoResult<Employee> {
    let existing = find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Employee {id} not found")))?;

    // Outer None = unchanged, Some(None) = unassign from restaurant
    let restaurant_id = match data.restaurant_id {
        Some(Some(rid)) => {
            if super::restaurant::find_by_id(pool, rid).await?.is_none() {
                return Err(RepoError::Business(
                    ErrorCode::RestaurantNotFound,
                    format!("Restaurant {rid} not found"),
                ));
            }
            Some(rid)
        }
        Some(None) => None,
        None => existing.restaurant_id,
    };

    sqlx::query(
        "UPDATE employee SET restaurant_id = ?1, position = COALESCE(?2, position), is_active = COALESCE(?3, is_active) WHERE id = ?4",
    )
    .bind(restaurant_id)
    .bind(data.position)
    .bind(data.is_active)
    .bind(id)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Employee {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM employee WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Employee {id} not found")));
    }
    Ok(true)
}
