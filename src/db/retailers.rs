use uuid::Uuid;

use super::{DbPool, Retailer, RETAILER_ROLE};

pub async fn find_retailer_by_email(
    pool: &DbPool,
    email: &str,
) -> Result<Option<Retailer>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM retailers WHERE email = ?")
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub async fn find_retailer_by_id(pool: &DbPool, id: &str) -> Result<Option<Retailer>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM retailers WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Insert a retailer account. The unique index on `email` rejects duplicates.
pub async fn insert_retailer(
    pool: &DbPool,
    email: &str,
    password_hash: &str,
    company: Option<&str>,
    contact_name: Option<&str>,
) -> Result<String, sqlx::Error> {
    let id = Uuid::new_v4().to_string();
    let now = chrono::Utc::now().to_rfc3339();

    sqlx::query(
        r#"
        INSERT INTO retailers (id, email, password_hash, company, contact_name, role, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(email)
    .bind(password_hash)
    .bind(company)
    .bind(contact_name)
    .bind(RETAILER_ROLE)
    .bind(&now)
    .execute(pool)
    .await?;

    Ok(id)
}
