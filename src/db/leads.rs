use uuid::Uuid;

use super::{CreateLeadRequest, DbPool};

/// Store a captured lead and return its id
pub async fn insert_lead(pool: &DbPool, lead: &CreateLeadRequest) -> Result<String, sqlx::Error> {
    let id = Uuid::new_v4().to_string();
    let now = chrono::Utc::now().to_rfc3339();

    sqlx::query(
        r#"
        INSERT INTO leads (id, name, email, role, company, message, consent, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&lead.name)
    .bind(&lead.email)
    .bind(lead.role.to_string())
    .bind(&lead.company)
    .bind(&lead.message)
    .bind(lead.consent)
    .bind(&now)
    .execute(pool)
    .await?;

    Ok(id)
}
