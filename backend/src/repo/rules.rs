use sqlx::{types::Json, PgPool};

#[derive(Debug, sqlx::FromRow)]
pub struct RuleRow {
    pub id: i64,
    pub name: String,
    pub rule: Json<serde_json::Value>,
}

pub async fn list_rules(pool: &PgPool) -> Result<Vec<RuleRow>, sqlx::Error> {
    sqlx::query_as::<_, RuleRow>(
        r#"
        SELECT id, name, rule
        FROM academ.rules
        ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn get_rule(pool: &PgPool, id: i64) -> Result<Option<RuleRow>, sqlx::Error> {
    sqlx::query_as::<_, RuleRow>(
        r#"
        SELECT id, name, rule
        FROM academ.rules
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}
