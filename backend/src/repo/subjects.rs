use sqlx::{PgConnection, PgExecutor};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SubjectRow {
    pub id: i64,
    pub name: String,
}

pub async fn list_subjects<'e, E>(executor: E) -> Result<Vec<SubjectRow>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, SubjectRow>(
        r#"
        SELECT id, name
        FROM academ.subjects
        ORDER BY id
        "#,
    )
    .fetch_all(executor)
    .await
}

pub async fn existing_ids(conn: &mut PgConnection, ids: &[i64]) -> Result<Vec<i64>, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        r#"
        SELECT id
        FROM academ.subjects
        WHERE id = ANY($1)
        "#,
    )
    .bind(ids)
    .fetch_all(conn)
    .await
}

/// Insert a subject, or return the id of the one already stored under the
/// same name.
pub async fn insert_or_get(conn: &mut PgConnection, name: &str) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO academ.subjects (name)
        VALUES ($1)
        ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
        RETURNING id
        "#,
    )
    .bind(name)
    .fetch_one(conn)
    .await
}
