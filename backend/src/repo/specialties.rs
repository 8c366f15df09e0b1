use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};

#[derive(Debug, sqlx::FromRow)]
pub struct SpecialtyRow {
    pub id: i64,
    pub name: String,
    pub faculty: String,
    pub degree: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
pub struct NamedRow {
    pub id: i64,
    pub name: String,
}

pub struct NewSpecialty {
    pub name: String,
    pub faculty_id: i64,
    pub degree_id: i64,
}

const SPECIALTY_SELECT: &str = r#"
        SELECT s.id,
               s.name,
               f.name AS faculty,
               d.name AS degree,
               s.created_at
        FROM academ.specialties s
        JOIN academ.faculties f ON f.id = s.faculty_id
        JOIN academ.degrees d ON d.id = s.degree_id
"#;

pub async fn list_specialties(pool: &PgPool) -> Result<Vec<SpecialtyRow>, sqlx::Error> {
    let sql = format!("{SPECIALTY_SELECT} ORDER BY f.name, s.name");
    sqlx::query_as::<_, SpecialtyRow>(&sql).fetch_all(pool).await
}

pub async fn get_specialty(pool: &PgPool, id: i64) -> Result<Option<SpecialtyRow>, sqlx::Error> {
    let sql = format!("{SPECIALTY_SELECT} WHERE s.id = $1");
    sqlx::query_as::<_, SpecialtyRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn list_faculties(pool: &PgPool) -> Result<Vec<NamedRow>, sqlx::Error> {
    sqlx::query_as::<_, NamedRow>(
        r#"
        SELECT id, name
        FROM academ.faculties
        ORDER BY name
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn list_degrees(pool: &PgPool) -> Result<Vec<NamedRow>, sqlx::Error> {
    sqlx::query_as::<_, NamedRow>(
        r#"
        SELECT id, name
        FROM academ.degrees
        ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn faculty_and_degree_exist(
    conn: &mut PgConnection,
    faculty_id: i64,
    degree_id: i64,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS (SELECT 1 FROM academ.faculties WHERE id = $1)
           AND EXISTS (SELECT 1 FROM academ.degrees WHERE id = $2)
        "#,
    )
    .bind(faculty_id)
    .bind(degree_id)
    .fetch_one(conn)
    .await
}

pub async fn insert_specialty(
    conn: &mut PgConnection,
    record: NewSpecialty,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO academ.specialties (name, faculty_id, degree_id)
        VALUES ($1, $2, $3)
        RETURNING id
        "#,
    )
    .bind(record.name)
    .bind(record.faculty_id)
    .bind(record.degree_id)
    .fetch_one(conn)
    .await
}
