use sqlx::{Executor, PgPool};
use tracing::info;

pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    tx.execute(
        r#"
        CREATE SCHEMA IF NOT EXISTS academ;
        "#,
    )
    .await?;

    tx.execute(
        r#"
        CREATE TABLE IF NOT EXISTS academ.degrees (
          id          BIGSERIAL PRIMARY KEY,
          name        TEXT NOT NULL
        );
        "#,
    )
    .await?;

    tx.execute(
        r#"
        CREATE TABLE IF NOT EXISTS academ.faculties (
          id          BIGSERIAL PRIMARY KEY,
          name        TEXT NOT NULL UNIQUE
        );
        "#,
    )
    .await?;

    tx.execute(
        r#"
        CREATE TABLE IF NOT EXISTS academ.specialties (
          id          BIGSERIAL PRIMARY KEY,
          degree_id   BIGINT NOT NULL REFERENCES academ.degrees(id) ON DELETE RESTRICT,
          faculty_id  BIGINT NOT NULL REFERENCES academ.faculties(id) ON DELETE RESTRICT,
          name        TEXT NOT NULL,
          created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .await?;

    tx.execute(
        r#"
        CREATE TABLE IF NOT EXISTS academ.subjects (
          id          BIGSERIAL PRIMARY KEY,
          name        TEXT NOT NULL UNIQUE
        );
        "#,
    )
    .await?;

    tx.execute(
        r#"
        CREATE TABLE IF NOT EXISTS academ.academic_plans (
          id            BIGSERIAL PRIMARY KEY,
          specialty_id  BIGINT NOT NULL REFERENCES academ.specialties(id) ON DELETE RESTRICT,
          subject_id    BIGINT NOT NULL REFERENCES academ.subjects(id) ON DELETE RESTRICT,
          semester      INTEGER NOT NULL CHECK (semester BETWEEN 1 AND 8),
          control       TEXT NOT NULL CHECK (control IN ('exam', 'quiz', 'm_qu')),
          h_lecture     INTEGER NOT NULL DEFAULT 0 CHECK (h_lecture >= 0),
          h_laboratory  INTEGER NOT NULL DEFAULT 0 CHECK (h_laboratory >= 0),
          h_practice    INTEGER NOT NULL DEFAULT 0 CHECK (h_practice >= 0)
        );
        "#,
    )
    .await?;

    tx.execute(
        r#"
        CREATE INDEX IF NOT EXISTS idx_academic_plans_specialty
          ON academ.academic_plans(specialty_id, semester);
        "#,
    )
    .await?;

    tx.execute(
        r#"
        CREATE TABLE IF NOT EXISTS academ.rules (
          id          BIGSERIAL PRIMARY KEY,
          name        TEXT NOT NULL,
          rule        JSONB NOT NULL
        );
        "#,
    )
    .await?;

    tx.execute(
        r#"
        INSERT INTO academ.degrees (name)
        SELECT name
        FROM (VALUES ('Бакалавриат'), ('Специалитет'), ('Магистратура')) AS d(name)
        WHERE NOT EXISTS (SELECT 1 FROM academ.degrees);
        "#,
    )
    .await?;

    tx.execute(
        r#"
        INSERT INTO academ.faculties (name)
        SELECT 'Общий факультет'
        WHERE NOT EXISTS (SELECT 1 FROM academ.faculties);
        "#,
    )
    .await?;

    tx.execute(
        r#"
        INSERT INTO academ.rules (name, rule)
        SELECT 'standard',
               '{"columns": {"cipher": "A", "subjects": "B", "departments": "BG",
                             "controls": {"exam": "C", "quiz": "D"},
                             "1_sem": "R", "lectures": 1, "practice": 2, "labs": 3},
                 "ciphers": ["ОНБ", "ПБ"]}'::jsonb
        WHERE NOT EXISTS (SELECT 1 FROM academ.rules);
        "#,
    )
    .await?;

    tx.commit().await?;

    info!("database schema ensured");

    Ok(())
}
