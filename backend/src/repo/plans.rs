use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PlanRow {
    pub id: i64,
    pub subject_id: i64,
    pub subject: String,
    pub semester: i32,
    pub control: String,
    pub h_lecture: i32,
    pub h_laboratory: i32,
    pub h_practice: i32,
}

#[derive(Debug, Clone)]
pub struct NewPlanRow {
    pub subject_id: i64,
    pub semester: i32,
    pub control: &'static str,
    pub h_lecture: i32,
    pub h_laboratory: i32,
    pub h_practice: i32,
}

/// All rows of a specialty, optionally restricted to a single semester.
pub async fn list_plan(
    pool: &PgPool,
    specialty_id: i64,
    semester: Option<i32>,
) -> Result<Vec<PlanRow>, sqlx::Error> {
    sqlx::query_as::<_, PlanRow>(
        r#"
        SELECT p.id,
               p.subject_id,
               s.name AS subject,
               p.semester,
               p.control,
               p.h_lecture,
               p.h_laboratory,
               p.h_practice
        FROM academ.academic_plans p
        JOIN academ.subjects s ON s.id = p.subject_id
        WHERE p.specialty_id = $1
          AND ($2::integer IS NULL OR p.semester = $2)
        ORDER BY p.semester, p.id
        "#,
    )
    .bind(specialty_id)
    .bind(semester)
    .fetch_all(pool)
    .await
}

pub async fn insert_plan_rows(
    conn: &mut PgConnection,
    specialty_id: i64,
    rows: &[NewPlanRow],
) -> Result<u64, sqlx::Error> {
    if rows.is_empty() {
        return Ok(0);
    }

    let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
        "INSERT INTO academ.academic_plans \
         (specialty_id, subject_id, semester, control, h_lecture, h_laboratory, h_practice) ",
    );
    builder.push_values(rows, |mut b, row| {
        b.push_bind(specialty_id)
            .push_bind(row.subject_id)
            .push_bind(row.semester)
            .push_bind(row.control)
            .push_bind(row.h_lecture)
            .push_bind(row.h_laboratory)
            .push_bind(row.h_practice);
    });

    let result = builder.build().execute(conn).await?;
    Ok(result.rows_affected())
}
