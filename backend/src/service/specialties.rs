use sqlx::PgPool;

use crate::{
    error::{AppError, AppResult},
    model::{LookupOut, SpecialtyOut},
    repo::{
        self,
        specialties::{NamedRow, SpecialtyRow},
    },
};

pub async fn list(pool: &PgPool) -> AppResult<Vec<SpecialtyOut>> {
    let rows = repo::specialties::list_specialties(pool).await?;
    Ok(rows.into_iter().map(specialty_row_to_out).collect())
}

pub async fn get(pool: &PgPool, id: i64) -> AppResult<SpecialtyOut> {
    repo::specialties::get_specialty(pool, id)
        .await?
        .map(specialty_row_to_out)
        .ok_or_else(|| AppError::NotFound(format!("specialty {id} not found")))
}

pub async fn list_faculties(pool: &PgPool) -> AppResult<Vec<LookupOut>> {
    let rows = repo::specialties::list_faculties(pool).await?;
    Ok(rows.into_iter().map(named_row_to_out).collect())
}

pub async fn list_degrees(pool: &PgPool) -> AppResult<Vec<LookupOut>> {
    let rows = repo::specialties::list_degrees(pool).await?;
    Ok(rows.into_iter().map(named_row_to_out).collect())
}

fn named_row_to_out(row: NamedRow) -> LookupOut {
    LookupOut {
        id: row.id,
        name: row.name,
    }
}

fn specialty_row_to_out(row: SpecialtyRow) -> SpecialtyOut {
    SpecialtyOut {
        id: row.id,
        name: row.name,
        faculty: row.faculty,
        degree: row.degree,
        created_at: row.created_at.to_rfc3339(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn faculty_and_degree_rows_keep_id_and_name() {
        let out = named_row_to_out(NamedRow {
            id: 2,
            name: "Магистратура".to_string(),
        });
        assert_eq!(out.id, 2);
        assert_eq!(out.name, "Магистратура");
    }
}
