use anyhow::anyhow;
use sqlx::PgPool;

use crate::{
    comparison::difference::{ControlType, Hours, PlanEntry, MAX_SEMESTER},
    error::{AppError, AppResult},
    model::{PlanEntryOut, PlanQuery},
    repo::{self, plans::PlanRow},
};

/// Rows of one specialty's curriculum, optionally a single semester.
pub async fn list(pool: &PgPool, query: PlanQuery) -> AppResult<Vec<PlanEntryOut>> {
    if let Some(semester) = query.semester {
        check_semester(semester, "semester")?;
    }

    let semester = query.semester.map(|s| s as i32);
    let rows = repo::plans::list_plan(pool, query.specialty, semester).await?;

    tracing::debug!(
        specialty = query.specialty,
        semester = ?query.semester,
        rows = rows.len(),
        "plan queried"
    );

    rows.into_iter()
        .map(|row| plan_row_to_entry(row).map(|entry| entry_to_out(&entry)))
        .collect()
}

pub async fn load_entries(pool: &PgPool, specialty_id: i64) -> AppResult<Vec<PlanEntry>> {
    let rows = repo::plans::list_plan(pool, specialty_id, None).await?;
    rows.into_iter().map(plan_row_to_entry).collect()
}

pub fn check_semester(semester: u32, field: &str) -> AppResult<()> {
    if (1..=MAX_SEMESTER).contains(&semester) {
        Ok(())
    } else {
        Err(AppError::BadRequest(format!(
            "{field} must be between 1 and {MAX_SEMESTER}"
        )))
    }
}

pub fn plan_row_to_entry(row: PlanRow) -> AppResult<PlanEntry> {
    let control = row
        .control
        .parse::<ControlType>()
        .map_err(|err: String| AppError::Internal(anyhow!("plan row {}: {err}", row.id)))?;

    Ok(PlanEntry {
        id: row.id,
        subject_id: row.subject_id,
        subject: row.subject,
        semester: non_negative(row.id, "semester", row.semester)?,
        hours: Hours {
            lecture: non_negative(row.id, "h_lecture", row.h_lecture)?,
            laboratory: non_negative(row.id, "h_laboratory", row.h_laboratory)?,
            practice: non_negative(row.id, "h_practice", row.h_practice)?,
        },
        control,
    })
}

pub fn entry_to_out(entry: &PlanEntry) -> PlanEntryOut {
    PlanEntryOut {
        id: entry.id,
        subject_id: entry.subject_id,
        subject: entry.subject.clone(),
        semester: entry.semester,
        control: entry.control,
        lecture: entry.hours.lecture,
        laboratory: entry.hours.laboratory,
        practice: entry.hours.practice,
        total_hours: entry.hours.total(),
    }
}

fn non_negative(row_id: i64, column: &str, value: i32) -> AppResult<u32> {
    u32::try_from(value)
        .map_err(|_| AppError::Internal(anyhow!("plan row {row_id}: negative {column} {value}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(control: &str, h_lecture: i32) -> PlanRow {
        PlanRow {
            id: 7,
            subject_id: 3,
            subject: "Физика".into(),
            semester: 2,
            control: control.into(),
            h_lecture,
            h_laboratory: 1,
            h_practice: 2,
        }
    }

    #[test]
    fn converts_stored_row() {
        let entry = plan_row_to_entry(row("m_qu", 4)).unwrap();
        assert_eq!(entry.control, ControlType::GradedQuiz);
        assert_eq!(entry.hours.total(), 7);

        let out = entry_to_out(&entry);
        assert_eq!(out.total_hours, 7);
        assert_eq!(out.semester, 2);
    }

    #[test]
    fn large_stored_hours_sum_without_overflow() {
        let mut stored = row("exam", i32::MAX);
        stored.h_laboratory = i32::MAX;
        stored.h_practice = i32::MAX;
        let out = entry_to_out(&plan_row_to_entry(stored).unwrap());
        assert_eq!(out.total_hours, 3 * i32::MAX as u64);
    }

    #[test]
    fn rejects_corrupt_rows() {
        assert!(matches!(
            plan_row_to_entry(row("credit", 4)),
            Err(AppError::Internal(_))
        ));
        assert!(matches!(
            plan_row_to_entry(row("exam", -1)),
            Err(AppError::Internal(_))
        ));
    }

    #[test]
    fn semester_bounds() {
        assert!(check_semester(1, "semester").is_ok());
        assert!(check_semester(8, "semester").is_ok());
        assert!(matches!(
            check_semester(0, "semester"),
            Err(AppError::BadRequest(_))
        ));
        assert!(check_semester(9, "semester").is_err());
    }
}
