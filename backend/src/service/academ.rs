use sqlx::PgPool;

use crate::{
    comparison::{Curriculum, DifferenceEngine},
    error::AppResult,
    model::{AcademQuery, AcademReportOut, DifferenceOut},
    service::{plans, specialties},
};

/// Which courses of the target curriculum are already covered by the source
/// curriculum.
pub async fn compare(
    pool: &PgPool,
    engine: &DifferenceEngine,
    query: AcademQuery,
) -> AppResult<AcademReportOut> {
    plans::check_semester(query.from_semester, "from_semester")?;
    plans::check_semester(query.to_semester, "to_semester")?;

    let from_specialty = specialties::get(pool, query.from_specialty).await?;
    let to_specialty = specialties::get(pool, query.to_specialty).await?;

    let from = Curriculum::select(
        plans::load_entries(pool, query.from_specialty).await?,
        query.from_semester,
    );
    let to = Curriculum::select(
        plans::load_entries(pool, query.to_specialty).await?,
        query.to_semester,
    );

    let verdicts = engine.compare(&from, &to);
    let differing = verdicts.iter().filter(|v| v.differs).count();

    tracing::info!(
        from_specialty = query.from_specialty,
        from_semester = query.from_semester,
        to_specialty = query.to_specialty,
        to_semester = query.to_semester,
        from_entries = from.entries().len(),
        to_entries = to.entries().len(),
        differing,
        "academic difference computed"
    );

    Ok(AcademReportOut {
        from_specialty: from_specialty.name,
        to_specialty: to_specialty.name,
        total: verdicts.len(),
        differing,
        items: verdicts
            .iter()
            .map(|verdict| DifferenceOut {
                differs: verdict.differs,
                entry: plans::entry_to_out(&verdict.entry),
            })
            .collect(),
    })
}
