use sqlx::PgPool;

use crate::{
    comparison::SubjectMatcher,
    error::AppResult,
    model::{SimilarSubjectsOut, SubjectMatchOut, SubjectOut},
    repo::{self, subjects::SubjectRow},
};

pub async fn list(pool: &PgPool) -> AppResult<Vec<SubjectOut>> {
    let rows = repo::subjects::list_subjects(pool).await?;
    Ok(rows
        .into_iter()
        .map(|row| SubjectOut {
            id: row.id,
            name: row.name,
        })
        .collect())
}

pub async fn similar(
    pool: &PgPool,
    matcher: &SubjectMatcher,
    names: Vec<String>,
) -> AppResult<Vec<SimilarSubjectsOut>> {
    let registry = repo::subjects::list_subjects(pool).await?;
    let ranked = rank_names(matcher, names, &registry);

    tracing::debug!(
        candidates = ranked.len(),
        registry = registry.len(),
        unmatched = ranked.iter().filter(|r| r.matches.is_empty()).count(),
        "subject names ranked"
    );

    Ok(ranked)
}

/// Rank every name against the registry snapshot.
pub fn rank_names(
    matcher: &SubjectMatcher,
    names: Vec<String>,
    registry: &[SubjectRow],
) -> Vec<SimilarSubjectsOut> {
    let ranked = matcher.rank(&names, registry, |row| row.name.as_str());

    names
        .into_iter()
        .zip(ranked)
        .map(|(name, matches)| SimilarSubjectsOut {
            name,
            matches: matches
                .into_iter()
                .map(|m| SubjectMatchOut {
                    subject_id: m.subject.id,
                    subject: m.subject.name.clone(),
                    score: m.score,
                })
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(names: &[&str]) -> Vec<SubjectRow> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| SubjectRow {
                id: i as i64 + 1,
                name: name.to_string(),
            })
            .collect()
    }

    #[test]
    fn exact_subject_ranks_alone_and_unknown_is_empty() {
        let registry = registry(&["Математика", "Физика"]);
        let ranked = rank_names(
            &SubjectMatcher::default(),
            vec!["Физика".into(), "История".into()],
            &registry,
        );

        assert_eq!(
            ranked,
            vec![
                SimilarSubjectsOut {
                    name: "Физика".into(),
                    matches: vec![SubjectMatchOut {
                        subject_id: 2,
                        subject: "Физика".into(),
                        score: 1.0,
                    }],
                },
                SimilarSubjectsOut {
                    name: "История".into(),
                    matches: vec![],
                },
            ]
        );
    }

    #[test]
    fn output_follows_candidate_order() {
        let registry = registry(&["Базы данных", "Операционные системы"]);
        let ranked = rank_names(
            &SubjectMatcher::default(),
            vec![
                "Операционные системы".into(),
                "Распределенные базы данных".into(),
            ],
            &registry,
        );

        assert_eq!(ranked[0].matches[0].subject_id, 2);
        assert_eq!(ranked[1].matches[0].subject_id, 1);
        assert!(ranked[1].matches[0].score < 1.0);
    }
}
