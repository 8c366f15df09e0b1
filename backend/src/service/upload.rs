//! Curriculum upload: parse a sheet into subjects and plan rows, let the
//! caller resolve every subject against the registry, then store the result.

use std::collections::{HashMap, HashSet};

use sqlx::PgPool;

use crate::{
    comparison::{text::normalize, SubjectMatcher},
    error::{AppError, AppResult},
    model::{
        PlanItemPayload, RuleOut, SubjectChoicePayload, UploadCommitOut, UploadCommitPayload,
        UploadParseOut, UploadParsePayload,
    },
    parser::{self, LayoutRule},
    repo::{
        self,
        plans::NewPlanRow,
        specialties::NewSpecialty,
        subjects::SubjectRow,
    },
    service::{plans::check_semester, subjects},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubjectResolution {
    Create(String),
    Existing(i64),
}

pub async fn list_rules(pool: &PgPool) -> AppResult<Vec<RuleOut>> {
    let rows = repo::rules::list_rules(pool).await?;
    Ok(rows
        .into_iter()
        .map(|row| RuleOut {
            id: row.id,
            name: row.name,
            rule: row.rule.0,
        })
        .collect())
}

pub async fn parse(
    pool: &PgPool,
    matcher: &SubjectMatcher,
    payload: UploadParsePayload,
) -> AppResult<UploadParseOut> {
    let row = repo::rules::get_rule(pool, payload.rule_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("rule {} not found", payload.rule_id)))?;
    let rule: LayoutRule = serde_json::from_value(row.rule.0).map_err(|err| {
        AppError::BadRequest(format!("rule {} is malformed: {err}", payload.rule_id))
    })?;

    let plan = parser::parse_sheet(&rule, &payload.rows)?;
    if plan.subjects.is_empty() {
        tracing::warn!(
            rule_id = payload.rule_id,
            rows = payload.rows.len(),
            "no subject rows matched the rule"
        );
    }

    let subjects = subjects::similar(pool, matcher, plan.subjects).await?;

    Ok(UploadParseOut {
        subjects,
        items: plan.items,
    })
}

pub async fn commit(pool: &PgPool, payload: UploadCommitPayload) -> AppResult<UploadCommitOut> {
    let UploadCommitPayload {
        specialty,
        subjects,
        items,
    } = payload;

    let specialty_name = specialty.name.trim().to_string();
    if specialty_name.is_empty() {
        return Err(AppError::BadRequest("specialty name is required".into()));
    }

    let resolutions = resolve_subjects(&subjects)?;
    validate_items(&items, resolutions.len())?;

    let mut tx = pool.begin().await?;

    if !repo::specialties::faculty_and_degree_exist(
        &mut *tx,
        specialty.faculty_id,
        specialty.degree_id,
    )
    .await?
    {
        return Err(AppError::BadRequest(format!(
            "faculty {} or degree {} does not exist",
            specialty.faculty_id, specialty.degree_id
        )));
    }

    let chosen: Vec<i64> = resolutions
        .iter()
        .filter_map(|r| match r {
            SubjectResolution::Existing(id) => Some(*id),
            SubjectResolution::Create(_) => None,
        })
        .collect();
    let found: HashSet<i64> = repo::subjects::existing_ids(&mut *tx, &chosen)
        .await?
        .into_iter()
        .collect();
    if let Some(missing) = chosen.iter().find(|id| !found.contains(*id)) {
        return Err(AppError::BadRequest(format!("subject {missing} does not exist")));
    }

    let specialty_id = repo::specialties::insert_specialty(
        &mut *tx,
        NewSpecialty {
            name: specialty_name,
            faculty_id: specialty.faculty_id,
            degree_id: specialty.degree_id,
        },
    )
    .await?;

    let registry = repo::subjects::list_subjects(&mut *tx).await?;
    let resolutions = reuse_registry_subjects(resolutions, &registry);

    let mut subject_ids = Vec::with_capacity(resolutions.len());
    let mut created: HashMap<String, i64> = HashMap::new();
    for resolution in resolutions {
        let id = match resolution {
            SubjectResolution::Existing(id) => id,
            SubjectResolution::Create(name) => {
                let key = normalize(&name);
                match created.get(&key) {
                    Some(id) => *id,
                    None => {
                        let id = repo::subjects::insert_or_get(&mut *tx, &name).await?;
                        created.insert(key, id);
                        id
                    }
                }
            }
        };
        subject_ids.push(id);
    }
    let created_subjects = created.len();

    let rows = plan_rows(&items, &subject_ids)?;
    let inserted = repo::plans::insert_plan_rows(&mut *tx, specialty_id, &rows).await?;

    tx.commit().await?;

    tracing::info!(
        specialty_id,
        created_subjects,
        items = inserted,
        "curriculum uploaded"
    );

    Ok(UploadCommitOut {
        specialty_id,
        created_subjects,
        items: inserted,
    })
}

/// Turn the caller's choices into resolutions. A new subject needs a
/// non-empty name, otherwise an existing subject must be picked.
pub fn resolve_subjects(choices: &[SubjectChoicePayload]) -> AppResult<Vec<SubjectResolution>> {
    choices
        .iter()
        .enumerate()
        .map(|(index, choice)| {
            if choice.is_create {
                let name = choice.name.trim();
                if normalize(name).is_empty() {
                    return Err(AppError::BadRequest(format!(
                        "subject #{index}: name is required to create a subject"
                    )));
                }
                Ok(SubjectResolution::Create(name.to_string()))
            } else {
                choice
                    .existing_id
                    .map(SubjectResolution::Existing)
                    .ok_or_else(|| {
                        AppError::BadRequest(format!(
                            "subject #{index} ({}): choose an existing subject or create a new one",
                            choice.name
                        ))
                    })
            }
        })
        .collect()
}

/// Subjects are unique by normalized name: a new name that normalizes to a
/// stored subject's name resolves to that subject instead.
pub fn reuse_registry_subjects(
    resolutions: Vec<SubjectResolution>,
    registry: &[SubjectRow],
) -> Vec<SubjectResolution> {
    let mut known: HashMap<String, i64> = HashMap::with_capacity(registry.len());
    for row in registry {
        known.entry(normalize(&row.name)).or_insert(row.id);
    }

    resolutions
        .into_iter()
        .map(|resolution| match resolution {
            SubjectResolution::Create(name) => match known.get(&normalize(&name)) {
                Some(id) => SubjectResolution::Existing(*id),
                None => SubjectResolution::Create(name),
            },
            existing => existing,
        })
        .collect()
}

pub fn validate_items(items: &[PlanItemPayload], subject_count: usize) -> AppResult<()> {
    for (index, item) in items.iter().enumerate() {
        if item.subject_index >= subject_count {
            return Err(AppError::BadRequest(format!(
                "item #{index}: unknown subject index {}",
                item.subject_index
            )));
        }
        check_semester(item.semester, &format!("item #{index} semester"))?;
    }
    Ok(())
}

fn plan_rows(items: &[PlanItemPayload], subject_ids: &[i64]) -> AppResult<Vec<NewPlanRow>> {
    items
        .iter()
        .map(|item| {
            Ok(NewPlanRow {
                subject_id: subject_ids[item.subject_index],
                semester: to_column(item.semester)?,
                control: item.control.as_str(),
                h_lecture: to_column(item.lecture)?,
                h_laboratory: to_column(item.laboratory)?,
                h_practice: to_column(item.practice)?,
            })
        })
        .collect()
}

fn to_column(value: u32) -> AppResult<i32> {
    i32::try_from(value).map_err(|_| AppError::BadRequest(format!("value {value} is too large")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparison::difference::ControlType;

    fn choice(name: &str, is_create: bool, existing_id: Option<i64>) -> SubjectChoicePayload {
        SubjectChoicePayload {
            name: name.into(),
            is_create,
            existing_id,
        }
    }

    fn item(subject_index: usize, semester: u32) -> PlanItemPayload {
        PlanItemPayload {
            subject_index,
            semester,
            lecture: 16,
            laboratory: 0,
            practice: 8,
            control: ControlType::Exam,
        }
    }

    #[test]
    fn resolves_created_and_existing_subjects() {
        let resolved = resolve_subjects(&[
            choice("  Физика ", true, Some(4)),
            choice("История", false, Some(9)),
        ])
        .unwrap();
        assert_eq!(
            resolved,
            vec![
                SubjectResolution::Create("Физика".into()),
                SubjectResolution::Existing(9),
            ]
        );
    }

    #[test]
    fn creating_requires_a_name() {
        let err = resolve_subjects(&[choice("   ", true, None)]).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn creating_requires_letters_or_digits() {
        let err = resolve_subjects(&[choice(" -- ", true, None)]).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn new_names_equal_after_normalization_reuse_stored_subjects() {
        let registry = vec![
            SubjectRow {
                id: 3,
                name: "Физика".into(),
            },
            SubjectRow {
                id: 5,
                name: "Web-дизайн".into(),
            },
        ];
        let resolved = reuse_registry_subjects(
            vec![
                SubjectResolution::Create("физика".into()),
                SubjectResolution::Create("Физика.".into()),
                SubjectResolution::Create("web дизайн".into()),
                SubjectResolution::Create("Химия".into()),
                SubjectResolution::Existing(9),
            ],
            &registry,
        );

        assert_eq!(
            resolved,
            vec![
                SubjectResolution::Existing(3),
                SubjectResolution::Existing(3),
                SubjectResolution::Existing(5),
                SubjectResolution::Create("Химия".into()),
                SubjectResolution::Existing(9),
            ]
        );
    }

    #[test]
    fn not_creating_requires_a_choice() {
        let err = resolve_subjects(&[choice("История", false, None)]).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(msg) if msg.contains("История")));
    }

    #[test]
    fn items_must_reference_known_subjects_and_semesters() {
        assert!(validate_items(&[item(0, 1), item(1, 8)], 2).is_ok());
        assert!(validate_items(&[item(2, 1)], 2).is_err());
        assert!(validate_items(&[item(0, 0)], 1).is_err());
        assert!(validate_items(&[item(0, 9)], 1).is_err());
    }

    #[test]
    fn plan_rows_map_subject_indices_to_ids() {
        let rows = plan_rows(&[item(1, 3), item(0, 1)], &[40, 41]).unwrap();
        assert_eq!(rows[0].subject_id, 41);
        assert_eq!(rows[0].semester, 3);
        assert_eq!(rows[0].control, "exam");
        assert_eq!(rows[1].subject_id, 40);
        assert_eq!(rows[1].h_practice, 8);
    }

    #[test]
    fn oversized_hours_are_rejected() {
        let mut big = item(0, 1);
        big.lecture = u32::MAX;
        assert!(plan_rows(&[big], &[1]).is_err());
    }
}
