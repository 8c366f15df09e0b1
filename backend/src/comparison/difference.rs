//! Credit-transfer comparison of two curricula.
//!
//! A course of the target curriculum transfers when the source curriculum
//! already covered the same subject, or a similar enough one, with at least
//! as many hours.

use std::{collections::HashSet, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::{subjects::SubjectMatcher, MatchSettings};

pub const MAX_SEMESTER: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControlType {
    #[serde(rename = "exam")]
    Exam,
    /// Pass/fail.
    #[serde(rename = "quiz")]
    Quiz,
    /// Graded pass/fail.
    #[serde(rename = "m_qu")]
    GradedQuiz,
}

impl ControlType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlType::Exam => "exam",
            ControlType::Quiz => "quiz",
            ControlType::GradedQuiz => "m_qu",
        }
    }
}

impl fmt::Display for ControlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ControlType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "exam" => Ok(ControlType::Exam),
            "quiz" => Ok(ControlType::Quiz),
            "m_qu" => Ok(ControlType::GradedQuiz),
            other => Err(format!("unknown control type: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Hours {
    pub lecture: u32,
    pub laboratory: u32,
    pub practice: u32,
}

impl Hours {
    /// Widened so three full `u32` columns cannot overflow.
    pub fn total(&self) -> u64 {
        u64::from(self.lecture) + u64::from(self.laboratory) + u64::from(self.practice)
    }
}

/// One row of a curriculum.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanEntry {
    pub id: i64,
    pub subject_id: i64,
    pub subject: String,
    pub semester: u32,
    pub hours: Hours,
    pub control: ControlType,
}

impl PlanEntry {
    /// Whether `self` already covers `required`: at least as many hours.
    pub fn covers(&self, required: &PlanEntry) -> bool {
        self.hours.total() >= required.hours.total()
    }
}

/// Entries of one specialty up to a semester cutoff, in load order.
#[derive(Debug, Clone, Default)]
pub struct Curriculum {
    entries: Vec<PlanEntry>,
}

impl Curriculum {
    pub fn select<I>(entries: I, semester_cutoff: u32) -> Self
    where
        I: IntoIterator<Item = PlanEntry>,
    {
        Self {
            entries: entries
                .into_iter()
                .filter(|entry| entry.semester <= semester_cutoff)
                .collect(),
        }
    }

    pub fn entries(&self) -> &[PlanEntry] {
        &self.entries
    }

    fn subject_ids(&self) -> HashSet<i64> {
        self.entries.iter().map(|entry| entry.subject_id).collect()
    }

    /// Split into entries whose subject also occurs in `other` (ordered by
    /// subject then semester) and the rest (load order).
    fn partition_against(&self, other: &Curriculum) -> (Vec<&PlanEntry>, Vec<&PlanEntry>) {
        let other_ids = other.subject_ids();
        let (mut same, diff): (Vec<&PlanEntry>, Vec<&PlanEntry>) = self
            .entries
            .iter()
            .partition(|entry| other_ids.contains(&entry.subject_id));
        same.sort_by_key(|entry| (entry.subject_id, entry.semester));
        (same, diff)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DifferenceVerdict {
    pub differs: bool,
    pub entry: PlanEntry,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DifferenceEngine {
    matcher: SubjectMatcher,
}

impl DifferenceEngine {
    pub fn new(settings: MatchSettings) -> Self {
        Self {
            matcher: SubjectMatcher::new(settings),
        }
    }

    /// One verdict per entry of `to`: first the subjects present in both
    /// curricula, then the remaining ones matched by name similarity.
    pub fn compare(&self, from: &Curriculum, to: &Curriculum) -> Vec<DifferenceVerdict> {
        let (from_same, from_diff) = from.partition_against(to);
        let (to_same, to_diff) = to.partition_against(from);

        let mut verdicts = pair_identical(&from_same, &to_same);
        verdicts.extend(to_diff.into_iter().map(|required| DifferenceVerdict {
            differs: !self.is_covered_by_similar(required, &from_diff),
            entry: required.clone(),
        }));
        verdicts
    }

    fn is_covered_by_similar(&self, required: &PlanEntry, candidates: &[&PlanEntry]) -> bool {
        let ranked = self.matcher.ranked_above(
            &required.subject,
            candidates,
            |entry| entry.subject.as_str(),
            self.matcher.settings().sensitivity,
        );
        ranked
            .first()
            .is_some_and(|best| best.subject.covers(required))
    }
}

/// Zip identity-matched entries subject by subject. Both sides must be
/// sorted by (subject, semester). A target occurrence without a source
/// partner of the same subject differs.
fn pair_identical(from_same: &[&PlanEntry], to_same: &[&PlanEntry]) -> Vec<DifferenceVerdict> {
    debug_assert!(from_same
        .windows(2)
        .all(|w| (w[0].subject_id, w[0].semester) <= (w[1].subject_id, w[1].semester)));

    let mut verdicts = Vec::with_capacity(to_same.len());
    let mut cursor = 0;

    for required in to_same {
        while cursor < from_same.len() && from_same[cursor].subject_id < required.subject_id {
            cursor += 1;
        }
        let partner = from_same
            .get(cursor)
            .filter(|entry| entry.subject_id == required.subject_id);
        if partner.is_some() {
            cursor += 1;
        }

        verdicts.push(DifferenceVerdict {
            differs: !partner.is_some_and(|entry| entry.covers(required)),
            entry: (*required).clone(),
        });
    }

    verdicts
}
