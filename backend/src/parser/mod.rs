//! Curriculum sheet parsing driven by a stored layout rule.
//!
//! The sheet arrives as a grid of cell strings. A rule names the columns that
//! hold the subject cipher, the subject name, the exam/quiz semester lists and
//! the first per-semester block of hour columns.

mod column;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::comparison::difference::{ControlType, MAX_SEMESTER};

pub use column::column_index;

/// Width of the per-semester block of hour columns.
const SEMESTER_BLOCK: usize = 4;

#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("invalid column reference {0:?}")]
    InvalidColumn(String),
    #[error("row {row}: invalid semester {value:?}")]
    InvalidSemester { row: usize, value: String },
    #[error("row {row}: semester {semester} is outside 1..={}", MAX_SEMESTER)]
    SemesterOutOfRange { row: usize, semester: u32 },
    #[error("row {row}, column {column}: invalid hour count {value:?}")]
    InvalidHours {
        row: usize,
        column: usize,
        value: String,
    },
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ControlColumns {
    pub exam: String,
    pub quiz: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RuleColumns {
    pub cipher: String,
    pub subjects: String,
    pub departments: String,
    pub controls: ControlColumns,
    #[serde(rename = "1_sem")]
    pub first_semester: String,
    pub lectures: usize,
    pub practice: usize,
    pub labs: usize,
}

/// Column layout of a curriculum sheet, stored as JSON.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LayoutRule {
    pub columns: RuleColumns,
    pub ciphers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedItem {
    /// Index into [`ParsedPlan::subjects`].
    pub subject_index: usize,
    pub semester: u32,
    pub lecture: u32,
    pub laboratory: u32,
    pub practice: u32,
    pub control: ControlType,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParsedPlan {
    pub subjects: Vec<String>,
    pub items: Vec<ParsedItem>,
}

struct Layout<'r> {
    cipher: usize,
    subject: usize,
    exam: usize,
    quiz: usize,
    first_semester: usize,
    lectures: usize,
    labs: usize,
    practice: usize,
    width: usize,
    ciphers: &'r [String],
}

impl<'r> Layout<'r> {
    fn resolve(rule: &'r LayoutRule) -> Result<Self, ParseError> {
        let cols = &rule.columns;
        Ok(Self {
            cipher: column_index(&cols.cipher)? - 1,
            subject: column_index(&cols.subjects)? - 1,
            exam: column_index(&cols.controls.exam)? - 1,
            quiz: column_index(&cols.controls.quiz)? - 1,
            first_semester: column_index(&cols.first_semester)? - 1,
            lectures: cols.lectures,
            labs: cols.labs,
            practice: cols.practice,
            width: column_index(&cols.departments)?,
            ciphers: &rule.ciphers,
        })
    }

    /// Cells right of the department column are outside the table.
    fn cell<'a>(&self, row: &'a [String], index: usize) -> &'a str {
        if index < self.width {
            cell(row, index)
        } else {
            ""
        }
    }

    fn is_subject_row(&self, row: &[String]) -> bool {
        let prefix = self.cell(row, self.cipher).split('.').next().unwrap_or_default();
        self.ciphers.iter().any(|c| c == prefix)
            && !is_blank(self.cell(row, self.subject))
            && (!is_blank(self.cell(row, self.exam)) || !is_blank(self.cell(row, self.quiz)))
    }

    fn item(
        &self,
        row: &[String],
        row_no: usize,
        subject_index: usize,
        semester: u32,
        control: ControlType,
    ) -> Result<ParsedItem, ParseError> {
        let block = self.first_semester + (semester as usize - 1) * SEMESTER_BLOCK;
        Ok(ParsedItem {
            subject_index,
            semester,
            lecture: self.hours(row, row_no, block + self.lectures)?,
            laboratory: self.hours(row, row_no, block + self.labs)?,
            practice: self.hours(row, row_no, block + self.practice)?,
            control,
        })
    }

    fn hours(&self, row: &[String], row_no: usize, column: usize) -> Result<u32, ParseError> {
        let value = self.cell(row, column).trim();
        if value.is_empty() || value == "None" {
            return Ok(0);
        }
        value.parse::<u32>().map_err(|_| ParseError::InvalidHours {
            row: row_no,
            column: column + 1,
            value: value.to_string(),
        })
    }
}

/// Extract subjects and plan rows from `rows` following `rule`.
pub fn parse_sheet(rule: &LayoutRule, rows: &[Vec<String>]) -> Result<ParsedPlan, ParseError> {
    let layout = Layout::resolve(rule)?;
    let mut plan = ParsedPlan::default();

    for (row_no, row) in rows.iter().enumerate().map(|(i, r)| (i + 1, r)) {
        if !layout.is_subject_row(row) {
            continue;
        }
        let subject_index = plan.subjects.len();
        plan.subjects
            .push(layout.cell(row, layout.subject).trim().to_string());

        for token in semester_tokens(layout.cell(row, layout.exam)) {
            let semester = semester(token, row_no)?;
            plan.items
                .push(layout.item(row, row_no, subject_index, semester, ControlType::Exam)?);
        }

        for token in semester_tokens(layout.cell(row, layout.quiz)) {
            let (token, control) = match token.strip_suffix('*') {
                // graded quiz: semester is the leading digit
                Some(_) => (
                    token.char_indices().nth(1).map_or(token, |(i, _)| &token[..i]),
                    ControlType::GradedQuiz,
                ),
                None => (token, ControlType::Quiz),
            };
            let semester = semester(token, row_no)?;
            plan.items
                .push(layout.item(row, row_no, subject_index, semester, control)?);
        }
    }

    tracing::debug!(
        subjects = plan.subjects.len(),
        items = plan.items.len(),
        "sheet parsed"
    );

    Ok(plan)
}

fn cell(row: &[String], index: usize) -> &str {
    row.get(index).map(String::as_str).unwrap_or("")
}

fn is_blank(value: &str) -> bool {
    matches!(value.trim(), "" | "0" | "None")
}

fn semester_tokens(value: &str) -> impl Iterator<Item = &str> {
    value
        .split([',', '.'])
        .map(str::trim)
        .filter(|token| !token.is_empty() && *token != "None")
}

fn semester(token: &str, row: usize) -> Result<u32, ParseError> {
    let semester = token
        .parse::<u32>()
        .map_err(|_| ParseError::InvalidSemester {
            row,
            value: token.to_string(),
        })?;
    if !(1..=MAX_SEMESTER).contains(&semester) {
        return Err(ParseError::SemesterOutOfRange { row, semester });
    }
    Ok(semester)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule() -> LayoutRule {
        serde_json::from_value(serde_json::json!({
            "columns": {
                "cipher": "A",
                "subjects": "B",
                "departments": "Z",
                "controls": {"exam": "C", "quiz": "D"},
                "1_sem": "E",
                "lectures": 1,
                "practice": 2,
                "labs": 3
            },
            "ciphers": ["ОНБ", "ПБ"]
        }))
        .unwrap()
    }

    /// Cipher, name, exam, quiz, then two semester blocks of
    /// (total, lectures, practice, labs).
    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn parses_exam_quiz_and_graded_quiz_rows() {
        let rows = vec![
            row(&["Шифр", "Дисциплина", "Экз", "Зач"]),
            row(&["ОНБ.1", "История", "1", "None", "72", "18", "18", "0"]),
            row(&["ПБ.3", "Программирование", "2", "1*", "36", "10", "4", "2", "54", "16", "None", "20"]),
            row(&["ВБ.1", "Физкультура", "1", "", "10", "1", "1", "1"]),
        ];

        let plan = parse_sheet(&rule(), &rows).unwrap();

        assert_eq!(plan.subjects, vec!["История", "Программирование"]);
        assert_eq!(
            plan.items,
            vec![
                ParsedItem {
                    subject_index: 0,
                    semester: 1,
                    lecture: 18,
                    laboratory: 0,
                    practice: 18,
                    control: ControlType::Exam,
                },
                ParsedItem {
                    subject_index: 1,
                    semester: 2,
                    lecture: 16,
                    laboratory: 20,
                    practice: 0,
                    control: ControlType::Exam,
                },
                ParsedItem {
                    subject_index: 1,
                    semester: 1,
                    lecture: 10,
                    laboratory: 2,
                    practice: 4,
                    control: ControlType::GradedQuiz,
                },
            ]
        );
    }

    #[test]
    fn multiple_semesters_in_one_cell() {
        let rows = vec![row(&[
            "ОНБ.2", "Иностранный язык", "", "1,2", "1", "0", "2", "0", "1", "0", "3", "0",
        ])];
        let plan = parse_sheet(&rule(), &rows).unwrap();

        let semesters: Vec<(u32, u32, ControlType)> = plan
            .items
            .iter()
            .map(|i| (i.semester, i.practice, i.control))
            .collect();
        assert_eq!(
            semesters,
            vec![(1, 2, ControlType::Quiz), (2, 3, ControlType::Quiz)]
        );
    }

    #[test]
    fn rows_without_control_or_name_are_skipped() {
        let rows = vec![
            row(&["ОНБ.1", "Без контроля", "0", "None"]),
            row(&["ОНБ.1", "None", "1", ""]),
            row(&["ОНБ"]),
        ];
        let plan = parse_sheet(&rule(), &rows).unwrap();
        assert!(plan.subjects.is_empty());
        assert!(plan.items.is_empty());
    }

    #[test]
    fn bad_semester_and_hours_are_reported() {
        let rows = vec![row(&["ОНБ.1", "История", "x", ""])];
        assert_eq!(
            parse_sheet(&rule(), &rows),
            Err(ParseError::InvalidSemester {
                row: 1,
                value: "x".into()
            })
        );

        let rows = vec![row(&["ОНБ.1", "История", "9", ""])];
        assert_eq!(
            parse_sheet(&rule(), &rows),
            Err(ParseError::SemesterOutOfRange {
                row: 1,
                semester: 9
            })
        );

        let rows = vec![row(&["ОНБ.1", "История", "1", "", "0", "1.5"])];
        assert_eq!(
            parse_sheet(&rule(), &rows),
            Err(ParseError::InvalidHours {
                row: 1,
                column: 6,
                value: "1.5".into()
            })
        );
    }

    #[test]
    fn invalid_column_letter_fails() {
        let mut rule = rule();
        rule.columns.subjects = "B2".into();
        assert_eq!(
            parse_sheet(&rule, &[]),
            Err(ParseError::InvalidColumn("B2".into()))
        );
    }
}
