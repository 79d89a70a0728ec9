//! Student records
//!
//! A student carries three courses, each a `(subject, credit, grade_point)`
//! triple. Letter grades and the CGPA are derived eagerly whenever a student is
//! built, so the stored values always agree with the primary fields.

use crate::error::AppError;
use crate::grading::{self, Grade};
use crate::query::{SortKey, Sortable};
use serde::{Deserialize, Deserializer, Serialize};
use serde_valid::Validate;

/// Unique identifier for a student
pub type StudentId = i64;

/// Primary fields of a student, as supplied by clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct StudentRecord {
    /// Unique identifier
    pub student_id: StudentId,
    /// Full name
    pub name: String,

    /// First course
    pub subject1: String,
    /// Credit hours, in (0, 4]
    #[validate(exclusive_minimum = 0)]
    #[validate(maximum = 4)]
    pub credit1: u32,
    /// Grade point, in [0.0, 4.0]
    #[validate(minimum = 0.0)]
    #[validate(maximum = 4.0)]
    pub grade_point1: f64,

    /// Second course
    pub subject2: String,
    /// Credit hours, in (0, 4]
    #[validate(exclusive_minimum = 0)]
    #[validate(maximum = 4)]
    pub credit2: u32,
    /// Grade point, in [0.0, 4.0]
    #[validate(minimum = 0.0)]
    #[validate(maximum = 4.0)]
    pub grade_point2: f64,

    /// Third course
    pub subject3: String,
    /// Credit hours, in (0, 4]
    #[validate(exclusive_minimum = 0)]
    #[validate(maximum = 4)]
    pub credit3: u32,
    /// Grade point, in [0.0, 4.0]
    #[validate(minimum = 0.0)]
    #[validate(maximum = 4.0)]
    pub grade_point3: f64,
}

impl StudentRecord {
    fn courses(&self) -> [(u32, f64); 3] {
        [
            (self.credit1, self.grade_point1),
            (self.credit2, self.grade_point2),
            (self.credit3, self.grade_point3),
        ]
    }
}

/// A validated student together with its derived fields
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Student {
    /// Primary fields
    #[serde(flatten)]
    pub record: StudentRecord,
    /// Letter grade of the first course
    pub grade1: Grade,
    /// Letter grade of the second course
    pub grade2: Grade,
    /// Letter grade of the third course
    pub grade3: Grade,
    /// Credit-weighted grade point average, two decimals
    pub cgpa: f64,
    /// Letter grade of the CGPA
    pub grade: Grade,
}

impl Student {
    /// Validate `record` and derive grades and CGPA from it
    pub fn from_record(record: StudentRecord) -> Result<Self, AppError> {
        record.validate()?;

        let cgpa = grading::cgpa(record.courses()).ok_or_else(|| {
            AppError::Validation("Total credits must be greater than zero".to_string())
        })?;

        Ok(Self {
            grade1: grading::point_to_grade(record.grade_point1),
            grade2: grading::point_to_grade(record.grade_point2),
            grade3: grading::point_to_grade(record.grade_point3),
            cgpa,
            grade: grading::point_to_grade(cgpa),
            record,
        })
    }

    /// Identity of this student
    pub fn id(&self) -> StudentId {
        self.record.student_id
    }

    /// Key under which this student is stored in the roster document
    pub fn key(&self) -> String {
        self.record.student_id.to_string()
    }

    /// Overlay `update` and recompute every derived field from the merged record
    pub fn merge(&self, update: StudentUpdate) -> Result<Self, AppError> {
        let merged = update.apply(&self.record)?;
        Self::from_record(merged)
    }
}

impl Sortable for Student {
    const SORT_FIELDS: &'static [&'static str] = &[
        "cgpa",
        "grade_point1",
        "grade_point2",
        "grade_point3",
        "grade1",
        "grade2",
        "grade3",
    ];

    fn sort_key(&self, field: &str) -> Option<SortKey> {
        let value = match field {
            "cgpa" => self.cgpa,
            "grade_point1" => self.record.grade_point1,
            "grade_point2" => self.record.grade_point2,
            "grade_point3" => self.record.grade_point3,
            "grade1" => self.grade1.rank(),
            "grade2" => self.grade2.rank(),
            "grade3" => self.grade3.rank(),
            _ => return None,
        };
        Some(SortKey::Number(value))
    }
}

/// State of one field in a partial update
///
/// `Unset` means the client did not send the field; `Null` means it was sent
/// as an explicit `null`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Patch<T> {
    /// Field absent from the request body
    #[default]
    Unset,
    /// Field present and `null`
    Null,
    /// Field present with a value
    Set(T),
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Only reached when the key is present; absent keys take the default
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Patch::Set(value),
            None => Patch::Null,
        })
    }
}

impl<T> Patch<T> {
    /// Write the patched value into `slot`. A `Null` is rejected since every
    /// student field is required.
    fn overlay(self, slot: &mut T, field: &str) -> Result<(), AppError> {
        match self {
            Patch::Unset => Ok(()),
            Patch::Set(value) => {
                *slot = value;
                Ok(())
            }
            Patch::Null => Err(AppError::Validation(format!(
                "Field '{}' may not be null",
                field
            ))),
        }
    }
}

/// Partial update of a student. Identity cannot be changed.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct StudentUpdate {
    /// New name
    pub name: Patch<String>,
    /// New first subject
    pub subject1: Patch<String>,
    /// New first credit
    pub credit1: Patch<u32>,
    /// New first grade point
    pub grade_point1: Patch<f64>,
    /// New second subject
    pub subject2: Patch<String>,
    /// New second credit
    pub credit2: Patch<u32>,
    /// New second grade point
    pub grade_point2: Patch<f64>,
    /// New third subject
    pub subject3: Patch<String>,
    /// New third credit
    pub credit3: Patch<u32>,
    /// New third grade point
    pub grade_point3: Patch<f64>,
}

impl StudentUpdate {
    /// Overlay the provided fields onto a copy of `base`. Bounds are checked
    /// later, on the merged whole.
    pub fn apply(self, base: &StudentRecord) -> Result<StudentRecord, AppError> {
        let mut merged = base.clone();
        self.name.overlay(&mut merged.name, "name")?;
        self.subject1.overlay(&mut merged.subject1, "subject1")?;
        self.credit1.overlay(&mut merged.credit1, "credit1")?;
        self.grade_point1
            .overlay(&mut merged.grade_point1, "grade_point1")?;
        self.subject2.overlay(&mut merged.subject2, "subject2")?;
        self.credit2.overlay(&mut merged.credit2, "credit2")?;
        self.grade_point2
            .overlay(&mut merged.grade_point2, "grade_point2")?;
        self.subject3.overlay(&mut merged.subject3, "subject3")?;
        self.credit3.overlay(&mut merged.credit3, "credit3")?;
        self.grade_point3
            .overlay(&mut merged.grade_point3, "grade_point3")?;
        Ok(merged)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn record(student_id: StudentId) -> StudentRecord {
        StudentRecord {
            student_id,
            name: "Ayesha Rahman".to_string(),
            subject1: "Math".to_string(),
            credit1: 3,
            grade_point1: 4.0,
            subject2: "Physics".to_string(),
            credit2: 3,
            grade_point2: 3.5,
            subject3: "Chemistry".to_string(),
            credit3: 3,
            grade_point3: 3.0,
        }
    }

    #[test]
    fn test_derived_fields() {
        let student = Student::from_record(record(101)).unwrap();
        assert_eq!(student.grade1, Grade::APlus);
        assert_eq!(student.grade2, Grade::AMinus);
        assert_eq!(student.grade3, Grade::B);
        assert_eq!(student.cgpa, 3.5);
        assert_eq!(student.grade, Grade::AMinus);
    }

    #[test]
    fn test_bounds_rejected() {
        let mut bad = record(101);
        bad.credit2 = 0;
        assert!(matches!(
            Student::from_record(bad),
            Err(AppError::Validation(_))
        ));

        let mut bad = record(101);
        bad.credit1 = 5;
        assert!(Student::from_record(bad).is_err());

        let mut bad = record(101);
        bad.grade_point3 = 4.1;
        assert!(Student::from_record(bad).is_err());

        let mut bad = record(101);
        bad.grade_point1 = -0.5;
        assert!(Student::from_record(bad).is_err());
    }

    #[test]
    fn test_bounds_inclusive_edges() {
        let mut edge = record(101);
        edge.credit1 = 4;
        edge.grade_point1 = 0.0;
        edge.grade_point2 = 4.0;
        assert!(Student::from_record(edge).is_ok());
    }

    #[test]
    fn test_partial_update_recomputes() {
        let student = Student::from_record(record(101)).unwrap();
        let update: StudentUpdate = serde_json::from_str(r#"{"grade_point1": 2.0}"#).unwrap();

        let merged = student.merge(update).unwrap();
        assert_eq!(merged.record.grade_point1, 2.0);
        assert_eq!(merged.grade1, Grade::C);
        // (6 + 10.5 + 9) / 9 = 2.8333
        assert_eq!(merged.cgpa, 2.83);
        assert_eq!(merged.grade, Grade::BMinus);
        assert_eq!(merged.record.subject2, "Physics");
        assert_eq!(merged.record.credit2, 3);
        assert_eq!(merged.record.name, "Ayesha Rahman");
    }

    #[test]
    fn test_patch_distinguishes_absent_and_null() {
        let update: StudentUpdate =
            serde_json::from_str(r#"{"name": null, "credit1": 2}"#).unwrap();
        assert_eq!(update.name, Patch::Null);
        assert_eq!(update.credit1, Patch::Set(2));
        assert_eq!(update.subject1, Patch::Unset);
    }

    #[test]
    fn test_null_patch_rejected() {
        let student = Student::from_record(record(101)).unwrap();
        let update: StudentUpdate = serde_json::from_str(r#"{"grade_point2": null}"#).unwrap();
        assert!(matches!(
            student.merge(update),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_merge_validates_whole_record() {
        let student = Student::from_record(record(101)).unwrap();
        let update: StudentUpdate = serde_json::from_str(r#"{"credit3": 9}"#).unwrap();
        assert!(student.merge(update).is_err());
    }

    #[test]
    fn test_serialized_field_order() {
        let student = Student::from_record(record(7)).unwrap();
        let json = serde_json::to_string(&student).unwrap();
        let keys = [
            "\"student_id\"",
            "\"name\"",
            "\"grade_point3\"",
            "\"grade1\"",
            "\"grade3\"",
            "\"cgpa\"",
            "\"grade\"",
        ];
        let positions: Vec<usize> = keys.iter().map(|k| json.find(k).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{}", json);
        assert!(json.contains(r#""grade":"A-""#));
    }

    #[test]
    fn test_sort_key_uses_grade_rank() {
        let student = Student::from_record(record(1)).unwrap();
        assert_eq!(student.sort_key("grade1"), Some(SortKey::Number(4.0)));
        assert_eq!(student.sort_key("grade2"), Some(SortKey::Number(3.5)));
        assert_eq!(student.sort_key("name"), None);
    }
}
