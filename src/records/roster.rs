// Student roster
// Identity-keyed collection that keeps document order across load and save

use super::student::{Student, StudentRecord};
use crate::error::AppError;
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Students keyed by the string form of their id, in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roster {
    entries: Vec<(String, Student)>,
}

impl Roster {
    /// Create an empty roster
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of students
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the roster holds no students
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether a student is stored under `key`
    pub fn contains(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Student stored under `key`
    pub fn get(&self, key: &str) -> Option<&Student> {
        self.position(key).map(|i| &self.entries[i].1)
    }

    /// All students in document order
    pub fn students(&self) -> Vec<Student> {
        self.entries.iter().map(|(_, s)| s.clone()).collect()
    }

    /// Add a new student. Fails without touching the roster if the id is taken.
    pub fn insert(&mut self, student: Student) -> Result<(), AppError> {
        let key = student.key();
        if self.contains(&key) {
            return Err(AppError::Conflict("Student already exists".to_string()));
        }
        self.entries.push((key, student));
        Ok(())
    }

    /// Replace the student stored under `key`, keeping its position
    pub fn replace(&mut self, key: &str, student: Student) -> Result<(), AppError> {
        let index = self
            .position(key)
            .ok_or_else(|| AppError::NotFound("Student not found".to_string()))?;
        self.entries[index].1 = student;
        Ok(())
    }

    /// Remove and return the student stored under `key`
    pub fn remove(&mut self, key: &str) -> Option<Student> {
        self.position(key).map(|i| self.entries.remove(i).1)
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }
}

impl Serialize for Roster {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, student) in &self.entries {
            map.serialize_entry(key, student)?;
        }
        map.end()
    }
}

struct RosterVisitor;

impl<'de> Visitor<'de> for RosterVisitor {
    type Value = Roster;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an object mapping student ids to students")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Roster, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut roster = Roster::new();
        while let Some((key, record)) = access.next_entry::<String, StudentRecord>()? {
            // Stored grades and CGPA are ignored and derived again
            let student = Student::from_record(record)
                .map_err(|e| de::Error::custom(format!("student '{}': {}", key, e)))?;
            match roster.position(&key) {
                // Later duplicates win, as with any JSON object
                Some(index) => roster.entries[index].1 = student,
                None => roster.entries.push((key, student)),
            }
        }
        Ok(roster)
    }
}

impl<'de> Deserialize<'de> for Roster {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RosterVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::Grade;
    use crate::records::student::tests::record;

    fn student(id: i64) -> Student {
        Student::from_record(record(id)).unwrap()
    }

    #[test]
    fn test_insert_rejects_duplicate() {
        let mut roster = Roster::new();
        roster.insert(student(101)).unwrap();

        let mut renamed = record(101);
        renamed.name = "Someone Else".to_string();
        let err = roster
            .insert(Student::from_record(renamed).unwrap())
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(roster.len(), 1);
        assert_eq!(roster.get("101").unwrap().record.name, "Ayesha Rahman");
    }

    #[test]
    fn test_remove_then_get() {
        let mut roster = Roster::new();
        roster.insert(student(101)).unwrap();
        assert!(roster.remove("101").is_some());
        assert!(roster.get("101").is_none());
        assert!(roster.remove("101").is_none());
    }

    #[test]
    fn test_document_order_preserved() {
        let json = r#"{
            "9": {"student_id": 9, "name": "N", "subject1": "a", "credit1": 3, "grade_point1": 3.0,
                  "subject2": "b", "credit2": 3, "grade_point2": 3.0,
                  "subject3": "c", "credit3": 3, "grade_point3": 3.0},
            "10": {"student_id": 10, "name": "M", "subject1": "a", "credit1": 3, "grade_point1": 2.0,
                   "subject2": "b", "credit2": 3, "grade_point2": 2.0,
                   "subject3": "c", "credit3": 3, "grade_point3": 2.0}
        }"#;
        let roster: Roster = serde_json::from_str(json).unwrap();
        let ids: Vec<i64> = roster.students().iter().map(|s| s.id()).collect();
        assert_eq!(ids, vec![9, 10]);

        let saved = serde_json::to_string(&roster).unwrap();
        assert!(saved.find("\"9\"").unwrap() < saved.find("\"10\"").unwrap());
    }

    #[test]
    fn test_stale_derived_fields_recomputed_on_load() {
        let json = r#"{"1": {"student_id": 1, "name": "N",
            "subject1": "a", "credit1": 3, "grade_point1": 4.0,
            "subject2": "b", "credit2": 3, "grade_point2": 4.0,
            "subject3": "c", "credit3": 3, "grade_point3": 4.0,
            "grade1": "F", "cgpa": 0.5, "grade": "Z"}}"#;
        let roster: Roster = serde_json::from_str(json).unwrap();
        let loaded = roster.get("1").unwrap();
        assert_eq!(loaded.grade1, Grade::APlus);
        assert_eq!(loaded.cgpa, 4.0);
        assert_eq!(loaded.grade, Grade::APlus);
    }

    #[test]
    fn test_out_of_bounds_document_rejected() {
        let json = r#"{"1": {"student_id": 1, "name": "N",
            "subject1": "a", "credit1": 0, "grade_point1": 4.0,
            "subject2": "b", "credit2": 3, "grade_point2": 4.0,
            "subject3": "c", "credit3": 3, "grade_point3": 4.0}}"#;
        assert!(serde_json::from_str::<Roster>(json).is_err());
    }
}
