// User records
// Flat directory entries served by the users services

use crate::query::{SortKey, Sortable};
use serde::{Deserialize, Serialize};

/// Unique identifier for a user
pub type UserId = i64;

/// A user of the directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: UserId,
    /// Display name
    pub name: String,
    /// Department code, e.g. "CSE"
    pub department: String,
    /// Score out of 100
    pub score: f64,
}

impl Sortable for User {
    const SORT_FIELDS: &'static [&'static str] = &["id", "name", "department", "score"];

    fn sort_key(&self, field: &str) -> Option<SortKey> {
        match field {
            "id" => Some(SortKey::Number(self.id as f64)),
            "name" => Some(SortKey::Text(self.name.clone())),
            "department" => Some(SortKey::Text(self.department.clone())),
            "score" => Some(SortKey::Number(self.score)),
            _ => None,
        }
    }
}

/// First user with the given id
pub fn find_by_id(users: &[User], id: UserId) -> Option<&User> {
    users.iter().find(|u| u.id == id)
}

/// First user matching both id and department
pub fn find_by_department_and_id<'a>(
    users: &'a [User],
    department: &str,
    id: UserId,
) -> Option<&'a User> {
    users
        .iter()
        .find(|u| u.id == id && u.department == department)
}
