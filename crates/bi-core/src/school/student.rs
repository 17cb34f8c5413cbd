use serde::{Deserialize, Serialize};

use crate::ids::{ClassroomId, StudentId};

/// A roster entry.
///
/// Never deserialized straight from the wire: the backend returns several
/// record layouts, so students are always built by [`crate::roster`].
/// A record that carried no usable id is listed but cannot be selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: Option<StudentId>,
    pub user_id: Option<i64>,
    pub username: String,
    pub fname: String,
    pub lname: String,
    pub email: Option<String>,
    pub classroom_id: Option<ClassroomId>,
    pub enrollment_date: Option<String>,
    pub is_active: bool,
}

impl Student {
    /// "First Last", falling back to the username when both names are blank.
    pub fn full_name(&self) -> String {
        let name = format!("{} {}", self.fname, self.lname);
        let name = name.trim();
        if name.is_empty() {
            self.username.clone()
        } else {
            name.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(fname: &str, lname: &str, username: &str) -> Student {
        Student {
            id: Some(StudentId::new(1)),
            user_id: None,
            username: username.to_string(),
            fname: fname.to_string(),
            lname: lname.to_string(),
            email: None,
            classroom_id: None,
            enrollment_date: None,
            is_active: true,
        }
    }

    #[test]
    fn full_name_joins_first_and_last() {
        assert_eq!(student("Ada", "Lovelace", "ada").full_name(), "Ada Lovelace");
        assert_eq!(student("Ada", "", "ada").full_name(), "Ada");
    }

    #[test]
    fn full_name_falls_back_to_username() {
        assert_eq!(student("", "", "ada99").full_name(), "ada99");
    }
}
