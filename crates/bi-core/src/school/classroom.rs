use serde::{Deserialize, Serialize};

use crate::ids::{ClassroomId, SchoolId, UserId};

/// Classroom assigned to the signed-in teacher. Root of the selection chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classroom {
    pub id: ClassroomId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub location: Option<String>,
    pub school_id: SchoolId,
    #[serde(default)]
    pub teacher_id: Option<UserId>,
    #[serde(default)]
    pub student_count: Option<u32>,
}
