use serde::{Deserialize, Serialize};

use crate::ids::{AssignmentId, SubjectId, UserId};

use super::default_true;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: AssignmentId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub subject_id: SubjectId,
    #[serde(default)]
    pub teacher_id: Option<UserId>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub max_points: Option<f64>,
    #[serde(default)]
    pub assignment_type: Option<String>,
    #[serde(default)]
    pub created_date: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}
