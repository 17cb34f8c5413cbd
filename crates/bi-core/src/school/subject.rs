use serde::{Deserialize, Serialize};

use crate::ids::{SchoolId, SubjectId};

use super::default_true;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub id: SubjectId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub school_id: SchoolId,
    #[serde(default)]
    pub created_date: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}
