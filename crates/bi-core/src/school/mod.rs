//! School-administration entities as returned by the backend.
//!
//! All of these are transient: they live for one screen visit and are thrown
//! away as soon as the parent selection that produced them changes.

mod assignment;
mod classroom;
mod student;
mod subject;

pub use assignment::Assignment;
pub use classroom::Classroom;
pub use student::Student;
pub use subject::Subject;

use serde::{Deserialize, Serialize};

use crate::ids::{SchoolId, UserId};

/// A school the signed-in user may join or log into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct School {
    pub id: SchoolId,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub principal_id: Option<UserId>,
    #[serde(default)]
    pub created_date: Option<String>,
}

/// Response to a school/role confirmation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchoolSelectionReceipt {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub school_id: Option<SchoolId>,
    #[serde(default)]
    pub school_name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

pub(crate) fn default_true() -> bool {
    true
}
