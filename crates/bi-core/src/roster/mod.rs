//! Roster normalization.
//!
//! The roster endpoints are not under this client's control and answer in
//! several layouts. [`normalize_roster`] maps a raw JSON body onto students
//! through a closed set of recognized shapes and never fails: anything
//! unrecognized becomes an empty roster, reported through [`RosterShape`].

use serde_json::{Map, Value};

use crate::ids::{ClassroomId, StudentId};
use crate::school::Student;

/// Layouts the roster endpoints are known to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterShape {
    /// `[ {...}, ... ]`
    Array,
    /// `{ "students": [ ... ] }`
    StudentsField,
    /// `{ "data": [ ... ] }`
    DataField,
    /// Anything else. Treated as an empty roster.
    Unrecognized,
}

/// Result of normalizing one roster response.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRoster {
    pub shape: RosterShape,
    pub students: Vec<Student>,
    /// Records kept without an id. Listed, never selectable.
    pub unidentified: usize,
}

/// Normalize a classroom roster body.
///
/// `requested_classroom` fills in the classroom id of records that omit it.
pub fn normalize_roster(raw: &Value, requested_classroom: Option<ClassroomId>) -> NormalizedRoster {
    let (shape, records) = match raw {
        Value::Array(items) => (RosterShape::Array, items.as_slice()),
        Value::Object(map) => match (map.get("students"), map.get("data")) {
            (Some(Value::Array(items)), _) => (RosterShape::StudentsField, items.as_slice()),
            (_, Some(Value::Array(items))) => (RosterShape::DataField, items.as_slice()),
            _ => (RosterShape::Unrecognized, &[][..]),
        },
        _ => (RosterShape::Unrecognized, &[][..]),
    };

    build_roster(shape, records, requested_classroom)
}

/// Extract the enrolled roster from a `GET /subject/{id}` body.
///
/// A subject without a `students` array has an empty roster.
pub fn roster_from_subject(raw: &Value) -> NormalizedRoster {
    match raw.get("students") {
        Some(Value::Array(items)) => build_roster(RosterShape::StudentsField, items, None),
        _ => build_roster(RosterShape::Unrecognized, &[], None),
    }
}

fn build_roster(
    shape: RosterShape,
    records: &[Value],
    requested_classroom: Option<ClassroomId>,
) -> NormalizedRoster {
    let students: Vec<Student> = records
        .iter()
        .map(|record| student_from_record(record, requested_classroom))
        .collect();
    let unidentified = students.iter().filter(|s| s.id.is_none()).count();
    NormalizedRoster {
        shape,
        students,
        unidentified,
    }
}

/// Re-derive one student from whatever fields the record carries.
///
/// The id comes from `id`, then `user_id`, then `student_id`. A non-object
/// record yields a blank, unidentified entry.
fn student_from_record(record: &Value, requested_classroom: Option<ClassroomId>) -> Student {
    let empty = Map::new();
    let fields = record.as_object().unwrap_or(&empty);

    let user_id = int_field(fields, "user_id");
    let id = int_field(fields, "id")
        .or(user_id)
        .or_else(|| int_field(fields, "student_id"));

    let name = str_field(fields, "name");
    let mut name_parts = name.unwrap_or("").split_whitespace();
    let first_from_name = name_parts.next().unwrap_or("").to_string();
    let last_from_name = name_parts.collect::<Vec<_>>().join(" ");

    let fname = str_field(fields, "fname")
        .map(str::to_string)
        .unwrap_or(first_from_name);
    let lname = str_field(fields, "lname")
        .map(str::to_string)
        .unwrap_or(last_from_name);

    let username = str_field(fields, "username")
        .or(name)
        .map(str::to_string)
        .unwrap_or_else(|| format!("{fname} {lname}").trim().to_string());

    let classroom_id = int_field(fields, "classroom_id")
        .map(ClassroomId::new)
        .or(requested_classroom);

    Student {
        id: id.map(StudentId::new),
        user_id,
        username,
        fname,
        lname,
        email: str_field(fields, "email").map(str::to_string),
        classroom_id,
        enrollment_date: str_field(fields, "enrollment_date").map(str::to_string),
        is_active: fields.get("is_active").and_then(Value::as_bool) != Some(false),
    }
}

/// Non-empty string field.
fn str_field<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .filter(|value| !value.trim().is_empty())
}

/// Integer field, accepting numeric strings.
fn int_field(fields: &Map<String, Value>, key: &str) -> Option<i64> {
    match fields.get(key)? {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}
