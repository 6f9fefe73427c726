use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Student,
    Teacher,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Student => "student",
            UserRole::Teacher => "teacher",
            UserRole::Admin => "admin",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    #[default]
    Present,
    Absent,
    Late,
}

impl AttendanceStatus {
    pub const ALL: [AttendanceStatus; 3] = [
        AttendanceStatus::Present,
        AttendanceStatus::Absent,
        AttendanceStatus::Late,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::Late => "late",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == value)
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Account details embedded in student and teacher records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub full_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub role: UserRole,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

/// A class (e.g. "7A") as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchoolClass {
    pub id: i64,
    pub name: String,
    pub grade: i32,
    #[serde(default)]
    pub section: Option<String>,
    #[serde(default)]
    pub academic_year: Option<String>,
    pub capacity: i32,
    #[serde(default)]
    pub class_teacher_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    pub user_id: i64,
    pub class_id: i64,
    pub roll_number: String,
    #[serde(default)]
    pub parent_name: Option<String>,
    #[serde(default)]
    pub parent_phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDateTime>,
    #[serde(default)]
    pub admission_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub user: Option<UserSummary>,
}

impl Student {
    /// Full name from the embedded user, falling back to the roll number
    pub fn display_name(&self) -> String {
        self.user
            .as_ref()
            .map(|user| user.full_name.clone())
            .unwrap_or_else(|| format!("Student {}", self.roll_number))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub id: i64,
    pub name: String,
    pub code: String,
    #[serde(default = "default_credits")]
    pub credits: i32,
    pub class_id: i64,
    pub teacher_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exam {
    pub id: i64,
    pub name: String,
    pub exam_date: NaiveDateTime,
    pub max_marks: i32,
    #[serde(default = "default_duration_minutes")]
    pub duration_minutes: i32,
    pub subject_id: i64,
    pub class_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamResult {
    pub id: i64,
    pub exam_id: i64,
    pub student_id: i64,
    pub marks_obtained: f64,
    #[serde(default)]
    pub grade: Option<String>,
    #[serde(default)]
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyMaterial {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default)]
    pub file_type: Option<String>,
    #[serde(default = "default_true")]
    pub is_public: bool,
    pub subject_id: i64,
    pub created_by_id: i64,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub id: i64,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub target_role: Option<UserRole>,
    #[serde(default)]
    pub is_urgent: bool,
    #[serde(default)]
    pub expires_at: Option<NaiveDateTime>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub created_by_id: i64,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: i64,
    pub student_id: i64,
    pub class_id: i64,
    pub date: NaiveDateTime,
    pub status: AttendanceStatus,
    #[serde(default)]
    pub remarks: Option<String>,
}

/// One attendance write; a class batch sends one of these per student
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkAttendanceRequest {
    pub student_id: i64,
    pub class_id: i64,
    pub date: NaiveDateTime,
    pub status: AttendanceStatus,
    pub remarks: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateExamRequest {
    pub name: String,
    pub exam_date: NaiveDateTime,
    pub max_marks: i32,
    pub duration_minutes: i32,
    pub subject_id: i64,
    pub class_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordExamResultRequest {
    pub exam_id: i64,
    pub student_id: i64,
    pub marks_obtained: f64,
    pub grade: String,
    pub remarks: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadMaterialRequest {
    pub title: String,
    pub description: String,
    pub subject_id: i64,
    pub file_type: String,
    pub file_path: String,
    pub is_public: bool,
}

fn default_true() -> bool {
    true
}

fn default_credits() -> i32 {
    1
}

fn default_duration_minutes() -> i32 {
    120
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_attendance_status_names() {
        assert_eq!(AttendanceStatus::default(), AttendanceStatus::Present);
        assert_eq!(AttendanceStatus::parse("late"), Some(AttendanceStatus::Late));
        assert_eq!(AttendanceStatus::parse("excused"), None);
        assert_eq!(
            serde_json::to_value(AttendanceStatus::Absent).unwrap(),
            json!("absent")
        );
    }

    #[test]
    fn test_student_deserializes_with_nested_user() {
        let student: Student = serde_json::from_value(json!({
            "id": 4,
            "user_id": 9,
            "class_id": 2,
            "roll_number": "R-04",
            "parent_name": null,
            "admission_date": "2024-04-01T08:30:00.123456",
            "user": {
                "id": 9,
                "username": "ann",
                "email": "ann@school.test",
                "full_name": "Ann Lee",
                "role": "student",
                "created_at": "2024-04-01T08:30:00"
            }
        }))
        .unwrap();

        assert_eq!(student.display_name(), "Ann Lee");
        assert!(student.parent_name.is_none());
        assert!(student.user.as_ref().unwrap().is_active);
    }

    #[test]
    fn test_student_display_name_without_user() {
        let student: Student = serde_json::from_value(json!({
            "id": 1, "user_id": 1, "class_id": 1, "roll_number": "R-01"
        }))
        .unwrap();
        assert_eq!(student.display_name(), "Student R-01");
    }

    #[test]
    fn test_exam_request_serializes_iso_datetime() {
        let request = CreateExamRequest {
            name: "Midterm".to_string(),
            exam_date: NaiveDateTime::parse_from_str("2024-05-01T10:00:00", "%Y-%m-%dT%H:%M:%S")
                .unwrap(),
            max_marks: 100,
            duration_minutes: 120,
            subject_id: 3,
            class_id: 2,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["exam_date"], json!("2024-05-01T10:00:00"));
        assert_eq!(value["max_marks"], json!(100));
    }
}
