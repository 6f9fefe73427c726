//! Display data for the detail and credentials modals.

use serde::{Deserialize, Serialize};

use crate::models::{SchoolClass, Student};

/// Login details shown once after an account is created
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub full_name: Option<String>,
    pub roll_number: Option<String>,
    pub employee_id: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub email: Option<String>,
}

impl Credentials {
    /// Login details known for an existing student; passwords are never sent back
    pub fn for_student(student: &Student) -> Self {
        let user = student.user.as_ref();
        Self {
            full_name: user.map(|user| user.full_name.clone()),
            roll_number: Some(student.roll_number.clone()),
            employee_id: None,
            username: user.map(|user| user.username.clone()),
            password: None,
            email: user.map(|user| user.email.clone()),
        }
    }

    /// Label/value pairs for the fields that are present, in display order
    pub fn rows(&self) -> Vec<(&'static str, &str)> {
        [
            ("Name", &self.full_name),
            ("Roll Number", &self.roll_number),
            ("Employee ID", &self.employee_id),
            ("Username", &self.username),
            ("Password", &self.password),
            ("Email", &self.email),
        ]
        .into_iter()
        .filter_map(|(label, value)| {
            value
                .as_deref()
                .filter(|value| !value.is_empty())
                .map(|value| (label, value))
        })
        .collect()
    }

    pub fn to_plain_text(&self) -> String {
        self.rows()
            .into_iter()
            .map(|(label, value)| format!("{}: {}", label, value))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewField {
    pub key: String,
    pub label: String,
    pub value: Option<String>,
}

impl ViewField {
    pub fn new(key: impl Into<String>, label: impl Into<String>, value: Option<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            value,
        }
    }

    /// Missing or blank values show as `N/A`
    pub fn display_value(&self) -> &str {
        self.value
            .as_deref()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or("N/A")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewSection {
    pub key: String,
    pub title: Option<String>,
    pub fields: Vec<ViewField>,
}

/// Header block of the detail modal
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewHeader {
    pub full_name: Option<String>,
    pub name: Option<String>,
    pub subtitle: Option<String>,
    pub details: Option<String>,
    pub photo_url: Option<String>,
    pub badges: Vec<String>,
}

impl ViewHeader {
    pub fn display_name<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.full_name
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or(fallback)
    }

    /// Avatar letter: first character of the full name, else the name, else `U`
    pub fn initial(&self) -> String {
        self.full_name
            .as_deref()
            .or(self.name.as_deref())
            .and_then(|name| name.chars().next())
            .unwrap_or('U')
            .to_uppercase()
            .collect()
    }

    /// Only absolute http(s) URLs are rendered as photos
    pub fn photo(&self) -> Option<&str> {
        self.photo_url
            .as_deref()
            .filter(|url| url.starts_with("http://") || url.starts_with("https://"))
    }
}

pub fn student_header(student: &Student, class_name: &str) -> ViewHeader {
    ViewHeader {
        full_name: student.user.as_ref().map(|user| user.full_name.clone()),
        name: None,
        subtitle: Some(format!("Roll No. {}", student.roll_number)),
        details: student.user.as_ref().map(|user| user.email.clone()),
        photo_url: None,
        badges: vec![class_name.to_string()],
    }
}

pub fn student_sections(student: &Student) -> Vec<ViewSection> {
    let user = student.user.as_ref();
    vec![
        ViewSection {
            key: "contact".to_string(),
            title: Some("Contact".to_string()),
            fields: vec![
                ViewField::new("email", "Email", user.map(|u| u.email.clone())),
                ViewField::new("phone", "Phone", user.and_then(|u| u.phone.clone())),
                ViewField::new("address", "Address", student.address.clone()),
            ],
        },
        ViewSection {
            key: "guardian".to_string(),
            title: Some("Parent / Guardian".to_string()),
            fields: vec![
                ViewField::new("parent_name", "Name", student.parent_name.clone()),
                ViewField::new("parent_phone", "Phone", student.parent_phone.clone()),
            ],
        },
        ViewSection {
            key: "academic".to_string(),
            title: Some("Academic".to_string()),
            fields: vec![
                ViewField::new(
                    "date_of_birth",
                    "Date of Birth",
                    student.date_of_birth.map(|d| d.date().to_string()),
                ),
                ViewField::new(
                    "admission_date",
                    "Admission Date",
                    student.admission_date.map(|d| d.date().to_string()),
                ),
            ],
        },
    ]
}

pub fn class_header(class: &SchoolClass) -> ViewHeader {
    ViewHeader {
        full_name: None,
        name: Some(class.name.clone()),
        subtitle: Some(format!("Grade {}", class.grade)),
        details: class.academic_year.clone(),
        photo_url: None,
        badges: class.section.iter().map(|s| format!("Section {}", s)).collect(),
    }
}

pub fn class_sections(class: &SchoolClass, student_count: usize) -> Vec<ViewSection> {
    vec![ViewSection {
        key: "details".to_string(),
        title: Some("Class Details".to_string()),
        fields: vec![
            ViewField::new("grade", "Grade", Some(class.grade.to_string())),
            ViewField::new("section", "Section", class.section.clone()),
            ViewField::new("capacity", "Capacity", Some(class.capacity.to_string())),
            ViewField::new("enrolled", "Enrolled", Some(student_count.to_string())),
            ViewField::new("academic_year", "Academic Year", class.academic_year.clone()),
        ],
    }]
}
