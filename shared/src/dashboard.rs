use crate::form::{FieldDescriptor, FieldKind, SelectOption};
use crate::models::{Exam, Notice, SchoolClass, Student, StudyMaterial, Subject};

const NOTICE_PREVIEW_CHARS: usize = 100;
const OVERVIEW_ITEMS: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DashboardTab {
    #[default]
    Overview,
    Classes,
    Attendance,
    Exams,
    Materials,
    Notices,
}

impl DashboardTab {
    pub const ALL: [DashboardTab; 6] = [
        DashboardTab::Overview,
        DashboardTab::Classes,
        DashboardTab::Attendance,
        DashboardTab::Exams,
        DashboardTab::Materials,
        DashboardTab::Notices,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DashboardTab::Overview => "Overview",
            DashboardTab::Classes => "Classes",
            DashboardTab::Attendance => "Attendance",
            DashboardTab::Exams => "Exams",
            DashboardTab::Materials => "Materials",
            DashboardTab::Notices => "Notices",
        }
    }
}

/// The backend collections the dashboard caches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListResource {
    Classes,
    Students,
    Subjects,
    Exams,
    Materials,
    Notices,
}

impl ListResource {
    pub fn name(&self) -> &'static str {
        match self {
            ListResource::Classes => "classes",
            ListResource::Students => "students",
            ListResource::Subjects => "subjects",
            ListResource::Exams => "exams",
            ListResource::Materials => "study materials",
            ListResource::Notices => "notices",
        }
    }
}

/// A freshly fetched list, replacing its cached counterpart wholesale
#[derive(Debug, Clone, PartialEq)]
pub enum ListUpdate {
    Classes(Vec<SchoolClass>),
    Students(Vec<Student>),
    Subjects(Vec<Subject>),
    Exams(Vec<Exam>),
    Materials(Vec<StudyMaterial>),
    Notices(Vec<Notice>),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub classes: usize,
    pub students: usize,
    pub subjects: usize,
    pub exams: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardLists {
    pub classes: Vec<SchoolClass>,
    pub students: Vec<Student>,
    pub subjects: Vec<Subject>,
    pub exams: Vec<Exam>,
    pub materials: Vec<StudyMaterial>,
    pub notices: Vec<Notice>,
}

impl DashboardLists {
    pub fn apply(&mut self, update: ListUpdate) {
        match update {
            ListUpdate::Classes(classes) => self.classes = classes,
            ListUpdate::Students(students) => self.students = students,
            ListUpdate::Subjects(subjects) => self.subjects = subjects,
            ListUpdate::Exams(exams) => self.exams = exams,
            ListUpdate::Materials(materials) => self.materials = materials,
            ListUpdate::Notices(notices) => self.notices = notices,
        }
    }

    pub fn stats(&self) -> DashboardStats {
        DashboardStats {
            classes: self.classes.len(),
            students: self.students.len(),
            subjects: self.subjects.len(),
            exams: self.exams.len(),
        }
    }

    pub fn students_in_class(&self, class_id: i64) -> Vec<&Student> {
        self.students
            .iter()
            .filter(|student| student.class_id == class_id)
            .collect()
    }

    pub fn recent_classes(&self) -> &[SchoolClass] {
        &self.classes[..self.classes.len().min(OVERVIEW_ITEMS)]
    }

    pub fn recent_notices(&self) -> &[Notice] {
        &self.notices[..self.notices.len().min(OVERVIEW_ITEMS)]
    }

    pub fn class_name(&self, class_id: i64) -> String {
        self.classes
            .iter()
            .find(|class| class.id == class_id)
            .map(|class| class.name.clone())
            .unwrap_or_else(|| format!("Class {}", class_id))
    }

    pub fn subject_name(&self, subject_id: i64) -> String {
        self.subjects
            .iter()
            .find(|subject| subject.id == subject_id)
            .map(|subject| subject.name.clone())
            .unwrap_or_else(|| format!("Subject {}", subject_id))
    }

    pub fn class_options(&self) -> Vec<SelectOption> {
        self.classes
            .iter()
            .map(|class| SelectOption::new(class.id.to_string(), class.name.clone()))
            .collect()
    }

    pub fn subject_options(&self) -> Vec<SelectOption> {
        self.subjects
            .iter()
            .map(|subject| {
                SelectOption::new(
                    subject.id.to_string(),
                    format!("{} ({})", subject.name, subject.code),
                )
            })
            .collect()
    }

    pub fn exam_options(&self) -> Vec<SelectOption> {
        self.exams
            .iter()
            .map(|exam| SelectOption::new(exam.id.to_string(), exam.name.clone()))
            .collect()
    }

    pub fn student_options(&self) -> Vec<SelectOption> {
        self.students
            .iter()
            .map(|student| {
                SelectOption::new(
                    student.id.to_string(),
                    format!("{} ({})", student.display_name(), student.roll_number),
                )
            })
            .collect()
    }

    pub fn exam_fields(&self) -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::new("name", "Exam Name", FieldKind::Text)
                .required()
                .placeholder("e.g., Midterm"),
            FieldDescriptor::new("exam_date", "Exam Date", FieldKind::Date).required(),
            FieldDescriptor::new("subject_id", "Subject", FieldKind::Select)
                .required()
                .options(self.subject_options()),
            FieldDescriptor::new("class_id", "Class", FieldKind::Select)
                .required()
                .options(self.class_options()),
            FieldDescriptor::new("max_marks", "Max Marks", FieldKind::Number).required(),
            FieldDescriptor::new("duration_minutes", "Duration (minutes)", FieldKind::Number)
                .required(),
        ]
    }

    pub fn result_fields(&self) -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::new("exam_id", "Exam", FieldKind::Select)
                .required()
                .options(self.exam_options()),
            FieldDescriptor::new("student_id", "Student", FieldKind::Select)
                .required()
                .options(self.student_options()),
            FieldDescriptor::new("marks_obtained", "Marks Obtained", FieldKind::Number).required(),
            FieldDescriptor::new("grade", "Grade", FieldKind::Text).placeholder("e.g., A+"),
            FieldDescriptor::new("remarks", "Remarks", FieldKind::TextArea).rows(2),
        ]
    }

    pub fn material_fields(&self) -> Vec<FieldDescriptor> {
        let file_types = ["PDF", "DOC", "PPT", "Video", "Image"]
            .into_iter()
            .map(|kind| SelectOption::new(kind, kind))
            .collect();

        vec![
            FieldDescriptor::new("title", "Title", FieldKind::Text).required(),
            FieldDescriptor::new("description", "Description", FieldKind::TextArea),
            FieldDescriptor::new("subject_id", "Subject", FieldKind::Select)
                .required()
                .options(self.subject_options()),
            FieldDescriptor::new("file_type", "File Type", FieldKind::Select).options(file_types),
            FieldDescriptor::new("is_public", "Visible to students", FieldKind::Checkbox),
        ]
    }
}

/// First 100 characters of a notice followed by `...`
pub fn notice_preview(content: &str) -> String {
    let preview: String = content.chars().take(NOTICE_PREVIEW_CHARS).collect();
    format!("{}...", preview)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn class(id: i64, name: &str) -> SchoolClass {
        SchoolClass {
            id,
            name: name.to_string(),
            grade: 8,
            section: Some("A".to_string()),
            academic_year: None,
            capacity: 30,
            class_teacher_id: Some(1),
        }
    }

    fn student(id: i64, class_id: i64) -> Student {
        Student {
            id,
            user_id: id,
            class_id,
            roll_number: format!("R-{}", id),
            parent_name: None,
            parent_phone: None,
            address: None,
            date_of_birth: None,
            admission_date: None,
            user: None,
        }
    }

    fn notice(id: i64, content: &str) -> Notice {
        Notice {
            id,
            title: format!("Notice {}", id),
            content: content.to_string(),
            target_role: None,
            is_urgent: false,
            expires_at: None,
            is_active: true,
            created_by_id: 1,
            created_at: NaiveDate::from_ymd_opt(2024, 5, 1)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn test_apply_replaces_list_wholesale() {
        let mut lists = DashboardLists::default();
        lists.apply(ListUpdate::Classes(vec![class(1, "8A"), class(2, "8B")]));
        lists.apply(ListUpdate::Students(vec![student(1, 1)]));
        assert_eq!(lists.stats().classes, 2);

        lists.apply(ListUpdate::Classes(vec![class(3, "9A")]));
        assert_eq!(lists.classes.len(), 1);
        assert_eq!(lists.classes[0].name, "9A");
        // Other lists are untouched
        assert_eq!(lists.students.len(), 1);
    }

    #[test]
    fn test_students_in_class() {
        let mut lists = DashboardLists::default();
        lists.apply(ListUpdate::Students(vec![student(1, 1), student(2, 2), student(3, 1)]));

        let ids: Vec<i64> = lists.students_in_class(1).iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert!(lists.students_in_class(9).is_empty());
    }

    #[test]
    fn test_overview_slices_cap_at_five() {
        let mut lists = DashboardLists::default();
        lists.apply(ListUpdate::Classes(
            (1..=7).map(|id| class(id, &format!("C{}", id))).collect(),
        ));
        lists.apply(ListUpdate::Notices(vec![notice(1, "short")]));

        assert_eq!(lists.recent_classes().len(), 5);
        assert_eq!(lists.recent_notices().len(), 1);
    }

    #[test]
    fn test_name_lookups_fall_back() {
        let mut lists = DashboardLists::default();
        lists.apply(ListUpdate::Classes(vec![class(1, "8A")]));
        assert_eq!(lists.class_name(1), "8A");
        assert_eq!(lists.class_name(5), "Class 5");
        assert_eq!(lists.subject_name(2), "Subject 2");
    }

    #[test]
    fn test_notice_preview_truncates_by_chars() {
        assert_eq!(notice_preview("Exams start Monday"), "Exams start Monday...");

        let long = "é".repeat(150);
        let preview = notice_preview(&long);
        assert_eq!(preview.chars().count(), 103);
        assert!(preview.ends_with("..."));
    }

    #[test]
    fn test_exam_fields_offer_loaded_classes() {
        let mut lists = DashboardLists::default();
        lists.apply(ListUpdate::Classes(vec![class(4, "10C")]));

        let fields = lists.exam_fields();
        let class_field = fields.iter().find(|f| f.name == "class_id").unwrap();
        assert_eq!(class_field.kind, FieldKind::Select);
        assert_eq!(class_field.options, vec![SelectOption::new("4", "10C")]);
        assert!(fields.iter().all(|f| f.required));
    }
}
