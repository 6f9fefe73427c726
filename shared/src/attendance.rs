use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime};

use crate::models::{AttendanceStatus, MarkAttendanceRequest, SchoolClass, Student};

/// Attendance is recorded against 09:00 on the chosen day
pub const ATTENDANCE_TIME: (u32, u32) = (9, 0);

/// Per-student statuses for one class on one day, edited in the attendance modal
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceSheet {
    class_id: i64,
    date: NaiveDate,
    marks: BTreeMap<i64, AttendanceStatus>,
}

/// Aggregate result of submitting a sheet: the batch only counts as saved
/// when every per-student write succeeded
#[derive(Debug, Clone, PartialEq)]
pub enum BatchOutcome<E> {
    Saved(usize),
    Failed { failed: usize, first_error: E },
}

impl<E> BatchOutcome<E> {
    pub fn from_results<T>(results: Vec<Result<T, E>>) -> Self {
        let total = results.len();
        let mut errors = results.into_iter().filter_map(Result::err);
        match errors.next() {
            None => BatchOutcome::Saved(total),
            Some(first_error) => BatchOutcome::Failed {
                failed: 1 + errors.count(),
                first_error,
            },
        }
    }

    pub fn is_saved(&self) -> bool {
        matches!(self, BatchOutcome::Saved(_))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttendanceSummary {
    pub present: usize,
    pub absent: usize,
    pub late: usize,
}

impl AttendanceSheet {
    /// Every student enrolled in `class` starts out present
    pub fn for_class(class: &SchoolClass, students: &[Student], date: NaiveDate) -> Self {
        let marks = students
            .iter()
            .filter(|student| student.class_id == class.id)
            .map(|student| (student.id, AttendanceStatus::Present))
            .collect();

        Self {
            class_id: class.id,
            date,
            marks,
        }
    }

    pub fn class_id(&self) -> i64 {
        self.class_id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.date = date;
    }

    /// Returns false when the student is not on this sheet
    pub fn set_status(&mut self, student_id: i64, status: AttendanceStatus) -> bool {
        match self.marks.get_mut(&student_id) {
            Some(mark) => {
                *mark = status;
                true
            }
            None => false,
        }
    }

    pub fn status(&self, student_id: i64) -> Option<AttendanceStatus> {
        self.marks.get(&student_id).copied()
    }

    pub fn len(&self) -> usize {
        self.marks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    pub fn summary(&self) -> AttendanceSummary {
        self.marks
            .values()
            .fold(AttendanceSummary::default(), |mut summary, status| {
                match status {
                    AttendanceStatus::Present => summary.present += 1,
                    AttendanceStatus::Absent => summary.absent += 1,
                    AttendanceStatus::Late => summary.late += 1,
                }
                summary
            })
    }

    /// One write per student, in student id order
    pub fn requests(&self) -> Vec<MarkAttendanceRequest> {
        let (hour, minute) = ATTENDANCE_TIME;
        let time = NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN);
        let date = self.date.and_time(time);

        self.marks
            .iter()
            .map(|(student_id, status)| MarkAttendanceRequest {
                student_id: *student_id,
                class_id: self.class_id,
                date,
                status: *status,
                remarks: String::new(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(id: i64) -> SchoolClass {
        SchoolClass {
            id,
            name: format!("Class {}", id),
            grade: 7,
            section: None,
            academic_year: None,
            capacity: 30,
            class_teacher_id: None,
        }
    }

    fn student(id: i64, class_id: i64) -> Student {
        Student {
            id,
            user_id: id + 100,
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

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    #[test]
    fn test_sheet_starts_everyone_present() {
        let students = vec![student(1, 7), student(2, 8), student(3, 7)];
        let sheet = AttendanceSheet::for_class(&class(7), &students, day());

        assert_eq!(sheet.len(), 2);
        assert_eq!(sheet.status(1), Some(AttendanceStatus::Present));
        assert_eq!(sheet.status(3), Some(AttendanceStatus::Present));
        // Student from another class is not on the sheet
        assert_eq!(sheet.status(2), None);
    }

    #[test]
    fn test_set_status_only_for_listed_students() {
        let students = vec![student(1, 7), student(3, 7)];
        let mut sheet = AttendanceSheet::for_class(&class(7), &students, day());

        assert!(sheet.set_status(3, AttendanceStatus::Late));
        assert!(!sheet.set_status(99, AttendanceStatus::Absent));
        assert_eq!(
            sheet.summary(),
            AttendanceSummary {
                present: 1,
                absent: 0,
                late: 1
            }
        );
    }

    #[test]
    fn test_requests_one_per_student_at_nine() {
        let students = vec![student(3, 7), student(1, 7)];
        let mut sheet = AttendanceSheet::for_class(&class(7), &students, day());
        sheet.set_status(1, AttendanceStatus::Absent);
        sheet.set_date(NaiveDate::from_ymd_opt(2024, 5, 2).unwrap());

        let requests = sheet.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].student_id, 1);
        assert_eq!(requests[0].status, AttendanceStatus::Absent);
        assert_eq!(requests[1].student_id, 3);
        assert!(requests.iter().all(|request| request.class_id == 7));
        assert!(requests.iter().all(|request| request.remarks.is_empty()));
        assert_eq!(requests[0].date.to_string(), "2024-05-02 09:00:00");
    }

    #[test]
    fn test_empty_class_has_no_requests() {
        let sheet = AttendanceSheet::for_class(&class(7), &[], day());
        assert!(sheet.is_empty());
        assert!(sheet.requests().is_empty());
    }

    #[test]
    fn test_batch_saved_only_when_every_write_succeeds() {
        let all_ok: Vec<Result<i64, String>> = vec![Ok(1), Ok(2), Ok(3)];
        assert_eq!(BatchOutcome::from_results(all_ok), BatchOutcome::Saved(3));

        let one_failed: Vec<Result<i64, String>> = vec![Ok(1), Err("timeout".to_string()), Ok(3)];
        let outcome = BatchOutcome::from_results(one_failed);
        assert!(!outcome.is_saved());
        assert_eq!(
            outcome,
            BatchOutcome::Failed {
                failed: 1,
                first_error: "timeout".to_string()
            }
        );
    }

    #[test]
    fn test_batch_reports_first_error_and_failure_count() {
        let results: Vec<Result<(), &str>> = vec![Err("500"), Ok(()), Err("422")];
        assert_eq!(
            BatchOutcome::from_results(results),
            BatchOutcome::Failed {
                failed: 2,
                first_error: "500"
            }
        );
    }

    #[test]
    fn test_empty_class_batch() {
        let sheet = AttendanceSheet::for_class(&class(9), &[student(1, 2)], day());
        assert!(sheet.is_empty());
        assert_eq!(sheet.class_id(), 9);

        let results: Vec<Result<(), String>> = sheet.requests().iter().map(|_| Ok(())).collect();
        let outcome = BatchOutcome::from_results(results);
        assert_eq!(outcome, BatchOutcome::Saved(0));
        assert!(outcome.is_saved());
    }
}
