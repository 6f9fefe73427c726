//! Coercion of string-valued form drafts into typed API requests, plus the
//! default drafts each dashboard form starts from.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use tracing::warn;

use crate::draft::DraftRecord;
use crate::error::{PayloadError, PayloadResult};
use crate::models::{CreateExamRequest, RecordExamResultRequest, UploadMaterialRequest};

/// Exams are scheduled at 10:00 on the chosen day
pub const EXAM_START_TIME: (u32, u32) = (10, 0);

pub fn exam_form_defaults() -> DraftRecord {
    DraftRecord::new()
        .with("name", "")
        .with("exam_date", "")
        .with("max_marks", 100)
        .with("duration_minutes", 120)
        .with("subject_id", "")
        .with("class_id", "")
}

pub fn result_form_defaults() -> DraftRecord {
    DraftRecord::new()
        .with("exam_id", "")
        .with("student_id", "")
        .with("marks_obtained", 0)
        .with("grade", "")
        .with("remarks", "")
}

pub fn material_form_defaults() -> DraftRecord {
    DraftRecord::new()
        .with("title", "")
        .with("description", "")
        .with("subject_id", "")
        .with("file_type", "PDF")
        .with("is_public", true)
}

pub fn create_exam_request(draft: &DraftRecord) -> PayloadResult<CreateExamRequest> {
    let (hour, minute) = EXAM_START_TIME;
    Ok(CreateExamRequest {
        name: draft.read("name"),
        exam_date: date_at(draft, "exam_date", hour, minute)?,
        max_marks: int_field(draft, "max_marks")?,
        duration_minutes: int_field(draft, "duration_minutes")?,
        subject_id: id_field(draft, "subject_id")?,
        class_id: id_field(draft, "class_id")?,
    })
}

pub fn record_result_request(draft: &DraftRecord) -> PayloadResult<RecordExamResultRequest> {
    Ok(RecordExamResultRequest {
        exam_id: id_field(draft, "exam_id")?,
        student_id: id_field(draft, "student_id")?,
        marks_obtained: float_field(draft, "marks_obtained")?,
        grade: draft.read("grade"),
        remarks: draft.read("remarks"),
    })
}

pub fn upload_material_request(draft: &DraftRecord) -> PayloadResult<UploadMaterialRequest> {
    let title = draft.read("title");
    let file_type = draft.read("file_type");
    Ok(UploadMaterialRequest {
        file_path: material_file_path(&title, &file_type),
        subject_id: id_field(draft, "subject_id")?,
        description: draft.read("description"),
        is_public: draft.read_bool("is_public"),
        title,
        file_type,
    })
}

/// `/materials/{title}.{type}` with the title lowercased and every whitespace run,
/// including leading and trailing ones, replaced by a single `_`
pub fn material_file_path(title: &str, file_type: &str) -> String {
    let (slug, _) = title.to_lowercase().chars().fold(
        (String::new(), false),
        |(mut slug, in_run), c| {
            let is_space = c.is_whitespace();
            if !is_space {
                slug.push(c);
            } else if !in_run {
                slug.push('_');
            }
            (slug, is_space)
        },
    );
    format!("/materials/{}.{}", slug, file_type.to_lowercase())
}

fn required_text(draft: &DraftRecord, field: &str) -> PayloadResult<String> {
    let value = draft.read(field);
    let trimmed = value.trim();
    if trimmed.is_empty() {
        warn!(field, "required form field is empty");
        return Err(PayloadError::MissingField(field.to_string()));
    }
    Ok(trimmed.to_string())
}

fn invalid_number(field: &str, value: String) -> PayloadError {
    warn!(field, value = %value, "form field is not numeric");
    PayloadError::InvalidNumber {
        field: field.to_string(),
        value,
    }
}

fn id_field(draft: &DraftRecord, field: &str) -> PayloadResult<i64> {
    let value = required_text(draft, field)?;
    value.parse::<i64>().map_err(|_| invalid_number(field, value))
}

fn int_field(draft: &DraftRecord, field: &str) -> PayloadResult<i32> {
    let value = required_text(draft, field)?;
    value.parse::<i32>().map_err(|_| invalid_number(field, value))
}

fn float_field(draft: &DraftRecord, field: &str) -> PayloadResult<f64> {
    let value = required_text(draft, field)?;
    match value.parse::<f64>() {
        Ok(number) if number.is_finite() => Ok(number),
        _ => Err(invalid_number(field, value)),
    }
}

/// Combines a `YYYY-MM-DD` field with a fixed time of day
pub fn date_at(draft: &DraftRecord, field: &str, hour: u32, minute: u32) -> PayloadResult<NaiveDateTime> {
    let value = required_text(draft, field)?;
    let date = NaiveDate::parse_from_str(&value, "%Y-%m-%d").map_err(|_| PayloadError::InvalidDate {
        field: field.to_string(),
        value: value.clone(),
    })?;
    let time = NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| PayloadError::InvalidDate {
        field: field.to_string(),
        value,
    })?;
    Ok(date.and_time(time))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::FieldPath;

    fn filled(mut draft: DraftRecord, values: &[(&str, &str)]) -> DraftRecord {
        for (field, value) in values {
            draft.set(&FieldPath::parse(field).unwrap(), (*value).into());
        }
        draft
    }

    #[test]
    fn test_create_exam_request_coerces_strings() {
        let draft = filled(
            exam_form_defaults(),
            &[
                ("name", "Midterm"),
                ("exam_date", "2024-05-01"),
                ("subject_id", "3"),
                ("class_id", "2"),
                ("max_marks", "80"),
            ],
        );

        let request = create_exam_request(&draft).unwrap();
        assert_eq!(request.name, "Midterm");
        assert_eq!(request.exam_date.to_string(), "2024-05-01 10:00:00");
        assert_eq!(request.max_marks, 80);
        // Untouched numeric default survives coercion
        assert_eq!(request.duration_minutes, 120);
        assert_eq!(request.subject_id, 3);
        assert_eq!(request.class_id, 2);
    }

    #[test]
    fn test_create_exam_request_rejects_bad_input() {
        let missing_subject = filled(
            exam_form_defaults(),
            &[("name", "Quiz"), ("exam_date", "2024-05-01"), ("class_id", "2")],
        );
        assert_eq!(
            create_exam_request(&missing_subject),
            Err(PayloadError::MissingField("subject_id".to_string()))
        );

        let bad_marks = filled(
            exam_form_defaults(),
            &[
                ("exam_date", "2024-05-01"),
                ("subject_id", "3"),
                ("class_id", "2"),
                ("max_marks", "lots"),
            ],
        );
        assert!(matches!(
            create_exam_request(&bad_marks),
            Err(PayloadError::InvalidNumber { ref field, .. }) if field == "max_marks"
        ));

        let bad_date = filled(
            exam_form_defaults(),
            &[("exam_date", "05/01/2024"), ("subject_id", "3"), ("class_id", "2")],
        );
        assert!(matches!(
            create_exam_request(&bad_date),
            Err(PayloadError::InvalidDate { .. })
        ));
    }

    #[test]
    fn test_record_result_request() {
        let draft = filled(
            result_form_defaults(),
            &[
                ("exam_id", "5"),
                ("student_id", "12"),
                ("marks_obtained", "87.5"),
                ("grade", "A"),
            ],
        );

        let request = record_result_request(&draft).unwrap();
        assert_eq!(request.exam_id, 5);
        assert_eq!(request.student_id, 12);
        assert_eq!(request.marks_obtained, 87.5);
        assert_eq!(request.grade, "A");
        assert_eq!(request.remarks, "");

        let not_finite = filled(draft, &[("marks_obtained", "inf")]);
        assert!(record_result_request(&not_finite).is_err());
    }

    #[test]
    fn test_upload_material_request_derives_file_path() {
        let draft = filled(
            material_form_defaults(),
            &[("title", "Cell  Biology Notes"), ("subject_id", "4")],
        );

        let request = upload_material_request(&draft).unwrap();
        assert_eq!(request.file_path, "/materials/cell_biology_notes.pdf");
        assert_eq!(request.file_type, "PDF");
        assert!(request.is_public);
        assert_eq!(request.subject_id, 4);
    }

    #[test]
    fn test_material_file_path() {
        assert_eq!(material_file_path("Algebra", "DOC"), "/materials/algebra.doc");
        assert_eq!(
            material_file_path("  Lab\tSafety Rules ", "Video"),
            "/materials/_lab_safety_rules_.video"
        );
    }

    #[test]
    fn test_material_title_keeps_edge_whitespace_as_underscores() {
        let draft = filled(
            material_form_defaults(),
            &[("title", "  Lab Safety "), ("subject_id", "2")],
        );

        let request = upload_material_request(&draft).unwrap();
        assert_eq!(request.title, "  Lab Safety ");
        assert_eq!(request.file_path, "/materials/_lab_safety_.pdf");
        assert_eq!(material_file_path("a_ b", "PDF"), "/materials/a__b.pdf");
    }
}
