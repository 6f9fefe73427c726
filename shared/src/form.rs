use tracing::debug;

use crate::draft::{DraftRecord, DraftValue, FieldPath};
use crate::error::FieldPathError;

/// Which input a field renders as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Password,
    Number,
    Date,
    DateTimeLocal,
    Tel,
    Select,
    TextArea,
    Checkbox,
}

impl FieldKind {
    /// Value of the HTML `type` attribute for `<input>`-backed kinds
    pub fn input_type(&self) -> &'static str {
        match self {
            FieldKind::Text | FieldKind::Select | FieldKind::TextArea => "text",
            FieldKind::Email => "email",
            FieldKind::Password => "password",
            FieldKind::Number => "number",
            FieldKind::Date => "date",
            FieldKind::DateTimeLocal => "datetime-local",
            FieldKind::Tel => "tel",
            FieldKind::Checkbox => "checkbox",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Declarative description of one form input
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub options: Vec<SelectOption>,
    pub required: bool,
    pub placeholder: Option<String>,
    pub rows: Option<u32>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
            options: Vec::new(),
            required: false,
            placeholder: None,
            rows: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn options(mut self, options: Vec<SelectOption>) -> Self {
        self.options = options;
        self
    }

    pub fn rows(mut self, rows: u32) -> Self {
        self.rows = Some(rows);
        self
    }

    /// Rows for a textarea, defaulting to 3
    pub fn textarea_rows(&self) -> u32 {
        self.rows.unwrap_or(3)
    }

    /// Converts the raw value read from the DOM into a draft value.
    /// Everything except checkboxes stays a string; numeric coercion belongs to the caller.
    pub fn value_from_input(&self, raw: String, checked: bool) -> DraftValue {
        match self.kind {
            FieldKind::Checkbox => DraftValue::Bool(checked),
            _ => DraftValue::Text(raw),
        }
    }
}

/// Emitted after every field write: the path, the written value and the whole updated draft
#[derive(Debug, Clone, PartialEq)]
pub struct FieldChange {
    pub path: FieldPath,
    pub value: DraftValue,
    pub record: DraftRecord,
}

/// Owns the draft of a form modal and keeps it in step with the externally supplied
/// `initial` and `data` snapshots.
#[derive(Debug, Clone, PartialEq)]
pub struct FormController {
    open: bool,
    initial: DraftRecord,
    data: Option<DraftRecord>,
    draft: DraftRecord,
}

impl FormController {
    pub fn new(initial: DraftRecord) -> Self {
        Self {
            open: false,
            draft: initial.clone(),
            initial,
            data: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn draft(&self) -> &DraftRecord {
        &self.draft
    }

    /// Applies the latest external inputs in the order the form reacts to them:
    /// open state and `initial` first, then `data`.
    pub fn sync(&mut self, open: bool, initial: &DraftRecord, data: Option<&DraftRecord>) {
        let opened = open && !self.open;
        let initial_changed = *initial != self.initial;
        let data_changed = data != self.data.as_ref();

        self.open = open;
        if initial_changed {
            self.initial = initial.clone();
        }
        if data_changed {
            self.data = data.cloned();
        }

        if open && (opened || initial_changed) {
            debug!("form draft reset to initial data");
            self.draft = self.initial.clone();
        }
        if open && (opened || data_changed) {
            if let Some(data) = &self.data {
                debug!("form draft replaced by external data");
                self.draft = data.clone();
            }
        }
    }

    pub fn open(&mut self) {
        let initial = self.initial.clone();
        let data = self.data.clone();
        self.sync(true, &initial, data.as_ref());
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn set_initial(&mut self, initial: DraftRecord) {
        let data = self.data.clone();
        self.sync(self.open, &initial, data.as_ref());
    }

    pub fn set_data(&mut self, data: Option<DraftRecord>) {
        let initial = self.initial.clone();
        self.sync(self.open, &initial, data.as_ref());
    }

    pub fn write_field(
        &mut self,
        path: &str,
        value: impl Into<DraftValue>,
    ) -> Result<FieldChange, FieldPathError> {
        let path = FieldPath::parse(path)?;
        let value = value.into();
        self.draft.set(&path, value.clone());

        Ok(FieldChange {
            path,
            value,
            record: self.draft.clone(),
        })
    }

    pub fn read_field(&self, path: &str) -> String {
        self.draft.read(path)
    }

    /// The full draft, exactly as edited
    pub fn submit(&self) -> DraftRecord {
        self.draft.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exam_initial() -> DraftRecord {
        DraftRecord::new()
            .with("name", "")
            .with("max_marks", 100)
    }

    #[test]
    fn test_opening_resets_to_initial() {
        let mut form = FormController::new(exam_initial());
        form.open();
        form.write_field("name", "Unsaved").unwrap();
        assert_eq!(form.read_field("name"), "Unsaved");

        // Closing then reopening discards the edit
        form.close();
        form.open();
        assert_eq!(form.draft(), &exam_initial());
    }

    #[test]
    fn test_initial_change_while_open_resets_draft() {
        let mut form = FormController::new(exam_initial());
        form.open();
        form.write_field("name", "Unsaved").unwrap();

        let preselected = exam_initial().with("class_id", 7);
        form.set_initial(preselected.clone());
        assert_eq!(form.draft(), &preselected);
    }

    #[test]
    fn test_initial_change_while_closed_applies_on_open() {
        let mut form = FormController::new(exam_initial());
        let updated = exam_initial().with("name", "Quiz");
        form.set_initial(updated.clone());
        assert!(!form.is_open());

        form.open();
        assert_eq!(form.read_field("name"), "Quiz");
    }

    #[test]
    fn test_data_replaces_whole_draft_while_open() {
        let mut form = FormController::new(exam_initial());
        form.open();
        form.write_field("remarks", "typed").unwrap();

        let fetched = DraftRecord::new().with("name", "Fetched");
        form.set_data(Some(fetched.clone()));

        // No merge with the earlier draft
        assert_eq!(form.draft(), &fetched);
        assert_eq!(form.read_field("remarks"), "");
        assert_eq!(form.read_field("max_marks"), "");
    }

    #[test]
    fn test_data_while_closed_is_applied_on_open() {
        let mut form = FormController::new(exam_initial());
        let fetched = DraftRecord::new().with("name", "Fetched");
        form.set_data(Some(fetched.clone()));
        assert_eq!(form.draft(), &exam_initial());

        form.open();
        assert_eq!(form.draft(), &fetched);
    }

    #[test]
    fn test_same_data_does_not_clobber_edits() {
        let mut form = FormController::new(exam_initial());
        let fetched = DraftRecord::new().with("name", "Fetched");
        form.sync(true, &exam_initial(), Some(&fetched));
        form.write_field("name", "Edited").unwrap();

        // A re-render with unchanged inputs keeps the edit
        form.sync(true, &exam_initial(), Some(&fetched));
        assert_eq!(form.read_field("name"), "Edited");
    }

    #[test]
    fn test_write_field_reports_change() {
        let mut form = FormController::new(DraftRecord::new());
        form.open();

        let change = form.write_field("user.full_name", "Ann").unwrap();
        assert_eq!(change.path.as_str(), "user.full_name");
        assert_eq!(change.value, DraftValue::Text("Ann".to_string()));
        assert_eq!(change.record.read("user.full_name"), "Ann");
        assert_eq!(&change.record, form.draft());

        assert!(form.write_field("user..name", "x").is_err());
    }

    #[test]
    fn test_submit_returns_draft_unmodified() {
        let initial = DraftRecord::new()
            .with("name", "Midterm")
            .with("exam_date", "2024-05-01")
            .with("max_marks", "100");
        let mut form = FormController::new(initial.clone());
        form.open();

        assert_eq!(form.submit(), initial);
    }

    #[test]
    fn test_descriptor_value_from_input() {
        let checkbox = FieldDescriptor::new("is_public", "Public", FieldKind::Checkbox);
        assert_eq!(checkbox.value_from_input("on".into(), false), DraftValue::Bool(false));

        let marks = FieldDescriptor::new("max_marks", "Max marks", FieldKind::Number).required();
        assert!(marks.required);
        assert_eq!(marks.value_from_input("80".into(), false), DraftValue::Text("80".into()));
        assert_eq!(marks.kind.input_type(), "number");

        let notes = FieldDescriptor::new("remarks", "Remarks", FieldKind::TextArea);
        assert_eq!(notes.textarea_rows(), 3);
        assert_eq!(notes.rows(5).textarea_rows(), 5);
    }
}
