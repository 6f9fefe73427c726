use shared::{AttendanceSheet, AttendanceStatus, ModalOptions, ModalSize, SchoolClass, Student};
use web_sys::{HtmlInputElement, HtmlSelectElement, MouseEvent};
use yew::prelude::*;

use crate::components::modal::Modal;
use crate::services::date_utils;
use crate::services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct AttendanceModalProps {
    pub is_open: bool,
    pub on_close: Callback<()>,
    pub class: Option<SchoolClass>,
    /// Students of the class, in display order
    pub students: Vec<Student>,
    pub sheet: Option<AttendanceSheet>,
    pub on_change: Callback<AttendanceSheet>,
    pub on_submit: Callback<AttendanceSheet>,
    #[prop_or_default]
    pub is_loading: bool,
}

#[function_component(AttendanceModal)]
pub fn attendance_modal(props: &AttendanceModalProps) -> Html {
    let (Some(class), Some(sheet)) = (props.class.as_ref(), props.sheet.as_ref()) else {
        return html! {};
    };

    let on_date_change = {
        let sheet = sheet.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            match date_utils::parse_input_value(&input.value()) {
                Some(date) => {
                    let mut next = sheet.clone();
                    next.set_date(date);
                    on_change.emit(next);
                }
                None => Logger::warn_with_component(
                    "attendance-modal",
                    &format!("Ignoring invalid date '{}'", input.value()),
                ),
            }
        })
    };

    let on_submit = {
        let sheet = sheet.clone();
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_submit.emit(sheet.clone());
        })
    };

    let on_cancel = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    let summary = sheet.summary();
    let options = ModalOptions::titled(format!("Mark Attendance - {}", class.name)).size(ModalSize::Xl);

    html! {
        <Modal is_open={props.is_open} on_close={props.on_close.clone()} {options}>
            <form class="modal-form" onsubmit={on_submit}>
                <div class="form-group">
                    <label for="attendance-date">{"Date"}</label>
                    <input
                        type="date"
                        id="attendance-date"
                        required=true
                        value={date_utils::input_value(sheet.date())}
                        onchange={on_date_change}
                    />
                </div>

                if props.students.is_empty() {
                    <p class="empty-state">{"No students in this class."}</p>
                } else {
                    <table class="attendance-table">
                        <thead>
                            <tr>
                                <th>{"Roll No."}</th>
                                <th>{"Student"}</th>
                                <th>{"Status"}</th>
                            </tr>
                        </thead>
                        <tbody>
                            {for props.students.iter().map(|student| {
                                render_row(student, sheet, &props.on_change)
                            })}
                        </tbody>
                    </table>
                }

                <p class="attendance-summary">
                    {format!("Present: {} | Absent: {} | Late: {}", summary.present, summary.absent, summary.late)}
                </p>

                <div class="modal-actions">
                    <button type="button" class="btn btn-secondary" onclick={on_cancel} disabled={props.is_loading}>
                        {"Cancel"}
                    </button>
                    <button type="submit" class="btn btn-primary" disabled={props.is_loading || sheet.is_empty()}>
                        {if props.is_loading { "Saving..." } else { "Save Attendance" }}
                    </button>
                </div>
            </form>
        </Modal>
    }
}

fn render_row(student: &Student, sheet: &AttendanceSheet, on_change: &Callback<AttendanceSheet>) -> Html {
    let current = sheet.status(student.id).unwrap_or_default();

    let onchange = {
        let sheet = sheet.clone();
        let on_change = on_change.clone();
        let student_id = student.id;
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let Some(status) = AttendanceStatus::parse(&select.value()) else {
                return;
            };
            let mut next = sheet.clone();
            if next.set_status(student_id, status) {
                on_change.emit(next);
            }
        })
    };

    html! {
        <tr key={student.id.to_string()}>
            <td>{student.roll_number.clone()}</td>
            <td>{student.display_name()}</td>
            <td>
                <select class={classes!("status-select", current.as_str())} {onchange}>
                    {for AttendanceStatus::ALL.iter().map(|status| html! {
                        <option value={status.as_str()} selected={*status == current}>
                            {status.to_string()}
                        </option>
                    })}
                </select>
            </td>
        </tr>
    }
}
