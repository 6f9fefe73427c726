use futures::future::join_all;
use shared::payload::{
    create_exam_request, exam_form_defaults, material_form_defaults, record_result_request,
    result_form_defaults, upload_material_request,
};
use shared::view::{class_header, class_sections, student_header, student_sections};
use shared::{
    AppConfig, AttendanceSheet, BatchOutcome, Credentials, DashboardLists, DashboardTab, DraftRecord,
    SchoolClass, Student,
};
use wasm_bindgen_futures::spawn_local;
use web_sys::MouseEvent;
use yew::prelude::*;

use crate::components::attendance_modal::AttendanceModal;
use crate::components::modals::{
    ConfirmVariant, ConfirmationModal, CredentialsModal, FormModal, SessionExpiryWarning, ViewModal,
};
use crate::hooks::use_dashboard_data::use_dashboard_data;
use crate::hooks::use_modal::use_modal;
use crate::hooks::use_session::use_session;
use crate::services::api::ApiClient;
use crate::services::browser;
use crate::services::date_utils;
use crate::services::logging::Logger;

const COMPONENT: &str = "teacher-dashboard";

#[derive(Properties, PartialEq)]
pub struct TeacherDashboardProps {
    pub config: AppConfig,
    pub on_logout: Callback<()>,
}

#[function_component(TeacherDashboard)]
pub fn teacher_dashboard(props: &TeacherDashboardProps) -> Html {
    let config = &props.config;
    let teacher_id = config.teacher_id;
    let api_client = ApiClient::new(config);

    let data = use_dashboard_data(&api_client, teacher_id);
    let session = use_session(config, props.on_logout.clone());
    let lists = data.state.lists.clone();
    let reload = data.actions.reload.clone();

    let active_tab = use_state(DashboardTab::default);

    let attendance_modal = use_modal::<SchoolClass>();
    let attendance_sheet = use_state(|| Option::<AttendanceSheet>::None);
    let attendance_saving = use_state(|| false);

    let exam_modal = use_modal::<()>();
    let exam_initial = use_state(exam_form_defaults);
    let exam_saving = use_state(|| false);

    let result_modal = use_modal::<()>();
    let result_initial = use_state(result_form_defaults);
    let result_saving = use_state(|| false);

    let material_modal = use_modal::<()>();
    let material_initial = use_state(material_form_defaults);
    let material_saving = use_state(|| false);

    let student_view = use_modal::<Student>();
    let class_view = use_modal::<SchoolClass>();
    let credentials_modal = use_modal::<Credentials>();
    let logout_confirm = use_modal::<()>();

    // Attendance
    let open_attendance = {
        let attendance_modal = attendance_modal.clone();
        let attendance_sheet = attendance_sheet.clone();
        let students = lists.students.clone();
        Callback::from(move |class: SchoolClass| {
            attendance_sheet.set(Some(AttendanceSheet::for_class(&class, &students, date_utils::today())));
            attendance_modal.open_with(class);
        })
    };

    let close_attendance = {
        let attendance_modal = attendance_modal.clone();
        let attendance_sheet = attendance_sheet.clone();
        Callback::from(move |_: ()| {
            attendance_modal.close();
            attendance_sheet.set(None);
        })
    };

    let on_attendance_change = {
        let attendance_sheet = attendance_sheet.clone();
        Callback::from(move |sheet: AttendanceSheet| attendance_sheet.set(Some(sheet)))
    };

    let submit_attendance = {
        let api_client = api_client.clone();
        let close_attendance = close_attendance.clone();
        let attendance_saving = attendance_saving.clone();
        Callback::from(move |sheet: AttendanceSheet| {
            let api_client = api_client.clone();
            let close_attendance = close_attendance.clone();
            let attendance_saving = attendance_saving.clone();

            attendance_saving.set(true);
            spawn_local(async move {
                let requests = sheet.requests();
                let results = join_all(
                    requests
                        .iter()
                        .map(|request| api_client.mark_attendance(request)),
                )
                .await;

                match BatchOutcome::from_results(results) {
                    BatchOutcome::Saved(count) => {
                        Logger::info_with_component(
                            COMPONENT,
                            &format!("Marked attendance for {} students in class {}", count, sheet.class_id()),
                        );
                        close_attendance.emit(());
                        browser::alert("Attendance marked successfully!");
                    }
                    BatchOutcome::Failed { failed, first_error } => {
                        Logger::error_with_component(
                            COMPONENT,
                            &format!(
                                "Failed to mark attendance for {} of {} students: {}",
                                failed,
                                requests.len(),
                                first_error
                            ),
                        );
                        browser::alert("Failed to mark attendance");
                    }
                }
                attendance_saving.set(false);
            });
        })
    };

    // Exams
    let open_exam = {
        let exam_modal = exam_modal.clone();
        let exam_initial = exam_initial.clone();
        Callback::from(move |class_id: Option<i64>| {
            let initial = match class_id {
                Some(class_id) => exam_form_defaults().with("class_id", class_id.to_string()),
                None => exam_form_defaults(),
            };
            exam_initial.set(initial);
            exam_modal.open();
        })
    };

    let create_exam = {
        let api_client = api_client.clone();
        let exam_modal = exam_modal.clone();
        let exam_initial = exam_initial.clone();
        let exam_saving = exam_saving.clone();
        let reload = reload.clone();
        Callback::from(move |draft: DraftRecord| {
            let request = match create_exam_request(&draft) {
                Ok(request) => request,
                Err(e) => {
                    Logger::error_with_component(COMPONENT, &format!("Invalid exam form: {}", e));
                    return;
                }
            };

            let api_client = api_client.clone();
            let exam_modal = exam_modal.clone();
            let exam_initial = exam_initial.clone();
            let exam_saving = exam_saving.clone();
            let reload = reload.clone();

            exam_saving.set(true);
            spawn_local(async move {
                match api_client.create_exam(&request).await {
                    Ok(exam) => {
                        Logger::info_with_component(COMPONENT, &format!("Created exam {}", exam.id));
                        exam_modal.close();
                        exam_initial.set(exam_form_defaults());
                        reload.emit(());
                    }
                    Err(e) => {
                        Logger::error_with_component(COMPONENT, &format!("Failed to create exam: {}", e));
                    }
                }
                exam_saving.set(false);
            });
        })
    };

    // Results
    let open_result = {
        let result_modal = result_modal.clone();
        let result_initial = result_initial.clone();
        Callback::from(move |exam_id: Option<i64>| {
            let initial = match exam_id {
                Some(exam_id) => result_form_defaults().with("exam_id", exam_id.to_string()),
                None => result_form_defaults(),
            };
            result_initial.set(initial);
            result_modal.open();
        })
    };

    let record_result = {
        let api_client = api_client.clone();
        let result_modal = result_modal.clone();
        let result_initial = result_initial.clone();
        let result_saving = result_saving.clone();
        Callback::from(move |draft: DraftRecord| {
            let request = match record_result_request(&draft) {
                Ok(request) => request,
                Err(e) => {
                    Logger::error_with_component(COMPONENT, &format!("Invalid result form: {}", e));
                    return;
                }
            };

            let api_client = api_client.clone();
            let result_modal = result_modal.clone();
            let result_initial = result_initial.clone();
            let result_saving = result_saving.clone();

            result_saving.set(true);
            spawn_local(async move {
                match api_client.record_exam_result(&request).await {
                    Ok(_) => {
                        result_modal.close();
                        result_initial.set(result_form_defaults());
                        browser::alert("Exam result recorded successfully!");
                    }
                    Err(e) => {
                        Logger::error_with_component(COMPONENT, &format!("Failed to record result: {}", e));
                    }
                }
                result_saving.set(false);
            });
        })
    };

    // Materials
    let open_material = {
        let material_modal = material_modal.clone();
        let material_initial = material_initial.clone();
        Callback::from(move |_: MouseEvent| {
            material_initial.set(material_form_defaults());
            material_modal.open();
        })
    };

    let upload_material = {
        let api_client = api_client.clone();
        let material_modal = material_modal.clone();
        let material_initial = material_initial.clone();
        let material_saving = material_saving.clone();
        let reload = reload.clone();
        Callback::from(move |draft: DraftRecord| {
            let request = match upload_material_request(&draft) {
                Ok(request) => request,
                Err(e) => {
                    Logger::error_with_component(COMPONENT, &format!("Invalid material form: {}", e));
                    return;
                }
            };

            let api_client = api_client.clone();
            let material_modal = material_modal.clone();
            let material_initial = material_initial.clone();
            let material_saving = material_saving.clone();
            let reload = reload.clone();

            material_saving.set(true);
            spawn_local(async move {
                match api_client.upload_study_material(teacher_id, &request).await {
                    Ok(material) => {
                        Logger::info_with_component(
                            COMPONENT,
                            &format!("Uploaded material '{}'", material.title),
                        );
                        material_modal.close();
                        material_initial.set(material_form_defaults());
                        reload.emit(());
                    }
                    Err(e) => {
                        Logger::error_with_component(COMPONENT, &format!("Failed to upload material: {}", e));
                    }
                }
                material_saving.set(false);
            });
        })
    };

    // Details and credentials
    let view_student = {
        let student_view = student_view.clone();
        Callback::from(move |student: Student| student_view.open_with(student))
    };

    let view_class = {
        let class_view = class_view.clone();
        Callback::from(move |class: SchoolClass| class_view.open_with(class))
    };

    let show_credentials = {
        let student_view = student_view.clone();
        let credentials_modal = credentials_modal.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(student) = student_view.context() {
                student_view.close();
                credentials_modal.open_with(Credentials::for_student(&student));
            }
        })
    };

    let copy_credentials = {
        let credentials_modal = credentials_modal.clone();
        Callback::from(move |_: ()| {
            let Some(credentials) = credentials_modal.context() else {
                return;
            };
            spawn_local(async move {
                match browser::copy_to_clipboard(&credentials.to_plain_text()).await {
                    Ok(()) => browser::alert("Credentials copied to clipboard!"),
                    Err(e) => {
                        Logger::warn_with_component(COMPONENT, &format!("Copy failed: {}", e));
                        browser::alert("Failed to copy credentials");
                    }
                }
            });
        })
    };

    let print_credentials = Callback::from(|_: ()| browser::print_page());

    // Logout
    let request_logout = {
        let logout_confirm = logout_confirm.clone();
        Callback::from(move |_: MouseEvent| logout_confirm.open())
    };

    let confirm_logout = {
        let logout_confirm = logout_confirm.clone();
        let logout = session.actions.logout.clone();
        Callback::from(move |_: ()| {
            logout_confirm.close();
            logout.emit(());
        })
    };

    let tab_content = match *active_tab {
        DashboardTab::Overview => render_overview(&lists),
        DashboardTab::Classes => render_classes(&lists, &view_class, &view_student, &open_attendance, &open_exam),
        DashboardTab::Attendance => render_attendance(&lists, &open_attendance),
        DashboardTab::Exams => render_exams(&lists, &open_exam, &open_result),
        DashboardTab::Materials => render_materials(&lists, open_material),
        DashboardTab::Notices => render_notices(&lists),
    };

    let attendance_students: Vec<Student> = attendance_modal
        .context()
        .map(|class| lists.students_in_class(class.id).into_iter().cloned().collect())
        .unwrap_or_default();

    let student_view_header = student_view
        .context()
        .map(|student| student_header(&student, &lists.class_name(student.class_id)));
    let student_view_sections = student_view
        .context()
        .map(|student| student_sections(&student))
        .unwrap_or_default();

    let class_view_header = class_view.context().map(|class| class_header(&class));
    let class_view_sections = class_view
        .context()
        .map(|class| class_sections(&class, lists.students_in_class(class.id).len()))
        .unwrap_or_default();

    html! {
        <div class="dashboard">
            <header class="dashboard-header">
                <h1>{format!("{} - Teacher Dashboard", config.app_name)}</h1>
                <button type="button" class="btn btn-secondary" onclick={request_logout}>
                    {"Logout"}
                </button>
            </header>

            <nav class="dashboard-tabs">
                {for DashboardTab::ALL.iter().map(|tab| {
                    let onclick = {
                        let active_tab = active_tab.clone();
                        let tab = *tab;
                        Callback::from(move |_: MouseEvent| active_tab.set(tab))
                    };
                    html! {
                        <button
                            type="button"
                            class={classes!("tab", (*active_tab == *tab).then_some("active"))}
                            {onclick}
                        >
                            {tab.label()}
                        </button>
                    }
                })}
            </nav>

            if data.state.loading {
                <div class="loading-banner">{"Loading..."}</div>
            }

            <main class="dashboard-content">
                {tab_content}
            </main>

            <AttendanceModal
                is_open={attendance_modal.is_open()}
                on_close={close_attendance}
                class={attendance_modal.context()}
                students={attendance_students}
                sheet={(*attendance_sheet).clone()}
                on_change={on_attendance_change}
                on_submit={submit_attendance}
                is_loading={*attendance_saving}
            />

            <FormModal
                is_open={exam_modal.is_open()}
                on_close={exam_modal.close_callback()}
                on_submit={create_exam}
                title="Create Exam"
                fields={lists.exam_fields()}
                initial_data={(*exam_initial).clone()}
                submit_text="Create Exam"
                is_loading={*exam_saving}
            />

            <FormModal
                is_open={result_modal.is_open()}
                on_close={result_modal.close_callback()}
                on_submit={record_result}
                title="Record Exam Result"
                fields={lists.result_fields()}
                initial_data={(*result_initial).clone()}
                submit_text="Save Result"
                is_loading={*result_saving}
            />

            <FormModal
                is_open={material_modal.is_open()}
                on_close={material_modal.close_callback()}
                on_submit={upload_material}
                title="Upload Study Material"
                fields={lists.material_fields()}
                initial_data={(*material_initial).clone()}
                submit_text="Upload"
                is_loading={*material_saving}
            />

            <ViewModal
                is_open={student_view.is_open()}
                on_close={student_view.close_callback()}
                title="Student Details"
                header={student_view_header}
                sections={student_view_sections}
                actions={html! {
                    <button type="button" class="btn btn-secondary" onclick={show_credentials}>
                        {"Login Details"}
                    </button>
                }}
            />

            <ViewModal
                is_open={class_view.is_open()}
                on_close={class_view.close_callback()}
                title="Class Details"
                header={class_view_header}
                sections={class_view_sections}
            />

            <CredentialsModal
                is_open={credentials_modal.is_open()}
                on_close={credentials_modal.close_callback()}
                credentials={credentials_modal.context()}
                title="Student Login Details"
                entity_type="Student"
                heading="Login Details"
                message="Share these login details with the student or their parent."
                on_copy={copy_credentials}
                on_print={print_credentials}
            />

            <ConfirmationModal
                is_open={logout_confirm.is_open()}
                on_close={logout_confirm.close_callback()}
                on_confirm={confirm_logout}
                title="Logout"
                message="Are you sure you want to log out?"
                confirm_text="Logout"
                variant={ConfirmVariant::Primary}
            />

            <SessionExpiryWarning
                is_open={session.state.warning_remaining_ms.is_some()}
                time_remaining_ms={session.state.warning_remaining_ms.unwrap_or_default()}
                on_extend={session.actions.extend.clone()}
                on_logout={session.actions.logout.clone()}
            />
        </div>
    }
}

fn render_overview(lists: &DashboardLists) -> Html {
    let stats = lists.stats();
    let cards = [
        ("Classes", stats.classes),
        ("Students", stats.students),
        ("Subjects", stats.subjects),
        ("Exams", stats.exams),
    ];

    html! {
        <div class="overview">
            <div class="stat-grid">
                {for cards.iter().map(|(label, count)| html! {
                    <div class="stat-card">
                        <span class="stat-value">{count.to_string()}</span>
                        <span class="stat-label">{*label}</span>
                    </div>
                })}
            </div>

            <div class="overview-columns">
                <section class="card">
                    <h3>{"My Classes"}</h3>
                    if lists.classes.is_empty() {
                        <p class="empty-state">{"No classes assigned yet."}</p>
                    } else {
                        <ul class="simple-list">
                            {for lists.recent_classes().iter().map(|class| html! {
                                <li key={class.id.to_string()}>
                                    <strong>{class.name.clone()}</strong>
                                    <span class="muted">
                                        {format!(" Grade {} | {} students", class.grade, lists.students_in_class(class.id).len())}
                                    </span>
                                </li>
                            })}
                        </ul>
                    }
                </section>

                <section class="card">
                    <h3>{"Recent Notices"}</h3>
                    if lists.notices.is_empty() {
                        <p class="empty-state">{"No notices."}</p>
                    } else {
                        <ul class="simple-list">
                            {for lists.recent_notices().iter().map(|notice| html! {
                                <li key={notice.id.to_string()}>
                                    <strong>{notice.title.clone()}</strong>
                                    if notice.is_urgent {
                                        <span class="badge badge-danger">{"Urgent"}</span>
                                    }
                                    <p class="muted">{shared::dashboard::notice_preview(&notice.content)}</p>
                                </li>
                            })}
                        </ul>
                    }
                </section>
            </div>
        </div>
    }
}

fn render_classes(
    lists: &DashboardLists,
    view_class: &Callback<SchoolClass>,
    view_student: &Callback<Student>,
    open_attendance: &Callback<SchoolClass>,
    open_exam: &Callback<Option<i64>>,
) -> Html {
    if lists.classes.is_empty() {
        return html! { <p class="empty-state">{"No classes assigned yet."}</p> };
    }

    html! {
        <div class="class-grid">
            {for lists.classes.iter().map(|class| {
                let students = lists.students_in_class(class.id);
                let on_view = {
                    let view_class = view_class.clone();
                    let class = class.clone();
                    Callback::from(move |_: MouseEvent| view_class.emit(class.clone()))
                };
                let on_attendance = {
                    let open_attendance = open_attendance.clone();
                    let class = class.clone();
                    Callback::from(move |_: MouseEvent| open_attendance.emit(class.clone()))
                };
                let on_exam = {
                    let open_exam = open_exam.clone();
                    let class_id = class.id;
                    Callback::from(move |_: MouseEvent| open_exam.emit(Some(class_id)))
                };

                html! {
                    <div class="card class-card" key={class.id.to_string()}>
                        <div class="class-card-header">
                            <h3>{class.name.clone()}</h3>
                            <span class="muted">
                                {format!("Grade {}{}", class.grade, class.section.as_deref().map(|s| format!(" - {}", s)).unwrap_or_default())}
                            </span>
                        </div>
                        <p>{format!("{} / {} students", students.len(), class.capacity)}</p>

                        <ul class="student-list">
                            {for students.iter().map(|student| {
                                let on_view_student = {
                                    let view_student = view_student.clone();
                                    let student = (*student).clone();
                                    Callback::from(move |_: MouseEvent| view_student.emit(student.clone()))
                                };
                                html! {
                                    <li key={student.id.to_string()}>
                                        <span>{format!("{} ({})", student.display_name(), student.roll_number)}</span>
                                        <button type="button" class="btn btn-link" onclick={on_view_student}>{"View"}</button>
                                    </li>
                                }
                            })}
                        </ul>

                        <div class="card-actions">
                            <button type="button" class="btn btn-secondary" onclick={on_view}>{"Details"}</button>
                            <button type="button" class="btn btn-primary" onclick={on_attendance}>{"Mark Attendance"}</button>
                            <button type="button" class="btn btn-secondary" onclick={on_exam}>{"Create Exam"}</button>
                        </div>
                    </div>
                }
            })}
        </div>
    }
}

fn render_attendance(lists: &DashboardLists, open_attendance: &Callback<SchoolClass>) -> Html {
    html! {
        <section class="card">
            <h3>{"Take Attendance"}</h3>
            if lists.classes.is_empty() {
                <p class="empty-state">{"No classes assigned yet."}</p>
            } else {
                <ul class="simple-list">
                    {for lists.classes.iter().map(|class| {
                        let onclick = {
                            let open_attendance = open_attendance.clone();
                            let class = class.clone();
                            Callback::from(move |_: MouseEvent| open_attendance.emit(class.clone()))
                        };
                        html! {
                            <li key={class.id.to_string()}>
                                <span>
                                    {format!("{} ({} students)", class.name, lists.students_in_class(class.id).len())}
                                </span>
                                <button type="button" class="btn btn-primary" {onclick}>{"Mark Attendance"}</button>
                            </li>
                        }
                    })}
                </ul>
            }
        </section>
    }
}

fn render_exams(
    lists: &DashboardLists,
    open_exam: &Callback<Option<i64>>,
    open_result: &Callback<Option<i64>>,
) -> Html {
    let on_create = {
        let open_exam = open_exam.clone();
        Callback::from(move |_: MouseEvent| open_exam.emit(None))
    };
    let on_result = {
        let open_result = open_result.clone();
        Callback::from(move |_: MouseEvent| open_result.emit(None))
    };

    html! {
        <section class="card">
            <div class="section-header">
                <h3>{"Exams"}</h3>
                <div class="card-actions">
                    <button type="button" class="btn btn-secondary" onclick={on_result}>{"Record Result"}</button>
                    <button type="button" class="btn btn-primary" onclick={on_create}>{"Create Exam"}</button>
                </div>
            </div>

            if lists.exams.is_empty() {
                <p class="empty-state">{"No exams scheduled."}</p>
            } else {
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>{"Name"}</th>
                            <th>{"Subject"}</th>
                            <th>{"Class"}</th>
                            <th>{"Date"}</th>
                            <th>{"Max Marks"}</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        {for lists.exams.iter().map(|exam| {
                            let onclick = {
                                let open_result = open_result.clone();
                                let exam_id = exam.id;
                                Callback::from(move |_: MouseEvent| open_result.emit(Some(exam_id)))
                            };
                            html! {
                                <tr key={exam.id.to_string()}>
                                    <td>{exam.name.clone()}</td>
                                    <td>{lists.subject_name(exam.subject_id)}</td>
                                    <td>{lists.class_name(exam.class_id)}</td>
                                    <td>{date_utils::format_datetime(exam.exam_date)}</td>
                                    <td>{exam.max_marks}</td>
                                    <td>
                                        <button type="button" class="btn btn-link" {onclick}>{"Add Result"}</button>
                                    </td>
                                </tr>
                            }
                        })}
                    </tbody>
                </table>
            }
        </section>
    }
}

fn render_materials(lists: &DashboardLists, open_material: Callback<MouseEvent>) -> Html {
    html! {
        <section class="card">
            <div class="section-header">
                <h3>{"Study Materials"}</h3>
                <button type="button" class="btn btn-primary" onclick={open_material}>{"Upload Material"}</button>
            </div>

            if lists.materials.is_empty() {
                <p class="empty-state">{"No study materials uploaded."}</p>
            } else {
                <ul class="simple-list">
                    {for lists.materials.iter().map(|material| html! {
                        <li key={material.id.to_string()}>
                            <strong>{material.title.clone()}</strong>
                            <span class="muted">
                                {format!(
                                    " {} | {} | {}",
                                    lists.subject_name(material.subject_id),
                                    material.file_type.as_deref().unwrap_or("File"),
                                    if material.is_public { "Public" } else { "Private" },
                                )}
                            </span>
                            {for material.description.iter().map(|description| html! {
                                <p class="muted">{description.clone()}</p>
                            })}
                        </li>
                    })}
                </ul>
            }
        </section>
    }
}

fn render_notices(lists: &DashboardLists) -> Html {
    html! {
        <section class="card">
            <h3>{"Notices"}</h3>
            if lists.notices.is_empty() {
                <p class="empty-state">{"No notices."}</p>
            } else {
                {for lists.notices.iter().map(|notice| html! {
                    <article class={classes!("notice", notice.is_urgent.then_some("notice-urgent"))} key={notice.id.to_string()}>
                        <h4>{notice.title.clone()}</h4>
                        <p>{notice.content.clone()}</p>
                        <span class="muted">{date_utils::format_datetime(notice.created_at)}</span>
                    </article>
                })}
            }
        </section>
    }
}
