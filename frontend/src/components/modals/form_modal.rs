use shared::{
    DraftRecord, DraftValue, FieldChange, FieldDescriptor, FieldKind, FormController, ModalOptions,
    ModalSize,
};
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement, MouseEvent};
use yew::prelude::*;

use crate::components::modal::Modal;
use crate::services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct FormModalProps {
    pub is_open: bool,
    pub on_close: Callback<()>,
    pub on_submit: Callback<DraftRecord>,
    pub title: AttrValue,
    pub fields: Vec<FieldDescriptor>,
    /// Draft contents whenever the modal opens
    #[prop_or_default]
    pub initial_data: DraftRecord,
    /// Replaces the draft whenever it changes while open
    #[prop_or_default]
    pub data: Option<DraftRecord>,
    #[prop_or_default]
    pub on_field_change: Option<Callback<FieldChange>>,
    #[prop_or(AttrValue::from("Save"))]
    pub submit_text: AttrValue,
    #[prop_or(AttrValue::from("Cancel"))]
    pub cancel_text: AttrValue,
    #[prop_or_default]
    pub is_loading: bool,
    #[prop_or(ModalSize::Lg)]
    pub size: ModalSize,
    #[prop_or_default]
    pub children: Html,
}

#[function_component(FormModal)]
pub fn form_modal(props: &FormModalProps) -> Html {
    let controller = use_mut_ref(|| FormController::new(props.initial_data.clone()));
    let force_update = use_force_update();

    // Keep the draft in step with the open flag and the external snapshots
    controller
        .borrow_mut()
        .sync(props.is_open, &props.initial_data, props.data.as_ref());

    let write_field = {
        let controller = controller.clone();
        let force_update = force_update.clone();
        let on_field_change = props.on_field_change.clone();
        Callback::from(move |(name, value): (String, DraftValue)| {
            let result = controller.borrow_mut().write_field(&name, value);
            match result {
                Ok(change) => {
                    if let Some(listener) = &on_field_change {
                        listener.emit(change);
                    }
                    force_update.force_update();
                }
                Err(e) => {
                    Logger::error_with_component("form-modal", &format!("Cannot write field '{}': {}", name, e));
                }
            }
        })
    };

    let on_submit = {
        let controller = controller.clone();
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let draft = controller.borrow().submit();
            on_submit.emit(draft);
        })
    };

    let on_cancel = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    let options = ModalOptions::titled(props.title.to_string()).size(props.size);
    let current = controller.borrow();

    html! {
        <Modal is_open={props.is_open} on_close={props.on_close.clone()} {options}>
            <form class="modal-form" onsubmit={on_submit}>
                {for props.fields.iter().map(|field| render_field(field, &current, &write_field))}

                {props.children.clone()}

                <div class="modal-actions">
                    <button
                        type="button"
                        class="btn btn-secondary"
                        onclick={on_cancel}
                        disabled={props.is_loading}
                    >
                        {props.cancel_text.clone()}
                    </button>
                    <button type="submit" class="btn btn-primary" disabled={props.is_loading}>
                        {if props.is_loading {
                            AttrValue::from("Saving...")
                        } else {
                            props.submit_text.clone()
                        }}
                    </button>
                </div>
            </form>
        </Modal>
    }
}

fn render_field(
    field: &FieldDescriptor,
    controller: &FormController,
    write_field: &Callback<(String, DraftValue)>,
) -> Html {
    let id = format!("field-{}", field.name.replace('.', "-"));
    let value = controller.read_field(&field.name);

    let input = match field.kind {
        FieldKind::Select => {
            let onchange = {
                let field = field.clone();
                let write_field = write_field.clone();
                Callback::from(move |e: Event| {
                    let select: HtmlSelectElement = e.target_unchecked_into();
                    write_field.emit((field.name.clone(), field.value_from_input(select.value(), false)));
                })
            };
            html! {
                <select id={id.clone()} name={field.name.clone()} required={field.required} {onchange}>
                    <option value="" selected={value.is_empty()}>
                        {field.placeholder.clone().unwrap_or_else(|| format!("Select {}", field.label))}
                    </option>
                    {for field.options.iter().map(|option| html! {
                        <option value={option.value.clone()} selected={option.value == value}>
                            {option.label.clone()}
                        </option>
                    })}
                </select>
            }
        }
        FieldKind::TextArea => {
            let oninput = {
                let field = field.clone();
                let write_field = write_field.clone();
                Callback::from(move |e: InputEvent| {
                    let textarea: HtmlTextAreaElement = e.target_unchecked_into();
                    write_field.emit((field.name.clone(), field.value_from_input(textarea.value(), false)));
                })
            };
            html! {
                <textarea
                    id={id.clone()}
                    name={field.name.clone()}
                    rows={field.textarea_rows().to_string()}
                    placeholder={field.placeholder.clone()}
                    required={field.required}
                    {value}
                    {oninput}
                />
            }
        }
        FieldKind::Checkbox => {
            let onchange = {
                let field = field.clone();
                let write_field = write_field.clone();
                Callback::from(move |e: Event| {
                    let input: HtmlInputElement = e.target_unchecked_into();
                    write_field.emit((field.name.clone(), field.value_from_input(input.value(), input.checked())));
                })
            };
            let checked = controller.draft().read_bool(&field.name);
            return html! {
                <div class="form-group form-check" key={field.name.clone()}>
                    <input type="checkbox" id={id.clone()} name={field.name.clone()} {checked} {onchange} />
                    <label for={id}>{field.label.clone()}</label>
                </div>
            };
        }
        _ => {
            let oninput = {
                let field = field.clone();
                let write_field = write_field.clone();
                Callback::from(move |e: InputEvent| {
                    let input: HtmlInputElement = e.target_unchecked_into();
                    write_field.emit((field.name.clone(), field.value_from_input(input.value(), false)));
                })
            };
            html! {
                <input
                    type={field.kind.input_type()}
                    id={id.clone()}
                    name={field.name.clone()}
                    placeholder={field.placeholder.clone()}
                    required={field.required}
                    {value}
                    {oninput}
                />
            }
        }
    };

    html! {
        <div class="form-group" key={field.name.clone()}>
            <label for={id}>
                {field.label.clone()}
                {if field.required { html! { <span class="required">{" *"}</span> } } else { html! {} }}
            </label>
            {input}
        </div>
    }
}
