use shared::{Credentials, ModalOptions, ModalSize};
use web_sys::MouseEvent;
use yew::prelude::*;

use crate::components::modal::Modal;

#[derive(Properties, PartialEq)]
pub struct CredentialsModalProps {
    pub is_open: bool,
    pub on_close: Callback<()>,
    pub credentials: Option<Credentials>,
    #[prop_or(AttrValue::from("Account Created Successfully!"))]
    pub title: AttrValue,
    #[prop_or(AttrValue::from("Account"))]
    pub entity_type: AttrValue,
    /// Replaces the default "{entity} Created" heading
    #[prop_or_default]
    pub heading: Option<AttrValue>,
    /// Replaces the default "... has been created" notice
    #[prop_or_default]
    pub message: Option<AttrValue>,
    #[prop_or_default]
    pub on_copy: Option<Callback<()>>,
    #[prop_or_default]
    pub on_print: Option<Callback<()>>,
}

fn heading_text(heading: Option<&AttrValue>, entity_type: &str) -> String {
    match heading {
        Some(heading) => heading.to_string(),
        None => format!("{} Created", entity_type),
    }
}

fn message_text(message: Option<&AttrValue>, entity_type: &str) -> String {
    match message {
        Some(message) => message.to_string(),
        None => format!(
            "{} has been created successfully. Please share these login credentials securely.",
            entity_type.to_lowercase()
        ),
    }
}

#[function_component(CredentialsModal)]
pub fn credentials_modal(props: &CredentialsModalProps) -> Html {
    let Some(credentials) = props.credentials.as_ref() else {
        return html! {};
    };

    let on_done = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    let heading = heading_text(props.heading.as_ref(), &props.entity_type);
    let message = message_text(props.message.as_ref(), &props.entity_type);

    let options = ModalOptions::titled(props.title.to_string()).size(ModalSize::Lg);

    html! {
        <Modal is_open={props.is_open} on_close={props.on_close.clone()} {options}>
            <div class="credentials">
                <div class="notice notice-success">
                    <h3>{heading}</h3>
                    <p>{message}</p>
                </div>

                <div class="notice notice-info">
                    <h4>{"Login Credentials"}</h4>
                    <dl class="credentials-list">
                        {for credentials.rows().into_iter().map(|(label, value)| {
                            let value_class = match label {
                                "Username" | "Password" => "mono",
                                _ => "",
                            };
                            html! {
                                <div class={classes!("credentials-row", (label == "Password").then_some("highlight"))}>
                                    <dt>{format!("{}:", label)}</dt>
                                    <dd class={value_class}>{value.to_string()}</dd>
                                </div>
                            }
                        })}
                    </dl>
                </div>

                <div class="modal-actions">
                    {if let Some(on_copy) = props.on_copy.clone() {
                        html! {
                            <button type="button" class="btn btn-secondary"
                                onclick={Callback::from(move |_: MouseEvent| on_copy.emit(()))}>
                                {"Copy Credentials"}
                            </button>
                        }
                    } else { html! {} }}
                    {if let Some(on_print) = props.on_print.clone() {
                        html! {
                            <button type="button" class="btn btn-secondary"
                                onclick={Callback::from(move |_: MouseEvent| on_print.emit(()))}>
                                {"Print Credentials"}
                            </button>
                        }
                    } else { html! {} }}
                    <button type="button" class="btn btn-primary" onclick={on_done}>
                        {"Done"}
                    </button>
                </div>
            </div>
        </Modal>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_heading_defaults_to_created() {
        assert_eq!(heading_text(None, "Teacher"), "Teacher Created");
        assert_eq!(
            message_text(None, "Teacher"),
            "teacher has been created successfully. Please share these login credentials securely."
        );
    }

    #[wasm_bindgen_test]
    fn test_heading_override_for_existing_accounts() {
        let heading = AttrValue::from("Login Details");
        assert_eq!(heading_text(Some(&heading), "Student"), "Login Details");
    }
}
