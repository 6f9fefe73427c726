use shared::{ModalOptions, ModalSize};
use web_sys::MouseEvent;
use yew::prelude::*;

use crate::components::modal::Modal;

#[derive(Clone, Copy, Default, PartialEq)]
pub enum ConfirmVariant {
    #[default]
    Destructive,
    Primary,
}

impl ConfirmVariant {
    fn button_class(&self) -> &'static str {
        match self {
            ConfirmVariant::Destructive => "btn btn-danger",
            ConfirmVariant::Primary => "btn btn-primary",
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct ConfirmationModalProps {
    pub is_open: bool,
    pub on_close: Callback<()>,
    pub on_confirm: Callback<()>,
    pub title: AttrValue,
    #[prop_or_default]
    pub message: Option<AttrValue>,
    #[prop_or(AttrValue::from("Confirm"))]
    pub confirm_text: AttrValue,
    #[prop_or(AttrValue::from("Cancel"))]
    pub cancel_text: AttrValue,
    #[prop_or_default]
    pub variant: ConfirmVariant,
    #[prop_or_default]
    pub is_loading: bool,
    #[prop_or_default]
    pub children: Html,
}

#[function_component(ConfirmationModal)]
pub fn confirmation_modal(props: &ConfirmationModalProps) -> Html {
    let on_cancel = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    let on_confirm = {
        let on_confirm = props.on_confirm.clone();
        Callback::from(move |_: MouseEvent| on_confirm.emit(()))
    };

    let options = ModalOptions::titled(props.title.to_string()).size(ModalSize::Md);

    html! {
        <Modal is_open={props.is_open} on_close={props.on_close.clone()} {options}>
            <div class="confirmation">
                {if let Some(message) = props.message.clone() {
                    html! { <p class="confirmation-message">{message}</p> }
                } else { html! {} }}

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
                    <button
                        type="button"
                        class={props.variant.button_class()}
                        onclick={on_confirm}
                        disabled={props.is_loading}
                    >
                        {if props.is_loading {
                            AttrValue::from("Working...")
                        } else {
                            props.confirm_text.clone()
                        }}
                    </button>
                </div>
            </div>
        </Modal>
    }
}
