use shared::{ModalOptions, ModalSize, ViewHeader, ViewSection};
use web_sys::MouseEvent;
use yew::prelude::*;

use crate::components::modal::Modal;

#[derive(Properties, PartialEq)]
pub struct ViewModalProps {
    pub is_open: bool,
    pub on_close: Callback<()>,
    #[prop_or(AttrValue::from("Details"))]
    pub title: AttrValue,
    /// Nothing is rendered without a header
    pub header: Option<ViewHeader>,
    #[prop_or_default]
    pub sections: Vec<ViewSection>,
    /// Extra buttons rendered before Close
    #[prop_or_default]
    pub actions: Html,
    #[prop_or(ModalSize::Lg)]
    pub size: ModalSize,
}

#[function_component(ViewModal)]
pub fn view_modal(props: &ViewModalProps) -> Html {
    let Some(header) = props.header.as_ref() else {
        return html! {};
    };

    let on_close_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    let options = ModalOptions::titled(props.title.to_string()).size(props.size);

    html! {
        <Modal is_open={props.is_open} on_close={props.on_close.clone()} {options}>
            <div class="view-details">
                <div class="view-header">
                    {if let Some(photo) = header.photo() {
                        html! { <img class="avatar" src={photo.to_string()} alt="Profile" /> }
                    } else {
                        html! { <div class="avatar avatar-initial">{header.initial()}</div> }
                    }}
                    <div class="view-header-text">
                        <h3>{header.display_name("Unknown")}</h3>
                        {for header.subtitle.iter().map(|subtitle| html! {
                            <p class="view-subtitle">{subtitle.clone()}</p>
                        })}
                        {for header.details.iter().map(|details| html! {
                            <p class="view-meta">{details.clone()}</p>
                        })}
                        <div class="badges">
                            {for header.badges.iter().map(|badge| html! {
                                <span class="badge">{badge.clone()}</span>
                            })}
                        </div>
                    </div>
                </div>

                {for props.sections.iter().map(|section| html! {
                    <section key={section.key.clone()} class="view-section">
                        {for section.title.iter().map(|title| html! { <h4>{title.clone()}</h4> })}
                        <dl class="view-grid">
                            {for section.fields.iter().map(|field| html! {
                                <div key={field.key.clone()} class="view-field">
                                    <dt>{field.label.clone()}</dt>
                                    <dd>{field.display_value().to_string()}</dd>
                                </div>
                            })}
                        </dl>
                    </section>
                })}

                <div class="modal-actions">
                    {props.actions.clone()}
                    <button type="button" class="btn btn-secondary" onclick={on_close_click}>
                        {"Close"}
                    </button>
                </div>
            </div>
        </Modal>
    }
}
