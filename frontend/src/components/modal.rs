use shared::ModalOptions;
use web_sys::MouseEvent;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ModalProps {
    pub is_open: bool,
    pub on_close: Callback<()>,
    #[prop_or_default]
    pub options: ModalOptions,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub children: Html,
}

/// Overlay shell shared by every dialog. Renders nothing while closed.
#[function_component(Modal)]
pub fn modal(props: &ModalProps) -> Html {
    if !props.is_open {
        return html! {};
    }

    let on_backdrop_click = {
        let on_close = props.on_close.clone();
        let dismissable = props.options.dismisses_on_backdrop();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            if dismissable {
                on_close.emit(());
            }
        })
    };

    // Clicks inside the dialog must not reach the backdrop
    let on_modal_click = Callback::from(|e: MouseEvent| {
        e.stop_propagation();
    });

    let on_close_button = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    let title = props.options.header_title().map(str::to_string);
    let show_header = title.is_some() || props.options.show_close_button;

    html! {
        <div class="modal-root">
            <div class="modal-backdrop" onclick={on_backdrop_click}></div>
            <div
                class={classes!("modal", props.options.size.css_class(), props.class.clone())}
                role="dialog"
                aria-modal="true"
                onclick={on_modal_click}
            >
                {if show_header {
                    html! {
                        <div class="modal-header">
                            {if let Some(title) = title {
                                html! { <h3 class="modal-title">{title}</h3> }
                            } else { html! {} }}
                            {if props.options.show_close_button {
                                html! {
                                    <button
                                        type="button"
                                        class="modal-close"
                                        aria-label="Close"
                                        onclick={on_close_button}
                                    >
                                        {"×"}
                                    </button>
                                }
                            } else { html! {} }}
                        </div>
                    }
                } else { html! {} }}
                <div class="modal-body">
                    {props.children.clone()}
                </div>
            </div>
        </div>
    }
}
