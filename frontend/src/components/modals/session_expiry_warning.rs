use gloo::timers::callback::Interval;
use shared::{format_time_remaining, Countdown, ModalOptions, ModalSize};
use web_sys::MouseEvent;
use yew::prelude::*;

use crate::components::modal::Modal;
use crate::services::date_utils;
use crate::services::logging::Logger;

const TICK_MS: u32 = 1000;

fn extend_label(is_extending: bool) -> &'static str {
    if is_extending {
        "Refreshing..."
    } else {
        "Extend Session"
    }
}

#[derive(Properties, PartialEq)]
pub struct SessionExpiryWarningProps {
    pub is_open: bool,
    /// Time left when the warning was raised
    pub time_remaining_ms: i64,
    pub on_extend: Callback<()>,
    pub on_logout: Callback<()>,
    /// Set by callers whose extend call is asynchronous
    #[prop_or_default]
    pub is_extending: bool,
}

#[function_component(SessionExpiryWarning)]
pub fn session_expiry_warning(props: &SessionExpiryWarningProps) -> Html {
    let countdown = use_state(|| Option::<Countdown>::None);
    let now = use_state(date_utils::now_ms);

    // Restart the countdown whenever a new warning is raised
    {
        let countdown = countdown.clone();
        let now = now.clone();
        use_effect_with(
            (props.is_open, props.time_remaining_ms),
            move |(is_open, time_remaining_ms)| {
                if *is_open {
                    let started = date_utils::now_ms();
                    countdown.set(Some(Countdown::new(started, *time_remaining_ms)));
                    now.set(started);
                } else {
                    countdown.set(None);
                }
                || ()
            },
        );
    }

    // Tick once a second while open
    {
        let now = now.clone();
        use_effect_with(props.is_open, move |is_open| {
            let interval = is_open.then(|| {
                Interval::new(TICK_MS, move || {
                    now.set(date_utils::now_ms());
                })
            });
            move || drop(interval)
        });
    }

    // Log out once the countdown runs out
    {
        let on_logout = props.on_logout.clone();
        let finished = props.is_open
            && countdown
                .as_ref()
                .is_some_and(|countdown| countdown.is_finished(*now));
        use_effect_with(finished, move |finished| {
            if *finished {
                Logger::info_with_component("session-expiry", "Session expired, logging out");
                on_logout.emit(());
            }
            || ()
        });
    }

    let on_extend = {
        let on_extend = props.on_extend.clone();
        Callback::from(move |_: MouseEvent| on_extend.emit(()))
    };

    let on_logout_click = {
        let on_logout = props.on_logout.clone();
        Callback::from(move |_: MouseEvent| on_logout.emit(()))
    };

    let label = match countdown.as_ref() {
        Some(countdown) => countdown.label(*now),
        None => format_time_remaining(props.time_remaining_ms),
    };

    let options = ModalOptions::titled("Session Expiring Soon")
        .size(ModalSize::Md)
        .blocking();

    html! {
        <Modal is_open={props.is_open} on_close={props.on_logout.clone()} {options}>
            <div class="session-warning">
                <p>{"Your session is about to expire. You will be logged out automatically in:"}</p>
                <p class="session-countdown">{label}</p>
                <p class="session-hint">{"Would you like to stay logged in?"}</p>

                <div class="modal-actions">
                    <button
                        type="button"
                        class="btn btn-secondary"
                        onclick={on_logout_click}
                        disabled={props.is_extending}
                    >
                        {"Logout Now"}
                    </button>
                    <button
                        type="button"
                        class="btn btn-primary"
                        onclick={on_extend}
                        disabled={props.is_extending}
                    >
                        {extend_label(props.is_extending)}
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
    fn test_extend_label() {
        assert_eq!(extend_label(false), "Extend Session");
        assert_eq!(extend_label(true), "Refreshing...");
    }
}
