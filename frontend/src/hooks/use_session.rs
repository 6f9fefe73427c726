use std::cell::RefCell;
use std::rc::Rc;

use gloo::timers::callback::Interval;
use shared::{AppConfig, SessionCheck, SessionClock};
use yew::prelude::*;

use crate::services::date_utils;
use crate::services::logging::Logger;

const CHECK_INTERVAL_MS: u32 = 1000;

#[derive(Clone, PartialEq)]
pub struct SessionState {
    /// Time left when the expiry warning was raised; `None` while no warning is showing
    pub warning_remaining_ms: Option<i64>,
}

pub struct UseSessionResult {
    pub state: SessionState,
    pub actions: UseSessionActions,
}

#[derive(Clone, PartialEq)]
pub struct UseSessionActions {
    pub extend: Callback<()>,
    pub logout: Callback<()>,
}

struct SessionTracker {
    clock: SessionClock,
    warned: bool,
    ended: bool,
}

/// Tracks the local session clock, raising the expiry warning inside the
/// configured window and logging out once the session is over
#[hook]
pub fn use_session(config: &AppConfig, on_logout: Callback<()>) -> UseSessionResult {
    let duration_secs = config.session_duration_secs;
    let warning_secs = config.session_warning_secs;

    let tracker: Rc<RefCell<SessionTracker>> = use_mut_ref(|| SessionTracker {
        clock: SessionClock::start(date_utils::now_ms(), duration_secs),
        warned: false,
        ended: false,
    });
    let warning_remaining_ms = use_state(|| Option::<i64>::None);

    {
        let tracker = tracker.clone();
        let warning_remaining_ms = warning_remaining_ms.clone();
        let on_logout = on_logout.clone();
        use_effect_with(warning_secs, move |warning_secs| {
            let warning_secs = *warning_secs;
            let interval = Interval::new(CHECK_INTERVAL_MS, move || {
                let now = date_utils::now_ms();
                let check = {
                    let mut tracker = tracker.borrow_mut();
                    if tracker.ended {
                        return;
                    }
                    let check = tracker.clock.check(now, warning_secs, tracker.warned);
                    match check {
                        SessionCheck::Warn(_) => tracker.warned = true,
                        SessionCheck::Expire => tracker.ended = true,
                        SessionCheck::Active => {}
                    }
                    check
                };

                match check {
                    SessionCheck::Expire => {
                        Logger::info_with_component("session", "Session expired");
                        on_logout.emit(());
                    }
                    SessionCheck::Warn(remaining) => {
                        Logger::warn_with_component(
                            "session",
                            &format!("Session expires in {} ms", remaining),
                        );
                        warning_remaining_ms.set(Some(remaining));
                    }
                    SessionCheck::Active => {}
                }
            });
            move || drop(interval)
        });
    }

    let extend = {
        let tracker = tracker.clone();
        let warning_remaining_ms = warning_remaining_ms.clone();
        use_callback(duration_secs, move |_, duration_secs| {
            {
                let mut tracker = tracker.borrow_mut();
                tracker.clock.extend(date_utils::now_ms(), *duration_secs);
                tracker.warned = false;
            }
            Logger::info_with_component("session", "Session extended");
            warning_remaining_ms.set(None);
        })
    };

    let logout = {
        let warning_remaining_ms = warning_remaining_ms.clone();
        use_callback(on_logout, move |_, on_logout| {
            warning_remaining_ms.set(None);
            on_logout.emit(());
        })
    };

    let state = SessionState {
        warning_remaining_ms: *warning_remaining_ms,
    };

    UseSessionResult {
        state,
        actions: UseSessionActions { extend, logout },
    }
}
