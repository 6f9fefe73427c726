use web_sys::MouseEvent;
use yew::prelude::*;

mod components;
mod config;
mod hooks;
mod pages;
mod services;

use pages::teacher_dashboard::TeacherDashboard;
use services::logging::Logger;

#[function_component(App)]
fn app() -> Html {
    let config = use_memo((), |_| config::load());
    let signed_in = use_state(|| true);

    let on_logout = {
        let signed_in = signed_in.clone();
        Callback::from(move |_: ()| {
            Logger::info_with_component("app", "Signed out");
            signed_in.set(false);
        })
    };

    let on_sign_in = {
        let signed_in = signed_in.clone();
        Callback::from(move |_: MouseEvent| {
            Logger::info_with_component("app", "Starting a new session");
            signed_in.set(true);
        })
    };

    if *signed_in {
        html! {
            <TeacherDashboard config={(*config).clone()} {on_logout} />
        }
    } else {
        html! {
            <div class="signed-out">
                <h1>{config.app_name.clone()}</h1>
                <p>{"You have been logged out."}</p>
                <button type="button" class="btn btn-primary" onclick={on_sign_in}>
                    {"Sign in again"}
                </button>
            </div>
        }
    }
}

fn main() {
    let config = config::load();
    Logger::init(config.log_level);
    Logger::info_with_component(
        "app",
        &format!("Starting {} against {}", config.app_name, config.api_base_url),
    );

    yew::Renderer::<App>::new().render();
}
