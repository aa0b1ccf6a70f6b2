//! Sign-in form with optional demo logins

use crate::app::Route;
use crate::auth::{SessionAction, use_session};
use crate::client::demo_logins_enabled;
use koov_core::{AuthConfig, Credentials, Role, landing_route};
use tracing::info;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(LoginPage)]
pub fn login_page() -> Html {
    let session = use_session();
    let navigator = use_navigator();
    let job_id = use_state(String::new);
    let password = use_state(String::new);
    let error = use_state(|| None::<String>);
    let submitting = use_state(|| false);

    let on_job_id = {
        let job_id = job_id.clone();
        Callback::from(move |e: InputEvent| {
            job_id.set(e.target_unchecked_into::<HtmlInputElement>().value());
        })
    };

    let on_password = {
        let password = password.clone();
        Callback::from(move |e: InputEvent| {
            password.set(e.target_unchecked_into::<HtmlInputElement>().value());
        })
    };

    let on_demo = {
        let job_id = job_id.clone();
        let password = password.clone();
        Callback::from(move |e: Event| {
            let value = e.target_unchecked_into::<HtmlSelectElement>().value();
            if let Ok(role) = value.parse::<Role>() {
                let demo = Credentials::demo(role);
                job_id.set(demo.job_id);
                password.set(demo.password);
            }
        })
    };

    let on_submit = {
        let job_id = job_id.clone();
        let password = password.clone();
        let error = error.clone();
        let submitting = submitting.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let credentials = Credentials::new((*job_id).clone(), (*password).clone());
            let session = session.clone();
            let navigator = navigator.clone();
            let error = error.clone();
            let submitting = submitting.clone();

            error.set(None);
            submitting.set(true);
            spawn_local(async move {
                match session.manager().login(&credentials).await {
                    Ok(signed_in) => {
                        let role = signed_in.role();
                        info!(%role, "Signed in");
                        session.dispatch(SessionAction::SignedIn(signed_in.user));
                        if let Some(navigator) = navigator {
                            navigator.push(&Route::from(landing_route(role)));
                        }
                    }
                    Err(e) => {
                        let message = e
                            .user_message()
                            .unwrap_or_else(|| AuthConfig::LOGIN_FAILED_MESSAGE.to_string());
                        error.set(Some(message));
                    }
                }
                submitting.set(false);
            });
        })
    };

    html! {
        <div class="min-h-screen flex items-center justify-center bg-gray-50 dark:bg-gray-900">
            <form class="w-full max-w-sm bg-white dark:bg-gray-800 rounded-lg shadow p-6 space-y-4" onsubmit={on_submit}>
                <h1 class="text-2xl font-bold text-gray-900 dark:text-gray-100">{"Login"}</h1>
                <p class="text-sm text-gray-600 dark:text-gray-400">{"Enter your Job ID and password to access your dashboard"}</p>

                if demo_logins_enabled() {
                    <select class="w-full border rounded px-3 py-2" onchange={on_demo}>
                        <option value="" selected=true>{"Demo account..."}</option>
                        { for Role::ALL.iter().map(|role| html! {
                            <option value={role.as_str()}>{ role.as_str() }</option>
                        }) }
                    </select>
                }

                <div class="space-y-1">
                    <label for="job-id" class="text-sm font-medium">{"Job ID"}</label>
                    <input id="job-id" class="w-full border rounded px-3 py-2" required=true
                        value={(*job_id).clone()} oninput={on_job_id} />
                </div>
                <div class="space-y-1">
                    <label for="password" class="text-sm font-medium">{"Password"}</label>
                    <input id="password" type="password" class="w-full border rounded px-3 py-2" required=true
                        value={(*password).clone()} oninput={on_password} />
                </div>

                if let Some(message) = (*error).clone() {
                    <p class="text-sm text-red-600">{ message }</p>
                }

                <button type="submit" class="w-full bg-blue-600 text-white rounded py-2 disabled:opacity-50" disabled={*submitting}>
                    { if *submitting { "Logging in..." } else { "Login" } }
                </button>
            </form>
        </div>
    }
}
