use crate::auth::use_session;
use koov_core::PasswordChange;
use tracing::{info, warn};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Clone, Copy, PartialEq)]
enum Field {
    Old,
    New,
    Confirm,
}

#[function_component(ChangePasswordPage)]
pub fn change_password_page() -> Html {
    let session = use_session();
    let navigator = use_navigator();
    let form = use_state(PasswordChange::default);
    let error = use_state(|| None::<String>);
    let done = use_state(|| false);

    let on_input = |field: Field| {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let value = e.target_unchecked_into::<HtmlInputElement>().value();
            let mut next = (*form).clone();
            match field {
                Field::Old => next.old_password = value,
                Field::New => next.new_password = value,
                Field::Confirm => next.confirm_password = value,
            }
            form.set(next);
        })
    };

    let on_submit = {
        let form = form.clone();
        let error = error.clone();
        let done = done.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            error.set(None);
            done.set(false);

            let change = (*form).clone();
            let session = session.clone();
            let navigator = navigator.clone();
            let form = form.clone();
            let error = error.clone();
            let done = done.clone();
            spawn_local(async move {
                match session.manager().change_password(&change).await {
                    Ok(()) => {
                        info!("Password changed");
                        form.set(PasswordChange::default());
                        done.set(true);
                        if let Some(navigator) = navigator {
                            navigator.back();
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "Password change rejected");
                        error.set(Some(e.user_message().unwrap_or_else(|| e.to_string())));
                    }
                }
            });
        })
    };

    html! {
        <div class="w-full flex justify-center">
            <form class="w-full max-w-md bg-white dark:bg-gray-800 rounded-lg shadow p-6 space-y-4" onsubmit={on_submit}>
                <h1 class="text-xl font-bold">{"Change Password"}</h1>
                <p class="text-sm text-gray-600 dark:text-gray-400">{"Enter your old password and choose a new one"}</p>

                { password_input("old-password", "Old Password", &form.old_password, on_input(Field::Old)) }
                { password_input("new-password", "New Password", &form.new_password, on_input(Field::New)) }
                { password_input("confirm-password", "Confirm New Password", &form.confirm_password, on_input(Field::Confirm)) }

                if let Some(message) = (*error).clone() {
                    <p class="text-sm text-red-600">{ message }</p>
                }
                if *done {
                    <p class="text-sm text-green-600">{"Password changed successfully"}</p>
                }

                <button type="submit" class="w-full bg-blue-600 text-white rounded py-2">{"Change Password"}</button>
            </form>
        </div>
    }
}

fn password_input(id: &'static str, label: &'static str, value: &str, oninput: Callback<InputEvent>) -> Html {
    html! {
        <div class="space-y-1">
            <label for={id} class="text-sm font-medium">{ label }</label>
            <input {id} type="password" class="w-full border rounded px-3 py-2"
                value={value.to_string()} {oninput} />
        </div>
    }
}
