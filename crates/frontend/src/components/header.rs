//! Top bar: theme toggle, signed-in user, change-password link and logout

use crate::app::Route;
use crate::auth::{SessionAction, use_session};
use crate::theme::{ThemeAction, use_theme};
use koov_core::Theme;
use tracing::info;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(Header)]
pub fn header() -> Html {
    let session = use_session();
    let theme = use_theme();
    let navigator = use_navigator();
    let menu_open = use_state(|| false);

    let toggle_theme = {
        let theme = theme.clone();
        Callback::from(move |_| theme.dispatch(ThemeAction::Toggle))
    };

    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_| menu_open.set(!*menu_open))
    };

    let on_logout = {
        let session = session.clone();
        Callback::from(move |_| {
            let manager = session.manager();
            let access_token = manager.end_session();
            info!("Signed out");
            session.dispatch(SessionAction::SignedOut);
            if let Some(navigator) = &navigator {
                navigator.push(&Route::Login);
            }
            if let Some(token) = access_token {
                spawn_local(async move { manager.revoke(&token).await });
            }
        })
    };

    let user = session.user().cloned();

    html! {
        <header class="bg-white dark:bg-gray-800 shadow-md">
            <div class="container mx-auto flex justify-between items-center px-4 py-2">
                <span class="text-lg font-semibold">{"Koov"}</span>

                <div class="flex items-center space-x-4">
                    <button
                        class="p-2 rounded hover:bg-gray-100 dark:hover:bg-gray-700"
                        onclick={toggle_theme}
                        title="Toggle theme"
                    >
                        { if theme.theme == Theme::Light { "🌙" } else { "☀️" } }
                    </button>

                    if let Some(user) = user {
                        <div class="relative">
                            <button
                                class="h-8 w-8 rounded-full bg-blue-500 text-white text-sm font-medium"
                                onclick={toggle_menu}
                            >
                                { user.initials() }
                            </button>
                            if *menu_open {
                                <div class="absolute right-0 mt-2 w-56 rounded-md bg-white dark:bg-gray-800 shadow-lg py-2">
                                    <div class="px-4 py-2 border-b border-gray-200 dark:border-gray-700">
                                        <p class="text-sm font-medium">{ user.name.clone() }</p>
                                        <p class="text-xs text-gray-500">{ format!("Job ID: {}", user.job_id) }</p>
                                    </div>
                                    <Link<Route> to={Route::ChangePassword} classes={classes!("block", "px-4", "py-2", "text-sm", "hover:bg-gray-100", "dark:hover:bg-gray-700")}>
                                        {"Change Password"}
                                    </Link<Route>>
                                    <button
                                        class="block w-full text-left px-4 py-2 text-sm text-red-600 hover:bg-gray-100 dark:hover:bg-gray-700"
                                        onclick={on_logout}
                                    >
                                        {"Log out"}
                                    </button>
                                </div>
                            }
                        </div>
                    }
                </div>
            </div>
        </header>
    }
}
