use crate::auth::{ProtectedRoute, SessionProvider};
use crate::components::Layout;
use crate::pages::{AdminPage, ChangePasswordPage, HomePage, LoginPage, ProductionPage};
use crate::theme::ThemeProvider;
use koov_core::{AppRoute, Requirement, Role};
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Clone, Copy, Routable, PartialEq, Eq, Debug)]
pub enum Route {
    #[at("/login")]
    Login,
    #[at("/")]
    Home,
    #[at("/admin")]
    Admin,
    #[at("/production")]
    Production,
    #[at("/changePassword")]
    ChangePassword,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl From<AppRoute> for Route {
    fn from(route: AppRoute) -> Self {
        match route {
            AppRoute::Login => Route::Login,
            AppRoute::Home => Route::Home,
            AppRoute::Admin => Route::Admin,
            AppRoute::Production => Route::Production,
            AppRoute::ChangePassword => Route::ChangePassword,
        }
    }
}

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <ThemeProvider>
            <SessionProvider>
                <BrowserRouter>
                    <Switch<Route> render={switch} />
                </BrowserRouter>
            </SessionProvider>
        </ThemeProvider>
    }
}

fn guarded(route: Route, requirement: Requirement, page: Html) -> Html {
    // Keyed per route so each area gets a fresh guard
    html! {
        <ProtectedRoute key={route.to_path()} {requirement}>
            <Layout>{ page }</Layout>
        </ProtectedRoute>
    }
}

fn switch(route: Route) -> Html {
    match route {
        Route::Login => html! { <LoginPage /> },
        Route::Home => guarded(route, Role::Salesperson.into(), html! { <HomePage /> }),
        Route::Admin => guarded(route, Role::Admin.into(), html! { <AdminPage /> }),
        Route::Production => guarded(route, Role::Production.into(), html! { <ProductionPage /> }),
        Route::ChangePassword => guarded(
            route,
            Requirement::Authenticated,
            html! { <ChangePasswordPage /> },
        ),
        Route::NotFound => html! { <Redirect<Route> to={Route::Login} /> },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn app_routes_match_router_paths() {
        for route in [
            AppRoute::Login,
            AppRoute::Home,
            AppRoute::Admin,
            AppRoute::Production,
            AppRoute::ChangePassword,
        ] {
            assert_eq!(Route::from(route).to_path(), route.path());
        }
    }

    #[wasm_bindgen_test]
    fn unknown_paths_fall_through_to_not_found() {
        assert_eq!(Route::recognize("/reports"), Some(Route::NotFound));
    }
}
