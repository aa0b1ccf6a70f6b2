//! Session context shared by the header, the pages and every guard

use crate::client::{Manager, build_manager};
use koov_core::UserDetails;
use std::rc::Rc;
use tracing::error;
use yew::prelude::*;

/// Signed-in user as the UI sees it
#[derive(Clone, Debug, PartialEq, Default)]
pub struct SessionData {
    pub user: Option<UserDetails>,
}

pub enum SessionAction {
    SignedIn(UserDetails),
    SignedOut,
}

impl Reducible for SessionData {
    type Action = SessionAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            SessionAction::SignedIn(user) => Rc::new(Self { user: Some(user) }),
            SessionAction::SignedOut => Rc::new(Self { user: None }),
        }
    }
}

/// Context value: UI state plus the manager that owns storage and the API
#[derive(Clone)]
pub struct SessionHandle {
    state: UseReducerHandle<SessionData>,
    manager: Rc<Manager>,
}

impl PartialEq for SessionHandle {
    fn eq(&self, other: &Self) -> bool {
        self.state == other.state && Rc::ptr_eq(&self.manager, &other.manager)
    }
}

impl SessionHandle {
    pub fn user(&self) -> Option<&UserDetails> {
        self.state.user.as_ref()
    }

    pub fn manager(&self) -> Rc<Manager> {
        self.manager.clone()
    }

    pub fn dispatch(&self, action: SessionAction) {
        self.state.dispatch(action);
    }
}

#[derive(Properties, PartialEq)]
pub struct SessionProviderProps {
    pub children: Children,
}

#[function_component(SessionProvider)]
pub fn session_provider(props: &SessionProviderProps) -> Html {
    let manager = use_memo((), |_| build_manager().map(Rc::new));
    // Seed from storage so a reload keeps the header populated
    let state = {
        let manager = manager.clone();
        use_reducer(move || SessionData {
            user: manager
                .as_ref()
                .as_ref()
                .ok()
                .and_then(|m| m.sessions().user().ok().flatten()),
        })
    };

    let manager = match manager.as_ref() {
        Ok(manager) => manager.clone(),
        Err(e) => {
            error!(error = %e, "Cannot build API client");
            return html! {
                <div class="min-h-screen flex items-center justify-center">
                    <p class="text-red-600">{"The dashboard is misconfigured. Please contact support."}</p>
                </div>
            };
        }
    };
    let handle = SessionHandle { state, manager };

    html! {
        <ContextProvider<SessionHandle> context={handle}>
            { props.children.clone() }
        </ContextProvider<SessionHandle>>
    }
}

/// Hook to use the session context
#[hook]
pub fn use_session() -> SessionHandle {
    use_context::<SessionHandle>()
        .expect("SessionHandle not found. Make sure to wrap your component with SessionProvider")
}
