//! Route guard component
//!
//! Drives a [`GuardMachine`] from the component lifecycle: one check on mount,
//! then a recurring refresh while children are shown. The interval is dropped
//! as soon as the guard stops showing children or unmounts.

use super::{SessionAction, SessionHandle, use_session};
use crate::app::Route;
use crate::components::LoadingSpinner;
use gloo::timers::callback::Interval;
use koov_core::{AuthConfig, CheckOutcome, GuardMachine, GuardView, Requirement};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::debug;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Clone, PartialEq)]
struct GuardSlot(GuardMachine);

impl Reducible for GuardSlot {
    type Action = CheckOutcome;

    fn reduce(self: Rc<Self>, outcome: Self::Action) -> Rc<Self> {
        let mut machine = self.0.clone();
        machine.apply(outcome);
        Rc::new(Self(machine))
    }
}

#[derive(Properties, PartialEq)]
pub struct ProtectedRouteProps {
    pub requirement: Requirement,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(ProtectedRoute)]
pub fn protected_route(props: &ProtectedRouteProps) -> Html {
    let session = use_session();
    let navigator = use_navigator();
    let guard = {
        let requirement = props.requirement;
        use_reducer(move || GuardSlot(GuardMachine::new(requirement)))
    };
    // Cleared on unmount so late results are dropped
    let mounted = use_mut_ref(|| false);

    {
        let session = session.clone();
        let guard = guard.clone();
        let mounted = mounted.clone();
        use_effect_with(props.requirement, move |_| {
            *mounted.borrow_mut() = true;
            run_check(session, guard, mounted.clone());
            move || *mounted.borrow_mut() = false
        });
    }

    {
        let session = session.clone();
        let guard = guard.clone();
        let mounted = mounted.clone();
        use_effect_with(guard.0.wants_refresh(), move |wants_refresh| {
            let interval = wants_refresh.then(|| {
                debug!("Starting recurring session refresh");
                Interval::new(AuthConfig::REFRESH_INTERVAL_MS, move || {
                    run_check(session.clone(), guard.clone(), mounted.clone());
                })
            });
            move || {
                if interval.is_some() {
                    debug!("Stopping recurring session refresh");
                }
                drop(interval);
            }
        });
    }

    use_effect_with(guard.0.view(), move |view| {
        if let (GuardView::Redirect(target), Some(navigator)) = (view, navigator) {
            navigator.replace(&Route::from(*target));
        }
    });

    match guard.0.view() {
        GuardView::Loading => html! { <LoadingSpinner text={"Checking session..."} /> },
        GuardView::Children => html! { <>{ props.children.clone() }</> },
        GuardView::Redirect(_) => html! {},
    }
}

fn run_check(
    session: SessionHandle,
    guard: UseReducerHandle<GuardSlot>,
    mounted: Rc<RefCell<bool>>,
) {
    let manager = session.manager();
    spawn_local(async move {
        let outcome = manager.check().await;
        if !*mounted.borrow() {
            debug!("Guard unmounted, discarding session check");
            return;
        }
        match &outcome {
            CheckOutcome::Verified { .. } => {
                if session.user().is_none() {
                    if let Ok(Some(user)) = manager.sessions().user() {
                        session.dispatch(SessionAction::SignedIn(user));
                    }
                }
            }
            CheckOutcome::Failed(_) => session.dispatch(SessionAction::SignedOut),
        }
        guard.dispatch(outcome);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use koov_core::{AppRoute, AuthError, GuardState, Role};
    use wasm_bindgen_test::*;

    fn reduce(slot: GuardSlot, outcome: CheckOutcome) -> GuardSlot {
        Rc::try_unwrap(Rc::new(slot).reduce(outcome)).unwrap_or_else(|rc| (*rc).clone())
    }

    #[wasm_bindgen_test]
    fn failure_after_children_is_terminal() {
        let slot = GuardSlot(GuardMachine::new(Role::Admin));
        let slot = reduce(slot, CheckOutcome::Verified { role: Role::Admin });
        assert!(slot.0.wants_refresh());

        let slot = reduce(
            slot,
            CheckOutcome::Failed(AuthError::RefreshFailed("401".into())),
        );
        assert_eq!(slot.0.view(), GuardView::Redirect(AppRoute::Login));
        assert!(!slot.0.wants_refresh());

        let slot = reduce(slot, CheckOutcome::Verified { role: Role::Admin });
        assert_eq!(slot.0.state(), GuardState::Unauthenticated);
    }
}
