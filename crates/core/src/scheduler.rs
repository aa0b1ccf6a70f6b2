//! Native session guard with a cancellable background refresh task

use crate::client::AuthClient;
use crate::config::AuthConfig;
use crate::guard::{GuardMachine, GuardState, GuardView, Requirement, SessionManager};
use crate::routes::AppRoute;
use crate::store::TokenStore;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Owns one guard instance: the mount check, the recurring refresh and its
/// cancellation. Dropping the guard unmounts it.
pub struct SessionGuard<S, C> {
    manager: Arc<SessionManager<S, C>>,
    machine: Arc<Mutex<GuardMachine>>,
    views: watch::Sender<GuardView>,
    interval: Duration,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl<S, C> SessionGuard<S, C>
where
    S: TokenStore + 'static,
    C: AuthClient + 'static,
{
    pub fn new(manager: Arc<SessionManager<S, C>>, requirement: impl Into<Requirement>) -> Self {
        let machine = GuardMachine::new(requirement);
        let (views, _) = watch::channel(machine.view());
        Self {
            manager,
            machine: Arc::new(Mutex::new(machine)),
            views,
            interval: AuthConfig::REFRESH_INTERVAL,
            cancel: CancellationToken::new(),
            task: None,
        }
    }

    /// Override the recurring refresh period
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn state(&self) -> GuardState {
        lock(&self.machine).state()
    }

    pub fn view(&self) -> GuardView {
        lock(&self.machine).view()
    }

    /// Watch view changes made by the background refresh
    pub fn subscribe(&self) -> watch::Receiver<GuardView> {
        self.views.subscribe()
    }

    /// Whether the recurring refresh task is alive
    pub fn is_refreshing(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Run the mount check and, if children are shown, start the recurring refresh
    ///
    /// A guard cannot be remounted: after [`Self::unmount`] this returns
    /// `Redirect(Login)` without checking the session.
    pub async fn mount(&mut self) -> GuardView {
        if self.cancel.is_cancelled() {
            debug!("Mount after unmount refused");
            let view = GuardView::Redirect(AppRoute::Login);
            self.views.send_replace(view);
            return view;
        }
        let outcome = self.manager.check().await;
        let (view, wants_refresh) = {
            let mut machine = lock(&self.machine);
            let view = machine.apply(outcome);
            (view, machine.wants_refresh())
        };
        self.views.send_replace(view);

        if wants_refresh && self.task.is_none() {
            self.task = Some(self.spawn_refresh());
        }
        view
    }

    /// Cancel the recurring refresh. Idempotent.
    pub fn unmount(&mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            task.abort();
            debug!("Guard unmounted, refresh cancelled");
        }
    }

    fn spawn_refresh(&self) -> JoinHandle<()> {
        let manager = self.manager.clone();
        let machine = self.machine.clone();
        let views = self.views.clone();
        let cancel = self.cancel.clone();
        let period = self.interval;

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    () = cancel.cancelled() => break,
                    _ = ticker.tick() => {}
                }

                let outcome = tokio::select! {
                    () = cancel.cancelled() => break,
                    outcome = manager.check() => outcome,
                };

                let (view, keep_going) = {
                    let mut machine = lock(&machine);
                    let view = machine.apply(outcome);
                    (view, machine.wants_refresh())
                };
                views.send_replace(view);

                if !keep_going {
                    info!(?view, "Background refresh stopped");
                    break;
                }
            }
        })
    }
}

impl<S, C> Drop for SessionGuard<S, C> {
    fn drop(&mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

fn lock(machine: &Mutex<GuardMachine>) -> MutexGuard<'_, GuardMachine> {
    machine.lock().unwrap_or_else(|e| e.into_inner())
}
