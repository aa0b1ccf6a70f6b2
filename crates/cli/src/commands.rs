use crate::config::Settings;
use anyhow::{Context, Result, anyhow, bail};
use clap::Subcommand;
use koov_core::{
    AppRoute, Credentials, FileStore, GuardView, PasswordChange, Requirement, Role,
    SessionGuard, SessionManager, landing_path,
};
use koov_http::HttpAuthClient;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use tracing::{info, warn};

pub type Manager = SessionManager<FileStore, HttpAuthClient>;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in and store the session
    Login {
        /// Job ID
        #[arg(long, short = 'j', conflicts_with = "demo")]
        job_id: Option<String>,

        /// Password (prompted on stdin when omitted)
        #[arg(long, short = 'p', env = "KOOV_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        /// Log in with the preset account for a role
        #[arg(long, value_name = "ROLE")]
        demo: Option<Role>,
    },

    /// Log out and clear the stored session
    Logout,

    /// Show the stored user without contacting the server
    Whoami,

    /// Rotate the stored tokens once
    Refresh,

    /// Keep the session alive until interrupted
    Watch {
        /// Require this role; defaults to the stored user's role
        #[arg(long)]
        role: Option<Role>,
    },

    /// Change the account password
    ChangePassword {
        #[arg(long, env = "KOOV_OLD_PASSWORD", hide_env_values = true)]
        old: Option<String>,

        #[arg(long, env = "KOOV_NEW_PASSWORD", hide_env_values = true)]
        new: Option<String>,

        /// Defaults to a second prompt
        #[arg(long)]
        confirm: Option<String>,
    },
}

impl Commands {
    pub async fn execute(self, manager: Arc<Manager>, settings: &Settings) -> Result<()> {
        match self {
            Commands::Login {
                job_id,
                password,
                demo,
            } => login(&manager, settings, job_id, password, demo).await,
            Commands::Logout => {
                manager.logout().await;
                println!("Logged out");
                Ok(())
            }
            Commands::Whoami => whoami(&manager),
            Commands::Refresh => {
                manager
                    .refresh()
                    .await
                    .map_err(|e| anyhow!("{e}; log in again"))?;
                println!("Session refreshed");
                Ok(())
            }
            Commands::Watch { role } => watch(manager, settings, role).await,
            Commands::ChangePassword { old, new, confirm } => {
                let old = secret_or_prompt(old, "Current password")?;
                let new = secret_or_prompt(new, "New password")?;
                let confirm = secret_or_prompt(confirm, "Confirm new password")?;
                manager
                    .change_password(&PasswordChange::new(old, new, confirm))
                    .await?;
                println!("Password changed");
                Ok(())
            }
        }
    }
}

async fn login(
    manager: &Manager,
    settings: &Settings,
    job_id: Option<String>,
    password: Option<String>,
    demo: Option<Role>,
) -> Result<()> {
    let credentials = match demo {
        Some(role) => {
            if !settings.demo_logins {
                bail!("Demo logins are disabled; set demo_logins = true to enable them");
            }
            Credentials::demo(role)
        }
        None => {
            let job_id = value_or_prompt(job_id, "Job ID")?;
            let password = secret_or_prompt(password, "Password")?;
            Credentials::new(job_id, password)
        }
    };

    let session = manager.login(&credentials).await?;
    info!(job_id = %session.user.job_id, role = %session.role(), "Logged in");
    println!(
        "Welcome, {} ({}). Landing page: {}",
        session.user.name,
        session.role(),
        landing_path(session.role())
    );
    Ok(())
}

fn whoami(manager: &Manager) -> Result<()> {
    let user = manager
        .sessions()
        .user()
        .context("stored session is unreadable")?;
    let Some(user) = user else {
        println!("Not logged in");
        return Ok(());
    };

    println!("Name:    {}", user.name);
    println!("Job ID:  {}", user.job_id);
    println!("Role:    {}", user.role);
    if let Some(area) = &user.area {
        println!("Area:    {area}");
    }
    if let Some(total) = user.total_target_completed {
        println!("Target:  {total}");
    }
    println!("Home:    {}", landing_path(user.role));
    Ok(())
}

async fn watch(manager: Arc<Manager>, settings: &Settings, role: Option<Role>) -> Result<()> {
    let requirement = match role {
        Some(role) => Requirement::Role(role),
        None => manager
            .sessions()
            .user()
            .ok()
            .flatten()
            .map(|user| Requirement::Role(user.role))
            .unwrap_or(Requirement::Authenticated),
    };

    let mut guard = SessionGuard::new(manager, requirement).with_interval(settings.refresh_interval());
    let mut views = guard.subscribe();

    match guard.mount().await {
        GuardView::Children => {}
        GuardView::Redirect(AppRoute::Login) => bail!("Session expired; log in again"),
        GuardView::Redirect(route) => {
            bail!("Session belongs to a different area; its home is {}", route.path())
        }
        GuardView::Loading => bail!("Session check did not settle"),
    }

    println!(
        "Session active, refreshing every {}s (Ctrl-C to stop)",
        settings.refresh_interval().as_secs()
    );

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, stopping refresh");
                guard.unmount();
                return Ok(());
            }
            changed = views.changed() => {
                if changed.is_err() {
                    warn!("Guard stopped publishing views");
                    return Ok(());
                }
                if *views.borrow_and_update() == GuardView::Redirect(AppRoute::Login) {
                    guard.unmount();
                    bail!("Session expired; log in again");
                }
            }
        }
    }
}

fn value_or_prompt(value: Option<String>, label: &str) -> Result<String> {
    if let Some(value) = value {
        return Ok(value);
    }
    print!("{label}: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Like [`value_or_prompt`] but the typed input is not echoed
fn secret_or_prompt(value: Option<String>, label: &str) -> Result<String> {
    match value {
        Some(value) => Ok(value),
        None => Ok(rpassword::prompt_password(format!("{label}: "))?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(subcommand)]
        command: Commands,
    }

    #[test]
    fn parses_demo_login() {
        let cli = TestCli::try_parse_from(["koov", "login", "--demo", "admin"]).unwrap();
        match cli.command {
            Commands::Login { demo, job_id, .. } => {
                assert_eq!(demo, Some(Role::Admin));
                assert!(job_id.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_role() {
        assert!(TestCli::try_parse_from(["koov", "watch", "--role", "manager"]).is_err());
    }

    #[test]
    fn demo_conflicts_with_job_id() {
        assert!(
            TestCli::try_parse_from(["koov", "login", "--demo", "admin", "--job-id", "E1"]).is_err()
        );
    }

    #[test]
    fn value_or_prompt_prefers_given_value() {
        assert_eq!(value_or_prompt(Some("x".into()), "X").unwrap(), "x");
    }

    #[test]
    fn secret_or_prompt_prefers_given_value() {
        assert_eq!(secret_or_prompt(Some("hunter22".into()), "Password").unwrap(), "hunter22");
    }
}
