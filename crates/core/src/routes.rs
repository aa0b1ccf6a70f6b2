//! Role router: where each role lands after login or a guard correction

use crate::types::Role;
use std::fmt;

/// Top-level routes the guard reads or redirects to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppRoute {
    Login,
    Home,
    Admin,
    Production,
    ChangePassword,
}

impl AppRoute {
    pub fn path(&self) -> &'static str {
        match self {
            AppRoute::Login => "/login",
            AppRoute::Home => "/",
            AppRoute::Admin => "/admin",
            AppRoute::Production => "/production",
            AppRoute::ChangePassword => "/changePassword",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = match path.trim_end_matches('/') {
            "" => "/",
            other => other,
        };
        match trimmed {
            "/login" => Some(AppRoute::Login),
            "/" => Some(AppRoute::Home),
            "/admin" => Some(AppRoute::Admin),
            "/production" => Some(AppRoute::Production),
            "/changePassword" => Some(AppRoute::ChangePassword),
            _ => None,
        }
    }
}

impl fmt::Display for AppRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Landing route for a role
pub fn landing_route(role: Role) -> AppRoute {
    match role {
        Role::Admin => AppRoute::Admin,
        Role::Production => AppRoute::Production,
        Role::Salesperson => AppRoute::Home,
    }
}

/// Landing path for a role
pub fn landing_path(role: Role) -> &'static str {
    landing_route(role).path()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_role_lands_in_its_own_area() {
        assert_eq!(landing_path(Role::Admin), "/admin");
        assert_eq!(landing_path(Role::Production), "/production");
        assert_eq!(landing_path(Role::Salesperson), "/");
    }

    #[test]
    fn mapping_is_stable() {
        for role in Role::ALL {
            assert_eq!(landing_route(role), landing_route(role));
        }
    }

    #[test]
    fn paths_parse_back() {
        for route in [
            AppRoute::Login,
            AppRoute::Home,
            AppRoute::Admin,
            AppRoute::Production,
            AppRoute::ChangePassword,
        ] {
            assert_eq!(AppRoute::from_path(route.path()), Some(route));
        }
        assert_eq!(AppRoute::from_path("/admin/"), Some(AppRoute::Admin));
        assert_eq!(AppRoute::from_path("/admin/sales"), None);
    }
}
