//! Static table of the application's screens and their access metadata.
//!
//! Lookups only. Nothing here enforces `requires_auth` or `role`; navigation
//! is not guarded.

use aerodesk_common::auth::Role;
use serde::Serialize;

/// Redirect chains longer than this are treated as a loop.
const MAX_REDIRECTS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteMeta {
    pub requires_auth: bool,
    /// Role the screen is meant for; `None` means any role.
    pub role: Option<Role>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Route {
    pub path: &'static str,
    pub name: Option<&'static str>,
    /// Screen rendered for this path. Redirect-only routes have none.
    pub view: Option<&'static str>,
    pub redirect: Option<&'static str>,
    pub meta: RouteMeta,
}

const PUBLIC: RouteMeta = RouteMeta { requires_auth: false, role: None };

const fn screen(
    path: &'static str,
    name: &'static str,
    view: &'static str,
    meta: RouteMeta,
) -> Route {
    Route { path, name: Some(name), view: Some(view), redirect: None, meta }
}

const fn authed(role: Option<Role>) -> RouteMeta {
    RouteMeta { requires_auth: true, role }
}

pub static ROUTES: &[Route] = &[
    Route { path: "/", name: None, view: None, redirect: Some("/login"), meta: PUBLIC },
    screen("/login", "login", "LoginView", PUBLIC),
    screen("/register", "register", "RegisterView", PUBLIC),
    screen("/forgot-password", "forgot-password", "ForgotPasswordView", PUBLIC),
    screen("/user", "user", "UserView", authed(Some(Role::User))),
    screen("/service", "service", "ServiceView", authed(Some(Role::Service))),
    screen("/admin", "admin", "AdminView", authed(Some(Role::Admin))),
    screen("/profile", "profile", "ProfileView", authed(None)),
];

/// Exact path match. A single trailing slash is ignored.
pub fn find_route(path: &str) -> Option<&'static Route> {
    let path = match path.strip_suffix('/') {
        Some(trimmed) if !trimmed.is_empty() => trimmed,
        _ => path,
    };
    ROUTES.iter().find(|r| r.path == path)
}

/// Follow redirects to the route that actually renders.
///
/// Returns `None` for unknown paths and for redirect chains that do not settle.
pub fn resolve(path: &str) -> Option<&'static Route> {
    let mut route = find_route(path)?;
    for _ in 0..MAX_REDIRECTS {
        match route.redirect {
            Some(target) => route = find_route(target)?,
            None => return Some(route),
        }
    }
    tracing::warn!(path, "Redirect loop in route table");
    None
}

/// Landing screen for a role after login.
pub fn home_route(role: Role) -> Option<&'static Route> {
    ROUTES.iter().find(|r| r.meta.role == Some(role))
}
