/**
 * View Identifiers
 *
 * Every screen the host shell can route to. The gate only cares whether a
 * view is protected; `path()` is the route the shell mounts it under.
 */

use serde::{Deserialize, Serialize};

/// Routable view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum View {
    /// Landing page
    Home,
    About,
    Contact,
    Privacy,
    Terms,
    SignIn,
    SignUp,
    /// First-time profile form
    ProfileSetup,
    /// Health overview
    Dashboard,
    Profile,
    Symptoms,
}

impl View {
    pub const ALL: [View; 11] = [
        View::Home,
        View::About,
        View::Contact,
        View::Privacy,
        View::Terms,
        View::SignIn,
        View::SignUp,
        View::ProfileSetup,
        View::Dashboard,
        View::Profile,
        View::Symptoms,
    ];

    /// Whether entering this view requires a signed-in user
    pub fn is_protected(self) -> bool {
        matches!(
            self,
            View::ProfileSetup | View::Dashboard | View::Profile | View::Symptoms
        )
    }

    pub fn path(self) -> &'static str {
        match self {
            View::Home => "/",
            View::About => "/about",
            View::Contact => "/contact",
            View::Privacy => "/privacy",
            View::Terms => "/terms",
            View::SignIn => "/signin",
            View::SignUp => "/signup",
            View::ProfileSetup => "/profile-setup",
            View::Dashboard => "/dashboard",
            View::Profile => "/profile",
            View::Symptoms => "/symptoms",
        }
    }

    pub fn from_path(path: &str) -> Option<View> {
        let trimmed = path.trim_end_matches('/');
        let path = if trimmed.is_empty() { "/" } else { trimmed };
        View::ALL.into_iter().find(|view| view.path() == path)
    }
}
