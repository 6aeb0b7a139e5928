//! Route definitions.

use serde::{Deserialize, Serialize};

/// Logical view keys the navigation collaborator understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Route {
    /// Login view.
    Login,
    /// Listing of the connected employee's bills.
    Bills,
    /// New bill submission form.
    NewBill,
    /// Admin back office. Kept for path compatibility; the employee client
    /// binds no screen to it.
    Dashboard,
}

impl Route {
    /// Returns the path fragment associated with the route.
    #[must_use]
    pub const fn as_path(self) -> &'static str {
        match self {
            Self::Login => "/",
            Self::Bills => "#employee/bills",
            Self::NewBill => "#employee/bill/new",
            Self::Dashboard => "#admin/dashboard",
        }
    }

    /// Resolves a path fragment back to a route.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        match path {
            "/" => Some(Self::Login),
            "#employee/bills" => Some(Self::Bills),
            "#employee/bill/new" => Some(Self::NewBill),
            "#admin/dashboard" => Some(Self::Dashboard),
            _ => None,
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_path())
    }
}
