//! Connected employee identity.

use serde::{Deserialize, Serialize};

/// The identity carried by a session: at minimum an email address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    email: String,
}

impl Employee {
    /// Creates an identity from an email address.
    #[must_use]
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }

    /// Returns the email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }
}

impl std::fmt::Display for Employee {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_employee_email() {
        let employee = Employee::new("employee@test.tld");
        assert_eq!(employee.email(), "employee@test.tld");
        assert_eq!(employee.to_string(), "employee@test.tld");
    }
}
