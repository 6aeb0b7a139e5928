//! Session accessor port definition.

use crate::domain::entities::Employee;
use crate::domain::errors::SessionError;

/// Port for the key-value session holding the connected user's identity.
///
/// Reads are synchronous: the session is local state, not a remote call.
pub trait SessionPort: Send + Sync {
    /// Returns the connected user, if a session exists.
    ///
    /// # Errors
    /// Returns an error when the session record cannot be read.
    fn current_user(&self) -> Result<Option<Employee>, SessionError>;

    /// Stores the connected user.
    ///
    /// # Errors
    /// Returns an error when the session record cannot be written.
    fn store_user(&self, employee: &Employee) -> Result<(), SessionError>;

    /// Clears the session.
    ///
    /// # Errors
    /// Returns an error when the session record cannot be removed.
    fn clear(&self) -> Result<(), SessionError>;
}

#[cfg(test)]
pub mod mock {
    use std::sync::RwLock;

    use super::*;

    /// In-memory session for testing.
    pub struct MockSession {
        user: RwLock<Option<Employee>>,
    }

    impl MockSession {
        /// Creates an empty session.
        pub fn new() -> Self {
            Self {
                user: RwLock::new(None),
            }
        }

        /// Creates a session with a connected employee.
        pub fn with_user(email: impl Into<String>) -> Self {
            Self {
                user: RwLock::new(Some(Employee::new(email))),
            }
        }
    }

    impl Default for MockSession {
        fn default() -> Self {
            Self::new()
        }
    }

    impl SessionPort for MockSession {
        fn current_user(&self) -> Result<Option<Employee>, SessionError> {
            Ok(self.user.read().unwrap().clone())
        }

        fn store_user(&self, employee: &Employee) -> Result<(), SessionError> {
            *self.user.write().unwrap() = Some(employee.clone());
            Ok(())
        }

        fn clear(&self) -> Result<(), SessionError> {
            *self.user.write().unwrap() = None;
            Ok(())
        }
    }
}
