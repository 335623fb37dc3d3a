//! Staff account type for the rental desk
//!
//! Accounts identify the office staff who operate the desk. They are created
//! at registration and never updated or deleted afterwards.

use super::error::RentalError;

/// Office staff login
///
/// The password is stored verbatim and compared as plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffAccount {
    username: String,
    password: String,
}

impl StaffAccount {
    /// Create a new account
    ///
    /// # Errors
    ///
    /// Returns a `Validation` error if either field is empty.
    pub fn new(username: &str, password: &str) -> Result<Self, RentalError> {
        if username.is_empty() {
            return Err(RentalError::required("username"));
        }
        if password.is_empty() {
            return Err(RentalError::required("password"));
        }

        Ok(StaffAccount {
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    /// The unique login name (identity field)
    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// Exact comparison of both username and password
    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}
