//! Staff registration and login
//!
//! Login produces an explicit `Session` value that callers pass to whatever
//! needs to know who is operating the desk.

use crate::core::traits::{Record, RecordStore};
use crate::types::{RentalError, StaffAccount};
use tracing::{info, warn};

/// The logged-in operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    username: String,
}

impl Session {
    pub fn username(&self) -> &str {
        &self.username
    }
}

/// Registration and login over an account store
pub struct AccountDirectory<'a, S> {
    store: &'a S,
}

impl<'a, S: RecordStore<StaffAccount>> AccountDirectory<'a, S> {
    pub fn new(store: &'a S) -> Self {
        AccountDirectory { store }
    }

    /// Register a new staff account
    ///
    /// # Errors
    ///
    /// - `Validation` if username or password is empty
    /// - `DuplicateKey` if the username is taken (nothing is written)
    pub fn register(&self, username: &str, password: &str) -> Result<StaffAccount, RentalError> {
        let account = StaffAccount::new(username, password)?;

        if !self.store.append_unique(account.clone())? {
            warn!(username, "registration rejected, username taken");
            return Err(RentalError::duplicate_key(
                StaffAccount::COLLECTION,
                username,
            ));
        }

        info!(username, "registered staff account");
        Ok(account)
    }

    /// Check credentials and open a session
    pub fn login(&self, username: &str, password: &str) -> Result<Session, RentalError> {
        let accounts = self.store.load_all()?;
        if !accounts.iter().any(|a| a.matches(username, password)) {
            warn!(username, "login failed");
            return Err(RentalError::InvalidCredentials);
        }

        info!(username, "logged in");
        Ok(Session {
            username: username.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::memory_store::MemoryStore;
    use rstest::rstest;

    #[test]
    fn test_register_then_login() {
        let store: MemoryStore<StaffAccount> = MemoryStore::new();
        let directory = AccountDirectory::new(&store);

        directory.register("alice", "s3cret").unwrap();
        let session = directory.login("alice", "s3cret").unwrap();

        assert_eq!(session.username(), "alice");
    }

    #[test]
    fn test_register_duplicate_leaves_store_unchanged() {
        let store: MemoryStore<StaffAccount> = MemoryStore::new();
        let directory = AccountDirectory::new(&store);

        directory.register("alice", "s3cret").unwrap();
        let err = directory.register("alice", "other").unwrap_err();

        assert_eq!(err, RentalError::duplicate_key("accounts", "alice"));
        let accounts = store.load_all().unwrap();
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].password(), "s3cret");
    }

    #[rstest]
    #[case::empty_username("", "pw")]
    #[case::empty_password("alice", "")]
    fn test_register_requires_fields(#[case] username: &str, #[case] password: &str) {
        let store: MemoryStore<StaffAccount> = MemoryStore::new();
        let directory = AccountDirectory::new(&store);

        assert!(matches!(
            directory.register(username, password),
            Err(RentalError::Validation { .. })
        ));
        assert!(store.load_all().unwrap().is_empty());
    }

    #[rstest]
    #[case::wrong_password("alice", "nope")]
    #[case::unknown_user("mallory", "s3cret")]
    fn test_login_rejects_bad_credentials(#[case] username: &str, #[case] password: &str) {
        let store = MemoryStore::with_records(vec![StaffAccount::new("alice", "s3cret").unwrap()]);
        let directory = AccountDirectory::new(&store);

        assert_eq!(
            directory.login(username, password).unwrap_err(),
            RentalError::InvalidCredentials
        );
    }
}
