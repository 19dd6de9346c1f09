use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

/// The accounts allowed to sign in, username to password.
///
/// Passwords are held and compared as plain strings, same as the built-in
/// development accounts this wraps. TODO: back this with real account
/// storage instead of a flat file.
#[derive(Debug)]
pub struct UserDirectory {
    /// username to password
    users: HashMap<String, String>,
}

impl UserDirectory {
    /// Build a directory from username/password pairs.
    pub fn new(users: HashMap<String, String>) -> Self {
        Self { users }
    }

    /// The built-in development accounts.
    pub fn dev() -> Self {
        Self::new(HashMap::from([
            ("user1".to_string(), "password1".to_string()),
            ("user2".to_string(), "password2".to_string()),
        ]))
    }

    /// Load a directory from a JSON file shaped like
    /// `{"username": "password"}`.
    ///
    /// ## Errors
    ///
    /// Fails if the file can't be read, or if it doesn't hold a JSON
    /// object of strings.
    pub fn from_file(path: &Path) -> io::Result<Self> {
        let data = fs::read_to_string(path)?;
        let users = serde_json::from_str(&data)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;

        Ok(Self::new(users))
    }

    /// Is this username/password pair allowed in?
    pub fn check(&self, username: &str, password: &str) -> bool {
        self.users
            .get(username)
            .is_some_and(|expected| expected == password)
    }

    /// How many accounts can sign in.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Does the directory have no accounts at all?
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
