use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Serialize;
use thiserror::Error;

/// A named integer counter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    pub name: String,
    pub value: i64,
}

impl Account {
    pub fn new(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Errors returned by registry operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("account '{0}' already exists")]
    AlreadyExists(String),
    #[error("registry holds no accounts")]
    Empty,
    #[error("account '{0}' not found")]
    NotFound(String),
    #[error("account name must not be empty")]
    InvalidName,
    #[error("incrementing account '{0}' would overflow")]
    Overflow(String),
    #[error("registry lock poisoned")]
    Poisoned,
}

pub type Result<T> = std::result::Result<T, RegistryError>;

/// In-memory account registry.
///
/// Readers share the lock; every mutation holds the write lock for its whole
/// duration, so the existence check of `create` and the full batch of
/// `delete_many`/`increment_many` are never interleaved with other writers.
///
/// Batch operations are all-or-nothing: every name is validated before the
/// first mutation, and a failed batch leaves the registry untouched.
pub struct Registry {
    accounts: RwLock<HashMap<String, Account>>,
}

impl Registry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<String, Account>>> {
        self.accounts.read().map_err(|_| RegistryError::Poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<String, Account>>> {
        self.accounts.write().map_err(|_| RegistryError::Poisoned)
    }

    /// Insert a new account, failing if the name is taken
    pub fn create(&self, name: impl Into<String>, value: i64) -> Result<()> {
        let name = name.into();
        if name.is_empty() {
            return Err(RegistryError::InvalidName);
        }

        let mut accounts = self.write()?;
        if accounts.contains_key(&name) {
            return Err(RegistryError::AlreadyExists(name));
        }
        accounts.insert(name.clone(), Account::new(name, value));
        Ok(())
    }

    /// Names of all accounts, sorted
    pub fn list_names(&self) -> Result<Vec<String>> {
        let accounts = self.read()?;
        if accounts.is_empty() {
            return Err(RegistryError::Empty);
        }
        let mut names: Vec<String> = accounts.keys().cloned().collect();
        names.sort_unstable();
        Ok(names)
    }

    /// Snapshot of all accounts, sorted by name
    pub fn list(&self) -> Result<Vec<Account>> {
        let accounts = self.read()?;
        if accounts.is_empty() {
            return Err(RegistryError::Empty);
        }
        let mut snapshot: Vec<Account> = accounts.values().cloned().collect();
        snapshot.sort_unstable_by(|a, b| a.name.cmp(&b.name));
        Ok(snapshot)
    }

    pub fn get(&self, name: &str) -> Result<Option<Account>> {
        let accounts = self.read()?;
        Ok(accounts.get(name).cloned())
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.read()?.is_empty())
    }

    /// Delete every named account. Repeated names are deleted once.
    pub fn delete_many<S: AsRef<str>>(&self, names: &[S]) -> Result<()> {
        let mut accounts = self.write()?;
        if accounts.is_empty() {
            return Err(RegistryError::Empty);
        }
        if let Some(missing) = names
            .iter()
            .map(AsRef::as_ref)
            .find(|name| !accounts.contains_key(*name))
        {
            return Err(RegistryError::NotFound(missing.to_string()));
        }

        for name in names {
            accounts.remove(name.as_ref());
        }
        Ok(())
    }

    /// Increment every named account by one, once per occurrence in `names`
    pub fn increment_many<S: AsRef<str>>(&self, names: &[S]) -> Result<()> {
        let mut accounts = self.write()?;
        if accounts.is_empty() {
            return Err(RegistryError::Empty);
        }

        // Validate the whole batch (presence and overflow) before applying it
        let mut pending: HashMap<&str, i64> = HashMap::with_capacity(names.len());
        for name in names.iter().map(AsRef::as_ref) {
            let account = accounts
                .get(name)
                .ok_or_else(|| RegistryError::NotFound(name.to_string()))?;
            let next = pending.entry(name).or_insert(account.value);
            *next = next
                .checked_add(1)
                .ok_or_else(|| RegistryError::Overflow(name.to_string()))?;
        }

        for (name, value) in pending {
            if let Some(account) = accounts.get_mut(name) {
                account.value = value;
            }
        }
        Ok(())
    }

    /// Remove every account, returning how many were removed
    pub fn delete_all(&self) -> Result<usize> {
        let mut accounts = self.write()?;
        if accounts.is_empty() {
            return Err(RegistryError::Empty);
        }
        let removed = accounts.len();
        accounts.clear();
        Ok(removed)
    }

    /// Increment every account by one, returning how many were touched
    pub fn increment_all(&self) -> Result<usize> {
        let mut accounts = self.write()?;
        if accounts.is_empty() {
            return Err(RegistryError::Empty);
        }
        if let Some(account) = accounts.values().find(|a| a.value == i64::MAX) {
            return Err(RegistryError::Overflow(account.name.clone()));
        }
        for account in accounts.values_mut() {
            account.value += 1;
        }
        Ok(accounts.len())
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
