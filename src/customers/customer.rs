use sha2::{Digest, Sha256};

use crate::accounts::Account;

/// Salted SHA-256 digest of a customer secret. The plain secret is never kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    digest: String,
}

impl Credential {
    pub fn new(username: &str, secret: &str) -> Self {
        Self {
            digest: digest(username, secret),
        }
    }

    pub fn verify(&self, username: &str, secret: &str) -> bool {
        self.digest == digest(username, secret)
    }
}

fn digest(salt: &str, secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update([0u8]);
    hasher.update(secret.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub username: String,
    pub name: String,
    pub email: String,
    credential: Credential,
    accounts: Vec<Account>,
}

impl Customer {
    pub fn new(username: &str, secret: &str, name: &str, email: &str) -> Self {
        Self {
            username: username.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            credential: Credential::new(username, secret),
            accounts: Vec::new(),
        }
    }

    /// Appends without checking numbers; the registry enforces uniqueness.
    pub fn add_account(&mut self, account: Account) {
        self.accounts.push(account);
    }

    pub fn with_account(mut self, account: Account) -> Self {
        self.add_account(account);
        self
    }

    /// Accounts in the order they were added.
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub(crate) fn accounts_mut(&mut self) -> &mut [Account] {
        &mut self.accounts
    }

    pub fn authenticate(&self, username: &str, secret: &str) -> bool {
        self.username == username && self.credential.verify(username, secret)
    }
}
