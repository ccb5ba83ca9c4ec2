use std::collections::HashSet;

use log::{debug, info};
use rust_decimal::Decimal;

use crate::accounts::{Account, AccountKind};
use crate::customers::Customer;
use crate::error::{BankError, BankResult};

/// Owns every customer and, through them, every account.
///
/// Lookups are linear scans over customers and their accounts, so
/// resolving an account number costs O(customers * accounts).
#[derive(Debug, Default, Clone)]
pub struct Bank {
    customers: Vec<Customer>,
}

impl Bank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a customer. Fails without inserting anything if one of the
    /// customer's account numbers is already taken.
    pub fn add_customer(&mut self, customer: Customer) -> BankResult<()> {
        {
            let mut seen = HashSet::new();
            for account in customer.accounts() {
                let number = account.number();
                if !seen.insert(number) || self.find_account(number).is_some() {
                    return Err(BankError::DuplicateAccount(number.to_string()));
                }
            }
        }
        info!(
            "registered customer {} with {} account(s)",
            customer.username,
            customer.accounts().len()
        );
        self.customers.push(customer);
        Ok(())
    }

    /// Attaches a new account to an existing customer.
    pub fn open_account(&mut self, username: &str, account: Account) -> BankResult<()> {
        if self.find_account(account.number()).is_some() {
            return Err(BankError::DuplicateAccount(account.number().to_string()));
        }
        let customer = self
            .customers
            .iter_mut()
            .find(|c| c.username == username)
            .ok_or_else(|| BankError::CustomerNotFound(username.to_string()))?;
        debug!("opened {} account {} for {}", account.kind(), account.number(), username);
        customer.add_account(account);
        Ok(())
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    /// First customer whose credential matches.
    pub fn authenticate(&self, username: &str, secret: &str) -> BankResult<&Customer> {
        self.customers
            .iter()
            .find(|c| c.authenticate(username, secret))
            .ok_or_else(|| BankError::AuthenticationFailure(username.to_string()))
    }

    /// Every account in registration order.
    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.customers.iter().flat_map(|c| c.accounts().iter())
    }

    pub fn find_account(&self, number: &str) -> Option<&Account> {
        self.accounts().find(|a| a.number() == number)
    }

    pub fn find_account_mut(&mut self, number: &str) -> Option<&mut Account> {
        self.customers
            .iter_mut()
            .flat_map(|c| c.accounts_mut().iter_mut())
            .find(|a| a.number() == number)
    }

    /// Like [`Bank::find_account`], but a miss is an `AccountNotFound` error.
    pub fn account(&self, number: &str) -> BankResult<&Account> {
        self.find_account(number)
            .ok_or_else(|| BankError::AccountNotFound(number.to_string()))
    }

    pub fn account_mut(&mut self, number: &str) -> BankResult<&mut Account> {
        self.find_account_mut(number)
            .ok_or_else(|| BankError::AccountNotFound(number.to_string()))
    }

    /// Applies interest to every savings account the customer owns.
    /// Returns the numbers of the accounts that were credited.
    pub fn apply_interest_all(&mut self, username: &str) -> BankResult<Vec<String>> {
        let customer = self
            .customers
            .iter_mut()
            .find(|c| c.username == username)
            .ok_or_else(|| BankError::CustomerNotFound(username.to_string()))?;

        let mut credited = Vec::new();
        for account in customer.accounts_mut() {
            if matches!(account.kind(), AccountKind::Savings { .. }) {
                let interest = account.apply_interest()?;
                if interest > Decimal::ZERO {
                    credited.push(account.number().to_string());
                }
            }
        }
        info!("interest applied to {} account(s) of {}", credited.len(), username);
        Ok(credited)
    }
}
