use std::fmt;
use std::slice;
use std::sync::Arc;

use log::debug;
use rust_decimal::Decimal;

use crate::error::{BankError, BankResult};
use crate::ledger::{Clock, EntryKind, LedgerEntry, SystemClock};

/// Share of the outstanding principal charged as the monthly loan payment (1%).
pub const MONTHLY_PAYMENT_RATE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Kind-specific state. The variant decides the deposit and withdraw policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountKind {
    Savings {
        interest_rate: Decimal,
    },
    Checking {
        overdraft_limit: Decimal,
    },
    Loan {
        principal: Decimal,
        interest_rate: Decimal,
        last_computed_payment: Decimal,
    },
}

impl AccountKind {
    pub fn name(&self) -> &'static str {
        match self {
            AccountKind::Savings { .. } => "savings",
            AccountKind::Checking { .. } => "checking",
            AccountKind::Loan { .. } => "loan",
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone)]
pub struct Account {
    number: String,
    holder: String,
    opening_balance: Decimal,
    balance: Decimal,
    kind: AccountKind,
    ledger: Vec<LedgerEntry>,
    clock: Arc<dyn Clock>,
}

impl PartialEq for Account {
    fn eq(&self, other: &Self) -> bool {
        self.number == other.number
            && self.holder == other.holder
            && self.opening_balance == other.opening_balance
            && self.balance == other.balance
            && self.kind == other.kind
            && self.ledger == other.ledger
    }
}

impl Account {
    fn new(number: &str, holder: &str, opening_balance: Decimal, kind: AccountKind) -> Self {
        Self {
            number: number.to_string(),
            holder: holder.to_string(),
            opening_balance,
            balance: opening_balance,
            kind,
            ledger: Vec::new(),
            clock: Arc::new(SystemClock),
        }
    }

    pub fn savings(number: &str, holder: &str, balance: Decimal, interest_rate: Decimal) -> Self {
        Self::new(number, holder, balance, AccountKind::Savings { interest_rate })
    }

    /// A negative overdraft limit is treated as zero.
    pub fn checking(number: &str, holder: &str, balance: Decimal, overdraft_limit: Decimal) -> Self {
        let overdraft_limit = overdraft_limit.max(Decimal::ZERO);
        Self::new(number, holder, balance, AccountKind::Checking { overdraft_limit })
    }

    /// Loans start with no credit balance; `principal` is what is owed.
    pub fn loan(number: &str, holder: &str, principal: Decimal, interest_rate: Decimal) -> Self {
        Self::new(
            number,
            holder,
            Decimal::ZERO,
            AccountKind::Loan {
                principal,
                interest_rate,
                last_computed_payment: Decimal::ZERO,
            },
        )
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn holder(&self) -> &str {
        &self.holder
    }

    pub fn kind(&self) -> &AccountKind {
        &self.kind
    }

    pub fn opening_balance(&self) -> Decimal {
        self.opening_balance
    }

    pub fn current_balance(&self) -> Decimal {
        self.balance
    }

    /// Outstanding principal, for loan accounts only.
    pub fn principal(&self) -> Option<Decimal> {
        match self.kind {
            AccountKind::Loan { principal, .. } => Some(principal),
            _ => None,
        }
    }

    /// Entries in the order they were recorded. Call again to restart.
    pub fn ledger_history(&self) -> slice::Iter<'_, LedgerEntry> {
        self.ledger.iter()
    }

    pub(crate) fn ledger(&self) -> &[LedgerEntry] {
        &self.ledger
    }

    pub fn deposit(&mut self, amount: Decimal) -> BankResult<()> {
        let description = match self.kind {
            AccountKind::Loan { .. } => "Loan Repayment",
            _ => "Deposit",
        };
        self.credit(amount, EntryKind::Deposit, description)
    }

    pub fn withdraw(&mut self, amount: Decimal) -> BankResult<()> {
        self.debit(amount, EntryKind::Withdrawal, "Withdrawal")
    }

    /// Credits `balance * interest_rate` to a savings account and returns it.
    /// Nothing is recorded when the interest comes out as zero.
    pub fn apply_interest(&mut self) -> BankResult<Decimal> {
        let AccountKind::Savings { interest_rate } = self.kind else {
            return Err(self.unsupported("apply_interest"));
        };
        let interest = self.balance * interest_rate;
        if interest > Decimal::ZERO {
            self.record(EntryKind::Deposit, interest, "Interest Applied");
        }
        debug!("{}: interest {} applied, balance {}", self.number, interest, self.balance);
        Ok(interest)
    }

    /// Accrues one period of interest on a loan, then charges the monthly
    /// payment against the credit balance. Returns the payment.
    /// Nothing is recorded when the payment comes out as zero.
    pub fn process_monthly_payment(&mut self) -> BankResult<Decimal> {
        let AccountKind::Loan {
            principal,
            interest_rate,
            last_computed_payment,
        } = &mut self.kind
        else {
            return Err(self.unsupported("process_monthly_payment"));
        };

        // An overpaid loan accrues nothing and owes nothing.
        let payment = if *principal > Decimal::ZERO {
            *principal += *principal * *interest_rate;
            *principal * MONTHLY_PAYMENT_RATE
        } else {
            Decimal::ZERO
        };
        *last_computed_payment = payment;

        if payment > Decimal::ZERO {
            self.record(EntryKind::LoanPayment, payment, "Monthly Loan Payment");
        }
        debug!("{}: monthly payment {}, balance {}", self.number, payment, self.balance);
        Ok(payment)
    }

    /// Adds funds under this account's deposit policy. For loans a credit is
    /// a repayment and also reduces the principal.
    pub(crate) fn credit(&mut self, amount: Decimal, kind: EntryKind, description: &str) -> BankResult<()> {
        ensure_positive(amount)?;
        if let AccountKind::Loan { principal, .. } = &mut self.kind {
            *principal -= amount;
        }
        self.record(kind, amount, description);
        debug!("{}: credited {}, balance {}", self.number, amount, self.balance);
        Ok(())
    }

    /// Removes funds under this account's withdraw policy. Nothing changes
    /// unless every check passes. Loans refuse before the amount is looked at.
    pub(crate) fn debit(&mut self, amount: Decimal, kind: EntryKind, description: &str) -> BankResult<()> {
        if let AccountKind::Loan { .. } = self.kind {
            return Err(self.unsupported("withdraw"));
        }
        ensure_positive(amount)?;
        self.check_withdrawal(amount)?;
        self.record(kind, amount, description);
        debug!("{}: debited {}, balance {}", self.number, amount, self.balance);
        Ok(())
    }

    fn check_withdrawal(&self, amount: Decimal) -> BankResult<()> {
        match self.kind {
            AccountKind::Savings { .. } => {
                if amount > self.balance {
                    return Err(BankError::InsufficientFunds {
                        account: self.number.clone(),
                        requested: amount,
                        available: self.balance,
                    });
                }
            }
            AccountKind::Checking { overdraft_limit } => {
                if amount > self.balance + overdraft_limit {
                    return Err(BankError::OverdraftExceeded {
                        account: self.number.clone(),
                        requested: amount,
                        balance: self.balance,
                        limit: overdraft_limit,
                    });
                }
            }
            AccountKind::Loan { .. } => return Err(self.unsupported("withdraw")),
        }
        Ok(())
    }

    /// Takes back the most recent entry and its balance effect. Only used to
    /// compensate a transfer leg that was just recorded.
    pub(crate) fn revert_last_entry(&mut self) -> Option<LedgerEntry> {
        let entry = self.ledger.pop()?;
        self.balance -= entry.signed_amount();
        if entry.kind.is_credit() {
            if let AccountKind::Loan { principal, .. } = &mut self.kind {
                *principal += entry.amount;
            }
        }
        Some(entry)
    }

    /// The single place where the balance moves; always paired with one entry.
    fn record(&mut self, kind: EntryKind, amount: Decimal, description: &str) {
        let entry = LedgerEntry::new(kind, amount, self.clock.now(), description);
        self.balance += entry.signed_amount();
        self.ledger.push(entry);
    }

    fn unsupported(&self, operation: &'static str) -> BankError {
        BankError::UnsupportedOperation {
            account: self.number.clone(),
            operation,
        }
    }
}

fn ensure_positive(amount: Decimal) -> BankResult<()> {
    if amount <= Decimal::ZERO {
        return Err(BankError::InvalidAmount(amount));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::FixedClock;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn ledger_sum(acc: &Account) -> Decimal {
        acc.ledger_history().map(LedgerEntry::signed_amount).sum()
    }

    fn all_kinds() -> Vec<Account> {
        vec![
            Account::savings("SA1", "Alice", dec!(100), dec!(0.03)),
            Account::checking("CA1", "Alice", dec!(100), dec!(50)),
            Account::loan("LA1", "Bob", dec!(1000), dec!(0.05)),
        ]
    }

    #[test]
    fn test_deposit() {
        let mut acc = Account::savings("SA1", "Alice", dec!(100), dec!(0.03));
        acc.deposit(dec!(50.25)).unwrap();
        assert_eq!(acc.current_balance(), dec!(150.25));
        assert_eq!(acc.ledger().len(), 1);
        assert_eq!(acc.ledger()[0].kind, EntryKind::Deposit);
        assert_eq!(acc.ledger()[0].amount, dec!(50.25));
    }

    #[test]
    fn test_non_positive_deposit_rejected_for_every_kind() {
        for mut acc in all_kinds() {
            let before = acc.clone();
            assert_eq!(acc.deposit(dec!(0)), Err(BankError::InvalidAmount(dec!(0))));
            assert_eq!(acc.deposit(dec!(-5)), Err(BankError::InvalidAmount(dec!(-5))));
            assert_eq!(acc, before);
        }
    }

    #[test]
    fn test_savings_withdraw() {
        let mut acc = Account::savings("SA1", "Alice", dec!(100), dec!(0.03));
        acc.withdraw(dec!(40)).unwrap();
        assert_eq!(acc.current_balance(), dec!(60));

        // More than the balance -> no change
        let err = acc.withdraw(dec!(60.01)).unwrap_err();
        assert!(matches!(err, BankError::InsufficientFunds { .. }));
        assert_eq!(acc.current_balance(), dec!(60));
        assert_eq!(acc.ledger().len(), 1);

        acc.withdraw(dec!(60)).unwrap();
        assert_eq!(acc.current_balance(), dec!(0));
    }

    #[test]
    fn test_checking_overdraft() {
        let mut acc = Account::checking("CA1001", "Alice", dec!(2000.00), dec!(500.00));
        let original = acc.clone();

        acc.withdraw(dec!(2400.00)).unwrap();
        assert_eq!(acc.current_balance(), dec!(-400.00));

        let mut acc = original.clone();
        let err = acc.withdraw(dec!(2600.00)).unwrap_err();
        assert!(matches!(err, BankError::OverdraftExceeded { .. }));
        assert_eq!(acc, original);

        // Exactly down to the floor is allowed
        let mut acc = original;
        acc.withdraw(dec!(2500.00)).unwrap();
        assert_eq!(acc.current_balance(), dec!(-500.00));
        assert!(acc.withdraw(dec!(0.01)).is_err());
    }

    #[test]
    fn test_negative_overdraft_limit_clamped() {
        let acc = Account::checking("CA1", "Alice", dec!(10), dec!(-20));
        assert_eq!(acc.kind(), &AccountKind::Checking { overdraft_limit: dec!(0) });
    }

    #[test]
    fn test_loan_rejects_withdraw() {
        let mut acc = Account::loan("LA2001", "Bob", dec!(10000), dec!(0.05));
        acc.deposit(dec!(500)).unwrap();
        let before = acc.clone();
        for amount in [dec!(-1), dec!(0), dec!(0.01), dec!(1), dec!(100000)] {
            let err = acc.withdraw(amount).unwrap_err();
            assert!(matches!(err, BankError::UnsupportedOperation { operation: "withdraw", .. }));
        }
        assert_eq!(acc, before);
    }

    #[test]
    fn test_loan_repayment() {
        let mut acc = Account::loan("LA2001", "Bob", dec!(10000), dec!(0.05));
        acc.deposit(dec!(500)).unwrap();
        assert_eq!(acc.principal(), Some(dec!(9500)));
        assert_eq!(acc.current_balance(), dec!(500));
        assert_eq!(acc.ledger()[0].description, "Loan Repayment");
    }

    #[test]
    fn test_apply_interest() {
        let mut acc = Account::savings("SA1001", "Alice", dec!(5000.00), dec!(0.03));
        let interest = acc.apply_interest().unwrap();
        assert_eq!(interest, dec!(150.00));
        assert_eq!(acc.current_balance(), dec!(5150.00));
        assert_eq!(acc.ledger().len(), 1);
        assert_eq!(acc.ledger()[0].kind, EntryKind::Deposit);
        assert_eq!(acc.ledger()[0].amount, dec!(150.00));
    }

    #[test]
    fn test_apply_interest_on_empty_savings_records_nothing() {
        let mut acc = Account::savings("SA1", "Alice", dec!(0), dec!(0.03));
        assert_eq!(acc.apply_interest().unwrap(), dec!(0));
        assert!(acc.ledger().is_empty());
    }

    #[test]
    fn test_interest_only_for_savings() {
        let mut acc = Account::checking("CA1", "Alice", dec!(100), dec!(0));
        let err = acc.apply_interest().unwrap_err();
        assert!(matches!(err, BankError::UnsupportedOperation { operation: "apply_interest", .. }));
        assert!(Account::savings("SA1", "A", dec!(1), dec!(0)).process_monthly_payment().is_err());
    }

    #[test]
    fn test_monthly_payment() {
        let mut acc = Account::loan("LA2001", "Bob", dec!(10000), dec!(0.05));
        let payment = acc.process_monthly_payment().unwrap();
        assert_eq!(acc.principal(), Some(dec!(10500)));
        assert_eq!(payment, dec!(105));
        assert_eq!(acc.current_balance(), dec!(-105));
        assert_eq!(
            acc.kind(),
            &AccountKind::Loan {
                principal: dec!(10500),
                interest_rate: dec!(0.05),
                last_computed_payment: dec!(105),
            }
        );
        assert_eq!(acc.ledger()[0].kind, EntryKind::LoanPayment);
    }

    #[test]
    fn test_overpaid_loan_owes_nothing() {
        let mut acc = Account::loan("LA1", "Bob", dec!(100), dec!(0.05));
        acc.deposit(dec!(150)).unwrap();
        assert_eq!(acc.process_monthly_payment().unwrap(), dec!(0));
        assert_eq!(acc.principal(), Some(dec!(-50)));
        assert_eq!(acc.ledger().len(), 1);
    }

    #[test]
    fn test_balance_matches_ledger() {
        let mut savings = Account::savings("SA1", "Alice", dec!(1000), dec!(0.02));
        savings.deposit(dec!(250)).unwrap();
        savings.withdraw(dec!(100)).unwrap();
        savings.apply_interest().unwrap();
        let _ = savings.withdraw(dec!(100000));

        let mut checking = Account::checking("CA1", "Alice", dec!(10), dec!(300));
        checking.withdraw(dec!(200)).unwrap();
        checking.deposit(dec!(15.5)).unwrap();

        let mut loan = Account::loan("LA1", "Bob", dec!(5000), dec!(0.01));
        loan.process_monthly_payment().unwrap();
        loan.deposit(dec!(400)).unwrap();
        loan.process_monthly_payment().unwrap();

        for acc in [savings, checking, loan] {
            assert_eq!(acc.current_balance(), acc.opening_balance() + ledger_sum(&acc));
        }
    }

    #[test]
    fn test_revert_last_entry() {
        let mut acc = Account::loan("LA1", "Bob", dec!(1000), dec!(0.05));
        let before = acc.clone();
        acc.credit(dec!(100), EntryKind::TransferIn, "Transfer from SA1").unwrap();
        let entry = acc.revert_last_entry().unwrap();
        assert_eq!(entry.kind, EntryKind::TransferIn);
        assert_eq!(acc, before);
        assert!(acc.revert_last_entry().is_none());
    }

    #[test]
    fn test_ledger_history_is_restartable() {
        let mut acc = Account::checking("CA1", "Alice", dec!(0), dec!(100));
        acc.deposit(dec!(1)).unwrap();
        acc.withdraw(dec!(2)).unwrap();
        let first: Vec<_> = acc.ledger_history().map(|e| e.kind).collect();
        let second: Vec<_> = acc.ledger_history().map(|e| e.kind).collect();
        assert_eq!(first, vec![EntryKind::Deposit, EntryKind::Withdrawal]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_entries_stamped_by_clock() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let mut acc = Account::savings("SA1", "Alice", dec!(10), dec!(0.5))
            .with_clock(Arc::new(FixedClock(at)));
        acc.deposit(dec!(5)).unwrap();
        acc.apply_interest().unwrap();
        assert!(acc.ledger_history().all(|e| e.timestamp == at));
        assert_eq!(acc.ledger()[1].description, "Interest Applied");
        assert_eq!(acc.current_balance(), dec!(22.5));
    }
}
