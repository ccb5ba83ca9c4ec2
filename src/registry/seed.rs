use rust_decimal::Decimal;

use crate::accounts::Account;
use crate::customers::Customer;
use crate::registry::Bank;

/// The two sample customers the command driver starts from.
pub fn demo_bank() -> Bank {
    let alice = Customer::new("alice", "password123", "Alice Smith", "alice@example.com")
        .with_account(Account::savings(
            "SA1001",
            "Alice Smith",
            Decimal::new(5000, 0),
            Decimal::new(3, 2),
        ))
        .with_account(Account::checking(
            "CA1001",
            "Alice Smith",
            Decimal::new(2000, 0),
            Decimal::new(500, 0),
        ));

    let bob = Customer::new("bob", "securepwd", "Bob Johnson", "bob@example.com")
        .with_account(Account::savings(
            "SA2001",
            "Bob Johnson",
            Decimal::new(3000, 0),
            Decimal::new(2, 2),
        ))
        .with_account(Account::loan(
            "LA2001",
            "Bob Johnson",
            Decimal::new(10000, 0),
            Decimal::new(5, 2),
        ));

    let mut bank = Bank::new();
    for customer in [alice, bob] {
        if let Err(e) = bank.add_customer(customer) {
            // Sample numbers are distinct; this only fires if they are edited.
            log::error!("demo customer rejected: {}", e);
        }
    }
    bank
}
