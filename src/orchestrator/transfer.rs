use log::{info, warn};
use rust_decimal::Decimal;

use crate::error::{BankError, BankResult};
use crate::ledger::EntryKind;
use crate::registry::Bank;

/// Confirmation of a completed transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferReceipt {
    pub from: String,
    pub to: String,
    pub amount: Decimal,
    pub from_balance: Decimal,
    pub to_balance: Decimal,
}

/// Moves `amount` from one account to another as a single unit.
///
/// The source is debited under its own withdraw policy, then the destination
/// is credited. Each side gets exactly one entry (`TransferOut` /
/// `TransferIn`). Any error leaves both accounts as they were.
pub fn transfer(bank: &mut Bank, from: &str, to: &str, amount: Decimal) -> BankResult<TransferReceipt> {
    bank.account(from)?;
    bank.account(to)?;
    if amount <= Decimal::ZERO {
        return Err(BankError::InvalidAmount(amount));
    }
    if from == to {
        return Err(BankError::SameAccount(from.to_string()));
    }

    let from_balance = {
        let source = bank.account_mut(from)?;
        source.debit(amount, EntryKind::TransferOut, &format!("Transfer to {}", to))?;
        source.current_balance()
    };

    let credited = bank
        .account_mut(to)
        .and_then(|dest| {
            dest.credit(amount, EntryKind::TransferIn, &format!("Transfer from {}", from))?;
            Ok(dest.current_balance())
        });

    let to_balance = match credited {
        Ok(balance) => balance,
        Err(e) => {
            // Unreachable with a positive amount; kept so a failed credit never
            // leaves the debit behind.
            warn!("transfer {} -> {} failed on deposit leg, reverting: {}", from, to, e);
            bank.account_mut(from)?.revert_last_entry();
            return Err(e);
        }
    };

    info!("transferred {} from {} to {}", amount, from, to);
    Ok(TransferReceipt {
        from: from.to_string(),
        to: to.to_string(),
        amount,
        from_balance,
        to_balance,
    })
}
