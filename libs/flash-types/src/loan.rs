use soroban_sdk::{contracttype, Address};

/// An in-flight flash loan.
///
/// Lives in temporary storage between `open_loan` and `close_loan` of the
/// same invocation and is removed on settlement, so it is never committed.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Loan {
    /// Coordinator contract that opened the loan
    pub lender: Address,
    /// Pool asset
    pub asset: Address,
    /// Callback contract that received the funds
    pub borrower: Address,
    pub amount: i128,
    /// Fee fixed at open time
    pub fee: i128,
    /// Custody balance snapshotted before funds left the vault
    pub starting_balance: i128,
}

impl Loan {
    /// Minimum custody balance that settles the loan
    pub fn required_balance(&self) -> Option<i128> {
        self.starting_balance.checked_add(self.fee)
    }
}
