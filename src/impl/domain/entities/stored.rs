use super::{
    client::{Client, ClientId},
    loan::{Loan, LoanId},
};

/// A record as held by a store, together with the id the store assigned to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Stored<I, T> {
    pub id: I,
    pub data: T,
}

pub type StoredClient = Stored<ClientId, Client>;
pub type StoredLoan = Stored<LoanId, Loan>;

/// Full contents of a loan book (as read from the stores, or loaded from a
/// snapshot).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoanBookRecords {
    pub clients: Vec<StoredClient>,
    pub loans: Vec<StoredLoan>,
}
