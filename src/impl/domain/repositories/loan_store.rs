use async_trait::async_trait;
use fractic_server_error::ServerError;

use crate::{
    domain::logic::payment_processor::PaymentProcessor,
    entities::{Loan, LoanId, LoanPatch, StoredLoan},
    errors::LoanNotFound,
};

/// Persistence of loans. A loan and its installments are stored as one record,
/// and each call is atomic for that record only.
#[async_trait]
pub trait LoanStore: Send + Sync {
    async fn add(&self, loan: Loan) -> Result<LoanId, ServerError>;

    async fn get(&self, id: &LoanId) -> Result<Option<StoredLoan>, ServerError>;

    /// All loans, most recently created first.
    async fn list(&self) -> Result<Vec<StoredLoan>, ServerError>;

    async fn update_fields(&self, id: &LoanId, patch: LoanPatch) -> Result<(), ServerError>;

    async fn delete(&self, id: &LoanId) -> Result<(), ServerError>;

    /// Read-modify-write of a single installment payment. Returns the loan as
    /// it is after the payment; paying an already paid installment writes
    /// nothing.
    async fn pay_installment(&self, id: &LoanId, number: u32) -> Result<StoredLoan, ServerError> {
        let mut loan = self
            .get(id)
            .await?
            .ok_or_else(|| LoanNotFound::new(id.as_str()))?;
        let payment = PaymentProcessor::new(&loan).pay_installment(number)?;
        if let Some(patch) = payment {
            self.update_fields(id, patch.clone()).await?;
            patch.apply_to(&mut loan.data);
        }
        Ok(loan)
    }
}
