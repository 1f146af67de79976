use fractic_server_error::ServerError;

use crate::{
    entities::{InstallmentStatus, Loan, LoanPatch, LoanStatus, RepaymentPlan, StoredLoan},
    errors::InstallmentNotFound,
};

/// Number of the implicit installment of a single-payment loan.
pub(crate) const SINGLE_PAYMENT_NUMBER: u32 = 1;

pub(crate) struct PaymentProcessor<'a> {
    loan: &'a StoredLoan,
}

impl<'a> PaymentProcessor<'a> {
    pub(crate) fn new(loan: &'a StoredLoan) -> Self {
        Self { loan }
    }

    /// Marks the given installment as paid and recomputes the loan status.
    ///
    /// Returns `None` if the installment is already paid (nothing to write).
    /// A single-payment loan has one implicit installment, numbered 1.
    pub(crate) fn pay_installment(self, number: u32) -> Result<Option<LoanPatch>, ServerError> {
        let loan = &self.loan.data;
        match &loan.plan {
            RepaymentPlan::SinglePayment => {
                if number != SINGLE_PAYMENT_NUMBER {
                    return Err(InstallmentNotFound::new(self.loan.id.as_str(), number));
                }
                if loan.is_paid() {
                    return Ok(None);
                }
                Ok(Some(LoanPatch {
                    status: Some(LoanStatus::Paid),
                    ..Default::default()
                }))
            }
            RepaymentPlan::InstallmentPlan(installments) => {
                let target = installments
                    .iter()
                    .find(|i| i.number == number)
                    .ok_or_else(|| InstallmentNotFound::new(self.loan.id.as_str(), number))?;
                if target.is_paid() {
                    return Ok(None);
                }
                let updated: Vec<_> = installments
                    .iter()
                    .cloned()
                    .map(|mut i| {
                        if i.number == number {
                            i.status = InstallmentStatus::Paid;
                        }
                        i
                    })
                    .collect();
                let status = if updated.iter().all(|i| i.is_paid()) {
                    LoanStatus::Paid
                } else {
                    LoanStatus::Active
                };
                Ok(Some(LoanPatch {
                    status: Some(status),
                    plan: Some(RepaymentPlan::InstallmentPlan(updated)),
                    due_date: None,
                }))
            }
        }
    }

    /// Settles the loan in one update: status paid, and every installment of
    /// a plan paid along with it.
    pub(crate) fn settle_fully(self) -> LoanPatch {
        let plan = match &self.loan.data.plan {
            RepaymentPlan::SinglePayment => None,
            RepaymentPlan::InstallmentPlan(installments) => {
                Some(RepaymentPlan::InstallmentPlan(
                    installments
                        .iter()
                        .cloned()
                        .map(|mut i| {
                            i.status = InstallmentStatus::Paid;
                            i
                        })
                        .collect(),
                ))
            }
        };
        LoanPatch {
            status: Some(LoanStatus::Paid),
            plan,
            due_date: None,
        }
    }
}

impl Loan {
    /// Sum of the amounts of paid installments (or the full total for a
    /// settled single payment).
    pub fn paid_amount(&self) -> f64 {
        match &self.plan {
            RepaymentPlan::SinglePayment if self.is_paid() => self.total_owing,
            RepaymentPlan::SinglePayment => 0.0,
            RepaymentPlan::InstallmentPlan(installments) => installments
                .iter()
                .filter(|i| i.is_paid())
                .map(|i| i.amount)
                .sum(),
        }
    }

    /// What is still owed on the loan.
    pub fn remaining_balance(&self) -> f64 {
        if self.is_paid() {
            return 0.0;
        }
        (self.total_owing - self.paid_amount()).max(0.0)
    }
}

impl LoanPatch {
    pub(crate) fn apply_to(self, loan: &mut Loan) {
        if let Some(status) = self.status {
            loan.status = status;
        }
        if let Some(plan) = self.plan {
            loan.plan = plan;
        }
        if let Some(due_date) = self.due_date {
            loan.due_date = due_date;
        }
    }
}
