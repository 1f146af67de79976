use chrono::{DateTime, NaiveDate, Utc};

use super::{client::ClientId, installment::Installment};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LoanId(pub(crate) String);

impl LoanId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LoanId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Persisted status. Lateness is never stored; see `DisplayStatus`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoanStatus {
    Active,
    Paid,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RepaymentPlan {
    /// The whole total owing is due on the loan's due date.
    SinglePayment,
    /// Ordered by installment number, 1..N.
    InstallmentPlan(Vec<Installment>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Loan {
    /// Weak reference; the client may no longer exist.
    pub client_id: Option<ClientId>,
    /// Name of the client at the time the loan was created.
    pub client_name: String,
    /// Principal.
    pub amount: f64,
    /// Percent, applied once at creation.
    pub interest_rate: f64,
    pub total_owing: f64,
    pub profit: f64,
    pub start_date: NaiveDate,
    pub due_date: NaiveDate,
    pub plan: RepaymentPlan,
    pub status: LoanStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Loan {
    /// Installments of the plan, or an empty slice for a single payment.
    pub fn installments(&self) -> &[Installment] {
        match &self.plan {
            RepaymentPlan::SinglePayment => &[],
            RepaymentPlan::InstallmentPlan(installments) => installments,
        }
    }

    pub fn is_paid(&self) -> bool {
        self.status == LoanStatus::Paid
    }
}

/// Partial update of a loan record, as accepted by `LoanStore::update_fields`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoanPatch {
    pub status: Option<LoanStatus>,
    pub plan: Option<RepaymentPlan>,
    pub due_date: Option<NaiveDate>,
}
