use chrono::{DateTime, NaiveDate};
use fractic_server_error::ServerError;

use crate::{
    entities::{
        ClientId, Installment, InstallmentStatus, Loan, LoanId, LoanStatus, RepaymentPlan, Stored,
        StoredLoan,
    },
    errors::{InvalidStoredLoan, InvalidTimestamp},
};

use super::iso_date_model::ISODateModel;

#[derive(Debug, Clone, Copy, serde_derive::Serialize, serde_derive::Deserialize)]
pub(crate) enum StatusModel {
    Active,
    Pending,
    Late,
    Paid,
}

#[derive(Debug, serde_derive::Serialize, serde_derive::Deserialize)]
pub(crate) struct InstallmentModel {
    pub(crate) number: u32,
    pub(crate) amount: f64,
    pub(crate) due_date: ISODateModel,
    pub(crate) status: StatusModel,
}

#[derive(Debug, serde_derive::Serialize, serde_derive::Deserialize)]
pub(crate) enum RepaymentPlanModel {
    SinglePayment,
    InstallmentPlan(Vec<InstallmentModel>),
}

#[derive(Debug, serde_derive::Serialize, serde_derive::Deserialize)]
pub(crate) struct LoanModel {
    pub(crate) id: String,
    #[serde(default)]
    pub(crate) client_id: Option<String>,
    pub(crate) client_name: String,
    pub(crate) amount: f64,
    pub(crate) interest_rate: f64,
    pub(crate) total_owing: f64,
    pub(crate) profit: f64,
    pub(crate) start_date: ISODateModel,
    pub(crate) due_date: ISODateModel,
    pub(crate) plan: RepaymentPlanModel,
    pub(crate) status: StatusModel,
    #[serde(default)]
    pub(crate) notes: Option<String>,
    /// Milliseconds since the Unix epoch.
    pub(crate) created_at: i64,
}

// Older records may carry a persisted `Late` loan status. Lateness is derived
// from the due date, so every status other than `Paid` reads as not paid.

impl Into<InstallmentStatus> for StatusModel {
    fn into(self) -> InstallmentStatus {
        match self {
            StatusModel::Active | StatusModel::Pending | StatusModel::Late => {
                InstallmentStatus::Pending
            },
            StatusModel::Paid => InstallmentStatus::Paid,
        }
    }
}

impl Into<LoanStatus> for StatusModel {
    fn into(self) -> LoanStatus {
        match self {
            StatusModel::Active | StatusModel::Pending | StatusModel::Late => LoanStatus::Active,
            StatusModel::Paid => LoanStatus::Paid,
        }
    }
}

impl Into<Installment> for InstallmentModel {
    fn into(self) -> Installment {
        Installment {
            number: self.number,
            amount: self.amount,
            due_date: self.due_date.into(),
            status: self.status.into(),
        }
    }
}

impl Into<RepaymentPlan> for RepaymentPlanModel {
    fn into(self) -> RepaymentPlan {
        match self {
            RepaymentPlanModel::SinglePayment => RepaymentPlan::SinglePayment,
            RepaymentPlanModel::InstallmentPlan(installments) => {
                let mut installments: Vec<Installment> =
                    installments.into_iter().map(Into::into).collect();
                installments.sort_by_key(|i| i.number);
                RepaymentPlan::InstallmentPlan(installments)
            }
        }
    }
}

/// Installments must be numbered 1..N without gaps or duplicates, and the
/// loan falls due with its latest installment.
fn check_plan(loan_id: &str, plan: &RepaymentPlan, due_date: NaiveDate) -> Result<(), ServerError> {
    let RepaymentPlan::InstallmentPlan(installments) = plan else {
        return Ok(());
    };
    if installments.is_empty() {
        return Err(InvalidStoredLoan::new(loan_id, "installment plan is empty"));
    }
    if installments
        .iter()
        .zip(1u32..)
        .any(|(installment, expected)| installment.number != expected)
    {
        return Err(InvalidStoredLoan::new(
            loan_id,
            "installment numbers are not 1..N without gaps or duplicates",
        ));
    }
    if installments.iter().map(|i| i.due_date).max() != Some(due_date) {
        return Err(InvalidStoredLoan::new(
            loan_id,
            "due date does not match the latest installment",
        ));
    }
    Ok(())
}

impl TryFrom<LoanModel> for StoredLoan {
    type Error = ServerError;
    fn try_from(model: LoanModel) -> Result<Self, Self::Error> {
        let plan: RepaymentPlan = model.plan.into();
        let due_date: NaiveDate = model.due_date.into();
        check_plan(&model.id, &plan, due_date)?;
        Ok(Stored {
            id: LoanId(model.id),
            data: Loan {
                client_id: model.client_id.map(ClientId),
                client_name: model.client_name,
                amount: model.amount,
                interest_rate: model.interest_rate,
                total_owing: model.total_owing,
                profit: model.profit,
                start_date: model.start_date.into(),
                due_date,
                plan,
                status: model.status.into(),
                notes: model.notes,
                created_at: DateTime::from_timestamp_millis(model.created_at)
                    .ok_or_else(|| InvalidTimestamp::new(model.created_at))?,
            },
        })
    }
}

impl From<&Installment> for InstallmentModel {
    fn from(installment: &Installment) -> Self {
        Self {
            number: installment.number,
            amount: installment.amount,
            due_date: installment.due_date.into(),
            status: match installment.status {
                InstallmentStatus::Pending => StatusModel::Pending,
                InstallmentStatus::Paid => StatusModel::Paid,
            },
        }
    }
}

impl From<&StoredLoan> for LoanModel {
    fn from(loan: &StoredLoan) -> Self {
        let data = &loan.data;
        Self {
            id: loan.id.0.clone(),
            client_id: data.client_id.as_ref().map(|c| c.0.clone()),
            client_name: data.client_name.clone(),
            amount: data.amount,
            interest_rate: data.interest_rate,
            total_owing: data.total_owing,
            profit: data.profit,
            start_date: data.start_date.into(),
            due_date: data.due_date.into(),
            plan: match &data.plan {
                RepaymentPlan::SinglePayment => RepaymentPlanModel::SinglePayment,
                RepaymentPlan::InstallmentPlan(installments) => RepaymentPlanModel::InstallmentPlan(
                    installments.iter().map(Into::into).collect(),
                ),
            },
            status: match data.status {
                LoanStatus::Active => StatusModel::Active,
                LoanStatus::Paid => StatusModel::Paid,
            },
            notes: data.notes.clone(),
            created_at: data.created_at.timestamp_millis(),
        }
    }
}
