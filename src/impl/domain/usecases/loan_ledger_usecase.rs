use std::sync::Arc;

use async_trait::async_trait;
use fractic_server_error::ServerError;
use tracing::{debug, info, instrument};

use crate::{
    domain::{
        logic::{
            installment_scheduler::InstallmentScheduler, payment_processor::PaymentProcessor,
            utils::add_days,
        },
        repositories::{client_store::ClientStore, loan_store::LoanStore},
    },
    entities::{
        ClientId, Clock, LedgerConfig, Loan, LoanId, LoanPatch, LoanQuote, LoanRequest,
        LoanStatus, LoanTerms, RepaymentPlan, ScheduleUpdate, StoredClient, StoredLoan,
    },
    errors::{ClientNotFound, InstallmentNotFound, InvalidScheduleUpdate, LoanNotFound, MissingClient},
};

#[async_trait]
pub trait LoanLedgerUsecase: Send + Sync {
    /// Validates the request, snapshots the client's name and stores the loan
    /// together with its repayment plan.
    async fn create_loan(&self, request: LoanRequest) -> Result<StoredLoan, ServerError>;

    async fn get_loan(&self, id: &LoanId) -> Result<StoredLoan, ServerError>;

    /// Most recently created first.
    async fn list_loans(&self) -> Result<Vec<StoredLoan>, ServerError>;

    async fn recent_loans(&self) -> Result<Vec<StoredLoan>, ServerError>;

    async fn loans_for_client(&self, client_id: &ClientId) -> Result<Vec<StoredLoan>, ServerError>;

    /// The client a loan refers to, if it still exists.
    async fn client_of(&self, loan: &StoredLoan) -> Result<Option<StoredClient>, ServerError>;

    async fn update_loan_schedule(
        &self,
        id: &LoanId,
        update: ScheduleUpdate,
    ) -> Result<StoredLoan, ServerError>;

    async fn pay_installment(&self, id: &LoanId, number: u32) -> Result<StoredLoan, ServerError>;

    /// Marks the loan and all of its installments as paid in one update.
    async fn settle_loan_fully(&self, id: &LoanId) -> Result<StoredLoan, ServerError>;

    /// Permanently removes the loan and its installments.
    async fn delete_loan(&self, id: &LoanId) -> Result<(), ServerError>;

    fn quote(
        &self,
        principal: f64,
        interest_rate: Option<f64>,
        term_days: Option<u32>,
    ) -> Result<LoanQuote, ServerError>;
}

pub(crate) struct LoanLedgerUsecaseImpl<CS, LS, K>
where
    CS: ClientStore,
    LS: LoanStore,
    K: Clock,
{
    clients: Arc<CS>,
    loans: Arc<LS>,
    clock: Arc<K>,
    config: LedgerConfig,
}

impl<CS, LS, K> LoanLedgerUsecaseImpl<CS, LS, K>
where
    CS: ClientStore,
    LS: LoanStore,
    K: Clock,
{
    pub(crate) fn new(clients: Arc<CS>, loans: Arc<LS>, clock: Arc<K>, config: LedgerConfig) -> Self {
        Self {
            clients,
            loans,
            clock,
            config,
        }
    }

    async fn fetch(&self, id: &LoanId) -> Result<StoredLoan, ServerError> {
        self.loans
            .get(id)
            .await?
            .ok_or_else(|| LoanNotFound::new(id.as_str()))
    }

    /// Builds the loan record for a request. Everything that can be rejected
    /// is checked here, before the store is touched.
    fn build_loan(
        &self,
        request: LoanRequest,
        client: StoredClient,
    ) -> Result<Loan, ServerError> {
        let terms = LoanTerms::compute(request.principal, request.interest_rate)?;
        let start_date = self.clock.today();
        let (plan, due_date) = if request.schedule.installment_count > 1 {
            let installments = InstallmentScheduler::new(self.config.amount_decimal_places)
                .schedule(&terms, &request.schedule, start_date)?;
            let due_date = installments
                .last()
                .map(|i| i.due_date)
                .unwrap_or(start_date);
            (RepaymentPlan::InstallmentPlan(installments), due_date)
        } else {
            let days = InstallmentScheduler::interval_days(&request.schedule)?;
            (RepaymentPlan::SinglePayment, add_days(start_date, days as u64)?)
        };
        Ok(Loan {
            client_id: Some(client.id),
            client_name: client.data.name,
            amount: terms.principal,
            interest_rate: terms.interest_rate,
            total_owing: terms.total_owing,
            profit: terms.profit,
            start_date,
            due_date,
            plan,
            status: LoanStatus::Active,
            notes: request
                .notes
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
            created_at: self.clock.now(),
        })
    }

    /// Due-date rewrite for a schedule update. Amounts and statuses are
    /// carried over unchanged.
    fn rescheduled(loan: &StoredLoan, update: ScheduleUpdate) -> Result<LoanPatch, ServerError> {
        match (&loan.data.plan, update) {
            (RepaymentPlan::SinglePayment, ScheduleUpdate::DueDate(due_date)) => Ok(LoanPatch {
                due_date: Some(due_date),
                ..Default::default()
            }),
            (RepaymentPlan::InstallmentPlan(installments), ScheduleUpdate::InstallmentDueDates(dates)) => {
                let mut installments = installments.clone();
                for (number, due_date) in dates {
                    installments
                        .iter_mut()
                        .find(|i| i.number == number)
                        .ok_or_else(|| InstallmentNotFound::new(loan.id.as_str(), number))?
                        .due_date = due_date;
                }
                let due_date = installments
                    .iter()
                    .map(|i| i.due_date)
                    .max()
                    .unwrap_or(loan.data.due_date);
                Ok(LoanPatch {
                    status: None,
                    plan: Some(RepaymentPlan::InstallmentPlan(installments)),
                    due_date: Some(due_date),
                })
            }
            (RepaymentPlan::SinglePayment, ScheduleUpdate::InstallmentDueDates(_)) => {
                Err(InvalidScheduleUpdate::new(
                    loan.id.as_str(),
                    "single-payment loan has no installments to reschedule",
                ))
            }
            (RepaymentPlan::InstallmentPlan(_), ScheduleUpdate::DueDate(_)) => {
                Err(InvalidScheduleUpdate::new(
                    loan.id.as_str(),
                    "the due date of an installment plan follows its last installment",
                ))
            }
        }
    }
}

#[async_trait]
impl<CS, LS, K> LoanLedgerUsecase for LoanLedgerUsecaseImpl<CS, LS, K>
where
    CS: ClientStore,
    LS: LoanStore,
    K: Clock,
{
    #[instrument(skip(self))]
    async fn create_loan(&self, request: LoanRequest) -> Result<StoredLoan, ServerError> {
        let client_id = request.client_id.clone().ok_or_else(|| MissingClient::new())?;
        // Cheap checks first, so an invalid request never reaches the store.
        LoanTerms::compute(request.principal, request.interest_rate)?;
        InstallmentScheduler::interval_days(&request.schedule)?;

        let client = self
            .clients
            .get(&client_id)
            .await?
            .ok_or_else(|| ClientNotFound::new(client_id.as_str()))?;
        let loan = self.build_loan(request, client)?;
        let id = self.loans.add(loan.clone()).await?;
        info!(
            loan_id = %id,
            total_owing = loan.total_owing,
            installments = loan.installments().len(),
            "loan created"
        );
        Ok(StoredLoan { id, data: loan })
    }

    async fn get_loan(&self, id: &LoanId) -> Result<StoredLoan, ServerError> {
        self.fetch(id).await
    }

    async fn list_loans(&self) -> Result<Vec<StoredLoan>, ServerError> {
        self.loans.list().await
    }

    async fn recent_loans(&self) -> Result<Vec<StoredLoan>, ServerError> {
        let mut loans = self.loans.list().await?;
        loans.truncate(self.config.recent_loans_limit);
        Ok(loans)
    }

    async fn loans_for_client(&self, client_id: &ClientId) -> Result<Vec<StoredLoan>, ServerError> {
        Ok(self
            .loans
            .list()
            .await?
            .into_iter()
            .filter(|l| l.data.client_id.as_ref() == Some(client_id))
            .collect())
    }

    async fn client_of(&self, loan: &StoredLoan) -> Result<Option<StoredClient>, ServerError> {
        match &loan.data.client_id {
            Some(client_id) => self.clients.get(client_id).await,
            None => Ok(None),
        }
    }

    #[instrument(skip(self))]
    async fn update_loan_schedule(
        &self,
        id: &LoanId,
        update: ScheduleUpdate,
    ) -> Result<StoredLoan, ServerError> {
        let mut loan = self.fetch(id).await?;
        let patch = Self::rescheduled(&loan, update)?;
        self.loans.update_fields(id, patch.clone()).await?;
        patch.apply_to(&mut loan.data);
        info!(loan_id = %id, due_date = %loan.data.due_date, "loan rescheduled");
        Ok(loan)
    }

    #[instrument(skip(self))]
    async fn pay_installment(&self, id: &LoanId, number: u32) -> Result<StoredLoan, ServerError> {
        let loan = self.loans.pay_installment(id, number).await?;
        info!(
            loan_id = %id,
            installment = number,
            settled = loan.data.is_paid(),
            "installment paid"
        );
        Ok(loan)
    }

    #[instrument(skip(self))]
    async fn settle_loan_fully(&self, id: &LoanId) -> Result<StoredLoan, ServerError> {
        let mut loan = self.fetch(id).await?;
        if loan.data.is_paid() && loan.data.installments().iter().all(|i| i.is_paid()) {
            debug!(loan_id = %id, "loan already settled");
            return Ok(loan);
        }
        let patch = PaymentProcessor::new(&loan).settle_fully();
        self.loans.update_fields(id, patch.clone()).await?;
        patch.apply_to(&mut loan.data);
        info!(loan_id = %id, "loan settled in full");
        Ok(loan)
    }

    #[instrument(skip(self))]
    async fn delete_loan(&self, id: &LoanId) -> Result<(), ServerError> {
        self.loans.delete(id).await?;
        info!(loan_id = %id, "loan deleted");
        Ok(())
    }

    fn quote(
        &self,
        principal: f64,
        interest_rate: Option<f64>,
        term_days: Option<u32>,
    ) -> Result<LoanQuote, ServerError> {
        LoanQuote::compute(
            principal,
            interest_rate.unwrap_or(self.config.default_interest_rate),
            term_days.unwrap_or(self.config.default_term_days),
        )
    }
}
