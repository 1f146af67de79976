use std::sync::Arc;

use chrono::NaiveDate;
use fractic_server_error::ServerError;

use crate::{
    data::{
        datasources::{
            config_ron_datasource::ConfigRonDatasource,
            records_ron_datasource::RecordsRonDatasourceImpl,
        },
        repositories::{
            in_memory_store::InMemoryStore, snapshot_repository_impl::SnapshotRepositoryImpl,
        },
    },
    domain::{
        repositories::{
            client_store::ClientStore, loan_store::LoanStore,
            snapshot_repository::SnapshotRepository as _,
        },
        usecases::{
            client_registry_usecase::{ClientRegistryUsecase as _, ClientRegistryUsecaseImpl},
            loan_ledger_usecase::{LoanLedgerUsecase as _, LoanLedgerUsecaseImpl},
            portfolio_usecase::{PortfolioUsecase as _, PortfolioUsecaseImpl},
        },
    },
    entities::{
        ClientId, ClientPatch, ClientSummary, Clock, CollectionWorklist, DisplayStatus,
        HistorySummary, LedgerConfig, LoanBookRecords, LoanId, LoanQuote, LoanRequest,
        PortfolioStats, ScheduleUpdate, StoredClient, StoredLoan, SystemClock,
    },
};

/// Entry point of the library: client registry, loan ledger and portfolio
/// figures over a pair of stores, with "today" taken from the clock.
pub struct LoanBookUtil<CS, LS, K = SystemClock>
where
    CS: ClientStore,
    LS: LoanStore,
    K: Clock,
{
    registry: ClientRegistryUsecaseImpl<CS, K>,
    ledger: LoanLedgerUsecaseImpl<CS, LS, K>,
    portfolio: PortfolioUsecaseImpl<CS, LS>,
    snapshots: SnapshotRepositoryImpl<RecordsRonDatasourceImpl>,
    clock: Arc<K>,
    config: LedgerConfig,
}

impl<CS, LS> LoanBookUtil<CS, LS, SystemClock>
where
    CS: ClientStore,
    LS: LoanStore,
{
    pub fn new(clients: Arc<CS>, loans: Arc<LS>, config: LedgerConfig) -> Self {
        Self::with_clock(clients, loans, Arc::new(SystemClock), config)
    }
}

impl LoanBookUtil<InMemoryStore, InMemoryStore, SystemClock> {
    pub fn in_memory(config: LedgerConfig) -> Self {
        Self::from_records(LoanBookRecords::default(), config)
    }

    pub fn from_records(records: LoanBookRecords, config: LedgerConfig) -> Self {
        let store = Arc::new(InMemoryStore::from_records(records));
        Self::new(store.clone(), store, config)
    }

    /// In-memory loan book seeded from a RON snapshot.
    pub fn from_snapshot_string(snapshot: &str, config: LedgerConfig) -> Result<Self, ServerError> {
        let records = SnapshotRepositoryImpl::new().from_string(snapshot)?;
        Ok(Self::from_records(records, config))
    }

    pub async fn from_snapshot_file<P>(path: P, config: LedgerConfig) -> Result<Self, ServerError>
    where
        P: AsRef<std::path::Path> + Send,
    {
        let records = SnapshotRepositoryImpl::new().from_file(path).await?;
        Ok(Self::from_records(records, config))
    }

    /// Missing fields keep their default values.
    pub fn config_from_string(ron: &str) -> Result<LedgerConfig, ServerError> {
        ConfigRonDatasource::from_string(ron)
    }

    pub async fn config_from_file<P>(path: P) -> Result<LedgerConfig, ServerError>
    where
        P: AsRef<std::path::Path>,
    {
        ConfigRonDatasource::from_file(path).await
    }
}

impl<CS, LS, K> LoanBookUtil<CS, LS, K>
where
    CS: ClientStore,
    LS: LoanStore,
    K: Clock,
{
    pub fn with_clock(clients: Arc<CS>, loans: Arc<LS>, clock: Arc<K>, config: LedgerConfig) -> Self {
        Self {
            registry: ClientRegistryUsecaseImpl::new(clients.clone(), clock.clone()),
            ledger: LoanLedgerUsecaseImpl::new(
                clients.clone(),
                loans.clone(),
                clock.clone(),
                config.clone(),
            ),
            portfolio: PortfolioUsecaseImpl::new(clients, loans),
            snapshots: SnapshotRepositoryImpl::new(),
            clock,
            config,
        }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    // Clients.
    // ---

    pub async fn add_client(
        &self,
        name: &str,
        phone: Option<&str>,
        notes: Option<&str>,
    ) -> Result<ClientId, ServerError> {
        self.registry.add_client(name, phone, notes).await
    }

    pub async fn get_client(&self, id: &ClientId) -> Result<Option<StoredClient>, ServerError> {
        self.registry.get_client(id).await
    }

    pub async fn list_clients(&self) -> Result<Vec<StoredClient>, ServerError> {
        self.registry.list_clients().await
    }

    pub async fn search_clients(&self, term: &str) -> Result<Vec<StoredClient>, ServerError> {
        self.registry.search_clients(term).await
    }

    pub async fn update_client(&self, id: &ClientId, patch: ClientPatch) -> Result<(), ServerError> {
        self.registry.update_client(id, patch).await
    }

    pub async fn delete_client(&self, id: &ClientId) -> Result<(), ServerError> {
        self.registry.delete_client(id).await
    }

    // Loans.
    // ---

    pub async fn create_loan(&self, request: LoanRequest) -> Result<StoredLoan, ServerError> {
        self.ledger.create_loan(request).await
    }

    /// Single-payment loan at the configured default rate and term.
    pub async fn create_default_loan(
        &self,
        client_id: ClientId,
        principal: f64,
    ) -> Result<StoredLoan, ServerError> {
        self.ledger
            .create_loan(self.config.default_request(client_id, principal))
            .await
    }

    pub async fn get_loan(&self, id: &LoanId) -> Result<StoredLoan, ServerError> {
        self.ledger.get_loan(id).await
    }

    pub async fn list_loans(&self) -> Result<Vec<StoredLoan>, ServerError> {
        self.ledger.list_loans().await
    }

    pub async fn recent_loans(&self) -> Result<Vec<StoredLoan>, ServerError> {
        self.ledger.recent_loans().await
    }

    pub async fn loans_for_client(&self, client_id: &ClientId) -> Result<Vec<StoredLoan>, ServerError> {
        self.ledger.loans_for_client(client_id).await
    }

    pub async fn client_of(&self, loan: &StoredLoan) -> Result<Option<StoredClient>, ServerError> {
        self.ledger.client_of(loan).await
    }

    pub async fn update_loan_schedule(
        &self,
        id: &LoanId,
        update: ScheduleUpdate,
    ) -> Result<StoredLoan, ServerError> {
        self.ledger.update_loan_schedule(id, update).await
    }

    pub async fn pay_installment(&self, id: &LoanId, number: u32) -> Result<StoredLoan, ServerError> {
        self.ledger.pay_installment(id, number).await
    }

    pub async fn settle_loan_fully(&self, id: &LoanId) -> Result<StoredLoan, ServerError> {
        self.ledger.settle_loan_fully(id).await
    }

    pub async fn delete_loan(&self, id: &LoanId) -> Result<(), ServerError> {
        self.ledger.delete_loan(id).await
    }

    /// Preview without persisting; missing values fall back to the config.
    pub fn quote(
        &self,
        principal: f64,
        interest_rate: Option<f64>,
        term_days: Option<u32>,
    ) -> Result<LoanQuote, ServerError> {
        self.ledger.quote(principal, interest_rate, term_days)
    }

    pub fn display_status(&self, loan: &StoredLoan) -> DisplayStatus {
        loan.data.display_status(self.clock.today())
    }

    // Portfolio.
    // ---

    pub async fn stats(&self) -> Result<PortfolioStats, ServerError> {
        self.portfolio.stats(self.clock.today()).await
    }

    pub async fn stats_on(&self, today: NaiveDate) -> Result<PortfolioStats, ServerError> {
        self.portfolio.stats(today).await
    }

    pub async fn worklist(&self) -> Result<CollectionWorklist, ServerError> {
        self.portfolio.worklist(self.clock.today()).await
    }

    pub async fn history(&self) -> Result<HistorySummary, ServerError> {
        self.portfolio.history().await
    }

    pub async fn client_summaries(&self) -> Result<Vec<(StoredClient, ClientSummary)>, ServerError> {
        self.portfolio.client_summaries(self.clock.today()).await
    }

    // Snapshots.
    // ---

    pub async fn records(&self) -> Result<LoanBookRecords, ServerError> {
        self.portfolio.load().await
    }

    pub async fn snapshot_string(&self) -> Result<String, ServerError> {
        let records = self.portfolio.load().await?;
        self.snapshots.to_string(&records)
    }

    pub async fn save_snapshot<P>(&self, path: P) -> Result<(), ServerError>
    where
        P: AsRef<std::path::Path> + Send,
    {
        let records = self.portfolio.load().await?;
        self.snapshots.to_file(&records, path).await
    }
}
