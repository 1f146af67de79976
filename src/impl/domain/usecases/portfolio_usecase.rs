use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use fractic_server_error::ServerError;
use tracing::{debug, instrument};

use crate::{
    domain::{
        logic::aggregation::PortfolioAggregator,
        repositories::{client_store::ClientStore, loan_store::LoanStore},
    },
    entities::{
        ClientSummary, CollectionWorklist, HistorySummary, LoanBookRecords, PortfolioStats,
        StoredClient,
    },
};

#[async_trait]
pub trait PortfolioUsecase: Send + Sync {
    /// Full snapshot of both collections, clients by name and loans newest
    /// first.
    async fn load(&self) -> Result<LoanBookRecords, ServerError>;

    async fn stats(&self, today: NaiveDate) -> Result<PortfolioStats, ServerError>;

    /// Active loans split into those to collect today (due today or late)
    /// and those still open.
    async fn worklist(&self, today: NaiveDate) -> Result<CollectionWorklist, ServerError>;

    async fn history(&self) -> Result<HistorySummary, ServerError>;

    async fn client_summaries(
        &self,
        today: NaiveDate,
    ) -> Result<Vec<(StoredClient, ClientSummary)>, ServerError>;
}

pub(crate) struct PortfolioUsecaseImpl<CS, LS>
where
    CS: ClientStore,
    LS: LoanStore,
{
    clients: Arc<CS>,
    loans: Arc<LS>,
}

impl<CS, LS> PortfolioUsecaseImpl<CS, LS>
where
    CS: ClientStore,
    LS: LoanStore,
{
    pub(crate) fn new(clients: Arc<CS>, loans: Arc<LS>) -> Self {
        Self { clients, loans }
    }
}

#[async_trait]
impl<CS, LS> PortfolioUsecase for PortfolioUsecaseImpl<CS, LS>
where
    CS: ClientStore,
    LS: LoanStore,
{
    async fn load(&self) -> Result<LoanBookRecords, ServerError> {
        let (clients, loans) = futures::try_join!(self.clients.list(), self.loans.list())?;
        debug!(clients = clients.len(), loans = loans.len(), "loan book loaded");
        Ok(LoanBookRecords { clients, loans })
    }

    #[instrument(skip(self))]
    async fn stats(&self, today: NaiveDate) -> Result<PortfolioStats, ServerError> {
        let loans = self.loans.list().await?;
        Ok(PortfolioAggregator::new(&loans, today).stats())
    }

    #[instrument(skip(self))]
    async fn worklist(&self, today: NaiveDate) -> Result<CollectionWorklist, ServerError> {
        let loans = self.loans.list().await?;
        Ok(PortfolioAggregator::new(&loans, today).worklist())
    }

    async fn history(&self) -> Result<HistorySummary, ServerError> {
        let loans = self.loans.list().await?;
        // History does not depend on the date.
        Ok(PortfolioAggregator::new(&loans, NaiveDate::MIN).history())
    }

    #[instrument(skip(self))]
    async fn client_summaries(
        &self,
        today: NaiveDate,
    ) -> Result<Vec<(StoredClient, ClientSummary)>, ServerError> {
        let LoanBookRecords { clients, loans } = self.load().await?;
        let aggregator = PortfolioAggregator::new(&loans, today);
        Ok(clients
            .into_iter()
            .map(|client| {
                let summary = aggregator.client_summary(&client.id);
                (client, summary)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone as _, Utc};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        data::repositories::in_memory_store::InMemoryStore,
        entities::{Client, ClientId, Loan, LoanStatus, RepaymentPlan},
    };

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn loan(client_id: &ClientId, amount: f64, due_date: NaiveDate, status: LoanStatus) -> Loan {
        Loan {
            client_id: Some(client_id.clone()),
            client_name: "Ana".to_string(),
            amount,
            interest_rate: 20.0,
            total_owing: amount * 1.2,
            profit: amount * 0.2,
            start_date: date(2025, 1, 1),
            due_date,
            plan: RepaymentPlan::SinglePayment,
            status,
            notes: None,
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap(),
        }
    }

    async fn seeded() -> (PortfolioUsecaseImpl<InMemoryStore, InMemoryStore>, ClientId) {
        let store = Arc::new(InMemoryStore::new());
        let ana = ClientStore::add(
            store.as_ref(),
            Client {
                name: "Ana".to_string(),
                phone: None,
                notes: None,
                created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            },
        )
        .await
        .unwrap();
        ClientStore::add(
            store.as_ref(),
            Client {
                name: "Bruno".to_string(),
                phone: None,
                notes: None,
                created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            },
        )
        .await
        .unwrap();
        for (amount, due, status) in [
            (100.0, date(2025, 2, 10), LoanStatus::Active),
            (200.0, date(2025, 2, 1), LoanStatus::Active),
            (300.0, date(2025, 3, 1), LoanStatus::Active),
            (500.0, date(2025, 1, 20), LoanStatus::Paid),
        ] {
            LoanStore::add(store.as_ref(), loan(&ana, amount, due, status))
                .await
                .unwrap();
        }
        (PortfolioUsecaseImpl::new(store.clone(), store), ana)
    }

    #[tokio::test]
    async fn stats_over_the_stored_book() {
        let (portfolio, _) = seeded().await;
        let stats = portfolio.stats(date(2025, 2, 10)).await.unwrap();
        assert!((stats.total_lent - 1100.0).abs() < 1e-9);
        assert!((stats.total_receivable - 720.0).abs() < 1e-9);
        assert!((stats.total_profit - 220.0).abs() < 1e-9);
        assert_eq!(stats.active_loans_count, 3);
        assert_eq!(stats.loans_due_today_count, 2);
    }

    #[tokio::test]
    async fn empty_book_has_zero_stats() {
        let store = Arc::new(InMemoryStore::new());
        let portfolio = PortfolioUsecaseImpl::new(store.clone(), store);
        assert_eq!(
            portfolio.stats(date(2025, 2, 10)).await.unwrap(),
            PortfolioStats::default()
        );
        assert_eq!(portfolio.load().await.unwrap(), LoanBookRecords::default());
    }

    #[tokio::test]
    async fn worklist_and_history() {
        let (portfolio, _) = seeded().await;
        let worklist = portfolio.worklist(date(2025, 2, 10)).await.unwrap();
        assert_eq!(worklist.due_now.len(), 2);
        assert_eq!(worklist.upcoming.len(), 1);
        assert!((worklist.total_to_collect_now - 360.0).abs() < 1e-9);

        let history = portfolio.history().await.unwrap();
        assert_eq!(history.paid_loans_count, 1);
        assert!((history.volume_moved - 600.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn client_summaries_follow_client_order() {
        let (portfolio, ana) = seeded().await;
        let summaries = portfolio.client_summaries(date(2025, 2, 10)).await.unwrap();
        let names: Vec<&str> = summaries.iter().map(|(c, _)| c.data.name.as_str()).collect();
        assert_eq!(names, vec!["Ana", "Bruno"]);
        assert_eq!(summaries[0].0.id, ana);
        assert_eq!(summaries[0].1.active_loans, 3);
        assert_eq!(summaries[0].1.paid_loans, 1);
        assert_eq!(summaries[1].1, ClientSummary::default());
    }
}
