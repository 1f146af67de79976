use async_trait::async_trait;
use fractic_server_error::ServerError;
use tokio::sync::RwLock;

use crate::{
    domain::repositories::{client_store::ClientStore, loan_store::LoanStore},
    entities::{
        Client, ClientId, ClientPatch, Loan, LoanBookRecords, LoanId, LoanPatch, Stored,
        StoredClient, StoredLoan,
    },
    errors::{ClientNotFound, LoanNotFound, PermissionDenied},
};

#[derive(Default)]
struct State {
    clients: Vec<StoredClient>,
    // Insertion sequence is kept alongside each loan to break ties between
    // loans created at the same instant (newest insert first).
    loans: Vec<(u64, StoredLoan)>,
    next_seq: u64,
}

impl State {
    fn next_id(&mut self, prefix: &str, taken: impl Fn(&str) -> bool) -> String {
        loop {
            self.next_seq += 1;
            let candidate = format!("{}-{}", prefix, self.next_seq);
            if !taken(&candidate) {
                return candidate;
            }
        }
    }
}

/// Store holding both collections in memory. Implements `ClientStore` and
/// `LoanStore`; a read-only store rejects every write with `PermissionDenied`.
pub struct InMemoryStore {
    state: RwLock<State>,
    read_only: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(State::default()),
            read_only: false,
        }
    }

    /// Loans are expected newest first, as `records` returns them; that order
    /// is kept for loans created at the same instant.
    pub fn from_records(records: LoanBookRecords) -> Self {
        let count = records.loans.len() as u64;
        let loans = records
            .loans
            .into_iter()
            .enumerate()
            .map(|(i, loan)| (count - i as u64, loan))
            .collect::<Vec<_>>();
        Self {
            state: RwLock::new(State {
                clients: records.clients,
                next_seq: loans.len() as u64,
                loans,
            }),
            read_only: false,
        }
    }

    /// Same contents, but every write fails.
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// Current contents, clients by name and loans newest first.
    pub async fn records(&self) -> LoanBookRecords {
        let state = self.state.read().await;
        LoanBookRecords {
            clients: sorted_clients(&state.clients),
            loans: sorted_loans(&state.loans),
        }
    }

    fn check_writable(&self, operation: &str) -> Result<(), ServerError> {
        if self.read_only {
            return Err(PermissionDenied::new(operation));
        }
        Ok(())
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn sorted_clients(clients: &[StoredClient]) -> Vec<StoredClient> {
    let mut sorted = clients.to_vec();
    sorted.sort_by(|a, b| a.data.name.cmp(&b.data.name));
    sorted
}

fn sorted_loans(loans: &[(u64, StoredLoan)]) -> Vec<StoredLoan> {
    let mut sorted = loans.to_vec();
    sorted.sort_by(|(seq_a, a), (seq_b, b)| {
        b.data
            .created_at
            .cmp(&a.data.created_at)
            .then(seq_b.cmp(seq_a))
    });
    sorted.into_iter().map(|(_, loan)| loan).collect()
}

#[async_trait]
impl ClientStore for InMemoryStore {
    async fn add(&self, client: Client) -> Result<ClientId, ServerError> {
        self.check_writable("add client")?;
        let mut state = self.state.write().await;
        let existing: Vec<String> = state.clients.iter().map(|c| c.id.0.clone()).collect();
        let id = ClientId(state.next_id("client", |c| existing.iter().any(|e| e == c)));
        state.clients.push(Stored {
            id: id.clone(),
            data: client,
        });
        Ok(id)
    }

    async fn get(&self, id: &ClientId) -> Result<Option<StoredClient>, ServerError> {
        let state = self.state.read().await;
        Ok(state.clients.iter().find(|c| &c.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<StoredClient>, ServerError> {
        let state = self.state.read().await;
        Ok(sorted_clients(&state.clients))
    }

    async fn update(&self, id: &ClientId, patch: ClientPatch) -> Result<(), ServerError> {
        self.check_writable("update client")?;
        let mut state = self.state.write().await;
        let client = state
            .clients
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| ClientNotFound::new(id.as_str()))?;
        if let Some(name) = patch.name {
            client.data.name = name;
        }
        if let Some(phone) = patch.phone {
            client.data.phone = phone;
        }
        if let Some(notes) = patch.notes {
            client.data.notes = notes;
        }
        Ok(())
    }

    async fn delete(&self, id: &ClientId) -> Result<(), ServerError> {
        self.check_writable("delete client")?;
        let mut state = self.state.write().await;
        let before = state.clients.len();
        state.clients.retain(|c| &c.id != id);
        if state.clients.len() == before {
            return Err(ClientNotFound::new(id.as_str()));
        }
        Ok(())
    }
}

#[async_trait]
impl LoanStore for InMemoryStore {
    async fn add(&self, loan: Loan) -> Result<LoanId, ServerError> {
        self.check_writable("add loan")?;
        let mut state = self.state.write().await;
        let existing: Vec<String> = state.loans.iter().map(|(_, l)| l.id.0.clone()).collect();
        let id = LoanId(state.next_id("loan", |c| existing.iter().any(|e| e == c)));
        let seq = state.next_seq;
        state.loans.push((
            seq,
            Stored {
                id: id.clone(),
                data: loan,
            },
        ));
        Ok(id)
    }

    async fn get(&self, id: &LoanId) -> Result<Option<StoredLoan>, ServerError> {
        let state = self.state.read().await;
        Ok(state
            .loans
            .iter()
            .find(|(_, l)| &l.id == id)
            .map(|(_, l)| l.clone()))
    }

    async fn list(&self) -> Result<Vec<StoredLoan>, ServerError> {
        let state = self.state.read().await;
        Ok(sorted_loans(&state.loans))
    }

    async fn update_fields(&self, id: &LoanId, patch: LoanPatch) -> Result<(), ServerError> {
        self.check_writable("update loan")?;
        let mut state = self.state.write().await;
        let (_, loan) = state
            .loans
            .iter_mut()
            .find(|(_, l)| &l.id == id)
            .ok_or_else(|| LoanNotFound::new(id.as_str()))?;
        patch.apply_to(&mut loan.data);
        Ok(())
    }

    async fn delete(&self, id: &LoanId) -> Result<(), ServerError> {
        self.check_writable("delete loan")?;
        let mut state = self.state.write().await;
        let before = state.loans.len();
        state.loans.retain(|(_, l)| &l.id != id);
        if state.loans.len() == before {
            return Err(LoanNotFound::new(id.as_str()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone as _, Utc};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::entities::{LoanStatus, RepaymentPlan};

    fn client(name: &str) -> Client {
        Client {
            name: name.to_string(),
            phone: None,
            notes: None,
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn loan(client_name: &str, hour: u32) -> Loan {
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        Loan {
            client_id: None,
            client_name: client_name.to_string(),
            amount: 100.0,
            interest_rate: 10.0,
            total_owing: 110.0,
            profit: 10.0,
            start_date: start,
            due_date: start,
            plan: RepaymentPlan::SinglePayment,
            status: LoanStatus::Active,
            notes: None,
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, hour, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn clients_are_listed_by_name() {
        let store = InMemoryStore::new();
        for name in ["Carla", "Ana", "Bruno"] {
            ClientStore::add(&store, client(name)).await.unwrap();
        }
        let names: Vec<String> = ClientStore::list(&store)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.data.name)
            .collect();
        assert_eq!(names, vec!["Ana", "Bruno", "Carla"]);
    }

    #[tokio::test]
    async fn loans_are_listed_newest_first() {
        let store = InMemoryStore::new();
        LoanStore::add(&store, loan("first", 8)).await.unwrap();
        LoanStore::add(&store, loan("latest", 12)).await.unwrap();
        LoanStore::add(&store, loan("same-instant-a", 10)).await.unwrap();
        LoanStore::add(&store, loan("same-instant-b", 10)).await.unwrap();
        let names: Vec<String> = LoanStore::list(&store)
            .await
            .unwrap()
            .into_iter()
            .map(|l| l.data.client_name)
            .collect();
        assert_eq!(
            names,
            vec!["latest", "same-instant-b", "same-instant-a", "first"]
        );
    }

    #[tokio::test]
    async fn update_fields_only_touches_given_fields() {
        let store = InMemoryStore::new();
        let id = LoanStore::add(&store, loan("Ana", 8)).await.unwrap();
        store
            .update_fields(
                &id,
                LoanPatch {
                    status: Some(LoanStatus::Paid),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let stored = LoanStore::get(&store, &id).await.unwrap().unwrap();
        assert_eq!(stored.data.status, LoanStatus::Paid);
        assert_eq!(stored.data.plan, RepaymentPlan::SinglePayment);
        assert_eq!(stored.data.total_owing, 110.0);
    }

    #[tokio::test]
    async fn unknown_ids_are_not_found() {
        let store = InMemoryStore::new();
        assert!(LoanStore::delete(&store, &LoanId::new("nope")).await.is_err());
        assert!(ClientStore::delete(&store, &ClientId::new("nope")).await.is_err());
        assert!(store
            .update_fields(&LoanId::new("nope"), LoanPatch::default())
            .await
            .is_err());
        assert_eq!(LoanStore::get(&store, &LoanId::new("nope")).await.unwrap(), None);
    }

    #[tokio::test]
    async fn read_only_store_rejects_writes_but_serves_reads() {
        let mut records = LoanBookRecords::default();
        records.loans.push(Stored {
            id: LoanId::new("loan-7"),
            data: loan("Ana", 8),
        });
        let store = InMemoryStore::from_records(records).read_only();
        assert!(LoanStore::add(&store, loan("Bruno", 9)).await.is_err());
        assert!(ClientStore::add(&store, client("Bruno")).await.is_err());
        assert!(LoanStore::delete(&store, &LoanId::new("loan-7")).await.is_err());
        assert_eq!(LoanStore::list(&store).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn loaded_records_keep_their_order_for_equal_timestamps() {
        let store = InMemoryStore::new();
        for name in ["first", "second", "third"] {
            LoanStore::add(&store, loan(name, 10)).await.unwrap();
        }
        let records = store.records().await;
        let reloaded = InMemoryStore::from_records(records.clone());
        assert_eq!(reloaded.records().await, records);

        let id = LoanStore::add(&reloaded, loan("fourth", 10)).await.unwrap();
        let newest = LoanStore::list(&reloaded).await.unwrap().remove(0);
        assert_eq!(newest.id, id);
    }

    #[tokio::test]
    async fn generated_ids_skip_ids_loaded_from_records() {
        let mut records = LoanBookRecords::default();
        records.loans.push(Stored {
            id: LoanId::new("loan-2"),
            data: loan("Ana", 8),
        });
        let store = InMemoryStore::from_records(records);
        let id = LoanStore::add(&store, loan("Bruno", 9)).await.unwrap();
        assert_eq!(id, LoanId::new("loan-3"));
    }
}
