use std::sync::Arc;

use async_trait::async_trait;
use fractic_server_error::ServerError;
use tracing::{debug, info, instrument};

use crate::{
    domain::repositories::client_store::ClientStore,
    entities::{Client, ClientId, ClientPatch, Clock, StoredClient},
    errors::{ClientNotFound, InvalidClientName},
};

#[async_trait]
pub trait ClientRegistryUsecase: Send + Sync {
    async fn add_client(
        &self,
        name: &str,
        phone: Option<&str>,
        notes: Option<&str>,
    ) -> Result<ClientId, ServerError>;

    async fn get_client(&self, id: &ClientId) -> Result<Option<StoredClient>, ServerError>;

    async fn list_clients(&self) -> Result<Vec<StoredClient>, ServerError>;

    async fn search_clients(&self, term: &str) -> Result<Vec<StoredClient>, ServerError>;

    async fn update_client(&self, id: &ClientId, patch: ClientPatch) -> Result<(), ServerError>;

    async fn delete_client(&self, id: &ClientId) -> Result<(), ServerError>;
}

pub(crate) struct ClientRegistryUsecaseImpl<S, K>
where
    S: ClientStore,
    K: Clock,
{
    clients: Arc<S>,
    clock: Arc<K>,
}

impl<S, K> ClientRegistryUsecaseImpl<S, K>
where
    S: ClientStore,
    K: Clock,
{
    pub(crate) fn new(clients: Arc<S>, clock: Arc<K>) -> Self {
        Self { clients, clock }
    }
}

/// Trims optional free-text input; blank values become `None`.
fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn matches_search(client: &StoredClient, term: &str) -> bool {
    let term = term.trim();
    client
        .data
        .name
        .to_lowercase()
        .contains(&term.to_lowercase())
        || client
            .data
            .phone
            .as_deref()
            .is_some_and(|phone| phone.contains(term))
}

#[async_trait]
impl<S, K> ClientRegistryUsecase for ClientRegistryUsecaseImpl<S, K>
where
    S: ClientStore,
    K: Clock,
{
    #[instrument(skip(self))]
    async fn add_client(
        &self,
        name: &str,
        phone: Option<&str>,
        notes: Option<&str>,
    ) -> Result<ClientId, ServerError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(InvalidClientName::new());
        }
        let id = self
            .clients
            .add(Client {
                name: name.to_string(),
                phone: non_blank(phone),
                notes: non_blank(notes),
                created_at: self.clock.now(),
            })
            .await?;
        info!(client_id = %id, "client registered");
        Ok(id)
    }

    async fn get_client(&self, id: &ClientId) -> Result<Option<StoredClient>, ServerError> {
        self.clients.get(id).await
    }

    async fn list_clients(&self) -> Result<Vec<StoredClient>, ServerError> {
        self.clients.list().await
    }

    #[instrument(skip(self))]
    async fn search_clients(&self, term: &str) -> Result<Vec<StoredClient>, ServerError> {
        let found: Vec<StoredClient> = self
            .clients
            .list()
            .await?
            .into_iter()
            .filter(|c| matches_search(c, term))
            .collect();
        debug!(matches = found.len(), "client search");
        Ok(found)
    }

    #[instrument(skip(self))]
    async fn update_client(&self, id: &ClientId, patch: ClientPatch) -> Result<(), ServerError> {
        let patch = ClientPatch {
            name: match patch.name {
                Some(name) if name.trim().is_empty() => return Err(InvalidClientName::new()),
                name => name.map(|n| n.trim().to_string()),
            },
            phone: patch.phone.map(|p| non_blank(p.as_deref())),
            notes: patch.notes.map(|n| non_blank(n.as_deref())),
        };
        if self.clients.get(id).await?.is_none() {
            return Err(ClientNotFound::new(id.as_str()));
        }
        self.clients.update(id, patch).await?;
        info!(client_id = %id, "client updated");
        Ok(())
    }

    /// Loans referencing the client are left untouched; they keep the name
    /// snapshot taken when they were created.
    #[instrument(skip(self))]
    async fn delete_client(&self, id: &ClientId) -> Result<(), ServerError> {
        self.clients.delete(id).await?;
        info!(client_id = %id, "client deleted");
        Ok(())
    }
}
