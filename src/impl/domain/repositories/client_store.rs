use async_trait::async_trait;
use fractic_server_error::ServerError;

use crate::entities::{Client, ClientId, ClientPatch, StoredClient};

/// Persistence of client records. Any write may fail with `PermissionDenied`.
#[async_trait]
pub trait ClientStore: Send + Sync {
    async fn add(&self, client: Client) -> Result<ClientId, ServerError>;

    async fn get(&self, id: &ClientId) -> Result<Option<StoredClient>, ServerError>;

    /// All clients, ordered by name ascending.
    async fn list(&self) -> Result<Vec<StoredClient>, ServerError>;

    async fn update(&self, id: &ClientId, patch: ClientPatch) -> Result<(), ServerError>;

    async fn delete(&self, id: &ClientId) -> Result<(), ServerError>;
}
