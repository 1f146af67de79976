use chrono::DateTime;
use fractic_server_error::ServerError;

use crate::{
    entities::{Client, ClientId, Stored, StoredClient},
    errors::InvalidTimestamp,
};

#[derive(Debug, serde_derive::Serialize, serde_derive::Deserialize)]
pub(crate) struct ClientModel {
    pub(crate) id: String,
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) phone: Option<String>,
    #[serde(default)]
    pub(crate) notes: Option<String>,
    /// Milliseconds since the Unix epoch.
    pub(crate) created_at: i64,
}

impl TryFrom<ClientModel> for StoredClient {
    type Error = ServerError;
    fn try_from(model: ClientModel) -> Result<Self, Self::Error> {
        Ok(Stored {
            id: ClientId(model.id),
            data: Client {
                name: model.name,
                phone: model.phone,
                notes: model.notes,
                created_at: DateTime::from_timestamp_millis(model.created_at)
                    .ok_or_else(|| InvalidTimestamp::new(model.created_at))?,
            },
        })
    }
}

impl From<&StoredClient> for ClientModel {
    fn from(client: &StoredClient) -> Self {
        Self {
            id: client.id.0.clone(),
            name: client.data.name.clone(),
            phone: client.data.phone.clone(),
            notes: client.data.notes.clone(),
            created_at: client.data.created_at.timestamp_millis(),
        }
    }
}
