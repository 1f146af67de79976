use async_trait::async_trait;
use fractic_server_error::ServerError;

use crate::entities::LoanBookRecords;

/// Persists whole loan books outside the live store.
#[async_trait]
pub trait SnapshotRepository: Send + Sync {
    fn from_string(&self, snapshot: &str) -> Result<LoanBookRecords, ServerError>;

    fn to_string(&self, records: &LoanBookRecords) -> Result<String, ServerError>;

    async fn from_file<P>(&self, path: P) -> Result<LoanBookRecords, ServerError>
    where
        P: AsRef<std::path::Path> + Send;

    async fn to_file<P>(&self, records: &LoanBookRecords, path: P) -> Result<(), ServerError>
    where
        P: AsRef<std::path::Path> + Send;
}
