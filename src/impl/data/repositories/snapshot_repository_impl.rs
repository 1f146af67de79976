use async_trait::async_trait;
use fractic_server_error::ServerError;
use tracing::info;

use crate::{
    data::datasources::records_ron_datasource::{RecordsRonDatasource, RecordsRonDatasourceImpl},
    domain::repositories::snapshot_repository::SnapshotRepository,
    entities::LoanBookRecords,
};

pub(crate) struct SnapshotRepositoryImpl<DS>
where
    DS: RecordsRonDatasource,
{
    datasource: DS,
}

#[async_trait]
impl<DS> SnapshotRepository for SnapshotRepositoryImpl<DS>
where
    DS: RecordsRonDatasource,
{
    fn from_string(&self, snapshot: &str) -> Result<LoanBookRecords, ServerError> {
        self.datasource.from_string(snapshot)
    }

    fn to_string(&self, records: &LoanBookRecords) -> Result<String, ServerError> {
        self.datasource.to_string(records)
    }

    async fn from_file<P>(&self, path: P) -> Result<LoanBookRecords, ServerError>
    where
        P: AsRef<std::path::Path> + Send,
    {
        let display = path.as_ref().display().to_string();
        let records = self.datasource.from_file(path).await?;
        info!(
            path = %display,
            clients = records.clients.len(),
            loans = records.loans.len(),
            "snapshot loaded"
        );
        Ok(records)
    }

    async fn to_file<P>(&self, records: &LoanBookRecords, path: P) -> Result<(), ServerError>
    where
        P: AsRef<std::path::Path> + Send,
    {
        let display = path.as_ref().display().to_string();
        self.datasource.to_file(records, path).await?;
        info!(path = %display, loans = records.loans.len(), "snapshot saved");
        Ok(())
    }
}

impl SnapshotRepositoryImpl<RecordsRonDatasourceImpl> {
    pub(crate) fn new() -> Self {
        Self {
            datasource: RecordsRonDatasourceImpl::new(),
        }
    }
}
