use async_trait::async_trait;
use fractic_server_error::ServerError;
use ron::{from_str, ser::PrettyConfig};

use crate::{
    data::models::records_model::LoanBookRecordsModel,
    entities::LoanBookRecords,
    errors::{InvalidRon, ReadError, RonSerializationFailed, WriteError},
};

/// Reads and writes whole loan books as RON documents.
#[async_trait]
pub(crate) trait RecordsRonDatasource: Send + Sync {
    fn from_string(&self, s: &str) -> Result<LoanBookRecords, ServerError>;

    fn to_string(&self, records: &LoanBookRecords) -> Result<String, ServerError>;

    async fn from_file<P>(&self, path: P) -> Result<LoanBookRecords, ServerError>
    where
        P: AsRef<std::path::Path> + Send;

    async fn to_file<P>(&self, records: &LoanBookRecords, path: P) -> Result<(), ServerError>
    where
        P: AsRef<std::path::Path> + Send;
}

pub(crate) struct RecordsRonDatasourceImpl;

impl RecordsRonDatasourceImpl {
    pub(crate) fn new() -> Self {
        Self
    }
}

#[async_trait]
impl RecordsRonDatasource for RecordsRonDatasourceImpl {
    fn from_string(&self, s: &str) -> Result<LoanBookRecords, ServerError> {
        let model: LoanBookRecordsModel =
            from_str(s).map_err(|e| InvalidRon::with_debug("LoanBookRecords", &e))?;
        model.try_into()
    }

    fn to_string(&self, records: &LoanBookRecords) -> Result<String, ServerError> {
        ron::ser::to_string_pretty(&LoanBookRecordsModel::from(records), PrettyConfig::default())
            .map_err(|e| RonSerializationFailed::with_debug("LoanBookRecords", &e))
    }

    async fn from_file<P>(&self, path: P) -> Result<LoanBookRecords, ServerError>
    where
        P: AsRef<std::path::Path> + Send,
    {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ReadError::with_debug(&e))?;
        self.from_string(&contents)
    }

    async fn to_file<P>(&self, records: &LoanBookRecords, path: P) -> Result<(), ServerError>
    where
        P: AsRef<std::path::Path> + Send,
    {
        let contents = self.to_string(records)?;
        tokio::fs::write(path, contents)
            .await
            .map_err(|e| WriteError::with_debug(&e))
    }
}
