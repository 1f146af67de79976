use fractic_server_error::ServerError;

use crate::entities::{LoanBookRecords, StoredClient, StoredLoan};

use super::{client_model::ClientModel, loan_model::LoanModel};

#[derive(Debug, Default, serde_derive::Serialize, serde_derive::Deserialize)]
pub(crate) struct LoanBookRecordsModel {
    #[serde(default)]
    pub(crate) clients: Vec<ClientModel>,
    #[serde(default)]
    pub(crate) loans: Vec<LoanModel>,
}

impl TryFrom<LoanBookRecordsModel> for LoanBookRecords {
    type Error = ServerError;
    fn try_from(model: LoanBookRecordsModel) -> Result<Self, Self::Error> {
        Ok(LoanBookRecords {
            clients: model
                .clients
                .into_iter()
                .map(StoredClient::try_from)
                .collect::<Result<Vec<_>, ServerError>>()?,
            loans: model
                .loans
                .into_iter()
                .map(StoredLoan::try_from)
                .collect::<Result<Vec<_>, ServerError>>()?,
        })
    }
}

impl From<&LoanBookRecords> for LoanBookRecordsModel {
    fn from(records: &LoanBookRecords) -> Self {
        Self {
            clients: records.clients.iter().map(Into::into).collect(),
            loans: records.loans.iter().map(Into::into).collect(),
        }
    }
}
