use fractic_server_error::ServerError;
use ron::from_str;

use crate::{
    data::models::ledger_config_model::LedgerConfigModel,
    entities::LedgerConfig,
    errors::{InvalidRon, ReadError},
};

pub(crate) struct ConfigRonDatasource;

impl ConfigRonDatasource {
    pub(crate) fn from_string(s: &str) -> Result<LedgerConfig, ServerError> {
        let model: LedgerConfigModel =
            from_str(s).map_err(|e| InvalidRon::with_debug("LedgerConfig", &e))?;
        let config: LedgerConfig = model.into();
        config.validate()?;
        Ok(config)
    }

    pub(crate) async fn from_file<P>(path: P) -> Result<LedgerConfig, ServerError>
    where
        P: AsRef<std::path::Path>,
    {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ReadError::with_debug(&e))?;
        Self::from_string(&contents)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config =
            ConfigRonDatasource::from_string("(default_interest_rate: 15.0, recent_loans_limit: 10)")
                .unwrap();
        assert_eq!(
            config,
            LedgerConfig {
                default_interest_rate: 15.0,
                recent_loans_limit: 10,
                ..LedgerConfig::default()
            }
        );
    }

    #[test]
    fn empty_struct_is_the_default_config() {
        assert_eq!(
            ConfigRonDatasource::from_string("()").unwrap(),
            LedgerConfig::default()
        );
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert!(ConfigRonDatasource::from_string("(amount_decimal_places: 11)").is_err());
        assert!(ConfigRonDatasource::from_string("(amount_decimal_places: 4000000000)").is_err());
        assert!(ConfigRonDatasource::from_string("(default_interest_rate: -1.0)").is_err());
        assert!(ConfigRonDatasource::from_string("(default_term_days: 0)").is_err());
        assert_eq!(
            ConfigRonDatasource::from_string("(amount_decimal_places: 10)")
                .unwrap()
                .amount_decimal_places,
            10
        );
    }

    #[test]
    fn rejects_invalid_ron() {
        assert!(ConfigRonDatasource::from_string("(default_term_days: \"thirty\")").is_err());
    }
}
