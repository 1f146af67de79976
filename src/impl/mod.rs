// Crate-internal.
// ---

pub(crate) mod data {
    pub(crate) mod datasources {
        pub(crate) mod config_ron_datasource;
        pub(crate) mod records_ron_datasource;
    }
    pub(crate) mod models {
        pub(crate) mod client_model;
        pub(crate) mod iso_date_model;
        pub(crate) mod ledger_config_model;
        pub(crate) mod loan_model;
        pub(crate) mod records_model;
    }
    pub(crate) mod repositories {
        pub(crate) mod in_memory_store;
        pub(crate) mod snapshot_repository_impl;
    }
}

pub(crate) mod domain {
    pub(crate) mod entities {
        pub(crate) mod client;
        pub(crate) mod clock;
        pub(crate) mod display_status;
        pub(crate) mod installment;
        pub(crate) mod ledger_config;
        pub(crate) mod loan;
        pub(crate) mod loan_request;
        pub(crate) mod portfolio_stats;
        pub(crate) mod schedule;
        pub(crate) mod stored;
    }
    pub(crate) mod logic {
        pub(crate) mod aggregation;
        pub(crate) mod installment_scheduler;
        pub(crate) mod loan_terms;
        pub(crate) mod payment_processor;
        pub(crate) mod status_evaluator;
        pub(crate) mod utils;
    }
    pub(crate) mod repositories {
        pub(crate) mod client_store;
        pub(crate) mod loan_store;
        pub(crate) mod snapshot_repository;
    }
    pub(crate) mod usecases {
        pub(crate) mod client_registry_usecase;
        pub(crate) mod loan_ledger_usecase;
        pub(crate) mod portfolio_usecase;
    }
}

// Public exports.
// ---

#[doc(hidden)]
#[allow(unused_imports)]
pub mod exports {
    // This mod represents how clients see the library, and can differ from the
    // internal structure.
    //
    // The contents of this mod are re-exported in the root of the crate.

    pub mod entities {
        pub use crate::domain::entities::client::*;
        pub use crate::domain::entities::clock::*;
        pub use crate::domain::entities::display_status::*;
        pub use crate::domain::entities::installment::*;
        pub use crate::domain::entities::ledger_config::*;
        pub use crate::domain::entities::loan::*;
        pub use crate::domain::entities::loan_request::*;
        pub use crate::domain::entities::portfolio_stats::*;
        pub use crate::domain::entities::schedule::*;
        pub use crate::domain::entities::stored::*;
    }

    pub mod stores {
        pub use crate::data::repositories::in_memory_store::InMemoryStore;
        pub use crate::domain::repositories::client_store::ClientStore;
        pub use crate::domain::repositories::loan_store::LoanStore;
    }

    pub mod usecases {
        pub use crate::domain::usecases::client_registry_usecase::ClientRegistryUsecase;
        pub use crate::domain::usecases::loan_ledger_usecase::LoanLedgerUsecase;
        pub use crate::domain::usecases::portfolio_usecase::PortfolioUsecase;
    }
}
