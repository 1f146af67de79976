use fractic_server_error::{define_client_error, define_internal_error};

// IO-related.
define_client_error!(ReadError, "Error reading file.");
define_internal_error!(WriteError, "Error writing file.");

// Parsing-related.
define_client_error!(InvalidRon, "Invalid {ron_type} (invalid RON format).", { ron_type: &str });
define_client_error!(InvalidIsoDate, "Invalid ISO date: {date}.", { date: &str });
define_client_error!(InvalidTimestamp, "Invalid timestamp: {millis}.", { millis: i64 });
define_internal_error!(
    RonSerializationFailed,
    "Failed to serialize {ron_type} as RON.",
    { ron_type: &str }
);

// Validation (raised before any store call).
define_client_error!(
    InvalidPrincipal,
    "Invalid principal: {principal}. Principal must be a positive amount.",
    { principal: f64 }
);
define_client_error!(
    InvalidInterestRate,
    "Invalid interest rate: {rate}%. Rate must be zero or positive.",
    { rate: f64 }
);
define_client_error!(
    InvalidInstallmentCount,
    "Invalid installment count: {count}. At least one installment is required.",
    { count: u32 }
);
define_client_error!(
    InvalidScheduleDays,
    "Invalid schedule: {details}.",
    { details: &str }
);
define_client_error!(MissingClient, "No client selected for the loan.");
define_client_error!(InvalidClientName, "Client name must not be blank.");
define_client_error!(
    InvalidScheduleUpdate,
    "Invalid schedule update for loan '{loan_id}': {details}.",
    { loan_id: &str, details: &str }
);

// Lookup.
define_client_error!(LoanNotFound, "Loan '{loan_id}' not found.", { loan_id: &str });
define_client_error!(ClientNotFound, "Client '{client_id}' not found.", { client_id: &str });
define_client_error!(
    InstallmentNotFound,
    "Loan '{loan_id}' has no installment number {number}.",
    { loan_id: &str, number: u32 }
);

// Store-originated.
define_client_error!(
    PermissionDenied,
    "Permission denied: the store rejected '{operation}'.",
    { operation: &str }
);

// Configuration.
define_client_error!(
    InvalidDecimalPlaces,
    "Invalid number of decimal places: {decimal_places}. At most {max} are supported.",
    { decimal_places: u32, max: u32 }
);
define_client_error!(
    InvalidConfig,
    "Invalid ledger configuration: {details}.",
    { details: &str }
);
define_client_error!(
    InvalidStoredLoan,
    "Stored loan '{loan_id}' is inconsistent: {details}.",
    { loan_id: &str, details: &str }
);
