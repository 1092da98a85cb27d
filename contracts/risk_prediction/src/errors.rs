use soroban_sdk::{contracterror, contracttype, Address, Env, String};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // --- Lifecycle (1–2) ---
    AlreadyInitialized = 1,
    NotInitialized = 2,

    // --- Authorization & registry (3–5) ---
    NotAuthorized = 3,
    UserNotFound = 4,
    InvalidRoleAssignment = 5,

    // --- Entity lookups (6–8) ---
    PatientNotFound = 6,
    ObservationNotFound = 7,
    PredictionNotFound = 8,

    // --- Observation validation (9–11) ---
    InvalidAge = 9,
    MeasurementOutOfRange = 10,
    NoteTooLong = 11,

    // --- Queries (12) ---
    InvalidPagination = 12,

    // --- Scoring (13–14) ---
    InferenceUnavailable = 13,
    InvalidScore = 14,
}

/// Stable error metadata surfaced to clients and tooling.
#[derive(Clone)]
#[contracttype]
pub struct ErrorInfo {
    pub code: u32,
    pub message: String,
}

/// One entry of the persisted diagnostics journal.
#[derive(Clone)]
#[contracttype]
pub struct ErrorLogEntry {
    pub error: Error,
    pub code: u32,
    /// `operation:detail`, e.g. `check_remote_health:unreachable`.
    pub context: String,
    pub actor: Option<Address>,
    pub timestamp: u64,
}

/// Human-readable description for an error code.
pub fn error_message(env: &Env, error: Error) -> String {
    let text = match error {
        Error::AlreadyInitialized => "contract is already initialized",
        Error::NotInitialized => "contract is not initialized",
        Error::NotAuthorized => "caller lacks the required role",
        Error::UserNotFound => "user is not registered",
        Error::InvalidRoleAssignment => "role cannot be assigned this way",
        Error::PatientNotFound => "patient is not registered",
        Error::ObservationNotFound => "observation does not exist for this patient",
        Error::PredictionNotFound => "prediction does not exist",
        Error::InvalidAge => "age is outside the accepted range",
        Error::MeasurementOutOfRange => "a measurement is outside its clinical range",
        Error::NoteTooLong => "note exceeds the maximum length",
        Error::InvalidPagination => "page size must be between 1 and the maximum",
        Error::InferenceUnavailable => "scoring service unavailable, try again later",
        Error::InvalidScore => "scorer returned an out-of-range probability",
    };
    String::from_str(env, text)
}
