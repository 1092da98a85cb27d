use soroban_sdk::{contracttype, Address, Map, String, Vec};

// ==================== Roles ====================

/// User roles known to the registry. Patients are data subjects; clinicians
/// record observations and request predictions; the admin manages users and
/// scoring configuration.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[contracttype]
#[repr(u32)]
pub enum Role {
    Admin = 0,
    Clinician = 1,
    Patient = 2,
}

/// Registration record for one user address.
#[derive(Clone)]
#[contracttype]
pub struct UserProfile {
    pub user: Address,
    pub role: Role,
    pub registered_by: Address,
    pub registered_at: u64,
}

// ==================== Clinical Measurements ====================

/// Smoking status reported at data entry. Always present; the data-entry
/// layer defaults to `Never` when the patient is not asked.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[contracttype]
#[repr(u32)]
pub enum SmokingStatus {
    Never = 0,
    Former = 1,
    Current = 2,
}

/// Measurement payload for one clinical observation.
///
/// Optional measurements that were not taken stay `None`; zero always means
/// "measured as zero". Fractional measurements are scaled integers with the
/// scale noted per field.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct ObservationInput {
    /// Age in whole years.
    pub age: u32,
    /// Body-mass index in kg/m^2 scaled by 10 (314 = 31.4).
    pub bmi: Option<u32>,
    /// Systolic blood pressure in mmHg.
    pub blood_pressure_systolic: Option<u32>,
    /// Diastolic blood pressure in mmHg.
    pub blood_pressure_diastolic: Option<u32>,
    /// Blood glucose in mg/dL.
    pub glucose_level: Option<u32>,
    /// Total cholesterol in mg/dL.
    pub cholesterol: Option<u32>,
    /// Glycated hemoglobin in percent scaled by 10 (65 = 6.5%).
    pub hba1c: Option<u32>,
    /// Hospital admissions before this observation.
    pub previous_admissions: u32,
    /// Length of the most recent stay, in days.
    pub last_stay_duration: Option<u32>,
    pub has_diabetes: bool,
    pub has_hypertension: bool,
    pub has_heart_disease: bool,
    pub smoking_status: SmokingStatus,
    /// Free-text note, max 500 bytes. Never sent to the scorer.
    pub note: String,
}

/// A point-in-time set of measurements for one patient. Immutable once
/// recorded; multiple observations form the patient's time-ordered history.
#[derive(Clone)]
#[contracttype]
pub struct ClinicalObservation {
    pub id: u64,
    pub patient: Address,
    pub measurements: ObservationInput,
    pub recorded_by: Address,
    pub recorded_at: u64,
}

// ==================== Scoring ====================

/// Prediction model selector, forwarded to the scorer unchanged.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[contracttype]
#[repr(u32)]
pub enum PredictionKind {
    ReadmissionRisk = 0,
    DiabetesRisk = 1,
}

/// Ordinal risk classification. Derived locally from the score; the band
/// the scorer reports is advisory only.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[contracttype]
#[repr(u32)]
pub enum RiskBand {
    Low = 0,
    Medium = 1,
    High = 2,
}

/// Input schema of the scorer's `score` function. Field names match the
/// remote model's feature names one-to-one; `None` marks a measurement that
/// was never taken, and the scorer decides how to impute it.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct FeatureVector {
    pub age: u32,
    /// kg/m^2 scaled by 10.
    pub bmi: Option<u32>,
    pub blood_pressure_systolic: Option<u32>,
    pub blood_pressure_diastolic: Option<u32>,
    pub glucose_level: Option<u32>,
    pub cholesterol: Option<u32>,
    /// Percent scaled by 10.
    pub hba1c: Option<u32>,
    pub previous_admissions: u32,
    pub last_stay_duration: Option<u32>,
    pub has_diabetes: bool,
    pub has_hypertension: bool,
    pub has_heart_disease: bool,
    pub smoking_status: SmokingStatus,
}

/// Reply shape of the scorer's `score` function.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct ScoreResponse {
    /// Risk probability in basis points (10_000 = 1.0).
    pub risk_score: u32,
    /// Band the scorer derived itself. A hint; never stored as-is.
    pub risk_level: RiskBand,
    pub model_version: String,
    pub model_algorithm: String,
    /// Per-feature contribution weights in basis points, strongest first,
    /// at most one entry per feature.
    pub feature_importance: Vec<(String, u32)>,
    /// Scoring time the remote model reports for itself.
    pub processing_time_ms: u64,
}

/// Reply shape of the scorer's `health` probe.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct ScorerHealth {
    pub healthy: bool,
    pub model_loaded: bool,
    pub model_version: String,
    pub uptime_seconds: u64,
}

/// Scoring configuration fixed at initialization and changed only by the
/// admin.
#[derive(Clone)]
#[contracttype]
pub struct ScoringConfig {
    /// Address of the deployed scorer contract.
    pub scorer: Address,
    /// Ceiling on the scorer's self-reported processing time. A reply above
    /// this budget is treated as timed out and discarded.
    pub score_budget_ms: u64,
}

// ==================== Predictions ====================

/// The durable artifact of one successful orchestration run. Never mutated;
/// there is no deletion path.
#[derive(Clone)]
#[contracttype]
pub struct Prediction {
    pub id: u64,
    pub patient: Address,
    /// Source observation the features were mapped from.
    pub observation_id: u64,
    pub kind: PredictionKind,
    /// Risk probability in basis points (10_000 = 1.0).
    pub risk_score: u32,
    /// Band derived locally from `risk_score`; authoritative over the
    /// scorer's own hint.
    pub risk_band: RiskBand,
    pub model_version: String,
    pub model_algorithm: String,
    /// The exact feature vector sent to the scorer, embedded for audit.
    pub features: FeatureVector,
    pub feature_importance: Vec<(String, u32)>,
    pub processing_time_ms: u64,
    /// Clinician who requested the run.
    pub requested_by: Address,
    pub created_at: u64,
}

// ==================== Query / Response ====================

/// Paginated slice of the global prediction list, newest first.
#[derive(Clone)]
#[contracttype]
pub struct PredictionPage {
    pub predictions: Vec<Prediction>,
    /// Total records before pagination.
    pub total: u64,
    /// Zero-based page index this slice covers.
    pub page: u32,
    pub page_size: u32,
    pub has_more: bool,
}

/// Aggregates for the operational review surface. Computed on read by
/// walking the id range; nothing is pre-materialized.
#[derive(Clone)]
#[contracttype]
pub struct PredictionStatistics {
    pub total: u64,
    /// `RiskBand` repr -> count. Bands with no predictions are absent.
    pub count_by_band: Map<u32, u64>,
    /// `PredictionKind` repr -> count.
    pub count_by_kind: Map<u32, u64>,
    /// `PredictionKind` repr -> mean risk score in basis points
    /// (floor division).
    pub mean_score_by_kind: Map<u32, u32>,
    /// Most recent predictions, newest first, at most `STATS_RECENT_LIMIT`.
    pub recent: Vec<Prediction>,
}

/// Result of probing the configured scorer. Total once initialized: a probe
/// that cannot reach the scorer reports `reachable = false` instead of
/// failing the call.
#[derive(Clone)]
#[contracttype]
pub struct HealthReport {
    pub reachable: bool,
    pub healthy: bool,
    pub model_loaded: bool,
    pub model_version: String,
    pub uptime_seconds: u64,
    pub checked_at: u64,
}

// ==================== Storage Keys ====================

#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    // Singleton / lifecycle, instance storage
    Initialized,
    Admin,
    Config, // ScoringConfig

    // Registry, persistent
    User(Address), // UserProfile

    // Observations, persistent
    ObservationCount,             // u64 monotonic ID counter
    Observation(u64),             // ClinicalObservation
    PatientObservations(Address), // Vec<u64> ordered by insertion (oldest first)

    // Predictions, persistent, append-only
    PredictionCount,             // u64 monotonic ID counter == total stored
    Prediction(u64),             // Prediction
    PatientPredictions(Address), // Vec<u64> ordered by insertion (oldest first)

    // Diagnostics journal, persistent
    ErrorLog, // Vec<ErrorLogEntry>, bounded, oldest evicted first
}
