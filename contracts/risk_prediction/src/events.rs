use soroban_sdk::{contracttype, symbol_short, Address, Env};

use crate::scoring::ScoreFailure;

// ==================== Event Payload Structs ====================
// Typed payloads published to the Soroban event log. Indexers subscribe via
// the ("RISK", <short name>) topic pair.

#[derive(Clone)]
#[contracttype]
pub struct InitializedEvent {
    pub admin: Address,
    pub scorer: Address,
    pub score_budget_ms: u64,
    pub timestamp: u64,
}

#[derive(Clone)]
#[contracttype]
pub struct UserManagedEvent {
    pub user: Address,
    /// Role repr value.
    pub role: u32,
    pub managed_by: Address,
    pub timestamp: u64,
}

#[derive(Clone)]
#[contracttype]
pub struct ObservationRecordedEvent {
    pub observation_id: u64,
    pub patient: Address,
    pub recorded_by: Address,
    pub timestamp: u64,
}

#[derive(Clone)]
#[contracttype]
pub struct PredictionRecordedEvent {
    pub prediction_id: u64,
    pub patient: Address,
    pub observation_id: u64,
    /// PredictionKind repr value.
    pub kind: u32,
    /// Basis points.
    pub risk_score: u32,
    /// RiskBand repr value.
    pub risk_band: u32,
    pub requested_by: Address,
    pub processing_time_ms: u64,
    pub timestamp: u64,
}

/// Postmortem context for a scoring attempt that produced no prediction.
/// Published before the run aborts; surfaces in diagnostic transaction
/// metadata.
#[derive(Clone)]
#[contracttype]
pub struct ScoringFailedEvent {
    pub patient: Address,
    pub observation_id: u64,
    /// PredictionKind repr value.
    pub kind: u32,
    pub scorer: Address,
    /// ScoreFailure cause tag: 0 unreachable, 1 timed out, 2 rejected,
    /// 3 malformed.
    pub cause: u32,
    /// Error code the scorer rejected with, when it did.
    pub remote_code: Option<u32>,
    /// Processing time the scorer reported, when a reply arrived.
    pub reported_ms: Option<u64>,
    pub budget_ms: u64,
    pub timestamp: u64,
}

/// The scorer returned a probability outside [0, 10_000]. A defect on the
/// scorer's side; the run aborted instead of clamping.
#[derive(Clone)]
#[contracttype]
pub struct ScoreRejectedEvent {
    pub patient: Address,
    pub observation_id: u64,
    /// PredictionKind repr value.
    pub kind: u32,
    pub risk_score: u32,
    pub scorer: Address,
    pub timestamp: u64,
}

/// The scorer's band hint disagreed with the locally derived band. The
/// local band was stored.
#[derive(Clone)]
#[contracttype]
pub struct BandHintMismatchEvent {
    pub prediction_id: u64,
    /// RiskBand repr the scorer reported.
    pub reported: u32,
    /// RiskBand repr derived locally.
    pub derived: u32,
    pub risk_score: u32,
    pub timestamp: u64,
}

#[derive(Clone)]
#[contracttype]
pub struct HealthProbedEvent {
    pub scorer: Address,
    pub reachable: bool,
    pub healthy: bool,
    pub model_loaded: bool,
    pub timestamp: u64,
}

#[derive(Clone)]
#[contracttype]
pub struct ConfigUpdatedEvent {
    pub scorer: Address,
    pub score_budget_ms: u64,
    pub updated_by: Address,
    pub timestamp: u64,
}

// ==================== Emit Functions ====================

pub fn emit_initialized(env: &Env, admin: Address, scorer: Address, score_budget_ms: u64) {
    env.events().publish(
        ("RISK", symbol_short!("INIT")),
        InitializedEvent {
            admin,
            scorer,
            score_budget_ms,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_user_managed(env: &Env, user: Address, role: u32, managed_by: Address) {
    env.events().publish(
        ("RISK", symbol_short!("USER_SET")),
        UserManagedEvent {
            user,
            role,
            managed_by,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_observation_recorded(
    env: &Env,
    observation_id: u64,
    patient: Address,
    recorded_by: Address,
) {
    env.events().publish(
        ("RISK", symbol_short!("OBS_NEW")),
        ObservationRecordedEvent {
            observation_id,
            patient,
            recorded_by,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_prediction_recorded(
    env: &Env,
    prediction_id: u64,
    patient: Address,
    observation_id: u64,
    kind: u32,
    risk_score: u32,
    risk_band: u32,
    requested_by: Address,
    processing_time_ms: u64,
) {
    env.events().publish(
        ("RISK", symbol_short!("PRED_NEW")),
        PredictionRecordedEvent {
            prediction_id,
            patient,
            observation_id,
            kind,
            risk_score,
            risk_band,
            requested_by,
            processing_time_ms,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_scoring_failed(
    env: &Env,
    patient: Address,
    observation_id: u64,
    kind: u32,
    scorer: Address,
    budget_ms: u64,
    failure: &ScoreFailure,
) {
    let (remote_code, reported_ms) = match failure {
        ScoreFailure::RemoteRejected { code } => (Some(*code), None),
        ScoreFailure::TimedOut { reported_ms } => (None, Some(*reported_ms)),
        _ => (None, None),
    };
    env.events().publish(
        ("RISK", symbol_short!("SCR_FAIL")),
        ScoringFailedEvent {
            patient,
            observation_id,
            kind,
            scorer,
            cause: failure.cause_code(),
            remote_code,
            reported_ms,
            budget_ms,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_score_rejected(
    env: &Env,
    patient: Address,
    observation_id: u64,
    kind: u32,
    risk_score: u32,
    scorer: Address,
) {
    env.events().publish(
        ("RISK", symbol_short!("SCR_BAD")),
        ScoreRejectedEvent {
            patient,
            observation_id,
            kind,
            risk_score,
            scorer,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_band_hint_mismatch(
    env: &Env,
    prediction_id: u64,
    reported: u32,
    derived: u32,
    risk_score: u32,
) {
    env.events().publish(
        ("RISK", symbol_short!("HINT_DIFF")),
        BandHintMismatchEvent {
            prediction_id,
            reported,
            derived,
            risk_score,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_health_probed(
    env: &Env,
    scorer: Address,
    reachable: bool,
    healthy: bool,
    model_loaded: bool,
) {
    env.events().publish(
        ("RISK", symbol_short!("PROBED")),
        HealthProbedEvent {
            scorer,
            reachable,
            healthy,
            model_loaded,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_config_updated(env: &Env, scorer: Address, score_budget_ms: u64, updated_by: Address) {
    env.events().publish(
        ("RISK", symbol_short!("CFG_SET")),
        ConfigUpdatedEvent {
            scorer,
            score_budget_ms,
            updated_by,
            timestamp: env.ledger().timestamp(),
        },
    );
}
