#![no_std]
#![allow(dead_code)]
#![allow(clippy::too_many_arguments)]


mod classify;
mod errors;
mod events;
mod features;
mod scoring;
mod types;
mod validation;

#[cfg(any(test, feature = "testutils"))]
pub mod testutils;

pub use errors::{Error, ErrorInfo, ErrorLogEntry};
pub use types::{
    ClinicalObservation, FeatureVector, HealthReport, ObservationInput, Prediction,
    PredictionKind, PredictionPage, PredictionStatistics, RiskBand, Role, ScoreResponse,
    ScorerHealth, ScoringConfig, SmokingStatus, UserProfile,
};

use soroban_sdk::{contract, contractimpl, Address, Env, Map, String, Vec};

use crate::scoring::ScoreFailure;
use crate::types::DataKey;

// ==================== Constants ====================

/// Maximum page size for paginated prediction queries. Larger requests are
/// capped, not rejected.
const MAX_PAGE_SIZE: u32 = 50;
/// Number of most-recent predictions embedded in the statistics view.
const STATS_RECENT_LIMIT: u32 = 5;
/// Maximum persisted diagnostics-journal entries (oldest evicted first).
const MAX_ERROR_LOG_ENTRIES: u32 = 50;
/// Processing-time budget applied when `initialize` or
/// `set_scoring_config` receive a zero budget.
const DEFAULT_SCORE_BUDGET_MS: u64 = 30_000;

// ==================== Contract ====================

#[contract]
pub struct RiskPredictionContract;

#[contractimpl]
impl RiskPredictionContract {
    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Initialise the contract. Must be called exactly once.
    ///
    /// `scorer` is the deployed scoring contract every prediction is routed
    /// to; `score_budget_ms` bounds the scorer's self-reported processing
    /// time, with `0` selecting the 30 s default.
    pub fn initialize(
        env: Env,
        admin: Address,
        scorer: Address,
        score_budget_ms: u64,
    ) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::AlreadyInitialized);
        }
        admin.require_auth();

        let budget = if score_budget_ms == 0 {
            DEFAULT_SCORE_BUDGET_MS
        } else {
            score_budget_ms
        };
        env.storage().instance().set(&DataKey::Initialized, &true);
        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage().instance().set(
            &DataKey::Config,
            &ScoringConfig {
                scorer: scorer.clone(),
                score_budget_ms: budget,
            },
        );
        let profile = UserProfile {
            user: admin.clone(),
            role: Role::Admin,
            registered_by: admin.clone(),
            registered_at: env.ledger().timestamp(),
        };
        env.storage()
            .persistent()
            .set(&DataKey::User(admin.clone()), &profile);

        events::emit_initialized(&env, admin, scorer, budget);
        Ok(())
    }

    /// Returns the current admin address.
    pub fn get_admin(env: Env) -> Result<Address, Error> {
        Self::require_initialized(&env)?;
        Ok(Self::read_admin(&env))
    }

    // ------------------------------------------------------------------
    // Scoring Configuration
    // ------------------------------------------------------------------

    /// Replace the scorer address and processing-time budget. Admin only.
    /// This is the recovery path when a scorer is redeployed.
    pub fn set_scoring_config(
        env: Env,
        caller: Address,
        scorer: Address,
        score_budget_ms: u64,
    ) -> Result<(), Error> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        let budget = if score_budget_ms == 0 {
            DEFAULT_SCORE_BUDGET_MS
        } else {
            score_budget_ms
        };
        env.storage().instance().set(
            &DataKey::Config,
            &ScoringConfig {
                scorer: scorer.clone(),
                score_budget_ms: budget,
            },
        );
        events::emit_config_updated(&env, scorer, budget, caller);
        Ok(())
    }

    pub fn get_scoring_config(env: Env) -> Result<ScoringConfig, Error> {
        Self::require_initialized(&env)?;
        Self::read_config(&env)
    }

    // ------------------------------------------------------------------
    // User Registry
    // ------------------------------------------------------------------

    /// Register a user or change their role. Admin only. Registering an
    /// address with `Role::Patient` is the patient-registration record;
    /// the `Admin` role is fixed at initialisation and cannot be assigned
    /// here.
    pub fn manage_user(env: Env, caller: Address, user: Address, role: Role) -> Result<(), Error> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;
        if role == Role::Admin {
            return Err(Error::InvalidRoleAssignment);
        }

        let profile = UserProfile {
            user: user.clone(),
            role,
            registered_by: caller.clone(),
            registered_at: env.ledger().timestamp(),
        };
        env.storage()
            .persistent()
            .set(&DataKey::User(user.clone()), &profile);

        events::emit_user_managed(&env, user, role as u32, caller);
        Ok(())
    }

    pub fn get_user(env: Env, user: Address) -> Result<UserProfile, Error> {
        Self::require_initialized(&env)?;
        Self::read_user(&env, &user).ok_or(Error::UserNotFound)
    }

    // ------------------------------------------------------------------
    // Clinical Observations
    // ------------------------------------------------------------------

    /// Record a new observation for a registered patient. Clinician or
    /// admin only. Measurements are range-checked at capture so every
    /// stored observation is mappable to a feature vector later; the
    /// observation is immutable once stored.
    pub fn record_observation(
        env: Env,
        caller: Address,
        patient: Address,
        input: ObservationInput,
    ) -> Result<u64, Error> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_clinician(&env, &caller)?;
        Self::require_patient(&env, &patient)?;
        validation::validate_observation(&input)?;

        let id = Self::next_observation_id(&env);
        let observation = ClinicalObservation {
            id,
            patient: patient.clone(),
            measurements: input,
            recorded_by: caller.clone(),
            recorded_at: env.ledger().timestamp(),
        };
        env.storage()
            .persistent()
            .set(&DataKey::Observation(id), &observation);

        let mut ids = Self::read_patient_observation_ids(&env, &patient);
        ids.push_back(id);
        env.storage()
            .persistent()
            .set(&DataKey::PatientObservations(patient.clone()), &ids);

        events::emit_observation_recorded(&env, id, patient, caller);
        Ok(id)
    }

    pub fn get_observation(
        env: Env,
        caller: Address,
        observation_id: u64,
    ) -> Result<ClinicalObservation, Error> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        let observation: ClinicalObservation = env
            .storage()
            .persistent()
            .get(&DataKey::Observation(observation_id))
            .ok_or(Error::ObservationNotFound)?;
        Self::require_can_view(&env, &caller, &observation.patient)?;
        Ok(observation)
    }

    /// Returns a patient's observation history, oldest first, so a caller
    /// can select the observation for a prediction run explicitly.
    pub fn list_observations_for_patient(
        env: Env,
        caller: Address,
        patient: Address,
    ) -> Result<Vec<ClinicalObservation>, Error> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_can_view(&env, &caller, &patient)?;
        Self::require_patient(&env, &patient)?;

        let ids = Self::read_patient_observation_ids(&env, &patient);
        let mut observations = Vec::new(&env);
        for id in ids.iter() {
            if let Some(observation) = env
                .storage()
                .persistent()
                .get::<DataKey, ClinicalObservation>(&DataKey::Observation(id))
            {
                observations.push_back(observation);
            }
        }
        Ok(observations)
    }

    // ------------------------------------------------------------------
    // Prediction Orchestration
    // ------------------------------------------------------------------

    /// Run one prediction for an explicitly selected observation.
    ///
    /// Resolves and cross-checks the referenced entities, maps the
    /// observation to the scorer's feature schema, invokes the scorer,
    /// derives the risk band locally, and persists the whole snapshot.
    /// A failed run stores nothing: the failed invocation rolls back and
    /// the prediction history only ever contains completed runs.
    pub fn run_prediction(
        env: Env,
        caller: Address,
        patient: Address,
        observation_id: u64,
        kind: PredictionKind,
    ) -> Result<Prediction, Error> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_clinician(&env, &caller)?;
        Self::require_patient(&env, &patient)?;

        let observation: ClinicalObservation = env
            .storage()
            .persistent()
            .get(&DataKey::Observation(observation_id))
            .ok_or(Error::ObservationNotFound)?;
        // Wrong-patient answers exactly like absence so observation ids
        // cannot be probed across patients.
        if observation.patient != patient {
            return Err(Error::ObservationNotFound);
        }

        // Ownership is settled; only now may data leave the contract.
        let features = features::map_features(&observation.measurements);
        let config = Self::read_config(&env)?;
        let response = match scoring::request_score(&env, &config, kind, &features) {
            Ok(response) => response,
            Err(failure) => {
                events::emit_scoring_failed(
                    &env,
                    patient.clone(),
                    observation_id,
                    kind as u32,
                    config.scorer.clone(),
                    config.score_budget_ms,
                    &failure,
                );
                return Err(Error::InferenceUnavailable);
            }
        };

        let risk_band = match classify::classify(response.risk_score) {
            Ok(band) => band,
            Err(error) => {
                events::emit_score_rejected(
                    &env,
                    patient.clone(),
                    observation_id,
                    kind as u32,
                    response.risk_score,
                    config.scorer.clone(),
                );
                return Err(error);
            }
        };

        let id = Self::next_prediction_id(&env);
        let prediction = Prediction {
            id,
            patient: patient.clone(),
            observation_id,
            kind,
            risk_score: response.risk_score,
            risk_band,
            model_version: response.model_version.clone(),
            model_algorithm: response.model_algorithm.clone(),
            features,
            feature_importance: response.feature_importance.clone(),
            processing_time_ms: response.processing_time_ms,
            requested_by: caller.clone(),
            created_at: env.ledger().timestamp(),
        };
        env.storage()
            .persistent()
            .set(&DataKey::Prediction(id), &prediction);

        let mut ids = Self::read_patient_prediction_ids(&env, &patient);
        ids.push_back(id);
        env.storage()
            .persistent()
            .set(&DataKey::PatientPredictions(patient.clone()), &ids);

        // The locally derived band is authoritative; a disagreeing hint is
        // reported for scorer diagnosis but never stored.
        if risk_band != response.risk_level {
            events::emit_band_hint_mismatch(
                &env,
                id,
                response.risk_level as u32,
                risk_band as u32,
                response.risk_score,
            );
        }
        events::emit_prediction_recorded(
            &env,
            id,
            patient,
            observation_id,
            kind as u32,
            response.risk_score,
            risk_band as u32,
            caller,
            response.processing_time_ms,
        );
        Ok(prediction)
    }

    // ------------------------------------------------------------------
    // Prediction Store & Audit
    // ------------------------------------------------------------------

    pub fn get_prediction(
        env: Env,
        caller: Address,
        prediction_id: u64,
    ) -> Result<Prediction, Error> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        let prediction =
            Self::read_prediction(&env, prediction_id).ok_or(Error::PredictionNotFound)?;
        Self::require_can_view(&env, &caller, &prediction.patient)?;
        Ok(prediction)
    }

    /// Returns a patient's prediction history, oldest first.
    pub fn list_predictions_for_patient(
        env: Env,
        caller: Address,
        patient: Address,
    ) -> Result<Vec<Prediction>, Error> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_can_view(&env, &caller, &patient)?;
        Self::require_patient(&env, &patient)?;

        let ids = Self::read_patient_prediction_ids(&env, &patient);
        let mut predictions = Vec::new(&env);
        for id in ids.iter() {
            if let Some(prediction) = Self::read_prediction(&env, id) {
                predictions.push_back(prediction);
            }
        }
        Ok(predictions)
    }

    /// Returns one page of the global prediction list, newest first.
    /// `page` is zero-based; `page_size` must be non-zero and is capped at
    /// `MAX_PAGE_SIZE`.
    pub fn list_predictions(
        env: Env,
        caller: Address,
        page: u32,
        page_size: u32,
    ) -> Result<PredictionPage, Error> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_clinician(&env, &caller)?;
        if page_size == 0 {
            return Err(Error::InvalidPagination);
        }
        let size = page_size.min(MAX_PAGE_SIZE);

        let total = Self::prediction_count(&env);
        // Ids are dense (1..=total, append-only), so the newest-first
        // position i maps to id total - i.
        let start = (page as u64).saturating_mul(size as u64);
        let end = start.saturating_add(size as u64).min(total);
        let mut predictions = Vec::new(&env);
        let mut i = start;
        while i < end {
            if let Some(prediction) = Self::read_prediction(&env, total - i) {
                predictions.push_back(prediction);
            }
            i += 1;
        }

        Ok(PredictionPage {
            predictions,
            total,
            page,
            page_size: size,
            has_more: end < total,
        })
    }

    /// Aggregate view over every stored prediction, computed on read.
    /// Volumes are small; correctness beats rollup bookkeeping here.
    pub fn get_statistics(env: Env, caller: Address) -> Result<PredictionStatistics, Error> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_clinician(&env, &caller)?;

        let total = Self::prediction_count(&env);
        let mut band_counts = [0u64; 3];
        let mut kind_counts = [0u64; 2];
        let mut kind_score_sums = [0u64; 2];

        let mut id = 1u64;
        while id <= total {
            if let Some(prediction) = Self::read_prediction(&env, id) {
                band_counts[prediction.risk_band as usize] += 1;
                kind_counts[prediction.kind as usize] += 1;
                kind_score_sums[prediction.kind as usize] += prediction.risk_score as u64;
            }
            id += 1;
        }

        let mut count_by_band: Map<u32, u64> = Map::new(&env);
        for band in 0..3u32 {
            let count = band_counts[band as usize];
            if count > 0 {
                count_by_band.set(band, count);
            }
        }
        let mut count_by_kind: Map<u32, u64> = Map::new(&env);
        let mut mean_score_by_kind: Map<u32, u32> = Map::new(&env);
        for kind in 0..2u32 {
            let count = kind_counts[kind as usize];
            if count > 0 {
                count_by_kind.set(kind, count);
                mean_score_by_kind.set(kind, (kind_score_sums[kind as usize] / count) as u32);
            }
        }

        let mut recent = Vec::new(&env);
        let mut id = total;
        while id >= 1 && recent.len() < STATS_RECENT_LIMIT {
            if let Some(prediction) = Self::read_prediction(&env, id) {
                recent.push_back(prediction);
            }
            id -= 1;
        }

        Ok(PredictionStatistics {
            total,
            count_by_band,
            count_by_kind,
            mean_score_by_kind,
            recent,
        })
    }

    // ------------------------------------------------------------------
    // Remote Health
    // ------------------------------------------------------------------

    /// Probe the configured scorer without running a prediction. Total once
    /// initialised: an unreachable scorer is reported as
    /// `reachable = false`, journaled, and emitted, never surfaced as an
    /// error, so operators can poll this.
    pub fn check_remote_health(env: Env, caller: Address) -> Result<HealthReport, Error> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_clinician(&env, &caller)?;

        let config = Self::read_config(&env)?;
        let checked_at = env.ledger().timestamp();
        match scoring::probe_health(&env, &config) {
            Ok(health) => {
                events::emit_health_probed(
                    &env,
                    config.scorer,
                    true,
                    health.healthy,
                    health.model_loaded,
                );
                Ok(HealthReport {
                    reachable: true,
                    healthy: health.healthy,
                    model_loaded: health.model_loaded,
                    model_version: health.model_version,
                    uptime_seconds: health.uptime_seconds,
                    checked_at,
                })
            }
            Err(failure) => {
                Self::log_error(
                    &env,
                    Error::InferenceUnavailable,
                    Self::probe_failure_context(&failure),
                    Some(caller),
                );
                events::emit_health_probed(&env, config.scorer, false, false, false);
                Ok(HealthReport {
                    reachable: false,
                    healthy: false,
                    model_loaded: false,
                    model_version: String::from_str(&env, ""),
                    uptime_seconds: 0,
                    checked_at,
                })
            }
        }
    }

    // ------------------------------------------------------------------
    // Diagnostics
    // ------------------------------------------------------------------

    /// Returns a slice of the persisted diagnostics journal, oldest first.
    pub fn get_error_logs(env: Env, offset: u32, limit: u32) -> Vec<ErrorLogEntry> {
        let log = Self::read_error_log(&env);
        let capped = limit.min(MAX_PAGE_SIZE);
        let mut entries = Vec::new(&env);
        let mut i = offset;
        while i < log.len() && entries.len() < capped {
            if let Some(entry) = log.get(i) {
                entries.push_back(entry);
            }
            i += 1;
        }
        entries
    }

    /// Stable code and message for an error, for clients and tooling.
    pub fn get_error_info(env: Env, error: Error) -> ErrorInfo {
        ErrorInfo {
            code: error as u32,
            message: errors::error_message(&env, error),
        }
    }

    // ------------------------------------------------------------------
    // Private helpers
    // ------------------------------------------------------------------

    fn require_initialized(env: &Env) -> Result<(), Error> {
        if !env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::NotInitialized);
        }
        Ok(())
    }

    fn require_admin(env: &Env, caller: &Address) -> Result<(), Error> {
        if !Self::is_admin(env, caller) {
            return Err(Error::NotAuthorized);
        }
        Ok(())
    }

    /// Caller must be the admin or a registered clinician.
    fn require_clinician(env: &Env, caller: &Address) -> Result<(), Error> {
        if Self::is_admin(env, caller) {
            return Ok(());
        }
        match Self::read_user(env, caller) {
            Some(profile) if profile.role == Role::Clinician => Ok(()),
            _ => Err(Error::NotAuthorized),
        }
    }

    /// Patients may read their own data; clinicians and the admin may read
    /// anyone's.
    fn require_can_view(env: &Env, caller: &Address, patient: &Address) -> Result<(), Error> {
        if caller == patient {
            return Ok(());
        }
        Self::require_clinician(env, caller)
    }

    fn require_patient(env: &Env, patient: &Address) -> Result<(), Error> {
        match Self::read_user(env, patient) {
            Some(profile) if profile.role == Role::Patient => Ok(()),
            _ => Err(Error::PatientNotFound),
        }
    }

    fn is_admin(env: &Env, addr: &Address) -> bool {
        match env
            .storage()
            .instance()
            .get::<DataKey, Address>(&DataKey::Admin)
        {
            Some(admin) => admin == *addr,
            None => false,
        }
    }

    fn read_admin(env: &Env) -> Address {
        env.storage().instance().get(&DataKey::Admin).unwrap()
    }

    fn read_config(env: &Env) -> Result<ScoringConfig, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Config)
            .ok_or(Error::NotInitialized)
    }

    fn read_user(env: &Env, user: &Address) -> Option<UserProfile> {
        env.storage()
            .persistent()
            .get(&DataKey::User(user.clone()))
    }

    // ------ ID counters ------

    fn next_observation_id(env: &Env) -> u64 {
        let id: u64 = env
            .storage()
            .persistent()
            .get(&DataKey::ObservationCount)
            .unwrap_or(0u64)
            .saturating_add(1);
        env.storage().persistent().set(&DataKey::ObservationCount, &id);
        id
    }

    fn next_prediction_id(env: &Env) -> u64 {
        let id: u64 = env
            .storage()
            .persistent()
            .get(&DataKey::PredictionCount)
            .unwrap_or(0u64)
            .saturating_add(1);
        env.storage().persistent().set(&DataKey::PredictionCount, &id);
        id
    }

    /// Total predictions ever stored. Records are never deleted, so this is
    /// also the highest assigned id.
    fn prediction_count(env: &Env) -> u64 {
        env.storage()
            .persistent()
            .get(&DataKey::PredictionCount)
            .unwrap_or(0u64)
    }

    // ------ Record reads ------

    fn read_prediction(env: &Env, id: u64) -> Option<Prediction> {
        env.storage().persistent().get(&DataKey::Prediction(id))
    }

    fn read_patient_observation_ids(env: &Env, patient: &Address) -> Vec<u64> {
        env.storage()
            .persistent()
            .get(&DataKey::PatientObservations(patient.clone()))
            .unwrap_or_else(|| Vec::new(env))
    }

    fn read_patient_prediction_ids(env: &Env, patient: &Address) -> Vec<u64> {
        env.storage()
            .persistent()
            .get(&DataKey::PatientPredictions(patient.clone()))
            .unwrap_or_else(|| Vec::new(env))
    }

    // ------ Diagnostics journal ------

    fn read_error_log(env: &Env) -> Vec<ErrorLogEntry> {
        env.storage()
            .persistent()
            .get(&DataKey::ErrorLog)
            .unwrap_or_else(|| Vec::new(env))
    }

    // Only called on paths that return Ok: writes from a failed invocation
    // roll back, so journaling an error that aborts its own transaction
    // would never persist.
    fn log_error(env: &Env, error: Error, context: &str, actor: Option<Address>) {
        let mut log = Self::read_error_log(env);
        if log.len() >= MAX_ERROR_LOG_ENTRIES {
            // Evict the oldest entry to keep the journal bounded.
            let mut trimmed = Vec::new(env);
            for i in 1..log.len() {
                if let Some(entry) = log.get(i) {
                    trimmed.push_back(entry);
                }
            }
            log = trimmed;
        }
        log.push_back(ErrorLogEntry {
            error,
            code: error as u32,
            context: String::from_str(env, context),
            actor,
            timestamp: env.ledger().timestamp(),
        });
        env.storage().persistent().set(&DataKey::ErrorLog, &log);
    }

    fn probe_failure_context(failure: &ScoreFailure) -> &'static str {
        match failure {
            ScoreFailure::Unreachable => "check_remote_health:unreachable",
            ScoreFailure::TimedOut { .. } => "check_remote_health:timed_out",
            ScoreFailure::RemoteRejected { .. } => "check_remote_health:remote_rejected",
            ScoreFailure::MalformedResponse => "check_remote_health:malformed_response",
        }
    }
}
