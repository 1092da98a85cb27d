//! Stand-in scorer contracts for tests. Each one exercises a different
//! behaviour of the configured remote: a well-behaved scorer with a
//! setter-configured reply, one that rejects, one that replies with the
//! wrong shape, and one that lacks the scoring interface entirely.

use soroban_sdk::{contract, contracterror, contractimpl, contracttype, vec, Env, String};

use crate::types::{FeatureVector, PredictionKind, RiskBand, ScoreResponse, ScorerHealth};

#[derive(Clone)]
#[contracttype]
enum MockKey {
    Reply,  // (u32, RiskBand, u64)
    Health, // (bool, bool)
}

/// Well-behaved scorer. Replies with whatever `set_result` configured,
/// or a low-risk default when never configured.
#[contract]
pub struct MockScorer;

#[contractimpl]
impl MockScorer {
    pub fn set_result(env: Env, risk_score: u32, risk_level: RiskBand, processing_time_ms: u64) {
        env.storage()
            .instance()
            .set(&MockKey::Reply, &(risk_score, risk_level, processing_time_ms));
    }

    pub fn set_health(env: Env, healthy: bool, model_loaded: bool) {
        env.storage()
            .instance()
            .set(&MockKey::Health, &(healthy, model_loaded));
    }

    pub fn score(env: Env, _kind: PredictionKind, _features: FeatureVector) -> ScoreResponse {
        let (risk_score, risk_level, processing_time_ms): (u32, RiskBand, u64) = env
            .storage()
            .instance()
            .get(&MockKey::Reply)
            .unwrap_or((1_200, RiskBand::Low, 45));
        ScoreResponse {
            risk_score,
            risk_level,
            model_version: String::from_str(&env, "1.0.0"),
            model_algorithm: String::from_str(&env, "logistic_regression"),
            feature_importance: vec![
                &env,
                (String::from_str(&env, "age"), 2_450_u32),
                (String::from_str(&env, "glucose_level"), 1_830_u32),
                (String::from_str(&env, "has_diabetes"), 1_510_u32),
            ],
            processing_time_ms,
        }
    }

    pub fn health(env: Env) -> ScorerHealth {
        let (healthy, model_loaded): (bool, bool) = env
            .storage()
            .instance()
            .get(&MockKey::Health)
            .unwrap_or((true, true));
        ScorerHealth {
            healthy,
            model_loaded,
            model_version: String::from_str(&env, "1.0.0"),
            uptime_seconds: 3_600,
        }
    }
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum MockScorerError {
    ModelBusy = 7,
}

/// Scorer that rejects every request with its own contract error.
#[contract]
pub struct RejectingScorer;

#[contractimpl]
impl RejectingScorer {
    pub fn score(
        _env: Env,
        _kind: PredictionKind,
        _features: FeatureVector,
    ) -> Result<ScoreResponse, MockScorerError> {
        Err(MockScorerError::ModelBusy)
    }

    pub fn health(_env: Env) -> Result<ScorerHealth, MockScorerError> {
        Err(MockScorerError::ModelBusy)
    }
}

/// Scorer whose replies do not match the response contract.
#[contract]
pub struct MalformedScorer;

#[contractimpl]
impl MalformedScorer {
    pub fn score(_env: Env, _kind: PredictionKind, _features: FeatureVector) -> u32 {
        9_900
    }

    pub fn health(_env: Env) -> u32 {
        1
    }
}

/// A deployed contract with no scoring interface at all. Invoking `score`
/// or `health` on it fails the same way a missing deployment does.
#[contract]
pub struct NotAScorer;

#[contractimpl]
impl NotAScorer {
    pub fn ping(_env: Env) -> u32 {
        1
    }
}
