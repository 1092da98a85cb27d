use soroban_sdk::xdr::ScErrorType;
use soroban_sdk::{vec, Env, IntoVal, Symbol, TryFromVal, Val, Vec};

use crate::classify::MAX_SCORE_BPS;
use crate::features::FEATURE_COUNT;
use crate::types::{FeatureVector, PredictionKind, ScoreResponse, ScorerHealth, ScoringConfig};

/// Why a scorer invocation produced no usable response. A closed set, so
/// the orchestrator's mapping to `Error::InferenceUnavailable` is
/// exhaustive and checked by the compiler.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ScoreFailure {
    /// No contract at the configured address, no such function, or the
    /// callee trapped before returning.
    Unreachable,
    /// The reply's self-reported processing time exceeded the budget.
    TimedOut { reported_ms: u64 },
    /// The scorer rejected the request; its error code is forwarded.
    RemoteRejected { code: u32 },
    /// The reply did not match the response contract.
    MalformedResponse,
}

impl ScoreFailure {
    /// Stable tag carried on failure events.
    pub fn cause_code(&self) -> u32 {
        match self {
            ScoreFailure::Unreachable => 0,
            ScoreFailure::TimedOut { .. } => 1,
            ScoreFailure::RemoteRejected { .. } => 2,
            ScoreFailure::MalformedResponse => 3,
        }
    }
}

/// Requests a score from the configured scorer contract.
///
/// Exactly one outbound invocation per call; no retry on any failure.
/// Retrying is the caller's decision.
pub fn request_score(
    env: &Env,
    config: &ScoringConfig,
    kind: PredictionKind,
    features: &FeatureVector,
) -> Result<ScoreResponse, ScoreFailure> {
    let args: Vec<Val> = vec![env, kind.into_val(env), features.into_val(env)];
    let response: ScoreResponse = invoke(env, config, &Symbol::new(env, "score"), args)?;
    if response.processing_time_ms > config.score_budget_ms {
        return Err(ScoreFailure::TimedOut {
            reported_ms: response.processing_time_ms,
        });
    }
    validate_importance(&response)?;
    Ok(response)
}

/// Probes the scorer's liveness function.
pub fn probe_health(env: &Env, config: &ScoringConfig) -> Result<ScorerHealth, ScoreFailure> {
    invoke(env, config, &Symbol::new(env, "health"), vec![env])
}

fn invoke<T>(
    env: &Env,
    config: &ScoringConfig,
    func: &Symbol,
    args: Vec<Val>,
) -> Result<T, ScoreFailure>
where
    T: TryFromVal<Env, Val>,
{
    match env.try_invoke_contract::<T, soroban_sdk::Error>(&config.scorer, func, args) {
        Ok(Ok(value)) => Ok(value),
        // The call completed but the returned value does not convert to the
        // expected shape.
        Ok(Err(_)) => Err(ScoreFailure::MalformedResponse),
        Err(Ok(error)) if error.is_type(ScErrorType::Contract) => Err(ScoreFailure::RemoteRejected {
            code: error.get_code(),
        }),
        Err(_) => Err(ScoreFailure::Unreachable),
    }
}

// The response contract is closed: at most one importance entry per feature
// and every weight inside [0, 10_000].
fn validate_importance(response: &ScoreResponse) -> Result<(), ScoreFailure> {
    if response.feature_importance.len() > FEATURE_COUNT {
        return Err(ScoreFailure::MalformedResponse);
    }
    for (_, weight) in response.feature_importance.iter() {
        if weight > MAX_SCORE_BPS {
            return Err(ScoreFailure::MalformedResponse);
        }
    }
    Ok(())
}
