use crate::types::{FeatureVector, ObservationInput};

/// Maps a stored observation onto the scorer's input schema, one field per
/// remote feature.
///
/// Deterministic and side-effect-free: the same measurements always produce
/// the same vector, and the vector embedded in a persisted prediction can be
/// reproduced from its source observation at any time. Absent optional
/// measurements stay `None` so the scorer can tell "not measured" apart from
/// "measured as zero"; imputation is the scorer's decision, never ours.
pub fn map_features(input: &ObservationInput) -> FeatureVector {
    FeatureVector {
        age: input.age,
        bmi: input.bmi,
        blood_pressure_systolic: input.blood_pressure_systolic,
        blood_pressure_diastolic: input.blood_pressure_diastolic,
        glucose_level: input.glucose_level,
        cholesterol: input.cholesterol,
        hba1c: input.hba1c,
        previous_admissions: input.previous_admissions,
        last_stay_duration: input.last_stay_duration,
        has_diabetes: input.has_diabetes,
        has_hypertension: input.has_hypertension,
        has_heart_disease: input.has_heart_disease,
        smoking_status: input.smoking_status,
    }
}

/// Number of fields in the scorer's input schema. The scorer may report at
/// most this many importance entries.
pub const FEATURE_COUNT: u32 = 13;
