use crate::errors::Error;
use crate::types::ObservationInput;

/// Maximum accepted age in years.
pub const MAX_AGE: u32 = 150;

/// Body-mass index bounds, kg/m^2 scaled by 10 (10.0 to 80.0).
pub const MIN_BMI: u32 = 100;
pub const MAX_BMI: u32 = 800;

/// Systolic blood pressure bounds in mmHg.
pub const MIN_SYSTOLIC_BP: u32 = 60;
pub const MAX_SYSTOLIC_BP: u32 = 250;

/// Diastolic blood pressure bounds in mmHg.
pub const MIN_DIASTOLIC_BP: u32 = 40;
pub const MAX_DIASTOLIC_BP: u32 = 150;

/// Blood glucose bounds in mg/dL.
pub const MIN_GLUCOSE: u32 = 20;
pub const MAX_GLUCOSE: u32 = 600;

/// Total cholesterol bounds in mg/dL.
pub const MIN_CHOLESTEROL: u32 = 50;
pub const MAX_CHOLESTEROL: u32 = 500;

/// Glycated hemoglobin bounds, percent scaled by 10 (3.0% to 20.0%).
pub const MIN_HBA1C: u32 = 30;
pub const MAX_HBA1C: u32 = 200;

/// Maximum prior-admission count.
pub const MAX_PREVIOUS_ADMISSIONS: u32 = 100;

/// Maximum length of the most recent stay, in days.
pub const MAX_STAY_DURATION_DAYS: u32 = 365;

/// Maximum observation note length in bytes.
pub const MAX_NOTE_LENGTH: u32 = 500;

fn check_range(value: &Option<u32>, min: u32, max: u32) -> Result<(), Error> {
    match value {
        Some(v) if *v < min || *v > max => Err(Error::MeasurementOutOfRange),
        _ => Ok(()),
    }
}

/// Validates a measurement payload at capture time so that every stored
/// observation is guaranteed mappable to a feature vector later.
pub fn validate_observation(input: &ObservationInput) -> Result<(), Error> {
    if input.age > MAX_AGE {
        return Err(Error::InvalidAge);
    }
    check_range(&input.bmi, MIN_BMI, MAX_BMI)?;
    check_range(
        &input.blood_pressure_systolic,
        MIN_SYSTOLIC_BP,
        MAX_SYSTOLIC_BP,
    )?;
    check_range(
        &input.blood_pressure_diastolic,
        MIN_DIASTOLIC_BP,
        MAX_DIASTOLIC_BP,
    )?;
    check_range(&input.glucose_level, MIN_GLUCOSE, MAX_GLUCOSE)?;
    check_range(&input.cholesterol, MIN_CHOLESTEROL, MAX_CHOLESTEROL)?;
    check_range(&input.hba1c, MIN_HBA1C, MAX_HBA1C)?;
    if input.previous_admissions > MAX_PREVIOUS_ADMISSIONS {
        return Err(Error::MeasurementOutOfRange);
    }
    check_range(&input.last_stay_duration, 0, MAX_STAY_DURATION_DAYS)?;
    if input.note.len() > MAX_NOTE_LENGTH {
        return Err(Error::NoteTooLong);
    }
    Ok(())
}
