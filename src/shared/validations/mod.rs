//! Custom `validator` functions shared by request DTOs

use validator::ValidationError;

use crate::domain::FareType;

/// A `city_code` / `vehicle_type` must not contain the fare type separator.
pub fn fare_type_part(value: &str) -> Result<(), ValidationError> {
    if value.contains(FareType::SEPARATOR) {
        let mut err = ValidationError::new("fare_type_part");
        err.message = Some(format!("must not contain '{}'", FareType::SEPARATOR).into());
        return Err(err);
    }
    Ok(())
}
