use std::borrow::Cow;

use validator::ValidationError;

use crate::constants::MAX_UBICACION_LENGTH;
use crate::infrastructure::utils::timestamp::parse_form_date;

pub fn new_validation_error(code: &'static str, msg: impl Into<Cow<'static, str>>) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(msg.into());
    err
}

/// Required, at most 30 characters.
pub fn validate_ubicacion(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(new_validation_error("required", "La ubicación es requerida"));
    }
    if value.chars().count() as u64 > MAX_UBICACION_LENGTH {
        return Err(new_validation_error(
            "ubicacion_length",
            format!("La ubicación no puede superar {} caracteres", MAX_UBICACION_LENGTH),
        ));
    }
    Ok(())
}

/// Empty values are left to the presence check.
pub fn validate_form_date(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() || parse_form_date(value).is_some() {
        Ok(())
    } else {
        Err(new_validation_error("date_format", "La fecha no es válida (AAAA-MM-DD)"))
    }
}

pub fn validate_company_id(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Ok(());
    }
    match value.trim().parse::<i64>() {
        Ok(id) if id > 0 => Ok(()),
        _ => Err(new_validation_error("company_id", "El ID de la empresa debe ser un número válido")),
    }
}

pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("required"))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ubicacion_counts_characters_not_bytes() {
        let accented = "á".repeat(30);
        assert!(validate_ubicacion(&accented).is_ok());
        assert!(validate_ubicacion(&"a".repeat(31)).is_err());
        assert!(validate_ubicacion("   ").is_err());
    }

    #[test]
    fn company_id_must_be_positive() {
        assert!(validate_company_id("42").is_ok());
        assert!(validate_company_id("").is_ok());
        assert!(validate_company_id("0").is_err());
        assert!(validate_company_id("acme").is_err());
    }

    #[test]
    fn form_date_rejects_garbage() {
        assert!(validate_form_date("2026-11-01").is_ok());
        assert!(validate_form_date("").is_ok());
        assert!(validate_form_date("01/11/2026").is_err());
    }
}
