//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validar los campos del
//! formulario de vehículos y convertir el texto introducido a números.

use validator::ValidationError;

use crate::utils::errors::{ClientError, ClientResult};

/// Año mínimo aceptado por el servidor
pub const MIN_YEAR: i32 = 1900;
/// Año máximo aceptado por el servidor
pub const MAX_YEAR: i32 = 2030;

/// Validar que un string no esté vacío (ni sea solo espacios)
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_blank");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Convertir el texto del campo año a entero.
///
/// Todo el texto (sin espacios alrededor) tiene que ser un entero: "2020.0"
/// o "2020a" se rechazan en lugar de quedarse con el prefijo.
pub fn parse_year(value: &str) -> ClientResult<i32> {
    value
        .trim()
        .parse::<i32>()
        .map_err(|_| ClientError::InvalidNumber {
            field: "año",
            value: value.to_string(),
        })
}

/// Convertir el texto del campo precio a número decimal.
///
/// Acepta coma o punto como separador decimal.
pub fn parse_price(value: &str) -> ClientResult<f64> {
    let normalized = value.trim().replace(',', ".");
    match normalized.parse::<f64>() {
        Ok(price) if price.is_finite() => Ok(price),
        _ => Err(ClientError::InvalidNumber {
            field: "precio",
            value: value.to_string(),
        }),
    }
}
