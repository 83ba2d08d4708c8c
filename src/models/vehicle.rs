//! Modelo de Vehicle
//!
//! Este módulo contiene el registro de vehículo tal como lo intercambia el
//! servidor REST, y el payload sin identificador que se envía al crear o
//! actualizar. Los nombres JSON son los del recurso (`marca`, `año`, ...).

use std::collections::HashMap;
use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::utils::validation::validate_not_blank;

/// Tipos de vehículo conocidos por el servidor.
///
/// El conjunto es abierto: un registro puede traer cualquier otro valor en
/// `tipo`, por eso `Vehicle::category` es un `String`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VehicleCategory {
    Coche,
    Moto,
    Camion,
    Furgoneta,
    Suv,
}

impl VehicleCategory {
    pub const ALL: [VehicleCategory; 5] = [
        VehicleCategory::Coche,
        VehicleCategory::Moto,
        VehicleCategory::Camion,
        VehicleCategory::Furgoneta,
        VehicleCategory::Suv,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleCategory::Coche => "COCHE",
            VehicleCategory::Moto => "MOTO",
            VehicleCategory::Camion => "CAMION",
            VehicleCategory::Furgoneta => "FURGONETA",
            VehicleCategory::Suv => "SUV",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(value.trim()))
    }
}

impl fmt::Display for VehicleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Clase del badge para un tipo (siempre en minúsculas)
pub fn badge_class(category: &str) -> String {
    format!("badge-{}", category.to_lowercase())
}

/// Vehículo persistido en el servidor; siempre tiene `id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: String,
    #[serde(rename = "marca")]
    pub brand: String,
    #[serde(rename = "modelo")]
    pub model: String,
    #[serde(rename = "matricula")]
    pub plate: String,
    #[serde(rename = "año")]
    pub year: i32,
    pub color: String,
    #[serde(rename = "precio")]
    pub price: f64,
    #[serde(rename = "tipo")]
    pub category: String,
    #[serde(
        rename = "fechaCreacion",
        default,
        deserialize_with = "lenient_datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<NaiveDateTime>,
    #[serde(
        rename = "fechaActualizacion",
        default,
        deserialize_with = "lenient_datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<NaiveDateTime>,
}

impl Vehicle {
    /// "Marca Modelo", usado en el mensaje de confirmación de borrado
    pub fn display_name(&self) -> String {
        format!("{} {}", self.brand, self.model)
    }
}

/// Cuerpo JSON de POST y PUT: un vehículo sin identificador
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct VehiclePayload {
    #[serde(rename = "marca")]
    #[validate(custom(function = "validate_not_blank", message = "La marca es obligatoria"))]
    pub brand: String,

    #[serde(rename = "modelo")]
    #[validate(custom(function = "validate_not_blank", message = "El modelo es obligatorio"))]
    pub model: String,

    #[serde(rename = "matricula")]
    #[validate(custom(function = "validate_not_blank", message = "La matrícula es obligatoria"))]
    pub plate: String,

    #[serde(rename = "año")]
    #[validate(range(min = 1900, max = 2030, message = "El año debe estar entre 1900 y 2030"))]
    pub year: i32,

    #[validate(custom(function = "validate_not_blank", message = "El color es obligatorio"))]
    pub color: String,

    #[serde(rename = "precio")]
    #[validate(range(min = 0.0, message = "El precio debe ser mayor o igual a 0"))]
    pub price: f64,

    #[serde(rename = "tipo")]
    pub category: String,
}

impl VehiclePayload {
    /// Registro resultante de persistir este payload con el `id` dado
    pub fn into_vehicle(self, id: String) -> Vehicle {
        Vehicle {
            id,
            brand: self.brand,
            model: self.model,
            plate: self.plate,
            year: self.year,
            color: self.color,
            price: self.price,
            category: self.category,
            created_at: None,
            updated_at: None,
        }
    }
}

/// Estadísticas agregadas que calcula el servidor
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VehicleStatistics {
    #[serde(rename = "totalVehiculos")]
    pub total: u64,
    #[serde(rename = "marcas", default)]
    pub by_brand: HashMap<String, u64>,
    #[serde(rename = "tipos", default)]
    pub by_category: HashMap<String, u64>,
    #[serde(rename = "precioPromedio", default)]
    pub average_price: f64,
}

/// Parámetros de la búsqueda avanzada del servidor; todos opcionales
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AdvancedSearch {
    #[serde(rename = "marca", skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(rename = "tipo", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "añoMin", skip_serializing_if = "Option::is_none")]
    pub year_min: Option<i32>,
    #[serde(rename = "añoMax", skip_serializing_if = "Option::is_none")]
    pub year_max: Option<i32>,
    #[serde(rename = "precioMin", skip_serializing_if = "Option::is_none")]
    pub price_min: Option<f64>,
    #[serde(rename = "precioMax", skip_serializing_if = "Option::is_none")]
    pub price_max: Option<f64>,
}

impl AdvancedSearch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Campo con un rango a medias, si lo hay. El servidor solo filtra por
    /// año o por precio cuando recibe los dos extremos.
    pub fn incomplete_range(&self) -> Option<&'static str> {
        if self.year_min.is_some() != self.year_max.is_some() {
            return Some("año");
        }
        if self.price_min.is_some() != self.price_max.is_some() {
            return Some("precio");
        }
        None
    }
}

// El servidor puede omitir las fechas o serializarlas en formatos distintos;
// una fecha ilegible no debe invalidar el registro entero.
fn lenient_datetime<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(serde_json::Value::String(s)) => {
            NaiveDateTime::parse_from_str(&s, "%Y-%m-%dT%H:%M:%S%.f").ok()
        }
        _ => None,
    })
}
