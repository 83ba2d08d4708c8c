//! Sistema de manejo de errores
//!
//! Este módulo define los errores del cliente de vehículos y cómo se
//! convierten en mensajes para el usuario.

use thiserror::Error;

/// Mensaje genérico cuando la carga del listado falla sin detalle del servidor
pub const LOAD_FAILED: &str = "Error al cargar vehículos";
pub const CREATE_FAILED: &str = "Error al crear";
pub const UPDATE_FAILED: &str = "Error al actualizar";
pub const DELETE_FAILED: &str = "Error al eliminar";
pub const QUERY_FAILED: &str = "Error al consultar";

/// Errores principales del cliente
#[derive(Error, Debug)]
pub enum ClientError {
    /// Fallo de red, DNS, TLS o timeout
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Respuesta no exitosa sin un cuerpo de error interpretable
    #[error("{message} (HTTP {status})")]
    Status { status: u16, message: String },

    /// Respuesta no exitosa con `{"error": "..."}` en el cuerpo
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Respuesta 2xx cuyo cuerpo no es el JSON esperado
    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("El campo '{field}' no es un número válido: '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Texto corto que se muestra en la notificación al usuario
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Api { message, .. } => message.clone(),
            ClientError::Status { message, .. } => message.clone(),
            ClientError::Transport(e) if e.is_timeout() => {
                "El servidor no respondió a tiempo".to_string()
            }
            ClientError::Transport(_) => "No se pudo conectar con el servidor".to_string(),
            ClientError::Decode(_) => "Respuesta inválida del servidor".to_string(),
            ClientError::Validation(errors) => describe_validation(errors),
            other => other.to_string(),
        }
    }

    /// Status HTTP asociado, si el error vino del servidor
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } | ClientError::Api { status, .. } => Some(*status),
            ClientError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type ClientResult<T> = Result<T, ClientError>;

/// Helper para errores de configuración
pub fn config_error(variable: &str, reason: &str) -> ClientError {
    ClientError::Config(format!("{}: {}", variable, reason))
}

fn describe_validation(errors: &validator::ValidationErrors) -> String {
    let mut fields: Vec<String> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            errs.iter()
                .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
                .unwrap_or_else(|| format!("{} inválido", field))
        })
        .collect();
    fields.sort();
    fields.join("; ")
}
