//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del cliente: servidor, ruta base del
//! recurso de vehículos y timeouts.

use std::env;
use std::time::Duration;

use crate::utils::errors::{config_error, ClientResult};

pub const DEFAULT_API_URL: &str = "http://localhost:8080";
pub const DEFAULT_BASE_PATH: &str = "/vehiculos-api/api/vehiculos";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuración del cliente
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub api_url: String,
    pub base_path: String,
    pub timeout: Duration,
    pub color: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            base_path: DEFAULT_BASE_PATH.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            color: true,
        }
    }
}

impl ClientConfig {
    /// Leer la configuración de las variables de entorno del proceso
    pub fn from_env() -> ClientResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Construir la configuración a partir de una función de búsqueda.
    ///
    /// Las variables ausentes toman su valor por defecto; las presentes pero
    /// inválidas producen un error de configuración.
    pub fn from_lookup<F>(lookup: F) -> ClientResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_url = match lookup("VEHICULOS_API_URL") {
            Some(url) => {
                let url = url.trim().trim_end_matches('/').to_string();
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    return Err(config_error(
                        "VEHICULOS_API_URL",
                        "must start with http:// or https://",
                    ));
                }
                url
            }
            None => defaults.api_url,
        };

        let base_path = match lookup("VEHICULOS_API_BASE_PATH") {
            Some(path) => normalize_path(&path),
            None => defaults.base_path,
        };

        let timeout = match lookup("VEHICULOS_HTTP_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(config_error(
                        "VEHICULOS_HTTP_TIMEOUT_SECS",
                        "must be a positive integer",
                    ))
                }
            },
            None => defaults.timeout,
        };

        let color = match lookup("VEHICULOS_COLOR") {
            Some(raw) => match raw.trim().to_lowercase().as_str() {
                "true" | "1" | "yes" => true,
                "false" | "0" | "no" => false,
                _ => return Err(config_error("VEHICULOS_COLOR", "must be true or false")),
            },
            None => defaults.color,
        };

        Ok(Self {
            api_url,
            base_path,
            timeout,
            color,
        })
    }

    /// URL completa del recurso colección
    pub fn collection_url(&self) -> String {
        format!("{}{}", self.api_url, self.base_path)
    }
}

fn normalize_path(path: &str) -> String {
    let trimmed = path.trim().trim_end_matches('/');
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}
