//! Cliente HTTP para la API REST de vehículos
//!
//! Este módulo define el trait `VehicleApi`, la única puerta del controlador
//! hacia el servidor, y su implementación con reqwest. Cada operación se
//! intenta una sola vez; no hay reintentos.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::config::environment::ClientConfig;
use crate::dto::vehicle_dto::{ApiErrorBody, ApiMessage};
use crate::models::vehicle::{AdvancedSearch, Vehicle, VehiclePayload, VehicleStatistics};
use crate::utils::errors::{
    ClientError, ClientResult, CREATE_FAILED, DELETE_FAILED, LOAD_FAILED, QUERY_FAILED,
    UPDATE_FAILED,
};

/// Operaciones sobre el recurso colección de vehículos
#[async_trait]
pub trait VehicleApi: Send + Sync {
    /// `GET {base}`
    async fn list(&self) -> ClientResult<Vec<Vehicle>>;

    /// `POST {base}`
    async fn create(&self, payload: &VehiclePayload) -> ClientResult<Vehicle>;

    /// `PUT {base}/{id}`
    async fn update(&self, id: &str, payload: &VehiclePayload) -> ClientResult<Vehicle>;

    /// `DELETE {base}/{id}`
    async fn delete(&self, id: &str) -> ClientResult<()>;

    /// `GET {base}/matricula/{matricula}`
    async fn find_by_plate(&self, plate: &str) -> ClientResult<Vehicle>;

    /// `GET {base}/estadisticas`
    async fn statistics(&self) -> ClientResult<VehicleStatistics>;

    /// `GET {base}/busqueda-avanzada`
    async fn advanced_search(&self, query: &AdvancedSearch) -> ClientResult<Vec<Vehicle>>;
}

/// Cliente reqwest contra `{api_url}{base_path}`
#[derive(Clone)]
pub struct HttpVehicleApi {
    client: Client,
    base_url: String,
}

impl HttpVehicleApi {
    /// Crear nuevo cliente HTTP con el timeout configurado
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("vehiculos-client/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.collection_url(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn item_url(&self, id: &str) -> String {
        format!("{}/{}", self.base_url, urlencoding::encode(id))
    }

    /// Leer un cuerpo JSON de una respuesta 2xx
    async fn read_json<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Convertir una respuesta no exitosa en error.
    ///
    /// Si `structured` es true y el cuerpo trae `{"error": "..."}` con texto,
    /// ese texto se usa tal cual; en otro caso (incluido `"error": ""`) se
    /// usa el mensaje genérico.
    async fn failure(response: Response, generic: &str, structured: bool) -> ClientError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        log::warn!("⚠️ HTTP {} desde la API de vehículos: {}", status, body);

        if structured {
            match serde_json::from_str::<ApiErrorBody>(&body) {
                Ok(ApiErrorBody { error: Some(message) }) if !message.trim().is_empty() => {
                    return ClientError::Api { status, message };
                }
                _ => {}
            }
        }

        ClientError::Status {
            status,
            message: generic.to_string(),
        }
    }
}

#[async_trait]
impl VehicleApi for HttpVehicleApi {
    async fn list(&self) -> ClientResult<Vec<Vehicle>> {
        log::debug!("🌐 GET {}", self.base_url);
        let response = self.client.get(&self.base_url).send().await?;

        if !response.status().is_success() {
            return Err(Self::failure(response, LOAD_FAILED, false).await);
        }

        let vehicles: Vec<Vehicle> = Self::read_json(response).await?;
        log::info!("📋 {} vehículos recibidos", vehicles.len());
        Ok(vehicles)
    }

    async fn create(&self, payload: &VehiclePayload) -> ClientResult<Vehicle> {
        log::debug!("🌐 POST {} ({})", self.base_url, payload.plate);
        let response = self.client.post(&self.base_url).json(payload).send().await?;

        if !response.status().is_success() {
            return Err(Self::failure(response, CREATE_FAILED, true).await);
        }

        let vehicle: Vehicle = Self::read_json(response).await?;
        log::info!("✅ Vehículo creado con id {}", vehicle.id);
        Ok(vehicle)
    }

    async fn update(&self, id: &str, payload: &VehiclePayload) -> ClientResult<Vehicle> {
        let url = self.item_url(id);
        log::debug!("🌐 PUT {}", url);
        let response = self.client.put(&url).json(payload).send().await?;

        if !response.status().is_success() {
            return Err(Self::failure(response, UPDATE_FAILED, true).await);
        }

        let vehicle: Vehicle = Self::read_json(response).await?;
        log::info!("✅ Vehículo {} actualizado", vehicle.id);
        Ok(vehicle)
    }

    async fn delete(&self, id: &str) -> ClientResult<()> {
        let url = self.item_url(id);
        log::debug!("🌐 DELETE {}", url);
        let response = self.client.delete(&url).send().await?;

        if !response.status().is_success() {
            return Err(Self::failure(response, DELETE_FAILED, false).await);
        }

        // El cuerpo es opcional (204 o {"mensaje": ...})
        let body = response.text().await.unwrap_or_default();
        match serde_json::from_str::<ApiMessage>(&body) {
            Ok(message) => log::info!("🗑️ {}", message.mensaje),
            Err(_) => log::info!("🗑️ Vehículo {} eliminado", id),
        }
        Ok(())
    }

    async fn find_by_plate(&self, plate: &str) -> ClientResult<Vehicle> {
        let url = format!("{}/matricula/{}", self.base_url, urlencoding::encode(plate));
        log::debug!("🌐 GET {}", url);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(Self::failure(response, QUERY_FAILED, true).await);
        }

        Self::read_json(response).await
    }

    async fn statistics(&self) -> ClientResult<VehicleStatistics> {
        let url = format!("{}/estadisticas", self.base_url);
        log::debug!("🌐 GET {}", url);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(Self::failure(response, QUERY_FAILED, true).await);
        }

        Self::read_json(response).await
    }

    async fn advanced_search(&self, query: &AdvancedSearch) -> ClientResult<Vec<Vehicle>> {
        let url = format!("{}/busqueda-avanzada", self.base_url);
        log::debug!("🌐 GET {} {:?}", url, query);
        let response = self.client.get(&url).query(query).send().await?;

        if !response.status().is_success() {
            return Err(Self::failure(response, QUERY_FAILED, true).await);
        }

        Self::read_json(response).await
    }
}
