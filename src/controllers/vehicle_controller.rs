//! Controlador del listado de vehículos
//!
//! `VehicleListClient` mantiene una copia local del recurso colección y
//! maneja la tabla y el formulario a través de un `VehicleView`. Tras
//! cualquier escritura vuelve a pedir la colección completa; el servidor es
//! siempre la fuente de verdad.

use tracing::{debug, error, info, warn};

use crate::client::VehicleApi;
use crate::dto::vehicle_dto::{FormMode, FormState, VehicleForm};
use crate::models::vehicle::{AdvancedSearch, Vehicle, VehicleStatistics};
use crate::services::vehicle_filter::VehicleFilter;
use crate::utils::errors::{ClientError, ClientResult};
use crate::view::{DeletePrompt, Notification, VehicleView};

pub struct VehicleListClient<A: VehicleApi, V: VehicleView> {
    api: A,
    view: V,
    vehicles: Vec<Vehicle>,
    form: FormState,
    pending_delete: Option<DeletePrompt>,
}

impl<A: VehicleApi, V: VehicleView> VehicleListClient<A, V> {
    pub fn new(api: A, view: V) -> Self {
        Self {
            api,
            view,
            vehicles: Vec::new(),
            form: FormState::default(),
            pending_delete: None,
        }
    }

    /// Copia local tal como llegó en la última carga exitosa
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn editing_id(&self) -> Option<&str> {
        self.form.editing_id()
    }

    pub fn pending_delete(&self) -> Option<&DeletePrompt> {
        self.pending_delete.as_ref()
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }

    /// Pedir la colección completa y reemplazar la copia local.
    ///
    /// Si falla, la copia y la tabla anteriores quedan intactas.
    pub async fn load(&mut self) -> ClientResult<()> {
        match self.api.list().await {
            Ok(vehicles) => {
                info!("📋 Listado cargado: {} vehículos", vehicles.len());
                self.vehicles = vehicles;
                self.view.render(&self.vehicles);
                self.view.update_total(self.vehicles.len());
                self.view
                    .show_notification(&Notification::success("Datos cargados correctamente"));
                Ok(())
            }
            Err(e) => {
                error!("❌ Error cargando vehículos: {}", e);
                self.notify_error(&e);
                Err(e)
            }
        }
    }

    /// Crear o actualizar a partir de los valores del formulario.
    ///
    /// Con una edición en curso se hace PUT sobre ese id; si no, POST. Si la
    /// escritura falla el formulario y el modo de edición se conservan.
    pub async fn submit(&mut self, values: VehicleForm) -> ClientResult<()> {
        self.form.values = values;

        let payload = match self.form.values.to_payload() {
            Ok(payload) => payload,
            Err(e) => {
                warn!("⚠️ Formulario inválido: {}", e);
                self.notify_error(&e);
                return Err(e);
            }
        };

        let result = match &self.form.mode {
            FormMode::Editing(id) => {
                info!("✏️ Actualizando vehículo {}", id);
                self.api
                    .update(id, &payload)
                    .await
                    .map(|_| "Vehículo actualizado")
            }
            FormMode::Create => {
                info!("➕ Creando vehículo {}", payload.plate);
                self.api.create(&payload).await.map(|_| "Vehículo creado")
            }
        };

        match result {
            Ok(message) => {
                self.view.show_notification(&Notification::success(message));
                self.reset();
                // un fallo aquí ya queda notificado por load()
                let _ = self.load().await;
                Ok(())
            }
            Err(e) => {
                error!("❌ Error guardando vehículo: {}", e);
                self.notify_error(&e);
                Err(e)
            }
        }
    }

    /// Pasar a modo edición con los valores del vehículo `id`.
    ///
    /// Devuelve false (sin tocar el formulario) si el id no está en la copia
    /// local.
    pub fn begin_edit(&mut self, id: &str) -> bool {
        let Some(vehicle) = self.find(id) else {
            debug!("Vehículo {} no está en el listado, se ignora la edición", id);
            return false;
        };

        self.form = FormState {
            values: VehicleForm::from(vehicle),
            mode: FormMode::Editing(id.to_string()),
        };
        self.view.show_form(&self.form);
        true
    }

    /// Abrir la confirmación de borrado para `id`
    pub fn request_delete(&mut self, id: &str) -> bool {
        let Some(vehicle) = self.find(id) else {
            debug!("Vehículo {} no está en el listado, no se pide confirmación", id);
            return false;
        };

        let prompt = DeletePrompt::for_vehicle(vehicle);
        self.view.show_delete_prompt(&prompt);
        self.pending_delete = Some(prompt);
        true
    }

    /// Borrar el vehículo de la confirmación abierta
    pub async fn confirm_pending_delete(&mut self) -> ClientResult<()> {
        match self.pending_delete.take() {
            Some(prompt) => self.confirm_delete(&prompt.id).await,
            None => {
                self.view
                    .show_notification(&Notification::info("No hay ningún borrado pendiente"));
                Ok(())
            }
        }
    }

    /// Borrar `id` en el servidor.
    ///
    /// La confirmación se cierra tanto si el borrado sale bien como si no.
    pub async fn confirm_delete(&mut self, id: &str) -> ClientResult<()> {
        let result = self.api.delete(id).await;
        self.pending_delete = None;
        self.view.close_delete_prompt();

        match result {
            Ok(()) => {
                info!("🗑️ Vehículo {} eliminado", id);
                self.view
                    .show_notification(&Notification::success("Vehículo eliminado"));
                if self.editing_id() == Some(id) {
                    self.reset();
                }
                let _ = self.load().await;
                Ok(())
            }
            Err(e) => {
                error!("❌ Error eliminando vehículo {}: {}", id, e);
                self.notify_error(&e);
                Err(e)
            }
        }
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
        self.view.close_delete_prompt();
    }

    /// Pintar solo los vehículos que cumplen el filtro; la copia local no
    /// cambia.
    pub fn filter(&mut self, search_term: &str, category: &str) -> Vec<Vehicle> {
        let filtered = VehicleFilter::new(search_term, category).apply(&self.vehicles);
        debug!(
            "🔍 Filtro '{}' / '{}': {} de {}",
            search_term,
            category,
            filtered.len(),
            self.vehicles.len()
        );
        self.view.render(&filtered);
        filtered
    }

    /// Vaciar el formulario y volver a modo alta
    pub fn reset(&mut self) {
        self.form = FormState::default();
        self.view.show_form(&self.form);
    }

    pub async fn show_statistics(&mut self) -> ClientResult<VehicleStatistics> {
        match self.api.statistics().await {
            Ok(statistics) => {
                self.view.show_statistics(&statistics);
                Ok(statistics)
            }
            Err(e) => {
                error!("❌ Error obteniendo estadísticas: {}", e);
                self.notify_error(&e);
                Err(e)
            }
        }
    }

    /// Búsqueda en el servidor; pinta el resultado sin tocar la copia local
    pub async fn advanced_search(&mut self, query: &AdvancedSearch) -> ClientResult<Vec<Vehicle>> {
        match self.api.advanced_search(query).await {
            Ok(found) => {
                self.view.render(&found);
                self.view.show_notification(&Notification::info(format!(
                    "{} vehículos encontrados",
                    found.len()
                )));
                Ok(found)
            }
            Err(e) => {
                error!("❌ Error en búsqueda avanzada: {}", e);
                self.notify_error(&e);
                Err(e)
            }
        }
    }

    pub async fn find_by_plate(&mut self, plate: &str) -> ClientResult<Vehicle> {
        match self.api.find_by_plate(plate).await {
            Ok(vehicle) => {
                self.view.render(std::slice::from_ref(&vehicle));
                Ok(vehicle)
            }
            Err(e) => {
                error!("❌ Error buscando matrícula {}: {}", plate, e);
                self.notify_error(&e);
                Err(e)
            }
        }
    }

    pub fn notify(&mut self, notification: Notification) {
        self.view.show_notification(&notification);
    }

    fn notify_error(&mut self, e: &ClientError) {
        self.view
            .show_notification(&Notification::error(format!("Error: {}", e.user_message())));
    }

    fn find(&self, id: &str) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id == id)
    }
}
