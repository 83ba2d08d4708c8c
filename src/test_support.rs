//! Dobles de prueba compartidos por los tests unitarios

use std::sync::Mutex;

use async_trait::async_trait;

use crate::client::VehicleApi;
use crate::dto::vehicle_dto::FormState;
use crate::models::vehicle::{AdvancedSearch, Vehicle, VehiclePayload, VehicleStatistics};
use crate::utils::errors::{ClientError, ClientResult, DELETE_FAILED, LOAD_FAILED, QUERY_FAILED};
use crate::view::{DeletePrompt, Notification, NotificationKind, VehicleView};

pub fn sample_vehicle(id: &str, brand: &str, model: &str) -> Vehicle {
    Vehicle {
        id: id.to_string(),
        brand: brand.to_string(),
        model: model.to_string(),
        plate: format!("PLT-{}", id),
        year: 2020,
        color: "Rojo".to_string(),
        price: 15000.0,
        category: "COCHE".to_string(),
        created_at: None,
        updated_at: None,
    }
}

#[derive(Default)]
struct FakeState {
    vehicles: Vec<Vehicle>,
    calls: Vec<String>,
    fail_list: bool,
    fail_write: Option<String>,
    fail_delete: bool,
    next_id: u32,
}

/// API en memoria que registra cada llamada
#[derive(Default)]
pub struct FakeApi {
    state: Mutex<FakeState>,
}

impl FakeApi {
    pub fn with(vehicles: Vec<Vehicle>) -> Self {
        Self {
            state: Mutex::new(FakeState {
                vehicles,
                ..Default::default()
            }),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn fail_next_list(&self) {
        self.state.lock().unwrap().fail_list = true;
    }

    pub fn fail_next_write(&self, message: &str) {
        self.state.lock().unwrap().fail_write = Some(message.to_string());
    }

    pub fn fail_next_delete(&self) {
        self.state.lock().unwrap().fail_delete = true;
    }
}

#[async_trait]
impl VehicleApi for FakeApi {
    async fn list(&self) -> ClientResult<Vec<Vehicle>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push("list".to_string());
        if std::mem::take(&mut state.fail_list) {
            return Err(ClientError::Status {
                status: 500,
                message: LOAD_FAILED.to_string(),
            });
        }
        Ok(state.vehicles.clone())
    }

    async fn create(&self, payload: &VehiclePayload) -> ClientResult<Vehicle> {
        let mut state = self.state.lock().unwrap();
        state.calls.push("create".to_string());
        if let Some(message) = state.fail_write.take() {
            return Err(ClientError::Api { status: 400, message });
        }
        state.next_id += 1;
        let vehicle = payload.clone().into_vehicle(format!("new-{}", state.next_id));
        state.vehicles.push(vehicle.clone());
        Ok(vehicle)
    }

    async fn update(&self, id: &str, payload: &VehiclePayload) -> ClientResult<Vehicle> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("update:{}", id));
        if let Some(message) = state.fail_write.take() {
            return Err(ClientError::Api { status: 400, message });
        }
        let vehicle = payload.clone().into_vehicle(id.to_string());
        match state.vehicles.iter_mut().find(|v| v.id == id) {
            Some(slot) => {
                *slot = vehicle.clone();
                Ok(vehicle)
            }
            None => Err(ClientError::Api {
                status: 404,
                message: format!("Vehículo no encontrado con ID: {}", id),
            }),
        }
    }

    async fn delete(&self, id: &str) -> ClientResult<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("delete:{}", id));
        if std::mem::take(&mut state.fail_delete) {
            return Err(ClientError::Status {
                status: 404,
                message: DELETE_FAILED.to_string(),
            });
        }
        state.vehicles.retain(|v| v.id != id);
        Ok(())
    }

    async fn find_by_plate(&self, plate: &str) -> ClientResult<Vehicle> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("plate:{}", plate));
        state
            .vehicles
            .iter()
            .find(|v| v.plate == plate)
            .cloned()
            .ok_or(ClientError::Status {
                status: 404,
                message: QUERY_FAILED.to_string(),
            })
    }

    async fn statistics(&self) -> ClientResult<VehicleStatistics> {
        let mut state = self.state.lock().unwrap();
        state.calls.push("statistics".to_string());
        let mut stats = VehicleStatistics {
            total: state.vehicles.len() as u64,
            ..Default::default()
        };
        for v in &state.vehicles {
            *stats.by_brand.entry(v.brand.clone()).or_default() += 1;
            *stats.by_category.entry(v.category.clone()).or_default() += 1;
        }
        if !state.vehicles.is_empty() {
            stats.average_price =
                state.vehicles.iter().map(|v| v.price).sum::<f64>() / state.vehicles.len() as f64;
        }
        Ok(stats)
    }

    async fn advanced_search(&self, query: &AdvancedSearch) -> ClientResult<Vec<Vehicle>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push("advanced_search".to_string());
        Ok(state
            .vehicles
            .iter()
            .filter(|v| query.brand.as_deref().map_or(true, |b| v.brand == b))
            .filter(|v| query.category.as_deref().map_or(true, |c| v.category == c))
            .cloned()
            .collect())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    Render(Vec<Vehicle>),
    Form(FormState),
    Notification(Notification),
    Total(usize),
    Prompt(DeletePrompt),
    PromptClosed,
    Statistics(VehicleStatistics),
}

/// Vista que solo apunta lo que se le pide pintar
#[derive(Debug, Default)]
pub struct RecordingView {
    pub events: Vec<ViewEvent>,
    pub totals: Vec<usize>,
}

impl RecordingView {
    pub fn last_rendered(&self) -> Option<Vec<Vehicle>> {
        self.events.iter().rev().find_map(|e| match e {
            ViewEvent::Render(rows) => Some(rows.clone()),
            _ => None,
        })
    }

    pub fn render_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, ViewEvent::Render(_)))
            .count()
    }

    fn has(&self, kind: NotificationKind, message: &str) -> bool {
        self.events.iter().any(|e| {
            matches!(e, ViewEvent::Notification(n) if n.kind == kind && n.message == message)
        })
    }

    pub fn has_success(&self, message: &str) -> bool {
        self.has(NotificationKind::Success, message)
    }

    pub fn has_error(&self, message: &str) -> bool {
        self.has(NotificationKind::Error, message)
    }

    pub fn has_info(&self, message: &str) -> bool {
        self.has(NotificationKind::Info, message)
    }
}

impl VehicleView for RecordingView {
    fn render(&mut self, vehicles: &[Vehicle]) {
        self.events.push(ViewEvent::Render(vehicles.to_vec()));
    }

    fn show_form(&mut self, form: &FormState) {
        self.events.push(ViewEvent::Form(form.clone()));
    }

    fn show_notification(&mut self, notification: &Notification) {
        self.events.push(ViewEvent::Notification(notification.clone()));
    }

    fn update_total(&mut self, total: usize) {
        self.totals.push(total);
        self.events.push(ViewEvent::Total(total));
    }

    fn show_delete_prompt(&mut self, prompt: &DeletePrompt) {
        self.events.push(ViewEvent::Prompt(prompt.clone()));
    }

    fn close_delete_prompt(&mut self) {
        self.events.push(ViewEvent::PromptClosed);
    }

    fn show_statistics(&mut self, statistics: &VehicleStatistics) {
        self.events.push(ViewEvent::Statistics(statistics.clone()));
    }
}
