//! Capa de presentación
//!
//! El controlador no conoce la terminal: solo habla con un `VehicleView`.
//! `TerminalView` es la implementación que usa el binario.

pub mod terminal;

pub use terminal::TerminalView;

use crate::dto::vehicle_dto::FormState;
use crate::models::vehicle::{Vehicle, VehicleStatistics};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

/// Notificación transitoria (el "toast" de la interfaz)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Error,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Info,
        }
    }
}

/// Confirmación pendiente de borrado
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletePrompt {
    pub id: String,
    pub label: String,
}

impl DeletePrompt {
    pub fn for_vehicle(vehicle: &Vehicle) -> Self {
        Self {
            id: vehicle.id.clone(),
            label: vehicle.display_name(),
        }
    }

    pub fn message(&self) -> String {
        format!("¿Eliminar {}?", self.label)
    }
}

/// Todo lo que el controlador puede pedir a la presentación
pub trait VehicleView: Send {
    /// Pintar la tabla con exactamente estas filas
    fn render(&mut self, vehicles: &[Vehicle]);

    /// Pintar el formulario (valores, título y botones)
    fn show_form(&mut self, form: &FormState);

    fn show_notification(&mut self, notification: &Notification);

    /// Contador "total de vehículos" de la cabecera
    fn update_total(&mut self, total: usize);

    fn show_delete_prompt(&mut self, prompt: &DeletePrompt);

    fn close_delete_prompt(&mut self);

    fn show_statistics(&mut self, statistics: &VehicleStatistics);
}
