//! Eventos de interfaz y bucle de eventos
//!
//! Las líneas que escribe el usuario se convierten en `UiEvent`s; un único
//! bucle, dueño del controlador, los procesa de uno en uno y en orden. Cada
//! evento termina (incluidas sus llamadas HTTP) antes de empezar el
//! siguiente.

use lazy_static::lazy_static;
use regex::Regex;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::client::VehicleApi;
use crate::controllers::vehicle_controller::VehicleListClient;
use crate::dto::vehicle_dto::FormField;
use crate::models::vehicle::{AdvancedSearch, VehicleCategory};
use crate::services::vehicle_filter::VehicleFilter;
use crate::utils::validation::{parse_price, parse_year, MAX_YEAR, MIN_YEAR};
use crate::view::{Notification, VehicleView};

lazy_static! {
    // campo=valor, campo="valor con espacios", "texto", o palabra suelta
    static ref TOKEN_RE: Regex = Regex::new(r#"[^\s"=]+="[^"]*"|"[^"]*"|\S+"#).unwrap();
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Load,
    /// Campos que sobrescriben el formulario actual antes de enviarlo
    Submit(Vec<(FormField, String)>),
    BeginEdit(String),
    RequestDelete(String),
    ConfirmDelete,
    CancelDelete,
    SearchChanged(String),
    CategoryChanged(String),
    Reset,
    Statistics,
    AdvancedSearch(AdvancedSearch),
    FindByPlate(String),
    Help,
    /// Línea que no se pudo interpretar
    Invalid(String),
    Quit,
}

pub fn help_text() -> String {
    let categories = VehicleCategory::ALL
        .iter()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    [
        "Comandos:".to_string(),
        "  listar | recargar               recargar el listado".to_string(),
        "  buscar [texto]                  filtrar por marca, modelo o matrícula".to_string(),
        format!("  tipo [TIPO]                     filtrar por tipo ({})", categories),
        "  editar <id>                     cargar un vehículo en el formulario".to_string(),
        format!(
            "  guardar campo=valor ...         enviar el formulario (marca, modelo, matricula, año {}-{}, color, precio, tipo)",
            MIN_YEAR, MAX_YEAR
        ),
        "  limpiar | cancelar              vaciar el formulario".to_string(),
        "  eliminar <id>                   pedir confirmación de borrado (si / no)".to_string(),
        "  matricula <placa>               buscar por matrícula en el servidor".to_string(),
        "  avanzada campo=valor ...        marca, tipo, añomin+añomax, preciomin+preciomax".to_string(),
        "                                  (los rangos llevan siempre mínimo y máximo)".to_string(),
        "  estadisticas                    estadísticas del servidor".to_string(),
        "  ayuda | salir".to_string(),
    ]
    .join("\n")
}

fn tokenize(input: &str) -> Vec<String> {
    TOKEN_RE
        .find_iter(input)
        .map(|m| m.as_str().to_string())
        .collect()
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

fn split_assignment(token: &str) -> Option<(&str, &str)> {
    let (key, value) = token.split_once('=')?;
    Some((key, unquote(value)))
}

fn parse_form_fields(args: &str) -> Result<Vec<(FormField, String)>, String> {
    tokenize(args)
        .iter()
        .map(|token| {
            let (key, value) = split_assignment(token)
                .ok_or_else(|| format!("Se esperaba campo=valor, no '{}'", token))?;
            let field = FormField::from_name(key)
                .ok_or_else(|| format!("Campo desconocido: '{}'", key))?;
            Ok((field, value.to_string()))
        })
        .collect()
}

fn parse_advanced_search(args: &str) -> Result<AdvancedSearch, String> {
    let mut query = AdvancedSearch::default();
    for token in tokenize(args) {
        let (key, value) = split_assignment(&token)
            .ok_or_else(|| format!("Se esperaba campo=valor, no '{}'", token))?;
        let key = key.to_lowercase().replace('ñ', "n");
        match key.as_str() {
            "marca" => query.brand = Some(value.to_string()),
            "tipo" => query.category = Some(normalize_category(value)),
            "anomin" => query.year_min = Some(parse_year(value).map_err(|e| e.user_message())?),
            "anomax" => query.year_max = Some(parse_year(value).map_err(|e| e.user_message())?),
            "preciomin" => {
                query.price_min = Some(parse_price(value).map_err(|e| e.user_message())?)
            }
            "preciomax" => {
                query.price_max = Some(parse_price(value).map_err(|e| e.user_message())?)
            }
            other => return Err(format!("Parámetro desconocido: '{}'", other)),
        }
    }

    if query.is_empty() {
        return Err("Indica al menos un criterio de búsqueda (escribe 'ayuda')".to_string());
    }
    if let Some(field) = query.incomplete_range() {
        return Err(format!("El rango de {} necesita mínimo y máximo", field));
    }
    Ok(query)
}

/// Los tipos conocidos se escriben siempre en mayúsculas; el resto tal cual
fn normalize_category(value: &str) -> String {
    VehicleCategory::parse(value)
        .map(|c| c.as_str().to_string())
        .unwrap_or_else(|| value.trim().to_string())
}

/// Convertir una línea de entrada en evento; `None` para líneas vacías
pub fn parse_command(line: &str) -> Option<UiEvent> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    let event = match command.to_lowercase().as_str() {
        "listar" | "recargar" => UiEvent::Load,
        "buscar" => UiEvent::SearchChanged(unquote(rest).to_string()),
        "tipo" => UiEvent::CategoryChanged(normalize_category(unquote(rest))),
        "editar" | "eliminar" | "matricula" if rest.is_empty() => {
            UiEvent::Invalid(format!("Uso: {} <valor>", command))
        }
        "editar" => UiEvent::BeginEdit(unquote(rest).to_string()),
        "eliminar" => UiEvent::RequestDelete(unquote(rest).to_string()),
        "matricula" => UiEvent::FindByPlate(unquote(rest).to_string()),
        "si" | "sí" | "confirmar" => UiEvent::ConfirmDelete,
        "no" => UiEvent::CancelDelete,
        "guardar" => match parse_form_fields(rest) {
            Ok(fields) => UiEvent::Submit(fields),
            Err(message) => UiEvent::Invalid(message),
        },
        "limpiar" | "cancelar" => UiEvent::Reset,
        "estadisticas" | "estadísticas" => UiEvent::Statistics,
        "avanzada" => match parse_advanced_search(rest) {
            Ok(query) => UiEvent::AdvancedSearch(query),
            Err(message) => UiEvent::Invalid(message),
        },
        "ayuda" | "help" | "?" => UiEvent::Help,
        "salir" | "exit" | "quit" => UiEvent::Quit,
        other => UiEvent::Invalid(format!("Comando desconocido: '{}' (escribe 'ayuda')", other)),
    };

    Some(event)
}

/// Bucle de eventos: dueño del controlador y del estado de los filtros
pub struct EventLoop<A: VehicleApi, V: VehicleView> {
    controller: VehicleListClient<A, V>,
    filter: VehicleFilter,
}

impl<A: VehicleApi, V: VehicleView> EventLoop<A, V> {
    pub fn new(controller: VehicleListClient<A, V>) -> Self {
        Self {
            controller,
            filter: VehicleFilter::default(),
        }
    }

    pub fn controller(&self) -> &VehicleListClient<A, V> {
        &self.controller
    }

    pub fn filter(&self) -> &VehicleFilter {
        &self.filter
    }

    /// Procesar un evento. Devuelve false cuando hay que terminar.
    pub async fn handle(&mut self, event: UiEvent) -> bool {
        debug!("Evento: {:?}", event);

        // Los errores ya llegaron a la vista como notificación
        let outcome = match event {
            UiEvent::Load => self.controller.load().await,
            UiEvent::Submit(fields) => {
                let mut values = self.controller.form().values.clone();
                for (field, value) in fields {
                    values.set(field, value);
                }
                self.controller.submit(values).await
            }
            UiEvent::BeginEdit(id) => {
                if !self.controller.begin_edit(&id) {
                    self.controller
                        .notify(Notification::info(format!("No hay ningún vehículo con id {}", id)));
                }
                Ok(())
            }
            UiEvent::RequestDelete(id) => {
                if !self.controller.request_delete(&id) {
                    self.controller
                        .notify(Notification::info(format!("No hay ningún vehículo con id {}", id)));
                }
                Ok(())
            }
            UiEvent::ConfirmDelete => self.controller.confirm_pending_delete().await,
            UiEvent::CancelDelete => {
                self.controller.cancel_delete();
                Ok(())
            }
            UiEvent::SearchChanged(term) => {
                self.filter.set_search_term(&term);
                self.apply_filter();
                Ok(())
            }
            UiEvent::CategoryChanged(category) => {
                self.filter.set_category(&category);
                self.apply_filter();
                Ok(())
            }
            UiEvent::Reset => {
                self.controller.reset();
                Ok(())
            }
            UiEvent::Statistics => self.controller.show_statistics().await.map(|_| ()),
            UiEvent::AdvancedSearch(query) => {
                self.controller.advanced_search(&query).await.map(|_| ())
            }
            UiEvent::FindByPlate(plate) => self.controller.find_by_plate(&plate).await.map(|_| ()),
            UiEvent::Help => {
                self.controller.notify(Notification::info(help_text()));
                Ok(())
            }
            UiEvent::Invalid(message) => {
                self.controller.notify(Notification::error(message));
                Ok(())
            }
            UiEvent::Quit => {
                info!("👋 Saliendo");
                return false;
            }
        };

        if let Err(e) = outcome {
            debug!("Operación terminada con error: {}", e);
        }
        true
    }

    fn apply_filter(&mut self) {
        let term = self.filter.search_term().to_string();
        let category = self.filter.category().to_string();
        self.controller.filter(&term, &category);
    }

    /// Cargar el listado y procesar eventos hasta `Quit` o hasta que se
    /// cierre el canal. Devuelve el controlador.
    pub async fn run(mut self, mut events: mpsc::Receiver<UiEvent>) -> VehicleListClient<A, V> {
        let _ = self.controller.load().await;

        while let Some(event) = events.recv().await {
            if !self.handle(event).await {
                break;
            }
        }

        self.controller
    }
}
