use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::vehicle::{Vehicle, VehiclePayload};
use crate::utils::errors::ClientResult;
use crate::utils::validation::{parse_price, parse_year};

// Campos del formulario de alta/edición
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Brand,
    Model,
    Plate,
    Year,
    Color,
    Price,
    Category,
}

impl FormField {
    pub const ALL: [FormField; 7] = [
        FormField::Brand,
        FormField::Model,
        FormField::Plate,
        FormField::Year,
        FormField::Color,
        FormField::Price,
        FormField::Category,
    ];

    /// Nombre del campo tal como lo escribe el usuario (y como viaja en el JSON)
    pub fn name(&self) -> &'static str {
        match self {
            FormField::Brand => "marca",
            FormField::Model => "modelo",
            FormField::Plate => "matricula",
            FormField::Year => "año",
            FormField::Color => "color",
            FormField::Price => "precio",
            FormField::Category => "tipo",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase();
        // "ano" para teclados sin ñ
        let name = if name == "ano" { "año".to_string() } else { name };
        Self::ALL.into_iter().find(|f| f.name() == name)
    }
}

// Valores crudos del formulario, tal como los escribió el usuario
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VehicleForm {
    pub brand: String,
    pub model: String,
    pub plate: String,
    pub year: String,
    pub color: String,
    pub price: String,
    pub category: String,
}

impl VehicleForm {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Brand => &self.brand,
            FormField::Model => &self.model,
            FormField::Plate => &self.plate,
            FormField::Year => &self.year,
            FormField::Color => &self.color,
            FormField::Price => &self.price,
            FormField::Category => &self.category,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Brand => self.brand = value,
            FormField::Model => self.model = value,
            FormField::Plate => self.plate = value,
            FormField::Year => self.year = value,
            FormField::Color => self.color = value,
            FormField::Price => self.price = value,
            FormField::Category => self.category = value,
        }
    }

    /// Convertir el formulario en el cuerpo de POST/PUT.
    ///
    /// El año se interpreta como entero y el precio como decimal; el
    /// resultado se valida con las mismas reglas que aplica el servidor.
    pub fn to_payload(&self) -> ClientResult<VehiclePayload> {
        let payload = VehiclePayload {
            brand: self.brand.trim().to_string(),
            model: self.model.trim().to_string(),
            plate: self.plate.trim().to_string(),
            year: parse_year(&self.year)?,
            color: self.color.trim().to_string(),
            price: parse_price(&self.price)?,
            category: self.category.trim().to_string(),
        };
        payload.validate()?;
        Ok(payload)
    }
}

impl From<&Vehicle> for VehicleForm {
    fn from(vehicle: &Vehicle) -> Self {
        Self {
            brand: vehicle.brand.clone(),
            model: vehicle.model.clone(),
            plate: vehicle.plate.clone(),
            year: vehicle.year.to_string(),
            color: vehicle.color.clone(),
            price: vehicle.price.to_string(),
            category: vehicle.category.clone(),
        }
    }
}

// Modo del formulario: alta o edición de un id concreto
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    Create,
    Editing(String),
}

// Lo que la vista necesita para pintar el formulario
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    pub values: VehicleForm,
    pub mode: FormMode,
}

impl FormState {
    pub fn editing_id(&self) -> Option<&str> {
        match &self.mode {
            FormMode::Editing(id) => Some(id),
            FormMode::Create => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Agregar Vehículo",
            FormMode::Editing(_) => "Editando Vehículo",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Guardar",
            FormMode::Editing(_) => "Actualizar",
        }
    }

    pub fn show_cancel(&self) -> bool {
        matches!(self.mode, FormMode::Editing(_))
    }
}

// Cuerpo de error del servidor: {"error": "..."}
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub error: Option<String>,
}

// Cuerpo de éxito del servidor en DELETE: {"mensaje": "..."}
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiMessage {
    pub mensaje: String,
}
