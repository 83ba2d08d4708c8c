//! DTOs del cliente
//!
//! Formulario, estado del formulario y cuerpos auxiliares de la API.

pub mod vehicle_dto;

pub use vehicle_dto::*;
