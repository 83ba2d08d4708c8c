//! Cliente de la API REST de vehículos
//!
//! Mantiene una copia local de la colección, la muestra en una tabla
//! filtrable y gestiona altas, ediciones y borrados contra el servidor.

pub mod client;
pub mod config;
pub mod controllers;
pub mod dto;
pub mod events;
pub mod models;
pub mod services;
pub mod utils;
pub mod view;

#[cfg(test)]
mod test_support;
