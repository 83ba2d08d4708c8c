//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que mapean exactamente al JSON
//! del recurso REST de vehículos.

pub mod vehicle;

pub use vehicle::*;
