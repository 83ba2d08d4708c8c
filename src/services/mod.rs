//! Services module
//!
//! Este módulo contiene la lógica que no depende ni de la red ni de la
//! presentación, como el filtrado local del listado.

pub mod vehicle_filter;

pub use vehicle_filter::*;
