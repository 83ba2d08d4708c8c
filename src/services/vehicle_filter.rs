use crate::models::vehicle::Vehicle;

/// Criterio de filtrado local: texto de búsqueda + tipo
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VehicleFilter {
    search_term: String,
    category: String,
}

impl VehicleFilter {
    pub fn new(search_term: &str, category: &str) -> Self {
        Self {
            search_term: search_term.to_lowercase(),
            category: category.to_string(),
        }
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn set_search_term(&mut self, term: &str) {
        self.search_term = term.to_lowercase();
    }

    pub fn set_category(&mut self, category: &str) {
        self.category = category.to_string();
    }

    /// Un vehículo coincide si el texto (sin distinguir mayúsculas) aparece en
    /// marca, modelo o matrícula, y además no hay tipo seleccionado o el tipo
    /// es exactamente el del vehículo.
    pub fn matches(&self, vehicle: &Vehicle) -> bool {
        let matches_search = vehicle.brand.to_lowercase().contains(&self.search_term)
            || vehicle.model.to_lowercase().contains(&self.search_term)
            || vehicle.plate.to_lowercase().contains(&self.search_term);

        let matches_category = self.category.is_empty() || vehicle.category == self.category;

        matches_search && matches_category
    }

    /// Subconjunto de `vehicles` que cumple el filtro, en el mismo orden
    pub fn apply(&self, vehicles: &[Vehicle]) -> Vec<Vehicle> {
        vehicles.iter().filter(|v| self.matches(v)).cloned().collect()
    }
}
