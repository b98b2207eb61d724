//! Location catalogue
//!
//! Fixed name -> elevation table, built once at startup and read-only
//! afterwards. Shared freely across threads.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Neighbourhoods of Belém (PA) with their mean elevation in metres
const BELEM_NEIGHBOURHOODS: &[(&str, f64)] = &[
    // Low-lying zone
    ("Jurunas", 4.0),
    ("Condor", 4.0),
    ("Guamá", 4.5),
    ("Terra Firme", 4.5),
    ("Cremação", 5.0),
    ("Cidade Velha", 5.0),
    ("Reduto", 5.0),
    ("Campina", 6.0),
    ("Comércio", 4.0),
    ("Telégrafo", 5.0),
    ("Barreiro", 5.0),
    ("Sacramenta", 5.5),
    ("Val-de-Cans", 4.0),
    ("Pratinha", 4.0),
    ("Miramar", 5.0),
    ("Universitário", 5.0),
    ("Maracacuera", 5.0),
    ("Paracuri", 5.0),
    ("Bengui", 6.0),
    // Middle zone
    ("Umarizal", 6.0),
    ("Batista Campos", 9.0),
    ("Canudos", 8.0),
    ("Fátima", 9.0),
    ("Pedreira", 7.0),
    ("Souza", 9.0),
    ("Aurá", 8.0),
    ("Cabanagem", 8.0),
    ("Una", 7.0),
    ("Tapanã", 7.0),
    ("Agulha", 7.0),
    ("Águas Negras", 6.0),
    ("Campina de Icoaraci", 7.0),
    ("Parque Guajará", 6.0),
    ("Ponta Grossa", 6.0),
    ("Maracangalha", 6.0),
    // High ground
    ("Nazaré", 13.0),
    ("São Brás", 12.0),
    ("Marco", 13.0),
    ("Curió-Utinga", 10.0),
    ("Guanabara", 10.0),
    ("Castanheira", 11.0),
    ("Marambaia", 12.0),
    ("Mangueirão", 10.0),
    ("Parque Verde", 14.0),
    ("Coqueiro", 10.0),
    ("Águas Lindas", 15.0),
    ("São Clemente", 12.0),
    ("Tenoné", 11.0),
    ("Cruzeiro", 10.0),
];

/// A catalogued location and its elevation baseline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocationRecord {
    pub name: String,
    pub elevation: f64,
}

/// Immutable set of locations, in catalogue order
#[derive(Debug, Clone)]
pub struct LocationCatalogue {
    locations: Vec<LocationRecord>,
}

impl LocationCatalogue {
    /// Build a catalogue, rejecting duplicate names and invalid elevations
    pub fn new(locations: Vec<LocationRecord>) -> Result<Self> {
        if locations.is_empty() {
            anyhow::bail!("location catalogue must not be empty");
        }

        let mut seen = HashSet::new();
        for location in &locations {
            if location.name.trim().is_empty() {
                anyhow::bail!("location name must not be empty");
            }
            if !location.elevation.is_finite() || location.elevation < 0.0 {
                anyhow::bail!(
                    "elevation of {} must be a non-negative number (got {})",
                    location.name,
                    location.elevation
                );
            }
            if !seen.insert(location.name.as_str()) {
                anyhow::bail!("duplicate location name: {}", location.name);
            }
        }

        Ok(LocationCatalogue { locations })
    }

    /// The built-in Belém neighbourhood table
    pub fn belem() -> Self {
        let locations = BELEM_NEIGHBOURHOODS
            .iter()
            .map(|&(name, elevation)| LocationRecord {
                name: name.to_string(),
                elevation,
            })
            .collect();
        LocationCatalogue { locations }
    }

    pub fn locations(&self) -> &[LocationRecord] {
        &self.locations
    }

    pub fn get(&self, name: &str) -> Option<&LocationRecord> {
        self.locations.iter().find(|l| l.name == name)
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, elevation: f64) -> LocationRecord {
        LocationRecord {
            name: name.to_string(),
            elevation,
        }
    }

    #[test]
    fn test_builtin_table_is_valid() {
        let builtin = LocationCatalogue::belem();
        assert_eq!(builtin.len(), 49);
        let validated = LocationCatalogue::new(builtin.locations().to_vec())
            .expect("built-in catalogue should validate");
        assert_eq!(validated.len(), builtin.len());
    }

    #[test]
    fn test_lookup_by_name() {
        let catalogue = LocationCatalogue::belem();
        assert_eq!(catalogue.get("Nazaré").map(|l| l.elevation), Some(13.0));
        assert_eq!(catalogue.get("Jurunas").map(|l| l.elevation), Some(4.0));
        assert!(catalogue.get("Atlantis").is_none());
    }

    #[test]
    fn test_reject_duplicate_names() {
        let result = LocationCatalogue::new(vec![record("Marco", 13.0), record("Marco", 12.0)]);
        assert!(result.is_err());
    }

    #[test]
    fn test_reject_negative_elevation() {
        assert!(LocationCatalogue::new(vec![record("Pit", -1.0)]).is_err());
        assert!(LocationCatalogue::new(vec![record("Void", f64::NAN)]).is_err());
    }

    #[test]
    fn test_reject_empty_catalogue_and_names() {
        assert!(LocationCatalogue::new(Vec::new()).is_err());
        assert!(LocationCatalogue::new(vec![record("  ", 3.0)]).is_err());
    }

    #[test]
    fn test_preserves_catalogue_order() {
        let catalogue =
            LocationCatalogue::new(vec![record("Zeta", 1.0), record("Alpha", 2.0)]).unwrap();
        let names: Vec<&str> = catalogue
            .locations()
            .iter()
            .map(|l| l.name.as_str())
            .collect();
        assert_eq!(names, vec!["Zeta", "Alpha"]);
    }
}
