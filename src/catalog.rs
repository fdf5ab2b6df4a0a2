// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Discrete pipe catalogs and the registry that resolves them by name.

use std::{collections::BTreeMap, path::Path};

use serde::{Deserialize, Serialize};

use crate::{pipe_sizer, Error, FluidProperties};

/// The quantity a catalog uses to rate the capacity of its pipes.
///
/// All entries of a catalog share one metric.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CapacityMetric {
    /// Maximum mass flow in kg/s.
    MassFlow,
    /// Maximum mean flow velocity in m/s.
    Velocity,
    /// Maximum specific pressure drop in Pa/m, evaluated with the given
    /// Darcy friction factor.
    PressureGradient { friction_factor: f64 },
}

impl CapacityMetric {
    /// Converts a capacity value of this metric into the maximum mass flow in
    /// kg/s that a pipe with the given inner diameter can carry.
    pub fn max_mass_flow(&self, inner_diameter: f64, capacity: f64, fluid: &FluidProperties) -> f64 {
        match self {
            CapacityMetric::MassFlow => capacity,
            CapacityMetric::Velocity => {
                capacity * fluid.density * pipe_sizer::cross_section_area(inner_diameter)
            }
            CapacityMetric::PressureGradient { friction_factor } => {
                pipe_sizer::mass_flow_at_pressure_gradient(
                    capacity,
                    inner_diameter,
                    *friction_factor,
                    fluid,
                )
            }
        }
    }
}

/// A single pipe size offered by a manufacturer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PipeCatalogEntry {
    dn: String,
    inner_diameter: f64,
    capacity: f64,
}

impl PipeCatalogEntry {
    /// Creates a new entry.  `inner_diameter` is in meters, `capacity` in the
    /// unit of the catalog's [`CapacityMetric`].
    pub fn new(dn: impl Into<String>, inner_diameter: f64, capacity: f64) -> Self {
        Self {
            dn: dn.into(),
            inner_diameter,
            capacity,
        }
    }

    /// The nominal diameter label, e.g. `DN50`.
    pub fn dn(&self) -> &str {
        &self.dn
    }

    /// The inner diameter in meters.
    pub fn inner_diameter(&self) -> f64 {
        self.inner_diameter
    }

    /// The capacity in the unit of the catalog's metric.
    pub fn capacity(&self) -> f64 {
        self.capacity
    }
}

/// An ordered table of pipe sizes, sorted by increasing inner diameter.
///
/// The maximum mass flow derived from the entries never decreases along the
/// table, so looking up the first sufficient entry is monotone in the
/// required flow.
#[derive(Clone, Debug, PartialEq)]
pub struct PipeCatalog {
    name: String,
    metric: CapacityMetric,
    entries: Vec<PipeCatalogEntry>,
}

/// On-disk representation of a catalog.
#[derive(Deserialize)]
struct CatalogFile {
    name: String,
    metric: CapacityMetric,
    entries: Vec<PipeCatalogEntry>,
}

impl PipeCatalog {
    /// Creates a catalog from the given entries, sorting them by diameter.
    ///
    /// Returns a configuration error if the catalog is empty, if an entry has
    /// a non-positive diameter or capacity, or if the capacity decreases with
    /// increasing diameter.
    pub fn try_new(
        name: impl Into<String>,
        metric: CapacityMetric,
        entries: impl IntoIterator<Item = PipeCatalogEntry>,
    ) -> Result<Self, Error> {
        let name = name.into();
        let mut entries: Vec<PipeCatalogEntry> = entries.into_iter().collect();

        if entries.is_empty() {
            return Err(Error::configuration(format!(
                "Pipe catalog {name:?} has no entries."
            )));
        }
        if let CapacityMetric::PressureGradient { friction_factor } = metric {
            if !(friction_factor.is_finite() && friction_factor > 0.0) {
                return Err(Error::configuration(format!(
                    "Pipe catalog {name:?}: friction factor must be positive, found {friction_factor}."
                )));
            }
        }
        for entry in &entries {
            for (what, value) in [
                ("inner diameter", entry.inner_diameter),
                ("capacity", entry.capacity),
            ] {
                if !(value.is_finite() && value > 0.0) {
                    return Err(Error::configuration(format!(
                        "Pipe catalog {name:?}: {} has a non-positive {what}: {value}.",
                        entry.dn
                    )));
                }
            }
        }

        entries.sort_by(|a, b| a.inner_diameter.total_cmp(&b.inner_diameter));

        // Every metric scales with the density alone, so the order found for
        // one fluid holds for all of them.
        let fluid = FluidProperties::default();
        for pair in entries.windows(2) {
            let smaller = metric.max_mass_flow(pair[0].inner_diameter, pair[0].capacity, &fluid);
            let larger = metric.max_mass_flow(pair[1].inner_diameter, pair[1].capacity, &fluid);
            if larger < smaller {
                return Err(Error::configuration(format!(
                    "Pipe catalog {name:?}: {} has less capacity than the smaller {}.",
                    pair[1].dn, pair[0].dn
                )));
            }
        }

        Ok(Self {
            name,
            metric,
            entries,
        })
    }

    /// Reads a catalog from a JSON document of the form
    /// `{"name": .., "metric": {"kind": ..}, "entries": [{"dn": .., "inner_diameter": .., "capacity": ..}]}`.
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        let file: CatalogFile = serde_json::from_str(json)
            .map_err(|e| Error::data(format!("Malformed pipe catalog: {e}")))?;
        Self::try_new(file.name, file.metric, file.entries)
    }

    /// Reads a catalog from a JSON file.  See [`PipeCatalog::from_json_str`].
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            Error::data(format!(
                "Can't read pipe catalog {}: {e}",
                path.display()
            ))
        })?;
        Self::from_json_str(&json)
    }

    /// The name of the catalog.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The capacity metric shared by all entries.
    pub fn metric(&self) -> CapacityMetric {
        self.metric
    }

    /// The entries, sorted by increasing inner diameter.
    pub fn entries(&self) -> &[PipeCatalogEntry] {
        &self.entries
    }

    /// The entry with the largest diameter.
    pub fn largest(&self) -> &PipeCatalogEntry {
        // `try_new` rejects empty catalogs.
        &self.entries[self.entries.len() - 1]
    }

    /// Maximum mass flow in kg/s of the given entry of this catalog.
    pub fn max_mass_flow(&self, entry: &PipeCatalogEntry, fluid: &FluidProperties) -> f64 {
        self.metric
            .max_mass_flow(entry.inner_diameter, entry.capacity, fluid)
    }

    fn builtin(name: &str, metric: CapacityMetric, rows: &[(&str, f64, f64)]) -> Self {
        Self {
            name: name.to_string(),
            metric,
            entries: rows
                .iter()
                .map(|(dn, diameter, capacity)| PipeCatalogEntry::new(*dn, *diameter, *capacity))
                .collect(),
        }
    }

    /// Rigid bonded district heating pipes by isoplus, rated by the mass flow
    /// that causes a specific pressure drop of about 70 Pa/m.
    pub fn isoplus() -> Self {
        Self::builtin("isoplus", CapacityMetric::MassFlow, ISOPLUS)
    }

    /// Nominal steel pipe diameters, rated by a specific pressure drop of
    /// 80 Pa/m with a friction factor of 0.025.
    pub fn generic() -> Self {
        Self::builtin(
            "generic",
            CapacityMetric::PressureGradient {
                friction_factor: 0.025,
            },
            GENERIC,
        )
    }
}

const ISOPLUS: &[(&str, f64, f64)] = &[
    ("DN20", 0.0217, 0.125),
    ("DN25", 0.0273, 0.25),
    ("DN32", 0.036, 0.513888889),
    ("DN40", 0.0419, 0.763888889),
    ("DN50", 0.0539, 1.416666667),
    ("DN65", 0.0697, 2.819444444),
    ("DN80", 0.0825, 4.305555556),
    ("DN100", 0.1071, 8.541666667),
    ("DN125", 0.1325, 15.0),
    ("DN150", 0.1603, 24.58333333),
    ("DN200", 0.2101, 50.0),
    ("DN250", 0.263, 90.0),
    ("DN300", 0.3127, 141.5277778),
    ("DN350", 0.3444, 182.6388889),
    ("DN400", 0.3938, 258.6111111),
    ("DN450", 0.4446, 354.1666667),
    ("DN500", 0.4954, 470.8333333),
    ("DN600", 0.5958, 755.5555556),
    ("DN700", 0.695, 1130.555556),
    ("DN800", 0.7954, 1615.277778),
    ("DN900", 0.894, 2347.222222),
    ("DN1000", 0.994, 2555.555556),
];

const GENERIC: &[(&str, f64, f64)] = &[
    ("DN15", 0.015, 80.0),
    ("DN20", 0.02, 80.0),
    ("DN25", 0.025, 80.0),
    ("DN32", 0.032, 80.0),
    ("DN40", 0.04, 80.0),
    ("DN50", 0.05, 80.0),
    ("DN65", 0.065, 80.0),
    ("DN80", 0.08, 80.0),
    ("DN100", 0.1, 80.0),
    ("DN125", 0.125, 80.0),
    ("DN150", 0.15, 80.0),
    ("DN200", 0.2, 80.0),
    ("DN250", 0.25, 80.0),
    ("DN300", 0.3, 80.0),
    ("DN350", 0.35, 80.0),
    ("DN400", 0.4, 80.0),
    ("DN450", 0.45, 80.0),
    ("DN500", 0.5, 80.0),
    ("DN600", 0.6, 80.0),
    ("DN700", 0.7, 80.0),
    ("DN800", 0.8, 80.0),
    ("DN900", 0.9, 80.0),
    ("DN1000", 1.0, 80.0),
    ("DN1100", 1.1, 80.0),
    ("DN1200", 1.2, 80.0),
];

/// Named pipe catalogs available to a sizing run.
///
/// The default registry contains the built-in `isoplus` and `generic`
/// catalogs.
#[derive(Clone, Debug)]
pub struct CatalogRegistry {
    catalogs: BTreeMap<String, PipeCatalog>,
}

impl Default for CatalogRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(PipeCatalog::isoplus());
        registry.register(PipeCatalog::generic());
        registry
    }
}

impl CatalogRegistry {
    /// Creates a registry without any catalogs.
    pub fn empty() -> Self {
        Self {
            catalogs: BTreeMap::new(),
        }
    }

    /// Adds a catalog under its name, returning the catalog it replaces.
    pub fn register(&mut self, catalog: PipeCatalog) -> Option<PipeCatalog> {
        self.catalogs.insert(catalog.name().to_string(), catalog)
    }

    /// Reads a catalog from a JSON file and registers it.
    pub fn load_json_file(&mut self, path: impl AsRef<Path>) -> Result<&PipeCatalog, Error> {
        let catalog = PipeCatalog::from_json_file(path)?;
        let name = catalog.name().to_string();
        tracing::debug!(
            "Loaded pipe catalog {name:?} with {} entries.",
            catalog.entries().len()
        );
        self.register(catalog);
        self.get(&name)
    }

    /// Returns the catalog with the given name.
    pub fn get(&self, name: &str) -> Result<&PipeCatalog, Error> {
        self.catalogs.get(name).ok_or_else(|| {
            Error::configuration(format!(
                "Unknown pipe catalog: {name:?}. Available catalogs: [{}].",
                self.names().collect::<Vec<_>>().join(", ")
            ))
        })
    }

    /// Returns the names of all registered catalogs, in alphabetical order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.catalogs.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use approx::assert_relative_eq;

    #[test]
    fn test_builtins_are_valid() -> Result<(), Error> {
        for catalog in [PipeCatalog::isoplus(), PipeCatalog::generic()] {
            let validated = PipeCatalog::try_new(
                catalog.name(),
                catalog.metric(),
                catalog.entries().to_vec(),
            )?;
            assert_eq!(validated, catalog);
        }
        assert_eq!(PipeCatalog::isoplus().entries().len(), 22);
        assert_eq!(PipeCatalog::generic().entries().len(), 25);
        assert_eq!(PipeCatalog::isoplus().largest().dn(), "DN1000");
        Ok(())
    }

    #[test]
    fn test_entries_are_sorted() -> Result<(), Error> {
        let catalog = PipeCatalog::try_new(
            "unsorted",
            CapacityMetric::MassFlow,
            vec![
                PipeCatalogEntry::new("DN50", 0.05, 1.4),
                PipeCatalogEntry::new("DN20", 0.02, 0.1),
                PipeCatalogEntry::new("DN32", 0.032, 0.5),
            ],
        )?;
        assert_eq!(
            catalog.entries().iter().map(|e| e.dn()).collect::<Vec<_>>(),
            ["DN20", "DN32", "DN50"]
        );
        Ok(())
    }

    #[test]
    fn test_validation() {
        assert_eq!(
            PipeCatalog::try_new("empty", CapacityMetric::MassFlow, vec![]),
            Err(Error::configuration("Pipe catalog \"empty\" has no entries."))
        );
        assert_eq!(
            PipeCatalog::try_new(
                "negative",
                CapacityMetric::Velocity,
                vec![PipeCatalogEntry::new("DN20", -0.02, 1.0)]
            ),
            Err(Error::configuration(
                "Pipe catalog \"negative\": DN20 has a non-positive inner diameter: -0.02."
            ))
        );
        assert_eq!(
            PipeCatalog::try_new(
                "decreasing",
                CapacityMetric::MassFlow,
                vec![
                    PipeCatalogEntry::new("DN20", 0.02, 0.5),
                    PipeCatalogEntry::new("DN25", 0.025, 0.4),
                ]
            ),
            Err(Error::configuration(
                "Pipe catalog \"decreasing\": DN25 has less capacity than the smaller DN20."
            ))
        );
        assert!(PipeCatalog::try_new(
            "friction",
            CapacityMetric::PressureGradient {
                friction_factor: 0.0
            },
            vec![PipeCatalogEntry::new("DN20", 0.02, 80.0)]
        )
        .is_err_and(|e| e.kind() == ErrorKind::Configuration));
    }

    #[test]
    fn test_order_holds_for_any_density() -> Result<(), Error> {
        let velocity = PipeCatalog::try_new(
            "velocity",
            CapacityMetric::Velocity,
            vec![
                PipeCatalogEntry::new("DN20", 0.0217, 0.8),
                PipeCatalogEntry::new("DN25", 0.0273, 0.6),
                PipeCatalogEntry::new("DN32", 0.036, 0.4),
            ],
        )?;
        for catalog in [PipeCatalog::isoplus(), PipeCatalog::generic(), velocity] {
            for density in [500.0, 983.0, 1500.0] {
                let fluid = FluidProperties {
                    density,
                    ..Default::default()
                };
                let flows = catalog
                    .entries()
                    .iter()
                    .map(|entry| catalog.max_mass_flow(entry, &fluid))
                    .collect::<Vec<_>>();
                assert!(
                    flows.windows(2).all(|w| w[0] <= w[1]),
                    "{} at {density} kg/m³: {flows:?}",
                    catalog.name()
                );
            }
        }
        Ok(())
    }

    #[test]
    fn test_max_mass_flow() {
        let fluid = FluidProperties {
            density: 1000.0,
            specific_heat_capacity: 4184.0,
        };

        assert_eq!(CapacityMetric::MassFlow.max_mass_flow(0.1, 8.5, &fluid), 8.5);

        // 1 m/s through 0.1 m: 1000 * pi * 0.01 / 4
        assert_relative_eq!(
            CapacityMetric::Velocity.max_mass_flow(0.1, 1.0, &fluid),
            7.853981633974483,
            max_relative = 1e-12
        );

        let metric = CapacityMetric::PressureGradient {
            friction_factor: 0.025,
        };
        let m_max = metric.max_mass_flow(0.1, 80.0, &fluid);
        assert_relative_eq!(
            pipe_sizer::pressure_gradient(m_max, 0.1, 0.025, &fluid),
            80.0,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_from_json() -> Result<(), Error> {
        let catalog = PipeCatalog::from_json_str(
            r#"{
                "name": "vendor",
                "metric": { "kind": "pressure_gradient", "friction_factor": 0.02 },
                "entries": [
                    { "dn": "DN25", "inner_diameter": 0.0273, "capacity": 100.0 },
                    { "dn": "DN20", "inner_diameter": 0.0217, "capacity": 100.0 }
                ]
            }"#,
        )?;
        assert_eq!(catalog.name(), "vendor");
        assert_eq!(
            catalog.metric(),
            CapacityMetric::PressureGradient {
                friction_factor: 0.02
            }
        );
        assert_eq!(catalog.entries()[0], PipeCatalogEntry::new("DN20", 0.0217, 100.0));

        assert!(PipeCatalog::from_json_str(r#"{ "name": "broken" }"#)
            .is_err_and(|e| e.kind() == ErrorKind::Data));
        assert!(PipeCatalog::from_json_file("/nonexistent/catalog.json")
            .is_err_and(|e| e.kind() == ErrorKind::Data));
        Ok(())
    }

    #[test]
    fn test_registry() -> Result<(), Error> {
        let mut registry = CatalogRegistry::default();
        assert_eq!(registry.names().collect::<Vec<_>>(), ["generic", "isoplus"]);
        assert_eq!(registry.get("isoplus")?.name(), "isoplus");
        assert_eq!(
            registry.get("missing"),
            Err(Error::configuration(
                "Unknown pipe catalog: \"missing\". Available catalogs: [generic, isoplus]."
            ))
        );

        let replaced = registry.register(PipeCatalog::try_new(
            "isoplus",
            CapacityMetric::MassFlow,
            vec![PipeCatalogEntry::new("DN20", 0.0217, 0.1)],
        )?);
        assert_eq!(replaced, Some(PipeCatalog::isoplus()));
        assert_eq!(registry.get("isoplus")?.entries().len(), 1);

        let path = std::env::temp_dir().join(format!(
            "hydronic-sizing-catalog-{}.json",
            std::process::id()
        ));
        std::fs::write(
            &path,
            r#"{ "name": "plastic", "metric": { "kind": "velocity" },
                 "entries": [ { "dn": "DN32", "inner_diameter": 0.026, "capacity": 1.2 } ] }"#,
        )
        .unwrap();
        let loaded = registry.load_json_file(&path).map(|c| c.name().to_string());
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded?, "plastic");
        assert!(registry.get("plastic").is_ok());
        Ok(())
    }
}
