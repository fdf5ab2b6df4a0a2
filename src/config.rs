// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module contains the configuration options for the `HydronicGraph`.

use serde::Deserialize;

use crate::{Error, NetworkType};

/// Properties of the heat transfer fluid.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct FluidProperties {
    /// Density in kg/m³.
    pub density: f64,

    /// Specific heat capacity in J/(kg·K).
    pub specific_heat_capacity: f64,
}

impl Default for FluidProperties {
    /// Water at typical district heating supply temperatures.
    fn default() -> Self {
        Self {
            density: 983.0,
            specific_heat_capacity: 4184.0,
        }
    }
}

/// Design temperature differences used for demand nodes that don't carry
/// their own, per network type.  `None` makes the node attribute mandatory
/// in that network.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct DefaultDeltaT {
    /// In K.  Defaults to 20.
    pub heating: Option<f64>,

    /// In K.  Defaults to 6.
    pub cooling: Option<f64>,
}

impl Default for DefaultDeltaT {
    fn default() -> Self {
        Self {
            heating: Some(20.0),
            cooling: Some(6.0),
        }
    }
}

impl DefaultDeltaT {
    /// No defaults: every demand node must carry its temperature difference.
    pub fn none() -> Self {
        Self {
            heating: None,
            cooling: None,
        }
    }

    pub fn for_network(&self, network_type: NetworkType) -> Option<f64> {
        match network_type {
            NetworkType::Heating => self.heating,
            NetworkType::Cooling => self.cooling,
        }
    }
}

/// Fittings assumed on every pipe when estimating its hydraulic equivalent
/// length.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Fittings {
    /// Distance in m between U-bends that take up thermal expansion.
    pub u_bend_spacing: f64,

    /// Gate valves per pipe.  May be fractional, as a network average.
    pub gate_valves: f64,
}

impl Default for Fittings {
    fn default() -> Self {
        Self {
            u_bend_spacing: 25.0,
            gate_valves: 2.0,
        }
    }
}

/// Configuration options for the `HydronicGraph`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SizingConfig {
    /// The fluid used to convert loads into mass flows and mass flows into
    /// velocities and pressure drops.
    pub fluid: FluidProperties,

    /// Network-wide design temperature differences for nodes that don't
    /// carry their own.
    pub default_delta_t: DefaultDeltaT,

    /// Maximum number of simple paths enumerated between a supply node and a
    /// demand node before the network is rejected as too meshed.
    pub max_paths_per_demand: usize,

    /// Darcy friction factor used to report the pressure drop of sized pipes
    /// when the catalog is not rated by pressure gradient.
    pub friction_factor: f64,

    /// Fittings used by
    /// [`HydronicGraph::estimate_fac`][crate::HydronicGraph::estimate_fac].
    pub fittings: Fittings,
}

impl Default for SizingConfig {
    fn default() -> Self {
        Self {
            fluid: FluidProperties::default(),
            default_delta_t: DefaultDeltaT::default(),
            max_paths_per_demand: 10_000,
            friction_factor: 0.025,
            fittings: Fittings::default(),
        }
    }
}

impl SizingConfig {
    /// Reads a configuration from a JSON document.  Missing fields take their
    /// default values.
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json)
            .map_err(|e| Error::configuration(format!("Invalid sizing configuration: {e}")))
    }
}
