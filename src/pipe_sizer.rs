// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Selection of catalog pipes for a required mass flow, and the hydraulic
//! relations used to rate them.

use std::f64::consts::PI;

use crate::{Error, Fittings, FluidProperties, PipeCatalog, PipeCatalogEntry};

// Equivalent lengths of fittings, in pipe diameters.
const ELBOW_90: f64 = 20.0;
const TEE_RUN_THROUGH: f64 = 20.0;
const GATE_VALVE: f64 = 8.0;

/// Cross-section area in m² of a pipe with the given inner diameter.
pub fn cross_section_area(inner_diameter: f64) -> f64 {
    PI * inner_diameter * inner_diameter / 4.0
}

/// Mean flow velocity in m/s.
pub fn flow_velocity(m_flow: f64, inner_diameter: f64, fluid: &FluidProperties) -> f64 {
    m_flow / (fluid.density * cross_section_area(inner_diameter))
}

/// Specific pressure drop in Pa/m according to Darcy-Weisbach with a
/// constant friction factor.
pub fn pressure_gradient(
    m_flow: f64,
    inner_diameter: f64,
    friction_factor: f64,
    fluid: &FluidProperties,
) -> f64 {
    8.0 * friction_factor * m_flow * m_flow
        / (PI * PI * fluid.density * inner_diameter.powi(5))
}

/// Inverse of [`pressure_gradient`]: the mass flow in kg/s that causes the
/// given specific pressure drop.
pub fn mass_flow_at_pressure_gradient(
    pressure_gradient: f64,
    inner_diameter: f64,
    friction_factor: f64,
    fluid: &FluidProperties,
) -> f64 {
    (pressure_gradient * PI * PI * fluid.density * inner_diameter.powi(5)
        / (8.0 * friction_factor))
        .sqrt()
}

/// Factor by which fittings lengthen a pipe hydraulically, `1 + l_eq·d/l`.
///
/// Every `u_bend_spacing` meters a U-bend of four 90° elbows is assumed,
/// rounding half to even.  Both pipe ends get a tee run-through, and the
/// pipe carries the configured number of gate valves.
pub fn equivalent_length_factor(length: f64, inner_diameter: f64, fittings: &Fittings) -> f64 {
    let u_bends = (length / fittings.u_bend_spacing).round_ties_even();
    let equivalent_length = u_bends * 4.0 * ELBOW_90
        + 2.0 * TEE_RUN_THROUGH
        + fittings.gate_valves * GATE_VALVE;
    1.0 + equivalent_length * inner_diameter / length
}

impl PipeCatalog {
    /// Returns the entry with the inner diameter closest to
    /// `inner_diameter`.  Of two equally close entries the smaller one is
    /// returned.
    pub fn nearest(&self, inner_diameter: f64) -> &PipeCatalogEntry {
        self.entries()
            .iter()
            .min_by(|a, b| {
                let da = (a.inner_diameter() - inner_diameter).abs();
                let db = (b.inner_diameter() - inner_diameter).abs();
                da.total_cmp(&db)
            })
            .unwrap_or(self.largest())
    }

    /// Returns the smallest entry whose capacity is at least `m_flow`.
    ///
    /// A flow exactly matching an entry's capacity selects that entry.  If
    /// several entries have the same capacity, the one with the smallest
    /// diameter is returned.
    ///
    /// Returns a `Data` error for a negative or non-finite flow, and a
    /// `CapacityExceeded` error if even the largest entry is too small.
    pub fn select(&self, m_flow: f64, fluid: &FluidProperties) -> Result<&PipeCatalogEntry, Error> {
        if !m_flow.is_finite() || m_flow < 0.0 {
            return Err(Error::data(format!(
                "Mass flow must be a non-negative number, found {m_flow}."
            )));
        }

        let entries = self.entries();
        let position = entries.partition_point(|entry| self.max_mass_flow(entry, fluid) < m_flow);

        entries.get(position).ok_or_else(|| {
            let largest = self.largest();
            Error::capacity_exceeded(format!(
                "Required mass flow {m_flow} kg/s exceeds the largest pipe {} ({} kg/s) of catalog {:?}.",
                largest.dn(),
                self.max_mass_flow(largest, fluid),
                self.name()
            ))
        })
    }
}

/// Selects the catalog pipe for `m_flow` and returns its label and inner
/// diameter in meters.  See [`PipeCatalog::select`].
pub fn select_pipe_diameter(
    m_flow: f64,
    catalog: &PipeCatalog,
    fluid: &FluidProperties,
) -> Result<(String, f64), Error> {
    catalog
        .select(m_flow, fluid)
        .map(|entry| (entry.dn().to_string(), entry.inner_diameter()))
}
