// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Sizing results stored for every pipe of a `HydronicGraph`.

use std::collections::BTreeMap;

use crate::{AttributeValue, LoadScenario};

/// The catalog pipe chosen for an edge, with its hydraulic state at the
/// design flow.
#[derive(Clone, Debug, PartialEq)]
pub struct PipeSizing {
    /// Nominal diameter label of the catalog entry.
    pub dn: String,
    /// Inner diameter in meters.
    pub diameter: f64,
    /// Mean velocity at the design flow, in m/s.
    pub velocity: f64,
    /// Specific pressure drop at the design flow, in Pa/m.
    pub pressure_gradient: f64,
    /// Pressure drop over the whole pipe length, in Pa.
    pub pressure_drop: f64,
}

/// Attributes written onto a pipe by a sizing run.
///
/// Mass flows are kept per load scenario; the diameter is the one selected
/// by the most recent run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PipeAttributes {
    m_flow: BTreeMap<LoadScenario, f64>,
    sizing: Option<PipeSizing>,
    fac: Option<f64>,
    m_flow_nominal: Option<f64>,
}

impl PipeAttributes {
    /// The design mass flow in kg/s for the given scenario, if the pipe lies
    /// on a supply path of a demand node.
    pub fn m_flow(&self, scenario: LoadScenario) -> Option<f64> {
        self.m_flow.get(&scenario).copied()
    }

    /// The selected catalog pipe, if the pipe has been sized.
    pub fn sizing(&self) -> Option<&PipeSizing> {
        self.sizing.as_ref()
    }

    /// The nominal diameter label of the selected pipe.
    pub fn dn(&self) -> Option<&str> {
        self.sizing.as_ref().map(|s| s.dn.as_str())
    }

    /// The inner diameter in meters of the selected pipe.
    pub fn diameter(&self) -> Option<f64> {
        self.sizing.as_ref().map(|s| s.diameter)
    }

    /// The factor by which fittings lengthen the selected pipe
    /// hydraulically.
    pub fn fac(&self) -> Option<f64> {
        self.fac
    }

    /// The nominal mass flow in kg/s the catalog suggests for the selected
    /// diameter.
    pub fn m_flow_nominal(&self) -> Option<f64> {
        self.m_flow_nominal
    }

    /// Looks up an attribute by the name downstream model generators use:
    /// `m_flow_<scenario>`, `m_flow_nominal`, `DN`, `diameter`, `velocity`,
    /// `dp_spec`, `dp` or `fac`.
    pub fn attribute(&self, name: &str) -> Option<AttributeValue> {
        match name {
            "m_flow_nominal" => return self.m_flow_nominal.map(AttributeValue::Number),
            "fac" => return self.fac.map(AttributeValue::Number),
            _ => {}
        }
        if let Some(scenario) = name.strip_prefix("m_flow_") {
            let scenario = scenario.parse::<LoadScenario>().ok()?;
            return self.m_flow(scenario).map(AttributeValue::Number);
        }
        let sizing = self.sizing.as_ref()?;
        match name {
            "DN" => Some(AttributeValue::Text(sizing.dn.clone())),
            "diameter" => Some(AttributeValue::Number(sizing.diameter)),
            "velocity" => Some(AttributeValue::Number(sizing.velocity)),
            "dp_spec" => Some(AttributeValue::Number(sizing.pressure_gradient)),
            "dp" => Some(AttributeValue::Number(sizing.pressure_drop)),
            _ => None,
        }
    }

    pub(crate) fn set_m_flow(&mut self, scenario: LoadScenario, m_flow: f64) {
        self.m_flow.insert(scenario, m_flow);
    }

    pub(crate) fn clear_m_flow(&mut self, scenario: LoadScenario) {
        self.m_flow.remove(&scenario);
    }

    /// Replaces the selected pipe.  Values derived from the previous
    /// selection are dropped.
    pub(crate) fn set_sizing(&mut self, sizing: Option<PipeSizing>) {
        self.sizing = sizing;
        self.fac = None;
        self.m_flow_nominal = None;
    }

    pub(crate) fn set_fac(&mut self, fac: f64) {
        self.fac = Some(fac);
    }

    pub(crate) fn set_m_flow_nominal(&mut self, m_flow_nominal: f64) {
        self.m_flow_nominal = Some(m_flow_nominal);
    }
}
