// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Reduction of raw demand signals to a single design value.

use crate::{AttributeValue, Error};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

/// Selects how a demand time series is reduced to a design load.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadScenario {
    /// The maximum of the series.
    PeakLoad,
    /// The arithmetic mean of the series.
    AverageLoad,
}

impl LoadScenario {
    /// Name of the pipe attribute that stores the design mass flow for this
    /// scenario, e.g. `m_flow_peak_load`.
    pub fn m_flow_attribute(&self) -> String {
        format!("m_flow_{self}")
    }
}

impl Display for LoadScenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadScenario::PeakLoad => write!(f, "peak_load"),
            LoadScenario::AverageLoad => write!(f, "average_load"),
        }
    }
}

impl FromStr for LoadScenario {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "peak_load" => Ok(LoadScenario::PeakLoad),
            "average_load" => Ok(LoadScenario::AverageLoad),
            _ => Err(Error::configuration(format!(
                "Unknown load scenario: {s:?}. Expected \"peak_load\" or \"average_load\"."
            ))),
        }
    }
}

/// A demand signal in watts, as read from a node attribute.
#[derive(Clone, Debug, PartialEq)]
pub enum Demand {
    /// A load that is already a design value.
    Scalar(f64),
    /// An ordered series of load samples.
    Series(Vec<f64>),
}

impl Demand {
    /// The same demand with every load replaced by its absolute value.
    /// Cooling loads are often given as negative numbers.
    pub fn magnitude(self) -> Self {
        match self {
            Demand::Scalar(load) => Demand::Scalar(load.abs()),
            Demand::Series(samples) => Demand::Series(samples.into_iter().map(f64::abs).collect()),
        }
    }
}

impl TryFrom<&AttributeValue> for Demand {
    type Error = Error;

    fn try_from(value: &AttributeValue) -> Result<Self, Self::Error> {
        match value {
            AttributeValue::Number(load) if load.is_finite() => Ok(Demand::Scalar(*load)),
            AttributeValue::Number(load) => {
                Err(Error::data(format!("Demand value {load} is not a finite number.")))
            }
            AttributeValue::List(samples) => samples
                .iter()
                .enumerate()
                .map(|(i, sample)| match sample {
                    AttributeValue::Number(load) => Ok(*load),
                    other => Err(Error::data(format!(
                        "Demand series entry {i} is not numeric: {} {other}.",
                        other.type_name()
                    ))),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Demand::Series),
            other => Err(Error::data(format!(
                "Demand must be a number or a list of numbers, found {} {other}.",
                other.type_name()
            ))),
        }
    }
}

/// Reduces `demand` to a single design value in watts.
///
/// Scalars are returned unchanged.  For a series, `PeakLoad` returns the
/// maximum and `AverageLoad` the arithmetic mean of the samples.
///
/// Returns a `Data` error if the series is empty or contains a non-finite
/// sample.
pub fn extract_design_demand(demand: &Demand, scenario: LoadScenario) -> Result<f64, Error> {
    let samples = match demand {
        Demand::Scalar(load) => return Ok(*load),
        Demand::Series(samples) => samples,
    };

    if samples.is_empty() {
        return Err(Error::data("Demand series is empty."));
    }
    if let Some((i, sample)) = samples.iter().enumerate().find(|(_, s)| !s.is_finite()) {
        return Err(Error::data(format!(
            "Demand series entry {i} is not numeric: {sample}."
        )));
    }

    Ok(match scenario {
        LoadScenario::PeakLoad => samples.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        LoadScenario::AverageLoad => samples.iter().sum::<f64>() / samples.len() as f64,
    })
}
