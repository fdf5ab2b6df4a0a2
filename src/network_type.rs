// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module defines the `NetworkType` enum, which selects the heating or
//! the cooling network of a graph, and the predicates used to read the
//! network-specific attributes of a `Node`.

use crate::{graph_traits::Node, AttributeValue, Error};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

/// The kind of thermal network that is being sized.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkType {
    Heating,
    Cooling,
}

impl NetworkType {
    /// Name of the boolean node attribute that marks supply points of this
    /// network.
    pub fn supply_attribute(&self) -> &'static str {
        match self {
            NetworkType::Heating => "is_supply_heating",
            NetworkType::Cooling => "is_supply_cooling",
        }
    }

    /// Name of the node attribute that conventionally carries the demand
    /// signal for this network.
    pub fn demand_attribute(&self) -> &'static str {
        match self {
            NetworkType::Heating => "input_heat",
            NetworkType::Cooling => "input_cool",
        }
    }
}

impl Display for NetworkType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NetworkType::Heating => write!(f, "heating"),
            NetworkType::Cooling => write!(f, "cooling"),
        }
    }
}

impl FromStr for NetworkType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "heating" => Ok(NetworkType::Heating),
            "cooling" => Ok(NetworkType::Cooling),
            _ => Err(Error::configuration(format!(
                "Unknown network type: {s:?}. Expected \"heating\" or \"cooling\"."
            ))),
        }
    }
}

/// Predicates for reading the sizing-relevant attributes of a `Node`.
pub(crate) trait NodePredicates: Node {
    fn is_supply(&self, network_type: NetworkType) -> bool {
        matches!(
            self.attribute(network_type.supply_attribute()),
            Some(AttributeValue::Bool(true))
        )
    }

    /// Reads a numeric attribute.
    ///
    /// Returns `Ok(None)` if the attribute is absent and a configuration
    /// error if it is present but not a finite number.
    fn numeric_attribute(&self, name: &str) -> Result<Option<f64>, Error> {
        match self.attribute(name) {
            None => Ok(None),
            Some(AttributeValue::Number(value)) if value.is_finite() => Ok(Some(*value)),
            Some(other) => Err(Error::configuration(format!(
                "Node {}: attribute {name:?} must be a finite number, found {} {other}.",
                self.node_id(),
                other.type_name(),
            ))),
        }
    }
}

/// Implement the `NodePredicates` trait for all types that implement the
/// `Node` trait.
impl<T: Node> NodePredicates for T {}
