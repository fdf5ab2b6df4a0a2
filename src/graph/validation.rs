// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Methods for validating a [`HydronicGraph`].

mod invariant_checks;
mod validate_graph;

use crate::{Edge, Error, HydronicGraph, NetworkType, Node};

pub(crate) struct NetworkValidator<'a, N, E>
where
    N: Node,
    E: Edge,
{
    hg: &'a HydronicGraph<N, E>,
    network_type: NetworkType,
}

impl<N, E> HydronicGraph<N, E>
where
    N: Node,
    E: Edge,
{
    /// Checks the configuration the graph was created with.
    pub(crate) fn validate(&self) -> Result<(), Error> {
        invariant_checks::validate_config(&self.config)
    }

    /// Checks the preconditions of a sizing run on the given network.
    pub(crate) fn validate_network(&self, network_type: NetworkType) -> Result<(), Error> {
        let validator = NetworkValidator {
            hg: self,
            network_type,
        };

        validator.ensure_supply()?;
        validator.log_loops();

        Ok(())
    }

    /// Returns the number of independent loops in the given network, i.e.
    /// the number of its pipes that close a cycle.  A tree network has none.
    pub fn independent_loops(&self, network_type: NetworkType) -> usize {
        NetworkValidator {
            hg: self,
            network_type,
        }
        .independent_loops()
    }
}
