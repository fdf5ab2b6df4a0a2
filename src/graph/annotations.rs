// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Values derived from the selected diameters, for model generators.

use crate::pipe_sizer::equivalent_length_factor;
use crate::{Edge, HydronicGraph, NetworkType, Node, PipeCatalog};

use super::pipe_key;

impl<N, E> HydronicGraph<N, E>
where
    N: Node,
    E: Edge,
{
    /// Stores the fitting factor `fac` of every sized pipe of the given
    /// network, using the fittings from [`SizingConfig`][crate::SizingConfig].
    ///
    /// Pipes of zero length get no factor.
    pub fn estimate_fac(&mut self, network_type: NetworkType) -> &mut Self {
        let fittings = self.config.fittings;
        let mut count = 0;
        for (key, pipe) in &self.edges {
            if pipe.network_type() != network_type || pipe.length() <= 0.0 {
                continue;
            }
            let Some(attributes) = self.attributes.get_mut(key) else {
                continue;
            };
            if let Some(diameter) = attributes.diameter() {
                attributes.set_fac(equivalent_length_factor(pipe.length(), diameter, &fittings));
                count += 1;
            }
        }

        tracing::debug!("Estimated fac for {count} pipes of the {network_type} network.");
        self
    }

    /// Stores the nominal mass flow of every sized pipe of the given network:
    /// the capacity of the `catalog` entry closest to its diameter.
    pub fn estimate_nominal_mass_flow(
        &mut self,
        catalog: &PipeCatalog,
        network_type: NetworkType,
    ) -> &mut Self {
        let fluid = self.config.fluid;
        for edge in self.graph.raw_edges() {
            let key = pipe_key(edge.source(), edge.target());
            if self
                .edges
                .get(&key)
                .map_or(true, |pipe| pipe.network_type() != network_type)
            {
                continue;
            }
            let Some(attributes) = self.attributes.get_mut(&key) else {
                continue;
            };
            if let Some(diameter) = attributes.diameter() {
                let entry = catalog.nearest(diameter);
                attributes.set_m_flow_nominal(catalog.max_mass_flow(entry, &fluid));
            }
        }
        self
    }
}
