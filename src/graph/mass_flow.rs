// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Estimation of the design mass flow of every pipe from the demands of the
//! buildings it supplies.

use std::collections::HashMap;

use petgraph::graph::NodeIndex;

use crate::network_type::NodePredicates;
use crate::{
    extract_design_demand, Demand, Edge, Error, HydronicGraph, LoadScenario, NetworkType, Node,
};

use super::PipeKey;

/// The resolved design demand of a single node.
#[derive(Clone, Debug, PartialEq)]
pub struct NodalDemand {
    pub node_id: u64,
    /// Magnitude of the design load in W.
    pub design_load: f64,
    /// Design temperature difference in K.
    pub delta_t: f64,
    /// Nodal mass flow in kg/s.
    pub m_flow: f64,
}

/// Mass flow estimation.
impl<N, E> HydronicGraph<N, E>
where
    N: Node,
    E: Edge,
{
    /// Resolves the design demand of every node of the given network that
    /// carries the `demand_attribute`.
    ///
    /// Supply nodes, nodes without the attribute and nodes with a design
    /// load of zero don't participate.  Loads are sized by magnitude, and
    /// every sample of a series is made positive before it is reduced.
    ///
    /// The temperature difference is read from `dt_attribute`, falling back
    /// to the network's entry in
    /// [`SizingConfig::default_delta_t`][crate::SizingConfig::default_delta_t].
    ///
    /// The graph is not modified.
    pub fn design_demands(
        &self,
        network_type: NetworkType,
        demand_attribute: &str,
        dt_attribute: &str,
        scenario: LoadScenario,
    ) -> Result<Vec<NodalDemand>, Error> {
        let cp = self.config.fluid.specific_heat_capacity;
        let mut demands = vec![];

        for node in self.nodes() {
            if node.is_supply(network_type) {
                continue;
            }
            let Some(value) = node.attribute(demand_attribute) else {
                continue;
            };

            let node_id = node.node_id();
            let design_load = Demand::try_from(value)
                .and_then(|demand| extract_design_demand(&demand.magnitude(), scenario))
                .map_err(|e| e.context(format!("Node {node_id}")))?;
            if design_load == 0.0 {
                tracing::debug!("Node {node_id} has no {scenario} demand, skipping.");
                continue;
            }

            let delta_t = match node.numeric_attribute(dt_attribute)? {
                Some(delta_t) => delta_t,
                None => self
                    .config
                    .default_delta_t
                    .for_network(network_type)
                    .ok_or_else(|| {
                        Error::configuration(format!(
                            "Node {node_id}: no {dt_attribute:?} attribute and no default {network_type} temperature difference configured."
                        ))
                    })?,
            };
            if delta_t <= 0.0 {
                return Err(Error::configuration(format!(
                    "Node {node_id}: temperature difference must be positive, found {delta_t} K."
                )));
            }

            demands.push(NodalDemand {
                node_id,
                design_load,
                delta_t,
                m_flow: design_load / (cp * delta_t),
            });
        }

        Ok(demands)
    }

    /// Writes the design mass flow of every pipe of the given network for
    /// the given demands.
    ///
    /// For each supply node, a pipe carries the sum of the flows of all
    /// demands that have at least one simple path from that supply through
    /// the pipe.  The largest of these values over all supplies is stored.
    ///
    /// Previous flows of the scenario are cleared first, so pipes that lie
    /// on no supply path end up without a flow.  Nothing is written if an
    /// error is returned.
    pub fn aggregate_mass_flow(
        &mut self,
        network_type: NetworkType,
        demands: &[NodalDemand],
        scenario: LoadScenario,
    ) -> Result<&mut Self, Error> {
        let supplies = self
            .graph
            .node_indices()
            .filter(|&i| self.graph[i].is_supply(network_type))
            .collect::<Vec<_>>();
        if supplies.is_empty() {
            return Err(Error::topology(format!(
                "The {network_type} network has no supply node."
            )));
        }

        let targets = demands
            .iter()
            .map(|d| self.index_of(d.node_id).map(|index| (index, d.m_flow)))
            .collect::<Result<Vec<(NodeIndex, f64)>, Error>>()?;

        let mut reached = vec![false; targets.len()];
        let mut flows: HashMap<PipeKey, f64> = HashMap::new();

        for &supply in &supplies {
            let mut supply_flows: HashMap<PipeKey, f64> = HashMap::new();
            for (i, &(target, m_flow)) in targets.iter().enumerate() {
                let pipes = self.simple_path_pipes(supply, target, network_type)?;
                if pipes.is_empty() {
                    continue;
                }
                reached[i] = true;
                for key in pipes {
                    *supply_flows.entry(key).or_default() += m_flow;
                }
            }

            tracing::debug!(
                "Supply node {} feeds {} pipes of the {network_type} network.",
                self.graph[supply].node_id(),
                supply_flows.len()
            );
            for (key, m_flow) in supply_flows {
                let max = flows.entry(key).or_insert(m_flow);
                if m_flow > *max {
                    *max = m_flow;
                }
            }
        }

        let unreachable = demands
            .iter()
            .zip(&reached)
            .filter(|(_, reached)| !**reached)
            .map(|(d, _)| d.node_id)
            .collect::<Vec<_>>();
        if !unreachable.is_empty() {
            return Err(Error::topology(format!(
                "Demand nodes {unreachable:?} are not reachable from any supply node of the {network_type} network."
            )));
        }

        for (key, attributes) in self.attributes.iter_mut() {
            if self
                .edges
                .get(key)
                .is_some_and(|pipe| pipe.network_type() == network_type)
            {
                attributes.clear_m_flow(scenario);
            }
        }
        for (key, m_flow) in &flows {
            if let Some(attributes) = self.attributes.get_mut(key) {
                attributes.set_m_flow(scenario, *m_flow);
            }
        }

        tracing::info!(
            "Estimated {scenario} mass flows of {} pipes from {} demand nodes in the {network_type} network.",
            flows.len(),
            demands.len()
        );

        Ok(self)
    }

    /// Resolves the design demands of the given network and writes the
    /// resulting design mass flow onto its pipes.
    ///
    /// See [`design_demands`][Self::design_demands] and
    /// [`aggregate_mass_flow`][Self::aggregate_mass_flow].
    pub fn estimate_mass_flow(
        &mut self,
        network_type: NetworkType,
        demand_attribute: &str,
        dt_attribute: &str,
        scenario: LoadScenario,
    ) -> Result<&mut Self, Error> {
        let demands = self.design_demands(network_type, demand_attribute, dt_attribute, scenario)?;
        self.aggregate_mass_flow(network_type, &demands, scenario)
    }
}
