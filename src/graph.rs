// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! A graph representation of a thermal network: buildings, junctions and
//! supply points connected by pipe segments.

mod creation;
mod retrieval;
mod validation;

mod annotations;
mod diameters;
pub mod iterators;
mod mass_flow;
mod orchestration;
mod paths;

#[cfg(test)]
pub(crate) mod test_utils;

pub use mass_flow::NodalDemand;
pub use orchestration::{SizingRequest, SizingStage};

use crate::{Edge, Node, PipeAttributes, SizingConfig};
use petgraph::graph::{NodeIndex, UnGraph};
use std::collections::HashMap;

/// `Node`s stored in an `UnGraph` instance can be addressed with `NodeIndex`es.
///
/// `NodeIndexMap` stores the corresponding `NodeIndex` for any `node_id`, so
/// that Nodes in the `UnGraph` can be retrieved from their `node_id`s.
pub(crate) type NodeIndexMap = HashMap<u64, NodeIndex>;

/// A pipe is identified by the unordered pair of its endpoints, stored with
/// the smaller index first.
pub(crate) type PipeKey = (NodeIndex, NodeIndex);

/// `Edge`s are not stored in the `UnGraph` instance, so we need to store them
/// separately.
pub(crate) type EdgeMap<E> = HashMap<PipeKey, E>;

/// Sizing results for every pipe, keyed like the `EdgeMap`.
pub(crate) type AttributeMap = HashMap<PipeKey, PipeAttributes>;

pub(crate) fn pipe_key(a: NodeIndex, b: NodeIndex) -> PipeKey {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// A graph representation of a thermal network, that can be sized for the
/// mass flows and pipe diameters required by its demand nodes.
pub struct HydronicGraph<N, E>
where
    N: Node,
    E: Edge,
{
    graph: UnGraph<N, ()>,
    node_indices: NodeIndexMap,
    edges: EdgeMap<E>,
    attributes: AttributeMap,
    config: SizingConfig,
}

impl<N, E> HydronicGraph<N, E>
where
    N: Node,
    E: Edge,
{
    /// Returns the configuration the graph was created with.
    pub fn config(&self) -> &SizingConfig {
        &self.config
    }

    /// Returns a label of the form `Pipe (source, destination)` in the
    /// orientation the pipe was given in.
    pub(crate) fn describe_pipe(&self, key: PipeKey) -> String {
        match self.edges.get(&key) {
            Some(edge) => format!("Pipe ({}, {})", edge.source(), edge.destination()),
            None => format!(
                "Pipe ({}, {})",
                self.graph[key.0].node_id(),
                self.graph[key.1].node_id()
            ),
        }
    }
}
