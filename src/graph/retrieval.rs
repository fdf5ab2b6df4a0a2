// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Methods for retrieving nodes and pipes from a [`HydronicGraph`].

use petgraph::graph::NodeIndex;

use crate::iterators::{Neighbors, Nodes, Pipes, PipesWithAttributes};
use crate::network_type::NodePredicates;
use crate::{Edge, Error, HydronicGraph, NetworkType, Node, PipeAttributes};

use super::{pipe_key, PipeKey};

/// `Node` and `Pipe` retrieval.
impl<N, E> HydronicGraph<N, E>
where
    N: Node,
    E: Edge,
{
    pub(crate) fn index_of(&self, node_id: u64) -> Result<NodeIndex, Error> {
        self.node_indices
            .get(&node_id)
            .copied()
            .ok_or_else(|| Error::node_not_found(format!("Node with id {} not found.", node_id)))
    }

    fn key_of(&self, a: u64, b: u64) -> Result<PipeKey, Error> {
        let key = pipe_key(self.index_of(a)?, self.index_of(b)?);
        if self.edges.contains_key(&key) {
            Ok(key)
        } else {
            Err(Error::pipe_not_found(format!(
                "No pipe between nodes {a} and {b}."
            )))
        }
    }

    /// Returns the node with the given `node_id`, if it exists.
    pub fn node(&self, node_id: u64) -> Result<&N, Error> {
        self.index_of(node_id).map(|i| &self.graph[i])
    }

    /// Returns an iterator over the nodes in the graph.
    pub fn nodes(&self) -> Nodes<N> {
        Nodes {
            iter: self.graph.raw_nodes().iter(),
        }
    }

    /// Returns an iterator over the pipes in the graph.
    pub fn pipes(&self) -> Pipes<N, E> {
        Pipes {
            hg: self,
            iter: self.graph.raw_edges().iter(),
        }
    }

    /// Returns an iterator over the pipes in the graph, together with their
    /// sizing results.
    pub fn pipes_with_attributes(&self) -> PipesWithAttributes<N, E> {
        PipesWithAttributes {
            hg: self,
            iter: self.graph.raw_edges().iter(),
        }
    }

    /// Returns an iterator over the nodes connected to the node with the
    /// given `node_id`, by pipes of any network type.
    ///
    /// Returns an error if the given `node_id` does not exist.
    pub fn neighbors(&self, node_id: u64) -> Result<Neighbors<N>, Error> {
        self.index_of(node_id).map(|index| Neighbors {
            graph: &self.graph,
            iter: self.graph.neighbors(index),
        })
    }

    /// Returns the pipe between the two given nodes, in either orientation.
    pub fn pipe(&self, a: u64, b: u64) -> Result<&E, Error> {
        let key = self.key_of(a, b)?;
        self.edges
            .get(&key)
            .ok_or_else(|| Error::internal(format!("Pipe ({a}, {b}) has no edge data.")))
    }

    /// Returns the sizing results of the pipe between the two given nodes.
    pub fn pipe_attributes(&self, a: u64, b: u64) -> Result<&PipeAttributes, Error> {
        let key = self.key_of(a, b)?;
        self.attributes
            .get(&key)
            .ok_or_else(|| Error::internal(format!("Pipe ({a}, {b}) has no attributes.")))
    }

    /// Returns the supply nodes of the given network type, in insertion
    /// order.
    pub fn supplies(&self, network_type: NetworkType) -> impl Iterator<Item = &N> + '_ {
        self.nodes().filter(move |n| n.is_supply(network_type))
    }
}
