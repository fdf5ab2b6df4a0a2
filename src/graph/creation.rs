// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Methods for creating [`HydronicGraph`] instances from given nodes and
//! pipes.

use petgraph::graph::UnGraph;

use crate::{Edge, Error, Node, PipeAttributes, SizingConfig};

use super::{pipe_key, AttributeMap, EdgeMap, HydronicGraph, NodeIndexMap};

/// `HydronicGraph` instantiation.
impl<N, E> HydronicGraph<N, E>
where
    N: Node,
    E: Edge,
{
    /// Creates a new [`HydronicGraph`] from the given nodes and pipes.
    ///
    /// Returns an error if the graph or the configuration is invalid.
    pub fn try_new<NodeIterator: IntoIterator<Item = N>, EdgeIterator: IntoIterator<Item = E>>(
        nodes: NodeIterator,
        pipes: EdgeIterator,
        config: SizingConfig,
    ) -> Result<Self, Error> {
        let (graph, indices) = Self::create_graph(nodes)?;

        let mut hg = Self {
            graph,
            node_indices: indices,
            edges: EdgeMap::new(),
            attributes: AttributeMap::new(),
            config,
        };
        hg.add_pipes(pipes)?;

        hg.validate()?;

        Ok(hg)
    }

    fn create_graph(
        nodes: impl IntoIterator<Item = N>,
    ) -> Result<(UnGraph<N, ()>, NodeIndexMap), Error> {
        let mut graph = UnGraph::default();
        let mut indices = NodeIndexMap::new();

        for node in nodes {
            let nid = node.node_id();

            if indices.contains_key(&nid) {
                return Err(Error::invalid_graph(format!(
                    "Duplicate node ID found: {nid}"
                )));
            }

            let idx = graph.add_node(node);
            indices.insert(nid, idx);
        }

        Ok((graph, indices))
    }

    fn add_pipes(&mut self, pipes: impl IntoIterator<Item = E>) -> Result<(), Error> {
        for pipe in pipes {
            let sid = pipe.source();
            let did = pipe.destination();

            if sid == did {
                return Err(Error::invalid_connection(format!(
                    "Pipe:({sid}, {did}) Can't connect a node to itself."
                )));
            }
            for nid in [sid, did] {
                if !self.node_indices.contains_key(&nid) {
                    return Err(Error::invalid_connection(format!(
                        "Pipe:({sid}, {did}) Can't find a node with ID {nid}"
                    )));
                }
            }
            let length = pipe.length();
            if !(length.is_finite() && length >= 0.0) {
                return Err(Error::invalid_connection(format!(
                    "Pipe:({sid}, {did}) Length must be a non-negative number, found {length}."
                )));
            }

            let key = pipe_key(self.node_indices[&sid], self.node_indices[&did]);
            if self.edges.contains_key(&key) {
                return Err(Error::invalid_connection(format!(
                    "Pipe:({sid}, {did}) Duplicate pipe between nodes {sid} and {did}."
                )));
            }

            self.graph.add_edge(key.0, key.1, ());
            self.edges.insert(key, pipe);
            self.attributes.insert(key, PipeAttributes::default());
        }

        Ok(())
    }
}
