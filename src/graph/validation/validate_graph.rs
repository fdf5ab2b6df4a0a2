// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Methods for validating the supplies and loops of a network in a
//! [`HydronicGraph`].

use petgraph::unionfind::UnionFind;

use crate::graph::pipe_key;
use crate::{Edge, Error, Node};

use super::NetworkValidator;

impl<N, E> NetworkValidator<'_, N, E>
where
    N: Node,
    E: Edge,
{
    /// Validates that the network has at least one supply node.
    pub(super) fn ensure_supply(&self) -> Result<(), Error> {
        if self.hg.supplies(self.network_type).next().is_none() {
            return Err(Error::topology(format!(
                "The {} network has no supply node.",
                self.network_type
            )));
        }
        Ok(())
    }

    /// Counts the pipes of the network that close a cycle.
    pub(super) fn independent_loops(&self) -> usize {
        let mut components = UnionFind::<usize>::new(self.hg.graph.node_count());
        self.hg
            .graph
            .raw_edges()
            .iter()
            .filter(|edge| {
                self.hg
                    .edges
                    .get(&pipe_key(edge.source(), edge.target()))
                    .is_some_and(|pipe| pipe.network_type() == self.network_type)
            })
            .filter(|edge| !components.union(edge.source().index(), edge.target().index()))
            .count()
    }

    pub(super) fn log_loops(&self) {
        let loops = self.independent_loops();
        if loops > 0 {
            tracing::debug!(
                "The {} network is meshed with {loops} independent loops. All simple supply paths will be enumerated.",
                self.network_type
            );
        }
        let supplies = self.hg.supplies(self.network_type).count();
        if supplies > 1 {
            tracing::debug!(
                "The {} network has {supplies} supply nodes.",
                self.network_type
            );
        }
    }
}
