// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Iterators over nodes and pipes in a `HydronicGraph`.

use petgraph::graph::UnGraph;

use crate::{Edge, HydronicGraph, Node, PipeAttributes};

use super::pipe_key;

/// An iterator over the nodes in a `HydronicGraph`.
pub struct Nodes<'a, N>
where
    N: Node,
{
    pub(crate) iter: std::slice::Iter<'a, petgraph::graph::Node<N>>,
}

impl<'a, N> Iterator for Nodes<'a, N>
where
    N: Node,
{
    type Item = &'a N;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|n| &n.weight)
    }
}

/// An iterator over the pipes in a `HydronicGraph`, in insertion order.
pub struct Pipes<'a, N, E>
where
    N: Node,
    E: Edge,
{
    pub(crate) hg: &'a HydronicGraph<N, E>,
    pub(crate) iter: std::slice::Iter<'a, petgraph::graph::Edge<()>>,
}

impl<'a, N, E> Iterator for Pipes<'a, N, E>
where
    N: Node,
    E: Edge,
{
    type Item = &'a E;

    fn next(&mut self) -> Option<Self::Item> {
        let hg = self.hg;
        self.iter
            .find_map(|e| hg.edges.get(&pipe_key(e.source(), e.target())))
    }
}

/// An iterator over pipes paired with their sizing results.
pub struct PipesWithAttributes<'a, N, E>
where
    N: Node,
    E: Edge,
{
    pub(crate) hg: &'a HydronicGraph<N, E>,
    pub(crate) iter: std::slice::Iter<'a, petgraph::graph::Edge<()>>,
}

impl<'a, N, E> Iterator for PipesWithAttributes<'a, N, E>
where
    N: Node,
    E: Edge,
{
    type Item = (&'a E, &'a PipeAttributes);

    fn next(&mut self) -> Option<Self::Item> {
        let hg = self.hg;
        self.iter.find_map(|e| {
            let key = pipe_key(e.source(), e.target());
            Some((hg.edges.get(&key)?, hg.attributes.get(&key)?))
        })
    }
}

/// An iterator over the neighbors of a node in a `HydronicGraph`, across all
/// network types.
pub struct Neighbors<'a, N>
where
    N: Node,
{
    pub(crate) graph: &'a UnGraph<N, ()>,
    pub(crate) iter: petgraph::graph::Neighbors<'a, ()>,
}

impl<'a, N> Iterator for Neighbors<'a, N>
where
    N: Node,
{
    type Item = &'a N;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|i| &self.graph[i])
    }
}
