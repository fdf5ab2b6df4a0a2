// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Enumeration of simple paths between supply and demand nodes.

use std::collections::{BTreeSet, HashSet};

use petgraph::graph::NodeIndex;

use crate::network_type::NodePredicates;
use crate::{Edge, Error, HydronicGraph, NetworkType, Node};

use super::{pipe_key, PipeKey};

/// Path traversal methods.
impl<N, E> HydronicGraph<N, E>
where
    N: Node,
    E: Edge,
{
    /// Neighbors of `index` that are reachable through pipes of the given
    /// network type.
    pub(crate) fn network_neighbors(
        &self,
        index: NodeIndex,
        network_type: NetworkType,
    ) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors(index).filter(move |&other| {
            self.edges
                .get(&pipe_key(index, other))
                .is_some_and(|pipe| pipe.network_type() == network_type)
        })
    }

    /// Returns the nodes that lie on at least one simple path from `from` to
    /// `to` that avoids other supply nodes.
    ///
    /// These are the nodes of the biconnected block that contains the pipe
    /// `from`-`to`, after such a pipe has been added if there is none.  The
    /// blocks are found with an iterative Tarjan search starting at `from`.
    /// When `to` is unreachable the result is just `{from, to}`.
    fn path_block(
        &self,
        from: NodeIndex,
        to: NodeIndex,
        network_type: NetworkType,
    ) -> HashSet<NodeIndex> {
        let neighbors = |index: NodeIndex| {
            let mut neighbors = self
                .network_neighbors(index, network_type)
                .filter(|&other| {
                    other == from || other == to || !self.graph[other].is_supply(network_type)
                })
                .collect::<Vec<_>>();
            if index == from {
                neighbors.push(to);
            } else if index == to {
                neighbors.push(from);
            }
            neighbors.into_iter()
        };

        let node_count = self.graph.node_count();
        let mut discovery: Vec<Option<usize>> = vec![None; node_count];
        let mut low = vec![0; node_count];
        let mut discovered = 1;
        let mut open = vec![from];
        let mut stack = vec![(from, None, neighbors(from))];
        discovery[from.index()] = Some(0);

        while let Some((index, parent, candidates)) = stack.last_mut() {
            let (index, parent) = (*index, *parent);
            match candidates.next() {
                Some(next) if Some(next) == parent => {}
                Some(next) => match discovery[next.index()] {
                    Some(order) => low[index.index()] = low[index.index()].min(order),
                    None => {
                        discovery[next.index()] = Some(discovered);
                        low[next.index()] = discovered;
                        discovered += 1;
                        open.push(next);
                        stack.push((next, Some(index), neighbors(next)));
                    }
                },
                None => {
                    stack.pop();
                    let Some(parent) = parent else {
                        continue;
                    };
                    low[parent.index()] = low[parent.index()].min(low[index.index()]);
                    if discovery[parent.index()].is_some_and(|order| low[index.index()] < order) {
                        continue;
                    }
                    // `parent` separates the subtree of `index` from the
                    // rest of the search.
                    let mut block = HashSet::from([parent]);
                    while let Some(member) = open.pop() {
                        block.insert(member);
                        if member == index {
                            break;
                        }
                    }
                    if block.contains(&from) && block.contains(&to) {
                        return block;
                    }
                }
            }
        }

        HashSet::from([from, to])
    }

    /// Calls `visit` with every simple path from `from` to `to` over pipes of
    /// the given network type.  Paths don't pass through supply nodes other
    /// than their start.
    ///
    /// The search only enters nodes that lie on some such path, so meshes
    /// hanging off the network and unreachable targets cost a single linear
    /// pass.
    ///
    /// Returns the number of paths found, or a topology error once more than
    /// `max_paths_per_demand` paths have been found.
    fn for_each_simple_path(
        &self,
        from: NodeIndex,
        to: NodeIndex,
        network_type: NetworkType,
        mut visit: impl FnMut(&[NodeIndex]),
    ) -> Result<usize, Error> {
        let max_paths = self.config.max_paths_per_demand;
        let mut found = 0;

        let block = self.path_block(from, to, network_type);

        let mut path = vec![from];
        let mut on_path = HashSet::from([from]);
        let mut stack = vec![self.network_neighbors(from, network_type).collect::<Vec<_>>()];

        while let Some(candidates) = stack.last_mut() {
            let Some(next) = candidates.pop() else {
                stack.pop();
                if let Some(index) = path.pop() {
                    on_path.remove(&index);
                }
                continue;
            };

            if on_path.contains(&next) {
                continue;
            }
            if next == to {
                found += 1;
                if found > max_paths {
                    return Err(Error::topology(format!(
                        "More than {max_paths} simple paths between nodes {} and {} in the {network_type} network.",
                        self.graph[from].node_id(),
                        self.graph[to].node_id(),
                    )));
                }
                path.push(next);
                visit(&path);
                path.pop();
                continue;
            }
            if !block.contains(&next) {
                continue;
            }

            path.push(next);
            on_path.insert(next);
            stack.push(self.network_neighbors(next, network_type).collect());
        }

        Ok(found)
    }

    /// Returns the pipes used by at least one simple path from `from` to
    /// `to`.  The set is empty if `to` is unreachable.
    pub(crate) fn simple_path_pipes(
        &self,
        from: NodeIndex,
        to: NodeIndex,
        network_type: NetworkType,
    ) -> Result<BTreeSet<PipeKey>, Error> {
        let mut pipes = BTreeSet::new();
        let count = self.for_each_simple_path(from, to, network_type, |path| {
            pipes.extend(path.windows(2).map(|w| pipe_key(w[0], w[1])));
        })?;
        if count > 1 {
            tracing::trace!(
                "{count} simple paths between nodes {} and {}.",
                self.graph[from].node_id(),
                self.graph[to].node_id()
            );
        }
        Ok(pipes)
    }

    /// Returns all simple paths, as sequences of node IDs, between the two
    /// given nodes over pipes of the given network type.
    ///
    /// Paths don't pass through supply nodes of the network other than
    /// `from_id`.
    pub fn simple_paths(
        &self,
        from_id: u64,
        to_id: u64,
        network_type: NetworkType,
    ) -> Result<Vec<Vec<u64>>, Error> {
        let from = self.index_of(from_id)?;
        let to = self.index_of(to_id)?;
        if from == to {
            return Ok(vec![vec![from_id]]);
        }

        let mut paths = vec![];
        self.for_each_simple_path(from, to, network_type, |path| {
            paths.push(path.iter().map(|&i| self.graph[i].node_id()).collect());
        })?;
        Ok(paths)
    }
}
