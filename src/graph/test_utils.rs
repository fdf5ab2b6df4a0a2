// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module is only compiled when running unit tests and contains features
//! that are shared by all tests of the crate.
//!
//! - the `TestNode` and `TestPipe` types, which implement the `Node` and
//!   `Edge` traits respectively.
//! - the `NetworkBuilder`, which can declaratively build thermal networks
//!   for use in tests.

use std::collections::BTreeMap;

use crate::{AttributeValue, Edge, Error, HydronicGraph, NetworkType, Node, SizingConfig};

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct TestNode {
    id: u64,
    attributes: BTreeMap<String, AttributeValue>,
}

impl TestNode {
    pub(crate) fn new(id: u64) -> Self {
        TestNode {
            id,
            attributes: BTreeMap::new(),
        }
    }

    /// A heating supply node.
    pub(crate) fn supply(id: u64) -> Self {
        Self::new(id).with("is_supply_heating", true)
    }

    /// A heated building with a scalar design load and a ΔT of 30 K.
    pub(crate) fn building(id: u64, load: f64) -> Self {
        Self::new(id)
            .with("input_heat", load)
            .with("dT_Network", 30.0)
    }

    pub(crate) fn with(mut self, name: &str, value: impl Into<AttributeValue>) -> Self {
        self.attributes.insert(name.to_string(), value.into());
        self
    }
}

impl Node for TestNode {
    fn node_id(&self) -> u64 {
        self.id
    }

    fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct TestPipe {
    source: u64,
    destination: u64,
    length: f64,
    network_type: NetworkType,
}

impl TestPipe {
    /// A 10 m heating pipe.
    pub(crate) fn new(source: u64, destination: u64) -> Self {
        TestPipe {
            source,
            destination,
            length: 10.0,
            network_type: NetworkType::Heating,
        }
    }

    pub(crate) fn with_length(mut self, length: f64) -> Self {
        self.length = length;
        self
    }

    pub(crate) fn cooling(mut self) -> Self {
        self.network_type = NetworkType::Cooling;
        self
    }
}

impl Edge for TestPipe {
    fn source(&self) -> u64 {
        self.source
    }

    fn destination(&self) -> u64 {
        self.destination
    }

    fn length(&self) -> f64 {
        self.length
    }

    fn network_type(&self) -> NetworkType {
        self.network_type
    }
}

/// Represents a node added to the `NetworkBuilder`.
#[derive(Eq, Hash, PartialEq, Copy, Clone, Debug)]
pub(crate) struct NodeHandle(u64);

impl NodeHandle {
    /// Returns the node ID of the node.
    pub(crate) fn node_id(&self) -> u64 {
        self.0
    }
}

/// A builder for creating thermal networks easily, for use in tests.
pub(crate) struct NetworkBuilder {
    nodes: Vec<TestNode>,
    pipes: Vec<TestPipe>,
    next_id: u64,
}

impl NetworkBuilder {
    pub(crate) fn new() -> Self {
        NetworkBuilder {
            nodes: Vec::new(),
            pipes: Vec::new(),
            next_id: 1,
        }
    }

    /// Adds a node with the next free ID, built by `make`, and returns its
    /// handle.
    pub(crate) fn add_node(&mut self, make: impl FnOnce(u64) -> TestNode) -> NodeHandle {
        let id = self.next_id;
        self.next_id += 1;
        self.nodes.push(make(id));
        NodeHandle(id)
    }

    /// Adds a heating supply node.
    pub(crate) fn supply(&mut self) -> NodeHandle {
        self.add_node(TestNode::supply)
    }

    /// Adds a node without any demand.
    pub(crate) fn junction(&mut self) -> NodeHandle {
        self.add_node(TestNode::new)
    }

    /// Adds a heated building with the given design load and ΔT.
    pub(crate) fn building(&mut self, load: f64, delta_t: f64) -> NodeHandle {
        self.add_node(|id| {
            TestNode::new(id)
                .with("input_heat", load)
                .with("dT_Network", delta_t)
        })
    }

    /// Adds a `rows` x `cols` grid of junctions connected by heating pipes
    /// and returns their handles, row by row.
    pub(crate) fn grid(&mut self, rows: usize, cols: usize) -> Vec<NodeHandle> {
        let nodes = (0..rows * cols).map(|_| self.junction()).collect::<Vec<_>>();
        for r in 0..rows {
            for c in 0..cols {
                let node = nodes[r * cols + c];
                if c + 1 < cols {
                    self.connect(node, nodes[r * cols + c + 1]);
                }
                if r + 1 < rows {
                    self.connect(node, nodes[(r + 1) * cols + c]);
                }
            }
        }
        nodes
    }

    /// Connects two nodes with a 10 m heating pipe.
    pub(crate) fn connect(&mut self, from: NodeHandle, to: NodeHandle) -> &mut Self {
        self.pipes.push(TestPipe::new(from.0, to.0));
        self
    }

    /// Adds an arbitrary pipe.
    pub(crate) fn pipe(&mut self, pipe: TestPipe) -> &mut Self {
        self.pipes.push(pipe);
        self
    }

    /// Builds and returns the hydronic graph from the nodes and pipes added
    /// to the builder.
    pub(crate) fn build(
        &self,
        config: Option<SizingConfig>,
    ) -> Result<HydronicGraph<TestNode, TestPipe>, Error> {
        HydronicGraph::try_new(
            self.nodes.clone(),
            self.pipes.clone(),
            config.unwrap_or_default(),
        )
    }
}
