// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

/*!
# Hydronic Sizing

This is a library for sizing the pipes of district heating and cooling
networks.  Buildings, junctions and supply points are represented as the
nodes of an undirected graph, and pipe segments as its edges.

Given the thermal demand of every building, the library estimates the design
mass flow that each pipe has to carry, and selects the smallest pipe from a
manufacturer catalog that can carry it.

## The `Node` and `Edge` traits

The main struct is [`HydronicGraph`], instances of which can be created by
passing an iterator of nodes and the pipes between them to the
[`try_new`][HydronicGraph::try_new] method.

But because `hydronic_sizing` is an independent library, it doesn't know about
the node and pipe types and instead uses traits to interact with them.

Therefore, to be usable with this library, the node and pipe types must
implement the [`Node`] and [`Edge`] traits, respectively.  Check out the
documentation for these traits for sample implementations.

Nodes expose their data as named [`AttributeValue`]s.  The attributes read by
a sizing run are:

- `is_supply_heating` / `is_supply_cooling`: marks the supply nodes of a
  network.
- `input_heat` / `input_cool`: the demand in W, either a single design value
  or a time series.
- `dT_Network`: the design temperature difference in K.  Nodes without it
  use [`SizingConfig::default_delta_t`], 20 K for heating and 6 K for cooling
  unless configured otherwise.

## Validation

The [`try_new`][HydronicGraph::try_new] method checks that:

- Node IDs are unique.
- All pipes point to existing nodes, and no pipe connects a node to itself.
- There is at most one pipe between any two nodes.
- Pipe lengths are non-negative.
- The [`SizingConfig`] is consistent.

If any of the validation steps fail, the method will return an [`Error`], and a
[`HydronicGraph`] instance otherwise.

## Sizing

A sizing run is started with
[`size_hydronic_network`][HydronicGraph::size_hydronic_network], which goes
through the stages listed in [`SizingStage`]:

- the pipe catalog is looked up in a [`CatalogRegistry`],
- the design demand of every building is extracted for the requested
  [`LoadScenario`],
- the design mass flow of every pipe is aggregated from the demands of the
  buildings it can supply,
- a catalog pipe is selected for every pipe with a flow.

The individual stages are also available as
[`design_demands`][HydronicGraph::design_demands],
[`estimate_mass_flow`][HydronicGraph::estimate_mass_flow] and
[`select_pipe_diameters`][HydronicGraph::select_pipe_diameters].  The results
can be read through [`pipe_attributes`][HydronicGraph::pipe_attributes].

Once the pipes are sized, [`estimate_fac`][HydronicGraph::estimate_fac] adds
the pressure drop factor of the fittings on each pipe, and
[`estimate_nominal_mass_flow`][HydronicGraph::estimate_nominal_mass_flow] the
nominal mass flow a catalog suggests for its diameter.
*/

mod attribute;
pub use attribute::AttributeValue;

mod catalog;
pub use catalog::{CapacityMetric, CatalogRegistry, PipeCatalog, PipeCatalogEntry};

mod config;
pub use config::{DefaultDeltaT, Fittings, FluidProperties, SizingConfig};

mod demand;
pub use demand::{extract_design_demand, Demand, LoadScenario};

mod graph;
pub use graph::{iterators, HydronicGraph, NodalDemand, SizingRequest, SizingStage};

mod graph_traits;
pub use graph_traits::{Edge, Node};

mod network_type;
pub use network_type::NetworkType;

mod pipe_attributes;
pub use pipe_attributes::{PipeAttributes, PipeSizing};

pub mod pipe_sizer;
pub use pipe_sizer::select_pipe_diameter;

mod error;
pub use error::{Error, ErrorKind};
