// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Selection of catalog pipes for every pipe with a design mass flow.

use crate::pipe_attributes::PipeSizing;
use crate::pipe_sizer::{flow_velocity, pressure_gradient};
use crate::{CapacityMetric, Edge, Error, HydronicGraph, LoadScenario, NetworkType, Node, PipeCatalog};

use super::pipe_key;

impl<N, E> HydronicGraph<N, E>
where
    N: Node,
    E: Edge,
{
    /// Selects the smallest sufficient catalog pipe for every pipe of the
    /// given network that has a mass flow for `scenario`, and stores its
    /// `DN`, diameter, velocity and pressure drop.
    ///
    /// Pipes of the network without a flow lose any previous selection.  If
    /// any pipe can't be sized, the error names it and nothing is written.
    pub fn select_pipe_diameters(
        &mut self,
        catalog: &PipeCatalog,
        network_type: NetworkType,
        scenario: LoadScenario,
    ) -> Result<&mut Self, Error> {
        let fluid = self.config.fluid;
        let friction_factor = match catalog.metric() {
            CapacityMetric::PressureGradient { friction_factor } => friction_factor,
            CapacityMetric::MassFlow | CapacityMetric::Velocity => self.config.friction_factor,
        };

        let mut selections = vec![];
        for edge in self.graph.raw_edges() {
            let key = pipe_key(edge.source(), edge.target());
            let Some(pipe) = self.edges.get(&key) else {
                continue;
            };
            if pipe.network_type() != network_type {
                continue;
            }

            let m_flow = self.attributes.get(&key).and_then(|a| a.m_flow(scenario));
            let sizing = match m_flow {
                None => None,
                Some(m_flow) => {
                    let entry = catalog
                        .select(m_flow, &fluid)
                        .map_err(|e| e.context(self.describe_pipe(key)))?;
                    let diameter = entry.inner_diameter();
                    let dp_spec = pressure_gradient(m_flow, diameter, friction_factor, &fluid);
                    Some(PipeSizing {
                        dn: entry.dn().to_string(),
                        diameter,
                        velocity: flow_velocity(m_flow, diameter, &fluid),
                        pressure_gradient: dp_spec,
                        pressure_drop: dp_spec * pipe.length(),
                    })
                }
            };
            selections.push((key, sizing));
        }

        let sized = selections.iter().filter(|(_, s)| s.is_some()).count();
        for (key, sizing) in selections {
            if let Some(attributes) = self.attributes.get_mut(&key) {
                attributes.set_sizing(sizing);
            }
        }

        tracing::info!(
            "Selected {sized} pipes of the {network_type} network from catalog {:?}.",
            catalog.name()
        );

        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::test_utils::{NetworkBuilder, TestNode, TestPipe};
    use crate::{ErrorKind, PipeCatalogEntry};
    use approx::assert_relative_eq;

    fn small_catalog() -> PipeCatalog {
        PipeCatalog::try_new(
            "small",
            CapacityMetric::MassFlow,
            vec![
                PipeCatalogEntry::new("DN20", 0.0217, 0.125),
                PipeCatalogEntry::new("DN25", 0.0285, 0.25),
                PipeCatalogEntry::new("DN32", 0.0372, 0.5),
            ],
        )
        .unwrap()
    }

    fn size(graph: &mut HydronicGraph<TestNode, TestPipe>, catalog: &PipeCatalog) -> Result<(), Error> {
        graph
            .estimate_mass_flow(
                NetworkType::Heating,
                "input_heat",
                "dT_Network",
                LoadScenario::PeakLoad,
            )?
            .select_pipe_diameters(catalog, NetworkType::Heating, LoadScenario::PeakLoad)
            .map(|_| ())
    }

    #[test]
    fn test_selection() -> Result<(), Error> {
        let mut builder = NetworkBuilder::new();
        let supply = builder.supply();
        let junction = builder.junction();
        let d1 = builder.building(15000.0, 30.0);
        let d2 = builder.building(9000.0, 30.0);
        builder
            .connect(supply, junction)
            .connect(junction, d1)
            .connect(junction, d2);
        let mut graph = builder.build(None)?;
        size(&mut graph, &small_catalog())?;

        assert_eq!(graph.pipe_attributes(1, 2)?.dn(), Some("DN25"));
        assert_eq!(graph.pipe_attributes(2, 3)?.dn(), Some("DN20"));
        assert_eq!(graph.pipe_attributes(2, 4)?.dn(), Some("DN20"));

        let attrs = graph.pipe_attributes(1, 2)?;
        let m_flow = attrs.m_flow(LoadScenario::PeakLoad).unwrap();
        let sizing = attrs.sizing().unwrap();
        assert_eq!(sizing.diameter, 0.0285);
        let fluid = graph.config().fluid;
        assert_relative_eq!(sizing.velocity, flow_velocity(m_flow, 0.0285, &fluid));
        assert_relative_eq!(
            sizing.pressure_gradient,
            pressure_gradient(m_flow, 0.0285, 0.025, &fluid)
        );
        assert_relative_eq!(sizing.pressure_drop, sizing.pressure_gradient * 10.0);

        Ok(())
    }

    #[test]
    fn test_every_flow_fits() -> Result<(), Error> {
        let mut builder = NetworkBuilder::new();
        let supply = builder.supply();
        let mut previous = supply;
        for load in [50_000.0, 200_000.0, 1_500_000.0, 20_000.0] {
            let building = builder.building(load, 30.0);
            builder.connect(previous, building);
            previous = building;
        }
        let mut graph = builder.build(None)?;
        let catalog = PipeCatalog::isoplus();
        size(&mut graph, &catalog)?;

        let fluid = graph.config().fluid;
        for (_, attrs) in graph.pipes_with_attributes() {
            let m_flow = attrs.m_flow(LoadScenario::PeakLoad).unwrap();
            let entry = catalog
                .entries()
                .iter()
                .find(|e| Some(e.dn()) == attrs.dn())
                .unwrap();
            assert!(catalog.max_mass_flow(entry, &fluid) >= m_flow);
        }

        Ok(())
    }

    #[test]
    fn test_capacity_exceeded_names_pipe() -> Result<(), Error> {
        let mut builder = NetworkBuilder::new();
        let supply = builder.supply();
        let small = builder.building(4184.0, 10.0);
        let large = builder.building(418_400.0, 10.0);
        builder.connect(supply, small).connect(large, small);
        let mut graph = builder.build(None)?;

        let err = size(&mut graph, &small_catalog()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CapacityExceeded);
        assert!(err.description().starts_with("Pipe (1, 2): "), "{err}");

        // Flows are written, no pipe is sized.
        assert!(graph.pipe_attributes(3, 2)?.m_flow(LoadScenario::PeakLoad).is_some());
        assert!(graph.pipes_with_attributes().all(|(_, a)| a.sizing().is_none()));

        Ok(())
    }

    #[test]
    fn test_pipes_without_flow_are_cleared() -> Result<(), Error> {
        let mut builder = NetworkBuilder::new();
        let supply = builder.supply();
        let a = builder.junction();
        let demand = builder.building(4184.0, 10.0);
        builder
            .connect(supply, a)
            .connect(a, demand)
            .pipe(TestPipe::new(supply.node_id(), demand.node_id()).cooling());
        let mut graph = builder.build(None)?;
        size(&mut graph, &small_catalog())?;
        assert_eq!(graph.pipe_attributes(1, 2)?.dn(), Some("DN20"));
        assert_eq!(graph.pipe_attributes(1, 3)?.dn(), None);

        // Without demands no pipe carries a flow.
        graph
            .aggregate_mass_flow(NetworkType::Heating, &[], LoadScenario::PeakLoad)?
            .select_pipe_diameters(&small_catalog(), NetworkType::Heating, LoadScenario::PeakLoad)?;
        assert!(graph.pipes_with_attributes().all(|(_, a)| a.sizing().is_none()
            && a.m_flow(LoadScenario::PeakLoad).is_none()));

        Ok(())
    }
}
