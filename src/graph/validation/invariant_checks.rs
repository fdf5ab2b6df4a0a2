// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Checks for the invariants of a [`SizingConfig`].

use crate::{Error, NetworkType, SizingConfig};

fn ensure_positive(what: &str, value: f64) -> Result<(), Error> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::configuration(format!(
            "{what} must be a positive number, found {value}."
        )))
    }
}

pub(super) fn validate_config(config: &SizingConfig) -> Result<(), Error> {
    ensure_positive("Fluid density", config.fluid.density)?;
    ensure_positive(
        "Specific heat capacity",
        config.fluid.specific_heat_capacity,
    )?;
    ensure_positive("Friction factor", config.friction_factor)?;
    ensure_positive("U-bend spacing", config.fittings.u_bend_spacing)?;
    if !(config.fittings.gate_valves.is_finite() && config.fittings.gate_valves >= 0.0) {
        return Err(Error::configuration(format!(
            "Gate valves per pipe must be a non-negative number, found {}.",
            config.fittings.gate_valves
        )));
    }
    for network_type in [NetworkType::Heating, NetworkType::Cooling] {
        if let Some(delta_t) = config.default_delta_t.for_network(network_type) {
            ensure_positive(
                &format!("Default {network_type} temperature difference"),
                delta_t,
            )?;
        }
    }
    if config.max_paths_per_demand == 0 {
        return Err(Error::configuration(
            "max_paths_per_demand must be at least 1.",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::test_utils::NetworkBuilder;
    use crate::{DefaultDeltaT, Fittings, FluidProperties};

    #[test]
    fn test_config_validation() {
        let mut builder = NetworkBuilder::new();
        let supply = builder.supply();
        let demand = builder.building(1000.0, 30.0);
        builder.connect(supply, demand);

        assert!(builder.build(None).is_ok());
        assert!(builder
            .build(Some(SizingConfig {
                default_delta_t: DefaultDeltaT::none(),
                ..Default::default()
            }))
            .is_ok());

        assert!(builder
            .build(Some(SizingConfig {
                default_delta_t: DefaultDeltaT {
                    cooling: Some(-5.0),
                    ..Default::default()
                },
                ..Default::default()
            }))
            .is_err_and(|e| e
                == Error::configuration(
                    "Default cooling temperature difference must be a positive number, found -5."
                )));
        assert!(builder
            .build(Some(SizingConfig {
                fluid: FluidProperties {
                    specific_heat_capacity: 0.0,
                    ..Default::default()
                },
                ..Default::default()
            }))
            .is_err_and(|e| e
                == Error::configuration(
                    "Specific heat capacity must be a positive number, found 0."
                )));
        assert!(builder
            .build(Some(SizingConfig {
                friction_factor: f64::NAN,
                ..Default::default()
            }))
            .is_err_and(|e| e.kind() == crate::ErrorKind::Configuration));
        assert!(builder
            .build(Some(SizingConfig {
                fittings: Fittings {
                    gate_valves: -1.0,
                    ..Default::default()
                },
                ..Default::default()
            }))
            .is_err_and(|e| e
                == Error::configuration(
                    "Gate valves per pipe must be a non-negative number, found -1."
                )));
        assert!(builder
            .build(Some(SizingConfig {
                fittings: Fittings {
                    gate_valves: 0.0,
                    ..Default::default()
                },
                ..Default::default()
            }))
            .is_ok());
        assert!(builder
            .build(Some(SizingConfig {
                max_paths_per_demand: 0,
                ..Default::default()
            }))
            .is_err_and(|e| e
                == Error::configuration("max_paths_per_demand must be at least 1.")));
    }
}
