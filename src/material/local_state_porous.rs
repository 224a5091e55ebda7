use serde::{Deserialize, Serialize};

/// Holds the porous media state at a single integration point
///
/// The gas pressure is kept for generality; it remains zero in the u-p formulation.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct LocalStatePorous {
    /// Liquid pressure pl
    pub liquid_pressure: f64,

    /// Gas pressure pg
    pub gas_pressure: f64,

    /// Liquid saturation sl
    pub liquid_saturation: f64,

    /// Intrinsic (real) density of the liquid ρL
    pub liquid_density: f64,

    /// Initial partial fraction of solids ns0 = 1 - nf0
    pub partial_fraction_solids_ini: f64,

    /// Divergence of the solid displacement (volumetric strain)
    pub divus: f64,

    /// Last increment of capillary pressure Δpc
    pub delta_pc: f64,

    /// Wetting (vs drying) flag
    pub wetting: bool,
}

/// Holds the porous media states at all integration points of an element
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ArrLocalStatePorous {
    pub all: Vec<LocalStatePorous>,
    backup: Vec<LocalStatePorous>,
}

impl LocalStatePorous {
    /// Allocates a new (fully saturated and undeformed) instance
    pub fn new(partial_fraction_solids_ini: f64, liquid_density: f64) -> Self {
        LocalStatePorous {
            liquid_pressure: 0.0,
            gas_pressure: 0.0,
            liquid_saturation: 1.0,
            liquid_density,
            partial_fraction_solids_ini,
            divus: 0.0,
            delta_pc: 0.0,
            wetting: false,
        }
    }

    /// Copies all data from another state into this state
    pub fn mirror(&mut self, other: &LocalStatePorous) {
        *self = *other;
    }

    /// Returns the capillary pressure pc = pg - pl
    pub fn capillary_pressure(&self) -> f64 {
        self.gas_pressure - self.liquid_pressure
    }
}

impl ArrLocalStatePorous {
    /// Allocates a new instance
    pub fn new(states: Vec<LocalStatePorous>) -> Self {
        let backup = states.clone();
        ArrLocalStatePorous { all: states, backup }
    }

    /// Creates a copy of all states
    pub fn backup(&mut self) {
        self.backup
            .iter_mut()
            .zip(self.all.iter())
            .for_each(|(backup, state)| backup.mirror(state));
    }

    /// Restores all states from the backup
    pub fn restore(&mut self) {
        self.all
            .iter_mut()
            .zip(self.backup.iter())
            .for_each(|(state, backup)| state.mirror(backup));
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
