use russell_lab::Vector;
use russell_tensor::{Mandel, Tensor2};
use serde::{Deserialize, Serialize};

/// Holds the effective stress state at a single integration point
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LocalState {
    /// Holds the internal values Z
    pub internal_values: Vector,

    /// Holds the effective stress tensor σ'
    pub stress: Tensor2,

    /// Holds the elastoplastic loading (vs elastic) flag
    pub loading: bool,

    /// Holds the algorithmic lagrange multiplier (Λ) for implicit methods
    pub algo_lambda: f64,
}

/// Holds the stress states at all integration points of an element
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ArrLocalState {
    pub all: Vec<LocalState>,
    backup: Vec<LocalState>,
}

impl LocalState {
    /// Allocates a new instance
    pub fn new(mandel: Mandel, n_internal_values: usize) -> Self {
        LocalState {
            internal_values: Vector::new(n_internal_values),
            stress: Tensor2::new(mandel),
            loading: false,
            algo_lambda: 0.0,
        }
    }

    /// Copies all data from another state into this state
    pub fn mirror(&mut self, other: &LocalState) {
        self.internal_values.clone_from(&other.internal_values);
        self.stress.set_tensor(1.0, &other.stress);
        self.loading = other.loading;
        self.algo_lambda = other.algo_lambda;
    }
}

impl ArrLocalState {
    /// Allocates a new instance
    pub fn new(mandel: Mandel, n_internal_values: usize, n_integ_point: usize) -> Self {
        let zero_state = LocalState::new(mandel, n_internal_values);
        let all = vec![zero_state; n_integ_point];
        let backup = all.clone();
        ArrLocalState { all, backup }
    }

    /// Resets algorithmic variables such as Λ at the beginning of implicit iterations
    pub fn reset_algorithmic_variables(&mut self) {
        self.all.iter_mut().for_each(|state| state.algo_lambda = 0.0);
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
