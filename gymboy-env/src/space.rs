//! Action and observation space descriptors.
use serde::{Deserialize, Serialize};

/// Element type of observations.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DType {
    U8,
    F32,
}

/// A box-shaped observation space.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObservationSpace {
    pub shape: Vec<usize>,
    pub low: f32,
    pub high: f32,
    pub dtype: DType,
}

/// The action space.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionSpace {
    /// Actions `0..n`.
    Discrete(usize),
}

impl ActionSpace {
    /// Number of actions.
    pub fn n(&self) -> usize {
        match self {
            Self::Discrete(n) => *n,
        }
    }

    /// Whether `action` belongs to the space.
    pub fn contains(&self, action: usize) -> bool {
        action < self.n()
    }
}
