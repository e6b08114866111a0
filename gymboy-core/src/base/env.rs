//! Environment.
use super::{Act, Info, Obs, Step};
use crate::record::Record;
use anyhow::Result;

/// Represents an environment, typically an MDP.
pub trait Env {
    /// Configurations.
    type Config: Clone;

    /// Observation of the environment.
    type Obs: Obs;

    /// Action of the environment.
    type Act: Act;

    /// Information in the [self::Step] object.
    type Info: Info;

    /// Builds an environment with a given random seed.
    ///
    /// The seed is consumed by the first call of [`Env::reset()`] that does not
    /// provide its own seed.
    fn build(config: &Self::Config, seed: i64) -> Result<Self>
    where
        Self: Sized;

    /// Performes an environment step.
    ///
    /// The returned [`Record`] holds diagnostics of the step, e.g. reward components.
    fn step(&mut self, a: &Self::Act) -> Result<(Step<Self>, Record)>
    where
        Self: Sized;

    /// Starts a new episode and returns the initial observation.
    fn reset(&mut self, seed: Option<i64>) -> Result<(Self::Obs, Self::Info)>;

    /// Performes an environment step and reset the environment if an episode ends.
    ///
    /// The observation after the reset is stored in [`Step::init_obs`].
    fn step_with_reset(&mut self, a: &Self::Act) -> Result<(Step<Self>, Record)>
    where
        Self: Sized,
    {
        let (step, record) = self.step(a)?;
        if step.is_done() {
            let (init_obs, _) = self.reset(None)?;
            Ok((step.with_init_obs(init_obs), record))
        } else {
            Ok((step, record))
        }
    }

    /// Resets the environment with a given index.
    ///
    /// The index is used in an arbitrary way. For example, it can be used as a random seed,
    /// which is useful when evaluation of a trained agent.
    fn reset_with_index(&mut self, ix: usize) -> Result<Self::Obs>;
}
