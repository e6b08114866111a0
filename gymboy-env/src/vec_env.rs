//! Synchronous vectorized environment.
use crate::{
    act::GymboyAct,
    emulator::Emulator,
    env::{GymboyEnv, GymboyEnvConfig},
    error::GymboyError,
    obs::GymboyObs,
};
use anyhow::Result;
use gymboy_core::{record::Record, Env, Step};
use log::info;

/// Runs independent copies of an environment one after another.
///
/// Each copy owns its emulator. An episode that ends is reset right away, the
/// observation of the new episode being stored in [`Step::init_obs`].
pub struct SyncVecEnv<E: Emulator> {
    envs: Vec<GymboyEnv<E>>,
}

impl<E: Emulator> SyncVecEnv<E> {
    /// Builds `num_envs` environments, the `i`-th one seeded with `seed + i` (wrapping).
    pub fn build(config: &GymboyEnvConfig, num_envs: usize, seed: i64) -> Result<Self> {
        if num_envs == 0 {
            return Err(GymboyError::InvalidNumEnvs(num_envs).into());
        }
        let envs = (0..num_envs)
            .map(|i| GymboyEnv::build(config, seed.wrapping_add(i as i64)))
            .collect::<Result<Vec<_>>>()?;
        info!("Build {} x {}", num_envs, config.get_env_id());
        Ok(Self { envs })
    }

    pub fn num_envs(&self) -> usize {
        self.envs.len()
    }

    /// Resets every environment, the `i`-th one with `seed + i` if a seed is given.
    pub fn reset(&mut self, seed: Option<i64>) -> Result<Vec<GymboyObs>> {
        self.envs
            .iter_mut()
            .enumerate()
            .map(|(i, env)| {
                env.reset(seed.map(|s| s.wrapping_add(i as i64)))
                    .map(|(obs, _)| obs)
            })
            .collect()
    }

    /// Steps every environment with its own action.
    pub fn step(&mut self, acts: &[GymboyAct]) -> Result<Vec<(Step<GymboyEnv<E>>, Record)>> {
        if acts.len() != self.envs.len() {
            return Err(GymboyError::ActionBatchMismatch {
                actual: acts.len(),
                expected: self.envs.len(),
            }
            .into());
        }
        self.envs
            .iter_mut()
            .zip(acts.iter())
            .map(|(env, act)| env.step_with_reset(act))
            .collect()
    }

    pub fn envs(&self) -> &[GymboyEnv<E>] {
        &self.envs
    }

    /// Closes every environment.
    pub fn close(&mut self) {
        self.envs.iter_mut().for_each(|env| env.close());
    }
}
