use anyhow::Result;
use gymboy_core::{DefaultEvaluator, Env as _, Evaluator as _, Policy};
use gymboy_env::{
    registered_envs,
    util::test::{env_config, write_rom, write_state, Env, MemoryEmulator, RandomPolicy},
    GymboyAct, GymboyError, ObsEncoding,
};
use std::path::Path;
use tempdir::TempDir;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn downcast(err: Option<anyhow::Error>) -> Option<GymboyError> {
    err.and_then(|e| e.downcast::<GymboyError>().ok())
}

fn build(dir: &Path, env_id: &str, title: &str, patches: &[(u16, &[u8])]) -> Result<Env> {
    let rom = write_rom(dir, "game.gbc", title)?;
    let state = write_state(dir, "game.state", patches)?;
    Env::build(&env_config(env_id, &rom, Some(&state)), 0)
}

#[test]
fn test_cartridge_mismatch_at_build() -> Result<()> {
    init();
    let dir = TempDir::new("gymboy")?;
    let err = build(dir.path(), "Pokemon-Red-flatten-v1", "POKEMON BLUE", &[]).err();

    assert_eq!(
        downcast(err),
        Some(GymboyError::CartridgeMismatch {
            actual: "POKEMON BLUE".to_string(),
            expected: "POKEMON RED".to_string(),
        })
    );
    Ok(())
}

#[test]
fn test_cartridge_mismatch_at_reset() -> Result<()> {
    init();
    let dir = TempDir::new("gymboy")?;
    let mut env = build(dir.path(), "Pokemon-Red-flatten-v1", "POKEMON RED", &[])?;
    env.reset(None)?;
    env.emulator_mut().set_title("POKEMON BLUE");

    assert!(matches!(
        downcast(env.reset(None).err()),
        Some(GymboyError::CartridgeMismatch { .. })
    ));
    assert_eq!(
        downcast(env.step(&GymboyAct::new(0)).err()),
        Some(GymboyError::NotReset)
    );
    assert_eq!(env.state(), gymboy_env::EpisodeState::Uninitialized);

    // a successful reset recovers
    env.emulator_mut().set_title("POKEMON RED");
    env.reset(None)?;
    env.step(&GymboyAct::new(0))?;
    Ok(())
}

#[test]
fn test_failed_state_load_blocks_step() -> Result<()> {
    init();
    let dir = TempDir::new("gymboy")?;
    let mut env = build(dir.path(), "Tetris-flatten-v1", "TETRIS", &[])?;
    env.reset(None)?;
    env.step(&GymboyAct::new(0))?;

    // truncated save state
    std::fs::write(dir.path().join("game.state"), [0u8; 16])?;
    assert!(env.reset(None).is_err());
    assert_eq!(
        downcast(env.step(&GymboyAct::new(0)).err()),
        Some(GymboyError::NotReset)
    );
    Ok(())
}

#[test]
fn test_invalid_action_does_not_tick() -> Result<()> {
    init();
    let dir = TempDir::new("gymboy")?;
    let mut env = build(dir.path(), "Tetris-flatten-v1", "TETRIS", &[])?;
    env.reset(None)?;
    let ticks = env.emulator().ticks();

    assert_eq!(
        downcast(env.step(&GymboyAct::new(9)).err()),
        Some(GymboyError::InvalidAction { action: 9, n: 9 })
    );
    assert_eq!(env.emulator().ticks(), ticks);
    assert!(env.emulator().pressed().is_empty());
    Ok(())
}

#[test]
fn test_invalid_files() -> Result<()> {
    init();
    let dir = TempDir::new("gymboy")?;
    let rom = write_rom(dir.path(), "tetris.gb", "TETRIS")?;
    let missing_rom = dir.path().join("missing.gb");
    let txt_rom = write_rom(dir.path(), "tetris.txt", "TETRIS")?;
    let missing_state = dir.path().join("missing.state");

    let err = Env::build(&env_config("Tetris-flatten-v1", &missing_rom, None), 0).err();
    assert_eq!(downcast(err), Some(GymboyError::RomNotFound(missing_rom)));

    let err = Env::build(&env_config("Tetris-flatten-v1", &txt_rom, None), 0).err();
    assert_eq!(downcast(err), Some(GymboyError::InvalidRomFile(txt_rom)));

    let config = env_config("Tetris-flatten-v1", &rom, Some(&missing_state));
    let err = Env::build(&config, 0).err();
    assert_eq!(downcast(err), Some(GymboyError::StateNotFound(missing_state)));

    let config = env_config("Tetris-flatten-v1", &rom, None).n_frameskip(0);
    let err = Env::build(&config, 0).err();
    assert_eq!(downcast(err), Some(GymboyError::InvalidFrameskip(0)));

    let err = Env::build(&env_config("Tetris-image-v1", &rom, None), 0).err();
    assert_eq!(
        downcast(err),
        Some(GymboyError::UnknownEnvironment("Tetris-image-v1".to_string()))
    );
    Ok(())
}

#[test]
fn test_shapes_are_invariant() -> Result<()> {
    init();
    let dir = TempDir::new("gymboy")?;
    let mut policy = RandomPolicy::new(7);

    for spec in registered_envs() {
        let title = spec.title.spec();
        let rom = write_rom(dir.path(), "game.gb", title.cartridge_title)?;
        let mut env = Env::build(&env_config(spec.id, &rom, None), 0)?;
        let shape = spec.observation_space().shape;

        let (mut obs, _) = env.reset(None)?;
        assert_eq!(obs.shape(), shape, "{}", spec.id);
        for i in 0..20u8 {
            // scribble over the tile map and the game state between steps
            env.emulator_mut().write(0x9800 + i as u16 * 33, &[i * 7]);
            let (step, _) = env.step_with_reset(&policy.sample(&obs))?;
            assert_eq!(step.obs.shape(), shape, "{}", spec.id);
            assert!(!step.is_truncated);
            obs = step.obs;
        }
        if spec.encoding == ObsEncoding::MinimalImage {
            let grid = obs.as_minimal_image().map(|g| g.dim());
            assert_eq!(grid, Some(title.game_area.shape()));
        }
    }
    Ok(())
}

#[test]
fn test_fresh_game_restarts_from_zeroed_memory() -> Result<()> {
    init();
    let dir = TempDir::new("gymboy")?;
    let rom = write_rom(dir.path(), "tetris.gb", "TETRIS")?;
    let mut env = Env::build(&env_config("Tetris-flatten-v1", &rom, None), 0)?;
    env.reset(None)?;
    env.emulator_mut().write(0xFFE1, &[0x0D]);
    let (step, _) = env.step(&GymboyAct::new(0))?;
    assert!(step.is_terminated);

    env.reset(None)?;
    let (step, _) = env.step(&GymboyAct::new(0))?;
    assert!(!step.is_terminated);
    assert_eq!(step.reward, 0.0);
    Ok(())
}

#[test]
fn test_kirby_stage_change_and_game_over() -> Result<()> {
    init();
    let dir = TempDir::new("gymboy")?;
    let mut env = build(
        dir.path(),
        "Kirby-Dream-Land-1-flatten-v1",
        "KIRBY DREAM LA",
        &[(0xD028, &[1]), (0xD086, &[6]), (0xD089, &[4])],
    )?;
    env.reset(None)?;

    let (step, _) = env.step(&GymboyAct::new(4))?;
    assert_eq!(step.reward, 0.0);
    assert!(!step.is_terminated);

    env.emulator_mut().write(0xD028, &[2]);
    let (step, record) = env.step(&GymboyAct::new(4))?;
    assert_eq!(step.reward, 1.0);
    assert_eq!(record.get_scalar("level_finished")?, 1.0);
    assert!(step.is_terminated);

    // the stage captured at reset follows the save state, not the last episode
    env.reset(None)?;
    env.emulator_mut().write(0xD086, &[0]);
    env.emulator_mut().write(0xD089, &[1]);
    let (step, record) = env.step(&GymboyAct::new(0))?;
    assert_eq!(record.get_scalar("level_finished")?, 0.0);
    assert_eq!(step.reward, -1.0);
    assert!(step.is_terminated);
    Ok(())
}

#[test]
fn test_mario_reward_components() -> Result<()> {
    init();
    let dir = TempDir::new("gymboy")?;
    let mut env = build(
        dir.path(),
        "Super-Mario-Land-1-flatten-v1",
        "SUPER MARIOLAN",
        &[
            (0xC0A0, &[0x00, 0x01, 0x00]),
            (0x9829, &[1, 2]),
            (0xDA1D, &[0xFF]),
        ],
    )?;
    env.reset(None)?;
    let (step, record) = env.step(&GymboyAct::new(0))?;

    let expected = 100.0 / 999999.0 + 12.0 / 99.0 - 1.0;
    assert!((step.reward - expected).abs() < 1e-6);
    assert_eq!(record.get_scalar("time_over")?, -1.0);
    assert!(!step.is_terminated);

    env.emulator_mut().write(0xFFB3, &[0x05]);
    let (step, _) = env.step(&GymboyAct::new(0))?;
    assert!(step.is_terminated);
    Ok(())
}

#[test]
fn test_mario_game_over() -> Result<()> {
    init();
    let dir = TempDir::new("gymboy")?;
    let mut env = build(
        dir.path(),
        "Super-Mario-Land-1-flatten-v1",
        "SUPER MARIOLAN",
        &[],
    )?;
    env.reset(None)?;
    let (step, _) = env.step(&GymboyAct::new(0))?;
    assert!(!step.is_terminated);

    env.emulator_mut().write(0xC0A4, &[0x39]);
    let (step, record) = env.step(&GymboyAct::new(0))?;
    assert!(step.is_terminated);
    assert_eq!(record.get_scalar("game_over")?, -1.0);
    assert_eq!(record.get_scalar("level_finished")?, 0.0);
    assert_eq!(step.reward, -1.0);
    Ok(())
}

#[test]
fn test_pokemon_yellow_reward_is_shifted() -> Result<()> {
    init();
    let dir = TempDir::new("gymboy")?;
    // Red addresses minus one
    let mut env = build(
        dir.path(),
        "Pokemon-Yellow-flatten-v1",
        "POKEMON YELLOW",
        &[
            (0xD346, &[0x00, 0x31, 0x75]),
            (0xD746, &[0xFF]),
            (0xD309, &[0x0F]),
            (0xD18B, &[10]),
        ],
    )?;
    env.reset(None)?;
    let (step, record) = env.step(&GymboyAct::new(0))?;

    let money = 3175.0 / 999999.0;
    let events = 8.0 / (8.0 * 319.0);
    assert!((record.get_scalar("money")? - money).abs() < 1e-9);
    assert!((record.get_scalar("events")? - events).abs() < 1e-9);
    assert!((record.get_scalar("levels")? - 10.0 / 600.0).abs() < 1e-9);
    assert!((record.get_scalar("seen_pokemon")? - 4.0 / 151.0).abs() < 1e-9);
    assert_eq!(record.get_scalar("badges")?, 0.0);

    let expected = money + 10.0 / 600.0 + 4.0 / 151.0 + events;
    assert!((step.reward - expected).abs() < 1e-6);
    assert!(!step.is_terminated);
    Ok(())
}

#[test]
fn test_pokemon_gold_reward() -> Result<()> {
    init();
    let dir = TempDir::new("gymboy")?;
    let mut env = build(dir.path(), "Pokemon-Gold-flatten-v1", "POKEMON_GLDAAU", &[])?;
    env.reset(None)?;

    // an empty party must not divide by zero
    let (step, _) = env.step(&GymboyAct::new(0))?;
    assert_eq!(step.reward, 0.0);

    // Chikorita at level 5 with Tackle and Growl, two PP ups on Tackle
    let emu = env.emulator_mut();
    emu.write(0xD573, &[0x00, 0x0B, 0xB8]);
    emu.write(0xDA22, &[1]);
    emu.write(0xDA2A, &[152]);
    emu.write(0xDA2C, &[33, 45, 0, 0]);
    emu.write(0xDA41, &[0x80 | 35, 40, 0, 0]);
    emu.write(0xDA49, &[5]);
    emu.write(0xDA4C, &[0, 19, 0, 19]);
    emu.write(0xDEB9, &[0b0000_0011]);
    let (step, record) = env.step(&GymboyAct::new(0))?;

    assert_eq!(record.get_scalar("hps")?, 1.0);
    assert_eq!(record.get_scalar("pps")?, 1.0);
    let expected = 3000.0 / 999999.0 + 1.0 / 6.0 + 5.0 / 600.0 + 1.0 + 1.0 + 2.0 / 251.0;
    assert!((step.reward - expected).abs() < 1e-5);
    assert!(!step.is_terminated);
    Ok(())
}

#[test]
fn test_rewards_are_deterministic() -> Result<()> {
    init();
    let dir = TempDir::new("gymboy")?;
    let patches: &[(u16, &[u8])] = &[(0xD347, &[0x00, 0x31, 0x75]), (0xD356, &[0b101])];
    let mut a = build(dir.path(), "Pokemon-Red-flatten-v1", "POKEMON RED", patches)?;
    let mut b = build(dir.path(), "Pokemon-Red-flatten-v1", "POKEMON RED", patches)?;
    a.reset(Some(3))?;
    b.reset(Some(3))?;

    for act in [1u8, 5, 0, 8].iter() {
        let (sa, ra) = a.step(&GymboyAct::new(*act))?;
        let (sb, rb) = b.step(&GymboyAct::new(*act))?;
        assert_eq!(sa.reward, sb.reward);
        assert_eq!(sa.obs, sb.obs);
        assert_eq!(ra.get_scalar("badges")?, rb.get_scalar("badges")?);
        assert_eq!(ra.get_scalar("badges")?, 2.0 / 8.0);
    }
    Ok(())
}

#[test]
fn test_reward_weights() -> Result<()> {
    init();
    let dir = TempDir::new("gymboy")?;
    let rom = write_rom(dir.path(), "tetris.gb", "TETRIS")?;
    let state = write_state(dir.path(), "tetris.state", &[(0xFFE1, &[0x0D])])?;
    let config = env_config("Tetris-flatten-v1", &rom, Some(&state))
        .reward_weight(gymboy_env::reward::RewardComponent::GameOver, 0.5);
    let mut env = Env::build(&config, 0)?;
    env.reset(None)?;
    let (step, _) = env.step(&GymboyAct::new(0))?;

    assert_eq!(step.reward, -0.5);
    Ok(())
}

#[test]
fn test_evaluate_random_policy() -> Result<()> {
    init();
    let dir = TempDir::new("gymboy")?;
    let rom = write_rom(dir.path(), "tetris.gb", "TETRIS")?;
    let config = env_config("Tetris-full-image-v1", &rom, None);
    let mut policy = RandomPolicy::new(42);

    let record = DefaultEvaluator::<Env>::new(&config, 0, 2)?
        .max_steps(5)
        .evaluate(&mut policy)?;
    assert_eq!(record.get_scalar("Episode length")?, 5.0);
    assert_eq!(record.get_scalar("Episode return")?, 0.0);
    Ok(())
}

#[test]
fn test_make_overrides_env_id() -> Result<()> {
    init();
    let dir = TempDir::new("gymboy")?;
    let rom = write_rom(dir.path(), "tetris.gb", "TETRIS")?;
    let config = env_config("Pokemon-Red-flatten-v1", &rom, None);

    let env = gymboy_env::make::<MemoryEmulator>("Tetris-minimal-image-v1", &config, 0)?;
    assert_eq!(env.spec().id, "Tetris-minimal-image-v1");
    assert_eq!(env.observation_space().shape, vec![18, 10]);

    let envs = gymboy_env::make_vec::<MemoryEmulator>("Tetris-flatten-v1", 4, &config, 0)?;
    assert_eq!(envs.num_envs(), 4);
    Ok(())
}
