//! Stride - headless driver
//!
//! Runs a scripted session of the locomotion controller in the test arena and
//! logs the body state once per simulated second.
//!
//! ```text
//! stride [CONFIG.ron] [SCRIPT.ron]
//! stride --print-config
//! ```
//!
//! `CONFIG.ron` is a `SimulationConfig` (missing fields take defaults),
//! `SCRIPT.ron` a list of `ScriptStep`s. Set `RUST_LOG=debug` to see crouch
//! transitions and cursor lock changes.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use glam::Vec3;
use stride_game::{
    BodyStatus, HeadlessPlatform, InputFrame, Level, ScriptStep, ScriptedInput, Simulation,
    SimulationConfig,
};
use stride_physics::Stance;

fn load_config(path: &Path) -> Result<SimulationConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    ron::from_str(&text).with_context(|| format!("failed to parse config {}", path.display()))
}

fn load_script(path: &Path) -> Result<Vec<ScriptStep>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read script {}", path.display()))?;
    ron::from_str(&text).with_context(|| format!("failed to parse script {}", path.display()))
}

/// Walk, run, jump, crouch under the crawlspace and stand up past it.
fn demo_script(tick_rate: u32) -> Vec<ScriptStep> {
    let seconds = |s: f32| (s * tick_rate as f32).round() as u32;

    vec![
        ScriptStep::new(seconds(0.5), InputFrame::default()),
        ScriptStep::new(seconds(1.0), InputFrame::forward()),
        ScriptStep::new(seconds(0.5), InputFrame::forward().with_run()),
        ScriptStep::new(1, InputFrame::forward().with_run().with_jump()),
        ScriptStep::new(seconds(1.5), InputFrame::forward()),
        ScriptStep::new(seconds(0.5), InputFrame::default()),
        ScriptStep::new(seconds(5.0), InputFrame::forward().with_crouch()),
        // Released under the slab: stays crouched
        ScriptStep::new(seconds(1.0), InputFrame::default()),
        ScriptStep::new(seconds(2.5), InputFrame::forward().with_crouch()),
        ScriptStep::new(seconds(1.0), InputFrame::default()),
        ScriptStep::new(seconds(1.0), InputFrame::default().with_look(0.9, 0.2)),
    ]
}

fn log_status(status: &BodyStatus) {
    log::info!(
        "frame {:>5}  pos ({:>7.2}, {:>5.2}, {:>7.2})  vel ({:>6.2}, {:>6.2}, {:>6.2})  \
         yaw {:>6.1}  pitch {:>5.1}  {:?}{}{}",
        status.frame,
        status.position.x,
        status.position.y,
        status.position.z,
        status.velocity.x,
        status.velocity.y,
        status.velocity.z,
        status.yaw,
        status.pitch,
        status.stance,
        if status.transitioning { " (transitioning)" } else { "" },
        if status.grounded { "" } else { " airborne" },
    );
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.first().map(String::as_str) == Some("--print-config") {
        let text = ron::ser::to_string_pretty(&SimulationConfig::default(), ron::ser::PrettyConfig::default())
            .context("failed to serialize default config")?;
        println!("{}", text);
        return Ok(());
    }
    if args.len() > 2 {
        bail!("usage: stride [CONFIG.ron] [SCRIPT.ron] | stride --print-config");
    }

    let config = match args.first() {
        Some(path) => load_config(Path::new(path))?,
        None => SimulationConfig::default(),
    };
    let script = match args.get(1) {
        Some(path) => load_script(Path::new(path))?,
        None => demo_script(config.tick_rate),
    };

    let tick_rate = u64::from(config.tick_rate.max(1));
    let mut input = ScriptedInput::new(config.bindings.clone(), script);
    let mut simulation = Simulation::new(config, Level::test_arena(), HeadlessPlatform::default())
        .context("failed to start simulation")?;

    log::info!("playing {} ticks", input.remaining_ticks());

    let start = simulation.status().position;
    let mut last_stance = Stance::Standing;
    let mut stance_changes = 0;

    while input.advance() {
        simulation.step(&input);

        let status = simulation.status();
        if status.stance != last_stance {
            stance_changes += 1;
            last_stance = status.stance;
        }
        if status.frame % tick_rate == 0 {
            log_status(&status);
        }
    }

    let status = simulation.status();
    log_status(&status);

    let travelled = Vec3::new(status.position.x - start.x, 0.0, status.position.z - start.z).length();
    log::info!(
        "done: {} frames, {:.2} units travelled, {} stance changes",
        status.frame,
        travelled,
        stance_changes
    );

    simulation.deactivate();
    Ok(())
}
