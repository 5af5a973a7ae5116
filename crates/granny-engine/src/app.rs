//! Headless host loop.
//!
//! Builds a session from the configuration, drives it with the autopilot
//! and collects the run summary.

use anyhow::{Context, Result};
use granny_gameplay::{FrameInput, GameMode, GameState, RunConfig, Session};
use tracing::info;

use crate::autopilot::Autopilot;
use crate::config::EngineConfig;
use crate::summary::RunSummary;
use crate::timing::FrameTiming;
use crate::trace_renderer::TraceRenderer;

/// Mixed into the run seed so the autopilot doesn't mirror the house rng.
const AUTOPILOT_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Run one session to completion or until the frame limit.
pub fn run(config: &EngineConfig) -> Result<RunSummary> {
    let seed = config.seed.unwrap_or_else(|| fastrand::u64(..));

    info!("Configuration loaded:");
    info!("  Difficulty: {}", config.difficulty);
    info!("  Seed: {seed}");
    info!(
        "  Frames: {} fps, limit {}",
        config.target_fps, config.max_frames
    );
    info!("  Autopilot: {}", config.autopilot);

    let run_config = RunConfig::new(config.difficulty, config.run);
    let state = GameState::new(run_config, fastrand::Rng::with_seed(seed))
        .context("Failed to start run")?;
    let mut session =
        Session::new(state).with_renderer(Box::new(TraceRenderer::new(config.trace_interval)));

    let mut pilot = Autopilot::new(seed ^ AUTOPILOT_SALT, config.interact_interval);
    let mut timing = FrameTiming::new(config.target_fps).with_realtime(config.realtime);
    let dt = timing.fixed_dt();
    info!(
        "  Pacing: {} fps, realtime {}",
        timing.target_fps(),
        timing.is_realtime()
    );
    let mut summary = RunSummary::new(seed, config.difficulty);

    'run: loop {
        match session.mode() {
            GameMode::Transition => {
                summary.record(&session.begin_day()?);
                timing.reset();
            },
            GameMode::Paused => {
                summary.record(&session.resume()?);
                timing.reset();
            },
            GameMode::GameOver | GameMode::Victory => break,
            GameMode::Playing => {},
        }

        for _ in 0..timing.steps_due() {
            let input = if config.autopilot {
                pilot.next_input(session.state().inventory())
            } else {
                FrameInput::captured()
            };
            summary.record(&session.frame(&input, dt));

            if config.max_frames > 0 && session.frames() >= config.max_frames {
                info!("Frame limit reached");
                break 'run;
            }
            if session.mode() != GameMode::Playing {
                break;
            }
        }

        timing.sleep_remainder();
    }

    if timing.is_realtime() {
        info!(
            "  Loop: {:.1} fps, {:.2} ms per iteration",
            timing.current_fps(),
            timing.average_frame_time_ms()
        );
    }

    session.cancel();
    summary.finish(&session);
    Ok(summary)
}
