//! Sky Stairs entry point
//!
//! On the web this boots the browser host. Natively it runs a headless
//! autopilot demo and logs how the run went.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    sky_stairs::platform::web::run().await;
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Sky Stairs (native) starting...");
    log::info!("Native mode runs a headless demo - use `trunk serve` for the playable web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(7);
    let tuning = match std::env::args().nth(2) {
        Some(path) => sky_stairs::Tuning::from_file(std::path::Path::new(&path)).unwrap_or_else(|e| {
            log::warn!("{}; using default tuning", e);
            sky_stairs::Tuning::default()
        }),
        None => sky_stairs::Tuning::default(),
    };
    demo::run(seed, tuning);
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use sky_stairs::renderer::Mesh;
    use sky_stairs::sim::InputOutcome;
    use sky_stairs::{
        Direction, Engine, EngineListener, MemoryStore, RunState, Settings, StateUpdate, Tuning,
    };

    /// Simulated frame length (ms)
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Frames the autopilot plays before the demo deliberately misses
    const AUTOPILOT_FRAMES: usize = 600;

    #[derive(Default)]
    struct Tally {
        state_changes: usize,
        time_updates: usize,
        last: Option<StateUpdate>,
    }

    struct LogListener(Rc<RefCell<Tally>>);

    impl EngineListener for LogListener {
        fn on_state_change(&mut self, update: &StateUpdate) {
            log::debug!("State: {:?}", update);
            let mut tally = self.0.borrow_mut();
            tally.state_changes += 1;
            tally.last = Some(*update);
        }

        fn on_time_update(&mut self, _percent: f32) {
            self.0.borrow_mut().time_updates += 1;
        }
    }

    pub fn run(seed: u64, tuning: Tuning) {
        let tally = Rc::new(RefCell::new(Tally::default()));
        let store = MemoryStore::new();
        let mut engine = Engine::new(
            store.clone(),
            Box::new(LogListener(tally.clone())),
            Vec2::new(800.0, 600.0),
            seed,
            tuning,
            Settings::default(),
        );

        engine.toggle_autopilot();
        let mut mesh = Mesh::new();
        let mut now = 0.0;
        for _ in 0..AUTOPILOT_FRAMES {
            engine.frame(now);
            mesh.clear();
            engine.render(&mut mesh, now);
            now += FRAME_MS;
        }
        engine.toggle_autopilot();
        log::info!(
            "Autopilot reached score {} ({} triangles in the last frame)",
            engine.state().score,
            mesh.triangle_count()
        );

        // step off the staircase on purpose
        let required = sky_stairs::sim::autopilot_direction(engine.state());
        let wrong = match engine.state().player.facing {
            facing if facing == required => required.flipped(),
            facing => facing,
        };
        if engine.handle_direction(wrong) == InputOutcome::Fell {
            log::info!("Fell after pressing {}", direction_name(wrong));
        }

        // let the death shake play out
        while engine.state().shake > 0.0 {
            engine.frame(now);
            now += FRAME_MS;
        }

        let tally = tally.borrow();
        if let Some(last) = tally.last {
            if last.run_state != RunState::GameOver {
                log::warn!("Demo ended in {:?} instead of game over", last.run_state);
            }
            log::info!(
                "Final score {}, best {}, stored {:?}",
                last.score,
                last.high_score,
                sky_stairs::HighScoreStore::load(&store)
            );
        }
        log::info!(
            "{} state changes, {} time updates",
            tally.state_changes,
            tally.time_updates
        );

        engine.destroy();
    }

    fn direction_name(dir: Direction) -> &'static str {
        match dir {
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}
