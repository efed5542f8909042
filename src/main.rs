//! Math Fish entry point
//!
//! The browser build is driven from JS through `math_fish::wasm`. Natively
//! this runs an autoplay demo in both modes and logs how the runs go.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use math_fish::Settings;
    use math_fish::sim::Operation;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Math Fish (native) starting...");

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    for operation in [Operation::Addition, Operation::Multiplication] {
        autoplay(Settings::new(operation, 12), seed);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn autoplay(settings: math_fish::Settings, seed: u64) {
    use math_fish::sim::{GameEvent, Move, Session};

    /// Upper bound on moves per demo run
    const MAX_STEPS: usize = 500;
    /// Seconds of play time credited per move
    const SECS_PER_MOVE: f32 = 1.5;

    let mut session = Session::new(settings, seed);
    log::info!(
        "Fish wants {} ({} mode), board {:?}",
        session.fish.number,
        session.operation().as_str(),
        session.board.values()
    );

    for _ in 0..MAX_STEPS {
        match session.autoplay_step() {
            Ok(Some(Move::Merge(a, b))) => log::debug!("merge {} + {}", a, b),
            Ok(Some(Move::Eat(id))) => log::debug!("eat {}", id),
            Ok(None) => break,
            Err(e) => {
                log::warn!("autoplay move rejected: {}", e);
                break;
            }
        }
        session.tick(SECS_PER_MOVE);

        for event in session.drain_events() {
            match event {
                GameEvent::Repaired { bubble } => {
                    log::info!("repair added {}", bubble.value)
                }
                GameEvent::FishGrew { size } => log::info!("fish grew to {}", size),
                GameEvent::GameOver { reason } => log::info!("run ended: {:?}", reason),
                _ => {}
            }
        }
    }

    log::info!(
        "{} run finished: score {}, fish size {}, board {:?}",
        session.operation().as_str(),
        session.score(),
        session.fish.size,
        session.board.values()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm::wasm_start, this is just to satisfy the compiler
}
