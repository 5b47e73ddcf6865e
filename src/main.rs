//! Brick Breaker headless runner
//!
//! Runs the game loop at the configured tick interval with an autopilot
//! dragging the paddle under the ball, then prints the final snapshot as JSON.
//!
//! Usage: `brick-breaker [config.json] [seconds]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Brick Breaker (headless) starting...");

    if let Err(e) = native::run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Threads are not available here; hosts drive `GameLoop::step` themselves
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::error::Error;
    use std::time::{Duration, Instant};

    use brick_breaker::sim::GameEvent;
    use brick_breaker::{GameConfig, GameLoop, PointerEvent, PointerInput, Viewport};

    /// Simulated drawing surface (a phone held upright)
    const SURFACE: (f32, f32) = (1170.0, 2532.0);
    /// Pointer sample period, roughly one display frame
    const POINTER_PERIOD: Duration = Duration::from_millis(16);
    const DEFAULT_SECONDS: u64 = 10;

    pub fn run() -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args().skip(1);
        let config = match args.next() {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };
        let seconds = match args.next() {
            Some(s) => s.parse::<u64>()?,
            None => DEFAULT_SECONDS,
        };

        let viewport = Viewport::fit(
            SURFACE.0,
            SURFACE.1,
            config.arena_width,
            config.arena_height,
        );
        let mut game = GameLoop::new(config)?.with_observer(|snap| {
            for event in &snap.events {
                if let GameEvent::BrickDestroyed { id, score } = event {
                    log::info!(
                        "Brick {} down at tick {}, score {} ({} left)",
                        id,
                        snap.tick,
                        score,
                        snap.bricks.len()
                    );
                }
            }
        });
        game.start()?;

        // Autopilot: press once, then keep the pointer over the ball
        let mut input = PointerInput::new(viewport);
        let ball_screen_x = |game: &GameLoop| viewport.to_screen_x(game.snapshot().ball.x);
        let x = ball_screen_x(&game);
        input.handle(PointerEvent::Pressed { x, y: 0.0 }, &mut game);

        let deadline = Instant::now() + Duration::from_secs(seconds);
        while game.is_running() && Instant::now() < deadline {
            let x = ball_screen_x(&game);
            input.handle(PointerEvent::Moved { x, y: 0.0 }, &mut game);
            std::thread::sleep(POINTER_PERIOD);
        }
        input.handle(PointerEvent::Released, &mut game);
        game.stop();

        let snapshot = game.snapshot();
        log::info!(
            "Finished after {} ticks: score {}, {} bricks left{}",
            snapshot.tick,
            snapshot.score,
            snapshot.bricks.len(),
            if snapshot.game_over { ", game over" } else { "" }
        );
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        Ok(())
    }
}
