//! Game loop thread - runs the simulation at a fixed rate and notifies observers.
//!
//! The state lives behind one mutex shared by the scheduler thread and input
//! callers, so a tick never sees a half-written paddle. The thread waits on a
//! command channel between ticks, which makes cancellation immediate.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use thiserror::Error;

use crate::config::{ConfigError, GameConfig};
use crate::sim::{GameState, tick};
use crate::snapshot::GameSnapshot;

/// Callback receiving a snapshot after every scheduled tick
pub type Observer = Arc<dyn Fn(&GameSnapshot) + Send + Sync>;

#[derive(Debug, Error)]
pub enum GameLoopError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to spawn game loop thread: {0}")]
    Spawn(#[from] std::io::Error),
}

enum LoopCommand {
    Stop,
}

/// A running scheduler thread
struct Scheduler {
    cmd_tx: mpsc::Sender<LoopCommand>,
    handle: JoinHandle<()>,
}

/// Owns the game state and the periodic tick schedule
pub struct GameLoop {
    state: Arc<Mutex<GameState>>,
    observers: Vec<Observer>,
    scheduler: Option<Scheduler>,
}

impl GameLoop {
    /// Create a loop with a fresh game. Nothing ticks until `start`.
    pub fn new(config: GameConfig) -> Result<Self, GameLoopError> {
        config.validate()?;
        Ok(Self {
            state: Arc::new(Mutex::new(GameState::new(config))),
            observers: Vec::new(),
            scheduler: None,
        })
    }

    pub fn with_observer(
        mut self,
        observer: impl Fn(&GameSnapshot) + Send + Sync + 'static,
    ) -> Self {
        self.add_observer(observer);
        self
    }

    /// Register an observer. Takes effect from the next `start`.
    pub fn add_observer(&mut self, observer: impl Fn(&GameSnapshot) + Send + Sync + 'static) {
        self.observers.push(Arc::new(observer));
    }

    /// Reset to a new game and begin ticking
    ///
    /// A schedule that is already running is cancelled and joined first, so
    /// there is never more than one.
    pub fn start(&mut self) -> Result<(), GameLoopError> {
        self.stop();

        let interval = {
            let mut state = lock_state(&self.state);
            state.reset();
            state.config.tick_interval()
        };

        let (cmd_tx, cmd_rx) = mpsc::channel();
        let state = Arc::clone(&self.state);
        let observers = self.observers.clone();
        let handle = std::thread::Builder::new()
            .name("brick-breaker-loop".into())
            .spawn(move || run_loop(&state, &observers, interval, cmd_rx))?;

        self.scheduler = Some(Scheduler { cmd_tx, handle });
        log::info!("Game started, ticking every {:?}", interval);
        Ok(())
    }

    /// Restart button: same as `start`
    pub fn reset(&mut self) -> Result<(), GameLoopError> {
        self.start()
    }

    /// Cancel the schedule, leaving the state as it is
    pub fn stop(&mut self) {
        if let Some(scheduler) = self.scheduler.take() {
            // Fails only if the thread already exited on game over
            let _ = scheduler.cmd_tx.send(LoopCommand::Stop);
            if scheduler.handle.join().is_err() {
                log::error!("Game loop thread panicked");
            }
        }
    }

    /// Whether a scheduler thread is currently ticking
    pub fn is_running(&self) -> bool {
        self.scheduler
            .as_ref()
            .is_some_and(|scheduler| !scheduler.handle.is_finished())
    }

    /// Move the paddle center (clamped). Safe from any thread.
    pub fn set_paddle_position(&self, x: f32) {
        lock_state(&self.state).set_paddle_position(x);
    }

    /// Run one tick by hand and notify observers
    pub fn step(&self) -> GameSnapshot {
        let snapshot = {
            let mut state = lock_state(&self.state);
            tick(&mut state);
            GameSnapshot::from(&*state)
        };
        notify(&self.observers, &snapshot);
        snapshot
    }

    /// Current state for rendering
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::from(&*lock_state(&self.state))
    }

    /// Read the live state under the lock
    pub fn with_state<R>(&self, f: impl FnOnce(&GameState) -> R) -> R {
        f(&lock_state(&self.state))
    }
}

impl Drop for GameLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Every operation leaves the state consistent, so a poisoned lock is still usable
fn lock_state(state: &Mutex<GameState>) -> MutexGuard<'_, GameState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

fn notify(observers: &[Observer], snapshot: &GameSnapshot) {
    for observer in observers {
        observer(snapshot);
    }
}

/// The scheduler. Runs until Stop, channel disconnect, or game over.
fn run_loop(
    state: &Mutex<GameState>,
    observers: &[Observer],
    interval: Duration,
    cmd_rx: mpsc::Receiver<LoopCommand>,
) {
    let mut next_tick_time = Instant::now() + interval;

    loop {
        // 1. Sleep until the next tick, waking early for commands
        let wait = next_tick_time.saturating_duration_since(Instant::now());
        match cmd_rx.recv_timeout(wait) {
            Ok(LoopCommand::Stop) | Err(RecvTimeoutError::Disconnected) => {
                log::info!("Game loop stopped");
                return;
            }
            Err(RecvTimeoutError::Timeout) => {}
        }

        // 2. Advance one tick under the lock
        let (snapshot, game_over) = {
            let mut state = lock_state(state);
            tick(&mut state);
            let snapshot = (!observers.is_empty()).then(|| GameSnapshot::from(&*state));
            (snapshot, state.is_game_over())
        };

        // 3. Observers run outside the lock
        if let Some(snapshot) = snapshot {
            notify(observers, &snapshot);
        }

        if game_over {
            log::info!("Game loop finished: game over");
            return;
        }

        // 4. Schedule the next tick
        next_tick_time += interval;
        let now = Instant::now();
        if now > next_tick_time + interval * 2 {
            // Too far behind - reset to avoid catch-up spiral
            log::warn!(
                "Game loop fell behind by {:?}, resynchronizing",
                now - next_tick_time
            );
            next_tick_time = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Ball spawns near the bottom and falls straight down: game over on tick 3
    fn doomed_config() -> GameConfig {
        GameConfig {
            ball_start_offset: 20.0,
            ball_start_velocity: glam::Vec2::new(0.0, 2.0),
            tick_interval_ms: 1,
            ..Default::default()
        }
    }

    /// Ball never moves, so the game never ends
    fn idle_config(tick_interval_ms: u64) -> GameConfig {
        GameConfig {
            ball_start_velocity: glam::Vec2::ZERO,
            tick_interval_ms,
            ..Default::default()
        }
    }

    fn wait_until_stopped(game: &GameLoop) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while game.is_running() && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(1));
        }
        assert!(!game.is_running(), "game loop did not stop");
    }

    #[test]
    fn test_runs_until_game_over() {
        let ticks_seen = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&ticks_seen);
        let mut game = GameLoop::new(doomed_config())
            .unwrap()
            .with_observer(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            });

        game.start().unwrap();
        wait_until_stopped(&game);

        let snap = game.snapshot();
        assert!(snap.game_over);
        assert_eq!(snap.tick, 3);
        assert_eq!(ticks_seen.load(Ordering::SeqCst), 3);

        // No late ticks after the schedule ended
        std::thread::sleep(Duration::from_millis(20));
        assert_eq!(game.snapshot().tick, 3);
    }

    #[test]
    fn test_reset_starts_a_fresh_game() {
        let mut game = GameLoop::new(doomed_config()).unwrap();
        game.start().unwrap();
        wait_until_stopped(&game);
        assert!(game.snapshot().game_over);

        game.reset().unwrap();
        wait_until_stopped(&game);

        let snap = game.snapshot();
        assert!(snap.game_over);
        assert_eq!(snap.tick, 3);
        assert_eq!(snap.score, 0);
        assert_eq!(snap.bricks.len(), 35);
    }

    #[test]
    fn test_double_start_does_not_double_schedule() {
        let mut game = GameLoop::new(idle_config(10)).unwrap();
        game.start().unwrap();
        game.start().unwrap();
        assert!(game.is_running());

        std::thread::sleep(Duration::from_millis(200));
        game.stop();
        assert!(!game.is_running());

        // One schedule at 10ms gives about 20 ticks; two would give about 40
        let ticks = game.snapshot().tick;
        assert!(ticks < 30, "got {ticks} ticks");
    }

    #[test]
    fn test_stop_freezes_state() {
        let mut game = GameLoop::new(idle_config(1)).unwrap();
        game.start().unwrap();
        std::thread::sleep(Duration::from_millis(20));
        game.stop();

        let frozen = game.snapshot();
        std::thread::sleep(Duration::from_millis(20));
        assert_eq!(game.snapshot(), frozen);
    }

    #[test]
    fn test_manual_step() {
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&seen);
        let game = GameLoop::new(GameConfig::default())
            .unwrap()
            .with_observer(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            });

        assert!(!game.is_running());
        game.set_paddle_position(-100.0);
        let snap = game.step();

        assert_eq!(snap.tick, 1);
        assert_eq!(snap.paddle.x, 50.0);
        assert_eq!(snap.ball.x, 252.0);
        assert_eq!(seen.load(Ordering::SeqCst), 1);
        assert_eq!(game.with_state(|s| s.time_ticks), 1);
    }

    #[test]
    fn test_paddle_updates_from_other_threads() {
        let mut game = GameLoop::new(idle_config(1)).unwrap();
        game.start().unwrap();

        std::thread::scope(|s| {
            for t in 0..4 {
                let game = &game;
                s.spawn(move || {
                    for i in 0..200 {
                        game.set_paddle_position((t * 1000 + i) as f32 - 500.0);
                    }
                });
            }
        });
        game.stop();

        let x = game.snapshot().paddle.x;
        assert!((50.0..=450.0).contains(&x));
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = GameConfig {
            paddle_width: 1000.0,
            ..Default::default()
        };
        assert!(matches!(
            GameLoop::new(config),
            Err(GameLoopError::Config(ConfigError::Invalid { .. }))
        ));
    }
}
