//! Game loop driver
//!
//! Runs the game on a single cooperative timeline: every handler (tick,
//! delayed serve, spark expiry, player input) runs to completion, then the
//! canvas is re-rendered. A new tick is only scheduled by the tick before
//! it, so ticks never overlap.

pub mod timeline;

pub use timeline::{Timeline, Timer};

use crate::Settings;
use crate::renderer::{Canvas, View};
use crate::sim::{GameEvent, GamePhase, GameState, InputEvent, apply_input, tick};

pub struct Driver<C: Canvas> {
    state: GameState,
    timeline: Timeline,
    canvas: C,
    view: View,
}

impl<C: Canvas> Driver<C> {
    /// Start a new game and draw its first frame
    pub fn new(settings: Settings, canvas: C) -> Self {
        let mut driver = Self {
            state: GameState::new(settings),
            timeline: Timeline::new(),
            canvas,
            view: View::new(),
        };
        driver.render();
        driver
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn now_ms(&self) -> u64 {
        self.timeline.now_ms()
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Whether the game reached Won or GameOver
    pub fn is_finished(&self) -> bool {
        self.state.phase.is_terminal()
    }

    /// Whether anything is left to fire
    pub fn is_idle(&self) -> bool {
        self.timeline.pending() == 0
    }

    /// Handle one player input between timers
    pub fn handle_input(&mut self, input: InputEvent) {
        if apply_input(&mut self.state, input) {
            self.process_events();
            self.render();
        }
    }

    /// Fire every timer due within the next `ms`, then move the clock there
    pub fn advance(&mut self, ms: u64) {
        let until = self.timeline.now_ms() + ms;
        while let Some(timer) = self.timeline.pop_due(until) {
            self.fire(timer);
        }
        self.timeline.advance_to(until);
    }

    /// Fire the next pending timer, returning it
    pub fn step(&mut self) -> Option<Timer> {
        let timer = self.timeline.pop_due(u64::MAX)?;
        self.fire(timer);
        Some(timer)
    }

    fn fire(&mut self, timer: Timer) {
        match timer {
            Timer::Tick => {
                tick(&mut self.state);
                self.process_events();
                self.render();
                if self.state.phase == GamePhase::Running {
                    self.timeline
                        .schedule(self.state.settings.tick_interval_ms, Timer::Tick);
                }
            }
            Timer::Setup => {
                if self.state.phase == GamePhase::RoundLost {
                    self.state.setup_round();
                    self.process_events();
                    self.render();
                }
            }
            Timer::ExpireSparks(burst) => {
                self.state.expire_sparks(burst);
                self.render();
            }
        }
    }

    /// Turn recorded game events into follow-up timers
    fn process_events(&mut self) {
        let settings = &self.state.settings;
        let (spark_ms, respawn_ms) = (settings.spark_lifetime_ms, settings.respawn_delay_ms);

        for event in self.state.drain_events() {
            match event {
                GameEvent::Launched => {
                    log::info!("Ball launched at {} ms", self.timeline.now_ms());
                    self.timeline.schedule(0, Timer::Tick);
                }
                GameEvent::BrickDestroyed { burst, .. } => {
                    self.timeline.schedule(spark_ms, Timer::ExpireSparks(burst));
                }
                GameEvent::BallLost { .. } => {
                    self.timeline.schedule(respawn_ms, Timer::Setup);
                }
                GameEvent::Won | GameEvent::GameOver => {
                    log::info!(
                        "Game ended at {} ms after {} ticks",
                        self.timeline.now_ms(),
                        self.state.time_ticks
                    );
                }
                other => log::trace!("{other:?}"),
            }
        }
    }

    fn render(&mut self) {
        self.view.render(&mut self.canvas, &self.state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};
    use crate::renderer::Scene;
    use crate::renderer::view::{LOSE_TEXT, PROMPT_TEXT, WIN_TEXT};
    use crate::sim::{Brick, Entity, EntityKind};
    use glam::Vec2;

    fn new_driver() -> Driver<Scene> {
        let settings = Settings::default();
        let scene = Scene::new(PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT);
        Driver::new(settings, scene)
    }

    /// Drop the ball straight down next to the paddle so it is lost quickly
    fn aim_at_floor(driver: &mut Driver<Scene>) {
        let ball = driver.state.ball_mut().expect("ball");
        ball.pos = Vec2::new(30.0, 360.0);
        ball.direction = Vec2::new(1.0, 1.0);
    }

    #[test]
    fn test_nothing_ticks_before_launch() {
        let mut driver = new_driver();
        driver.advance(5_000);
        assert_eq!(driver.state().time_ticks, 0);
        assert!(driver.is_idle());
        assert!(driver.canvas().texts().contains(&PROMPT_TEXT));
    }

    #[test]
    fn test_ticks_at_fixed_interval() {
        let mut driver = new_driver();
        driver.handle_input(InputEvent::Launch);
        assert!(driver.timeline().is_pending(Timer::Tick));

        // First tick fires right away, then one every 50 ms
        driver.advance(0);
        assert_eq!(driver.state().time_ticks, 1);
        driver.advance(49);
        assert_eq!(driver.state().time_ticks, 1);
        driver.advance(1);
        assert_eq!(driver.state().time_ticks, 2);
        driver.advance(500);
        assert_eq!(driver.state().time_ticks, 12);

        // Never more than one tick in flight
        assert_eq!(driver.timeline().pending(), 1);
        assert!(!driver.canvas().texts().contains(&PROMPT_TEXT));
    }

    #[test]
    fn test_lost_ball_respawns_after_delay() {
        let mut driver = new_driver();
        driver.handle_input(InputEvent::Launch);
        aim_at_floor(&mut driver);

        let mut guard = 0;
        while driver.state().phase == GamePhase::Running && guard < 100 {
            driver.step();
            guard += 1;
        }
        assert_eq!(driver.state().phase, GamePhase::RoundLost);
        assert_eq!(driver.state().lives, 2);
        // HUD updates right away, before the respawn
        assert!(driver.canvas().texts().contains(&"Lives: 2"));
        assert!(!driver.timeline().is_pending(Timer::Tick));

        let lost_at = driver.now_ms();
        driver.advance(999);
        assert_eq!(driver.state().phase, GamePhase::RoundLost);
        driver.advance(1);
        assert_eq!(driver.state().phase, GamePhase::Setup);
        assert_eq!(driver.now_ms(), lost_at + 1000);
        assert!(driver.canvas().texts().contains(&PROMPT_TEXT));
        assert_eq!(driver.state().paddle().held_ball, driver.state().ball_id);
    }

    #[test]
    fn test_game_over_after_last_life() {
        let mut driver = new_driver();
        for _ in 0..4 {
            driver.handle_input(InputEvent::Launch);
            aim_at_floor(&mut driver);
            driver.advance(2_000);
        }
        assert_eq!(driver.state().phase, GamePhase::GameOver);
        assert_eq!(driver.state().lives, 0);
        assert!(driver.is_idle());
        assert!(driver.canvas().texts().contains(&LOSE_TEXT));
        assert!(driver.canvas().texts().contains(&"Lives: 0"));

        // Launch is unbound for good
        driver.handle_input(InputEvent::Launch);
        assert_eq!(driver.state().phase, GamePhase::GameOver);
    }

    #[test]
    fn test_clearing_last_brick_wins() {
        let mut driver = new_driver();
        let state = &mut driver.state;
        for id in state.arena.ids_of(EntityKind::Brick) {
            state.arena.remove(id);
        }
        state
            .arena
            .insert(Entity::Brick(Brick::new(Vec2::new(237.5, 150.0), 1, (3, 0))));

        driver.handle_input(InputEvent::Launch);
        let ball = driver.state.ball_mut().expect("ball");
        ball.pos = Vec2::new(230.0, 168.0);
        ball.direction = Vec2::new(1.0, -1.0);

        driver.advance(0);
        assert_eq!(driver.state().phase, GamePhase::Won);
        assert!(driver.canvas().texts().contains(&WIN_TEXT));
        assert_eq!(driver.canvas().find_with_tag("spark").len(), 10);

        // Only the spark expiry is left, and it still fires after the win
        assert_eq!(driver.timeline().pending(), 1);
        driver.advance(200);
        assert!(driver.canvas().find_with_tag("spark").is_empty());
        assert!(driver.is_idle());
    }

    #[test]
    fn test_same_seed_same_run() {
        let run = |seed: u64| {
            let settings = Settings {
                seed,
                ..Settings::default()
            };
            let scene = Scene::new(PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT);
            let mut driver = Driver::new(settings, scene);
            driver.handle_input(InputEvent::Launch);
            for _ in 0..200 {
                driver.advance(50);
                driver.handle_input(InputEvent::MoveLeft);
            }
            serde_json::to_string(driver.state()).expect("snapshot")
        };
        assert_eq!(run(7), run(7));
    }
}
