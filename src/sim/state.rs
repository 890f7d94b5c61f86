//! Game state and core simulation types
//!
//! `GameState` owns every entity and is the only place lives and score
//! change.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::body::{Aabb, BodyId};
use super::entity::{Ball, Brick, BrickHit, Coin, Entity, EntityKind, Paddle};
use crate::Settings;
use crate::consts::*;

/// Current phase of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball resting on the paddle, waiting for launch input
    Setup,
    /// Tick loop active
    Running,
    /// Ball lost with lives to spare, waiting for the next serve
    RoundLost,
    /// Every brick cleared
    Won,
    /// Ball lost with no lives left
    GameOver,
}

impl GamePhase {
    /// Won and GameOver end the game for good
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::Won | GamePhase::GameOver)
    }
}

/// Notable things that happened during input handling or a tick
///
/// Drained by the driver to schedule follow-up timers and for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Launched,
    BrickDamaged { brick: BodyId, remaining: u8 },
    BrickDestroyed { brick: BodyId, coin: BodyId, burst: u32 },
    CoinCaught { coin: BodyId },
    CoinLost { coin: BodyId },
    /// Ball reached the floor; `lives` is what remains
    BallLost { lives: u8 },
    RoundReset,
    Won,
    GameOver,
}

/// A visual-only spark from a brick breaking
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spark {
    pub burst: u32,
    pub pos: Vec2,
}

/// RNG state wrapper for serialization
///
/// Each spark burst draws from its own PCG stream so that runs with the same
/// seed produce the same sparks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    /// RNG for the next burst, advancing the stream
    pub fn next_rng(&mut self) -> Pcg32 {
        let rng = Pcg32::new(self.seed, self.stream);
        self.stream += 1;
        rng
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub settings: Settings,
    pub rng_state: RngState,
    pub lives: u8,
    pub score: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub arena: Arena,
    pub paddle_id: BodyId,
    /// Current ball, if one has been served
    pub ball_id: Option<BodyId>,
    /// Visual particles (not gameplay-affecting)
    ///
    /// Bursts are only removed by `expire_sparks`; without a driver
    /// scheduling expiry they accumulate.
    #[serde(skip)]
    pub sparks: Vec<Spark>,
    #[serde(skip)]
    events: Vec<GameEvent>,
    next_burst: u32,
}

impl GameState {
    /// Build the brick grid and serve the first ball
    pub fn new(settings: Settings) -> Self {
        let mut arena = Arena::new();
        let paddle_id = arena.insert(Entity::Paddle(Paddle::new(Vec2::new(
            PLAYFIELD_WIDTH / 2.0,
            PADDLE_Y,
        ))));

        let mut state = Self {
            rng_state: RngState::new(settings.seed),
            lives: STARTING_LIVES,
            score: 0,
            time_ticks: 0,
            phase: GamePhase::Setup,
            arena,
            paddle_id,
            ball_id: None,
            sparks: Vec::new(),
            events: Vec::new(),
            next_burst: 0,
            settings,
        };

        state.spawn_brick_grid();
        log::info!(
            "New game: {} playfield, {} bricks",
            state.playfield(),
            state.brick_count()
        );
        state.setup_round();
        state
    }

    /// Playfield size, fixed for every game
    pub fn playfield(&self) -> Vec2 {
        Vec2::new(PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT)
    }

    /// One column per brick pitch, three rows with 3, 2 and 1 hits
    fn spawn_brick_grid(&mut self) {
        let mut column = 0;
        let mut x = BRICK_GRID_MARGIN;
        while x < PLAYFIELD_WIDTH - BRICK_GRID_MARGIN {
            for (row, &(y, hits)) in BRICK_ROWS.iter().enumerate() {
                let center = Vec2::new(x + BRICK_WIDTH / 2.0, y);
                self.arena
                    .insert(Entity::Brick(Brick::new(center, hits, (column, row as u32))));
            }
            column += 1;
            x += BRICK_WIDTH;
        }
    }

    /// Replace the ball with a fresh one resting on the paddle
    pub fn setup_round(&mut self) {
        if let Some(old) = self.ball_id.take() {
            self.arena.remove(old);
        }

        let paddle_x = self.paddle().pos.x;
        let ball = Ball::new(Vec2::new(paddle_x, BALL_SERVE_Y), self.settings.ball_speed);
        let ball_id = self.arena.insert(Entity::Ball(ball));
        self.ball_id = Some(ball_id);
        if let Some(paddle) = self.paddle_mut() {
            paddle.held_ball = Some(ball_id);
        }

        if !matches!(self.phase, GamePhase::Setup) {
            self.push_event(GameEvent::RoundReset);
        }
        self.phase = GamePhase::Setup;
        log::info!("Serve: lives={} score={}", self.lives, self.score);
    }

    /// Release the held ball and start ticking
    ///
    /// Ignored outside of Setup. Returns whether the game started.
    pub fn launch(&mut self) -> bool {
        if self.phase != GamePhase::Setup {
            return false;
        }
        if let Some(paddle) = self.paddle_mut() {
            paddle.held_ball = None;
        }
        self.phase = GamePhase::Running;
        self.push_event(GameEvent::Launched);
        true
    }

    /// Shift the paddle, carrying a held ball along
    ///
    /// Out-of-bounds moves are dropped entirely.
    pub fn move_paddle(&mut self, offset: f32) -> bool {
        let width = self.playfield().x;
        let Some(paddle) = self.paddle_mut() else {
            return false;
        };
        if !paddle.move_by(offset, width) {
            return false;
        }
        if let Some(ball) = paddle.held_ball.and_then(|held| self.arena.get_mut(held)) {
            ball.translate(Vec2::new(offset, 0.0));
        }
        true
    }

    pub fn paddle(&self) -> &Paddle {
        self.arena
            .get(self.paddle_id)
            .and_then(Entity::as_paddle)
            .expect("paddle is never removed from the arena")
    }

    fn paddle_mut(&mut self) -> Option<&mut Paddle> {
        self.arena
            .get_mut(self.paddle_id)
            .and_then(Entity::as_paddle_mut)
    }

    pub fn ball(&self) -> Option<&Ball> {
        self.ball_id
            .and_then(|id| self.arena.get(id))
            .and_then(Entity::as_ball)
    }

    pub fn ball_mut(&mut self) -> Option<&mut Ball> {
        self.ball_id
            .and_then(|id| self.arena.get_mut(id))
            .and_then(Entity::as_ball_mut)
    }

    pub fn brick_count(&self) -> usize {
        self.arena.count(EntityKind::Brick)
    }

    pub fn coin_count(&self) -> usize {
        self.arena.count(EntityKind::Coin)
    }

    /// Damage a brick, breaking it into a coin and sparks at zero hits
    ///
    /// Returns `None` if `id` is not a live brick.
    pub fn hit_brick(&mut self, id: BodyId) -> Option<BrickHit> {
        let brick = self.arena.get_mut(id)?.as_brick_mut()?;
        let outcome = brick.hit();
        let bounds = brick.bounds();

        match outcome {
            BrickHit::Damaged { remaining } => {
                self.push_event(GameEvent::BrickDamaged {
                    brick: id,
                    remaining,
                });
            }
            BrickHit::Destroyed => {
                self.arena.remove(id);
                let coin = self.arena.insert(Entity::Coin(Coin::new(
                    bounds.bottom_center(),
                    self.settings.coin_fall_speed,
                )));
                let burst = self.spawn_sparks(bounds.center());
                log::debug!(
                    "Brick {:?} destroyed, {} left",
                    id,
                    self.brick_count()
                );
                self.push_event(GameEvent::BrickDestroyed {
                    brick: id,
                    coin,
                    burst,
                });
            }
        }
        Some(outcome)
    }

    fn spawn_sparks(&mut self, center: Vec2) -> u32 {
        let burst = self.next_burst;
        self.next_burst += 1;

        let mut rng = self.rng_state.next_rng();
        for _ in 0..SPARKS_PER_BURST {
            let offset = Vec2::new(
                rng.random_range(-SPARK_SPREAD..=SPARK_SPREAD) as f32,
                rng.random_range(-SPARK_SPREAD..=SPARK_SPREAD) as f32,
            );
            self.sparks.push(Spark {
                burst,
                pos: center + offset,
            });
        }
        burst
    }

    /// Drop the sparks of a finished burst
    pub fn expire_sparks(&mut self, burst: u32) {
        self.sparks.retain(|s| s.burst != burst);
    }

    /// Award a caught coin
    pub(crate) fn collect_coin(&mut self, id: BodyId) {
        if self.arena.remove(id).is_some() {
            self.score += 1;
            log::debug!("Coin {:?} caught, score={}", id, self.score);
            self.push_event(GameEvent::CoinCaught { coin: id });
        }
    }

    /// Remove a coin that fell off the playfield
    pub(crate) fn drop_coin(&mut self, id: BodyId) {
        if self.arena.remove(id).is_some() {
            self.push_event(GameEvent::CoinLost { coin: id });
        }
    }

    /// Stop the ball; end the game or wait for the next serve
    pub(crate) fn lose_ball(&mut self) {
        if let Some(ball) = self.ball_mut() {
            ball.stop();
        }
        match self.lives.checked_sub(1) {
            Some(lives) => {
                self.lives = lives;
                self.phase = GamePhase::RoundLost;
                log::info!("Ball lost, {} lives left", lives);
                self.push_event(GameEvent::BallLost { lives });
            }
            None => {
                self.phase = GamePhase::GameOver;
                log::info!("Game over, final score {}", self.score);
                self.push_event(GameEvent::GameOver);
            }
        }
    }

    /// Stop the ball after the last brick falls
    pub(crate) fn win(&mut self) {
        if let Some(ball) = self.ball_mut() {
            ball.stop();
        }
        self.phase = GamePhase::Won;
        log::info!("All bricks cleared, final score {}", self.score);
        self.push_event(GameEvent::Won);
    }

    pub fn ball_bounds(&self) -> Option<Aabb> {
        self.ball().map(Ball::bounds)
    }

    fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events recorded since the last drain
    ///
    /// Events queue up until drained. Callers stepping `sim::tick` directly
    /// instead of through `Driver` must drain regularly (and expire spark
    /// bursts) or both buffers grow for the life of the game.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_state() -> GameState {
        GameState::new(Settings::default())
    }

    #[test]
    fn test_initial_grid() {
        let state = new_state();
        assert_eq!(state.brick_count(), 24);
        assert_eq!(state.lives, STARTING_LIVES);
        assert_eq!(state.score, 0);
        assert_eq!(state.phase, GamePhase::Setup);
        assert_eq!(state.playfield(), Vec2::new(610.0, 400.0));

        let mut hits_by_row = [0u8; 3];
        for (_, entity) in state.arena.iter() {
            if let Entity::Brick(brick) = entity {
                hits_by_row[brick.slot.1 as usize] = brick.hits;
            }
        }
        assert_eq!(hits_by_row, [3, 2, 1]);

        // First column's left edge sits at the margin, last one ends at 605
        let lefts: Vec<f32> = state
            .arena
            .iter()
            .filter_map(|(_, e)| e.as_brick())
            .map(|b| b.bounds().left())
            .collect();
        assert_eq!(lefts.iter().cloned().fold(f32::MAX, f32::min), 5.0);
        assert_eq!(lefts.iter().cloned().fold(f32::MIN, f32::max), 530.0);
    }

    #[test]
    fn test_ball_served_on_paddle() {
        let state = new_state();
        let ball = state.ball().expect("ball");
        assert_eq!(ball.pos, Vec2::new(305.0, BALL_SERVE_Y));
        assert_eq!(state.paddle().held_ball, state.ball_id);
    }

    #[test]
    fn test_paddle_carries_held_ball() {
        let mut state = new_state();
        assert!(state.move_paddle(-10.0));
        assert_eq!(state.paddle().pos.x, 295.0);
        assert_eq!(state.ball().expect("ball").pos.x, 295.0);

        assert!(state.launch());
        assert!(state.move_paddle(-10.0));
        assert_eq!(state.paddle().pos.x, 285.0);
        assert_eq!(state.ball().expect("ball").pos.x, 295.0);
    }

    #[test]
    fn test_launch_only_from_setup() {
        let mut state = new_state();
        assert!(state.launch());
        assert_eq!(state.phase, GamePhase::Running);
        assert!(!state.launch());
        assert_eq!(state.drain_events(), vec![GameEvent::Launched]);
    }

    #[test]
    fn test_breaking_brick_drops_one_coin_at_bottom_center() {
        let mut state = new_state();
        let (id, bounds) = state
            .arena
            .iter()
            .find_map(|(id, e)| e.as_brick().filter(|b| b.hits == 1).map(|b| (id, b.bounds())))
            .expect("one-hit brick");

        assert_eq!(state.hit_brick(id), Some(BrickHit::Destroyed));
        assert!(!state.arena.contains(id));
        assert_eq!(state.brick_count(), 23);
        assert_eq!(state.coin_count(), 1);

        let coin = state
            .arena
            .iter()
            .find_map(|(_, e)| e.as_coin())
            .expect("coin");
        assert_eq!(coin.pos, bounds.bottom_center());
        assert_eq!(state.sparks.len(), SPARKS_PER_BURST);

        // Hitting a removed brick is a no-op, not a second destruction
        assert_eq!(state.hit_brick(id), None);
        assert_eq!(state.coin_count(), 1);
    }

    #[test]
    fn test_sparks_stay_near_brick_and_expire() {
        let mut state = new_state();
        let (id, center) = state
            .arena
            .iter()
            .find_map(|(id, e)| e.as_brick().filter(|b| b.hits == 1).map(|b| (id, b.pos)))
            .expect("one-hit brick");
        state.hit_brick(id);

        let burst = match state.drain_events().as_slice() {
            [GameEvent::BrickDestroyed { burst, .. }] => *burst,
            other => panic!("unexpected events {other:?}"),
        };
        for spark in &state.sparks {
            let offset = spark.pos - center;
            assert!(offset.x.abs() <= SPARK_SPREAD as f32);
            assert!(offset.y.abs() <= SPARK_SPREAD as f32);
        }
        state.expire_sparks(burst);
        assert!(state.sparks.is_empty());
    }

    #[test]
    fn test_spark_positions_follow_seed() {
        let burst_of = |seed: u64| {
            let mut state = GameState::new(Settings {
                seed,
                ..Settings::default()
            });
            let id = state
                .arena
                .iter()
                .find_map(|(id, e)| e.as_brick().filter(|b| b.slot == (2, 2)).map(|_| id))
                .expect("brick in column 2, row 2");
            state.hit_brick(id);
            state.sparks.iter().map(|s| s.pos).collect::<Vec<_>>()
        };

        let first = burst_of(7);
        assert_eq!(first.len(), SPARKS_PER_BURST);
        assert_eq!(first, burst_of(7));
        assert_ne!(first, burst_of(8));
    }

    #[test]
    fn test_events_and_sparks_accumulate_until_cleared() {
        let mut state = new_state();
        let one_hit: Vec<BodyId> = state
            .arena
            .iter()
            .filter_map(|(id, e)| e.as_brick().filter(|b| b.hits == 1).map(|_| id))
            .take(2)
            .collect();
        for id in &one_hit {
            state.hit_brick(*id);
        }
        assert_eq!(state.sparks.len(), 2 * SPARKS_PER_BURST);

        let bursts: Vec<u32> = state
            .drain_events()
            .into_iter()
            .filter_map(|event| match event {
                GameEvent::BrickDestroyed { burst, .. } => Some(burst),
                _ => None,
            })
            .collect();
        assert_eq!(bursts, vec![0, 1]);
        assert!(state.drain_events().is_empty());

        for burst in bursts {
            state.expire_sparks(burst);
        }
        assert!(state.sparks.is_empty());
    }

    #[test]
    fn test_lives_floor_ends_game() {
        let mut state = new_state();
        for expected in [2, 1, 0] {
            state.launch();
            state.lose_ball();
            assert_eq!(state.phase, GamePhase::RoundLost);
            assert_eq!(state.lives, expected);
            state.setup_round();
        }
        state.launch();
        state.lose_ball();
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.lives, 0);
    }

    #[test]
    fn test_setup_replaces_ball() {
        let mut state = new_state();
        let first = state.ball_id.expect("ball");
        state.launch();
        state.lose_ball();
        state.setup_round();
        let second = state.ball_id.expect("ball");
        assert_ne!(first, second);
        assert!(!state.arena.contains(first));
        assert_eq!(state.arena.count(EntityKind::Ball), 1);
    }
}
