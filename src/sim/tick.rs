//! Fixed timestep simulation tick
//!
//! Core game loop step plus the input handlers that run between ticks.

use super::body::BodyId;
use super::collision::{coin_caught, resolve_bounce};
use super::entity::{CoinStep, Entity, EntityKind};
use super::state::{GamePhase, GameState};

/// Discrete player input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    MoveLeft,
    MoveRight,
    /// Serve the ball (only honoured during Setup)
    Launch,
}

/// Apply one input event to the game
///
/// Paddle movement is accepted in every phase. Returns whether the event
/// changed anything.
pub fn apply_input(state: &mut GameState, input: InputEvent) -> bool {
    match input {
        InputEvent::MoveLeft => state.move_paddle(-state.settings.paddle_step),
        InputEvent::MoveRight => state.move_paddle(state.settings.paddle_step),
        InputEvent::Launch => state.launch(),
    }
}

/// Advance the game by one tick
///
/// Collisions are resolved against the positions from the previous tick,
/// then terminal conditions are checked, and only then do the ball and
/// coins move. Does nothing unless the game is running.
pub fn tick(state: &mut GameState) {
    if state.phase != GamePhase::Running {
        return;
    }
    state.time_ticks += 1;

    resolve_ball_collisions(state);
    catch_coins(state);

    let height = state.playfield().y;
    let ball_on_floor = state
        .ball_bounds()
        .is_some_and(|bounds| bounds.bottom() >= height);

    if state.brick_count() == 0 {
        state.win();
    } else if ball_on_floor {
        state.lose_ball();
    } else {
        let width = state.playfield().x;
        if let Some(ball) = state.ball_mut() {
            ball.update(width);
        }
        advance_coins(state);
    }
}

/// Bounce the ball off whatever it touches and damage touched bricks
fn resolve_ball_collisions(state: &mut GameState) {
    let Some(ball_id) = state.ball_id else {
        return;
    };
    let Some(ball_bounds) = state.ball_bounds() else {
        return;
    };

    let touching = state.arena.overlapping(&ball_bounds, ball_id);
    let boxes: Vec<_> = touching
        .iter()
        .filter_map(|id| state.arena.get(*id))
        .map(Entity::bounds)
        .collect();

    let bounce = resolve_bounce(ball_bounds.center().x, &boxes);
    if let Some(ball) = state.ball_mut() {
        bounce.apply(&mut ball.direction);
    }

    let bricks: Vec<BodyId> = touching
        .into_iter()
        .filter(|id| {
            state
                .arena
                .get(*id)
                .is_some_and(|e| e.kind() == EntityKind::Brick)
        })
        .collect();
    for id in bricks {
        state.hit_brick(id);
    }
}

/// Score every coin the paddle is catching
fn catch_coins(state: &mut GameState) {
    let paddle = state.paddle().bounds();
    let caught: Vec<BodyId> = state
        .arena
        .iter()
        .filter_map(|(id, e)| e.as_coin().map(|coin| (id, coin.bounds())))
        .filter(|(_, coin)| coin_caught(&paddle, coin))
        .map(|(id, _)| id)
        .collect();
    for id in caught {
        state.collect_coin(id);
    }
}

/// Let every coin fall one step, dropping those that leave the playfield
fn advance_coins(state: &mut GameState) {
    let height = state.playfield().y;
    let mut fell = Vec::new();
    for id in state.arena.ids_of(EntityKind::Coin) {
        let step = state
            .arena
            .get_mut(id)
            .and_then(Entity::as_coin_mut)
            .map(|coin| coin.update(height));
        if step == Some(CoinStep::Fell) {
            fell.push(id);
        }
    }
    for id in fell {
        state.drop_coin(id);
    }
}
