//! Mirrors game state onto a canvas
//!
//! Keeps one canvas primitive per arena body and moves it to follow the
//! entity, plus the HUD and banner text.

use std::collections::BTreeMap;

use glam::Vec2;

use super::vertex::{Color, colors};
use super::{Canvas, PrimitiveId};
use crate::consts::SPARK_SIZE;
use crate::sim::{Aabb, BodyId, Entity, GamePhase, GameState};

pub const PROMPT_TEXT: &str = "Press Space to start";
pub const WIN_TEXT: &str = "You win! You are the Breaker of Bricks.";
pub const LOSE_TEXT: &str = "You Lose! Game Over!";

const BANNER_ANCHOR: Vec2 = Vec2::new(300.0, 200.0);
const BANNER_SIZE: u32 = 50;
const LIVES_ANCHOR: Vec2 = Vec2::new(50.0, 20.0);
const SCORE_ANCHOR: Vec2 = Vec2::new(200.0, 20.0);
const HUD_SIZE: u32 = 15;

/// Canvas-side bookkeeping for one game
#[derive(Debug, Default)]
pub struct View {
    bodies: BTreeMap<BodyId, PrimitiveId>,
    sparks: Vec<PrimitiveId>,
    lives_text: Option<PrimitiveId>,
    score_text: Option<PrimitiveId>,
    banner: Option<(PrimitiveId, &'static str)>,
}

fn entity_style(entity: &Entity) -> (Color, &'static str) {
    match entity {
        Entity::Ball(_) => (colors::BALL, "ball"),
        Entity::Paddle(_) => (colors::PADDLE, "paddle"),
        Entity::Brick(brick) => (colors::brick(brick.hits), "brick"),
        Entity::Coin(_) => (colors::COIN, "coin"),
    }
}

fn banner_for(phase: GamePhase) -> Option<&'static str> {
    match phase {
        GamePhase::Setup => Some(PROMPT_TEXT),
        GamePhase::Won => Some(WIN_TEXT),
        GamePhase::GameOver => Some(LOSE_TEXT),
        GamePhase::Running | GamePhase::RoundLost => None,
    }
}

impl View {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canvas primitive drawing `body`, if any
    pub fn primitive_for(&self, body: BodyId) -> Option<PrimitiveId> {
        self.bodies.get(&body).copied()
    }

    /// Bring the canvas up to date with `state`
    pub fn render(&mut self, canvas: &mut dyn Canvas, state: &GameState) {
        self.sync_bodies(canvas, state);
        self.sync_sparks(canvas, state);
        self.sync_hud(canvas, state);
        self.sync_banner(canvas, state.phase);
    }

    fn sync_bodies(&mut self, canvas: &mut dyn Canvas, state: &GameState) {
        // Drop primitives whose bodies are gone
        self.bodies.retain(|body, prim| {
            let alive = state.arena.contains(*body);
            if !alive {
                canvas.delete(*prim);
            }
            alive
        });

        for (body, entity) in state.arena.iter() {
            let bounds = entity.bounds();
            let (fill, tag) = entity_style(entity);
            match self.bodies.get(&body) {
                Some(&prim) => {
                    if let Some(current) = canvas.coords(prim) {
                        let delta = bounds.min - current.min;
                        if delta != Vec2::ZERO {
                            canvas.move_by(prim, delta);
                        }
                    }
                    if matches!(entity, Entity::Brick(_)) {
                        canvas.set_fill(prim, fill);
                    }
                }
                None => {
                    let prim = if entity.shape().is_round() {
                        canvas.create_oval(bounds, fill, Some(tag))
                    } else {
                        canvas.create_rectangle(bounds, fill, Some(tag))
                    };
                    self.bodies.insert(body, prim);
                }
            }
        }
    }

    fn sync_sparks(&mut self, canvas: &mut dyn Canvas, state: &GameState) {
        for prim in self.sparks.drain(..) {
            canvas.delete(prim);
        }
        for spark in &state.sparks {
            let bounds = Aabb::from_center(spark.pos, Vec2::splat(SPARK_SIZE));
            self.sparks
                .push(canvas.create_oval(bounds, colors::SPARK, Some("spark")));
        }
    }

    fn sync_hud(&mut self, canvas: &mut dyn Canvas, state: &GameState) {
        let lives = format!("Lives: {}", state.lives);
        let score = format!("Score: {}", state.score);
        update_text(canvas, &mut self.lives_text, LIVES_ANCHOR, &lives);
        update_text(canvas, &mut self.score_text, SCORE_ANCHOR, &score);
    }

    fn sync_banner(&mut self, canvas: &mut dyn Canvas, phase: GamePhase) {
        let wanted = banner_for(phase);
        if self.banner.map(|(_, text)| text) == wanted {
            return;
        }
        if let Some((prim, _)) = self.banner.take() {
            canvas.delete(prim);
        }
        if let Some(text) = wanted {
            let prim = canvas.create_text(BANNER_ANCHOR, text, BANNER_SIZE, Some("banner"));
            self.banner = Some((prim, text));
        }
    }
}

fn update_text(canvas: &mut dyn Canvas, slot: &mut Option<PrimitiveId>, anchor: Vec2, text: &str) {
    match *slot {
        Some(prim) => canvas.set_text(prim, text),
        None => *slot = Some(canvas.create_text(anchor, text, HUD_SIZE, Some("hud"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Settings;
    use crate::consts::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};
    use crate::renderer::Scene;
    use crate::sim::{EntityKind, InputEvent, apply_input};

    fn setup() -> (GameState, Scene, View) {
        let settings = Settings::default();
        let scene = Scene::new(PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT);
        (GameState::new(settings), scene, View::new())
    }

    #[test]
    fn test_initial_frame() {
        let (state, mut scene, mut view) = setup();
        view.render(&mut scene, &state);

        assert_eq!(scene.find_with_tag("brick").len(), 24);
        assert_eq!(scene.find_with_tag("paddle").len(), 1);
        assert_eq!(scene.find_with_tag("ball").len(), 1);
        assert_eq!(scene.texts(), vec!["Lives: 3", "Score: 0", PROMPT_TEXT]);
    }

    #[test]
    fn test_primitives_follow_entities() {
        let (mut state, mut scene, mut view) = setup();
        view.render(&mut scene, &state);

        apply_input(&mut state, InputEvent::MoveLeft);
        view.render(&mut scene, &state);

        let ball = state.ball_id.expect("ball");
        let prim = view.primitive_for(ball).expect("ball primitive");
        assert_eq!(scene.coords(prim), state.ball_bounds());

        let paddle = view.primitive_for(state.paddle_id).expect("paddle primitive");
        assert_eq!(scene.coords(paddle), Some(state.paddle().bounds()));
    }

    #[test]
    fn test_brick_recolors_and_disappears() {
        let (mut state, mut scene, mut view) = setup();
        view.render(&mut scene, &state);

        let brick = state
            .arena
            .iter()
            .find_map(|(id, e)| e.as_brick().filter(|b| b.hits == 2).map(|_| id))
            .expect("two-hit brick");
        let prim = view.primitive_for(brick).expect("brick primitive");
        assert_eq!(scene.get(prim).map(|p| p.fill), Some(colors::BRICK_TWO_HITS));

        state.hit_brick(brick);
        view.render(&mut scene, &state);
        assert_eq!(scene.get(prim).map(|p| p.fill), Some(colors::BRICK_ONE_HIT));

        state.hit_brick(brick);
        view.render(&mut scene, &state);
        assert!(scene.get(prim).is_none());
        assert_eq!(scene.find_with_tag("coin").len(), 1);
        assert_eq!(scene.find_with_tag("spark").len(), crate::consts::SPARKS_PER_BURST);
        assert_eq!(state.arena.count(EntityKind::Coin), 1);
    }

    #[test]
    fn test_banner_follows_phase() {
        let (mut state, mut scene, mut view) = setup();
        view.render(&mut scene, &state);
        assert!(scene.texts().contains(&PROMPT_TEXT));

        state.launch();
        view.render(&mut scene, &state);
        assert_eq!(scene.find_with_tag("banner").len(), 0);
    }

    #[test]
    fn test_canvas_overlap_matches_arena() {
        let (state, mut scene, mut view) = setup();
        view.render(&mut scene, &state);

        // The held ball sits just above the paddle; query the paddle's box
        let paddle = state.paddle().bounds();
        let found = scene.find_overlapping(&paddle);
        let paddle_prim = view.primitive_for(state.paddle_id).expect("paddle primitive");
        assert!(found.contains(&paddle_prim));
        assert!(scene.find_with_tag("brick").iter().all(|b| !found.contains(b)));
    }
}
