use super::element::Element;
use rand::{thread_rng, Rng};
use serde::Deserialize;

pub const DEFAULT_SPEED: f32 = 1.5;
pub const DEFAULT_FIELD_POS: (f32, f32) = (100.0, 200.0);
pub const DEFAULT_HOSTILE_Y: f32 = 100.0;
pub const HOSTILE_SPAWN_X: std::ops::Range<f32> = 50.0..750.0;
/// Entity coordinates are kept within this distance of the origin so pixel math stays in `i32`.
pub const COORD_LIMIT: f32 = 10_000.0;

/// A card as the server sends it. Every field is optional on the wire.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct CardPayload {
    pub id: i64,
    pub name: String,
    pub element: Option<Element>,
    pub health: f32,
    pub attack: f32,
    pub speed: Option<f32>,
}

/// A field creature or hostile as the server sends it.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct EntityPayload {
    pub id: i64,
    pub name: String,
    pub element: Option<Element>,
    pub health: f32,
    pub current_health: Option<f32>,
    pub attack: f32,
    pub speed: Option<f32>,
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub is_moving: Option<bool>,
    pub target: Option<i64>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct SnapshotPayload {
    pub player_health: Option<i32>,
    pub player_level: Option<i32>,
    pub player_exp: Option<i32>,
    pub player_max_exp: Option<i32>,
    pub pokeballs: Option<i32>,
    pub wave: Option<i32>,
    pub score: Option<i32>,
    pub hand: Option<Vec<CardPayload>>,
    pub field: Option<Vec<EntityPayload>>,
    pub enemies: Option<Vec<EntityPayload>>,
    pub game_over: Option<bool>,
    pub victory: Option<bool>,
    pub player_base_y: Option<f32>,
    pub enemy_base_y: Option<f32>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(from = "CardPayload")]
pub struct Card {
    pub id: i64,
    pub name: String,
    pub element: Element,
    pub health: f32,
    pub attack: f32,
    pub speed: f32,
}

impl From<CardPayload> for Card {
    fn from(card: CardPayload) -> Self {
        Self {
            id: card.id,
            name: card.name,
            element: card.element.unwrap_or_default(),
            health: card.health,
            attack: card.attack,
            speed: card.speed.unwrap_or(DEFAULT_SPEED),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Creature {
    pub id: i64,
    pub name: String,
    pub element: Element,
    pub x: f32,
    pub y: f32,
    pub current_health: f32,
    pub max_health: f32,
    pub attack: f32,
    pub speed: f32,
    pub is_moving: bool,
    pub target: Option<i64>,
}

impl Creature {
    fn from_payload(entity: EntityPayload, (x, y): (f32, f32)) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            element: entity.element.unwrap_or_default(),
            x: entity.x.unwrap_or(x).clamp(-COORD_LIMIT, COORD_LIMIT),
            y: entity.y.unwrap_or(y).clamp(-COORD_LIMIT, COORD_LIMIT),
            current_health: entity.current_health.unwrap_or(entity.health),
            max_health: entity.health,
            attack: entity.attack,
            speed: entity.speed.unwrap_or(DEFAULT_SPEED),
            is_moving: entity.is_moving.unwrap_or(false),
            target: entity.target,
        }
    }

    /// Fill fraction of the health bar, clamped to `[0, 1]`.
    pub fn health_fraction(&self) -> f32 {
        if self.max_health <= 0.0 {
            return 0.0;
        }
        (self.current_health / self.max_health).clamp(0.0, 1.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub player_health: i32,
    pub player_level: i32,
    pub player_exp: i32,
    pub player_max_exp: i32,
    pub pokeballs: i32,
    pub wave: i32,
    pub score: i32,
    pub hand: Vec<Card>,
    pub field: Vec<Creature>,
    pub enemies: Vec<Creature>,
    pub game_over: bool,
    pub victory: bool,
    pub player_base_y: Option<f32>,
    pub enemy_base_y: Option<f32>,
}

impl GameState {
    pub fn from_payload(payload: SnapshotPayload, rng: &mut impl Rng) -> Self {
        let field = payload
            .field
            .unwrap_or_default()
            .into_iter()
            .map(|entity| Creature::from_payload(entity, DEFAULT_FIELD_POS))
            .collect();
        let enemies = payload
            .enemies
            .unwrap_or_default()
            .into_iter()
            .map(|entity| {
                let x = rng.gen_range(HOSTILE_SPAWN_X);
                Creature::from_payload(entity, (x, DEFAULT_HOSTILE_Y))
            })
            .collect();
        Self {
            player_health: payload.player_health.unwrap_or(100),
            player_level: payload.player_level.unwrap_or(1),
            player_exp: payload.player_exp.unwrap_or(0),
            player_max_exp: payload.player_max_exp.unwrap_or(100),
            pokeballs: payload.pokeballs.unwrap_or(0),
            wave: payload.wave.unwrap_or(1),
            score: payload.score.unwrap_or(0),
            hand: payload.hand.unwrap_or_default().into_iter().map(Card::from).collect(),
            field,
            enemies,
            game_over: payload.game_over.unwrap_or(false),
            victory: payload.victory.unwrap_or(false),
            player_base_y: payload.player_base_y,
            enemy_base_y: payload.enemy_base_y,
        }
    }

    pub fn hostile(&self, id: i64) -> Option<&Creature> {
        self.enemies.iter().find(|enemy| enemy.id == id)
    }

    pub fn waves_completed(&self) -> i32 {
        (self.wave - 1).max(0)
    }

    pub fn enemies_defeated(&self) -> i32 {
        self.score.max(0) / 10
    }
}

impl From<SnapshotPayload> for GameState {
    fn from(payload: SnapshotPayload) -> Self {
        GameState::from_payload(payload, &mut thread_rng())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn parse(json: &str) -> GameState {
        let payload: SnapshotPayload = serde_json::from_str(json).unwrap();
        GameState::from_payload(payload, &mut StdRng::seed_from_u64(7))
    }

    #[test]
    fn parses_a_server_snapshot() {
        let state = parse(
            r#"{
                "player_health": 80, "player_level": 2, "player_exp": 4, "player_max_exp": 120,
                "pokeballs": 3, "wave": 2, "score": 45, "game_over": false, "victory": false,
                "player_base_y": 450, "enemy_base_y": 100,
                "hand": [{"id": 101, "name": "Pikachu", "element": "electric", "health": 45, "attack": 18, "speed": 2.5}],
                "field": [{"id": 1, "name": "Charmander", "element": "fire", "health": 60, "attack": 12,
                           "x": 300, "y": 350, "current_health": 42.5, "is_moving": true, "target": 3,
                           "attack_cooldown": 0, "attack_range": 120, "speed": 2.0}],
                "enemies": [{"id": 3, "name": "Zubat", "element": "poison", "health": 40, "attack": 13,
                             "speed": 52, "x": 310.0, "y": 180.5, "current_health": 10}]
            }"#,
        );
        assert_eq!(state.player_max_exp, 120);
        assert_eq!(state.hand[0].element, Element::Electric);
        assert_eq!(state.hand[0].speed, 2.5);
        let charmander = &state.field[0];
        assert!(charmander.is_moving);
        assert_eq!(charmander.target, Some(3));
        assert_eq!(charmander.current_health, 42.5);
        assert_eq!(state.hostile(3).map(|zubat| zubat.y), Some(180.5));
        assert_eq!(state.player_base_y, Some(450.0));
    }

    #[test]
    fn zubat_health_bar_is_a_quarter_full() {
        let state = parse(r#"{"enemies": [{"id": 0, "name": "Zubat", "current_health": 10, "health": 40}]}"#);
        assert_eq!(state.enemies[0].health_fraction(), 0.25);
    }

    #[test]
    fn missing_current_health_means_full_health() {
        let state = parse(r#"{"field": [{"id": 1, "name": "Squirtle", "health": 70}]}"#);
        assert_eq!(state.field[0].current_health, 70.0);
        assert_eq!(state.field[0].health_fraction(), 1.0);
    }

    #[test]
    fn health_fraction_is_clamped() {
        let state = parse(
            r#"{"field": [
                {"id": 1, "name": "Buffed", "health": 50, "current_health": 80},
                {"id": 2, "name": "Overkilled", "health": 50, "current_health": -12},
                {"id": 3, "name": "Broken", "health": 0, "current_health": 5}
            ]}"#,
        );
        assert_eq!(state.field[0].health_fraction(), 1.0);
        assert_eq!(state.field[1].health_fraction(), 0.0);
        assert_eq!(state.field[2].health_fraction(), 0.0);
    }

    #[test]
    fn defaults_are_applied_at_the_boundary() {
        let state = parse(
            r#"{
                "hand": [{"id": 5, "name": "Mystery", "health": 10, "attack": 1}],
                "field": [{"id": 1, "name": "Bulbasaur", "health": 65}],
                "enemies": [{"id": 9, "name": "Geodude", "health": 46}]
            }"#,
        );
        assert_eq!(state.player_level, 1);
        assert_eq!(state.player_max_exp, 100);
        assert_eq!(state.wave, 1);
        assert_eq!(state.pokeballs, 0);
        assert!(!state.game_over);
        assert_eq!(state.hand[0].speed, DEFAULT_SPEED);
        assert_eq!(state.hand[0].element, Element::Normal);
        let bulbasaur = &state.field[0];
        assert_eq!((bulbasaur.x, bulbasaur.y), DEFAULT_FIELD_POS);
        assert!(!bulbasaur.is_moving);
        let geodude = &state.enemies[0];
        assert_eq!(geodude.y, DEFAULT_HOSTILE_Y);
        assert!(HOSTILE_SPAWN_X.contains(&geodude.x));
    }

    #[test]
    fn wild_coordinates_are_clamped() {
        let state = parse(
            r#"{
                "field": [{"id": 1, "name": "Psyduck", "health": 50, "x": 1e30, "y": -1e30}],
                "enemies": [{"id": 2, "name": "Spearow", "health": 30, "x": -3.5e12, "y": 250}]
            }"#,
        );
        assert_eq!((state.field[0].x, state.field[0].y), (COORD_LIMIT, -COORD_LIMIT));
        assert_eq!((state.enemies[0].x, state.enemies[0].y), (-COORD_LIMIT, 250.0));
    }

    #[test]
    fn end_game_statistics() {
        let state = parse(r#"{"wave": 4, "score": 95}"#);
        assert_eq!(state.waves_completed(), 3);
        assert_eq!(state.enemies_defeated(), 9);
        let fresh = parse("{}");
        assert_eq!(fresh.waves_completed(), 0);
        assert!(fresh.hand.is_empty());
    }
}
