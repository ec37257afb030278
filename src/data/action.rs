use super::state::Card;
use serde::{Deserialize, Serialize};

/// Body of `POST /game/action`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "action_type", content = "data", rename_all = "snake_case")]
pub enum GameAction {
    OpenPokeball,
    PlayCard { card_id: i64, x: i32, y: i32 },
}

impl GameAction {
    pub fn play_card(card_id: i64, x: f32, y: f32) -> Self {
        GameAction::PlayCard {
            card_id,
            x: x.round() as i32,
            y: y.round() as i32,
        }
    }
}

/// Reply to `POST /game/action`. The server reports rejections as `{"error": ...}` alone.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ActionResponse {
    pub success: bool,
    pub pokemon: Option<Card>,
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn open_pokeball_has_no_data() {
        let body = serde_json::to_value(GameAction::OpenPokeball).unwrap();
        assert_eq!(body, json!({"action_type": "open_pokeball"}));
    }

    #[test]
    fn play_card_rounds_coordinates() {
        let action = GameAction::play_card(101, 310.6, 249.4);
        let body = serde_json::to_value(action).unwrap();
        assert_eq!(
            body,
            json!({"action_type": "play_card", "data": {"card_id": 101, "x": 311, "y": 249}})
        );
    }

    #[test]
    fn rejection_without_success_flag_is_a_failure() {
        let response: ActionResponse = serde_json::from_str(r#"{"error": "Position already occupied"}"#).unwrap();
        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some("Position already occupied"));
    }

    #[test]
    fn pokeball_reply_carries_the_new_card() {
        let response: ActionResponse = serde_json::from_str(
            r#"{"success": true, "pokemon": {"id": 102, "name": "Abra", "element": "psychic", "health": 40, "attack": 20, "speed": 1.8}}"#,
        )
        .unwrap();
        assert!(response.success);
        assert_eq!(response.pokemon.map(|card| card.name), Some("Abra".to_string()));
    }
}
