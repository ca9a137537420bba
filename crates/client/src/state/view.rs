//! The table view and the reconciliation rules that keep it consistent.
//!
//! Every mutation here is a pure state transition driven by one game event,
//! so replaying the same event twice leaves the view unchanged. The renderer
//! reads the view; it never writes it.

use pontoon_protocol::{ChatMessage, PlayerSnapshot, PlayerStatus, RoundResult};

/// Color of the room status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusColor {
    Green,
    Red,
    Yellow,
    Gray,
}

/// A hand value as the local player is allowed to see it.
///
/// Other players' values are concealed while they are still acting; our own
/// value is always shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayValue {
    Shown(i32),
    Hidden,
}

/// One player's block on the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerBlock {
    pub id: String,
    pub nickname: String,
    pub cards: Vec<String>,
    pub card_count: usize,
    pub hand_value: DisplayValue,
    pub status: PlayerStatus,
    pub status_color: String,
    pub is_self: bool,
}

/// The complete table view.
///
/// Fields are private so every mutation funnels through the `apply_*`
/// transitions below.
#[derive(Debug, Clone, Default)]
pub struct GameView {
    room_id: String,
    self_id: Option<String>,
    status_text: String,
    status_color: Option<StatusColor>,
    players: Vec<PlayerBlock>,
    chat: Vec<ChatMessage>,
    results: Vec<RoundResult>,
    controls_enabled: bool,
}

impl GameView {
    pub fn new(room_id: impl Into<String>) -> Self {
        Self {
            room_id: room_id.into(),
            ..Self::default()
        }
    }

    pub fn room_id(&self) -> &str {
        &self.room_id
    }

    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    pub fn status_color(&self) -> Option<StatusColor> {
        self.status_color
    }

    pub fn players(&self) -> &[PlayerBlock] {
        &self.players
    }

    pub fn chat(&self) -> &[ChatMessage] {
        &self.chat
    }

    pub fn results(&self) -> &[RoundResult] {
        &self.results
    }

    pub fn controls_enabled(&self) -> bool {
        self.controls_enabled
    }

    pub fn set_status(&mut self, text: impl Into<String>, color: StatusColor) {
        self.status_text = text.into();
        self.status_color = Some(color);
    }

    pub fn set_controls_enabled(&mut self, enabled: bool) {
        self.controls_enabled = enabled;
    }

    /// Record which roster id is ours. Re-marks existing blocks so a roster
    /// that arrived before the identity ack still ends up marked.
    pub fn set_self_id(&mut self, id: impl Into<String>) {
        let id = id.into();
        for block in &mut self.players {
            block.is_self = block.id == id;
            if block.is_self {
                // our own value is never concealed
                if let Some(shown) = block_value_if_hidden(block) {
                    block.hand_value = shown;
                }
            }
        }
        self.self_id = Some(id);
    }

    pub fn self_block(&self) -> Option<&PlayerBlock> {
        self.players.iter().find(|b| b.is_self)
    }

    /// Replace the whole roster with the pushed one, in server order.
    ///
    /// Nothing from the previous roster survives; applying the same push
    /// twice yields the same view.
    pub fn apply_roster(&mut self, players: Vec<PlayerSnapshot>) {
        self.players = players
            .into_iter()
            .map(|snapshot| self.block_from_snapshot(snapshot))
            .collect();
    }

    /// Replace one player's state.
    ///
    /// If no block carries the snapshot's id, the update lands on our own
    /// block instead: the content is replaced while the block keeps its id
    /// and self marker. A snapshot for an unknown player with no self block
    /// to fall back on is dropped.
    pub fn apply_update(&mut self, snapshot: PlayerSnapshot) {
        let block = self.block_from_snapshot(snapshot);

        if let Some(existing) = self.players.iter_mut().find(|b| b.id == block.id) {
            let is_self = existing.is_self;
            *existing = block;
            existing.is_self = is_self;
        } else if let Some(own) = self.players.iter_mut().find(|b| b.is_self) {
            let id = own.id.clone();
            *own = block;
            own.id = id;
            own.is_self = true;
            // the content is ours now, so the value is shown
            if let Some(shown) = block_value_if_hidden(own) {
                own.hand_value = shown;
            }
        } else {
            tracing::debug!(id = %block.id, "dropping update for unknown player");
            return;
        }

        // going bust ends our turn; lock the controls right away
        if self
            .self_block()
            .is_some_and(|b| b.status == PlayerStatus::Busted)
        {
            self.controls_enabled = false;
        }
    }

    /// The round is over: record the standings and lock the controls.
    pub fn apply_game_end(&mut self, results: Vec<RoundResult>) {
        self.results = results;
        self.controls_enabled = false;
    }

    pub fn push_chat(&mut self, message: ChatMessage) {
        self.chat.push(message);
    }

    fn block_from_snapshot(&self, snapshot: PlayerSnapshot) -> PlayerBlock {
        let is_self = self
            .self_id
            .as_deref()
            .is_some_and(|id| id == snapshot.id);

        // other players' totals stay concealed while they are still acting
        let hand_value = if !is_self && snapshot.status == PlayerStatus::Acting {
            DisplayValue::Hidden
        } else {
            DisplayValue::Shown(snapshot.hand_value)
        };

        PlayerBlock {
            id: snapshot.id,
            nickname: snapshot.nickname,
            cards: snapshot.cards,
            card_count: snapshot.card_count,
            hand_value,
            status: snapshot.status,
            status_color: snapshot.status_color,
            is_self,
        }
    }
}

fn block_value_if_hidden(block: &PlayerBlock) -> Option<DisplayValue> {
    match block.hand_value {
        DisplayValue::Hidden => Some(DisplayValue::Shown(hand_value_of(&block.cards))),
        DisplayValue::Shown(_) => None,
    }
}

/// Best-effort recomputation when a concealed value becomes ours to see.
///
/// The server sends authoritative values with every snapshot, so this only
/// covers the window between a late identity ack and the next push.
fn hand_value_of(cards: &[String]) -> i32 {
    let mut total = 0;
    let mut aces = 0;
    for (value, is_ace) in cards.iter().filter_map(|code| card_rank(code)) {
        total += value;
        aces += i32::from(is_ace);
    }
    while total > 21 && aces > 0 {
        total -= 10;
        aces -= 1;
    }
    total
}

fn card_rank(code: &str) -> Option<(i32, bool)> {
    let rank = code
        .strip_prefix("pk-")?
        .trim_start_matches(|c: char| c.is_ascii_lowercase());
    match rank {
        "A" => Some((11, true)),
        "J" | "Q" | "K" => Some((10, false)),
        _ => rank.parse::<i32>().ok().map(|v| (v, false)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(id: &str, status: PlayerStatus, hand_value: i32) -> PlayerSnapshot {
        PlayerSnapshot {
            id: id.to_string(),
            nickname: format!("nick-{id}"),
            cards: vec!["pk-heartA".to_string(), "pk-spade7".to_string()],
            card_count: 2,
            hand_value,
            status,
            status_color: "gray".to_string(),
        }
    }

    #[test]
    fn roster_replace_is_wholesale_and_idempotent() {
        let mut view = GameView::new("42");
        view.set_self_id("p1");

        view.apply_roster(vec![
            snapshot("p1", PlayerStatus::Waiting, 18),
            snapshot("p2", PlayerStatus::Waiting, 12),
        ]);
        assert_eq!(view.players().len(), 2);
        assert!(view.players()[0].is_self);
        assert!(!view.players()[1].is_self);

        // a smaller roster removes the vanished player entirely
        let push = vec![snapshot("p2", PlayerStatus::Waiting, 12)];
        view.apply_roster(push.clone());
        assert_eq!(view.players().len(), 1);
        assert_eq!(view.players()[0].id, "p2");

        let once = view.players().to_vec();
        view.apply_roster(push);
        assert_eq!(view.players(), once.as_slice());
    }

    #[test]
    fn acting_opponents_hand_value_is_concealed() {
        let mut view = GameView::new("42");
        view.set_self_id("p1");
        view.apply_roster(vec![
            snapshot("p1", PlayerStatus::Acting, 18),
            snapshot("p2", PlayerStatus::Acting, 12),
            snapshot("p3", PlayerStatus::Stood, 20),
        ]);

        assert_eq!(view.players()[0].hand_value, DisplayValue::Shown(18));
        assert_eq!(view.players()[1].hand_value, DisplayValue::Hidden);
        assert_eq!(view.players()[2].hand_value, DisplayValue::Shown(20));
    }

    #[test]
    fn update_replaces_the_matching_block_in_place() {
        let mut view = GameView::new("42");
        view.set_self_id("p1");
        view.apply_roster(vec![
            snapshot("p1", PlayerStatus::Acting, 18),
            snapshot("p2", PlayerStatus::Acting, 12),
        ]);

        view.apply_update(snapshot("p2", PlayerStatus::Stood, 19));

        assert_eq!(view.players().len(), 2);
        let p2 = &view.players()[1];
        assert_eq!(p2.status, PlayerStatus::Stood);
        assert_eq!(p2.hand_value, DisplayValue::Shown(19));
        assert!(!p2.is_self);
    }

    #[test]
    fn update_for_unknown_player_falls_back_to_our_block() {
        let mut view = GameView::new("42");
        view.set_self_id("p1");
        view.apply_roster(vec![snapshot("p1", PlayerStatus::Acting, 18)]);

        // the server re-keyed us; the content lands on our block but the
        // block keeps its id and self marker
        view.apply_update(snapshot("p9", PlayerStatus::Stood, 21));

        assert_eq!(view.players().len(), 1);
        let own = view.self_block().unwrap();
        assert_eq!(own.id, "p1");
        assert!(own.is_self);
        assert_eq!(own.status, PlayerStatus::Stood);
        assert_eq!(own.hand_value, DisplayValue::Shown(21));
    }

    #[test]
    fn update_with_no_possible_target_is_dropped() {
        let mut view = GameView::new("42");
        view.apply_roster(vec![snapshot("p2", PlayerStatus::Waiting, 10)]);

        let before = view.players().to_vec();
        view.apply_update(snapshot("p9", PlayerStatus::Stood, 21));
        assert_eq!(view.players(), before.as_slice());
    }

    #[test]
    fn busting_locks_the_controls() {
        let mut view = GameView::new("42");
        view.set_self_id("p1");
        view.set_controls_enabled(true);
        view.apply_roster(vec![
            snapshot("p1", PlayerStatus::Acting, 18),
            snapshot("p2", PlayerStatus::Acting, 12),
        ]);

        // an opponent busting changes nothing for us
        view.apply_update(snapshot("p2", PlayerStatus::Busted, 25));
        assert!(view.controls_enabled());

        view.apply_update(snapshot("p1", PlayerStatus::Busted, 24));
        assert!(!view.controls_enabled());
    }

    #[test]
    fn game_end_locks_the_controls_and_records_results() {
        let mut view = GameView::new("42");
        view.set_controls_enabled(true);

        view.apply_game_end(vec![RoundResult {
            player_id: Some("p1".to_string()),
            nickname: "ada".to_string(),
            score: 20,
            status: PlayerStatus::Stood,
            is_winner: true,
        }]);

        assert!(!view.controls_enabled());
        assert_eq!(view.results().len(), 1);
        assert!(view.results()[0].is_winner);
    }

    #[test]
    fn late_identity_ack_marks_the_existing_roster() {
        let mut view = GameView::new("42");
        view.apply_roster(vec![
            snapshot("p1", PlayerStatus::Acting, 18),
            snapshot("p2", PlayerStatus::Waiting, 12),
        ]);
        // roster arrived first; nothing is marked and our value is concealed
        assert!(view.self_block().is_none());
        assert_eq!(view.players()[0].hand_value, DisplayValue::Hidden);

        view.set_self_id("p1");

        let own = view.self_block().unwrap();
        assert_eq!(own.id, "p1");
        // concealed no longer: recomputed from the visible cards (A + 7)
        assert_eq!(own.hand_value, DisplayValue::Shown(18));
    }

    #[test]
    fn chat_appends_in_arrival_order() {
        let mut view = GameView::new("42");
        for text in ["first", "second"] {
            view.push_chat(ChatMessage {
                player_id: Some("p1".to_string()),
                nickname: "ada".to_string(),
                message: text.to_string(),
            });
        }
        let lines: Vec<_> = view.chat().iter().map(|c| c.message.as_str()).collect();
        assert_eq!(lines, ["first", "second"]);
    }

    #[test]
    fn hand_values_recompute_with_soft_aces() {
        assert_eq!(hand_value_of(&["pk-heartA".into(), "pk-spade7".into()]), 18);
        assert_eq!(
            hand_value_of(&[
                "pk-heartA".into(),
                "pk-spadeA".into(),
                "pk-club9".into()
            ]),
            21
        );
        assert_eq!(
            hand_value_of(&["pk-heartK".into(), "pk-spadeQ".into(), "pk-club5".into()]),
            25
        );
        // concealed opponent cards contribute nothing
        assert_eq!(hand_value_of(&["pk-hide".into(), "pk-hide".into()]), 0);
    }
}
