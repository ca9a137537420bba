//! Pure rendering: a [`GameView`] in, printable lines out.
//!
//! Keeping this free of any terminal handle makes the layout testable and
//! means redrawing the same view always prints the same thing.

use pontoon_protocol::HIDDEN_CARD;

use crate::state::{DisplayValue, GameView, PlayerBlock};

/// Index of the status line within the rendered output.
pub const STATUS_LINE: usize = 1;

const SELF_MARKER: char = '▸';
const WINNER_MARKER: char = '♛';

/// Lay the whole table out as lines, top to bottom: title, status, one line
/// per player, results when present, then chat.
pub fn render_lines(view: &GameView) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(format!("room {}", view.room_id()));
    lines.push(view.status_text().to_string());

    for block in view.players() {
        lines.push(player_line(block));
    }

    if !view.results().is_empty() {
        lines.push("-- results --".to_string());
        for result in view.results() {
            let crown = if result.is_winner {
                format!("{WINNER_MARKER} ")
            } else {
                String::new()
            };
            lines.push(format!(
                "{crown}{}: {} ({})",
                result.nickname,
                result.score,
                result.status.label()
            ));
        }
    }

    if !view.chat().is_empty() {
        lines.push("-- chat --".to_string());
        for chat in view.chat() {
            lines.push(format!("{}: {}", chat.nickname, chat.message));
        }
    }

    lines
}

fn player_line(block: &PlayerBlock) -> String {
    let marker = if block.is_self { SELF_MARKER } else { ' ' };
    let cards: Vec<String> = block.cards.iter().map(|c| card_glyph(c)).collect();
    let value = match block.hand_value {
        DisplayValue::Shown(v) => v.to_string(),
        DisplayValue::Hidden => "?".to_string(),
    };
    format!(
        "{marker} {} [{}] {} cards, value {value} ({})",
        block.nickname,
        cards.join(" "),
        block.card_count,
        block.status.label()
    )
}

/// Short printable form of a card code: `pk-heartA` becomes `♥A`, a
/// face-down card becomes `[##]`.
pub fn card_glyph(code: &str) -> String {
    if code == HIDDEN_CARD {
        return "[##]".to_string();
    }
    let Some(rest) = code.strip_prefix("pk-") else {
        return code.to_string();
    };
    for (suit, glyph) in [
        ("heart", '♥'),
        ("diamond", '♦'),
        ("club", '♣'),
        ("spade", '♠'),
    ] {
        if let Some(rank) = rest.strip_prefix(suit) {
            return format!("{glyph}{rank}");
        }
    }
    code.to_string()
}
