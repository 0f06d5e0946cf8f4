pub const CARD_GAP_PX: f64 = 24.0;

const ACTIVE_DOT_COLOR: &str = "var(--gold)";
const IDLE_DOT_COLOR: &str = "var(--border)";
const ACTIVE_DOT_SCALE: f64 = 1.3;

/// Indicator index for a horizontal scroll offset. Cards are assumed to share
/// the first card's width.
pub fn active_index(scroll_left: f64, card_width: f64, card_count: usize) -> Option<usize> {
    let stride = card_width + CARD_GAP_PX;
    if card_count == 0 || !stride.is_finite() || stride <= 0.0 || !scroll_left.is_finite() {
        return None;
    }

    let index = (scroll_left.max(0.0) / stride).round() as usize;
    Some(index.min(card_count - 1))
}

pub fn dot_style(index: usize, active: usize) -> String {
    let (background, scale) = if index == active {
        (ACTIVE_DOT_COLOR, ACTIVE_DOT_SCALE)
    } else {
        (IDLE_DOT_COLOR, 1.0)
    };

    format!(
        "width: 8px; height: 8px; border-radius: 50%; background: {background}; transform: scale({scale}); cursor: pointer; transition: background 0.3s;"
    )
}
