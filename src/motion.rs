pub const HERO_CONTENT_RATE: f64 = 0.3;
pub const HERO_BACKGROUND_RATE: f64 = 0.15;
pub const HERO_FADE_DISTANCE_PX: f64 = 600.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeroParallax {
    pub content_offset: f64,
    pub content_opacity: f64,
    pub background_offset: f64,
}

impl HeroParallax {
    pub fn at(scroll_y: f64) -> Self {
        Self {
            content_offset: scroll_y * HERO_CONTENT_RATE,
            content_opacity: (1.0 - scroll_y / HERO_FADE_DISTANCE_PX).max(0.0),
            background_offset: scroll_y * HERO_BACKGROUND_RATE,
        }
    }

    pub fn content_style(&self) -> String {
        format!(
            "transform: translateY({}px); opacity: {};",
            self.content_offset, self.content_opacity
        )
    }

    pub fn background_style(&self) -> String {
        format!("transform: translateY({}px);", self.background_offset)
    }
}

pub fn cursor_glow_style(client_x: i32, client_y: i32) -> String {
    format!("left: {client_x}px; top: {client_y}px;")
}
