use std::collections::BTreeMap;

pub const ALL_FILTER: &str = "all";
pub const ENTER_DURATION_S: f64 = 0.4;
pub const ENTER_OFFSET_PX: f64 = 20.0;
pub const HIDE_SCALE: f64 = 0.9;
pub const ENTER_KEYFRAMES_NAME: &str = "project-card-enter";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Filter {
    #[default]
    All,
    Category(String),
}

impl Filter {
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value == ALL_FILTER {
            Self::All
        } else {
            Self::Category(value.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_FILTER,
            Self::Category(category) => category,
        }
    }

    pub fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Category(selected) => selected == category,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardPhase {
    Idle,
    Entering,
    Fading,
    Hidden,
}

impl CardPhase {
    pub fn is_visible(self) -> bool {
        matches!(self, Self::Idle | Self::Entering)
    }

    pub fn style(self) -> Option<String> {
        match self {
            Self::Idle => None,
            Self::Entering => Some(format!(
                "opacity: 1; transform: translateY(0); animation: {ENTER_KEYFRAMES_NAME} {ENTER_DURATION_S}s ease both;"
            )),
            Self::Fading => Some(format!(
                "opacity: 0; transform: scale({HIDE_SCALE}); transition: opacity {ENTER_DURATION_S}s ease, transform {ENTER_DURATION_S}s ease;"
            )),
            Self::Hidden => Some(format!("opacity: 0; transform: scale({HIDE_SCALE}); display: none;")),
        }
    }
}

pub fn enter_keyframes() -> String {
    format!(
        "@keyframes {ENTER_KEYFRAMES_NAME} {{ from {{ opacity: 0; transform: translateY({ENTER_OFFSET_PX}px); }} to {{ opacity: 1; transform: translateY(0); }} }}"
    )
}

/// Selection state for the project grid. Each selection bumps `generation`;
/// the delayed hide only lands if no newer selection superseded it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProjectFilter {
    active: Filter,
    generation: u64,
    hide_settled: bool,
    last_settled_at: u64,
    all_selected_at: u64,
    category_selected_at: BTreeMap<String, u64>,
}

impl ProjectFilter {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_control_active(&self, control_filter: &str) -> bool {
        self.active == Filter::parse(control_filter)
    }

    /// Applies a selection and returns the generation the hide timer must echo back.
    pub fn select(&mut self, filter: Filter) -> u64 {
        self.generation += 1;
        self.hide_settled = false;
        match &filter {
            Filter::All => self.all_selected_at = self.generation,
            Filter::Category(category) => {
                self.category_selected_at.insert(category.clone(), self.generation);
            }
        }
        self.active = filter;
        self.generation
    }

    pub fn settle_hide(&mut self, generation: u64) -> bool {
        if generation == self.generation && generation > 0 {
            self.hide_settled = true;
            self.last_settled_at = generation;
            true
        } else {
            false
        }
    }

    pub fn card_phase(&self, category: &str) -> CardPhase {
        if self.generation == 0 {
            return CardPhase::Idle;
        }

        if self.active.matches(category) {
            CardPhase::Entering
        } else if self.hide_settled || self.entered_at(category) < self.last_settled_at {
            CardPhase::Hidden
        } else {
            CardPhase::Fading
        }
    }

    // Stable while a card fades out; bumps when it re-enters.
    pub fn card_key(&self, card_id: &str, category: &str) -> String {
        format!("{card_id}-{}", self.entered_at(category))
    }

    fn entered_at(&self, category: &str) -> u64 {
        self.category_selected_at
            .get(category)
            .copied()
            .unwrap_or(0)
            .max(self.all_selected_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CARDS: [(&str, &str); 5] = [
        ("a", "commercial"),
        ("b", "music"),
        ("c", "commercial"),
        ("d", "documentary"),
        ("e", "music"),
    ];

    #[test]
    fn untouched_grid_stays_idle() {
        let filter = ProjectFilter::default();
        assert!(filter.is_control_active("all"));
        assert!(CARDS
            .iter()
            .all(|(_, category)| filter.card_phase(category) == CardPhase::Idle));
    }

    #[test]
    fn visibility_follows_selection_for_every_filter() {
        for selected in ["all", "commercial", "music", "documentary", "unknown"] {
            let mut filter = ProjectFilter::default();
            let generation = filter.select(Filter::parse(selected));
            filter.settle_hide(generation);

            for (_, category) in CARDS {
                let expected = selected == "all" || selected == category;
                assert_eq!(filter.card_phase(category).is_visible(), expected, "{selected}/{category}");
            }
        }
    }

    #[test]
    fn exactly_one_control_is_active_after_each_click() {
        let controls = ["all", "commercial", "music", "documentary"];
        let mut filter = ProjectFilter::default();

        for clicked in ["music", "all", "documentary", "commercial"] {
            filter.select(Filter::parse(clicked));
            let active: Vec<_> = controls
                .iter()
                .filter(|control| filter.is_control_active(control))
                .collect();
            assert_eq!(active, vec![&clicked]);
        }
    }

    #[test]
    fn hidden_cards_fade_before_leaving_layout() {
        let mut filter = ProjectFilter::default();
        let generation = filter.select(Filter::parse("music"));

        assert_eq!(filter.card_phase("commercial"), CardPhase::Fading);
        assert!(filter.settle_hide(generation));
        assert_eq!(filter.card_phase("commercial"), CardPhase::Hidden);
        assert_eq!(filter.card_phase("music"), CardPhase::Entering);
    }

    #[test]
    fn superseded_hide_timer_is_ignored() {
        let mut filter = ProjectFilter::default();
        let stale = filter.select(Filter::parse("music"));
        let current = filter.select(Filter::parse("commercial"));

        assert!(!filter.settle_hide(stale));
        assert_eq!(filter.card_phase("music"), CardPhase::Fading);
        assert!(filter.settle_hide(current));
        assert_eq!(filter.card_phase("music"), CardPhase::Hidden);
    }

    #[test]
    fn entering_cards_get_a_fresh_key_per_selection() {
        let mut filter = ProjectFilter::default();
        filter.select(Filter::All);
        let first = filter.card_key("a", "commercial");
        filter.select(Filter::parse("commercial"));
        assert_ne!(first, filter.card_key("a", "commercial"));
    }

    #[test]
    fn leaving_cards_keep_their_key_while_fading_and_hidden() {
        let mut filter = ProjectFilter::default();
        filter.select(Filter::All);
        let visible_key = filter.card_key("a", "commercial");

        let generation = filter.select(Filter::parse("music"));
        assert_eq!(filter.card_phase("commercial"), CardPhase::Fading);
        assert_eq!(filter.card_key("a", "commercial"), visible_key);

        filter.settle_hide(generation);
        filter.select(Filter::parse("documentary"));
        assert_eq!(filter.card_phase("commercial"), CardPhase::Hidden);
        assert_eq!(filter.card_key("a", "commercial"), visible_key);

        filter.select(Filter::parse("commercial"));
        assert_eq!(filter.card_phase("commercial"), CardPhase::Entering);
        assert_ne!(filter.card_key("a", "commercial"), visible_key);
    }

    #[test]
    fn quick_reselection_keeps_unsettled_cards_fading() {
        let mut filter = ProjectFilter::default();
        filter.select(Filter::All);
        filter.select(Filter::parse("music"));
        let current = filter.select(Filter::parse("documentary"));

        assert_eq!(filter.card_phase("commercial"), CardPhase::Fading);
        assert!(filter.settle_hide(current));
        assert_eq!(filter.card_phase("commercial"), CardPhase::Hidden);
        assert_eq!(filter.card_phase("music"), CardPhase::Hidden);
    }

    #[test]
    fn phase_styles_carry_the_transition_contract() {
        let entering = CardPhase::Entering.style().expect("styled");
        assert!(entering.contains("0.4s"));
        assert!(enter_keyframes().contains("translateY(20px)"));

        let fading = CardPhase::Fading.style().expect("styled");
        assert!(fading.contains("scale(0.9)"));
        assert!(!fading.contains("display: none"));
        assert!(CardPhase::Hidden.style().expect("styled").contains("display: none"));
        assert_eq!(CardPhase::Idle.style(), None);
    }
}
