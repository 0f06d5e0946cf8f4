use crate::config::SiteConfig;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObserverZone {
    pub threshold: f64,
    /// Bottom root margin in pixels; negative shrinks the trigger zone.
    pub bottom_margin_px: i32,
}

impl ObserverZone {
    pub const fn new(threshold: f64, bottom_margin_px: i32) -> Self {
        Self {
            threshold,
            bottom_margin_px,
        }
    }

    pub fn root_margin(&self) -> String {
        format!("0px 0px {}px 0px", self.bottom_margin_px)
    }
}

pub const REVEAL_OBSERVER: ObserverZone = ObserverZone::new(0.12, -60);
pub const STATS_OBSERVER: ObserverZone = ObserverZone::new(0.5, 0);
pub const SKILLS_OBSERVER: ObserverZone = ObserverZone::new(0.3, 0);

pub const REVEALED_CLASS: &str = "revealed";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OneShot {
    #[default]
    Pending,
    Triggered,
}

impl OneShot {
    /// Feeds an intersection change. Returns `true` only on the transition
    /// into `Triggered`; the caller detaches its observer at that point.
    pub fn observe(&mut self, is_intersecting: bool) -> bool {
        if *self == Self::Pending && is_intersecting {
            *self = Self::Triggered;
            true
        } else {
            false
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CounterPlan {
    pub target: u32,
    pub tick_ms: u32,
}

impl CounterPlan {
    /// `None` when there is nothing to animate; the target is shown as-is.
    pub fn new(target: u32, duration_ms: u32, min_tick_ms: u32) -> Option<Self> {
        if target == 0 {
            return None;
        }

        Some(Self {
            target,
            tick_ms: (duration_ms / target).max(min_tick_ms),
        })
    }

    pub fn from_config(target: u32, config: &SiteConfig) -> Option<Self> {
        Self::new(target, config.counter_duration_ms, config.counter_min_tick_ms)
    }
}

pub fn parse_counter_target(value: &str) -> Option<u32> {
    value.trim().parse::<u32>().ok()
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CounterState {
    current: u32,
    target: u32,
}

impl CounterState {
    pub fn new(target: u32) -> Self {
        Self { current: 0, target }
    }

    pub fn finished(target: u32) -> Self {
        Self {
            current: target,
            target,
        }
    }

    pub fn value(self) -> u32 {
        self.current
    }

    pub fn target(self) -> u32 {
        self.target
    }

    pub fn is_done(self) -> bool {
        self.current >= self.target
    }

    pub fn tick(&mut self) -> bool {
        if self.is_done() {
            self.current = self.target;
            return false;
        }

        self.current += 1;
        !self.is_done()
    }
}

pub fn parse_skill_width(value: &str) -> f64 {
    value
        .trim()
        .trim_end_matches('%')
        .parse::<f64>()
        .ok()
        .filter(|width| width.is_finite())
        .map(|width| width.clamp(0.0, 100.0))
        .unwrap_or(0.0)
}

pub fn skill_width_style(width: Option<f64>) -> String {
    format!("width: {}%;", width.unwrap_or(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_shot_fires_once_across_reentry() {
        let mut state = OneShot::default();

        assert!(!state.observe(false));
        assert!(state.observe(true));
        assert!(!state.observe(false));
        assert!(!state.observe(true));
        assert_eq!(state, OneShot::Triggered);
    }

    #[test]
    fn root_margins_match_trigger_zones() {
        assert_eq!(REVEAL_OBSERVER.root_margin(), "0px 0px -60px 0px");
        assert_eq!(STATS_OBSERVER.root_margin(), "0px 0px 0px 0px");
        assert_eq!(REVEAL_OBSERVER.threshold, 0.12);
        assert_eq!(SKILLS_OBSERVER.threshold, 0.3);
    }

    #[test]
    fn counter_to_two_thousand_lands_exactly_and_stops() {
        let plan = CounterPlan::new(2_000, 2_000, 20).expect("positive target");
        assert_eq!(plan.tick_ms, 20);

        let mut counter = CounterState::new(plan.target);
        let mut ticks = 0;
        while counter.tick() {
            ticks += 1;
        }

        assert_eq!(ticks + 1, 2_000);
        assert_eq!(counter.value(), 2_000);
        assert!(!counter.tick());
        assert_eq!(counter.value(), 2_000);
    }

    #[test]
    fn tick_interval_never_drops_below_floor() {
        for target in [1, 7, 50, 100, 101, 999, 10_000, u32::MAX] {
            let plan = CounterPlan::new(target, 2_000, 20).expect("positive target");
            assert!(plan.tick_ms >= 20, "target {target}");
        }

        assert_eq!(CounterPlan::new(4, 2_000, 20).map(|plan| plan.tick_ms), Some(500));
        assert_eq!(CounterPlan::new(0, 2_000, 20), None);
    }

    #[test]
    fn counter_targets_parse_as_integers() {
        assert_eq!(parse_counter_target(" 150 "), Some(150));
        assert_eq!(parse_counter_target("12.5"), None);
        assert_eq!(parse_counter_target("-3"), None);
        assert_eq!(CounterState::finished(9).value(), 9);
    }

    #[test]
    fn skill_widths_are_clamped_percentages() {
        assert_eq!(parse_skill_width("85"), 85.0);
        assert_eq!(parse_skill_width("92%"), 92.0);
        assert_eq!(parse_skill_width("140"), 100.0);
        assert_eq!(parse_skill_width("wide"), 0.0);
        assert_eq!(skill_width_style(None), "width: 0%;");
        assert_eq!(skill_width_style(Some(85.0)), "width: 85%;");
    }
}
