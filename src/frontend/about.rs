use gloo::timers::callback::{Interval, Timeout};
use std::rc::Rc;
use yew::prelude::*;

use super::dom::{use_sighting, Sighting};
use super::use_site_config;
use crate::reveal::{
    parse_counter_target, parse_skill_width, skill_width_style, CounterPlan, CounterState,
    REVEALED_CLASS, REVEAL_OBSERVER, SKILLS_OBSERVER, STATS_OBSERVER,
};

const SKILLS: [(&str, &str); 4] = [
    ("Editing", "95"),
    ("Colour Grading", "88"),
    ("Motion Graphics", "76"),
    ("Sound Design", "64"),
];

const STATS: [(&str, &str, &str); 4] = [
    ("150", "+", "Projects delivered"),
    ("12", "", "Years behind the camera"),
    ("40", "+", "Brands served"),
    ("2000", "", "Hours of footage cut"),
];

#[derive(Properties, PartialEq)]
pub struct RevealProps {
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub children: Html,
}

/// Wraps its children and adds `revealed` the first time they scroll into view.
#[function_component(Reveal)]
pub fn reveal(props: &RevealProps) -> Html {
    let node = use_node_ref();
    let sighting = use_sighting(node.clone(), REVEAL_OBSERVER);

    html! {
        <div
            class={classes!(props.class.clone(), sighting.is_shown().then_some(REVEALED_CLASS))}
            ref={node}
        >
            {props.children.clone()}
        </div>
    }
}

#[function_component(About)]
pub fn about() -> Html {
    let config = use_site_config();
    let node = use_node_ref();
    let sighting = use_sighting(node.clone(), SKILLS_OBSERVER);
    let filled = use_state(|| false);

    {
        let setter = filled.setter();
        let delay = config.skill_bar_delay_ms;
        use_effect_with(sighting, move |sighting| {
            let mut timeout = None;
            match sighting {
                Sighting::Waiting => {}
                Sighting::Seen => timeout = Some(Timeout::new(delay, move || setter.set(true))),
                Sighting::Immediate => setter.set(true),
            }
            move || drop(timeout)
        });
    }

    let bars = SKILLS
        .iter()
        .map(|&(label, width)| {
            let target = (*filled).then(|| parse_skill_width(width));
            html! {
                <div class="skill-bar">
                    <div class="skill-bar__label">
                        <span>{label}</span>
                        <span>{format!("{width}%")}</span>
                    </div>
                    <div class="skill-bar__track">
                        <div class="skill-bar__fill" data-width={width} style={skill_width_style(target)}></div>
                    </div>
                </div>
            }
        })
        .collect::<Html>();

    html! {
        <section id="about" class="about" ref={node}>
            <Reveal class="reveal-left">
                <h2 class="section-title">{"About"}</h2>
                <p class="about__text">
                    {"I'm Constantine, a director and editor who treats every cut as a decision. "}
                    {"From thirty-second spots to feature-length documentaries, the work is built in the edit."}
                </p>
            </Reveal>
            <Reveal class="reveal-right">
                <div class="skills">{bars}</div>
            </Reveal>
        </section>
    }
}

pub enum CounterAction {
    Tick,
    Finish,
}

impl Reducible for CounterState {
    type Action = CounterAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = *self;
        match action {
            CounterAction::Tick => {
                next.tick();
            }
            CounterAction::Finish => next = CounterState::finished(next.target()),
        }

        if next == *self {
            self
        } else {
            Rc::new(next)
        }
    }
}

#[derive(Properties, PartialEq)]
struct StatCounterProps {
    target: AttrValue,
    sighting: Sighting,
}

#[function_component(StatCounter)]
fn stat_counter(props: &StatCounterProps) -> Html {
    let config = use_site_config();
    let target = parse_counter_target(&props.target);
    let counter = use_reducer(|| CounterState::new(target.unwrap_or_default()));

    {
        let dispatcher = counter.dispatcher();
        let plan = target.and_then(|target| CounterPlan::from_config(target, &config));
        use_effect_with((props.sighting, counter.is_done()), move |(sighting, done)| {
            let mut interval = None;
            match (sighting, plan) {
                (Sighting::Waiting, _) => {}
                (Sighting::Seen, Some(plan)) if !*done => {
                    interval = Some(Interval::new(plan.tick_ms, move || {
                        dispatcher.dispatch(CounterAction::Tick)
                    }));
                }
                _ => dispatcher.dispatch(CounterAction::Finish),
            }
            move || drop(interval)
        });
    }

    let text = match target {
        Some(_) => counter.value().to_string(),
        None => props.target.to_string(),
    };

    html! {
        <span class="stat__number" data-target={props.target.clone()}>{text}</span>
    }
}

#[function_component(Stats)]
pub fn stats() -> Html {
    let node = use_node_ref();
    let sighting = use_sighting(node.clone(), STATS_OBSERVER);

    let items = STATS
        .iter()
        .map(|&(target, suffix, label)| {
            html! {
                <div class="stat">
                    <StatCounter target={target} sighting={sighting} />
                    <span class="stat__suffix">{suffix}</span>
                    <p class="stat__label">{label}</p>
                </div>
            }
        })
        .collect::<Html>();

    html! {
        <section class="stats" ref={node}>{items}</section>
    }
}
