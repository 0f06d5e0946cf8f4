use gloo::timers::callback::Timeout;
use serde_json::json;
use std::rc::Rc;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Element, HtmlVideoElement, MouseEvent};
use yew::prelude::*;

use super::about::Reveal;
use super::dom::{self, watch_intersections};
use super::use_site_config;
use crate::config::SiteConfig;
use crate::filter::{Filter, ProjectFilter};
use crate::lazy_video::{LazyVideo, VideoAction, FALLBACK_PRELOAD, LAZY_VIDEO_OBSERVER};
use crate::logging::{log_event, LogLevel};
use crate::modal::{Modal, VideoRequest};

struct BentoClip {
    src: &'static str,
    title: &'static str,
    tag: &'static str,
    wide: bool,
}

const BENTO_CLIPS: [BentoClip; 4] = [
    BentoClip {
        src: "/media/nocturne.mp4",
        title: "Nocturne",
        tag: "Music Video",
        wide: true,
    },
    BentoClip {
        src: "/media/tidewater.mp4",
        title: "Tidewater",
        tag: "Documentary",
        wide: false,
    },
    BentoClip {
        src: "/media/forge-athletics.mp4",
        title: "Forge Athletics",
        tag: "Commercial",
        wide: false,
    },
    BentoClip {
        src: "/media/paper-lanterns.mp4",
        title: "Paper Lanterns",
        tag: "Short Film",
        wide: true,
    },
];

const FILTERS: [(&str, &str); 4] = [
    ("all", "All"),
    ("commercial", "Commercial"),
    ("music", "Music Video"),
    ("documentary", "Documentary"),
];

struct Project {
    id: &'static str,
    title: &'static str,
    client: &'static str,
    category: &'static str,
    image: &'static str,
}

const PROJECTS: [Project; 6] = [
    Project {
        id: "halcyon",
        title: "Halcyon Launch",
        client: "Halcyon Audio",
        category: "commercial",
        image: "/images/projects/halcyon.jpg",
    },
    Project {
        id: "static-bloom",
        title: "Static Bloom",
        client: "Mira Vale",
        category: "music",
        image: "/images/projects/static-bloom.jpg",
    },
    Project {
        id: "salt-roads",
        title: "Salt Roads",
        client: "Coastline Trust",
        category: "documentary",
        image: "/images/projects/salt-roads.jpg",
    },
    Project {
        id: "northbound",
        title: "Northbound",
        client: "Arcline Rail",
        category: "commercial",
        image: "/images/projects/northbound.jpg",
    },
    Project {
        id: "glass-hours",
        title: "Glass Hours",
        client: "The Lowlights",
        category: "music",
        image: "/images/projects/glass-hours.jpg",
    },
    Project {
        id: "kiln",
        title: "Kiln",
        client: "Independent",
        category: "documentary",
        image: "/images/projects/kiln.jpg",
    },
];

fn apply_video_actions(video: &HtmlVideoElement, actions: Vec<VideoAction>, config: &Rc<SiteConfig>) {
    for action in actions {
        match action {
            VideoAction::Assign(src) => {
                video.set_muted(true);
                let _ = video.set_attribute("playsinline", "");
                video.set_src(&src);
                video.load();
            }
            VideoAction::Play => {
                if let Ok(playback) = video.play() {
                    let config = config.clone();
                    spawn_local(async move {
                        if JsFuture::from(playback).await.is_err() {
                            log_event(&config, LogLevel::Debug, "video_play_rejected", json!({ "source": "thumbnail" }));
                        }
                    });
                }
            }
            VideoAction::Pause => {
                let _ = video.pause();
            }
        }
    }
}

#[derive(Properties, PartialEq)]
struct BentoCardProps {
    src: AttrValue,
    title: AttrValue,
    tag: AttrValue,
    wide: bool,
    on_open: Callback<Modal>,
}

#[function_component(BentoCard)]
fn bento_card(props: &BentoCardProps) -> Html {
    let config = use_site_config();
    let video_ref = use_node_ref();

    {
        let video_ref = video_ref.clone();
        use_effect_with(props.src.clone(), move |_| {
            let mut watch = None;

            if let Some(video) = video_ref.cast::<HtmlVideoElement>() {
                let stored_src = video.get_attribute("data-src");
                let mut lazy = LazyVideo::default();

                if dom::intersection_supported() {
                    let element: Element = video.clone().into();
                    watch = watch_intersections(&element, LAZY_VIDEO_OBSERVER, move |entry, _| {
                        let actions = lazy.on_intersection(stored_src.as_deref(), entry.is_intersecting());
                        apply_video_actions(&video, actions, &config);
                    });
                } else {
                    if let Some(src) = lazy.eager(stored_src.as_deref()) {
                        video.set_src(&src);
                    }
                    video.set_preload(FALLBACK_PRELOAD);
                }
            }

            move || drop(watch)
        });
    }

    let onclick = {
        let on_open = props.on_open.clone();
        let (src, title, tag) = (props.src.clone(), props.title.clone(), props.tag.clone());
        Callback::from(move |_: MouseEvent| {
            if let Some(request) = VideoRequest::from_card(Some(&src), Some(&title), Some(&tag)) {
                on_open.emit(Modal::Video(request));
            }
        })
    };

    html! {
        <article
            class={classes!("bento-card", props.wide.then_some("bento-card--wide"))}
            data-src={props.src.clone()}
            data-title={props.title.clone()}
            data-tag={props.tag.clone()}
            {onclick}
        >
            <video
                class="bento-thumb"
                data-src={props.src.clone()}
                muted=true
                loop=true
                playsinline="playsinline"
                ref={video_ref}
            ></video>
            <div class="bento-card__meta">
                <span class="bento-card__tag">{props.tag.clone()}</span>
                <h3 class="bento-card__title">{props.title.clone()}</h3>
            </div>
        </article>
    }
}

#[derive(Properties, PartialEq)]
pub struct ShowreelProps {
    pub on_open: Callback<Modal>,
}

#[function_component(Showreel)]
pub fn showreel(props: &ShowreelProps) -> Html {
    let cards = BENTO_CLIPS
        .iter()
        .map(|clip| {
            html! {
                <BentoCard
                    key={clip.src}
                    src={clip.src}
                    title={clip.title}
                    tag={clip.tag}
                    wide={clip.wide}
                    on_open={props.on_open.clone()}
                />
            }
        })
        .collect::<Html>();

    html! {
        <section id="reels" class="reels">
            <Reveal class="reveal-up">
                <h2 class="section-title">{"Selected Reels"}</h2>
            </Reveal>
            <div class="bento-grid">{cards}</div>
        </section>
    }
}

pub enum FilterAction {
    Select(Filter),
    SettleHide(u64),
}

impl Reducible for ProjectFilter {
    type Action = FilterAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            FilterAction::Select(filter) => {
                next.select(filter);
            }
            FilterAction::SettleHide(generation) => {
                if !next.settle_hide(generation) {
                    return self;
                }
            }
        }
        Rc::new(next)
    }
}

#[function_component(Work)]
pub fn work() -> Html {
    let config = use_site_config();
    let filter = use_reducer(ProjectFilter::default);

    {
        let dispatcher = filter.dispatcher();
        let delay = config.filter_hide_delay_ms;
        use_effect_with(filter.generation(), move |generation| {
            let generation = *generation;
            let timeout = (generation > 0).then(|| {
                Timeout::new(delay, move || dispatcher.dispatch(FilterAction::SettleHide(generation)))
            });
            move || drop(timeout)
        });
    }

    let controls = FILTERS
        .iter()
        .map(|&(value, label)| {
            let dispatcher = filter.dispatcher();
            let config = config.clone();
            let onclick = Callback::from(move |_: MouseEvent| {
                let selected = Filter::parse(value);
                let visible = PROJECTS
                    .iter()
                    .filter(|project| selected.matches(project.category))
                    .count();
                log_event(
                    &config,
                    LogLevel::Debug,
                    "filter_applied",
                    json!({ "filter": selected.as_str(), "visible": visible }),
                );
                dispatcher.dispatch(FilterAction::Select(selected));
            });
            html! {
                <button
                    class={classes!("filter-btn", filter.is_control_active(value).then_some("filter-btn--active"))}
                    type="button"
                    data-filter={value}
                    {onclick}
                >
                    {label}
                </button>
            }
        })
        .collect::<Html>();

    let cards = PROJECTS
        .iter()
        .map(|project| {
            let phase = filter.card_phase(project.category);
            html! {
                <article
                    key={filter.card_key(project.id, project.category)}
                    class="project-card"
                    data-category={project.category}
                    style={phase.style()}
                >
                    <img class="project-card__image" src={project.image} alt={project.title} loading="lazy" />
                    <div class="project-card__info">
                        <span class="project-card__client">{project.client}</span>
                        <h3 class="project-card__title">{project.title}</h3>
                    </div>
                </article>
            }
        })
        .collect::<Html>();

    html! {
        <section id="work" class="work">
            <Reveal class="reveal-up">
                <h2 class="section-title">{"Work"}</h2>
            </Reveal>
            <div class="filters">{controls}</div>
            <div class="projects-grid">{cards}</div>
        </section>
    }
}
