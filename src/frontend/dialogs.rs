use serde_json::json;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{HtmlVideoElement, MouseEvent};
use yew::prelude::*;

use super::dom;
use super::use_site_config;
use crate::logging::{log_event, LogLevel};
use crate::modal::{ModalKind, VideoRequest};

const REEL_EMBED_URL: &str = "https://player.vimeo.com/video/76979871?autoplay=1&muted=1";

fn backdrop_handler(
    kind: ModalKind,
    backdrop: &NodeRef,
    on_dialog_click: &Callback<(ModalKind, bool)>,
) -> Callback<MouseEvent> {
    let backdrop = backdrop.clone();
    let on_dialog_click = on_dialog_click.clone();
    Callback::from(move |event: MouseEvent| {
        on_dialog_click.emit((kind, dom::is_backdrop_click(&event, &backdrop)));
    })
}

fn close_handler(kind: ModalKind, on_close: &Callback<ModalKind>) -> Callback<MouseEvent> {
    let on_close = on_close.clone();
    Callback::from(move |_: MouseEvent| on_close.emit(kind))
}

#[derive(Properties, PartialEq)]
pub struct ReelModalProps {
    pub open: bool,
    pub on_close: Callback<ModalKind>,
    pub on_dialog_click: Callback<(ModalKind, bool)>,
}

#[function_component(ReelModal)]
pub fn reel_modal(props: &ReelModalProps) -> Html {
    let backdrop_ref = use_node_ref();

    html! {
        <div
            id="reelModal"
            ref={backdrop_ref.clone()}
            class={classes!("modal", props.open.then_some("open"))}
            role="dialog"
            aria-modal="true"
            aria-hidden={(!props.open).to_string()}
            onclick={backdrop_handler(ModalKind::Reel, &backdrop_ref, &props.on_dialog_click)}
        >
            <div class="modal__content">
                <button
                    id="closeModal"
                    class="modal__close"
                    type="button"
                    aria-label="Close showreel"
                    onclick={close_handler(ModalKind::Reel, &props.on_close)}
                >
                    {"×"}
                </button>
                if props.open {
                    <iframe
                        class="modal__frame"
                        src={REEL_EMBED_URL}
                        title="Showreel"
                        allow="autoplay; fullscreen"
                    ></iframe>
                }
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct VideoModalProps {
    pub request: Option<VideoRequest>,
    pub on_close: Callback<ModalKind>,
    pub on_dialog_click: Callback<(ModalKind, bool)>,
}

#[function_component(VideoModal)]
pub fn video_modal(props: &VideoModalProps) -> Html {
    let config = use_site_config();
    let player_ref = use_node_ref();
    let backdrop_ref = use_node_ref();

    {
        let player_ref = player_ref.clone();
        use_effect_with(props.request.clone(), move |request| {
            if let Some(player) = player_ref.cast::<HtmlVideoElement>() {
                match request {
                    Some(request) => {
                        player.set_src(&request.src);
                        player.load();
                        if let Ok(playback) = player.play() {
                            spawn_local(async move {
                                if let Err(reason) = JsFuture::from(playback).await {
                                    log_event(
                                        &config,
                                        LogLevel::Debug,
                                        "video_play_rejected",
                                        json!({ "source": "modal", "reason": reason.as_string() }),
                                    );
                                }
                            });
                        }
                    }
                    None if !player.src().is_empty() => {
                        let _ = player.pause();
                        player.set_src("");
                    }
                    None => {}
                }
            }
            || ()
        });
    }

    let open = props.request.is_some();
    let title = props.request.as_ref().map(|request| request.title.clone()).unwrap_or_default();
    let tag = props.request.as_ref().map(|request| request.tag.clone()).unwrap_or_default();

    html! {
        <div
            id="vidModal"
            ref={backdrop_ref.clone()}
            class={classes!("vid-modal", open.then_some("open"))}
            role="dialog"
            aria-modal="true"
            aria-hidden={(!open).to_string()}
            onclick={backdrop_handler(ModalKind::Video, &backdrop_ref, &props.on_dialog_click)}
        >
            <div class="vid-modal__content">
                <button
                    id="vidModalClose"
                    class="vid-modal__close"
                    type="button"
                    aria-label="Close video"
                    onclick={close_handler(ModalKind::Video, &props.on_close)}
                >
                    {"×"}
                </button>
                <video id="vidModalPlayer" class="vid-modal__player" controls=true playsinline="playsinline" ref={player_ref}></video>
                <div class="vid-modal__meta">
                    <span id="vidModalTag" class="vid-modal__tag">{tag}</span>
                    <h3 id="vidModalTitle" class="vid-modal__title">{title}</h3>
                </div>
            </div>
        </div>
    }
}
