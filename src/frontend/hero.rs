use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{window, MouseEvent};
use yew::prelude::*;

use super::dom::use_window_scroll;
use super::navigation::smooth_scroll;
use crate::modal::Modal;
use crate::motion::{cursor_glow_style, HeroParallax};

#[function_component(CursorGlow)]
pub fn cursor_glow() -> Html {
    let position = use_state(|| None::<(i32, i32)>);

    {
        let setter = position.setter();
        use_effect_with((), move |_| {
            let listener = window().and_then(|w| w.document()).map(|document| {
                EventListener::new(&document, "mousemove", move |event| {
                    if let Some(event) = event.dyn_ref::<MouseEvent>() {
                        setter.set(Some((event.client_x(), event.client_y())));
                    }
                })
            });
            move || drop(listener)
        });
    }

    let style = position.map(|(x, y)| cursor_glow_style(x, y));

    html! {
        <div id="cursorGlow" class="cursor-glow" aria-hidden="true" {style}></div>
    }
}

#[derive(Properties, PartialEq)]
pub struct HeroProps {
    pub on_open: Callback<Modal>,
}

#[function_component(Hero)]
pub fn hero(props: &HeroProps) -> Html {
    let parallax = HeroParallax::at(use_window_scroll());

    let on_play_reel = {
        let on_open = props.on_open.clone();
        Callback::from(move |_: MouseEvent| on_open.emit(Modal::Reel))
    };

    html! {
        <section id="home" class="hero">
            <div class="hero__bg" style={parallax.background_style()} aria-hidden="true"></div>
            <div class="hero__content" style={parallax.content_style()}>
                <p class="hero__eyebrow">{"Director · Editor · Colourist"}</p>
                <h1 class="hero__title">{"Stories cut to the frame."}</h1>
                <p class="hero__subtitle">
                    {"Commercials, music videos and documentaries for brands that want to be remembered."}
                </p>
                <div class="hero__actions">
                    <button id="playReel" class="btn btn--primary" type="button" onclick={on_play_reel}>
                        {"Play Showreel"}
                    </button>
                    <a class="btn btn--ghost" href="#work" onclick={smooth_scroll("#work")}>
                        {"View Work"}
                    </a>
                </div>
            </div>
        </section>
    }
}
