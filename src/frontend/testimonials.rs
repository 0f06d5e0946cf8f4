use web_sys::{Element, HtmlElement, MouseEvent};
use yew::prelude::*;

use super::dom;
use crate::carousel::{active_index, dot_style};

struct Testimonial {
    quote: &'static str,
    author: &'static str,
    role: &'static str,
}

const TESTIMONIALS: [Testimonial; 4] = [
    Testimonial {
        quote: "Constantine found the story in forty hours of footage we had given up on.",
        author: "Priya Nandakumar",
        role: "Producer, Coastline Trust",
    },
    Testimonial {
        quote: "The launch film outperformed every spot we ran that year.",
        author: "Marcus Hale",
        role: "CMO, Halcyon Audio",
    },
    Testimonial {
        quote: "Fast, calm, and obsessive about rhythm. Exactly what a music video needs.",
        author: "Mira Vale",
        role: "Recording Artist",
    },
    Testimonial {
        quote: "Every revision came back better than what we asked for.",
        author: "Tomasz Wrona",
        role: "Creative Director, Arcline",
    },
];

#[function_component(Testimonials)]
pub fn testimonials() -> Html {
    let track_ref = use_node_ref();
    let card_refs = use_memo((), |_| {
        TESTIMONIALS
            .iter()
            .map(|_| NodeRef::default())
            .collect::<Vec<_>>()
    });
    let active = use_state(|| 0_usize);

    let onscroll = {
        let track_ref = track_ref.clone();
        let card_refs = card_refs.clone();
        let active = active.clone();
        Callback::from(move |_: Event| {
            let Some(track) = track_ref.cast::<Element>() else {
                return;
            };
            let Some(first_card) = card_refs.first().and_then(|node| node.cast::<HtmlElement>()) else {
                return;
            };

            let index = active_index(
                f64::from(track.scroll_left()),
                f64::from(first_card.offset_width()),
                card_refs.len(),
            );
            if let Some(index) = index.filter(|index| *index != *active) {
                active.set(index);
            }
        })
    };

    let cards = TESTIMONIALS
        .iter()
        .zip(card_refs.iter())
        .map(|(testimonial, node)| {
            html! {
                <blockquote class="testimonial-card" ref={node.clone()}>
                    <p class="testimonial-card__quote">{testimonial.quote}</p>
                    <footer class="testimonial-card__author">
                        <strong>{testimonial.author}</strong>
                        <span>{testimonial.role}</span>
                    </footer>
                </blockquote>
            }
        })
        .collect::<Html>();

    let dots = card_refs
        .iter()
        .enumerate()
        .map(|(index, node)| {
            let node = node.clone();
            let onclick = Callback::from(move |_: MouseEvent| {
                if let Some(card) = node.cast::<Element>() {
                    dom::scroll_card_into_view(&card);
                }
            });
            html! {
                <div
                    class={classes!("test-dot", (index == *active).then_some("active"))}
                    style={dot_style(index, *active)}
                    {onclick}
                ></div>
            }
        })
        .collect::<Html>();

    html! {
        <section id="testimonials" class="testimonials">
            <h2 class="section-title">{"What Clients Say"}</h2>
            <div id="testimonialsTrack" class="testimonials__track" ref={track_ref} {onscroll}>
                {cards}
            </div>
            <div id="testDots" class="testimonials__dots">{dots}</div>
        </section>
    }
}
