use gloo::events::EventListener;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{window, HtmlElement, MouseEvent, Node};
use yew::prelude::*;

use super::dom::{self, use_window_scroll};
use crate::nav::{active_section, in_page_target, is_compact, is_link_active, MobileMenu, SectionOffset};

const NAV_LINKS: [(&str, &str); 5] = [
    ("#reels", "Reels"),
    ("#work", "Work"),
    ("#about", "About"),
    ("#testimonials", "Clients"),
    ("#contact", "Contact"),
];

/// Intercepts in-page hash links and scrolls smoothly to their target.
/// Bare `#` links and links to missing targets keep their default behavior.
pub fn smooth_scroll(href: &'static str) -> Callback<MouseEvent> {
    Callback::from(move |event: MouseEvent| {
        let Some(target) = in_page_target(href).and_then(dom::element_by_id) else {
            return;
        };

        event.prevent_default();
        dom::scroll_to_top_of(&target);
    })
}

fn section_offsets() -> Vec<SectionOffset> {
    let Some(sections) = window()
        .and_then(|w| w.document())
        .and_then(|d| d.query_selector_all("section[id]").ok())
    else {
        return Vec::new();
    };

    (0..sections.length())
        .filter_map(|index| sections.item(index))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .map(|section| SectionOffset::new(section.id(), f64::from(section.offset_top())))
        .collect()
}

pub enum MenuAction {
    Toggle,
    Close,
    DocumentClick { inside_menu: bool, inside_toggle: bool },
}

impl Reducible for MobileMenu {
    type Action = MenuAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let next = match action {
            MenuAction::Toggle => self.toggled(),
            MenuAction::Close => self.closed(),
            MenuAction::DocumentClick {
                inside_menu,
                inside_toggle,
            } => self.after_document_click(inside_menu, inside_toggle),
        };

        if next == *self {
            self
        } else {
            Rc::new(next)
        }
    }
}

#[function_component(Navigation)]
pub fn navigation() -> Html {
    let scroll_y = use_window_scroll();
    let menu = use_reducer(MobileMenu::default);
    let menu_ref = use_node_ref();
    let toggle_ref = use_node_ref();

    {
        let dispatcher = menu.dispatcher();
        let menu_ref = menu_ref.clone();
        let toggle_ref = toggle_ref.clone();
        use_effect_with((), move |_| {
            let listener = window().and_then(|w| w.document()).map(|document| {
                EventListener::new(&document, "click", move |event| {
                    let target = event.target().and_then(|target| target.dyn_into::<Node>().ok());
                    dispatcher.dispatch(MenuAction::DocumentClick {
                        inside_menu: dom::node_contains(&menu_ref, target.as_ref()),
                        inside_toggle: dom::node_contains(&toggle_ref, target.as_ref()),
                    });
                })
            });
            move || drop(listener)
        });
    }

    let sections = section_offsets();
    let active = active_section(&sections, scroll_y);

    let on_toggle = {
        let dispatcher = menu.dispatcher();
        Callback::from(move |_: MouseEvent| dispatcher.dispatch(MenuAction::Toggle))
    };

    let desktop_links = NAV_LINKS
        .iter()
        .map(|&(href, label)| {
            html! {
                <a
                    class={classes!("nav__link", is_link_active(href, active).then_some("active"))}
                    href={href}
                    onclick={smooth_scroll(href)}
                >
                    {label}
                </a>
            }
        })
        .collect::<Html>();

    let mobile_links = NAV_LINKS
        .iter()
        .map(|&(href, label)| {
            let dispatcher = menu.dispatcher();
            let scroll = smooth_scroll(href);
            let onclick = Callback::from(move |event: MouseEvent| {
                dispatcher.dispatch(MenuAction::Close);
                scroll.emit(event);
            });
            html! {
                <a class="mobile-link" href={href} {onclick}>{label}</a>
            }
        })
        .collect::<Html>();

    html! {
        <>
            <nav id="mainNav" class={classes!("nav", is_compact(scroll_y).then_some("scrolled"))}>
                <a class="nav__logo" href="#home" onclick={smooth_scroll("#home")}>{"CONSTANTINE"}</a>
                <div class="nav__links">{desktop_links}</div>
                <button
                    id="hamburger"
                    class="nav__hamburger"
                    type="button"
                    aria-label="Toggle menu"
                    aria-expanded={menu.is_open().to_string()}
                    ref={toggle_ref}
                    onclick={on_toggle}
                >
                    <span></span>
                    <span></span>
                    <span></span>
                </button>
            </nav>
            <div
                id="mobileMenu"
                class={classes!("mobile-menu", menu.is_open().then_some("open"))}
                ref={menu_ref}
            >
                {mobile_links}
            </div>
        </>
    }
}
