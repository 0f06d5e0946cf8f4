use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use js_sys::{Array, Reflect};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    window, Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, MouseEvent, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition,
};
use yew::prelude::*;

use crate::modal::is_backdrop_target;
use crate::reveal::{ObserverZone, OneShot};

pub fn current_scroll_y() -> f64 {
    window().and_then(|w| w.scroll_y().ok()).unwrap_or(0.0)
}

pub fn intersection_supported() -> bool {
    window()
        .map(|w| Reflect::has(&w, &JsValue::from_str("IntersectionObserver")).unwrap_or(false))
        .unwrap_or(false)
}

pub fn element_by_id(id: &str) -> Option<Element> {
    window()?.document()?.get_element_by_id(id)
}

pub fn body() -> Option<HtmlElement> {
    window()?.document()?.body()
}

pub fn set_scroll_lock(locked: bool) {
    let Some(body) = body() else {
        return;
    };

    let style = body.style();
    if locked {
        let _ = style.set_property("overflow", "hidden");
    } else {
        let _ = style.remove_property("overflow");
    }
}

pub fn scroll_to_top_of(element: &Element) {
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Start);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}

pub fn scroll_card_into_view(element: &Element) {
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Nearest);
    options.set_inline(ScrollLogicalPosition::Start);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}

pub fn is_backdrop_click(event: &MouseEvent, backdrop: &NodeRef) -> bool {
    let target = event.target().map(JsValue::from);
    let backdrop = backdrop.get().map(JsValue::from);
    is_backdrop_target(target.as_ref(), backdrop.as_ref())
}

pub fn node_contains(node: &NodeRef, target: Option<&web_sys::Node>) -> bool {
    node.get().is_some_and(|node| node.contains(target))
}

pub fn passive_listener<F>(target: &web_sys::EventTarget, event: &'static str, callback: F) -> EventListener
where
    F: FnMut(&web_sys::Event) + 'static,
{
    EventListener::new_with_options(
        target,
        event,
        EventListenerOptions {
            phase: EventListenerPhase::Bubble,
            passive: true,
        },
        callback,
    )
}

pub struct IntersectionWatch {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl Drop for IntersectionWatch {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

pub fn watch_intersections<F>(element: &Element, zone: ObserverZone, mut on_entry: F) -> Option<IntersectionWatch>
where
    F: FnMut(&IntersectionObserverEntry, &IntersectionObserver) + 'static,
{
    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                if let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() {
                    on_entry(&entry, &observer);
                }
            }
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(zone.threshold));
    options.set_root_margin(&zone.root_margin());

    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options).ok()?;
    observer.observe(element);

    Some(IntersectionWatch {
        observer,
        _callback: callback,
    })
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sighting {
    Waiting,
    Seen,
    Immediate,
}

impl Sighting {
    pub fn is_shown(self) -> bool {
        !matches!(self, Self::Waiting)
    }
}

#[hook]
pub fn use_window_scroll() -> f64 {
    let scroll_y = use_state(current_scroll_y);

    {
        let setter = scroll_y.setter();
        use_effect_with((), move |_| {
            let listener = window().map(|win| {
                passive_listener(&win, "scroll", move |_| setter.set(current_scroll_y()))
            });
            move || drop(listener)
        });
    }

    *scroll_y
}

/// Watches `node` once: flips to `Seen` on the first intersection and stops
/// observing it for good.
#[hook]
pub fn use_sighting(node: NodeRef, zone: ObserverZone) -> Sighting {
    let sighting = use_state(|| Sighting::Waiting);

    {
        let setter = sighting.setter();
        use_effect_with(node, move |node| {
            let mut watch = None;

            if !intersection_supported() {
                setter.set(Sighting::Immediate);
            } else if let Some(element) = node.cast::<Element>() {
                let mut state = OneShot::default();
                watch = watch_intersections(&element, zone, move |entry, observer| {
                    if state.observe(entry.is_intersecting()) {
                        observer.unobserve(&entry.target());
                        setter.set(Sighting::Seen);
                    }
                });
            }

            move || drop(watch)
        });
    }

    *sighting
}
