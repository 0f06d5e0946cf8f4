mod about;
mod contact_form;
mod dialogs;
mod dom;
mod hero;
mod navigation;
mod testimonials;
mod work;

use gloo::events::EventListener;
use serde_json::json;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{window, KeyboardEvent};
use yew::prelude::*;

use crate::config::{SiteConfig, CONFIG_ELEMENT_ID};
use crate::filter::enter_keyframes;
use crate::logging::{log_event, LogLevel};
use crate::modal::{Modal, ModalKind, ModalStack};

use about::{About, Stats};
use contact_form::ContactForm;
use dialogs::{ReelModal, VideoModal};
use hero::{CursorGlow, Hero};
use navigation::Navigation;
use testimonials::Testimonials;
use work::{Showreel, Work};

const SPIN_KEYFRAMES: &str = "@keyframes spin { to { transform: rotate(360deg); } }";

pub type ConfigContext = Rc<SiteConfig>;

#[hook]
pub fn use_site_config() -> ConfigContext {
    use_context::<ConfigContext>().unwrap_or_default()
}

pub enum ModalAction {
    Open(Modal),
    Close(ModalKind),
    Key(String),
    DialogClick { kind: ModalKind, on_backdrop: bool },
}

impl Reducible for ModalStack {
    type Action = ModalAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        let changed = match action {
            ModalAction::Open(modal) => {
                next.open(modal);
                true
            }
            ModalAction::Close(kind) => next.close(kind).is_some(),
            ModalAction::Key(key) => next.on_key(&key).is_some(),
            ModalAction::DialogClick { kind, on_backdrop } => {
                next.on_dialog_click(kind, on_backdrop).is_some()
            }
        };

        if changed {
            Rc::new(next)
        } else {
            self
        }
    }
}

#[derive(Properties, PartialEq)]
struct AppProps {
    config: ConfigContext,
}

#[function_component(App)]
fn app(props: &AppProps) -> Html {
    let modals = use_reducer(ModalStack::default);

    {
        let dispatcher = modals.dispatcher();
        use_effect_with((), move |_| {
            let listener = window().and_then(|w| w.document()).map(|document| {
                EventListener::new(&document, "keydown", move |event| {
                    if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
                        dispatcher.dispatch(ModalAction::Key(event.key()));
                    }
                })
            });
            move || drop(listener)
        });
    }

    {
        let config = props.config.clone();
        let active = modals.active().map(Modal::name);
        use_effect_with(active, move |active| {
            let active = *active;
            dom::set_scroll_lock(active.is_some());
            if let Some(name) = active {
                log_event(&config, LogLevel::Debug, "modal_opened", json!({ "modal": name }));
            }

            move || {
                if let Some(name) = active {
                    log_event(&config, LogLevel::Debug, "modal_closed", json!({ "modal": name }));
                }
            }
        });
    }

    let on_open = {
        let dispatcher = modals.dispatcher();
        Callback::from(move |modal: Modal| dispatcher.dispatch(ModalAction::Open(modal)))
    };

    let on_close = {
        let dispatcher = modals.dispatcher();
        Callback::from(move |kind: ModalKind| dispatcher.dispatch(ModalAction::Close(kind)))
    };

    let on_dialog_click = {
        let dispatcher = modals.dispatcher();
        Callback::from(move |(kind, on_backdrop): (ModalKind, bool)| {
            dispatcher.dispatch(ModalAction::DialogClick { kind, on_backdrop })
        })
    };

    let keyframes = format!("{}\n{SPIN_KEYFRAMES}", enter_keyframes());

    html! {
        <ContextProvider<ConfigContext> context={props.config.clone()}>
            <style>{keyframes}</style>
            <CursorGlow />
            <Navigation />
            <main>
                <Hero on_open={on_open.clone()} />
                <Showreel on_open={on_open.clone()} />
                <Work />
                <About />
                <Stats />
                <Testimonials />
                <ContactForm />
            </main>
            <footer class="footer">
                <p>{"© Constantine. All rights reserved."}</p>
            </footer>
            <ReelModal
                open={modals.is_open(ModalKind::Reel)}
                on_close={on_close.clone()}
                on_dialog_click={on_dialog_click.clone()}
            />
            <VideoModal
                request={modals.video().cloned()}
                on_close={on_close}
                on_dialog_click={on_dialog_click}
            />
        </ContextProvider<ConfigContext>>
    }
}

fn load_config() -> SiteConfig {
    let source = dom::element_by_id(CONFIG_ELEMENT_ID).and_then(|element| element.text_content());
    let (config, fallback) = SiteConfig::from_json(source.as_deref());

    if let Some(reason) = fallback {
        log_event(&config, LogLevel::Info, "config_fallback", json!({ "reason": reason.as_str() }));
    }

    config
}

pub fn run() {
    let config = Rc::new(load_config());

    log_event(
        &config,
        LogLevel::Info,
        "app_started",
        json!({
            "formEndpoint": config.form_endpoint.as_str(),
            "intersectionObserver": dom::intersection_supported(),
        }),
    );
    if !dom::intersection_supported() {
        log_event(&config, LogLevel::Info, "intersection_unsupported", json!({}));
    }

    yew::Renderer::<App>::with_root_and_props(
        dom::element_by_id("app").expect("missing #app mount point"),
        AppProps { config },
    )
    .render();
}
