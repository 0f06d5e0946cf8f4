use gloo::dialogs::alert;
use gloo_net::http::Request;
use serde_json::json;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlElement, HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use super::use_site_config;
use crate::config::FormMethod;
use crate::contact::{
    submit_contact, validate, ContactDraft, ContactField, ContactValidationError, FormSubmission,
    FormTransport, SubmitError, SubmitPhase, TransportFailure, TransportResponse, SENDING_LABEL, SUBMIT_LABEL,
};
use crate::logging::{log_event, LogLevel};

/// Sends the contact form with the browser's fetch.
struct FetchTransport;

impl FormTransport for FetchTransport {
    async fn send(&self, submission: &FormSubmission) -> Result<TransportResponse, TransportFailure> {
        let builder = match submission.method {
            FormMethod::Post => Request::post(submission.url.as_str()),
            FormMethod::Get => Request::get(submission.url.as_str()),
        }
        .header("Accept", "application/json");

        let request = match submission.method {
            FormMethod::Post => builder
                .header("Content-Type", "application/x-www-form-urlencoded")
                .body(submission.body.clone()),
            FormMethod::Get => builder.build(),
        }
        .map_err(|error| TransportFailure(error.to_string()))?;

        let response = request
            .send()
            .await
            .map_err(|error| TransportFailure(error.to_string()))?;
        let body = response.text().await.unwrap_or_default();

        Ok(TransportResponse {
            ok: response.ok(),
            status: response.status(),
            body,
        })
    }
}

fn field_value(event: &InputEvent) -> String {
    let Some(target) = event.target() else {
        return String::new();
    };

    if let Some(input) = target.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else if let Some(textarea) = target.dyn_ref::<HtmlTextAreaElement>() {
        textarea.value()
    } else {
        String::new()
    }
}

pub enum DraftAction {
    Edit(ContactField, String),
    Submitted(Option<ContactValidationError>),
    Clear,
}

impl Reducible for ContactDraft {
    type Action = DraftAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            DraftAction::Edit(field, value) => next.edit(field, value),
            DraftAction::Submitted(error) => next.record_submit(error.as_ref()),
            DraftAction::Clear => next.clear(),
        }

        if next == *self {
            self
        } else {
            Rc::new(next)
        }
    }
}

#[function_component(ContactForm)]
pub fn contact_form() -> Html {
    let config = use_site_config();
    let draft = use_reducer(ContactDraft::default);
    let phase = use_state(SubmitPhase::default);
    let email_ref = use_node_ref();

    let on_input = |field: ContactField| {
        let dispatcher = draft.dispatcher();
        Callback::from(move |event: InputEvent| {
            dispatcher.dispatch(DraftAction::Edit(field, field_value(&event)));
        })
    };

    let onsubmit = {
        let config = config.clone();
        let draft = draft.clone();
        let phase = phase.clone();
        let email_ref = email_ref.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            if *phase != SubmitPhase::Ready {
                return;
            }

            let result = validate(&draft.fields);
            draft.dispatch(DraftAction::Submitted(result.as_ref().err().cloned()));

            let contact = match result {
                Ok(contact) => contact,
                Err(error) => {
                    if error.focus_field() == Some(ContactField::Email) {
                        if let Some(email) = email_ref.cast::<HtmlElement>() {
                            let _ = email.focus();
                        }
                    }

                    log_event(
                        &config,
                        LogLevel::Debug,
                        "contact_validation_failed",
                        json!({ "fields": error.flagged_fields().iter().map(|field| field.name()).collect::<Vec<_>>() }),
                    );
                    return;
                }
            };

            phase.set(SubmitPhase::Sending);

            let config = config.clone();
            let dispatcher = draft.dispatcher();
            let phase = phase.clone();
            spawn_local(async move {
                match submit_contact(&FetchTransport, &config, &contact).await {
                    Ok(()) => {
                        log_event(
                            &config,
                            LogLevel::Info,
                            "contact_submitted",
                            json!({ "method": config.form_method.as_str() }),
                        );
                        dispatcher.dispatch(DraftAction::Clear);
                        phase.set(SubmitPhase::Sent);
                    }
                    Err(error) => {
                        let event = match &error {
                            SubmitError::Rejected { .. } => "contact_rejected",
                            SubmitError::Transport(_) => "contact_transport_failed",
                        };
                        log_event(&config, LogLevel::Info, event, json!({ "error": error.to_string() }));
                        alert(error.user_message());
                        phase.set(SubmitPhase::Ready);
                    }
                }
            });
        })
    };

    let button_content = if *phase == SubmitPhase::Sending {
        html! {
            <>
                <svg style="width:18px;height:18px;animation:spin 1s linear infinite" viewBox="0 0 24 24" fill="currentColor">
                    <path d="M12 4V2A10 10 0 002 12h2a8 8 0 018-8z" />
                </svg>
                {SENDING_LABEL}
            </>
        }
    } else {
        html! {
            <>
                {SUBMIT_LABEL}
                <svg class="btn__arrow" viewBox="0 0 24 24" fill="currentColor">
                    <path d="M12 4l-1.41 1.41L16.17 11H4v2h12.17l-5.58 5.59L12 20l8-8z" />
                </svg>
            </>
        }
    };

    html! {
        <section id="contact" class="contact">
            <h2 class="section-title">{"Let's Make Something"}</h2>
            <form id="contactForm" class="contact__form" novalidate=true {onsubmit}>
                <input
                    id="name"
                    name="name"
                    type="text"
                    placeholder="Your name"
                    value={draft.fields.name.clone()}
                    style={draft.flags.style(ContactField::Name)}
                    oninput={on_input(ContactField::Name)}
                />
                <input
                    id="email"
                    name="email"
                    type="email"
                    placeholder="Email address"
                    value={draft.fields.email.clone()}
                    style={draft.flags.style(ContactField::Email)}
                    oninput={on_input(ContactField::Email)}
                    ref={email_ref}
                />
                <textarea
                    id="message"
                    name="message"
                    rows="5"
                    placeholder="Tell me about the project"
                    value={draft.fields.message.clone()}
                    style={draft.flags.style(ContactField::Message)}
                    oninput={on_input(ContactField::Message)}
                />
                <button
                    id="submitBtn"
                    class="btn btn--primary"
                    type="submit"
                    disabled={phase.is_disabled()}
                    style={phase.shows_success().then_some("display: none;")}
                >
                    {button_content}
                </button>
                <div id="formSuccess" class={classes!("form-success", phase.shows_success().then_some("visible"))}>
                    {"Thanks! Your message is on its way."}
                </div>
            </form>
        </section>
    }
}
