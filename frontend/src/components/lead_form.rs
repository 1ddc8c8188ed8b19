use gloo_net::http::Request;
use serde::{Deserialize, Serialize};
use web_sys::{window, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::config;
use crate::sections::SectionRegistry;

const GENERIC_FAILURE: &str = "We couldn't submit your details right now. Please try again later.";

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LeadRequest {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub residency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<String>,
    pub source: &'static str,
    pub url: String,
    pub user_agent: String,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct LeadResponse {
    success: bool,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Properties, PartialEq)]
pub struct LeadFormProps {
    #[prop_or_default]
    pub preselected: Option<String>,
}

pub enum LeadFormMsg {
    SetFullName(String),
    SetEmail(String),
    SetPhone(String),
    SetProperty(String),
    SetResidency(String),
    SetFeatures(String),
    Submit,
    Submitted,
    Rejected(String),
    Failed(String),
}

#[derive(Clone, Debug, PartialEq)]
enum FormStatus {
    Success,
    Error(String),
}

pub struct LeadForm {
    full_name: String,
    email: String,
    phone: String,
    property: String,
    residency: String,
    features: String,
    submitting: bool,
    status: Option<FormStatus>,
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Loose client-side check; the backend has the final word.
fn plausible_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .map(|(host, tld)| !host.is_empty() && !tld.is_empty())
                    .unwrap_or(false)
        }
        None => false,
    }
}

impl LeadForm {
    fn validate(&self) -> Result<(), &'static str> {
        if self.full_name.trim().is_empty() || self.email.trim().is_empty() || self.phone.trim().is_empty() {
            return Err("Please fill in your name, email and phone number.");
        }
        if !plausible_email(self.email.trim()) {
            return Err("Please enter a valid email address.");
        }
        Ok(())
    }

    fn request(&self) -> LeadRequest {
        let (url, user_agent) = window()
            .map(|w| {
                (
                    w.location().href().unwrap_or_default(),
                    w.navigator().user_agent().unwrap_or_default(),
                )
            })
            .unwrap_or_default();
        LeadRequest {
            full_name: self.full_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            property: non_empty(&self.property),
            residency: non_empty(&self.residency),
            features: non_empty(&self.features),
            source: "website_lead_form",
            url,
            user_agent,
        }
    }
}

impl Component for LeadForm {
    type Message = LeadFormMsg;
    type Properties = LeadFormProps;

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            full_name: String::new(),
            email: String::new(),
            phone: String::new(),
            property: ctx.props().preselected.clone().unwrap_or_default(),
            residency: String::new(),
            features: String::new(),
            submitting: false,
            status: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            LeadFormMsg::SetFullName(value) => self.full_name = value,
            LeadFormMsg::SetEmail(value) => self.email = value,
            LeadFormMsg::SetPhone(value) => self.phone = value,
            LeadFormMsg::SetProperty(value) => self.property = value,
            LeadFormMsg::SetResidency(value) => self.residency = value,
            LeadFormMsg::SetFeatures(value) => self.features = value,
            LeadFormMsg::Submit => {
                if self.submitting {
                    return false;
                }
                if let Err(message) = self.validate() {
                    self.status = Some(FormStatus::Error(message.to_string()));
                    return true;
                }

                let lead = self.request();
                self.submitting = true;
                self.status = None;
                ctx.link().send_future(async move {
                    let request = match Request::post(&config::leads_endpoint()).json(&lead) {
                        Ok(req) => req,
                        Err(e) => return LeadFormMsg::Failed(e.to_string()),
                    };
                    match request.send().await {
                        Ok(response) => {
                            let status = response.status();
                            match response.json::<LeadResponse>().await {
                                Ok(body) if body.success => LeadFormMsg::Submitted,
                                Ok(body) if status == 400 => LeadFormMsg::Rejected(
                                    body.error.unwrap_or_else(|| GENERIC_FAILURE.to_string()),
                                ),
                                Ok(body) => LeadFormMsg::Failed(
                                    body.error.unwrap_or_else(|| format!("status {}", status)),
                                ),
                                Err(e) => LeadFormMsg::Failed(e.to_string()),
                            }
                        }
                        Err(e) => LeadFormMsg::Failed(e.to_string()),
                    }
                });
            }
            LeadFormMsg::Submitted => {
                log::info!("lead submitted");
                self.submitting = false;
                self.status = Some(FormStatus::Success);
                self.full_name.clear();
                self.email.clear();
                self.phone.clear();
                self.residency.clear();
                self.features.clear();
            }
            LeadFormMsg::Rejected(message) => {
                self.submitting = false;
                self.status = Some(FormStatus::Error(message));
            }
            LeadFormMsg::Failed(reason) => {
                log::error!("lead submission failed: {}", reason);
                self.submitting = false;
                self.status = Some(FormStatus::Error(GENERIC_FAILURE.to_string()));
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let onsubmit = link.callback(|e: SubmitEvent| {
            e.prevent_default();
            LeadFormMsg::Submit
        });
        let on_name = link.callback(|e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            LeadFormMsg::SetFullName(input.value())
        });
        let on_email = link.callback(|e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            LeadFormMsg::SetEmail(input.value())
        });
        let on_phone = link.callback(|e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            LeadFormMsg::SetPhone(input.value())
        });
        let on_property = link.callback(|e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            LeadFormMsg::SetProperty(select.value())
        });
        let on_residency = link.callback(|e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            LeadFormMsg::SetResidency(input.value())
        });
        let on_features = link.callback(|e: InputEvent| {
            let area: HtmlTextAreaElement = e.target_unchecked_into();
            LeadFormMsg::SetFeatures(area.value())
        });

        let registry = SectionRegistry::facility();

        html! {
            <form class="lead-form" id="lead-form" onsubmit={onsubmit}>
                <h3>{"Register Your Interest"}</h3>

                if let Some(status) = &self.status {
                    {
                        match status {
                            FormStatus::Success => html! {
                                <div class="success-message">
                                    {"Thank you! Our team will be in touch shortly."}
                                </div>
                            },
                            FormStatus::Error(message) => html! {
                                <div class="error-message">{message.clone()}</div>
                            },
                        }
                    }
                }

                <input type="text" placeholder="Full name" value={self.full_name.clone()} oninput={on_name} />
                <input type="email" placeholder="Email" value={self.email.clone()} oninput={on_email} />
                <input type="tel" placeholder="Phone" value={self.phone.clone()} oninput={on_phone} />
                <select onchange={on_property}>
                    <option value="" selected={self.property.is_empty()}>{"Area of interest"}</option>
                    { for registry.iter().filter(|s| !s.is_call_to_action()).map(|s| html! {
                        <option value={s.name} selected={self.property == s.name}>{s.name}</option>
                    }) }
                </select>
                <input type="text" placeholder="Country of residency" value={self.residency.clone()} oninput={on_residency} />
                <textarea placeholder="What are you looking for?" value={self.features.clone()} oninput={on_features} />
                <button type="submit" disabled={self.submitting}>
                    {if self.submitting { "Sending..." } else { "Submit" }}
                </button>
            </form>
        }
    }
}
