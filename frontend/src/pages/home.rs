use yew::prelude::*;

use crate::components::footer::Footer;
use crate::components::lead_form::LeadForm;
use crate::components::sections_list::FacilitySectionsList;
use crate::contact::{open_whatsapp, INVESTMENT_ENQUIRY};
use crate::sections::SectionRegistry;

pub const HERO_STATS: &[(&str, &str)] = &[
    ("15", "Sport Zones"),
    ("400+", "Jobs Created"),
    ("100%", "Sustainable"),
    ("24/7", "Operations"),
];

#[function_component(Home)]
pub fn home() -> Html {
    let registry = use_memo(|_| SectionRegistry::facility(), ());

    let explore = Callback::from(|e: MouseEvent| {
        e.prevent_default();
        open_whatsapp(INVESTMENT_ENQUIRY);
    });

    html! {
        <div class="landing-page">
            <header class="hero">
                <div class="hero-content">
                    <h1>{"Bali Beach Sports & Recreation Facility"}</h1>
                    <p class="hero-subtitle">
                        {"A world-class destination for surf, sport, wellness and community on Bali's coast."}
                    </p>
                    <div class="hero-stats">
                        { for HERO_STATS.iter().map(|(value, label)| html! {
                            <div class="hero-stat">
                                <span class="stat-value">{*value}</span>
                                <span class="stat-label">{*label}</span>
                            </div>
                        }) }
                    </div>
                    <div class="hero-actions">
                        <button class="hero-cta" onclick={explore}>{"Explore Investment"}</button>
                        <a href="#section-2" class="hero-secondary">{"View Facilities"}</a>
                    </div>
                </div>
            </header>

            <FacilitySectionsList registry={(*registry).clone()} />

            <section class="lead-section" id="register">
                <LeadForm />
            </section>

            <Footer />
        </div>
    }
}
