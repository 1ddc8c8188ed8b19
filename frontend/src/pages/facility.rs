use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::footer::Footer;
use crate::components::lead_form::LeadForm;
use crate::contact::{facility_enquiry, open_whatsapp};
use crate::pages::not_found::NotFound;
use crate::sections::SectionRegistry;
use crate::Route;

#[derive(Properties, PartialEq)]
pub struct FacilityProps {
    pub slug: String,
}

#[function_component(Facility)]
pub fn facility(props: &FacilityProps) -> Html {
    let registry = SectionRegistry::facility();
    let Some(section) = registry.find_by_slug(&props.slug).cloned() else {
        log::warn!("no facility for slug {}", props.slug);
        return html! { <NotFound /> };
    };

    let enquire = {
        let name = section.name;
        Callback::from(move |_: MouseEvent| open_whatsapp(&facility_enquiry(name)))
    };
    let related = registry
        .iter()
        .filter(|s| s.category == section.category && s.id != section.id && !s.is_call_to_action())
        .cloned()
        .collect::<Vec<_>>();

    html! {
        <main class="facility-page">
            <div class="facility-hero">
                <img src={section.image} alt={section.name} />
                <div class="facility-hero-text">
                    <span class="section-number">{section.number}</span>
                    <h1>{section.name}</h1>
                    <p class="facility-location">{section.location}</p>
                </div>
            </div>

            <section class="facility-body">
                <h2>{section.headline}</h2>
                <h3>{section.subheadline}</h3>
                <p>{section.description}</p>
                <div class="facility-actions">
                    <button class="whatsapp-button" onclick={enquire}>{"Enquire on WhatsApp"}</button>
                    <a href={format!("/{}", section.href())} class="back-link">{"Back to overview"}</a>
                </div>
                <p class="facility-category">
                    {format!("{} · {} venues in this category", section.category, registry.count_in(section.category))}
                </p>
            </section>

            if !related.is_empty() {
                <section class="facility-related">
                    <h3>{format!("More {}", section.category)}</h3>
                    <ul>
                        { for related.iter().map(|s| html! {
                            <li>
                                <Link<Route> to={Route::Facility { slug: s.slug() }}>{s.name}</Link<Route>>
                            </li>
                        }) }
                    </ul>
                </section>
            }

            <section class="lead-section">
                <LeadForm preselected={Some(section.name.to_string())} />
            </section>

            <Footer />
        </main>
    }
}
