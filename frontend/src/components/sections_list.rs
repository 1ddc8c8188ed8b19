use yew::prelude::*;

use crate::scroll::browser::SectionScroll;
use crate::scroll::ScrollConfig;
use crate::sections::{Section, SectionRegistry};

#[derive(Properties, PartialEq)]
pub struct SectionsListProps {
    pub registry: SectionRegistry,
}

#[function_component(FacilitySectionsList)]
pub fn facility_sections_list(props: &SectionsListProps) -> Html {
    let current = use_state(|| 0usize);

    {
        let current = current.clone();
        use_effect_with_deps(
            move |registry: &SectionRegistry| {
                let on_change = Callback::from(move |index: usize| current.set(index));
                let scroll = SectionScroll::mount(registry.clone(), ScrollConfig::default(), on_change);
                if scroll.is_none() {
                    log::warn!("section scrolling unavailable");
                }
                move || drop(scroll)
            },
            props.registry.clone(),
        );
    }

    let total = props.registry.len();

    html! {
        <div class="facility-sections" id="facilitySectionsContainer">
            <nav class="section-dots" aria-label="Sections">
                { for props.registry.iter().enumerate().map(|(index, section)| html! {
                    <a
                        href={section.href()}
                        class={classes!("section-dot", (index == *current).then(|| "active"))}
                        title={section.name}
                    />
                }) }
            </nav>
            { for props.registry.iter().enumerate().map(|(index, section)| html! {
                <SectionBlock
                    key={section.id}
                    section={section.clone()}
                    index={index}
                    total={total}
                    is_current={index == *current}
                />
            }) }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct SectionBlockProps {
    section: Section,
    index: usize,
    total: usize,
    is_current: bool,
}

#[function_component(SectionBlock)]
fn section_block(props: &SectionBlockProps) -> Html {
    let SectionBlockProps { section, index, total, is_current } = props;
    let details_label = if section.is_call_to_action() {
        "About Us".to_string()
    } else {
        format!("Get More Info About {}", section.name)
    };
    // Only the first screens load eagerly.
    let loading = if *index < 2 { "eager" } else { "lazy" };

    html! {
        <section
            id={section.anchor()}
            class={classes!(
                "facility-section",
                (index % 2 == 1).then(|| "alt"),
                is_current.then(|| "current")
            )}
            data-section-id={section.id.to_string()}
            data-section-name={section.name}
            data-section-category={section.category.to_lowercase()}
            data-section-index={index.to_string()}
        >
            <div class="facility-section-grid">
                <div class="facility-section-header">
                    <span class="section-number">{section.number}</span>
                    <h2>{section.name}</h2>
                    <p class="section-category">{section.category}</p>
                    <div class="section-headlines">
                        <h3>{section.headline}</h3>
                        <p>{section.subheadline}</p>
                    </div>
                    <a href={section.detail_url()} class="details-button mobile-only">
                        {if section.is_call_to_action() { "About Us" } else { "View Details" }}
                    </a>
                </div>
                <a href={section.detail_url()} class="section-image-link">
                    <img src={section.image} alt={section.name} loading={loading} />
                </a>
                <div class="details-button-row desktop-only">
                    <a href={section.detail_url()} class="details-button">{details_label}</a>
                </div>
            </div>
            <div class="section-progress">
                {format!("{:02} / {:02}", index + 1, total)}
            </div>
        </section>
    }
}
