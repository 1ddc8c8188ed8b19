use yew::prelude::*;

use crate::components::footer::Footer;
use crate::contact::{open_whatsapp, PROJECT_ENQUIRY};
use crate::pages::home::HERO_STATS;

struct Highlight {
    title: &'static str,
    detail: &'static str,
}

const HIGHLIGHTS: &[Highlight] = &[
    Highlight { title: "Dual Surf Machines", detail: "URBNSURF technology for beginners and advanced surfers" },
    Highlight { title: "Multi-Sport Arena", detail: "Beach volleyball, tennis, cricket, soccer, and badminton" },
    Highlight { title: "Digital Sports Hub", detail: "eSports arena and mixed reality fitness experiences" },
    Highlight { title: "Wellness & Recovery", detail: "Spa, saunas, plunge pools, and elite performance facilities" },
];

struct Partner {
    name: &'static str,
    full_name: &'static str,
    summary: &'static str,
    points: &'static [&'static str],
    url: &'static str,
}

const PARTNERS: &[Partner] = &[
    Partner {
        name: "FIVB",
        full_name: "International Volleyball Federation",
        summary: "Official partnership with FIVB for beach volleyball tournaments and training facilities.",
        points: &["International tournaments", "Training facilities", "Development programs"],
        url: "https://www.fivb.com",
    },
    Partner {
        name: "ITF",
        full_name: "International Tennis Federation",
        summary: "Partnership with ITF for tennis courts, coaching programs, and professional tournaments.",
        points: &["Professional courts", "Coaching programs", "Tournament hosting"],
        url: "https://www.itftennis.com",
    },
];

#[function_component(About)]
pub fn about() -> Html {
    let contact = Callback::from(|_: MouseEvent| open_whatsapp(PROJECT_ENQUIRY));

    html! {
        <main class="about-page">
            <section class="about-hero">
                <h1 aria-label="Welcome to Bali Beach Sports & Recreation Facility">
                    {"Welcome to the Future of Global Beach Sport & Wellness Tourism"}
                </h1>
                <p>{"Bali's integrated arena for surf, play, recovery, and community"}</p>
            </section>

            <section class="about-content">
                <div class="about-mission">
                    <h2>{"This is Not a Resort. It's a Revolution."}</h2>
                    <p>
                        {"The Bali Beach Sports & Recreation Facility represents a paradigm shift in sustainable tourism and community development. "}
                        {"This "}<strong>{"world-class facility"}</strong>
                        {" combines cutting-edge sports technology with environmental responsibility, creating a model for future developments."}
                    </p>
                    <p>
                        {"Our facility is designed to serve both local communities and international visitors, creating over 400 jobs while preserving Bali's natural beauty through innovative sustainability practices."}
                    </p>
                    <p class="about-tagline">{"Where innovation meets tradition, and sustainability drives success."}</p>
                    <button class="whatsapp-button" onclick={contact} aria-label="Contact us via WhatsApp">
                        {"Learn More"}
                    </button>
                </div>

                <div class="about-facts">
                    <div class="stats-grid">
                        { for HERO_STATS.iter().map(|(value, label)| html! {
                            <div class="stat">
                                <div class="stat-value">{*value}</div>
                                <div class="stat-label">{*label}</div>
                            </div>
                        }) }
                    </div>
                    <h3>{"Facility Highlights"}</h3>
                    { for HIGHLIGHTS.iter().map(|h| html! {
                        <div class="highlight">
                            <h4>{h.title}</h4>
                            <p>{h.detail}</p>
                        </div>
                    }) }
                </div>
            </section>

            <section class="partners">
                <h2>{"Our Trusted Partners"}</h2>
                <p>{"Backed by sport, tech, and performance leaders"}</p>
                <div class="partner-grid">
                    { for PARTNERS.iter().map(|p| html! {
                        <div class="partner">
                            <h3>{p.name}</h3>
                            <p class="partner-full-name">{p.full_name}</p>
                            <p>{p.summary}</p>
                            <ul>
                                { for p.points.iter().map(|point| html! { <li>{*point}</li> }) }
                            </ul>
                            <a href={p.url} target="_blank" rel="noopener noreferrer">
                                {format!("Explore {} Partnership", p.name)}
                            </a>
                        </div>
                    }) }
                </div>
            </section>

            <Footer />
        </main>
    }
}
