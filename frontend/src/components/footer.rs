use chrono::Datelike;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::config::CONTACT_EMAIL;
use crate::Route;

const SOCIAL_LINKS: &[(&str, &str)] = &[
    ("Facebook", "https://www.facebook.com/balibeachsports"),
    ("Instagram", "https://www.instagram.com/balibeachsports"),
    ("LinkedIn", "https://www.linkedin.com/company/balibeachsports"),
    ("YouTube", "https://www.youtube.com/@balibeachsports"),
];

#[function_component(Footer)]
pub fn footer() -> Html {
    let year = chrono::Local::now().year();

    html! {
        <footer class="site-footer">
            <div class="footer-content">
                <div class="footer-brand">
                    <h4>{"Bali Beach Sports & Recreation"}</h4>
                    <p>{"Bali's integrated arena for surf, play, recovery, and community."}</p>
                </div>
                <div class="footer-links">
                    <Link<Route> to={Route::Home} classes="footer-link">{"Home"}</Link<Route>>
                    <Link<Route> to={Route::About} classes="footer-link">{"About"}</Link<Route>>
                    <a href={format!("mailto:{}", CONTACT_EMAIL)} class="footer-link">{CONTACT_EMAIL}</a>
                </div>
                <div class="footer-social">
                    { for SOCIAL_LINKS.iter().map(|(name, href)| html! {
                        <a href={*href} target="_blank" rel="noopener noreferrer" aria-label={*name}>{*name}</a>
                    }) }
                </div>
            </div>
            <div class="footer-bottom">
                {format!("© {} Bali Beach Sports & Recreation Facility. All rights reserved.", year)}
            </div>
        </footer>
    }
}
