use yew::prelude::*;
use yew_router::prelude::*;
use log::{info, Level};
use wasm_bindgen::JsCast;
use web_sys::{window, KeyboardEvent, MouseEvent, Node};

mod config;
mod contact;
mod sections;
mod scroll;
mod components {
    pub mod footer;
    pub mod lead_form;
    pub mod sections_list;
}
mod pages {
    pub mod about;
    pub mod facility;
    pub mod home;
    pub mod not_found;
}

use contact::{open_whatsapp, GENERAL_ENQUIRY};
use pages::{about::About, facility::Facility, home::Home, not_found::NotFound};
use scroll::browser::EventSubscription;
use sections::{SectionRegistry, NAV_GROUPS};

const MOBILE_BREAKPOINT: f64 = 768.0;
const SCROLLED_OFFSET: f64 = 50.0;

#[derive(Clone, Routable, PartialEq, Debug)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/about")]
    About,
    #[at("/projects/:slug")]
    Facility { slug: String },
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => {
            info!("Rendering Home page");
            html! { <Home /> }
        }
        Route::About => {
            info!("Rendering About page");
            html! { <About /> }
        }
        Route::Facility { slug } => {
            info!("Rendering Facility page {}", slug);
            html! { <Facility slug={slug} /> }
        }
        Route::NotFound => {
            info!("Rendering NotFound page");
            html! { <NotFound /> }
        }
    }
}

fn set_body_overflow(value: &str) {
    if let Some(body) = window().and_then(|w| w.document()).and_then(|d| d.body()) {
        let _ = body.style().set_property("overflow", value);
    }
}

/// Section links point at the in-page anchor on the home page and reload the
/// home page with the fragment everywhere else.
fn section_link(on_home: bool, id: u32) -> String {
    if on_home {
        format!("#section-{}", id)
    } else {
        format!("/#section-{}", id)
    }
}

#[function_component(Nav)]
pub fn nav() -> Html {
    let menu_open = use_state(|| false);
    let is_scrolled = use_state(|| false);
    let menu_ref = use_node_ref();
    let burger_ref = use_node_ref();
    let route = use_route::<Route>();
    let on_home = matches!(route, Some(Route::Home));
    let registry = use_memo(|_| SectionRegistry::facility(), ());

    {
        let is_scrolled = is_scrolled.clone();
        use_effect_with_deps(move |_| {
            let subscription = window().and_then(|w| {
                let win = w.clone();
                EventSubscription::new(&w, "scroll", move |_| {
                    is_scrolled.set(win.scroll_y().unwrap_or(0.0) > SCROLLED_OFFSET);
                })
            });
            move || drop(subscription)
        }, ());
    }

    // Listeners that only matter while the mobile menu is open.
    {
        let open_dep = *menu_open;
        let menu_open = menu_open.clone();
        let menu_ref = menu_ref.clone();
        let burger_ref = burger_ref.clone();
        use_effect_with_deps(move |open: &bool| {
            let mut subscriptions: Vec<EventSubscription> = Vec::new();
            if *open {
                set_body_overflow("hidden");
                if let Some(w) = window() {
                    let on_resize = {
                        let menu_open = menu_open.clone();
                        let w = w.clone();
                        move |_: web_sys::Event| {
                            let width = w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
                            if width > MOBILE_BREAKPOINT {
                                menu_open.set(false);
                            }
                        }
                    };
                    subscriptions.extend(EventSubscription::new(&w, "resize", on_resize));

                    if let Some(document) = w.document() {
                        let on_escape = {
                            let menu_open = menu_open.clone();
                            move |e: web_sys::Event| {
                                if e.dyn_ref::<KeyboardEvent>().map(|k| k.key() == "Escape").unwrap_or(false) {
                                    menu_open.set(false);
                                }
                            }
                        };
                        subscriptions.extend(EventSubscription::new(&document, "keydown", on_escape));

                        let on_click_outside = move |e: web_sys::Event| {
                            let Some(target) = e.target().and_then(|t| t.dyn_into::<Node>().ok()) else {
                                return;
                            };
                            let inside = |node: Option<Node>| {
                                node.map(|n| n.contains(Some(&target))).unwrap_or(false)
                            };
                            if !inside(menu_ref.get()) && !inside(burger_ref.get()) {
                                menu_open.set(false);
                            }
                        };
                        subscriptions.extend(EventSubscription::new(&document, "click", on_click_outside));
                    }
                }
            }
            let was_open = *open;
            move || {
                if was_open {
                    set_body_overflow("");
                }
                drop(subscriptions);
            }
        }, open_dep);
    }

    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            menu_open.set(!*menu_open);
        })
    };

    let close_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| {
            menu_open.set(false);
        })
    };

    let contact = {
        let menu_open = menu_open.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            open_whatsapp(GENERAL_ENQUIRY);
            menu_open.set(false);
        })
    };

    let menu_class = if *menu_open {
        "nav-right mobile-menu-open"
    } else {
        "nav-right"
    };

    html! {
        <nav class={classes!("top-nav", (*is_scrolled).then(|| "scrolled"))}>
            <div class="nav-content">
                <Link<Route> to={Route::Home} classes="nav-logo">
                    {"Bali Beach Sports"}
                </Link<Route>>

                <button
                    class="burger-menu"
                    id="hamburgerBtn"
                    ref={burger_ref}
                    aria-expanded={(*menu_open).to_string()}
                    onclick={toggle_menu}
                >
                    <span></span>
                    <span></span>
                    <span></span>
                </button>
                <div class={menu_class} id="mobileMenu" ref={menu_ref}>
                    <div onclick={close_menu.clone()}>
                        <Link<Route> to={Route::Home} classes={classes!("nav-link", on_home.then(|| "active"))}>
                            {"Facilities"}
                        </Link<Route>>
                    </div>
                    { for NAV_GROUPS.iter().filter_map(|group| {
                        let first = registry.first_in_group(group)?;
                        Some(html! {
                            <a href={section_link(on_home, first.id)} class="nav-link" onclick={close_menu.clone()}>
                                {group.label}
                                <sup class="nav-count">{registry.group_count(group)}</sup>
                            </a>
                        })
                    }) }
                    <div onclick={close_menu.clone()}>
                        <Link<Route> to={Route::About} classes={classes!("nav-link", matches!(route, Some(Route::About)).then(|| "active"))}>
                            {"About"}
                        </Link<Route>>
                    </div>
                    <button class="nav-contact-button" onclick={contact}>
                        {"Contact"}
                    </button>
                </div>
            </div>
        </nav>
    }
}

#[function_component]
fn App() -> Html {
    html! {
        <BrowserRouter>
            <Nav />
            <Switch<Route> render={switch} />
        </BrowserRouter>
    }
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(Level::Info).expect("error initializing log");

    info!("Starting application");
    yew::Renderer::<App>::new().render();
}
