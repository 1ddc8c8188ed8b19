
#[cfg(debug_assertions)]
pub fn get_backend_url() -> &'static str {
    "http://localhost:3000"  // backend run locally with `cargo run -p balibeach-backend`
}

#[cfg(not(debug_assertions))]
pub fn get_backend_url() -> &'static str {
    ""  // served by the backend, same origin
}

pub fn leads_endpoint() -> String {
    format!("{}/api/leads", get_backend_url())
}

pub const WHATSAPP_NUMBER: &str = "6281234567890";
pub const CONTACT_EMAIL: &str = "info@balibeachsports.com";
