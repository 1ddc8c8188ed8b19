use crate::config::WHATSAPP_NUMBER;

pub const GENERAL_ENQUIRY: &str = "Hi! I'm interested in learning more about the Bali Beach Sports & Recreation Facility. Could you please provide me with more information?";
pub const INVESTMENT_ENQUIRY: &str = "Hi! I'm interested in learning more about the Bali Beach Sports & Recreation Facility investment opportunity. Could you please provide more information?";
pub const PROJECT_ENQUIRY: &str = "Hi! I'm interested in learning more about the Bali Beach Sports & Recreation Facility. Could you please provide more information about the project scope and investment opportunities?";

/// `wa.me` deep link with a prefilled message.
pub fn whatsapp_url(number: &str, message: &str) -> String {
    let number: String = number.chars().filter(|c| c.is_ascii_digit()).collect();
    format!("https://wa.me/{}?text={}", number, urlencoding::encode(message))
}

pub fn facility_enquiry(facility: &str) -> String {
    format!(
        "Hi! I'm interested in the {} at the Bali Beach Sports & Recreation Facility. Could you please provide more information?",
        facility
    )
}

/// Opens a WhatsApp chat in a new tab.
pub fn open_whatsapp(message: &str) {
    let url = whatsapp_url(WHATSAPP_NUMBER, message);
    if let Some(window) = web_sys::window() {
        if window.open_with_url_and_target(&url, "_blank").is_err() {
            log::warn!("could not open {}", url);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_is_percent_encoded() {
        let url = whatsapp_url("6281234567890", "Hi! Surf & spa?");
        assert_eq!(url, "https://wa.me/6281234567890?text=Hi%21%20Surf%20%26%20spa%3F");
    }

    #[test]
    fn number_keeps_only_digits() {
        let url = whatsapp_url("+62 812-3456", "x");
        assert_eq!(url, "https://wa.me/628123456?text=x");
    }
}
