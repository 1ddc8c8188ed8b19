/// A validated lead, ready to be stored.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Lead {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub property: Option<String>,
    pub residency: Option<String>,
    pub features: Option<String>,
    pub source: Option<String>,
    pub url: Option<String>,
    pub user_agent: Option<String>,
}

pub const DEFAULT_PROPERTY: &str = "Not specified";
pub const DEFAULT_SOURCE: &str = "website_lead_form";
pub const NEW_STATUS: &str = "New";

pub const SHEET_HEADERS: [&str; 11] = [
    "Timestamp",
    "Full Name",
    "Email",
    "Phone",
    "Property Interest",
    "Residency",
    "Features",
    "Source",
    "URL",
    "User Agent",
    "Status",
];

impl Lead {
    /// Spreadsheet row in `SHEET_HEADERS` order.
    pub fn to_row(&self, timestamp: String) -> Vec<String> {
        let or_blank = |v: &Option<String>| v.clone().unwrap_or_default();
        vec![
            timestamp,
            self.full_name.clone(),
            self.email.clone(),
            self.phone.clone(),
            self.property.clone().unwrap_or_else(|| DEFAULT_PROPERTY.to_string()),
            or_blank(&self.residency),
            or_blank(&self.features),
            self.source.clone().unwrap_or_else(|| DEFAULT_SOURCE.to_string()),
            or_blank(&self.url),
            or_blank(&self.user_agent),
            NEW_STATUS.to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_fills_defaults() {
        let lead = Lead {
            full_name: "Ana".into(),
            email: "ana@example.com".into(),
            phone: "+62 812".into(),
            ..Default::default()
        };
        let row = lead.to_row("10/16/2026, 09:00:00 AM".into());
        assert_eq!(row.len(), SHEET_HEADERS.len());
        assert_eq!(row[4], "Not specified");
        assert_eq!(row[5], "");
        assert_eq!(row[7], "website_lead_form");
        assert_eq!(row[10], "New");
    }

    #[test]
    fn row_keeps_given_values() {
        let lead = Lead {
            full_name: "Ana".into(),
            email: "ana@example.com".into(),
            phone: "1".into(),
            property: Some("Waterpark".into()),
            residency: Some("Indonesia".into()),
            features: Some("Surf, Spa".into()),
            source: Some("landing_hero".into()),
            url: Some("https://example.com/".into()),
            user_agent: Some("Mozilla/5.0".into()),
        };
        let row = lead.to_row("ts".into());
        assert_eq!(
            row,
            vec![
                "ts", "Ana", "ana@example.com", "1", "Waterpark", "Indonesia", "Surf, Spa",
                "landing_hero", "https://example.com/", "Mozilla/5.0", "New",
            ]
        );
    }
}
