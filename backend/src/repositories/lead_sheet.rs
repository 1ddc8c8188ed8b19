use std::sync::Arc;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::api::google_sheets::{SheetsError, SpreadsheetApi};
use crate::models::lead_models::{Lead, SHEET_HEADERS};

pub fn format_timestamp(at: DateTime<Utc>, timezone: Tz) -> String {
    at.with_timezone(&timezone)
        .format("%m/%d/%Y, %I:%M:%S %p")
        .to_string()
}

/// Lead storage on one tab of a spreadsheet.
pub struct LeadSheet {
    api: Arc<dyn SpreadsheetApi>,
    sheet_name: String,
    timezone: Tz,
}

impl LeadSheet {
    pub fn new(api: Arc<dyn SpreadsheetApi>, sheet_name: impl Into<String>, timezone: Tz) -> Self {
        Self {
            api,
            sheet_name: sheet_name.into(),
            timezone,
        }
    }

    /// A1 range on this tab, e.g. `'Lead Submissions'!A:K`.
    fn range(&self, cells: &str) -> String {
        format!("'{}'!{}", self.sheet_name.replace('\'', "''"), cells)
    }

    async fn write_headers(&self) -> Result<(), SheetsError> {
        let headers = SHEET_HEADERS.iter().map(|h| h.to_string()).collect();
        self.api.write_range(&self.range("A1:K1"), vec![headers]).await
    }

    /// Makes sure the tab exists and starts with the header row.
    pub async fn ensure_headers(&self) -> Result<(), SheetsError> {
        match self.api.read_range(&self.range("A1:A1")).await {
            Ok(values) => {
                let has_header = values
                    .first()
                    .and_then(|row| row.first())
                    .map(|cell| !cell.trim().is_empty())
                    .unwrap_or(false);
                if !has_header {
                    tracing::info!("Sheet {} has no header row, writing it", self.sheet_name);
                    self.write_headers().await?;
                }
                Ok(())
            }
            Err(e) if e.is_bad_request() => {
                tracing::info!("Sheet {} not found, creating it", self.sheet_name);
                self.api.add_sheet(&self.sheet_name).await?;
                self.write_headers().await
            }
            Err(e) => Err(e),
        }
    }

    /// Stores one lead and returns the number of rows the API reports written.
    pub async fn append(&self, lead: &Lead, at: DateTime<Utc>) -> Result<u64, SheetsError> {
        self.ensure_headers().await?;
        let row = lead.to_row(format_timestamp(at, self.timezone));
        self.api.append_rows(&self.range("A:K"), vec![row]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::google_sheets::MockSpreadsheetApi;
    use chrono::TimeZone;
    use mockall::predicate::eq;
    use mockall::Sequence;

    fn lead() -> Lead {
        Lead {
            full_name: "Ana".into(),
            email: "ana@example.com".into(),
            phone: "+62 812".into(),
            ..Default::default()
        }
    }

    fn sheet(mock: MockSpreadsheetApi) -> LeadSheet {
        LeadSheet::new(Arc::new(mock), "Lead Submissions", chrono_tz::Asia::Karachi)
    }

    fn header_row() -> Vec<Vec<String>> {
        vec![SHEET_HEADERS.iter().map(|h| h.to_string()).collect()]
    }

    #[test]
    fn timestamp_is_local_12_hour() {
        let at = Utc.with_ymd_and_hms(2026, 10, 16, 20, 5, 9).unwrap();
        assert_eq!(format_timestamp(at, chrono_tz::Asia::Karachi), "10/17/2026, 01:05:09 AM");
        assert_eq!(format_timestamp(at, chrono_tz::UTC), "10/16/2026, 08:05:09 PM");
    }

    #[test]
    fn sheet_names_are_quoted() {
        let sheet = LeadSheet::new(Arc::new(MockSpreadsheetApi::new()), "Ana's Leads", chrono_tz::UTC);
        assert_eq!(sheet.range("A:K"), "'Ana''s Leads'!A:K");
    }

    #[tokio::test]
    async fn existing_header_only_appends() {
        let mut mock = MockSpreadsheetApi::new();
        mock.expect_read_range()
            .with(eq("'Lead Submissions'!A1:A1"))
            .times(1)
            .returning(|_| Ok(vec![vec!["Timestamp".to_string()]]));
        mock.expect_add_sheet().never();
        mock.expect_write_range().never();
        mock.expect_append_rows()
            .withf(|range, rows| {
                range == "'Lead Submissions'!A:K" && rows.len() == 1 && rows[0].len() == 11
            })
            .times(1)
            .returning(|_, _| Ok(1));

        let rows = sheet(mock).append(&lead(), Utc::now()).await.unwrap();
        assert_eq!(rows, 1);
    }

    #[tokio::test]
    async fn missing_tab_is_created_with_headers() {
        let mut seq = Sequence::new();
        let mut mock = MockSpreadsheetApi::new();
        mock.expect_read_range()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(SheetsError::Api { status: 400, message: "Unable to parse range".into() }));
        mock.expect_add_sheet()
            .with(eq("Lead Submissions"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        mock.expect_write_range()
            .withf(|range, values| range == "'Lead Submissions'!A1:K1" && *values == header_row())
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        mock.expect_append_rows()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(1));

        assert_eq!(sheet(mock).append(&lead(), Utc::now()).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn empty_tab_gets_headers() {
        let mut mock = MockSpreadsheetApi::new();
        mock.expect_read_range().times(1).returning(|_| Ok(Vec::new()));
        mock.expect_add_sheet().never();
        mock.expect_write_range()
            .withf(|_, values| *values == header_row())
            .times(1)
            .returning(|_, _| Ok(()));
        mock.expect_append_rows().times(1).returning(|_, _| Ok(1));

        sheet(mock).append(&lead(), Utc::now()).await.unwrap();
    }

    #[tokio::test]
    async fn other_read_errors_abort_before_append() {
        let mut mock = MockSpreadsheetApi::new();
        mock.expect_read_range()
            .times(1)
            .returning(|_| Err(SheetsError::Api { status: 403, message: "The caller does not have permission".into() }));
        mock.expect_add_sheet().never();
        mock.expect_append_rows().never();

        let err = sheet(mock).append(&lead(), Utc::now()).await.unwrap_err();
        assert!(matches!(err, SheetsError::Api { status: 403, .. }));
    }

    #[tokio::test]
    async fn failed_sheet_creation_propagates() {
        let mut mock = MockSpreadsheetApi::new();
        mock.expect_read_range()
            .returning(|_| Err(SheetsError::Api { status: 400, message: "missing".into() }));
        mock.expect_add_sheet()
            .returning(|_| Err(SheetsError::Api { status: 400, message: "A sheet with the name already exists".into() }));
        mock.expect_append_rows().never();

        assert!(sheet(mock).append(&lead(), Utc::now()).await.is_err());
    }
}
