//! Bills listing container.

use std::cmp::Ordering;
use std::sync::Arc;

use tracing::debug;

use crate::application::dto::ReceiptPreview;
use crate::domain::entities::Bill;
use crate::domain::errors::StoreError;
use crate::domain::ports::{BillStorePort, NavigationPort};
use crate::domain::routes::Route;

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan.", "Fév.", "Mar.", "Avr.", "Mai", "Juin", "Juil.", "Aoû.", "Sep.", "Oct.", "Nov.", "Déc.",
];

/// Container for the bills listing view.
#[derive(Clone)]
pub struct BillsContainer {
    store: Option<Arc<dyn BillStorePort>>,
    navigation: Arc<dyn NavigationPort>,
}

impl BillsContainer {
    /// Creates a container. A `None` store yields an empty listing.
    #[must_use]
    pub fn new(
        store: Option<Arc<dyn BillStorePort>>,
        navigation: Arc<dyn NavigationPort>,
    ) -> Self {
        Self { store, navigation }
    }

    /// Handles the new-bill affordance: navigates to the submission form.
    pub fn handle_click_new_bill(&self) {
        debug!("Opening new bill form");
        self.navigation.navigate(Route::NewBill);
    }

    /// Handles the view-receipt affordance: yields what the preview modal
    /// needs, or nothing when the bill has no stored receipt.
    #[must_use]
    pub fn handle_click_icon_eye(&self, bill: &Bill) -> Option<ReceiptPreview> {
        bill.file_url().map(|url| ReceiptPreview {
            file_url: url.to_string(),
            file_name: bill.file_name().map(str::to_string),
        })
    }

    /// Fetches the listing, most recent first. Records whose date does not
    /// parse sort last, in their stored order.
    ///
    /// # Errors
    /// Propagates the store failure for the listing view to render.
    pub async fn get_bills(&self) -> Result<Vec<Bill>, StoreError> {
        let Some(store) = &self.store else {
            return Ok(Vec::new());
        };

        let mut bills = store.list_bills().await?;
        bills.sort_by(|a, b| match (a.parsed_date(), b.parsed_date()) {
            (Some(da), Some(db)) => db.cmp(&da),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });

        debug!(count = bills.len(), "Loaded bills");
        Ok(bills)
    }

    /// Formats a `YYYY-MM-DD` date for the listing, `4 Avr. 04` style.
    /// Non-dates pass through unchanged.
    #[must_use]
    pub fn format_date(date: &str) -> String {
        use chrono::Datelike;

        chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d").map_or_else(
            |_| date.to_string(),
            |parsed| {
                let month = MONTH_ABBREVIATIONS[parsed.month0() as usize];
                format!("{} {} {:02}", parsed.day(), month, parsed.year() % 100)
            },
        )
    }
}
