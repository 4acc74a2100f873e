//! Paginated calendar-view retrieval for one mailbox.

use reqwest::Client;
use serde::Deserialize;
use tracing::warn;

use crate::calculation::DateRange;
use crate::models::CalendarEvent;

/// One page of the Graph calendar view.
#[derive(Debug, Deserialize)]
struct CalendarPage {
    #[serde(default)]
    value: Vec<CalendarEvent>,
    #[serde(rename = "@odata.nextLink")]
    next_link: Option<String>,
    #[serde(default)]
    error: Option<GraphError>,
}

/// Graph error object embedded in a page body.
#[derive(Debug, Deserialize)]
struct GraphError {
    message: String,
}

/// Fetches every calendar event for `mailbox` within the range, following
/// `@odata.nextLink` pagination until exhausted. Pages are awaited
/// sequentially; the `Prefer` header asks Graph to localize timestamps to
/// `time_zone`.
///
/// The range endpoints are sent as the midnight wall-clock instants of the
/// request dates.
///
/// Any transport failure, undecodable page, or Graph error object yields an
/// empty sequence for the mailbox — "no events", not a hard failure. The
/// caller's report row then simply carries no meeting time.
pub async fn fetch_events(
    client: &Client,
    mailbox: &str,
    range: DateRange,
    token: &str,
    time_zone: &str,
) -> Vec<CalendarEvent> {
    let mut events = Vec::new();
    let mut url = Some(format!(
        "https://graph.microsoft.com/v1.0/users/{}/calendarView?startDateTime={}&endDateTime={}&$top=100",
        mailbox,
        range.start.format("%Y-%m-%dT00:00:00"),
        range.end.format("%Y-%m-%dT00:00:00"),
    ));

    while let Some(page_url) = url.take() {
        let response = client
            .get(&page_url)
            .bearer_auth(token)
            .header("Prefer", format!("outlook.timezone=\"{time_zone}\""))
            .send()
            .await;

        let page: CalendarPage = match response {
            Ok(response) => match response.json().await {
                Ok(page) => page,
                Err(error) => {
                    warn!(mailbox, %error, "calendar page could not be decoded, treating mailbox as empty");
                    return Vec::new();
                }
            },
            Err(error) => {
                warn!(mailbox, %error, "calendar request failed, treating mailbox as empty");
                return Vec::new();
            }
        };

        if let Some(error) = page.error {
            warn!(mailbox, error = %error.message, "calendar view returned an error, treating mailbox as empty");
            return Vec::new();
        }

        events.extend(page.value);
        url = page.next_link;
    }

    events
}
