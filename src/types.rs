use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, format_description::FormatItem, macros::format_description};

/// Same shape as JavaScript's `Date.toISOString()`, which older snapshots were written with.
const ISO_TIMESTAMP_FORMAT: &[FormatItem<'static>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub text: String,
    pub is_sent: bool,
    pub timestamp: String,
}

impl Message {
    /// Outbound message stamped with the current time.
    pub fn sent(text: impl Into<String>) -> Self {
        Self::now(text, true)
    }

    /// Inbound message stamped with the current time.
    pub fn received(text: impl Into<String>) -> Self {
        Self::now(text, false)
    }

    fn now(text: impl Into<String>, is_sent: bool) -> Self {
        Self {
            text: text.into(),
            is_sent,
            timestamp: iso_timestamp(OffsetDateTime::now_utc()),
        }
    }
}

pub fn iso_timestamp(at: OffsetDateTime) -> String {
    at.to_offset(time::UtcOffset::UTC)
        .format(ISO_TIMESTAMP_FORMAT)
        .unwrap_or_default()
}
