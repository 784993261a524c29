use time::{
    OffsetDateTime, UtcOffset, format_description::FormatItem, format_description::well_known::Rfc3339,
    macros::format_description,
};

const MESSAGE_TIME_FORMAT: &[FormatItem<'static>] =
    format_description!("[hour repr:12 padding:zero]:[minute padding:zero] [period case:upper]");

/// Local wall-clock time for a stored ISO timestamp, or `None` if it does not parse.
pub fn format_message_time(timestamp: &str) -> Option<String> {
    let parsed = OffsetDateTime::parse(timestamp, &Rfc3339).ok()?;
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    parsed.to_offset(offset).format(MESSAGE_TIME_FORMAT).ok()
}

pub fn bubble_class(is_sent: bool) -> &'static str {
    if is_sent {
        "message sent"
    } else {
        "message received"
    }
}
