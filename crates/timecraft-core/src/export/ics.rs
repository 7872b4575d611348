//! iCalendar (RFC 5545) export of a plan.

use crate::plan::Plan;

pub const DEFAULT_CALENDAR_NAME: &str = "TimeCraft Plan";

const UID_DOMAIN: &str = "@timecraft";
const STAMP_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Escape a TEXT value: backslash, newline, comma, semicolon.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            ',' => out.push_str("\\,"),
            ';' => out.push_str("\\;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render every plan event as a VEVENT inside one VCALENDAR, CRLF-separated.
pub fn plan_to_ics(plan: &Plan, calendar_name: &str) -> String {
    let mut lines = vec![
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        format!("X-WR-CALNAME:{calendar_name}"),
    ];

    for event in &plan.events {
        let uid: String = event.id.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
        lines.push("BEGIN:VEVENT".to_string());
        lines.push(format!("UID:{uid}{UID_DOMAIN}"));
        lines.push(format!("DTSTART:{}", event.start_iso.format(STAMP_FORMAT)));
        lines.push(format!("DTEND:{}", event.end_iso.format(STAMP_FORMAT)));
        lines.push(format!("SUMMARY:{}", escape_text(&event.title)));
        lines.push(format!("DESCRIPTION:{}", escape_text(event.event_type.as_str())));
        lines.push("END:VEVENT".to_string());
    }

    lines.push("END:VCALENDAR".to_string());
    lines.join("\r\n")
}
