//! CSV export of the filtered message list.

use sanad_core::ContactMessage;

/// Column headers, in export order.
const HEADERS: [&str; 7] = ["ID", "Name", "Email", "Service", "Message", "Status", "Date"];

/// Render `messages` as CSV: one header line plus one line per message.
///
/// Status is `Read`/`Unread`; dates are `YYYY-MM-DD HH:MM:SS` UTC. Fields
/// containing commas, quotes, or newlines are double-quoted with internal
/// quotes doubled.
#[must_use]
pub fn export_csv(messages: &[ContactMessage]) -> String {
    let mut lines = Vec::with_capacity(messages.len() + 1);
    lines.push(HEADERS.join(","));

    for message in messages {
        let fields = [
            message.id.to_string(),
            message.name.clone(),
            message.email.clone(),
            message.service.clone(),
            message.message.clone(),
            if message.is_read { "Read" } else { "Unread" }.to_owned(),
            message.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
        ];

        let line: Vec<String> = fields.iter().map(|field| escape_field(field)).collect();
        lines.push(line.join(","));
    }

    lines.join("\n")
}

/// Quote a field if it contains a comma, quote, or newline.
fn escape_field(value: &str) -> String {
    if value.contains('"') || value.contains(',') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_owned()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{DateTime, Utc};

    use sanad_core::MessageId;

    use super::*;

    fn message(id: i64, name: &str, body: &str) -> ContactMessage {
        let timestamp: DateTime<Utc> = "2026-01-05T09:30:00Z".parse().unwrap();
        ContactMessage {
            id: MessageId::new(id),
            name: name.to_owned(),
            email: "a@b.com".to_owned(),
            service: "CRM".to_owned(),
            message: body.to_owned(),
            timestamp,
            is_read: false,
        }
    }

    #[test]
    fn test_export_has_header_plus_one_line_per_row() {
        let messages = vec![message(1, "Ali", "hi"), message(2, "Sara", "hello")];
        let csv = export_csv(&messages);

        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "ID,Name,Email,Service,Message,Status,Date");
        assert_eq!(lines[1], "1,Ali,a@b.com,CRM,hi,Unread,2026-01-05 09:30:00");
    }

    #[test]
    fn test_comma_fields_are_quoted() {
        let csv = export_csv(&[message(1, "Hassan, Ali", "hi")]);
        assert!(csv.contains("\"Hassan, Ali\""));
    }

    #[test]
    fn test_quotes_are_doubled() {
        let csv = export_csv(&[message(1, "Ali", "she said \"hi\"")]);
        assert!(csv.contains("\"she said \"\"hi\"\"\""));
    }

    #[test]
    fn test_newlines_are_quoted() {
        let csv = export_csv(&[message(1, "Ali", "line one\nline two")]);
        assert!(csv.contains("\"line one\nline two\""));
    }

    #[test]
    fn test_empty_export_is_just_the_header() {
        let csv = export_csv(&[]);
        assert_eq!(csv, "ID,Name,Email,Service,Message,Status,Date");
    }
}
