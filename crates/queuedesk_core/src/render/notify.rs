//! Outbound notification deep links.
//!
//! # Responsibility
//! - Build the mail-composition URL announcing a ready ticket.
//!
//! # Invariants
//! - Links are generated on projection, never persisted; the store only
//!   keeps the raw address/link the staff entered.

use urlencoding::encode;

const COMPOSE_BASE: &str = "https://mail.google.com/mail/?view=cm&fs=1";
const SUBJECT: &str = "[Pickup notice] Your prescription is ready";

/// Builds a mail-composition deep link for a ready-for-pickup notice.
///
/// The body carries the customer name (generic fallback when unset), the
/// queue number and the formatted reception time. All parameters are
/// percent-encoded; the link only opens the user's mail client, nothing is
/// sent from here.
pub fn mail_compose_url(address: &str, name: &str, number: u32, received_at: &str) -> String {
    let body = compose_body(name, number, received_at);
    format!(
        "{COMPOSE_BASE}&to={}&su={}&body={}",
        encode(address),
        encode(SUBJECT),
        encode(&body)
    )
}

fn compose_body(name: &str, number: u32, received_at: &str) -> String {
    let salutation = if name.is_empty() {
        "Dear customer,".to_string()
    } else {
        format!("Dear {name},")
    };

    format!(
        "{salutation}\n\n\
         Thank you for visiting us.\n\
         Your prescription has been prepared.\n\n\
         Ticket number: No. {number}\n\
         Received at: {received_at}\n\n\
         Please stop by to pick it up at your convenience.\n\
         We look forward to seeing you."
    )
}

#[cfg(test)]
mod tests {
    use super::{compose_body, mail_compose_url};

    #[test]
    fn mail_compose_url_encodes_recipient_and_subject() {
        let url = mail_compose_url("jane.doe@example.com", "Jane", 12, "09:41");

        assert!(url.starts_with("https://mail.google.com/mail/?view=cm&fs=1&to="));
        assert!(url.contains("to=jane.doe%40example.com"));
        // Spaces must not survive unencoded anywhere in the query.
        assert!(!url.contains(' '));
    }

    #[test]
    fn compose_body_uses_name_when_present() {
        let body = compose_body("Jane", 7, "14:05");
        assert!(body.starts_with("Dear Jane,"));
        assert!(body.contains("No. 7"));
        assert!(body.contains("14:05"));
    }

    #[test]
    fn compose_body_falls_back_to_generic_salutation() {
        let body = compose_body("", 7, "14:05");
        assert!(body.starts_with("Dear customer,"));
    }
}
