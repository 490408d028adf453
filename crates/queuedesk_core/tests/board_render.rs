use chrono::{Local, TimeZone};
use queuedesk_core::render::board::format_clock_time;
use queuedesk_core::{BoardState, BoardView, NotificationBadge, NotificationType, Ticket};

fn ticket(id: i64, number: u32) -> Ticket {
    Ticket::issue(id, number)
}

fn board(tickets: Vec<Ticket>) -> BoardState {
    let current_number = tickets.iter().map(|t| t.number).max().unwrap_or(0);
    BoardState {
        current_number,
        tickets,
    }
}

#[test]
fn empty_board_projects_no_latest_number() {
    let view = BoardView::project(&BoardState::default());
    assert_eq!(view.latest_number, None);
    assert_eq!(view.preparing_count(), 0);
    assert_eq!(view.ready_count(), 0);
}

#[test]
fn groups_split_by_status_newest_first() {
    let mut second = ticket(2_000, 2);
    second.advance(5_000);

    let state = board(vec![ticket(1_000, 1), second, ticket(3_000, 3)]);
    let view = BoardView::project(&state);

    let preparing: Vec<u32> = view.preparing.iter().map(|card| card.number).collect();
    let ready: Vec<u32> = view.ready.iter().map(|card| card.number).collect();

    assert_eq!(preparing, vec![3, 1]);
    assert_eq!(ready, vec![2]);
    assert_eq!(view.preparing_count(), 2);
    assert_eq!(view.ready_count(), 1);
    assert_eq!(view.latest_number, Some(3));
}

#[test]
fn card_carries_completion_time_only_when_ready() {
    let mut done = ticket(1_000, 1);
    done.advance(90_000_000);

    let state = board(vec![done, ticket(2_000, 2)]);
    let view = BoardView::project(&state);

    assert_eq!(view.ready[0].completed_at.as_deref(), Some(format_clock_time(90_000_000).as_str()));
    assert!(!view.ready[0].can_advance);
    assert_eq!(view.preparing[0].completed_at, None);
    assert!(view.preparing[0].can_advance);
}

#[test]
fn empty_name_renders_as_no_name_line() {
    let mut named = ticket(1_000, 1);
    named.name = "Jane".to_string();

    let state = board(vec![ticket(500, 2), named]);
    let view = BoardView::project(&state);

    assert_eq!(view.preparing[0].name.as_deref(), Some("Jane"));
    assert_eq!(view.preparing[1].name, None);
}

#[test]
fn notification_affordance_follows_type_and_url() {
    let mut email_with_url = ticket(1_000, 1);
    email_with_url.notification_type = NotificationType::Email;
    email_with_url.url = "a@example.com".to_string();

    let mut email_without_url = ticket(2_000, 2);
    email_without_url.notification_type = NotificationType::Email;

    let mut messaging = ticket(3_000, 3);
    messaging.notification_type = NotificationType::Messaging;
    messaging.url = "https://chat.example/xyz".to_string();

    let plain = ticket(4_000, 4);

    let state = board(vec![email_with_url, email_without_url, messaging, plain]);
    let view = BoardView::project(&state);

    // Newest first: plain, messaging, email-without-url, email-with-url.
    assert_eq!(view.preparing[0].notification, NotificationBadge::None);
    assert_eq!(
        view.preparing[1].notification,
        NotificationBadge::Link {
            label: "Chat",
            href: "https://chat.example/xyz".to_string(),
        }
    );
    assert_eq!(view.preparing[2].notification, NotificationBadge::Label("Mail"));

    match &view.preparing[3].notification {
        NotificationBadge::Link { label, href } => {
            assert_eq!(*label, "Mail");
            assert!(href.contains("to=a%40example.com"));
            assert!(href.contains("No.%201"));
        }
        other => panic!("expected mail link, got {other:?}"),
    }
}

#[test]
fn mail_link_embeds_ticket_context() {
    let mut named = ticket(1_000, 9);
    named.name = "Jane".to_string();
    named.notification_type = NotificationType::Email;
    named.url = "jane@example.com".to_string();

    let view = BoardView::project(&board(vec![named]));
    let NotificationBadge::Link { href, .. } = &view.preparing[0].notification else {
        panic!("expected a mail link");
    };

    assert!(href.contains("jane%40example.com"));
    assert!(href.contains("Jane"));
    // Reception time appears in the encoded body as HH%3AMM.
    let received = format_clock_time(1_000).replace(':', "%3A");
    assert!(href.contains(&received));
}

#[test]
fn clock_time_formats_zero_padded_local() {
    let epoch_ms = 1_700_000_000_000;
    let expected = Local
        .timestamp_millis_opt(epoch_ms)
        .single()
        .unwrap()
        .format("%H:%M")
        .to_string();

    let formatted = format_clock_time(epoch_ms);
    assert_eq!(formatted, expected);
    assert_eq!(formatted.len(), 5);
    assert_eq!(formatted.as_bytes()[2], b':');
}

#[test]
fn clock_time_out_of_range_renders_placeholder() {
    assert_eq!(format_clock_time(i64::MAX), "--:--");
}
