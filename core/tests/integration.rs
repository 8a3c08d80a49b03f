//! Booking and menu flows against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives the core state
//! machines over real HTTP using ureq. Validates that request building,
//! response parsing and the form/browse transitions agree with the server.

use cafe_core::{
    ApiError, CafeClient, ContactMessage, FieldUpdate, GuestCount, HttpMethod, HttpRequest,
    HttpResponse, MenuBrowser, ReservationForm, SubmitError,
};
use chrono::NaiveDate;

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses come back as data for the core client to interpret.
fn execute(req: HttpRequest) -> HttpResponse {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let mut response = match (req.method, req.body) {
        (HttpMethod::Get, _) => agent.get(&req.path).call(),
        (HttpMethod::Post, Some(body)) => {
            agent.post(&req.path).content_type("application/json").send(body.as_bytes())
        }
        (HttpMethod::Post, None) => agent.post(&req.path).send_empty(),
    }
    .expect("HTTP transport error");

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();

    HttpResponse {
        status,
        headers: Vec::new(),
        body,
    }
}

fn start_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
}

#[test]
fn booking_lifecycle() {
    let client = CafeClient::new(&start_server());

    // Step 1: health check.
    let health = client.parse_health(execute(client.build_health())).unwrap();
    assert_eq!(health.message, "Fika Coffee API");

    // Step 2: no bookings yet.
    let list = client
        .parse_list_reservations(execute(client.build_list_reservations()))
        .unwrap();
    assert!(list.is_empty(), "expected no reservations");

    // Step 3: an incomplete form never reaches the server.
    let mut form = ReservationForm::new();
    form.update_field(FieldUpdate::Name("Jo".to_string()));
    form.update_field(FieldUpdate::Email("bad".to_string()));
    assert!(matches!(form.submit(&client, today()), Err(SubmitError::Invalid(_))));
    let list = client
        .parse_list_reservations(execute(client.build_list_reservations()))
        .unwrap();
    assert!(list.is_empty(), "validation failure must not send");

    // Step 4: complete the form and submit.
    form.update_field(FieldUpdate::Email("jo@example.com".to_string()));
    form.update_field(FieldUpdate::Phone("9876543210".to_string()));
    form.update_field(FieldUpdate::Date(NaiveDate::from_ymd_opt(2026, 12, 24)));
    form.update_field(FieldUpdate::Time("18:00".to_string()));
    form.update_field(FieldUpdate::Guests("3".to_string()));
    let req = form.submit(&client, today()).unwrap();
    let outcome = client.parse_create_reservation(execute(req));
    let confirmation = form.complete(outcome).unwrap();
    assert_eq!(confirmation.name, "Jo");
    assert_eq!(confirmation.guests, GuestCount::Count(3));
    let id = confirmation.reference.expect("server echoes the stored booking");

    // Step 5: the booking is retrievable and pending.
    let stored = client
        .parse_get_reservation(execute(client.build_get_reservation(id)))
        .unwrap();
    assert_eq!(stored.status, "pending");
    assert_eq!(stored.date, NaiveDate::from_ymd_opt(2026, 12, 24).unwrap());
    assert_eq!(stored.time, "18:00");

    // Step 6: unknown ids are NotFound.
    let err = client
        .parse_get_reservation(execute(client.build_get_reservation(uuid::Uuid::nil())))
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound));

    // Step 7: reset returns an empty, submittable form.
    form.reset();
    assert!(form.can_submit());
    assert!(form.draft().name.is_empty());
}

/// Any address the form lets through must also pass the service's check,
/// otherwise a locally valid booking comes back as a 422.
#[test]
fn form_and_service_agree_on_email_shape() {
    for email in [
        "jo@example.com",
        "jo@.example.com",
        "jo@a.b.",
        "jo@.a.b",
        "first.last+tag@mail.example.co.in",
        "jo@example",
        "jo@example.",
        "jo@.com",
        "@example.com",
        "jo@@example.com",
        "jo@exa@mple.com",
        "jo @example.com",
        "jo@example.com\n",
        "",
    ] {
        assert_eq!(
            cafe_core::validation::is_valid_email(email),
            mock_server::is_valid_email(email),
            "form and service disagree on {email:?}"
        );
    }
}

#[test]
fn unusual_but_valid_email_books_end_to_end() {
    let client = CafeClient::new(&start_server());

    let mut form = ReservationForm::new();
    for update in [
        FieldUpdate::Name("Jo".to_string()),
        FieldUpdate::Email("jo@.example.com".to_string()),
        FieldUpdate::Phone("9876543210".to_string()),
        FieldUpdate::Date(Some(today())),
        FieldUpdate::Time("12:00".to_string()),
        FieldUpdate::Guests("2".to_string()),
    ] {
        form.update_field(update);
    }
    let req = form.submit(&client, today()).unwrap();
    let confirmation = form
        .complete(client.parse_create_reservation(execute(req)))
        .unwrap();
    assert!(confirmation.reference.is_some());
}

#[test]
fn call_us_booking_is_accepted() {
    let client = CafeClient::new(&start_server());

    let mut form = ReservationForm::new();
    for update in [
        FieldUpdate::Name("Big Party".to_string()),
        FieldUpdate::Email("party@example.com".to_string()),
        FieldUpdate::Phone("9876543210".to_string()),
        FieldUpdate::Date(Some(today())),
        FieldUpdate::Time("21:30".to_string()),
        FieldUpdate::Guests("10+".to_string()),
    ] {
        form.update_field(update);
    }
    let req = form.submit(&client, today()).unwrap();
    let confirmation = form
        .complete(client.parse_create_reservation(execute(req)))
        .unwrap();
    assert_eq!(confirmation.guests, GuestCount::CallUs);
}

#[test]
fn server_rejection_keeps_form_for_retry() {
    let client = CafeClient::new(&start_server());

    // Passes client rules, fails the server's 15-character phone limit.
    let mut form = ReservationForm::new();
    for update in [
        FieldUpdate::Name("Asha".to_string()),
        FieldUpdate::Email("asha@example.com".to_string()),
        FieldUpdate::Phone("+91 98765 43210 ext 9".to_string()),
        FieldUpdate::Date(Some(today())),
        FieldUpdate::Time("12:00".to_string()),
        FieldUpdate::Guests("2".to_string()),
    ] {
        form.update_field(update);
    }
    let before = form.draft().clone();
    let req = form.submit(&client, today()).unwrap();
    let err = form
        .complete(client.parse_create_reservation(execute(req)))
        .unwrap_err();
    assert!(matches!(err, SubmitError::Failed(ApiError::HttpError { status: 422, .. })));
    assert_eq!(form.draft(), &before);
    assert!(form.can_submit());
}

#[test]
fn menu_browse_and_search() {
    let client = CafeClient::new(&start_server());

    let mut browser = MenuBrowser::new();
    let req = browser.begin_load(&client).unwrap();
    browser.finish_load(client.parse_get_menu(execute(req)));

    assert!(!browser.is_loading());
    let categories = browser.categories();
    assert_eq!(categories.len(), 25);
    assert_eq!(categories[0], "Fresh Squeeze");
    assert_eq!(categories[24], "Pawsome");
    assert_eq!(browser.active_category(), Some("Fresh Squeeze"));
    assert_eq!(browser.visible_items()[0].item.name, "Watermelon Juice");

    browser.select_category("Desserts");
    assert!(browser.visible_items().iter().all(|v| v.item.price_label() == "Ask"));

    browser.set_search_query("latte");
    let hits: Vec<(String, String)> = browser
        .visible_items()
        .iter()
        .map(|v| (v.category.unwrap().to_string(), v.item.name.clone()))
        .collect();
    assert_eq!(
        hits,
        vec![
            ("Cold".to_string(), "Iced Latte".to_string()),
            ("Hot".to_string(), "Café Latte".to_string()),
            ("Specials".to_string(), "Matcha Latte".to_string()),
            ("Specials".to_string(), "Mango Matcha Latte".to_string()),
            ("Specials".to_string(), "Tiramisu Iced Latte".to_string()),
            ("All Day Breakfast".to_string(), "English Breakfast Platter".to_string()),
            ("Tapas".to_string(), "Mezze Platter".to_string()),
        ]
    );
}

#[test]
fn contact_message_round_trip() {
    let client = CafeClient::new(&start_server());
    let message = ContactMessage {
        name: "Asha".to_string(),
        email: "asha@example.com".to_string(),
        message: "Do you host birthdays?".to_string(),
    };
    assert!(message.validate().is_ok());

    let req = client.build_send_contact(&message).unwrap();
    let receipt = client.parse_send_contact(execute(req)).unwrap();
    assert_eq!(receipt.name, "Asha");
    assert_eq!(receipt.message, message.message);
}
