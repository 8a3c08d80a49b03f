use std::sync::{Arc, LazyLock};

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{info, warn};
use uuid::Uuid;
use validator::{Validate, ValidationError};

pub mod error;
pub mod menu;

use error::AppError;
use menu::Categories;

/// Same shape the site's forms check before sending.
pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("EMAIL_PATTERN is a valid regex"));

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Guests {
    Count(u32),
    /// Party too large to book online; staff call back.
    Label(String),
}

#[derive(Clone, Debug, Deserialize, Validate)]
pub struct CreateReservation {
    #[validate(length(min = 2, max = 100, message = "name must be 2-100 characters"))]
    pub name: String,
    #[validate(regex(path = *EMAIL_RE, message = "value is not a valid email address"))]
    pub email: String,
    #[validate(length(min = 10, max = 15, message = "phone must be 10-15 characters"))]
    pub phone: String,
    pub date: NaiveDate,
    #[validate(custom(function = "validate_time"))]
    pub time: String,
    #[validate(custom(function = "validate_guests"))]
    pub guests: Guests,
    #[serde(default)]
    #[validate(length(max = 500, message = "special_requests must be 0-500 characters"))]
    pub special_requests: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Reservation {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub date: NaiveDate,
    pub time: String,
    pub guests: Guests,
    pub special_requests: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Deserialize, Validate)]
pub struct CreateContact {
    #[validate(length(min = 2, max = 100, message = "name must be 2-100 characters"))]
    pub name: String,
    #[validate(regex(path = *EMAIL_RE, message = "value is not a valid email address"))]
    pub email: String,
    #[validate(length(min = 10, max = 1000, message = "message must be 10-1000 characters"))]
    pub message: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Default)]
pub struct Store {
    pub reservations: Vec<Reservation>,
    pub messages: Vec<ContactMessage>,
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    app_with_db(Db::default())
}

/// Router over a caller-supplied store, so tests can inspect what was saved.
pub fn app_with_db(db: Db) -> Router {
    Router::new()
        .route("/api/", get(root))
        .route("/api/reservations", get(list_reservations).post(create_reservation))
        .route("/api/reservations/{id}", get(get_reservation))
        .route("/api/contact", post(create_contact))
        .route("/api/menu", get(get_menu))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn root() -> Json<Value> {
    Json(json!({ "message": "Fika Coffee API" }))
}

async fn create_reservation(
    State(db): State<Db>,
    Json(input): Json<CreateReservation>,
) -> Result<Json<Reservation>, AppError> {
    input
        .validate()
        .map_err(AppError::from)
        .inspect_err(|e| warn!(error = %e, "rejected reservation"))?;

    let reservation = Reservation {
        id: Uuid::new_v4(),
        name: input.name,
        email: input.email,
        phone: input.phone,
        date: input.date,
        time: input.time,
        guests: input.guests,
        special_requests: input.special_requests.unwrap_or_default(),
        status: "pending".to_string(),
        created_at: Utc::now(),
    };
    info!(id = %reservation.id, date = %reservation.date, time = %reservation.time, "reservation stored");
    db.write().await.reservations.push(reservation.clone());
    Ok(Json(reservation))
}

async fn list_reservations(State(db): State<Db>) -> Json<Vec<Reservation>> {
    Json(db.read().await.reservations.clone())
}

async fn get_reservation(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<Json<Reservation>, AppError> {
    let store = db.read().await;
    store
        .reservations
        .iter()
        .find(|r| r.id == id)
        .cloned()
        .map(Json)
        .ok_or(AppError::NotFound("Reservation"))
}

async fn create_contact(
    State(db): State<Db>,
    Json(input): Json<CreateContact>,
) -> Result<Json<ContactMessage>, AppError> {
    input
        .validate()
        .map_err(AppError::from)
        .inspect_err(|e| warn!(error = %e, "rejected contact message"))?;

    let message = ContactMessage {
        id: Uuid::new_v4(),
        name: input.name,
        email: input.email,
        message: input.message,
        created_at: Utc::now(),
    };
    info!(id = %message.id, "contact message stored");
    db.write().await.messages.push(message.clone());
    Ok(Json(message))
}

/// Serialized straight to the response body; going through `Value` would
/// re-sort the categories.
#[derive(Serialize)]
pub struct MenuBody {
    pub categories: Categories,
}

async fn get_menu() -> Json<MenuBody> {
    Json(MenuBody {
        categories: Categories,
    })
}

fn validate_time(time: &str) -> Result<(), ValidationError> {
    if NaiveTime::parse_from_str(time, "%H:%M").is_err() {
        return Err(invalid("time", "time must be HH:MM"));
    }
    Ok(())
}

fn validate_guests(guests: &Guests) -> Result<(), ValidationError> {
    match guests {
        Guests::Count(n) if (1..=20).contains(n) => Ok(()),
        Guests::Label(label) if label == "10+" => Ok(()),
        _ => Err(invalid("guests", "guests must be 1-20 or \"10+\"")),
    }
}

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(guests: Guests) -> CreateReservation {
        CreateReservation {
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            phone: "9876543210".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 11, 2).unwrap(),
            time: "19:30".to_string(),
            guests,
            special_requests: None,
        }
    }

    #[test]
    fn guests_accept_integer_or_call_us_label() {
        let n: Guests = serde_json::from_str("4").unwrap();
        assert_eq!(n, Guests::Count(4));
        let label: Guests = serde_json::from_str(r#""10+""#).unwrap();
        assert_eq!(label, Guests::Label("10+".to_string()));
    }

    #[test]
    fn create_reservation_defaults_special_requests() {
        let parsed: CreateReservation = serde_json::from_str(
            r#"{"name":"Asha","email":"a@b.co","phone":"9876543210","date":"2026-11-02","time":"19:30","guests":2}"#,
        )
        .unwrap();
        assert!(parsed.special_requests.is_none());
    }

    #[test]
    fn create_reservation_rejects_bad_date() {
        let result: Result<CreateReservation, _> = serde_json::from_str(
            r#"{"name":"Asha","email":"a@b.co","phone":"9876543210","date":"02/11/2026","time":"19:30","guests":2}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn validation_bounds() {
        assert!(input(Guests::Count(20)).validate().is_ok());
        assert!(input(Guests::Label("10+".to_string())).validate().is_ok());
        assert!(input(Guests::Count(0)).validate().is_err());
        assert!(input(Guests::Count(21)).validate().is_err());
        assert!(input(Guests::Label("many".to_string())).validate().is_err());

        let mut long_phone = input(Guests::Count(2));
        long_phone.phone = "1".repeat(16);
        assert!(long_phone.validate().is_err());

        let mut bad_time = input(Guests::Count(2));
        bad_time.time = "7pm".to_string();
        assert!(bad_time.validate().is_err());

        let mut long_requests = input(Guests::Count(2));
        long_requests.special_requests = Some("x".repeat(501));
        assert!(long_requests.validate().is_err());
        long_requests.special_requests = Some("é".repeat(500));
        assert!(long_requests.validate().is_ok());
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_email("asha@example.com"));
        assert!(is_valid_email("asha@.example.com"));
        assert!(is_valid_email("asha@a.b."));
        assert!(!is_valid_email("asha@example"));
        assert!(!is_valid_email("asha example@x.com"));
        assert!(!is_valid_email("asha@@example.com"));
    }

    #[test]
    fn failing_fields_become_one_detail() {
        let mut both = input(Guests::Count(2));
        both.name = "A".to_string();
        both.email = "bad".to_string();
        let detail = AppError::from(both.validate().unwrap_err()).to_string();
        assert_eq!(
            detail,
            "value is not a valid email address; name must be 2-100 characters"
        );
    }
}
