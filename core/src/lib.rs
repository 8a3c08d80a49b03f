//! Client core for the café site's booking and menu flows.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern), and models the two
//! interactive parts of the site as plain state machines:
//!
//! - `reservation::ReservationForm`: validate, submit once, confirm, reset.
//! - `menu::MenuBrowser`: fetch the catalog, browse by category, search.
//!
//! # Design
//! - `CafeClient` is stateless; it holds only the API root.
//! - Every operation is split into `build_*` and `parse_*`, so the I/O
//!   boundary is explicit and the state machines can be driven by any host.
//! - Nothing here reads a clock. The current date is passed into `submit`
//!   and the post-confirmation reset is scheduled by the host.

pub mod client;
pub mod contact;
pub mod error;
pub mod http;
pub mod menu;
pub mod reservation;
pub mod types;
pub mod validation;

pub use client::CafeClient;
pub use contact::ContactField;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use menu::{MenuBrowser, VisibleItem};
pub use reservation::{
    Confirmation, Field, FieldUpdate, FormStatus, Notice, ReservationDraft, ReservationForm,
    SubmitError, RESET_DELAY, TIME_SLOTS,
};
pub use types::{
    ContactMessage, ContactReceipt, DietaryTag, GuestCount, HealthStatus, MenuCatalog,
    MenuCategory, MenuItem, MenuResponse, Reservation, ReservationPayload,
};
pub use validation::FieldErrors;
