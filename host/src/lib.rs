//! Async host for the café client core.
//!
//! # Overview
//! Executes the requests built by `cafe-core` over HTTP and drives its state
//! machines from a tokio runtime:
//!
//! - `ReservationView`: the booking form, with the post-confirmation reset
//!   timer that is cancelled when the view is dropped.
//! - `MenuView`: catalog fetch, category tabs and search.
//!
//! # Design
//! - `Transport` is the only I/O seam; `HttpTransport` implements it with
//!   reqwest, tests substitute their own.
//! - `Site` wires both views to one configured backend.

pub mod config;
pub mod menu;
pub mod reservation;
pub mod transport;

use std::sync::Arc;

use cafe_core::{ApiError, CafeClient};

pub use config::{Config, ConfigError};
pub use menu::MenuView;
pub use reservation::ReservationView;
pub use transport::{HttpTransport, Transport};

/// Both views bound to one backend.
#[derive(Clone)]
pub struct Site {
    client: CafeClient,
    transport: Arc<dyn Transport>,
}

impl Site {
    pub fn new(client: CafeClient, transport: Arc<dyn Transport>) -> Self {
        Self { client, transport }
    }

    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        let transport = HttpTransport::new(config.request_timeout)?;
        Ok(Self::new(
            CafeClient::new(&config.backend_url),
            Arc::new(transport),
        ))
    }

    pub fn client(&self) -> &CafeClient {
        &self.client
    }

    pub fn reservation_view(&self) -> ReservationView {
        ReservationView::new(self.client.clone(), Arc::clone(&self.transport))
    }

    pub fn menu_view(&self) -> MenuView {
        MenuView::new(self.client.clone(), Arc::clone(&self.transport))
    }
}
