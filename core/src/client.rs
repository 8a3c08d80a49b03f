//! Stateless HTTP request builder and response parser for the café service.
//!
//! # Design
//! `CafeClient` holds only the service root (`{base_url}/api`). Each
//! operation is split into a `build_*` method that produces an `HttpRequest`
//! and a `parse_*` method that consumes an `HttpResponse`; the host executes
//! the round-trip in between.

use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{
    ContactMessage, ContactReceipt, HealthStatus, MenuCatalog, MenuResponse, Reservation,
    ReservationPayload,
};

/// Synchronous, stateless client for the booking and catalog endpoints.
#[derive(Debug, Clone)]
pub struct CafeClient {
    api_root: String,
}

impl CafeClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            api_root: format!("{}/api", base_url.trim_end_matches('/')),
        }
    }

    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    pub fn build_health(&self) -> HttpRequest {
        self.get(format!("{}/", self.api_root))
    }

    pub fn build_create_reservation(
        &self,
        input: &ReservationPayload,
    ) -> Result<HttpRequest, ApiError> {
        self.post_json(format!("{}/reservations", self.api_root), input)
    }

    pub fn build_list_reservations(&self) -> HttpRequest {
        self.get(format!("{}/reservations", self.api_root))
    }

    pub fn build_get_reservation(&self, id: Uuid) -> HttpRequest {
        self.get(format!("{}/reservations/{id}", self.api_root))
    }

    pub fn build_get_menu(&self) -> HttpRequest {
        self.get(format!("{}/menu", self.api_root))
    }

    pub fn build_send_contact(&self, input: &ContactMessage) -> Result<HttpRequest, ApiError> {
        self.post_json(format!("{}/contact", self.api_root), input)
    }

    pub fn parse_health(&self, response: HttpResponse) -> Result<HealthStatus, ApiError> {
        check_success(&response)?;
        decode(&response)
    }

    /// Any 2xx is a successful booking. The stored record is returned when the
    /// body decodes as one; other bodies are acknowledged and ignored.
    pub fn parse_create_reservation(
        &self,
        response: HttpResponse,
    ) -> Result<Option<Reservation>, ApiError> {
        check_success(&response)?;
        Ok(serde_json::from_str(&response.body).ok())
    }

    pub fn parse_list_reservations(
        &self,
        response: HttpResponse,
    ) -> Result<Vec<Reservation>, ApiError> {
        check_success(&response)?;
        decode(&response)
    }

    pub fn parse_get_reservation(&self, response: HttpResponse) -> Result<Reservation, ApiError> {
        check_success(&response)?;
        decode(&response)
    }

    pub fn parse_get_menu(&self, response: HttpResponse) -> Result<MenuCatalog, ApiError> {
        check_success(&response)?;
        decode::<MenuResponse>(&response).map(|menu| menu.categories)
    }

    pub fn parse_send_contact(&self, response: HttpResponse) -> Result<ContactReceipt, ApiError> {
        check_success(&response)?;
        decode(&response)
    }

    fn get(&self, path: String) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path,
            headers: Vec::new(),
            body: None,
        }
    }

    fn post_json<T: Serialize>(&self, path: String, input: &T) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }
}

/// Map non-2xx status codes to the appropriate `ApiError` variant.
fn check_success(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}

fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}
