//! Wire DTOs for the booking and catalog service.
//!
//! # Design
//! These mirror the mock-server's schema but are defined independently;
//! integration tests catch drift between the two crates.
//!
//! `MenuCatalog` deserializes the `categories` JSON object through a map
//! visitor into a `Vec`, so the service's key order survives decoding.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

/// Largest party size bookable online; anything larger is `GuestCount::CallUs`.
pub const MAX_ONLINE_GUESTS: u8 = 10;

const CALL_US_LABEL: &str = "10+";

/// Party size. Serialized as a JSON integer, except `CallUs` which travels as
/// the literal string `"10+"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GuestsRepr", into = "GuestsRepr")]
pub enum GuestCount {
    Count(u8),
    /// Larger party; the café follows up by phone.
    CallUs,
}

impl GuestCount {
    /// Every choice offered by the guests selector, in display order.
    pub fn options() -> impl Iterator<Item = GuestCount> {
        (1..=MAX_ONLINE_GUESTS)
            .map(GuestCount::Count)
            .chain(std::iter::once(GuestCount::CallUs))
    }

    pub fn label(self) -> String {
        match self {
            GuestCount::Count(1) => "1 Guest".to_string(),
            GuestCount::Count(n) => format!("{n} Guests"),
            GuestCount::CallUs => format!("{CALL_US_LABEL} Guests (Call us)"),
        }
    }
}

impl fmt::Display for GuestCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuestCount::Count(n) => write!(f, "{n}"),
            GuestCount::CallUs => f.write_str(CALL_US_LABEL),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("guests must be 1-10 or \"10+\", got {0:?}")]
pub struct InvalidGuestCount(pub String);

/// Parses a selector value: `"1"`..`"10"` or `"10+"`.
impl FromStr for GuestCount {
    type Err = InvalidGuestCount;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == CALL_US_LABEL {
            return Ok(GuestCount::CallUs);
        }
        match s.parse::<u8>() {
            Ok(n) if (1..=MAX_ONLINE_GUESTS).contains(&n) => Ok(GuestCount::Count(n)),
            _ => Err(InvalidGuestCount(s.to_string())),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum GuestsRepr {
    Count(u8),
    Label(String),
}

impl TryFrom<GuestsRepr> for GuestCount {
    type Error = InvalidGuestCount;

    fn try_from(repr: GuestsRepr) -> Result<Self, Self::Error> {
        match repr {
            // Stored bookings may exceed the online limit, so only zero is rejected.
            GuestsRepr::Count(0) => Err(InvalidGuestCount("0".to_string())),
            GuestsRepr::Count(n) => Ok(GuestCount::Count(n)),
            GuestsRepr::Label(label) if label == CALL_US_LABEL => Ok(GuestCount::CallUs),
            GuestsRepr::Label(label) => Err(InvalidGuestCount(label)),
        }
    }
}

impl From<GuestCount> for GuestsRepr {
    fn from(guests: GuestCount) -> Self {
        match guests {
            GuestCount::Count(n) => GuestsRepr::Count(n),
            GuestCount::CallUs => GuestsRepr::Label(CALL_US_LABEL.to_string()),
        }
    }
}

/// Body of `POST /api/reservations`. `date` serializes as `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationPayload {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub date: NaiveDate,
    pub time: String,
    pub guests: GuestCount,
    #[serde(default)]
    pub special_requests: String,
}

/// A stored booking as echoed back by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub date: NaiveDate,
    pub time: String,
    pub guests: GuestCount,
    #[serde(default)]
    pub special_requests: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DietaryTag {
    Veg,
    NonVeg,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub dietary: BTreeSet<DietaryTag>,
}

impl MenuItem {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            description: None,
            price: None,
            dietary: BTreeSet::new(),
        }
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    /// `₹250` for priced items, `Ask` when the menu carries no price.
    pub fn price_label(&self) -> String {
        match self.price {
            Some(price) => format!("₹{price}"),
            None => "Ask".to_string(),
        }
    }

    pub fn is_veg(&self) -> bool {
        self.dietary.contains(&DietaryTag::Veg)
    }

    pub fn is_non_veg(&self) -> bool {
        self.dietary.contains(&DietaryTag::NonVeg)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuCategory {
    pub name: String,
    pub items: Vec<MenuItem>,
}

/// Categories in the order the service sent them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuCatalog {
    categories: Vec<MenuCategory>,
}

impl MenuCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a category, or replaces the items of an existing one in place.
    pub fn insert(&mut self, name: &str, items: Vec<MenuItem>) {
        match self.categories.iter_mut().find(|c| c.name == name) {
            Some(existing) => existing.items = items,
            None => self.categories.push(MenuCategory {
                name: name.to_string(),
                items,
            }),
        }
    }

    pub fn with_category(mut self, name: &str, items: Vec<MenuItem>) -> Self {
        self.insert(name, items);
        self
    }

    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.name.as_str())
    }

    pub fn items(&self, category: &str) -> Option<&[MenuItem]> {
        self.categories
            .iter()
            .find(|c| c.name == category)
            .map(|c| c.items.as_slice())
    }

    pub fn categories(&self) -> &[MenuCategory] {
        &self.categories
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }
}

impl Serialize for MenuCatalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.categories.len()))?;
        for category in &self.categories {
            map.serialize_entry(&category.name, &category.items)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for MenuCatalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CatalogVisitor;

        impl<'de> Visitor<'de> for CatalogVisitor {
            type Value = MenuCatalog;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of category name to menu items")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut catalog = MenuCatalog::new();
                while let Some((name, items)) = access.next_entry::<String, Vec<MenuItem>>()? {
                    catalog.insert(&name, items);
                }
                Ok(catalog)
            }
        }

        deserializer.deserialize_map(CatalogVisitor)
    }
}

/// Envelope of `GET /api/menu`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuResponse {
    pub categories: MenuCatalog,
}

/// Body of `POST /api/contact`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactReceipt {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub message: String,
}
