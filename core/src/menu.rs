//! Menu catalog browsing: category tabs plus free-text search.
//!
//! `MenuBrowser` stores only the catalog and the user's choices; what to show
//! is always recomputed by `visible_items`, so search and browsing can never
//! disagree.

use tracing::{debug, error};

use crate::client::CafeClient;
use crate::error::ApiError;
use crate::http::HttpRequest;
use crate::types::{MenuCatalog, MenuItem};

/// An item as displayed. `category` is set only in search results.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleItem<'a> {
    pub item: &'a MenuItem,
    pub category: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuBrowser {
    catalog: MenuCatalog,
    active_category: Option<String>,
    search_query: String,
    is_loading: bool,
    fetch_in_flight: bool,
    loaded: bool,
}

impl Default for MenuBrowser {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuBrowser {
    /// A browser that has not fetched yet; it reports loading until the first
    /// fetch resolves.
    pub fn new() -> Self {
        Self {
            catalog: MenuCatalog::new(),
            active_category: None,
            search_query: String::new(),
            is_loading: true,
            fetch_in_flight: false,
            loaded: false,
        }
    }

    pub fn catalog(&self) -> &MenuCatalog {
        &self.catalog
    }

    pub fn categories(&self) -> Vec<&str> {
        self.catalog.category_names().collect()
    }

    pub fn active_category(&self) -> Option<&str> {
        self.active_category.as_deref()
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_searching(&self) -> bool {
        !self.search_query.is_empty()
    }

    /// Starts a catalog fetch. Returns `None` while one is already outstanding
    /// or once a fetch has succeeded; a failed fetch may be retried.
    pub fn begin_load(&mut self, client: &CafeClient) -> Option<HttpRequest> {
        if self.fetch_in_flight {
            debug!("menu fetch already in flight");
            return None;
        }
        if self.loaded {
            debug!("menu already loaded");
            return None;
        }
        self.fetch_in_flight = true;
        self.is_loading = true;
        Some(client.build_get_menu())
    }

    /// Resolves the outstanding fetch. Failures are logged and leave the
    /// current catalog in place; loading ends either way.
    pub fn finish_load(&mut self, outcome: Result<MenuCatalog, ApiError>) {
        self.fetch_in_flight = false;
        self.is_loading = false;

        match outcome {
            Ok(catalog) => {
                debug!(categories = catalog.len(), "menu loaded");
                self.loaded = true;
                self.catalog = catalog;
                if self.active_category.is_none() {
                    self.active_category = self.catalog.category_names().next().map(str::to_string);
                }
            }
            Err(e) => error!(error = %e, "failed to fetch menu"),
        }
    }

    /// Only affects what is shown while no search is active.
    pub fn select_category(&mut self, name: &str) {
        self.active_category = Some(name.to_string());
    }

    /// An empty query returns to category browsing.
    pub fn set_search_query(&mut self, text: &str) {
        self.search_query = text.to_string();
    }

    pub fn visible_items(&self) -> Vec<VisibleItem<'_>> {
        visible_items(&self.catalog, self.active_category.as_deref(), &self.search_query)
    }
}

/// Search mode (non-empty `query`): every item whose name contains the query,
/// case-insensitively, in category order then item order, tagged with its
/// category. Browsing mode: the items of `active`, untagged, or nothing.
pub fn visible_items<'a>(
    catalog: &'a MenuCatalog,
    active: Option<&str>,
    query: &str,
) -> Vec<VisibleItem<'a>> {
    if !query.is_empty() {
        let needle = query.to_lowercase();
        return catalog
            .categories()
            .iter()
            .flat_map(|category| {
                let needle = needle.as_str();
                category
                    .items
                    .iter()
                    .filter(move |item| item.name.to_lowercase().contains(needle))
                    .map(move |item| VisibleItem {
                        item,
                        category: Some(category.name.as_str()),
                    })
            })
            .collect();
    }

    active
        .and_then(|name| catalog.items(name))
        .unwrap_or_default()
        .iter()
        .map(|item| VisibleItem {
            item,
            category: None,
        })
        .collect()
}
