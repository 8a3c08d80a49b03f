//! Menu browser bound to a transport.

use std::sync::Arc;

use cafe_core::{ApiError, CafeClient, MenuBrowser, MenuCatalog, VisibleItem};

use crate::transport::Transport;

/// Finishes the outstanding fetch when dropped, as a cancellation if no
/// outcome was recorded, so loading never sticks.
struct PendingLoad<'a> {
    browser: &'a mut MenuBrowser,
    outcome: Option<Result<MenuCatalog, ApiError>>,
}

impl Drop for PendingLoad<'_> {
    fn drop(&mut self) {
        let outcome = self
            .outcome
            .take()
            .unwrap_or_else(|| Err(ApiError::Transport("menu fetch cancelled".to_string())));
        self.browser.finish_load(outcome);
    }
}

pub struct MenuView {
    client: CafeClient,
    transport: Arc<dyn Transport>,
    browser: MenuBrowser,
}

impl MenuView {
    pub fn new(client: CafeClient, transport: Arc<dyn Transport>) -> Self {
        Self {
            client,
            transport,
            browser: MenuBrowser::new(),
        }
    }

    /// Fetches the catalog. Failures are logged by the browser and leave an
    /// empty menu. A call while a fetch is outstanding, or after the catalog
    /// has loaded, does nothing.
    pub async fn load(&mut self) {
        let Self {
            client,
            transport,
            browser,
        } = self;
        let Some(request) = browser.begin_load(client) else {
            return;
        };
        let mut pending = PendingLoad {
            browser,
            outcome: None,
        };

        let outcome = match transport.execute(request).await {
            Ok(response) => client.parse_get_menu(response),
            Err(e) => Err(e),
        };
        pending.outcome = Some(outcome);
    }

    pub fn browser(&self) -> &MenuBrowser {
        &self.browser
    }

    pub fn is_loading(&self) -> bool {
        self.browser.is_loading()
    }

    pub fn categories(&self) -> Vec<&str> {
        self.browser.categories()
    }

    pub fn active_category(&self) -> Option<&str> {
        self.browser.active_category()
    }

    pub fn select_category(&mut self, name: &str) {
        self.browser.select_category(name);
    }

    pub fn set_search_query(&mut self, text: &str) {
        self.browser.set_search_query(text);
    }

    pub fn visible_items(&self) -> Vec<VisibleItem<'_>> {
        self.browser.visible_items()
    }
}
