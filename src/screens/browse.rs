use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

use super::lock;
use super::sequence::{RequestSequence, Ticket};
use crate::config::OmdbConfig;
use crate::omdb::{OmdbApi, QueryResult, SearchPage};

#[derive(Debug, Clone, PartialEq)]
pub enum BrowseState {
    /// Nothing fetched yet; the first `start`, `set_page` or `go_back` loads.
    Idle,
    Fetching,
    Ready(SearchPage),
    Error(String),
}

#[derive(Debug)]
struct Inner {
    page: u32,
    state: BrowseState,
    sequence: RequestSequence,
}

/// Fixed-topic list that pages through the configured browse term.
pub struct BrowseViewModel {
    api: Arc<dyn OmdbApi>,
    term: String,
    inner: Mutex<Inner>,
}

impl BrowseViewModel {
    pub fn new(api: Arc<dyn OmdbApi>, config: &OmdbConfig) -> Self {
        Self {
            api,
            term: config.browse_term.clone(),
            inner: Mutex::new(Inner {
                page: 1,
                state: BrowseState::Idle,
                sequence: RequestSequence::default(),
            }),
        }
    }

    pub fn state(&self) -> BrowseState {
        lock(&self.inner).state.clone()
    }

    pub fn page(&self) -> u32 {
        lock(&self.inner).page
    }

    pub fn has_previous(&self) -> bool {
        self.page() > 1
    }

    /// Fetches the current page. Called once when the screen mounts.
    pub async fn start(&self) {
        let (ticket, page) = {
            let mut inner = lock(&self.inner);
            let ticket = inner.sequence.issue();
            inner.state = BrowseState::Fetching;
            (ticket, inner.page)
        };
        self.fetch(ticket, page).await;
    }

    pub async fn set_page(&self, page: u32) {
        if page == 0 {
            warn!("Ignoring browse page 0; pages start at 1");
            return;
        }
        let ticket = {
            let mut inner = lock(&self.inner);
            // Idle means nothing has been fetched yet, so even the current page loads.
            if inner.page == page && inner.state != BrowseState::Idle {
                return;
            }
            inner.page = page;
            inner.state = BrowseState::Fetching;
            inner.sequence.issue()
        };
        self.fetch(ticket, page).await;
    }

    /// Jumps back to the first page; does nothing once page 1 is loaded.
    pub async fn go_back(&self) {
        self.set_page(1).await;
    }

    pub async fn load_more(&self) {
        let next = self.page().saturating_add(1);
        self.set_page(next).await;
    }

    async fn fetch(&self, ticket: Ticket, page: u32) {
        debug!("Browsing '{}' page {}", self.term, page);
        let outcome = self.api.search(&self.term, page, None).await;

        let mut inner = lock(&self.inner);
        if !inner.sequence.is_current(ticket) {
            debug!("Discarding stale browse response for page {}", page);
            return;
        }
        inner.state = match outcome {
            QueryResult::Success(results) => {
                info!("Browse page {} ready ({} movies)", page, results.movies.len());
                BrowseState::Ready(results)
            }
            QueryResult::NotFound => BrowseState::Ready(SearchPage::default()),
            QueryResult::TransportError(message) => {
                warn!("Browse page {} failed: {}", page, message);
                BrowseState::Error(message)
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::testing::{page_of, GatedApi};
    use tokio::task::yield_now;

    fn view_model(api: &Arc<GatedApi>) -> BrowseViewModel {
        BrowseViewModel::new(api.clone(), &OmdbConfig::new("key"))
    }

    #[tokio::test]
    async fn start_fetches_first_page_of_browse_term() {
        let api = GatedApi::new();
        api.respond_search("batman", 1, QueryResult::Success(page_of(&["Batman Begins"])));
        let vm = view_model(&api);
        assert_eq!(vm.state(), BrowseState::Idle);

        vm.start().await;

        assert_eq!(api.calls(), vec!["search:batman:1:".to_string()]);
        assert_eq!(vm.state(), BrowseState::Ready(page_of(&["Batman Begins"])));
        assert!(!vm.has_previous());
    }

    #[tokio::test]
    async fn same_page_is_a_no_op() {
        let api = GatedApi::new();
        api.respond_search("batman", 1, QueryResult::Success(page_of(&["First"])));
        let vm = view_model(&api);
        vm.start().await;
        vm.set_page(1).await;
        vm.go_back().await;
        assert_eq!(api.calls(), vec!["search:batman:1:".to_string()]);
        assert_eq!(vm.state(), BrowseState::Ready(page_of(&["First"])));
    }

    #[tokio::test]
    async fn go_back_as_first_use_fetches_first_page() {
        let api = GatedApi::new();
        api.respond_search("batman", 1, QueryResult::Success(page_of(&["First"])));
        let vm = view_model(&api);

        vm.go_back().await;

        assert_eq!(api.calls(), vec!["search:batman:1:".to_string()]);
        assert_eq!(vm.state(), BrowseState::Ready(page_of(&["First"])));
    }

    #[tokio::test]
    async fn first_set_page_on_current_page_enters_fetching() {
        let api = GatedApi::new();
        let tx = api.gate_search("batman", 1);
        let vm = view_model(&api);

        tokio::join!(vm.set_page(1), async {
            assert_eq!(vm.state(), BrowseState::Fetching);
            let _ = tx.send(QueryResult::Success(page_of(&["First"])));
        });

        assert_eq!(vm.state(), BrowseState::Ready(page_of(&["First"])));
    }

    #[tokio::test]
    async fn page_zero_is_refused() {
        let api = GatedApi::new();
        let vm = view_model(&api);
        vm.set_page(0).await;
        assert_eq!(vm.page(), 1);
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn last_issued_page_wins_when_it_arrives_first() {
        let api = GatedApi::new();
        let tx2 = api.gate_search("batman", 2);
        let tx3 = api.gate_search("batman", 3);
        let vm = view_model(&api);

        tokio::join!(vm.set_page(2), vm.set_page(3), async {
            assert_eq!(vm.state(), BrowseState::Fetching);
            let _ = tx3.send(QueryResult::Success(page_of(&["Page three"])));
            yield_now().await;
            yield_now().await;
            let _ = tx2.send(QueryResult::Success(page_of(&["Page two"])));
        });

        assert_eq!(vm.page(), 3);
        assert_eq!(vm.state(), BrowseState::Ready(page_of(&["Page three"])));
    }

    #[tokio::test]
    async fn last_issued_page_wins_when_it_arrives_last() {
        let api = GatedApi::new();
        let tx2 = api.gate_search("batman", 2);
        let tx3 = api.gate_search("batman", 3);
        let vm = view_model(&api);

        tokio::join!(vm.set_page(2), vm.set_page(3), async {
            let _ = tx2.send(QueryResult::Success(page_of(&["Page two"])));
            yield_now().await;
            yield_now().await;
            assert_eq!(vm.state(), BrowseState::Fetching);
            let _ = tx3.send(QueryResult::Success(page_of(&["Page three"])));
        });

        assert_eq!(vm.state(), BrowseState::Ready(page_of(&["Page three"])));
    }

    #[tokio::test]
    async fn transport_error_is_surfaced_then_recoverable() {
        let api = GatedApi::new();
        api.respond_search(
            "batman",
            1,
            QueryResult::TransportError("connection refused".to_string()),
        );
        api.respond_search("batman", 2, QueryResult::Success(page_of(&["Batman Returns"])));
        let vm = view_model(&api);

        vm.start().await;
        assert_eq!(vm.state(), BrowseState::Error("connection refused".to_string()));

        vm.load_more().await;
        assert_eq!(vm.page(), 2);
        assert_eq!(vm.state(), BrowseState::Ready(page_of(&["Batman Returns"])));
    }

    #[tokio::test]
    async fn go_back_returns_to_first_page() {
        let api = GatedApi::new();
        api.respond_search("batman", 3, QueryResult::Success(page_of(&["Later"])));
        api.respond_search("batman", 1, QueryResult::Success(page_of(&["First"])));
        let vm = view_model(&api);

        vm.set_page(3).await;
        assert!(vm.has_previous());
        vm.go_back().await;

        assert_eq!(vm.page(), 1);
        assert_eq!(vm.state(), BrowseState::Ready(page_of(&["First"])));
    }

    #[tokio::test]
    async fn provider_not_found_shows_empty_page() {
        let api = GatedApi::new();
        api.respond_search("batman", 1, QueryResult::NotFound);
        let vm = view_model(&api);
        vm.start().await;
        assert_eq!(vm.state(), BrowseState::Ready(SearchPage::default()));
    }
}
