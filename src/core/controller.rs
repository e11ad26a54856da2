use crate::domain::model::{College, SearchOutcome};
use crate::utils::error::FinderError;

pub const DEFAULT_PAGE_SIZE: usize = 6;

/// StartSearch 發出的憑證，完成時用來比對是否仍是最新的搜尋
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    generation: u64,
    location: String,
}

/// 畫面狀態只能透過 start_search / search_succeeded / search_failed / load_more 改變
#[derive(Debug, Clone)]
pub struct SearchController {
    generation: u64,
    location: Option<String>,
    results: Vec<College>,
    error: Option<String>,
    loading: bool,
    display_count: usize,
    page_size: usize,
}

impl SearchController {
    pub fn new(page_size: usize) -> Self {
        let page_size = page_size.max(1);
        Self {
            generation: 0,
            location: None,
            results: Vec::new(),
            error: None,
            loading: false,
            display_count: page_size,
            page_size,
        }
    }

    pub fn start_search(&mut self, location: &str) -> SearchTicket {
        self.generation += 1;
        self.location = Some(location.to_string());
        self.results.clear();
        self.error = None;
        self.loading = true;
        self.display_count = self.page_size;

        tracing::debug!(generation = self.generation, "Search started for {}", location);

        SearchTicket {
            generation: self.generation,
            location: location.to_string(),
        }
    }

    pub fn search_succeeded(&mut self, ticket: &SearchTicket, colleges: Vec<College>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }

        if colleges.is_empty() {
            let message = FinderError::NoResultsError {
                location: ticket.location.clone(),
            }
            .user_friendly_message();
            self.error = Some(message);
        } else {
            tracing::info!("Loaded {} colleges for {}", colleges.len(), ticket.location);
            self.results = colleges;
        }
        self.loading = false;
        true
    }

    pub fn search_failed(&mut self, ticket: &SearchTicket, message: impl Into<String>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }

        self.error = Some(message.into());
        self.loading = false;
        true
    }

    /// 套用 orchestrator 的結果；過期的搜尋會被丟棄並回傳 false
    pub fn apply(&mut self, ticket: &SearchTicket, outcome: SearchOutcome) -> bool {
        match outcome {
            SearchOutcome::Success(colleges) => self.search_succeeded(ticket, colleges),
            SearchOutcome::NoResults { .. } => self.search_succeeded(ticket, Vec::new()),
            SearchOutcome::SearchFailed { message, .. } => self.search_failed(ticket, message),
        }
    }

    /// 從已取得的清單再顯示一頁，不會重新查詢；回傳新顯示的筆數
    pub fn load_more(&mut self) -> usize {
        let before = self.visible().len();
        if self.has_more() {
            self.display_count += self.page_size;
        }
        self.visible().len() - before
    }

    pub fn visible(&self) -> &[College] {
        let end = self.display_count.min(self.results.len());
        &self.results[..end]
    }

    /// 最近一次 load_more 新增的部分
    pub fn latest_page(&self) -> &[College] {
        let visible = self.visible();
        let start = visible.len().saturating_sub(1) / self.page_size * self.page_size;
        &visible[start..]
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn remaining(&self) -> usize {
        self.total() - self.visible().len()
    }

    pub fn has_more(&self) -> bool {
        self.remaining() > 0
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    fn is_current(&self, ticket: &SearchTicket) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                "Discarding stale result for {} (generation {}, latest {})",
                ticket.location,
                ticket.generation,
                self.generation
            );
            return false;
        }
        true
    }
}

impl Default for SearchController {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}
