//! In-memory filter/sort/paginate pipeline over the fetched message list.
//!
//! Pipeline order: service filter, read filter, free-text search, sort,
//! page slice. Changing any filter, the sort, or the page size snaps back
//! to page 1; moving between pages does not re-filter.

use sanad_core::ContactMessage;

/// Default rows per dashboard page.
const DEFAULT_PAGE_SIZE: usize = 10;

/// Sort order for the message table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Newest first (the default).
    #[default]
    Newest,
    /// Oldest first.
    Oldest,
    /// Sender name, case-insensitive A-Z.
    Name,
}

/// Read-state filter for the message table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadFilter {
    #[default]
    All,
    Read,
    Unread,
}

/// Counters shown above the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    /// All fetched messages, ignoring filters.
    pub total: usize,
    /// Fetched messages not yet marked read.
    pub unread: usize,
}

/// One renderable page of the filtered list.
#[derive(Debug, Clone)]
pub struct PageView {
    /// Rows for the current page, in the active sort order.
    pub rows: Vec<ContactMessage>,
    /// Current page, 1-based, clamped to the last page.
    pub page: usize,
    /// Page count of the filtered set, at least 1.
    pub total_pages: usize,
    /// Size of the filtered set before slicing.
    pub filtered_total: usize,
}

/// Client-side state for the admin message table.
#[derive(Debug, Clone)]
pub struct Dashboard {
    messages: Vec<ContactMessage>,
    query: String,
    service: String,
    read: ReadFilter,
    sort: SortOrder,
    page_size: usize,
    page: usize,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Dashboard {
    /// Create an empty dashboard with default filters.
    #[must_use]
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            query: String::new(),
            service: "all".to_owned(),
            read: ReadFilter::All,
            sort: SortOrder::default(),
            page_size: DEFAULT_PAGE_SIZE,
            page: 1,
        }
    }

    /// Replace the message list after a refresh. Resets to page 1.
    pub fn set_messages(&mut self, messages: Vec<ContactMessage>) {
        self.messages = messages;
        self.page = 1;
    }

    /// Set the free-text search query. Resets to page 1.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.page = 1;
    }

    /// Set the service filter; `"all"` disables it. Resets to page 1.
    pub fn set_service(&mut self, service: impl Into<String>) {
        self.service = service.into().to_lowercase();
        self.page = 1;
    }

    /// Set the read-state filter. Resets to page 1.
    pub fn set_read(&mut self, read: ReadFilter) {
        self.read = read;
        self.page = 1;
    }

    /// Set the sort order. Resets to page 1.
    pub fn set_sort(&mut self, sort: SortOrder) {
        self.sort = sort;
        self.page = 1;
    }

    /// Set the page size (minimum 1). Resets to page 1.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page = 1;
    }

    /// Jump to a page; clamped to the filtered set in [`Self::view`].
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Move one page forward.
    pub fn next_page(&mut self) {
        self.page += 1;
    }

    /// Move one page back.
    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    /// Counters over the full fetched list, ignoring filters.
    #[must_use]
    pub fn stats(&self) -> Stats {
        Stats {
            total: self.messages.len(),
            unread: self.messages.iter().filter(|m| !m.is_read).count(),
        }
    }

    /// Unique service values (lowercased, empty mapped to "general"),
    /// sorted, for the filter dropdown.
    #[must_use]
    pub fn services(&self) -> Vec<String> {
        let mut services: Vec<String> = self.messages.iter().map(service_value).collect();
        services.sort();
        services.dedup();
        services
    }

    /// The filtered, sorted list before pagination. CSV export runs over
    /// exactly this set.
    #[must_use]
    pub fn filtered(&self) -> Vec<ContactMessage> {
        let query = self.query.trim().to_lowercase();

        let mut filtered: Vec<ContactMessage> = self
            .messages
            .iter()
            .filter(|message| self.service == "all" || service_value(message) == self.service)
            .filter(|message| match self.read {
                ReadFilter::All => true,
                ReadFilter::Read => message.is_read,
                ReadFilter::Unread => !message.is_read,
            })
            .filter(|message| query.is_empty() || searchable_text(message).contains(&query))
            .cloned()
            .collect();

        match self.sort {
            SortOrder::Newest => filtered.sort_by(|a, b| b.timestamp.cmp(&a.timestamp)),
            SortOrder::Oldest => filtered.sort_by(|a, b| a.timestamp.cmp(&b.timestamp)),
            SortOrder::Name => filtered
                .sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase())),
        }

        filtered
    }

    /// Produce the current page of the filtered list.
    ///
    /// The page is clamped to the last page, so a shrinking filtered set
    /// never leaves the view stranded past the end.
    #[must_use]
    pub fn view(&self) -> PageView {
        let filtered = self.filtered();
        let filtered_total = filtered.len();
        let total_pages = filtered_total.div_ceil(self.page_size).max(1);
        let page = self.page.min(total_pages);

        let start = (page - 1) * self.page_size;
        let rows = filtered
            .into_iter()
            .skip(start)
            .take(self.page_size)
            .collect();

        PageView {
            rows,
            page,
            total_pages,
            filtered_total,
        }
    }
}

/// Service value used for filtering and the dropdown: lowercased, empty
/// treated as "general".
fn service_value(message: &ContactMessage) -> String {
    if message.service.is_empty() {
        "general".to_owned()
    } else {
        message.service.to_lowercase()
    }
}

/// Concatenated lowercase text the free-text search runs over.
fn searchable_text(message: &ContactMessage) -> String {
    format!(
        "{} {} {} {} {}",
        message.name, message.email, message.service, message.message, message.id
    )
    .to_lowercase()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{DateTime, Duration, Utc};

    use sanad_core::MessageId;

    use super::*;

    fn message(id: i64, name: &str, service: &str, is_read: bool) -> ContactMessage {
        let base: DateTime<Utc> = "2026-01-01T00:00:00Z".parse().unwrap();
        ContactMessage {
            id: MessageId::new(id),
            name: name.to_owned(),
            email: format!("user{id}@example.com"),
            service: service.to_owned(),
            message: format!("message body {id}"),
            timestamp: base + Duration::minutes(id),
            is_read,
        }
    }

    fn dashboard(messages: Vec<ContactMessage>) -> Dashboard {
        let mut dash = Dashboard::new();
        dash.set_messages(messages);
        dash
    }

    fn view_ids(dash: &Dashboard) -> Vec<i64> {
        dash.view().rows.iter().map(|m| m.id.as_i64()).collect()
    }

    #[test]
    fn test_default_sort_is_newest_first() {
        let dash = dashboard(vec![
            message(1, "Ali", "CRM", false),
            message(3, "Omar", "CRM", false),
            message(2, "Sara", "CRM", false),
        ]);

        assert_eq!(view_ids(&dash), vec![3, 2, 1]);
    }

    #[test]
    fn test_sort_oldest_and_by_name() {
        let mut dash = dashboard(vec![
            message(1, "zara", "CRM", false),
            message(2, "Ali", "CRM", false),
            message(3, "omar", "CRM", false),
        ]);

        dash.set_sort(SortOrder::Oldest);
        assert_eq!(view_ids(&dash), vec![1, 2, 3]);

        // Name sort is case-insensitive
        dash.set_sort(SortOrder::Name);
        assert_eq!(view_ids(&dash), vec![2, 3, 1]);
    }

    #[test]
    fn test_service_filter_maps_empty_to_general() {
        let mut dash = dashboard(vec![
            message(1, "Ali", "CRM", false),
            message(2, "Sara", "", false),
            message(3, "Omar", "Hosting", false),
        ]);

        dash.set_service("CRM");
        assert_eq!(view_ids(&dash), vec![1]);

        dash.set_service("general");
        assert_eq!(view_ids(&dash), vec![2]);

        dash.set_service("all");
        assert_eq!(view_ids(&dash), vec![3, 2, 1]);
    }

    #[test]
    fn test_read_filter_partitions() {
        let mut dash = dashboard(vec![
            message(1, "Ali", "CRM", true),
            message(2, "Sara", "CRM", false),
            message(3, "Omar", "CRM", true),
            message(4, "Huda", "CRM", false),
        ]);

        dash.set_read(ReadFilter::Read);
        let read: Vec<i64> = view_ids(&dash);
        dash.set_read(ReadFilter::Unread);
        let unread: Vec<i64> = view_ids(&dash);

        assert_eq!(read, vec![3, 1]);
        assert_eq!(unread, vec![4, 2]);
    }

    #[test]
    fn test_search_spans_fields_and_id() {
        let mut dash = dashboard(vec![
            message(1, "Ali Hassan", "CRM", false),
            message(2, "Sara Odeh", "Hosting", false),
        ]);

        dash.set_query("  HASSAN ");
        assert_eq!(view_ids(&dash), vec![1]);

        dash.set_query("hosting");
        assert_eq!(view_ids(&dash), vec![2]);

        dash.set_query("user2@");
        assert_eq!(view_ids(&dash), vec![2]);

        // The id participates in the search text
        dash.set_query("1");
        assert!(view_ids(&dash).contains(&1));
    }

    #[test]
    fn test_pagination_covers_all_ids_once() {
        let messages: Vec<ContactMessage> = (1..=25)
            .map(|id| message(id, "User", "CRM", false))
            .collect();
        let mut dash = dashboard(messages);
        dash.set_page_size(10);

        let mut seen = Vec::new();
        let mut sizes = Vec::new();
        for page in 1..=dash.view().total_pages {
            dash.set_page(page);
            let view = dash.view();
            sizes.push(view.rows.len());
            seen.extend(view.rows.iter().map(|m| m.id.as_i64()));
        }

        assert_eq!(sizes, vec![10, 10, 5]);
        // Newest first: 25 down to 1, each exactly once
        assert_eq!(seen, (1..=25).rev().collect::<Vec<i64>>());
    }

    #[test]
    fn test_filter_change_resets_page() {
        let messages: Vec<ContactMessage> = (1..=25)
            .map(|id| message(id, "User", "CRM", false))
            .collect();
        let mut dash = dashboard(messages);
        dash.set_page_size(10);
        dash.set_page(3);
        assert_eq!(dash.view().page, 3);

        dash.set_query("user");
        assert_eq!(dash.view().page, 1);

        // Page navigation alone does not re-filter or reset
        dash.next_page();
        assert_eq!(dash.view().page, 2);
        dash.prev_page();
        assert_eq!(dash.view().page, 1);
        dash.prev_page();
        assert_eq!(dash.view().page, 1);
    }

    #[test]
    fn test_page_clamps_when_filtered_set_shrinks() {
        let messages: Vec<ContactMessage> = (1..=25)
            .map(|id| message(id, "User", "CRM", false))
            .collect();
        let mut dash = dashboard(messages);
        dash.set_page_size(10);
        dash.set_page(99);

        let view = dash.view();
        assert_eq!(view.page, 3);
        assert_eq!(view.rows.len(), 5);
    }

    #[test]
    fn test_empty_list_still_has_one_page() {
        let dash = dashboard(Vec::new());
        let view = dash.view();
        assert_eq!(view.total_pages, 1);
        assert_eq!(view.page, 1);
        assert!(view.rows.is_empty());
    }

    #[test]
    fn test_stats_and_services() {
        let dash = dashboard(vec![
            message(1, "Ali", "CRM", true),
            message(2, "Sara", "", false),
            message(3, "Omar", "Hosting", false),
            message(4, "Huda", "crm", false),
        ]);

        let stats = dash.stats();
        assert_eq!(stats.total, 4);
        assert_eq!(stats.unread, 3);

        assert_eq!(dash.services(), vec!["crm", "general", "hosting"]);
    }
}
