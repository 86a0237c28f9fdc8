/// Filter and offset-pagination parameters for listing items
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindItemsOptions {
    pub skip: u64,
    pub take: u64,
    pub include_inactive: bool,
    pub search: Option<String>,
}

impl Default for FindItemsOptions {
    fn default() -> Self {
        Self {
            skip: 0,
            take: 10,
            include_inactive: false,
            search: None,
        }
    }
}

impl FindItemsOptions {
    pub fn skip(mut self, skip: u64) -> Self {
        self.skip = skip;
        self
    }

    pub fn take(mut self, take: u64) -> Self {
        self.take = take;
        self
    }

    pub fn include_inactive(mut self, include_inactive: bool) -> Self {
        self.include_inactive = include_inactive;
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// The search term, or `None` when absent or empty
    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref().filter(|term| !term.is_empty())
    }
}
