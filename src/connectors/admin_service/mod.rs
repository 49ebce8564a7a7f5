pub mod client;
pub mod connector;
pub mod mock;


pub use client::AdminServiceClient;
pub use connector::AdminServiceConnector;

/// Sort order of the user page: ascending by id.
pub const SORT_BY_ID_ASC: &str = "id,asc";

/// The single page of users the page shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    pub page: u32,
    pub size: u32,
    pub sort: String,
}

impl PageQuery {
    /// First page of `size` users sorted by id.
    pub fn first(size: u32) -> Self {
        Self {
            page: 0,
            size,
            sort: SORT_BY_ID_ASC.to_string(),
        }
    }

    pub fn to_query_string(&self) -> String {
        format!("page={}&size={}&sort={}", self.page, self.size, self.sort)
    }
}

impl Default for PageQuery {
    fn default() -> Self {
        Self::first(20)
    }
}
