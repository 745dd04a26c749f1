//! Posts explorer
//!
//! Searchable, paginated view over a read-only feed of posts.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    config::ClientConfig,
    error::{ClientError, Result},
};

/// Public feed used when no other URL is configured
pub const DEFAULT_POSTS_URL: &str = "https://jsonplaceholder.typicode.com/posts";

/// Posts shown on one page
pub const POSTS_PER_PAGE: usize = 9;

pub const FETCH_FAILED: &str = "Failed to fetch data from API";

/// One post of the feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: u64,
    pub user_id: u64,
    pub title: String,
    pub body: String,
}

impl Post {
    /// Case-insensitive match on title or body; `needle` must be lowercase
    fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.body.to_lowercase().contains(needle)
    }
}

/// Where posts come from
#[async_trait]
pub trait PostSource: Send + Sync {
    async fn fetch_posts(&self) -> Result<Vec<Post>>;
}

/// Posts fetched over HTTP
pub struct HttpPostSource {
    inner: reqwest::Client,
    url: String,
}

impl HttpPostSource {
    pub fn new(config: &ClientConfig, url: impl Into<String>) -> Result<Self> {
        let inner = config
            .build_client()
            .map_err(|e| ClientError::BuildError(e.to_string()))?;
        Ok(Self {
            inner,
            url: url.into(),
        })
    }

    /// Source reading the public JSONPlaceholder feed
    pub fn with_defaults() -> Result<Self> {
        Self::new(&ClientConfig::default(), DEFAULT_POSTS_URL)
    }
}

#[async_trait]
impl PostSource for HttpPostSource {
    async fn fetch_posts(&self) -> Result<Vec<Post>> {
        debug!("HTTP GET: {}", self.url);
        let response = self.inner.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::HttpStatus {
                status,
                message: status.canonical_reason().unwrap_or("Unknown error").to_string(),
            });
        }
        Ok(response.json().await?)
    }
}

/// Search and pagination state over a [`PostSource`]
pub struct PostsExplorer {
    source: Arc<dyn PostSource>,
    posts: Vec<Post>,
    search: String,
    page: usize,
    loading: bool,
    error: Option<String>,
}

impl PostsExplorer {
    pub fn new(source: Arc<dyn PostSource>) -> Self {
        Self {
            source,
            posts: Vec::new(),
            search: String::new(),
            page: 1,
            loading: false,
            error: None,
        }
    }

    /// Fetch the feed, replacing whatever was loaded before
    pub async fn load(&mut self) -> Result<()> {
        self.loading = true;
        self.error = None;
        let result = self.source.fetch_posts().await;
        self.loading = false;

        match result {
            Ok(posts) => {
                self.posts = posts;
                self.page = self.page.clamp(1, self.total_pages().max(1));
                Ok(())
            }
            Err(e) => {
                warn!("{}: {}", FETCH_FAILED, e);
                self.error = Some(FETCH_FAILED.to_string());
                Err(e)
            }
        }
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Change the search term; always returns to the first page
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
        self.page = 1;
    }

    /// Jump to `page`, clamped to the available pages
    pub fn set_page(&mut self, page: usize) {
        self.page = page.clamp(1, self.total_pages().max(1));
    }

    pub fn next_page(&mut self) {
        self.set_page(self.page + 1);
    }

    pub fn previous_page(&mut self) {
        self.set_page(self.page.saturating_sub(1));
    }

    /// Posts matching the search term, in feed order
    pub fn matching(&self) -> Vec<&Post> {
        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return self.posts.iter().collect();
        }
        self.posts.iter().filter(|post| post.matches(&needle)).collect()
    }

    pub fn total_pages(&self) -> usize {
        self.matching().len().div_ceil(POSTS_PER_PAGE)
    }

    /// Matching posts on the current page
    pub fn current_page(&self) -> Vec<&Post> {
        self.matching()
            .into_iter()
            .skip((self.page - 1) * POSTS_PER_PAGE)
            .take(POSTS_PER_PAGE)
            .collect()
    }
}
