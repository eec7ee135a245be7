//! Page retrieval.
//!
//! Fetching never fails from the caller's point of view: every network,
//! protocol or HTTP error collapses to an `unavailable` page with empty
//! content.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::{Config, Error};

const USER_AGENT: &str = concat!("sitelabel/", env!("CARGO_PKG_VERSION"));

/// Outcome of fetching a URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchStatus {
    /// Successful response on the first request
    Ok,
    /// Successful response reached through one or more redirects
    Redirect,
    /// Any failure
    #[default]
    Unavailable,
}

impl FetchStatus {
    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchStatus::Ok => "ok",
            FetchStatus::Redirect => "redirect",
            FetchStatus::Unavailable => "unavailable",
        }
    }
}

impl fmt::Display for FetchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Raw page content together with its fetch status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub content: String,
    pub status: FetchStatus,
}

impl Page {
    pub fn new(content: impl Into<String>, status: FetchStatus) -> Self {
        Self {
            content: content.into(),
            status,
        }
    }

    pub fn unavailable() -> Self {
        Self::new(String::new(), FetchStatus::Unavailable)
    }

    /// True when there is nothing to classify.
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }
}

/// Something that can turn a URL into a [`Page`].
pub trait Fetcher {
    fn fetch(&self, url: &str) -> Page;
}

/// Blocking HTTP fetcher.
///
/// Redirects are followed by hand so a success reached through them can be
/// reported as [`FetchStatus::Redirect`].
pub struct HttpFetcher {
    agent: ureq::Agent,
    max_redirects: usize,
}

impl HttpFetcher {
    pub fn new(timeout: Duration, max_redirects: usize) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .redirects(0)
            .user_agent(USER_AGENT)
            .build();
        Self {
            agent,
            max_redirects,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.fetch_timeout, config.max_redirects)
    }

    fn follow(&self, url: &str) -> Result<Page, Error> {
        let mut current = Url::parse(url).map_err(|e| Error::Http(format!("{url}: {e}")))?;

        for hop in 0..=self.max_redirects {
            let response = self
                .agent
                .get(current.as_str())
                .call()
                .map_err(|e| Error::Http(e.to_string()))?;

            let code = response.status();
            if (300..400).contains(&code) {
                let location = response
                    .header("location")
                    .ok_or_else(|| Error::Http(format!("{code} without Location header")))?;
                current = current
                    .join(location)
                    .map_err(|e| Error::Http(format!("bad redirect target {location}: {e}")))?;
                continue;
            }

            let content = response.into_string()?;
            let status = if hop == 0 {
                FetchStatus::Ok
            } else {
                FetchStatus::Redirect
            };
            return Ok(Page::new(content, status));
        }

        Err(Error::Http(format!(
            "gave up after {} redirects",
            self.max_redirects
        )))
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Page {
        match self.follow(url) {
            Ok(page) => {
                debug!(url, status = page.status.as_str(), bytes = page.content.len(), "fetched");
                page
            }
            Err(e) => {
                debug!(url, error = %e, "fetch failed");
                Page::unavailable()
            }
        }
    }
}

/// Fetch-once cache keyed by URL.
///
/// Shared by the dataset builder and the heuristic evaluator so a training
/// run sees a single consistent copy of every page.
pub struct PageCache<'a> {
    inner: &'a dyn Fetcher,
    pages: RefCell<HashMap<String, Page>>,
}

impl<'a> PageCache<'a> {
    pub fn new(inner: &'a dyn Fetcher) -> Self {
        Self {
            inner,
            pages: RefCell::new(HashMap::new()),
        }
    }

    /// Number of distinct URLs fetched so far
    pub fn len(&self) -> usize {
        self.pages.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Fetcher for PageCache<'_> {
    fn fetch(&self, url: &str) -> Page {
        if let Some(page) = self.pages.borrow().get(url) {
            return page.clone();
        }
        let page = self.inner.fetch(url);
        self.pages
            .borrow_mut()
            .insert(url.to_string(), page.clone());
        page
    }
}
