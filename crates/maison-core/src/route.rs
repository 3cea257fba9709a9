//! Site routes and the one-shot entry marker.
//!
//! A route is `path[?query][#fragment]`. Two query keys are understood:
//! `entry=true` (the visitor arrived through the warp handoff and motion
//! should start already fast) and `product=<id>` on the collection page.

use crate::catalog::ProductKey;
use crate::constants::ENTRY_PARAM;
use crate::error::RouteError;
use std::fmt;

const PRODUCT_PARAM: &str = "product";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    Home,
    Quiz,
    Collection { product: Option<ProductKey> },
}

impl Page {
    pub fn path(&self) -> &'static str {
        match self {
            Page::Home => "/",
            Page::Quiz => "/quiz",
            Page::Collection { .. } => "/collection",
        }
    }

    /// Pages that host the warp background and run an entry coordinator.
    pub fn has_motion(&self) -> bool {
        matches!(self, Page::Quiz)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Route {
    pub page: Page,
    pub entry: bool,
    pub fragment: Option<String>,
}

impl Route {
    pub fn new(page: Page) -> Self {
        Self {
            page,
            entry: false,
            fragment: None,
        }
    }

    pub fn home() -> Self {
        Self::new(Page::Home)
    }

    pub fn quiz() -> Self {
        Self::new(Page::Quiz)
    }

    pub fn collection(product: Option<ProductKey>) -> Self {
        Self::new(Page::Collection { product })
    }

    pub fn with_entry(mut self) -> Self {
        self.entry = true;
        self
    }

    pub fn without_entry(mut self) -> Self {
        self.entry = false;
        self
    }

    pub fn with_fragment(mut self, fragment: impl Into<String>) -> Self {
        self.fragment = Some(fragment.into());
        self
    }

    pub fn has_entry_flag(&self) -> bool {
        self.entry
    }

    /// Parse a path-relative URL such as `/quiz?entry=true` or `/#discovery-hub`.
    pub fn parse(url: &str) -> Result<Self, RouteError> {
        if !url.starts_with('/') {
            return Err(RouteError::NotAbsolute(url.to_string()));
        }
        let (rest, fragment) = match url.split_once('#') {
            Some((r, f)) if !f.is_empty() => (r, Some(f.to_string())),
            Some((r, _)) => (r, None),
            None => (url, None),
        };
        let (path, query) = rest.split_once('?').unwrap_or((rest, ""));

        let mut entry = false;
        let mut product_param = None;
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match key {
                k if k == ENTRY_PARAM => entry = matches!(value, "true" | "1"),
                PRODUCT_PARAM => product_param = Some(value),
                _ => {}
            }
        }

        let page = match path.trim_end_matches('/') {
            "" | "/index.html" => Page::Home,
            "/quiz" => Page::Quiz,
            "/collection" => Page::Collection {
                product: product_param.map(parse_product).transpose()?,
            },
            other => return Err(RouteError::UnknownPage(other.to_string())),
        };
        Ok(Self {
            page,
            entry,
            fragment,
        })
    }

    pub fn to_url(&self) -> String {
        let mut params: Vec<String> = Vec::new();
        if let Page::Collection {
            product: Some(key),
        } = self.page
        {
            params.push(format!("{}={}", PRODUCT_PARAM, key.product().id));
        }
        if self.entry {
            params.push(format!("{}=true", ENTRY_PARAM));
        }
        let mut url = self.page.path().to_string();
        if !params.is_empty() {
            url.push('?');
            url.push_str(&params.join("&"));
        }
        if let Some(f) = &self.fragment {
            url.push('#');
            url.push_str(f);
        }
        url
    }
}

fn parse_product(value: &str) -> Result<ProductKey, RouteError> {
    value
        .parse::<u32>()
        .ok()
        .and_then(|id| ProductKey::from_id(id).ok())
        .ok_or_else(|| RouteError::Product(value.to_string()))
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_url())
    }
}

/// Soft page transition performed by the host.
pub trait Navigator {
    fn navigate(&self, route: &Route);
}
