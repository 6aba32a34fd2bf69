//! Explicit pagination cursor state.
//!
//! Spotify paginates with an opaque `next` URL: query parameters apply only
//! to the very first page, and every subsequent request must use the `next`
//! link verbatim. [`PageCursor`] makes that rule a visible invariant instead
//! of an accidental consequence of clearing a params variable.

/// One step of a paginated walk: a URL plus the query parameters that apply
/// to it.
///
/// The first page of a walk carries `params`; cursors built from a `next`
/// link never do, because the link already embeds them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCursor {
    /// The URL to request.
    pub url: String,
    /// Query parameters for this request. `None` when following a `next`
    /// link.
    pub params: Option<Vec<(String, String)>>,
}

impl PageCursor {
    /// Cursor for the first page of a walk, with explicit query parameters.
    pub fn first(url: impl Into<String>, params: Vec<(String, String)>) -> Self {
        Self {
            url: url.into(),
            params: Some(params),
        }
    }

    /// Cursor following a server-supplied `next` link. Carries no params.
    pub fn follow(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            params: None,
        }
    }

    /// The full request URL, with params encoded when present.
    pub fn request_url(&self) -> String {
        match &self.params {
            None => self.url.clone(),
            Some(params) => {
                let query: String = params
                    .iter()
                    .map(|(k, v)| {
                        format!("{}={}", urlencoding::encode(k), urlencoding::encode(v))
                    })
                    .collect::<Vec<_>>()
                    .join("&");
                format!("{}?{}", self.url, query)
            }
        }
    }
}
