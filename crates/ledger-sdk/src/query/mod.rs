//! Resource locators for the indexing service.
//!
//! A [`Server`] validates the service's base locator once. Call builders
//! rooted at it accumulate filters and materialize an immutable
//! [`ResourceLocator`] with `build()`.
//!
//! ```rust
//! use ledger_sdk::query::Server;
//!
//! let server = Server::new("https://horizon.example.org").unwrap();
//! let locator = server.accounts().limits("gAccount").build().unwrap();
//! assert_eq!(locator.as_str(), "https://horizon.example.org/accounts/gAccount/limits");
//! ```

pub mod account;

use std::fmt;

use crate::error::QueryError;

pub use account::{AccountCallBuilder, DeprecationSink, TracingSink};

/// A validated server base locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Server {
    /// `scheme://host[:port]`, without a trailing slash.
    origin: String,
    /// Path segments of the base, as given.
    base_segments: Vec<String>,
}

impl Server {
    /// Parses and validates a base locator such as `https://host:8000/api`.
    ///
    /// Query strings and fragments are not allowed. The path is used as
    /// given, so it must already be percent-encoded.
    pub fn new(base: &str) -> Result<Self, QueryError> {
        let invalid = |reason| QueryError::InvalidServerUrl {
            url: base.to_string(),
            reason,
        };

        let (scheme, rest) = base.split_once("://").ok_or_else(|| invalid("missing scheme"))?;
        let scheme = scheme.to_ascii_lowercase();
        if scheme != "http" && scheme != "https" {
            return Err(invalid("scheme must be http or https"));
        }
        if rest.contains(&['?', '#'][..]) {
            return Err(invalid("query and fragment are not allowed"));
        }

        let (authority, path) = match rest.find('/') {
            Some(i) => (&rest[..i], &rest[i..]),
            None => (rest, ""),
        };
        if authority.contains('@') {
            return Err(invalid("credentials are not allowed"));
        }

        let (host, port) = split_host_port(authority).ok_or_else(|| invalid("invalid host"))?;
        if host.is_empty() {
            return Err(invalid("missing host"));
        }
        if !is_valid_host(host) {
            return Err(invalid("invalid host"));
        }
        if let Some(port) = port {
            if port.is_empty() || port.parse::<u16>().is_err() {
                return Err(invalid("invalid port"));
            }
        }

        let base_segments: Vec<String> = path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        if !base_segments.iter().all(|s| is_valid_path_segment(s)) {
            return Err(invalid("path must be percent-encoded"));
        }

        Ok(Self {
            origin: format!("{}://{}", scheme, authority.to_ascii_lowercase()),
            base_segments,
        })
    }

    /// Returns a builder for the `accounts` collection.
    pub fn accounts(&self) -> AccountCallBuilder {
        AccountCallBuilder::new(self)
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }
}

/// Splits `host[:port]`, keeping IPv6 literals in brackets intact.
fn split_host_port(authority: &str) -> Option<(&str, Option<&str>)> {
    if authority.starts_with('[') {
        let end = authority.find(']')?;
        let (host, rest) = authority.split_at(end + 1);
        if rest.is_empty() {
            Some((host, None))
        } else {
            rest.strip_prefix(':').map(|port| (host, Some(port)))
        }
    } else {
        match authority.split_once(':') {
            Some((host, port)) => Some((host, Some(port))),
            None => Some((authority, None)),
        }
    }
}

/// A bracketed IPv6 literal, or dot-separated labels of ASCII alphanumerics
/// and inner hyphens.
fn is_valid_host(host: &str) -> bool {
    if let Some(inner) = host.strip_prefix('[') {
        return match inner.strip_suffix(']') {
            Some(addr) => addr.parse::<std::net::Ipv6Addr>().is_ok(),
            None => false,
        };
    }
    host.split('.').all(|label| {
        !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
    })
}

/// RFC 3986 `pchar`s only: unreserved, sub-delims, `:`, `@` and `%XX` escapes.
fn is_valid_path_segment(segment: &str) -> bool {
    let bytes = segment.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                let escape_ok = bytes.len() > i + 2
                    && bytes[i + 1].is_ascii_hexdigit()
                    && bytes[i + 2].is_ascii_hexdigit();
                if !escape_ok {
                    return false;
                }
                i += 3;
            }
            b if is_unreserved(b) || b"!$&'()*+,;=:@".contains(&b) => i += 1,
            _ => return false,
        }
    }
    true
}

fn is_unreserved(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~')
}

/// One filter: an ordered list of path segments.
pub type Filter = Vec<String>;

/// Shared state of every call builder: the server root, the collection it
/// is rooted at and the filters added so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallBuilder {
    server: Server,
    collection: &'static str,
    filters: Vec<Filter>,
}

impl CallBuilder {
    pub fn new(server: &Server, collection: &'static str) -> Self {
        Self {
            server: server.clone(),
            collection,
            filters: Vec::new(),
        }
    }

    /// Appends a filter. Filters are kept in call order without deduplication.
    pub fn push_filter<I, S>(&mut self, segments: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filters.push(segments.into_iter().map(Into::into).collect());
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// Materializes the locator.
    ///
    /// Without a filter the locator points at the collection; a single filter
    /// replaces the collection segment. More than one filter is ambiguous and
    /// rejected.
    pub fn build(&self) -> Result<ResourceLocator, QueryError> {
        let tail: Vec<String> = match self.filters.as_slice() {
            [] => vec![self.collection.to_string()],
            [filter] => filter.clone(),
            filters => {
                return Err(QueryError::TooManyFilters {
                    count: filters.len(),
                });
            }
        };

        let mut url = self.server.origin.clone();
        for segment in &self.server.base_segments {
            url.push('/');
            url.push_str(segment);
        }
        for segment in &tail {
            url.push('/');
            url.push_str(&encode_segment(segment));
        }

        Ok(ResourceLocator { url })
    }
}

/// A fully materialized resource locator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceLocator {
    url: String,
}

impl ResourceLocator {
    pub fn as_str(&self) -> &str {
        &self.url
    }

    /// Returns the path component, starting with `/`.
    pub fn path(&self) -> &str {
        let after_scheme = self.url.find("://").map(|i| i + 3).unwrap_or(0);
        match self.url[after_scheme..].find('/') {
            Some(i) => &self.url[after_scheme + i..],
            None => "/",
        }
    }

    pub fn into_string(self) -> String {
        self.url
    }
}

impl fmt::Display for ResourceLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// Percent-encodes everything except RFC 3986 unreserved characters.
fn encode_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        if is_unreserved(byte) {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{:02X}", byte));
        }
    }
    out
}
