//! Account-scoped queries.

use std::fmt;
use std::sync::Arc;

use crate::error::QueryError;
use crate::query::{CallBuilder, Filter, ResourceLocator, Server};

const ACCOUNTS: &str = "accounts";

/// Receives notices about deprecated API use.
pub trait DeprecationSink: Send + Sync {
    /// Called once per use of `deprecated`, naming its `replacement`.
    fn deprecated(&self, deprecated: &'static str, replacement: &'static str);
}

/// Default sink: logs a `tracing` warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DeprecationSink for TracingSink {
    fn deprecated(&self, deprecated: &'static str, replacement: &'static str) {
        tracing::warn!(
            deprecated,
            replacement,
            "{} is deprecated, please use {} instead",
            deprecated,
            replacement
        );
    }
}

/// Builds locators for a single account or its sub-resources.
///
/// Each method appends one filter and returns the builder, so calls chain:
///
/// ```rust
/// use ledger_sdk::query::Server;
///
/// let server = Server::new("https://horizon.example.org").unwrap();
/// let builder = server.accounts().account_id("gAccount");
/// assert_eq!(builder.filters(), &[vec!["accounts".to_string(), "gAccount".to_string()]]);
/// ```
#[derive(Clone)]
pub struct AccountCallBuilder {
    inner: CallBuilder,
    sink: Arc<dyn DeprecationSink>,
}

impl AccountCallBuilder {
    /// Creates a builder rooted at the server's `accounts` collection.
    pub fn new(server: &Server) -> Self {
        Self {
            inner: CallBuilder::new(server, ACCOUNTS),
            sink: Arc::new(TracingSink),
        }
    }

    /// Replaces the sink that receives deprecation notices.
    pub fn with_deprecation_sink(mut self, sink: Arc<dyn DeprecationSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Returns information about a single account, including its trust lines.
    ///
    /// The id is not validated here.
    pub fn account_id(mut self, id: impl Into<String>) -> Self {
        self.inner.push_filter([ACCOUNTS.to_string(), id.into()]);
        self
    }

    /// Returns income/outcome statistics for an account.
    pub fn statistics_for_account(self, id: impl Into<String>) -> Self {
        self.sub_resource(id, "statistics")
    }

    /// Returns the limits of an account.
    pub fn limits(self, id: impl Into<String>) -> Self {
        self.sub_resource(id, "limits")
    }

    /// Returns the restrictions of an account.
    pub fn traits(self, id: impl Into<String>) -> Self {
        self.sub_resource(id, "traits")
    }

    #[deprecated(note = "use `account_id` instead")]
    pub fn address(self, id: impl Into<String>) -> Self {
        self.sink
            .deprecated("AccountCallBuilder::address", "AccountCallBuilder::account_id");
        self.account_id(id)
    }

    fn sub_resource(mut self, id: impl Into<String>, resource: &'static str) -> Self {
        self.inner
            .push_filter([ACCOUNTS.to_string(), id.into(), resource.to_string()]);
        self
    }

    /// Filters accumulated so far, in call order.
    pub fn filters(&self) -> &[Filter] {
        self.inner.filters()
    }

    /// Materializes the locator.
    pub fn build(&self) -> Result<ResourceLocator, QueryError> {
        self.inner.build()
    }
}

impl fmt::Debug for AccountCallBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountCallBuilder")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use tracing_test::traced_test;

    use super::*;

    #[derive(Default)]
    struct RecordingSink {
        notices: Mutex<Vec<(&'static str, &'static str)>>,
    }

    impl DeprecationSink for RecordingSink {
        fn deprecated(&self, deprecated: &'static str, replacement: &'static str) {
            self.notices.lock().unwrap().push((deprecated, replacement));
        }
    }

    fn accounts() -> AccountCallBuilder {
        Server::new("https://horizon.example.org").unwrap().accounts()
    }

    fn segments(parts: &[&str]) -> Filter {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_account_id() {
        let builder = accounts().account_id("G123");
        assert_eq!(builder.filters(), &[segments(&["accounts", "G123"])]);
        let locator = builder.build().unwrap();
        assert!(locator.path().contains("accounts/G123"));
        assert_eq!(locator.as_str(), "https://horizon.example.org/accounts/G123");
    }

    #[test]
    fn test_sub_resources() {
        for (builder, resource) in [
            (accounts().limits("G123"), "limits"),
            (accounts().traits("G123"), "traits"),
            (accounts().statistics_for_account("G123"), "statistics"),
        ] {
            let locator = builder.build().unwrap();
            assert_eq!(locator.path(), format!("/accounts/G123/{}", resource));
        }
    }

    #[test]
    fn test_filters_append_in_call_order() {
        let builder = accounts().account_id("G123").limits("G456");
        assert_eq!(
            builder.filters(),
            &[
                segments(&["accounts", "G123"]),
                segments(&["accounts", "G456", "limits"]),
            ]
        );
        assert_eq!(builder.build(), Err(QueryError::TooManyFilters { count: 2 }));
    }

    #[test]
    fn test_no_filter_points_at_collection() {
        assert_eq!(accounts().build().unwrap().path(), "/accounts");
    }

    #[test]
    #[allow(deprecated)]
    fn test_address_alias_reports_each_call() {
        let sink = Arc::new(RecordingSink::default());
        let alias = accounts()
            .with_deprecation_sink(sink.clone())
            .address("G123");
        assert_eq!(sink.notices.lock().unwrap().len(), 1);
        assert_eq!(
            sink.notices.lock().unwrap()[0],
            ("AccountCallBuilder::address", "AccountCallBuilder::account_id")
        );

        let direct = accounts().account_id("G123");
        assert_eq!(alias.filters(), direct.filters());
        assert_eq!(alias.build(), direct.build());

        let _ = alias.address("G789");
        assert_eq!(sink.notices.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_account_id_does_not_warn() {
        let sink = Arc::new(RecordingSink::default());
        let _ = accounts()
            .with_deprecation_sink(sink.clone())
            .account_id("G1")
            .limits("G1");
        assert!(sink.notices.lock().unwrap().is_empty());
    }

    #[traced_test]
    #[test]
    #[allow(deprecated)]
    fn test_default_sink_logs_warning() {
        let _ = accounts().address("G123");
        assert!(logs_contain(
            "AccountCallBuilder::address is deprecated, please use AccountCallBuilder::account_id instead"
        ));
    }

    #[test]
    fn test_ids_are_percent_encoded() {
        let locator = accounts().account_id("a/b").build().unwrap();
        assert_eq!(locator.path(), "/accounts/a%2Fb");
    }
}
