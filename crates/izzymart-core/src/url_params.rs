//! # URL Parameters
//!
//! Read-only helpers over the query string the register was launched with.
//!
//! ```text
//! izzymart-register "http://kiosk.local/?debug=TRUE&idle_secs=30"
//!                                        └──────────┬──────────┘
//!                                     QueryParams::parse(...)
//!                                                   │
//!        get_url_param("idle_secs")  ──► Some("30") │
//!        is_debug_mode()             ──► true  ◄────┘
//! ```
//!
//! Decoding follows `application/x-www-form-urlencoded` (`+` is a space,
//! percent escapes are decoded). Nothing here mutates navigation state.

use std::collections::HashMap;

/// Name of the parameter that switches on debug mode.
pub const DEBUG_PARAM: &str = "debug";

/// Parsed query parameters, in the order they appeared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Parses a query string, a `?`-prefixed query, or a full URL.
    ///
    /// For a full URL only the part between `?` and `#` is read. A bare
    /// query is read whole, so a `?` inside a value is kept.
    pub fn parse(input: &str) -> Self {
        let query = if let Some(query) = input.strip_prefix('?') {
            query
        } else if input.contains("://") {
            let url = input.split('#').next().unwrap_or_default();
            url.find('?').map_or("", |start| &url[start + 1..])
        } else {
            input
        };
        let query = query.split('#').next().unwrap_or_default();

        let pairs = url::form_urlencoded::parse(query.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        QueryParams { pairs }
    }

    /// Value of the first parameter with this name.
    pub fn get_url_param(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Interprets a parameter as a boolean.
    ///
    /// `"true"`, `"1"` and `"yes"` (any case) are true; any other present value
    /// is false; an absent parameter yields `default`.
    pub fn get_boolean_url_param(&self, name: &str, default: bool) -> bool {
        match self.get_url_param(name) {
            Some(value) => {
                let value = value.to_lowercase();
                value == "true" || value == "1" || value == "yes"
            }
            None => default,
        }
    }

    /// `?debug=true` / `?debug=1` / `?debug=yes`.
    pub fn is_debug_mode(&self) -> bool {
        self.get_boolean_url_param(DEBUG_PARAM, false)
    }

    /// All parameters as a map; a repeated name keeps its last value.
    pub fn get_all_url_params(&self) -> HashMap<String, String> {
        self.pairs.iter().cloned().collect()
    }

    /// Checks if no parameters were given.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Shorthand for `QueryParams::parse(query).get_url_param(name)`.
pub fn get_url_param(query: &str, name: &str) -> Option<String> {
    QueryParams::parse(query)
        .get_url_param(name)
        .map(str::to_string)
}

/// Shorthand for `QueryParams::parse(query).get_boolean_url_param(name, default)`.
pub fn get_boolean_url_param(query: &str, name: &str, default: bool) -> bool {
    QueryParams::parse(query).get_boolean_url_param(name, default)
}

/// Shorthand for `QueryParams::parse(query).is_debug_mode()`.
pub fn is_debug_mode(query: &str) -> bool {
    QueryParams::parse(query).is_debug_mode()
}

/// Shorthand for `QueryParams::parse(query).get_all_url_params()`.
pub fn get_all_url_params(query: &str) -> HashMap<String, String> {
    QueryParams::parse(query).get_all_url_params()
}
