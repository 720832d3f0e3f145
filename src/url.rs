//! Browser-flavored convenience wrapper over the URL record.

use crate::compat::{format, String, ToString};
use crate::error::Result;
use crate::host::Host;
use crate::parser::{basic_parse, parse, State};
use crate::unicode::percent_encode::{pct_encode_into, USERINFO};
use crate::url_record::{serialize, UrlRecord};

/// A parsed URL with WHATWG-style accessors.
///
/// Getters mirror the browser `URL` interface. Setters re-parse the single
/// affected component through the state machine with a state override; a
/// setter that fails leaves the URL unchanged and returns `false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Url {
    record: UrlRecord,
    href: String,
}

impl Url {
    /// Parse `input`, resolving it against `base` when given.
    ///
    /// # Errors
    ///
    /// Fails when either `base` or `input` does not parse.
    pub fn parse(input: &str, base: Option<&str>) -> Result<Self> {
        let base_record = match base {
            Some(base) => Some(parse(base, None)?),
            None => None,
        };
        let record = parse(input, base_record.as_ref())?;
        Ok(Self::from_record(record))
    }

    /// Check whether `input` would parse, without keeping the result.
    pub fn can_parse(input: &str, base: Option<&str>) -> bool {
        Self::parse(input, base).is_ok()
    }

    fn from_record(record: UrlRecord) -> Self {
        let href = serialize(&record);
        Url { record, href }
    }

    fn replace_record(&mut self, record: UrlRecord) {
        self.href = serialize(&record);
        self.record = record;
    }

    fn reserialize(&mut self) {
        self.href = serialize(&self.record);
    }

    /// The underlying record.
    pub fn record(&self) -> &UrlRecord {
        &self.record
    }

    /// The full canonical URL string (zero-copy).
    pub fn href(&self) -> &str {
        &self.href
    }

    /// Scheme with trailing `:` (e.g. `"https:"`).
    pub fn protocol(&self) -> String {
        format!("{}:", self.record.scheme)
    }

    pub fn username(&self) -> &str {
        &self.record.username
    }

    pub fn password(&self) -> &str {
        &self.record.password
    }

    /// Hostname plus `:port` when a non-default port is present.
    pub fn host(&self) -> String {
        match (&self.record.host, self.record.port) {
            (Some(host), Some(port)) => format!("{host}:{port}"),
            (Some(host), None) => host.to_string(),
            (None, _) => String::new(),
        }
    }

    pub fn hostname(&self) -> String {
        self.record
            .host
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default()
    }

    /// Port as a string; empty when elided.
    pub fn port(&self) -> String {
        self.record.port.map(|port| port.to_string()).unwrap_or_default()
    }

    pub fn pathname(&self) -> String {
        if self.record.cannot_be_a_base_url {
            self.record.path.first().cloned().unwrap_or_default()
        } else {
            let mut out = String::new();
            for segment in &self.record.path {
                out.push('/');
                out.push_str(segment);
            }
            out
        }
    }

    /// Query with leading `?`; empty when the query is absent or empty.
    pub fn search(&self) -> String {
        match &self.record.query {
            Some(query) if !query.is_empty() => format!("?{query}"),
            _ => String::new(),
        }
    }

    /// Fragment with leading `#`; empty when the fragment is absent or empty.
    pub fn hash(&self) -> String {
        match &self.record.fragment {
            Some(fragment) if !fragment.is_empty() => format!("#{fragment}"),
            _ => String::new(),
        }
    }

    pub fn has_credentials(&self) -> bool {
        self.record.includes_credentials()
    }

    /// The advisory flag accumulated while parsing.
    pub fn validation_error(&self) -> bool {
        self.record.validation_error
    }

    /// Replace the whole URL.
    ///
    /// # Errors
    ///
    /// Fails (and leaves the URL unchanged) when `href` does not parse.
    pub fn set_href(&mut self, href: &str) -> Result<()> {
        let record = parse(href, None)?;
        self.replace_record(record);
        Ok(())
    }

    pub fn set_protocol(&mut self, protocol: &str) -> bool {
        let value = protocol.strip_suffix(':').unwrap_or(protocol);
        let input = format!("{value}:");
        self.reparse_component(&input, self.record.clone(), State::SchemeStart)
    }

    pub fn set_username(&mut self, username: &str) -> bool {
        if !self.can_have_credentials() {
            return false;
        }
        let mut encoded = String::new();
        pct_encode_into(&mut encoded, username.as_bytes(), USERINFO);
        self.record.username = encoded;
        self.reserialize();
        true
    }

    pub fn set_password(&mut self, password: &str) -> bool {
        if !self.can_have_credentials() {
            return false;
        }
        let mut encoded = String::new();
        pct_encode_into(&mut encoded, password.as_bytes(), USERINFO);
        self.record.password = encoded;
        self.reserialize();
        true
    }

    pub fn set_host(&mut self, host: &str) -> bool {
        if self.record.cannot_be_a_base_url {
            return false;
        }
        self.reparse_component(host, self.record.clone(), State::Host)
    }

    pub fn set_hostname(&mut self, hostname: &str) -> bool {
        if self.record.cannot_be_a_base_url {
            return false;
        }
        self.reparse_component(hostname, self.record.clone(), State::Hostname)
    }

    pub fn set_port(&mut self, port: &str) -> bool {
        if self.record.cannot_be_a_base_url || self.record.scheme == "file" {
            return false;
        }
        if self.record.host.as_ref().map_or(true, Host::is_empty) {
            return false;
        }
        if port.is_empty() {
            self.record.port = None;
            self.reserialize();
            return true;
        }
        self.reparse_component(port, self.record.clone(), State::Port)
    }

    pub fn set_pathname(&mut self, pathname: &str) -> bool {
        if self.record.cannot_be_a_base_url {
            return false;
        }
        let mut record = self.record.clone();
        record.path.clear();
        self.reparse_component(pathname, record, State::PathStart)
    }

    pub fn set_search(&mut self, search: &str) {
        if search.is_empty() {
            self.record.query = None;
            self.reserialize();
            return;
        }
        let value = search.strip_prefix('?').unwrap_or(search);
        let mut record = self.record.clone();
        record.query = Some(String::new());
        self.reparse_component(value, record, State::Query);
    }

    pub fn set_hash(&mut self, hash: &str) {
        if hash.is_empty() {
            self.record.fragment = None;
            self.reserialize();
            return;
        }
        let value = hash.strip_prefix('#').unwrap_or(hash);
        let mut record = self.record.clone();
        record.fragment = Some(String::new());
        self.reparse_component(value, record, State::Fragment);
    }

    fn can_have_credentials(&self) -> bool {
        !self.record.cannot_be_a_base_url
            && self.record.scheme != "file"
            && self.record.host.as_ref().map_or(false, |host| !host.is_empty())
    }

    fn reparse_component(&mut self, input: &str, record: UrlRecord, state: State) -> bool {
        match basic_parse(input, None, Some(record), Some(state)) {
            Ok(record) => {
                self.replace_record(record);
                true
            }
            Err(_) => false,
        }
    }
}

impl core::fmt::Display for Url {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.href)
    }
}
