//! Ordered stub table with first-match-wins lookup.

use crate::analysis::{analyze_endpoints, StubAnalysis};
use crate::endpoint::RegisteredEndpoint;
use crate::matcher::{EndpointMatcher, Mismatch};
use crate::options::MatchOptions;
use crate::request::RequestHead;
use tracing::{debug, trace};

/// A registered endpoint and the value it resolves to.
#[derive(Debug, Clone, PartialEq)]
pub struct StubEntry<T> {
    pub endpoint: RegisteredEndpoint,
    pub payload: T,
}

/// Registered stubs in registration order.
///
/// Lookups take `&self`, so a table shared through `Arc` can serve many
/// threads once it has been filled.
#[derive(Debug, Clone)]
pub struct StubTable<T> {
    entries: Vec<StubEntry<T>>,
    matcher: EndpointMatcher,
}

impl<T> Default for StubTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> StubTable<T> {
    pub fn new() -> Self {
        Self::with_options(MatchOptions::default())
    }

    pub fn with_options(options: MatchOptions) -> Self {
        Self {
            entries: Vec::new(),
            matcher: EndpointMatcher::new(options),
        }
    }

    /// Append a stub and return its index.
    pub fn push(&mut self, endpoint: RegisteredEndpoint, payload: T) -> usize {
        self.entries.push(StubEntry { endpoint, payload });
        self.entries.len() - 1
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn options(&self) -> &MatchOptions {
        self.matcher.options()
    }

    pub fn get(&self, index: usize) -> Option<&StubEntry<T>> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StubEntry<T>> {
        self.entries.iter()
    }

    /// Payload of the first stub matching `request`.
    pub fn find(&self, request: &RequestHead) -> Option<&T> {
        self.find_entry(request).map(|(_, entry)| &entry.payload)
    }

    /// Index and entry of the first stub matching `request`.
    pub fn find_entry(&self, request: &RequestHead) -> Option<(usize, &StubEntry<T>)> {
        for (index, entry) in self.entries.iter().enumerate() {
            match self.matcher.explain(&entry.endpoint, request) {
                Ok(()) => {
                    debug!(
                        index,
                        method = %request.method,
                        uri = %request.uri,
                        "stub matched"
                    );
                    return Some((index, entry));
                }
                Err(mismatch) => {
                    trace!(index, %mismatch, "stub skipped");
                }
            }
        }

        debug!(
            method = %request.method,
            uri = %request.uri,
            stubs = self.entries.len(),
            "no stub matched"
        );
        None
    }

    /// Outcome of every stub against `request`, in registration order.
    pub fn explain_all(&self, request: &RequestHead) -> Vec<(usize, Result<(), Mismatch>)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, entry)| (index, self.matcher.explain(&entry.endpoint, request)))
            .collect()
    }

    /// Report stubs that can never be selected because an earlier stub
    /// accepts every request they would.
    pub fn analyze(&self) -> StubAnalysis {
        let endpoints: Vec<RegisteredEndpoint> =
            self.entries.iter().map(|e| e.endpoint.clone()).collect();
        analyze_endpoints(&endpoints, self.matcher.options())
    }
}

impl<T> FromIterator<(RegisteredEndpoint, T)> for StubTable<T> {
    fn from_iter<I: IntoIterator<Item = (RegisteredEndpoint, T)>>(iter: I) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}

impl<T> Extend<(RegisteredEndpoint, T)> for StubTable<T> {
    fn extend<I: IntoIterator<Item = (RegisteredEndpoint, T)>>(&mut self, iter: I) {
        for (endpoint, payload) in iter {
            self.push(endpoint, payload);
        }
    }
}

impl<'a, T> IntoIterator for &'a StubTable<T> {
    type Item = &'a StubEntry<T>;
    type IntoIter = std::slice::Iter<'a, StubEntry<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
