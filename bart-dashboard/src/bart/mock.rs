//! Mock fetcher for running without API access.
//!
//! Serves canned response bodies as if they came from the live API.
//! Bodies are keyed by `"{cmd}-{arg}"` (e.g. `etd-EMBR`) or by `cmd`
//! alone (e.g. `stns`), the former taking precedence.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures::FutureExt;
use futures::future::BoxFuture;

use super::error::BartError;
use super::fetch::Fetcher;
use super::request::ApiRequest;

/// Fetcher that serves bodies from memory.
#[derive(Debug, Clone, Default)]
pub struct MockFetcher {
    bodies: Arc<HashMap<String, String>>,
    calls: Arc<AtomicUsize>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a body for a key (`cmd` or `cmd-arg`).
    pub fn with_response(mut self, key: impl Into<String>, body: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.bodies).insert(key.into(), body.into());
        self
    }

    /// Load every `.json` file in a directory, keyed by file stem.
    ///
    /// `etd-EMBR.json` answers `etd` for EMBR; `stns.json` answers the
    /// station list.
    pub fn from_dir(data_dir: impl AsRef<Path>) -> Result<Self, BartError> {
        let data_dir = data_dir.as_ref();
        let mut bodies = HashMap::new();

        let entries = std::fs::read_dir(data_dir).map_err(|e| BartError::ApiError {
            status: 0,
            message: format!("Failed to read mock data directory: {e}"),
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| BartError::ApiError {
                status: 0,
                message: format!("Failed to read directory entry: {e}"),
            })?;

            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            let Some(key) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let body = std::fs::read_to_string(&path).map_err(|e| BartError::ApiError {
                status: 0,
                message: format!("Failed to read {path:?}: {e}"),
            })?;

            bodies.insert(key.to_string(), body);
        }

        if bodies.is_empty() {
            return Err(BartError::ApiError {
                status: 0,
                message: format!("No mock response files found in {data_dir:?}"),
            });
        }

        Ok(Self {
            bodies: Arc::new(bodies),
            calls: Arc::default(),
        })
    }

    /// Number of requests served or refused so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn lookup(&self, request: &ApiRequest) -> Result<String, BartError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let cmd = request.cmd();
        let specific = request.arg().map(|arg| format!("{cmd}-{arg}"));

        specific
            .and_then(|key| self.bodies.get(&key))
            .or_else(|| self.bodies.get(cmd))
            .cloned()
            .ok_or_else(|| BartError::ApiError {
                status: 404,
                message: format!(
                    "No mock response for {cmd}{}",
                    request.arg().map(|a| format!(" {a}")).unwrap_or_default()
                ),
            })
    }
}

impl Fetcher for MockFetcher {
    fn fetch<'a>(&'a self, request: &'a ApiRequest) -> BoxFuture<'a, Result<String, BartError>> {
        let result = self.lookup(request);
        async move { result }.boxed()
    }
}
