use reqwest::Client;
use reqwest::header::USER_AGENT;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::FplError;
use crate::http_client::http_client;
use crate::model::{RawSnapshot, Resource};
use crate::snapshot_cache::SnapshotCache;

/// Fetches both upstream payloads side by side.
#[derive(Debug, Clone)]
pub struct SnapshotFetcher {
    client: Client,
    bootstrap_url: String,
    fixtures_url: String,
    user_agent: String,
}

#[derive(Debug)]
pub struct Fetched {
    pub raw: RawSnapshot,
    pub write_through: WriteThrough,
}

/// Cache writes still running after a fetch returned.
#[derive(Debug, Default)]
pub struct WriteThrough(Vec<JoinHandle<()>>);

impl WriteThrough {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub async fn settle(self) {
        for handle in self.0 {
            if let Err(err) = handle.await {
                warn!("cache write task failed: {err}");
            }
        }
    }
}

impl SnapshotFetcher {
    pub fn new(config: &Config) -> Result<Self, FplError> {
        Ok(Self {
            client: http_client(config)?,
            bootstrap_url: config.bootstrap_url.clone(),
            fixtures_url: config.fixtures_url.clone(),
            user_agent: config.user_agent.clone(),
        })
    }

    pub fn url(&self, resource: Resource) -> &str {
        match resource {
            Resource::Bootstrap => &self.bootstrap_url,
            Resource::Fixtures => &self.fixtures_url,
        }
    }

    /// Runs both requests under one cancellation token. The first failure
    /// cancels the sibling; every failure ends up in one `FplError::Fetch`.
    /// Successful bodies are handed to `cache` without waiting on the write.
    pub async fn fetch(&self, cache: Option<&SnapshotCache>) -> Result<Fetched, FplError> {
        let cancel = CancellationToken::new();
        let (bootstrap, fixtures) = tokio::join!(
            self.fetch_resource(Resource::Bootstrap, &cancel, cache),
            self.fetch_resource(Resource::Fixtures, &cancel, cache),
        );

        let mut errors = Vec::new();
        let mut write_through = WriteThrough::default();
        let mut take = |result: Result<(Vec<u8>, Option<JoinHandle<()>>), FplError>| match result {
            Ok((body, pending)) => {
                write_through.0.extend(pending);
                Some(body)
            }
            Err(err) => {
                errors.push(err);
                None
            }
        };
        let bootstrap = take(bootstrap);
        let fixtures = take(fixtures);

        match (bootstrap, fixtures) {
            (Some(bootstrap), Some(fixtures)) if errors.is_empty() => Ok(Fetched {
                raw: RawSnapshot {
                    bootstrap,
                    fixtures,
                },
                write_through,
            }),
            _ => Err(FplError::Fetch(errors)),
        }
    }

    async fn fetch_resource(
        &self,
        resource: Resource,
        cancel: &CancellationToken,
        cache: Option<&SnapshotCache>,
    ) -> Result<(Vec<u8>, Option<JoinHandle<()>>), FplError> {
        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(FplError::Cancelled { resource }),
            res = self.get(resource) => res,
        };
        let body = match outcome {
            Ok(body) => body,
            Err(err) => {
                cancel.cancel();
                return Err(err);
            }
        };
        info!(%resource, bytes = body.len(), "fetched");
        let pending = cache.map(|cache| cache.write_through(resource, body.clone()));
        Ok((body, pending))
    }

    async fn get(&self, resource: Resource) -> Result<Vec<u8>, FplError> {
        let url = self.url(resource);
        debug!(%resource, url, "requesting");
        let transport = |source| FplError::Transport { resource, source };
        let resp = self
            .client
            .get(url)
            .header(USER_AGENT, self.user_agent.as_str())
            .send()
            .await
            .map_err(transport)?
            .error_for_status()
            .map_err(transport)?;
        let body = resp.bytes().await.map_err(transport)?;
        Ok(body.to_vec())
    }
}
