use std::time::Duration;

use reqwest::Client;

use crate::{Error, Res, debug};

pub const ARTWORK_TIMEOUT: Duration = Duration::from_secs(5);

/// Downloads artist and album artwork from the image host.
///
/// Requests are anonymous and bounded by [`ARTWORK_TIMEOUT`]. Artwork is
/// decoration, so every failure collapses into "no image".
#[derive(Debug, Clone)]
pub struct ArtworkFetcher {
    http: Client,
}

impl ArtworkFetcher {
    pub fn new() -> Res<Self> {
        Self::with_timeout(ARTWORK_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Res<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("cannot build artwork client: {}", e)))?;
        Ok(Self { http })
    }

    pub async fn fetch(&self, url: &str) -> Option<Vec<u8>> {
        let response = match self.http.get(url).send().await {
            Ok(resp) => resp,
            Err(e) => {
                debug!("Artwork download failed for {}: {}", url, e);
                return None;
            }
        };

        if !response.status().is_success() {
            debug!("Artwork download for {} answered {}", url, response.status());
            return None;
        }

        response.bytes().await.ok().map(|b| b.to_vec())
    }
}
