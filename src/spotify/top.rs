use serde_json::Value;

use crate::{
    Error, Res, Upstream, debug,
    spotify::SpotifyClient,
    types::{ItemKind, TimeRange},
};

impl SpotifyClient {
    /// Retrieves the user's top artists and top tracks for a time range.
    ///
    /// Issues two independent requests, artists first. If either fails the
    /// whole fetch fails with an [`Error::Fetch`] naming the failing kind; no
    /// partial result is returned. Only the first page (`offset=0`) is read,
    /// so `limit` must already be clamped to the provider range.
    ///
    /// # Returns
    ///
    /// The raw artists page and the raw tracks page, ready for
    /// [`crate::dashboard::normalize`].
    pub async fn top_items(
        &self,
        token: &str,
        time_range: TimeRange,
        limit: u32,
    ) -> Res<(Value, Value)> {
        let artists = self
            .top_page(token, ItemKind::Artists, time_range, limit)
            .await?;
        let tracks = self
            .top_page(token, ItemKind::Tracks, time_range, limit)
            .await?;

        Ok((artists, tracks))
    }

    async fn top_page(
        &self,
        token: &str,
        kind: ItemKind,
        time_range: TimeRange,
        limit: u32,
    ) -> Res<Value> {
        debug!("Fetching top {} ({}, limit {})", kind, time_range, limit);
        let fail = |source: Upstream| Error::Fetch { kind, source };

        let response = self
            .http
            .get(self.endpoint(&format!("/me/top/{}", kind)))
            .bearer_auth(token)
            .query(&[
                ("time_range", time_range.as_param().to_string()),
                ("limit", limit.to_string()),
                ("offset", "0".to_string()),
            ])
            .send()
            .await
            .map_err(|e| fail(e.into()))?;

        if !response.status().is_success() {
            return Err(fail(Upstream::from_response(response).await));
        }

        response.json::<Value>().await.map_err(|e| fail(e.into()))
    }
}
