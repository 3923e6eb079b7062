use crate::{
    Error, Res, Upstream, debug,
    spotify::SpotifyClient,
    types::{
        AddTrackToPlaylistRequest, CreatePlaylistRequest, CreatePlaylistResponse, PlaylistInfo,
        UserProfile, is_placeholder_id,
    },
};

pub const PLAYLIST_DESCRIPTION: &str = "Created using the InTune app.";

impl SpotifyClient {
    /// Creates a private playlist holding the given tracks.
    ///
    /// Placeholder ids are dropped first; when nothing is left the call fails
    /// with [`Error::NoValidTracks`] before any request is made. Otherwise it
    /// resolves the current user, creates an empty private playlist and adds
    /// all tracks in one batch.
    ///
    /// # Errors
    ///
    /// Each step reports its own variant ([`Error::UserProfile`],
    /// [`Error::PlaylistCreate`], [`Error::TrackAdd`]). A failed track insert
    /// leaves the already created, empty playlist in place; its id is part of
    /// the error.
    ///
    /// # Example
    ///
    /// ```
    /// let info = client.create_playlist(&token, "My Top Tracks", &track_ids).await?;
    /// println!("{} tracks added: {}", info.tracks_added, info.url);
    /// ```
    pub async fn create_playlist(
        &self,
        token: &str,
        name: &str,
        track_ids: &[String],
    ) -> Res<PlaylistInfo> {
        let track_ids: Vec<&str> = track_ids
            .iter()
            .map(String::as_str)
            .filter(|id| !id.is_empty() && !is_placeholder_id(id))
            .collect();
        if track_ids.is_empty() {
            return Err(Error::NoValidTracks);
        }

        let user_id = self.current_user_id(token).await?;
        let playlist = self.create_empty_playlist(token, &user_id, name).await?;
        self.add_tracks(token, &playlist.id, &track_ids).await?;

        Ok(PlaylistInfo {
            url: playlist
                .external_urls
                .spotify
                .unwrap_or_else(|| format!("https://open.spotify.com/playlist/{}", playlist.id)),
            id: playlist.id,
            name: playlist.name,
            tracks_added: track_ids.len(),
        })
    }

    pub async fn current_user_id(&self, token: &str) -> Res<String> {
        let response = self
            .http
            .get(self.endpoint("/me"))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| Error::UserProfile(e.into()))?;

        if !response.status().is_success() {
            return Err(Error::UserProfile(Upstream::from_response(response).await));
        }

        let profile = response
            .json::<UserProfile>()
            .await
            .map_err(|e| Error::UserProfile(e.into()))?;
        Ok(profile.id)
    }

    async fn create_empty_playlist(
        &self,
        token: &str,
        user_id: &str,
        name: &str,
    ) -> Res<CreatePlaylistResponse> {
        debug!("Creating playlist {:?} for user {}", name, user_id);
        let body = CreatePlaylistRequest {
            name: name.to_string(),
            description: PLAYLIST_DESCRIPTION.to_string(),
            public: false,
        };

        let response = self
            .http
            .post(self.endpoint(&format!("/users/{}/playlists", user_id)))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::PlaylistCreate(e.into()))?;

        if !response.status().is_success() {
            return Err(Error::PlaylistCreate(
                Upstream::from_response(response).await,
            ));
        }

        response
            .json::<CreatePlaylistResponse>()
            .await
            .map_err(|e| Error::PlaylistCreate(e.into()))
    }

    async fn add_tracks(&self, token: &str, playlist_id: &str, track_ids: &[&str]) -> Res<()> {
        debug!("Adding {} tracks to playlist {}", track_ids.len(), playlist_id);
        let fail = |source: Upstream| Error::TrackAdd {
            playlist_id: playlist_id.to_string(),
            source,
        };

        let body = AddTrackToPlaylistRequest {
            uris: track_ids
                .iter()
                .map(|id| format!("spotify:track:{}", id))
                .collect(),
        };

        let response = self
            .http
            .post(self.endpoint(&format!("/playlists/{}/tracks", playlist_id)))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(|e| fail(e.into()))?;

        if !response.status().is_success() {
            return Err(fail(Upstream::from_response(response).await));
        }

        Ok(())
    }
}
