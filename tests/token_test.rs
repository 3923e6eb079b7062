mod common;

use common::{
    ARTISTS, BASIC_AUTH, MockProvider, Reply, TOKEN, TRACKS, artist_item, page, track_item,
};
use intune::{
    Error, Upstream,
    dashboard::{self, DashboardOptions},
    management::{REFRESH_AFTER_SECS, SessionManager, TokenManager},
    spotify::{AuthClient, SpotifyClient},
    types::{ItemKind, TimeRange, TokenPair},
    utils,
};
use serde_json::json;

fn session_with_token(age: u64, refresh_token: Option<&str>) -> SessionManager {
    let mut session = SessionManager::in_memory();
    session
        .store_token(&TokenPair {
            access_token: "old-access".to_string(),
            refresh_token: refresh_token.map(str::to_string),
            issued_at: utils::unix_now() - age,
        })
        .unwrap();
    session
}

fn top_pages() -> Vec<(&'static str, Reply)> {
    vec![
        (
            ARTISTS,
            Reply::ok(page(vec![artist_item("a1", "Alpha", &["rock"], 50)], 1)),
        ),
        (
            TRACKS,
            Reply::ok(page(vec![track_item("t1", "One", &["Alpha"], "2021", 50)], 1)),
        ),
    ]
}

#[test]
fn test_token_staleness_threshold() {
    let token = TokenPair {
        access_token: "a".to_string(),
        refresh_token: None,
        issued_at: 1_000,
    };
    assert!(!token.is_stale(1_000 + REFRESH_AFTER_SECS));
    assert!(token.is_stale(1_000 + REFRESH_AFTER_SECS + 1));
    // Clock skew never underflows
    assert_eq!(token.age(500), 0);
}

#[tokio::test]
async fn test_authorization_url_contains_required_params() {
    let mock = MockProvider::start(vec![]).await;
    let auth = AuthClient::new(&mock.config());

    let url = auth.authorization_url().unwrap();
    let params: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    let get = |k: &str| params.iter().find(|(key, _)| key == k).map(|(_, v)| v.as_str());

    assert!(url.as_str().starts_with(&format!("{}/authorize?", mock.base_url)));
    assert_eq!(get("client_id"), Some("client-id"));
    assert_eq!(get("response_type"), Some("code"));
    assert_eq!(get("redirect_uri"), Some("http://127.0.0.1:8888/callback"));
    assert_eq!(
        get("scope"),
        Some("user-top-read playlist-modify-public playlist-modify-private")
    );
    assert_eq!(get("state"), None);

    let with_state = auth.authorization_url_with_state("xyz").unwrap();
    assert!(with_state.query_pairs().any(|(k, v)| k == "state" && v == "xyz"));
}

#[tokio::test]
async fn test_exchange_code_success() {
    let mock = MockProvider::start(vec![(
        TOKEN,
        Reply::ok(json!({
            "access_token": "access-1",
            "refresh_token": "refresh-1",
            "token_type": "Bearer",
            "expires_in": 3600
        })),
    )])
    .await;
    let auth = AuthClient::new(&mock.config());

    let before = utils::unix_now();
    let token = auth.exchange_code("the-code").await.unwrap();

    assert_eq!(token.access_token, "access-1");
    assert_eq!(token.refresh_token.as_deref(), Some("refresh-1"));
    assert!(token.issued_at >= before);

    let request = mock.last(TOKEN).unwrap();
    assert_eq!(request.authorization.as_deref(), Some(BASIC_AUTH));
    assert!(request.body.contains("grant_type=authorization_code"));
    assert!(request.body.contains("code=the-code"));
    assert!(request.body.contains("redirect_uri="));
}

#[tokio::test]
async fn test_exchange_code_non_200_is_exchange_error() {
    let mock = MockProvider::start(vec![(
        TOKEN,
        Reply::status(400, json!({ "error": "invalid_grant" })),
    )])
    .await;
    let auth = AuthClient::new(&mock.config());

    match auth.exchange_code("bad").await {
        Err(Error::AuthExchange(Upstream::Status { status, body })) => {
            assert_eq!(status.as_u16(), 400);
            assert!(body.contains("invalid_grant"));
        }
        other => panic!("expected exchange error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_refresh_posts_refresh_grant() {
    let mock = MockProvider::start(vec![(
        TOKEN,
        Reply::ok(json!({ "access_token": "access-2", "expires_in": 3600 })),
    )])
    .await;
    let auth = AuthClient::new(&mock.config());

    assert_eq!(auth.refresh("refresh-1").await.unwrap(), "access-2");

    let request = mock.last(TOKEN).unwrap();
    assert_eq!(request.authorization.as_deref(), Some(BASIC_AUTH));
    assert!(request.body.contains("grant_type=refresh_token"));
    assert!(request.body.contains("refresh_token=refresh-1"));
}

#[tokio::test]
async fn test_refresh_non_200_is_refresh_error() {
    let mock = MockProvider::start(vec![(TOKEN, Reply::status(401, json!({})))]).await;
    let auth = AuthClient::new(&mock.config());

    let err = auth.refresh("revoked").await.unwrap_err();
    assert!(matches!(err, Error::AuthRefresh(_)));
    assert!(err.is_auth());
}

#[tokio::test]
async fn test_stale_token_is_refreshed_before_fetch() {
    let mut replies = top_pages();
    replies.push((TOKEN, Reply::ok(json!({ "access_token": "fresh-access" }))));
    let mock = MockProvider::start(replies).await;
    let config = mock.config();
    let tokens = TokenManager::new(AuthClient::new(&config));
    let api = SpotifyClient::new(&config);

    let mut session = session_with_token(REFRESH_AFTER_SECS + 600, Some("refresh-1"));
    let options = DashboardOptions::new(TimeRange::ShortTerm, 5, true);
    let dashboard = dashboard::load(&mut session, &tokens, &api, options)
        .await
        .unwrap();

    assert_eq!(mock.routes_hit(), vec![TOKEN, ARTISTS, TRACKS]);
    assert_eq!(
        mock.last(ARTISTS).unwrap().authorization.as_deref(),
        Some("Bearer fresh-access")
    );

    let token = session.token_pair().unwrap();
    assert_eq!(token.access_token, "fresh-access");
    assert_eq!(token.refresh_token.as_deref(), Some("refresh-1"));
    assert!(!token.is_stale(utils::unix_now()));
    assert_eq!(session.displayed_track_ids(), dashboard.track_ids());
}

#[tokio::test]
async fn test_refresh_failure_clears_session_and_skips_fetch() {
    let mut replies = top_pages();
    replies.push((TOKEN, Reply::status(400, json!({ "error": "invalid_grant" }))));
    let mock = MockProvider::start(replies).await;
    let config = mock.config();
    let tokens = TokenManager::new(AuthClient::new(&config));
    let api = SpotifyClient::new(&config);

    let mut session = session_with_token(REFRESH_AFTER_SECS + 1, Some("refresh-1"));
    session.store_displayed_track_ids(&["t1".to_string()]).unwrap();

    let result = dashboard::load(&mut session, &tokens, &api, DashboardOptions::default()).await;

    assert!(matches!(result, Err(Error::AuthRefresh(_))));
    assert!(session.is_empty());
    assert_eq!(mock.hits(TOKEN), 1);
    assert_eq!(mock.hits(ARTISTS), 0);
    assert_eq!(mock.hits(TRACKS), 0);
}

#[tokio::test]
async fn test_fresh_token_is_used_as_is() {
    let mock = MockProvider::start(top_pages()).await;
    let config = mock.config();
    let tokens = TokenManager::new(AuthClient::new(&config));
    let api = SpotifyClient::new(&config);

    let mut session = session_with_token(60, Some("refresh-1"));
    dashboard::load(&mut session, &tokens, &api, DashboardOptions::default())
        .await
        .unwrap();

    assert_eq!(mock.hits(TOKEN), 0);
    assert_eq!(
        mock.last(TRACKS).unwrap().authorization.as_deref(),
        Some("Bearer old-access")
    );
}

#[tokio::test]
async fn test_stale_token_without_refresh_token_is_used_as_is() {
    let mock = MockProvider::start(top_pages()).await;
    let config = mock.config();
    let tokens = TokenManager::new(AuthClient::new(&config));

    let mut session = session_with_token(REFRESH_AFTER_SECS * 2, None);
    let token = tokens.valid_access_token(&mut session).await.unwrap();

    assert_eq!(token, "old-access");
    assert_eq!(mock.hits(TOKEN), 0);
}

#[tokio::test]
async fn test_missing_token_is_not_authenticated() {
    let mock = MockProvider::start(top_pages()).await;
    let config = mock.config();
    let tokens = TokenManager::new(AuthClient::new(&config));
    let api = SpotifyClient::new(&config);

    let mut session = SessionManager::in_memory();
    let result = dashboard::load(&mut session, &tokens, &api, DashboardOptions::default()).await;

    assert!(matches!(result, Err(Error::NotAuthenticated)));
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn test_seed_from_refresh_token() {
    let mock = MockProvider::start(vec![(
        TOKEN,
        Reply::ok(json!({ "access_token": "seeded" })),
    )])
    .await;
    let tokens = TokenManager::new(AuthClient::new(&mock.config()));

    let mut session = SessionManager::in_memory();
    let token = tokens
        .seed_from_refresh_token(&mut session, "known-refresh")
        .await
        .unwrap();

    assert_eq!(token.access_token, "seeded");
    assert_eq!(session.token_pair(), Some(token));
}

#[tokio::test]
async fn test_fetch_failure_names_artists() {
    let mock = MockProvider::start(vec![
        (ARTISTS, Reply::status(401, json!({ "error": "expired" }))),
        (TRACKS, Reply::ok(page(vec![], 0))),
    ])
    .await;
    let api = SpotifyClient::new(&mock.config());

    match api.top_items("tok", TimeRange::LongTerm, 10).await {
        Err(Error::Fetch { kind, source }) => {
            assert_eq!(kind, ItemKind::Artists);
            assert_eq!(source.status().map(|s| s.as_u16()), Some(401));
        }
        other => panic!("expected fetch error, got {:?}", other),
    }
    assert_eq!(mock.hits(TRACKS), 0);
}

#[tokio::test]
async fn test_fetch_failure_names_tracks() {
    let mock = MockProvider::start(vec![
        (ARTISTS, Reply::ok(page(vec![], 0))),
        (TRACKS, Reply::status(500, json!({}))),
    ])
    .await;
    let api = SpotifyClient::new(&mock.config());

    let err = api
        .top_items("tok", TimeRange::ShortTerm, 10)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Fetch { kind: ItemKind::Tracks, .. }));
    assert!(!err.is_auth());
}

#[tokio::test]
async fn test_top_items_query_is_single_page() {
    let mock = MockProvider::start(top_pages()).await;
    let api = SpotifyClient::new(&mock.config());

    api.top_items("tok", TimeRange::LongTerm, 25).await.unwrap();

    for route in [ARTISTS, TRACKS] {
        let request = mock.last(route).unwrap();
        assert!(request.uri.contains("time_range=long_term"));
        assert!(request.uri.contains("limit=25"));
        assert!(request.uri.contains("offset=0"));
        assert_eq!(request.authorization.as_deref(), Some("Bearer tok"));
    }
}

#[tokio::test]
async fn test_unauthorized_fetch_clears_session() {
    let mock = MockProvider::start(vec![(
        ARTISTS,
        Reply::status(401, json!({ "error": { "status": 401, "message": "The access token expired" } })),
    )])
    .await;
    let config = mock.config();
    let tokens = TokenManager::new(AuthClient::new(&config));
    let api = SpotifyClient::new(&config);

    let mut session = session_with_token(60, Some("refresh-1"));
    let err = dashboard::load(&mut session, &tokens, &api, DashboardOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Fetch {
            kind: ItemKind::Artists,
            ..
        }
    ));
    assert!(err.is_auth());
    assert!(session.clear_on_auth_error(&err));
    assert!(session.is_empty());
}

#[tokio::test]
async fn test_server_error_on_fetch_keeps_session() {
    let mock = MockProvider::start(vec![(ARTISTS, Reply::status(503, json!({})))]).await;
    let config = mock.config();
    let tokens = TokenManager::new(AuthClient::new(&config));
    let api = SpotifyClient::new(&config);

    let mut session = session_with_token(60, Some("refresh-1"));
    let err = dashboard::load(&mut session, &tokens, &api, DashboardOptions::default())
        .await
        .unwrap_err();

    assert!(!err.is_auth());
    assert!(!session.clear_on_auth_error(&err));
    assert_eq!(session.token_pair().unwrap().access_token, "old-access");
}

#[tokio::test]
async fn test_transient_load_keeps_remembered_track_ids() {
    let mock = MockProvider::start(top_pages()).await;
    let config = mock.config();
    let tokens = TokenManager::new(AuthClient::new(&config));
    let api = SpotifyClient::new(&config);

    let mut session = session_with_token(60, Some("refresh-1"));
    let remembered = vec!["x1".to_string(), "x2".to_string()];
    session.store_displayed_track_ids(&remembered).unwrap();

    let options = DashboardOptions::new(TimeRange::ShortTerm, 5, true).transient();
    let dashboard = dashboard::load(&mut session, &tokens, &api, options)
        .await
        .unwrap();

    assert_eq!(dashboard.track_ids(), vec!["t1"]);
    assert_eq!(session.displayed_track_ids(), remembered);
}
