// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Directory refresh and persistence tests.

use setmore_report::config::Config;
use setmore_report::db::DirectoryCache;
use setmore_report::error::AppError;
use setmore_report::AppState;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;
use common::{mount_tokens, services_body, staff_body};

#[tokio::test]
async fn test_refresh_overwrites_staff_wholesale() {
    let server = MockServer::start().await;
    mount_tokens(&server, &["tok-1"]).await;

    Mock::given(method("GET"))
        .and(path("/bookingapi/staffs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(staff_body(&[
            ("s1", "Grace", "Hopper"),
            ("s2", "Alan", "Turing"),
        ])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/bookingapi/staffs"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(staff_body(&[("s1", "Grace", "Murray")])),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/bookingpage/services"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(services_body(&[("v1", "Tutoring")])),
        )
        .mount(&server)
        .await;

    let tmp = tempfile::tempdir().unwrap();
    let mut config = Config::test_default(&server.uri());
    config.cache_dir = tmp.path().to_path_buf();
    let state = AppState::new(config).unwrap();

    state.directory_service.refresh_directories().await.unwrap();
    assert_eq!(state.directory_service.load_staff().await.unwrap().len(), 2);

    state.directory_service.refresh_directories().await.unwrap();
    let staff = state.directory_service.load_staff().await.unwrap();
    assert_eq!(staff.len(), 1);
    assert_eq!(staff["s1"], "Grace Murray");
    assert!(!staff.contains_key("s2"));

    // Files survive a fresh state pointed at the same directory.
    let reopened = DirectoryCache::new(tmp.path());
    let services = reopened.load("services").await.unwrap();
    assert_eq!(services["v1"], "Tutoring");
}

#[tokio::test]
async fn test_duplicate_staff_key_keeps_last() {
    let server = MockServer::start().await;
    mount_tokens(&server, &["tok-1"]).await;

    Mock::given(method("GET"))
        .and(path("/bookingapi/staffs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(staff_body(&[
            ("s1", "First", "Entry"),
            ("s1", "Second", "Entry"),
        ])))
        .mount(&server)
        .await;

    let state = common::test_state(&server);
    let staff = state
        .directory_service
        .fetch_staff_directory()
        .await
        .unwrap();

    assert_eq!(staff.len(), 1);
    assert_eq!(staff["s1"], "Second Entry");
}

#[tokio::test]
async fn test_fetch_does_not_persist() {
    let server = MockServer::start().await;
    mount_tokens(&server, &["tok-1"]).await;

    Mock::given(method("GET"))
        .and(path("/bookingpage/services"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(services_body(&[("v1", "Tutoring")])),
        )
        .mount(&server)
        .await;

    let state = common::test_state(&server);
    let services = state
        .directory_service
        .fetch_service_directory()
        .await
        .unwrap();
    assert_eq!(services["v1"], "Tutoring");

    assert!(state.directory_service.load_services().await.is_err());
}

#[tokio::test]
async fn test_failed_services_fetch_leaves_cache_untouched() {
    let server = MockServer::start().await;
    mount_tokens(&server, &["tok-1"]).await;

    Mock::given(method("GET"))
        .and(path("/bookingapi/staffs"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(staff_body(&[("s1", "Grace", "Hopper")])),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/bookingpage/services"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let state = common::test_state(&server);
    let err = state
        .directory_service
        .refresh_directories()
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Network(_)));

    // Neither directory was written.
    assert!(matches!(
        state.directory_service.load_staff().await,
        Err(AppError::CacheMiss(_))
    ));
    assert!(matches!(
        state.directory_service.load_services().await,
        Err(AppError::CacheMiss(_))
    ));
}
