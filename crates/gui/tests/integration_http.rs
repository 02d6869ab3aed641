//! End-to-end flows against the dev server on an ephemeral port.

use std::sync::Arc;

use gmarker_gui_lib::backend::{Backend, HttpBackend};
use gmarker_gui_lib::harness::TestHarness;
use gmarker_gui_lib::state::{DetailState, Mode, Notice};
use server::{router, AppState, Store};
use shared::SubmitRequest;

async fn spawn() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router(AppState::new(Store::demo())))
            .await
            .unwrap();
    });
    format!("http://{addr}")
}

async fn connected() -> TestHarness<HttpBackend> {
    let base = spawn().await;
    let backend = HttpBackend::new(&base).unwrap();
    let mut h = TestHarness::new(Arc::new(backend));
    h.load_location("search/9").await;
    h
}

#[tokio::test]
async fn test_load_demo_board() {
    let h = connected().await;

    let board = h.board().unwrap();
    assert_eq!(board.marker_count(), 4);
    assert_eq!(board.skipped(), 0);
    assert!(h.marker_named("Marunouchi Cafe").is_some());
    assert!(h.backend().csrf_token().is_some());
}

#[tokio::test]
async fn test_detail_over_csrf_post() {
    let mut h = connected().await;

    h.click(h.marker_named("Marunouchi Cafe").unwrap());
    h.settle().await;

    let overlay = h.board().unwrap().overlay().unwrap();
    let summary = overlay.detail.summary().unwrap();
    assert_eq!(summary.name.as_deref(), Some("Marunouchi Cafe"));
    assert_eq!(summary.hours.as_deref(), Some("08:00–21:00"));
    assert_eq!(summary.review.as_ref().unwrap().author, "Hana");
}

#[tokio::test]
async fn test_missing_detail_is_placeholder() {
    let mut h = connected().await;

    h.click(h.marker_named("Tokyo Station").unwrap());
    h.settle().await;

    let board = h.board().unwrap();
    assert!(matches!(board.overlay().unwrap().detail, DetailState::Failed(_)));
    assert!(matches!(board.panel().detail, DetailState::Failed(_)));
}

#[tokio::test]
async fn test_curate_submit_and_results() {
    let mut h = connected().await;

    h.toggle_mode();
    h.click(h.marker_named("Yaesu Ramen").unwrap());
    h.click(h.marker_named("Yurakucho Izakaya").unwrap());
    h.toggle_mode();
    h.confirm_exit(true);
    h.settle().await;

    let board = h.board().unwrap();
    assert_eq!(board.mode(), Mode::Browse);
    assert!(board.selection().is_empty());
    assert_eq!(board.marker_count(), 2);
    assert!(h.marker_named("Yaesu Ramen").is_some());
    assert!(h.marker_named("Yurakucho Izakaya").is_some());
    assert!(h.marker_named("Tokyo Station").is_none());
}

#[tokio::test]
async fn test_submit_without_cookie_is_forbidden() {
    let base = spawn().await;
    let backend = HttpBackend::new(&base).unwrap();

    let err = backend
        .submit(&SubmitRequest::default())
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(403));
}

#[tokio::test]
async fn test_submit_with_wrong_token_keeps_selection() {
    let mut h = connected().await;
    // overwrite the issued cookie so header and cookie no longer match the server's view
    h.backend().add_cookie("csrftoken=; Path=/");

    h.toggle_mode();
    let cafe = h.marker_named("Marunouchi Cafe").unwrap();
    h.click(cafe);
    h.toggle_mode();
    h.confirm_exit(true);
    h.settle().await;

    let board = h.board().unwrap();
    assert_eq!(board.mode(), Mode::Curate);
    assert!(board.is_selected(cafe));
    match board.notice() {
        Some(Notice::SubmitFailed(message)) => assert!(message.contains("403")),
        other => panic!("expected submit failure, got {other:?}"),
    }
}

#[tokio::test]
async fn test_place_id_cannot_reach_another_detail() {
    let base = spawn().await;
    let backend = HttpBackend::new(&base).unwrap();
    backend.fetch_board("search/9").await.unwrap();

    for id in ["no-such-place/../demo-cafe", "demo-cafe?extra=1", "demo-cafe#frag"] {
        let err = backend.fetch_detail(id).await.unwrap_err();
        assert_eq!(err.status(), Some(404), "place id {id:?}");
    }
    assert!(backend.fetch_detail("demo-cafe").await.is_ok());
}
