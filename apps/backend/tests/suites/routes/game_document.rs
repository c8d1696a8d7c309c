use actix_web::http::StatusCode;
use actix_web::test;
use sequence_backend::domain::board::BOARD_SIZE;
use sequence_backend::domain::state::Field;
use sequence_test_support::problem_details::assert_problem_details;
use serde_json::{json, Value};

use crate::support::app_builder::create_test_app;
use crate::support::test_state::build_test_state;

#[actix_web::test]
async fn empty_document_lists_every_field_as_null() {
    let game = build_test_state(2).await;
    let app = create_test_app(game.state).with_prod_routes().build().await;

    let req = test::TestRequest::get().uri("/api/game").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let object = body.as_object().unwrap();
    assert_eq!(object.len(), Field::ALL.len());
    for field in Field::ALL {
        assert_eq!(object[field.as_str()], Value::Null, "{field}");
    }
}

#[actix_web::test]
async fn dealt_document_is_readable_whole_and_by_field() {
    let game = build_test_state(3).await;
    let app = create_test_app(game.state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/api/game/blue/new-game")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/api/game").to_request();
    let doc: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(doc["currentPlayer"], "blue");
    assert_eq!(doc["boardState"].as_array().unwrap().len(), BOARD_SIZE);
    assert_eq!(doc["bluePlayerHand"].as_array().unwrap().len(), 7);
    assert!(doc["deckId"].is_string());
    assert_eq!(doc["discardImage"], Value::Null);

    let req = test::TestRequest::get()
        .uri("/api/game/fields/currentPlayer")
        .to_request();
    let current: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(current, json!("blue"));
}

#[actix_web::test]
async fn unknown_field_is_a_bad_request() {
    let game = build_test_state(4).await;
    let app = create_test_app(game.state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri("/api/game/fields/players")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, StatusCode::BAD_REQUEST, "INVALID_FIELD").await;
}

#[actix_web::test]
async fn unset_field_is_not_found() {
    let game = build_test_state(5).await;
    let app = create_test_app(game.state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri("/api/game/fields/discardImage")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, StatusCode::NOT_FOUND, "FIELD_NOT_FOUND").await;
}

#[actix_web::test]
async fn store_outage_on_read_is_unavailable() {
    let game = build_test_state(6).await;
    let store = game.store.clone();
    let app = create_test_app(game.state).with_prod_routes().build().await;

    store.set_available(false);
    let req = test::TestRequest::get().uri("/api/game").to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, StatusCode::SERVICE_UNAVAILABLE, "STORE_UNAVAILABLE").await;
}
