use actix_web::http::StatusCode;
use actix_web::test;
use sequence_test_support::problem_details::assert_problem_details;

use crate::support::app_builder::create_test_app;
use crate::support::test_state::build_test_state;

#[actix_web::test]
async fn problem_trace_id_matches_the_request_id() {
    let game = build_test_state(51).await;
    let app = create_test_app(game.state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri("/api/game/fields/nope")
        .to_request();
    let resp = test::call_service(&app, req).await;
    let request_id = resp
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .expect("x-request-id should be set");

    let problem = assert_problem_details(resp, StatusCode::BAD_REQUEST, "INVALID_FIELD").await;
    assert_eq!(problem.trace_id, request_id);
    assert_eq!(problem.title, "Invalid Field");
    assert!(problem.detail.contains("nope"));
}

#[actix_web::test]
async fn every_request_gets_a_distinct_trace_id() {
    let game = build_test_state(52).await;
    let app = create_test_app(game.state).with_prod_routes().build().await;

    let mut seen = Vec::new();
    for _ in 0..3 {
        let req = test::TestRequest::get()
            .uri("/api/game/fields/deckId")
            .to_request();
        let resp = test::call_service(&app, req).await;
        let problem = assert_problem_details(resp, StatusCode::NOT_FOUND, "FIELD_NOT_FOUND").await;
        assert!(!seen.contains(&problem.trace_id));
        seen.push(problem.trace_id);
    }
}
