//! Minimal stand-in for the deck-of-cards API: one deck, dealt in catalog order.

use std::collections::HashMap;
use std::net::{SocketAddr, TcpListener};

use actix_web::dev::ServerHandle;
use actix_web::{web, App, HttpResponse, HttpServer};
use parking_lot::Mutex;
use sequence_backend::domain::cards::standard_deck;
use serde_json::json;

pub const STUB_DECK_ID: &str = "stubdeck01";

struct StubDeck {
    remaining: Mutex<Vec<&'static str>>,
}

async fn shuffle(deck: web::Data<StubDeck>) -> HttpResponse {
    let mut remaining = deck.remaining.lock();
    *remaining = standard_deck().map(|card| card.code).collect();
    remaining.reverse();
    HttpResponse::Ok().json(json!({
        "success": true,
        "deck_id": STUB_DECK_ID,
        "shuffled": true,
        "remaining": remaining.len(),
    }))
}

async fn draw(
    deck: web::Data<StubDeck>,
    path: web::Path<String>,
    query: web::Query<HashMap<String, String>>,
) -> HttpResponse {
    if path.as_str() != STUB_DECK_ID {
        return HttpResponse::NotFound().json(json!({"success": false, "error": "Deck ID does not exist."}));
    }
    let count: usize = query
        .get("count")
        .and_then(|c| c.parse().ok())
        .unwrap_or(1);

    let mut remaining = deck.remaining.lock();
    if count > remaining.len() {
        let drawn: Vec<_> = remaining
            .drain(..)
            .rev()
            .map(|code| json!({"code": code}))
            .collect();
        return HttpResponse::Ok().json(json!({
            "success": false,
            "deck_id": STUB_DECK_ID,
            "cards": drawn,
            "remaining": 0,
            "error": format!("Not enough cards remaining to draw {count} additional"),
        }));
    }

    let split = remaining.len() - count;
    let drawn: Vec<_> = remaining
        .drain(split..)
        .rev()
        .map(|code| json!({"code": code}))
        .collect();
    HttpResponse::Ok().json(json!({
        "success": true,
        "deck_id": STUB_DECK_ID,
        "cards": drawn,
        "remaining": remaining.len(),
    }))
}

async fn broken() -> HttpResponse {
    HttpResponse::InternalServerError().body("upstream exploded")
}

/// Serve the stub on a random port. The working API lives under `/api/deck`,
/// a failing one under `/down`.
pub fn start_stub_deck_api() -> std::io::Result<(ServerHandle, SocketAddr)> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;
    let deck = web::Data::new(StubDeck {
        remaining: Mutex::new(Vec::new()),
    });

    let server = HttpServer::new(move || {
        App::new()
            .app_data(deck.clone())
            .service(
                web::scope("/api/deck")
                    .route("/new/shuffle/", web::get().to(shuffle))
                    .route("/{deck_id}/draw/", web::get().to(draw)),
            )
            .default_service(web::to(broken))
    })
    .workers(1)
    .listen(listener)?
    .run();

    let handle = server.handle();
    tokio::spawn(server);
    Ok((handle, addr))
}
