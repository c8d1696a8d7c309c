//! HTTP surface of the game: document reads and per-seat actions.
//!
//! Every action responds with the acting seat's `ClientView` as it stands
//! once the action committed.

use actix_web::{web, HttpRequest, HttpResponse};
use serde_json::{Map, Value};

use crate::domain::cards::CardCode;
use crate::domain::state::Field;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::seat::Seat;
use crate::protocol::view::ClientView;
use crate::services::turn_controller::Command;
use crate::state::app_state::AppState;

fn path_param<'a>(req: &'a HttpRequest, name: &str) -> Result<&'a str, AppError> {
    req.match_info()
        .get(name)
        .ok_or_else(|| AppError::invalid(ErrorCode::BadRequest, format!("Missing {name} parameter")))
}

async fn run(seat: Seat, app_state: &AppState, command: Command) -> Result<HttpResponse, AppError> {
    let state = app_state.controller(seat.color()).dispatch(command).await?;
    Ok(HttpResponse::Ok().json(ClientView::project(&state, seat.color())))
}

/// GET /api/game: all six fields, `null` where absent.
async fn document(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let raw = app_state.store().read_all().await?;
    let body: Map<String, Value> = Field::ALL
        .into_iter()
        .map(|field| {
            let value = raw.get(field.as_str()).cloned().unwrap_or(Value::Null);
            (field.as_str().to_string(), value)
        })
        .collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /api/game/fields/{field}
async fn read_field(
    req: HttpRequest,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let field = path_param(&req, "field")?
        .parse::<Field>()
        .map_err(|detail| AppError::invalid(ErrorCode::InvalidField, detail))?;

    match app_state.store().read_field(field).await? {
        Some(value) => Ok(HttpResponse::Ok().json(value)),
        None => Err(AppError::not_found(
            ErrorCode::FieldNotFound,
            format!("Field {field} is not set"),
        )),
    }
}

async fn view(seat: Seat, app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let state = app_state.controller(seat.color()).current();
    Ok(HttpResponse::Ok().json(ClientView::project(&state, seat.color())))
}

async fn new_game(seat: Seat, app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    run(seat, &app_state, Command::StartNewGame).await
}

async fn draw(seat: Seat, app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    run(seat, &app_state, Command::DrawCard).await
}

async fn place_chip(
    req: HttpRequest,
    seat: Seat,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let raw = path_param(&req, "cell")?;
    let cell = raw.parse::<usize>().map_err(|_| {
        AppError::invalid(ErrorCode::InvalidCell, format!("Invalid board cell: {raw}"))
    })?;
    run(seat, &app_state, Command::PlaceChip { cell }).await
}

async fn discard(
    req: HttpRequest,
    seat: Seat,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let code = CardCode::new(path_param(&req, "code")?);
    run(seat, &app_state, Command::Discard { code }).await
}

async fn end_turn(seat: Seat, app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    run(seat, &app_state, Command::EndTurn).await
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(document))
        .route("/fields/{field}", web::get().to(read_field))
        .route("/{color}/view", web::get().to(view))
        .route("/{color}/new-game", web::post().to(new_game))
        .route("/{color}/draw", web::post().to(draw))
        .route("/{color}/chips/{cell}", web::post().to(place_chip))
        .route("/{color}/discard/{code}", web::post().to(discard))
        .route("/{color}/end-turn", web::post().to(end_turn));
}
