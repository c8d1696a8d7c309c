use std::collections::HashMap;
use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};

use crate::domain::state::PlayerColor;
use crate::error::AppError;
use crate::errors::ErrorCode;

/// Player seat named by the request.
///
/// Read from the `{color}` route segment, falling back to a `?color=` query
/// parameter (websocket upgrades carry it there).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seat(pub PlayerColor);

impl Seat {
    pub fn color(self) -> PlayerColor {
        self.0
    }

    fn parse(req: &HttpRequest) -> Result<Self, AppError> {
        let raw = match req.match_info().get("color") {
            Some(color) => color.to_string(),
            None => web::Query::<HashMap<String, String>>::from_query(req.query_string())
                .ok()
                .and_then(|query| query.get("color").cloned())
                .ok_or_else(|| {
                    AppError::invalid(ErrorCode::InvalidColor, "Missing color parameter")
                })?,
        };

        raw.parse::<PlayerColor>()
            .map(Seat)
            .map_err(|detail| AppError::invalid(ErrorCode::InvalidColor, detail))
    }
}

impl FromRequest for Seat {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Self::parse(req))
    }
}
