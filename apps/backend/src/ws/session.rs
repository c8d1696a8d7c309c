use std::time::{Duration, Instant};

use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use tokio_stream::wrappers::WatchStream;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::state::GameState;
use crate::error::AppError;
use crate::extractors::seat::Seat;
use crate::protocol::view::ClientView;
use crate::services::dispatch::ControllerHandle;
use crate::state::app_state::AppState;
use crate::ws::protocol::{ClientMsg, ErrorCode, ServerMsg, PROTOCOL_VERSION};

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(20);
const CLIENT_TIMEOUT: Duration = Duration::from_secs(40);

pub async fn upgrade(
    req: HttpRequest,
    stream: web::Payload,
    seat: Seat,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let controller = app_state.controller(seat.color()).clone();
    let session = WsSession::new(Uuid::new_v4(), controller);
    ws::start(session, &req, stream)
}

pub struct WsSession {
    conn_id: Uuid,
    controller: ControllerHandle,

    last_heartbeat: Instant,
    heartbeat_handle: Option<SpawnHandle>,

    hello_done: bool,
}

impl WsSession {
    fn new(conn_id: Uuid, controller: ControllerHandle) -> Self {
        Self {
            conn_id,
            controller,
            last_heartbeat: Instant::now(),
            heartbeat_handle: None,
            hello_done: false,
        }
    }

    fn send_json(ctx: &mut ws::WebsocketContext<Self>, msg: &ServerMsg) {
        match serde_json::to_string(msg) {
            Ok(payload) => ctx.text(payload),
            Err(err) => warn!(error = %err, "[WS SESSION] failed to serialize outbound message"),
        }
    }

    fn send_state(&self, ctx: &mut ws::WebsocketContext<Self>, state: &GameState) {
        let view = ClientView::project(state, self.controller.seat());
        Self::send_json(ctx, &ServerMsg::State { view });
    }

    fn send_error_and_close(
        &self,
        ctx: &mut ws::WebsocketContext<Self>,
        code: ErrorCode,
        message: impl Into<String>,
    ) {
        let msg = ServerMsg::Error {
            code,
            reason: None,
            message: message.into(),
        };
        Self::send_json(ctx, &msg);
        ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Error)));
        ctx.stop();
    }

    fn start_heartbeat(&mut self, ctx: &mut ws::WebsocketContext<Self>) {
        let handle = ctx.run_interval(HEARTBEAT_INTERVAL, |actor, ctx| {
            if Instant::now().duration_since(actor.last_heartbeat) > CLIENT_TIMEOUT {
                warn!(
                    conn_id = %actor.conn_id,
                    seat = %actor.controller.seat(),
                    "[WS SESSION] heartbeat timed out"
                );
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Normal)));
                ctx.stop();
                return;
            }
            ctx.ping(b"keepalive");
        });
        self.heartbeat_handle = Some(handle);
    }

    fn handle_client_msg(&mut self, msg: ClientMsg, ctx: &mut ws::WebsocketContext<Self>) {
        if let ClientMsg::Hello { protocol } = msg {
            if protocol != PROTOCOL_VERSION {
                self.send_error_and_close(
                    ctx,
                    ErrorCode::BadProtocol,
                    "Unsupported protocol version",
                );
                return;
            }
            self.hello_done = true;
            Self::send_json(
                ctx,
                &ServerMsg::HelloAck {
                    protocol: PROTOCOL_VERSION,
                    seat: self.controller.seat(),
                },
            );
            let current = self.controller.current();
            self.send_state(ctx, &current);
            return;
        }

        if !self.hello_done {
            self.send_error_and_close(ctx, ErrorCode::BadRequest, "Must send hello first");
            return;
        }

        let Some(command) = msg.command() else {
            return;
        };

        let controller = self.controller.clone();
        let conn_id = self.conn_id;
        ctx.spawn(
            async move { controller.dispatch(command).await }
                .into_actor(self)
                .map(move |res, _actor, ctx| {
                    // Successful actions reach the client through the state stream.
                    if let Err(err) = res {
                        debug!(conn_id = %conn_id, error = %err, "[WS SESSION] action rejected");
                        let app_err = AppError::from(err);
                        Self::send_json(
                            ctx,
                            &ServerMsg::Error {
                                code: ErrorCode::ActionRejected,
                                reason: Some(app_err.code().as_str()),
                                message: app_err.to_string(),
                            },
                        );
                    }
                }),
        );
    }
}

impl Actor for WsSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!(
            conn_id = %self.conn_id,
            seat = %self.controller.seat(),
            "[WS SESSION] started"
        );

        ctx.add_stream(WatchStream::new(self.controller.subscribe_state()));
        self.start_heartbeat(ctx);
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        info!(
            conn_id = %self.conn_id,
            seat = %self.controller.seat(),
            "[WS SESSION] stopped"
        );
    }
}

impl StreamHandler<GameState> for WsSession {
    fn handle(&mut self, state: GameState, ctx: &mut Self::Context) {
        if self.hello_done {
            self.send_state(ctx, &state);
        }
    }

    fn finished(&mut self, ctx: &mut Self::Context) {
        warn!(
            conn_id = %self.conn_id,
            seat = %self.controller.seat(),
            "[WS SESSION] controller state stream ended"
        );
        ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Away)));
        ctx.stop();
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for WsSession {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(payload)) => {
                self.last_heartbeat = Instant::now();
                ctx.pong(&payload);
            }
            Ok(ws::Message::Pong(_)) => {
                self.last_heartbeat = Instant::now();
            }
            Ok(ws::Message::Text(text)) => {
                self.last_heartbeat = Instant::now();

                let parsed: Result<ClientMsg, _> = serde_json::from_str(&text);
                let Ok(msg) = parsed else {
                    self.send_error_and_close(ctx, ErrorCode::BadRequest, "Malformed JSON");
                    return;
                };
                self.handle_client_msg(msg, ctx);
            }
            Ok(ws::Message::Binary(_)) => {
                self.last_heartbeat = Instant::now();
                self.send_error_and_close(ctx, ErrorCode::BadRequest, "Binary not supported");
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Ok(ws::Message::Continuation(_)) => {
                self.last_heartbeat = Instant::now();
            }
            Ok(ws::Message::Nop) => {
                self.last_heartbeat = Instant::now();
            }
            Err(err) => {
                warn!(
                    conn_id = %self.conn_id,
                    seat = %self.controller.seat(),
                    error = %err,
                    "[WS SESSION] protocol error"
                );
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Error)));
                ctx.stop();
            }
        }
    }
}
