use std::time::{Duration, Instant};

use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::jwt::verify_access_token;
use crate::state::app_state::AppState;
use crate::ws::hub::Outbound;
use crate::ws::protocol::{ClientMsg, ServerMsg};
use crate::AppError;

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(20);
const CLIENT_TIMEOUT: Duration = Duration::from_secs(40);

pub async fn upgrade(
    req: HttpRequest,
    stream: web::Payload,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let conn_id = Uuid::new_v4();
    let session = WsSession::new(conn_id, app_state);
    ws::start(session, &req, stream)
}

pub struct WsSession {
    conn_id: Uuid,
    app_state: web::Data<AppState>,

    /// Set after a successful `authenticate`; every other intent is
    /// rejected until then.
    user: Option<(Uuid, String)>,

    last_heartbeat: Instant,
}

impl WsSession {
    fn new(conn_id: Uuid, app_state: web::Data<AppState>) -> Self {
        Self {
            conn_id,
            app_state,
            user: None,
            last_heartbeat: Instant::now(),
        }
    }

    fn send_json(ctx: &mut ws::WebsocketContext<Self>, msg: &ServerMsg) {
        match serde_json::to_string(msg) {
            Ok(payload) => ctx.text(payload),
            Err(err) => warn!(error = %err, "[WS SESSION] failed to serialize outbound message"),
        }
    }

    fn send_error_and_close(
        &self,
        ctx: &mut ws::WebsocketContext<Self>,
        code: &str,
        message: impl Into<String>,
    ) {
        let msg = ServerMsg::Error {
            code: code.to_string(),
            message: message.into(),
        };
        Self::send_json(ctx, &msg);
        ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Error)));
        ctx.stop();
    }

    fn start_heartbeat(&self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(HEARTBEAT_INTERVAL, |actor, ctx| {
            if Instant::now().duration_since(actor.last_heartbeat) > CLIENT_TIMEOUT {
                warn!(conn_id = %actor.conn_id, "[WS SESSION] heartbeat timed out");
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Normal)));
                ctx.stop();
                return;
            }
            ctx.ping(b"keepalive");
        });
    }

    fn handle_authenticate(&mut self, token: &str, ctx: &mut ws::WebsocketContext<Self>) {
        let claims = match verify_access_token(token, self.app_state.security()) {
            Ok(claims) => claims,
            Err(err) => {
                Self::send_json(
                    ctx,
                    &ServerMsg::AuthError {
                        message: err.detail(),
                    },
                );
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Policy)));
                ctx.stop();
                return;
            }
        };

        self.user = Some((claims.sub, claims.username.clone()));
        self.app_state
            .hub()
            .register_user(claims.sub, ctx.address().recipient::<Outbound>());
        info!(conn_id = %self.conn_id, user_id = %claims.sub, "[WS SESSION] authenticated");
        Self::send_json(
            ctx,
            &ServerMsg::Authenticated {
                user_id: claims.sub,
                username: claims.username,
            },
        );
    }

    /// Run a game intent off the actor thread; failures go back to this
    /// session only, never to the room.
    fn spawn_intent<F>(&self, ctx: &mut ws::WebsocketContext<Self>, fut: F)
    where
        F: std::future::Future<Output = Result<(), AppError>> + 'static,
    {
        ctx.spawn(fut.into_actor(self).map(|res, actor, ctx| {
            if let Err(err) = res {
                warn!(
                    conn_id = %actor.conn_id,
                    code = %err.code(),
                    detail = %err.detail(),
                    "[WS SESSION] intent rejected"
                );
                Self::send_json(
                    ctx,
                    &ServerMsg::Error {
                        code: err.code(),
                        message: err.detail(),
                    },
                );
            }
        }));
    }

    fn dispatch(&mut self, cmd: ClientMsg, ctx: &mut ws::WebsocketContext<Self>) {
        let Some((user_id, _)) = self.user else {
            self.send_error_and_close(ctx, "UNAUTHORIZED", "Must authenticate first");
            return;
        };
        let state = self.app_state.clone();

        match cmd {
            ClientMsg::Authenticate { .. } => {
                Self::send_json(
                    ctx,
                    &ServerMsg::Error {
                        code: "BAD_REQUEST".to_string(),
                        message: "Already authenticated".to_string(),
                    },
                );
            }
            ClientMsg::JoinGame { game_id } => {
                self.spawn_intent(ctx, async move {
                    state.game_flow().join_game(game_id, user_id).await
                });
            }
            ClientMsg::Ready { game_id } => {
                self.spawn_intent(
                    ctx,
                    async move { state.game_flow().ready(game_id, user_id).await },
                );
            }
            ClientMsg::PlaceBid {
                game_id,
                bid_type,
                contract,
            } => {
                self.spawn_intent(ctx, async move {
                    state
                        .game_flow()
                        .place_bid(game_id, user_id, bid_type, contract)
                        .await
                });
            }
            ClientMsg::PlayCard { game_id, card } => {
                self.spawn_intent(ctx, async move {
                    state.game_flow().play_card(game_id, user_id, card).await
                });
            }
            ClientMsg::Declare {
                game_id,
                declaration,
            } => {
                self.spawn_intent(ctx, async move {
                    state.game_flow().declare(game_id, user_id, declaration).await
                });
            }
            ClientMsg::FindMatch => {
                self.spawn_intent(ctx, async move {
                    state.matchmaking().enqueue(user_id).await.map(|_| ())
                });
            }
            ClientMsg::CancelMatch => {
                self.spawn_intent(ctx, async move { state.matchmaking().leave(user_id).await });
            }
        }
    }
}

impl Actor for WsSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!(conn_id = %self.conn_id, "[WS SESSION] started");
        self.start_heartbeat(ctx);
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        if let Some((user_id, _)) = self.user {
            self.app_state.hub().unregister_user(user_id);
        }
        info!(conn_id = %self.conn_id, "[WS SESSION] stopped");
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
                let Ok(cmd) = parsed else {
                    self.send_error_and_close(ctx, "BAD_REQUEST", "Malformed JSON");
                    return;
                };

                match cmd {
                    ClientMsg::Authenticate { token } => self.handle_authenticate(&token, ctx),
                    other => self.dispatch(other, ctx),
                }
            }
            Ok(ws::Message::Binary(_)) => {
                self.last_heartbeat = Instant::now();
                self.send_error_and_close(ctx, "BAD_REQUEST", "Binary not supported");
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
                warn!(conn_id = %self.conn_id, error = %err, "[WS SESSION] protocol error");
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Error)));
                ctx.stop();
            }
        }
    }
}

impl Handler<Outbound> for WsSession {
    type Result = ();

    fn handle(&mut self, msg: Outbound, ctx: &mut Self::Context) -> Self::Result {
        Self::send_json(ctx, &msg.0);
    }
}
