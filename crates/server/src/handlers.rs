use actix_web::HttpRequest;
use actix_web::HttpResponse;
use actix_web::Responder;
use actix_web::web;
use mcl_combat::PlayerState;
use mcl_core::ID;
use mcl_core::MIN_PLAYERS;
use mcl_gameroom::Room;
use mcl_hosting::Lobby;
use std::sync::Arc;

#[derive(Debug, serde::Deserialize)]
pub struct OpenRequest {
    #[serde(default = "default_seats")]
    pub seats: usize,
}

fn default_seats() -> usize {
    MIN_PLAYERS
}

pub async fn open(lobby: web::Data<Arc<Lobby>>, body: web::Json<OpenRequest>) -> impl Responder {
    match lobby.open(body.seats).await {
        Ok((room, players)) => HttpResponse::Ok().json(serde_json::json!({
            "room_id": room.to_string(),
            "players": players.iter().map(|p| p.to_string()).collect::<Vec<_>>(),
        })),
        Err(e) => HttpResponse::BadRequest().body(e.to_string()),
    }
}

pub async fn close(lobby: web::Data<Arc<Lobby>>, path: web::Path<uuid::Uuid>) -> impl Responder {
    match lobby.close(ID::from(path.into_inner())).await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "status": "closed" })),
        Err(e) => HttpResponse::NotFound().body(e.to_string()),
    }
}

pub async fn enter(
    lobby: web::Data<Arc<Lobby>>,
    path: web::Path<uuid::Uuid>,
    query: web::Query<std::collections::HashMap<String, String>>,
    body: web::Payload,
    req: HttpRequest,
) -> impl Responder {
    let id: ID<Room> = ID::from(path.into_inner());
    let player: Option<ID<PlayerState>> = query.get("player").and_then(|p| p.parse().ok());
    let Some(player) = player else {
        return HttpResponse::BadRequest()
            .body("missing or invalid player id")
            .map_into_right_body();
    };
    log::info!("player {} entering room {}", player, id);
    match actix_ws::handle(&req, body) {
        Ok((response, session, stream)) => match lobby.bridge(id, player, session, stream).await {
            Ok(()) => response.map_into_left_body(),
            Err(e) => HttpResponse::NotFound()
                .body(e.to_string())
                .map_into_right_body(),
        },
        Err(e) => HttpResponse::InternalServerError()
            .body(e.to_string())
            .map_into_right_body(),
    }
}
