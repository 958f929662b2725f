//! Manaclash Server
//!
//! HTTP front end for opening rooms plus the WebSocket upgrade endpoint
//! for playing in them.
//!
//! ## Routes
//!
//! - `POST /rooms` — open a room, returns the room id and minted player ids
//! - `GET /rooms/{room_id}/enter?player=` — WebSocket upgrade onto a seat
//! - `DELETE /rooms/{room_id}` — close a room
//! - `GET /health` — liveness probe

pub mod handlers;

use actix_cors::Cors;
use actix_web::App;
use actix_web::HttpResponse;
use actix_web::HttpServer;
use actix_web::Responder;
use actix_web::middleware::Logger;
use actix_web::web;
use mcl_hosting::Lobby;
use std::sync::Arc;

async fn health() -> impl Responder {
    HttpResponse::Ok().body("ok")
}

#[rustfmt::skip]
pub async fn run(bind: (String, u16)) -> Result<(), std::io::Error> {
    let lobby = web::Data::new(Arc::new(Lobby::default()));
    log::info!("starting manaclash server on {}:{}", bind.0, bind.1);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::new("%r %s %Ts"))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header(),
            )
            .app_data(lobby.clone())
            .route("/health", web::get().to(health))
            .service(
                web::scope("/rooms")
                    .route("", web::post().to(handlers::open))
                    .route("/{room_id}/enter", web::get().to(handlers::enter))
                    .route("/{room_id}", web::delete().to(handlers::close)),
            )
    })
    .bind(bind)?
    .run()
    .await
}
