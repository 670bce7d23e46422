mod create_client;
mod delete_client;
mod get_client;
mod get_clients;
mod update_client;

use actix_web::web;
use create_client::create_client_controller;
use delete_client::delete_client_controller;
use get_client::get_client_controller;
use get_clients::get_clients_controller;
use update_client::update_client_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/client", web::post().to(create_client_controller));
    cfg.route("/client", web::get().to(get_clients_controller));

    cfg.route("/client/{client_id}", web::get().to(get_client_controller));
    cfg.route(
        "/client/{client_id}",
        web::put().to(update_client_controller),
    );
    cfg.route(
        "/client/{client_id}",
        web::delete().to(delete_client_controller),
    );
}
