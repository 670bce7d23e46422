mod create_product;
mod delete_product;
mod get_product;
mod get_products;
mod update_product;

use actix_web::web;
use create_product::create_product_controller;
use delete_product::delete_product_controller;
use get_product::get_product_controller;
use get_products::get_products_controller;
use update_product::update_product_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/product", web::post().to(create_product_controller));
    cfg.route("/product", web::get().to(get_products_controller));

    cfg.route(
        "/product/{product_id}",
        web::get().to(get_product_controller),
    );
    cfg.route(
        "/product/{product_id}",
        web::put().to(update_product_controller),
    );
    cfg.route(
        "/product/{product_id}",
        web::delete().to(delete_product_controller),
    );
}
