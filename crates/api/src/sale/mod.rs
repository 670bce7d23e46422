mod create_sale;
mod get_sale;
mod get_sales;

use actix_web::web;
use create_sale::create_sale_controller;
use get_sale::get_sale_controller;
use get_sales::get_sales_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/sale", web::post().to(create_sale_controller));
    cfg.route("/sale", web::get().to(get_sales_controller));

    cfg.route("/sale/{sale_id}", web::get().to(get_sale_controller));
}
