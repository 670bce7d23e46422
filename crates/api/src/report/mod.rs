mod get_inventory_report;
mod get_sales_report;

use actix_web::web;
use get_inventory_report::get_inventory_report_controller;
use get_sales_report::get_sales_report_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/report/sales", web::get().to(get_sales_report_controller));
    cfg.route(
        "/report/inventory",
        web::get().to(get_inventory_report_controller),
    );
}
