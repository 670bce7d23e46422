use crate::error::BizdeskError;
use crate::shared::auth::protect_route;
use actix_web::{web, HttpResponse};
use bizdesk_api_structs::get_me::*;
use bizdesk_infra::BizdeskContext;

pub async fn get_me_controller(
    http_req: web::HttpRequest,
    ctx: web::Data<BizdeskContext>,
) -> Result<HttpResponse, BizdeskError> {
    let user = protect_route(&http_req, &ctx).await?;

    Ok(HttpResponse::Ok().json(APIResponse::new(user)))
}
