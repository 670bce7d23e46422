use crate::error::BizdeskError;
use actix_web::HttpRequest;
use bizdesk_domain::User;
use bizdesk_infra::BizdeskContext;

const API_KEY_HEADER: &str = "bizdesk-api-key";

/// Resolves the api key header to the `User` owning it. Every tenant-scoped
/// route goes through here; a missing or unknown key fails closed.
pub async fn protect_route(
    http_req: &HttpRequest,
    ctx: &BizdeskContext,
) -> Result<User, BizdeskError> {
    let api_key = match http_req.headers().get(API_KEY_HEADER) {
        Some(api_key) => match api_key.to_str() {
            Ok(api_key) => api_key,
            Err(_) => {
                return Err(BizdeskError::UnidentifiableClient(
                    "Malformed api key header provided".to_string(),
                ))
            }
        },
        None => {
            return Err(BizdeskError::UnidentifiableClient(
                "Unable to find api key header".to_string(),
            ))
        }
    };

    ctx.repos
        .users
        .find_by_apikey(api_key)
        .await
        .ok_or_else(|| BizdeskError::Unauthorized("The provided api key was invalid".to_string()))
}
