use axum::Json;

use crate::api::v1::dto::users::ProfileResponse;
use crate::api::v1::extractors::AuthCtxExtractor;

pub async fn profile(AuthCtxExtractor(ctx): AuthCtxExtractor) -> Json<ProfileResponse> {
    Json(ProfileResponse { email: ctx.email })
}
