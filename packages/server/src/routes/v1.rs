use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers;
use crate::state::AppState;

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::picture::todays_picture))
        .routes(routes!(handlers::picture::list_stored))
        .routes(routes!(handlers::picture::serve_file))
}
