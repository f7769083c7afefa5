use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::config::AppConfig;
use crate::handlers;
use crate::state::AppState;

pub fn routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/organization/{org_id}/workspace", workspace_routes())
        .nest(
            "/workspace/{workspace_id}/source",
            source_routes(config.server.upload_body_limit),
        )
}

fn workspace_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::workspace::create_workspace))
        .routes(routes!(
            handlers::workspace::get_workspace,
            handlers::workspace::delete_workspace
        ))
}

fn source_routes(upload_limit: usize) -> OpenApiRouter<AppState> {
    let crud = OpenApiRouter::new()
        .routes(routes!(handlers::source::create_source))
        .routes(routes!(
            handlers::source::get_source,
            handlers::source::update_source
        ));

    let upload = OpenApiRouter::new()
        .routes(routes!(handlers::upload::upload_file))
        .layer(handlers::upload::upload_body_limit(upload_limit));

    crud.merge(upload)
}
