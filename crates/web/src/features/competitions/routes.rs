use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};
use storage::Database;

use super::handlers::{
    archive_competition, create_competition, delete_competition, get_competition,
    list_competitions, update_competition,
};
use crate::features::entries::handlers::enter_competition;
use crate::features::saved::handlers::save_competition;
use crate::middleware::auth::{ApiKeys, require_auth};

pub fn routes(api_keys: ApiKeys) -> Router<Database> {
    let protected = Router::new()
        .route("/", post(create_competition))
        .route("/:id", put(update_competition))
        .route("/:id", delete(delete_competition))
        .route("/:id/archive", put(archive_competition))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/", get(list_competitions))
        .route("/:id", get(get_competition))
        .route("/:id/entries", post(enter_competition))
        .route("/:id/saves", post(save_competition))
        .merge(protected)
}
