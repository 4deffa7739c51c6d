use axum::{Router, routing::get};
use storage::Database;

use super::handlers::list_saved;

pub fn routes() -> Router<Database> {
    Router::new().route("/saved", get(list_saved))
}
