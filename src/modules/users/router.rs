use crate::modules::users::controller::{
    delete_user, delete_user_by_id, get_user, get_user_by_id, get_users, update_user,
    update_user_by_id,
};
use crate::state::AppState;
use axum::{Router, routing::get};

pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_users))
        .route(
            "/id/{id}",
            get(get_user_by_id)
                .put(update_user_by_id)
                .delete(delete_user_by_id),
        )
        .route(
            "/{user_id}",
            get(get_user).put(update_user).delete(delete_user),
        )
}
