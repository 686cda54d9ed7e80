use crate::modules::students::controller::{
    create_student_profile, delete_student_profile, get_student_by_id, get_student_profile,
    get_students, test_create_student, update_student_profile,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn init_students_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_students))
        .route("/profile", post(create_student_profile))
        .route(
            "/profile/{student_id}",
            get(get_student_profile)
                .put(update_student_profile)
                .delete(delete_student_profile),
        )
        .route("/id/{id}", get(get_student_by_id))
        .route("/test-create", post(test_create_student))
}
