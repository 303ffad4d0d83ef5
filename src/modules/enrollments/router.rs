use crate::modules::enrollments::controller::{
    create_enrollment, delete_enrollment, get_enrollment, list_enrollments, self_enroll,
    update_enrollment,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn init_enrollments_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_enrollments).post(create_enrollment))
        .route("/enroll", post(self_enroll))
        .route(
            "/{id}",
            get(get_enrollment)
                .put(update_enrollment)
                .delete(delete_enrollment),
        )
}
