use axum::{
    Router,
    routing::{delete, get},
};

use crate::modules::users::controller::{
    add_user, delete_user, get_roles, get_user, get_users_role, update_user,
};
use crate::state::AppState;

pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/roles", get(get_roles))
        .route("/user", get(get_user).post(add_user).put(update_user))
        .route("/user/{user}", delete(delete_user))
        .route("/usersrole", get(get_users_role))
}
