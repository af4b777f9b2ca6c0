use crate::handler::bag::{register_bag, show_bag};
use crate::handler::establishment::{
    register_establishment, show_establishment, show_establishment_bags,
    show_establishment_list,
};
use crate::handler::reservation::{release_bag, reserve_bags, show_reservation};
use crate::handler::user::{register_user, show_user};
use axum::{
    routing::{get, post},
    Router,
};
use registry::AppRegistry;

pub fn routes() -> Router<AppRegistry> {
    let establishment_routers = Router::new()
        .route("/", post(register_establishment).get(show_establishment_list))
        .route("/:establishment_id", get(show_establishment))
        .route("/:establishment_id/bags", get(show_establishment_bags));

    let bag_routers = Router::new()
        .route("/", post(register_bag))
        .route("/:bag_id", get(show_bag))
        .route("/:bag_id/release", post(release_bag));

    let user_routers = Router::new()
        .route("/", post(register_user))
        .route("/:user_id", get(show_user));

    let reservation_routers = Router::new()
        .route("/", post(reserve_bags))
        .route("/:reservation_id", get(show_reservation));

    Router::new()
        .nest("/establishments", establishment_routers)
        .nest("/bags", bag_routers)
        .nest("/users", user_routers)
        .nest("/reservations", reservation_routers)
}
