pub mod handler_likes;
pub mod handler_meals;
pub mod healthcheck;
pub mod read_only;
