mod health;
mod redirect;

pub use health::{health_handler, HealthResponse};
pub use redirect::redirect_handler;
