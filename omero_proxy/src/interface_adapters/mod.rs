// Interface adapters: upstream HTTP clients, axum handlers and the HTML dashboard.

pub mod clients;
pub mod dashboard;
pub mod handlers;
pub mod protocol;
pub mod routes;
pub mod state;
