use crate::interface_adapters::dashboard::{DashboardView, render_page};
use crate::interface_adapters::protocol::DashboardQuery;
use crate::interface_adapters::state::AppState;
use axum::{
    extract::{Query, State},
    response::Html,
};
use std::sync::Arc;

#[tracing::instrument(name = "dashboard", skip_all, fields(image_id = ?query.image_id))]
pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DashboardQuery>,
) -> Html<String> {
    let status = state.images.status.get().await;
    let view = DashboardView::resolve(query, &state.dashboard, status);
    Html(render_page(&view))
}

pub async fn healthz() -> &'static str {
    "ok"
}
