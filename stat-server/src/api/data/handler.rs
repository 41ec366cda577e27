//! Chart Data Handler

use axum::{Json, extract::State};

use crate::chart::build_chart_data;
use crate::core::ServerState;
use crate::db::repository::stat;
use shared::chart::ChartData;
use shared::error::AppResult;

/// GET /stat/api/data/
///
/// `{"stats_dict": {"<stat_title_id>": {"default": [..], "labels": [..]}}}`
pub async fn chart_data(State(state): State<ServerState>) -> AppResult<Json<ChartData>> {
    let stats = stat::find_all_chronological(&state.pool).await?;
    Ok(Json(build_chart_data(&stats)))
}
