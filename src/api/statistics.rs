use axum::{Json, extract::State};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::infrastructure::AppState;
use crate::services::StatisticsState;

pub async fn get_state(State(state): State<AppState>) -> Json<StatisticsState> {
    Json(state.statistics.snapshot().await)
}

#[derive(Debug, Deserialize)]
pub struct SelectDayBody {
    pub day: NaiveDate,
}

pub async fn select_day(
    State(state): State<AppState>,
    Json(body): Json<SelectDayBody>,
) -> Json<StatisticsState> {
    state.statistics.select_day(body.day).await;
    Json(state.statistics.snapshot().await)
}

pub async fn refresh(State(state): State<AppState>) -> Json<StatisticsState> {
    state.statistics.refresh().await;
    Json(state.statistics.snapshot().await)
}
