use axum::{routing::post, Json, Router};
use rust_decimal::Decimal;
use serde::Deserialize;

use borsatrack_accounting::{
    ClosedTradePerformance, CostBasisCalculator, CostBasisReport, FifoMatcher, GrowthProjection,
    GrowthProjector, PortfolioSnapshotPoint, ProjectionInput, Trade, TradeGrouper, Transaction,
    TwrCalculator, TwrReturnPoint,
};

use crate::error::ApiResult;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CostBasisRequest {
    transactions: Vec<Transaction>,
    current_price: Decimal,
}

async fn cost_basis(Json(body): Json<CostBasisRequest>) -> ApiResult<Json<CostBasisReport>> {
    let report =
        CostBasisCalculator::new().calculate(body.transactions, body.current_price)?;
    Ok(Json(report))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransactionsRequest {
    transactions: Vec<Transaction>,
}

async fn fifo_performance(
    Json(body): Json<TransactionsRequest>,
) -> ApiResult<Json<Vec<ClosedTradePerformance>>> {
    let results = FifoMatcher::new().closed_trade_performance(body.transactions)?;
    Ok(Json(results))
}

async fn trades(Json(body): Json<TransactionsRequest>) -> ApiResult<Json<Vec<Trade>>> {
    let trades = TradeGrouper::new().group_into_trades(body.transactions)?;
    Ok(Json(trades))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TwrRequest {
    series: Vec<PortfolioSnapshotPoint>,
}

async fn twr(Json(body): Json<TwrRequest>) -> Json<Vec<TwrReturnPoint>> {
    Json(TwrCalculator::new().annotate(body.series))
}

async fn project(Json(body): Json<ProjectionInput>) -> ApiResult<Json<GrowthProjection>> {
    let projection = GrowthProjector::new().project(&body)?;
    Ok(Json(projection))
}

pub fn router() -> Router {
    Router::new()
        .route("/accounting/cost-basis", post(cost_basis))
        .route("/accounting/fifo-performance", post(fifo_performance))
        .route("/accounting/trades", post(trades))
        .route("/accounting/twr", post(twr))
        .route("/accounting/project", post(project))
}
