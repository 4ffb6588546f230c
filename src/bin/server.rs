use axum::{
    Json, Router,
    http::StatusCode,
    routing::{get, post},
};
use cutstock::{optimize_1d, optimize_2d, Options1D, Options2D, PieceInput1D, PieceInput2D, Result1D, Result2D, StockInput1D, StockInput2D};
use serde::Deserialize;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

#[derive(Deserialize)]
struct Optimize1DRequest {
    pieces: Vec<PieceInput1D>,
    stock: Vec<StockInput1D>,
    options: Options1D,
}

#[derive(Deserialize)]
struct Optimize2DRequest {
    pieces: Vec<PieceInput2D>,
    stock: Vec<StockInput2D>,
    options: Options2D,
}

async fn optimize_1d_handler(
    Json(req): Json<Optimize1DRequest>,
) -> Result<Json<Result1D>, (StatusCode, String)> {
    tracing::info!(pieces = req.pieces.len(), stock = req.stock.len(), "POST /optimize/1d");
    optimize_1d(&req.pieces, &req.stock, &req.options)
        .map(Json)
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))
}

async fn optimize_2d_handler(
    Json(req): Json<Optimize2DRequest>,
) -> Result<Json<Result2D>, (StatusCode, String)> {
    tracing::info!(pieces = req.pieces.len(), stock = req.stock.len(), "POST /optimize/2d");
    optimize_2d(&req.pieces, &req.stock, &req.options)
        .map(Json)
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))
}

#[tokio::main]
async fn main() {
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open("development.log")
        .expect("failed to open development.log");

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_max_level(Level::INFO)
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3001".to_string());
    let addr = format!("0.0.0.0:{port}");

    let app = Router::new()
        .route("/up", get(|| async { "ok" }))
        .route("/optimize/1d", post(optimize_1d_handler))
        .route("/optimize/2d", post(optimize_2d_handler))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        );

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    eprintln!("Listening on {addr}");
    axum::serve(listener, app).await.unwrap();
}
