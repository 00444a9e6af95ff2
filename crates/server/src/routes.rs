use std::any::Any;

use axum::{
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use models::{Car, Motorcycle, Resource};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::{error, Level};

use common::types::Health;

use crate::controller::{self, Controller};
use crate::errors::ApiError;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Mount the five handlers of `controller` under its path:
/// `GET|POST path` and `GET|PUT|DELETE path/:id`.
pub fn register<T: Resource>(router: Router, controller: Controller<T>) -> Router {
    let path = controller.path().trim_end_matches('/').to_string();
    let routes = Router::new()
        .route(&path, get(controller::read::<T>).post(controller::create::<T>))
        .route(
            &format!("{path}/:id"),
            get(controller::read_one::<T>)
                .put(controller::update::<T>)
                .delete(controller::delete::<T>),
        )
        .with_state(controller);
    router.merge(routes)
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    error!(panic = %detail, "handler panicked");
    ApiError::Internal.into_response()
}

/// Build the application router: health check plus both vehicle collections
pub fn build_router(cars: Controller<Car>, motorcycles: Controller<Motorcycle>, cors: CorsLayer) -> Router {
    let router = Router::new().route("/health", get(health));
    let router = register(router, cars);
    let router = register(router, motorcycles);

    router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // 响应返回时打点，包含状态码与耗时
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 失败（5xx 等）时以 ERROR 记录
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
