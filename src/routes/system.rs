use actix_web::{HttpResponse, Result as ActixResult, web};
use serde::Serialize;

use crate::client::ApiClient;
use crate::config::SourceMode;
use crate::models::ApiResponse;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthInfo {
    pub mode: SourceMode,
    pub source: &'static str,
    pub version: &'static str,
}

pub async fn health(client: web::Data<ApiClient>) -> ActixResult<HttpResponse> {
    let info = HealthInfo {
        mode: client.mode(),
        source: client.source_name(),
        version: env!("CARGO_PKG_VERSION"),
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(info, "Service is running")))
}

// 配置路由
pub fn configure_system_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health));
}
