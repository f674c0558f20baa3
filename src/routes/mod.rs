pub mod proxy;

pub mod system;

use actix_web::web;

pub use system::configure_system_routes;

/// 在 `prefix` 下挂载数据源转发路由
pub fn api_routes(prefix: &str) -> impl FnOnce(&mut web::ServiceConfig) + '_ {
    move |cfg| {
        cfg.service(web::scope(prefix).route("/{tail:.*}", web::to(proxy::proxy)));
    }
}
