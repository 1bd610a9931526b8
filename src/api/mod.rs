//! HTTP 层：请求处理与中间件

pub mod middleware;
pub mod services;
