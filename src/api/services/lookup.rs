use actix_web::http::StatusCode;
use actix_web::http::header::HeaderValue;
use actix_web::{HttpRequest, HttpResponse, HttpResponseBuilder, web};
use tracing::{debug, error, info};

use crate::config::StaticConfig;
use crate::payload::{DEFAULT_CALLBACK, OutputFormat, ResponsePayload};
use crate::services::GeoMergeResolver;
use crate::utils::{ProxyHeader, ProxyHeaders, extract_client_ip};

/// 固定的站点图标，不经过解析与序列化流程
const FAVICON_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100"><text y=".9em" font-size="90">🌐</text></svg>"#;

/// 查询参数
///
/// - `format` / `fmt`: 输出格式
/// - `callback` / `cb`: JSONP 回调名
/// - `ip`: 查询指定 IP 而非调用方自己的 IP
///
/// 同名参数重复出现时取第一个。
#[derive(Debug, Default)]
pub struct LookupQuery {
    pub format: Option<String>,
    pub fmt: Option<String>,
    pub callback: Option<String>,
    pub cb: Option<String>,
    pub ip: Option<String>,
}

impl LookupQuery {
    /// 解析失败时按未提供参数处理
    pub fn parse(query_string: &str) -> Self {
        let pairs = match web::Query::<Vec<(String, String)>>::from_query(query_string) {
            Ok(pairs) => pairs.into_inner(),
            Err(e) => {
                debug!("Ignoring unparsable query string: {}", e);
                return Self::default();
            }
        };

        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "format" => &mut query.format,
                "fmt" => &mut query.fmt,
                "callback" => &mut query.callback,
                "cb" => &mut query.cb,
                "ip" => &mut query.ip,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        query
    }

    /// 第一个非空的回调名，`callback` 优先于 `cb`
    pub fn callback(&self) -> Option<&str> {
        [self.callback.as_deref(), self.cb.as_deref()]
            .into_iter()
            .flatten()
            .find(|cb| !cb.is_empty())
    }
}

/// 响应相关设置，启动时从配置生成
#[derive(Clone, Debug)]
pub struct ResponseSettings {
    pub powered_by: String,
    pub unknown_ip: String,
    pub log_requests: bool,
}

impl From<&StaticConfig> for ResponseSettings {
    fn from(config: &StaticConfig) -> Self {
        Self {
            powered_by: config.response.powered_by.clone(),
            unknown_ip: config.response.unknown_ip.clone(),
            log_requests: config.logging.log_requests,
        }
    }
}

impl Default for ResponseSettings {
    fn default() -> Self {
        Self::from(&StaticConfig::default())
    }
}

pub struct LookupService;

impl LookupService {
    pub async fn handle(
        req: HttpRequest,
        resolver: web::Data<GeoMergeResolver>,
        settings: web::Data<ResponseSettings>,
    ) -> HttpResponse {
        if req.path().contains("/favicon.ico") {
            return Self::favicon_response(&settings);
        }

        let query = LookupQuery::parse(req.query_string());

        let client_ip = extract_client_ip(&req, &settings.unknown_ip);

        if settings.log_requests {
            let host = ProxyHeaders::new(req.headers())
                .get(ProxyHeader::Host)
                .unwrap_or("-");
            info!("{} request from {} (host: {})", req.method(), client_ip, host);
        }

        let target = query
            .ip
            .as_deref()
            .map(str::trim)
            .filter(|ip| !ip.is_empty());
        let is_searching = target.is_some_and(|ip| ip != client_ip);
        let wants_geo = target.is_some() || !matches!(req.path(), "/" | "/ip");
        let payload_ip = target.unwrap_or(&client_ip);

        let geo = if wants_geo {
            resolver
                .resolve(payload_ip, is_searching, req.headers())
                .await
        } else {
            None
        };
        let payload = ResponsePayload::with_geo(payload_ip, geo);

        let format = OutputFormat::select(query.format.as_deref(), query.fmt.as_deref(), req.path());
        let callback = query.callback().unwrap_or(DEFAULT_CALLBACK);

        match format.render(&payload, callback) {
            Ok(body) => Self::response_builder(StatusCode::OK, &settings, Some(&client_ip))
                .insert_header(("Content-Type", format.content_type()))
                .body(body),
            Err(e) => {
                error!("Failed to render {} response: {}", format.as_str(), e);
                Self::response_builder(StatusCode::INTERNAL_SERVER_ERROR, &settings, None)
                    .insert_header(("Content-Type", "text/plain"))
                    .body("Internal Server Error\n")
            }
        }
    }

    #[inline]
    fn favicon_response(settings: &ResponseSettings) -> HttpResponse {
        Self::response_builder(StatusCode::OK, settings, None)
            .insert_header(("Content-Type", "image/svg+xml"))
            .insert_header(("Cache-Control", "public, max-age=86400"))
            .body(FAVICON_SVG)
    }

    /// 所有响应共用的响应头
    fn response_builder(
        status: StatusCode,
        settings: &ResponseSettings,
        client_ip: Option<&str>,
    ) -> HttpResponseBuilder {
        let mut builder = HttpResponse::build(status);
        builder
            .insert_header(("Connection", "keep-alive"))
            .insert_header(("Keep-Alive", "timeout=30, max=1000"))
            .insert_header(("Access-Control-Allow-Origin", "*"));

        if let Ok(value) = HeaderValue::from_str(&settings.powered_by) {
            builder.insert_header(("X-Powered-By", value));
        }
        // 客户端 IP 来自请求头时可能含有非法字符，无法写入响应头就跳过
        if let Some(ip) = client_ip
            && let Ok(value) = HeaderValue::from_str(ip)
        {
            builder.insert_header(("X-Client-IP", value));
        }
        builder
    }
}

/// Lookup 路由配置
pub fn lookup_routes() -> actix_web::Scope {
    web::scope("").route("/{path:.*}", web::route().to(LookupService::handle))
}
