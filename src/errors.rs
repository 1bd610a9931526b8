use std::fmt;

#[derive(Debug, Clone)]
pub enum IpEchoError {
    Config(String),
    GeoDatabaseOpen(String),
    FileOperation(String),
    Serialization(String),
    ServerBind(String),
}

impl IpEchoError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            IpEchoError::Config(_) => "E001",
            IpEchoError::GeoDatabaseOpen(_) => "E002",
            IpEchoError::FileOperation(_) => "E003",
            IpEchoError::Serialization(_) => "E004",
            IpEchoError::ServerBind(_) => "E005",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            IpEchoError::Config(_) => "Configuration Error",
            IpEchoError::GeoDatabaseOpen(_) => "GeoIP Database Open Error",
            IpEchoError::FileOperation(_) => "File Operation Error",
            IpEchoError::Serialization(_) => "Serialization Error",
            IpEchoError::ServerBind(_) => "Server Bind Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            IpEchoError::Config(msg) => msg,
            IpEchoError::GeoDatabaseOpen(msg) => msg,
            IpEchoError::FileOperation(msg) => msg,
            IpEchoError::Serialization(msg) => msg,
            IpEchoError::ServerBind(msg) => msg,
        }
    }

    /// 格式化为彩色输出（用于 Server 模式）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出（用于 CLI 模式）
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for IpEchoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 默认使用简洁格式
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for IpEchoError {}

// 便捷的构造函数
impl IpEchoError {
    pub fn config<T: Into<String>>(msg: T) -> Self {
        IpEchoError::Config(msg.into())
    }

    pub fn geo_database_open<T: Into<String>>(msg: T) -> Self {
        IpEchoError::GeoDatabaseOpen(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        IpEchoError::FileOperation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        IpEchoError::Serialization(msg.into())
    }

    pub fn server_bind<T: Into<String>>(msg: T) -> Self {
        IpEchoError::ServerBind(msg.into())
    }
}

// 为常见的错误类型实现 From trait
impl From<std::io::Error> for IpEchoError {
    fn from(err: std::io::Error) -> Self {
        IpEchoError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for IpEchoError {
    fn from(err: serde_json::Error) -> Self {
        IpEchoError::Serialization(err.to_string())
    }
}

impl From<toml::ser::Error> for IpEchoError {
    fn from(err: toml::ser::Error) -> Self {
        IpEchoError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for IpEchoError {
    fn from(err: config::ConfigError) -> Self {
        IpEchoError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, IpEchoError>;
