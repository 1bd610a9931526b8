pub mod flag;
pub mod headers;
pub mod ip;

pub use flag::get_flag;
pub use headers::{ProxyHeader, ProxyHeaders};
pub use ip::{UNKNOWN_IP, extract_client_ip, is_private_or_local, resolve_client_ip};
