pub mod debug_logger;
pub mod proxy;

pub use debug_logger::{get_debug_logger, EnhancedDebugLogger};
pub use proxy::{select_proxy, ProxyAddress, ProxySelector};
