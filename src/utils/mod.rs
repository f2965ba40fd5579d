// Mon Aug 17 2026 - Alex

pub mod logging;
pub mod strings;
pub mod time;

pub use logging::{scoped_timer, LoggingUtils, ScopedTimer};
pub use strings::StringUtils;
pub use time::TimeUtils;
