//! 浏览器控制台日志工具。非 wasm32 目标下为空操作，便于本地测试。

#[cfg(target_arch = "wasm32")]
pub fn console_log(message: &str) {
    web_sys::console::log_1(&message.into());
}

#[cfg(not(target_arch = "wasm32"))]
pub fn console_log(_message: &str) {}

#[cfg(target_arch = "wasm32")]
pub fn console_warn(message: &str) {
    web_sys::console::warn_1(&message.into());
}

#[cfg(not(target_arch = "wasm32"))]
pub fn console_warn(_message: &str) {}

macro_rules! log {
    ($($arg:tt)*) => {
        $crate::utils::console_log(&format!($($arg)*))
    };
}

macro_rules! log_warn {
    ($($arg:tt)*) => {
        $crate::utils::console_warn(&format!($($arg)*))
    };
}

pub(crate) use log;
pub(crate) use log_warn;
