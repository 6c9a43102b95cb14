//! Status-line macros.
//!
//! All operator-facing status lines go through these so the CLI formatter can pick a
//! symbol for each one. `success!` is routed to its own tracing target.

/// Tracing target used for lines that report a successful step.
pub const SUCCESS_TARGET: &str = "sweepr::success";

#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::tracing::info!(target: $crate::macros::SUCCESS_TARGET, $($arg)*)
    };
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::tracing::info!($($arg)*)
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::tracing::warn!($($arg)*)
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::tracing::error!($($arg)*)
    };
}
