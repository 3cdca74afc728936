//! Logging abstraction layer.
//!
//! The reconciler never talks to a logging backend directly. Every log line
//! goes through one of the macros below, which forward to either the
//! [`log`](https://docs.rs/log) or the [`tracing`](https://docs.rs/tracing)
//! crate depending on the enabled feature. Enable at most one of them.
//!
//! | Feature    | Backend         | Default |
//! |------------|-----------------|---------|
//! | `log`      | `log` crate     | yes     |
//! | `tracing`  | `tracing` crate | no      |
//!
//! With neither feature enabled the macros expand to nothing.
//!
//! # Levels used by the router
//!
//! | Macro        | Used for                                                  |
//! |--------------|-----------------------------------------------------------|
//! | `trace_log!` | completion signals, no-op transitions                     |
//! | `debug_log!` | each routing operation as it is dispatched to a handler   |
//! | `info_log!`  | transition start/finish, worker lifecycle                 |
//! | `warn_log!`  | stuck navigation (completion timeout or dropped token)    |
//! | `error_log!` | handler panics and chain inconsistencies                  |
//!
//! ```ignore
//! use route_reconciler::{debug_log, warn_log};
//!
//! debug_log!("Dispatching {} to handler {}", op, index);
//! warn_log!("Handler '{}' never completed", name);
//! ```

/// Forward a log call at `$level` to whichever backend is enabled.
///
/// Implementation detail of the level macros; not part of the public API.
#[doc(hidden)]
#[macro_export]
macro_rules! __dispatch_log {
    ($level:ident, $($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::$level!($($arg)*);
        #[cfg(feature = "log")]
        ::log::$level!($($arg)*);
    };
}

/// Emit a **trace**-level log message. Accepts `format!`-style arguments.
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        $crate::__dispatch_log!(trace, $($arg)*)
    };
}

/// Emit a **debug**-level log message. Accepts `format!`-style arguments.
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        $crate::__dispatch_log!(debug, $($arg)*)
    };
}

/// Emit an **info**-level log message. Accepts `format!`-style arguments.
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        $crate::__dispatch_log!(info, $($arg)*)
    };
}

/// Emit a **warn**-level log message. Accepts `format!`-style arguments.
#[macro_export]
macro_rules! warn_log {
    ($($arg:tt)*) => {
        $crate::__dispatch_log!(warn, $($arg)*)
    };
}

/// Emit an **error**-level log message. Accepts `format!`-style arguments.
#[macro_export]
macro_rules! error_log {
    ($($arg:tt)*) => {
        $crate::__dispatch_log!(error, $($arg)*)
    };
}
