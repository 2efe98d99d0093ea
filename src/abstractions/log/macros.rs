//! Macros for generating log messages. Each macro takes an optional verbosity threshold followed by `format!`
//! style arguments. The macros expand to `tracing` events through a re-export, so callers do not need their own
//! dependency on `tracing`.

/// Shared expansion of every level macro. Not part of the public API.
#[doc(hidden)]
#[macro_export]
macro_rules! __log_event {
    ($level:ident, $critical:expr, $threshold:expr, $fmt:literal $($arg:tt)*) => {
        {
            $crate::log::init_logger();
            $crate::log::__tracing::event!(
                $crate::log::__tracing::Level::$level,
                critical = $critical,
                threshold = $threshold,
                message = format_args!($fmt $($arg)*)
            );
        }
    };
}

#[macro_export]
macro_rules! critical {
    ($threshold:expr, $fmt:literal $($arg:tt)*) => { $crate::__log_event!(ERROR, true, $threshold, $fmt $($arg)*) };
    ($fmt:literal $($arg:tt)*) => { $crate::__log_event!(ERROR, true, 0, $fmt $($arg)*) };
}

#[macro_export]
macro_rules! error {
    ($threshold:expr, $fmt:literal $($arg:tt)*) => { $crate::__log_event!(ERROR, false, $threshold, $fmt $($arg)*) };
    ($fmt:literal $($arg:tt)*) => { $crate::__log_event!(ERROR, false, 0, $fmt $($arg)*) };
}

#[macro_export]
macro_rules! warning {
    ($threshold:expr, $fmt:literal $($arg:tt)*) => { $crate::__log_event!(WARN, false, $threshold, $fmt $($arg)*) };
    ($fmt:literal $($arg:tt)*) => { $crate::__log_event!(WARN, false, 0, $fmt $($arg)*) };
}

#[macro_export]
macro_rules! info {
    ($threshold:expr, $fmt:literal $($arg:tt)*) => { $crate::__log_event!(INFO, false, $threshold, $fmt $($arg)*) };
    ($fmt:literal $($arg:tt)*) => { $crate::__log_event!(INFO, false, 0, $fmt $($arg)*) };
}

#[macro_export]
macro_rules! debug {
    ($threshold:expr, $fmt:literal $($arg:tt)*) => { $crate::__log_event!(DEBUG, false, $threshold, $fmt $($arg)*) };
    ($fmt:literal $($arg:tt)*) => { $crate::__log_event!(DEBUG, false, 0, $fmt $($arg)*) };
}

#[macro_export]
macro_rules! trace {
    ($threshold:expr, $fmt:literal $($arg:tt)*) => { $crate::__log_event!(TRACE, false, $threshold, $fmt $($arg)*) };
    ($fmt:literal $($arg:tt)*) => { $crate::__log_event!(TRACE, false, 0, $fmt $($arg)*) };
}


// The following makes the macros importable directly from the `log` module.
pub use {critical, error, warning, info, debug, trace};
