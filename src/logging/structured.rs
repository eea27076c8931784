//! Structured log lines for verification runs.
//!
//! Every line reads `<context> <EVENT> key=value ...`, where the context
//! narrows from the run to one package to one signature check.

use std::fmt;

/// Where in a run a log line was emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogContext {
    pub run_id: String,
    pub package: Option<String>,
    /// Object under check: `HEAD` or a tag name.
    pub check: Option<String>,
}

impl LogContext {
    pub fn new(run_id: &str) -> Self {
        Self {
            run_id: run_id.to_string(),
            package: None,
            check: None,
        }
    }

    /// Scope to one package. Any check scope is dropped.
    pub fn with_package(&self, package: &str) -> Self {
        Self {
            run_id: self.run_id.clone(),
            package: Some(package.to_string()),
            check: None,
        }
    }

    pub fn with_check(&self, subject: &str) -> Self {
        Self {
            check: Some(subject.to_string()),
            ..self.clone()
        }
    }
}

impl fmt::Display for LogContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[run={}]", self.run_id)?;
        if let Some(package) = &self.package {
            write!(f, " [package={}]", package)?;
        }
        if let Some(check) = &self.check {
            write!(f, " [check={}]", check)?;
        }
        Ok(())
    }
}

/// `key=value ` pairs, values in `Debug` form.
#[doc(hidden)]
#[macro_export]
macro_rules! __event_fields {
    ($($key:ident = $value:expr),* $(,)?) => {
        format_args!(concat!($(stringify!($key), "={:?} "),*), $($value),*)
    };
}

/// Log one event at the given level.
#[macro_export]
macro_rules! log_event {
    ($level:expr, $ctx:expr, $event:expr, $($fields:tt)*) => {
        log::log!(
            $level,
            "{} {} {}",
            $ctx,
            $event,
            $crate::__event_fields!($($fields)*)
        )
    };
}

#[macro_export]
macro_rules! log_info {
    ($ctx:expr, $event:expr, $($fields:tt)*) => {
        $crate::log_event!(log::Level::Info, $ctx, $event, $($fields)*)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($ctx:expr, $event:expr, $($fields:tt)*) => {
        $crate::log_event!(log::Level::Warn, $ctx, $event, $($fields)*)
    };
}

#[macro_export]
macro_rules! log_debug {
    ($ctx:expr, $event:expr, $($fields:tt)*) => {
        $crate::log_event!(log::Level::Debug, $ctx, $event, $($fields)*)
    };
}
