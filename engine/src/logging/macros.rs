// Scope-filtered wrappers over tracing. The scope is recorded as a field so
// subscriber output can be grepped by subsystem.

#[macro_export]
macro_rules! scoped_log {
    ($level:ident, $scope:expr, $($arg:tt)*) => {
        let log_config = $crate::logging::get_log_config();
        if log_config.should_log($scope, $crate::logging::Level::$level) {
            $crate::__scoped_event!($level, $scope, $($arg)*);
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __scoped_event {
    (ERROR, $scope:expr, $($arg:tt)*) => { $crate::logging::error!(scope = $scope, $($arg)*) };
    (WARN, $scope:expr, $($arg:tt)*) => { $crate::logging::warn!(scope = $scope, $($arg)*) };
    (INFO, $scope:expr, $($arg:tt)*) => { $crate::logging::info!(scope = $scope, $($arg)*) };
    (DEBUG, $scope:expr, $($arg:tt)*) => { $crate::logging::debug!(scope = $scope, $($arg)*) };
    (TRACE, $scope:expr, $($arg:tt)*) => { $crate::logging::trace!(scope = $scope, $($arg)*) };
}

#[macro_export]
macro_rules! render_log {
    ($level:ident, $($arg:tt)*) => {
        $crate::scoped_log!($level, "render", $($arg)*);
    };
}

#[macro_export]
macro_rules! video_log {
    ($level:ident, $($arg:tt)*) => {
        $crate::scoped_log!($level, "video", $($arg)*);
    };
}

#[macro_export]
macro_rules! locomotion_log {
    ($level:ident, $($arg:tt)*) => {
        $crate::scoped_log!($level, "locomotion", $($arg)*);
    };
}

#[macro_export]
macro_rules! config_log {
    ($level:ident, $($arg:tt)*) => {
        $crate::scoped_log!($level, "config", $($arg)*);
    };
}
