#![macro_use]

/// Time a block and report the elapsed duration at debug level.
#[macro_export]
macro_rules! profile {
    ($description:expr, $block:expr) => {{
        let start = std::time::Instant::now();
        let result = $block;
        let duration = start.elapsed();
        $crate::logging::debug!("[{}]: Time elapsed: {:?}", $description, duration);
        result
    }};
}
