/// Stores the message into the log of the current thread.
/// Messages are collected only with the `for_testing` feature.
macro_rules! test_log {
    ($s:expr) => {
        #[cfg(feature = "for_testing")]
        {
            $crate::testing::log_message($s);
        }
    };
}
