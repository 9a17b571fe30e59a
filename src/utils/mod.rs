//! The `utils` module provides the pieces shared by every other module:
//! the error types and the logging bootstrap.

pub mod error;
pub mod logging;

pub use error::StoreError;

#[cfg(test)]
mod tests {
    use super::StoreError;
    use super::logging;

    #[test]
    fn logging_init_accepts_levels() {
        // Should not panic
        logging::init("info");
        logging::init("debug");
        logging::init("warn");
    }

    #[test]
    fn topic_not_found_names_the_topic() {
        let err = StoreError::TopicNotFound("missing_topic".to_string());
        assert_eq!(err.to_string(), "topic does not exist: missing_topic");
    }
}
