//! Interface listing source trait, error type and discovery entry point.

use thiserror::Error;

use super::{InterfaceAddress, parse_listing};

/// Error type for interface discovery.
///
/// Any of these means the listing could not be obtained at all, which is
/// reported differently from a listing that simply has no addresses.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The listing command could not be started or waited on.
    #[error("Failed to run '{program}': {source}")]
    Spawn {
        /// The program that was invoked.
        program: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The listing output was not valid UTF-8.
    #[error("Listing output is not valid UTF-8: {0}")]
    Decode(#[from] std::string::FromUtf8Error),

    /// The background task running the listing panicked or was cancelled.
    #[error("Discovery task failed: {message}")]
    Task {
        /// Description of the task failure.
        message: String,
    },
}

/// Trait for obtaining the raw interface listing text.
///
/// # Design
///
/// - Production uses [`super::CommandSource`], which runs `ifconfig`
/// - Tests inject canned listings or failures
/// - This is a blocking call; callers run it off the coordinating task
pub trait InterfaceSource: Send + Sync {
    /// Returns the full listing text.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError`] if the listing cannot be produced or decoded.
    fn read_listing(&self) -> Result<String, DiscoveryError>;
}

impl<T: InterfaceSource + ?Sized> InterfaceSource for std::sync::Arc<T> {
    fn read_listing(&self) -> Result<String, DiscoveryError> {
        (**self).read_listing()
    }
}

/// Reads the listing from `source` and parses it.
///
/// An `Ok` with an empty vector means the host has no usable addresses.
///
/// # Errors
///
/// Propagates the source's [`DiscoveryError`] unchanged.
pub fn discover<S: InterfaceSource + ?Sized>(
    source: &S,
) -> Result<Vec<InterfaceAddress>, DiscoveryError> {
    let listing = source.read_listing()?;
    let records = parse_listing(&listing);

    tracing::debug!(
        "Parsed {} address(es) from {} listing line(s)",
        records.len(),
        listing.lines().count()
    );

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    /// A mock source returning predefined listings in order.
    struct MockSource {
        results: Mutex<VecDeque<Result<String, DiscoveryError>>>,
    }

    impl MockSource {
        fn new(results: Vec<Result<String, DiscoveryError>>) -> Self {
            Self {
                results: Mutex::new(results.into()),
            }
        }
    }

    impl InterfaceSource for MockSource {
        fn read_listing(&self) -> Result<String, DiscoveryError> {
            self.results
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(String::new()))
        }
    }

    fn spawn_error() -> DiscoveryError {
        DiscoveryError::Spawn {
            program: "/sbin/ifconfig".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        }
    }

    #[test]
    fn discover_parses_listing() {
        let source = MockSource::new(vec![Ok(
            "en0: flags=0\n\tinet 192.168.1.50 netmask 0xffffff00\n".to_string()
        )]);

        let records = discover(&source).unwrap();

        assert_eq!(records, vec![InterfaceAddress::v4("en0", "192.168.1.50")]);
    }

    #[test]
    fn discover_distinguishes_empty_from_failure() {
        let source = MockSource::new(vec![Ok("lo0: flags=0\n".to_string()), Err(spawn_error())]);

        assert!(discover(&source).unwrap().is_empty());
        assert!(discover(&source).is_err());
    }

    #[test]
    fn discover_works_through_arc() {
        let source = Arc::new(MockSource::new(vec![Ok(
            "en0: flags=0\n\tinet 10.0.0.5 netmask 0xff\n".to_string(),
        )]));

        assert_eq!(discover(&source).unwrap().len(), 1);
    }

    #[test]
    fn spawn_error_displays_program() {
        let message = spawn_error().to_string();
        assert!(message.contains("/sbin/ifconfig"));
        assert!(message.contains("no such file"));
    }

    #[test]
    fn decode_error_converts_from_utf8_error() {
        let utf8_error = String::from_utf8(vec![0xff, 0xfe]).unwrap_err();
        let error: DiscoveryError = utf8_error.into();

        assert!(matches!(error, DiscoveryError::Decode(_)));
        assert!(error.to_string().contains("UTF-8"));
    }

    #[test]
    fn task_error_displays_message() {
        let error = DiscoveryError::Task {
            message: "panicked".to_string(),
        };
        assert_eq!(error.to_string(), "Discovery task failed: panicked");
    }
}
