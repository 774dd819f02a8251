//! Tests for the public address resolver.

use super::*;
use std::collections::HashMap;
use std::sync::Mutex;

/// Mock lookup returning a fixed result per family.
struct MockLookup {
    results: Mutex<HashMap<AddressFamily, Result<String, LookupError>>>,
}

impl MockLookup {
    fn new() -> Self {
        Self {
            results: Mutex::new(HashMap::new()),
        }
    }

    fn returning(self, family: AddressFamily, output: &str) -> Self {
        self.results
            .lock()
            .unwrap()
            .insert(family, Ok(output.to_string()));
        self
    }

    fn failing(self, family: AddressFamily, error: LookupError) -> Self {
        self.results.lock().unwrap().insert(family, Err(error));
        self
    }
}

impl AddressLookup for MockLookup {
    async fn lookup(&self, family: AddressFamily) -> Result<String, LookupError> {
        self.results
            .lock()
            .unwrap()
            .remove(&family)
            .unwrap_or_else(|| Ok(String::new()))
    }
}

/// Lookup that never answers within any reasonable time.
struct HangingLookup;

impl AddressLookup for HangingLookup {
    async fn lookup(&self, _family: AddressFamily) -> Result<String, LookupError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok("203.0.113.5".to_string())
    }
}

/// Lookup that answers after a fixed delay.
struct SlowLookup(Duration);

impl AddressLookup for SlowLookup {
    async fn lookup(&self, _family: AddressFamily) -> Result<String, LookupError> {
        tokio::time::sleep(self.0).await;
        Ok("203.0.113.5".to_string())
    }
}

mod resolve {
    use super::*;

    #[tokio::test]
    async fn trailing_newline_is_trimmed() {
        let resolver =
            PublicIpResolver::new(MockLookup::new().returning(AddressFamily::V4, "203.0.113.5\n"));

        let result = resolver.resolve(AddressFamily::V4).await;

        assert_eq!(result, PublicAddressResult::found(AddressFamily::V4, "203.0.113.5"));
    }

    #[tokio::test]
    async fn ipv6_output_is_accepted() {
        let resolver =
            PublicIpResolver::new(MockLookup::new().returning(AddressFamily::V6, " 2001:db8::1 \r\n"));

        let result = resolver.resolve(AddressFamily::V6).await;

        assert_eq!(result.value.as_deref(), Some("2001:db8::1"));
    }

    #[tokio::test]
    async fn empty_output_is_unavailable() {
        let resolver = PublicIpResolver::new(MockLookup::new().returning(AddressFamily::V4, ""));

        let result = resolver.resolve(AddressFamily::V4).await;

        assert_eq!(result, PublicAddressResult::unavailable(AddressFamily::V4));
    }

    #[tokio::test]
    async fn html_error_page_is_unavailable() {
        let resolver = PublicIpResolver::new(
            MockLookup::new().returning(AddressFamily::V6, "<html><body>502 Bad Gateway</body></html>"),
        );

        assert!(!resolver.resolve(AddressFamily::V6).await.is_available());
    }

    #[tokio::test]
    async fn wrong_family_is_unavailable() {
        let resolver =
            PublicIpResolver::new(MockLookup::new().returning(AddressFamily::V4, "2001:db8::1"));

        assert!(!resolver.resolve(AddressFamily::V4).await.is_available());
    }

    #[tokio::test]
    async fn backend_error_is_unavailable() {
        let resolver = PublicIpResolver::new(MockLookup::new().failing(
            AddressFamily::V4,
            LookupError::Spawn {
                program: "/usr/bin/curl".to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
            },
        ));

        let result = resolver.resolve(AddressFamily::V4).await;

        assert_eq!(result, PublicAddressResult::unavailable(AddressFamily::V4));
    }

    #[tokio::test(start_paused = true)]
    async fn hanging_lookup_times_out_as_unavailable() {
        let resolver = PublicIpResolver::new(HangingLookup);
        let started = tokio::time::Instant::now();

        let result = resolver.resolve(AddressFamily::V4).await;

        assert_eq!(result, PublicAddressResult::unavailable(AddressFamily::V4));
        assert!(started.elapsed() >= Duration::from_secs(5));
        assert!(started.elapsed() < Duration::from_secs(6));
    }

    #[tokio::test(start_paused = true)]
    async fn lookup_within_cap_succeeds() {
        let resolver = PublicIpResolver::new(SlowLookup(Duration::from_secs(4)));

        assert!(resolver.resolve(AddressFamily::V4).await.is_available());
    }

    #[tokio::test(start_paused = true)]
    async fn custom_timeout_is_enforced() {
        let resolver = PublicIpResolver::new(SlowLookup(Duration::from_secs(2)))
            .with_timeout(Duration::from_secs(1));

        assert!(!resolver.resolve(AddressFamily::V4).await.is_available());
    }
}

mod check {
    use super::*;

    #[test]
    fn accepts_valid_address() {
        assert_eq!(check_output(AddressFamily::V4, "1.2.3.4").unwrap(), "1.2.3.4");
    }

    #[test]
    fn whitespace_only_is_empty() {
        assert!(matches!(
            check_output(AddressFamily::V4, " \n\t"),
            Err(ResolveError::Empty)
        ));
    }

    #[test]
    fn invalid_is_rejected_with_preview() {
        let error = check_output(AddressFamily::V4, "curl: (6) Could not resolve host").unwrap_err();

        match error {
            ResolveError::Rejected { output } => {
                assert_eq!(output, "curl: (6) Could not resolve host");
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn rejection_preview_is_truncated() {
        let long = "x".repeat(500);
        let Err(ResolveError::Rejected { output }) = check_output(AddressFamily::V6, &long) else {
            panic!("expected rejection");
        };
        assert_eq!(output.len(), 64);
    }
}

mod result {
    use super::*;

    #[test]
    fn found_is_available() {
        assert!(PublicAddressResult::found(AddressFamily::V4, "1.2.3.4").is_available());
    }

    #[test]
    fn unavailable_has_no_value() {
        let result = PublicAddressResult::unavailable(AddressFamily::V6);
        assert!(!result.is_available());
        assert_eq!(result.family, AddressFamily::V6);
    }

    #[test]
    fn default_timeout_is_five_seconds() {
        let resolver = PublicIpResolver::new(HangingLookup);
        assert_eq!(resolver.timeout(), Duration::from_secs(5));
    }
}
