//! Mock provider implementation for testing.

use super::{ProviderError, TextProvider};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Clone)]
enum MockBehavior {
    Echo,
    Reply(String),
    NetworkFailure,
    RateLimited,
}

/// Mock text provider for testing. Counts every `generate` call it receives.
#[derive(Debug)]
pub struct MockTextProvider {
    configured: bool,
    behavior: MockBehavior,
    calls: AtomicUsize,
}

impl MockTextProvider {
    /// Configured provider that answers `Mock response for: {prompt}`.
    pub fn new(configured: bool) -> Self {
        Self {
            configured,
            behavior: MockBehavior::Echo,
            calls: AtomicUsize::new(0),
        }
    }

    /// Configured provider that always answers `reply`.
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            behavior: MockBehavior::Reply(reply.into()),
            ..Self::new(true)
        }
    }

    /// Configured provider whose every call fails at the transport.
    pub fn failing() -> Self {
        Self {
            behavior: MockBehavior::NetworkFailure,
            ..Self::new(true)
        }
    }

    /// Configured provider whose every call is rejected with a quota error.
    pub fn rate_limited() -> Self {
        Self {
            behavior: MockBehavior::RateLimited,
            ..Self::new(true)
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if !self.configured {
            return Err(ProviderError::NotConfigured(
                "Mock text provider not enabled".to_string(),
            ));
        }

        match &self.behavior {
            MockBehavior::Echo => Ok(format!("Mock response for: {}", prompt)),
            MockBehavior::Reply(reply) => Ok(reply.clone()),
            MockBehavior::NetworkFailure => Err(ProviderError::NetworkError(
                "connection reset by peer".to_string(),
            )),
            MockBehavior::RateLimited => Err(ProviderError::RateLimited),
        }
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        if self.configured {
            Ok(())
        } else {
            Err(ProviderError::NotConfigured(
                "Mock text provider not enabled".to_string(),
            ))
        }
    }
}
