use async_trait::async_trait;

use crate::notifier::{DeliveryError, DeliveryReceipt, Notifier, OnRestricted, OutboundMessage};

/// Wraps a notifier and applies an [`OnRestricted`] policy to its failures.
pub struct FallbackNotifier<N> {
    inner: N,
    policy: OnRestricted,
}

impl<N: Notifier> FallbackNotifier<N> {
    pub fn new(inner: N, policy: OnRestricted) -> Self {
        Self { inner, policy }
    }
}

#[async_trait]
impl<N: Notifier> Notifier for FallbackNotifier<N> {
    async fn send(&self, message: &OutboundMessage) -> Result<DeliveryReceipt, DeliveryError> {
        match self.inner.send(message).await {
            Err(DeliveryError::Restricted(reason)) => match &self.policy {
                OnRestricted::Fail => Err(DeliveryError::Restricted(reason)),
                OnRestricted::RedirectTo(addr) => {
                    tracing::warn!(%reason, fallback = %addr, "Delivery restricted, redirecting");
                    let redirected = OutboundMessage {
                        to: vec![addr.clone()],
                        ..message.clone()
                    };
                    self.inner.send(&redirected).await
                }
            },
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use super::*;

    type Outcome = Result<DeliveryReceipt, DeliveryError>;

    /// Replays canned outcomes and records every message it was given.
    struct Scripted {
        outcomes: Mutex<VecDeque<Outcome>>,
        sent: Arc<Mutex<Vec<OutboundMessage>>>,
    }

    #[async_trait]
    impl Notifier for Scripted {
        async fn send(&self, message: &OutboundMessage) -> Outcome {
            self.sent.lock().unwrap().push(message.clone());
            self.outcomes
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected send")
        }
    }

    fn scripted(
        outcomes: Vec<Outcome>,
        policy: OnRestricted,
    ) -> (FallbackNotifier<Scripted>, Arc<Mutex<Vec<OutboundMessage>>>) {
        let sent = Arc::new(Mutex::new(Vec::new()));
        let inner = Scripted {
            outcomes: Mutex::new(outcomes.into()),
            sent: sent.clone(),
        };
        (FallbackNotifier::new(inner, policy), sent)
    }

    fn redirect() -> OnRestricted {
        OnRestricted::RedirectTo("me@example.com".into())
    }

    fn message() -> OutboundMessage {
        OutboundMessage {
            from: "bot@example.com".into(),
            to: vec!["team@example.com".into()],
            subject: "subject".into(),
            html: "<p>hi</p>".into(),
        }
    }

    fn receipt(to: &str) -> DeliveryReceipt {
        DeliveryReceipt {
            id: "id-1".into(),
            recipients: vec![to.into()],
        }
    }

    #[test]
    fn test_success_passes_through() {
        let (notifier, sent) = scripted(vec![Ok(receipt("team@example.com"))], redirect());

        let result = tokio_test::block_on(notifier.send(&message())).unwrap();
        assert_eq!(result.recipients, vec!["team@example.com"]);
        assert_eq!(sent.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_restricted_fails_without_redirect() {
        let (notifier, sent) = scripted(
            vec![Err(DeliveryError::Restricted("test mode".into()))],
            OnRestricted::Fail,
        );

        let err = tokio_test::block_on(notifier.send(&message())).unwrap_err();
        assert!(matches!(err, DeliveryError::Restricted(_)));
        assert_eq!(sent.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_restricted_redirects_once() {
        let (notifier, sent) = scripted(
            vec![
                Err(DeliveryError::Restricted("test mode".into())),
                Ok(receipt("me@example.com")),
            ],
            redirect(),
        );

        let result = tokio_test::block_on(notifier.send(&message())).unwrap();
        assert_eq!(result.recipients, vec!["me@example.com"]);

        let sent = sent.lock().unwrap();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[1].to, vec!["me@example.com"]);
        assert_eq!(sent[1].subject, sent[0].subject);
        assert_eq!(sent[1].html, sent[0].html);
    }

    #[test]
    fn test_redirect_failure_is_propagated() {
        let (notifier, _sent) = scripted(
            vec![
                Err(DeliveryError::Restricted("test mode".into())),
                Err(DeliveryError::RateLimited("slow down".into())),
            ],
            redirect(),
        );

        let err = tokio_test::block_on(notifier.send(&message())).unwrap_err();
        assert!(matches!(err, DeliveryError::RateLimited(_)));
    }

    #[test]
    fn test_other_errors_are_not_redirected() {
        let (notifier, sent) = scripted(
            vec![Err(DeliveryError::InvalidCredential("bad".into()))],
            redirect(),
        );

        let err = tokio_test::block_on(notifier.send(&message())).unwrap_err();
        assert!(matches!(err, DeliveryError::InvalidCredential(_)));
        assert_eq!(sent.lock().unwrap().len(), 1);
    }
}
