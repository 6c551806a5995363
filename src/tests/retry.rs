use crate::error::{LlmError, LlmResult};
use crate::retry::RetryPolicy;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

// Helper to create fast test retry policy to prevent slow tests
fn fast_policy() -> RetryPolicy {
    RetryPolicy {
        max_attempts: 3,
        initial_delay: Duration::from_millis(5),
        max_delay: Duration::from_millis(20),
        backoff_multiplier: 2.0,
    }
}

#[test]
fn default_policy_matches_dispatch_requirements() {
    let policy = RetryPolicy::default();

    assert_eq!(policy.max_attempts, 3, "Three attempts total, not per retry");
    assert_eq!(policy.initial_delay, Duration::from_secs(2));
    assert_eq!(policy.max_delay, Duration::from_secs(10));
    assert_eq!(policy.backoff_multiplier, 2.0);
}

#[test]
fn backoff_progression_doubles_and_caps() {
    let policy = RetryPolicy::default();

    // Jitter adds up to 10% on top of the base delay
    let within = |delay: Duration, base: f64| {
        let secs = delay.as_secs_f64();
        secs >= base && secs <= base * 1.1 + 1e-9
    };

    assert!(within(policy.delay_for(1), 2.0), "first wait ~2s");
    assert!(within(policy.delay_for(2), 4.0), "second wait ~4s");
    assert!(within(policy.delay_for(3), 8.0), "third wait ~8s");
    assert!(
        within(policy.delay_for(4), 10.0),
        "further waits cap at max_delay"
    );
}

#[tokio::test]
async fn transport_errors_retry_until_attempts_exhausted() {
    let calls = AtomicU32::new(0);

    let result: LlmResult<String> = fast_policy()
        .run(|| async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(LlmError::transport("connection reset", None))
        })
        .await;

    assert_eq!(calls.load(Ordering::SeqCst), 3, "all attempts consumed");
    assert!(matches!(result, Err(LlmError::Transport { .. })));
}

#[tokio::test]
async fn application_errors_are_not_retried() {
    let calls = AtomicU32::new(0);

    let result: LlmResult<String> = fast_policy()
        .run(|| async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(LlmError::http_status(400, "bad request"))
        })
        .await;

    assert_eq!(calls.load(Ordering::SeqCst), 1, "HTTP 4xx must not retry");
    assert!(matches!(result, Err(LlmError::HttpStatus { status: 400, .. })));
}

#[tokio::test]
async fn validation_errors_are_not_retried() {
    let calls = AtomicU32::new(0);

    let result: LlmResult<String> = fast_policy()
        .run(|| async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(LlmError::validation("score out of range"))
        })
        .await;

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(matches!(result, Err(LlmError::Validation { .. })));
}

#[tokio::test]
async fn recovers_after_transient_failure() {
    let calls = AtomicU32::new(0);

    let result = fast_policy()
        .run(|| async {
            if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(LlmError::transport("timeout", None))
            } else {
                Ok("answer".to_string())
            }
        })
        .await;

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(result.unwrap(), "answer");
}
