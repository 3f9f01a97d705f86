//! End-to-end behaviour of the engine through the public API.

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use hexaframe_core::prelude::*;

#[derive(Default)]
struct Trace(Mutex<Vec<String>>);

impl Trace {
    fn push(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.0.lock().unwrap())
    }
}

/// Transfers `amount` out of a balance, refusing overdrafts.
struct Withdraw {
    balance: Mutex<i64>,
    trace: Arc<Trace>,
}

impl UseCase for Withdraw {
    type Input = i64;
    type Output = i64;

    fn validate(&self, amount: &i64) -> HexaResult<()> {
        self.trace.push("validate");
        if *amount <= 0 {
            return Err(
                HexaError::validation("amount must be positive").with_detail("amount", *amount)
            );
        }
        Ok(())
    }

    fn before(&self, _amount: &i64) -> HexaResult<()> {
        self.trace.push("before");
        Ok(())
    }

    fn perform(&self, amount: i64) -> HexaResult<i64> {
        self.trace.push("perform");
        let mut balance = self.balance.lock().unwrap();
        if amount > *balance {
            return Err(HexaError::domain("insufficient_funds", "balance too low"));
        }
        *balance -= amount;
        Ok(*balance)
    }

    fn after(&self, outcome: &UseCaseOutcome<i64>) -> HexaResult<()> {
        self.trace.push(match outcome {
            Outcome::Ok(_) => "after:ok",
            Outcome::Err(_) => "after:err",
        });
        Ok(())
    }
}

fn withdraw(balance: i64) -> (Withdraw, Arc<Trace>) {
    let trace = Arc::new(Trace::default());
    let use_case = Withdraw {
        balance: Mutex::new(balance),
        trace: Arc::clone(&trace),
    };
    (use_case, trace)
}

#[test]
fn success_runs_every_stage_in_order() {
    let (use_case, trace) = withdraw(100);
    assert_eq!(use_case.execute(30), Outcome::Ok(70));
    assert_eq!(trace.take(), ["validate", "before", "perform", "after:ok"]);
}

#[test]
fn validation_failure_skips_side_effects() {
    let (use_case, trace) = withdraw(100);
    let err = use_case.execute(-5).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(
        err.details().and_then(|d| d.get("amount")),
        Some(&serde_json::json!(-5))
    );
    assert_eq!(trace.take(), ["validate", "after:err"]);
    assert_eq!(use_case.execute(100), Outcome::Ok(0));
}

#[test]
fn domain_failure_from_perform() {
    let (use_case, trace) = withdraw(10);
    let err = use_case.execute(11).unwrap_err();
    assert_eq!(err.code(), "insufficient_funds");
    assert!(err.is_domain());
    assert_eq!(trace.take(), ["validate", "before", "perform", "after:err"]);
}

#[test]
fn outcomes_chain_across_use_cases() {
    let (first, _) = withdraw(100);
    let (second, _) = withdraw(50);

    let chained = first
        .execute(20)
        .and_then(|left| second.execute(left / 2))
        .map(|left| left * 10);
    assert_eq!(chained, Outcome::Ok(100));

    let failed = first.execute(1_000).and_then(|left| second.execute(left));
    assert_eq!(
        failed.map_err(|e| e.code().to_owned()),
        Outcome::Err("insufficient_funds".to_owned())
    );
}

#[test]
fn prebuilt_outcome_can_be_returned_from_perform() {
    struct Passthrough;

    impl UseCase for Passthrough {
        type Input = UseCaseOutcome<u8>;
        type Output = u8;

        fn perform(&self, input: UseCaseOutcome<u8>) -> HexaResult<u8> {
            input.into_result()
        }
    }

    assert_eq!(Passthrough.execute(Outcome::Ok(3)), Outcome::Ok(3));
    assert_eq!(
        Passthrough.execute(Outcome::Err(HexaError::not_found())),
        Outcome::Err(HexaError::not_found())
    );
}

struct Audited {
    audits: Arc<AtomicUsize>,
    fail_audit: bool,
}

#[async_trait]
impl AsyncUseCase for Audited {
    type Input = String;
    type Output = usize;

    async fn validate(&self, input: &String) -> HexaResult<()> {
        if input.is_empty() {
            return Err(HexaError::validation("empty input"));
        }
        Ok(())
    }

    async fn perform(&self, input: String) -> HexaResult<usize> {
        tokio::task::yield_now().await;
        Ok(input.len())
    }

    async fn after(&self, _outcome: &UseCaseOutcome<usize>) -> HexaResult<()> {
        self.audits.fetch_add(1, Ordering::SeqCst);
        if self.fail_audit {
            return Err(HexaError::infra("audit_unavailable", "audit log is down"));
        }
        Ok(())
    }
}

#[tokio::test]
async fn async_engine_matches_blocking_semantics() {
    let audits = Arc::new(AtomicUsize::new(0));
    let use_case = Audited {
        audits: Arc::clone(&audits),
        fail_audit: false,
    };

    assert_eq!(use_case.execute("hello".into()).await, Outcome::Ok(5));
    assert_eq!(
        use_case.execute(String::new()).await.unwrap_err().kind(),
        ErrorKind::Validation
    );
    assert_eq!(audits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn async_after_fault_vetoes_success_but_not_failure() {
    let audits = Arc::new(AtomicUsize::new(0));
    let use_case = Audited {
        audits: Arc::clone(&audits),
        fail_audit: true,
    };

    let vetoed = use_case.execute("hello".into()).await.unwrap_err();
    assert_eq!(vetoed.code(), "audit_unavailable");

    let original = use_case.execute(String::new()).await.unwrap_err();
    assert_eq!(original.code(), "validation_error");

    assert_eq!(audits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn async_outcome_combinators() {
    let doubled = Outcome::<i32, HexaError>::Ok(21)
        .async_map(|v| async move { v * 2 })
        .await;
    assert_eq!(doubled, Outcome::Ok(42));

    let rejected = doubled
        .async_and_then(|v| async move {
            if v == 42 {
                Outcome::Err(HexaError::conflict_with("no 42s allowed"))
            } else {
                Outcome::Ok(v)
            }
        })
        .await;
    assert_eq!(rejected.unwrap_err().message(), "no 42s allowed");
}

#[test]
fn serialized_outputs_and_errors() {
    #[derive(serde::Serialize)]
    struct Receipt {
        id: u32,
        total: f64,
    }

    let value = Receipt { id: 7, total: 12.5 }.to_serializable().unwrap();
    assert_eq!(value, serde_json::json!({"id": 7, "total": 12.5}));

    let err = HexaError::permission_denied_with("admins only");
    assert_eq!(err.family(), ErrorFamily::Domain);
    assert_eq!(err.to_string(), "permission_denied: admins only");
}
