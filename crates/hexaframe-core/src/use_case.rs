//! Use-case execution engine.
//!
//! A use case runs through a fixed lifecycle:
//!
//! ```text
//! validate ─▶ before ─▶ perform ─▶ after(Ok) ─▶ Ok
//!     │          │          │
//!     └──────────┴──────────┴────▶ after(Err) ─▶ Err
//! ```
//!
//! Hooks report domain or infrastructure faults by returning
//! `Err(HexaError)`; the engine turns them into [`Outcome::Err`]. A panic is a
//! defect, not a domain condition: it unwinds straight past the engine and
//! `after` is not run.
//!
//! ## `after` faults
//!
//! - On the success path a fault from `after` vetoes the result: the caller
//!   receives `Err(fault)`. `after` is not called a second time.
//! - On the failure path a fault from `after` is logged and dropped; the
//!   original error is returned.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::{
    error::{HexaError, HexaResult},
    outcome::Outcome,
};

/// Outcome produced by the engine.
pub type UseCaseOutcome<T> = Outcome<T, HexaError>;

/// Blocking use case.
///
/// Only [`perform`](UseCase::perform) is required. To hand back an outcome
/// that was already built elsewhere, return `outcome.into_result()`.
pub trait UseCase: Send + Sync {
    type Input: Send;
    type Output: Send;

    /// Reject the input before any side effect happens.
    fn validate(&self, _input: &Self::Input) -> HexaResult<()> {
        Ok(())
    }

    /// Side-effect hook run after validation, before `perform`.
    fn before(&self, _input: &Self::Input) -> HexaResult<()> {
        Ok(())
    }

    /// Business logic.
    fn perform(&self, input: Self::Input) -> HexaResult<Self::Output>;

    /// Observe the final outcome. Runs exactly once on both paths.
    fn after(&self, _outcome: &UseCaseOutcome<Self::Output>) -> HexaResult<()> {
        Ok(())
    }

    /// Run the full lifecycle.
    fn execute(&self, input: Self::Input) -> UseCaseOutcome<Self::Output> {
        let name = std::any::type_name::<Self>();

        let outcome = run_stages(self, input, name);
        let after = self.after(&outcome);
        settle(outcome, after, name)
    }
}

fn run_stages<U: UseCase + ?Sized>(
    use_case: &U,
    input: U::Input,
    name: &'static str,
) -> UseCaseOutcome<U::Output> {
    debug!(use_case = name, stage = "validate");
    if let Err(fault) = use_case.validate(&input) {
        return short_circuit(name, "validate", fault);
    }

    debug!(use_case = name, stage = "before");
    if let Err(fault) = use_case.before(&input) {
        return short_circuit(name, "before", fault);
    }

    debug!(use_case = name, stage = "perform");
    match use_case.perform(input) {
        Ok(output) => Outcome::Ok(output),
        Err(fault) => short_circuit(name, "perform", fault),
    }
}

/// Suspend-capable use case. Same lifecycle as [`UseCase`]; every hook may
/// await.
#[async_trait]
pub trait AsyncUseCase: Send + Sync {
    type Input: Send + Sync;
    type Output: Send + Sync;

    async fn validate(&self, _input: &Self::Input) -> HexaResult<()> {
        Ok(())
    }

    async fn before(&self, _input: &Self::Input) -> HexaResult<()> {
        Ok(())
    }

    async fn perform(&self, input: Self::Input) -> HexaResult<Self::Output>;

    async fn after(&self, _outcome: &UseCaseOutcome<Self::Output>) -> HexaResult<()> {
        Ok(())
    }

    async fn execute(&self, input: Self::Input) -> UseCaseOutcome<Self::Output> {
        let name = std::any::type_name::<Self>();

        let outcome = run_stages_async(self, input, name).await;
        let after = self.after(&outcome).await;
        settle(outcome, after, name)
    }
}

async fn run_stages_async<U: AsyncUseCase + ?Sized>(
    use_case: &U,
    input: U::Input,
    name: &'static str,
) -> UseCaseOutcome<U::Output> {
    debug!(use_case = name, stage = "validate");
    if let Err(fault) = use_case.validate(&input).await {
        return short_circuit(name, "validate", fault);
    }

    debug!(use_case = name, stage = "before");
    if let Err(fault) = use_case.before(&input).await {
        return short_circuit(name, "before", fault);
    }

    debug!(use_case = name, stage = "perform");
    match use_case.perform(input).await {
        Ok(output) => Outcome::Ok(output),
        Err(fault) => short_circuit(name, "perform", fault),
    }
}

fn short_circuit<T>(name: &'static str, stage: &'static str, fault: HexaError) -> UseCaseOutcome<T> {
    debug!(use_case = name, stage, code = fault.code(), "stage failed");
    Outcome::Err(fault)
}

/// Combine the outcome with whatever `after` reported.
fn settle<T>(
    outcome: UseCaseOutcome<T>,
    after: HexaResult<()>,
    name: &'static str,
) -> UseCaseOutcome<T> {
    match (outcome, after) {
        (outcome, Ok(())) => outcome,
        (Outcome::Ok(_), Err(fault)) => {
            warn!(use_case = name, code = fault.code(), "after hook vetoed a successful outcome");
            Outcome::Err(fault)
        }
        (Outcome::Err(original), Err(fault)) => {
            warn!(
                use_case = name,
                code = fault.code(),
                original = original.code(),
                "after hook failed on the failure path; keeping original error"
            );
            Outcome::Err(original)
        }
    }
}
