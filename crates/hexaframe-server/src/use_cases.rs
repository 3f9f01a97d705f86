//! Example use cases served by the demo.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use hexaframe_core::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// `value` stays untyped so a missing or non-integer value is reported by
/// `validate` instead of failing deserialization.
#[derive(Debug, Default, Deserialize)]
pub struct AddOneInput {
    #[serde(default)]
    pub value: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddOneOutput {
    pub result: i64,
}

fn check_value(input: &AddOneInput) -> HexaResult<i64> {
    match &input.value {
        None => Err(HexaError::validation("missing 'value'")),
        Some(v) => v.as_i64().ok_or_else(|| {
            HexaError::validation("'value' must be int").with_detail("field", "value")
        }),
    }
}

fn add_one(input: &AddOneInput) -> HexaResult<AddOneOutput> {
    let value = check_value(input)?;
    if value == 41 {
        return Err(HexaError::conflict_with("no 42s allowed"));
    }
    value
        .checked_add(1)
        .map(|result| AddOneOutput { result })
        .ok_or_else(|| HexaError::domain("overflow", "value is too large"))
}

/// Adds one to `value`, refusing to produce 42.
#[derive(Debug, Default, Clone, Copy)]
pub struct AddOne;

impl UseCase for AddOne {
    type Input = AddOneInput;
    type Output = AddOneOutput;

    fn validate(&self, input: &AddOneInput) -> HexaResult<()> {
        check_value(input).map(|_| ())
    }

    fn perform(&self, input: AddOneInput) -> HexaResult<AddOneOutput> {
        add_one(&input)
    }
}

/// Suspend-capable [`AddOne`] that reports every outcome through the logger port.
pub struct AsyncAddOne {
    logger: Arc<dyn LoggerPort>,
}

impl AsyncAddOne {
    pub fn new(logger: Arc<dyn LoggerPort>) -> Self {
        Self { logger }
    }
}

#[async_trait]
impl AsyncUseCase for AsyncAddOne {
    type Input = AddOneInput;
    type Output = AddOneOutput;

    async fn validate(&self, input: &AddOneInput) -> HexaResult<()> {
        check_value(input).map(|_| ())
    }

    async fn perform(&self, input: AddOneInput) -> HexaResult<AddOneOutput> {
        tokio::task::yield_now().await;
        add_one(&input)
    }

    async fn after(&self, outcome: &UseCaseOutcome<AddOneOutput>) -> HexaResult<()> {
        let mut fields = Fields::new();
        match outcome {
            Outcome::Ok(output) => {
                fields.insert("result".into(), output.result.into());
                self.logger.info("add-one completed", &fields);
            }
            Outcome::Err(err) => {
                fields.insert("code".into(), err.code().into());
                self.logger.warning("add-one rejected", &fields);
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentTimeOutput {
    pub now: DateTime<Utc>,
    pub uptime_ms: u64,
    pub request_id: Uuid,
}

/// Reads the clock port; takes no input.
pub struct CurrentTime {
    clock: Arc<dyn ClockPort>,
    ids: Arc<dyn UuidPort>,
}

impl CurrentTime {
    pub fn new(clock: Arc<dyn ClockPort>, ids: Arc<dyn UuidPort>) -> Self {
        Self { clock, ids }
    }
}

impl UseCase for CurrentTime {
    type Input = ();
    type Output = CurrentTimeOutput;

    fn perform(&self, (): ()) -> HexaResult<CurrentTimeOutput> {
        let uptime_ms = u64::try_from(self.clock.monotonic().as_millis()).unwrap_or(u64::MAX);
        Ok(CurrentTimeOutput {
            now: self.clock.now(),
            uptime_ms,
            request_id: self.ids.v4(),
        })
    }
}
