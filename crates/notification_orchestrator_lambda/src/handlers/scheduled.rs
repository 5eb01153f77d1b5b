use std::time::Duration;

use notification_orchestrator_core::context::DispatchContext;
use notification_orchestrator_core::dispatch::{
    DispatchError, DispatchReport, NotificationOrchestrator,
};
use notification_orchestrator_core::publisher::QueuePublisher;
use notification_orchestrator_core::store::RecordStore;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

/// EventBridge scheduled event. Only logged: every invocation rescans the
/// whole index.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ScheduledEvent {
    #[serde(default)]
    pub source: String,
    #[serde(rename = "detail-type", default)]
    pub detail_type: String,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub detail: Option<Value>,
}

impl ScheduledEvent {
    fn loggable_detail(&self) -> Option<String> {
        match &self.detail {
            None | Some(Value::Null) => None,
            Some(Value::Object(map)) if map.is_empty() => None,
            Some(detail) => Some(detail.to_string()),
        }
    }
}

/// Bounds the dispatch by the invocation deadline, given in epoch millis.
pub fn dispatch_context_for_deadline(deadline_ms: u64, now_ms: i64) -> DispatchContext {
    let remaining_ms = i64::try_from(deadline_ms)
        .unwrap_or(i64::MAX)
        .saturating_sub(now_ms)
        .max(0);
    DispatchContext::with_timeout(Duration::from_millis(remaining_ms.unsigned_abs()))
}

pub async fn handle_scheduled_event<S, P>(
    event: &ScheduledEvent,
    orchestrator: &NotificationOrchestrator<S, P>,
    ctx: &DispatchContext,
) -> Result<DispatchReport, DispatchError>
where
    S: RecordStore,
    P: QueuePublisher,
{
    info!(source = %event.source, "received scheduled event");
    info!(detail_type = %event.detail_type, "event detail type");
    if let Some(time) = &event.time {
        info!(time = %time, "event time");
    }
    if let Some(detail) = event.loggable_detail() {
        info!(detail = %detail, "event details");
    }

    orchestrator.dispatch(ctx).await
}
