//! Background priority escalation

use chrono::{DateTime, Utc};
use shared::{Order, ProcessId, process_debug, process_warn};
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::core::{StatusClassifier, escalate, escalation_candidates};
use crate::error::WebServerResult;
use crate::traits::OrderStore;

/// Raise open orders due today to high priority, returning how many changed
pub async fn escalate_due_today<O>(store: &O, classifier: &StatusClassifier, now: DateTime<Utc>) -> WebServerResult<usize>
where
    O: OrderStore + ?Sized,
{
    let orders = store.list().await?;
    let mut escalated = 0;

    for id in escalation_candidates(&orders, classifier, now) {
        // The order may have changed since the listing; decide again on the stored record
        let classifier = *classifier;
        let raise = move |order: &mut Order| classifier.is_due_today(order, now) && escalate(order, now);

        if store
            .modify(id, Box::new(raise))
            .await?
            .is_some_and(|modified| modified.changed)
        {
            escalated += 1;
        }
    }

    Ok(escalated)
}

/// Run escalation in a detached task; failures are only logged
pub fn spawn_escalation<O>(store: Arc<O>, classifier: StatusClassifier, now: DateTime<Utc>) -> JoinHandle<()>
where
    O: OrderStore + 'static,
{
    tokio::spawn(async move {
        match escalate_due_today(store.as_ref(), &classifier, now).await {
            Ok(0) => {}
            Ok(count) => {
                process_debug!(ProcessId::current(), "⏫ Escalated {} orders due today", count);
            }
            Err(e) => {
                process_warn!(ProcessId::current(), "⚠️ Priority escalation failed: {}", e);
            }
        }
    })
}
