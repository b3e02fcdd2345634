//! EventSink port - ドメインイベントの通知先
//!
//! 元のシステムはこのタイミングでメール / in-app 通知を送っていました。
//! エンジンは emit するだけで、配送方法は実装側の責務です。

use async_trait::async_trait;
use tracing::info;

use crate::domain::DomainEvent;

/// Receives domain events as they happen.
///
/// Design intent:
/// - Emission is fire-and-forget from the services' point of view: a sink
///   must not fail the operation that produced the event.
/// - Called outside the store lock, after the state change committed.
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn emit(&self, event: DomainEvent);
}

/// Sink that drops every event. Useful for tests and embedding.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullEventSink;

#[async_trait]
impl EventSink for NullEventSink {
    async fn emit(&self, _event: DomainEvent) {}
}

/// Sink that buffers events in memory. Handy in tests and for embedders
/// that drain events themselves.
#[derive(Debug, Default)]
pub struct CollectingEventSink {
    events: std::sync::Mutex<Vec<DomainEvent>>,
}

impl CollectingEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drain(&self) -> Vec<DomainEvent> {
        std::mem::take(&mut *self.events.lock().expect("sink lock poisoned"))
    }
}

#[async_trait]
impl EventSink for CollectingEventSink {
    async fn emit(&self, event: DomainEvent) {
        self.events.lock().expect("sink lock poisoned").push(event);
    }
}

/// Sink that logs every event through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink;

#[async_trait]
impl EventSink for TracingEventSink {
    async fn emit(&self, event: DomainEvent) {
        match &event {
            DomainEvent::BatchGenerated {
                project_id,
                batch_id,
                candidates,
            } => info!(%project_id, %batch_id, candidates, "batch generated"),
            DomainEvent::BatchRefreshed {
                project_id,
                old_batch_id,
                new_batch_id,
                expired_pending,
            } => info!(
                %project_id,
                %old_batch_id,
                %new_batch_id,
                expired_pending,
                "batch refreshed"
            ),
            DomainEvent::CandidateAccepted {
                project_id,
                candidate_id,
                developer_id,
            } => info!(%project_id, %candidate_id, %developer_id, "candidate accepted"),
            DomainEvent::CandidateRejected {
                project_id,
                candidate_id,
                developer_id,
            } => info!(%project_id, %candidate_id, %developer_id, "candidate rejected"),
            DomainEvent::CandidateExpired {
                project_id,
                candidate_id,
                developer_id,
            } => info!(%project_id, %candidate_id, %developer_id, "candidate expired"),
        }
    }
}
