use crate::application::retry::RetryExecutor;
use crate::domain::error::DomainError;
use crate::domain::values::request_options::RequestOptions;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tracing::Instrument;
use uuid::Uuid;

type Reply = oneshot::Sender<Result<serde_json::Value, DomainError>>;

/// A queued outbound call. Consumed exactly once by the worker.
pub struct RequestTask {
    pub id: Uuid,
    pub url: String,
    pub options: RequestOptions,
    reply: Reply,
}

/// Single-lane FIFO for every outbound call in the process.
///
/// One worker task owns the [`RetryExecutor`] and drains the queue one task
/// at a time, pausing `pause` after each. Throughput is capped at roughly
/// one request per `min_interval + pause`.
pub struct RequestScheduler {
    sender: mpsc::UnboundedSender<RequestTask>,
}

impl RequestScheduler {
    /// Spawns the worker. Must be called within a Tokio runtime. The worker
    /// exits once the scheduler is dropped and the queue is drained.
    pub fn start(executor: RetryExecutor, pause: Duration) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        tokio::spawn(Self::drain(receiver, executor, pause));
        Self { sender }
    }

    pub async fn enqueue(
        &self,
        url: impl Into<String>,
        options: RequestOptions,
    ) -> Result<serde_json::Value, DomainError> {
        let (reply, outcome) = oneshot::channel();
        let task = RequestTask {
            id: Uuid::new_v4(),
            url: url.into(),
            options,
            reply,
        };
        self.sender
            .send(task)
            .map_err(|_| DomainError::SchedulerClosed)?;
        outcome.await.map_err(|_| DomainError::SchedulerClosed)?
    }

    async fn drain(
        mut receiver: mpsc::UnboundedReceiver<RequestTask>,
        executor: RetryExecutor,
        pause: Duration,
    ) {
        while let Some(task) = receiver.recv().await {
            let span = tracing::debug_span!("request", id = %task.id);
            let outcome = executor
                .execute(&task.url, &task.options)
                .instrument(span)
                .await;
            if let Err(e) = &outcome {
                tracing::debug!(id = %task.id, error = %e, "request failed");
            }
            // The caller may have gone away; the call has still happened.
            let _ = task.reply.send(outcome);

            tokio::time::sleep(pause).await;
        }
        tracing::debug!("request scheduler stopped");
    }
}
