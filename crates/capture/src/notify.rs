use {
    crate::*,
    recorder::RecordingSummary,
    serde::Serialize,
    tokio::sync::mpsc,
};

/// Events handed to notification collaborators.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RecordingEvent {
    /// A recording was closed.
    Finished(RecordingSummary),
    /// No encoder could be opened; recording is disabled until the next
    /// motion episode. Sent at most once per capture run.
    EncoderUnavailable { reason: String },
}

/// Receives recording events. Called from the capture thread, so
/// implementations must not block for long.
pub trait Notifier: Send + Sync {
    fn notify(&self, event: &RecordingEvent) -> Result<(), NotifyError>;
}

/// Writes events to the log and nothing else.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, event: &RecordingEvent) -> Result<(), NotifyError> {
        match event {
            RecordingEvent::Finished(summary) => log::info!(
                "recording finished: {} ({} bytes, {:.1}s)",
                summary.filename,
                summary.size_bytes,
                summary.duration_seconds
            ),
            RecordingEvent::EncoderUnavailable { reason } => {
                log::error!("recording unavailable: {}", reason)
            }
        }
        Ok(())
    }
}

/// Forwards events into an unbounded channel for async consumers.
pub struct ChannelNotifier {
    sender: mpsc::UnboundedSender<RecordingEvent>,
}

impl ChannelNotifier {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<RecordingEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, event: &RecordingEvent) -> Result<(), NotifyError> {
        self.sender
            .send(event.clone())
            .map_err(|_| NotifyError::Closed)
    }
}
