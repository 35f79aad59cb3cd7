use async_trait::async_trait;
use crate::core::events::DomainEvent;
use crate::core::library::LibraryError;
use crate::gateway::events::EventPublisher;

// LogPublisher writes every domain event to the structured log as a JSON payload.
#[derive(Debug)]
pub struct LogPublisher {
    channel: String,
}

impl LogPublisher {
    pub fn new(channel: &str) -> Self {
        Self {
            channel: channel.to_string(),
        }
    }
}

#[async_trait]
impl EventPublisher for LogPublisher {
    async fn publish(&self, event: &DomainEvent) -> Result<(), LibraryError> {
        let payload = serde_json::to_string(event)?;
        tracing::info!(channel = self.channel.as_str(), event = event.name.as_str(),
            key = event.key.as_str(), payload = payload.as_str(), "domain event");
        Ok(())
    }
}
