use std::sync::{Arc, Mutex};
use async_trait::async_trait;
use crate::core::events::DomainEvent;
use crate::core::library::LibraryError;
use crate::gateway::events::EventPublisher;

// MemoryPublisher keeps published events in process. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct MemoryPublisher {
    events: Arc<Mutex<Vec<DomainEvent>>>,
}

impl MemoryPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<DomainEvent> {
        self.events.lock().map(|events| events.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl EventPublisher for MemoryPublisher {
    async fn publish(&self, event: &DomainEvent) -> Result<(), LibraryError> {
        let mut events = self.events.lock().map_err(|err| LibraryError::runtime(
            format!("event buffer poisoned {}", err).as_str(), None))?;
        events.push(event.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use crate::core::events::DomainEvent;
    use crate::gateway::events::EventPublisher;
    use crate::gateway::memory::publisher::MemoryPublisher;

    #[tokio::test]
    async fn test_should_record_published_events() {
        let publisher = MemoryPublisher::new();
        let handle = publisher.clone();
        let event = DomainEvent::updated("book_reserved", "books", "b1", &HashMap::new(), &"alice").expect("build event");
        let _ = publisher.publish(&event).await.expect("should publish");
        let events = handle.events();
        assert_eq!(1, events.len());
        assert_eq!("book_reserved", events[0].name.as_str());
    }
}
