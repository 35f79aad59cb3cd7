use serde::{Deserialize, Serialize};
use crate::gateway::GatewayPublisherVia;

// RepositoryStore selects where the catalog document lives
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Copy)]
pub enum RepositoryStore {
    JsonFile,
    Memory,
}

impl RepositoryStore {
    pub fn gateway_publisher(&self) -> GatewayPublisherVia  {
        match self {
            RepositoryStore::JsonFile => {GatewayPublisherVia::Logs},
            RepositoryStore::Memory => {GatewayPublisherVia::Memory},
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::repository::RepositoryStore;
    use crate::gateway::GatewayPublisherVia;

    #[tokio::test]
    async fn test_should_pick_publisher_for_store() {
        assert_eq!(GatewayPublisherVia::Logs, RepositoryStore::JsonFile.gateway_publisher());
        assert_eq!(GatewayPublisherVia::Memory, RepositoryStore::Memory.gateway_publisher());
    }
}
