use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{error, info, instrument};

use crate::actor_framework::ResourceActor;
use crate::clients::ProductClient;
use crate::config::ServiceConfig;
use crate::domain::Product;
use crate::product_actor::ProductError;

/// Owns the product store actor for the lifetime of the process.
///
/// Responsible for starting the actor, seeding it, handing out the client,
/// and shutting it down.
pub struct ProductSystem {
    pub product_client: ProductClient,
    handle: tokio::task::JoinHandle<()>,
}

impl ProductSystem {
    /// Spawns a fresh, empty store.
    #[instrument(name = "product_system")]
    pub fn new(buffer_size: usize) -> Self {
        // Ids start at 1 and are never handed out twice, even after deletes.
        let product_id_counter = AtomicU64::new(1);
        let next_product_id = move || product_id_counter.fetch_add(1, Ordering::SeqCst);

        let (product_actor, product_resource_client) =
            ResourceActor::<Product>::new(buffer_size, next_product_id);
        let product_client = ProductClient::new(product_resource_client);
        let handle = tokio::spawn(product_actor.run());

        info!("Product store started");
        Self {
            product_client,
            handle,
        }
    }

    /// Spawns the store as configured and loads the seed catalog unless
    /// seeding is turned off.
    pub async fn start(config: &ServiceConfig) -> Result<Self, ProductError> {
        let system = Self::new(config.buffer_size);
        if !config.no_seed {
            system.seed(Product::seed_catalog()).await?;
        }
        Ok(system)
    }

    /// Loads records through the regular create path, so they get ids in order.
    #[instrument(skip(self, products), fields(count = products.len()))]
    pub async fn seed(&self, products: Vec<Product>) -> Result<(), ProductError> {
        for product in products {
            self.product_client.create_product(product).await?;
        }
        info!("Catalog seeded");
        Ok(())
    }

    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down product store...");

        if let Err(e) = self.product_client.shutdown().await {
            // Already gone; the join below reports how it ended.
            error!(error = %e, "Shutdown request not delivered");
        }
        drop(self.product_client);

        if let Err(e) = self.handle.await {
            error!("Actor task failed: {:?}", e);
            return Err(format!("Actor task failed: {:?}", e));
        }

        info!("Product store shutdown complete.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_start_seeds_catalog_with_id_one() {
        let system = ProductSystem::start(&ServiceConfig::default()).await.unwrap();

        let products = system.product_client.list_products().await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, 1);
        assert_eq!(products[0].title, "iPhone 9");
        assert_eq!(products[0].brand, "PEARRRRRRRRRRRRRR");

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_no_seed_starts_empty() {
        let config = ServiceConfig {
            no_seed: true,
            ..ServiceConfig::default()
        };
        let system = ProductSystem::start(&config).await.unwrap();

        assert!(system.product_client.list_products().await.unwrap().is_empty());

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_shutdown_stops_outstanding_clients() {
        let system = ProductSystem::new(8);
        let leftover = system.product_client.clone();

        system.shutdown().await.unwrap();

        assert!(matches!(
            leftover.list_products().await,
            Err(ProductError::ActorCommunicationError(_))
        ));
    }
}
