use tracing::{debug, info, instrument};

use crate::actor_framework::{Entity, ResourceClient};
use crate::domain::Product;
use crate::product_actor::ProductError;

/// Client for interacting with the Product actor.
///
/// Cheap to clone; every clone feeds the same actor, which is what lets the
/// HTTP layer share one store across all request tasks.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, ProductError> {
        debug!("Sending request");
        self.inner
            .list()
            .await
            .map_err(|e| ProductError::ActorCommunicationError(e.to_string()))
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: u64) -> Result<Product, ProductError> {
        debug!("Sending request");
        match self.inner.get(id).await {
            Ok(Some(product)) => Ok(product),
            Ok(None) => Err(ProductError::NotFound(id)),
            Err(e) => Err(ProductError::from_framework(id, e)),
        }
    }

    /// Stores a new product. Any `id` on the input is ignored.
    #[instrument(fields(title = %product.title), skip(self, product))]
    pub async fn create_product(&self, product: Product) -> Result<Product, ProductError> {
        debug!("Sending request");
        let requested = *product.id();
        let created = self
            .inner
            .create(product)
            .await
            .map_err(|e| ProductError::from_framework(requested, e))?;
        info!(product_id = created.id, "Product created");
        Ok(created)
    }

    /// Replaces the whole record; the stored id is always `id`.
    #[instrument(fields(title = %product.title), skip(self, product))]
    pub async fn replace_product(&self, id: u64, product: Product) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner
            .replace(id, product)
            .await
            .map_err(|e| ProductError::from_framework(id, e))
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: u64) -> Result<(), ProductError> {
        debug!("Sending request");
        self.inner
            .delete(id)
            .await
            .map_err(|e| ProductError::from_framework(id, e))
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), ProductError> {
        self.inner
            .shutdown()
            .await
            .map_err(|e| ProductError::ActorCommunicationError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor_framework::FrameworkError;
    use crate::mock_framework::{create_mock_client, expect_create, expect_get, expect_replace};

    #[tokio::test]
    async fn test_get_missing_maps_to_not_found() {
        let (inner, mut receiver) = create_mock_client::<Product>(4);
        let client = ProductClient::new(inner);

        let task = tokio::spawn(async move { client.get_product(9).await });

        let (id, responder) = expect_get(&mut receiver).await.expect("Expected Get request");
        assert_eq!(id, 9);
        responder.send(Ok(None)).unwrap();

        assert_eq!(task.await.unwrap(), Err(ProductError::NotFound(9)));
    }

    #[tokio::test]
    async fn test_create_surfaces_validation_error() {
        let (inner, mut receiver) = create_mock_client::<Product>(4);
        let client = ProductClient::new(inner);

        let task = tokio::spawn(async move { client.create_product(Product::new("", 1.0)).await });

        let (item, responder) = expect_create(&mut receiver).await.expect("Expected Create request");
        assert_eq!(item.title, "");
        responder
            .send(Err(FrameworkError::Validation("Product title cannot be empty".to_string())))
            .unwrap();

        assert_eq!(
            task.await.unwrap(),
            Err(ProductError::ValidationError("Product title cannot be empty".to_string()))
        );
    }

    #[tokio::test]
    async fn test_replace_sends_path_id() {
        let (inner, mut receiver) = create_mock_client::<Product>(4);
        let client = ProductClient::new(inner);

        let task = tokio::spawn(async move {
            let mut body = Product::new("Chair", 30.0);
            body.id = 77;
            client.replace_product(5, body).await
        });

        let (id, item, responder) = expect_replace(&mut receiver).await.expect("Expected Replace request");
        assert_eq!(id, 5);
        responder
            .send(Err(FrameworkError::NotFound(id.to_string())))
            .unwrap();
        assert_eq!(item.title, "Chair");

        assert_eq!(task.await.unwrap(), Err(ProductError::NotFound(5)));
    }

    #[tokio::test]
    async fn test_dropped_actor_is_communication_error() {
        let (inner, receiver) = create_mock_client::<Product>(4);
        let client = ProductClient::new(inner);
        drop(receiver);

        let err = client.list_products().await.unwrap_err();
        assert_eq!(err, ProductError::ActorCommunicationError("Actor closed".to_string()));
    }
}
