use async_trait::async_trait;
use std::marker::PhantomData;

use super::entities::{Entity, EntityId};
use super::grid::PageFetcher;
use super::request::{PaginatedRequest, PaginatedResponse};
use crate::api::ApiClient;
use crate::error::ClientError;

/// List/get/save/delete for one entity collection on the auth module
pub struct EntityService<E> {
    client: ApiClient,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for EntityService<E> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E: Entity> EntityService<E> {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            _entity: PhantomData,
        }
    }

    pub async fn paginate(&self, request: &PaginatedRequest) -> Result<PaginatedResponse<E>, ClientError> {
        tracing::debug!("Paginating {} with {:?}", E::KIND, request);
        let body = self
            .client
            .post_module(self.client.auth_module(), &E::KIND.paginate_endpoint(), request)
            .await?;
        PaginatedResponse::from_value(body, E::KIND.collection())
    }

    pub async fn get(&self, id: &EntityId) -> Result<E, ClientError> {
        let body = self
            .client
            .get_module(self.client.auth_module(), &E::KIND.item_endpoint(id))
            .await?;
        Ok(serde_json::from_value(body)?)
    }

    /// Create or update; the backend echoes the stored record
    pub async fn save(&self, entity: &E) -> Result<E, ClientError> {
        let endpoint = E::KIND.save_endpoint(entity.id());
        let body = self
            .client
            .post_module(self.client.auth_module(), &endpoint, entity)
            .await?;

        if body.is_null() {
            return Ok(entity.clone());
        }
        Ok(serde_json::from_value(body)?)
    }

    pub async fn delete(&self, id: &EntityId) -> Result<(), ClientError> {
        self.client
            .delete_module(self.client.auth_module(), &E::KIND.item_endpoint(id))
            .await?;
        Ok(())
    }
}

#[async_trait]
impl<E: Entity> PageFetcher<E> for EntityService<E> {
    async fn fetch_page(&self, request: &PaginatedRequest) -> Result<PaginatedResponse<E>, ClientError> {
        self.paginate(request).await
    }
}
