use std::sync::Arc;

use api_types::gasto::{Gasto, GastoId};
use async_trait::async_trait;

use crate::error::ApiError;

/// Backend operations the list controller depends on.
#[async_trait]
pub trait GastosApi: Send + Sync {
    /// Fetch every record, in backend order.
    async fn list(&self) -> Result<Vec<Gasto>, ApiError>;
    async fn delete(&self, id: GastoId) -> Result<(), ApiError>;
    async fn delete_all(&self) -> Result<(), ApiError>;
    /// Persist an edited record and return what the backend stored.
    async fn update(&self, gasto: &Gasto) -> Result<Gasto, ApiError>;
}

#[async_trait]
impl<T: GastosApi + ?Sized> GastosApi for Arc<T> {
    async fn list(&self) -> Result<Vec<Gasto>, ApiError> {
        (**self).list().await
    }

    async fn delete(&self, id: GastoId) -> Result<(), ApiError> {
        (**self).delete(id).await
    }

    async fn delete_all(&self) -> Result<(), ApiError> {
        (**self).delete_all().await
    }

    async fn update(&self, gasto: &Gasto) -> Result<Gasto, ApiError> {
        (**self).update(gasto).await
    }
}
