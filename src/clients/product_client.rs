//! # Product Client
//!
//! Provides a high-level API for interacting with the `Product` actor.
//! It wraps a `ResourceClient<Product>` and exposes catalog administration,
//! catalog search and the stock operations used by orders.
use crate::clients::actor_client::ActorClient;
use crate::clients::DEFAULT_PAGE_SIZE;
use crate::framework::{FrameworkError, ResourceClient};
use crate::model::{Product, ProductCreate, ProductId, ProductUpdate, Requester, Reservation};
use crate::product_actor::{CatalogPage, ProductAction, ProductActionResult, ProductError, ProductQuery};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Product actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
    page_size: usize,
}

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self {
            inner,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Page size used by [`ProductClient::search`] when the query asks for 0.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }
}

#[async_trait]
impl ActorClient<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &ResourceClient<Product> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => ProductError::NotFound(id),
            other => other
                .into_entity_error::<ProductError>()
                .unwrap_or_else(|e| ProductError::ActorCommunicationError(e.to_string())),
        }
    }
}

fn ensure_staff(requester: &Requester) -> Result<(), ProductError> {
    if requester.is_staff() {
        Ok(())
    } else {
        Err(ProductError::Forbidden)
    }
}

impl ProductClient {
    // --- Catalog administration (staff only) ---

    #[instrument(skip(self))]
    pub async fn create_product(
        &self,
        requester: &Requester,
        params: ProductCreate,
    ) -> Result<Product, ProductError> {
        ensure_staff(requester)?;
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        requester: &Requester,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ProductError> {
        ensure_staff(requester)?;
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Remove a product. Refused with [`ProductError::InUse`] while orders hold units of it.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, requester: &Requester, id: ProductId) -> Result<(), ProductError> {
        ensure_staff(requester)?;
        self.delete(id, ()).await
    }

    // --- Catalog queries ---

    /// Single product lookup; a missing product is an error rather than `None`.
    #[instrument(skip(self))]
    pub async fn product(&self, id: ProductId) -> Result<Product, ProductError> {
        self.get(id)
            .await?
            .ok_or_else(|| ProductError::NotFound(id.to_string()))
    }

    /// Filtered, name-sorted, paginated listing.
    #[instrument(skip(self))]
    pub async fn search(&self, query: ProductQuery) -> Result<CatalogPage, ProductError> {
        let products = self.list().await?;
        Ok(query.run(products, self.page_size))
    }

    /// Check the current stock level for a product.
    ///
    /// Returns the quantity available.
    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: ProductId) -> Result<u32, ProductError> {
        debug!("Checking stock for product {}", id);
        match self
            .inner
            .perform_action(id, ProductAction::CheckStock)
            .await
            .map_err(Self::map_error)?
        {
            ProductActionResult::CheckStock(level) => Ok(level),
            other => Err(unexpected(other)),
        }
    }

    // --- Stock movements used by orders ---

    /// Reserve stock for a product and snapshot its price.
    #[instrument(skip(self))]
    pub async fn reserve(&self, id: ProductId, quantity: u32) -> Result<Reservation, ProductError> {
        debug!("Reserving {} units for product {}", quantity, id);
        match self
            .inner
            .perform_action(id, ProductAction::Reserve(quantity))
            .await
            .map_err(Self::map_error)?
        {
            ProductActionResult::Reserved(reservation) => Ok(reservation),
            other => Err(unexpected(other)),
        }
    }

    /// Return previously reserved units to stock. Yields the new stock level.
    #[instrument(skip(self))]
    pub async fn release(&self, id: ProductId, quantity: u32) -> Result<u32, ProductError> {
        debug!("Releasing {} units for product {}", quantity, id);
        match self
            .inner
            .perform_action(id, ProductAction::Release(quantity))
            .await
            .map_err(Self::map_error)?
        {
            ProductActionResult::Released { stock } => Ok(stock),
            other => Err(unexpected(other)),
        }
    }

    /// Release one reservation and take another in a single all-or-nothing request.
    ///
    /// The new reservation is checked against the stock left after the release,
    /// so revising an order to a larger quantity of the same product only needs
    /// the difference to be available. On failure neither product changes.
    #[instrument(skip(self))]
    pub async fn swap_reservation(
        &self,
        released: ProductId,
        released_quantity: u32,
        reserved: ProductId,
        reserved_quantity: u32,
    ) -> Result<Reservation, ProductError> {
        let results = self
            .inner
            .perform_batch(vec![
                (released, ProductAction::Release(released_quantity)),
                (reserved, ProductAction::Reserve(reserved_quantity)),
            ])
            .await
            .map_err(Self::map_error)?;

        match results.into_iter().last() {
            Some(ProductActionResult::Reserved(reservation)) => Ok(reservation),
            Some(other) => Err(unexpected(other)),
            None => Err(ProductError::ActorCommunicationError(
                "empty batch result".to_string(),
            )),
        }
    }
}

fn unexpected(result: ProductActionResult) -> ProductError {
    ProductError::ActorCommunicationError(format!("unexpected action result: {result:?}"))
}
