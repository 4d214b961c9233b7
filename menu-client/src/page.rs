use menu_catalog::{Catalog, Drink, DrinkDraft, DrinkId, builtin_catalog};

use crate::{CatalogClient, CatalogError, Transport};

/// What to do when the initial list fetch fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FallbackPolicy {
    /// Surface the error.
    #[default]
    Strict,
    /// Show the built-in static menu and remember why.
    BuiltIn,
}

#[derive(Debug)]
pub enum CatalogSource {
    Live,
    Fallback { reason: CatalogError },
}

/// The drinks of the page currently on screen.
///
/// A read-through cache scoped to one page view: reads fall back to the API on a miss, writes
/// go to the API first and only then patch the cached catalog. Nothing is ever written back
/// later or persisted.
#[derive(Debug)]
pub struct MenuPage {
    catalog: Catalog,
    source: CatalogSource,
}

impl MenuPage {
    pub fn from_drinks(drinks: Vec<Drink>) -> Self {
        Self {
            catalog: Catalog::from_drinks(drinks),
            source: CatalogSource::Live,
        }
    }

    /// Fetches the menu once.
    pub async fn load<T: Transport>(
        client: &CatalogClient<T>,
        policy: FallbackPolicy,
    ) -> Result<Self, CatalogError> {
        match client.list().await {
            Ok(drinks) => {
                tracing::debug!(count = drinks.len(), "loaded menu");
                Ok(Self::from_drinks(drinks))
            }
            Err(reason) if policy == FallbackPolicy::BuiltIn => {
                tracing::warn!(error = %reason, "menu unavailable, showing built-in fallback");
                Ok(Self {
                    catalog: Catalog::from_drinks(builtin_catalog()),
                    source: CatalogSource::Fallback { reason },
                })
            }
            Err(reason) => Err(reason),
        }
    }

    /// Refetches the list. On failure the cached catalog is left untouched.
    pub async fn reload<T: Transport>(
        &mut self,
        client: &CatalogClient<T>,
    ) -> Result<(), CatalogError> {
        let drinks = client.list().await?;
        self.catalog.replace(drinks);
        self.source = CatalogSource::Live;
        Ok(())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn source(&self) -> &CatalogSource {
        &self.source
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.source, CatalogSource::Fallback { .. })
    }

    /// The cached drink, fetching and caching it on a miss.
    pub async fn drink_or_fetch<T: Transport>(
        &mut self,
        client: &CatalogClient<T>,
        id: &DrinkId,
    ) -> Result<&Drink, CatalogError> {
        if self.catalog.drink(id).is_none() {
            let drink = client.get(id).await?;
            self.catalog.upsert(drink);
        }
        self.catalog
            .drink(id)
            .ok_or_else(|| CatalogError::NotFound { id: id.clone() })
    }

    pub async fn create<T: Transport>(
        &mut self,
        client: &CatalogClient<T>,
        draft: &DrinkDraft,
    ) -> Result<DrinkId, CatalogError> {
        let drink = client.create(draft).await?;
        let id = drink.id.clone();
        self.catalog.upsert(drink);
        Ok(id)
    }

    pub async fn update<T: Transport>(
        &mut self,
        client: &CatalogClient<T>,
        id: &DrinkId,
        draft: &DrinkDraft,
    ) -> Result<(), CatalogError> {
        let drink = client.update(id, draft).await?;
        self.catalog.upsert(drink);
        Ok(())
    }

    /// Deletes through the API. A `NotFound` answer also evicts the stale cached entry.
    pub async fn delete<T: Transport>(
        &mut self,
        client: &CatalogClient<T>,
        id: &DrinkId,
    ) -> Result<(), CatalogError> {
        match client.delete(id).await {
            Ok(()) => {
                self.catalog.remove(id);
                Ok(())
            }
            Err(e) => {
                if e.is_not_found() {
                    self.catalog.remove(id);
                }
                Err(e)
            }
        }
    }
}
