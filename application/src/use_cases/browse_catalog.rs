//! Browse Catalog use case.
//!
//! Loads the food catalog once and then filters and pages it locally.

use crate::ports::chat_transport::GatewayError;
use crate::ports::nutrition_api::NutritionApi;
use nutrichat_domain::{CatalogQuery, Food, Page, Pagination};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

pub const DEFAULT_LOAD_FAILURE: &str = "Gagal memuat data makanan";

#[derive(Error, Debug)]
pub enum BrowseCatalogError {
    #[error("{message}")]
    LoadFailed {
        message: String,
        #[source]
        source: GatewayError,
    },
}

/// Loaded catalog plus the current query and page.
#[derive(Debug, Clone)]
pub struct FoodCatalog {
    foods: Vec<Food>,
    query: CatalogQuery,
    filtered: Vec<usize>,
    pagination: Pagination,
    current_page: usize,
}

impl FoodCatalog {
    pub fn new(foods: Vec<Food>, pagination: Pagination) -> Self {
        let mut catalog = Self {
            foods,
            query: CatalogQuery::default(),
            filtered: Vec::new(),
            pagination,
            current_page: 1,
        };
        catalog.refilter();
        catalog
    }

    pub fn foods(&self) -> &[Food] {
        &self.foods
    }

    pub fn query(&self) -> &CatalogQuery {
        &self.query
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    /// Change the query. Always goes back to the first page.
    pub fn set_query(&mut self, query: CatalogQuery) {
        self.query = query;
        self.refilter();
    }

    pub fn go_to(&mut self, page: usize) {
        let total = self.pagination.total_pages(self.filtered.len());
        self.current_page = page.clamp(1, total.max(1));
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Foods matching the query, in catalog order.
    pub fn filtered(&self) -> Vec<&Food> {
        self.filtered.iter().map(|&i| &self.foods[i]).collect()
    }

    /// Items of the current page.
    pub fn page(&self) -> CatalogPage<'_> {
        let matching = self.filtered();
        self.pagination.page(&matching, self.current_page).into()
    }

    fn refilter(&mut self) {
        self.filtered = self
            .foods
            .iter()
            .enumerate()
            .filter(|(_, food)| self.query.matches(food))
            .map(|(i, _)| i)
            .collect();
        self.current_page = 1;
    }
}

/// Owned view of one catalog page
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogPage<'a> {
    pub items: Vec<&'a Food>,
    pub offset: usize,
    pub page_range: Vec<usize>,
    pub current: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl<'a> From<Page<'_, &'a Food>> for CatalogPage<'a> {
    fn from(page: Page<'_, &'a Food>) -> Self {
        Self {
            items: page.items.to_vec(),
            offset: page.offset,
            page_range: page.page_range(),
            current: page.current,
            total_pages: page.total_pages,
            total_items: page.total_items,
        }
    }
}

pub struct BrowseCatalogUseCase {
    api: Arc<dyn NutritionApi>,
    pagination: Pagination,
}

impl BrowseCatalogUseCase {
    pub fn new(api: Arc<dyn NutritionApi>) -> Self {
        Self {
            api,
            pagination: Pagination::default(),
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.pagination = Pagination::new(page_size);
        self
    }

    pub async fn load(&self) -> Result<FoodCatalog, BrowseCatalogError> {
        let foods = self.api.foods().await.map_err(|e| {
            warn!("Error fetching foods: {}", e);
            let message = match &e {
                GatewayError::ServiceError(msg) if !msg.is_empty() => msg.clone(),
                _ => DEFAULT_LOAD_FAILURE.to_string(),
            };
            BrowseCatalogError::LoadFailed { message, source: e }
        })?;
        info!("Loaded {} foods", foods.len());
        Ok(FoodCatalog::new(foods, self.pagination))
    }
}
