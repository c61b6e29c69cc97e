//! Product screen: products plus the category picker.

use crate::framework::{AppId, ConsoleError, EntityAdapter, Record, RecordKey, SharedStore};
use crate::model::{Category, Product, ProductCreate, ProductUpdate};
use crate::screen::controller::Screen;
use crate::screen::state::Phase;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::warn;

/// An entry of the category dropdown on the product forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryOption {
    pub id: String,
    pub title: String,
}

impl From<&Record<Category>> for CategoryOption {
    fn from(record: &Record<Category>) -> Self {
        Self {
            id: record.app_id().to_string(),
            title: record.entity.title.clone(),
        }
    }
}

#[derive(Clone)]
pub struct ProductScreen {
    products: Screen<Product>,
    categories: EntityAdapter<Category>,
    options: Arc<Mutex<Vec<CategoryOption>>>,
}

impl ProductScreen {
    pub fn new(store: SharedStore) -> Self {
        Self {
            products: Screen::new(store.clone()),
            categories: EntityAdapter::new(store),
            options: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn products(&self) -> &Screen<Product> {
        &self.products
    }

    pub fn phase(&self) -> Phase {
        self.products.phase()
    }

    fn options(&self) -> MutexGuard<'_, Vec<CategoryOption>> {
        self.options.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fetches products and categories concurrently. A category failure leaves the picker as
    /// it was and does not fail the screen.
    pub async fn load(&self) -> Result<usize, ConsoleError> {
        let ticket = self.products.begin(Phase::Loading);
        let seq = self.products.issue_load();
        let (categories, products) =
            tokio::join!(self.categories.list(), self.products.adapter().list());

        match categories {
            Ok(records) if self.products.accepts(ticket, seq) => {
                *self.options() = records.iter().map(CategoryOption::from).collect();
            }
            Ok(_) => {}
            Err(e) => warn!(error = %e, "Category options unavailable"),
        }

        self.products.finish_load(ticket, seq, products)
    }

    /// Options for the category dropdown, in store order.
    pub fn category_options(&self) -> Vec<CategoryOption> {
        self.options().clone()
    }

    pub async fn create(&self, params: ProductCreate) -> Result<RecordKey, ConsoleError> {
        self.products.create(params).await
    }

    /// Resolves against the rows currently on screen.
    pub async fn update(
        &self,
        app_id: &AppId,
        update: ProductUpdate,
    ) -> Result<RecordKey, ConsoleError> {
        self.products.update(app_id, update).await
    }

    pub async fn delete(&self, app_id: &AppId) -> Result<RecordKey, ConsoleError> {
        self.products.delete(app_id).await
    }

    pub fn deactivate(&self) {
        self.products.deactivate();
        self.options().clear();
    }
}
