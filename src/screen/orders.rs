//! Order screen: orders joined with customer names.

use crate::framework::{
    AppId, ConsoleError, EntityAdapter, Record, RecordKey, SharedStore, StoreEntity,
};
use crate::model::{Customer, Order, OrderStatus, OrderUpdate};
use crate::screen::controller::Screen;
use crate::screen::state::Phase;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{info, warn};

/// Customer id to display name, built once per visit of the order screen.
///
/// Each customer is reachable under its application id and its internal document id, so
/// orders written against either resolve.
#[derive(Debug, Clone, Default)]
pub struct CustomerDirectory {
    names: HashMap<String, String>,
}

impl CustomerDirectory {
    pub fn from_records(records: &[Record<Customer>]) -> Self {
        let mut names = HashMap::with_capacity(records.len() * 2);
        for record in records {
            names.insert(record.key.internal.to_string(), record.entity.name.clone());
            names.insert(record.key.app.to_string(), record.entity.name.clone());
        }
        Self { names }
    }

    pub fn name_of(&self, customer_id: &str) -> Option<&str> {
        self.names.get(customer_id).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// One rendered row of the order table.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRow {
    pub record: Record<Order>,
    /// Empty when the order's customer is unknown.
    pub customer_name: String,
}

impl OrderRow {
    pub fn app_id(&self) -> &AppId {
        self.record.app_id()
    }

    /// `None` when the stored status is not one of the three known values.
    pub fn status(&self) -> Option<OrderStatus> {
        self.record.entity.status()
    }

    pub fn status_label(&self) -> String {
        self.record.entity.status_label()
    }

    pub fn order_date(&self) -> String {
        self.record.entity.order_date_label().unwrap_or_default()
    }
}

#[derive(Clone)]
pub struct OrderScreen {
    orders: Screen<Order>,
    customers: EntityAdapter<Customer>,
    directory: Arc<Mutex<CustomerDirectory>>,
}

impl OrderScreen {
    pub fn new(store: SharedStore) -> Self {
        Self {
            orders: Screen::new(store.clone()),
            customers: EntityAdapter::new(store),
            directory: Arc::new(Mutex::new(CustomerDirectory::default())),
        }
    }

    pub fn orders(&self) -> &Screen<Order> {
        &self.orders
    }

    pub fn phase(&self) -> Phase {
        self.orders.phase()
    }

    fn directory(&self) -> MutexGuard<'_, CustomerDirectory> {
        self.directory.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fetches customers and orders concurrently.
    ///
    /// A customer failure does not fail the screen: orders still load and keep whatever names
    /// were known before.
    pub async fn load(&self) -> Result<usize, ConsoleError> {
        let ticket = self.orders.begin(Phase::Loading);
        let seq = self.orders.issue_load();
        let (customers, orders) = tokio::join!(self.customers.list(), self.orders.adapter().list());

        match customers {
            Ok(records) if self.orders.accepts(ticket, seq) => {
                info!(size = records.len(), "Customer directory loaded");
                *self.directory() = CustomerDirectory::from_records(&records);
            }
            Ok(_) => {}
            Err(e) => {
                warn!(collection = Customer::COLLECTION, error = %e, "Customer lookup failed")
            }
        }

        self.orders.finish_load(ticket, seq, orders)
    }

    /// Orders in store order, each annotated with its customer's name.
    pub fn rows(&self) -> Vec<OrderRow> {
        let records = self.orders.records();
        let directory = self.directory();
        records
            .into_iter()
            .map(|record| {
                let customer_name = directory
                    .name_of(&record.entity.customer_id)
                    .unwrap_or_default()
                    .to_string();
                OrderRow {
                    record,
                    customer_name,
                }
            })
            .collect()
    }

    pub fn customer_name(&self, customer_id: &str) -> String {
        self.directory()
            .name_of(customer_id)
            .unwrap_or_default()
            .to_string()
    }

    /// Applies the status selector value. Anything outside {0, 1, 2} is rejected before the
    /// store is contacted.
    pub async fn set_status(&self, app_id: &AppId, status: i64) -> Result<RecordKey, ConsoleError> {
        self.orders.update(app_id, OrderUpdate { status }).await
    }

    pub fn deactivate(&self) {
        self.orders.deactivate();
        *self.directory() = CustomerDirectory::default();
    }
}
