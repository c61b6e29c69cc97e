//! # Navigation Shell
//!
//! Owns one controller per screen and tracks which one is active. Switching sections
//! deactivates the screen being left, so nothing it still has in flight can land on it,
//! then loads the new one.

use crate::framework::{ConsoleError, SharedStore};
use crate::screen::{CategoryScreen, CustomerScreen, OrderScreen, Phase, ProductScreen, Screen};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use tracing::info;

/// The sections of the console, in sidebar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
pub enum Section {
    #[default]
    #[serde(alias = "category")]
    Category,
    #[serde(alias = "product")]
    Product,
    #[serde(alias = "customer")]
    Customer,
    #[serde(alias = "order")]
    Order,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Category,
        Section::Product,
        Section::Customer,
        Section::Order,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Section::Category => "Category",
            Section::Product => "Product",
            Section::Customer => "Customer",
            Section::Order => "Order",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .into_iter()
            .find(|section| section.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown section '{}'", s))
    }
}

pub struct Shell {
    active: Section,
    categories: CategoryScreen,
    products: ProductScreen,
    customers: CustomerScreen,
    orders: OrderScreen,
}

impl Shell {
    /// Builds every screen over `store`. Nothing is fetched until [`Shell::open`].
    pub fn new(store: SharedStore, initial: Section) -> Self {
        Self {
            active: initial,
            categories: Screen::new(store.clone()),
            products: ProductScreen::new(store.clone()),
            customers: Screen::new(store.clone()),
            orders: OrderScreen::new(store),
        }
    }

    pub fn active(&self) -> Section {
        self.active
    }

    /// Makes `section` the active screen and loads it. Reopening the active section reloads it.
    pub async fn open(&mut self, section: Section) -> Result<usize, ConsoleError> {
        if section != self.active {
            info!(from = %self.active, to = %section, "Switching section");
            self.deactivate(self.active);
            self.active = section;
        }
        match section {
            Section::Category => self.categories.load().await,
            Section::Product => self.products.load().await,
            Section::Customer => self.customers.load().await,
            Section::Order => self.orders.load().await,
        }
    }

    fn deactivate(&self, section: Section) {
        match section {
            Section::Category => self.categories.deactivate(),
            Section::Product => self.products.deactivate(),
            Section::Customer => self.customers.deactivate(),
            Section::Order => self.orders.deactivate(),
        }
    }

    /// Phase of the active screen.
    pub fn phase(&self) -> Phase {
        match self.active {
            Section::Category => self.categories.phase(),
            Section::Product => self.products.phase(),
            Section::Customer => self.customers.phase(),
            Section::Order => self.orders.phase(),
        }
    }

    pub fn categories(&self) -> &CategoryScreen {
        &self.categories
    }

    pub fn products(&self) -> &ProductScreen {
        &self.products
    }

    pub fn customers(&self) -> &CustomerScreen {
        &self.customers
    }

    pub fn orders(&self) -> &OrderScreen {
        &self.orders
    }
}
