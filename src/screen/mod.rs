//! Screen controllers: the per-screen state machines the shell switches between.
//!
//! - [`Screen`] - generic controller (Category and Customer screens use it directly)
//! - [`ProductScreen`] - products plus category options
//! - [`OrderScreen`] - orders joined with customer names

pub mod controller;
pub mod orders;
pub mod products;
pub mod state;

pub use controller::Screen;
pub use orders::{CustomerDirectory, OrderRow, OrderScreen};
pub use products::{CategoryOption, ProductScreen};
pub use state::{Notice, NoticeKind, Phase, ScreenState};

use crate::model::{Category, Customer};

pub type CategoryScreen = Screen<Category>;
pub type CustomerScreen = Screen<Customer>;
