use crate::framework::{Fields, Removable, StoreEntity};
use crate::model::text;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A registered shopper. Customers sign up elsewhere; the console only lists and deletes them.
///
/// The password is stored as-is by the sign-up flow. It is decoded so the record round-trips
/// but never printed: `Debug` redacts it.
#[derive(Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Customer {
    #[serde(deserialize_with = "text")]
    pub name: String,
    #[serde(deserialize_with = "text")]
    pub email: String,
    #[serde(deserialize_with = "text")]
    pub address: String,
    #[serde(deserialize_with = "text")]
    pub password: String,
}

impl fmt::Debug for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Customer")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("address", &self.address)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl StoreEntity for Customer {
    const COLLECTION: &'static str = "Customer";
    const LABEL: &'static str = "Customer";
    const PLURAL: &'static str = "customers";
}

impl Removable for Customer {}

impl Customer {
    /// Attributes for seeding a customer document directly through the store.
    pub fn to_fields(&self, id: &str) -> Fields {
        let mut fields = Fields::new();
        fields.insert("id".into(), id.into());
        fields.insert("name".into(), self.name.clone().into());
        fields.insert("email".into(), self.email.clone().into());
        fields.insert("address".into(), self.address.clone().into());
        fields.insert("password".into(), self.password.clone().into());
        fields
    }
}
