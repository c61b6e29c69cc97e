//! # Shop Admin Demo
//!
//! Starts the console over an in-process store, seeds the records the storefront would have
//! written (customers, orders), then walks every section:
//! 1.  Categories: add, reject a duplicate, edit.
//! 2.  Products: add one in the new category, edit it.
//! 3.  Customers: delete one.
//! 4.  Orders: show the customer join, change a status, reject an invalid one.

use serde_json::json;
use shop_admin::config::Config;
use shop_admin::framework::{AppId, Fields};
use shop_admin::lifecycle::{setup_tracing, AdminConsole};
use shop_admin::model::{CategoryCreate, CategoryUpdate, Customer, ProductCreate, ProductUpdate};
use shop_admin::shell::Section;
use tracing::{error, info, warn, Instrument};

fn fields(value: serde_json::Value) -> Fields {
    match value {
        serde_json::Value::Object(map) => map,
        _ => Fields::new(),
    }
}

async fn seed(console: &AdminConsole) -> Result<(), String> {
    let customers = [
        ("cust-1", "Ada Lovelace", "ada@example.com"),
        ("cust-2", "Grace Hopper", "grace@example.com"),
    ];
    for (id, name, email) in customers {
        let customer = Customer {
            name: name.to_string(),
            email: email.to_string(),
            address: "1 Analytical Way".to_string(),
            password: "changeme".to_string(),
        };
        console
            .store
            .insert("Customer", customer.to_fields(id))
            .await
            .map_err(|e| e.to_string())?;
    }

    let orders = [
        json!({ "id": "ORD-1001", "customerId": "cust-1", "productId": "",
                "orderDate": 1709251200000_i64, "quantity": 2, "status": 0, "totalPrice": 39.0 }),
        json!({ "id": "ORD-1002", "customerId": "cust-9", "productId": "",
                "orderDate": 1709337600000_i64, "quantity": 1, "status": 1, "totalPrice": 12.5 }),
    ];
    for order in orders {
        console
            .store
            .insert("Order", fields(order))
            .await
            .map_err(|e| e.to_string())?;
    }
    info!("Seeded customers and orders");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let config = Config::load(None).map_err(|e| e.to_string())?;
    setup_tracing(&config.log_filter);

    info!(section = %config.initial_section, "Starting admin console");
    let mut console = AdminConsole::start(&config);
    seed(&console).await?;

    // Categories
    let span = tracing::info_span!("categories");
    async {
        console
            .shell
            .open(Section::Category)
            .await
            .map_err(|e| e.to_string())?;
        let screen = console.shell.categories();

        let form = CategoryCreate {
            title: "Home  Decor".to_string(),
            description: "Lamps, rugs and frames".to_string(),
            position: Some(1),
        };
        let key = screen.create(form.clone()).await.map_err(|e| e.to_string())?;
        info!(app_id = %key.app, "Category added");

        if let Err(e) = screen.create(form).await {
            warn!(error = %e, "Duplicate category rejected");
        }

        let update = CategoryUpdate {
            description: Some("Everything for the living room".to_string()),
            ..Default::default()
        };
        screen.update(&key.app, update).await.map_err(|e| e.to_string())?;

        if let Err(e) = screen.delete(&AppId::from("garden")).await {
            warn!(error = %e, "Delete of unknown category reported");
        }
        Ok::<_, String>(())
    }
    .instrument(span)
    .await?;

    // Products
    let span = tracing::info_span!("products");
    async {
        console
            .shell
            .open(Section::Product)
            .await
            .map_err(|e| e.to_string())?;
        let screen = console.shell.products();
        let category_id = screen
            .category_options()
            .first()
            .map(|option| option.id.clone())
            .unwrap_or_default();

        let key = screen
            .create(ProductCreate {
                category_id,
                name: "Brass Lamp".to_string(),
                description: "Warm light".to_string(),
                image_url: "https://cdn.example.com/lamp.png".to_string(),
                price: Some(49.0),
                stock: Some(5),
                weight: Some(1.2),
                cost: None,
            })
            .await
            .map_err(|e| e.to_string())?;
        info!(app_id = %key.app, "Product added");

        let update = ProductUpdate {
            price: Some(44.0),
            ..Default::default()
        };
        screen.update(&key.app, update).await.map_err(|e| e.to_string())?;
        Ok::<_, String>(())
    }
    .instrument(span)
    .await?;

    // Customers
    console
        .shell
        .open(Section::Customer)
        .await
        .map_err(|e| e.to_string())?;
    match console.shell.customers().delete(&AppId::from("cust-2")).await {
        Ok(key) => info!(internal = %key.internal, "Customer deleted"),
        Err(e) => error!(error = %e, "Customer delete failed"),
    }

    // Orders
    let span = tracing::info_span!("orders");
    async {
        console
            .shell
            .open(Section::Order)
            .await
            .map_err(|e| e.to_string())?;
        let screen = console.shell.orders();
        for row in screen.rows() {
            info!(
                order = %row.app_id(),
                customer = %row.customer_name,
                date = %row.order_date(),
                status = %row.status_label(),
                "Order row"
            );
        }

        screen
            .set_status(&AppId::from("ORD-1001"), 2)
            .await
            .map_err(|e| e.to_string())?;
        if let Err(e) = screen.set_status(&AppId::from("ORD-1002"), 7).await {
            warn!(error = %e, "Invalid status rejected");
        }
        Ok::<_, String>(())
    }
    .instrument(span)
    .await?;

    console.shutdown().await?;
    info!("Demo completed successfully");
    Ok(())
}
