use serde_json::json;
use shop_admin::config::Config;
use shop_admin::framework::{AppId, ConsoleError, DocumentStore, Fields};
use shop_admin::lifecycle::AdminConsole;
use shop_admin::model::{
    CategoryCreate, CategoryUpdate, Customer, Lenient, OrderStatus, ProductCreate, ProductUpdate,
};
use shop_admin::screen::Phase;
use shop_admin::shell::Section;

fn fields(value: serde_json::Value) -> Fields {
    value.as_object().cloned().expect("object")
}

fn category(title: &str) -> CategoryCreate {
    CategoryCreate {
        title: title.to_string(),
        description: "Things".to_string(),
        position: Some(1),
    }
}

/// Full end-to-end test of the category screen against the real store actor.
#[tokio::test]
async fn test_category_lifecycle() {
    let mut console = AdminConsole::start(&Config::default());
    console.shell.open(Section::Category).await.unwrap();
    let screen = console.shell.categories().clone();
    assert!(screen.records().is_empty());

    let key = screen.create(category("Home  Decor")).await.unwrap();
    assert_eq!(key.app.as_str(), "home-decor");
    assert_eq!(screen.records().len(), 1);
    assert_eq!(screen.phase(), Phase::Loaded);

    let update = CategoryUpdate {
        position: Some(5),
        ..Default::default()
    };
    screen.update(&key.app, update).await.unwrap();
    let record = screen.find(&key.app).expect("Category reloaded");
    assert_eq!(record.entity.position, Some(Lenient::Value(5)));
    assert_eq!(record.key.internal, key.internal);

    screen.delete(&key.app).await.unwrap();
    assert!(screen.records().is_empty());

    drop(screen);
    console.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_category_slug_collision_rejected() {
    let mut console = AdminConsole::start(&Config::default());
    console.shell.open(Section::Category).await.unwrap();
    let screen = console.shell.categories();

    screen.create(category("Garden Tools")).await.unwrap();
    let err = screen.create(category("garden   tools")).await.unwrap_err();
    assert!(matches!(err, ConsoleError::Conflict { .. }));

    let docs = console.store.list_all("Category").await.unwrap();
    assert_eq!(docs.len(), 1);
}

#[tokio::test]
async fn test_unknown_ids_never_write() {
    let mut console = AdminConsole::start(&Config::default());
    console.shell.open(Section::Category).await.unwrap();
    let screen = console.shell.categories();
    screen.create(category("Shoes")).await.unwrap();
    let before = console.store.list_all("Category").await.unwrap();

    let update = CategoryUpdate {
        title: Some("Boots".into()),
        ..Default::default()
    };
    let err = screen.update(&AppId::from("boots"), update).await.unwrap_err();
    assert!(err.is_not_found());
    let err = screen.delete(&AppId::from("boots")).await.unwrap_err();
    assert!(err.is_not_found());

    assert_eq!(console.store.list_all("Category").await.unwrap(), before);
    assert_eq!(screen.records().len(), 1);
}

#[tokio::test]
async fn test_product_resolves_against_loaded_rows() {
    let mut console = AdminConsole::start(&Config::default());
    console.shell.open(Section::Category).await.unwrap();
    console
        .shell
        .categories()
        .create(category("Mugs"))
        .await
        .unwrap();

    console.shell.open(Section::Product).await.unwrap();
    let screen = console.shell.products();
    assert_eq!(screen.category_options()[0].id, "mugs");

    let key = screen
        .create(ProductCreate {
            category_id: "mugs".into(),
            name: "Blue Mug".into(),
            description: "Ceramic".into(),
            image_url: "https://img/mug.png".into(),
            price: Some(9.5),
            stock: Some(3),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(key.app.as_str(), key.internal.as_str());

    let update = ProductUpdate {
        stock: Some(10),
        ..Default::default()
    };
    screen.update(&key.app, update).await.unwrap();
    let product = screen.products().find(&key.app).unwrap();
    assert_eq!(product.entity.stock, Some(Lenient::Value(10)));
    assert_eq!(product.entity.name, "Blue Mug");

    screen.delete(&key.app).await.unwrap();
    assert!(screen.products().records().is_empty());

    // The row is gone from the snapshot, so a second delete never reaches the store.
    let err = screen.delete(&key.app).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_customer_delete_by_stored_id() {
    let mut console = AdminConsole::start(&Config::default());
    let ann = Customer {
        name: "Ann".into(),
        ..Default::default()
    };
    console
        .store
        .insert("Customer", ann.to_fields("cust-1"))
        .await
        .unwrap();

    console.shell.open(Section::Customer).await.unwrap();
    let screen = console.shell.customers();
    assert_eq!(screen.records()[0].app_id().as_str(), "cust-1");

    screen.delete(&AppId::from("cust-1")).await.unwrap();
    assert!(screen.records().is_empty());
    assert!(screen
        .delete(&AppId::from("cust-1"))
        .await
        .unwrap_err()
        .is_not_found());
}

#[tokio::test]
async fn test_order_join_and_status() {
    let mut console = AdminConsole::start(&Config::default());
    let ann = Customer {
        name: "Ann".into(),
        ..Default::default()
    };
    console
        .store
        .insert("Customer", ann.to_fields("cust-1"))
        .await
        .unwrap();
    for (id, customer) in [("ORD-1", "cust-1"), ("ORD-2", "cust-404")] {
        console
            .store
            .insert(
                "Order",
                fields(json!({
                    "id": id,
                    "customerId": customer,
                    "status": 0,
                    "orderDate": 1709251200000_i64
                })),
            )
            .await
            .unwrap();
    }

    console.shell.open(Section::Order).await.unwrap();
    let screen = console.shell.orders();
    let rows = screen.rows();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].customer_name, "Ann");
    assert_eq!(rows[0].order_date(), "2024-03-01");
    assert_eq!(rows[1].customer_name, "");

    screen.set_status(&AppId::from("ORD-1"), 2).await.unwrap();
    assert_eq!(screen.rows()[0].status(), Some(OrderStatus::Delivered));

    let err = screen.set_status(&AppId::from("ORD-2"), 7).await.unwrap_err();
    assert!(matches!(err, ConsoleError::Validation(_)));
    let stored = console
        .store
        .find_where("Order", "id", json!("ORD-2"))
        .await
        .unwrap();
    assert_eq!(stored[0].fields["status"], json!(0));

    let err = screen.set_status(&AppId::from("ORD-404"), 1).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_concurrent_update_and_delete() {
    let mut console = AdminConsole::start(&Config::default());
    console.shell.open(Section::Category).await.unwrap();
    let screen = console.shell.categories().clone();
    let key = screen.create(category("Hats")).await.unwrap();

    let updating = screen.clone();
    let app = key.app.clone();
    let update = tokio::spawn(async move {
        let update = CategoryUpdate {
            description: Some("Caps".into()),
            ..Default::default()
        };
        updating.update(&app, update).await
    });
    let deleting = screen.clone();
    let app = key.app.clone();
    let delete = tokio::spawn(async move { deleting.delete(&app).await });

    let deleted = delete.await.unwrap();
    let updated = update.await.unwrap();
    assert!(deleted.is_ok());
    match updated {
        Ok(_) => {}
        Err(e) => assert!(e.is_not_found(), "unexpected error {e}"),
    }

    // Whatever the interleaving, the document is gone and was never recreated.
    assert!(console.store.list_all("Category").await.unwrap().is_empty());
}

/// Documents written by older screens with free-text numbers stay visible and removable.
#[tokio::test]
async fn test_free_text_numbers_stay_visible() {
    let mut console = AdminConsole::start(&Config::default());
    console
        .store
        .insert(
            "Category",
            fields(json!({ "id": "hats", "title": "Hats", "position": "first" })),
        )
        .await
        .unwrap();
    let internal = console
        .store
        .insert(
            "Product",
            fields(json!({ "categoryId": "hats", "name": "Cap", "price": 5, "stock": "2.5" })),
        )
        .await
        .unwrap();

    console.shell.open(Section::Category).await.unwrap();
    let categories = console.shell.categories().records();
    assert_eq!(categories.len(), 1);
    assert_eq!(
        categories[0].entity.position,
        Some(Lenient::Raw("first".into()))
    );

    console.shell.open(Section::Product).await.unwrap();
    let screen = console.shell.products();
    let stored = console.store.list_all("Product").await.unwrap();
    let visible = screen.products().records();
    assert_eq!(visible.len(), stored.len());
    assert_eq!(visible[0].entity.stock, Some(Lenient::Raw("2.5".into())));

    // The row is in the snapshot, so it can be fixed and deleted.
    let app = visible[0].app_id().clone();
    assert_eq!(app.as_str(), internal.as_str());
    let update = ProductUpdate {
        stock: Some(2),
        ..Default::default()
    };
    screen.update(&app, update).await.unwrap();
    let fixed = screen.products().find(&app).unwrap();
    assert_eq!(fixed.entity.stock, Some(Lenient::Value(2)));

    screen.delete(&app).await.unwrap();
    assert!(console.store.list_all("Product").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_shutdown_completes() {
    let mut console = AdminConsole::start(&Config::default());
    console.shell.open(Section::Order).await.unwrap();
    console.shutdown().await.unwrap();
}
