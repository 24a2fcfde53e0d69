//! Product catalog and inventory.
//!
//! ## Ownership
//! Every mutation loads the product (or names the restaurant, for adds)
//! and checks the caller against the owning restaurant before writing.
//!
//! ## Stock
//! ```text
//! IncrementStock(p, n) ──► UPDATE ... SET stock = stock + n
//! DecrementStock(p, n) ──► UPDATE ... SET stock = stock - n WHERE stock >= n
//!                               │
//!                               ├── applied      ──► Ok
//!                               └── not applied  ──► InsufficientStock
//! ```
//! There is no separate "read stock, then write" step, so concurrent
//! decrements cannot oversell.

use std::sync::Arc;

use restaurant_core::validation::{
    validate_new_product, validate_product_update, validate_stock_amount,
};
use restaurant_core::{
    authorize, AuthenticatedCaller, CoreError, CoreResult, NewProduct, Product, ProductUpdate,
    RestaurantStore,
};
use tracing::{info, warn};

/// Product & inventory component.
pub struct CatalogService {
    store: Arc<dyn RestaurantStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn RestaurantStore>) -> Self {
        CatalogService { store }
    }

    // -------------------------------------------------------------------------
    // Catalog mutations
    // -------------------------------------------------------------------------

    /// Adds a product to the caller's own restaurant and returns its ID.
    pub async fn add_product(&self, caller: &AuthenticatedCaller, draft: NewProduct) -> CoreResult<String> {
        self.check_owner(caller, &draft.restaurant_id, "add")?;
        validate_new_product(&draft)?;

        // The products table has no foreign key; the owner must exist now
        self.store.restaurant_by_id(&draft.restaurant_id).await?;

        let product = Product::from_draft(draft);
        self.store.create_product(&product).await?;

        info!(
            product_id = %product.id,
            restaurant_id = %product.restaurant_id,
            stock = product.stock,
            "Product added"
        );
        Ok(product.id)
    }

    /// Overwrites name, description, price and category.
    pub async fn edit_product(
        &self,
        caller: &AuthenticatedCaller,
        product_id: &str,
        update: ProductUpdate,
    ) -> CoreResult<()> {
        let mut product = self.store.product_by_id(product_id).await?;
        self.check_owner(caller, &product.restaurant_id, "edit")?;
        validate_product_update(&update)?;

        product.apply_update(update);
        self.store.update_product(&product).await?;

        info!(product_id = %product_id, "Product updated");
        Ok(())
    }

    /// Hard-deletes a product.
    pub async fn delete_product(&self, caller: &AuthenticatedCaller, product_id: &str) -> CoreResult<()> {
        let product = self.store.product_by_id(product_id).await?;
        self.check_owner(caller, &product.restaurant_id, "delete")?;

        self.store.delete_product(product_id).await?;

        info!(product_id = %product_id, "Product deleted");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Stock
    // -------------------------------------------------------------------------

    pub async fn increment_stock(
        &self,
        caller: &AuthenticatedCaller,
        product_id: &str,
        amount: i64,
    ) -> CoreResult<()> {
        validate_stock_amount("amount", amount)?;
        let owner = self.owning_restaurant_id(product_id).await?;
        self.check_owner(caller, &owner, "restock")?;

        self.store.adjust_stock(product_id, amount).await?;

        info!(product_id = %product_id, amount = amount, "Stock incremented");
        Ok(())
    }

    pub async fn decrement_stock(
        &self,
        caller: &AuthenticatedCaller,
        product_id: &str,
        amount: i64,
    ) -> CoreResult<()> {
        validate_stock_amount("amount", amount)?;
        let owner = self.owning_restaurant_id(product_id).await?;
        self.check_owner(caller, &owner, "destock")?;

        if !self.store.try_decrement_stock(product_id, amount).await? {
            warn!(product_id = %product_id, requested = amount, "Insufficient stock");
            return Err(CoreError::InsufficientStock {
                product_id: product_id.to_string(),
                requested: amount,
            });
        }

        info!(product_id = %product_id, amount = amount, "Stock decremented");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    pub async fn get_stock(&self, product_id: &str) -> CoreResult<i64> {
        Ok(self.store.stock(product_id).await?)
    }

    pub async fn get_product(&self, product_id: &str) -> CoreResult<Product> {
        Ok(self.store.product_by_id(product_id).await?)
    }

    /// Products of one restaurant. Unknown restaurants have none.
    pub async fn list_by_restaurant(&self, restaurant_id: &str) -> CoreResult<Vec<Product>> {
        Ok(self.store.products_by_restaurant(restaurant_id).await?)
    }

    pub async fn list_all(&self) -> CoreResult<Vec<Product>> {
        Ok(self.store.list_products().await?)
    }

    pub async fn owning_restaurant_id(&self, product_id: &str) -> CoreResult<String> {
        Ok(self.store.product_by_id(product_id).await?.restaurant_id)
    }

    fn check_owner(&self, caller: &AuthenticatedCaller, owner_id: &str, action: &str) -> CoreResult<()> {
        authorize(caller, owner_id).inspect_err(|_| {
            warn!(caller = %caller, owner = %owner_id, action = action, "Product mutation rejected");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_support::{address, store};
    use restaurant_core::{generate_id, ErrorCode, Price, Restaurant, SignupDetails};
    use restaurant_db::{Database, DbConfig};

    async fn owner(store: &Arc<dyn RestaurantStore>, email: &str) -> AuthenticatedCaller {
        let restaurant = Restaurant::register(
            &SignupDetails {
                owner_email: email.to_string(),
                password: String::new(),
                restaurant_name: "Spice Route".to_string(),
                phone_number: "9876543210".to_string(),
                address: address(),
            },
            "$argon2id$v=19$stub".to_string(),
        );
        store.create_restaurant(&restaurant).await.unwrap();
        AuthenticatedCaller::new(restaurant.id)
    }

    fn draft(caller: &AuthenticatedCaller, stock: i64) -> NewProduct {
        NewProduct {
            restaurant_id: caller.restaurant_id().to_string(),
            name: "Masala Dosa".to_string(),
            description: "Crisp rice crepe".to_string(),
            price: Price::from_cents(12000),
            initial_stock: stock,
            category: "Mains".to_string(),
        }
    }

    fn update() -> ProductUpdate {
        ProductUpdate {
            name: "Ghee Roast Dosa".to_string(),
            description: "Extra ghee".to_string(),
            price: Price::from_cents(15000),
            category: "Specials".to_string(),
        }
    }

    async fn setup() -> (CatalogService, AuthenticatedCaller, AuthenticatedCaller) {
        let store = store().await;
        let r1 = owner(&store, "r1@spice.example").await;
        let r2 = owner(&store, "r2@spice.example").await;
        (CatalogService::new(store), r1, r2)
    }

    #[tokio::test]
    async fn test_stock_example_sequence() {
        let (catalog, r1, _) = setup().await;
        let product_id = catalog.add_product(&r1, draft(&r1, 5)).await.unwrap();

        catalog.decrement_stock(&r1, &product_id, 3).await.unwrap();
        assert_eq!(catalog.get_stock(&product_id).await.unwrap(), 2);

        let err = catalog
            .decrement_stock(&r1, &product_id, 10)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::InsufficientStock { requested: 10, .. }
        ));
        assert_eq!(catalog.get_stock(&product_id).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_increment_and_zero_amount() {
        let (catalog, r1, _) = setup().await;
        let product_id = catalog.add_product(&r1, draft(&r1, 0)).await.unwrap();

        catalog.increment_stock(&r1, &product_id, 7).await.unwrap();
        catalog.increment_stock(&r1, &product_id, 0).await.unwrap();
        catalog.decrement_stock(&r1, &product_id, 0).await.unwrap();
        assert_eq!(catalog.get_stock(&product_id).await.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_negative_amounts_are_invalid() {
        let (catalog, r1, _) = setup().await;
        let product_id = catalog.add_product(&r1, draft(&r1, 5)).await.unwrap();

        let err = catalog
            .increment_stock(&r1, &product_id, -1)
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidArgument);

        let err = catalog
            .decrement_stock(&r1, &product_id, -1)
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidArgument);

        let err = catalog.add_product(&r1, draft(&r1, -1)).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidArgument);

        assert_eq!(catalog.get_stock(&product_id).await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_non_owner_mutations_are_unauthorized_and_change_nothing() {
        let (catalog, r1, r2) = setup().await;
        let product_id = catalog.add_product(&r1, draft(&r1, 5)).await.unwrap();
        let before = catalog.get_product(&product_id).await.unwrap();

        let results = [
            catalog.edit_product(&r2, &product_id, update()).await,
            catalog.increment_stock(&r2, &product_id, 1).await,
            catalog.decrement_stock(&r2, &product_id, 1).await,
            catalog.delete_product(&r2, &product_id).await,
        ];
        for result in results {
            assert_eq!(result.unwrap_err().code(), ErrorCode::Unauthorized);
        }

        let after = catalog.get_product(&product_id).await.unwrap();
        assert_eq!(after.name, before.name);
        assert_eq!(after.price, before.price);
        assert_eq!(after.stock, before.stock);
        assert_eq!(after.updated_at, before.updated_at);
    }

    #[tokio::test]
    async fn test_add_to_another_restaurant_is_unauthorized() {
        let (catalog, r1, r2) = setup().await;

        let err = catalog.add_product(&r2, draft(&r1, 5)).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert!(catalog.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_for_unknown_restaurant_is_not_found() {
        let (catalog, _, _) = setup().await;
        let ghost = AuthenticatedCaller::new(generate_id());

        let err = catalog.add_product(&ghost, draft(&ghost, 1)).await.unwrap_err();
        assert!(matches!(err, CoreError::RestaurantNotFound(_)));
    }

    #[tokio::test]
    async fn test_edit_keeps_stock() {
        let (catalog, r1, _) = setup().await;
        let product_id = catalog.add_product(&r1, draft(&r1, 5)).await.unwrap();
        catalog.increment_stock(&r1, &product_id, 4).await.unwrap();

        catalog.edit_product(&r1, &product_id, update()).await.unwrap();

        let product = catalog.get_product(&product_id).await.unwrap();
        assert_eq!(product.name, "Ghee Roast Dosa");
        assert_eq!(product.price, Price::from_cents(15000));
        assert_eq!(product.category, "Specials");
        assert_eq!(product.stock, 9);
    }

    #[tokio::test]
    async fn test_delete_and_reads() {
        let (catalog, r1, r2) = setup().await;
        let dosa = catalog.add_product(&r1, draft(&r1, 5)).await.unwrap();
        catalog.add_product(&r2, draft(&r2, 1)).await.unwrap();

        assert_eq!(
            catalog.owning_restaurant_id(&dosa).await.unwrap(),
            r1.restaurant_id()
        );
        assert_eq!(
            catalog
                .list_by_restaurant(r1.restaurant_id())
                .await
                .unwrap()
                .len(),
            1
        );
        assert_eq!(catalog.list_all().await.unwrap().len(), 2);

        catalog.delete_product(&r1, &dosa).await.unwrap();

        for err in [
            catalog.get_product(&dosa).await.map(|_| ()).unwrap_err(),
            catalog.get_stock(&dosa).await.map(|_| ()).unwrap_err(),
            catalog.owning_restaurant_id(&dosa).await.map(|_| ()).unwrap_err(),
            catalog.delete_product(&r1, &dosa).await.unwrap_err(),
            catalog.increment_stock(&r1, &dosa, 1).await.unwrap_err(),
        ] {
            assert!(matches!(err, CoreError::ProductNotFound(_)));
        }
    }

    #[tokio::test]
    async fn test_ban_does_not_revoke_an_authenticated_caller() {
        let store = store().await;
        let r1 = owner(&store, "r1@spice.example").await;
        let catalog = CatalogService::new(store.clone());
        let product_id = catalog.add_product(&r1, draft(&r1, 2)).await.unwrap();

        store
            .set_ban_status(r1.restaurant_id(), true, Some("hygiene"))
            .await
            .unwrap();

        catalog.increment_stock(&r1, &product_id, 3).await.unwrap();
        assert_eq!(catalog.get_stock(&product_id).await.unwrap(), 5);
    }

    /// Fifty single-unit orders race for twenty units through a pool with
    /// several connections. Exactly twenty may succeed; the rest must see
    /// `InsufficientStock`, and stock must end at zero.
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_decrements_never_drive_stock_negative() {
        let path = std::env::temp_dir().join(format!("restaurant-api-race-{}.db", generate_id()));
        let db = Database::new(DbConfig::new(&path).max_connections(8))
            .await
            .unwrap();
        let store: Arc<dyn RestaurantStore> = Arc::new(db.clone());
        let r1 = owner(&store, "r1@spice.example").await;
        let catalog = Arc::new(CatalogService::new(store));

        let product_id = catalog.add_product(&r1, draft(&r1, 20)).await.unwrap();

        let mut handles = Vec::new();
        for _ in 0..50 {
            let catalog = Arc::clone(&catalog);
            let caller = r1.clone();
            let product_id = product_id.clone();
            handles.push(tokio::spawn(async move {
                catalog.decrement_stock(&caller, &product_id, 1).await
            }));
        }

        let mut succeeded = 0;
        let mut insufficient = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(()) => succeeded += 1,
                Err(CoreError::InsufficientStock { .. }) => insufficient += 1,
                Err(other) => panic!("unexpected error: {other}"),
            }
        }

        assert_eq!(succeeded, 20);
        assert_eq!(insufficient, 30);
        assert_eq!(catalog.get_stock(&product_id).await.unwrap(), 0);

        db.close().await;
        for suffix in ["", "-wal", "-shm"] {
            let _ = std::fs::remove_file(format!("{}{}", path.display(), suffix));
        }
    }
}
