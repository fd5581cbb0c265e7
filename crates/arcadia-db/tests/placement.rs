//! Integration tests for order placement: tier pricing, stock
//! reservation, atomicity, commissions, and the cart clear.

mod common;

use common::{seed_product, seed_user, standard_ladder, stock_of, test_db};

use arcadia_core::{CommissionPolicy, CommissionStatus, OrderStatus, Rate};
use arcadia_db::{OrderItemRequest, PlaceOrderRequest, PlacementError};

fn request(user_id: &str, items: Vec<(String, i64)>) -> PlaceOrderRequest {
    PlaceOrderRequest {
        user_id: user_id.to_string(),
        items: items
            .into_iter()
            .map(|(product_id, quantity)| OrderItemRequest {
                product_id,
                quantity,
            })
            .collect(),
        shipping_address: None,
    }
}

// =============================================================================
// Happy Path & Pricing
// =============================================================================

#[tokio::test]
async fn places_order_with_tier_price_and_decrements_stock() {
    let db = test_db().await;
    let user = seed_user(&db, None).await;
    // base $120, stock 10, ladder 1-3/$100, 4-11/$90, 12+/$80
    let product = seed_product(&db, 120_00, 10, &standard_ladder()).await;

    let summary = db
        .placement()
        .place_order(request(&user, vec![(product.clone(), 5)]))
        .await
        .expect("placement succeeds");

    // Quantity 5 lands in the 4-11 tier
    assert_eq!(summary.total_cents, 450_00);
    assert_eq!(summary.status, OrderStatus::Pending);
    assert!(summary.order_number.starts_with("ORD-"));

    let items = db.orders().get_items(&summary.id).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].unit_price_cents, 90_00);
    assert_eq!(items[0].line_total_cents, 450_00);
    assert_eq!(items[0].quantity, 5);

    assert_eq!(stock_of(&db, &product).await, 5);

    let order = db.orders().get_by_id(&summary.id).await.unwrap().unwrap();
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.user_id, user);
}

#[tokio::test]
async fn order_total_equals_sum_of_line_totals() {
    let db = test_db().await;
    let user = seed_user(&db, None).await;
    let tiered = seed_product(&db, 120_00, 100, &standard_ladder()).await;
    // No tiers: falls back to base price
    let untiered = seed_product(&db, 19_99, 100, &[]).await;

    let summary = db
        .placement()
        .place_order(request(
            &user,
            vec![(tiered.clone(), 12), (untiered.clone(), 3)],
        ))
        .await
        .unwrap();

    let items = db.orders().get_items(&summary.id).await.unwrap();
    assert_eq!(items.len(), 2);

    let sum: i64 = items.iter().map(|i| i.line_total().cents()).sum();
    assert_eq!(summary.total_cents, sum);
    // 12 × $80 (12+ tier) + 3 × $19.99 (base fallback)
    assert_eq!(sum, 12 * 80_00 + 3 * 19_99);

    let order = db.orders().get_by_id(&summary.id).await.unwrap().unwrap();
    assert_eq!(order.total().cents(), sum);

    // Each line total is quantity × frozen unit price, exactly
    for item in &items {
        assert_eq!(
            item.line_total(),
            item.unit_price().multiply_quantity(item.quantity)
        );
    }
}

#[tokio::test]
async fn frozen_unit_price_survives_tier_changes() {
    let db = test_db().await;
    let user = seed_user(&db, None).await;
    let product = seed_product(&db, 120_00, 50, &standard_ladder()).await;

    let summary = db
        .placement()
        .place_order(request(&user, vec![(product.clone(), 5)]))
        .await
        .unwrap();

    // Catalog management reprices every tier after the sale
    sqlx::query("UPDATE pricing_tiers SET unit_price_cents = 1000 WHERE product_id = ?")
        .bind(&product)
        .execute(db.pool())
        .await
        .unwrap();

    let items = db.orders().get_items(&summary.id).await.unwrap();
    assert_eq!(items[0].unit_price_cents, 90_00);

    let order = db.orders().get_by_id(&summary.id).await.unwrap().unwrap();
    assert_eq!(order.total_cents, 450_00);

    // The new price applies to new orders only
    let (_, tiers) = db.products().get_with_tiers(&product).await.unwrap().unwrap();
    assert!(tiers.iter().all(|t| t.unit_price_cents == 1000));
}

// =============================================================================
// Rejections Before I/O
// =============================================================================

#[tokio::test]
async fn empty_order_is_rejected() {
    let db = test_db().await;
    let user = seed_user(&db, None).await;

    let err = db
        .placement()
        .place_order(request(&user, vec![]))
        .await
        .unwrap_err();

    assert!(matches!(err, PlacementError::EmptyOrder));
}

#[tokio::test]
async fn non_positive_and_oversized_quantities_are_rejected() {
    let db = test_db().await;
    let user = seed_user(&db, None).await;
    let product = seed_product(&db, 120_00, 10, &[]).await;

    for quantity in [0, -3, 1000] {
        let err = db
            .placement()
            .place_order(request(&user, vec![(product.clone(), quantity)]))
            .await
            .unwrap_err();
        assert!(matches!(err, PlacementError::Validation(_)));
    }

    // Nothing touched the store
    assert_eq!(stock_of(&db, &product).await, 10);
    assert!(db.orders().list_for_user(&user, 10).await.unwrap().is_empty());
}

// =============================================================================
// Product & Stock Failures
// =============================================================================

#[tokio::test]
async fn unknown_product_fails_placement() {
    let db = test_db().await;
    let user = seed_user(&db, None).await;

    let err = db
        .placement()
        .place_order(request(&user, vec![("no-such-product".to_string(), 1)]))
        .await
        .unwrap_err();

    assert!(matches!(err, PlacementError::ProductNotFound(id) if id == "no-such-product"));
}

#[tokio::test]
async fn inactive_product_fails_placement() {
    let db = test_db().await;
    let user = seed_user(&db, None).await;
    let product = seed_product(&db, 120_00, 10, &[]).await;

    db.products().soft_delete(&product).await.unwrap();

    let err = db
        .placement()
        .place_order(request(&user, vec![(product.clone(), 1)]))
        .await
        .unwrap_err();

    assert!(matches!(err, PlacementError::ProductNotFound(_)));
    assert_eq!(stock_of(&db, &product).await, 10);
}

#[tokio::test]
async fn insufficient_stock_identifies_product_and_shortfall() {
    let db = test_db().await;
    let user = seed_user(&db, None).await;
    let product = seed_product(&db, 120_00, 2, &[]).await;

    let err = db
        .placement()
        .place_order(request(&user, vec![(product.clone(), 5)]))
        .await
        .unwrap_err();

    match err {
        PlacementError::InsufficientStock {
            product_id,
            requested,
            available,
        } => {
            assert_eq!(product_id, product);
            assert_eq!(requested, 5);
            assert_eq!(available, 2);
        }
        other => panic!("expected InsufficientStock, got {other:?}"),
    }

    assert_eq!(stock_of(&db, &product).await, 2);
}

#[tokio::test]
async fn restocking_makes_placement_possible() {
    let db = test_db().await;
    let user = seed_user(&db, None).await;
    let product = seed_product(&db, 50_00, 0, &[]).await;

    let err = db
        .placement()
        .place_order(request(&user, vec![(product.clone(), 2)]))
        .await
        .unwrap_err();
    assert!(matches!(err, PlacementError::InsufficientStock { .. }));

    db.products().adjust_stock(&product, 10).await.unwrap();

    db.placement()
        .place_order(request(&user, vec![(product.clone(), 2)]))
        .await
        .expect("placement succeeds after restock");

    assert_eq!(stock_of(&db, &product).await, 8);
}

// =============================================================================
// Atomicity
// =============================================================================

#[tokio::test]
async fn mid_order_stock_failure_rolls_back_everything() {
    let db = test_db().await;
    let user = seed_user(&db, Some("agent-1")).await;
    let plentiful = seed_product(&db, 10_00, 10, &[]).await;
    let scarce = seed_product(&db, 20_00, 1, &[]).await;
    let also_fine = seed_product(&db, 30_00, 10, &[]).await;

    let err = db
        .placement()
        .place_order(request(
            &user,
            vec![
                (plentiful.clone(), 2), // reserves fine
                (scarce.clone(), 5),    // fails here
                (also_fine.clone(), 1), // never reached
            ],
        ))
        .await
        .unwrap_err();

    assert!(matches!(err, PlacementError::InsufficientStock { .. }));

    // The first item's reservation rolled back with the transaction
    assert_eq!(stock_of(&db, &plentiful).await, 10);
    assert_eq!(stock_of(&db, &scarce).await, 1);
    assert_eq!(stock_of(&db, &also_fine).await, 10);

    // No order, no items, no commission survived
    assert!(db.orders().list_for_user(&user, 10).await.unwrap().is_empty());
    assert_eq!(db.commissions().count().await.unwrap(), 0);
}

// =============================================================================
// Stock Contention
// =============================================================================

#[tokio::test]
async fn concurrent_placements_never_oversell() {
    let db = test_db().await;
    let user_a = seed_user(&db, None).await;
    let user_b = seed_user(&db, None).await;
    let product = seed_product(&db, 120_00, 2, &[]).await;

    let placement_a = db.placement();
    let placement_b = db.placement();
    let req_a = request(&user_a, vec![(product.clone(), 2)]);
    let req_b = request(&user_b, vec![(product.clone(), 1)]);

    let (res_a, res_b) = tokio::join!(
        placement_a.place_order(req_a),
        placement_b.place_order(req_b)
    );

    // Exactly one placement wins; the loser sees the committed decrement
    // and fails the floor check.
    let winners = [res_a.is_ok(), res_b.is_ok()]
        .iter()
        .filter(|ok| **ok)
        .count();
    assert_eq!(winners, 1);

    let stock = stock_of(&db, &product).await;
    assert!(stock >= 0, "stock must never go negative, got {stock}");

    match (&res_a, &res_b) {
        (Ok(_), Err(e)) => {
            assert_eq!(stock, 0);
            assert!(matches!(e, PlacementError::InsufficientStock { .. }));
        }
        (Err(e), Ok(_)) => {
            assert_eq!(stock, 1);
            assert!(matches!(e, PlacementError::InsufficientStock { .. }));
        }
        other => panic!("expected exactly one success, got {other:?}"),
    }
}

// =============================================================================
// Commissions
// =============================================================================

#[tokio::test]
async fn first_three_orders_earn_commission_fourth_does_not() {
    let db = test_db().await;
    let user = seed_user(&db, Some("agent-7")).await;
    // Base price $1000, no tiers, plenty of stock
    let product = seed_product(&db, 1000_00, 100, &[]).await;

    assert_eq!(
        db.users().assigned_agent(&user).await.unwrap().as_deref(),
        Some("agent-7")
    );

    let mut summaries = Vec::new();
    for _ in 0..4 {
        let summary = db
            .placement()
            .place_order(request(&user, vec![(product.clone(), 1)]))
            .await
            .unwrap();
        assert_eq!(summary.total_cents, 1000_00);
        summaries.push(summary);
    }

    for (i, summary) in summaries.iter().enumerate() {
        let commission = db.commissions().get_for_order(&summary.id).await.unwrap();
        if i < 3 {
            let c = commission.unwrap_or_else(|| panic!("order {} should earn commission", i + 1));
            assert_eq!(c.sales_agent_id, "agent-7");
            assert_eq!(c.rate().bps(), 500);
            assert_eq!(c.amount().cents(), 50_00); // 5.0% of $1000.00
            assert_eq!(c.status, CommissionStatus::Pending);
        } else {
            assert!(commission.is_none(), "order 4 must not earn commission");
        }
    }

    let agent_commissions = db.commissions().list_for_agent("agent-7", 10).await.unwrap();
    assert_eq!(agent_commissions.len(), 3);
}

#[tokio::test]
async fn customers_without_agent_never_earn_commission() {
    let db = test_db().await;
    let user = seed_user(&db, None).await;
    let product = seed_product(&db, 1000_00, 100, &[]).await;

    assert!(db.users().get_by_id(&user).await.unwrap().is_some());

    for _ in 0..3 {
        db.placement()
            .place_order(request(&user, vec![(product.clone(), 1)]))
            .await
            .unwrap();
    }

    assert_eq!(db.commissions().count().await.unwrap(), 0);
}

#[tokio::test]
async fn cancelled_orders_still_count_toward_lifetime() {
    let db = test_db().await;
    let user = seed_user(&db, Some("agent-9")).await;
    let product = seed_product(&db, 1000_00, 100, &[]).await;

    let mut summaries = Vec::new();
    for _ in 0..3 {
        summaries.push(
            db.placement()
                .place_order(request(&user, vec![(product.clone(), 1)]))
                .await
                .unwrap(),
        );
    }

    // Cancelling an early order does not reopen the commission window
    db.orders()
        .update_status(&summaries[0].id, OrderStatus::Cancelled)
        .await
        .unwrap();

    let fourth = db
        .placement()
        .place_order(request(&user, vec![(product.clone(), 1)]))
        .await
        .unwrap();

    assert!(db
        .commissions()
        .get_for_order(&fourth.id)
        .await
        .unwrap()
        .is_none());
    assert_eq!(db.orders().count_for_user(&user).await.unwrap(), 4);
}

#[tokio::test]
async fn custom_commission_policy_applies() {
    let db = test_db().await;
    let user = seed_user(&db, Some("agent-x")).await;
    let product = seed_product(&db, 200_00, 100, &[]).await;

    let placement = db.placement_with_policy(CommissionPolicy {
        rate: Rate::from_bps(1000), // 10%
        commissioned_order_cap: 1,
    });

    let first = placement
        .place_order(request(&user, vec![(product.clone(), 1)]))
        .await
        .unwrap();
    let second = placement
        .place_order(request(&user, vec![(product.clone(), 1)]))
        .await
        .unwrap();

    let c = db
        .commissions()
        .get_for_order(&first.id)
        .await
        .unwrap()
        .expect("first order earns under custom policy");
    assert_eq!(c.rate_bps, 1000);
    assert_eq!(c.amount_cents, 20_00);

    assert!(db
        .commissions()
        .get_for_order(&second.id)
        .await
        .unwrap()
        .is_none());
}

// =============================================================================
// Cart Clearing
// =============================================================================

#[tokio::test]
async fn successful_placement_clears_the_users_cart() {
    let db = test_db().await;
    let user = seed_user(&db, None).await;
    let bystander = seed_user(&db, None).await;
    let product = seed_product(&db, 50_00, 20, &[]).await;
    let other = seed_product(&db, 60_00, 20, &[]).await;

    db.carts().upsert_item(&user, &product, 2).await.unwrap();
    db.carts().upsert_item(&user, &other, 1).await.unwrap();
    db.carts().upsert_item(&bystander, &product, 4).await.unwrap();

    db.placement()
        .place_order(request(&user, vec![(product.clone(), 2), (other.clone(), 1)]))
        .await
        .unwrap();

    assert!(db.carts().items_for_user(&user).await.unwrap().is_empty());

    // Someone else's cart is untouched
    let bystander_cart = db.carts().items_for_user(&bystander).await.unwrap();
    assert_eq!(bystander_cart.len(), 1);
    assert_eq!(bystander_cart[0].quantity, 4);
}

#[tokio::test]
async fn failed_placement_leaves_the_cart_alone() {
    let db = test_db().await;
    let user = seed_user(&db, None).await;
    let product = seed_product(&db, 50_00, 1, &[]).await;

    db.carts().upsert_item(&user, &product, 5).await.unwrap();

    let err = db
        .placement()
        .place_order(request(&user, vec![(product.clone(), 5)]))
        .await
        .unwrap_err();
    assert!(matches!(err, PlacementError::InsufficientStock { .. }));

    assert_eq!(db.carts().items_for_user(&user).await.unwrap().len(), 1);
}

// =============================================================================
// Order Numbers
// =============================================================================

#[tokio::test]
async fn order_number_uniqueness_is_store_enforced() {
    let db = test_db().await;
    let user = seed_user(&db, None).await;

    let insert = |id: &str, number: &str| {
        sqlx::query(
            r#"
            INSERT INTO orders (id, order_number, user_id, status, total_cents,
                                shipping_address, created_at, updated_at)
            VALUES (?, ?, ?, 'pending', 0, NULL, ?, ?)
            "#,
        )
        .bind(id.to_string())
        .bind(number.to_string())
        .bind(user.clone())
        .bind(chrono::Utc::now())
        .bind(chrono::Utc::now())
    };

    insert("order-1", "ORD-DUP").execute(db.pool()).await.unwrap();

    let err = insert("order-2", "ORD-DUP")
        .execute(db.pool())
        .await
        .unwrap_err();
    let db_err: arcadia_db::DbError = err.into();
    assert!(matches!(
        db_err,
        arcadia_db::DbError::UniqueViolation { .. }
    ));
    // A collision is the retry-the-whole-call kind of failure
    assert!(db_err.is_retryable());
}

#[tokio::test]
async fn placements_get_distinct_order_numbers() {
    let db = test_db().await;
    let user = seed_user(&db, None).await;
    let product = seed_product(&db, 10_00, 100, &[]).await;

    let mut numbers = std::collections::HashSet::new();
    for _ in 0..10 {
        let summary = db
            .placement()
            .place_order(request(&user, vec![(product.clone(), 1)]))
            .await
            .unwrap();
        assert!(numbers.insert(summary.order_number));
    }
}
