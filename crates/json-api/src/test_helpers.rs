//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*};

use northwind_app::{
    context::AppContext,
    domain::{
        categories::{
            MockCategoriesService,
            records::{CategoryId, CategoryRecord},
        },
        products::{
            MockProductsService,
            records::{ProductId, ProductRecord},
        },
    },
};

use crate::state::State;

pub(crate) fn strict_products_mock() -> MockProductsService {
    let mut products = MockProductsService::new();

    products.expect_list_products().never();
    products.expect_get_product().never();
    products.expect_create_product().never();
    products.expect_update_product().never();
    products.expect_delete_product().never();

    products
}

pub(crate) fn strict_categories_mock() -> MockCategoriesService {
    let mut categories = MockCategoriesService::new();

    categories.expect_list_categories().never();
    categories.expect_get_category().never();
    categories.expect_create_category().never();
    categories.expect_update_category().never();
    categories.expect_delete_category().never();

    categories
}

pub(crate) fn make_product(id: i32) -> ProductRecord {
    ProductRecord {
        id: ProductId::new(id),
        name: "Chai".to_string(),
        supplier_id: None,
        category_id: Some(CategoryId::new(1)),
        quantity_per_unit: None,
        unit_price: None,
        units_in_stock: None,
        units_on_order: None,
        reorder_level: None,
        discontinued: false,
        version: 1,
    }
}

pub(crate) fn make_category(id: i32) -> CategoryRecord {
    CategoryRecord {
        id: CategoryId::new(id),
        name: "Beverages".to_string(),
        description: None,
        picture: None,
        version: 1,
    }
}

fn service(app: AppContext, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(State::from_app_context(app)))
            .push(route),
    )
}

pub(crate) fn products_service(products: MockProductsService, route: Router) -> Service {
    service(
        AppContext {
            products: Arc::new(products),
            categories: Arc::new(strict_categories_mock()),
        },
        route,
    )
}

pub(crate) fn categories_service(categories: MockCategoriesService, route: Router) -> Service {
    service(
        AppContext {
            products: Arc::new(strict_products_mock()),
            categories: Arc::new(categories),
        },
        route,
    )
}
