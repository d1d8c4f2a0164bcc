//! Gallery queries against the bundled DecorNest catalog.

use testresult::TestResult;

use decornest::{
    catalog::{CatalogPage, CatalogQuery, PriceRange, SortOrder},
    fixtures::Fixture,
    products::ProductCategory,
};

fn ids(page: &CatalogPage<'_>) -> Vec<u32> {
    page.products.iter().map(|product| product.id.get()).collect()
}

#[test]
fn default_query_is_first_page_by_popularity() -> TestResult {
    let catalog = Fixture::bundled_catalog()?;

    let page = catalog.query(&CatalogQuery::default());

    assert_eq!(page.total_matches, 23);
    assert_eq!(page.total_pages, 3);
    assert_eq!(ids(&page), [1, 3, 17, 7, 2, 11, 6, 23]);

    Ok(())
}

#[test]
fn last_page_holds_the_remainder() -> TestResult {
    let catalog = Fixture::bundled_catalog()?;

    let last = catalog.query(&CatalogQuery {
        page: 3,
        ..CatalogQuery::default()
    });
    let beyond = catalog.query(&CatalogQuery {
        page: 4,
        ..CatalogQuery::default()
    });

    assert_eq!(last.products.len(), 7);
    assert!(beyond.products.is_empty());
    assert_eq!(beyond.total_pages, 3);

    Ok(())
}

#[test]
fn category_filter_with_price_sort() -> TestResult {
    let catalog = Fixture::bundled_catalog()?;

    let page = catalog.query(&CatalogQuery {
        category: Some(ProductCategory::Lighting),
        sort: SortOrder::PriceLow,
        ..CatalogQuery::default()
    });

    assert_eq!(ids(&page), [22, 14, 23, 2, 6, 15]);
    assert_eq!(page.total_pages, 1);

    Ok(())
}

#[test]
fn newest_keeps_listing_order_for_same_day() -> TestResult {
    let catalog = Fixture::bundled_catalog()?;

    let page = catalog.query(&CatalogQuery {
        sort: SortOrder::Newest,
        ..CatalogQuery::default()
    });

    assert_eq!(ids(&page).get(..5), Some(&[6, 23, 12, 19, 20][..]));

    Ok(())
}

#[test]
fn open_ended_price_range_from_query_string() -> TestResult {
    let catalog = Fixture::bundled_catalog()?;

    let range: PriceRange = "5000-".parse()?;
    let page = catalog.query(&CatalogQuery {
        price_range: Some(range),
        sort: SortOrder::PriceHigh,
        ..CatalogQuery::default()
    });

    assert_eq!(ids(&page), [21, 7]);

    Ok(())
}

#[test]
fn wall_decor_from_slug() -> TestResult {
    let catalog = Fixture::bundled_catalog()?;

    let page = catalog.query(&CatalogQuery {
        category: CatalogQuery::parse_category("wall-decor")?,
        ..CatalogQuery::default()
    });

    assert_eq!(page.total_matches, 6);
    assert!(
        page.products
            .iter()
            .all(|product| product.category == ProductCategory::WallDecor),
        "expected only wall decor, got {:?}",
        ids(&page)
    );

    Ok(())
}
