//! Scripted browse session against the mock API: start `mock-api` first,
//! then run this binary to watch the query handle search, filter and
//! paginate the product catalog.

use anyhow::Result;
use tokio::sync::watch;
use tracing::info;

use vitrine_client::{ClientConfig, QuerySnapshot, ResourceQuery, StorefrontClient};
use vitrine_model::{Filter, OrderBy, Product, ProductField, QueryDefaults, SearchKey};
use vitrine_observe::{LogConfig, log_init};

#[tokio::main]
async fn main() -> Result<()> {
    log_init(&LogConfig::default())?;

    let config = ClientConfig::new("http://127.0.0.1:8080/api");
    let client = StorefrontClient::new(config)?;

    let products: ResourceQuery<Product> = client.query(
        QueryDefaults::new()
            .with_limit(5)
            .with_order_by(OrderBy::asc(ProductField::Price)),
    );
    let mut updates = products.subscribe();

    let snap = settled(&mut updates).await?;
    report("first page, cheapest first", &snap);

    products.set_filter(Some(Filter::new(ProductField::CategoryId, 2i64)));
    let snap = settled(&mut updates).await?;
    report("filtered to the desks category", &snap);

    products.set_search_key(Some(SearchKey::new(ProductField::Name, "desk")));
    let snap = settled(&mut updates).await?;
    report("searched for \"desk\"", &snap);

    products.set_search_key(None);
    products.set_filter(None);
    let snap = settled(&mut updates).await?;
    report("cleared search and filters", &snap);

    if snap.next_page_available {
        products.next_page();
        let snap = settled(&mut updates).await?;
        report("next page", &snap);
    }

    Ok(())
}

/// Wait until the driver publishes a snapshot with no request in flight.
async fn settled(
    updates: &mut watch::Receiver<QuerySnapshot<Product>>,
) -> Result<QuerySnapshot<Product>> {
    loop {
        updates.changed().await?;
        let snap = updates.borrow_and_update().clone();
        if !snap.is_fetching {
            return Ok(snap);
        }
    }
}

fn report(step: &str, snap: &QuerySnapshot<Product>) {
    if let Some(error) = &snap.error {
        info!(step, %error, "request failed");
        return;
    }

    let summary = snap
        .summary
        .map(|s| {
            format!(
                "{}-{} of {}",
                s.from.unwrap_or(0),
                s.to.unwrap_or(0),
                s.total
            )
        })
        .unwrap_or_else(|| "no results".to_string());
    info!(step, %summary, "page settled");

    if let Some(data) = &snap.data {
        for product in data.iter() {
            info!("  {} ({:.2})", product.name, product.price);
        }
    }
}
