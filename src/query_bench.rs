// src/query_bench.rs
// Times QueryProcessor over a synthetic listing set, to check that in-process
// filtering after a full scan stays cheap at demo scale.
use rand::seq::SliceRandom;
use rand::Rng;
use serde_json::json;
use std::time::Instant;

use property_search::domain::property::PropertyRecord;
use property_search::domain::query::{QueryParameters, QueryProcessor, SortOrder};

const CITIES: &[&str] = &["Hartford", "Avon", "West Hartford", "Farmington", "Glastonbury", "Simsbury"];
const TYPES: &[&str] = &["Residential", "Condo", "Multi-Family", "Land"];

fn main() -> anyhow::Result<()> {
    let num_items: usize = std::env::args()
        .nth(1)
        .map(|s| s.parse())
        .transpose()?
        .unwrap_or(100_000);
    let iterations = 20;

    println!("--- Query benchmark: {} listings, {} iterations per query ---", num_items, iterations);

    let mut rng = rand::thread_rng();
    let records: Vec<PropertyRecord> = (0..num_items)
        .map(|i| {
            let mut record = PropertyRecord::new(format!("prop_{:07}", i))
                .with_address(format!("{} Main St", rng.gen_range(1..2000)))
                .with_price(rng.gen_range(50_000..2_000_000) as f64)
                .with_metadata("bedrooms", json!(rng.gen_range(1..7)))
                .with_metadata("squareFeet", json!(rng.gen_range(400..6000)));
            if let Some(city) = CITIES.choose(&mut rng) {
                record = record.with_city(*city);
            }
            if let Some(kind) = TYPES.choose(&mut rng) {
                record = record.with_property_type(*kind);
            }
            record
        })
        .collect();

    let processor = QueryProcessor::default();
    let queries = [
        ("default page", QueryParameters::default()),
        ("city filter", QueryParameters::default().with_city("Avon")),
        (
            "price range desc",
            QueryParameters::default()
                .with_price_range(Some(250_000.0), Some(600_000.0))
                .with_sort("price", SortOrder::Desc),
        ),
        (
            "text sort deep page",
            QueryParameters::default()
                .with_sort("city", SortOrder::Asc)
                .with_page(50, 5_000),
        ),
        (
            "metadata sort",
            QueryParameters::default()
                .with_property_type("Condo")
                .with_sort("squareFeet", SortOrder::Desc),
        ),
    ];

    println!("\n--- Results ---");
    for (name, params) in &queries {
        let start_time = Instant::now();
        let mut total = 0;
        let mut returned = 0;
        for _ in 0..iterations {
            let page = processor.process(&records, params);
            total = page.total_count;
            returned = page.items.len();
        }
        let avg_ms = start_time.elapsed().as_secs_f64() * 1000.0 / iterations as f64;
        println!(
            "{:<22} total={:<8} returned={:<4} avg={:.2} ms",
            name, total, returned, avg_ms
        );
    }

    Ok(())
}
