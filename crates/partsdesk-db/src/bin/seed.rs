//! # Seed Data Generator
//!
//! Fills a database with a demo parts catalog for development.
//!
//! ## Usage
//! ```bash
//! # Every part, three sizes each (default)
//! cargo run -p partsdesk-db --bin seed
//!
//! # Limit the number of items
//! cargo run -p partsdesk-db --bin seed -- --count 20
//!
//! # Specify database path
//! cargo run -p partsdesk-db --bin seed -- --db ./data/partsdesk.db
//! ```
//!
//! Each item gets a price between 5.00 and 350.00, a cost at 55-80% of
//! the price, a stock level between 0 and 40, and a reorder threshold of
//! 2-5. Some items start at or below the threshold so the low-stock list
//! has something to show.

use std::env;

use partsdesk_core::{ItemDraft, Money};
use partsdesk_db::{Database, DbConfig};

/// Part families and their base price in cents.
const PARTS: &[(&str, i64)] = &[
    ("Brake pad set", 4_500),
    ("Brake disc", 9_000),
    ("Oil filter", 800),
    ("Air filter", 1_200),
    ("Fuel filter", 1_500),
    ("Spark plug", 500),
    ("Ignition coil", 6_500),
    ("Timing belt", 7_000),
    ("Water pump", 11_000),
    ("Radiator hose", 1_800),
    ("Alternator", 32_000),
    ("Starter motor", 28_000),
    ("Clutch kit", 35_000),
    ("Shock absorber", 14_000),
    ("Wheel bearing", 5_500),
    ("Wiper blade", 700),
    ("Headlight bulb", 600),
    ("Battery 70Ah", 30_000),
];

/// Fitment variants and their surcharge in cents.
const VARIANTS: &[(&str, i64)] = &[("Sedan", 0), ("SUV", 1_500), ("Pickup", 2_500)];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut count: usize = PARTS.len() * VARIANTS.len();
    let mut db_path = String::from("./partsdesk.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(count);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("PartsDesk Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of items to generate (default: all)");
                println!("  -d, --db <PATH>    Database file path (default: ./partsdesk.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 PartsDesk Seed Data Generator");
    println!("================================");
    println!("Database: {}", db_path);
    println!("Items:    {}", count);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.items().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} items", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Generating items...");

    let mut generated = 0;
    let start = std::time::Instant::now();

    'outer: for (part_idx, (part, base_cents)) in PARTS.iter().enumerate() {
        for (variant_idx, (variant, surcharge)) in VARIANTS.iter().enumerate() {
            if generated >= count {
                break 'outer;
            }

            let draft = generate_item(part, variant, base_cents + surcharge, part_idx * 10 + variant_idx);
            if let Err(e) = db.items().insert(&draft).await {
                eprintln!("Failed to insert {}: {}", draft.name, e);
                continue;
            }

            generated += 1;
        }
    }

    let low_stock = db.items().list_low_stock().await?.len();

    println!();
    println!("✓ Generated {} items in {:?}", generated, start.elapsed());
    println!("  {} start at or below their reorder threshold", low_stock);
    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Builds one catalog item with deterministic pseudo-random numbers.
fn generate_item(part: &str, variant: &str, price_cents: i64, seed: usize) -> ItemDraft {
    let cost_pct = 55 + (seed * 7 % 26) as i64;
    let quantity = (seed * 13 % 41) as i64;
    let min_stock = 2 + (seed % 4) as i64;

    ItemDraft {
        name: format!("{} ({})", part, variant),
        quantity,
        price: Money::from_cents(price_cents),
        cost: Money::from_cents(price_cents * cost_pct / 100),
        min_stock,
    }
}
