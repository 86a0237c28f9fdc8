// Seed command implementation
// Fills the catalog with generated sample items for local development

use rand::seq::SliceRandom;
use rand::Rng;
use sea_orm::TransactionTrait;

use crate::app_data::AppData;
use crate::cli::SeedArgs;
use crate::errors::InternalError;
use crate::stores::NewItem;

const ADJECTIVES: &[&str] = &[
    "Small", "Ergonomic", "Rustic", "Intelligent", "Gorgeous", "Incredible", "Fantastic",
    "Practical", "Sleek", "Awesome", "Generic", "Handcrafted", "Licensed", "Refined",
    "Unbranded", "Tasty", "Electronic", "Modern", "Recycled", "Luxurious",
];

const MATERIALS: &[&str] = &[
    "Steel", "Wooden", "Concrete", "Plastic", "Cotton", "Granite", "Rubber", "Metal", "Soft",
    "Fresh", "Frozen", "Bronze", "Marble", "Silk", "Bamboo",
];

const PRODUCTS: &[&str] = &[
    "Chair", "Car", "Computer", "Keyboard", "Mouse", "Bike", "Ball", "Gloves", "Pants",
    "Shirt", "Table", "Shoes", "Hat", "Towels", "Soap", "Tuna", "Chicken", "Fish", "Cheese",
    "Bacon", "Pizza", "Salad", "Sausages", "Chips",
];

/// Outcome of a seed run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub removed: u64,
    pub created: u64,
}

fn pick<R: Rng + ?Sized>(words: &[&'static str], rng: &mut R) -> &'static str {
    words.choose(rng).copied().unwrap_or_default()
}

/// Random "Adjective Material Product" name
pub fn generate_product_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!(
        "{} {} {}",
        pick(ADJECTIVES, rng),
        pick(MATERIALS, rng),
        pick(PRODUCTS, rng)
    )
}

/// Build the `n`th seeded item (1-based)
pub fn generate_item<R: Rng + ?Sized>(n: u64, rng: &mut R) -> NewItem {
    NewItem {
        name: format!("Item {} - {}", n, generate_product_name(rng)),
        is_active: rng.gen_bool(0.5),
    }
}

/// Clear (unless asked to keep) and refill the item table
///
/// Runs in a single transaction so a failed batch leaves the catalog untouched.
pub async fn seed_items(app_data: &AppData, args: &SeedArgs) -> Result<SeedReport, InternalError> {
    let store = &app_data.item_store;
    let txn = app_data
        .connections
        .catalog
        .begin()
        .await
        .map_err(|e| InternalError::transaction("begin_seed", e))?;

    let removed = if args.keep_existing {
        0
    } else {
        tracing::info!("Clearing existing items...");
        let removed = store.delete_all(&txn).await?;
        tracing::info!(removed, "Existing items cleared");
        removed
    };

    tracing::info!("Creating {} items...", args.count);

    let mut rng = rand::thread_rng();
    let mut created = 0;
    let mut batch = Vec::new();

    for n in 1..=args.count {
        batch.push(generate_item(n, &mut rng));

        if batch.len() as u64 == args.batch_size || n == args.count {
            created += store.insert_many(&txn, std::mem::take(&mut batch)).await?;
            tracing::info!("Batch inserted: {}/{}", n, args.count);
        }
    }

    txn.commit()
        .await
        .map_err(|e| InternalError::transaction("commit_seed", e))?;

    Ok(SeedReport { removed, created })
}
