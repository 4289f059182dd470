//! Demo catalog seeding.
//!
//! Inserts a seller, a few categories, a customer, and demo products with
//! option trees. Option payloads go through the same normalize → dedupe
//! pipeline as API submissions, finished with the lenient `coerce_options`
//! path - this is the bulk-import caller that clamps instead of rejecting.

use sqlx::PgPool;

use talad_admin::db::ProductRepository;
use talad_admin::models::NewProduct;
use talad_core::{
    CategoryId, ProductStatus, SellerId, coerce_options, dedupe_option_names, normalize_options,
};

/// Errors that can occur while seeding.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Repository error: {0}")]
    Repository(#[from] talad_admin::db::RepositoryError),
}

struct DemoProduct {
    name: &'static str,
    description: &'static str,
    price: i64,
    discount_percent: i64,
    stock: i64,
    category_slug: &'static str,
    options: serde_json::Value,
}

fn demo_products() -> Vec<DemoProduct> {
    vec![
        DemoProduct {
            name: "เสื้อยืดลายช้าง",
            description: "เสื้อยืดคอตตอน 100% สกรีนลายช้างไทย",
            price: 299,
            discount_percent: 10,
            stock: 120,
            category_slug: "clothing",
            options: serde_json::json!([
                {"name": "ขนาด", "values": [
                    {"value": "S"},
                    {"value": "M", "price": 50, "priceType": "add", "stock": 40},
                    {"value": "L", "price": 80, "priceType": "add", "stock": 30},
                ]},
                {"name": "สี", "values": ["ขาว", "ดำ", "แดง"]},
            ]),
        },
        DemoProduct {
            name: "กระเป๋าผ้าทอมือ",
            description: "กระเป๋าผ้าฝ้ายทอมือจากเชียงใหม่",
            price: 450,
            discount_percent: 0,
            stock: 35,
            category_slug: "accessories",
            // legacy flat-label shape, still accepted
            options: serde_json::json!(["ใบเล็ก", "ใบกลาง", "ใบใหญ่"]),
        },
        DemoProduct {
            name: "กาแฟดอยช้าง คั่วกลาง",
            description: "เมล็ดกาแฟอาราบิก้าแท้จากดอยช้าง",
            price: 320,
            discount_percent: 5,
            stock: 80,
            category_slug: "food",
            // legacy name→labels map shape
            options: serde_json::json!({"ขนาดถุง": ["250 กรัม", "500 กรัม", "1 กิโลกรัม"]}),
        },
    ]
}

/// Seed the database with a demo catalog. Safe to re-run: rows are keyed
/// by slug/email and skipped when present.
///
/// # Errors
///
/// Returns `SeedError` if the database is unreachable or an insert fails.
pub async fn run() -> Result<(), SeedError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("TALAD_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_err(|_| SeedError::MissingEnvVar("TALAD_DATABASE_URL"))?;

    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(&database_url).await?;

    let seller_id = upsert_seller(&pool).await?;
    seed_categories(&pool).await?;
    seed_customer(&pool).await?;

    let repo = ProductRepository::new(&pool);
    for demo in demo_products() {
        let exists: Option<i32> = sqlx::query_scalar("SELECT 1 FROM products WHERE name = $1")
            .bind(demo.name)
            .fetch_optional(&pool)
            .await?;
        if exists.is_some() {
            tracing::info!("Product '{}' already seeded, skipping", demo.name);
            continue;
        }

        let category_id = category_id_by_slug(&pool, demo.category_slug).await?;
        let options = coerce_options(dedupe_option_names(normalize_options(&demo.options)));

        let product = repo
            .create(&NewProduct {
                seller_id,
                category_id,
                name: demo.name.to_owned(),
                description: Some(demo.description.to_owned()),
                price: demo.price,
                discount_percent: demo.discount_percent,
                image: None,
                images: Vec::new(),
                options,
                stock: demo.stock,
                status: ProductStatus::Active,
            })
            .await?;

        tracing::info!("Seeded product '{}' (id {})", product.name, product.id);
    }

    tracing::info!("Seed complete!");
    Ok(())
}

async fn upsert_seller(pool: &PgPool) -> Result<SellerId, SeedError> {
    sqlx::query(
        "INSERT INTO sellers (name, slug, description)
         VALUES ('ร้านช้างไทย', 'chang-thai', 'ของดีจากทั่วไทย ส่งตรงถึงบ้าน')
         ON CONFLICT (slug) DO NOTHING",
    )
    .execute(pool)
    .await?;

    let id: SellerId = sqlx::query_scalar("SELECT id FROM sellers WHERE slug = 'chang-thai'")
        .fetch_one(pool)
        .await?;
    Ok(id)
}

async fn seed_categories(pool: &PgPool) -> Result<(), SeedError> {
    let categories = [
        ("เสื้อผ้า", "clothing", 1),
        ("ของใช้", "accessories", 2),
        ("อาหารและเครื่องดื่ม", "food", 3),
    ];

    for (name, slug, position) in categories {
        sqlx::query(
            "INSERT INTO categories (name, slug, position)
             VALUES ($1, $2, $3)
             ON CONFLICT (slug) DO NOTHING",
        )
        .bind(name)
        .bind(slug)
        .bind(position)
        .execute(pool)
        .await?;
    }
    Ok(())
}

async fn seed_customer(pool: &PgPool) -> Result<(), SeedError> {
    sqlx::query(
        "INSERT INTO users (name, email)
         VALUES ('สมชาย ใจดี', 'somchai@example.com')
         ON CONFLICT (email) DO NOTHING",
    )
    .execute(pool)
    .await?;
    Ok(())
}

async fn category_id_by_slug(
    pool: &PgPool,
    slug: &str,
) -> Result<Option<CategoryId>, SeedError> {
    let id: Option<CategoryId> = sqlx::query_scalar("SELECT id FROM categories WHERE slug = $1")
        .bind(slug)
        .fetch_optional(pool)
        .await?;
    Ok(id)
}
