use clap::Args;
use rust_decimal::Decimal;
use shopfront_app::{
    database,
    domain::products::{PgProductsService, ProductsService, data::NewProduct},
};

#[derive(Debug, Args)]
pub(crate) struct CreateProductArgs {
    #[arg(long)]
    name: String,

    /// Price with up to two decimal places, e.g. 19.99
    #[arg(long)]
    price: Decimal,

    #[arg(long)]
    description: Option<String>,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CreateProductArgs) -> Result<(), String> {
    if args.price.scale() > 2 {
        return Err("price cannot have more than two decimal places".to_string());
    }

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let product = PgProductsService::new(pool)
        .create_product(NewProduct {
            name: args.name,
            price: args.price,
            description: args.description,
        })
        .await
        .map_err(|error| format!("failed to create product: {error}"))?;

    println!("product_id: {}", product.id);
    println!("name: {}", product.name);
    println!("price: {}", product.price);

    Ok(())
}
