//! Northwind command-line client

use std::{
    io::{self, Write},
    process,
};

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

use northwind_client::{
    ClientError, ListCategories, ListProducts, NewProduct, NorthwindClient, ProductUpdate,
};

#[derive(Debug, Parser)]
#[command(name = "northwind", version, about = "Northwind catalogue API client")]
struct Cli {
    /// Base URL of the Northwind JSON API.
    #[arg(long, env = "NORTHWIND_BASE_URL", default_value = "http://localhost:8698")]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Product operations
    #[command(subcommand)]
    Products(ProductsCommand),

    /// Category operations
    #[command(subcommand)]
    Categories(CategoriesCommand),

    /// List, create, rename, fetch and delete a throwaway product
    Demo,
}

#[derive(Debug, Subcommand)]
enum ProductsCommand {
    /// List one page of products
    List {
        #[command(flatten)]
        page: PageArgs,

        /// Only products in this category
        #[arg(long)]
        category_id: Option<i32>,
    },

    /// Show one product
    Get { id: i32 },

    /// Delete a product
    Delete { id: i32 },
}

#[derive(Debug, Subcommand)]
enum CategoriesCommand {
    /// List one page of categories
    List {
        #[command(flatten)]
        page: PageArgs,
    },

    /// Show one category
    Get { id: i32 },
}

#[derive(Debug, Args)]
struct PageArgs {
    #[arg(long)]
    page_number: Option<i64>,

    #[arg(long)]
    page_size: Option<i64>,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to write output: {0}")]
    Write(#[from] io::Error),
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let mut stdout = io::stdout().lock();

    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;

    Ok(())
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let client = NorthwindClient::new(cli.base_url);

    match cli.command {
        Command::Products(ProductsCommand::List { page, category_id }) => {
            let page = client
                .products()
                .list(ListProducts {
                    page_number: page.page_number,
                    page_size: page.page_size,
                    category_id,
                })
                .await?;

            print_json(&page.pagination)?;
            print_json(&page.data)?;
        }
        Command::Products(ProductsCommand::Get { id }) => {
            print_json(&client.products().get(id).await?)?;
        }
        Command::Products(ProductsCommand::Delete { id }) => {
            print_json(&client.products().delete(id).await?)?;
        }
        Command::Categories(CategoriesCommand::List { page }) => {
            let page = client
                .categories()
                .list(ListCategories {
                    page_number: page.page_number,
                    page_size: page.page_size,
                })
                .await?;

            print_json(&page.pagination)?;
            print_json(&page.data)?;
        }
        Command::Categories(CategoriesCommand::Get { id }) => {
            print_json(&client.categories().get(id).await?)?;
        }
        Command::Demo => demo(&client).await?,
    }

    Ok(())
}

async fn demo(client: &NorthwindClient) -> Result<(), CliError> {
    let products = client.products();

    let first_page = products.list(ListProducts::default()).await?;

    for product in &first_page.data {
        info!(id = product.product_id, name = %product.product_name, "listed product");
    }

    let created = products
        .create(&NewProduct {
            product_name: "New Product".to_string(),
            supplier_id: Some(2),
            category_id: Some(1),
            quantity_per_unit: Some("10 boxes".to_string()),
            unit_price: Some(Decimal::new(5_075, 2)),
            units_in_stock: Some(100),
            ..NewProduct::default()
        })
        .await?;

    info!(id = created.product_id, "created product");

    products
        .update(
            created.product_id,
            &ProductUpdate {
                product_name: Some("Updated Product".to_string()),
                ..ProductUpdate::default()
            },
        )
        .await?;

    let fetched = products.get(created.product_id).await?;

    info!(id = fetched.product_id, name = %fetched.product_name, "fetched updated product");

    products.delete(created.product_id).await?;

    info!(id = created.product_id, "deleted product");

    Ok(())
}

#[tokio::main]
async fn main() {
    // A missing .env file is fine.
    _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(error) = run(Cli::parse()).await {
        tracing::error!("{error}");

        process::exit(1);
    }
}
