//! Storefront Cart - command-line front end

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use storefront_cart::{CartManager, CartLineItem, Config, FileStore, HttpOrderApi, OrderApi, OrderConfirmation, Product, User};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "storefront-cart", about = "Manage the storefront shopping cart")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show the cart and its totals
    List,
    /// Add a product, given as catalog JSON (or @path to a JSON file)
    Add { product: String, #[arg(short, long, default_value_t = 1)] quantity: u32 },
    /// Set a line's quantity; 0 removes it
    Update { product_id: i64, quantity: u32 },
    /// Remove a line
    Remove { product_id: i64 },
    /// Empty the cart
    Clear,
    /// Place an order with the current cart
    Checkout,
    /// Store the signed-in user, given as JSON (or @path)
    Login { user: String },
    /// Sign out and drop the cart
    Logout,
    /// List the signed-in user's orders
    Orders,
    /// Cancel one of the signed-in user's orders
    Cancel { order_id: i64 },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())).with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr)).init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let store = Arc::new(FileStore::new(config.data_dir.clone()));
    let api = Arc::new(HttpOrderApi::from_config(&config)?);
    let cart = CartManager::from_config(&config, store, api.clone());
    tracing::debug!(data_dir = %config.data_dir.display(), api = %config.api_url, "cart ready");

    match cli.command {
        Command::List => print_cart(&cart, &cart.items()),
        Command::Add { product, quantity } => {
            let product = Product::from_json(&read_arg(&product)?).context("invalid product")?;
            let items = cart.add_item(&product, quantity)?;
            print_cart(&cart, &items);
        }
        Command::Update { product_id, quantity } => {
            let items = cart.update_quantity(product_id, quantity)?;
            print_cart(&cart, &items);
        }
        Command::Remove { product_id } => {
            let items = cart.remove_item(product_id)?;
            print_cart(&cart, &items);
        }
        Command::Clear => cart.clear()?,
        Command::Checkout => {
            let order = cart.finalize_purchase().await?;
            println!("Pedido #{} creado. Total: ${:.2}", order.id, order.total);
        }
        Command::Login { user } => {
            let user: User = serde_json::from_str(&read_arg(&user)?).context("invalid user")?;
            cart.session().sign_in(&user)?;
        }
        Command::Logout => cart.logout()?,
        Command::Orders => {
            let user_id = cart.session().current_user_id().context("not logged in")?;
            for order in api.orders_for_user(user_id).await? {
                print_order(&order);
            }
        }
        Command::Cancel { order_id } => {
            cart.session().current_user_id().context("not logged in")?;
            print_order(&api.cancel_order(order_id).await?);
        }
    }
    Ok(())
}

fn read_arg(arg: &str) -> Result<String> {
    match arg.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(path).with_context(|| format!("reading {path}")),
        None => Ok(arg.to_string()),
    }
}

fn print_cart(cart: &CartManager, items: &[CartLineItem]) {
    if items.is_empty() {
        println!("Tu carrito está vacío");
        return;
    }
    for item in items {
        let product = item.product();
        println!("{:>4}  {:<30} {:>3} x ${:>10.2} = ${:>10.2}", product.id, product.name, item.quantity(), product.price, item.subtotal());
    }
    let summary = cart.summary();
    println!("Subtotal: {}", summary.subtotal);
    if summary.shipping.is_zero() { println!("Envío: Gratis"); } else { println!("Envío: {}", summary.shipping); }
    println!("Total: {}", summary.total);
}

fn print_order(order: &OrderConfirmation) {
    let status = order.status.map(|s| s.label()).unwrap_or("-");
    let date = order.placed_on().map(|d| d.to_string()).unwrap_or_default();
    println!("#{:<6} {:<12} {:<10} ${:.2}", order.id, status, date, order.total);
}
