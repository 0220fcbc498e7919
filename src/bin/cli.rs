use clap::{Parser, Subcommand};
use tracing::warn;

use carboncalc_client::api::ApiClient;
use carboncalc_client::cart::{cart_item_count, cart_subtotal, cart_total_offset_kg};
use carboncalc_client::catalog::{self, ProductFilter, SortKey, PAGE_SIZE};
use carboncalc_client::config::Config;
use carboncalc_client::models::{DietType, Order, Product, SurveyRequest};
use carboncalc_client::storage::LocalStore;
use carboncalc_client::wishlist::Wishlist;

#[derive(Parser)]
#[command(name = "carboncalc-cli")]
#[command(about = "CLI for the CarbonCalc marketplace", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account
    Register {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
    },
    /// Log in and persist the bearer token locally
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
    },
    /// Drop the stored bearer token
    Logout,
    /// Browse the catalog
    Products {
        #[arg(long)]
        min_price: Option<f64>,
        #[arg(long)]
        max_price: Option<f64>,
        /// One of: name, price-low, price-high, offset
        #[arg(short, long, default_value = "name")]
        sort: String,
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },
    /// Show one listing
    Product { id: i64 },
    /// Show the cart
    Cart,
    /// Add a listing to the cart
    CartAdd {
        id: i64,
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Set a cart line's quantity
    CartUpdate { id: i64, quantity: u32 },
    /// Remove a cart line
    CartRemove { id: i64 },
    /// Empty the cart
    CartClear,
    /// Toggle a listing on the wishlist
    Wish { id: i64 },
    /// Show wishlisted listings
    Wishlist,
    /// Empty the wishlist
    WishlistClear,
    /// Record a simulated contribution for one listing
    Support {
        id: i64,
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Turn every cart line into a contribution, then clear the cart
    Checkout,
    /// Order history
    Orders,
    /// Show one order
    Order { id: i64 },
    /// Submit the lifestyle survey
    Survey {
        #[arg(long)]
        monthly_mileage: f64,
        #[arg(long)]
        electricity_bill: f64,
        /// One of: Vegetarian, Non-Vegetarian, Vegan
        #[arg(long, default_value = "Non-Vegetarian")]
        diet: String,
    },
    /// List eco-challenges
    Goals,
    /// Accept an eco-challenge
    GoalAccept { user_id: i64, goal_id: i64 },
}

fn parse_sort(value: &str) -> Option<SortKey> {
    match value {
        "name" => Some(SortKey::Name),
        "price-low" => Some(SortKey::PriceLowToHigh),
        "price-high" => Some(SortKey::PriceHighToLow),
        "offset" => Some(SortKey::OffsetHighToLow),
        _ => None,
    }
}

fn parse_diet(value: &str) -> Option<DietType> {
    match value {
        "Vegetarian" => Some(DietType::Vegetarian),
        "Non-Vegetarian" => Some(DietType::NonVegetarian),
        "Vegan" => Some(DietType::Vegan),
        _ => None,
    }
}

fn print_product(product: &Product) {
    let impact = product.carbon_offset.as_deref().unwrap_or("-");
    println!(
        "#{:<5} {:<32} ${:>8.2}  {:<14} {}",
        product.id, product.name, product.price, product.category, impact
    );
}

fn print_order(order: &Order) {
    let name = order
        .marketplace_item
        .as_ref()
        .map(|item| item.name.as_str())
        .unwrap_or("Eco Product");
    let when = order
        .created_at
        .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string());
    println!(
        "Order #{:<5} {:<10} {:<17} x{:<3} ${:>8.2} {}",
        order.id,
        order.status,
        when,
        order.quantity,
        order.total_amount.unwrap_or(0.0),
        name
    );
}

/// Badge refresh after a cart mutation; best effort, the mutation itself
/// already succeeded.
async fn print_cart_badge(client: &ApiClient) {
    match client.cart_count().await {
        Ok(count) => println!("Cart: {count} item(s)"),
        Err(err) => warn!(error = %err, "cart count refresh failed"),
    }
}

async fn run(command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load();
    let store = LocalStore::open(&config.data_dir)?;
    let mut client = ApiClient::from_config(&config, &store)?;

    match command {
        Commands::Register { username, password } => {
            let message = client.register(&username, &password).await?;
            println!("{message}");
        }
        Commands::Login { username, password } => {
            let jwt = client.login(&username, &password).await?;
            store.set_token(&jwt)?;
            println!("Logged in. Token saved locally.");
        }
        Commands::Logout => {
            store.clear_token()?;
            client.clear_token();
            println!("Logged out (token cleared).");
        }
        Commands::Products {
            min_price,
            max_price,
            sort,
            page,
        } => {
            let key = parse_sort(&sort)
                .ok_or("sort must be one of: name, price-low, price-high, offset")?;
            let filter = ProductFilter {
                category: None,
                min_price,
                max_price,
            };
            let mut products = client.list_products(&filter).await?;
            catalog::sort_products(&mut products, key);
            let total = products.len();
            for product in catalog::paginate(&products, page, PAGE_SIZE) {
                print_product(product);
            }
            println!(
                "Page {page} of {} ({total} listings)",
                catalog::total_pages(total, PAGE_SIZE)
            );
        }
        Commands::Product { id } => {
            let product = client.get_product(id).await?;
            print_product(&product);
            if !product.description.is_empty() {
                println!("  {}", product.description);
            }
            if let Some(seller) = &product.seller {
                println!("  Sold by {seller}");
            }
        }
        Commands::Cart => {
            let items = client.get_cart().await?;
            if items.is_empty() {
                println!("Your cart is empty");
                return Ok(());
            }
            for item in &items {
                println!(
                    "#{:<5} {:<32} x{:<3} ${:>8.2}",
                    item.id,
                    item.marketplace_item.name,
                    item.quantity,
                    item.marketplace_item.price * f64::from(item.quantity),
                );
            }
            println!("Items: {}", cart_item_count(&items));
            let offset = cart_total_offset_kg(&items);
            if offset > 0.0 {
                println!("Total carbon offset: -{offset:.1}kg CO2");
            }
            println!("Total: ${:.2}", cart_subtotal(&items));
        }
        Commands::CartAdd { id, quantity } => {
            client.add_to_cart(id, quantity).await?;
            println!("Added to cart");
            print_cart_badge(&client).await;
        }
        Commands::CartUpdate { id, quantity } => {
            client.update_cart_item(id, quantity).await?;
            println!("Quantity updated");
            print_cart_badge(&client).await;
        }
        Commands::CartRemove { id } => {
            client.remove_from_cart(id).await?;
            println!("Item removed from cart");
            print_cart_badge(&client).await;
        }
        Commands::CartClear => {
            client.clear_cart().await?;
            println!("Cart cleared");
            print_cart_badge(&client).await;
        }
        Commands::Wish { id } => {
            let wishlist = Wishlist::new(store.clone());
            if wishlist.toggle(id)? {
                println!("Added to wishlist");
            } else {
                println!("Removed from wishlist");
            }
        }
        Commands::Wishlist => {
            let wishlist = Wishlist::new(store.clone());
            if wishlist.ids()?.is_empty() {
                println!("Your wishlist is empty");
                return Ok(());
            }
            let full_catalog = client.list_products(&ProductFilter::default()).await?;
            let saved = wishlist.resolve(&full_catalog)?;
            for product in &saved {
                print_product(product);
            }
            let value: f64 = saved.iter().map(|product| product.price).sum();
            println!("{} item(s) saved, total value ${value:.2}", saved.len());
        }
        Commands::WishlistClear => {
            let wishlist = Wishlist::new(store.clone());
            wishlist.clear()?;
            println!("Wishlist cleared");
        }
        Commands::Support { id, quantity } => {
            let order = client.create_transaction(id, quantity).await?;
            println!("Contribution recorded (simulated). Order #{}", order.id);
        }
        Commands::Checkout => {
            let items = client.get_cart().await?;
            if items.is_empty() {
                println!("Your cart is empty");
                return Ok(());
            }
            for item in &items {
                let order = client
                    .create_transaction(item.marketplace_item.id, item.quantity)
                    .await?;
                println!("Order #{} for {}", order.id, item.marketplace_item.name);
            }
            client.clear_cart().await?;
            println!("Checkout complete (simulated); cart cleared");
            print_cart_badge(&client).await;
        }
        Commands::Orders => {
            let orders = client.list_orders().await?;
            if orders.is_empty() {
                println!("No orders yet");
                return Ok(());
            }
            for order in &orders {
                print_order(order);
            }
        }
        Commands::Order { id } => {
            let order = client.get_order(id).await?;
            print_order(&order);
            if order.status.can_cancel() {
                println!("  (still pending; the backend may cancel it)");
            }
        }
        Commands::Survey {
            monthly_mileage,
            electricity_bill,
            diet,
        } => {
            let diet_type = parse_diet(&diet)
                .ok_or("diet must be one of: Vegetarian, Non-Vegetarian, Vegan")?;
            let record = client
                .submit_survey(&SurveyRequest {
                    monthly_mileage,
                    electricity_bill,
                    diet_type,
                })
                .await?;
            println!("Survey submitted successfully!");
            if let Some(footprint) = record.carbon_footprint {
                println!("Estimated footprint: {footprint:.1} kg CO2e / month");
            }
        }
        Commands::Goals => {
            let goals = client.list_goals().await?;
            for goal in &goals {
                println!(
                    "#{:<4} {}",
                    goal.id,
                    goal.title.as_deref().unwrap_or("(untitled)")
                );
                if let Some(description) = &goal.description {
                    println!("      {description}");
                }
            }
        }
        Commands::GoalAccept { user_id, goal_id } => {
            client.accept_goal(user_id, goal_id).await?;
            println!("Goal started!");
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(cli.command).await {
        // Failures are reported, never fatal panics; rerunning is safe except
        // for contributions, which carry no deduplication token
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
