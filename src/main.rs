use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Read};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use restaurant_order::models::OrderFile;
use restaurant_order::session::{SessionCommand, HELP};
use restaurant_order::view;
use restaurant_order::{ApiClient, CartController, CheckoutOutcome, Endpoints, Settings};

#[derive(Parser)]
#[command(name = "restaurant-order")]
#[command(about = "Browse the restaurant menu and place orders", long_about = None)]
struct Cli {
    /// Settings file (default: <config dir>/restaurant-order/config.yml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Serve all endpoints from one base URL (<base>/menu, /orders, /order)
    #[arg(long, global = true)]
    api_base: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the menu
    Menu {
        /// Only dishes from this category
        #[arg(long, short = 'c')]
        category: Option<String>,
    },

    /// Interactive session: browse, fill the cart and check out
    Browse,

    /// Place an order from a YAML order file
    Order {
        /// Path to the order file (use '-' for stdin)
        order_file: String,
    },

    /// Show an existing order
    Status {
        order_id: i64,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    let mut settings = Settings::load(cli.config.as_deref()).context("Failed to load settings")?;
    if let Some(base) = &cli.api_base {
        settings.endpoints = Endpoints::with_base(base);
    }
    let api = ApiClient::new(settings.endpoints.clone());

    match cli.command {
        Commands::Menu { category } => {
            let dishes = api
                .get_menu(category.as_deref())
                .await
                .context("Failed to fetch menu")?;
            let dishes: Vec<_> = dishes.iter().collect();
            print!("{}", view::render_dish_grid(&dishes));
        }
        Commands::Browse => {
            let mut controller = CartController::new(api, settings.customer);
            println!("🍽️  Loading menu...");
            controller.load_menu().await;
            flush_notifications(&mut controller);
            print_menu(&controller);
            run_session(&mut controller).await?;
        }
        Commands::Order { order_file } => {
            // Read order file
            let input = if order_file == "-" {
                let mut input = String::new();
                io::stdin().read_to_string(&mut input)?;
                input
            } else {
                std::fs::read_to_string(&order_file)
                    .context(format!("Failed to read order from {}", order_file))?
            };

            let order: OrderFile =
                serde_yaml::from_str(&input).context("Failed to parse order YAML")?;

            let customer = order.customer.clone().unwrap_or(settings.customer);
            let mut controller = CartController::new(api, customer);
            place_order_file(&mut controller, order).await?;
        }
        Commands::Status { order_id } => {
            let order = api
                .get_order(order_id)
                .await
                .context(format!("Failed to fetch order {}", order_id))?;
            print!("{}", view::render_order_details(&order));
        }
    }

    Ok(())
}

async fn run_session(controller: &mut CartController) -> Result<()> {
    println!("Type 'help' for commands.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let command = match SessionCommand::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("   {}", e);
                continue;
            }
        };

        match command {
            SessionCommand::Menu => print_menu(controller),
            SessionCommand::Tabs => {
                println!(
                    "{}",
                    view::render_category_tabs(&controller.categories(), controller.selected_category())
                );
            }
            SessionCommand::Category(category) => {
                if controller.select_category(&category) {
                    print_menu(controller);
                }
            }
            SessionCommand::Add(dish_id) => {
                controller.add_to_cart(&dish_id);
                println!("   🛒 {} item(s) in cart", controller.cart_count());
            }
            SessionCommand::Increment(dish_id) => {
                if controller.increment(&dish_id) {
                    print_cart(controller);
                }
            }
            SessionCommand::Decrement(dish_id) => {
                if controller.decrement(&dish_id) {
                    print_cart(controller);
                }
            }
            SessionCommand::Quantity { dish_id, quantity } => {
                if controller.update_quantity(&dish_id, quantity) {
                    print_cart(controller);
                }
            }
            SessionCommand::OpenCart => {
                controller.open_cart();
                print_cart(controller);
            }
            SessionCommand::CloseCart => controller.close_cart(),
            SessionCommand::Customer(customer) => {
                println!("   Ordering as {} ({})", customer.name, customer.phone);
                controller.set_customer(customer);
            }
            SessionCommand::Checkout => {
                println!("   ⏳ Placing order...");
                controller.checkout().await;
            }
            SessionCommand::Status(order_id) => {
                if let Some(order) = controller.track_order(order_id).await {
                    print!("{}", view::render_order_details(&order));
                }
            }
            SessionCommand::Help => println!("{}", HELP),
            SessionCommand::Quit => break,
        }

        flush_notifications(controller);
    }

    if controller.cart_count() > 0 {
        println!("👋 Leaving with {} unsubmitted item(s) in the cart", controller.cart_count());
    }

    Ok(())
}

async fn place_order_file(controller: &mut CartController, order: OrderFile) -> Result<()> {
    println!("🍽️  Loading menu...");
    controller.load_menu().await;
    if controller.dishes().is_empty() {
        flush_notifications(controller);
        anyhow::bail!("Menu is unavailable, nothing was ordered");
    }

    for (index, line) in order.items.iter().enumerate() {
        println!("📦 [{}/{}] Dish {} x {}", index + 1, order.items.len(), line.id, line.quantity);
    }
    let skipped = controller.fill_from(&order);

    print_cart(controller);
    if !skipped.is_empty() {
        println!("\x1b[33mSkipped: {}\x1b[0m", skipped.join(", "));
    }

    let outcome = controller.checkout().await;
    flush_notifications(controller);

    match outcome {
        CheckoutOutcome::Placed(created) => {
            println!("✅ Order #{} is {}", created.order_id, created.status);
            Ok(())
        }
        CheckoutOutcome::EmptyCart => anyhow::bail!("No orderable dishes in the order file"),
        CheckoutOutcome::MissingCustomer => anyhow::bail!("Customer name and phone are required"),
        CheckoutOutcome::Failed => anyhow::bail!("The order was not accepted"),
    }
}

fn print_menu(controller: &CartController) {
    println!(
        "\n{}",
        view::render_category_tabs(&controller.categories(), controller.selected_category())
    );
    print!("{}", view::render_dish_grid(&controller.filtered_dishes()));
}

fn print_cart(controller: &CartController) {
    print!(
        "{}",
        view::render_cart_drawer(controller.cart_items(), controller.total())
    );
}

fn flush_notifications(controller: &mut CartController) {
    for notification in controller.drain_notifications() {
        println!("   {}", view::render_notification(&notification));
    }
}
