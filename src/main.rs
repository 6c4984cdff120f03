//! B2B Purchasing Portal - terminal session front end

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use b2b_portal::chat::{CompletionClient, CompletionError, CompletionRequest, GeminiClient};
use b2b_portal::domain::catalog::CategoryFilter;
use b2b_portal::seed;
use b2b_portal::session::{PortalSession, View};
use b2b_portal::storage::{CartStore, DEFAULT_CART_FILE};

/// Completion backend for the session: the real Gemini client when
/// `GEMINI_API_KEY` is set, otherwise a stub that always fails so the chat
/// degrades to its fallback reply instead of crashing the portal.
enum AssistantClient {
    Gemini(GeminiClient),
    Unconfigured,
}

impl CompletionClient for AssistantClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        match self {
            Self::Gemini(client) => client.complete(request).await,
            Self::Unconfigured => Err(CompletionError::Config("GEMINI_API_KEY is not set".into())),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let client = match GeminiClient::from_env() {
        Ok(client) => AssistantClient::Gemini(client),
        Err(err) => {
            tracing::warn!(error = %err, "assistant disabled, chat will use the fallback reply");
            AssistantClient::Unconfigured
        }
    };

    let cart_path = std::env::var("B2B_CART_PATH").unwrap_or_else(|_| DEFAULT_CART_FILE.to_string());
    let catalog = seed::demo_catalog();
    let orders = seed::demo_orders(&catalog);
    let mut session = PortalSession::new(seed::demo_account(), catalog, orders)
        .with_store(CartStore::new(&cart_path));

    tracing::info!(cart_path = %cart_path, "🛒 B2B purchasing portal ready");
    println!("Welcome to the B2B Purchasing Portal. Type 'help' for commands.\n");
    render(&session);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    print_prompt(&session);
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let (command, rest) = match line.split_once(' ') {
            Some((c, r)) => (c, r.trim()),
            None => (line, ""),
        };

        match command {
            "" => {}
            "help" => print_help(),
            "quit" | "exit" => break,
            "view" => match rest.parse::<View>() {
                Ok(view) => {
                    session.go_to(view);
                    render(&session);
                }
                Err(err) => println!("{err}"),
            },
            "search" => {
                session.go_to(View::Catalog);
                render_catalog(&session, rest, &CategoryFilter::All);
            }
            "category" => {
                session.go_to(View::Catalog);
                let filter = if rest.eq_ignore_ascii_case("all") {
                    CategoryFilter::All
                } else {
                    CategoryFilter::Named(rest.to_string())
                };
                render_catalog(&session, "", &filter);
            }
            "add" => match session.add_to_cart(rest) {
                Ok(()) => println!("Added {} to the cart ({} units total).", rest, session.cart().unit_count()),
                Err(err) => println!("{err}"),
            },
            "qty" => match rest.split_once(' ') {
                Some((id, delta)) => match delta.parse::<i32>() {
                    Ok(delta) => {
                        session.update_quantity(id.trim(), delta);
                        render_cart(&session);
                    }
                    Err(_) => println!("usage: qty <product-id> <delta>"),
                },
                None => println!("usage: qty <product-id> <delta>"),
            },
            "rm" => {
                session.remove_from_cart(rest);
                render_cart(&session);
            }
            "checkout" => match session.checkout() {
                Ok(order) => {
                    println!("Order {} placed: total {}.\n", order.id(), order.total());
                    render(&session);
                }
                Err(err) => println!("{err}"),
            },
            "ask" => {
                session.go_to(View::Assistant);
                session.ask(&client, rest).await;
                render_chat(&session);
            }
            other => println!("Unknown command '{other}'. Type 'help' for commands."),
        }
        for event in session.take_events() {
            tracing::debug!(?event, "domain event");
        }
        print_prompt(&session);
    }

    tracing::info!("session closed");
    Ok(())
}

fn print_prompt(session: &PortalSession) {
    println!("[{}] >", session.view().label());
}

fn print_help() {
    println!(
        "Commands:\n\
         \x20 view <dashboard|catalog|cart|orders|assistant>\n\
         \x20 search <text>          filter the catalog by name/description\n\
         \x20 category <name|all>    filter the catalog by category\n\
         \x20 add <product-id>       add one unit to the cart\n\
         \x20 qty <product-id> <n>   change a line's quantity by n (min 1)\n\
         \x20 rm <product-id>        remove a line from the cart\n\
         \x20 checkout               place the order (5% surcharge applies)\n\
         \x20 ask <question>         ask the purchasing assistant\n\
         \x20 quit"
    );
}

fn render(session: &PortalSession) {
    match session.view() {
        View::Dashboard => render_dashboard(session),
        View::Catalog => render_catalog(session, "", &CategoryFilter::All),
        View::Cart => render_cart(session),
        View::Orders => render_orders(session),
        View::Assistant => render_chat(session),
    }
}

fn render_dashboard(session: &PortalSession) {
    let account = session.account();
    println!("== Dashboard ==");
    println!("Hello, {} ({})", account.first_name(), account.company());
    println!(
        "Available credit: {}  ({:.0}% of the {} ceiling used)",
        account.available(),
        account.utilization_percent(),
        account.credit_limit()
    );
    println!(
        "Orders: {} total, {} pending",
        session.orders().len(),
        session.orders().pending_count()
    );
    if let Some(latest) = session.orders().latest() {
        println!("Latest order: {} - {} ({})", latest.id(), latest.total(), latest.status());
    }
}

fn render_catalog(session: &PortalSession, search: &str, category: &CategoryFilter) {
    println!("== Catalog ==");
    println!("Categories: all, {}", session.catalog().categories().join(", "));
    for p in session.catalog().filter(search, category) {
        let stock = if p.is_in_stock() { format!("{} in stock", p.stock()) } else { "out of stock".to_string() };
        println!("  [{}] {} - {} | {} | {} ({})", p.id(), p.name(), p.price(), p.category(), p.description(), stock);
    }
}

fn render_cart(session: &PortalSession) {
    println!("== Cart ==");
    if session.cart().is_empty() {
        println!("  (empty)");
        return;
    }
    for item in session.cart().items() {
        println!(
            "  [{}] {} - {} x {} = {}",
            item.product_id,
            item.name,
            item.unit_price,
            item.quantity,
            item.line_total()
        );
    }
    println!("Subtotal: {} (a 5% surcharge applies at checkout)", session.cart().subtotal());
}

fn render_orders(session: &PortalSession) {
    println!("== Orders ==");
    if session.orders().is_empty() {
        println!("  (no orders yet)");
        return;
    }
    for order in session.orders().orders() {
        println!(
            "  {} - {} - {} - {} item(s) - {}",
            order.id(),
            order.placed_at().format("%Y-%m-%d"),
            order.status(),
            order.items().len(),
            order.total()
        );
    }
}

fn render_chat(session: &PortalSession) {
    println!("== Assistant ==");
    for msg in session.chat().messages() {
        println!("  {}: {}", msg.role.label(), msg.text);
    }
}
