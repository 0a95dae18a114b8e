//! One-shot commands run without the TUI: `stockroom <command>`.

use std::io::{self, Write};
use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use tracing::{info, warn};

use stockroom_core::models::{filter_products, Credentials};
use stockroom_core::navigation::RecordingNavigator;
use stockroom_core::utils::truncate;
use stockroom_core::{ApiClient, ApiError, Config, CredentialStore, Route, Session};

const USAGE: &str = "\
Usage: stockroom [command]

Without a command the interactive terminal UI starts.

Commands:
  login              Log in and remember the session
  logout             Forget the stored session
  whoami             Show the account the stored session belongs to
  products [query]   List products, optionally filtered by name or description
  help               Show this message

Environment:
  STOCKROOM_API_URL  Backend base URL (default http://localhost:8080)
  RUST_LOG           Log filter, e.g. RUST_LOG=debug";

pub fn print_usage() {
    println!("{}", USAGE);
}

/// Run a command. `args` are the words after the command name.
pub async fn run(command: &str, args: &[String], config: Config) -> Result<()> {
    match command {
        "login" => login(config).await,
        "logout" => logout(&config),
        "whoami" => whoami(&config).await,
        "products" => products(&config, args).await,
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" => {
            println!("stockroom {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            bail!("Unknown command: {}", other)
        }
    }
}

/// The CLI has no pages to switch, so navigations are only recorded. A
/// recorded `/login` means the backend ended the session.
struct CliContext {
    session: Arc<Session>,
    navigator: Arc<RecordingNavigator>,
    api: ApiClient,
}

impl CliContext {
    fn open(config: &Config) -> Result<Self> {
        let store = CredentialStore::open(config.data_dir().ok());
        let navigator = Arc::new(RecordingNavigator::new());
        let session = Arc::new(Session::new(store, navigator.clone()));
        let api = ApiClient::from_config(config, session.clone())?;
        Ok(Self {
            session,
            navigator,
            api,
        })
    }

    fn require_session(&self) -> Result<()> {
        if self.session.is_authenticated() {
            Ok(())
        } else {
            bail!("Not logged in. Run `stockroom login` first.")
        }
    }

    /// Turn an API failure into the message a user should see.
    fn explain(&self, err: ApiError) -> anyhow::Error {
        if self.navigator.last() == Some(Route::Login) {
            anyhow!("{}\nThe stored session was cleared. Run `stockroom login`.", err)
        } else {
            anyhow::Error::new(err)
        }
    }
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", label);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

async fn login(mut config: Config) -> Result<()> {
    let ctx = CliContext::open(&config)?;

    println!("\n=== Stockroom Login ===\n");

    let username = match config.last_username.clone() {
        Some(last) => {
            let input = prompt(&format!("Username [{}]: ", last))?;
            if input.is_empty() {
                last
            } else {
                input
            }
        }
        None => prompt("Username: ")?,
    };
    let password = rpassword::prompt_password("Password: ").context("Failed to read password")?;

    let credentials = Credentials::new(username, password);
    if let Err(errors) = credentials.validate_login() {
        bail!("{}", errors);
    }

    println!("\nAuthenticating...");
    let response = ctx
        .api
        .login(&credentials)
        .await
        .map_err(|e| anyhow!("Login failed: {}", e))?;

    ctx.session.init(&response.token, Some(&response.user));

    config.last_username = Some(response.user.username.clone());
    if let Err(e) = config.save() {
        warn!(error = %e, "Failed to save config");
    }

    info!(username = %response.user.username, "Logged in from CLI");
    println!("Login successful!\n");
    Ok(())
}

fn logout(config: &Config) -> Result<()> {
    let ctx = CliContext::open(config)?;
    ctx.session.clear();
    println!("Logged out successfully");
    Ok(())
}

async fn whoami(config: &Config) -> Result<()> {
    let ctx = CliContext::open(config)?;
    ctx.require_session()?;

    let user = ctx.api.current_user().await.map_err(|e| ctx.explain(e))?;
    println!("Username: {}", user.username);
    if let Some(email) = user.email {
        println!("Email:    {}", email);
    }
    if let Some(id) = user.id {
        println!("User ID:  {}", id);
    }
    println!("Backend:  {}", ctx.api.base_url());
    Ok(())
}

async fn products(config: &Config, args: &[String]) -> Result<()> {
    let ctx = CliContext::open(config)?;
    ctx.require_session()?;

    let products = ctx.api.list_products().await.map_err(|e| ctx.explain(e))?;
    let query = args.join(" ");
    let matches = filter_products(&products, &query);

    if matches.is_empty() {
        println!("No products found.");
        return Ok(());
    }

    println!("{:>6}  {:<28}  {:>12}  {}", "ID", "NAME", "PRICE", "DESCRIPTION");
    for product in &matches {
        println!(
            "{:>6}  {:<28}  {:>12}  {}",
            product.id,
            truncate(&product.name, 28),
            product.price_display(),
            truncate(&product.description, 40),
        );
    }
    println!("\n{} of {} products", matches.len(), products.len());
    Ok(())
}
