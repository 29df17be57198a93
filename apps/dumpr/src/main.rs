use std::sync::Arc;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use client_core::{gesture::SETTLE_DELAY, AppContext, Point, TriageController, TriageOutcome};
use shared::{domain::ItemId, repository::ItemRepository};
use storage::Storage;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;

use config::{load_settings, normalize_database_url};

/// Capture thoughts into an inbox and swipe them into lists.
#[derive(Parser, Debug)]
#[command(name = "dumpr")]
struct Cli {
    #[arg(long)]
    database_url: Option<String>,
    /// Sign in as this user (created on first use).
    #[arg(long)]
    user: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add a new item to the inbox.
    Capture {
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Show the triage queue.
    Inbox,
    /// Drag the current card by (dx, dy) and apply the result.
    Swipe {
        #[arg(long, allow_hyphen_values = true)]
        dx: f64,
        #[arg(long, allow_hyphen_values = true)]
        dy: f64,
        /// Number of move samples between press and release.
        #[arg(long, default_value_t = 4)]
        steps: u32,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// File the item without editing its details.
        #[arg(long, conflicts_with_all = ["title", "description"])]
        skip: bool,
    },
    /// Show active items grouped by list.
    Lists {
        #[arg(long)]
        json: bool,
    },
    /// Mark an item as done.
    Complete { id: i64 },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut settings = load_settings();
    if let Some(url) = cli.database_url {
        settings.database_url = url;
    }
    if let Some(user) = cli.user {
        settings.username = Some(user);
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let database_url = normalize_database_url(&settings.database_url);
    let storage = Storage::new(&database_url).await?;
    let Some(username) = settings.username.as_deref() else {
        bail!("not signed in; pass --user or set DUMPR__USER");
    };
    let user_id = storage.create_user(username).await?;
    info!(database_url = %database_url, user_id = user_id.0, "starting dumpr");

    let repository: Arc<dyn ItemRepository> = Arc::new(storage);
    let mut controller = TriageController::new(AppContext::new(repository, Some(user_id)));
    controller.load().await?;

    match cli.command {
        Command::Capture { text } => {
            let item = controller.capture(&text.join(" ")).await?;
            println!("captured #{}: {}", item.id, item.text);
        }
        Command::Inbox => print_inbox(&controller),
        Command::Swipe {
            dx,
            dy,
            steps,
            title,
            description,
            skip,
        } => {
            swipe(&mut controller, dx, dy, steps.max(1)).await?;
            if let Some(pending) = controller.pending_details().cloned() {
                let filed = if skip {
                    controller.skip_details().await?
                } else {
                    let title = title.unwrap_or(pending.title);
                    let description = description.unwrap_or(pending.description);
                    controller.confirm_details(&title, &description).await?
                };
                println!("filed #{filed} under {}", pending.status.label());
            }
            print_inbox(&controller);
        }
        Command::Lists { json } => print_lists(&controller, json)?,
        Command::Complete { id } => {
            controller.complete_item(ItemId(id)).await?;
            println!("completed #{id}");
        }
    }

    Ok(())
}

async fn swipe(controller: &mut TriageController, dx: f64, dy: f64, steps: u32) -> Result<()> {
    let Some(current) = controller.current_item() else {
        println!("Inbox Zero!");
        return Ok(());
    };
    println!("swiping #{}: {}", current.id, current.text);

    if !controller.pointer_down(Point::new(0.0, 0.0)) {
        bail!("the current card is not accepting gestures");
    }
    let mut last_hint = None;
    for step in 1..=steps {
        let t = f64::from(step) / f64::from(steps);
        let hint = controller.pointer_move(Point::new(dx * t, dy * t));
        if hint != last_hint {
            let feedback = controller.feedback();
            println!(
                "  at ({:.0}, {:.0}) rotate {:.1}deg hint {}",
                feedback.offset.dx,
                feedback.offset.dy,
                feedback.rotation_deg,
                feedback.hint_label().unwrap_or("-"),
            );
            last_hint = hint;
        }
    }

    let outcome = controller.pointer_up().await?;
    tokio::time::sleep(SETTLE_DELAY).await;
    controller.settle();

    match outcome {
        TriageOutcome::Discarded => println!("not far enough; card stays in the inbox"),
        TriageOutcome::Trashed(id) => println!("trashed #{id}"),
        TriageOutcome::DetailsRequested(pending) => {
            println!("add details - {}", pending.status.label())
        }
    }
    Ok(())
}

fn print_inbox(controller: &TriageController) {
    let queue = controller.queue();
    let Some(head) = queue.first() else {
        println!("Inbox Zero!");
        return;
    };
    println!("1 of {} items", queue.len());
    println!("> #{} {}", head.id, head.text);
    for item in queue.iter().skip(1) {
        println!("  #{} {}", item.id, item.text);
    }
}

fn print_lists(controller: &TriageController, json: bool) -> Result<()> {
    let lists = controller.lists();
    if json {
        println!("{}", serde_json::to_string_pretty(&lists)?);
        return Ok(());
    }

    for list in lists {
        println!("{} ({} items)", list.label, list.items.len());
        if list.items.is_empty() {
            println!("  No items");
        }
        for item in list.items {
            println!("  #{} {}", item.id, item.display_title());
            if let Some(description) = item.description.as_deref().filter(|d| !d.is_empty()) {
                println!("      {description}");
            }
        }
    }
    Ok(())
}
