use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use client::{
    ClientConfig, ClientError, CompetitionBackend, ListController, QueryFacade, Transport,
    entries,
};
use storage::{
    dto::{
        competition::CreateCompetitionRequest,
        filter::{ALL, DeadlineWindow, FilterSelection, PrizeRange},
    },
    models::{Competition, Difficulty},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "catalog")]
#[command(about = "Browse and manage the competition catalog", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, value_enum, default_value_t = Transport::Http)]
    transport: Transport,

    #[arg(long, env = "CATALOG_API_URL", default_value = "http://localhost:8080")]
    api_url: String,

    #[arg(long, env = "CATALOG_API_KEY")]
    api_key: Option<String>,

    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    #[arg(long, env = "CATALOG_USER_ID")]
    user_id: Option<Uuid>,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List competitions
    List {
        #[command(flatten)]
        filters: FilterArgs,

        /// Show the archived tab instead of active competitions
        #[arg(long)]
        archived: bool,

        /// Admin ordering: newest first
        #[arg(long)]
        admin: bool,

        /// Case-insensitive title search
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one competition as JSON
    Show { id: Uuid },
    /// Create a competition from a JSON form
    Create { json: String },
    /// Update a competition; the JSON is merged over its current values
    Update { id: Uuid, json: String },
    Archive { id: Uuid },
    Restore { id: Uuid },
    Delete {
        id: Uuid,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Enter a competition as the configured user
    Enter { id: Uuid },
    /// Bookmark a competition for the configured user
    Save { id: Uuid },
}

#[derive(clap::Args)]
struct FilterArgs {
    #[arg(long, default_value = ALL)]
    category: String,

    #[arg(long, default_value = ALL)]
    difficulty: String,

    #[arg(long, default_value = ALL)]
    prize_range: PrizeRange,

    #[arg(long, default_value = ALL)]
    deadline: DeadlineWindow,
}

impl FilterArgs {
    fn selection(&self) -> anyhow::Result<FilterSelection> {
        let mut selection = FilterSelection::all()
            .with_prize_range(self.prize_range)
            .with_deadline(self.deadline);

        if self.category != ALL {
            selection = selection.with_category(self.category.as_str());
        }
        if self.difficulty != ALL {
            let difficulty: Difficulty = self
                .difficulty
                .parse()
                .with_context(|| format!("Invalid difficulty '{}'", self.difficulty))?;
            selection = selection.with_difficulty(difficulty);
        }

        Ok(selection)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("catalog={},client={}", log_level, log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = ClientConfig {
        transport: cli.transport,
        api_url: cli.api_url,
        api_key: cli.api_key,
        database_url: cli.database_url,
        user_id: cli.user_id,
    };

    let backend = config
        .backend()
        .await
        .context("Failed to set up the competition backend")?;
    tracing::debug!(backend = backend.name(), "Backend ready");

    match cli.command {
        Commands::List {
            filters,
            archived,
            admin,
            search,
        } => {
            let facade = QueryFacade::new(backend);
            let mut controller = if admin || archived {
                ListController::admin(facade, archived)
            } else {
                ListController::catalog(facade)
            };
            controller.set_selection(filters.selection()?).await?;
            if let Some(search) = search {
                controller.search(search);
            }
            print_list(&controller);
        }
        Commands::Show { id } => {
            let competition = backend.get(id).await?;
            println!("{}", serde_json::to_string_pretty(&competition)?);
        }
        Commands::Create { json } => {
            let form: CreateCompetitionRequest =
                serde_json::from_str(&json).context("Invalid competition JSON")?;
            let mut controller = admin_controller(backend);
            controller.edit(None);
            let created = submit(&mut controller, form).await?;
            println!("Created {} ({})", created.title, created.id);
        }
        Commands::Update { id, json } => {
            let patch: serde_json::Value =
                serde_json::from_str(&json).context("Invalid competition JSON")?;
            let record = backend.get(id).await?;
            let mut controller = admin_controller(backend);
            let form = merge_form(controller.edit(Some(&record)), patch)?;
            let updated = submit(&mut controller, form).await?;
            println!("Updated {} ({})", updated.title, updated.id);
        }
        Commands::Archive { id } => {
            admin_controller(backend).archive(id, true).await?;
            println!("Archived {id}");
        }
        Commands::Restore { id } => {
            admin_controller(backend).archive(id, false).await?;
            println!("Restored {id}");
        }
        Commands::Delete { id, yes } => {
            let mut controller = admin_controller(backend);
            let deleted = if yes {
                controller.delete(id, &|_: &str| true).await?
            } else {
                controller.delete(id, &prompt).await?
            };
            if deleted {
                println!("Deleted {id}");
            } else {
                println!("Cancelled");
            }
        }
        Commands::Enter { id } => {
            let entry = entries::enter(backend.as_ref(), &config.session(), id).await?;
            println!("Entered {} as {}", entry.competition_id, entry.user_id);
        }
        Commands::Save { id } => {
            let saved = entries::save(backend.as_ref(), &config.session(), id).await?;
            println!("Saved {} for {}", saved.competition_id, saved.user_id);
        }
    }

    Ok(())
}

fn admin_controller(backend: Arc<dyn CompetitionBackend>) -> ListController {
    ListController::admin(QueryFacade::new(backend), false)
}

async fn submit(
    controller: &mut ListController,
    form: CreateCompetitionRequest,
) -> anyhow::Result<Competition> {
    match controller.submit(form).await {
        Ok(competition) => Ok(competition),
        Err(e @ ClientError::ValidationError(_)) => {
            for message in e.field_messages() {
                eprintln!("  {message}");
            }
            Err(e.into())
        }
        Err(e) => Err(e.into()),
    }
}

/// Overlay the keys of `patch` on the pre-filled form
fn merge_form(
    form: &CreateCompetitionRequest,
    patch: serde_json::Value,
) -> anyhow::Result<CreateCompetitionRequest> {
    let serde_json::Value::Object(patch) = patch else {
        anyhow::bail!("Update JSON must be an object");
    };

    let mut merged = serde_json::to_value(form)?;
    if let serde_json::Value::Object(fields) = &mut merged {
        fields.extend(patch);
    }

    serde_json::from_value(merged).context("Invalid competition JSON")
}

fn prompt(question: &str) -> bool {
    print!("{question} [y/N] ");
    if io::stdout().flush().is_err() {
        return false;
    }

    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim(), "y" | "Y" | "yes")
}

fn print_list(controller: &ListController) {
    if let Some(empty) = controller.empty_state() {
        println!("No competitions found. {}", empty.message());
        return;
    }

    for competition in controller.visible() {
        println!(
            "{}  {:<36}  {:<12}  {:<8}  {:>16}  {}",
            competition.id,
            competition.title,
            competition.category,
            competition.difficulty.as_str(),
            competition.prize_value,
            competition.deadline,
        );
    }
}
