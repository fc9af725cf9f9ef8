//! User Dashboard - command-line front end for the user store.

use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dashboard_lib::render::{render_table, render_user};
use dashboard_lib::table::{FilterColumn, SortKey};
use dashboard_lib::{DashboardConfig, HttpUserApi, UserConsole};
use domain::{UserId, UserPatch};

#[derive(Parser)]
#[command(name = "dashboard")]
#[command(about = "User management dashboard")]
struct Cli {
    /// User API root
    #[arg(long, global = true, env = "USERS_API_URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List users as a table
    List {
        /// Search name, email, role, team and status
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        role: Option<String>,
        #[arg(long)]
        team: Option<String>,
        #[arg(long)]
        status: Option<String>,
        /// Sort by `column[:asc|desc]`; repeat for a multi-column sort
        #[arg(long)]
        sort: Vec<SortKey>,
        /// One-based page number
        #[arg(long, default_value = "1")]
        page: usize,
        #[arg(long, env = "DASHBOARD_PAGE_SIZE")]
        page_size: Option<usize>,
    },
    /// Show one user
    Show { id: UserId },
    /// Create a user
    Create(UserFields),
    /// Update a user's supplied fields
    Update {
        id: UserId,
        #[command(flatten)]
        fields: UserFields,
    },
    /// Delete a user
    Delete {
        id: UserId,
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Args)]
struct UserFields {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    role: Option<String>,
    #[arg(long)]
    team: Option<String>,
    #[arg(long)]
    status: Option<String>,
}

impl From<UserFields> for UserPatch {
    fn from(fields: UserFields) -> Self {
        Self {
            name: fields.name,
            email: fields.email,
            role: fields.role,
            team: fields.team,
            status: fields.status,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let mut config = DashboardConfig::from_env();
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }

    let api = Arc::new(HttpUserApi::new(&config.api_url)?);
    let mut console = UserConsole::new(api, config.page_size);

    match cli.command {
        Commands::List {
            search,
            role,
            team,
            status,
            sort,
            page,
            page_size,
        } => {
            console.load().await?;

            let table = console.table_mut();
            if let Some(page_size) = page_size {
                table.set_page_size(page_size);
            }
            table.set_global_filter(search.unwrap_or_default());
            for (column, value) in [
                (FilterColumn::Role, role),
                (FilterColumn::Team, team),
                (FilterColumn::Status, status),
            ] {
                table.set_column_filter(column, value.unwrap_or_default());
            }
            table.set_sort_keys(sort);

            for _ in 1..page {
                console.next_page();
            }

            let view = console.view();
            print!("{}", render_table(&view, console.table().selection()));
        }
        Commands::Show { id } => {
            console.load().await?;
            let user = console.user(id).await?;
            console.management_mut().open_showcase(&user);
            print!("{}", render_user(&user));
        }
        Commands::Create(fields) => {
            console.load().await?;
            console.management_mut().open_add();
            if let Some(user) = console.submit_drawer(fields.into()).await? {
                println!("Created user {}", user.id);
                print!("{}", render_user(&user));
            }
        }
        Commands::Update { id, fields } => {
            console.load().await?;
            let user = console.user(id).await?;
            console.management_mut().open_edit(&user);
            if let Some(user) = console.submit_drawer(fields.into()).await? {
                println!("Updated user {}", user.id);
                print!("{}", render_user(&user));
            }
        }
        Commands::Delete { id, yes } => {
            console.load().await?;
            let user = console.user(id).await?;
            console.management_mut().open_delete(&user);

            if !yes {
                console.management_mut().cancel_delete();
                println!("Not deleting {} ({}); pass --yes to confirm", user.name, user.id);
                return Ok(());
            }

            if let Some(user) = console.confirm_delete().await? {
                println!("Deleted user {} ({})", user.name, user.id);
            }
        }
    }

    Ok(())
}
