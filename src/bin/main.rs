use std::str::FromStr;

use clap::{Args, Parser, Subcommand};
use student_profile::{
    cli::profile::{get_profile, list_profiles, search_profiles, suggest_profiles, ProfileLookup},
    core::db::init_pool,
    domain::search::SearchUsersParams,
    repository::profile::UserProfileDbRepository,
    settings::{get_config, Config},
};
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use uuid::Uuid;

#[derive(Parser)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Student profile related command
    Profile(ProfileArgs),
}

#[derive(Debug, Args)]
struct ProfileArgs {
    #[command(subcommand)]
    command: ProfileCommands,
}

#[derive(Debug, Subcommand)]
enum ProfileCommands {
    /// Get one profile
    Get {
        #[arg(long, group = "lookup")]
        user_id: Option<Uuid>,
        #[arg(long, group = "lookup")]
        id: Option<Uuid>,
        #[arg(long, group = "lookup")]
        parent_code: Option<String>,
    },
    /// List profiles by id
    List {
        #[arg(long = "id", required = true)]
        ids: Vec<Uuid>,
    },
    /// Suggest profiles to a user
    Suggest {
        #[arg(long)]
        user_id: Uuid,
        #[arg(long, default_value = "")]
        text: String,
        #[arg(long)]
        include: Vec<Uuid>,
        #[arg(long)]
        exclude: Vec<Uuid>,
        #[arg(long, default_value_t = 1)]
        page: i64,
        #[arg(long, default_value_t = 10)]
        page_size: i64,
    },
    /// Faceted search over student profiles
    Search {
        #[arg(long, default_value_t = 1)]
        page: i64,
        #[arg(long, default_value_t = 10)]
        page_size: i64,
        #[command(flatten)]
        filters: SearchFilters,
    },
}

#[derive(Debug, Args)]
struct SearchFilters {
    #[arg(long)]
    school: Vec<Uuid>,
    #[arg(long)]
    grade_level: Vec<String>,
    #[arg(long)]
    state: Vec<String>,
    #[arg(long)]
    activity: Vec<String>,
    #[arg(long)]
    activity_category: Vec<String>,
    #[arg(long)]
    application: Vec<String>,
    #[arg(long)]
    award: Vec<String>,
    #[arg(long)]
    course: Vec<String>,
    #[arg(long)]
    subject: Vec<String>,
    #[arg(long)]
    grade: Vec<String>,
    #[arg(long)]
    role: Vec<String>,
    #[arg(long)]
    voluntary: Vec<String>,
    #[arg(long)]
    work: Vec<String>,
    #[arg(long)]
    college: Vec<String>,
}

impl From<SearchFilters> for SearchUsersParams {
    fn from(value: SearchFilters) -> Self {
        Self {
            school: value.school,
            grade_level: value.grade_level,
            state: value.state,
            activity: value.activity,
            activity_category: value.activity_category,
            application: value.application,
            award: value.award,
            course: value.course,
            subject: value.subject,
            grade: value.grade,
            role: value.role,
            voluntary: value.voluntary,
            work: value.work,
            college: value.college,
            karma_tag: vec![],
        }
    }
}

fn init_logging(config: &Config) -> Option<WorkerGuard> {
    let log_level = config
        .log_level
        .as_deref()
        .and_then(|x| Level::from_str(x).ok())
        .unwrap_or(Level::INFO);
    match &config.log_dir {
        // Logging to File
        Some(dir) => {
            let file_appender = tracing_appender::rolling::daily(dir, "profile.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            tracing_subscriber::fmt()
                .with_writer(non_blocking)
                .with_max_level(log_level)
                .init();
            Some(guard)
        }
        // Logging to Console
        None => {
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_max_level(log_level)
                .init();
            None
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = get_config()?;
    let _guard = init_logging(&config);
    if config.env == "file" {
        tracing::info!("using .env file as environment variable");
    } else {
        tracing::info!("using server environment as environment variable");
    }
    tracing::debug!("run with config: {:?}", config);

    tracing::info!("Init Postgres connection");
    let pool = init_pool(&config).await?;
    let repo = UserProfileDbRepository::new(pool);

    let output = match cli.command {
        Commands::Profile(profile_args) => match profile_args.command {
            ProfileCommands::Get {
                user_id,
                id,
                parent_code,
            } => {
                let lookup = match (user_id, id, parent_code) {
                    (Some(val), _, _) => ProfileLookup::UserId(val),
                    (_, Some(val), _) => ProfileLookup::Id(val),
                    (_, _, Some(val)) => ProfileLookup::ParentCode(val),
                    _ => anyhow::bail!("one of --user-id, --id or --parent-code is required"),
                };
                get_profile(&repo, lookup).await?
            }
            ProfileCommands::List { ids } => list_profiles(&repo, &ids).await?,
            ProfileCommands::Suggest {
                user_id,
                text,
                include,
                exclude,
                page,
                page_size,
            } => {
                suggest_profiles(&repo, user_id, &include, &exclude, page, page_size, &text)
                    .await?
            }
            ProfileCommands::Search {
                page,
                page_size,
                filters,
            } => search_profiles(&repo, page, page_size, &filters.into()).await?,
        },
    };
    println!("{}", output);
    Ok(())
}
