use clap::{Parser, Subcommand};

use bugtrail_client::session::{self, Session};
use bugtrail_client::{ApiClient, ClientError, Issue, IssueDraft, ListParams};

/// Terminal client for the Bugtrail issue tracker
#[derive(Parser)]
#[command(name = "bugtrail")]
#[command(about = "Terminal client for the Bugtrail issue tracker", long_about = None)]
struct Cli {
    /// Base URL of the API server
    #[arg(long, env = "BUGTRAIL_API_URL", default_value = "http://localhost:5000/api")]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account and start a session
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Log in and store the session token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Forget the stored session
    Logout,

    /// Show the logged-in account
    Whoami,

    /// Show issue counts per status
    Stats,

    /// Issue management
    #[command(subcommand)]
    Issues(IssueCommands),
}

#[derive(Subcommand)]
enum IssueCommands {
    /// List issues with optional filters
    List {
        #[arg(long, default_value_t = 1)]
        page: u64,
        #[arg(long, default_value_t = 10)]
        limit: u64,
        /// Filter by status (Open, "In Progress", Resolved, Closed)
        #[arg(long)]
        status: Option<String>,
        /// Filter by priority (Low, Medium, High, Critical)
        #[arg(long)]
        priority: Option<String>,
        /// Substring match against title or description
        #[arg(long)]
        search: Option<String>,
    },

    /// Show one issue in full
    Show { id: i32 },

    /// Create an issue
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        #[arg(long)]
        severity: Option<String>,
    },

    /// Update fields of an issue; omitted fields keep their value
    Update {
        id: i32,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        #[arg(long)]
        severity: Option<String>,
    },

    /// Delete an issue
    Delete { id: i32 },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        match err {
            // Global sign-out: a 401 anywhere invalidates the session.
            ClientError::Unauthorized => {
                let _ = session::clear();
                eprintln!("Session expired. Please log in again with `bugtrail login`.");
            }
            err => eprintln!("Error: {err}"),
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), ClientError> {
    let stored = session::load();
    let client = ApiClient::new(&cli.api_url, stored.as_ref().map(|s| s.token.clone()));

    match cli.command {
        Commands::Register {
            name,
            email,
            password,
        } => {
            validate_signup(&name, &email, &password)?;
            let user = client.register(&name, &email, &password).await?;
            store_session(&user.token, user.id, &user.name, &user.email)?;
            println!("Registered and logged in as {} <{}>", user.name, user.email);
        }

        Commands::Login { email, password } => {
            let user = client.login(&email, &password).await?;
            store_session(&user.token, user.id, &user.name, &user.email)?;
            println!("Logged in as {} <{}>", user.name, user.email);
        }

        Commands::Logout => {
            session::clear().map_err(|e| ClientError::Api(format!("failed to clear session: {e}")))?;
            println!("Logged out.");
        }

        Commands::Whoami => {
            let user = client.me().await?;
            println!("#{} {} <{}>", user.id, user.name, user.email);
        }

        Commands::Stats => {
            let stats = client.stats().await?;
            println!("{:<12} {}", "Open", stats.open);
            println!("{:<12} {}", "In Progress", stats.in_progress);
            println!("{:<12} {}", "Resolved", stats.resolved);
            println!("{:<12} {}", "Closed", stats.closed);
        }

        Commands::Issues(cmd) => run_issue_command(&client, cmd).await?,
    }

    Ok(())
}

async fn run_issue_command(client: &ApiClient, cmd: IssueCommands) -> Result<(), ClientError> {
    match cmd {
        IssueCommands::List {
            page,
            limit,
            status,
            priority,
            search,
        } => {
            let result = client
                .list_issues(&ListParams {
                    page: Some(page),
                    limit: Some(limit),
                    status,
                    priority,
                    search,
                })
                .await?;

            println!(
                "{:>5}  {:<12}  {:<9}  {:<9}  {:<30}  {}",
                "ID", "STATUS", "PRIORITY", "SEVERITY", "TITLE", "CREATOR"
            );
            for issue in &result.issues {
                println!(
                    "{:>5}  {:<12}  {:<9}  {:<9}  {:<30}  {}",
                    issue.id,
                    issue.status,
                    issue.priority,
                    issue.severity,
                    truncate(&issue.title, 30),
                    issue.creator_name.as_deref().unwrap_or("-"),
                );
            }
            println!(
                "page {} of {} ({} total)",
                result.page, result.total_pages, result.total
            );
        }

        IssueCommands::Show { id } => {
            let issue = client.get_issue(id).await?;
            print_issue(&issue);
        }

        IssueCommands::Create {
            title,
            description,
            status,
            priority,
            severity,
        } => {
            // Mirror the server's required-field checks before submitting.
            if title.trim().is_empty() {
                return Err(ClientError::Api("Title is required".to_string()));
            }
            if description.trim().is_empty() {
                return Err(ClientError::Api("Description is required".to_string()));
            }

            let issue = client
                .create_issue(&IssueDraft {
                    title: Some(title),
                    description: Some(description),
                    status,
                    priority,
                    severity,
                })
                .await?;
            println!("Created issue #{}: {}", issue.id, issue.title);
        }

        IssueCommands::Update {
            id,
            title,
            description,
            status,
            priority,
            severity,
        } => {
            let draft = IssueDraft {
                title,
                description,
                status,
                priority,
                severity,
            };
            if draft.is_empty() {
                return Err(ClientError::Api("Nothing to update".to_string()));
            }

            let issue = client.update_issue(id, &draft).await?;
            println!("Updated issue #{}", issue.id);
            print_issue(&issue);
        }

        IssueCommands::Delete { id } => {
            let message = client.delete_issue(id).await?;
            println!("{message}");
        }
    }

    Ok(())
}

fn validate_signup(name: &str, email: &str, password: &str) -> Result<(), ClientError> {
    if name.trim().is_empty() {
        return Err(ClientError::Api("Name is required".to_string()));
    }
    if !email.contains('@') {
        return Err(ClientError::Api("Valid email is required".to_string()));
    }
    if password.len() < 6 {
        return Err(ClientError::Api(
            "Password must be at least 6 characters".to_string(),
        ));
    }
    Ok(())
}

fn store_session(token: &str, user_id: i32, name: &str, email: &str) -> Result<(), ClientError> {
    session::save(&Session {
        token: token.to_string(),
        user_id,
        name: name.to_string(),
        email: email.to_string(),
    })
    .map_err(|e| ClientError::Api(format!("failed to store session: {e}")))
}

fn print_issue(issue: &Issue) {
    println!("#{} {}", issue.id, issue.title);
    println!(
        "status: {}  priority: {}  severity: {}",
        issue.status, issue.priority, issue.severity
    );
    if let Some(name) = &issue.creator_name {
        match &issue.creator_email {
            Some(email) => println!("created by: {name} <{email}>"),
            None => println!("created by: {name}"),
        }
    }
    println!();
    println!("{}", issue.description);
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{cut}…")
}
