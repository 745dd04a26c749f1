//! Command-line front end for the Taskboard API

use std::sync::Arc;

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use taskboard_client::{
    config::DEFAULT_BASE_URL, ClientConfig, ClientError, HttpPostSource, HttpTaskApi,
    PostsExplorer, TaskApi, TaskBoard,
};
use taskboard_domain::{Task, TaskFilter, TaskId, TaskInput};

#[derive(Debug, Parser)]
#[command(name = "taskboard", version, about = "Manage tasks on a Taskboard server")]
struct Cli {
    /// API root, e.g. http://localhost:5000/api
    #[arg(long, global = true, env = "TASKBOARD_API_URL", default_value = DEFAULT_BASE_URL)]
    api_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List tasks, newest first
    List {
        /// all, active or completed
        #[arg(long, default_value = "all")]
        filter: String,
    },
    /// Show one task
    Show { id: String },
    /// Create a task
    Add {
        title: String,
        #[arg(long)]
        description: Option<String>,
        /// low, medium or high
        #[arg(long)]
        priority: Option<String>,
        /// Due date as YYYY-MM-DD
        #[arg(long)]
        due: Option<String>,
    },
    /// Change fields of a task; pass an empty string to clear description or due date
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        #[arg(long)]
        due: Option<String>,
        #[arg(long)]
        completed: Option<bool>,
    },
    /// Flip a task between active and completed
    Toggle { id: String },
    /// Delete a task
    Delete { id: String },
    /// Browse the public posts feed
    Posts {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Posts { search, page } => browse_posts(search, page).await,
        command => run(&cli.api_url, command).await,
    }
}

async fn run(api_url: &str, command: Command) -> anyhow::Result<()> {
    let api = HttpTaskApi::new(ClientConfig::new(api_url))
        .with_context(|| format!("invalid API URL {}", api_url))?;
    let api: Arc<dyn TaskApi> = Arc::new(api);
    let mut board = TaskBoard::new(api.clone());

    match command {
        Command::List { filter } => {
            let filter = TaskFilter::parse(Some(&filter));
            board
                .set_filter(filter)
                .await
                .map_err(|e| failed(&board, e))?;
            if board.tasks().is_empty() {
                println!("No {} tasks", filter);
            }
            for task in board.tasks() {
                print_task(task);
            }
        }
        Command::Show { id } => {
            let task = api.get_task(&parse_id(&id)?).await?;
            print_details(&task);
        }
        Command::Add {
            title,
            description,
            priority,
            due,
        } => {
            *board.draft_mut() = TaskInput {
                title: Some(title),
                description: description.map(Some),
                priority,
                due_date: due.map(Some),
                completed: None,
            };
            match board.submit_draft().await.map_err(|e| failed(&board, e))? {
                Some(task) => print_details(&task),
                None => return Err(anyhow!("Task title is required")),
            }
        }
        Command::Edit {
            id,
            title,
            description,
            priority,
            due,
            completed,
        } => {
            let input = TaskInput {
                title,
                description: description.map(Some),
                priority,
                due_date: due.map(Some),
                completed,
            };
            let task = board
                .update(&parse_id(&id)?, input)
                .await
                .map_err(|e| failed(&board, e))?;
            print_details(&task);
        }
        Command::Toggle { id } => {
            let task = board
                .toggle(&parse_id(&id)?)
                .await
                .map_err(|e| failed(&board, e))?;
            print_task(&task);
        }
        Command::Delete { id } => {
            board
                .delete(&parse_id(&id)?)
                .await
                .map_err(|e| failed(&board, e))?;
            println!("Deleted {}", id);
        }
        Command::Posts { search, page } => return browse_posts(search, page).await,
    }

    Ok(())
}

async fn browse_posts(search: String, page: usize) -> anyhow::Result<()> {
    let source = HttpPostSource::with_defaults()?;
    let mut explorer = PostsExplorer::new(Arc::new(source));
    explorer
        .load()
        .await
        .map_err(|e| anyhow!("{}: {}", explorer.error().unwrap_or("request failed"), e))?;

    explorer.set_search(search);
    explorer.set_page(page);

    for post in explorer.current_page() {
        println!("#{:<4} {}", post.id, post.title);
        println!("      {}", post.body.replace('\n', " "));
    }
    println!(
        "Page {} of {} ({} matching posts)",
        explorer.page(),
        explorer.total_pages().max(1),
        explorer.matching().len()
    );
    Ok(())
}

fn parse_id(raw: &str) -> anyhow::Result<TaskId> {
    TaskId::from_string(raw).map_err(|_| anyhow!("'{}' is not a task id", raw))
}

fn failed(board: &TaskBoard, err: ClientError) -> anyhow::Error {
    anyhow!("{}: {}", board.error().unwrap_or("request failed"), err)
}

fn print_task(task: &Task) {
    let mark = if task.completed { "x" } else { " " };
    print!("[{}] {} ({})", mark, task.title, task.priority);
    if let Some(due) = task.due_date {
        print!(" due {}", due);
    }
    println!("  {}", task.id);
}

fn print_details(task: &Task) {
    print_task(task);
    if let Some(description) = &task.description {
        println!("    {}", description);
    }
    println!(
        "    created {}  updated {}",
        task.created_at.format("%Y-%m-%d %H:%M:%S"),
        task.updated_at.format("%Y-%m-%d %H:%M:%S")
    );
}
