use std::path::PathBuf;
use std::process::ExitCode;
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::{json, Value};
use lcm::catalog::command::get_book_cmd::{GetBookCommand, GetBookCommandRequest};
use lcm::catalog::command::list_books_cmd::{ListCatalogCommand, ListCatalogCommandRequest, Listing};
use lcm::catalog::command::register_book_cmd::{RegisterBookCommand, RegisterBookCommandRequest};
use lcm::catalog::command::search_books_cmd::{SearchBooksCommand, SearchBooksCommandRequest};
use lcm::books::dto::BookDto;
use lcm::core::command::{Command, CommandError};
use lcm::core::controller::{AppState, ControllerError, ExitStatus};
use lcm::core::domain::{Configuration, DATABASE_PATH_ENV, DEFAULT_DATABASE_PATH};
use lcm::core::repository::RepositoryStore;
use lcm::reservation::command::cancel_reservation_cmd::CancelReservationCommand;
use lcm::reservation::command::reserve_book_cmd::{ReservationCommandRequest, ReserveBookCommand};
use lcm::utils::logging::setup_tracing;

#[derive(Parser)]
#[command(name = "catalog")]
#[command(author, version, about = "Library catalog manager", long_about = None)]
struct Cli {
    /// Path of the JSON catalog document
    #[arg(long, global = true, env = DATABASE_PATH_ENV, default_value = DEFAULT_DATABASE_PATH)]
    db: PathBuf,

    /// Branch id attached to published events
    #[arg(long, global = true, default_value = "main")]
    branch: String,

    /// Rewrite the document in place instead of through a temp file
    #[arg(long, global = true)]
    no_atomic: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every book in the catalog
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Search books by title, isbn, author or all fields
    Search {
        /// Search text, matched case-insensitively
        query: String,

        /// Field to match (title, isbn, author, general)
        #[arg(long, default_value = "general")]
        by: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the full description of one book
    Show {
        /// Book id
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Register a new book and store it in the document
    Register {
        /// Book id
        #[arg(long)]
        id: String,

        #[arg(long)]
        isbn: String,

        #[arg(long)]
        title: String,

        /// Publication year
        #[arg(long, allow_hyphen_values = true)]
        year: i64,

        #[arg(long)]
        publisher: String,

        /// Author name, repeat for several authors
        #[arg(long = "author")]
        authors: Vec<String>,

        /// Copies owned by the library
        #[arg(long, default_value = "1")]
        total: u64,

        /// Copies on the shelf, defaults to all copies
        #[arg(long)]
        available: Option<u64>,

        #[arg(long)]
        category: Option<String>,

        #[arg(long, default_value = "0")]
        rating: f64,
    },

    /// Reserve one copy of a book for a user
    Reserve {
        /// Book id
        id: String,

        /// Reserving user
        user: String,
    },

    /// Cancel a user's reservation of a book
    Cancel {
        /// Book id
        id: String,

        /// Reserving user
        user: String,
    },

    /// List authors with their books
    Authors {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List publishers with their books
    Publishers {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_tracing(if cli.verbose { tracing::Level::DEBUG } else { tracing::Level::INFO });

    match run(cli).await {
        Ok(status) => ExitCode::from(status.code()),
        Err((status, message)) => {
            eprintln!("error: {}", message);
            ExitCode::from(status.code())
        }
    }
}

async fn run(cli: Cli) -> Result<ExitStatus, ControllerError> {
    // LCM_ATOMIC_WRITES is read here; --no-atomic can only turn atomic writes off
    let mut config = Configuration::from_env(cli.branch.as_str())
        .with_database_path(&cli.db);
    if cli.no_atomic {
        config = config.with_atomic_writes(false);
    }
    let state = AppState::new(config, RepositoryStore::JsonFile)
        .await.map_err(CommandError::from)?;

    match cli.command {
        Commands::List { json } => {
            let cmd = ListCatalogCommand::new(state.catalog_service.clone());
            let res = cmd.execute(ListCatalogCommandRequest::new(Listing::Books)).await?;
            if json {
                print_json(&res.books)?;
            } else {
                res.books.iter().for_each(print_summary);
            }
        }
        Commands::Search { query, by, json } => {
            let cmd = SearchBooksCommand::new(state.catalog_service.clone());
            let res = cmd.execute(SearchBooksCommandRequest::new(query.as_str(), by.as_str())).await?;
            if json {
                print_json(&res.books)?;
            } else {
                res.books.iter().for_each(print_summary);
            }
        }
        Commands::Show { id, json } => {
            let cmd = GetBookCommand::new(state.catalog_service.clone());
            let res = cmd.execute(GetBookCommandRequest::new(id.as_str())).await?;
            if json {
                print_json(&res.book)?;
            } else {
                println!("{}", res.description);
            }
        }
        Commands::Register { id, isbn, title, year, publisher, authors, total, available, category, rating } => {
            let mut record = json!({
                "id": id,
                "isbn": isbn,
                "title": title,
                "year": year,
                "publisher": publisher,
                "authors": authors,
                "total_copies": total,
                "available_copies": available.unwrap_or(total),
                "average_rating": rating,
            });
            if let (Some(category), Value::Object(map)) = (category, &mut record) {
                map.insert("category".to_string(), Value::String(category));
            }
            let cmd = RegisterBookCommand::new(state.catalog_service.clone());
            let res = cmd.execute(RegisterBookCommandRequest::new(record)).await?;
            println!("registered {}", res.book.id);
        }
        Commands::Reserve { id, user } => {
            let cmd = ReserveBookCommand::new(state.reservation_service.clone(), state.catalog_service.clone());
            let res = cmd.execute(ReservationCommandRequest::new(id.as_str(), user.as_str())).await?;
            if !res.accepted {
                println!("refused: {} cannot reserve {} ({} of {} available)", user.trim(), res.book.id,
                         res.book.available_copies, res.book.total_copies);
                return Ok(ExitStatus::Refused);
            }
            println!("reserved {} for {}", res.book.id, user.trim());
        }
        Commands::Cancel { id, user } => {
            let cmd = CancelReservationCommand::new(state.reservation_service.clone(), state.catalog_service.clone());
            let res = cmd.execute(ReservationCommandRequest::new(id.as_str(), user.as_str())).await?;
            if !res.accepted {
                println!("refused: {} holds no reservation on {}", user.trim(), res.book.id);
                return Ok(ExitStatus::Refused);
            }
            println!("cancelled reservation of {} for {}", res.book.id, user.trim());
        }
        Commands::Authors { json } => {
            let cmd = ListCatalogCommand::new(state.catalog_service.clone());
            let res = cmd.execute(ListCatalogCommandRequest::new(Listing::Authors)).await?;
            if json {
                print_json(&res.authors)?;
            } else {
                for author in &res.authors {
                    println!("{}: {}{}", author.name, author.book_ids.join(", "),
                             if author.available { "" } else { " (none available)" });
                }
            }
        }
        Commands::Publishers { json } => {
            let cmd = ListCatalogCommand::new(state.catalog_service.clone());
            let res = cmd.execute(ListCatalogCommandRequest::new(Listing::Publishers)).await?;
            if json {
                print_json(&res.publishers)?;
            } else {
                for publisher in &res.publishers {
                    println!("{}: {}{}", publisher.name, publisher.book_ids.join(", "),
                             if publisher.available { "" } else { " (none available)" });
                }
            }
        }
    }
    Ok(ExitStatus::Success)
}

fn print_summary(book: &BookDto) {
    println!("{}\t{} ({})\t{} of {} available", book.id, book.title, book.year,
             book.available_copies, book.total_copies);
}

fn print_json<T: Serialize>(value: &T) -> Result<(), ControllerError> {
    let out = serde_json::to_string_pretty(value)
        .map_err(|err| CommandError::Serialization { message: err.to_string() })?;
    println!("{}", out);
    Ok(())
}
