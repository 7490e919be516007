use std::sync::Arc;

use practice_core::filter::FilterUpdate;
use practice_core::model::{DatasetCatalog, DatasetCategory, QuestionId};
use services::{AppServices, SearchQuery};
use storage::questions::{FileQuestionSource, HttpQuestionSource, QuestionSource};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod args;
mod render;

use args::{ArgsError, Cli, Command, Filters, Settings, normalize_sqlite_url, print_usage};

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "app=info,services=info,storage=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn question_source(
    settings: &Settings,
    catalog: &DatasetCatalog,
) -> Result<Arc<dyn QuestionSource>, Box<dyn std::error::Error>> {
    match settings.data_url.as_deref() {
        Some(url) => {
            tracing::info!(%url, "loading questions over http");
            Ok(Arc::new(HttpQuestionSource::new(url, catalog.clone())?))
        }
        None => {
            tracing::info!(dir = %settings.data_dir.display(), "loading questions from disk");
            Ok(Arc::new(FileQuestionSource::new(
                settings.data_dir.clone(),
                catalog.clone(),
            )))
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse(std::env::args().skip(1), Settings::from_env())?;
    if cli.command == Command::Help {
        print_usage();
        return Ok(());
    }

    init_tracing();

    let db_url = normalize_sqlite_url(&cli.settings.db_url);
    prepare_sqlite_file(&db_url)?;

    let catalog = DatasetCatalog::default();
    let questions = question_source(&cli.settings, &catalog)?;
    let mut app = AppServices::new_sqlite(&db_url, questions, catalog).await?;

    match cli.command {
        Command::Help => {}
        Command::Overview => {
            let rows: Vec<_> = app
                .progress()
                .overview()
                .into_iter()
                .map(|(dataset, stats)| (dataset, app.catalog().label(dataset), stats))
                .collect();
            print!("{}", render::overview(&rows));
        }
        Command::List {
            dataset,
            filters,
            sort,
        } => {
            let mut filter = app.open_dataset(dataset).await?;
            let Filters {
                search,
                difficulty,
                category,
                bookmarked,
            } = filters;
            let progress = app.progress();
            filter.update_filter(FilterUpdate::Search(search), progress);
            filter.update_filter(FilterUpdate::Difficulty(difficulty), progress);
            filter.update_filter(FilterUpdate::Category(category), progress);
            filter.update_filter(FilterUpdate::Bookmarked(bookmarked), progress);
            for question in filter.sort(sort) {
                println!(
                    "{}",
                    render::question_row(question, progress.status(dataset, &question.id))
                );
            }
            let stats = progress.stats(dataset);
            println!(
                "{} of {} shown; {}/{} solved",
                filter.filtered().len(),
                filter.questions().len(),
                stats.solved,
                stats.total
            );
        }
        Command::Show { dataset, id } => {
            let filter = app.open_dataset(dataset).await?;
            let question = filter
                .find(&id)
                .ok_or_else(|| format!("no question {id} in {}", app.catalog().label(dataset)))?;
            print!(
                "{}",
                render::question_detail(question, app.progress().status(dataset, &id))
            );
        }
        Command::Search { term, filters } => {
            let query = SearchQuery::new(term)
                .with_difficulty(filters.difficulty)
                .with_category(filters.category);
            let rows = if filters.bookmarked {
                app.search()
                    .search_bookmarked(&query, app.progress())
                    .await?
            } else {
                app.search().search(&query).await?
            };
            for row in &rows {
                let entry = app.progress().status(row.source, &row.question.id);
                println!("{}", render::tagged_row(row, entry));
            }
            println!("{} result(s)", rows.len());
            let categories = services::display_categories(&rows);
            if !categories.is_empty() {
                println!("categories: {}", categories.join(", "));
            }
        }
        Command::Status {
            dataset,
            id,
            status,
        } => {
            ensure_question(&app, dataset, &id).await?;
            let stats = app.progress_mut().set_status(dataset, &id, status).await?;
            println!(
                "{id}: {status} ({}/{} solved)",
                stats.solved, stats.total
            );
        }
        Command::Cycle { dataset, id } => {
            ensure_question(&app, dataset, &id).await?;
            let status = app.progress_mut().cycle_status(dataset, &id).await?;
            println!("{id}: {status}");
        }
        Command::Bookmark { dataset, id } => {
            ensure_question(&app, dataset, &id).await?;
            let bookmarked = app.progress_mut().toggle_bookmark(dataset, &id).await?;
            println!(
                "{id}: {}",
                if bookmarked { "bookmarked" } else { "bookmark removed" }
            );
        }
        Command::Categories { dataset: Some(dataset) } => {
            let filter = app.open_dataset(dataset).await?;
            for category in filter.display_categories() {
                println!("{category}");
            }
        }
        Command::Categories { dataset: None } => {
            for category in services::known_display_categories() {
                println!("{category}");
            }
        }
        Command::Bookmarks { dataset } => {
            let ids = app.progress().bookmarked_ids(dataset);
            let filter = app.open_dataset(dataset).await?;
            for id in &ids {
                let entry = app.progress().status(dataset, id);
                match filter.find(id) {
                    Some(question) => println!("{}", render::question_row(question, entry)),
                    None => println!("{id} (not in {})", app.catalog().label(dataset)),
                }
            }
            println!("{} bookmarked", ids.len());
        }
        Command::Export { path } => {
            let json = app.progress().export_json()?;
            tokio::fs::write(&path, json).await?;
            println!("progress exported to {}", path.display());
        }
        Command::Import { path } => {
            let blob = tokio::fs::read_to_string(&path).await?;
            app.progress_mut().import_snapshot(&blob).await?;
            println!("progress imported from {}", path.display());
        }
        Command::Clear { dataset } => {
            app.progress_mut().clear(dataset).await?;
            match dataset {
                Some(dataset) => println!("cleared {}", app.catalog().label(dataset)),
                None => println!("cleared all progress"),
            }
        }
    }

    Ok(())
}

/// Refuse to record progress for ids the dataset does not contain.
async fn ensure_question(
    app: &AppServices,
    dataset: DatasetCategory,
    id: &QuestionId,
) -> Result<(), Box<dyn std::error::Error>> {
    let filter = app.open_dataset(dataset).await?;
    if filter.find(id).is_none() {
        return Err(format!("no question {id} in {}", app.catalog().label(dataset)).into());
    }
    Ok(())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("error: {err}");
        std::process::exit(2);
    }
}
