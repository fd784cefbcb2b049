//! tarihte - On this day in history, from your terminal
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::future_not_send)]

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use tarihte::api::{Services, TextGenerator, wikipedia};
use tarihte::details::EventDetails;
use tarihte::models::{ApiResponse, Category, EventDate, HistoryItem, MonthDay, RelatedEvent};
use tarihte::{Config, details, enrich, filter, random, render, resolve};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (RUST_LOG=debug for verbose output)
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    match parse_args(&args)? {
        Command::Day {
            date,
            category,
            year,
            limit,
        } => day_cli(&Config::load()?, date, category, year.as_deref(), limit).await,
        Command::Details {
            date,
            category,
            number,
        } => details_cli(&Config::load()?, date, category, number).await,
        Command::Follow { date, text } => follow_cli(&Config::load()?, date, text).await,
        Command::Search { query, open } => search_cli(&Config::load()?, &query, open).await,
        Command::Random => random_cli(&Config::load()?).await,
        Command::Image { title } => image_cli(&Config::load()?, &title).await,
        Command::Open {
            date,
            category,
            number,
        } => open_cli(&Config::load()?, date, category, number).await,
        Command::Config { init } => config_cli(init),
        Command::Help => {
            print_help();
            Ok(())
        }
        Command::Version => {
            print_version();
            Ok(())
        }
    }
}

/// CLI commands
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Day {
        date: MonthDay,
        category: Category,
        year: Option<String>,
        limit: Option<usize>,
    },
    Details {
        date: MonthDay,
        category: Category,
        number: usize,
    },
    Follow {
        date: MonthDay,
        text: String,
    },
    Search {
        query: String,
        open: Option<usize>,
    },
    Random,
    Image {
        title: String,
    },
    Open {
        date: MonthDay,
        category: Category,
        number: usize,
    },
    Config {
        init: bool,
    },
    Help,
    Version,
}

/// Positional arguments plus the flags shared by day-based commands
struct Args {
    positional: Vec<String>,
    category: Category,
    year: Option<String>,
    limit: Option<usize>,
    open: Option<usize>,
}

fn split_args(args: &[String]) -> Result<Args> {
    let mut parsed = Args {
        positional: Vec::new(),
        category: Category::Events,
        year: None,
        limit: None,
        open: None,
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-c" | "--category" => {
                let value = args
                    .get(i + 1)
                    .ok_or_else(|| anyhow::anyhow!("Missing value for {}", args[i]))?;
                parsed.category = Category::from_str(value).ok_or_else(|| {
                    anyhow::anyhow!("Unknown category: {value}\nSupported: events, births, deaths")
                })?;
                i += 2;
            }
            "-y" | "--year" => {
                let value = args
                    .get(i + 1)
                    .ok_or_else(|| anyhow::anyhow!("Missing value for {}", args[i]))?;
                parsed.year = Some(value.clone());
                i += 2;
            }
            "-l" | "--limit" => {
                let value = args
                    .get(i + 1)
                    .and_then(|s| s.parse().ok())
                    .ok_or_else(|| anyhow::anyhow!("--limit needs a number"))?;
                parsed.limit = Some(value);
                i += 2;
            }
            "-o" | "--open" => {
                parsed.open = Some(parse_number(args.get(i + 1), "--open result number")?);
                i += 2;
            }
            other => {
                parsed.positional.push(other.to_string());
                i += 1;
            }
        }
    }

    Ok(parsed)
}

/// Parse a day from the front of `args`: "7 20", "July 20", "7/20" or "July 20" quoted.
/// Returns the day and how many arguments it used.
fn parse_date(args: &[String]) -> Result<(MonthDay, usize)> {
    let first = args
        .first()
        .ok_or_else(|| anyhow::anyhow!("Missing date (e.g. 7 20, \"July 20\" or 7/20)"))?;

    if let Some(second) = args.get(1) {
        if let (Ok(month), Ok(day)) = (first.parse::<u32>(), second.parse::<u32>()) {
            return Ok((MonthDay::new(month, day)?, 2));
        }
        if let Some(date) = MonthDay::parse(&format!("{first} {second}")) {
            return Ok((date, 2));
        }
    }

    MonthDay::parse(first)
        .map(|date| (date, 1))
        .ok_or_else(|| anyhow::anyhow!("Invalid date: {first}"))
}

fn parse_number(value: Option<&String>, what: &str) -> Result<usize> {
    value
        .ok_or_else(|| anyhow::anyhow!("Missing {what}"))?
        .parse::<usize>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| anyhow::anyhow!("{what} must be a positive number"))
}

fn parse_args(args: &[String]) -> Result<Command> {
    let Some(command) = args.first() else {
        return Ok(Command::Day {
            date: MonthDay::today(),
            category: Category::Events,
            year: None,
            limit: None,
        });
    };

    let rest = split_args(&args[1..])?;

    match command.as_str() {
        "-h" | "--help" | "help" => Ok(Command::Help),
        "-v" | "--version" | "version" => Ok(Command::Version),

        "today" => Ok(Command::Day {
            date: MonthDay::today(),
            category: rest.category,
            year: rest.year,
            limit: rest.limit,
        }),

        "day" | "date" => {
            let (date, _) = parse_date(&rest.positional)?;
            Ok(Command::Day {
                date,
                category: rest.category,
                year: rest.year,
                limit: rest.limit,
            })
        }

        "details" | "show" => {
            let (date, used) = parse_date(&rest.positional)?;
            let number = parse_number(rest.positional.get(used), "item number")?;
            Ok(Command::Details {
                date,
                category: rest.category,
                number,
            })
        }

        "follow" => {
            let (date, used) = parse_date(&rest.positional)?;
            let text = rest.positional[used..].join(" ");
            if text.trim().is_empty() {
                anyhow::bail!("Missing event text (as printed by 'tarihte details')");
            }
            Ok(Command::Follow {
                date,
                text: text.trim().to_string(),
            })
        }

        "open" => {
            let (date, used) = parse_date(&rest.positional)?;
            let number = parse_number(rest.positional.get(used), "item number")?;
            Ok(Command::Open {
                date,
                category: rest.category,
                number,
            })
        }

        "search" => {
            let query = rest.positional.join(" ");
            if query.trim().is_empty() {
                anyhow::bail!("Missing search query");
            }
            Ok(Command::Search {
                query,
                open: rest.open,
            })
        }

        "random" => Ok(Command::Random),

        "image" => {
            let title = rest.positional.join(" ");
            if title.trim().is_empty() {
                anyhow::bail!("Missing Wikipedia page title");
            }
            Ok(Command::Image { title })
        }

        "config" => Ok(Command::Config {
            init: rest.positional.first().is_some_and(|a| a == "init"),
        }),

        other => Err(anyhow::anyhow!(
            "Unknown command: {other}\nRun 'tarihte --help' for usage"
        )),
    }
}

fn print_help() {
    let config_path = tarihte::Config::default_path()
        .map_or_else(|_| "Unknown".to_string(), |p| p.display().to_string());

    println!(
        r#"{}
📜 tarihte - On this day in history

USAGE:
    tarihte                            Today's events
    tarihte [COMMAND]

COMMANDS:
    day <month> <day> [OPTIONS]        Events of a day
      Options:
        -c, --category <name>          events, births or deaths (default: events)
        -y, --year <year>              Only items of this year
        -l, --limit <n>                Show at most n items
      Examples:
        tarihte day 7 20
        tarihte day July 20 --category births
        tarihte day 7/20 --year 1969

    details <month> <day> <n>          Translation, explanation and related events of item n
    follow <month> <day> <text>        Find a related event in the history source and show it
    open <month> <day> <n>             Open item n on Wikipedia
    search <query> [-o, --open <n>]    Search events, people or years (verified);
                                       --open shows the details of result n
    random                             Details of a random event
    image <title>                      Wikipedia thumbnail of a page
    config [init]                      Show config / write a default config

OPTIONS:
    -h, --help                         Show this help message
    -v, --version                      Show version information

ENVIRONMENT:
    GEMINI_API_KEY                     Gemini API key (overrides config)
    RUST_LOG                           Log level (default: warn)

CONFIG:
    {}
"#,
        tarihte::LOGO,
        config_path
    );
}

fn print_version() {
    println!("tarihte {}", tarihte::VERSION);
}

async fn fetch_day(services: &Services, date: MonthDay) -> Result<ApiResponse> {
    services
        .history
        .fetch_day(date)
        .await
        .with_context(|| format!("Veriler alınırken bir hata oluştu ({date})"))
}

async fn fetch_item(
    services: &Services,
    date: MonthDay,
    category: Category,
    number: usize,
) -> Result<(ApiResponse, HistoryItem)> {
    let response = fetch_day(services, date).await?;
    let item = filter::item_at(&response.data, category, number)
        .cloned()
        .ok_or_else(|| {
            anyhow::anyhow!(
                "No item {number} in {} on {date} ({} available)",
                category,
                response.data.items(category).len()
            )
        })?;
    Ok((response, item))
}

fn warn_if_unconfigured(services: &Services) {
    if !services.enricher.generator().is_configured() {
        eprintln!("⚠ {}", enrich::MISSING_KEY_NOTICE);
    }
}

async fn day_cli(
    config: &Config,
    date: MonthDay,
    category: Category,
    year: Option<&str>,
    limit: Option<usize>,
) -> Result<()> {
    let services = Services::from_config(config)?;
    let response = fetch_day(&services, date).await?;

    let mut items = filter::select(&response.data, category, year);
    if let Some(limit) = limit {
        items.truncate(limit);
    }

    print!("{}", render::day_view(&response, category, &items, config.wrap_width));
    if year.is_some() && items.is_empty() {
        print!("{}", render::years_hint(&filter::years(&response.data, category)));
    }
    Ok(())
}

async fn details_cli(config: &Config, date: MonthDay, category: Category, number: usize) -> Result<()> {
    let services = Services::from_config(config)?;
    let (response, item) = fetch_item(&services, date, category, number).await?;
    warn_if_unconfigured(&services);

    let details = details::load(&services.wikipedia, &services.enricher, item, Some(response.date)).await;
    print!("{}", render::details_view(&details, config.wrap_width));
    Ok(())
}

async fn follow_cli(config: &Config, date: MonthDay, text: String) -> Result<()> {
    let services = Services::from_config(config)?;
    warn_if_unconfigured(&services);

    let event = RelatedEvent {
        year: String::new(),
        text,
        date: EventDate {
            month: date.month(),
            day: date.day(),
        },
        links: None,
    };
    println!("→ {} ({})", event.text, resolve::date_label(event.date));

    match follow_details(&services, &event).await? {
        Some(details) => print!("{}", render::details_view(&details, config.wrap_width)),
        None => println!("Bulunamadı: İlgili olayın detayı getirilemedi."),
    }
    Ok(())
}

/// Locate a proposed event in its day and load its details
async fn follow_details<G: TextGenerator>(
    services: &Services<G>,
    event: &RelatedEvent,
) -> Result<Option<EventDetails>> {
    let resolved = resolve::resolve_related(&services.history, &services.enricher, event)
        .await
        .context("İlgili olaya gidilirken bir sorun oluştu.")?;

    let Some(resolved) = resolved else {
        return Ok(None);
    };

    let details = details::load(
        &services.wikipedia,
        &services.enricher,
        resolved.item,
        Some(resolved.date),
    )
    .await;
    Ok(Some(details))
}

async fn search_cli(config: &Config, query: &str, open: Option<usize>) -> Result<()> {
    let services = Services::from_config(config)?;
    warn_if_unconfigured(&services);

    println!("🔍 {query}\n");
    let results =
        resolve::search_and_validate(&services.history, &services.enricher, query, config.search_limit).await;
    print!("{}", render::search_view(query, &results, config.wrap_width));

    let Some(number) = open else {
        return Ok(());
    };
    let (item, date) = search_result_item(&results, number)?;
    println!();

    let details = details::load(&services.wikipedia, &services.enricher, item, Some(date)).await;
    print!("{}", render::details_view(&details, config.wrap_width));
    Ok(())
}

/// Detail item and day label of the n-th (1-based) search result
fn search_result_item(results: &[RelatedEvent], number: usize) -> Result<(HistoryItem, String)> {
    let result = number
        .checked_sub(1)
        .and_then(|i| results.get(i))
        .ok_or_else(|| anyhow::anyhow!("No search result {number} ({} found)", results.len()))?;
    Ok((result.to_history_item(), resolve::date_label(result.date)))
}

async fn random_cli(config: &Config) -> Result<()> {
    let services = Services::from_config(config)?;

    let picked = random::random_event(&services.history, config.random_attempts)
        .await
        .context("Rastgele olay getirilemedi. Lütfen tekrar deneyin.")?
        .ok_or_else(|| anyhow::anyhow!("Rastgele olay getirilemedi. Lütfen tekrar deneyin."))?;

    warn_if_unconfigured(&services);
    println!("🎲 {} · {}", picked.category.turkish_name(), picked.date);

    let details = details::load(&services.wikipedia, &services.enricher, picked.item, Some(picked.date)).await;
    print!("{}", render::details_view(&details, config.wrap_width));
    Ok(())
}

async fn image_cli(config: &Config, title: &str) -> Result<()> {
    let services = Services::from_config(config)?;

    match services.wikipedia.try_page_image(title).await? {
        Some(url) => println!("{url}"),
        None => println!("No image for \"{title}\""),
    }
    Ok(())
}

async fn open_cli(config: &Config, date: MonthDay, category: Category, number: usize) -> Result<()> {
    let services = Services::from_config(config)?;
    let (_, item) = fetch_item(&services, date, category, number).await?;

    let url = match item.main_link() {
        Some(link) if !link.link.is_empty() => link.link.clone(),
        Some(link) => wikipedia::article_url(&link.title),
        None => anyhow::bail!("Item {number} has no Wikipedia link"),
    };

    println!("🔗 {url}");
    open::that(&url).with_context(|| format!("Failed to open {url}"))?;
    Ok(())
}

fn config_cli(init: bool) -> Result<()> {
    let path = Config::default_path()?;

    if init {
        if path.exists() {
            println!("Config already exists: {}", path.display());
        } else {
            Config::default().save()?;
            println!("✓ Wrote default config: {}", path.display());
        }
        return Ok(());
    }

    let config = Config::load()?;
    println!("Config file: {}", path.display());
    println!(
        "Gemini API key: {}",
        if config.api_key().is_some() { "set" } else { "not set" }
    );
    println!("Gemini model: {}", config.gemini_model);
    println!("History API: {}", config.history_base_url);
    println!("Wikipedia API: {}", config.wikipedia_api_url);
    Ok(())
}
