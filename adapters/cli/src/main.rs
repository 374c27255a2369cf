#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays and inspects Munch without a renderer.

mod autopilot;
mod board;
mod config;
mod session;

use std::{path::PathBuf, process::ExitCode, sync::Arc, time::Duration};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use munch_content::normalize_topic_key;
use munch_core::{
    generate_level, validate_custom_topic, Command, Event, GamePhase, GridSize, Level,
    ProviderFactory, TopicId, TopicProvider, DEFAULT_CUSTOM_TOPIC,
};
use munch_topics::{normalize_typos, Catalog, CatalogConfig, CustomTopicProvider};
use munch_world::query;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::{
    autopilot::Autopilot,
    config::{FileConfig, Overrides, Settings},
    session::Session,
};

const MOVE_DEBOUNCE: Duration = Duration::from_millis(200);
const GENERATION_PATIENCE: Duration = Duration::from_secs(30);

#[derive(Debug, Parser)]
#[command(name = "munch", version, about = "Headless driver for the Munch arcade game")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Args)]
struct GlobalArgs {
    /// TOML file with `[game]` and `[content]` tables.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Seed for every random source.
    #[arg(long, global = true)]
    seed: Option<u64>,
    /// Base URL of the content cache service.
    #[arg(long, global = true)]
    cache_url: Option<String>,
    /// Never contact the content cache.
    #[arg(long, global = true)]
    offline: bool,
    /// Log at debug level.
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Debug, Args)]
struct TopicArgs {
    /// Topic to play: math, words, marvel, movies or custom.
    #[arg(long, default_value = "math")]
    topic: TopicId,
    /// Name of the custom topic.
    #[arg(long)]
    custom: Option<String>,
    /// Sub-category passed to the provider.
    #[arg(long)]
    category: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Play with the autopilot and print a summary.
    Play {
        #[command(flatten)]
        topic: TopicArgs,
        /// Stop after this many frames.
        #[arg(long, default_value_t = 20_000)]
        max_frames: u64,
    },
    /// Generate one level and print its board.
    Preview {
        #[command(flatten)]
        topic: TopicArgs,
        /// Difficulty level to generate.
        #[arg(long, default_value_t = 1)]
        level: u32,
    },
    /// Check a custom topic name.
    ValidateTopic {
        /// Topic text as a player would type it.
        text: String,
    },
    /// List the most requested topics in the content cache.
    Popular {
        /// Number of entries to show.
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let default_filter = if cli.global.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let file = FileConfig::load(cli.global.config.as_deref())?;
    let settings = Settings::resolve(
        file,
        Overrides {
            seed: cli.global.seed,
            cache_url: cli.global.cache_url,
            offline: cli.global.offline,
        },
    );
    log::debug!("resolved settings: {settings:?}");

    match cli.command {
        Commands::Play { topic, max_frames } => play(&settings, &topic, max_frames),
        Commands::Preview { topic, level } => preview(&settings, &topic, Level::new(level)),
        Commands::ValidateTopic { text } => Ok(validate(&text)),
        Commands::Popular { limit } => popular(&settings, limit),
    }
}

fn play(settings: &Settings, args: &TopicArgs, max_frames: u64) -> Result<ExitCode> {
    let mut session = Session::new(settings)?;
    let mut setup = vec![Command::ConfigureViewport {
        width_px: settings.viewport_width,
    }];
    if let Some(text) = &args.custom {
        setup.push(Command::SetCustomTopic { text: text.clone() });
    }
    if let Some(category) = &args.category {
        setup.push(Command::SetCategoryPreference {
            topic: args.topic,
            category: category.clone(),
        });
    }
    setup.push(Command::SelectTopic {
        topic: Some(args.topic),
    });

    for event in session.dispatch(setup) {
        if let Event::CustomTopicRejected { reason } = event {
            bail!("custom topic rejected: {reason}");
        }
    }

    let mut autopilot = Autopilot::new(MOVE_DEBOUNCE);
    let mut frames = 0;
    while frames < max_frames {
        let world = session.world();
        match query::phase(world) {
            GamePhase::Loading => {
                let _ = session.await_generation(GENERATION_PATIENCE)?;
                continue;
            }
            GamePhase::TopicSelection | GamePhase::GameOver => break,
            GamePhase::Playing | GamePhase::Paused => {}
        }
        if query::level(world) > settings.level_limit {
            break;
        }

        let _ = session.dispatch(vec![Command::Tick { dt: settings.frame }]);
        let mut input = Vec::new();
        autopilot.handle(settings.frame, session.world(), &mut input);
        let _ = session.dispatch(input);
        frames += 1;
    }

    let world = session.world();
    let topic = query::provider_name(world).unwrap_or_else(|| args.topic.to_string());
    println!("topic: {topic}");
    println!("phase: {}", query::phase(world));
    println!("level: {}", query::level(world));
    println!("score: {}", query::score(world));
    println!("lives: {}", query::lives(world));
    println!("frames: {frames}");
    if query::phase(world) == GamePhase::TopicSelection {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn preview(settings: &Settings, args: &TopicArgs, level: Level) -> Result<ExitCode> {
    let size = GridSize::for_viewport(settings.viewport_width);
    let store = settings.content_store();
    let (name, content) = if args.topic == TopicId::Custom {
        let text = args.custom.as_deref().unwrap_or(DEFAULT_CUSTOM_TOPIC);
        let topic = validate_custom_topic(text)
            .map_err(|reason| anyhow!("custom topic rejected: {reason}"))?;
        let rng = ChaCha8Rng::seed_from_u64(settings.seed);
        let mut provider = CustomTopicProvider::new(topic, Arc::clone(&store), rng);
        if let Some(category) = &args.category {
            provider.set_category(category);
        }
        let content = generate_level(&mut provider, level, size);
        provider.flush_pending_saves();
        (provider.name(), content)
    } else {
        let mut catalog = Catalog::new(CatalogConfig::new(settings.seed, store));
        let mut provider = catalog.create(args.topic, "");
        if let Some(category) = &args.category {
            provider.set_category(category);
        }
        let content = generate_level(provider.as_mut(), level, size);
        (provider.name(), content)
    };
    let content = content.with_context(|| format!("failed to generate level {level} of {name}"))?;

    println!("{name} - level {level}");
    println!("{}", content.challenge.description());
    for hint in content.challenge.hints() {
        println!("  hint: {hint}");
    }
    print!("{}", board::render(&content.grid, None, &[]));
    println!(
        "{} of {} cells are correct",
        content.grid.correct_total(),
        content.grid.filled_count()
    );
    Ok(ExitCode::SUCCESS)
}

fn validate(text: &str) -> ExitCode {
    match validate_custom_topic(text) {
        Ok(topic) => {
            println!("accepted: {topic}");
            println!("normalized: {}", normalize_typos(&topic));
            println!("cache key: {}", normalize_topic_key(&topic));
            ExitCode::SUCCESS
        }
        Err(reason) => {
            eprintln!("rejected: {reason}");
            ExitCode::FAILURE
        }
    }
}

fn popular(settings: &Settings, limit: usize) -> Result<ExitCode> {
    let topics = settings
        .content_store()
        .popular_topics(limit)
        .context("failed to fetch popular topics")?;
    if topics.is_empty() {
        println!("no popular topics yet");
    }
    for entry in topics {
        println!("{:>6}  {}", entry.usage_count, entry.topic);
    }
    Ok(ExitCode::SUCCESS)
}
