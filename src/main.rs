use std::path::PathBuf;

use anyhow::{anyhow, Result};
use dotenvy::dotenv;
use tracing::{info, warn};

mod config;
mod design;
mod handlers;
mod llm;
mod market;
mod prompts;
mod state;
mod utils;

use config::CONFIG;
use design::concepts::generate_concepts;
use design::gallery::GalleryFilter;
use handlers::generate::GenerateOutcome;
use handlers::market::UploadOutcome;
use handlers::prompts::PromptCommand;
use handlers::{design as design_handlers, generate, market as market_handlers, report, status};
use market::{CategoryKey, CustomTermOutcome};
use prompts::{PromptPreset, PromptStore, PromptUpdate};
use state::Session;
use utils::logging::init_logging;

fn usage() -> &'static str {
    "Usage:
  configurator session [--sheet <path>] [--add <category>=<term>]... [--toggle <category>=<term>]...
                       [--set <field>=<value>]... [--reset] [--reference <image>] [--analyze]
                       [--idea <text>] [--concepts] [--concept <n>] [--generate] [--save-latest]
                       [--filter <tag|SAVED>]
  configurator prompts show|presets|reset
  configurator prompts preset <jewelry|generic|fashion> [--save]
  configurator prompts set <update-name> <text> [--save]
  configurator status

Categories: color, material, stone, craftsmanship, style, element"
}

#[derive(Debug, Default)]
struct SessionArgs {
    sheet: Option<PathBuf>,
    adds: Vec<(CategoryKey, String)>,
    toggles: Vec<(CategoryKey, String)>,
    sets: Vec<(String, String)>,
    reset: bool,
    reference: Option<PathBuf>,
    analyze: bool,
    idea: String,
    list_concepts: bool,
    concept: Option<usize>,
    generate: bool,
    save_latest: bool,
    filter: Option<String>,
}

#[derive(Debug)]
enum CliCommand {
    Session(SessionArgs),
    Prompts(PromptCommand),
    Status,
}

fn next_value<'a>(args: &'a [String], index: &mut usize, flag: &str) -> Result<&'a str> {
    *index += 1;
    args.get(*index)
        .map(|value| value.as_str())
        .ok_or_else(|| anyhow!("Missing value for {flag}"))
}

fn parse_pair<'a>(value: &'a str, flag: &str) -> Result<(&'a str, &'a str)> {
    value
        .split_once('=')
        .map(|(left, right)| (left.trim(), right.trim()))
        .ok_or_else(|| anyhow!("Expected <name>=<value> for {flag}, got: {value}"))
}

fn parse_keyword_arg(value: &str, flag: &str) -> Result<(CategoryKey, String)> {
    let (category, term) = parse_pair(value, flag)?;
    let key = CategoryKey::parse(category)
        .ok_or_else(|| anyhow!("Unknown category for {flag}: {category}"))?;
    Ok((key, term.to_string()))
}

fn parse_session_args(args: &[String]) -> Result<SessionArgs> {
    let mut parsed = SessionArgs::default();
    let mut index = 0;
    while index < args.len() {
        match args[index].as_str() {
            "--sheet" => parsed.sheet = Some(PathBuf::from(next_value(args, &mut index, "--sheet")?)),
            "--add" => {
                let value = next_value(args, &mut index, "--add")?;
                parsed.adds.push(parse_keyword_arg(value, "--add")?);
            }
            "--toggle" => {
                let value = next_value(args, &mut index, "--toggle")?;
                parsed.toggles.push(parse_keyword_arg(value, "--toggle")?);
            }
            "--set" => {
                let value = next_value(args, &mut index, "--set")?;
                let (field, text) = parse_pair(value, "--set")?;
                parsed.sets.push((field.to_string(), text.to_string()));
            }
            "--reset" => parsed.reset = true,
            "--reference" => {
                parsed.reference = Some(PathBuf::from(next_value(args, &mut index, "--reference")?))
            }
            "--analyze" => parsed.analyze = true,
            "--idea" => parsed.idea = next_value(args, &mut index, "--idea")?.to_string(),
            "--concepts" => parsed.list_concepts = true,
            "--concept" => {
                let value = next_value(args, &mut index, "--concept")?;
                parsed.concept = Some(
                    value
                        .parse::<usize>()
                        .map_err(|_| anyhow!("Invalid --concept value: {value}"))?,
                );
            }
            "--generate" => parsed.generate = true,
            "--save-latest" => parsed.save_latest = true,
            "--filter" => parsed.filter = Some(next_value(args, &mut index, "--filter")?.to_string()),
            "--help" | "-h" => return Err(anyhow!(usage())),
            other => {
                return Err(anyhow!("Unknown session argument: {other}\n{}", usage()));
            }
        }
        index += 1;
    }
    Ok(parsed)
}

fn parse_prompts_args(args: &[String]) -> Result<PromptCommand> {
    let save = args.iter().any(|arg| arg == "--save");
    let positional: Vec<&str> = args
        .iter()
        .map(|arg| arg.as_str())
        .filter(|arg| *arg != "--save")
        .collect();

    match positional.as_slice() {
        ["show"] | [] => Ok(PromptCommand::Show),
        ["presets"] => Ok(PromptCommand::Presets),
        ["reset"] => Ok(PromptCommand::Reset),
        ["preset", name] => {
            let preset =
                PromptPreset::parse(name).ok_or_else(|| anyhow!("Unknown preset: {name}"))?;
            Ok(PromptCommand::Apply {
                update: PromptUpdate::UsePreset(preset),
                save,
            })
        }
        ["set", name, text @ ..] if !text.is_empty() => {
            let update = PromptUpdate::parse(name, &text.join(" "))
                .ok_or_else(|| anyhow!("Unknown prompt update: {name}"))?;
            Ok(PromptCommand::Apply { update, save })
        }
        _ => Err(anyhow!("Invalid prompts command\n{}", usage())),
    }
}

fn parse_cli(args: &[String]) -> Result<CliCommand> {
    match args.get(1).map(|value| value.as_str()) {
        Some("session") => Ok(CliCommand::Session(parse_session_args(&args[2..])?)),
        Some("prompts") => Ok(CliCommand::Prompts(parse_prompts_args(&args[2..])?)),
        Some("status") => Ok(CliCommand::Status),
        _ => Err(anyhow!(usage())),
    }
}

fn load_prompt_store() -> PromptStore {
    PromptStore::load(&CONFIG.prompt_config_path, CONFIG.prompt_preset)
}

async fn run_session(args: SessionArgs) -> Result<()> {
    let mut session = Session::new(load_prompt_store());

    if let Some(sheet) = &args.sheet {
        match market_handlers::upload_handler(&mut session, sheet).await {
            UploadOutcome::Analyzed(summary) => println!(
                "Analyzed {}: {} of {} keywords found in the data.",
                sheet.display(),
                summary.found_terms,
                summary.total_terms
            ),
            UploadOutcome::Rejected(message) => println!("{message}"),
            UploadOutcome::Busy => println!("Analysis already in progress."),
        }
    }

    for (key, term) in &args.adds {
        match market_handlers::add_keyword_handler(&mut session, *key, term) {
            CustomTermOutcome::Added { count } => {
                println!("Added '{term}' to {key} (count {count}).")
            }
            CustomTermOutcome::DuplicateIgnored => {
                println!("'{term}' already exists in {key}; ignored.")
            }
            CustomTermOutcome::EmptyIgnored => {}
        }
    }

    for (key, term) in &args.toggles {
        let active = market_handlers::toggle_keyword_handler(&mut session, *key, term);
        println!(
            "{} '{term}' ({key}).",
            if active { "Selected" } else { "Deselected" }
        );
    }

    for (field, value) in &args.sets {
        design_handlers::set_field_handler(&mut session, field, value)?;
    }

    if let Some(reference) = &args.reference {
        generate::reference_handler(&mut session, reference).await?;
    }

    if args.analyze {
        match generate::analyze_handler(&mut session).await {
            Some(analysis) => println!(
                "Reference analysis\n{}",
                serde_json::to_string_pretty(&analysis)?
            ),
            None => warn!("--analyze given without --reference; skipping analysis"),
        }
    }

    if args.list_concepts {
        let concepts = generate_concepts(&args.idea, session.reference_analysis());
        print!("Inspiration concepts\n{}", report::render_concepts(&concepts));
    }

    if let Some(number) = args.concept {
        let concept = design_handlers::apply_concept_handler(&mut session, number, &args.idea)?;
        println!("Applied concept: {}", concept.title);
    }

    if args.reset {
        session.market.reset();
    }

    print!("{}", report::render_market_report(&session));
    println!();
    print!("{}", report::render_design(&session)?);

    if args.generate {
        match generate::generate_handler(&mut session).await {
            GenerateOutcome::Completed { id, .. } => {
                println!("Generated design {id}.");
                if args.save_latest {
                    session.gallery.toggle_saved(&id);
                }
            }
            GenerateOutcome::Failed { message } => println!("{message}"),
            GenerateOutcome::CoolingDown { remaining } => println!(
                "Please wait {} ms before generating again.",
                remaining.as_millis()
            ),
        }
    }

    if !session.gallery.items().is_empty() || args.filter.is_some() {
        let filter = GalleryFilter::parse(args.filter.as_deref());
        println!();
        print!("{}", report::render_gallery(&session, &filter));
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let _guards = init_logging();

    let args: Vec<String> = std::env::args().collect();
    let command = parse_cli(&args)?;
    info!("Starting design configurator: {:?}", args.get(1));

    match command {
        CliCommand::Session(session_args) => run_session(session_args).await?,
        CliCommand::Prompts(prompt_command) => {
            let mut store = load_prompt_store();
            print!(
                "{}",
                handlers::prompts::prompts_handler(&mut store, prompt_command)?
            );
        }
        CliCommand::Status => print!("{}", status::status_handler(&load_prompt_store())),
    }

    Ok(())
}
