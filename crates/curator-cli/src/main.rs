use std::io::{self, ErrorKind, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use curator_contracts::catalog::{Category, TargetInfo, NO_SELECTION};
use curator_contracts::console::{parse_intent, Intent, CONSOLE_HELP_COMMANDS};
use curator_contracts::selection::Reconciliation;
use curator_contracts::CuratorError;
use curator_engine::{BackendConfig, CurationBackend, CurationSession, HttpBackend};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "curator", version, about = "Sengoku asset curation console")]
struct Cli {
    /// Backend base URL; overrides CURATOR_BASE_URL.
    #[arg(long, global = true)]
    base_url: Option<String>,
    /// Append session events to this JSONL file.
    #[arg(long, global = true)]
    journal: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    Targets(TargetsArgs),
    Info(SelectorArgs),
    Candidates,
    Generate(GenerateArgs),
    Reflect(ReflectArgs),
    Console,
}

#[derive(Debug, Parser)]
struct TargetsArgs {
    #[arg(long, value_parser = parse_category, default_value = "daimyo")]
    category: Category,
}

#[derive(Debug, Parser)]
struct SelectorArgs {
    #[arg(long, value_parser = parse_category, default_value = "daimyo")]
    category: Category,
    #[arg(long)]
    target: Option<String>,
}

#[derive(Debug, Parser)]
struct GenerateArgs {
    #[command(flatten)]
    selector: SelectorArgs,
    #[arg(long)]
    prompt: Option<String>,
}

#[derive(Debug, Parser)]
struct ReflectArgs {
    #[arg(long)]
    file: String,
    #[command(flatten)]
    selector: SelectorArgs,
    #[arg(long, value_parser = parse_category)]
    modal_category: Option<Category>,
    #[arg(long)]
    modal_target: Option<String>,
    /// Overwrite the canonical asset without asking.
    #[arg(long)]
    yes: bool,
}

fn parse_category(raw: &str) -> Result<Category, String> {
    raw.parse::<Category>().map_err(|err| err.to_string())
}

fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "curator_cli=info,curator_engine=info,curator_contracts=warn".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("curator error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    let mut session = open_session(cli.base_url.as_deref(), cli.journal)?;
    match cli.command {
        Command::Targets(args) => run_targets(&session, args.category),
        Command::Info(args) => {
            apply_selector(&mut session, &args)?;
            print_info(&session.target_info());
            Ok(0)
        }
        Command::Candidates => {
            print_candidates(&session);
            Ok(0)
        }
        Command::Generate(args) => run_generate(&mut session, args),
        Command::Reflect(args) => run_reflect(&mut session, args),
        Command::Console => {
            run_console(&mut session)?;
            Ok(0)
        }
    }
}

fn open_session(
    base_url: Option<&str>,
    journal: Option<PathBuf>,
) -> Result<CurationSession<HttpBackend>> {
    let mut config = BackendConfig::from_env();
    if let Some(base_url) = base_url {
        config = config.with_base_url(base_url);
    }
    tracing::debug!(base_url = %config.base_url, "using curation backend");
    let asset_prefix = config.asset_prefix.clone();
    let backend = HttpBackend::new(config)?;
    let mut session = CurationSession::new(backend, asset_prefix);
    if let Some(path) = journal {
        session = session.with_journal(path);
    }
    session
        .load()
        .context("failed loading catalog and candidates")?;
    Ok(session)
}

fn apply_selector<B: CurationBackend>(
    session: &mut CurationSession<B>,
    args: &SelectorArgs,
) -> Result<()> {
    session.set_main_category(args.category);
    if let Some(target) = args.target.as_deref() {
        session.set_main_target(target)?;
    }
    Ok(())
}

fn run_targets<B: CurationBackend>(
    session: &CurationSession<B>,
    category: Category,
) -> Result<i32> {
    let targets = session.resolver().targets(category);
    if targets.is_empty() {
        println!("No {category} targets.");
        return Ok(0);
    }
    for option in targets {
        println!("{}\t{}\t{}", option.id, option.label, option.dest_path);
    }
    Ok(0)
}

fn run_generate<B: CurationBackend>(
    session: &mut CurationSession<B>,
    args: GenerateArgs,
) -> Result<i32> {
    apply_selector(session, &args.selector)?;
    if let Some(prompt) = args.prompt {
        session.set_prompt(prompt);
    }
    let outcome = session.submit_generation()?;
    println!(
        "{}",
        outcome.message.as_deref().unwrap_or("Generation complete.")
    );
    if let Some(file) = outcome.file.as_deref() {
        println!("Candidate: {file}");
    }
    Ok(0)
}

fn run_reflect<B: CurationBackend>(
    session: &mut CurationSession<B>,
    args: ReflectArgs,
) -> Result<i32> {
    apply_selector(session, &args.selector)?;
    let reconciliation = session.open_reflect(&args.file)?;
    print_reconciliation(&reconciliation);

    if let Some(category) = args.modal_category {
        session.set_modal_category(category)?;
    }
    if let Some(target) = args.modal_target.as_deref() {
        session.set_modal_target(target)?;
    }
    print_modal(session);

    if !args.yes {
        println!("Dry run: pass --yes to overwrite the destination.");
        session.cancel_reflect();
        return Ok(0);
    }
    let outcome = session.confirm_reflect()?;
    println!(
        "Reflected to {}",
        outcome.dest.as_deref().unwrap_or("the canonical asset")
    );
    Ok(0)
}

fn run_console<B: CurationBackend>(session: &mut CurationSession<B>) -> Result<()> {
    let stdin = io::stdin();
    let mut line = String::new();

    println!("Curator console started. Type /help for commands.");
    print_info(&session.target_info());

    loop {
        print!("> ");
        io::stdout().flush()?;

        line.clear();
        let read = match stdin.read_line(&mut line) {
            Ok(read) => read,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(err.into()),
        };
        if read == 0 {
            break;
        }

        let intent = parse_intent(line.trim_end_matches(['\n', '\r']));
        if intent.action == "quit" {
            break;
        }
        if let Err(err) = handle_intent(session, &intent) {
            report_error(&err);
        }
    }
    Ok(())
}

fn handle_intent<B: CurationBackend>(
    session: &mut CurationSession<B>,
    intent: &Intent,
) -> Result<(), CuratorError> {
    match intent.action.as_str() {
        "noop" => {}
        "help" => println!("Commands: {}", CONSOLE_HELP_COMMANDS.join(" ")),
        "set_category" => {
            let category = required_arg(intent, "category", "/category")?.parse::<Category>()?;
            session.set_main_category(category);
            print_info(&session.target_info());
        }
        "set_target" => {
            session.set_main_target(required_arg(intent, "target", "/target")?)?;
            print_info(&session.target_info());
        }
        "set_prompt" => {
            session.set_prompt(intent.arg("prompt").unwrap_or_default());
            println!("Prompt set.");
        }
        "show_info" => print_info(&session.target_info()),
        "list_targets" => {
            let category = session.main_selection().category;
            for option in session.resolver().targets(category) {
                println!("{}\t{}\t{}", option.id, option.label, option.dest_path);
            }
        }
        "list_candidates" => print_candidates(session),
        "refresh" => {
            session.refresh_catalog()?;
            session.refresh_candidates()?;
            println!(
                "Loaded {} candidates; main target {}.",
                session.candidates().len(),
                session.target_info().id_label
            );
        }
        "generate" => {
            if let Some(prompt) = intent.prompt.as_deref() {
                session.set_prompt(prompt);
            }
            println!("Generating...");
            let outcome = session.submit_generation()?;
            println!(
                "{}",
                outcome.message.as_deref().unwrap_or("Generation complete.")
            );
        }
        "open_reflect" => {
            let reconciliation = session.open_reflect(required_arg(intent, "file", "/pick")?)?;
            print_reconciliation(&reconciliation);
            print_modal(session);
        }
        "set_modal_category" => {
            let category =
                required_arg(intent, "category", "/modal_category")?.parse::<Category>()?;
            session.set_modal_category(category)?;
            print_modal(session);
        }
        "set_modal_target" => {
            session.set_modal_target(required_arg(intent, "target", "/modal_target")?)?;
            print_modal(session);
        }
        "confirm_reflect" => {
            let outcome = session.confirm_reflect()?;
            println!(
                "Reflected to {}",
                outcome.dest.as_deref().unwrap_or("the canonical asset")
            );
        }
        "cancel_reflect" => {
            if session.cancel_reflect() {
                println!("Reflect cancelled.");
            } else {
                println!("No reflect selection is open.");
            }
        }
        "unknown" => {
            let command = intent
                .command_args
                .get("command")
                .and_then(|value| value.as_str())
                .unwrap_or("");
            println!("Unknown command: /{command}. Type /help for commands.");
        }
        other => println!("Unhandled action: {other}"),
    }
    Ok(())
}

fn required_arg<'a>(intent: &'a Intent, key: &str, usage: &str) -> Result<&'a str, CuratorError> {
    intent
        .arg(key)
        .ok_or_else(|| CuratorError::PreconditionFailed(format!("{usage} requires a {key}")))
}

fn report_error(err: &CuratorError) {
    match err {
        CuratorError::Busy => println!("A generation is already in progress."),
        other => println!("Error: {other}"),
    }
}

fn print_info(info: &TargetInfo) {
    println!("Category:  {}", info.category);
    println!("ID:        {}", info.id_label);
    println!("Size:      {}", info.size_label);
    if info.is_resolved() {
        println!("Name:      {}", info.display_name);
        println!("Dest:      {}", info.dest_path);
        println!("Prompt:    {}", info.prompt);
    } else {
        println!("Name:      {NO_SELECTION}");
    }
}

fn print_candidates<B: CurationBackend>(session: &CurationSession<B>) {
    if session.candidates().is_empty() {
        println!("No candidates.");
        return;
    }
    for candidate in session.candidates().iter() {
        let info = candidate.info_label();
        if info.is_empty() {
            println!("{}\t{}", candidate.filename, candidate.prompt_label());
        } else {
            println!(
                "{}\t{}\t{}",
                candidate.filename,
                info,
                candidate.prompt_label()
            );
        }
        println!("\t{}", session.asset_url(candidate));
    }
}

fn print_reconciliation(reconciliation: &Reconciliation) {
    if let Some(miss) = reconciliation.miss.as_ref() {
        println!(
            "Target '{}' is not listed; selected the first available target.",
            miss.requested
        );
    }
    if reconciliation.options.is_empty() {
        println!("No {} targets to reflect onto.", reconciliation.selection.category);
    }
}

fn print_modal<B: CurationBackend>(session: &CurationSession<B>) {
    let Some(selection) = session.reflect_selection() else {
        return;
    };
    let target = selection
        .target_id
        .as_ref()
        .map(|id| id.to_string())
        .unwrap_or_else(|| NO_SELECTION.to_string());
    println!("Candidate: {}", selection.selected_file);
    println!("Reflect:   [{}] {}", selection.category, target);
    let dest = session.reflect_preview().unwrap_or_default();
    if dest.is_empty() {
        println!("Dest:      {NO_SELECTION}");
    } else {
        println!("Dest:      {dest} (will be overwritten)");
    }
}
