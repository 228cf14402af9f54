use anyhow::Context;
use clap::Parser;
use mecharek::domain::ports::CatalogSource;
use mecharek::utils::error::ErrorSeverity;
use mecharek::utils::{logger, validation::Validate};
use mecharek::{
    BuiltinCatalog, CliConfig, FileCatalog, LocalStorage, MatchError, RecommendEngine,
    ResponseStyle, Session, Turn,
};
use std::io::{BufRead, Write};

fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting mecharek");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = run(&cli) {
        match e.downcast_ref::<MatchError>() {
            Some(err) => {
                tracing::error!(
                    "❌ mecharek failed: {} (Category: {:?}, Severity: {:?})",
                    err,
                    err.category(),
                    err.severity()
                );
                eprintln!("❌ {}", err.user_friendly_message());
                eprintln!("💡 建議: {}", err.recovery_suggestion());

                // 根據錯誤嚴重程度決定退出碼
                let exit_code = match err.severity() {
                    ErrorSeverity::Medium => 2,
                    ErrorSeverity::High => 1,
                    ErrorSeverity::Critical => 3,
                };
                std::process::exit(exit_code);
            }
            None => {
                tracing::error!("❌ mecharek failed: {:#}", e);
                eprintln!("❌ {:#}", e);
                std::process::exit(1);
            }
        }
    }
}

fn run(cli: &CliConfig) -> anyhow::Result<()> {
    let config = cli.resolve()?;
    config.validate()?;

    let source: Box<dyn CatalogSource> = match config.catalog_path() {
        Some(path) => Box::new(FileCatalog::new(path)),
        None => Box::new(BuiltinCatalog),
    };
    let catalog = source.load()?;
    tracing::info!("✅ Catalog ready: {} keyboards from {}", catalog.len(), source.describe());

    let engine = RecommendEngine::new(catalog)
        .with_extractor(config.build_extractor()?)
        .with_top_n(config.top_n());

    let mut session = Session::new(&engine, config.style());
    if let Some(keywords) = config.remember_keywords() {
        session = session.with_remember_keywords(keywords.to_vec());
    }

    if cli.query.is_empty() {
        interactive(&mut session, cli.explain)?;
    } else {
        for query in &cli.query {
            println!("> {}", query);
            let turn = session.handle(query);
            print_turn(&turn, cli.explain);
        }
    }

    if let Some(path) = &cli.export {
        session
            .export(&LocalStorage::new("."), path)
            .with_context(|| format!("failed to export conversation to {}", path))?;
        println!("📁 Conversation saved to: {}", path);
    }

    Ok(())
}

fn interactive(session: &mut Session<'_>, explain: bool) -> anyhow::Result<()> {
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();

    println!("{}", mecharek::app::session::GREETING);
    println!("(/reset, /memory, /style santai|formal, /quit)");

    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match input {
            "/quit" | "/exit" => break,
            "/reset" => {
                session.reset();
                println!("{}", mecharek::app::session::GREETING);
            }
            "/memory" => {
                println!("{}", serde_json::to_string_pretty(session.memory())?);
                println!("Conversation history length: {}", session.messages().len());
            }
            _ if input.starts_with("/style") => {
                let style = input.trim_start_matches("/style").trim();
                match style.parse::<ResponseStyle>() {
                    Ok(style) => session.set_style(style),
                    Err(reason) => eprintln!("❌ {}", reason),
                }
            }
            _ => {
                let turn = session.handle(input);
                print_turn(&turn, explain);
            }
        }
    }

    Ok(())
}

fn print_turn(turn: &Turn<'_>, explain: bool) {
    println!("{}\n", turn.reply());

    if let Turn::Recommended { recommendation, .. } = turn {
        if explain {
            println!("Preferences: {:?}", recommendation.preferences);
            for pick in &recommendation.picks {
                println!("  [{:>4}] {}", pick.score, pick.entry.name);
            }
            println!();
        }
    }
}
