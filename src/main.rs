use anyhow::Context;
use clap::Parser;
use mechanic_shop::config::cli::is_argument_count_error;
use mechanic_shop::utils::{logger, validation::Validate};
use mechanic_shop::{CliConfig, Database, MechanicShop, ShopConfig, TerminalConsole};

fn main() -> anyhow::Result<()> {
    // 參數個數不對：印出用法後直接結束，不回傳錯誤狀態
    let cli = match CliConfig::try_parse() {
        Ok(cli) => cli,
        Err(e) if is_argument_count_error(&e) => {
            eprint!("{}", e);
            return Ok(());
        }
        Err(e) => e.exit(),
    };

    // 載入配置：未指定檔案時使用預設值
    let config = match &cli.config {
        Some(path) => match ShopConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        },
        None => ShopConfig::default(),
    };

    logger::init_cli_logger(cli.verbose, &config.log_level(), config.log_format());
    tracing::info!("🚀 Starting mechanic-shop");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
        tracing::debug!("Shop config: {:?}", config);
    }

    // 驗證配置
    let validation = cli.validate().and_then(|_| config.validate());
    if let Err(e) = validation {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let db_config = cli.database_config(&config.database.data_dir);
    println!("Connecting to database {} ...", cli.connection_label());
    let db = match Database::open(&db_config, config.busy_timeout()) {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("❌ Unable to connect to {:?}: {}", db_config, e);
            eprintln!("Error - Unable to Connect to Database: {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };
    if config.database.create_schema {
        db.create_schema().context("failed to create the database schema")?;
    }
    tracing::info!("🔌 Connected as {}", cli.connection_label());
    println!("Done");

    let mut shop = MechanicShop::new(db, TerminalConsole::stdio());
    let outcome = shop.run();

    print!("Disconnecting from database...");
    drop(shop);
    println!("Done\n\nBye !");

    outcome.context("session ended with an unrecoverable error")?;
    Ok(())
}
