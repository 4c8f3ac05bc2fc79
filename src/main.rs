use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::process::ExitCode;
use std::time::Duration;
use weapon_ai::{cli, config, error, gemini, input, reference, report};
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use weapon_ai_common::{AnalysisReport, Analyzer};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // 推論失敗の詳細はログのみ。画面には汎用メッセージを出す
            if let Some(detail) = e.detail() {
                tracing::error!(%detail, "analysis failed");
            }
            eprintln!("❌ {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;

    match cli.command {
        Commands::Analyze { screenshot, arsenal, weapon_map, raw, json, output } => {
            // APIキーがなければここで終了
            let client = gemini::GeminiClient::from_config(&config)?;
            let progress = |msg: &str| {
                if !json {
                    println!("{}", msg);
                }
            };

            progress("🔫 weapon-ai - 武器カウント\n");

            // 1. スクリーンショット（なければ通信前に終了）
            progress("[1/3] スクリーンショットを読み込み中...");
            let screenshot = input::require_screenshot(screenshot.as_deref())?;
            let table = input::load_weapon_table(weapon_map.as_deref())?;

            // 2. アーセナル画像
            let arsenal = arsenal.unwrap_or_else(|| config.arsenal_path.clone());
            progress("[2/3] アーセナル画像を読み込み中...");
            let reference = reference::load_reference(&arsenal).await?;
            tracing::debug!(source = %arsenal, mime = reference.mime_type(), "reference loaded");
            progress("✔ 読み込み完了\n");

            // 3. AI解析
            progress(&format!("[3/3] AI解析中... (モデル: {})", client.model()));
            let analyzer = Analyzer::new(client)
                .with_reference(reference)
                .with_table(table);

            let spinner = (!json).then(start_spinner);
            let result = analyzer.analyze(Some(&screenshot)).await;
            if let Some(spinner) = spinner {
                spinner.finish_and_clear();
            }
            let analysis = result?;
            progress("✔ 解析完了\n");

            if let Some(output) = output {
                std::fs::write(&output, analysis.raw_json())?;
                tracing::info!("raw output saved to {}", output.display());
            }

            print_report(&analysis, raw, json)?;
        }

        Commands::Aggregate { input: path, weapon_map, json } => {
            let table = input::load_weapon_table(weapon_map.as_deref())?;
            let grid = input::load_raw_output(&path)?;
            if !grid.is_complete() {
                tracing::warn!(missing = grid.missing().len(), "raw output is missing coordinates");
            }
            let analysis = AnalysisReport::new(grid, &table);
            print_report(&analysis, false, json)?;
        }

        Commands::Config { set_api_key, set_model, show } => {
            let mut config = config;

            if let Some(key) = set_api_key {
                config.set_api_key(key)?;
                println!("✔ APIキーを設定しました");
            }

            if let Some(model) = set_model {
                config.set_model(model)?;
                println!("✔ モデルを設定しました");
            }

            if show {
                println!("設定:");
                println!("  モデル: {}", config.model);
                println!("  APIベースURL: {}", config.base_url);
                println!("  アーセナル画像: {}", config.arsenal_path);
                match config.timeout_seconds {
                    Some(secs) => println!("  タイムアウト: {}秒", secs),
                    None => println!("  タイムアウト: 既定値"),
                }
                println!("  APIキー: {}", if config.get_api_key().is_ok() { "設定済み" } else { "未設定" });
            }
        }
    }

    Ok(())
}

fn start_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message("AI is analyzing your screenshot...");
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}

fn print_report(analysis: &AnalysisReport, raw: bool, json: bool) -> Result<()> {
    if json {
        println!("{}", report::render_json(analysis)?);
    } else {
        print!("{}", report::render_text(analysis, raw));
    }
    Ok(())
}
