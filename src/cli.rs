use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "weapon-ai")]
#[command(about = "ゲームスクリーンショットの武器出現数をAIでカウント", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// スクリーンショットを解析して武器ごとの出現数を表示
    Analyze {
        /// スクリーンショット画像（"-" で標準入力）
        screenshot: Option<PathBuf>,

        /// アーセナル画像のパスまたはURL（省略時は設定値）
        #[arg(short, long)]
        arsenal: Option<String>,

        /// 武器名テーブルJSON（省略時は組み込みテーブル）
        #[arg(short, long)]
        weapon_map: Option<PathBuf>,

        /// 生のAI出力も表示
        #[arg(long)]
        raw: bool,

        /// JSONで出力
        #[arg(long)]
        json: bool,

        /// 生のAI出力をファイルに保存
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 保存済みのAI出力（JSON）を再集計
    Aggregate {
        /// AI出力JSONファイル
        #[arg(required = true)]
        input: PathBuf,

        /// 武器名テーブルJSON（省略時は組み込みテーブル）
        #[arg(short, long)]
        weapon_map: Option<PathBuf>,

        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 設定を表示/編集
    Config {
        /// APIキーを設定
        #[arg(long)]
        set_api_key: Option<String>,

        /// モデルを設定
        #[arg(long)]
        set_model: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_analyze() {
        let cli = Cli::parse_from([
            "weapon-ai", "analyze", "shot.jpg", "--arsenal", "grid.png", "--raw", "-v",
        ]);
        assert!(cli.verbose);
        match cli.command {
            Commands::Analyze { screenshot, arsenal, raw, json, .. } => {
                assert_eq!(screenshot, Some(PathBuf::from("shot.jpg")));
                assert_eq!(arsenal.as_deref(), Some("grid.png"));
                assert!(raw);
                assert!(!json);
            }
            _ => panic!("analyze expected"),
        }
    }

    #[test]
    fn test_parse_analyze_without_screenshot() {
        let cli = Cli::parse_from(["weapon-ai", "analyze"]);
        assert!(matches!(cli.command, Commands::Analyze { screenshot: None, .. }));
    }

    #[test]
    fn test_parse_aggregate_requires_input() {
        assert!(Cli::try_parse_from(["weapon-ai", "aggregate"]).is_err());
    }
}
