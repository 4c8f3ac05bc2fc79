//! 解析ロジック（CLI/WASM共通）
//!
//! 入力チェック → 多重実行チェック → 推論呼び出し → 集計 の流れをまとめる。
//! 推論の送信手段は InferenceClient で差し替える（CLI: reqwest, WASM: fetch）。

use crate::error::{Error, Result};
use crate::payload::ImagePayload;
use crate::report::AnalysisReport;
use crate::session::AnalysisSession;
use crate::types::GridCount;
use crate::weapon_map::WeaponNameTable;

/// 推論サービスへの送信手段
#[allow(async_fn_in_trait)]
pub trait InferenceClient {
    /// アーセナル画像とスクリーンショットを送り、座標ごとの出現数を得る
    async fn count_weapons(
        &self,
        reference_base64: &str,
        screenshot_base64: &str,
    ) -> Result<GridCount>;
}

/// 解析器
pub struct Analyzer<C> {
    client: C,
    table: WeaponNameTable,
    session: AnalysisSession,
    reference: Option<ImagePayload>,
}

impl<C: InferenceClient> Analyzer<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            table: WeaponNameTable::builtin(),
            session: AnalysisSession::new(),
            reference: None,
        }
    }

    pub fn with_table(mut self, table: WeaponNameTable) -> Self {
        self.table = table;
        self
    }

    /// 既存のフラグを共有する（WASMで画面側と共有する場合など）
    pub fn with_session(mut self, session: AnalysisSession) -> Self {
        self.session = session;
        self
    }

    pub fn with_reference(mut self, reference: ImagePayload) -> Self {
        self.reference = Some(reference);
        self
    }

    pub fn set_reference(&mut self, reference: ImagePayload) {
        self.reference = Some(reference);
    }

    /// アーセナル画像が読み込み済みか
    pub fn is_ready(&self) -> bool {
        self.reference.is_some()
    }

    pub fn session(&self) -> &AnalysisSession {
        &self.session
    }

    pub fn table(&self) -> &WeaponNameTable {
        &self.table
    }

    /// スクリーンショットを解析
    ///
    /// - 画像なし → InputMissing（通信しない）
    /// - アーセナル未読込 → AssetLoad
    /// - 解析中 → Busy
    /// - 推論失敗 → Inference（詳細はDebugのみ）
    pub async fn analyze(&self, screenshot: Option<&ImagePayload>) -> Result<AnalysisReport> {
        let screenshot = screenshot.ok_or(Error::InputMissing)?;
        let reference = self
            .reference
            .as_ref()
            .ok_or_else(|| Error::AssetLoad("reference image is not loaded".into()))?;
        let _guard = self.session.try_begin().ok_or(Error::Busy)?;

        tracing::debug!(
            reference_len = reference.base64().len(),
            screenshot_len = screenshot.base64().len(),
            "sending inference request"
        );

        let grid = self
            .client
            .count_weapons(reference.base64(), screenshot.base64())
            .await
            .map_err(into_inference_failure)?;

        Ok(AnalysisReport::new(grid, &self.table))
    }
}

fn into_inference_failure(error: Error) -> Error {
    match error {
        Error::Inference(_) => error,
        other => Error::Inference(other.to_string()),
    }
}
