use super::error::{NormalizationError, NormalizationResult};

/// 原始紀錄 → 型別化紀錄的正規化器
pub trait RecordNormalizer {
    type Raw;
    type Output;

    /// 正規化單筆紀錄
    fn normalize_item(&self, raw: Self::Raw) -> NormalizationResult<Self::Output>;

    /// 批量正規化，回傳有效紀錄與被拒絕的原因（不中斷整批）
    fn normalize_batch(
        &self,
        items: impl IntoIterator<Item = Self::Raw>,
    ) -> (Vec<Self::Output>, Vec<NormalizationError>) {
        let mut valid_items = Vec::new();
        let mut rejected = Vec::new();

        for item in items {
            match self.normalize_item(item) {
                Ok(output) => valid_items.push(output),
                Err(e) => rejected.push(e),
            }
        }

        (valid_items, rejected)
    }
}
