//! 物品設定模組 - 從 config/items.toml 編譯時生成
//!
//! 追蹤的物品 id、高級煉金物品以及各策略的對照表都是靜態設定，
//! 不屬於執行期輸入。

/// 戰鬥法杖製作：法杖 id 與所需法球 id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaffConversion {
    pub battlestaff_id: i64,
    pub orb_id: i64,
}

/// 弓製作：成品弓 id 與所需原木 id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BowConversion {
    pub bow_id: i64,
    pub log_id: i64,
}

/// 樹苗套利：樹苗 id 與其種子 id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaplingSeed {
    pub sapling_id: i64,
    pub seed_id: i64,
}

// 包含由 build.rs 生成的物品常量
include!(concat!(env!("OUT_DIR"), "/items_generated.rs"));

/// 去除重複 id，保留首次出現的順序
pub fn dedup_ids(ids: &[i64]) -> Vec<i64> {
    let mut seen = std::collections::HashSet::with_capacity(ids.len());
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

/// 需要抓取時間序列的物品（已去重）
pub fn tracked_item_ids() -> Vec<i64> {
    dedup_ids(TRACKED_ITEM_IDS)
}

/// 聚合時關注的物品：追蹤物品加上高級煉金物品
pub fn items_of_interest() -> Vec<i64> {
    let mut ids = TRACKED_ITEM_IDS.to_vec();
    ids.extend_from_slice(HIGH_ALCH_ITEM_IDS);
    dedup_ids(&ids)
}
