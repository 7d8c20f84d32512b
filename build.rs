use proc_macro2::TokenStream;
use quote::quote;
use std::env;
use std::fs;
use std::path::Path;

// 這些類型僅在 build.rs 中用於解析 TOML，crate 內使用的是生成後的常量

#[derive(Debug, serde::Deserialize)]
struct ItemConfig {
    nature_rune_id: i64,
    bowstring_id: i64,
    battlestaff_cost: i64,
    tracked: Vec<i64>,
    high_alch: Vec<i64>,
    #[serde(default)]
    staff: Vec<StaffDef>,
    #[serde(default)]
    bow: Vec<BowDef>,
    #[serde(default)]
    sapling: Vec<SaplingDef>,
}

#[derive(Debug, serde::Deserialize)]
struct StaffDef {
    battlestaff_id: i64,
    orb_id: i64,
}

#[derive(Debug, serde::Deserialize)]
struct BowDef {
    bow_id: i64,
    log_id: i64,
}

#[derive(Debug, serde::Deserialize)]
struct SaplingDef {
    sapling_id: i64,
    seed_id: i64,
}

fn main() {
    println!("cargo:rerun-if-changed=config/items.toml");

    // 讀取 items.toml
    let toml_content =
        fs::read_to_string("config/items.toml").expect("Failed to read config/items.toml");

    let config: ItemConfig =
        toml::from_str(&toml_content).expect("Failed to parse config/items.toml");

    let tables = generate_item_tables(&config);

    let out_dir = env::var_os("OUT_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join("items_generated.rs");

    fs::write(&dest_path, tables.to_string()).expect("Failed to write generated item tables");
}

fn generate_item_tables(config: &ItemConfig) -> TokenStream {
    let nature_rune_id = config.nature_rune_id;
    let bowstring_id = config.bowstring_id;
    let battlestaff_cost = config.battlestaff_cost;
    let tracked = &config.tracked;
    let high_alch = &config.high_alch;

    let staffs: Vec<TokenStream> = config
        .staff
        .iter()
        .map(|s| {
            let battlestaff_id = s.battlestaff_id;
            let orb_id = s.orb_id;
            quote! { StaffConversion { battlestaff_id: #battlestaff_id, orb_id: #orb_id } }
        })
        .collect();

    let bows: Vec<TokenStream> = config
        .bow
        .iter()
        .map(|b| {
            let bow_id = b.bow_id;
            let log_id = b.log_id;
            quote! { BowConversion { bow_id: #bow_id, log_id: #log_id } }
        })
        .collect();

    let saplings: Vec<TokenStream> = config
        .sapling
        .iter()
        .map(|s| {
            let sapling_id = s.sapling_id;
            let seed_id = s.seed_id;
            quote! { SaplingSeed { sapling_id: #sapling_id, seed_id: #seed_id } }
        })
        .collect();

    quote! {
        /// 自然符文物品 id
        pub const NATURE_RUNE_ID: i64 = #nature_rune_id;
        /// 弓弦物品 id
        pub const BOWSTRING_ID: i64 = #bowstring_id;
        /// 空白戰鬥法杖的固定成本
        pub const BATTLESTAFF_COST: i64 = #battlestaff_cost;
        /// 需抓取時間序列的物品（可能含重複）
        pub const TRACKED_ITEM_IDS: &[i64] = &[#(#tracked),*];
        /// 僅用於高級煉金的物品
        pub const HIGH_ALCH_ITEM_IDS: &[i64] = &[#(#high_alch),*];
        /// 戰鬥法杖 → 法球
        pub const STAFF_CONVERSIONS: &[StaffConversion] = &[#(#staffs),*];
        /// 弓 → 原木
        pub const BOW_CONVERSIONS: &[BowConversion] = &[#(#bows),*];
        /// 樹苗 → 種子
        pub const SAPLING_SEEDS: &[SaplingSeed] = &[#(#saplings),*];
    }
}
