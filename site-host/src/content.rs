//! # Content 模块
//!
//! 着陆页各内容区块（hero、引言、评价、赠品、页脚链接、SEO）的读写。
//!
//! ## 约定
//!
//! - 每个区块有固定的 JSON 形状（见下方结构体），写入前先按形状校验
//! - 从未写入过的区块读取时返回"未找到"
//! - 存储本身是外部协作方；这里提供接口和一个内存实现

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::RwLock;
use tracing::{info, warn};

use crate::error::{AppError, AppResult};

/// 内容区块类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SectionKind {
    Hero,
    Quote,
    Testimonials,
    BonusOffers,
    FooterLinks,
    Seo,
}

impl SectionKind {
    pub const ALL: [SectionKind; 6] = [
        SectionKind::Hero,
        SectionKind::Quote,
        SectionKind::Testimonials,
        SectionKind::BonusOffers,
        SectionKind::FooterLinks,
        SectionKind::Seo,
    ];

    /// URL 中使用的名称
    pub fn name(&self) -> &'static str {
        match self {
            SectionKind::Hero => "hero",
            SectionKind::Quote => "quote",
            SectionKind::Testimonials => "testimonials",
            SectionKind::BonusOffers => "bonus-offers",
            SectionKind::FooterLinks => "footer-links",
            SectionKind::Seo => "seo",
        }
    }

    /// 按区块形状校验，并返回规范化后的 JSON
    ///
    /// 未知字段被丢弃，可选字段补齐为 `null`。
    pub fn normalize(&self, value: Value) -> AppResult<Value> {
        match self {
            SectionKind::Hero => reshape::<Hero>(*self, value),
            SectionKind::Quote => reshape::<Quote>(*self, value),
            SectionKind::Testimonials => reshape::<Vec<Testimonial>>(*self, value),
            SectionKind::BonusOffers => reshape::<Vec<BonusOffer>>(*self, value),
            SectionKind::FooterLinks => reshape::<Vec<FooterLink>>(*self, value),
            SectionKind::Seo => reshape::<Seo>(*self, value),
        }
    }
}

fn reshape<T: DeserializeOwned + Serialize>(kind: SectionKind, value: Value) -> AppResult<Value> {
    let typed: T = serde_json::from_value(value)
        .map_err(|e| AppError::BadRequest(format!("区块 '{kind}' 形状不正确: {e}")))?;
    serde_json::to_value(typed).map_err(|e| AppError::Internal(e.to_string()))
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SectionKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SectionKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| AppError::NotFound(format!("内容区块 '{s}'")))
    }
}

/// 首屏
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hero {
    pub title: String,
    pub subtitle: String,
    pub cta_text: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// 引言
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub text: String,
    pub author: String,
}

/// 读者评价
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Testimonial {
    pub name: String,
    #[serde(default)]
    pub role: Option<String>,
    pub text: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// 预购赠品
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BonusOffer {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// 页脚链接
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FooterLink {
    pub label: String,
    pub url: String,
}

/// SEO 元数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seo {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub og_image: Option<String>,
}

/// 内容存储
pub trait ContentStore: Send + Sync {
    /// 读取区块；从未写入时返回 `None`
    fn get(&self, kind: SectionKind) -> Option<Value>;

    /// 写入区块（调用方负责先 [`SectionKind::normalize`]）
    fn put(&self, kind: SectionKind, value: Value);
}

/// 内存内容存储
#[derive(Debug, Default)]
pub struct InMemoryContentStore {
    sections: RwLock<HashMap<SectionKind, Value>>,
}

impl InMemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从 JSON 文件载入初始内容
    ///
    /// 文件格式为 `{ "区块名": 内容 }`。未知区块或形状不正确的区块会被跳过并输出警告。
    pub fn seed_from_file(&self, path: impl AsRef<Path>) -> anyhow::Result<usize> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let raw: BTreeMap<String, Value> = serde_json::from_str(&text)?;
        let loaded = self.seed(raw);
        info!(path = %path.display(), sections = loaded, "内容初始数据已载入");
        Ok(loaded)
    }

    /// 批量写入初始内容，返回成功写入的区块数
    pub fn seed(&self, raw: BTreeMap<String, Value>) -> usize {
        let mut loaded = 0;
        for (name, value) in raw {
            let result = name
                .parse::<SectionKind>()
                .and_then(|kind| kind.normalize(value).map(|v| (kind, v)));
            match result {
                Ok((kind, value)) => {
                    self.put(kind, value);
                    loaded += 1;
                }
                Err(e) => warn!(section = %name, error = %e, "跳过初始内容"),
            }
        }
        loaded
    }
}

impl ContentStore for InMemoryContentStore {
    fn get(&self, kind: SectionKind) -> Option<Value> {
        self.sections
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(&kind)
            .cloned()
    }

    fn put(&self, kind: SectionKind, value: Value) {
        self.sections
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(kind, value);
    }
}
