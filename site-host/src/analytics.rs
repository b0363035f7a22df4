//! # Analytics 模块
//!
//! 管理后台的访问统计。数据只来自真实记录的导航历史；
//! 没有记录时返回显式的 `no_data`，从不伪造样本。

use nav_runtime::Route;
use serde::Serialize;
use std::collections::BTreeMap;

/// 访问统计报告
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalyticsReport {
    /// 有数据
    Ok {
        /// 各路由访问次数
        page_views: BTreeMap<Route, u64>,
        /// 总访问次数
        total_views: u64,
    },
    /// 尚无任何记录
    NoData,
}

impl AnalyticsReport {
    pub fn from_page_views(page_views: BTreeMap<Route, u64>) -> Self {
        if page_views.is_empty() {
            return Self::NoData;
        }
        let total_views = page_views.values().sum();
        Self::Ok {
            page_views,
            total_views,
        }
    }
}
