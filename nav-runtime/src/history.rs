//! # History 模块
//!
//! 导航历史记录，用于页面访问统计与"最近导航"查询。
//!
//! ## 设计原则
//!
//! - 只记录真正发生变化的导航
//! - 容量有上限，超出时淘汰最早的记录
//! - 不持久化

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};

use crate::resolver::NavigationOutcome;
use crate::route::Route;
use crate::state::NavDirection;
use crate::transition::TransitionKind;

/// 默认最多记录的事件数
pub const DEFAULT_MAX_EVENTS: usize = 1000;

/// 一次导航事件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationEvent {
    /// 来源路由（首次加载时为空）
    pub from: Option<Route>,
    /// 目标路由
    pub to: Route,
    /// 分类结果
    pub direction: NavDirection,
    /// 进入内容使用的效果
    pub kind: TransitionKind,
    /// 时间戳（Unix 秒）
    pub timestamp: u64,
}

impl NavigationEvent {
    /// 从导航结果创建事件
    pub fn from_outcome(outcome: &NavigationOutcome) -> Self {
        Self {
            from: outcome.from.clone(),
            to: outcome.to.clone(),
            direction: outcome.direction,
            kind: outcome.incoming.kind,
            timestamp: current_timestamp(),
        }
    }
}

/// 导航历史容器
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationHistory {
    /// 事件列表（按时间顺序）
    events: VecDeque<NavigationEvent>,
    /// 最大记录数
    max_events: usize,
}

impl Default for NavigationHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationHistory {
    pub fn new() -> Self {
        Self {
            events: VecDeque::new(),
            max_events: DEFAULT_MAX_EVENTS,
        }
    }

    /// 设置最大记录数
    pub fn with_max_events(mut self, max: usize) -> Self {
        self.max_events = max;
        self
    }

    /// 记录一次导航结果
    ///
    /// 重复导航（路由未变化）不记录，返回 `false`。
    pub fn record(&mut self, outcome: &NavigationOutcome) -> bool {
        if !outcome.changed {
            return false;
        }
        self.push(NavigationEvent::from_outcome(outcome));
        true
    }

    /// 添加事件
    pub fn push(&mut self, event: NavigationEvent) {
        self.events.push_back(event);
        while self.events.len() > self.max_events {
            self.events.pop_front();
        }
    }

    /// 所有事件
    pub fn events(&self) -> impl Iterator<Item = &NavigationEvent> {
        self.events.iter()
    }

    /// 最近的 N 条事件（按时间顺序）
    pub fn recent(&self, count: usize) -> Vec<&NavigationEvent> {
        let skip = self.events.len().saturating_sub(count);
        self.events.iter().skip(skip).collect()
    }

    /// 每个路由被进入的次数
    pub fn page_views(&self) -> BTreeMap<Route, u64> {
        let mut views = BTreeMap::new();
        for event in &self.events {
            *views.entry(event.to.clone()).or_insert(0) += 1;
        }
        views
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// 获取当前时间戳（Unix 秒）
fn current_timestamp() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
