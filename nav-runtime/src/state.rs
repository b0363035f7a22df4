//! # State 模块
//!
//! 导航状态与方向模型。
//!
//! ## 设计原则
//!
//! - 状态**显式建模**，由 [`NavigationResolver`](crate::NavigationResolver) 独占持有
//! - 不允许隐式全局状态
//! - 只在当前会话内存活，不做持久化

use serde::{Deserialize, Serialize};

use crate::route::Route;

/// 导航方向
///
/// # 状态转换
///
/// ```text
/// NoHistory -> 初始状态，尚未进行过任何分类
/// Forward   -> 前往子路由
/// Backward  -> 返回父路由
/// None      -> 两个路由之间没有父子关系
/// ```
///
/// 只有 `新路由 != 上一路由` 的路由变化会触发重新分类；没有终止状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NavDirection {
    /// 尚未分类
    #[default]
    NoHistory,
    /// 前进（父 → 子）
    Forward,
    /// 后退（子 → 父）
    Backward,
    /// 无方向（不相关的路由）
    None,
}

impl NavDirection {
    /// 是否为后退
    pub fn is_backward(&self) -> bool {
        matches!(self, Self::Backward)
    }
}

/// 导航状态
///
/// 每个客户端会话一份，随应用启动创建，每次路由变化修改一次。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NavigationState {
    /// 上一次导航到的路由（下一次分类的基准）
    pub previous_route: Option<Route>,
    /// 当前路由
    pub current_route: Option<Route>,
    /// 最近一次分类得到的方向
    pub direction: NavDirection,
}

impl NavigationState {
    /// 创建初始状态
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = NavigationState::new();
        assert_eq!(state.previous_route, None);
        assert_eq!(state.current_route, None);
        assert_eq!(state.direction, NavDirection::NoHistory);
    }

    #[test]
    fn test_direction_serde() {
        assert_eq!(
            serde_json::to_string(&NavDirection::NoHistory).unwrap(),
            "\"no-history\""
        );
        let d: NavDirection = serde_json::from_str("\"backward\"").unwrap();
        assert!(d.is_backward());
    }
}
