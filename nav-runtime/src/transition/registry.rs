//! # Transition Registry
//!
//! 过渡效果类型定义与默认参数。
//! 这是所有效果名称、默认时长的**唯一来源**。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// 过渡效果类型
///
/// ## 语义说明
///
/// - `SlideUp` / `SlideDown` / `SlideLeft` / `SlideRight`：平移类效果，
///   后退导航时会被翻转为反方向
/// - `Fade` / `Scale` / `Rotate` / `Flip`：非方向性效果，任何方向下保持不变
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransitionKind {
    /// 透明度淡入淡出
    #[default]
    Fade,
    /// 向上滑入
    SlideUp,
    /// 向下滑入
    SlideDown,
    /// 向左滑入（新内容从右侧进入）
    SlideLeft,
    /// 向右滑入（新内容从左侧进入）
    SlideRight,
    /// 缩放
    Scale,
    /// 旋转
    Rotate,
    /// 3D 翻转
    Flip,
}

impl TransitionKind {
    /// 全部效果类型
    pub const ALL: [TransitionKind; 8] = [
        TransitionKind::Fade,
        TransitionKind::SlideUp,
        TransitionKind::SlideDown,
        TransitionKind::SlideLeft,
        TransitionKind::SlideRight,
        TransitionKind::Scale,
        TransitionKind::Rotate,
        TransitionKind::Flip,
    ];

    /// 是否是方向性（平移类）效果
    pub fn is_directional(&self) -> bool {
        matches!(
            self,
            TransitionKind::SlideUp
                | TransitionKind::SlideDown
                | TransitionKind::SlideLeft
                | TransitionKind::SlideRight
        )
    }

    /// 反方向的效果
    ///
    /// 只翻转平移类效果；其他效果原样返回。
    pub fn reversed(&self) -> Self {
        match self {
            TransitionKind::SlideLeft => TransitionKind::SlideRight,
            TransitionKind::SlideRight => TransitionKind::SlideLeft,
            TransitionKind::SlideUp => TransitionKind::SlideDown,
            TransitionKind::SlideDown => TransitionKind::SlideUp,
            other => *other,
        }
    }

    /// 配置文件/API 中使用的名称
    pub fn name(&self) -> &'static str {
        match self {
            TransitionKind::Fade => "fade",
            TransitionKind::SlideUp => "slide-up",
            TransitionKind::SlideDown => "slide-down",
            TransitionKind::SlideLeft => "slide-left",
            TransitionKind::SlideRight => "slide-right",
            TransitionKind::Scale => "scale",
            TransitionKind::Rotate => "rotate",
            TransitionKind::Flip => "flip",
        }
    }

    /// 进入阶段默认时长（秒）
    pub fn enter_duration(&self) -> f32 {
        match self {
            TransitionKind::Flip => defaults::FLIP_ENTER_DURATION,
            _ => defaults::ENTER_DURATION,
        }
    }

    /// 退出阶段默认时长（秒）
    pub fn exit_duration(&self) -> f32 {
        match self {
            TransitionKind::Flip => defaults::FLIP_EXIT_DURATION,
            _ => defaults::EXIT_DURATION,
        }
    }
}

impl fmt::Display for TransitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TransitionKind {
    type Err = ConfigError;

    /// 大小写不敏感；`_` 与 `-` 等价
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        TransitionKind::ALL
            .into_iter()
            .find(|kind| kind.name() == normalized)
            .ok_or_else(|| ConfigError::UnknownTransition {
                name: s.to_string(),
            })
    }
}

/// 各阶段默认时长（秒）
///
/// 进入时长必须不小于退出时长，避免新旧内容之间出现空档。
pub mod defaults {
    /// 进入阶段默认时长
    pub const ENTER_DURATION: f32 = 0.4;
    /// 退出阶段默认时长
    pub const EXIT_DURATION: f32 = 0.3;
    /// Flip 进入阶段时长
    pub const FLIP_ENTER_DURATION: f32 = 0.5;
    /// Flip 退出阶段时长
    pub const FLIP_EXIT_DURATION: f32 = 0.4;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reversal_law() {
        assert_eq!(TransitionKind::SlideLeft.reversed(), TransitionKind::SlideRight);
        assert_eq!(TransitionKind::SlideRight.reversed(), TransitionKind::SlideLeft);
        assert_eq!(TransitionKind::SlideUp.reversed(), TransitionKind::SlideDown);
        assert_eq!(TransitionKind::SlideDown.reversed(), TransitionKind::SlideUp);

        for kind in [
            TransitionKind::Fade,
            TransitionKind::Scale,
            TransitionKind::Rotate,
            TransitionKind::Flip,
        ] {
            assert_eq!(kind.reversed(), kind);
            assert!(!kind.is_directional());
        }
    }

    #[test]
    fn test_reversal_is_involution() {
        for kind in TransitionKind::ALL {
            assert_eq!(kind.reversed().reversed(), kind);
        }
    }

    #[test]
    fn test_enter_not_shorter_than_exit() {
        for kind in TransitionKind::ALL {
            assert!(kind.enter_duration() >= kind.exit_duration(), "{kind}");
        }
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("slide-left".parse::<TransitionKind>().unwrap(), TransitionKind::SlideLeft);
        assert_eq!("Slide_Up".parse::<TransitionKind>().unwrap(), TransitionKind::SlideUp);
        assert_eq!(" FLIP ".parse::<TransitionKind>().unwrap(), TransitionKind::Flip);
        assert!(matches!(
            "wipe".parse::<TransitionKind>(),
            Err(ConfigError::UnknownTransition { .. })
        ));
    }

    #[test]
    fn test_serde_names_match_display() {
        for kind in TransitionKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{kind}\""));
        }
    }
}
