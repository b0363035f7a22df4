//! # Motion
//!
//! 每种过渡效果对应的关键帧姿态，供渲染层直接使用。
//!
//! ```text
//! 新内容：initial ──enter──► animate
//! 旧内容：animate ──exit───► exit
//! ```

use serde::{Deserialize, Serialize};

use super::registry::TransitionKind;

/// 单个关键帧姿态
///
/// 平移量以容器尺寸的百分比表示，角度以度表示。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub opacity: f32,
    pub x_percent: f32,
    pub y_percent: f32,
    pub scale: f32,
    pub rotate_deg: f32,
    pub rotate_y_deg: f32,
}

impl Pose {
    /// 静止姿态（完全可见、无变换）
    pub const REST: Pose = Pose {
        opacity: 1.0,
        x_percent: 0.0,
        y_percent: 0.0,
        scale: 1.0,
        rotate_deg: 0.0,
        rotate_y_deg: 0.0,
    };

    /// 透明的静止姿态
    pub const HIDDEN: Pose = Pose {
        opacity: 0.0,
        ..Pose::REST
    };

    /// 在两个姿态之间线性插值
    pub fn lerp(&self, to: &Pose, t: f32) -> Pose {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: f32, b: f32| a + (b - a) * t;
        Pose {
            opacity: mix(self.opacity, to.opacity),
            x_percent: mix(self.x_percent, to.x_percent),
            y_percent: mix(self.y_percent, to.y_percent),
            scale: mix(self.scale, to.scale),
            rotate_deg: mix(self.rotate_deg, to.rotate_deg),
            rotate_y_deg: mix(self.rotate_y_deg, to.rotate_y_deg),
        }
    }
}

/// 一次过渡的三个关键帧
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Motion {
    /// 新内容的起始姿态
    pub initial: Pose,
    /// 静止姿态
    pub animate: Pose,
    /// 旧内容的结束姿态
    pub exit: Pose,
}

impl Motion {
    /// 获取效果对应的关键帧
    pub fn for_kind(kind: TransitionKind) -> Self {
        let (initial, exit) = match kind {
            TransitionKind::Fade => (Pose::HIDDEN, Pose::HIDDEN),
            TransitionKind::SlideLeft => (
                Pose {
                    x_percent: 100.0,
                    ..Pose::HIDDEN
                },
                Pose {
                    x_percent: -100.0,
                    ..Pose::HIDDEN
                },
            ),
            TransitionKind::SlideRight => (
                Pose {
                    x_percent: -100.0,
                    ..Pose::HIDDEN
                },
                Pose {
                    x_percent: 100.0,
                    ..Pose::HIDDEN
                },
            ),
            TransitionKind::SlideUp => (
                Pose {
                    y_percent: 100.0,
                    ..Pose::HIDDEN
                },
                Pose {
                    y_percent: -100.0,
                    ..Pose::HIDDEN
                },
            ),
            TransitionKind::SlideDown => (
                Pose {
                    y_percent: -100.0,
                    ..Pose::HIDDEN
                },
                Pose {
                    y_percent: 100.0,
                    ..Pose::HIDDEN
                },
            ),
            TransitionKind::Scale => (
                Pose {
                    scale: 0.8,
                    ..Pose::HIDDEN
                },
                Pose {
                    scale: 1.2,
                    ..Pose::HIDDEN
                },
            ),
            TransitionKind::Rotate => (
                Pose {
                    rotate_deg: -180.0,
                    scale: 0.5,
                    ..Pose::HIDDEN
                },
                Pose {
                    rotate_deg: 180.0,
                    scale: 0.5,
                    ..Pose::HIDDEN
                },
            ),
            TransitionKind::Flip => (
                Pose {
                    rotate_y_deg: 90.0,
                    ..Pose::HIDDEN
                },
                Pose {
                    rotate_y_deg: -90.0,
                    ..Pose::HIDDEN
                },
            ),
        };

        Self {
            initial,
            animate: Pose::REST,
            exit,
        }
    }
}
