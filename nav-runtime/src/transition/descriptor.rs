//! # Transition Descriptor
//!
//! 一次导航最终交给渲染层的过渡描述：效果类型 + 进入/退出阶段参数。

use serde::{Deserialize, Serialize};

use super::motion::Motion;
use super::registry::TransitionKind;
use crate::easing::EasingFunction;

/// 单个阶段的时间参数
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseTiming {
    /// 持续时间（秒）
    pub duration_secs: f32,
    /// 缓动函数
    pub easing: EasingFunction,
}

impl PhaseTiming {
    pub fn new(duration_secs: f32, easing: EasingFunction) -> Self {
        Self {
            duration_secs,
            easing,
        }
    }

    /// 给定已经过的时间，返回缓动后的进度 (0.0 - 1.0)
    pub fn progress_at(&self, elapsed_secs: f32) -> f32 {
        if self.duration_secs <= 0.0 {
            return 1.0;
        }
        self.easing.apply(elapsed_secs / self.duration_secs)
    }

    /// 该阶段是否已完成
    pub fn is_finished(&self, elapsed_secs: f32) -> bool {
        elapsed_secs >= self.duration_secs
    }
}

/// 过渡描述
///
/// 不可变值，每次导航产生一个。
///
/// - `enter`：作用于新进入的内容
/// - `exit`：作用于离开的内容
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitionDescriptor {
    /// 效果类型
    pub kind: TransitionKind,
    /// 进入阶段
    pub enter: PhaseTiming,
    /// 退出阶段
    pub exit: PhaseTiming,
    /// 关键帧
    pub motion: Motion,
}

impl TransitionDescriptor {
    /// 使用默认时长创建
    ///
    /// 进入阶段缓出，退出阶段缓入。
    pub fn for_kind(kind: TransitionKind) -> Self {
        Self {
            kind,
            enter: PhaseTiming::new(kind.enter_duration(), EasingFunction::EaseOut),
            exit: PhaseTiming::new(kind.exit_duration(), EasingFunction::EaseIn),
            motion: Motion::for_kind(kind),
        }
    }

    /// 进入与退出重叠时的总时长
    pub fn total_duration(&self) -> f32 {
        self.enter.duration_secs.max(self.exit.duration_secs)
    }
}

impl Default for TransitionDescriptor {
    fn default() -> Self {
        Self::for_kind(TransitionKind::Fade)
    }
}
