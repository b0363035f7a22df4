//! # Transition 模块（过渡效果定义）
//!
//! 过渡效果类型、默认时长、关键帧与最终描述都收敛在这里。
//!
//! ## 核心组件
//!
//! - [`TransitionKind`]：效果类型枚举
//! - [`TransitionDescriptor`]：效果 + 进入/退出阶段参数
//! - [`Motion`]：渲染层使用的关键帧
//!
//! ## 使用流程
//!
//! ```text
//! Route + NavDirection
//!   → TransitionResolver::determine_transition() → TransitionKind
//!   → TransitionDescriptor::for_kind()
//!   → 渲染层按 enter/exit 参数执行动画
//! ```

mod descriptor;
mod motion;
mod registry;

pub use descriptor::{PhaseTiming, TransitionDescriptor};
pub use motion::{Motion, Pose};
pub use registry::{TransitionKind, defaults};
