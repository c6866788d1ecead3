pub mod assets; // 资源解析 (模型/参数工件)
pub mod classifier; // 分类引擎
pub mod config; // 命令行参数
pub mod features; // 特征提取
pub mod landmarks; // 姿态关键点数据模型
pub mod ort_backend;
pub mod pipeline; // 帧处理流水线
pub mod scaler; // 特征标准化
pub mod utils; // 几何工具

pub use crate::assets::{AssetSource, DirAssets};
pub use crate::classifier::{EngineConfig, InferenceBackend, SquatClassifier};
pub use crate::config::Args;
pub use crate::features::{extract_features, ExtractionError};
pub use crate::landmarks::{Point2, PoseLandmark, PoseLandmarks};
pub use crate::ort_backend::{OrtBackend, OrtConfig, OrtEP};
pub use crate::scaler::ScalerParams;

/// 特征向量维度: 8关节 × (x,y) + 4个屈曲角
pub const FEATURE_COUNT: usize = 20;

/// 模型输出类别数
pub const NUM_CLASSES: usize = 3;

/// 类别标签表 (顺序与模型输出位置对齐,进程级只读)
pub const CLASS_NAMES: [&str; NUM_CLASSES] = ["Neutral", "Correct Pose", "Incorrect Pose"];

/// 单帧分类结果 (Classification result of one frame)
///
/// `class_index == -1` 是唯一的失败标志,调用方应检查索引而非标签字符串。
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationResult {
    pub label: &'static str,
    pub confidence: f32,
    pub class_index: i32,
}

impl ClassificationResult {
    pub fn new(label: &'static str, confidence: f32, class_index: i32) -> Self {
        Self {
            label,
            confidence,
            class_index,
        }
    }

    /// 失败哨兵: ("Error", 0.0, -1)
    pub fn error() -> Self {
        Self {
            label: "Error",
            confidence: 0.0,
            class_index: -1,
        }
    }

    pub fn is_error(&self) -> bool {
        self.class_index == -1
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn confidence(&self) -> f32 {
        self.confidence
    }

    pub fn class_index(&self) -> i32 {
        self.class_index
    }
}
