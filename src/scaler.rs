/// 特征标准化
/// Feature standardization
///
/// 训练期拟合的逐特征标准化参数 (均值/尺度),推理期重放:
/// output[i] = (features[i] - mean[i]) / scale[i]
/// 参数工件与模型工件同源,加载后不再变化。

use anyhow::{anyhow, bail, Context, Result};
use serde::Deserialize;

use crate::FEATURE_COUNT;

/// 工件原始形态: {"mean": [...], "scale": [...]}
#[derive(Debug, Deserialize)]
struct RawScalerDoc {
    mean: Vec<f32>,
    scale: Vec<f32>,
}

/// 标准化参数 (已校验)
#[derive(Debug, Clone, PartialEq)]
pub struct ScalerParams {
    mean: [f32; FEATURE_COUNT],
    scale: [f32; FEATURE_COUNT],
}

impl ScalerParams {
    /// 构造并校验: 尺度为零或任一值非有限 → 加载期失败,绝不延迟到推理期
    pub fn new(mean: [f32; FEATURE_COUNT], scale: [f32; FEATURE_COUNT]) -> Result<Self> {
        for (i, &m) in mean.iter().enumerate() {
            if !m.is_finite() {
                bail!("scaler mean[{}] is not finite: {}", i, m);
            }
        }
        for (i, &s) in scale.iter().enumerate() {
            if !s.is_finite() {
                bail!("scaler scale[{}] is not finite: {}", i, s);
            }
            if s == 0.0 {
                bail!("scaler scale[{}] is zero", i);
            }
        }
        Ok(Self { mean, scale })
    }

    /// 恒等变换 (mean=0, scale=1)
    pub fn identity() -> Self {
        Self {
            mean: [0.0; FEATURE_COUNT],
            scale: [1.0; FEATURE_COUNT],
        }
    }

    /// 从JSON工件解析; mean/scale键缺失、长度不为20、尺度为零均为致命错误
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        let doc: RawScalerDoc =
            serde_json::from_slice(bytes).context("invalid scaler artifact")?;

        let mean_len = doc.mean.len();
        let mean: [f32; FEATURE_COUNT] = doc
            .mean
            .try_into()
            .map_err(|_| anyhow!("scaler mean has {} entries, expected {}", mean_len, FEATURE_COUNT))?;

        let scale_len = doc.scale.len();
        let scale: [f32; FEATURE_COUNT] = doc
            .scale
            .try_into()
            .map_err(|_| {
                anyhow!("scaler scale has {} entries, expected {}", scale_len, FEATURE_COUNT)
            })?;

        Self::new(mean, scale)
    }

    /// 逐特征标准化; 定长数组使长度前置条件成为编译期事实
    pub fn apply(&self, features: &[f32; FEATURE_COUNT]) -> [f32; FEATURE_COUNT] {
        let mut scaled = [0.0f32; FEATURE_COUNT];
        for i in 0..FEATURE_COUNT {
            scaled[i] = (features[i] - self.mean[i]) / self.scale[i];
        }
        scaled
    }

    pub fn mean(&self) -> &[f32; FEATURE_COUNT] {
        &self.mean
    }

    pub fn scale(&self) -> &[f32; FEATURE_COUNT] {
        &self.scale
    }
}
