/// 深蹲分类引擎
/// Squat classifier engine
///
/// 持有已加载的推理后端与标准化参数,按帧执行前向。
/// 每帧失败(长度非法/句柄缺失/推理故障)一律折叠为哨兵结果,
/// 绝不跨classify边界抛出——调用方是活帧循环,必须持续运行。

use anyhow::{Context, Result};
use parking_lot::Mutex;

use crate::assets::{AssetSource, MODEL_ASSET, SCALER_ASSET};
use crate::ort_backend::{OrtBackend, OrtConfig};
use crate::scaler::ScalerParams;
use crate::{ClassificationResult, CLASS_NAMES, FEATURE_COUNT, NUM_CLASSES};

/// 推理后端接口 — 可互换的执行策略 (生产: ONNX Runtime; 测试: 桩)
///
/// 构造时选定一次,classify路径不再按后端分支。
pub trait InferenceBackend: Send {
    /// 对已标准化的特征向量执行前向,返回3类得分
    fn infer(&mut self, features: &[f32; FEATURE_COUNT]) -> Result<[f32; NUM_CLASSES]>;
}

/// 引擎构造配置
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub model_asset: String,
    pub scaler_asset: String,
    pub backend: OrtConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            model_asset: MODEL_ASSET.to_string(),
            scaler_asset: SCALER_ASSET.to_string(),
            backend: OrtConfig::default(),
        }
    }
}

/// 分类引擎
///
/// 后端句柄可空: close()原子地取出句柄后再释放,
/// 并发中的classify只会观察到"句柄缺失",不会触及已释放的会话。
pub struct SquatClassifier {
    backend: Mutex<Option<Box<dyn InferenceBackend>>>,
    scaler: ScalerParams,
}

impl SquatClassifier {
    /// 从资源解析器加载模型与标准化参数工件
    ///
    /// 任一工件缺失或格式非法 → 构造期致命错误 (引擎不可用,立即上抛)。
    pub fn new(assets: &dyn AssetSource, config: &EngineConfig) -> Result<Self> {
        let model_bytes = assets
            .read(&config.model_asset)
            .with_context(|| format!("failed to read model asset '{}'", config.model_asset))?;
        let scaler_bytes = assets
            .read(&config.scaler_asset)
            .with_context(|| format!("failed to read scaler asset '{}'", config.scaler_asset))?;

        let scaler = ScalerParams::from_json(&scaler_bytes)
            .with_context(|| format!("failed to parse scaler asset '{}'", config.scaler_asset))?;
        let backend = OrtBackend::build(&model_bytes, &config.backend)
            .with_context(|| format!("failed to load model asset '{}'", config.model_asset))?;

        log::info!(
            "squat classifier initialized (model={}, ep={:?})",
            config.model_asset,
            backend.ep()
        );
        Ok(Self::with_backend(Box::new(backend), scaler))
    }

    /// 直接注入后端 (测试桩/嵌入自定义执行策略)
    pub fn with_backend(backend: Box<dyn InferenceBackend>, scaler: ScalerParams) -> Self {
        Self {
            backend: Mutex::new(Some(backend)),
            scaler,
        }
    }

    /// 单帧分类; 失败折叠为哨兵 ("Error", 0.0, -1),从不panic/Err
    pub fn classify(&self, features: &[f32]) -> ClassificationResult {
        let Ok(features) = <&[f32; FEATURE_COUNT]>::try_from(features) else {
            log::error!("invalid feature vector length: {}", features.len());
            return ClassificationResult::error();
        };

        let mut guard = self.backend.lock();
        let Some(backend) = guard.as_mut() else {
            // 未初始化或已close
            return ClassificationResult::error();
        };

        let scaled = self.scaler.apply(features);
        match backend.infer(&scaled) {
            Ok(scores) => select_class(&scores),
            Err(e) => {
                log::error!("inference failed: {e:#}");
                ClassificationResult::error()
            }
        }
    }

    /// 释放模型句柄; 之后的classify走"句柄缺失"路径。幂等。
    pub fn close(&self) {
        let handle = self.backend.lock().take();
        if handle.is_some() {
            log::info!("squat classifier closed");
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.backend.lock().is_some()
    }

    pub fn scaler(&self) -> &ScalerParams {
        &self.scaler
    }
}

/// argmax → (标签, 得分, 索引); 并列取先出现的类
fn select_class(scores: &[f32; NUM_CLASSES]) -> ClassificationResult {
    let (class_index, &confidence) = scores
        .iter()
        .enumerate()
        .reduce(|max, x| if x.1 > max.1 { x } else { max })
        .unwrap();

    ClassificationResult {
        label: CLASS_NAMES[class_index],
        confidence,
        class_index: class_index as i32,
    }
}
