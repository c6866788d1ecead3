/// ONNX Runtime 推理后端
/// ONNX Runtime inference backend
///
/// 执行提供者在构造时选定一次,推理路径不再分支。
/// CUDA/TensorRT为可选加速(需对应cargo特性),注册失败时回退多线程CPU,
/// 两条路径同模型同算术语义,输出仅有浮点执行差异。

use anyhow::{anyhow, bail, Result};
use ndarray::Array2;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;

use crate::classifier::InferenceBackend;
use crate::{FEATURE_COUNT, NUM_CLASSES};

/// 执行提供者 (Execution Provider)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrtEP {
    CPU,
    CUDA(i32),
    Trt(i32),
}

/// 后端构建配置
#[derive(Debug, Clone)]
pub struct OrtConfig {
    pub ep: OrtEP,
    /// CPU算子内并行线程数
    pub intra_threads: usize,
}

impl Default for OrtConfig {
    fn default() -> Self {
        Self {
            ep: OrtEP::CPU,
            intra_threads: 4,
        }
    }
}

/// 已加载的推理会话
pub struct OrtBackend {
    session: Session,
    output_name: String,
    ep: OrtEP,
}

impl OrtBackend {
    /// 从模型字节构建会话
    pub fn build(model_bytes: &[u8], config: &OrtConfig) -> Result<Self> {
        let builder = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(config.intra_threads)?;

        let (builder, ep) = match config.ep {
            OrtEP::CPU => (builder, OrtEP::CPU),
            #[cfg(feature = "cuda")]
            OrtEP::CUDA(device_id) => {
                use ort::execution_providers::CUDAExecutionProvider;
                log::info!("CUDA execution provider requested (device {})", device_id);
                let builder = builder.with_execution_providers([CUDAExecutionProvider::default()
                    .with_device_id(device_id)
                    .build()])?;
                (builder, config.ep)
            }
            #[cfg(feature = "tensorrt")]
            OrtEP::Trt(device_id) => {
                use ort::execution_providers::TensorRTExecutionProvider;
                log::info!("TensorRT execution provider requested (device {})", device_id);
                let builder = builder.with_execution_providers(
                    [TensorRTExecutionProvider::default()
                        .with_device_id(device_id)
                        .build()],
                )?;
                (builder, config.ep)
            }
            #[cfg(not(feature = "cuda"))]
            OrtEP::CUDA(_) => {
                log::warn!("built without `cuda` feature, falling back to CPU");
                (builder, OrtEP::CPU)
            }
            #[cfg(not(feature = "tensorrt"))]
            OrtEP::Trt(_) => {
                log::warn!("built without `tensorrt` feature, falling back to CPU");
                (builder, OrtEP::CPU)
            }
        };

        let session = builder.commit_from_memory(model_bytes)?;

        let output_name = session
            .outputs
            .first()
            .map(|output| output.name.clone())
            .ok_or_else(|| anyhow!("model defines no output tensor"))?;

        log::info!(
            "ONNX session ready (ep={:?}, threads={}, output='{}')",
            ep,
            config.intra_threads,
            output_name
        );

        Ok(Self {
            session,
            output_name,
            ep,
        })
    }

    pub fn ep(&self) -> OrtEP {
        self.ep
    }
}

impl InferenceBackend for OrtBackend {
    fn infer(&mut self, features: &[f32; FEATURE_COUNT]) -> Result<[f32; NUM_CLASSES]> {
        let input = Array2::<f32>::from_shape_vec((1, FEATURE_COUNT), features.to_vec())?;
        let tensor = Value::from_array(input)?;

        let outputs = self.session.run(ort::inputs![tensor])?;
        let output = outputs
            .get(&self.output_name)
            .ok_or_else(|| anyhow!("output tensor '{}' missing from run", self.output_name))?;

        let (_, data) = output.try_extract_tensor::<f32>()?;
        if data.len() < NUM_CLASSES {
            bail!("expected {} class scores, got {}", NUM_CLASSES, data.len());
        }

        let mut scores = [0.0f32; NUM_CLASSES];
        scores.copy_from_slice(&data[..NUM_CLASSES]);
        Ok(scores)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = OrtConfig::default();
        assert_eq!(config.ep, OrtEP::CPU);
        assert_eq!(config.intra_threads, 4);
    }

    #[test]
    fn test_garbage_model_rejected() {
        let err = OrtBackend::build(b"not an onnx graph", &OrtConfig::default());
        assert!(err.is_err());
    }
}
