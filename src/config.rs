/// 命令行参数
/// CLI arguments for the replay binary

use clap::Parser;

use crate::assets::{MODEL_ASSET, SCALER_ASSET};
use crate::ort_backend::{OrtConfig, OrtEP};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "深蹲姿态分类 - 离线回放工具", long_about = None)]
pub struct Args {
    /// 录制的关键点会话文件 (JSON: 每帧为null或[[x,y],...])
    #[arg(short, long)]
    pub source: String,

    /// 资源目录 (包含模型与标准化参数工件)
    #[arg(short, long, default_value = "assets")]
    pub assets: String,

    /// 模型工件名
    #[arg(long, default_value = MODEL_ASSET)]
    pub model: String,

    /// 标准化参数工件名
    #[arg(long, default_value = SCALER_ASSET)]
    pub scaler: String,

    /// 使用CUDA执行提供者 (需启用cuda特性编译)
    #[arg(long)]
    pub cuda: bool,

    /// 使用TensorRT执行提供者 (需启用tensorrt特性编译)
    #[arg(long)]
    pub trt: bool,

    /// 加速设备ID
    #[arg(long, default_value_t = 0)]
    pub device_id: i32,

    /// CPU推理线程数
    #[arg(long, default_value_t = 4)]
    pub threads: usize,

    /// 打印每帧耗时
    #[arg(long)]
    pub profile: bool,
}

impl Args {
    /// 执行提供者选择 (TensorRT > CUDA > CPU)
    pub fn ep(&self) -> OrtEP {
        if self.trt {
            OrtEP::Trt(self.device_id)
        } else if self.cuda {
            OrtEP::CUDA(self.device_id)
        } else {
            OrtEP::CPU
        }
    }

    pub fn backend_config(&self) -> OrtConfig {
        OrtConfig {
            ep: self.ep(),
            intra_threads: self.threads,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ep_selection() {
        let mut args = Args::parse_from(["squatcheck", "--source", "session.json"]);
        assert_eq!(args.ep(), OrtEP::CPU);

        args.cuda = true;
        assert_eq!(args.ep(), OrtEP::CUDA(0));

        args.trt = true;
        assert_eq!(args.ep(), OrtEP::Trt(0));
    }

    #[test]
    fn test_default_asset_names() {
        let args = Args::parse_from(["squatcheck", "--source", "session.json"]);
        assert_eq!(args.model, MODEL_ASSET);
        assert_eq!(args.scaler, SCALER_ASSET);
        assert_eq!(args.threads, 4);
    }
}
