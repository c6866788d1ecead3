/// 资源解析
/// Asset resolution
///
/// 分类引擎通过逻辑名消费模型与参数工件,
/// 具体存放位置由AssetSource实现决定。

use std::io;
use std::path::PathBuf;

/// 模型工件逻辑名
pub const MODEL_ASSET: &str = "squat_model.onnx";

/// 标准化参数工件逻辑名
pub const SCALER_ASSET: &str = "scaler_params.json";

/// 按逻辑名解析工件字节
pub trait AssetSource {
    fn read(&self, name: &str) -> io::Result<Vec<u8>>;
}

/// 目录型资源: 逻辑名即目录内文件名
#[derive(Debug, Clone)]
pub struct DirAssets {
    root: PathBuf,
}

impl DirAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl AssetSource for DirAssets {
    fn read(&self, name: &str) -> io::Result<Vec<u8>> {
        std::fs::read(self.root.join(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_existing_asset() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("scaler_params.json"), b"{}").unwrap();

        let assets = DirAssets::new(dir.path());
        assert_eq!(assets.read(SCALER_ASSET).unwrap(), b"{}");
    }

    #[test]
    fn test_missing_asset_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let assets = DirAssets::new(dir.path());
        let err = assets.read(MODEL_ASSET).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
