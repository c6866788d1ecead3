/// 特征提取
/// Feature extraction
///
/// 关键点序列 → 20维特征向量:
/// 8关节原始坐标16个标量(固定顺序: 右肩/左肩/右髋/左髋/右膝/左膝/右踝/左踝,各x,y)
/// + 4个屈曲角(右膝/左膝/右髋/左髋,度)。
/// 任一关节缺失或坐标非法时整体失败,不产出部分向量。

use std::fmt;

use crate::landmarks::{Point2, PoseLandmark, PoseLandmarks};
use crate::utils::flexion_angle;
use crate::FEATURE_COUNT;

/// 特征提取失败
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionError {
    /// 序列里缺少该关节的条目
    MissingLandmark(PoseLandmark),
    /// 坐标值非法 (NaN/无穷)
    MalformedLandmark(PoseLandmark),
}

impl fmt::Display for ExtractionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionError::MissingLandmark(joint) => {
                write!(f, "missing landmark {:?} (index {})", joint, joint.index())
            }
            ExtractionError::MalformedLandmark(joint) => {
                write!(
                    f,
                    "malformed landmark {:?} (index {}): non-finite coordinate",
                    joint,
                    joint.index()
                )
            }
        }
    }
}

impl std::error::Error for ExtractionError {}

/// 提取20维特征向量
pub fn extract_features(
    landmarks: &PoseLandmarks,
) -> Result<[f32; FEATURE_COUNT], ExtractionError> {
    let rshoulder = required(landmarks, PoseLandmark::RightShoulder)?;
    let lshoulder = required(landmarks, PoseLandmark::LeftShoulder)?;
    let rhip = required(landmarks, PoseLandmark::RightHip)?;
    let lhip = required(landmarks, PoseLandmark::LeftHip)?;
    let rknee = required(landmarks, PoseLandmark::RightKnee)?;
    let lknee = required(landmarks, PoseLandmark::LeftKnee)?;
    let rankle = required(landmarks, PoseLandmark::RightAnkle)?;
    let lankle = required(landmarks, PoseLandmark::LeftAnkle)?;

    // 屈曲角: 完全伸直读0°
    let rknee_angle = flexion_angle(rhip, rknee, rankle);
    let lknee_angle = flexion_angle(lhip, lknee, lankle);
    let rhip_angle = flexion_angle(rshoulder, rhip, rknee);
    let lhip_angle = flexion_angle(lshoulder, lhip, lknee);

    Ok([
        rshoulder.x,
        rshoulder.y,
        lshoulder.x,
        lshoulder.y,
        rhip.x,
        rhip.y,
        lhip.x,
        lhip.y,
        rknee.x,
        rknee.y,
        lknee.x,
        lknee.y,
        rankle.x,
        rankle.y,
        lankle.x,
        lankle.y,
        rknee_angle,
        lknee_angle,
        rhip_angle,
        lhip_angle,
    ])
}

fn required(landmarks: &PoseLandmarks, joint: PoseLandmark) -> Result<Point2, ExtractionError> {
    let point = landmarks
        .get(joint)
        .ok_or(ExtractionError::MissingLandmark(joint))?;
    if !point.x.is_finite() || !point.y.is_finite() {
        return Err(ExtractionError::MalformedLandmark(joint));
    }
    Ok(point)
}
