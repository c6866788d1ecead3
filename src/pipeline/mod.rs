/// 帧处理流水线 (Frame processing pipeline)
///
/// 双线程架构,通过crossbeam通道通信:
/// - 上游: 姿态检测 (外部协作者,独立线程) → LandmarkFrame
/// - Worker: 特征提取 + 分类 (专用线程,同一时刻至多一帧在途) → ClassifiedFrame
pub mod worker;

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};

use crate::landmarks::PoseLandmarks;
use crate::ClassificationResult;

// ========== 消息类型定义 ==========

/// 关键点帧 (姿态检测 → 分类线程)
///
/// landmarks=None 表示上游明确报告"未检出姿态"。
#[derive(Debug, Clone)]
pub struct LandmarkFrame {
    pub frame_id: u64,
    pub landmarks: Option<PoseLandmarks>,
}

/// 帧级输出状态
///
/// "未检出姿态"与"分类失败"是不同状态,展示端分别处理。
#[derive(Debug, Clone, PartialEq)]
pub enum FrameOutcome {
    /// 上游未检出姿态,未进入提取/分类
    NoPose,
    /// 关键点缺失或非法,特征提取失败
    NoFeatures,
    /// 分类完成 (含哨兵失败结果)
    Classified(ClassificationResult),
}

/// 分类结果帧 (分类线程 → 展示端)
#[derive(Debug, Clone)]
pub struct ClassifiedFrame {
    pub frame_id: u64,
    pub outcome: FrameOutcome,
    pub latency_ms: f64,
}

// ========== 帧通道 ==========

/// 容量1的帧通道: 配合FrameSender::offer实现"仅保留最新"丢帧策略
pub fn frame_channel() -> (FrameSender, Receiver<LandmarkFrame>) {
    let (tx, rx) = bounded(1);
    (FrameSender { tx }, rx)
}

/// 帧发送端
#[derive(Debug, Clone)]
pub struct FrameSender {
    tx: Sender<LandmarkFrame>,
}

impl FrameSender {
    /// 非阻塞投递: worker忙时丢弃该帧,返回是否入队
    ///
    /// 实时相机路径用offer——慢帧只会让后续帧被丢,不会堆积。
    pub fn offer(&self, frame: LandmarkFrame) -> bool {
        match self.tx.try_send(frame) {
            Ok(()) => true,
            Err(TrySendError::Full(frame)) => {
                log::trace!("pipeline busy, dropping frame {}", frame.frame_id);
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }

    /// 阻塞投递: 离线回放路径用send,不丢帧; worker退出后返回false
    pub fn send(&self, frame: LandmarkFrame) -> bool {
        self.tx.send(frame).is_ok()
    }
}
