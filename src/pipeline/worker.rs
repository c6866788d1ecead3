/// 分类工作线程 (Classifier worker)
/// 职责: 接收LandmarkFrame → 特征提取 → 分类 → 发送ClassifiedFrame

use std::thread::{self, JoinHandle};
use std::time::Instant;

use crossbeam_channel::{Receiver, Sender};

use crate::classifier::SquatClassifier;
use crate::features::extract_features;

use super::{ClassifiedFrame, FrameOutcome, LandmarkFrame};

/// 启动分类线程
///
/// 引擎在线程内部构造: 构造完成前不消费任何帧,早到的帧只会在
/// 通道中等待或被发送端丢弃,不可能命中半初始化的引擎。
/// 构造失败时线程直接退出(接收端随之关闭),错误已在日志中。
/// 输入通道关闭后线程收尾: close引擎,退出。
pub fn spawn<F>(
    rx: Receiver<LandmarkFrame>,
    tx: Sender<ClassifiedFrame>,
    init: F,
) -> JoinHandle<()>
where
    F: FnOnce() -> anyhow::Result<SquatClassifier> + Send + 'static,
{
    thread::spawn(move || {
        let classifier = match init() {
            Ok(classifier) => {
                log::info!("classifier worker ready");
                classifier
            }
            Err(e) => {
                log::error!("classifier construction failed: {e:#}");
                return;
            }
        };

        while let Ok(frame) = rx.recv() {
            let start = Instant::now();

            let outcome = match frame.landmarks {
                None => FrameOutcome::NoPose,
                Some(ref landmarks) => match extract_features(landmarks) {
                    Ok(features) => FrameOutcome::Classified(classifier.classify(&features)),
                    Err(e) => {
                        log::debug!("frame {}: {}", frame.frame_id, e);
                        FrameOutcome::NoFeatures
                    }
                },
            };

            let classified = ClassifiedFrame {
                frame_id: frame.frame_id,
                outcome,
                latency_ms: start.elapsed().as_secs_f64() * 1000.0,
            };

            // 下游关闭即收工
            if tx.send(classified).is_err() {
                break;
            }
        }

        classifier.close();
        log::info!("classifier worker stopped");
    })
}
