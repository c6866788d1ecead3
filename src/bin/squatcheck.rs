/// 深蹲姿态分类 - 离线回放工具
///
/// 读取录制的关键点会话(JSON),逐帧送入分类流水线,
/// 输出每帧结果与会话统计。
///
/// 系统架构:
/// 1. 主线程:   会话读取与逐帧投递 (回放场景阻塞发送,不丢帧)
/// 2. 分类线程: 特征提取 + 标准化 + 前向 (引擎在线程内构造)
/// 3. 主线程:   结果汇总与统计输出

use anyhow::{Context, Result};
use clap::Parser;

use squatcheck_rs::assets::DirAssets;
use squatcheck_rs::classifier::{EngineConfig, SquatClassifier};
use squatcheck_rs::config::Args;
use squatcheck_rs::landmarks::PoseLandmarks;
use squatcheck_rs::pipeline::{self, worker, FrameOutcome, LandmarkFrame};
use squatcheck_rs::{CLASS_NAMES, NUM_CLASSES};

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    println!("🏋️ 深蹲姿态分类回放");
    println!("📦 模型工件: {}/{}", args.assets, args.model);
    println!("📐 标准化参数: {}/{}", args.assets, args.scaler);
    println!("🎞  会话文件: {}", args.source);
    println!();

    // 录制会话: 每帧为 null (未检出姿态) 或 [[x, y], ...]
    let raw = std::fs::read_to_string(&args.source)
        .with_context(|| format!("failed to read session file {}", args.source))?;
    let frames: Vec<Option<Vec<[f32; 2]>>> =
        serde_json::from_str(&raw).context("invalid session file")?;
    let total = frames.len();

    // ========== 启动分类线程 ==========
    let (tx_frames, rx_frames) = pipeline::frame_channel();
    let (tx_results, rx_results) = crossbeam_channel::unbounded();

    let engine_config = EngineConfig {
        model_asset: args.model.clone(),
        scaler_asset: args.scaler.clone(),
        backend: args.backend_config(),
    };
    let assets_dir = args.assets.clone();
    let handle = worker::spawn(rx_frames, tx_results, move || {
        SquatClassifier::new(&DirAssets::new(assets_dir), &engine_config)
    });

    // ========== 逐帧投递 ==========
    for (frame_id, frame) in frames.into_iter().enumerate() {
        let landmarks = frame.map(|points| PoseLandmarks::from_xy(&points));
        let sent = tx_frames.send(LandmarkFrame {
            frame_id: frame_id as u64,
            landmarks,
        });
        if !sent {
            // 引擎构造失败时worker已退出
            break;
        }
    }
    drop(tx_frames);

    // ========== 结果汇总 ==========
    let mut class_counts = [0u64; NUM_CLASSES];
    let mut no_pose = 0u64;
    let mut failed = 0u64;

    while let Ok(frame) = rx_results.recv() {
        match &frame.outcome {
            FrameOutcome::NoPose => {
                no_pose += 1;
                println!("frame {:>5}: no pose detected", frame.frame_id);
            }
            FrameOutcome::NoFeatures => {
                failed += 1;
                println!("frame {:>5}: landmarks unusable", frame.frame_id);
            }
            FrameOutcome::Classified(result) if result.is_error() => {
                failed += 1;
                println!("frame {:>5}: classification error", frame.frame_id);
            }
            FrameOutcome::Classified(result) => {
                class_counts[result.class_index as usize] += 1;
                if args.profile {
                    println!(
                        "frame {:>5}: {} ({:.2}) [{:.2}ms]",
                        frame.frame_id, result.label, result.confidence, frame.latency_ms
                    );
                } else {
                    println!(
                        "frame {:>5}: {} ({:.2})",
                        frame.frame_id, result.label, result.confidence
                    );
                }
            }
        }
    }

    let _ = handle.join();

    // ========== 会话统计 ==========
    let classified: u64 = class_counts.iter().sum();
    if classified == 0 && total > 0 && no_pose == 0 && failed == 0 {
        anyhow::bail!("classifier failed to initialize, see log output");
    }

    println!();
    println!("📊 会话统计 ({} 帧):", total);
    for (i, name) in CLASS_NAMES.iter().enumerate() {
        let pct = if classified > 0 {
            class_counts[i] as f64 * 100.0 / classified as f64
        } else {
            0.0
        };
        println!("  {:>14}: {:>5} ({:.1}%)", name, class_counts[i], pct);
    }
    println!("  {:>14}: {:>5}", "no pose", no_pose);
    println!("  {:>14}: {:>5}", "failed", failed);

    Ok(())
}
