//! 置信度聚合
//! 纯函数：六个信号 → [0, 100] 的整数置信度
//! 权重与下限均以百分点表示，整数运算与 round(score × 100) 等价且无浮点误差

use crate::rule::signal::{Signal, SignalSet};

/// meta generator 命中即确证
pub const META_CONFIDENCE: u8 = 100;

/// 加权求和权重（百分点），最大和为 100
pub const SIGNAL_WEIGHTS: [(Signal, u8); 5] = [
    (Signal::Path, 35),
    (Signal::Structure, 20),
    (Signal::Cookie, 10),
    (Signal::Api, 20),
    (Signal::Rss, 15),
];

/// 路径 + API + RSS 同时命中时直接返回的固定值
pub const TRIPLE_COMBO_CONFIDENCE: u8 = 90;

/// 组合下限规则，按顺序应用，只抬高不降低
const COMBO_FLOORS: [(&[Signal], u8); 3] = [
    (&[Signal::Path, Signal::Api], 85),
    (&[Signal::Path, Signal::Rss], 80),
    (&[Signal::Api, Signal::Rss], 75),
];

/// 至少三个次级信号命中时的下限
const MULTI_SIGNAL_MIN_COUNT: usize = 3;
const MULTI_SIGNAL_FLOOR: u8 = 70;

/// 按固定优先级计算置信度
/// 1. meta 命中 → 100
/// 2. 次级信号加权求和
/// 3. 组合规则：path∧api∧rss 直接返回 90；其余组合与多信号规则只抬高下限
/// 4. 截断到 [0, 100]
pub fn confidence(signals: SignalSet) -> u8 {
    if signals.get(Signal::MetaTag) {
        return META_CONFIDENCE;
    }

    let mut score: u32 = SIGNAL_WEIGHTS
        .iter()
        .filter(|(signal, _)| signals.get(*signal))
        .map(|(_, weight)| u32::from(*weight))
        .sum();

    let path = signals.get(Signal::Path);
    let api = signals.get(Signal::Api);
    let rss = signals.get(Signal::Rss);
    if path && api && rss {
        return TRIPLE_COMBO_CONFIDENCE;
    }

    for (combo, floor) in COMBO_FLOORS {
        if combo.iter().all(|s| signals.get(*s)) {
            score = score.max(u32::from(floor));
        }
    }

    if signals.count_of(&Signal::WEIGHTED) >= MULTI_SIGNAL_MIN_COUNT {
        score = score.max(u32::from(MULTI_SIGNAL_FLOOR));
    }

    score.min(100) as u8
}

/// 位置参数形式，便于与旧接口对照
pub fn confidence_of(meta: bool, path: bool, structure: bool, cookie: bool, api: bool, rss: bool) -> u8 {
    confidence(
        SignalSet::new()
            .with(Signal::MetaTag, meta)
            .with(Signal::Path, path)
            .with(Signal::Structure, structure)
            .with(Signal::Cookie, cookie)
            .with(Signal::Api, api)
            .with(Signal::Rss, rss),
    )
}
