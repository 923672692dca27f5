//! 信号定义
//! 六个相互独立的 Typecho 证据维度，以枚举为键的集合形式在提取器与聚合器之间传递

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Signal {
    MetaTag,
    Path,
    Structure,
    Cookie,
    Api,
    Rss,
}

impl Signal {
    /// 全部信号，顺序即结果展示顺序
    pub const ALL: [Signal; 6] = [
        Signal::MetaTag,
        Signal::Path,
        Signal::Structure,
        Signal::Cookie,
        Signal::Api,
        Signal::Rss,
    ];

    /// 参与加权求和的五个次级信号（meta 单独作为确证）
    pub const WEIGHTED: [Signal; 5] = [
        Signal::Path,
        Signal::Structure,
        Signal::Cookie,
        Signal::Api,
        Signal::Rss,
    ];

    #[inline(always)]
    const fn bit(self) -> u8 {
        1 << (self as u8)
    }

    /// 展示用标签
    pub fn label(self) -> &'static str {
        match self {
            Signal::MetaTag => "Meta tag",
            Signal::Path => "Resource path",
            Signal::Structure => "HTML structure",
            Signal::Cookie => "Cookie",
            Signal::Api => "API endpoint",
            Signal::Rss => "RSS link",
        }
    }
}

impl Display for Signal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// 以 Signal 为键的布尔映射（位集实现，Copy 语义）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SignalSet(u8);

impl SignalSet {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline(always)]
    pub fn get(&self, signal: Signal) -> bool {
        self.0 & signal.bit() != 0
    }

    #[inline(always)]
    pub fn set(&mut self, signal: Signal, value: bool) {
        if value {
            self.0 |= signal.bit();
        } else {
            self.0 &= !signal.bit();
        }
    }

    /// 链式构造
    pub fn with(mut self, signal: Signal, value: bool) -> Self {
        self.set(signal, value);
        self
    }

    /// 任一信号为真
    pub fn any(&self) -> bool {
        self.0 != 0
    }

    /// 给定信号中为真的数量
    pub fn count_of(&self, signals: &[Signal]) -> usize {
        signals.iter().filter(|s| self.get(**s)).count()
    }

    /// 为真的信号（按 Signal::ALL 顺序）
    pub fn iter_matched(&self) -> impl Iterator<Item = Signal> + '_ {
        Signal::ALL.into_iter().filter(move |s| self.get(*s))
    }
}

impl FromIterator<Signal> for SignalSet {
    fn from_iter<I: IntoIterator<Item = Signal>>(iter: I) -> Self {
        let mut set = SignalSet::new();
        for signal in iter {
            set.set(signal, true);
        }
        set
    }
}
