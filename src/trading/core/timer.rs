use std::time::Instant;

/// 交易时间测量器
pub struct TradeTimer {
    start_time: Instant,
    stage: String,
}

impl TradeTimer {
    /// 创建新的计时器
    pub fn new(stage: impl Into<String>) -> Self {
        Self { start_time: Instant::now(), stage: stage.into() }
    }

    /// 记录当前阶段耗时并开始新阶段
    pub fn stage(&mut self, new_stage: impl Into<String>) {
        log::debug!("{} took {:?}", self.stage, self.start_time.elapsed());
        self.start_time = Instant::now();
        self.stage = new_stage.into();
    }

    /// 完成计时并输出最终耗时
    pub fn finish(mut self) {
        log::debug!("{} took {:?}", self.stage, self.start_time.elapsed());
        self.stage.clear();
    }
}

impl Drop for TradeTimer {
    fn drop(&mut self) {
        // stage left unfinished by an early return
        if !self.stage.is_empty() {
            log::debug!("{} aborted after {:?}", self.stage, self.start_time.elapsed());
        }
    }
}
