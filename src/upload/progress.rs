use std::sync::Arc;

pub type ProgressFn = Arc<dyn Fn(u8) + Send + Sync>;

/// Rounded percentage of `sent` over `total`, or `None` when `total` is zero.
pub fn percent(sent: u64, total: u64) -> Option<u8> {
    if total == 0 {
        return None;
    }
    let sent = u128::from(sent.min(total));
    let total = u128::from(total);
    Some(((sent * 100 + total / 2) / total) as u8)
}

#[derive(Debug, Clone)]
pub struct UploadProgress {
    total: u64,
    sent: u64,
    last: u8,
}

impl UploadProgress {
    pub fn new(total: u64) -> Self {
        Self {
            total,
            sent: 0,
            last: 0,
        }
    }

    pub fn advance(&mut self, n: u64) -> Option<u8> {
        self.sent = self.sent.saturating_add(n);
        let value = percent(self.sent, self.total)?.max(self.last);
        self.last = value;
        Some(value)
    }
}
