use std::io::Write;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;

pub const TICK: Duration = Duration::from_millis(200);
const LOADING_CAP: u8 = 95;

/// 模擬進度：越接近上限走得越慢，載入中最多到 95%
pub fn next_progress(current: u8) -> u8 {
    if current >= LOADING_CAP {
        return LOADING_CAP;
    }
    let step = match current {
        0..=29 => 8,
        30..=59 => 5,
        60..=79 => 3,
        _ => 1,
    };
    (current + step).min(LOADING_CAP)
}

/// 搜尋進行中在 stderr 顯示進度條
pub struct ProgressIndicator {
    handle: Option<JoinHandle<()>>,
    start_time: Instant,
    enabled: bool,
}

impl ProgressIndicator {
    pub fn start(location: &str, enabled: bool) -> Self {
        let handle = enabled.then(|| {
            let location = location.to_string();
            tokio::spawn(async move {
                let mut progress = 0u8;
                let mut interval = tokio::time::interval(TICK);
                loop {
                    interval.tick().await;
                    draw(&location, progress);
                    progress = next_progress(progress);
                }
            })
        });

        Self {
            handle,
            start_time: Instant::now(),
            enabled,
        }
    }

    pub fn finish(mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
        if self.enabled {
            eprintln!("\r⏳ LOADING 100% ({:.1?})            ", self.start_time.elapsed());
        }
        tracing::debug!("Search took {:?}", self.start_time.elapsed());
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Drop for ProgressIndicator {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

fn draw(location: &str, progress: u8) {
    const WIDTH: usize = 20;
    let filled = WIDTH * progress as usize / 100;
    let mut stderr = std::io::stderr();
    let _ = write!(
        stderr,
        "\r⏳ {} [{}{}] LOADING {}%",
        location,
        "█".repeat(filled),
        "░".repeat(WIDTH - filled),
        progress
    );
    let _ = stderr.flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_curve() {
        assert_eq!(next_progress(0), 8);
        assert_eq!(next_progress(29), 37);
        assert_eq!(next_progress(30), 35);
        assert_eq!(next_progress(60), 63);
        assert_eq!(next_progress(80), 81);
        assert_eq!(next_progress(94), 95);
        assert_eq!(next_progress(95), 95);
        assert_eq!(next_progress(100), 95);
    }

    #[test]
    fn test_progress_never_exceeds_cap() {
        let mut progress = 0;
        for _ in 0..200 {
            progress = next_progress(progress);
            assert!(progress <= 95);
        }
        assert_eq!(progress, 95);
    }

    #[tokio::test]
    async fn test_disabled_indicator_spawns_nothing() {
        let indicator = ProgressIndicator::start("Goa", false);
        assert!(!indicator.is_enabled());
        assert!(indicator.handle.is_none());
        indicator.finish();
    }
}
