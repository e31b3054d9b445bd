use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct RequestTimer {
    start: Instant,
    first_byte: Option<Duration>,
    total: Option<Duration>,
}

impl RequestTimer {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
            first_byte: None,
            total: None,
        }
    }

    pub fn record_first_byte(&mut self) {
        self.first_byte = Some(self.start.elapsed());
    }

    pub fn finish(&mut self) {
        self.total = Some(self.start.elapsed());
    }

    /// One-line timing summary for the debug log.
    pub fn summary(&self) -> String {
        match (self.first_byte, self.total) {
            (Some(first_byte), Some(total)) => format!(
                "ttfb {}, body {}, total {}",
                format_duration(first_byte),
                format_duration(total.saturating_sub(first_byte)),
                format_duration(total)
            ),
            (None, Some(total)) => format!("total {}", format_duration(total)),
            _ => "in progress".to_string(),
        }
    }
}

pub fn format_duration(duration: Duration) -> String {
    let total_ms = duration.as_secs_f64() * 1000.0;

    if total_ms < 1.0 {
        format!("{:.2} µs", total_ms * 1000.0)
    } else if total_ms < 1000.0 {
        format!("{:.2} ms", total_ms)
    } else {
        format!("{:.2} s", total_ms / 1000.0)
    }
}
