use crate::wipe_engine::WipeProgress;
use std::io::{self, Write};
use std::time::Instant;

/// Minimum progress between redraws
const REDRAW_INTERVAL_BYTES: u64 = 1024 * 1024;

/// Single-line terminal progress bar for wipe passes
pub struct ProgressBar<W: Write = io::Stdout> {
    out: W,
    width: usize,
    start: Instant,
    last_drawn: Option<(u32, u64)>,
}

impl ProgressBar<io::Stdout> {
    /// width = number of bar character slots (not including the brackets)
    pub fn new(width: usize) -> Self {
        Self::with_writer(io::stdout(), width)
    }
}

impl<W: Write> ProgressBar<W> {
    pub fn with_writer(out: W, width: usize) -> Self {
        Self {
            out,
            width,
            start: Instant::now(),
            last_drawn: None,
        }
    }

    /// Redraw if the pass advanced far enough since the last draw, or ended
    pub fn update(&mut self, progress: &WipeProgress) {
        let pass_done = progress.pass_bytes_written >= progress.size_bytes;
        let due = match self.last_drawn {
            Some((cycle, drawn)) if cycle == progress.cycle => {
                progress.pass_bytes_written.saturating_sub(drawn) >= REDRAW_INTERVAL_BYTES
            }
            _ => true,
        };

        if due || pass_done {
            self.render(progress);
            self.last_drawn = Some((progress.cycle, progress.pass_bytes_written));
            if pass_done {
                // keep each finished pass on its own line
                writeln!(self.out).ok();
            }
        }
    }

    fn render(&mut self, progress: &WipeProgress) {
        let line = self.format_line(progress);
        write!(self.out, "\r\x1b[2K{}", line).ok();
        self.out.flush().ok();
    }

    pub(crate) fn format_line(&self, progress: &WipeProgress) -> String {
        let pct = progress.pass_percent().clamp(0.0, 100.0);
        let filled = ((pct / 100.0) * self.width as f64).round() as usize;
        let empty = self.width.saturating_sub(filled);

        let elapsed = self.start.elapsed().as_secs_f64().max(0.0001);
        let speed = progress.total_bytes_written as f64 / elapsed;
        let remaining_total = (progress.size_bytes * progress.cycles as u64)
            .saturating_sub(progress.total_bytes_written);
        let eta_secs = if speed > 0.0 {
            (remaining_total as f64 / speed).round() as u64
        } else {
            0
        };

        format!(
            "Pass {}/{} [{}{}] {:5.1}%  {} @ {}/s  ETA {}",
            progress.cycle,
            progress.cycles,
            "█".repeat(filled),
            "░".repeat(empty),
            pct,
            human_bytes(progress.pass_bytes_written as f64),
            human_bytes(speed),
            format_duration(eta_secs)
        )
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Convert a byte count (or bytes/sec) to a readable string
pub(crate) fn human_bytes(bytes: f64) -> String {
    let units = ["B", "KB", "MB", "GB", "TB"];
    if bytes <= 0.0 {
        return "0B".to_string();
    }
    let mut val = bytes;
    let mut i = 0usize;
    while val >= 1024.0 && i + 1 < units.len() {
        val /= 1024.0;
        i += 1;
    }
    format!("{:.2}{}", val, units[i])
}

/// Format seconds to H:MM:SS or M:SS
pub(crate) fn format_duration(secs: u64) -> String {
    let h = secs / 3600;
    let m = (secs % 3600) / 60;
    let s = secs % 60;
    if h > 0 {
        format!("{}:{:02}:{:02}", h, m, s)
    } else {
        format!("{}:{:02}", m, s)
    }
}
