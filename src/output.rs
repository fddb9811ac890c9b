use indicatif::{ProgressBar, ProgressStyle};

use crate::cli::Cli;

/// Formats a position in seconds as `HH:MM:SS.mmm`.
pub fn fmt_time(seconds: f64) -> String {
    let hours = (seconds / 3600.0).floor();
    let minutes = ((seconds % 3600.0) / 60.0).floor();
    let secs = seconds % 60.0;
    format!("{:02.0}:{:02.0}:{:06.3}", hours, minutes, secs)
}

/// Progress reporting for the pipeline, one tick per stage.
#[derive(Debug)]
pub struct Output {
    pub progress_bar: Option<ProgressBar>,
}

impl Output {
    pub fn new(args: &Cli, stages: u64) -> Self {
        let progress_bar = if args.no_progress {
            None
        } else {
            Some(ProgressBar::new(stages))
        };

        if let Some(pb) = &progress_bar {
            pb.set_style(
                ProgressStyle::with_template(
                    "[{elapsed_precise}] [{wide_bar:.yellow/green}] {pos}/{len} {msg}",
                )
                .unwrap()
                .progress_chars("#>-"),
            );
        }

        Self { progress_bar }
    }

    pub fn stage(&self, message: &'static str) {
        if let Some(pb) = &self.progress_bar {
            pb.set_message(message);
            pb.inc(1);
        }
    }

    pub fn finish(&self) {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message("done");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fmt_time_zero() {
        assert_eq!(fmt_time(0.0), "00:00:00.000");
    }

    #[test]
    fn fmt_time_subsecond() {
        assert_eq!(fmt_time(0.25), "00:00:00.250");
    }

    #[test]
    fn fmt_time_minutes_and_hours() {
        assert_eq!(fmt_time(61.5), "00:01:01.500");
        assert_eq!(fmt_time(3600.0 + 2.0 * 60.0 + 3.125), "01:02:03.125");
    }
}
