use std::time::{Duration, Instant};

use tracing::info;

#[derive(Debug, Clone)]
pub struct StepTiming {
    pub name: &'static str,
    pub duration: Duration,
}

/// Wall-clock durations of the steps of one fusion, in execution order.
#[derive(Debug, Default)]
pub struct FusionTimings {
    steps: Vec<StepTiming>,
}

impl FusionTimings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `step`, recording how long it took under `name`.
    pub fn measure<T>(&mut self, name: &'static str, step: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let value = step();
        self.steps.push(StepTiming {
            name,
            duration: start.elapsed(),
        });
        value
    }

    pub fn total_duration(&self) -> Duration {
        self.steps.iter().map(|s| s.duration).sum()
    }

    /// Summed duration of the steps recorded under `name`.
    pub fn get_step(&self, name: &str) -> Option<Duration> {
        let mut matching = self.steps.iter().filter(|s| s.name == name).peekable();
        matching.peek()?;
        Some(matching.map(|s| s.duration).sum())
    }

    pub fn steps(&self) -> &[StepTiming] {
        &self.steps
    }

    pub fn log_summary(&self) {
        let total_ms = self.total_duration().as_secs_f64() * 1000.0;
        for step in &self.steps {
            let ms = step.duration.as_secs_f64() * 1000.0;
            let share = if total_ms > 0.0 { ms / total_ms * 100.0 } else { 0.0 };
            info!(step = step.name, "{:.3}ms ({:.1}%)", ms, share);
        }
        info!(step = "total", "{:.3}ms", total_ms);
    }
}
