use std::sync::atomic::{
  AtomicU64,
  Ordering
};
use std::time::{
  Duration,
  Instant
};

/// Request counters for the lifetime of
/// the process, reported on `/health`.
#[derive(Debug)]
pub struct Analytics {
  started:   Instant,
  gets:      AtomicU64,
  invalid:   AtomicU64,
  malicious: AtomicU64,
  health:    AtomicU64
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub struct AnalyticsSnapshot {
  pub gets:      u64,
  pub invalid:   u64,
  pub malicious: u64,
  pub health:    u64
}

impl AnalyticsSnapshot {
  pub fn total(&self) -> u64 {
    self.gets
      + self.invalid
      + self.malicious
      + self.health
  }
}

impl Default for Analytics {
  fn default() -> Self {
    Self::new()
  }
}

impl Analytics {
  pub fn new() -> Self {
    Self {
      started:   Instant::now(),
      gets:      AtomicU64::new(0),
      invalid:   AtomicU64::new(0),
      malicious: AtomicU64::new(0),
      health:    AtomicU64::new(0)
    }
  }

  pub fn record_get(&self) {
    self.gets.fetch_add(1, Ordering::Relaxed);
  }

  pub fn record_invalid(&self) {
    self
      .invalid
      .fetch_add(1, Ordering::Relaxed);
  }

  pub fn record_malicious(&self) {
    self
      .malicious
      .fetch_add(1, Ordering::Relaxed);
  }

  pub fn record_health(&self) {
    self
      .health
      .fetch_add(1, Ordering::Relaxed);
  }

  pub fn snapshot(
    &self
  ) -> AnalyticsSnapshot {
    AnalyticsSnapshot {
      gets:      self
        .gets
        .load(Ordering::Relaxed),
      invalid:   self
        .invalid
        .load(Ordering::Relaxed),
      malicious: self
        .malicious
        .load(Ordering::Relaxed),
      health:    self
        .health
        .load(Ordering::Relaxed)
    }
  }

  pub fn uptime(&self) -> Duration {
    self.started.elapsed()
  }

  pub fn report(&self) -> String {
    render_report(
      self.uptime(),
      self.snapshot()
    )
  }
}

/// `Xd Xh Xm Xs`
pub fn format_uptime(
  uptime: Duration
) -> String {
  let mut secs = uptime.as_secs();
  let days = secs / 86_400;
  secs -= days * 86_400;
  let hours = secs / 3_600;
  secs -= hours * 3_600;
  let minutes = secs / 60;
  secs -= minutes * 60;
  format!(
    "{days}d {hours}h {minutes}m {secs}s"
  )
}

pub fn render_report(
  uptime: Duration,
  counts: AnalyticsSnapshot
) -> String {
  // data: icon keeps browsers from
  // following up with /favicon.ico
  format!(
    "<!doctype html><html><head>\
     <link rel=\"icon\" href=\"data:,\">\
     <title>Analytics</title></head>\
     <body><pre>\
     Uptime: {uptime}\n\n\
     Requests served: {total}\n\
     - {gets} valid (GET)\n\
     - {invalid} invalid\n\
     - {malicious} malicious\n\
     - {health} health checks\n\
     </pre></body></html>",
    uptime = format_uptime(uptime),
    total = counts.total(),
    gets = counts.gets,
    invalid = counts.invalid,
    malicious = counts.malicious,
    health = counts.health
  )
}

#[cfg(test)]
mod tests {
  use std::time::Duration;

  use super::{
    Analytics,
    format_uptime
  };

  #[test]
  fn uptime_breaks_into_units() {
    assert_eq!(
      format_uptime(Duration::from_secs(0)),
      "0d 0h 0m 0s"
    );
    assert_eq!(
      format_uptime(Duration::from_secs(
        2 * 86_400 + 3 * 3_600 + 4 * 60 + 5
      )),
      "2d 3h 4m 5s"
    );
  }

  #[test]
  fn report_lists_each_counter() {
    let analytics = Analytics::new();
    analytics.record_get();
    analytics.record_get();
    analytics.record_invalid();
    analytics.record_malicious();
    analytics.record_health();

    let snapshot = analytics.snapshot();
    assert_eq!(snapshot.total(), 5);

    let report = analytics.report();
    assert!(
      report.contains("Requests served: 5")
    );
    assert!(
      report.contains("- 2 valid (GET)")
    );
    assert!(report.contains("- 1 invalid"));
    assert!(
      report.contains("- 1 malicious")
    );
    assert!(
      report.contains("- 1 health checks")
    );
  }
}
