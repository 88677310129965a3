use crate::model::Metric;

#[allow(dead_code)]
pub(crate) fn assert_send_sync(_: &(impl Send + Sync)) {}

/// Renders a duration given in milliseconds, omitting leading zero units.
pub fn render_time(time_ms: i64) -> String {
    let sign = if time_ms < 0 { "-" } else { "" };
    let time_ms = time_ms.unsigned_abs();

    let ms = time_ms % 1000;
    let s = (time_ms / 1000) % 60;
    let m = (time_ms / (1000 * 60)) % 60;
    let h = time_ms / (1000 * 60 * 60);

    if h > 0 {
        format!("{sign}{h}:{m:0>2}:{s:0>2}.{ms:0>3}")
    } else if m > 0 {
        format!("{sign}{m}:{s:0>2}.{ms:0>3}")
    } else {
        format!("{sign}{s}.{ms:0>3}")
    }
}

/// Renders a metric value for display.
pub fn render_value(metric: Metric, value: Option<i64>) -> String {
    match (metric, value) {
        (_, None) => "-".to_string(),
        (Metric::Score, Some(score)) => score.to_string(),
        (Metric::Time, Some(time_ms)) => render_time(time_ms),
    }
}
