use chrono::Duration;

/// 在已排序的时间序列中查找边界索引
///
/// Returns the index of the first element equal to `target`, or the insertion
/// point that keeps `sorted` ordered when there is no exact match. The result
/// is always within `[0, sorted.len()]`; a missing match is an approximation,
/// never an error. Runs of equal times resolve to their first index, so a
/// half-open `[lower, upper)` index range keeps every sample at `lower` and
/// none at `upper`.
pub fn insertion_index(sorted: &[f64], target: f64) -> usize {
    sorted.partition_point(|time| *time < target)
}

/// 将秒转换为 chrono 时长（纳秒精度）
pub fn seconds_to_duration(seconds: f64) -> Duration {
    Duration::nanoseconds((seconds * 1_000_000_000.0).round() as i64)
}
