/// Format seconds as `minutes:seconds`, seconds zero-padded. Minutes are not
/// wrapped into hours.
pub fn format_time(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
