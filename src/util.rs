//! Small formatting helpers shared by handlers.

/// Average clicks per URL with one decimal place, "0.0" when there are no URLs.
///
/// # Examples
///
/// ```
/// use snaplink::util::format_click_rate;
///
/// assert_eq!(format_click_rate(5, 2), "2.5");
/// assert_eq!(format_click_rate(3, 0), "0.0");
/// ```
pub fn format_click_rate(total_clicks: u64, total_urls: u64) -> String {
    if total_urls == 0 {
        return "0.0".to_string();
    }

    format!("{:.1}", total_clicks as f64 / total_urls as f64)
}
