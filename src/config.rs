/// Fixed settings for one dashboard run.
///
/// There are no command-line flags or environment overrides; `main` builds the
/// default and hands it to the loader and the UI.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Kepler endpoint; returns a JSON array of planet rows.
    pub api_url: String,
    pub http_timeout_secs: u64,
    /// Rows per page on the Data tab.
    pub page_size: usize,
    /// Number of bins in the relative-distance histogram.
    pub histogram_bins: usize,
    /// Marker radius (points) of the largest planet in a sized scatter.
    pub max_marker_radius: f32,
    pub window_size: [f32; 2],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_url: "http://asterank.com/api/kepler?query={}&limit=1000".to_string(),
            http_timeout_secs: 30,
            page_size: 40,
            histogram_bins: 40,
            max_marker_radius: 10.0,
            window_size: [1400.0, 900.0],
        }
    }
}
