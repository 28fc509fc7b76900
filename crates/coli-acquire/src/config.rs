use std::path::PathBuf;
use std::time::Duration;

/// Calculator endpoint; the options page and the compute action share it.
pub const BASE_URL: &str = "https://www.coli.org/calculator/calculator.asp";

/// Public calculator session identifier, sent in the options URL and the
/// compute form. Not a credential.
pub const CALCULATOR_GUID: &str = "{80C33227-3056-4F17-A547-8B0CE11B356C}";

pub const DEFAULT_SALARY: u32 = 100_000;
pub const DESTINATION_ID: u32 = 56;
pub const DESTINATION_NAME: &str = "DE Dover";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const INDEX_CSV: &str = "cost_of_living_index.csv";
pub const AVG_PRICES_CSV: &str = "avg_prices.csv";

/// Parameters of every request sent to the calculator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculatorConfig {
    pub base_url: String,
    pub guid: String,
    pub salary: u32,
    /// Metro every source metro is compared against.
    pub destination_id: u32,
    pub destination_name: String,
    pub timeout: Duration,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            guid: CALCULATOR_GUID.to_string(),
            salary: DEFAULT_SALARY,
            destination_id: DESTINATION_ID,
            destination_name: DESTINATION_NAME.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl CalculatorConfig {
    /// URL of the calculator form holding the metro dropdowns.
    pub fn options_url(&self) -> String {
        format!("{}?guid={}", self.base_url, self.guid)
    }

    pub fn compute_url(&self) -> String {
        format!("{}?action=compute", self.base_url)
    }
}

/// What to do when a single metro's comparison cannot be fetched or parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Stop at the first failure without writing any output.
    #[default]
    Abort,
    /// Log the failure, leave the metro out, and keep going.
    Skip,
}

/// Where and how a run writes its results.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub output_dir: PathBuf,
    pub policy: FailurePolicy,
    /// Directory for raw HTML copies of every fetched page.
    pub cache_html: Option<PathBuf>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            policy: FailurePolicy::Abort,
            cache_html: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_urls() {
        let config = CalculatorConfig::default();
        assert_eq!(
            config.options_url(),
            "https://www.coli.org/calculator/calculator.asp?guid={80C33227-3056-4F17-A547-8B0CE11B356C}"
        );
        assert_eq!(
            config.compute_url(),
            "https://www.coli.org/calculator/calculator.asp?action=compute"
        );
    }

    #[test]
    fn test_default_timeout() {
        assert_eq!(CalculatorConfig::default().timeout, DEFAULT_TIMEOUT);
        assert_eq!(DEFAULT_TIMEOUT.as_secs(), 30);
    }
}
