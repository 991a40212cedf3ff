use crate::core::flow::FlowRules;
use crate::core::payload::MessageTemplate;
use crate::domain::model::{ClosedDays, TimeFormat};
use crate::utils::error::{BookingError, Result};
use crate::utils::validation::{self, Validate};
use chrono::Weekday;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingConfig {
    pub booking: BookingSection,
    pub notifier: NotifierSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingSection {
    pub recipient: String,
    pub host_name: String,
    pub meeting_title: String,
    pub time_format: TimeFormat,
    pub closed_days: ClosedDays,
    pub week_start: Weekday,
}

impl Default for BookingSection {
    fn default() -> Self {
        let template = MessageTemplate::default();
        Self {
            recipient: template.recipient,
            host_name: template.host_name,
            meeting_title: template.meeting_title,
            time_format: TimeFormat::default(),
            closed_days: ClosedDays::default(),
            week_start: Weekday::Sun,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotifierKind {
    #[default]
    Mailto,
    Webhook,
    Memory,
}

impl fmt::Display for NotifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotifierKind::Mailto => write!(f, "mailto"),
            NotifierKind::Webhook => write!(f, "webhook"),
            NotifierKind::Memory => write!(f, "memory"),
        }
    }
}

impl FromStr for NotifierKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mailto" => Ok(NotifierKind::Mailto),
            "webhook" => Ok(NotifierKind::Webhook),
            "memory" => Ok(NotifierKind::Memory),
            other => Err(format!(
                "unknown notifier '{}', expected mailto, webhook or memory",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifierSection {
    pub kind: NotifierKind,
    pub webhook_url: Option<String>,
    pub timeout_seconds: u64,
}

impl Default for NotifierSection {
    fn default() -> Self {
        Self {
            kind: NotifierKind::default(),
            webhook_url: None,
            timeout_seconds: 10,
        }
    }
}

impl BookingConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(BookingError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| BookingError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${BOOKING_WEBHOOK_URL})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| BookingError::ConfigError {
            message: format!("env substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_email_address("booking.recipient", &self.booking.recipient)?;
        validation::validate_non_empty_string("booking.host_name", &self.booking.host_name)?;
        validation::validate_non_empty_string(
            "booking.meeting_title",
            &self.booking.meeting_title,
        )?;

        if self.booking.closed_days.days().len() == 7 {
            return Err(BookingError::InvalidConfigValueError {
                field: "booking.closed_days".to_string(),
                value: format!("{:?}", self.booking.closed_days.days()),
                reason: "At least one weekday must stay open".to_string(),
            });
        }

        validation::validate_range("notifier.timeout_seconds", self.notifier.timeout_seconds, 1, 300)?;

        if self.notifier.kind == NotifierKind::Webhook {
            let url = validation::validate_required_field(
                "notifier.webhook_url",
                &self.notifier.webhook_url,
            )?;
            validation::validate_url("notifier.webhook_url", url)?;
        }

        Ok(())
    }

    pub fn template(&self) -> MessageTemplate {
        MessageTemplate {
            recipient: self.booking.recipient.clone(),
            host_name: self.booking.host_name.clone(),
            meeting_title: self.booking.meeting_title.clone(),
        }
    }

    pub fn flow_rules(&self) -> FlowRules {
        FlowRules {
            closed_days: self.booking.closed_days,
            time_format: self.booking.time_format,
            week_start: self.booking.week_start,
            template: self.template(),
        }
    }

    pub fn notifier_timeout(&self) -> Duration {
        Duration::from_secs(self.notifier.timeout_seconds)
    }
}

impl Validate for BookingConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[booking]
recipient = "host@studio.dev"
host_name = "Fazil"
time_format = "24h"
closed_days = ["Sat", "Sunday"]
week_start = "Mon"

[notifier]
kind = "memory"
"#;

        let config = BookingConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.booking.recipient, "host@studio.dev");
        assert_eq!(config.booking.meeting_title, "30 Min Strategy Call");
        assert_eq!(config.booking.time_format, TimeFormat::TwentyFourHour);
        assert_eq!(config.booking.closed_days.days(), vec![Weekday::Sat, Weekday::Sun]);
        assert_eq!(config.booking.week_start, Weekday::Mon);
        assert_eq!(config.notifier.kind, NotifierKind::Memory);
        assert_eq!(config.notifier.timeout_seconds, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = BookingConfig::from_toml_str("").unwrap();
        let rules = config.flow_rules();
        assert_eq!(rules.closed_days, ClosedDays::default());
        assert_eq!(rules.time_format, TimeFormat::TwelveHour);
        assert_eq!(rules.week_start, Weekday::Sun);
        assert_eq!(config.notifier.kind, NotifierKind::Mailto);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("TEST_BOOKING_WEBHOOK", "https://hooks.example.com/booking");

        let toml_content = r#"
[notifier]
kind = "webhook"
webhook_url = "${TEST_BOOKING_WEBHOOK}"
"#;

        let config = BookingConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.notifier.webhook_url.as_deref(),
            Some("https://hooks.example.com/booking")
        );
        assert!(config.validate().is_ok());

        std::env::remove_var("TEST_BOOKING_WEBHOOK");
    }

    #[test]
    fn test_unset_env_var_fails_validation() {
        let toml_content = r#"
[notifier]
kind = "webhook"
webhook_url = "${TEST_BOOKING_WEBHOOK_UNSET}"
"#;

        let config = BookingConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.notifier.webhook_url.as_deref(),
            Some("${TEST_BOOKING_WEBHOOK_UNSET}")
        );
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation() {
        let bad_recipient = BookingConfig::from_toml_str("[booking]\nrecipient = \"nobody\"\n").unwrap();
        assert!(bad_recipient.validate().is_err());

        let missing_url = BookingConfig::from_toml_str("[notifier]\nkind = \"webhook\"\n").unwrap();
        assert!(matches!(
            missing_url.validate(),
            Err(BookingError::MissingConfigError { .. })
        ));

        let all_closed = BookingConfig::from_toml_str(
            "[booking]\nclosed_days = [\"Mon\", \"Tue\", \"Wed\", \"Thu\", \"Fri\", \"Sat\", \"Sun\"]\n",
        )
        .unwrap();
        assert!(all_closed.validate().is_err());

        let zero_timeout = BookingConfig::from_toml_str("[notifier]\ntimeout_seconds = 0\n").unwrap();
        assert!(zero_timeout.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        assert!(matches!(
            BookingConfig::from_toml_str("[booking\nrecipient = 1"),
            Err(BookingError::ConfigValidationError { .. })
        ));
        assert!(BookingConfig::from_toml_str("[booking]\ntime_format = \"36h\"\n").is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[booking]
recipient = "file@studio.dev"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = BookingConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.booking.recipient, "file@studio.dev");
        assert_eq!(config.template().recipient, "file@studio.dev");
    }
}
