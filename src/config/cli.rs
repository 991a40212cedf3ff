use crate::config::toml_config::{BookingConfig, NotifierKind};
use crate::core::inquiry::{Budget, Interest};
use crate::domain::model::TimeFormat;
use crate::utils::error::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "booking")]
#[command(about = "Appointment booking engine: month calendar, slots and booking flow")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub json_logs: bool,

    /// Override the slot label format from config (12h or 24h)
    #[arg(long, global = true)]
    pub time_format: Option<TimeFormat>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print a month grid, marking days that cannot be booked
    Calendar {
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        month: Option<u32>,
    },
    /// List bookable slots for a date (YYYY-MM-DD)
    Slots {
        #[arg(long)]
        date: NaiveDate,
    },
    /// Run a booking through the flow and hand it to the notifier
    Book {
        #[arg(long)]
        date: NaiveDate,
        #[arg(long)]
        time: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        note: Option<String>,
        /// Override the notifier from config (mailto, webhook or memory)
        #[arg(long)]
        notifier: Option<NotifierKind>,
        /// Assemble the booking but only print it
        #[arg(long)]
        dry_run: bool,
    },
    /// Submit the project inquiry form
    Inquire {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        interest: Interest,
        #[arg(long)]
        budget: Budget,
        #[arg(long)]
        message: String,
    },
}

impl CliConfig {
    /// Config file (or defaults) with command line overrides applied.
    pub fn load_config(&self) -> Result<BookingConfig> {
        let mut config = match &self.config {
            Some(path) => BookingConfig::from_file(path)?,
            None => BookingConfig::default(),
        };

        if let Some(format) = self.time_format {
            config.booking.time_format = format;
        }
        if let Command::Book {
            notifier: Some(kind),
            ..
        } = &self.command
        {
            config.notifier.kind = *kind;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_book_command() {
        let cli = CliConfig::try_parse_from([
            "booking",
            "--time-format",
            "24h",
            "book",
            "--date",
            "2026-10-19",
            "--time",
            "10:00am",
            "--name",
            "Ann",
            "--email",
            "ann@x.com",
            "--notifier",
            "memory",
        ])
        .unwrap();

        let config = cli.load_config().unwrap();
        assert_eq!(config.booking.time_format, TimeFormat::TwentyFourHour);
        assert_eq!(config.notifier.kind, NotifierKind::Memory);
        match cli.command {
            Command::Book { date, time, note, .. } => {
                assert_eq!(date, NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
                assert_eq!(time, "10:00am");
                assert!(note.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_inquire_command() {
        let cli = CliConfig::try_parse_from([
            "booking",
            "inquire",
            "--name",
            "Ann",
            "--email",
            "ann@x.com",
            "--interest",
            "UI/UX Design",
            "--budget",
            "₹2L - ₹5L",
            "--message",
            "hello",
        ])
        .unwrap();

        assert!(matches!(
            cli.command,
            Command::Inquire {
                interest: Interest::UiUxDesign,
                budget: Budget::From2LTo5L,
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_bad_date() {
        assert!(CliConfig::try_parse_from(["booking", "slots", "--date", "19/10/2026"]).is_err());
    }
}
