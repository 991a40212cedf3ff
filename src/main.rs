use anyhow::{bail, Context};
use booking_core::config::{BookingConfig, CliConfig, Command, NotifierKind};
use booking_core::core::calendar::weekday_headers;
use booking_core::core::inquiry::InquiryForm;
use booking_core::core::slots;
use booking_core::utils::{logger, validation::Validate};
use booking_core::{
    BookingFlowController, BookingStep, Clock, ContactField, MailtoNotifier, MemoryNotifier,
    OutboundNotifier, SystemClock,
};
use chrono::{Datelike, NaiveDate};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting booking CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 載入並驗證配置
    let config = match cli.load_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Failed to load configuration: {}", e);
            eprintln!("❌ {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    match cli.command.clone() {
        Command::Calendar { year, month } => print_calendar(&config, year, month)?,
        Command::Slots { date } => print_slots(&config, date),
        Command::Book {
            date,
            time,
            name,
            email,
            note,
            dry_run,
            ..
        } => {
            let request = BookingRequest {
                date,
                time,
                name,
                email,
                note: note.unwrap_or_default(),
            };
            run_booking(&config, request, dry_run).await?;
        }
        Command::Inquire {
            name,
            email,
            interest,
            budget,
            message,
        } => {
            let mut form = InquiryForm {
                name,
                email,
                interest: Some(interest),
                budget: Some(budget),
                message,
            };
            let notifier = MemoryNotifier::new();
            if !form.submit_to(SystemClock.now(), &notifier) {
                bail!("name, email, interest, budget and message are all required");
            }
            for record in notifier.inquiries() {
                println!("{}", serde_json::to_string_pretty(&record)?);
            }
        }
    }

    Ok(())
}

struct BookingRequest {
    date: NaiveDate,
    time: String,
    name: String,
    email: String,
    note: String,
}

fn print_calendar(config: &BookingConfig, year: Option<i32>, month: Option<u32>) -> anyhow::Result<()> {
    let mut controller =
        BookingFlowController::new(config.flow_rules(), MemoryNotifier::new(), SystemClock);

    let current = controller.view_month();
    let target_year = year.unwrap_or(current.year());
    let target_month = month.unwrap_or(current.month());
    if !(1..=12).contains(&target_month) {
        bail!("month must be between 1 and 12, got {}", target_month);
    }
    let offset = (i64::from(target_year) - i64::from(current.year())) * 12
        + (i64::from(target_month) - i64::from(current.month()));
    let offset = i32::try_from(offset).context("month offset out of range")?;
    controller.navigate_month(offset);

    let cells = controller.day_cells()?;
    println!("{}", controller.view_month().title());
    println!(
        "{}",
        weekday_headers(config.booking.week_start)
            .iter()
            .map(|h| format!("{:>4}", h))
            .collect::<String>()
    );
    for row in cells.chunks(7) {
        let line: String = row
            .iter()
            .map(|cell| match cell {
                Some(day) if day.selectable => format!("{:>4}", day.date.day()),
                Some(_) => format!("{:>4}", "·"),
                None => "    ".to_string(),
            })
            .collect();
        println!("{}", line.trim_end());
    }
    Ok(())
}

fn print_slots(config: &BookingConfig, date: NaiveDate) {
    let available = slots::slots_for(
        date,
        &config.booking.closed_days,
        config.booking.time_format,
    );
    if available.is_empty() {
        println!("No slots on {} ({} is closed)", date, date.weekday());
        return;
    }
    println!("{} slots on {}:", available.len(), date.format("%A, %B %-d, %Y"));
    for slot in available {
        println!("  {}", slot);
    }
}

async fn run_booking(config: &BookingConfig, request: BookingRequest, dry_run: bool) -> anyhow::Result<()> {
    let kind = if dry_run {
        NotifierKind::Memory
    } else {
        config.notifier.kind
    };
    tracing::info!("🔔 Using {} notifier", kind);

    match kind {
        NotifierKind::Mailto => {
            drive_booking(config, MailtoNotifier::stdout(), &request)?;
        }
        NotifierKind::Memory => {
            let notifier = MemoryNotifier::new();
            drive_booking(config, notifier.clone(), &request)?;
            for record in notifier.bookings() {
                println!("Subject: {}\n\n{}", record.subject(), record.body());
            }
        }
        NotifierKind::Webhook => book_via_webhook(config, &request).await?,
    }

    println!("✅ Booking confirmed");
    Ok(())
}

#[cfg(feature = "webhook")]
async fn book_via_webhook(config: &BookingConfig, request: &BookingRequest) -> anyhow::Result<()> {
    use booking_core::WebhookNotifier;
    use std::sync::Arc;

    let url = config
        .notifier
        .webhook_url
        .clone()
        .context("notifier.webhook_url is required for the webhook notifier")?;
    let notifier = Arc::new(WebhookNotifier::new(url, config.notifier_timeout())?);
    drive_booking(config, Arc::clone(&notifier), request)?;
    // 程式結束前等待送出
    notifier.flush().await;
    Ok(())
}

#[cfg(not(feature = "webhook"))]
async fn book_via_webhook(_config: &BookingConfig, _request: &BookingRequest) -> anyhow::Result<()> {
    bail!("this build does not include the webhook notifier")
}

fn drive_booking<N: OutboundNotifier>(
    config: &BookingConfig,
    notifier: N,
    request: &BookingRequest,
) -> anyhow::Result<()> {
    let mut controller = BookingFlowController::new(config.flow_rules(), notifier, SystemClock);

    controller.select_date(request.date);
    if controller.selection().date() != Some(request.date) {
        bail!("{} cannot be booked (in the past or a closed day)", request.date);
    }

    if controller.select_time(request.time.as_str()) != BookingStep::Details {
        bail!("{} is not an offered slot on {}", request.time, request.date);
    }

    controller.edit_contact(ContactField::Name, request.name.as_str());
    controller.edit_contact(ContactField::Email, request.email.as_str());
    controller.edit_contact(ContactField::Note, request.note.as_str());

    if controller.submit() != BookingStep::Success {
        bail!("name and email are required");
    }
    Ok(())
}
