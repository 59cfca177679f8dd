//! `groom` CLI -- the shop's appointment book from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # What can Alex fit a men's haircut into next Monday?
//! groom slots --barber alex --service mens-haircut --date 2026-03-16
//!
//! # Which days in March still have room?
//! groom days --barber alex --service mens-haircut --month 2026-03
//!
//! # Book, move and cancel
//! groom book --barber alex --service mens-haircut --date 2026-03-16 --time 09:30 \
//!     --name "Kevin" --phone "+2305123456"
//! groom reschedule <BOOKING_ID> --date 2026-03-16 --time 14:30
//! groom cancel <BOOKING_ID>
//!
//! # Waitlist, barber time off, and the front-desk view of a day
//! groom waitlist add --name "Ravi" --phone "+2305987654" --date 2026-03-16
//! groom block --barber sam --date 2026-03-18 --reason "Holiday"
//! groom day --date 2026-03-16
//!
//! # Start a config file from the built-in shop
//! groom config > groom.toml
//! groom --config groom.toml services
//! ```

mod data;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::{Datelike, NaiveDate, NaiveTime};
use clap::{Parser, Subcommand};
use groom_engine::config::DEFAULT_SHOP_TOML;
use groom_engine::window::{parse_time, TIME_FORMAT};
use groom_engine::{BookingRequest, MemoryLedger, Scheduler, TimeWindow, WaitlistRequest};
use tracing::info;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "groom", version, about = "Barber shop appointment book")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Shop configuration (TOML). Uses the built-in shop if omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// JSON data file holding bookings, waitlist and unavailability
    #[arg(long, global = true, default_value = "groom-data.json")]
    data: PathBuf,

    /// Treat this date (YYYY-MM-DD) as today instead of the shop's clock
    #[arg(long, global = true)]
    today: Option<String>,

    /// Log operations to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the built-in shop configuration as TOML
    Config,
    /// List the service menu
    Services,
    /// List the barbers
    Barbers,
    /// List free start times for a barber, service and date
    Slots {
        #[arg(long)]
        barber: String,
        #[arg(long)]
        service: String,
        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
    },
    /// List the days of a month that still have a free start time
    Days {
        #[arg(long)]
        barber: String,
        #[arg(long)]
        service: String,
        /// Month (YYYY-MM). Defaults to the current month
        #[arg(long)]
        month: Option<String>,
    },
    /// Book an appointment
    Book {
        #[arg(long)]
        barber: String,
        #[arg(long)]
        service: String,
        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Start time (HH:MM), one of the times `slots` lists
        #[arg(long)]
        time: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Cancel a booking
    Cancel { id: Uuid },
    /// Move a booking to another free start time
    Reschedule {
        id: Uuid,
        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Start time (HH:MM)
        #[arg(long)]
        time: String,
    },
    /// Manage the waitlist
    Waitlist {
        #[command(subcommand)]
        action: WaitlistAction,
    },
    /// Mark a barber unavailable for a whole day or part of it
    Block {
        #[arg(long)]
        barber: String,
        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Start of the block (HH:MM). Omit with --to for a full day
        #[arg(long, requires = "to")]
        from: Option<String>,
        /// End of the block (HH:MM)
        #[arg(long, requires = "from")]
        to: Option<String>,
        #[arg(long, default_value = "")]
        reason: String,
    },
    /// Remove an unavailability record
    Unblock { id: Uuid },
    /// Show bookings, waitlist and free time for a date
    Day {
        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
    },
}

#[derive(Subcommand)]
enum WaitlistAction {
    /// Join the waitlist
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
        #[arg(long, default_value = "")]
        notes: String,
        /// Preferred date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
    },
    /// List waitlist entries for a date
    List {
        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = data::load_config(cli.config.as_deref())?;
    let today = match cli.today.as_deref() {
        Some(raw) => parse_date(raw)?,
        None => config.today()?,
    };

    // Writers hold the lock across load, run and save.
    let lock = if cli.command.writes() {
        Some(data::lock_data(&cli.data)?)
    } else {
        None
    };

    let ledger = data::load_ledger(&cli.data)?;
    info!(
        shop = %config.name,
        data = %cli.data.display(),
        bookings = ledger.bookings().len(),
        "appointment book opened"
    );
    let scheduler = Scheduler::from_config(&config, ledger)?;

    run(&scheduler, cli.command, today)?;

    if let Some(lock) = &lock {
        data::save_ledger(&cli.data, &scheduler.into_ledger(), lock)?;
    }
    Ok(())
}

impl Commands {
    /// Whether the command changes the data file.
    fn writes(&self) -> bool {
        match self {
            Commands::Book { .. }
            | Commands::Cancel { .. }
            | Commands::Reschedule { .. }
            | Commands::Block { .. }
            | Commands::Unblock { .. } => true,
            Commands::Waitlist { action } => matches!(action, WaitlistAction::Add { .. }),
            Commands::Config
            | Commands::Services
            | Commands::Barbers
            | Commands::Slots { .. }
            | Commands::Days { .. }
            | Commands::Day { .. } => false,
        }
    }
}

/// Execute one command against the loaded appointment book.
fn run(scheduler: &Scheduler<MemoryLedger>, command: Commands, today: NaiveDate) -> Result<()> {
    match command {
        Commands::Config => {
            print!("{}", DEFAULT_SHOP_TOML);
        }
        Commands::Services => {
            for service in scheduler.catalog().by_name() {
                println!(
                    "{:<22} {:<34} {:>3} min  {:>8.2}",
                    service.id, service.name, service.duration_minutes, service.price
                );
            }
        }
        Commands::Barbers => {
            for barber in scheduler.roster().by_name() {
                println!("{:<10} {}", barber.id, barber.name);
            }
        }
        Commands::Slots {
            barber,
            service,
            date,
        } => {
            let date = parse_date(&date)?;
            if date < today {
                bail!("You cannot book appointments for past dates.");
            }
            let duration = scheduler.catalog().duration_of(&service)?;
            let starts = scheduler.available_start_times(&barber, &service, date)?;
            if starts.is_empty() {
                println!("No free times on {}.", date);
            }
            for start in starts {
                println!("{}", slot_label(start, duration));
            }
        }
        Commands::Days {
            barber,
            service,
            month,
        } => {
            let (year, month) = match month.as_deref() {
                Some(raw) => parse_month(raw)?,
                None => (today.year(), today.month()),
            };
            let days = scheduler.bookable_days(&barber, &service, year, month, today)?;
            if days.is_empty() {
                println!("No available days for booking in this month. Please try another month.");
            }
            for day in days {
                println!("{} {}", day, day.format("%a"));
            }
        }
        Commands::Book {
            barber,
            service,
            date,
            time,
            name,
            phone,
            notes,
        } => {
            let request = BookingRequest {
                barber_id: barber,
                service_id: service,
                customer_name: name,
                customer_phone: phone,
                date: parse_date(&date)?,
                start: parse_time(&time)?,
                notes,
            };
            let booking = scheduler.book(request, today)?;
            println!(
                "Booked {} on {} at {}-{} ({})",
                booking.customer_name,
                booking.date,
                booking.start.format(TIME_FORMAT),
                booking.end.format(TIME_FORMAT),
                booking.id
            );
        }
        Commands::Cancel { id } => {
            let booking = scheduler.cancel(id)?;
            println!(
                "Cancelled {} on {} at {}",
                booking.customer_name,
                booking.date,
                booking.start.format(TIME_FORMAT)
            );
        }
        Commands::Reschedule { id, date, time } => {
            let booking =
                scheduler.reschedule(id, parse_date(&date)?, parse_time(&time)?, today)?;
            println!(
                "Moved {} to {} at {}-{}",
                booking.customer_name,
                booking.date,
                booking.start.format(TIME_FORMAT),
                booking.end.format(TIME_FORMAT)
            );
        }
        Commands::Waitlist { action } => match action {
            WaitlistAction::Add {
                name,
                phone,
                notes,
                date,
            } => {
                let requested_date = date.as_deref().map(parse_date).transpose()?;
                let entry = scheduler.join_waitlist(WaitlistRequest {
                    name,
                    phone,
                    notes,
                    requested_date,
                })?;
                println!(
                    "Added {} to the waitlist ({}). We will call if a slot opens up.",
                    entry.name, entry.id
                );
            }
            WaitlistAction::List { date } => {
                let date = parse_date(&date)?;
                let waiting = scheduler.waitlist_on(date);
                if waiting.is_empty() {
                    println!("Nobody is waiting for {}.", date);
                }
                for entry in waiting {
                    println!("{:<20} {:<16} {}", entry.name, entry.phone, dash(&entry.notes));
                }
            }
        },
        Commands::Block {
            barber,
            date,
            from,
            to,
            reason,
        } => {
            let date = parse_date(&date)?;
            let window = match (from, to) {
                (Some(from), Some(to)) => Some(TimeWindow::parse(&from, &to)?),
                _ => None,
            };
            let record = scheduler.block(&barber, date, window, &reason)?;
            let span = window.map_or_else(|| "all day".to_string(), |w| w.to_string());
            println!("Blocked {} on {} ({}) ({})", barber, date, span, record.id);
        }
        Commands::Unblock { id } => {
            let record = scheduler.unblock(id)?;
            println!("Unblocked {} on {}", record.barber_id, record.date);
        }
        Commands::Day { date } => {
            let date = parse_date(&date)?;
            print_day_sheet(scheduler, date);
        }
    }
    Ok(())
}

fn print_day_sheet(scheduler: &Scheduler<MemoryLedger>, date: NaiveDate) {
    let sheet = scheduler.day_sheet(date);
    println!("Appointments for {}", date.format("%A, %d %B %Y"));

    if sheet.bookings.is_empty() && sheet.waitlist.is_empty() {
        println!("No appointments or waitlist entries on this date.");
    }

    for booking in &sheet.bookings {
        let barber = scheduler
            .roster()
            .get(&booking.barber_id)
            .map_or(booking.barber_id.as_str(), |b| b.name.as_str());
        let service = scheduler
            .catalog()
            .get(&booking.service_id)
            .map_or(booking.service_id.as_str(), |s| s.name.as_str());
        println!(
            "  {}-{}  {:<8} {:<20} {:<16} {}  [{}]",
            booking.start.format(TIME_FORMAT),
            booking.end.format(TIME_FORMAT),
            barber,
            booking.customer_name,
            booking.customer_phone,
            service,
            booking.id
        );
    }

    for entry in &sheet.waitlist {
        println!(
            "  (waitlist)   {:<20} {:<16} {}",
            entry.name,
            entry.phone,
            dash(&entry.notes)
        );
    }

    for clash in &sheet.double_bookings {
        println!(
            "  WARNING: {} and {} overlap by {} min",
            clash.first.id, clash.second.id, clash.overlap_minutes
        );
    }

    println!("Free time");
    for day in &sheet.barbers {
        let free: Vec<String> = day
            .free
            .iter()
            .map(|w| format!("{}-{}", w.start.format(TIME_FORMAT), w.end.format(TIME_FORMAT)))
            .collect();
        let free = if free.is_empty() {
            "none".to_string()
        } else {
            free.join(", ")
        };
        println!("  {:<8} {}", day.barber.name, free);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn slot_label(start: NaiveTime, duration_minutes: u32) -> String {
    let end = start + chrono::Duration::minutes(i64::from(duration_minutes));
    format!("{} - {}", start.format(TIME_FORMAT), end.format(TIME_FORMAT))
}

fn dash(s: &str) -> &str {
    if s.is_empty() {
        "-"
    } else {
        s
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", raw))
}

fn parse_month(raw: &str) -> Result<(i32, u32)> {
    let first = NaiveDate::parse_from_str(&format!("{}-01", raw.trim()), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", raw))?;
    Ok((first.year(), first.month()))
}
