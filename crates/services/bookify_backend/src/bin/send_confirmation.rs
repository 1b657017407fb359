// --- File: crates/services/bookify_backend/src/bin/send_confirmation.rs ---
//! One-shot console entry point for the booking flow.
//!
//! Reads service name, date, time and email from the command line (or prompts
//! for the missing ones), constructs the booking record, dispatches the
//! confirmation email and prints the outcome. Exits non-zero on a validation
//! failure or a failed delivery.
//!
//! Usage: send_confirmation [SERVICE] [DATE] [TIME] [EMAIL]
//! Example: send_confirmation "Haircut" 2023-11-01 "10:00 AM" customer@example.com

use bookify_booking::{confirmation_body, confirmation_subject, construct_booking};
use bookify_config::load_config;
use bookify_notify::{Channel, DeliveryResult, Dispatcher};
use std::io::{self, Write};
use std::sync::Arc;

fn prompt(label: &str) -> String {
    print!("{}", label);
    let _ = io::stdout().flush();
    let mut buf = String::new();
    if io::stdin().read_line(&mut buf).is_err() {
        return String::new();
    }
    buf.trim().to_string()
}

fn arg_or_prompt(arg: Option<String>, label: &str) -> String {
    arg.unwrap_or_else(|| prompt(label))
}

#[tokio::main]
async fn main() {
    bookify_common::logging::init();

    // A leading `.env*` argument selects the dotenv file (config crate convention)
    let mut args = std::env::args().skip(1).filter(|a| !a.starts_with(".env"));
    let service_name = arg_or_prompt(args.next(), "Service name: ");
    let date = arg_or_prompt(args.next(), "Date (YYYY-MM-DD): ");
    let time = arg_or_prompt(args.next(), "Time (e.g. 10:00 AM): ");
    let email = arg_or_prompt(args.next(), "Contact email: ");

    let record = match construct_booking(&service_name, &date, &time, &email) {
        Ok(record) => record,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    match serde_json::to_string_pretty(&record) {
        Ok(json) => println!("Booking details: {}", json),
        Err(e) => eprintln!("Failed to serialize booking record: {}", e),
    }

    let config = Arc::new(load_config().expect("Failed to load config"));
    let dispatcher = match Dispatcher::from_config(&config) {
        Ok(dispatcher) => dispatcher,
        Err(e) => {
            eprintln!("Failed to initialize notification channels: {}", e);
            std::process::exit(1);
        }
    };

    match dispatcher
        .dispatch(
            Channel::Email,
            &record.contact_email,
            confirmation_subject(),
            &confirmation_body(&record),
        )
        .await
    {
        DeliveryResult::Delivered(result) => {
            println!("Confirmation email sent (id: {})", result.id);
        }
        DeliveryResult::Failed { reason } => {
            eprintln!("Failed to send confirmation email: {}", reason);
            std::process::exit(1);
        }
    }
}
