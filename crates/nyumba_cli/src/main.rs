//! Command-line surface for the housing message board.
//!
//! # Responsibility
//! - Expose the board operations (list/get/add/update/delete) locally.
//! - Keep output machine-readable: one JSON record per line.

use nyumba_core::db::open_db;
use nyumba_core::{
    core_version, default_log_level, init_logging, HousingMessage, MessagePayload, MessageService,
    SqliteMessageStore,
};
use std::process::ExitCode;

const DB_PATH_ENV: &str = "NYUMBA_DB";
const LOG_DIR_ENV: &str = "NYUMBA_LOG_DIR";
const DEFAULT_DB_PATH: &str = "nyumba.db";

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> Result<(), String> {
    if let Ok(log_dir) = std::env::var(LOG_DIR_ENV) {
        init_logging(default_log_level(), &log_dir)?;
    }

    let db_path = std::env::var(DB_PATH_ENV).unwrap_or_else(|_| DEFAULT_DB_PATH.to_string());
    let conn = open_db(&db_path).map_err(|err| err.to_string())?;
    let store = SqliteMessageStore::try_new(&conn).map_err(|err| err.to_string())?;
    let service = MessageService::new(store);

    let command = args.first().map(String::as_str).unwrap_or("help");
    match command {
        "list" => {
            for message in service.list_messages().map_err(|err| err.to_string())? {
                print_message(&message)?;
            }
            Ok(())
        }
        "get" => {
            let id = expect_arg(args, 1, "get <id>")?;
            let message = service.get_message(id).map_err(|err| err.to_string())?;
            print_message(&message)
        }
        "add" => {
            let payload = payload_from_args(args, 1, "add <title> <body> <attachment-url>")?;
            let message = service
                .create_message(payload)
                .map_err(|err| err.to_string())?;
            print_message(&message)
        }
        "update" => {
            let id = expect_arg(args, 1, "update <id> <title> <body> <attachment-url>")?;
            let payload =
                payload_from_args(args, 2, "update <id> <title> <body> <attachment-url>")?;
            let message = service
                .update_message(id, payload)
                .map_err(|err| err.to_string())?;
            print_message(&message)
        }
        "delete" => {
            let id = expect_arg(args, 1, "delete <id>")?;
            let message = service.delete_message(id).map_err(|err| err.to_string())?;
            print_message(&message)
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => Err(format!("unknown command `{other}`\n\n{}", usage())),
    }
}

fn expect_arg<'a>(args: &'a [String], index: usize, usage_line: &str) -> Result<&'a str, String> {
    args.get(index)
        .map(String::as_str)
        .ok_or_else(|| format!("missing argument\nusage: nyumba_cli {usage_line}"))
}

fn payload_from_args(
    args: &[String],
    start: usize,
    usage_line: &str,
) -> Result<MessagePayload, String> {
    Ok(MessagePayload {
        title: expect_arg(args, start, usage_line)?.to_string(),
        body: expect_arg(args, start + 1, usage_line)?.to_string(),
        attachment_url: expect_arg(args, start + 2, usage_line)?.to_string(),
    })
}

fn print_message(message: &HousingMessage) -> Result<(), String> {
    let line = serde_json::to_string(message).map_err(|err| err.to_string())?;
    println!("{line}");
    Ok(())
}

fn print_usage() {
    println!("{}", usage());
}

fn usage() -> String {
    format!(
        "nyumba_cli {} - housing message board\n\
         \n\
         usage:\n\
         \x20 nyumba_cli list\n\
         \x20 nyumba_cli get <id>\n\
         \x20 nyumba_cli add <title> <body> <attachment-url>\n\
         \x20 nyumba_cli update <id> <title> <body> <attachment-url>\n\
         \x20 nyumba_cli delete <id>\n\
         \n\
         environment:\n\
         \x20 {DB_PATH_ENV}       database file path (default: {DEFAULT_DB_PATH})\n\
         \x20 {LOG_DIR_ENV}  absolute directory for rolling log files (optional)",
        core_version()
    )
}
