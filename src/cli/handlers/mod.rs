mod decide;
mod download;

pub use decide::{cmd_decide, cmd_qr_approve, validate_remark};
pub use download::{cmd_attachment, cmd_letter, cmd_qr};

use crate::api::{HttpInboxApi, InboxApi};
use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::model::{ClientConfig, Decision};

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let config = config_io::load_config(cli.config.as_deref())?;

    match cli.command {
        None => Err("no subcommand given".into()),
        Some(cmd) => match cmd {
            Commands::Inbox => cmd_inbox(&config, json),
            Commands::Approve(args) => cmd_decide(&config, args, Decision::Approved, json),
            Commands::Reject(args) => cmd_decide(&config, args, Decision::Rejected, json),
            Commands::Show(args) => cmd_show(&config, args, json),
            Commands::Qr(args) => cmd_qr(&config, args, json),
            Commands::QrApprove(args) => cmd_qr_approve(&config, args, json),
            Commands::Requests(args) => cmd_requests(&config, args, json),
            Commands::Letter(args) => cmd_letter(&config, args, json),
            Commands::Attachment(args) => cmd_attachment(&config, args, json),
        },
    }
}

fn client(config: &ClientConfig) -> Result<HttpInboxApi, Box<dyn std::error::Error>> {
    Ok(HttpInboxApi::new(config)?)
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_inbox(config: &ClientConfig, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let items = client(config)?.fetch_inbox()?;
    if json {
        let output = InboxJson {
            count: items.len(),
            items: &items,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        for line in format_inbox(&items) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_show(
    config: &ClientConfig,
    args: ShowArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let detail = match client(config)?.fetch_detail(args.id) {
        Ok(detail) => detail,
        Err(e) if e.status() == Some(404) => {
            return Err(format!("request not found: {}", args.id).into());
        }
        Err(e) => return Err(e.into()),
    };
    if json {
        println!("{}", serde_json::to_string_pretty(&detail)?);
    } else {
        for line in format_detail(&detail) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_requests(
    config: &ClientConfig,
    args: RequestsArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut requests = client(config)?.fetch_requests()?;
    if args.completed {
        requests.retain(|r| r.is_completed());
    }
    if json {
        let output = RequestsJson {
            count: requests.len(),
            requests: &requests,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        for line in format_requests(&requests) {
            println!("{}", line);
        }
    }
    Ok(())
}
