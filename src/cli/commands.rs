use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "apin", about = concat!("apin v", env!("CARGO_PKG_VERSION"), " - approval inbox in the terminal"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file (default: ~/.config/apin/config.toml, or $APIN_CONFIG)
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List requests waiting on you
    Inbox,
    /// Approve a request
    Approve(DecideArgs),
    /// Reject a request
    Reject(DecideArgs),
    /// Show a request with its approval steps
    Show(ShowArgs),
    /// Save the QR code for an approval step
    Qr(QrArgs),
    /// Decide on a step using a scanned QR token
    QrApprove(QrApproveArgs),
    /// List the requests you submitted
    Requests(RequestsArgs),
    /// Download the approval letter (PDF) of a completed request
    Letter(LetterArgs),
    /// Download a file attached to a request
    Attachment(AttachmentArgs),
}

#[derive(Args)]
pub struct DecideArgs {
    /// Approval request ID
    pub id: u64,
    /// Remark sent with the decision (required)
    #[arg(short, long)]
    pub remark: Option<String>,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Approval request ID
    pub id: u64,
}

#[derive(Args)]
pub struct QrArgs {
    /// Flow (step) ID
    pub flow_id: u64,
    /// Where to write the PNG
    #[arg(short, long)]
    pub out: PathBuf,
}

#[derive(Args)]
#[command(group(ArgGroup::new("action").required(true).args(["approve", "reject"])))]
pub struct QrApproveArgs {
    /// Flow (step) ID encoded in the QR code
    #[arg(long)]
    pub flow_id: u64,
    /// Token encoded in the QR code
    #[arg(long)]
    pub token: String,
    #[arg(long)]
    pub approve: bool,
    #[arg(long)]
    pub reject: bool,
    /// Optional remark
    #[arg(short, long)]
    pub remark: Option<String>,
}

#[derive(Args)]
pub struct RequestsArgs {
    /// Only fully approved requests (those with a letter)
    #[arg(long)]
    pub completed: bool,
}

#[derive(Args)]
pub struct LetterArgs {
    /// Approval request ID
    pub id: u64,
    /// Where to write the PDF (default: letter-<ID>.pdf)
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

#[derive(Args)]
pub struct AttachmentArgs {
    /// Attachment ID, as listed by `apin show`
    pub id: u64,
    /// Where to write the file
    #[arg(short, long)]
    pub out: PathBuf,
}
