use crate::api::{ApiError, HttpInboxApi, InboxApi};
use crate::cli::commands::{DecideArgs, QrApproveArgs};
use crate::cli::output::DecisionJson;
use crate::inbox::confirm::{REMARK_REQUIRED, normalize_remark};
use crate::model::{ClientConfig, Decision, DecisionPayload, QrAction, QrDecisionPayload};

/// The remark rule shared with the TUI dialog: present and not blank
pub fn validate_remark(remark: Option<&str>) -> Result<String, &'static str> {
    remark
        .and_then(normalize_remark)
        .map(str::to_string)
        .ok_or(REMARK_REQUIRED)
}

/// `approve` / `reject`. Validation happens before any request is made.
pub fn cmd_decide(
    config: &ClientConfig,
    args: DecideArgs,
    decision: Decision,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let remark = validate_remark(args.remark.as_deref())?;
    let approver_id = config
        .credentials
        .approver_id()
        .ok_or(ApiError::MissingUserId)?
        .to_string();

    let payload = DecisionPayload {
        approver_id,
        status: decision,
        remark,
    };
    HttpInboxApi::new(config)?.submit_decision(args.id, &payload)?;

    if json {
        let output = DecisionJson {
            approval_request_id: args.id,
            status: decision.label(),
            remark: payload.remark,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("Request {} {} successfully", args.id, decision.label());
    }
    Ok(())
}

/// Decide via a QR token. The remark is optional on this path.
pub fn cmd_qr_approve(
    config: &ClientConfig,
    args: QrApproveArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let token = args.token.trim();
    if token.is_empty() {
        return Err("QR token is empty".into());
    }
    let action = if args.reject {
        QrAction::Reject
    } else {
        QrAction::Approve
    };
    let payload = QrDecisionPayload {
        flow_id: args.flow_id,
        qr_token: token.to_string(),
        action,
        remark: args.remark.unwrap_or_default().trim().to_string(),
    };
    HttpInboxApi::new(config)?.submit_qr_decision(&payload)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        let verb = match action {
            QrAction::Approve => "approved",
            QrAction::Reject => "rejected",
        };
        println!("Step {} {} via QR", args.flow_id, verb);
    }
    Ok(())
}
