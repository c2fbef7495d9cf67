use crate::api::{HttpInboxApi, InboxApi};
use crate::cli::commands::{AttachmentArgs, LetterArgs, QrArgs};
use crate::cli::output::{AttachmentSavedJson, LetterSavedJson, QrSavedJson};
use crate::inbox::qr::png_dimensions;
use crate::io::download::{output_path, save_file};
use crate::model::{ClientConfig, is_pdf};

/// `qr`: fetch the step's QR image and write it to `--out`
pub fn cmd_qr(
    config: &ClientConfig,
    args: QrArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let png = HttpInboxApi::new(config)?.fetch_qr(args.flow_id)?;
    let (width, height) = png_dimensions(&png)?;
    save_file(&args.out, &png)?;
    if json {
        let output = QrSavedJson {
            flow_id: args.flow_id,
            path: args.out.display().to_string(),
            width,
            height,
            bytes: png.len(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!(
            "saved QR for step {} to {} ({}x{})",
            args.flow_id,
            args.out.display(),
            width,
            height
        );
    }
    Ok(())
}

/// `letter`: check the letter exists and is approved, then save the PDF
pub fn cmd_letter(
    config: &ClientConfig,
    args: LetterArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let api = HttpInboxApi::new(config)?;
    let metadata = match api.fetch_letter_metadata(args.id) {
        Ok(metadata) => metadata,
        Err(e) if e.status() == Some(404) => {
            return Err(format!("no letter for request {}", args.id).into());
        }
        Err(e) => return Err(e.into()),
    };
    if !metadata.approved {
        return Err(format!(
            "letter for request {} is not available until every step has approved",
            args.id
        )
        .into());
    }

    let pdf = api.download_letter(args.id)?;
    if !is_pdf(&pdf) {
        return Err("response is not a PDF document".into());
    }
    let path = output_path(args.out.as_deref(), &format!("letter-{}.pdf", args.id));
    save_file(&path, &pdf)?;

    if json {
        let output = LetterSavedJson {
            approval_request_id: args.id,
            title: metadata.title,
            path: path.display().to_string(),
            bytes: pdf.len(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!(
            "saved letter \"{}\" to {} ({} bytes)",
            metadata.title,
            path.display(),
            pdf.len()
        );
    }
    Ok(())
}

pub fn cmd_attachment(
    config: &ClientConfig,
    args: AttachmentArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = match HttpInboxApi::new(config)?.download_attachment(args.id) {
        Ok(bytes) => bytes,
        Err(e) if e.status() == Some(404) => {
            return Err(format!("attachment not found: {}", args.id).into());
        }
        Err(e) => return Err(e.into()),
    };
    save_file(&args.out, &bytes)?;
    if json {
        let output = AttachmentSavedJson {
            attachment_id: args.id,
            path: args.out.display().to_string(),
            bytes: bytes.len(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!(
            "saved attachment {} to {} ({} bytes)",
            args.id,
            args.out.display(),
            bytes.len()
        );
    }
    Ok(())
}
