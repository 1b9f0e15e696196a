//! Result rendering for each subcommand.

use anyhow::Result;
use aspect_analyzer::{
    parse_file_size, AnalysisResult, Assessment, Classification, DetailClass, Dimensions, SizeTier,
};
use aspect_cli::output::{format_dimensions, format_size, Status};
use aspect_core::config::OutputFormat;
use aspect_core::error::exit_codes;
use aspect_core::ResultExt;
use aspect_image::{read_image_info, ImageFormat, ImageInfo};
use serde::Serialize;
use serde_json::Value;
use std::path::Path;

const TALL_TEXT: &str = "tall image (more vertical than 2:3)";
const NOT_TALL_TEXT: &str = "not tall (2:3 or wider)";

fn verdict(is_tall: bool) -> &'static str {
    if is_tall { TALL_TEXT } else { NOT_TALL_TEXT }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print an analysis result.
pub fn analysis(result: &AnalysisResult, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(result);
    }

    match result {
        AnalysisResult::Success(success) => {
            Status::success(&format!(
                "Analyzed s3://{}/{}",
                success.source.bucket, success.source.key
            ));
            Status::field("Dimensions", format_dimensions(success.width, success.height));
            // `{:?}` keeps a trailing `.0` on whole ratios
            Status::field("Aspect ratio", format!("{:?}", success.decimal_ratio));
            Status::field("Classification", success.detail_classification);
            Status::field("Recommendation", success.recommended_action);
            Status::field("Detection method", success.detection_method);
            Status::field_emphasis("Result", verdict(success.is_tall));
        }
        AnalysisResult::Failure(failure) => {
            Status::failure(&format!("Analysis failed: {}", failure.error));
            if let Some(debug) = &failure.debug_info {
                Status::field(
                    "Detected",
                    format_dimensions(debug.detected_width, debug.detected_height),
                );
                Status::field("Detection method", debug.detection_method);
            }
            Status::field("Error code", &failure.error_code);
        }
    }

    Ok(())
}

#[derive(Serialize)]
struct InspectReport {
    path: String,
    format: Option<ImageFormat>,
    size_bytes: usize,
    width: u32,
    height: u32,
    aspect_ratio: f64,
    classification: Classification,
    detail_classification: DetailClass,
    recommended_action: &'static str,
    is_tall: bool,
}

/// Decode a local file and classify it. Returns the exit code.
pub fn inspect(path: &Path, format: OutputFormat) -> Result<i32> {
    let info = match read_info(path) {
        Ok(info) => info,
        Err(e) => {
            Status::error(&e.to_string());
            return Ok(e.exit_code());
        }
    };

    let Some(dimensions) = Dimensions::new(i64::from(info.width), i64::from(info.height)) else {
        let err = aspect_core::Error::invalid_dimensions(i64::from(info.width), i64::from(info.height));
        Status::error(&err.to_string());
        return Ok(err.exit_code());
    };
    let assessment = Assessment::of(dimensions);

    let report = InspectReport {
        path: path.display().to_string(),
        format: info.format,
        size_bytes: info.size_bytes,
        width: dimensions.width,
        height: dimensions.height,
        aspect_ratio: assessment.aspect_ratio,
        classification: assessment.classification,
        detail_classification: assessment.detail,
        recommended_action: assessment.detail.recommendation(),
        is_tall: assessment.is_tall(),
    };

    if format == OutputFormat::Json {
        print_json(&report)?;
        return Ok(exit_codes::SUCCESS);
    }

    Status::success(&report.path);
    Status::field(
        "Format",
        report.format.map_or_else(|| "unknown".to_string(), |f| f.to_string()),
    );
    Status::field("Size", format_size(report.size_bytes as u64));
    Status::field("Dimensions", format_dimensions(report.width, report.height));
    Status::field("Aspect ratio", format!("{:.2}", report.aspect_ratio));
    Status::field("Classification", report.detail_classification);
    Status::field("Recommendation", report.recommended_action);
    Status::field_emphasis("Result", verdict(report.is_tall));

    Ok(exit_codes::SUCCESS)
}

fn read_info(path: &Path) -> aspect_core::Result<ImageInfo> {
    let data = std::fs::read(path)
        .map_err(aspect_core::Error::from)
        .context(path.display().to_string())?;
    read_image_info(&data)
        .map_err(aspect_core::Error::from)
        .context(path.display().to_string())
}

#[derive(Serialize)]
struct SizeEstimate<'a> {
    input: &'a str,
    bytes: i64,
    tier: SizeTier,
    width: u32,
    height: u32,
    classification: Classification,
    detail_classification: DetailClass,
}

/// Parse a size and show what the size-based estimate would conclude.
///
/// JSON literals are accepted too, so `2048` is a number and `"1 MB"` a string.
pub fn estimate_size(input: &str, format: OutputFormat) -> Result<i32> {
    let value = serde_json::from_str::<Value>(input).unwrap_or_else(|_| Value::String(input.to_string()));
    let bytes = parse_file_size(&value);
    // negative counts estimate like an empty object
    let tier = SizeTier::from_bytes(usize::try_from(bytes.max(0)).unwrap_or(usize::MAX));
    let (width, height) = tier.dimensions();
    let assessment = Assessment::of(Dimensions { width, height });

    let estimate = SizeEstimate {
        input,
        bytes,
        tier,
        width,
        height,
        classification: assessment.classification,
        detail_classification: assessment.detail,
    };

    if format == OutputFormat::Json {
        print_json(&estimate)?;
        return Ok(exit_codes::SUCCESS);
    }

    match u64::try_from(bytes) {
        Ok(size) => Status::info(&format!("{input} = {bytes} bytes ({})", format_size(size))),
        Err(_) => Status::info(&format!("{input} = {bytes} bytes")),
    }
    Status::field("Size tier", estimate.tier);
    Status::field("Estimated dimensions", format_dimensions(width, height));
    Status::field("Classification", estimate.detail_classification);
    Status::field_emphasis("Result", verdict(assessment.is_tall()));

    Ok(exit_codes::SUCCESS)
}
