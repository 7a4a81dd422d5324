use grid_splitter::config::split::{frame_file_name, parse_cli, SplitConfig};
use grid_splitter::diagnostics::timing::elapsed_ms;
use grid_splitter::extractor::ExtractOptions;
use grid_splitter::image::io::{load_image, write_bytes_file, write_json_file};
use grid_splitter::types::ExtractedFrame;
use grid_splitter::{AutoExtractor, FrameExtractor};
use serde::Serialize;
use std::time::Instant;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config = parse_cli("split_demo")?;
    let total_start = Instant::now();
    let buf = load_image(&config.input_path).map_err(|e| e.to_string())?;
    let view = buf.as_view();

    let (frames, report) = match &config.manual_grid {
        Some(grid) => {
            let options = ExtractOptions {
                grid: *grid,
                trim: config.params.trim,
                aspect_ratio: config.params.aspect_ratio,
                filter: config.params.filter,
                format: config.params.format,
            };
            let (frames, report) = FrameExtractor::new(options)
                .extract_with_diagnostics(&view)
                .map_err(|e| e.to_string())?;
            let json = serde_json::to_value(&report).map_err(|e| e.to_string())?;
            (frames, json)
        }
        None => {
            let (result, report) = AutoExtractor::new(config.params.clone())
                .run_with_diagnostics(&view)
                .map_err(|e| e.to_string())?;
            if !result.success {
                eprintln!(
                    "No 3x3 grid detected in {}; rerun with --gutter <px> for a manual split",
                    config.input_path.display()
                );
            }
            let json = serde_json::to_value(&report).map_err(|e| e.to_string())?;
            (result.frames, json)
        }
    };

    let written = write_frames(&config, &frames)?;
    let summary = SplitSummary {
        input: config.input_path.display().to_string(),
        frames_written: written,
        total_ms: elapsed_ms(total_start),
        report,
    };

    match &config.output.json_out {
        Some(path) => {
            write_json_file(path, &summary)?;
            println!(
                "Split {} into {} frames; report saved to {}",
                summary.input,
                frames.len(),
                path.display()
            );
        }
        None => {
            let text = serde_json::to_string_pretty(&summary)
                .map_err(|e| format!("Failed to serialize JSON: {e}"))?;
            println!("{text}");
        }
    }
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SplitSummary {
    input: String,
    frames_written: Vec<String>,
    total_ms: f64,
    report: serde_json::Value,
}

fn write_frames(config: &SplitConfig, frames: &[ExtractedFrame]) -> Result<Vec<String>, String> {
    let Some(dir) = &config.output.frames_dir else {
        return Ok(Vec::new());
    };
    let mut written = Vec::with_capacity(frames.len());
    for frame in frames {
        let name = frame_file_name(&config.output.file_prefix, frame, config.params.format);
        let path = dir.join(&name);
        write_bytes_file(&path, &frame.image_data)?;
        written.push(path.display().to_string());
    }
    Ok(written)
}
