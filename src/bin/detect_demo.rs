use grid_splitter::detector::Axis;
use grid_splitter::diagnostics::DetectionReport;
use grid_splitter::image::io::load_image;
use grid_splitter::{Confidence, SeparatorDetector};
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let mut json = false;
    let mut inputs = Vec::new();
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--json" => json = true,
            "-h" | "--help" => return Err(usage()),
            _ => inputs.push(arg),
        }
    }
    if inputs.is_empty() {
        return Err(usage());
    }

    let detector = SeparatorDetector::default();
    let mut failures = 0usize;
    for input in &inputs {
        let path = Path::new(input);
        let report = load_image(path)
            .and_then(|buf| detector.detect_with_diagnostics(&buf.as_view()));
        match report {
            Ok(report) if json => {
                let text = serde_json::to_string_pretty(&report)
                    .map_err(|e| format!("Failed to serialize JSON: {e}"))?;
                println!("{text}");
            }
            Ok(report) => print_report(path, &report),
            Err(err) => {
                failures += 1;
                eprintln!("Error processing {}: {err}", path.display());
            }
        }
    }

    if failures == inputs.len() {
        return Err(format!("no image could be analysed ({failures} failed)"));
    }
    Ok(())
}

fn print_report(path: &Path, report: &DetectionReport) {
    let rule = "=".repeat(50);
    let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
    println!("\nAnalyzing: {name}");
    println!("{rule}");
    println!("Image size: {} x {}", report.input.width, report.input.height);

    for axis in [Axis::Vertical, Axis::Horizontal] {
        let noun = match axis {
            Axis::Vertical => "vertical",
            Axis::Horizontal => "horizontal",
        };
        let coord = match axis {
            Axis::Vertical => "x",
            Axis::Horizontal => "y",
        };
        println!("\nSearching for {noun} separators...");
        for s in report.searches.iter().filter(|s| s.axis == axis) {
            println!(
                "  {}{}: expected ~{}{coord} band [{}, {}] darkest={} brightness={:.1}",
                axis.label(),
                s.index,
                s.expected,
                s.search_start,
                s.search_end,
                s.darkest_position
                    .map(|p| p.to_string())
                    .unwrap_or_else(|| "-".to_string()),
                s.darkest_brightness
            );
            match &s.line {
                Some(line) => println!(
                    "    -> found at {coord}={}, width={}px, avgBrightness={:.1}",
                    line.position, line.width, line.average_brightness
                ),
                None => println!("    -> not found (no dark strip near {coord}={})", s.expected),
            }
        }
    }

    let res = &report.result;
    println!("\n{rule}");
    println!("RESULTS:");
    println!(
        "  Vertical separators: {}/{} found",
        report.lines(Axis::Vertical).count(),
        report.expected(Axis::Vertical)
    );
    println!(
        "  Horizontal separators: {}/{} found",
        report.lines(Axis::Horizontal).count(),
        report.expected(Axis::Horizontal)
    );
    println!(
        "  Suggested gutter: {}px (X={}px, Y={}px)",
        res.unified_gutter(),
        res.gutter_x,
        res.gutter_y
    );
    println!("  Confidence: {}", res.confidence);
    println!("  Elapsed: {:.3} ms", report.timings.total_ms);
    match res.confidence {
        Confidence::High => println!("\n  Ready for auto-extraction"),
        Confidence::Medium => println!("\n  May need manual adjustment"),
        Confidence::Low => println!("\n  Manual grid setup recommended"),
    }
}

fn usage() -> String {
    "Usage: detect_demo [--json] <image>...".to_string()
}
