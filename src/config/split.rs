use crate::extractor::{AspectRatio, GridConfig, OutputFormat};
use crate::orchestrator::AutoExtractParams;
use crate::types::ExtractedFrame;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving one file per frame; nothing is written when unset.
    pub frames_dir: Option<PathBuf>,
    /// JSON report path; the report goes to stdout when unset.
    pub json_out: Option<PathBuf>,
    pub file_prefix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            frames_dir: None,
            json_out: None,
            file_prefix: "frame".to_string(),
        }
    }
}

/// Runtime configuration of the `split_demo` tool.
#[derive(Clone, Debug, Deserialize)]
pub struct SplitConfig {
    pub input_path: PathBuf,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub params: AutoExtractParams,
    /// Skip detection and split with this layout (manual fallback).
    #[serde(default)]
    pub manual_grid: Option<GridConfig>,
}

pub fn load_config(path: &Path) -> Result<SplitConfig, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    parse_config(&contents).map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

pub fn parse_config(json: &str) -> Result<SplitConfig, String> {
    let config: SplitConfig = serde_json::from_str(json).map_err(|e| e.to_string())?;
    config.validate()?;
    Ok(config)
}

impl SplitConfig {
    /// Reject settings that would only fail once frames are being encoded.
    pub fn validate(&self) -> Result<(), String> {
        self.params.format.validate().map_err(|e| e.to_string())
    }
}

/// Build a config from `<config.json>` or from flags:
/// `--input <image> [--out <dir>] [--json <path>] [--aspect 16:9|9:16] [--gutter <px>]`.
pub fn parse_cli(program: &str) -> Result<SplitConfig, String> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    parse_args(program, &args)
}

pub fn parse_args(program: &str, args: &[String]) -> Result<SplitConfig, String> {
    if let [single] = args {
        if single.ends_with(".json") {
            return load_config(Path::new(single));
        }
    }

    let mut input_path = None;
    let mut output = OutputConfig::default();
    let mut params = AutoExtractParams::default();
    let mut manual_grid = None;

    let mut it = args.iter();
    while let Some(flag) = it.next() {
        let mut value = || {
            it.next()
                .cloned()
                .ok_or_else(|| format!("{flag} expects a value\n{}", usage(program)))
        };
        match flag.as_str() {
            "--input" => input_path = Some(PathBuf::from(value()?)),
            "--out" => output.frames_dir = Some(PathBuf::from(value()?)),
            "--json" => output.json_out = Some(PathBuf::from(value()?)),
            "--aspect" => params.aspect_ratio = value()?.parse::<AspectRatio>()?,
            "--trim" => {
                params.trim = value()?
                    .parse()
                    .map_err(|e| format!("invalid --trim: {e}"))?
            }
            "--jpeg" => {
                let quality = value()?
                    .parse()
                    .map_err(|e| format!("invalid --jpeg quality: {e}"))?;
                params.format = OutputFormat::Jpeg { quality };
            }
            "--gutter" => {
                let gutter = value()?
                    .parse()
                    .map_err(|e| format!("invalid --gutter: {e}"))?;
                manual_grid = Some(GridConfig::uniform(gutter));
            }
            "-h" | "--help" => return Err(usage(program)),
            other => return Err(format!("unknown argument '{other}'\n{}", usage(program))),
        }
    }

    let config = SplitConfig {
        input_path: input_path.ok_or_else(|| usage(program))?,
        output,
        params,
        manual_grid,
    };
    config.validate()?;
    Ok(config)
}

pub fn usage(program: &str) -> String {
    format!(
        "Usage: {program} <config.json>\n       {program} --input <image> [--out <dir>] [--json <path>] [--aspect 16:9|9:16] [--trim <px>] [--jpeg <quality>] [--gutter <px>]"
    )
}

/// `<prefix>_r<row>_c<col>.<ext>`
pub fn frame_file_name(prefix: &str, frame: &ExtractedFrame, format: OutputFormat) -> String {
    format!(
        "{prefix}_r{}_c{}.{}",
        frame.row,
        frame.col,
        format.extension()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn json_config_fills_defaults() {
        let cfg = parse_config(
            r#"{
                "input_path": "sheet.png",
                "output": { "frames_dir": "out" },
                "params": { "aspect_ratio": "9:16", "format": { "type": "jpeg", "quality": 80 } }
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.input_path, PathBuf::from("sheet.png"));
        assert_eq!(cfg.output.frames_dir, Some(PathBuf::from("out")));
        assert_eq!(cfg.output.file_prefix, "frame");
        assert_eq!(cfg.params.aspect_ratio, AspectRatio::Portrait);
        assert_eq!(cfg.params.format, OutputFormat::Jpeg { quality: 80 });
        assert_eq!(cfg.params.trim, 2);
        assert_eq!(cfg.params.detector.rows, 3);
        assert!(cfg.manual_grid.is_none());
    }

    #[test]
    fn manual_grid_from_json() {
        let cfg = parse_config(
            r#"{ "input_path": "a.png", "manual_grid": { "gutter_x": 8, "gutter_y": 6 } }"#,
        )
        .unwrap();
        let grid = cfg.manual_grid.unwrap();
        assert_eq!((grid.rows, grid.cols, grid.gutter_x, grid.gutter_y), (3, 3, 8, 6));
    }

    #[test]
    fn flags_are_parsed() {
        let cfg = parse_args(
            "split_demo",
            &args(&["--input", "a.webp", "--aspect", "9:16", "--gutter", "12", "--trim", "0"]),
        )
        .unwrap();
        assert_eq!(cfg.input_path, PathBuf::from("a.webp"));
        assert_eq!(cfg.params.aspect_ratio, AspectRatio::Portrait);
        assert_eq!(cfg.params.trim, 0);
        assert_eq!(cfg.manual_grid, Some(GridConfig::uniform(12)));
    }

    #[test]
    fn missing_input_or_value_is_an_error() {
        assert!(parse_args("split_demo", &args(&["--out", "dir"])).is_err());
        assert!(parse_args("split_demo", &args(&["--input"])).is_err());
        assert!(parse_args("split_demo", &args(&["--bogus"])).is_err());
    }

    #[test]
    fn out_of_range_jpeg_quality_is_rejected_on_parse() {
        assert!(parse_args("split_demo", &args(&["--input", "a.png", "--jpeg", "0"])).is_err());
        assert!(parse_args("split_demo", &args(&["--input", "a.png", "--jpeg", "101"])).is_err());
        assert!(parse_args("split_demo", &args(&["--input", "a.png", "--jpeg", "85"])).is_ok());
        let err = parse_config(
            r#"{ "input_path": "a.png", "params": { "format": { "type": "jpeg", "quality": 0 } } }"#,
        )
        .unwrap_err();
        assert!(err.contains("JPEG quality 0"));
    }

    #[test]
    fn frame_names_carry_coordinates() {
        let frame = ExtractedFrame {
            image_data: Vec::new(),
            row: 2,
            col: 1,
        };
        assert_eq!(
            frame_file_name("shot", &frame, OutputFormat::Png),
            "shot_r2_c1.png"
        );
    }
}
