//! Darkest-strip search inside one band and thickness estimation.

use super::params::{DetectorParams, MAX_BRIGHTNESS};
use super::profile::{span_brightness, strip_brightness, Axis};
use crate::diagnostics::SeparatorSearch;
use crate::image::ImageRgb8;
use crate::types::SeparatorLine;
use log::debug;

/// One band to scan: the `index`-th internal separator on `axis`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchBand {
    pub axis: Axis,
    /// 1-based separator index (1 = first third, 2 = second third, ...).
    pub index: usize,
    pub expected: usize,
    /// Inclusive band bounds; `start > end` when the axis is empty.
    pub start: usize,
    pub end: usize,
}

/// Bands centred on `extent * k / cells` for every internal boundary `k`.
pub fn plan_bands(
    axis: Axis,
    extent: usize,
    cells: usize,
    params: &DetectorParams,
) -> Vec<SearchBand> {
    let band = (extent as f64 * params.search_band_fraction as f64).round() as i64;
    (1..cells)
        .map(|k| {
            let expected = (extent as f64 * k as f64 / cells as f64).round() as i64;
            let start = (expected - band).max(0);
            let end = (expected + band).min(extent as i64 - 1);
            let (start, end) = if end < start {
                (1, 0)
            } else {
                (start as usize, end as usize)
            };
            SearchBand {
                axis,
                index: k,
                expected: expected as usize,
                start,
                end,
            }
        })
        .collect()
}

/// Scan one band for a near-black separator.
pub fn find_separator(
    img: &ImageRgb8,
    band: &SearchBand,
    params: &DetectorParams,
) -> SeparatorSearch {
    let axis = band.axis;
    let extent = axis.extent(img);

    let mut darkest_position = None;
    let mut darkest_brightness = MAX_BRIGHTNESS;
    if band.start <= band.end {
        for pos in band.start..=band.end {
            let b = strip_brightness(img, axis, pos);
            if b < darkest_brightness {
                darkest_brightness = b;
                darkest_position = Some(pos);
            }
        }
    }

    let mut search = SeparatorSearch {
        axis,
        index: band.index,
        expected: band.expected,
        search_start: band.start,
        search_end: band.end,
        darkest_position,
        darkest_brightness,
        local_threshold: None,
        line: None,
    };

    let darkest = match darkest_position {
        Some(pos) if darkest_brightness < params.max_separator_brightness => pos,
        _ => {
            debug!(
                "{}{} darkest={:?} brightness={:.1} -> too bright (threshold={:.0}), not a separator",
                axis.label(),
                band.index,
                darkest_position,
                darkest_brightness,
                params.max_separator_brightness
            );
            return search;
        }
    };

    let threshold = params.local_threshold(darkest_brightness);
    let mut line_start = darkest;
    let mut line_end = darkest;

    for _ in 0..params.max_expand_px {
        if line_start == 0 || strip_brightness(img, axis, line_start - 1) >= threshold {
            break;
        }
        line_start -= 1;
    }
    for _ in 0..params.max_expand_px {
        if line_end + 1 >= extent || strip_brightness(img, axis, line_end + 1) >= threshold {
            break;
        }
        line_end += 1;
    }

    let width = line_end - line_start + 1;
    let line = SeparatorLine {
        position: line_start,
        width,
        average_brightness: span_brightness(img, axis, line_start, width),
    };
    debug!(
        "{}{} found line start={} width={}px avg_brightness={:.1} (darkest={} local_threshold={:.1})",
        axis.label(),
        band.index,
        line.position,
        line.width,
        line.average_brightness,
        darkest,
        threshold
    );

    search.local_threshold = Some(threshold);
    search.line = Some(line);
    search
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Width x 4 RGB image with the given per-column grey values.
    fn columns(values: &[u8]) -> (Vec<u8>, usize) {
        let w = values.len();
        let mut data = Vec::with_capacity(w * 4 * 3);
        for _ in 0..4 {
            for &v in values {
                data.extend_from_slice(&[v, v, v]);
            }
        }
        (data, w)
    }

    #[test]
    fn bands_centre_on_thirds() {
        let params = DetectorParams::default();
        let bands = plan_bands(Axis::Vertical, 1920, 3, &params);
        assert_eq!(bands.len(), 2);
        assert_eq!((bands[0].expected, bands[0].start, bands[0].end), (640, 544, 736));
        assert_eq!((bands[1].expected, bands[1].start, bands[1].end), (1280, 1184, 1376));

        let bands = plan_bands(Axis::Horizontal, 1080, 3, &params);
        assert_eq!((bands[0].expected, bands[0].start, bands[0].end), (360, 306, 414));
        assert_eq!((bands[1].expected, bands[1].start, bands[1].end), (720, 666, 774));
    }

    #[test]
    fn bands_clamp_to_small_axes() {
        let params = DetectorParams {
            search_band_fraction: 0.5,
            ..Default::default()
        };
        let bands = plan_bands(Axis::Vertical, 6, 3, &params);
        assert_eq!((bands[0].start, bands[0].end), (0, 5));
        assert_eq!((bands[1].start, bands[1].end), (1, 5));
    }

    #[test]
    fn empty_axis_yields_empty_band() {
        let bands = plan_bands(Axis::Vertical, 0, 3, &DetectorParams::default());
        assert!(bands.iter().all(|b| b.start > b.end));
    }

    #[test]
    fn measures_gutter_thickness() {
        let mut values = vec![200u8; 30];
        for v in &mut values[12..17] {
            *v = 3;
        }
        let (data, w) = columns(&values);
        let img = ImageRgb8::packed(w, 4, 3, &data);
        let band = SearchBand {
            axis: Axis::Vertical,
            index: 1,
            expected: 15,
            start: 10,
            end: 20,
        };
        let search = find_separator(&img, &band, &DetectorParams::default());
        let line = search.line.expect("gutter should be found");
        assert_eq!(line.position, 12);
        assert_eq!(line.width, 5);
        assert_eq!(line.average_brightness, 3.0);
        assert_eq!(search.darkest_position, Some(12));
        assert_eq!(search.local_threshold, Some(24.0));
    }

    #[test]
    fn pure_black_gutter_expands() {
        let mut values = vec![180u8; 40];
        for v in &mut values[18..28] {
            *v = 0;
        }
        let (data, w) = columns(&values);
        let img = ImageRgb8::packed(w, 4, 3, &data);
        let band = SearchBand {
            axis: Axis::Vertical,
            index: 1,
            expected: 20,
            start: 15,
            end: 25,
        };
        let line = find_separator(&img, &band, &DetectorParams::default())
            .line
            .expect("black gutter should be found");
        assert_eq!((line.position, line.width), (18, 10));
    }

    #[test]
    fn expansion_is_limited_per_side() {
        let values = vec![5u8; 60];
        let (data, w) = columns(&values);
        let img = ImageRgb8::packed(w, 4, 3, &data);
        let band = SearchBand {
            axis: Axis::Vertical,
            index: 1,
            expected: 30,
            start: 30,
            end: 30,
        };
        let line = find_separator(&img, &band, &DetectorParams::default())
            .line
            .expect("dark band should be found");
        assert_eq!(line.position, 15);
        assert_eq!(line.width, 31);
    }

    #[test]
    fn expansion_stops_at_image_edges() {
        let values = vec![5u8; 6];
        let (data, w) = columns(&values);
        let img = ImageRgb8::packed(w, 4, 3, &data);
        let band = SearchBand {
            axis: Axis::Vertical,
            index: 1,
            expected: 2,
            start: 0,
            end: 5,
        };
        let line = find_separator(&img, &band, &DetectorParams::default())
            .line
            .expect("dark image should be found");
        assert_eq!((line.position, line.width), (0, 6));
    }

    #[test]
    fn rejects_bright_band() {
        let values = vec![25u8; 20];
        let (data, w) = columns(&values);
        let img = ImageRgb8::packed(w, 4, 3, &data);
        let band = SearchBand {
            axis: Axis::Vertical,
            index: 1,
            expected: 10,
            start: 5,
            end: 15,
        };
        let search = find_separator(&img, &band, &DetectorParams::default());
        assert!(search.line.is_none());
        assert_eq!(search.darkest_position, Some(5));
        assert_eq!(search.darkest_brightness, 25.0);
    }
}
