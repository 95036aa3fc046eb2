use std::path::{Path, PathBuf};
use image::codecs::png::PngEncoder;
use image::{ColorType, ImageBuffer, ImageEncoder, Rgb};
use tracing::info;
use crate::errors::ReportError;
use crate::pipeline::aggregator::ScoreSamples;
use crate::utils::output::write_atomic;

pub const EPSS_CHART_FILE: &str = "epss_distribution.png";
pub const CVSS_CHART_FILE: &str = "cvss_distribution.png";
pub const EPSS_BINS: usize = 20;
pub const CVSS_BINS: usize = 10;
pub const CHART_WIDTH: u32 = 800;
pub const CHART_HEIGHT: u32 = 500;

const MARGIN_LEFT: u32 = 60;
const MARGIN_RIGHT: u32 = 20;
const MARGIN_TOP: u32 = 20;
const MARGIN_BOTTOM: u32 = 40;
const GRID_LINES: u32 = 5;

const BACKGROUND: Rgb<u8> = Rgb([0xFF, 0xFF, 0xFF]);
const AXIS: Rgb<u8> = Rgb([0x00, 0x00, 0x00]);
const GRID: Rgb<u8> = Rgb([0xE0, 0xE0, 0xE0]);
const EPSS_FILL: Rgb<u8> = Rgb([0x1F, 0x77, 0xB4]);
const CVSS_FILL: Rgb<u8> = Rgb([0xD6, 0x27, 0x28]);

pub type ChartImage = ImageBuffer<Rgb<u8>, Vec<u8>>;

/// Equal-width bins over the data range.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub min: f64,
    pub max: f64,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Bin `values` into `bins` buckets spanning [min, max] of the finite values.
    /// A single distinct value widens to [v - 0.5, v + 0.5]; no values gives [0, 1].
    /// The upper edge belongs to the last bin.
    pub fn from_samples(values: &[f64], bins: usize) -> Self {
        let bins = bins.max(1);
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();

        let (mut min, mut max) = finite
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        if finite.is_empty() {
            (min, max) = (0.0, 1.0);
        } else if min == max {
            (min, max) = (min - 0.5, max + 0.5);
        }

        let width = (max - min) / bins as f64;
        let mut counts = vec![0usize; bins];
        for v in finite {
            let idx = (((v - min) / width).floor() as usize).min(bins - 1);
            counts[idx] += 1;
        }

        Self { min, max, counts }
    }

    pub fn bin_width(&self) -> f64 {
        (self.max - self.min) / self.counts.len() as f64
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn peak(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

fn fill_rect(img: &mut ChartImage, x0: u32, y0: u32, x1: u32, y1: u32, color: Rgb<u8>) {
    let (w, h) = img.dimensions();
    for y in y0.min(h)..y1.min(h) {
        for x in x0.min(w)..x1.min(w) {
            img.put_pixel(x, y, color);
        }
    }
}

fn outline_rect(img: &mut ChartImage, x0: u32, y0: u32, x1: u32, y1: u32, color: Rgb<u8>) {
    if x1 <= x0 || y1 <= y0 {
        return;
    }
    fill_rect(img, x0, y0, x1, y0 + 1, color);
    fill_rect(img, x0, y1 - 1, x1, y1, color);
    fill_rect(img, x0, y0, x0 + 1, y1, color);
    fill_rect(img, x1 - 1, y0, x1, y1, color);
}

/// Rasterize a histogram: light grid, black axes, one outlined bar per bin and a
/// tick under every bin edge.
pub fn render_histogram(hist: &Histogram, fill: Rgb<u8>, width: u32, height: u32) -> ChartImage {
    let mut img: ChartImage = ImageBuffer::from_pixel(width, height, BACKGROUND);

    let plot_left = MARGIN_LEFT;
    let plot_right = width.saturating_sub(MARGIN_RIGHT).max(plot_left + 1);
    let plot_top = MARGIN_TOP;
    let plot_bottom = height.saturating_sub(MARGIN_BOTTOM).max(plot_top + 1);
    let plot_w = plot_right - plot_left;
    let plot_h = plot_bottom - plot_top;

    for i in 1..=GRID_LINES {
        let y = plot_bottom - plot_h * i / GRID_LINES;
        fill_rect(&mut img, plot_left, y, plot_right, y + 1, GRID);
    }

    let bins = hist.counts.len() as u32;
    let peak = hist.peak();
    for (i, &count) in hist.counts.iter().enumerate() {
        let i = i as u32;
        let x0 = plot_left + plot_w * i / bins;
        let x1 = plot_left + plot_w * (i + 1) / bins;
        if count > 0 && peak > 0 {
            let bar_h = ((plot_h as f64) * count as f64 / peak as f64).round() as u32;
            let y0 = plot_bottom - bar_h.min(plot_h);
            fill_rect(&mut img, x0, y0, x1, plot_bottom, fill);
            outline_rect(&mut img, x0, y0, x1 + 1, plot_bottom, AXIS);
        }
        fill_rect(&mut img, x0, plot_bottom, x0 + 1, plot_bottom + 5, AXIS);
    }
    fill_rect(&mut img, plot_right - 1, plot_bottom, plot_right, plot_bottom + 5, AXIS);

    // axes
    fill_rect(&mut img, plot_left, plot_bottom, plot_right, plot_bottom + 1, AXIS);
    fill_rect(&mut img, plot_left, plot_top, plot_left + 1, plot_bottom + 1, AXIS);

    img
}

pub fn encode_png(img: &ChartImage) -> Result<Vec<u8>, ReportError> {
    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes).write_image(img.as_raw(), img.width(), img.height(), ColorType::Rgb8)?;
    Ok(bytes)
}

/// A chart written to disk.
#[derive(Debug, Clone)]
pub struct RenderedChart {
    pub title: &'static str,
    pub path: PathBuf,
    pub histogram: Histogram,
}

/// Render the EPSS and CVSS histograms into `chart_dir`, creating it when absent.
pub fn write_charts(samples: &ScoreSamples, chart_dir: &Path) -> Result<Vec<RenderedChart>, ReportError> {
    let specs = [
        ("EPSS Score Distribution", EPSS_CHART_FILE, &samples.epss, EPSS_BINS, EPSS_FILL),
        ("CVSS Score Distribution", CVSS_CHART_FILE, &samples.cvss, CVSS_BINS, CVSS_FILL),
    ];

    let mut rendered = Vec::with_capacity(specs.len());
    for (title, file, values, bins, fill) in specs {
        let histogram = Histogram::from_samples(values, bins);
        let img = render_histogram(&histogram, fill, CHART_WIDTH, CHART_HEIGHT);
        let path = chart_dir.join(file);
        write_atomic(&path, &encode_png(&img)?)?;
        info!(path = %path.display(), samples = histogram.total(), bins, "Chart written");
        rendered.push(RenderedChart { title, path, histogram });
    }

    Ok(rendered)
}
