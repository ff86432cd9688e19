//! Spectrum analyzer widget
//!
//! Hann-windowed FFT of the visualizer buffer, sampled at log-spaced
//! frequencies and plotted against log10(frequency).

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};
use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

/// Number of frequency points to display
const SPECTRUM_BINS: usize = 64;
/// Lowest displayed level
const FLOOR_DB: f64 = -100.0;
/// dB lost per frame when a bin falls
const FALL_DB: f64 = 3.0;

pub struct SpectrumAnalyzer {
    window: Vec<f32>,
    fft: Arc<dyn Fft<f32>>,
    scratch: Vec<Complex<f32>>,
    /// FFT bin for each displayed point
    bin_indices: Vec<usize>,
    /// (log10 Hz, dB) per displayed point
    spectrum: Vec<(f64, f64)>,
}

impl SpectrumAnalyzer {
    pub fn new(buffer_len: usize, sample_rate: f32) -> Self {
        let buffer_len = buffer_len.max(2);
        let fft = FftPlanner::new().plan_fft_forward(buffer_len);

        let denom = (buffer_len - 1) as f32;
        let window = (0..buffer_len)
            .map(|i| 0.5 * (1.0 - (2.0 * std::f32::consts::PI * i as f32 / denom).cos()))
            .collect();

        let nyquist = (sample_rate as f64 / 2.0).clamp(40.0, 20_000.0);
        let (low, high) = (20.0f64.log10(), nyquist.log10());
        let last_bin = buffer_len / 2 - 1;

        let mut bin_indices = Vec::with_capacity(SPECTRUM_BINS);
        let mut spectrum = Vec::with_capacity(SPECTRUM_BINS);
        for i in 0..SPECTRUM_BINS {
            let log_freq = low + (high - low) * i as f64 / (SPECTRUM_BINS - 1) as f64;
            let freq = 10f64.powf(log_freq);
            let index = (freq * buffer_len as f64 / sample_rate as f64).round() as usize;
            bin_indices.push(index.clamp(1, last_bin));
            spectrum.push((log_freq, FLOOR_DB));
        }

        Self {
            window,
            fft,
            scratch: vec![Complex::new(0.0, 0.0); buffer_len],
            bin_indices,
            spectrum,
        }
    }

    /// Analyze `buffer`; ignored unless it matches the FFT size.
    pub fn update(&mut self, buffer: &[f32]) {
        if buffer.len() != self.window.len() {
            return;
        }

        for ((bin, &sample), &w) in self.scratch.iter_mut().zip(buffer).zip(&self.window) {
            *bin = Complex::new(sample * w, 0.0);
        }
        self.fft.process(&mut self.scratch);

        let norm = self.window.len() as f32 / 2.0;
        for (point, &index) in self.spectrum.iter_mut().zip(&self.bin_indices) {
            let magnitude = (self.scratch[index].norm() / norm).max(1e-6);
            let db = (20.0 * (magnitude as f64).log10()).max(FLOOR_DB);
            // Rise immediately, fall slowly
            point.1 = db.max(point.1 - FALL_DB);
        }
    }

    pub fn data(&self) -> &[(f64, f64)] {
        &self.spectrum
    }
}

pub fn render_spectrum(frame: &mut Frame, area: Rect, spectrum: &[(f64, f64)]) {
    let (low, high) = match (spectrum.first(), spectrum.last()) {
        (Some(first), Some(last)) => (first.0, last.0),
        _ => (1.0, 4.0),
    };

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Green))
        .data(spectrum);

    let chart = Chart::new(vec![dataset])
        .block(Block::default().title(" Spectrum ").borders(Borders::ALL))
        .x_axis(
            Axis::default()
                .bounds([low, high])
                .labels(vec!["20", "200", "2k", "20k"])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([FLOOR_DB, 0.0])
                .labels(vec!["-100", "-50", "0"])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
