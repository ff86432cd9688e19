//! Status bar widget - audio state, clock, voices, levels and the last dispatch

use musica_dsp::{sequencing::DemoEntry, DispatchReport, Scheduler};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::audio::CpalDriver;

/// Audio statistics for display
pub struct AudioStats {
    pub peak: f32,
    pub rms: f32,
}

impl AudioStats {
    /// Compute audio stats from a buffer
    pub fn from_buffer(buffer: &[f32]) -> Self {
        if buffer.is_empty() {
            return Self { peak: 0.0, rms: 0.0 };
        }
        let peak = buffer.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
        let rms = (buffer.iter().map(|&x| x * x).sum::<f32>() / buffer.len() as f32).sqrt();
        Self { peak, rms }
    }
}

/// Outcome of the most recent key action
pub enum LastAction {
    None,
    Played {
        entry: &'static DemoEntry,
        report: DispatchReport,
    },
    Failed(String),
}

pub fn render_status(
    frame: &mut Frame,
    area: Rect,
    scheduler: &Scheduler<CpalDriver>,
    audio_stats: &AudioStats,
    last: &LastAction,
) {
    let block = Block::default().title(" musica ").borders(Borders::ALL);
    let engine = scheduler.engine();

    let clock = match scheduler.now() {
        Some(now) => Span::styled(
            format!("▶ Audio on  t={:.2}s  ", now),
            Style::default().fg(Color::Green),
        ),
        None => Span::styled(
            "⏸ Audio off (press A)  ".to_string(),
            Style::default().fg(Color::Yellow),
        ),
    };

    let (active, dropped) = engine
        .stats()
        .map(|stats| (stats.active_voices(), stats.dropped_voices()))
        .unwrap_or_default();

    let engine_line = Line::from(vec![
        Span::styled(
            format!(" BPM: {:.0}  ", scheduler.demo_config().bpm),
            Style::default().fg(Color::Cyan),
        ),
        clock,
        Span::styled(
            format!("{:.1}kHz  ", engine.sample_rate() / 1000.0),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("Voices: {}/{}  ", active, engine.config().max_voices),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("Dropped: {}  ", dropped),
            Style::default().fg(if dropped > 0 {
                Color::Red
            } else {
                Color::DarkGray
            }),
        ),
        Span::styled(
            format!("Peak: {:.2}  RMS: {:.2}", audio_stats.peak, audio_stats.rms),
            Style::default().fg(Color::Magenta),
        ),
    ]);

    let last_line = match last {
        LastAction::None => Line::from(Span::styled(
            " Pick a demo and press Enter",
            Style::default().fg(Color::DarkGray),
        )),
        LastAction::Played { entry, report } => Line::from(vec![
            Span::styled(
                format!(" {} / {}  ", entry.category, entry.variant),
                Style::default().fg(Color::Cyan),
            ),
            Span::raw(format!(
                "at {:.2}s: {} scheduled, {} skipped, {:.2}s long",
                report.anchor, report.scheduled, report.skipped, report.span
            )),
        ]),
        LastAction::Failed(reason) => Line::from(Span::styled(
            format!(" {}", reason),
            Style::default().fg(Color::Red),
        )),
    };

    let paragraph = Paragraph::new(vec![engine_line, last_line]).block(block);
    frame.render_widget(paragraph, area);
}
