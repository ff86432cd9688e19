//! TUI for musica
//!
//! A list of demos on the left, the live output on the right. The interface
//! owns the scheduler; the audio thread only sees the voice queue.

mod catalog;
mod spectrum;
mod status;
mod waveform;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use musica_dsp::{sequencing::CATALOG, Scheduler};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::{ListState, Paragraph},
    DefaultTerminal, Frame,
};
use rtrb::Consumer;
use std::time::Duration;
use tracing::warn;

use crate::audio::CpalDriver;
use catalog::render_catalog;
use spectrum::{render_spectrum, SpectrumAnalyzer};
use status::{render_status, AudioStats, LastAction};
use waveform::render_waveform;

/// Audio visualization buffer size
const VIS_BUFFER_SIZE: usize = 1024;

pub struct UiApp {
    scheduler: Scheduler<CpalDriver>,
    /// Mono samples copied out of the audio callback
    audio_rx: Consumer<f32>,
    audio_buffer: Vec<f32>,
    spectrum: SpectrumAnalyzer,
    selected: ListState,
    last: LastAction,
    should_quit: bool,
}

impl UiApp {
    pub fn new(scheduler: Scheduler<CpalDriver>, audio_rx: Consumer<f32>) -> Self {
        let sample_rate = scheduler.engine().sample_rate();
        Self {
            scheduler,
            audio_rx,
            audio_buffer: vec![0.0; VIS_BUFFER_SIZE],
            spectrum: SpectrumAnalyzer::new(VIS_BUFFER_SIZE, sample_rate),
            selected: ListState::default().with_selected(Some(0)),
            last: LastAction::None,
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_audio();
            self.spectrum.update(&self.audio_buffer);

            terminal.draw(|frame| self.render(frame))?;

            // ~60fps
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        Ok(())
    }

    /// Keep the last VIS_BUFFER_SIZE samples from the tap
    fn poll_audio(&mut self) {
        let mut received = false;
        while let Ok(sample) = self.audio_rx.pop() {
            self.audio_buffer.push(sample);
            received = true;
        }

        if received && self.audio_buffer.len() > VIS_BUFFER_SIZE {
            let excess = self.audio_buffer.len() - VIS_BUFFER_SIZE;
            self.audio_buffer.drain(0..excess);
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('a') | KeyCode::Char('A') => self.activate(),
            KeyCode::Up | KeyCode::Char('k') => self.selected.select_previous(),
            KeyCode::Down | KeyCode::Char('j') => self.selected.select_next(),
            KeyCode::Enter | KeyCode::Char(' ') => self.play_selected(),
            _ => {}
        }
    }

    fn activate(&mut self) {
        if self.scheduler.is_active() {
            return;
        }
        if let Err(err) = self.scheduler.activate_clock() {
            warn!(error = %err, "audio activation refused");
            self.last = LastAction::Failed(err.to_string());
        }
    }

    fn play_selected(&mut self) {
        let Some(entry) = self
            .selected
            .selected()
            .and_then(|index| CATALOG.get(index.min(CATALOG.len() - 1)))
        else {
            return;
        };

        self.last = match self
            .scheduler
            .dispatch_demo(entry.category.name(), entry.variant)
        {
            Ok(report) => LastAction::Played { entry, report },
            Err(err) => LastAction::Failed(err.to_string()),
        };
    }

    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // Status bar
                Constraint::Min(10),   // Demos and scopes
                Constraint::Length(1), // Help bar
            ])
            .split(area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(40), Constraint::Min(20)])
            .split(rows[1]);

        let scopes = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(columns[1]);

        let stats = AudioStats::from_buffer(&self.audio_buffer);
        render_status(frame, rows[0], &self.scheduler, &stats, &self.last);
        render_catalog(frame, columns[0], &mut self.selected);
        render_waveform(frame, scopes[0], &self.audio_buffer);
        render_spectrum(frame, scopes[1], self.spectrum.data());

        let audio = if self.scheduler.is_active() {
            " Audio active ✔ "
        } else {
            " [A] Enable audio "
        };
        let help = Paragraph::new(format!("{audio} [↑↓] Select  [Enter] Play  [Q] Quit"))
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, rows[2]);
    }
}

