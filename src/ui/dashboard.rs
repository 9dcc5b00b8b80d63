// Main screen: folder list, encode settings and a preview of the selection

use crate::config::Config;
use crate::ui::components::{Footer, accent_color, render_choice};
use crate::ui::state::{Section, StatusKind, UiState, format_duration};
use chrono::{DateTime, Local};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table, TableState, Widget},
};

pub struct Dashboard;

impl Dashboard {
    pub fn render(frame: &mut Frame, state: &UiState, config: &Config) {
        let accent = accent_color(&config.ui.theme);
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(6),    // Folders + side panels
                Constraint::Length(1), // Status
                Constraint::Length(1), // Footer
            ])
            .split(area);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(chunks[1]);

        let side = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(6), Constraint::Min(6)])
            .split(body[1]);

        Self::render_header(frame, chunks[0], config, accent);
        Self::render_folders(frame, body[0], state, config, accent);
        Self::render_settings(frame, side[0], state, config, accent);
        Self::render_preview(frame, side[1], state);
        Self::render_status(frame, chunks[2], state);
        Footer::main().render(chunks[3], frame.buffer_mut());
    }

    fn section_block(title: &str, focused: bool, accent: Color) -> Block<'_> {
        let border = if focused {
            Style::default().fg(accent)
        } else {
            Style::default().fg(Color::White)
        };
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(title)
    }

    fn render_header(frame: &mut Frame, area: Rect, config: &Config, accent: Color) {
        let line = Line::from(vec![
            Span::styled("frogmpeg", Style::default().fg(accent).bold()),
            Span::raw("  |  "),
            Span::raw(config.project_name.clone()),
            Span::raw("  |  "),
            Span::styled(
                config.renders_folder.display().to_string(),
                Style::default().fg(Color::Gray),
            ),
        ]);
        let header = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(header, area);
    }

    fn render_folders(
        frame: &mut Frame,
        area: Rect,
        state: &UiState,
        config: &Config,
        accent: Color,
    ) {
        let focused = state.section == Section::Folders;
        let block = Self::section_block("Render Folders", focused, accent);

        if state.folders.is_empty() {
            let empty = Paragraph::new("No image sequences found. Press [R] to rescan.")
                .style(Style::default().fg(Color::Gray))
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let show_count = config.ui.show_file_count;
        let mut header_cells = vec!["FOLDER"];
        let mut widths = vec![Constraint::Min(16)];
        if show_count {
            header_cells.push("FILES");
            widths.push(Constraint::Length(7));
        }
        header_cells.push("MODIFIED");
        widths.push(Constraint::Length(16));

        let header = Row::new(header_cells)
            .style(Style::default().add_modifier(Modifier::BOLD))
            .bottom_margin(1);

        let rows = state.folders.iter().map(|folder| {
            let modified = DateTime::<Local>::from(folder.modified)
                .format("%Y-%m-%d %H:%M")
                .to_string();
            let mut cells = vec![folder.name.clone()];
            if show_count {
                cells.push(folder.file_count.to_string());
            }
            cells.push(modified);
            Row::new(cells)
        });

        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .column_spacing(2)
            .row_highlight_style(Style::default().fg(accent).reversed())
            .highlight_symbol(">> ");

        let mut table_state = TableState::default().with_selected(state.selected_folder);
        frame.render_stateful_widget(table, area, &mut table_state);
    }

    fn render_settings(
        frame: &mut Frame,
        area: Rect,
        state: &UiState,
        config: &Config,
        accent: Color,
    ) {
        let focused = matches!(state.section, Section::Presets | Section::Extensions);
        let block = Self::section_block("Settings", focused, accent);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        let preset = state
            .selected_preset_entry()
            .map(|p| p.name.as_str())
            .unwrap_or("-");
        let buf = frame.buffer_mut();
        render_choice(
            "Preset",
            preset,
            state.section == Section::Presets,
            accent,
            rows[0],
            buf,
        );
        render_choice(
            "Extension",
            state.selected_extension_entry(),
            state.section == Section::Extensions,
            accent,
            rows[1],
            buf,
        );

        let encoder = Self::encoder_line(config.encoding.use_gpu, state.gpu_available);
        buf.set_line(rows[2].x, rows[2].y, &encoder, rows[2].width);
    }

    fn encoder_line(use_gpu: bool, gpu_available: Option<bool>) -> Line<'static> {
        let (text, color) = match (use_gpu, gpu_available) {
            (false, _) => ("CPU (libx264)".to_string(), Color::White),
            (true, Some(false)) => (
                "NVENC not detected, CPU fallback".to_string(),
                Color::Yellow,
            ),
            (true, _) => ("GPU (h264_nvenc)".to_string(), Color::Green),
        };
        Line::from(vec![
            Span::raw(format!("{:<11}", "Encoder")),
            Span::styled(text, Style::default().fg(color)),
        ])
    }

    fn render_preview(frame: &mut Frame, area: Rect, state: &UiState) {
        let block = Block::default().borders(Borders::ALL).title("Preview");

        let lines = match (state.selected_folder_entry(), state.selected_preset_entry()) {
            (Some(folder), Some(preset)) => {
                let label = Style::default().fg(Color::Gray);
                vec![
                    Line::from(vec![
                        Span::styled("Folder:     ", label),
                        Span::raw(folder.name.clone()),
                    ]),
                    Line::from(vec![
                        Span::styled("Frames:     ", label),
                        Span::raw(folder.file_count.to_string()),
                    ]),
                    Line::from(vec![
                        Span::styled("Duration:   ", label),
                        Span::raw(format!(
                            "{} @ {}fps",
                            format_duration(folder.file_count, preset.fps),
                            preset.fps
                        )),
                    ]),
                    Line::from(vec![
                        Span::styled("Resolution: ", label),
                        Span::raw(preset.resolution.to_string()),
                    ]),
                    Line::from(vec![
                        Span::styled("Bitrate:    ", label),
                        Span::raw(preset.bitrate.clone()),
                    ]),
                ]
            }
            _ => vec![Line::from(Span::styled(
                "Select a folder to preview",
                Style::default().fg(Color::Gray),
            ))],
        };

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_status(frame: &mut Frame, area: Rect, state: &UiState) {
        let Some(status) = &state.status else {
            return;
        };
        let color = match status.kind {
            StatusKind::Info => Color::White,
            StatusKind::Success => Color::Green,
            StatusKind::Error => Color::Red,
        };
        let line = Paragraph::new(status.text.clone()).style(Style::default().fg(color));
        frame.render_widget(line, area);
    }
}
