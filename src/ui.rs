use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, Padding, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, InputMode};
use crate::effects::RowEffectKind;
use crate::item::TodoItem;
use crate::theme::{Palette, glyphs, lerp_color};

/// How far a freshly added row starts to the left of its resting place.
const SLIDE_IN_COLUMNS: f32 = 4.0;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &mut App) {
    let palette = *app.palette();

    // Clear with background color
    let bg_block = Block::default().style(Style::default().bg(palette.bg_dark));
    frame.render_widget(bg_block, frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(5), // Input
            Constraint::Min(1),    // Checklist
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    draw_input(frame, app, chunks[0]);
    draw_list(frame, app, chunks[1]);
    draw_status_bar(frame, app, chunks[2]);

    // Draw command palette if in command mode
    if app.input_mode() == InputMode::Command {
        draw_command_palette(frame, &palette);
    }
}

fn draw_input(frame: &mut Frame, app: &App, area: Rect) {
    let palette = app.palette();
    let mode = app.input_mode();
    let command_line = if mode == InputMode::Command {
        app.command_text()
    } else {
        None
    };

    let (mode_text, mode_style, border_style, prompt_char) = match mode {
        InputMode::Normal => (
            " NORMAL ",
            palette.mode_normal(),
            Style::default().fg(palette.text_muted),
            "│",
        ),
        InputMode::Insert => (
            " INSERT ",
            palette.mode_insert(),
            Style::default().fg(palette.green),
            "❯",
        ),
        InputMode::Command => (
            " COMMAND ",
            palette.mode_command(),
            Style::default().fg(palette.yellow),
            ":",
        ),
    };

    // Build input content with prompt
    let input_content = match mode {
        InputMode::Insert | InputMode::Normal => vec![
            Span::styled(
                format!(" {prompt_char} "),
                Style::default().fg(palette.primary),
            ),
            Span::styled(app.draft_text(), Style::default().fg(palette.text_primary)),
        ],
        InputMode::Command => {
            let Some(command_line) = command_line else {
                return;
            };
            vec![
                Span::styled(" : ", Style::default().fg(palette.yellow)),
                Span::styled(command_line, Style::default().fg(palette.text_primary)),
            ]
        }
    };

    // Key hints based on mode
    let hints = match mode {
        InputMode::Normal => vec![
            Span::styled("i", palette.key_highlight()),
            Span::styled(" type  ", palette.key_hint()),
            Span::styled("space", palette.key_highlight()),
            Span::styled(" check  ", palette.key_hint()),
            Span::styled(":", palette.key_highlight()),
            Span::styled(" command  ", palette.key_hint()),
            Span::styled("q", palette.key_highlight()),
            Span::styled(" quit ", palette.key_hint()),
        ],
        InputMode::Insert => vec![
            Span::styled("Enter", palette.key_highlight()),
            Span::styled(" add  ", palette.key_hint()),
            Span::styled("Esc", palette.key_highlight()),
            Span::styled(" normal ", palette.key_hint()),
        ],
        InputMode::Command => vec![
            Span::styled("Enter", palette.key_highlight()),
            Span::styled(" execute  ", palette.key_hint()),
            Span::styled("Esc", palette.key_highlight()),
            Span::styled(" cancel ", palette.key_hint()),
        ],
    };

    let input = Paragraph::new(Line::from(input_content)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(Line::from(vec![Span::styled(mode_text, mode_style)]))
            .title_bottom(Line::from(hints).alignment(Alignment::Right))
            .padding(Padding::vertical(1)),
    );

    frame.render_widget(input, area);

    // Show cursor in insert mode
    if mode == InputMode::Insert {
        // Calculate cursor position using display width (handles Unicode properly)
        let text_before_cursor: String =
            app.draft_text().chars().take(app.draft_cursor()).collect();
        let cursor_x = area.x + 4 + text_before_cursor.width() as u16;
        let cursor_y = area.y + 2;
        frame.set_cursor_position((cursor_x, cursor_y));
    } else if mode == InputMode::Command {
        let Some(command_line) = command_line else {
            return;
        };
        let cursor_x = area.x + 4 + command_line.width() as u16;
        let cursor_y = area.y + 2;
        frame.set_cursor_position((cursor_x, cursor_y));
    }
}

fn draw_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let palette = *app.palette();

    let list_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.text_muted))
        .padding(Padding::horizontal(1))
        .title(Line::from(vec![Span::styled(
            " Checklist ",
            Style::default()
                .fg(palette.text_primary)
                .add_modifier(Modifier::BOLD),
        )]));

    // Show welcome screen if the list is empty
    if app.list().is_empty() {
        let welcome = create_welcome_screen(&palette);
        frame.render_widget(welcome.block(list_block), area);
        return;
    }

    let rows: Vec<ListItem> = app
        .list()
        .items()
        .iter()
        .map(|item| render_row(app, item, &palette))
        .collect();

    let list = List::new(rows)
        .block(list_block)
        .highlight_style(Style::default().bg(palette.bg_highlight))
        .highlight_symbol(glyphs::SELECTOR);

    frame.render_stateful_widget(list, area, app.selection_mut());
}

/// Render a single row: checkbox glyph plus title, with the row's animation
/// applied. Pure function of the item, its effect state, and the palette.
fn render_row(app: &App, item: &TodoItem, palette: &Palette) -> ListItem<'static> {
    let effect = app.row_effect(item.id());

    // Freshly added rows slide in from the left.
    let indent = match effect {
        Some(effect) if effect.kind() == RowEffectKind::SlideIn => {
            ((1.0 - effect.eased_progress()) * SLIDE_IN_COLUMNS).round() as usize
        }
        _ => 0,
    };

    let (checkbox, checkbox_style, title_style) = if item.is_completed() {
        // Completed rows fade toward the muted color while the removal
        // timer runs.
        let fade = match effect {
            Some(effect) if effect.kind() == RowEffectKind::FadeOut => effect.eased_progress(),
            _ => 1.0,
        };
        let faded = lerp_color(palette.text_primary, palette.text_muted, fade);
        (
            glyphs::CHECKED,
            Style::default().fg(lerp_color(palette.green, palette.text_muted, fade)),
            Style::default().fg(faded).add_modifier(Modifier::CROSSED_OUT),
        )
    } else {
        (
            glyphs::UNCHECKED,
            Style::default().fg(palette.text_muted),
            Style::default().fg(palette.text_primary),
        )
    };

    let line = Line::from(vec![
        Span::raw(" ".repeat(indent)),
        Span::styled(checkbox.to_string(), checkbox_style),
        Span::raw(" "),
        Span::styled(item.title().to_string(), title_style),
    ]);

    ListItem::new(line)
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let palette = app.palette();

    let (status_text, status_style) = if let Some(msg) = app.status_message() {
        (msg.to_string(), Style::default().fg(palette.yellow))
    } else {
        (
            format!(
                "● {} open │ {} done",
                app.list().open_count(),
                app.list().done_count()
            ),
            Style::default().fg(palette.green),
        )
    };

    let count_str = format!("{} items", app.list().len());

    let status = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        Span::styled(status_text, status_style),
    ]));

    // Item count on the right side
    let count_width = count_str.len() as u16 + 2;
    let status_area = Rect {
        x: area.x,
        y: area.y,
        width: area.width.saturating_sub(count_width),
        height: area.height,
    };
    let count_area = Rect {
        x: area.x + area.width.saturating_sub(count_width),
        y: area.y,
        width: count_width,
        height: area.height,
    };

    frame.render_widget(status, status_area);

    let count_widget = Paragraph::new(Line::from(vec![
        Span::styled(count_str, Style::default().fg(palette.text_muted)),
        Span::raw(" "),
    ]))
    .alignment(Alignment::Right);

    frame.render_widget(count_widget, count_area);
}

fn draw_command_palette(frame: &mut Frame, palette: &Palette) {
    let area = frame.area();

    // Center the palette
    let palette_width = 44.min(area.width.saturating_sub(4));
    let palette_height = 7;

    let palette_area = Rect {
        x: (area.width.saturating_sub(palette_width)) / 2,
        y: area.height / 3,
        width: palette_width,
        height: palette_height,
    };

    // Clear background
    frame.render_widget(Clear, palette_area);

    let commands = vec![
        ("q, quit", "Exit the application"),
        ("clear", "Empty the checklist"),
        ("help", "Show available commands"),
    ];

    let mut lines: Vec<Line> = vec![Line::from("")];

    for (cmd, desc) in commands {
        lines.push(Line::from(vec![
            Span::styled(format!("  :{cmd}"), Style::default().fg(palette.peach)),
            Span::styled(format!("  {desc}"), Style::default().fg(palette.text_muted)),
        ]));
    }

    let popup = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(palette.primary))
            .style(Style::default().bg(palette.bg_panel))
            .title(Line::from(vec![Span::styled(
                " Commands ",
                Style::default()
                    .fg(palette.text_primary)
                    .add_modifier(Modifier::BOLD),
            )])),
    );

    frame.render_widget(popup, palette_area);
}

fn create_welcome_screen(palette: &Palette) -> Paragraph<'static> {
    let lines = vec![
        Line::from(""),
        Line::from(vec![Span::styled(
            "  Nothing to do yet.",
            Style::default()
                .fg(palette.text_primary)
                .add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                "    i",
                Style::default()
                    .fg(palette.green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "      Start typing a task",
                Style::default().fg(palette.text_secondary),
            ),
        ]),
        Line::from(vec![
            Span::styled(
                "    Enter",
                Style::default()
                    .fg(palette.green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "  Add it to the list",
                Style::default().fg(palette.text_secondary),
            ),
        ]),
        Line::from(vec![
            Span::styled(
                "    space",
                Style::default()
                    .fg(palette.yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "  Check a task off",
                Style::default().fg(palette.text_secondary),
            ),
        ]),
        Line::from(vec![
            Span::styled(
                "    q",
                Style::default()
                    .fg(palette.red)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("      Quit", Style::default().fg(palette.text_secondary)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Tip: ", Style::default().fg(palette.text_muted)),
            Span::styled("checked tasks fade out", Style::default().fg(palette.peach)),
            Span::styled(" after a moment", Style::default().fg(palette.text_muted)),
        ]),
    ];

    Paragraph::new(lines).alignment(Alignment::Left)
}
