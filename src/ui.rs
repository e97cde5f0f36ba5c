use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use spelling_bees::app::{App, Banner};
use spelling_bees::HighScoreStore;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;
const BEE: &str = "🐝";
/// Every slot is drawn three columns wide: a letter or the bee, then padding.
const SLOT_WIDTH: u16 = 3;

/// Borrowed view of the app that knows how to draw itself.
pub struct GameView<'a, S: HighScoreStore>(pub &'a App<S>);

fn slot_row(app: &App<impl HighScoreStore>) -> Vec<Span<'static>> {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let letter_style = bold_style.fg(Color::Green);
    let bee_style = Style::default().fg(Color::Yellow);

    let Some(round) = app.session.round() else {
        return Vec::new();
    };

    round
        .letters()
        .iter()
        .zip(round.revealed())
        .enumerate()
        .map(|(idx, (letter, revealed))| {
            if *revealed && !app.swarm.is_waiting(idx) {
                Span::styled(format!(" {letter} "), letter_style)
            } else {
                Span::styled(format!("{BEE} "), bee_style)
            }
        })
        .collect()
}

impl<S: HighScoreStore> Widget for GameView<'_, S> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let app = self.0;
        let board = app.board();

        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let dim_style = Style::default().add_modifier(Modifier::DIM);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(1), // scores
                Constraint::Min(1),    // padding
                Constraint::Length(1), // cue
                Constraint::Length(1), // padding
                Constraint::Length(1), // letter slots
                Constraint::Length(1), // padding
                Constraint::Length(1), // input
                Constraint::Length(2), // feedback or banner
                Constraint::Min(1),    // padding
                Constraint::Length(1), // legend
            ])
            .split(area);

        let mut score_line = format!(
            "score {}   best {}",
            app.session.score(),
            app.session.high_score()
        );
        if app.settings.show_attempts {
            if let Some(round) = app.session.round() {
                score_line.push_str(&format!("   attempts {}", round.attempts()));
            }
        }
        Paragraph::new(Span::styled(score_line, dim_style))
            .alignment(Alignment::Right)
            .render(chunks[0], buf);

        Paragraph::new(Span::styled(board.cue.clone(), bold_style))
            .alignment(Alignment::Center)
            .render(chunks[2], buf);

        let slots = slot_row(app);
        let row_width: usize = slots.iter().map(|s| s.content.width()).sum();
        Paragraph::new(Line::from(slots))
            .alignment(Alignment::Center)
            .render(chunks[4], buf);

        let input_style = if app.accepts_input() {
            bold_style
        } else {
            dim_style
        };
        Paragraph::new(Line::from(vec![
            Span::styled("> ", dim_style),
            Span::styled(app.input.clone(), input_style),
            Span::styled("_", dim_style.add_modifier(Modifier::SLOW_BLINK)),
        ]))
        .alignment(Alignment::Center)
        .render(chunks[6], buf);

        let message = match &app.banner {
            Banner::Shown { message } => Some(Span::styled(
                format!("{message}  Press enter for the next word."),
                bold_style.fg(Color::Magenta),
            )),
            _ => board
                .notice
                .clone()
                .map(|notice| Span::styled(notice, italic_style.fg(Color::Red)))
                .or_else(|| {
                    board
                        .feedback_text()
                        .map(|text| Span::styled(text, italic_style.fg(Color::Cyan)))
                }),
        };
        if let Some(message) = message {
            Paragraph::new(message)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .render(chunks[7], buf);
        }

        Paragraph::new(Span::styled(
            "(enter) guess / next   (ctrl+r) reset streak   (esc) quit",
            italic_style,
        ))
        .render(chunks[9], buf);

        render_flights(app, chunks[4], row_width as u16, buf);
    }
}

/// Draw the bees that have taken off, relative to the slot they covered.
fn render_flights(app: &App<impl HighScoreStore>, row: Rect, row_width: u16, buf: &mut Buffer) {
    let start_x = row.x + row.width.saturating_sub(row_width) / 2;
    let bounds = buf.area;

    for flight in app.swarm.flights.iter().filter(|f| f.has_left()) {
        let (dx, dy) = flight.offset();
        // f64 throughout: slot * width overflows u16 on long words
        let x = f64::from(start_x) + flight.slot as f64 * f64::from(SLOT_WIDTH) + dx;
        let y = f64::from(row.y) + dy;
        // the bee is two columns wide and needs both inside the buffer
        if x < f64::from(bounds.left())
            || y < f64::from(bounds.top())
            || x + 1.0 >= f64::from(bounds.right())
            || y >= f64::from(bounds.bottom())
        {
            continue;
        }
        let (x, y) = (x as u16, y as u16);

        let style = if flight.rotation.abs() > 30.0 {
            Style::default().fg(Color::LightYellow)
        } else {
            Style::default().fg(Color::Yellow)
        };
        if let Some(cell) = buf.cell_mut((x, y)) {
            cell.set_symbol(BEE);
            cell.set_style(style);
        }
        // covered by the wide glyph; a stale letter here would bleed through
        if let Some(cell) = buf.cell_mut((x + 1, y)) {
            cell.reset();
        }
    }
}
