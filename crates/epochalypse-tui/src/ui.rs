//! Rendering

use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;

use crate::form::{Focus, Form};

const HINTS: &str = " Enter: apply  Tab: next  Ctrl-C: quit ";

fn field_style(focused: bool) -> Style {
    let style = Style::default().fg(Color::White).bg(Color::Blue);
    if focused {
        style.add_modifier(Modifier::BOLD)
    } else {
        style
    }
}

fn button_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Blue).bg(Color::White)
    } else {
        Style::default().fg(Color::White).bg(Color::Blue)
    }
}

/// Draw the whole form into the frame
pub fn draw(frame: &mut Frame, form: &Form) {
    let mut block = Block::bordered().title(Line::from(form.title()).left_aligned());
    if form.show_hints() {
        block = block.title_bottom(Line::from(HINTS).right_aligned());
    }
    let area = frame.area();
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = form.inputs().len() + 1;
    let layout = Layout::vertical(
        std::iter::repeat(Constraint::Length(1))
            .take(rows)
            .chain(std::iter::once(Constraint::Fill(1))),
    )
    .spacing(form.row_spacing())
    .split(inner);

    for (index, input) in form.inputs().iter().enumerate() {
        let focused = form.focus() == Focus::Input(index);
        let row = layout[index];
        let label_width = form.label_width();
        let (shown, column) = input.visible();

        let width = usize::from(input.width());
        let line = Line::from(vec![
            Span::raw(format!("{:<w$}", input.label(), w = usize::from(label_width))),
            Span::styled(format!("{shown:<width$}"), field_style(focused)),
        ]);
        frame.render_widget(Paragraph::new(line), row);

        if focused {
            if let Some(position) = cursor_position(row, label_width + column) {
                frame.set_cursor_position(position);
            }
        }
    }

    let focused = form.focus() == Focus::Button;
    let button = Line::from(Span::styled(
        format!(" {} ", form.button_label()),
        button_style(focused),
    ));
    frame.render_widget(Paragraph::new(button), layout[rows - 1]);
}

/// Cursor cell inside `row`, if the row is wide enough to show it
fn cursor_position(row: Rect, offset: u16) -> Option<Position> {
    let x = row.x.checked_add(offset)?;
    (x < row.right()).then_some(Position { x, y: row.y })
}
