use std::iter;

use blockfall_engine::GameStats;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::view::widgets::style;

/// Score, level, lines and the per-lock clear histogram.
pub struct SessionStatsDisplay<'a> {
    stats: &'a GameStats,
    block: Option<BlockWidget<'a>>,
}

impl<'a> SessionStatsDisplay<'a> {
    pub fn new(stats: &'a GameStats) -> Self {
        Self { stats, block: None }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        20 + super::chrome_size(self.block.as_ref()).0
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn height(&self) -> u16 {
        STAT_ROWS.len() as u16 + super::chrome_size(self.block.as_ref()).1
    }
}

#[derive(Clone, Copy)]
enum Row {
    Empty,
    FullLabel(&'static str),
    FullValue(&'static dyn Fn(&GameStats) -> String),
    LabelValue(&'static str, &'static dyn Fn(&GameStats) -> String),
}

const STAT_ROWS: &[Row] = &[
    Row::FullLabel("SCORE:"),
    Row::FullValue(&|stats| stats.score().to_string()),
    Row::Empty,
    Row::LabelValue("LEVEL:", &|stats| stats.level().to_string()),
    Row::LabelValue("LINES:", &|stats| stats.cleared_lines().to_string()),
    Row::LabelValue("SPEED:", &|stats| {
        format!("{}ms", stats.drop_interval().as_millis())
    }),
    Row::Empty,
    Row::LabelValue("PIECES:", &|stats| stats.completed_pieces().to_string()),
    Row::LabelValue("SINGLES:", &|stats| {
        stats.line_cleared_counter()[1].to_string()
    }),
    Row::LabelValue("DOUBLES:", &|stats| {
        stats.line_cleared_counter()[2].to_string()
    }),
    Row::LabelValue("TRIPLES:", &|stats| {
        stats.line_cleared_counter()[3].to_string()
    }),
    Row::LabelValue("QUADS:", &|stats| {
        stats.line_cleared_counter()[4].to_string()
    }),
];

impl Widget for SessionStatsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let style = style::DEFAULT;

        let rows_areas =
            Layout::vertical((0..STAT_ROWS.len()).map(|_| Constraint::Length(1))).split(area);

        for (row, area) in iter::zip(STAT_ROWS.iter().copied(), rows_areas.iter().copied()) {
            match row {
                Row::Empty => {}
                Row::FullLabel(label) => {
                    Line::styled(label, style).left_aligned().render(area, buf);
                }
                Row::FullValue(value) => {
                    Line::styled(value(self.stats), style)
                        .right_aligned()
                        .render(area, buf);
                }
                Row::LabelValue(label, value) => {
                    let [label_area, value_area] = area.layout(&Layout::horizontal([
                        Constraint::Fill(1),
                        Constraint::Fill(1),
                    ]));
                    Line::styled(label, style)
                        .left_aligned()
                        .render(label_area, buf);
                    Line::styled(value(self.stats), style)
                        .right_aligned()
                        .render(value_area, buf);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_to_lines(stats: &GameStats) -> Vec<String> {
        let widget = SessionStatsDisplay::new(stats);
        let area = Rect::new(0, 0, widget.width(), widget.height());
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buf[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect()
    }

    #[test]
    fn test_renders_counters() {
        let mut stats = GameStats::new();
        stats.complete_piece_drop(2);
        stats.add_drop_points(4);

        let lines = render_to_lines(&stats);
        assert_eq!(lines[0].trim_end(), "SCORE:");
        assert_eq!(lines[1].trim_start(), "304");
        assert!(lines[3].starts_with("LEVEL:") && lines[3].ends_with('1'));
        assert!(lines[4].starts_with("LINES:") && lines[4].ends_with('2'));
        assert!(lines[5].ends_with("1000ms"));
        assert!(lines[9].starts_with("DOUBLES:") && lines[9].ends_with('1'));
    }
}
