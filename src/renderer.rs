use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;

use crate::config::{Board, PALETTE, WINDOW_TITLE};
use crate::food::Food;
use crate::game::Game;
use crate::grid::Cell;
use crate::snake::Snake;

const GLYPH_HEAD: &str = "●";
const GLYPH_FILL: &str = " ";

/// How a filled cell is painted.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum CellStyle {
    Body,
    /// Snake head, drawn with an emphasised border.
    Head,
    Food,
}

/// Drawing surface addressed in grid cells.
pub trait Canvas {
    fn fill_cell(&mut self, cell: Cell, style: CellStyle);

    /// Paints `cell` with the board background.
    fn erase_cell(&mut self, cell: Cell);
}

/// Draws one frame of the scene onto `canvas`.
///
/// The vacated tail is erased first so a head that moved onto it stays
/// visible.
pub fn draw_scene<C: Canvas + ?Sized>(canvas: &mut C, snake: &Snake, food: &Food) {
    if let Some(vacated) = snake.last_vacated() {
        canvas.erase_cell(vacated);
    }

    for segment in snake.occupied_cells().skip(1) {
        canvas.fill_cell(segment, CellStyle::Body);
    }
    canvas.fill_cell(snake.head(), CellStyle::Head);
    canvas.fill_cell(food.position, CellStyle::Food);
}

/// Canvas that maps each grid cell to one terminal character.
pub struct TerminalCanvas<'a> {
    buffer: &'a mut Buffer,
    inner: Rect,
    board: Board,
}

impl<'a> TerminalCanvas<'a> {
    #[must_use]
    pub fn new(buffer: &'a mut Buffer, inner: Rect, board: Board) -> Self {
        Self {
            buffer,
            inner,
            board,
        }
    }

    fn paint(&mut self, cell: Cell, glyph: &str, style: Style) {
        let Some((x, y)) = grid_to_terminal(self.inner, self.board, cell) else {
            return;
        };
        self.buffer.set_string(x, y, glyph, style);
    }
}

impl Canvas for TerminalCanvas<'_> {
    fn fill_cell(&mut self, cell: Cell, style: CellStyle) {
        match style {
            CellStyle::Body => self.paint(cell, GLYPH_FILL, Style::new().bg(PALETTE.snake)),
            CellStyle::Head => self.paint(
                cell,
                GLYPH_HEAD,
                Style::new()
                    .fg(PALETTE.border)
                    .bg(PALETTE.snake)
                    .add_modifier(Modifier::BOLD),
            ),
            CellStyle::Food => self.paint(cell, GLYPH_FILL, Style::new().bg(PALETTE.food)),
        }
    }

    fn erase_cell(&mut self, cell: Cell) {
        self.paint(cell, GLYPH_FILL, Style::new().bg(PALETTE.background));
    }
}

/// Renders the full game frame from immutable state.
///
/// When the frame cannot hold the whole board, a resize notice is drawn
/// instead of a clipped board.
pub fn render(frame: &mut Frame<'_>, game: &Game) {
    let board = game.board();
    let area = frame.area();
    if !board_fits(area, board) {
        render_too_small(frame, area, board);
        return;
    }

    let play_area = play_area(area, board);
    let block = Block::bordered()
        .title(WINDOW_TITLE)
        .border_style(Style::new().fg(PALETTE.border))
        .style(Style::new().bg(PALETTE.background));

    let inner = block.inner(play_area);
    frame.render_widget(block, play_area);

    let mut canvas = TerminalCanvas::new(frame.buffer_mut(), inner, board);
    draw_scene(&mut canvas, &game.snake, &game.food);
}

/// Terminal columns and rows needed for the board plus its border.
#[must_use]
pub fn required_size(board: Board) -> (u16, u16) {
    (
        board.columns().saturating_add(2),
        board.rows().saturating_add(2),
    )
}

/// Whether `area` holds every cell of `board` inside the border.
#[must_use]
pub fn board_fits(area: Rect, board: Board) -> bool {
    let (width, height) = required_size(board);
    area.width >= width && area.height >= height
}

fn render_too_small(frame: &mut Frame<'_>, area: Rect, board: Board) {
    let (width, height) = required_size(board);
    let lines = vec![
        Line::from("Terminal too small"),
        Line::from(format!("need {width}x{height}, have {}x{}", area.width, area.height)),
    ];

    let [_, row, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(2),
        Constraint::Fill(1),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::new().fg(PALETTE.border)),
        row,
    );
}

fn play_area(area: Rect, board: Board) -> Rect {
    let (width, height) = required_size(board);
    Rect {
        x: area.x,
        y: area.y,
        width,
        height,
    }
}

fn grid_to_terminal(inner: Rect, board: Board, cell: Cell) -> Option<(u16, u16)> {
    let x_offset = u16::try_from(cell.column(board)).ok()?;
    let y_offset = u16::try_from(cell.row(board)).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x >= inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;
    use ratatui::layout::Rect;
    use ratatui::Terminal;

    use crate::config::{Board, PALETTE};
    use crate::food::Food;
    use crate::game::Game;
    use crate::grid::Cell;
    use crate::input::Direction;
    use crate::snake::Snake;

    use super::{board_fits, draw_scene, render, required_size, Canvas, CellStyle, TerminalCanvas};

    #[derive(Debug, Clone, Copy, Eq, PartialEq)]
    enum Op {
        Fill(Cell, CellStyle),
        Erase(Cell),
    }

    #[derive(Default)]
    struct RecordingCanvas {
        ops: Vec<Op>,
    }

    impl Canvas for RecordingCanvas {
        fn fill_cell(&mut self, cell: Cell, style: CellStyle) {
            self.ops.push(Op::Fill(cell, style));
        }

        fn erase_cell(&mut self, cell: Cell) {
            self.ops.push(Op::Erase(cell));
        }
    }

    #[test]
    fn scene_draws_body_head_and_food_once_each() {
        let snake = Snake::from_segments(
            Cell::new(0, 0),
            vec![Cell::new(20, 0), Cell::new(10, 0), Cell::new(0, 0)],
            Direction::Right,
        );
        let food = Food::new(Cell::new(50, 50));
        let mut canvas = RecordingCanvas::default();

        draw_scene(&mut canvas, &snake, &food);

        assert_eq!(
            canvas.ops,
            vec![
                Op::Fill(Cell::new(10, 0), CellStyle::Body),
                Op::Fill(Cell::new(0, 0), CellStyle::Body),
                Op::Fill(Cell::new(20, 0), CellStyle::Head),
                Op::Fill(Cell::new(50, 50), CellStyle::Food),
            ]
        );
    }

    #[test]
    fn vacated_tail_is_erased_before_drawing() {
        let board = Board::new(100, 100, 10).expect("test board should be valid");
        let mut snake = Snake::new(Cell::new(0, 0), Direction::Right);
        snake.advance(board, &mut rand::thread_rng());
        let mut canvas = RecordingCanvas::default();

        draw_scene(&mut canvas, &snake, &Food::new(Cell::new(90, 90)));

        assert_eq!(canvas.ops[0], Op::Erase(Cell::new(0, 0)));
        assert_eq!(canvas.ops[1], Op::Fill(Cell::new(10, 0), CellStyle::Head));
    }

    #[test]
    fn terminal_canvas_maps_pixels_to_characters() {
        let board = Board::new(100, 50, 10).expect("test board should be valid");
        let inner = Rect::new(1, 1, 10, 5);
        let mut buffer = Buffer::empty(Rect::new(0, 0, 12, 7));

        {
            let mut canvas = TerminalCanvas::new(&mut buffer, inner, board);
            canvas.fill_cell(Cell::new(30, 20), CellStyle::Food);
            canvas.fill_cell(Cell::new(90, 40), CellStyle::Head);
        }

        assert_eq!(buffer[(4, 3)].bg, PALETTE.food);
        assert_eq!(buffer[(10, 5)].symbol(), "●");
    }

    #[test]
    fn render_draws_head_inside_border() {
        let board = Board::new(100, 60, 20).expect("test board should be valid");
        let game = Game::new_with_seed(board, 1);
        let mut terminal =
            Terminal::new(TestBackend::new(20, 10)).expect("test terminal should build");

        terminal
            .draw(|frame| render(frame, &game))
            .expect("draw should succeed");

        // Head at pixel (40, 20) is column 2, row 1 inside a one-cell border.
        let buffer = terminal.backend().buffer();
        assert_eq!(buffer[(3, 2)].symbol(), "●");
        assert_eq!(buffer[(3, 2)].bg, PALETTE.snake);
    }

    #[test]
    fn default_board_needs_more_than_24_rows() {
        let board = Board::default();

        assert_eq!(required_size(board), (34, 26));
        assert!(!board_fits(Rect::new(0, 0, 80, 24), board));
        assert!(board_fits(Rect::new(0, 0, 80, 26), board));
    }

    #[test]
    fn small_terminal_shows_notice_instead_of_clipped_board() {
        let mut game = Game::new_with_seed(Board::default(), 3);
        game.food = Food::new(Cell::new(100, 460));
        let mut terminal =
            Terminal::new(TestBackend::new(80, 24)).expect("test terminal should build");

        terminal
            .draw(|frame| render(frame, &game))
            .expect("draw should succeed");

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|cell| cell.symbol()).collect();
        assert!(text.contains("Terminal too small"));
        assert!(text.contains("need 34x26, have 80x24"));
        assert!(buffer.content().iter().all(|cell| cell.bg != PALETTE.food));
    }

    #[test]
    fn bottom_row_food_is_visible_when_terminal_fits() {
        let mut game = Game::new_with_seed(Board::default(), 3);
        game.food = Food::new(Cell::new(100, 460));
        let mut terminal =
            Terminal::new(TestBackend::new(80, 26)).expect("test terminal should build");

        terminal
            .draw(|frame| render(frame, &game))
            .expect("draw should succeed");

        // Column 5, row 23 inside a one-cell border.
        assert_eq!(terminal.backend().buffer()[(6, 24)].bg, PALETTE.food);
    }
}
