use std::fmt::{Debug, Display};

use super::EngineError;

pub const SIZE: usize = 3;
const CELLS: usize = SIZE * SIZE;

// 3 rows, 3 columns, 2 diagonals; indices are row-major
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/*====================================================================================================================*/

/// Human is the minimizer, Machine the maximizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    Human,
    Machine,
}

impl Player {
    pub fn symbol(&self) -> char {
        match self {
            Player::Human => 'O',
            Player::Machine => 'X',
        }
    }
}

// flip the player, i.e. Human -> Machine and Machine -> Human
impl std::ops::Not for Player {
    type Output = Player;

    fn not(self) -> Self::Output {
        match self {
            Player::Human => Player::Machine,
            Player::Machine => Player::Human,
        }
    }
}

impl Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Player::Human => write!(f, "Human"),
            Player::Machine => write!(f, "Machine"),
        }
    }
}

/*====================================================================================================================*/

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Occupied(Player),
}

impl Cell {
    pub fn symbol(&self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Occupied(player) => player.symbol(),
        }
    }
}

/*====================================================================================================================*/

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Move {
    // row-major cell index, always < 9
    data: u8,
}

impl Move {
    pub fn new(row: usize, col: usize) -> Result<Self, EngineError> {
        if row >= SIZE || col >= SIZE {
            return Err(EngineError::OutOfRange { row, col });
        }

        Ok(Move {
            data: (row * SIZE + col) as u8,
        })
    }

    pub(crate) fn from_index(index: usize) -> Self {
        debug_assert!(index < CELLS, "Cell index needs to be smaller than 9");

        Move { data: index as u8 }
    }

    pub fn index(&self) -> usize {
        self.data as usize
    }

    pub fn row(&self) -> usize {
        self.index() / SIZE
    }

    pub fn col(&self) -> usize {
        self.index() % SIZE
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row(), self.col())
    }
}

impl Debug for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Move({}, {})", self.row(), self.col())
    }
}

/*====================================================================================================================*/

/// Derived from the grid on demand, never stored next to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameState {
    InProgress,
    Won(Player),
    Draw,
}

impl GameState {
    pub fn is_terminal(&self) -> bool {
        *self != GameState::InProgress
    }
}

impl Display for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameState::InProgress => write!(f, "Game in progress"),
            GameState::Won(player) => write!(f, "{} wins!", player),
            GameState::Draw => write!(f, "It's a draw!"),
        }
    }
}

/*====================================================================================================================*/

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Cell; CELLS],
}

impl Board {
    pub fn new() -> Self {
        Board {
            cells: [Cell::Empty; CELLS],
        }
    }

    pub(crate) fn from_cells(cells: [Cell; CELLS]) -> Self {
        Board { cells }
    }

    pub fn cells(&self) -> &[Cell; CELLS] {
        &self.cells
    }

    pub fn cell(&self, move_: Move) -> Cell {
        self.cells[move_.index()]
    }

    pub fn get(&self, row: usize, col: usize) -> Result<Cell, EngineError> {
        Ok(self.cell(Move::new(row, col)?))
    }

    /// Writes `player`'s mark at (row, col). Fails without touching the board if the
    /// coordinate is off the grid or the cell is taken.
    pub fn place(&mut self, row: usize, col: usize, player: Player) -> Result<(), EngineError> {
        self.apply_move(Move::new(row, col)?, player)
    }

    pub fn apply_move(&mut self, move_: Move, player: Player) -> Result<(), EngineError> {
        if self.cell(move_) != Cell::Empty {
            return Err(EngineError::CellOccupied {
                row: move_.row(),
                col: move_.col(),
            });
        }

        self.mark(move_, player);
        Ok(())
    }

    // unchecked write for the search, which only ever visits empty cells
    pub(crate) fn mark(&mut self, move_: Move, player: Player) {
        debug_assert_eq!(self.cell(move_), Cell::Empty, "Trying to mark an occupied cell");

        self.cells[move_.index()] = Cell::Occupied(player);
    }

    pub fn clear(&mut self, move_: Move) {
        self.cells[move_.index()] = Cell::Empty;
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&cell| cell != Cell::Empty)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&cell| cell == Cell::Empty)
    }

    pub fn has_won(&self, player: Player) -> bool {
        let mark = Cell::Occupied(player);

        LINES
            .iter()
            .any(|line| line.iter().all(|&index| self.cells[index] == mark))
    }

    /// The player owning a complete line. Machine is checked first; a board where both
    /// players own a line is unreachable from legal play.
    pub fn winner(&self) -> Option<Player> {
        [Player::Machine, Player::Human]
            .into_iter()
            .find(|&player| self.has_won(player))
    }

    /// Empty cells in row-major order. The search relies on this order for its tie-break.
    pub fn empty_cells(&self) -> impl Iterator<Item = Move> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_index, &cell)| cell == Cell::Empty)
            .map(|(index, _cell)| Move::from_index(index))
    }

    pub fn marks(&self, player: Player) -> usize {
        self.cells
            .iter()
            .filter(|&&cell| cell == Cell::Occupied(player))
            .count()
    }

    /// Whose turn it is, given who opened the game.
    pub fn player_to_move(&self, first: Player) -> Player {
        if self.marks(first) > self.marks(!first) {
            !first
        } else {
            first
        }
    }

    /// Win is checked before draw, so a full board with a line counts as a win.
    pub fn state(&self) -> GameState {
        match self.winner() {
            Some(player) => GameState::Won(player),
            None if self.is_full() => GameState::Draw,
            None => GameState::InProgress,
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..SIZE {
            if row > 0 {
                write!(f, "\n-+-+-\n")?;
            }

            for col in 0..SIZE {
                if col > 0 {
                    write!(f, "|")?;
                }

                write!(f, "{}", self.cells[row * SIZE + col].symbol())?;
            }
        }

        Ok(())
    }
}

impl Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Board({})", self.to_notation())
    }
}

/*====================================================================================================================*/

#[cfg(test)]
mod tests {
    use super::*;
    use Player::{Human, Machine};

    fn board_from(rows: [&str; 3]) -> Board {
        rows.join("/").parse().unwrap()
    }

    #[test]
    fn test_board_new() {
        let board = Board::new();

        assert!(board.is_empty());
        assert!(!board.is_full());
        assert_eq!(board.winner(), None);
        assert_eq!(board.state(), GameState::InProgress);
        assert_eq!(board.empty_cells().count(), 9);
    }

    #[test]
    fn test_place_marks_cell() {
        let mut board = Board::new();

        board.place(1, 2, Human).unwrap();

        assert_eq!(board.get(1, 2).unwrap(), Cell::Occupied(Human));
        assert_eq!(board.marks(Human), 1);
        assert_eq!(board.marks(Machine), 0);
    }

    #[test]
    fn test_place_on_occupied_cell_is_rejected() {
        let mut board = Board::new();
        board.place(0, 0, Machine).unwrap();
        let before = board.clone();

        assert_eq!(
            board.place(0, 0, Human),
            Err(EngineError::CellOccupied { row: 0, col: 0 })
        );
        assert_eq!(board, before);
        assert_eq!(board.get(0, 0).unwrap(), Cell::Occupied(Machine));
    }

    #[test]
    fn test_place_out_of_range_is_rejected() {
        let mut board = Board::new();

        assert_eq!(board.place(3, 0, Human), Err(EngineError::OutOfRange { row: 3, col: 0 }));
        assert_eq!(board.place(0, 7, Human), Err(EngineError::OutOfRange { row: 0, col: 7 }));
        assert!(board.is_empty());
    }

    #[test]
    fn test_clear_resets_cell() {
        let mut board = Board::new();
        board.place(2, 1, Machine).unwrap();

        board.clear(Move::new(2, 1).unwrap());
        // clearing an empty cell is a no-op
        board.clear(Move::new(0, 0).unwrap());

        assert!(board.is_empty());
    }

    #[test]
    fn test_empty_cells_row_major() {
        let board = board_from(["X.O", "...", "O.X"]);

        let cells: Vec<(usize, usize)> = board.empty_cells().map(|m| (m.row(), m.col())).collect();

        assert_eq!(cells, vec![(0, 1), (1, 0), (1, 1), (1, 2), (2, 1)]);
    }

    #[test]
    fn test_all_lines_win() {
        for line in LINES {
            let mut board = Board::new();
            for index in line {
                board.mark(Move::from_index(index), Human);
            }

            assert_eq!(board.winner(), Some(Human), "line {:?}", line);
        }
    }

    #[test]
    fn test_only_completed_line_counts() {
        let board = board_from(["XXX", "OO.", "..."]);

        assert_eq!(board.winner(), Some(Machine));
        assert!(!board.has_won(Human));
        assert_eq!(board.state(), GameState::Won(Machine));
    }

    #[test]
    fn test_full_board_draw() {
        let board = board_from(["XOX", "XOO", "OXX"]);

        assert_eq!(board.winner(), None);
        assert!(board.is_full());
        assert_eq!(board.state(), GameState::Draw);
    }

    #[test]
    fn test_win_on_full_board_is_not_draw() {
        let board = board_from(["XOX", "OXO", "OXX"]);

        assert!(board.is_full());
        assert_eq!(board.state(), GameState::Won(Machine));
    }

    #[test]
    fn test_player_to_move() {
        let mut board = Board::new();
        assert_eq!(board.player_to_move(Human), Human);

        board.place(1, 1, Human).unwrap();
        assert_eq!(board.player_to_move(Human), Machine);

        board.place(0, 0, Machine).unwrap();
        assert_eq!(board.player_to_move(Human), Human);
    }

    #[test]
    fn test_display() {
        let board = board_from(["X.O", "...", "..X"]);

        assert_eq!(board.to_string(), "X|.|O\n-+-+-\n.|.|.\n-+-+-\n.|.|X");
    }

    #[test]
    fn test_game_state_display() {
        assert_eq!(GameState::Won(Human).to_string(), "Human wins!");
        assert_eq!(GameState::Won(Machine).to_string(), "Machine wins!");
        assert_eq!(GameState::Draw.to_string(), "It's a draw!");
    }
}
