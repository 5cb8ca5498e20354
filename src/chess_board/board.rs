use super::model::{ChessField, Piece, PieceType, Player, Square};
use crate::error::{ChessError, ChessResult};
use std::fmt;

const BACK_RANK: [PieceType; 8] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

/// Plain 8x8 piece placement, indexed `squares[row][col]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub squares: [[Square; 8]; 8],
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl Board {
    pub fn empty() -> Self {
        Self {
            squares: [[Square::Empty; 8]; 8],
        }
    }

    /// Standard starting array with White on rows 0 and 1.
    pub fn standard() -> Self {
        let mut board = Self::empty();
        for (col, kind) in BACK_RANK.iter().enumerate() {
            board.squares[0][col] = Square::Occupied(Piece::new(Player::White, *kind));
            board.squares[1][col] = Square::Occupied(Piece::new(Player::White, PieceType::Pawn));
            board.squares[6][col] = Square::Occupied(Piece::new(Player::Black, PieceType::Pawn));
            board.squares[7][col] = Square::Occupied(Piece::new(Player::Black, *kind));
        }
        board
    }

    /// Parses eight strings of eight characters, rank 8 first.
    ///
    /// `.` marks an empty square, letters follow [`Piece::from_char`]
    /// (uppercase White, lowercase Black).
    pub fn from_diagram(rows: &[&str; 8]) -> ChessResult<Self> {
        let mut board = Self::empty();
        for (index, line) in rows.iter().enumerate() {
            let row = 7 - index;
            let cells: Vec<char> = line.chars().collect();
            if cells.len() != 8 {
                return Err(ChessError::InvalidDiagram {
                    reason: format!("rank {} has {} squares instead of 8", row + 1, cells.len()),
                });
            }
            for (col, c) in cells.into_iter().enumerate() {
                board.squares[row][col] = match c {
                    '.' => Square::Empty,
                    _ => match Piece::from_char(c) {
                        Some(piece) => Square::Occupied(piece),
                        None => {
                            return Err(ChessError::InvalidDiagram {
                                reason: format!("unknown piece character {:?}", c),
                            })
                        }
                    },
                };
            }
        }
        Ok(board)
    }

    pub fn get(&self, field: ChessField) -> Square {
        self.squares[field.row as usize][field.col as usize]
    }

    pub fn set(&mut self, field: ChessField, square: Square) {
        self.squares[field.row as usize][field.col as usize] = square;
    }

    /// Removes and returns whatever stands on `field`.
    pub fn take(&mut self, field: ChessField) -> Square {
        std::mem::replace(&mut self.squares[field.row as usize][field.col as usize], Square::Empty)
    }

    /// All occupied squares in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (ChessField, Piece)> + '_ {
        self.squares.iter().enumerate().flat_map(|(row, line)| {
            line.iter().enumerate().filter_map(move |(col, square)| {
                square.piece().map(|piece| (ChessField::new(row as u8, col as u8), piece))
            })
        })
    }

    pub fn pieces_of(&self, player: Player) -> impl Iterator<Item = (ChessField, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.player == player)
    }

    pub fn find_kings(&self, player: Player) -> Vec<ChessField> {
        self.pieces_of(player)
            .filter(|(_, piece)| piece.kind == PieceType::King)
            .map(|(field, _)| field)
            .collect()
    }

    /// Eight strings in the format accepted by [`Board::from_diagram`].
    pub fn to_diagram(&self) -> Vec<String> {
        (0..8)
            .rev()
            .map(|row| {
                self.squares[row]
                    .iter()
                    .map(|square| square.piece().map_or('.', |piece| piece.to_char()))
                    .collect()
            })
            .collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "    a   b   c   d   e   f   g   h  ")?;
        writeln!(f, "  ┌───┬───┬───┬───┬───┬───┬───┬───┐")?;
        for row in (0..8).rev() {
            write!(f, "{} │", row + 1)?;
            for col in 0..8 {
                let symbol = self.squares[row][col].piece().map_or(' ', |piece| piece.to_char());
                write!(f, " {} │", symbol)?;
            }
            writeln!(f, " {}", row + 1)?;
            if row > 0 {
                writeln!(f, "  ├───┼───┼───┼───┼───┼───┼───┼───┤")?;
            }
        }
        writeln!(f, "  └───┴───┴───┴───┴───┴───┴───┴───┘")?;
        write!(f, "    a   b   c   d   e   f   g   h  ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_setup() {
        let board = Board::standard();
        assert_eq!(board.pieces().count(), 32);
        assert_eq!(board.find_kings(Player::White), vec![ChessField::new(0, 4)]);
        assert_eq!(board.find_kings(Player::Black), vec![ChessField::new(7, 4)]);
        assert_eq!(
            board.get(ChessField::new(7, 3)),
            Square::Occupied(Piece::new(Player::Black, PieceType::Queen))
        );
        assert!(board.get(ChessField::new(4, 4)).is_empty());
    }

    #[test]
    fn test_diagram_round_trip_of_start_position() {
        let rows = [
            "rnbqkbnr", "pppppppp", "........", "........", "........", "........", "PPPPPPPP", "RNBQKBNR",
        ];
        let board = Board::from_diagram(&rows).unwrap();
        assert_eq!(board, Board::standard());
        assert_eq!(board.to_diagram(), rows.to_vec());
    }

    #[test]
    fn test_diagram_errors() {
        let short_rank = ["rnbqkbnr", "ppppppp", "........", "........", "........", "........", "PPPPPPPP", "RNBQKBNR"];
        assert!(matches!(Board::from_diagram(&short_rank), Err(ChessError::InvalidDiagram { .. })));

        let unknown = ["rnbqkbnr", "pppppppp", "....x...", "........", "........", "........", "PPPPPPPP", "RNBQKBNR"];
        assert!(matches!(Board::from_diagram(&unknown), Err(ChessError::InvalidDiagram { .. })));
    }

    #[test]
    fn test_take_empties_the_square() {
        let mut board = Board::standard();
        let e2 = ChessField::new(1, 4);
        assert_eq!(board.take(e2), Square::Occupied(Piece::new(Player::White, PieceType::Pawn)));
        assert!(board.get(e2).is_empty());
        assert_eq!(board.take(e2), Square::Empty);
    }

    #[test]
    fn test_render() {
        let rendered = Board::standard().to_string();
        println!("{}", rendered);
        assert!(rendered.starts_with("    a   b"));
        assert!(rendered.contains("8 │ r │ n │ b │ q │ k │ b │ n │ r │ 8"));
        assert!(rendered.contains("1 │ R │ N │ B │ Q │ K │ B │ N │ R │ 1"));
    }
}
