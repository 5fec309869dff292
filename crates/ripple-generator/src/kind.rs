//! Puzzle sizes and difficulty tiers.

use std::str::FromStr;

/// Difficulty tier, controlling how many clues stay revealed.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    derive_more::Display,
    derive_more::IsVariant,
)]
pub enum Difficulty {
    /// Many clues.
    #[display("easy")]
    Easy,
    /// A moderate number of clues.
    #[display("medium")]
    Medium,
    /// Few clues.
    #[display("hard")]
    Hard,
}

impl Difficulty {
    /// All tiers, easiest first.
    pub const ALL: [Self; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// Fraction of cells the clue reducer aims to leave revealed.
    #[must_use]
    pub fn clue_ratio(self) -> f64 {
        match self {
            Self::Easy => 0.55,
            Self::Medium => 0.42,
            Self::Hard => 0.32,
        }
    }

    /// Target number of revealed cells for a grid with `cells` cells.
    ///
    /// # Examples
    ///
    /// ```
    /// use ripple_generator::Difficulty;
    ///
    /// assert_eq!(Difficulty::Easy.target_clues(36), 20);
    /// assert_eq!(Difficulty::Hard.target_clues(36), 12);
    /// ```
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    #[expect(clippy::cast_sign_loss)]
    #[expect(clippy::cast_precision_loss)]
    pub fn target_clues(self, cells: usize) -> usize {
        ((cells as f64 * self.clue_ratio()).ceil() as usize).min(cells)
    }
}

/// Error returned when parsing a [`Difficulty`] or a [`PuzzleKind`] fails.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseKindError {
    /// Unknown difficulty name.
    #[display("unknown difficulty {_0:?}, expected easy, medium or hard")]
    Difficulty(#[error(not(source))] String),
    /// Malformed `<rows>x<cols>` size.
    #[display("invalid size {_0:?}, expected <rows>x<cols>")]
    Size(#[error(not(source))] String),
    /// Malformed `<rows>x<cols>-<difficulty>` key.
    #[display("invalid puzzle kind {_0:?}, expected <rows>x<cols>-<difficulty>")]
    Kind(#[error(not(source))] String),
}

impl FromStr for Difficulty {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseKindError::Difficulty(s.to_owned()))
    }
}

/// Parses a `<rows>x<cols>` size such as `6x6`.
///
/// # Errors
///
/// Returns [`ParseKindError::Size`] if the string is malformed or a side is zero.
pub fn parse_size(s: &str) -> Result<(usize, usize), ParseKindError> {
    let err = || ParseKindError::Size(s.to_owned());
    let (rows, cols) = s.split_once(['x', 'X']).ok_or_else(err)?;
    let rows: usize = rows.trim().parse().map_err(|_| err())?;
    let cols: usize = cols.trim().parse().map_err(|_| err())?;
    if rows == 0 || cols == 0 {
        return Err(err());
    }
    Ok((rows, cols))
}

/// A puzzle configuration: grid size and difficulty.
///
/// Displays as `<rows>x<cols>-<difficulty>`, the key used by batch checkpoints.
///
/// # Examples
///
/// ```
/// use ripple_generator::{Difficulty, PuzzleKind};
///
/// let kind: PuzzleKind = "6x7-hard".parse()?;
/// assert_eq!(kind, PuzzleKind::new(6, 7, Difficulty::Hard));
/// assert_eq!(kind.to_string(), "6x7-hard");
/// # Ok::<(), ripple_generator::ParseKindError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
#[display("{rows}x{cols}-{difficulty}")]
pub struct PuzzleKind {
    /// Grid height.
    pub rows: usize,
    /// Grid width.
    pub cols: usize,
    /// Difficulty tier.
    pub difficulty: Difficulty,
}

impl PuzzleKind {
    /// Creates a puzzle kind.
    #[must_use]
    pub const fn new(rows: usize, cols: usize, difficulty: Difficulty) -> Self {
        Self {
            rows,
            cols,
            difficulty,
        }
    }

    /// Number of cells.
    #[must_use]
    pub fn cells(&self) -> usize {
        self.rows * self.cols
    }

    /// Length of the longer side.
    #[must_use]
    pub fn side(&self) -> usize {
        self.rows.max(self.cols)
    }

    /// Target number of revealed cells.
    #[must_use]
    pub fn target_clues(&self) -> usize {
        self.difficulty.target_clues(self.cells())
    }
}

impl FromStr for PuzzleKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (size, difficulty) = s
            .rsplit_once('-')
            .ok_or_else(|| ParseKindError::Kind(s.to_owned()))?;
        let (rows, cols) = parse_size(size)?;
        Ok(Self::new(rows, cols, difficulty.parse()?))
    }
}
