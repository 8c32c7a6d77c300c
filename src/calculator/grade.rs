/// Lower bound of each grade-point band, highest first.
///
/// | Mark    | Grade point |
/// |---------|-------------|
/// | >= 90   | 10          |
/// | >= 80   | 9           |
/// | >= 70   | 8           |
/// | >= 60   | 7           |
/// | >= 50   | 6           |
/// | >= 45   | 5           |
/// | >= 40   | 4           |
/// | < 40    | 0           |
///
/// Bands are 10 marks wide down to 50, then 5 wide down to the pass mark at 40.
static GRADE_SCALE: &[(i64, u8)] = &[
    (90, 10),
    (80, 9),
    (70, 8),
    (60, 7),
    (50, 6),
    (45, 5),
    (40, 4),
];

/// Converts a mark into its grade point.
///
/// Never fails; range checks belong to the caller.
pub fn grade_point(mark: i64) -> u8 {
    GRADE_SCALE
        .iter()
        .find(|(min, _)| mark >= *min)
        .map(|(_, gp)| *gp)
        .unwrap_or(0)
}
