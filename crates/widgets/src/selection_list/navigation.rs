/// Direction of a roving-focus step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

impl Direction {
    /// Index one step from `current` among `len` positions, wrapping at both ends.
    pub(crate) fn step(self, current: usize, len: usize) -> usize {
        debug_assert!(len > 0);
        match self {
            Direction::Previous if current == 0 => len - 1,
            Direction::Previous => current - 1,
            Direction::Next if current + 1 >= len => 0,
            Direction::Next => current + 1,
        }
    }
}
