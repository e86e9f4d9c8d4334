/// Repeat count typed before a command.
///
/// `Empty` (no count typed) is distinct from an explicit `1`: `|` goes to column 0 without a
/// count but to column 1 with one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Iterations {
    #[default]
    Empty,
    Accumulating(String),
}

/// What a digit key turned out to mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigitOutcome {
    Accumulated,
    /// A leading `0` is the beginning-of-line motion, not a digit.
    BeginningOfLine,
    /// Not a decimal digit; nothing changed.
    Ignored,
}

/// Counts saturate here so runaway input cannot spin a widget for ever.
pub const MAX_ITERATIONS: usize = 99_999;

impl Iterations {
    pub fn add_digit(&mut self, digit: char) -> DigitOutcome {
        if !digit.is_ascii_digit() {
            return DigitOutcome::Ignored;
        }
        match self {
            Self::Empty if digit == '0' => DigitOutcome::BeginningOfLine,
            Self::Empty => {
                *self = Self::Accumulating(digit.to_string());
                DigitOutcome::Accumulated
            }
            Self::Accumulating(digits) => {
                if digits.len() < 5 {
                    digits.push(digit);
                }
                DigitOutcome::Accumulated
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// The explicit count, if one was typed.
    pub fn explicit(&self) -> Option<usize> {
        match self {
            Self::Empty => None,
            Self::Accumulating(digits) => Some(
                digits
                    .parse::<usize>()
                    .map_or(MAX_ITERATIONS, |n| n.clamp(1, MAX_ITERATIONS)),
            ),
        }
    }

    /// Count with the default of 1.
    pub fn count(&self) -> usize {
        self.explicit().unwrap_or(1)
    }

    /// Consume the accumulator, returning the explicit count.
    pub fn take(&mut self) -> Option<usize> {
        let n = self.explicit();
        self.reset();
        n
    }

    /// Consume the accumulator, returning the count with the default of 1.
    pub fn take_count(&mut self) -> usize {
        self.take().unwrap_or(1)
    }

    pub fn reset(&mut self) {
        *self = Self::Empty;
    }
}
