/// Crate-wide error type.
///
/// Each variant maps to a process exit code so the binary can report
/// distinct failure classes to scripts:
///
/// - 2: bad configuration / invalid inputs / io
/// - 3: not enough data, or a query outside the model domain
/// - 4: numerical failure
///
/// Warnings (non-convergence, ill-conditioning) are deliberately *not*
/// errors; they travel as flags on fit results so callers can decide
/// whether to accept, retry with a different guess, or bail.
#[derive(Clone, PartialEq)]
pub enum AppError {
    /// Altitude outside the standard-atmosphere layer stack.
    Domain { altitude_m: f64 },
    /// Fewer samples than the fit requires.
    InsufficientData { needed: usize, got: usize },
    /// X and Y sample arrays disagree in length.
    MismatchedSamples { xs: usize, ys: usize },
    /// Invalid altitude grid specification.
    InvalidGrid(String),
    /// Malformed option value (wrong arity, out of range).
    InvalidArgument(String),
    /// The least-squares solver could not produce a finite solution.
    LeastSquares(String),
    /// Filesystem / serialization failure while exporting results.
    Io(String),
}

impl AppError {
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Domain { .. } => 3,
            AppError::InsufficientData { .. } => 3,
            AppError::MismatchedSamples { .. } => 2,
            AppError::InvalidGrid(_) => 2,
            AppError::InvalidArgument(_) => 2,
            AppError::LeastSquares(_) => 4,
            AppError::Io(_) => 2,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Domain { altitude_m } => write!(
                f,
                "Altitude {altitude_m} m is outside the standard-atmosphere domain."
            ),
            AppError::InsufficientData { needed, got } => write!(
                f,
                "Insufficient data: need at least {needed} samples, got {got}."
            ),
            AppError::MismatchedSamples { xs, ys } => write!(
                f,
                "Sample arrays disagree in length: {xs} altitudes vs {ys} observations."
            ),
            AppError::InvalidGrid(msg) => write!(f, "Invalid altitude grid: {msg}"),
            AppError::InvalidArgument(msg) => write!(f, "Invalid argument: {msg}"),
            AppError::LeastSquares(msg) => write!(f, "Least-squares solve failed: {msg}"),
            AppError::Io(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AppError({}): {self}", self.exit_code())
    }
}

impl std::error::Error for AppError {}
