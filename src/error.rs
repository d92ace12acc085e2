use std::fmt;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// A read asked for more bytes than the input had left.
    TruncatedInput { requested: usize, available: usize },
    /// The tag byte didn't match any known format, and no unknown-tag handler accepted it.
    Unimplemented { tag: u8 },
    /// Arrays, maps, or unknown-tag handler calls were nested deeper than the configured limit.
    DepthLimit { max: usize },
    /// Failure reported by a caller-supplied unknown-tag handler.
    Custom(String),
}

impl Error {
    /// Build a [`Error::Custom`] from anything printable. Meant for unknown-tag handlers.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::TruncatedInput {
                requested,
                available,
            } => write!(
                f,
                "Input truncated: needed {} bytes, but only {} remain",
                requested, available
            ),
            Error::Unimplemented { tag } => write!(
                f,
                "No decoder for tag byte 0x{:02x}; supply an unknown-tag handler to read it",
                tag
            ),
            Error::DepthLimit { max } => {
                write!(f, "Nesting depth limit exceeded (maximum is {})", max)
            }
            Error::Custom(ref msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for Error {}
